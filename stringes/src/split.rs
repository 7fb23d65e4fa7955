use crate::stringe::Stringe;
use std::iter::{Enumerate, FusedIterator};
use std::str::Chars;

/// Whether zero-length segments are produced by [`Split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitOptions {
    #[default]
    KeepEmpty,
    RemoveEmpty,
}

/// Lazy iterator over the segments of a stringe between separator characters.
///
/// Created by [`Stringe::split`] and [`Stringe::splitn`]. Every segment is a
/// substringe of the original and keeps its position metadata.
pub struct Split<'a> {
    stringe: &'a Stringe,
    separators: &'a [char],
    options: SplitOptions,
    chars: Enumerate<Chars<'a>>,
    start: usize,
    /// Separated segments still allowed before the remainder is emitted.
    limit: Option<usize>,
    finished: bool,
}

impl<'a> Split<'a> {
    pub(crate) fn new(
        stringe: &'a Stringe,
        separators: &'a [char],
        count: Option<usize>,
        options: SplitOptions,
    ) -> Self {
        Self {
            stringe,
            separators,
            options,
            chars: stringe.as_str().chars().enumerate(),
            start: 0,
            limit: count.map(|count| count.saturating_sub(1)),
            finished: count == Some(0),
        }
    }

    fn keep(&self, segment: &Stringe) -> bool {
        self.options == SplitOptions::KeepEmpty || !segment.is_empty()
    }

    /// Emits the text after the last separator. Once the segment cap is
    /// reached the rest is emitted even when empty.
    fn remainder(&mut self, capped: bool) -> Option<Stringe> {
        self.finished = true;
        let segment = self
            .stringe
            .derive(self.start, self.stringe.len() - self.start);
        (capped || self.keep(&segment)).then_some(segment)
    }
}

impl Iterator for Split<'_> {
    type Item = Stringe;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            if self.limit == Some(0) {
                return self.remainder(true);
            }
            match self.chars.next() {
                Some((index, ch)) if self.separators.contains(&ch) => {
                    let segment = self.stringe.derive(self.start, index - self.start);
                    self.start = index + 1;
                    if self.keep(&segment) {
                        if let Some(limit) = self.limit.as_mut() {
                            *limit -= 1;
                        }
                        return Some(segment);
                    }
                }
                Some(_) => {}
                None => return self.remainder(false),
            }
        }
        None
    }
}

impl FusedIterator for Split<'_> {}
