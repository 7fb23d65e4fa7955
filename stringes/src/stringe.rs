use crate::chare::Chare;
use crate::error::SpanError;
use crate::position::Position;
use crate::source::SourceText;
use crate::split::{Split, SplitOptions};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Immutable, position-aware slice of a shared source text.
///
/// A `Stringe` keeps an `Arc` to the text it was cut from, so deriving
/// substringes never copies. Offsets and lengths count characters, and
/// every stringe knows the line and column of its first character in the
/// original text.
#[derive(Clone)]
pub struct Stringe {
    source: Arc<SourceText>,
    start: Position,
    length: usize,
}

impl Stringe {
    /// Wraps `text` as a root stringe at line 1, column 1.
    pub fn new(text: &str) -> Self {
        let source = Arc::new(SourceText::new(text));
        let length = source.len();
        Self {
            source,
            start: Position::new(),
            length,
        }
    }

    /// Returns a zero-length stringe at the start of `basis`.
    pub fn empty(basis: &Stringe) -> Self {
        basis.derive(0, 0)
    }

    fn absolute(source: &Arc<SourceText>, offset: usize, length: usize) -> Self {
        Self {
            start: source.position_of(offset),
            source: Arc::clone(source),
            length,
        }
    }

    /// Derives a substringe without bounds checks. Callers guarantee
    /// `offset + length <= self.len()`.
    pub(crate) fn derive(&self, offset: usize, length: usize) -> Self {
        debug_assert!(offset + length <= self.length);
        Self::absolute(&self.source, self.start.offset + offset, length)
    }

    /// Character offset of the stringe in the source text.
    pub fn offset(&self) -> usize {
        self.start.offset
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the stringe has no characters.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Character offset just past the stringe in the source text.
    pub fn end(&self) -> usize {
        self.start.offset + self.length
    }

    /// The 1-based line on which the stringe begins.
    pub fn line(&self) -> usize {
        self.start.line
    }

    /// The 1-based column at which the stringe begins.
    pub fn column(&self) -> usize {
        self.start.column
    }

    /// Line, column and offset of the first character.
    pub fn position(&self) -> Position {
        self.start
    }

    /// Returns true unless the stringe covers its entire source text.
    pub fn is_substring(&self) -> bool {
        self.start.offset > 0 || self.length < self.source.len()
    }

    /// The text covered by the stringe.
    pub fn as_str(&self) -> &str {
        self.source.slice(self.start.offset, self.length)
    }

    /// The full text this stringe was derived from.
    pub fn parent_str(&self) -> &str {
        self.source.as_str()
    }

    /// Returns true if both stringes point into the same source text.
    pub fn same_source(&self, other: &Stringe) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }

    /// Creates a substringe of `length` characters starting at `offset`.
    pub fn sub(&self, offset: usize, length: usize) -> Result<Stringe, SpanError> {
        match offset.checked_add(length) {
            Some(end) if end <= self.length => Ok(self.derive(offset, length)),
            _ => Err(SpanError::out_of_range(offset, length, self.length)),
        }
    }

    /// Creates a substringe from `offset` to the end.
    pub fn sub_from(&self, offset: usize) -> Result<Stringe, SpanError> {
        if offset > self.length {
            return Err(SpanError::out_of_range(offset, 0, self.length));
        }
        Ok(self.derive(offset, self.length - offset))
    }

    /// Returns the stringe covering `a` through `b`, both included.
    pub fn range(a: &Stringe, b: &Stringe) -> Result<Stringe, SpanError> {
        if !a.same_source(b) {
            return Err(SpanError::ForeignSource);
        }
        if b.end() < a.offset() {
            return Err(SpanError::Disordered {
                first: a.offset(),
                second: b.offset(),
            });
        }
        Ok(Self::absolute(&a.source, a.offset(), b.end() - a.offset()))
    }

    /// Returns the stringe strictly between the end of `a` and the start of `b`.
    pub fn between(a: &Stringe, b: &Stringe) -> Result<Stringe, SpanError> {
        if !a.same_source(b) {
            return Err(SpanError::ForeignSource);
        }
        if b.offset() < a.end() {
            return Err(SpanError::Disordered {
                first: a.offset(),
                second: b.offset(),
            });
        }
        Ok(Self::absolute(&a.source, a.end(), b.offset() - a.end()))
    }

    /// Character at `index`, relative to the stringe.
    pub fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.length {
            return None;
        }
        self.source.char_at(self.start.offset + index)
    }

    /// Handle for the character at `index`, relative to the stringe.
    pub fn chare(&self, index: usize) -> Option<Chare> {
        if index >= self.length {
            return None;
        }
        self.source.chare(self.start.offset + index)
    }

    /// Iterates over the characters of the stringe.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.as_str().chars()
    }

    /// Iterates over character handles, each with its position.
    pub fn chares(&self) -> Chares<'_> {
        Chares {
            stringe: self,
            index: 0,
        }
    }

    /// Maps a character index to a byte offset into [`Stringe::as_str`].
    /// `index == len()` maps to the byte length.
    pub fn byte_index(&self, index: usize) -> Option<usize> {
        if index > self.length {
            return None;
        }
        let base = self.source.byte_of(self.start.offset);
        Some(self.source.byte_of(self.start.offset + index) - base)
    }

    /// Maps a byte offset into [`Stringe::as_str`] back to a character index.
    pub fn char_index(&self, byte: usize) -> Option<usize> {
        let base = self.source.byte_of(self.start.offset);
        let index = self.source.char_index(base + byte)?;
        (index <= self.end()).then(|| index - self.start.offset)
    }

    /// Index of the first occurrence of `needle` at or after `start`,
    /// relative to this stringe.
    pub fn index_of(&self, needle: &str, start: usize) -> Option<usize> {
        let from = self.byte_index(start)?;
        let found = self.as_str()[from..].find(needle)?;
        self.char_index(from + found)
    }

    /// Like [`Stringe::index_of`], but relative to the source text.
    pub fn index_of_total(&self, needle: &str, start: usize) -> Option<usize> {
        self.index_of(needle, start).map(|index| index + self.start.offset)
    }

    /// Index of the first `needle` at or after `start`, relative to this stringe.
    pub fn index_of_char(&self, needle: char, start: usize) -> Option<usize> {
        self.chars()
            .enumerate()
            .skip(start)
            .find_map(|(index, ch)| (ch == needle).then_some(index))
    }

    /// Like [`Stringe::index_of_char`], but relative to the source text.
    pub fn index_of_char_total(&self, needle: char, start: usize) -> Option<usize> {
        self.index_of_char(needle, start)
            .map(|index| index + self.start.offset)
    }

    /// Number of non-overlapping occurrences of this stringe's value in the
    /// source text.
    pub fn occurrence_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.parent_str().matches(self.as_str()).count()
    }

    /// Removes leading and trailing whitespace.
    pub fn trim(&self) -> Stringe {
        self.trim_by(char::is_whitespace, true, true)
    }

    /// Removes leading whitespace.
    pub fn trim_start(&self) -> Stringe {
        self.trim_by(char::is_whitespace, true, false)
    }

    /// Removes trailing whitespace.
    pub fn trim_end(&self) -> Stringe {
        self.trim_by(char::is_whitespace, false, true)
    }

    /// Removes leading and trailing characters contained in `chars`.
    /// An empty set trims whitespace.
    pub fn trim_matches(&self, chars: &[char]) -> Stringe {
        self.trim_set(chars, true, true)
    }

    /// Removes leading characters contained in `chars`.
    pub fn trim_start_matches(&self, chars: &[char]) -> Stringe {
        self.trim_set(chars, true, false)
    }

    /// Removes trailing characters contained in `chars`.
    pub fn trim_end_matches(&self, chars: &[char]) -> Stringe {
        self.trim_set(chars, false, true)
    }

    fn trim_set(&self, chars: &[char], leading: bool, trailing: bool) -> Stringe {
        if chars.is_empty() {
            self.trim_by(char::is_whitespace, leading, trailing)
        } else {
            self.trim_by(|c| chars.contains(&c), leading, trailing)
        }
    }

    fn trim_by<F>(&self, matches: F, leading: bool, trailing: bool) -> Stringe
    where
        F: Fn(char) -> bool,
    {
        if self.is_empty() {
            return self.clone();
        }
        let mut start = 0;
        let mut end = self.length;
        if leading {
            start = self.chars().take_while(|&c| matches(c)).count();
        }
        if trailing && start < self.length {
            end -= self.chars().rev().take_while(|&c| matches(c)).count();
        }
        self.derive(start, end.max(start) - start)
    }

    /// Splits the stringe on any of `separators`.
    pub fn split<'a>(&'a self, separators: &'a [char], options: SplitOptions) -> Split<'a> {
        Split::new(self, separators, None, options)
    }

    /// Splits into at most `count` segments; the last one holds the rest.
    pub fn splitn<'a>(
        &'a self,
        separators: &'a [char],
        count: usize,
        options: SplitOptions,
    ) -> Split<'a> {
        Split::new(self, separators, Some(count), options)
    }
}

impl fmt::Display for Stringe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Stringe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stringe")
            .field("value", &self.as_str())
            .field("offset", &self.start.offset)
            .field("line", &self.start.line)
            .field("column", &self.start.column)
            .finish()
    }
}

impl From<&str> for Stringe {
    fn from(value: &str) -> Self {
        Stringe::new(value)
    }
}

impl From<String> for Stringe {
    fn from(value: String) -> Self {
        Stringe::new(&value)
    }
}

impl From<&String> for Stringe {
    fn from(value: &String) -> Self {
        Stringe::new(value)
    }
}

impl AsRef<str> for Stringe {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Stringe {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Stringe {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Stringe {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<Stringe> for &str {
    fn eq(&self, other: &Stringe) -> bool {
        *self == other.as_str()
    }
}

impl PartialEq<Stringe> for str {
    fn eq(&self, other: &Stringe) -> bool {
        self == other.as_str()
    }
}

impl PartialEq for Stringe {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other)
            && self.start.offset == other.start.offset
            && self.length == other.length
    }
}

impl Eq for Stringe {}

impl<'a> IntoIterator for &'a Stringe {
    type Item = Chare;
    type IntoIter = Chares<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chares()
    }
}

/// Iterator over the character handles of a stringe.
#[derive(Debug, Clone)]
pub struct Chares<'a> {
    stringe: &'a Stringe,
    index: usize,
}

impl Iterator for Chares<'_> {
    type Item = Chare;

    fn next(&mut self) -> Option<Self::Item> {
        let chare = self.stringe.chare(self.index)?;
        self.index += 1;
        Some(chare)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stringe.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Chares<'_> {}

impl FusedIterator for Chares<'_> {}
