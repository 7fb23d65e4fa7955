use crate::chare::Chare;
use crate::position::Position;
use std::ops::Range;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// The text every stringe of one family points into.
///
/// Built once when a root stringe is created and shared by `Arc` afterwards.
/// All tables are indexed by character, not by byte.
pub(crate) struct SourceText {
    text: Box<str>,
    /// Byte offset of every character, followed by `text.len()`.
    char_starts: Box<[usize]>,
    /// Number of base characters before each index (`len + 1` entries).
    base_counts: Box<[usize]>,
    /// Character index at which each line begins.
    line_starts: Box<[usize]>,
    chares: Box<[OnceLock<Chare>]>,
}

impl SourceText {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_starts = Vec::with_capacity(text.len() + 1);
        let mut line_starts = vec![0];
        for (index, (byte, ch)) in text.char_indices().enumerate() {
            char_starts.push(byte);
            if ch == '\n' {
                line_starts.push(index + 1);
            }
        }
        let char_count = char_starts.len();
        char_starts.push(text.len());

        // Extended grapheme boundaries always fall on character boundaries,
        // so a single forward walk marks the base characters.
        let mut graphemes = text.grapheme_indices(true).map(|(byte, _)| byte).peekable();
        let mut base_counts = Vec::with_capacity(char_count + 1);
        let mut count = 0;
        base_counts.push(count);
        for &byte in &char_starts[..char_count] {
            if graphemes.next_if_eq(&byte).is_some() {
                count += 1;
            }
            base_counts.push(count);
        }

        Self {
            text: text.into(),
            char_starts: char_starts.into_boxed_slice(),
            base_counts: base_counts.into_boxed_slice(),
            line_starts: line_starts.into_boxed_slice(),
            chares: (0..char_count).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Length in characters.
    pub(crate) fn len(&self) -> usize {
        self.chares.len()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn byte_range(&self, offset: usize, length: usize) -> Range<usize> {
        debug_assert!(offset + length <= self.len());
        self.char_starts[offset]..self.char_starts[offset + length]
    }

    pub(crate) fn slice(&self, offset: usize, length: usize) -> &str {
        &self.text[self.byte_range(offset, length)]
    }

    pub(crate) fn byte_of(&self, index: usize) -> usize {
        self.char_starts[index]
    }

    /// Character index of an absolute byte offset, if it is a boundary.
    pub(crate) fn char_index(&self, byte: usize) -> Option<usize> {
        self.char_starts.binary_search(&byte).ok()
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        self.text[self.char_starts[index]..].chars().next()
    }

    pub(crate) fn is_base(&self, index: usize) -> bool {
        index < self.len() && self.base_counts[index + 1] > self.base_counts[index]
    }

    /// Line and column of the character at `index` (`index <= len`).
    pub(crate) fn position_of(&self, index: usize) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= index)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let column = 1 + self.base_counts[index] - self.base_counts[line_start];
        Position::at(line + 1, column, index)
    }

    /// Returns the cached handle for the character at `index`.
    pub(crate) fn chare(&self, index: usize) -> Option<Chare> {
        let ch = self.char_at(index)?;
        let cell = self.chares.get(index)?;
        Some(*cell.get_or_init(|| Chare::new(ch, self.position_of(index))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_tables() {
        let source = SourceText::new("ab\ncd");
        assert_eq!(source.len(), 5);
        assert_eq!(source.slice(3, 2), "cd");
        assert_eq!(source.position_of(0), Position::at(1, 1, 0));
        assert_eq!(source.position_of(2), Position::at(1, 3, 2));
        assert_eq!(source.position_of(3), Position::at(2, 1, 3));
        assert_eq!(source.position_of(5), Position::at(2, 3, 5));
    }

    #[test]
    fn test_combining_marks_are_not_base() {
        // "e" + COMBINING ACUTE ACCENT, then "x"
        let source = SourceText::new("e\u{301}x");
        assert!(source.is_base(0));
        assert!(!source.is_base(1));
        assert!(source.is_base(2));
        assert_eq!(source.position_of(2).column, 2);
    }

    #[test]
    fn test_multibyte_byte_mapping() {
        let source = SourceText::new("你好x");
        assert_eq!(source.byte_of(1), 3);
        assert_eq!(source.char_index(6), Some(2));
        assert_eq!(source.char_index(1), None);
        assert_eq!(source.char_at(2), Some('x'));
        assert_eq!(source.char_at(3), None);
    }

    #[test]
    fn test_chare_is_cached() {
        let source = SourceText::new("a\nb");
        let first = source.chare(2);
        let second = source.chare(2);
        assert_eq!(first, second);
        assert!(source.chares[2].get().is_some());
        assert!(source.chares[0].get().is_none());
    }
}
