use crate::position::Position;
use std::fmt;

/// A single character together with the place it was read from.
///
/// Handles are cached per source index, so reading the same character
/// through different stringes yields the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chare {
    character: char,
    position: Position,
}

impl Chare {
    pub(crate) fn new(character: char, position: Position) -> Self {
        Self {
            character,
            position,
        }
    }

    /// The character itself.
    pub fn character(&self) -> char {
        self.character
    }

    /// Where the character sits in the source text.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Absolute character offset in the source text.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// The 1-based line of the character.
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// The 1-based column of the character.
    pub fn column(&self) -> usize {
        self.position.column
    }

    /// Returns true if the character is Unicode whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.character.is_whitespace()
    }
}

impl PartialEq<char> for Chare {
    fn eq(&self, other: &char) -> bool {
        self.character == *other
    }
}

impl PartialEq<Chare> for char {
    fn eq(&self, other: &Chare) -> bool {
        *self == other.character
    }
}

impl From<Chare> for char {
    fn from(value: Chare) -> Self {
        value.character
    }
}

impl fmt::Display for Chare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character)
    }
}
