use crate::error::LexError;
use crate::pattern::{match_anchored, Pattern};
use crate::rules::LexerRules;
use crate::token::{Token, TokenId};
use stringes::{Chare, Position, SpanError, Stringe};
use tracing::trace;

/// A forward-moving read position over a stringe.
///
/// All operations are anchored at the current position and never move it
/// past the end of the stringe. Positions count characters.
#[derive(Debug, Clone)]
pub struct StringeReader {
    stringe: Stringe,
    position: usize,
}

impl StringeReader {
    /// Creates a reader positioned at the start of `stringe`.
    pub fn new(stringe: Stringe) -> Self {
        Self {
            stringe,
            position: 0,
        }
    }

    /// The stringe being read.
    pub fn stringe(&self) -> &Stringe {
        &self.stringe
    }

    /// The current zero-based position of the reader.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the reader. Positions outside `0..=len()` are rejected.
    pub fn set_position(&mut self, position: usize) -> Result<(), SpanError> {
        if position > self.stringe.len() {
            return Err(SpanError::OutOfRange {
                offset: position,
                end: position,
                length: self.stringe.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Source location of the next character to be read.
    pub fn location(&self) -> Position {
        self.slice(self.position, 0).position()
    }

    /// Total length of the stringe being read.
    pub fn len(&self) -> usize {
        self.stringe.len()
    }

    /// Returns true if the stringe being read is empty.
    pub fn is_empty(&self) -> bool {
        self.stringe.is_empty()
    }

    /// Returns true if the reader is at the end of the stringe.
    pub fn is_eof(&self) -> bool {
        self.position >= self.stringe.len()
    }

    /// Returns the unread part of the stringe.
    pub fn remaining(&self) -> Stringe {
        self.slice(self.position, self.stringe.len() - self.position)
    }

    fn slice(&self, offset: usize, length: usize) -> Stringe {
        // Callers stay within `0..=len()`.
        self.stringe
            .sub(offset, length)
            .unwrap_or_else(|_| Stringe::empty(&self.stringe))
    }

    /// Returns the next character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.stringe.char_at(self.position)
    }

    /// Returns the handle of the next character without advancing.
    pub fn peek_chare(&self) -> Option<Chare> {
        self.stringe.chare(self.position)
    }

    /// Reads one character handle.
    pub fn read_chare(&mut self) -> Option<Chare> {
        let chare = self.peek_chare()?;
        self.position += 1;
        Some(chare)
    }

    /// Reads the next `length` characters regardless of content.
    pub fn read(&mut self, length: usize) -> Result<Stringe, SpanError> {
        let read = self.stringe.sub(self.position, length)?;
        self.position += length;
        Ok(read)
    }

    /// Returns true if the next character is `value`.
    pub fn is_next_char(&self, value: char) -> bool {
        self.peek() == Some(value)
    }

    /// Returns true if `value` occurs at the current position. An empty
    /// literal never matches.
    pub fn is_next_str(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        self.stringe
            .byte_index(self.position)
            .is_some_and(|byte| self.stringe.as_str()[byte..].starts_with(value))
    }

    /// Returns the match of `pattern` starting exactly at the current
    /// position, without advancing.
    pub fn peek_pattern(&self, pattern: &Pattern) -> Option<Stringe> {
        let length = match_anchored(pattern, &self.stringe, self.position)?;
        Some(self.slice(self.position, length))
    }

    /// Consumes `value` if it is the next character.
    pub fn eat_char(&mut self, value: char) -> bool {
        if !self.is_next_char(value) {
            return false;
        }
        self.position += 1;
        true
    }

    /// Consumes `value` if it occurs at the current position.
    pub fn eat_str(&mut self, value: &str) -> bool {
        if !self.is_next_str(value) {
            return false;
        }
        self.position += value.chars().count();
        true
    }

    /// Consumes and returns the match of `pattern` starting exactly at the
    /// current position.
    pub fn eat_pattern(&mut self, pattern: &Pattern) -> Option<Stringe> {
        let matched = self.peek_pattern(pattern)?;
        self.position += matched.len();
        Some(matched)
    }

    /// Advances past every character matching `predicate`, returning how
    /// many were skipped.
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.position += 1;
        }
        self.position - start
    }

    /// Advances past whitespace, returning how many characters were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(char::is_whitespace)
    }

    /// Reads one token using `rules`.
    ///
    /// At end of input this yields the rule set's end token, or
    /// [`LexError::EndOfInput`] when it has none. Input that no rule matches
    /// is either collected into a fallback token or reported as
    /// [`LexError::InvalidToken`], leaving the reader on the offending
    /// character.
    pub fn eat_token<T: TokenId>(&mut self, rules: &LexerRules<T>) -> Result<Token<T>, LexError> {
        if self.is_eof() {
            let id = rules.end_token().ok_or(LexError::EndOfInput)?;
            return Ok(Token::new(id, self.slice(self.position, 0)));
        }

        let fallback = rules.fallback();
        let undefined_start = self.position;

        loop {
            let skipped = self.position - undefined_start;

            if self.is_eof() {
                // Only reachable while collecting a fallback run.
                if let Some(fallback) = fallback {
                    let run = self.stringe.sub(undefined_start, skipped)?;
                    trace!(length = skipped, "flushing fallback run at end of input");
                    return Ok(Token::new(fallback.id(), fallback.apply(run)));
                }
                return Err(LexError::EndOfInput);
            }

            if let Some(found) = rules.match_at(&self.stringe, self.position) {
                if let (Some(fallback), true) = (fallback, skipped > 0) {
                    let run = self.stringe.sub(undefined_start, skipped)?;
                    trace!(length = skipped, "flushing fallback run");
                    return Ok(Token::new(fallback.id(), fallback.apply(run)));
                }
                let token = Token::new(found.id, self.stringe.sub(self.position, found.length)?);
                self.position += found.length;
                return Ok(token);
            }

            match fallback {
                Some(_) => self.position += 1,
                None => {
                    let chare = self.peek_chare().ok_or(LexError::EndOfInput)?;
                    return Err(LexError::invalid_token(chare.character(), chare.position()));
                }
            }
        }
    }
}

impl From<Stringe> for StringeReader {
    fn from(value: Stringe) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StringeReader {
    fn from(value: &str) -> Self {
        Self::new(Stringe::new(value))
    }
}
