use stringes::{Position, SpanError};
use thiserror::Error;

/// Errors raised while pulling tokens from a reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// No rule matched at the given position and no fallback rule is set.
    #[error("(Ln {line}, Col {column}) Invalid token '{found}'")]
    InvalidToken {
        line: usize,
        column: usize,
        offset: usize,
        found: char,
    },

    /// A token was requested at the end of input and the rules define no
    /// end token.
    #[error("unexpected end of input")]
    EndOfInput,

    #[error(transparent)]
    Span(#[from] SpanError),
}

impl LexError {
    pub(crate) fn invalid_token(found: char, position: Position) -> Self {
        LexError::InvalidToken {
            line: position.line,
            column: position.column,
            offset: position.offset,
            found,
        }
    }

    /// Source position of the error, when it has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::InvalidToken {
                line,
                column,
                offset,
                ..
            } => Some(Position::at(*line, *column, *offset)),
            _ => None,
        }
    }
}

/// Errors raised while building a [`LexerRules`](crate::LexerRules) set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("literal rules cannot be empty")]
    EmptyLiteral,

    #[error("literal batch contains no literals")]
    EmptyBatch,

    #[error("cannot add rules after the rule set has been used")]
    Frozen,

    #[error("a fallback rule is already registered")]
    DuplicateFallback,

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The pattern compiled but its anchored matcher could not be built.
    #[error("failed to build matcher: {0}")]
    Matcher(String),
}
