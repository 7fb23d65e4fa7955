//! Rule-driven tokenizer over [`stringes::Stringe`].
//!
//! Build a [`LexerRules`] set once, then pull tokens lazily with
//! [`LexerRules::tokenize`], [`Lexer::tokenize`] or
//! [`StringeReader::eat_token`].

pub mod error;
pub mod lexer;
pub mod pattern;
pub mod reader;
pub mod rules;
pub mod token;

pub use error::{LexError, RuleError};
pub use lexer::{Lexer, Tokens};
pub use pattern::Pattern;
pub use reader::StringeReader;
pub use rules::{LexerRules, Tier, DEFAULT_PATTERN_PRIORITY};
pub use stringes::{Chare, Position, SpanError, SplitOptions, Stringe};
pub use token::{Token, TokenId};
