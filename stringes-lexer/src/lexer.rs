use crate::error::LexError;
use crate::reader::StringeReader;
use crate::rules::LexerRules;
use crate::token::{Token, TokenId};
use std::collections::HashSet;
use std::iter::FusedIterator;
use stringes::Stringe;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Ended,
    Failed,
}

/// Lazy token stream over one stringe.
///
/// Each call to `next` reads exactly one token. Whitespace between tokens is
/// skipped unless [`Tokens::keep_whitespace`] is used. The stream ends after
/// the end token (if the rules define one) or after the first error.
pub struct Tokens<'r, T> {
    rules: &'r LexerRules<T>,
    reader: StringeReader,
    ignored: Option<&'r HashSet<T>>,
    skip_whitespace: bool,
    state: State,
}

impl<'r, T: TokenId> Tokens<'r, T> {
    /// Starts a token stream over `input`.
    pub fn new(rules: &'r LexerRules<T>, input: impl Into<Stringe>) -> Self {
        Self {
            rules,
            reader: StringeReader::new(input.into()),
            ignored: None,
            skip_whitespace: true,
            state: State::Running,
        }
    }

    /// Stops skipping whitespace between tokens.
    pub fn keep_whitespace(mut self) -> Self {
        self.skip_whitespace = false;
        self
    }

    fn with_ignored(mut self, ignored: &'r HashSet<T>) -> Self {
        self.ignored = Some(ignored);
        self
    }

    /// The reader driving the stream.
    pub fn reader(&self) -> &StringeReader {
        &self.reader
    }

    fn is_ignored(&self, id: T) -> bool {
        self.ignored.is_some_and(|ignored| ignored.contains(&id))
    }
}

impl<T: TokenId> Iterator for Tokens<'_, T> {
    type Item = Result<Token<T>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.state == State::Running {
            if self.skip_whitespace {
                self.reader.skip_whitespace();
            }

            if self.reader.is_eof() {
                self.state = State::Ended;
                if self.rules.end_token().is_none() {
                    return None;
                }
            }

            match self.reader.eat_token(self.rules) {
                Ok(token) if self.is_ignored(token.id()) => {
                    trace!(id = ?token.id(), "ignoring token");
                }
                Ok(token) => {
                    trace!(id = ?token.id(), value = token.as_str(), line = token.line(), column = token.column(), "token");
                    return Some(Ok(token));
                }
                Err(err) => {
                    debug!(%err, "tokenization failed");
                    self.state = State::Failed;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

impl<T: TokenId> FusedIterator for Tokens<'_, T> {}

impl<T: TokenId> LexerRules<T> {
    /// Tokenizes `input`, skipping whitespace between tokens.
    pub fn tokenize(&self, input: impl Into<Stringe>) -> Tokens<'_, T> {
        Tokens::new(self, input)
    }
}

/// A rule set bundled with the policy used to drive it.
///
/// Tokens whose identifier is in the ignore set are consumed but never
/// yielded, which is how whitespace or comment rules are usually handled.
pub struct Lexer<T> {
    rules: LexerRules<T>,
    ignored: HashSet<T>,
    skip_whitespace: bool,
}

impl<T: TokenId> Lexer<T> {
    /// Wraps `rules` with an empty ignore set, skipping whitespace.
    pub fn new(rules: LexerRules<T>) -> Self {
        Self {
            rules,
            ignored: HashSet::new(),
            skip_whitespace: true,
        }
    }

    /// Drops tokens with identifier `id` from the output.
    pub fn ignore(mut self, id: T) -> Self {
        self.ignored.insert(id);
        self
    }

    /// Controls whether whitespace is skipped before each token.
    pub fn skip_whitespace(mut self, skip: bool) -> Self {
        self.skip_whitespace = skip;
        self
    }

    /// The rule set used for matching.
    pub fn rules(&self) -> &LexerRules<T> {
        &self.rules
    }

    /// Returns true if tokens with identifier `id` are dropped.
    pub fn is_ignored(&self, id: T) -> bool {
        self.ignored.contains(&id)
    }

    /// Tokenizes `input`, dropping ignored tokens.
    pub fn tokenize(&self, input: impl Into<Stringe>) -> Tokens<'_, T> {
        let tokens = Tokens::new(&self.rules, input).with_ignored(&self.ignored);
        if self.skip_whitespace {
            tokens
        } else {
            tokens.keep_whitespace()
        }
    }
}

impl<T: TokenId> From<LexerRules<T>> for Lexer<T> {
    fn from(rules: LexerRules<T>) -> Self {
        Self::new(rules)
    }
}
