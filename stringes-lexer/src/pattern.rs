use crate::error::RuleError;
use regex::{Captures, Regex};
use regex_automata::meta;
use regex_automata::{Anchored, Input};
use std::fmt;
use std::str::FromStr;
use stringes::Stringe;

/// A compiled regular expression that only matches at a given position.
///
/// Searches are anchored at the reader position, so a failed attempt costs
/// no more than the longest prefix the pattern could match there. The
/// surrounding text is still visible to the engine, so `\b` and `^` see the
/// characters before the position.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    anchored: meta::Regex,
}

impl Pattern {
    /// Compiles `pattern` with the `regex` crate syntax.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Self::from_regex(Regex::new(pattern)?)
    }

    /// Builds the anchored matcher for an already compiled regex.
    pub fn from_regex(regex: Regex) -> Result<Self, RuleError> {
        let anchored = meta::Regex::new(regex.as_str())
            .map_err(|err| RuleError::Matcher(err.to_string()))?;
        Ok(Self { regex, anchored })
    }

    /// The source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The underlying `regex` crate value.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Byte length of the non-empty match starting exactly at `byte`.
    pub(crate) fn match_len_at(&self, haystack: &str, byte: usize) -> Option<usize> {
        let input = Input::new(haystack)
            .span(byte..haystack.len())
            .anchored(Anchored::Yes);
        let found = self.anchored.find(input)?;
        (!found.is_empty()).then(|| found.end() - byte)
    }

    /// Capture groups of the match at `byte`. Only called once an anchored
    /// match is known to exist there, so the search stops at that match.
    pub(crate) fn captures_at<'h>(&self, haystack: &'h str, byte: usize) -> Option<Captures<'h>> {
        self.regex
            .captures_at(haystack, byte)
            .filter(|captures| captures.get(0).is_some_and(|m| m.start() == byte))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl FromStr for Pattern {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<Regex> for Pattern {
    type Error = RuleError;

    fn try_from(regex: Regex) -> Result<Self, Self::Error> {
        Self::from_regex(regex)
    }
}

/// Length in characters of a non-empty match of `pattern` that starts
/// exactly at `position` of `stringe`.
pub(crate) fn match_anchored(pattern: &Pattern, stringe: &Stringe, position: usize) -> Option<usize> {
    let byte = stringe.byte_index(position)?;
    let length = pattern.match_len_at(stringe.as_str(), byte)?;
    let end = stringe.char_index(byte + length)?;
    Some(end - position)
}
