use crate::error::RuleError;
use crate::pattern::{match_anchored, Pattern};
use crate::token::TokenId;
use regex::{Captures, Regex};
use std::cmp::Reverse;
use std::sync::OnceLock;
use stringes::Stringe;
use tracing::debug;

/// Priority applied by [`LexerRules::add_pattern`].
pub const DEFAULT_PATTERN_PRIORITY: i32 = 1;

/// When a constant rule is tried relative to the pattern rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    /// Tried before any pattern rule.
    High,
    /// Tried after all pattern rules failed.
    #[default]
    Normal,
}

type DeriveFn<T> = Box<dyn Fn(&Captures<'_>) -> T + Send + Sync>;
type TransformFn = Box<dyn Fn(Stringe) -> Stringe + Send + Sync>;

struct ConstantRule<T> {
    literal: Box<str>,
    /// Literal length in characters.
    length: usize,
    id: T,
}

enum IdSource<T> {
    Fixed(T),
    Derived(DeriveFn<T>),
}

struct PatternRule<T> {
    pattern: Pattern,
    id: IdSource<T>,
    priority: i32,
}

pub(crate) struct FallbackRule<T> {
    transform: TransformFn,
    id: T,
}

impl<T: TokenId> FallbackRule<T> {
    pub(crate) fn id(&self) -> T {
        self.id
    }

    pub(crate) fn apply(&self, skipped: Stringe) -> Stringe {
        (self.transform)(skipped)
    }
}

/// Evaluation order of every bucket, fixed when the rule set freezes.
struct Order {
    high: Box<[usize]>,
    normal: Box<[usize]>,
    patterns: Box<[usize]>,
}

/// Identifier and length (in characters) of a successful rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RuleMatch<T> {
    pub(crate) id: T,
    pub(crate) length: usize,
}

/// The set of rules used to carve a stringe into tokens.
///
/// Rules are registered up front. The first time the set is used for
/// matching (or [`LexerRules::freeze`] is called) every bucket is sorted:
/// constants by descending literal length, patterns by descending priority,
/// both keeping registration order among equals. From then on the set is
/// read-only and further registrations fail with [`RuleError::Frozen`].
///
/// At each position the rules are tried in this order:
///
/// 1. high-tier constants, first match wins;
/// 2. pattern rules, longest match wins;
/// 3. normal-tier constants, first match wins;
/// 4. otherwise the character joins the fallback run, if a fallback rule
///    exists.
pub struct LexerRules<T> {
    high: Vec<ConstantRule<T>>,
    normal: Vec<ConstantRule<T>>,
    patterns: Vec<PatternRule<T>>,
    fallback: Option<FallbackRule<T>>,
    end_token: Option<T>,
    order: OnceLock<Order>,
}

impl<T: TokenId> LexerRules<T> {
    /// Creates an empty, unfrozen rule set.
    pub fn new() -> Self {
        Self {
            high: Vec::new(),
            normal: Vec::new(),
            patterns: Vec::new(),
            fallback: None,
            end_token: None,
            order: OnceLock::new(),
        }
    }

    /// Adds a normal-tier constant rule.
    pub fn add(&mut self, literal: &str, id: T) -> Result<&mut Self, RuleError> {
        self.add_with_tier(literal, id, Tier::Normal)
    }

    /// Adds a constant rule in the given tier. A literal already registered
    /// in the same tier is ignored.
    pub fn add_with_tier(&mut self, literal: &str, id: T, tier: Tier) -> Result<&mut Self, RuleError> {
        self.ensure_open()?;
        if literal.is_empty() {
            return Err(RuleError::EmptyLiteral);
        }
        let bucket = match tier {
            Tier::High => &mut self.high,
            Tier::Normal => &mut self.normal,
        };
        if bucket.iter().any(|rule| &*rule.literal == literal) {
            debug!(literal, ?tier, "ignoring duplicate literal rule");
        } else {
            bucket.push(ConstantRule {
                literal: literal.into(),
                length: literal.chars().count(),
                id,
            });
        }
        Ok(self)
    }

    /// Adds several literals sharing one identifier. The batch is validated
    /// before anything is registered.
    pub fn add_all<I>(&mut self, literals: I, id: T, tier: Tier) -> Result<&mut Self, RuleError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.ensure_open()?;
        let literals: Vec<I::Item> = literals.into_iter().collect();
        if literals.is_empty() {
            return Err(RuleError::EmptyBatch);
        }
        if literals.iter().any(|literal| literal.as_ref().is_empty()) {
            return Err(RuleError::EmptyLiteral);
        }
        for literal in &literals {
            self.add_with_tier(literal.as_ref(), id, tier)?;
        }
        Ok(self)
    }

    /// Adds a pattern rule with [`DEFAULT_PATTERN_PRIORITY`].
    pub fn add_pattern(&mut self, regex: Regex, id: T) -> Result<&mut Self, RuleError> {
        self.push_pattern(Pattern::from_regex(regex)?, IdSource::Fixed(id), DEFAULT_PATTERN_PRIORITY)
    }

    /// Adds a pattern rule with an explicit priority. Higher wins ties.
    pub fn add_pattern_with_priority(
        &mut self,
        regex: Regex,
        id: T,
        priority: i32,
    ) -> Result<&mut Self, RuleError> {
        self.push_pattern(Pattern::from_regex(regex)?, IdSource::Fixed(id), priority)
    }

    /// Compiles `pattern` and adds it with [`DEFAULT_PATTERN_PRIORITY`].
    pub fn add_pattern_str(&mut self, pattern: &str, id: T) -> Result<&mut Self, RuleError> {
        self.push_pattern(Pattern::new(pattern)?, IdSource::Fixed(id), DEFAULT_PATTERN_PRIORITY)
    }

    /// Adds a pattern rule whose identifier is computed from each match.
    pub fn add_derived_pattern<F>(
        &mut self,
        regex: Regex,
        derive: F,
        priority: i32,
    ) -> Result<&mut Self, RuleError>
    where
        F: Fn(&Captures<'_>) -> T + Send + Sync + 'static,
    {
        self.push_pattern(Pattern::from_regex(regex)?, IdSource::Derived(Box::new(derive)), priority)
    }

    fn push_pattern(&mut self, pattern: Pattern, id: IdSource<T>, priority: i32) -> Result<&mut Self, RuleError> {
        self.ensure_open()?;
        if self
            .patterns
            .iter()
            .any(|rule| rule.pattern.as_str() == pattern.as_str())
        {
            debug!(pattern = pattern.as_str(), "ignoring duplicate pattern rule");
        } else {
            self.patterns.push(PatternRule {
                pattern,
                id,
                priority,
            });
        }
        Ok(self)
    }

    /// Registers the rule that captures runs of input no other rule matches.
    /// `transform` receives each skipped run and returns the stringe stored
    /// in the emitted token.
    pub fn set_fallback<F>(&mut self, transform: F, id: T) -> Result<&mut Self, RuleError>
    where
        F: Fn(Stringe) -> Stringe + Send + Sync + 'static,
    {
        self.ensure_open()?;
        if self.fallback.is_some() {
            return Err(RuleError::DuplicateFallback);
        }
        self.fallback = Some(FallbackRule {
            transform: Box::new(transform),
            id,
        });
        Ok(self)
    }

    /// Sets the identifier of the zero-length token produced at end of input.
    pub fn set_end_token(&mut self, id: T) -> Result<&mut Self, RuleError> {
        self.ensure_open()?;
        self.end_token = Some(id);
        Ok(self)
    }

    /// The identifier of the end token, if one is set.
    pub fn end_token(&self) -> Option<T> {
        self.end_token
    }

    /// Returns true if a fallback rule is registered.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub(crate) fn fallback(&self) -> Option<&FallbackRule<T>> {
        self.fallback.as_ref()
    }

    /// Number of constant and pattern rules.
    pub fn len(&self) -> usize {
        self.high.len() + self.normal.len() + self.patterns.len()
    }

    /// Returns true if no constant or pattern rule is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once the rule set has been sorted and closed.
    pub fn is_frozen(&self) -> bool {
        self.order.get().is_some()
    }

    /// Sorts the rules and closes the set for registration. Idempotent;
    /// matching freezes the set implicitly.
    pub fn freeze(&self) {
        self.frozen();
    }

    fn ensure_open(&self) -> Result<(), RuleError> {
        if self.is_frozen() {
            return Err(RuleError::Frozen);
        }
        Ok(())
    }

    fn frozen(&self) -> &Order {
        self.order.get_or_init(|| {
            let order = Order {
                high: by_length(&self.high),
                normal: by_length(&self.normal),
                patterns: by_priority(&self.patterns),
            };
            debug!(
                high = order.high.len(),
                normal = order.normal.len(),
                patterns = order.patterns.len(),
                fallback = self.fallback.is_some(),
                "froze lexer rules"
            );
            order
        })
    }

    /// Finds the rule that wins at `position` (relative to `stringe`).
    pub(crate) fn match_at(&self, stringe: &Stringe, position: usize) -> Option<RuleMatch<T>> {
        let order = self.frozen();
        let byte = stringe.byte_index(position)?;
        let rest = &stringe.as_str()[byte..];

        match_constant(&self.high, &order.high, rest)
            .or_else(|| self.match_pattern(&order.patterns, stringe, position))
            .or_else(|| match_constant(&self.normal, &order.normal, rest))
    }

    fn match_pattern(&self, order: &[usize], stringe: &Stringe, position: usize) -> Option<RuleMatch<T>> {
        let mut best: Option<(&PatternRule<T>, usize)> = None;
        for rule in order.iter().map(|&index| &self.patterns[index]) {
            let Some(length) = match_anchored(&rule.pattern, stringe, position) else {
                continue;
            };
            // Strictly longer only: equal lengths keep the earlier rule in
            // priority order.
            if best.map_or(true, |(_, longest)| length > longest) {
                best = Some((rule, length));
            }
        }

        let (rule, length) = best?;
        let id = match &rule.id {
            IdSource::Fixed(id) => *id,
            IdSource::Derived(derive) => {
                let byte = stringe.byte_index(position)?;
                let captures = rule.pattern.captures_at(stringe.as_str(), byte)?;
                derive(&captures)
            }
        };
        Some(RuleMatch { id, length })
    }
}

impl<T: TokenId> Default for LexerRules<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn match_constant<T: TokenId>(rules: &[ConstantRule<T>], order: &[usize], rest: &str) -> Option<RuleMatch<T>> {
    order
        .iter()
        .map(|&index| &rules[index])
        .find(|rule| rest.starts_with(&*rule.literal))
        .map(|rule| RuleMatch {
            id: rule.id,
            length: rule.length,
        })
}

fn by_length<T>(rules: &[ConstantRule<T>]) -> Box<[usize]> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| Reverse(rules[index].length));
    order.into_boxed_slice()
}

fn by_priority<T>(rules: &[PatternRule<T>]) -> Box<[usize]> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&index| Reverse(rules[index].priority));
    order.into_boxed_slice()
}
