use regex::Regex;
use stringes_lexer::{LexerRules, RuleError, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tok {
    Plus,
    Number,
    Word,
    Undefined,
    End,
}

#[test]
fn test_rules_start_empty() {
    let rules = LexerRules::<Tok>::new();
    assert!(rules.is_empty());
    assert!(!rules.is_frozen());
    assert!(!rules.has_fallback());
    assert_eq!(rules.end_token(), None);
}

#[test]
fn test_empty_literal_rejected() {
    let mut rules = LexerRules::new();
    assert_eq!(rules.add("", Tok::Plus).err(), Some(RuleError::EmptyLiteral));
    assert!(rules.is_empty());
}

#[test]
fn test_add_all_validates_whole_batch() {
    let mut rules = LexerRules::new();
    assert_eq!(
        rules.add_all(Vec::<&str>::new(), Tok::Word, Tier::Normal).err(),
        Some(RuleError::EmptyBatch)
    );
    assert_eq!(
        rules.add_all(["if", "", "else"], Tok::Word, Tier::Normal).err(),
        Some(RuleError::EmptyLiteral)
    );
    // Nothing from the rejected batch was registered.
    assert!(rules.is_empty());

    rules.add_all(["if", "else"], Tok::Word, Tier::High).unwrap();
    assert_eq!(rules.len(), 2);
}

#[test]
fn test_duplicate_rules_ignored() {
    let mut rules = LexerRules::new();
    rules
        .add("+", Tok::Plus)
        .unwrap()
        .add("+", Tok::Word)
        .unwrap()
        .add_with_tier("+", Tok::Plus, Tier::High)
        .unwrap()
        .add_pattern_str(r"\d+", Tok::Number)
        .unwrap()
        .add_pattern_str(r"\d+", Tok::Word)
        .unwrap();

    // One constant per tier plus one pattern.
    assert_eq!(rules.len(), 3);
}

#[test]
fn test_duplicate_keeps_first_registration() {
    let mut rules = LexerRules::new();
    rules
        .add("+", Tok::Plus)
        .unwrap()
        .add("+", Tok::Word)
        .unwrap();

    let token = rules.tokenize("+").next().unwrap().unwrap();
    assert_eq!(token.id(), Tok::Plus);
}

#[test]
fn test_invalid_pattern_rejected() {
    let mut rules = LexerRules::new();
    let err = rules.add_pattern_str(r"(unclosed", Tok::Word).err().unwrap();
    assert!(matches!(err, RuleError::InvalidPattern(_)));
    assert!(err.to_string().starts_with("invalid pattern"));
}

#[test]
fn test_second_fallback_rejected() {
    let mut rules = LexerRules::new();
    rules.set_fallback(|s| s, Tok::Undefined).unwrap();
    assert!(rules.has_fallback());
    assert_eq!(
        rules.set_fallback(|s| s.trim(), Tok::Word).err(),
        Some(RuleError::DuplicateFallback)
    );
}

#[test]
fn test_registration_after_use_rejected() {
    let mut rules = LexerRules::new();
    rules.add_pattern_str(r"\d+", Tok::Number).unwrap();

    let count = rules.tokenize("1 2 3").count();
    assert_eq!(count, 3);
    assert!(rules.is_frozen());

    assert_eq!(rules.add("+", Tok::Plus).err(), Some(RuleError::Frozen));
    assert_eq!(
        rules
            .add_pattern(Regex::new("[a-z]+").unwrap(), Tok::Word)
            .err(),
        Some(RuleError::Frozen)
    );
    assert_eq!(rules.set_end_token(Tok::End).err(), Some(RuleError::Frozen));
    assert_eq!(
        rules.set_fallback(|s| s, Tok::Undefined).err(),
        Some(RuleError::Frozen)
    );
    assert_eq!(rules.len(), 1);
}

#[test]
fn test_explicit_freeze() {
    let mut rules = LexerRules::new();
    rules.add("+", Tok::Plus).unwrap();
    rules.freeze();
    rules.freeze();
    assert!(rules.is_frozen());
    assert_eq!(
        rules.add_with_tier("-", Tok::Plus, Tier::High).err(),
        Some(RuleError::Frozen)
    );
}

#[test]
fn test_end_token_configured() {
    let mut rules = LexerRules::new();
    rules.set_end_token(Tok::End).unwrap();
    assert_eq!(rules.end_token(), Some(Tok::End));
    assert!(rules.is_empty());
}
