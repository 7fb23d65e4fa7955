//! End-to-end tokenization with a small C-like rule set.

use pretty_assertions::assert_eq;
use regex::Regex;
use stringes_lexer::{LexError, Lexer, LexerRules, Stringe, Tier, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TokenType {
    Plus,
    Increment,
    Decrement,
    Assign,
    Minus,
    Slash,
    Asterisk,
    Modulo,
    Caret,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Semicolon,
    Identifier,
    Primitive,
    Number,
    String,
    Comment,
    Whitespace,
}

const PRIMITIVES: [&str; 12] = [
    "int", "uint", "long", "ulong", "short", "ushort", "byte", "sbyte", "float", "double",
    "decimal", "string",
];

fn c_like_rules() -> LexerRules<TokenType> {
    let mut rules = LexerRules::new();
    rules
        .add("-", TokenType::Minus)
        .unwrap()
        .add("+", TokenType::Plus)
        .unwrap()
        .add("/", TokenType::Slash)
        .unwrap()
        .add("*", TokenType::Asterisk)
        .unwrap()
        .add("(", TokenType::LeftParen)
        .unwrap()
        .add(")", TokenType::RightParen)
        .unwrap()
        .add("{", TokenType::LeftBrace)
        .unwrap()
        .add("}", TokenType::RightBrace)
        .unwrap()
        .add("=", TokenType::Assign)
        .unwrap()
        .add("++", TokenType::Increment)
        .unwrap()
        .add("--", TokenType::Decrement)
        .unwrap()
        .add(";", TokenType::Semicolon)
        .unwrap()
        .add("%", TokenType::Modulo)
        .unwrap()
        .add("^", TokenType::Caret)
        .unwrap()
        .add_all(PRIMITIVES, TokenType::Primitive, Tier::High)
        .unwrap()
        .add_pattern_str(r"-?\d+(\.\d+)?", TokenType::Number)
        .unwrap()
        .add_pattern_with_priority(
            Regex::new(r"[a-zA-Z_][a-zA-Z\d_]*").unwrap(),
            TokenType::Identifier,
            2,
        )
        .unwrap()
        .add_pattern_str(r#""(?:[^"\\]|\\.)*""#, TokenType::String)
        .unwrap();
    rules
}

fn lex(rules: &LexerRules<TokenType>, input: &str) -> Vec<(TokenType, String)> {
    rules
        .tokenize(input)
        .map(|token| {
            let token = token.unwrap();
            (token.id(), token.as_str().to_string())
        })
        .collect()
}

#[test]
fn test_statement() {
    let rules = c_like_rules();
    assert_eq!(
        lex(&rules, "x = (y + 2.5) * -3;"),
        vec![
            (TokenType::Identifier, "x".to_string()),
            (TokenType::Assign, "=".to_string()),
            (TokenType::LeftParen, "(".to_string()),
            (TokenType::Identifier, "y".to_string()),
            (TokenType::Plus, "+".to_string()),
            (TokenType::Number, "2.5".to_string()),
            (TokenType::RightParen, ")".to_string()),
            (TokenType::Asterisk, "*".to_string()),
            (TokenType::Number, "-3".to_string()),
            (TokenType::Semicolon, ";".to_string()),
        ]
    );
}

#[test]
fn test_increment_and_decrement() {
    let rules = c_like_rules();
    let ids: Vec<_> = lex(&rules, "++1 i-- --j")
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(
        ids,
        vec![
            TokenType::Increment,
            TokenType::Number,
            TokenType::Identifier,
            TokenType::Decrement,
            TokenType::Decrement,
            TokenType::Identifier,
        ]
    );
}

#[test]
fn test_primitives_are_high_tier() {
    let rules = c_like_rules();
    assert_eq!(
        lex(&rules, "ulong count"),
        vec![
            (TokenType::Primitive, "ulong".to_string()),
            (TokenType::Identifier, "count".to_string()),
        ]
    );
    // High-tier literals match even as a prefix of a longer identifier.
    assert_eq!(
        lex(&rules, "integer"),
        vec![
            (TokenType::Primitive, "int".to_string()),
            (TokenType::Identifier, "eger".to_string()),
        ]
    );
}

#[test]
fn test_string_literal_with_escapes() {
    let rules = c_like_rules();
    assert_eq!(
        lex(&rules, r#"string s = "say \"hi\"";"#),
        vec![
            (TokenType::Primitive, "string".to_string()),
            (TokenType::Identifier, "s".to_string()),
            (TokenType::Assign, "=".to_string()),
            (TokenType::String, r#""say \"hi\"""#.to_string()),
            (TokenType::Semicolon, ";".to_string()),
        ]
    );
}

#[test]
fn test_multi_line_positions() {
    let rules = c_like_rules();
    let source = "int a = 1;\n{\n    a++;\n}";
    let tokens: Vec<Token<TokenType>> = rules.tokenize(source).collect::<Result<_, _>>().unwrap();

    let increment = tokens
        .iter()
        .find(|t| t.id() == TokenType::Increment)
        .unwrap();
    assert_eq!((increment.line(), increment.column()), (3, 6));
    assert_eq!(increment.offset(), 18);
    assert_eq!(increment.parent_str(), source);

    let last = tokens.last().unwrap();
    assert_eq!((last.id(), last.line(), last.column()), (TokenType::RightBrace, 4, 1));
}

#[test]
fn test_error_message_format() {
    let rules = c_like_rules();
    let err = rules
        .tokenize("int a = 1;\nint b = a @ 2;")
        .find_map(Result::err)
        .unwrap();
    assert_eq!(err.to_string(), "(Ln 2, Col 11) Invalid token '@'");
}

#[test]
fn test_tokens_cover_source_between() {
    let rules = c_like_rules();
    let source = Stringe::new("{ x = y; }");
    let tokens: Vec<_> = rules.tokenize(source).collect::<Result<_, _>>().unwrap();

    let open = tokens.first().unwrap();
    let close = tokens.last().unwrap();
    let body = Stringe::between(open, close).unwrap();
    assert_eq!(body.as_str(), " x = y; ");
    assert_eq!(body.trim(), "x = y;");
    assert_eq!(Stringe::range(open, close).unwrap().as_str(), "{ x = y; }");
}

#[test]
fn test_lexer_with_comment_rule() {
    let mut rules = c_like_rules();
    rules
        .add_pattern_with_priority(Regex::new(r"//[^\n]*").unwrap(), TokenType::Comment, 5)
        .unwrap()
        .add_pattern_str(r"\s+", TokenType::Whitespace)
        .unwrap();
    let lexer = Lexer::new(rules)
        .ignore(TokenType::Comment)
        .ignore(TokenType::Whitespace)
        .skip_whitespace(false);

    let ids: Vec<_> = lexer
        .tokenize("a = 1; // set a\nb = a / 2;")
        .map(|t| t.map(|t| t.id()))
        .collect::<Result<_, LexError>>()
        .unwrap();
    assert_eq!(
        ids,
        vec![
            TokenType::Identifier,
            TokenType::Assign,
            TokenType::Number,
            TokenType::Semicolon,
            TokenType::Identifier,
            TokenType::Assign,
            TokenType::Identifier,
            TokenType::Slash,
            TokenType::Number,
            TokenType::Semicolon,
        ]
    );
}
