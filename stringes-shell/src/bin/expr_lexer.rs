//! Tokenizes a fixed arithmetic expression and prints each token.

use std::error::Error;
use stringes_lexer::{Lexer, LexerRules, RuleError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ExprToken {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Number,
    Whitespace,
}

fn lexer() -> Result<Lexer<ExprToken>, RuleError> {
    let mut rules = LexerRules::new();
    rules
        .add("+", ExprToken::Plus)?
        .add("-", ExprToken::Minus)?
        .add("*", ExprToken::Asterisk)?
        .add("/", ExprToken::Slash)?
        .add("^", ExprToken::Caret)?
        .add("(", ExprToken::LeftParen)?
        .add(")", ExprToken::RightParen)?
        .add_pattern_str(r"-?\d+(\.\d+)?", ExprToken::Number)?
        .add_pattern_str(r"\s+", ExprToken::Whitespace)?;

    Ok(Lexer::new(rules).ignore(ExprToken::Whitespace).skip_whitespace(false))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let lexer = lexer()?;
    let expression = "2 * 3 / (5 + 1) ^ 2";

    println!("ORIGINAL:\n");
    println!("{expression}");
    println!("\nTOKENS:\n");

    for token in lexer.tokenize(expression) {
        println!("{}", token?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_dropped() {
        let lexer = lexer().unwrap();
        let ids: Vec<_> = lexer
            .tokenize("2 * (5 + 1)")
            .map(|token| token.unwrap().id())
            .collect();
        assert_eq!(
            ids,
            vec![
                ExprToken::Number,
                ExprToken::Asterisk,
                ExprToken::LeftParen,
                ExprToken::Number,
                ExprToken::Plus,
                ExprToken::Number,
                ExprToken::RightParen,
            ]
        );
    }

    #[test]
    fn test_negative_number() {
        let lexer = lexer().unwrap();
        let rendered: Vec<_> = lexer
            .tokenize("4 ^ -2")
            .map(|token| token.unwrap().to_string())
            .collect();
        assert_eq!(rendered, vec!["<Number: '4'>", "<Caret: '^'>", "<Number: '-2'>"]);
    }
}
