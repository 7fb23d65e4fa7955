//! Interactive lexer shell.
//!
//! Reads one line at a time from stdin and prints its tokens, or the
//! tokenization error in red.

use clap::{ArgAction, Parser};
use colored::Colorize;
use regex::{Captures, Regex};
use std::error::Error;
use std::io::{self, BufRead, Write};
use stringes_lexer::{LexError, LexerRules, RuleError, Token};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lexer-repl", about = "Tokenize lines of C-like code")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

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
}

const PRIMITIVES: [&str; 12] = [
    "int", "uint", "long", "ulong", "short", "ushort", "byte", "sbyte", "float", "double",
    "decimal", "string",
];

fn classify_word(captures: &Captures<'_>) -> TokenType {
    if PRIMITIVES.contains(&&captures[0]) {
        TokenType::Primitive
    } else {
        TokenType::Identifier
    }
}

fn rules() -> Result<LexerRules<TokenType>, RuleError> {
    let mut rules = LexerRules::new();
    rules
        .add("-", TokenType::Minus)?
        .add("+", TokenType::Plus)?
        .add("/", TokenType::Slash)?
        .add("*", TokenType::Asterisk)?
        .add("(", TokenType::LeftParen)?
        .add(")", TokenType::RightParen)?
        .add("{", TokenType::LeftBrace)?
        .add("}", TokenType::RightBrace)?
        .add("=", TokenType::Assign)?
        .add("++", TokenType::Increment)?
        .add("--", TokenType::Decrement)?
        .add(";", TokenType::Semicolon)?
        .add("%", TokenType::Modulo)?
        .add("^", TokenType::Caret)?
        .add_pattern_str(r"-?\d+(\.\d+)?", TokenType::Number)?
        .add_derived_pattern(Regex::new(r"[a-zA-Z_][a-zA-Z\d_]*")?, classify_word, 2)?
        .add_pattern_str(r#""(?:[^"\\]|\\.)*""#, TokenType::String)?;
    rules.freeze();
    Ok(rules)
}

/// Tokenizes one line and renders the tokens separated by spaces.
fn lex_line(rules: &LexerRules<TokenType>, line: &str) -> Result<String, LexError> {
    let tokens = rules
        .tokenize(line)
        .collect::<Result<Vec<Token<TokenType>>, _>>()?;
    debug!(count = tokens.len(), "tokenized line");
    Ok(tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" "))
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "lexer_repl=info,stringes_lexer=warn",
        1 => "lexer_repl=debug,stringes_lexer=debug",
        _ => "lexer_repl=trace,stringes_lexer=trace",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(io::stderr)
        .init();

    let rules = rules()?;
    info!(rules = rules.len(), "lexer ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "lexer> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout)?;
            break;
        };
        match lex_line(&rules, &line?) {
            Ok(rendered) => writeln!(stdout, "{rendered}")?,
            Err(err) => writeln!(stdout, "{}", err.to_string().red())?,
        }
    }

    Ok(())
}
