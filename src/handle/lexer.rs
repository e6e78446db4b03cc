//! Lexer for handle identifier text using logos

use std::fmt;

use logos::Logos;

use crate::error::Span;

/// Longest index literal the grammar admits; every 19-digit decimal fits `u64`
pub const MAX_INDEX_DIGITS: usize = 19;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Kind keywords
    #[token("in")]
    In,
    #[token("out")]
    Out,

    // Side keywords
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,

    #[token("-")]
    Dash,

    /// Positive integer without a leading zero
    #[regex("[1-9][0-9]*", index_literal)]
    Index(u64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::In => write!(f, "'in'"),
            Token::Out => write!(f, "'out'"),
            Token::Left => write!(f, "'left'"),
            Token::Right => write!(f, "'right'"),
            Token::Top => write!(f, "'top'"),
            Token::Bottom => write!(f, "'bottom'"),
            Token::Dash => write!(f, "'-'"),
            Token::Index(n) => write!(f, "index {}", n),
        }
    }
}

fn index_literal(lex: &mut logos::Lexer<Token>) -> Option<u64> {
    let slice = lex.slice();
    if slice.len() > MAX_INDEX_DIGITS {
        return None;
    }
    slice.parse().ok()
}

/// Tokenize handle text, keeping unrecognized input as `None` so the parser
/// can report where the text stops matching.
pub fn lex(input: &str) -> impl Iterator<Item = (Option<Token>, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.ok(), span))
}
