use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Keywords, classified before the parser ever sees them.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = HashMap::from([
        ("let", TokenKind::Let),
        ("const", TokenKind::Const),
        ("class", TokenKind::Class),
        ("new", TokenKind::New),
        ("import", TokenKind::Import),
        ("from", TokenKind::From),
        ("fn", TokenKind::Fn),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("foreach", TokenKind::Foreach),
        ("while", TokenKind::While),
        ("for", TokenKind::For),
        ("export", TokenKind::Export),
        ("typeof", TokenKind::Typeof),
        ("in", TokenKind::In),
        ("return", TokenKind::Return),
        ("struct", TokenKind::Struct),
        ("static", TokenKind::Static),
    ]);
}

/// Closed set of lexical categories.
///
/// `PlusPlus`, `MinusMinus`, `For` and `Export` are lexed so they can be
/// reported precisely, but no grammar rule accepts them yet.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    // Delimiters
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    // Comparison and logic
    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Or,
    And,

    // Punctuation
    Dot,
    DotDot, // ..
    Semicolon,
    Colon,
    Question,
    Comma,

    // Arithmetic
    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,
    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Let,
    Const,
    Class,
    New,
    Import,
    From,
    Fn,
    If,
    Else,
    Foreach,
    While,
    For,
    Export,
    Typeof,
    In,
    Return,
    Struct,
    Static,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexeme with its category and source span. `value` is the decoded
/// text for strings and the matched text for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[TokenKind::String, TokenKind::Identifier, TokenKind::Number]) {
            write!(f, "{:>6} {} ({:?})", self.span.start.0, self.kind, self.value)
        } else {
            write!(f, "{:>6} {}", self.span.start.0, self.kind)
        }
    }
}

impl Token {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
