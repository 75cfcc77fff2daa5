//! Unit tests for the lexer module.
//!
//! Covers keyword classification, literals and escapes, operator
//! disambiguation, comments, positions and the lexical error cases.

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some(String::from("test.curly")))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("let const class new import from fn if else foreach while for export typeof in return struct static"),
        vec![
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Class,
            TokenKind::New,
            TokenKind::Import,
            TokenKind::From,
            TokenKind::Fn,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Foreach,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Export,
            TokenKind::Typeof,
            TokenKind::In,
            TokenKind::Return,
            TokenKind::Struct,
            TokenKind::Static,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore CamelCase letter", None).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["foo", "baz_123", "_underscore", "CamelCase", "letter", "EOF"]
    );
    // A keyword prefix does not make a keyword
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5", None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_range_is_not_a_decimal() {
    assert_eq!(
        kinds("0..10"),
        vec![
            TokenKind::Number,
            TokenKind::DotDot,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "multiple words" """#, None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "backslash\\" "hex\x41" "quote\"test" "odd\q""#;
    let tokens = tokenize(source, None).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "backslash\\");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].value, "quote\"test");
    assert_eq!(tokens[5].value, "odd\\q");
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("let s = \"never closed;", None).unwrap_err();

    assert_eq!(error.get_error_impl(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = && || !"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_compound_operators() {
    assert_eq!(
        kinds("++ -- += -= *= /="),
        vec![
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . .. , ; : ?"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::DotDot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Question,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("let x = 5; // this is a comment\nlet y = 10;", None).unwrap();

    let values: Vec<&str> = tokens.iter().map(|token| token.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["let", "x", "=", "5", ";", "let", "y", "=", "10", ";", "EOF"]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("let x\n  = 42;", Some(String::from("pos.curly"))).unwrap();

    let number: &Token = &tokens[3];
    assert_eq!(number.value, "42");
    assert_eq!(number.span.start.0, 10);
    assert_eq!(number.span.end.0, 12);
    assert_eq!(number.span.start.1.as_str(), "pos.curly");

    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span.start.0, 13);
}

#[test]
fn test_tokenize_default_file_name() {
    let tokens = tokenize("x", None).unwrap();
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_tokenize_unrecognised_token() {
    let error = tokenize("let x = @;", None).unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnrecognisedToken {
            token: String::from("@")
        }
    );
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds("   \n\t "), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_class_member() {
    assert_eq!(
        kinds("static fn area(): Number { return w * h; }"),
        vec![
            TokenKind::Static,
            TokenKind::Fn,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::Return,
            TokenKind::Identifier,
            TokenKind::Star,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}
