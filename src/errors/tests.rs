//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn at_start(error_impl: ErrorImpl) -> Error {
    Error::new(error_impl, Position(0, Rc::new("test.curly".to_string())))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.curly".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.curly".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: "}".to_string(),
        },
        pos.clone(),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position(), &pos);
}

#[test]
fn test_error_names() {
    let cases = [
        (ErrorImpl::UnterminatedString, "UnterminatedString"),
        (
            ErrorImpl::NoLeadingHandler {
                kind: TokenKind::CloseParen,
                token: ")".to_string(),
            },
            "NoLeadingHandler",
        ),
        (
            ErrorImpl::NoContinuationHandler {
                kind: TokenKind::Identifier,
            },
            "NoContinuationHandler",
        ),
        (
            ErrorImpl::MalformedDeclaration {
                reason: "missing value".to_string(),
            },
            "MalformedDeclaration",
        ),
        (
            ErrorImpl::NumberParseError {
                token: "1.2.3".to_string(),
            },
            "NumberParseError",
        ),
        (
            ErrorImpl::DuplicateHandler {
                kind: TokenKind::Plus,
                table: "led",
            },
            "DuplicateHandler",
        ),
    ];

    for (error_impl, name) in cases {
        assert_eq!(at_start(error_impl).get_error_name(), name);
    }
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            found: "EOF".to_string(),
        },
        Position(9, Rc::new("main.curly".to_string())),
    );

    assert_eq!(
        error.to_string(),
        "unexpected token: expected Semicolon, found \"EOF\" at main.curly:9"
    );
}

#[test]
fn test_error_tip_none() {
    let error = at_start(ErrorImpl::UnrecognisedToken {
        token: "@".to_string(),
    });

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = at_start(ErrorImpl::UnexpectedToken {
        expected: TokenKind::CloseParen,
        found: "}".to_string(),
    });

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Expected CloseParen, found `}`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_malformed_declaration_tip_is_reason() {
    let error = at_start(ErrorImpl::MalformedDeclaration {
        reason: "constant `x` needs a value".to_string(),
    });

    assert_eq!(error.get_tip().to_string(), "constant `x` needs a value");
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
