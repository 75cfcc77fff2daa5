use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

/// A fatal failure carrying the offending source position.
///
/// Nothing is recovered: the first error aborts the whole tokenize or parse.
#[derive(Error, Debug, Clone)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoLeadingHandler { .. } => "NoLeadingHandler",
            ErrorImpl::NoContinuationHandler { .. } => "NoContinuationHandler",
            ErrorImpl::MalformedDeclaration { .. } => "MalformedDeclaration",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateHandler { .. } => "DuplicateHandler",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {}, found `{}`",
                expected, found
            )),
            ErrorImpl::NoLeadingHandler { token, .. } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression or type",
                token
            )),
            ErrorImpl::NoContinuationHandler { kind } => ErrorTip::Suggestion(format!(
                "{} cannot continue an expression here, did you miss a semicolon?",
                kind
            )),
            ErrorImpl::MalformedDeclaration { reason } => ErrorTip::Suggestion(reason.clone()),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::DuplicateHandler { kind, table } => ErrorTip::Suggestion(format!(
                "{} is registered twice in the {} table",
                kind, table
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected token: expected {expected}, found {found:?}")]
    UnexpectedToken { expected: TokenKind, found: String },
    #[error("no leading handler for {kind} ({token:?})")]
    NoLeadingHandler { kind: TokenKind, token: String },
    #[error("no continuation handler for {kind}")]
    NoContinuationHandler { kind: TokenKind },
    #[error("malformed declaration: {reason}")]
    MalformedDeclaration { reason: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{kind} registered twice in the {table} table")]
    DuplicateHandler { kind: TokenKind, table: &'static str },
}
