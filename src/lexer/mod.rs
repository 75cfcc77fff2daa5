//! Lexical analysis for the language.
//!
//! The parser treats tokenization as an external collaborator; this module
//! provides one so the crate can go from source text to an AST. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
