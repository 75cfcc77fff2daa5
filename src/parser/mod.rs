//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with table-driven operator precedence and handles:
//!
//! - Statement parsing (declarations, control flow, imports)
//! - Expression parsing (binary ops, calls, member access, literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. The
//! tables live in an immutable [`lookups::Grammar`].

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
