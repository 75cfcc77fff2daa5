//! Error types for tokenizing and parsing.
//!
//! Every failure is fatal: the first error aborts the current operation and
//! is returned to the caller together with the source position it refers to.

pub mod errors;

#[cfg(test)]
mod tests;
