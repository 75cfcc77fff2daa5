//! Parser driver.
//!
//! Owns the cursor over the token stream and exposes the primitives every
//! grammar layer is written against (`current_token`, `advance`, `expect`).
//! Handler lookup goes through the shared, read-only [`Grammar`].

use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    ast::statements::BlockStmt,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{default_grammar, BindingPower, Grammar},
    stmt::parse_stmt,
};

/// Parsing state for one token stream.
pub struct Parser<'g> {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// Handler and binding power tables
    grammar: &'g Grammar,
    /// Whether `{` after a name may open a struct literal. Cleared while
    /// parsing conditions so the `{` starts the body instead.
    allow_struct_literal: bool,
}

impl<'g> Parser<'g> {
    /// Creates a parser over `tokens`, appending an `EOF` token if the
    /// stream does not already end with one. `file` names the source for
    /// that synthesized token's position.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>, grammar: &'g Grammar) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, file));

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            grammar,
            allow_struct_literal: true,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token after the current one.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::EOF, |token| token.kind)
    }

    /// Advances to the next token and returns the one just consumed.
    ///
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if index + 1 < self.tokens.len() {
            self.pos += 1;
        }

        let token = &self.tokens[index];
        trace!(pos = index, kind = %token.kind, value = %token.value, "advance");
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise the given
    /// error or `UnexpectedToken`.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind == expected_kind {
            return Ok(self.advance().clone());
        }

        match error {
            Some(error) => Err(error),
            None => Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    found: token.value.clone(),
                },
                token.span.start.clone(),
            )),
        }
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Returns true until the cursor reaches `EOF`.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Binding power of the current token in continuation position.
    pub fn current_binding_power(&self) -> BindingPower {
        let kind = self.current_token_kind();
        if kind == TokenKind::OpenCurly && !self.allow_struct_literal {
            return BindingPower::Default;
        }

        self.grammar.get_binding_power(kind)
    }

    /// Runs `parse` with struct literals enabled or disabled, restoring the
    /// previous setting afterwards.
    pub fn with_struct_literals<T>(
        &mut self,
        allowed: bool,
        parse: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let previous = self.allow_struct_literal;
        self.allow_struct_literal = allowed;
        let result = parse(self);
        self.allow_struct_literal = previous;
        result
    }

    /// Returns the start of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns the end of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(previous) => self.tokens[previous].span.end.clone(),
            None => self.get_position(),
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into the program's root block using the
/// built-in grammar.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<BlockStmt, Error> {
    parse_with_grammar(tokens, file, default_grammar())
}

/// Parses a stream of tokens into the program's root block.
///
/// Statements are parsed until `EOF`; the first error aborts the parse.
pub fn parse_with_grammar(
    tokens: Vec<Token>,
    file: Rc<String>,
    grammar: &Grammar,
) -> Result<BlockStmt, Error> {
    let mut parser = Parser::new(tokens, Rc::clone(&file), grammar);
    debug!(file = %file, tokens = parser.tokens.len(), "parsing");

    let mut body = vec![];
    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    debug!(file = %file, statements = body.len(), "parsed");

    Ok(BlockStmt {
        body,
        span: Span {
            start: Position(0, Rc::clone(&file)),
            end: parser.get_position(),
        },
    })
}
