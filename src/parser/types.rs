//! Type annotation parsing.
//!
//! Annotations are parsed with the same NUD/LED scheme as expressions but
//! against their own tables in the [`Grammar`](super::lookups::Grammar):
//!
//! - Named types (`Int`, `Point`)
//! - Array types (`[]T`, nesting as `[][]T`)

use crate::{
    ast::{
        ast::{Type, TypeWrapper},
        types::{ArrayType, SymbolType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{BindingPower, GrammarBuilder},
    parser::Parser,
};

/// Registers the built-in type handlers.
pub fn create_token_type_lookups(builder: &mut GrammarBuilder) {
    builder.type_nud(TokenKind::Identifier, parse_symbol_type);
    builder.type_nud(TokenKind::OpenBracket, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeWrapper::new(SymbolType {
        name: token.value,
        span: token.span,
    }))
}

/// `[]T`
pub fn parse_array_type(parser: &mut Parser) -> Result<TypeWrapper, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;
    parser.expect(TokenKind::CloseBracket)?;

    let underlying = parse_type(parser, BindingPower::Default)?;

    Ok(TypeWrapper::new(ArrayType {
        span: Span {
            start,
            end: underlying.get_span().end.clone(),
        },
        underlying,
    }))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = parser
        .get_grammar()
        .get_type_nud(token_kind)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::NoLeadingHandler {
                    kind: token_kind,
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            )
        })?;

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let binding_power = parser.get_grammar().get_type_binding_power(token_kind);
        if binding_power <= bp {
            break;
        }

        let led_fn = parser
            .get_grammar()
            .get_type_led(token_kind)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::NoContinuationHandler { kind: token_kind },
                    parser.get_position(),
                )
            })?;

        left = led_fn(parser, left, binding_power)?;
    }

    Ok(left)
}
