use crate::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{
            ArrayInstantiationExpr, AssignmentExpr, BinaryExpr, CallExpr, ComputedExpr,
            FunctionExpr, MemberExpr, NewExpr, NumberExpr, PrefixExpr, RangeExpr, StringExpr,
            StructInstantiationExpr, SymbolExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::BindingPower, parser::Parser, stmt::parse_fn_params_and_body, types::parse_type,
};

/// Pratt loop: parse a leading form, then keep folding continuations while
/// the current token binds tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = parser.get_grammar().get_nud(token_kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::NoLeadingHandler {
                kind: token_kind,
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )
    })?;

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than bp, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let binding_power = parser.current_binding_power();
        let led_fn = parser.get_grammar().get_led(token_kind).ok_or_else(|| {
            Error::new(
                ErrorImpl::NoContinuationHandler { kind: token_kind },
                parser.get_position(),
            )
        })?;

        left = led_fn(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let token = parser.current_token().clone();

    match token.kind {
        TokenKind::Number => {
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            parser.advance();

            Ok(ExprWrapper::new(NumberExpr {
                value,
                span: token.span,
            }))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(ExprWrapper::new(SymbolExpr {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::String => {
            parser.advance();
            Ok(ExprWrapper::new(StringExpr {
                value: token.value,
                span: token.span,
            }))
        }
        kind => Err(Error::new(
            ErrorImpl::NoLeadingHandler {
                kind,
                token: token.value,
            },
            token.span.start,
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left,
        operator: operator_token,
        right,
    }))
}

/// `-x`, `!x`, `typeof x`. The operand is parsed at the lowest power, so it
/// extends as far right as an expression can.
pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Default)?;

    Ok(ExprWrapper::new(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token,
        right_expr: rhs,
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(AssignmentExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator: operator_token,
        value: rhs,
        assignee: left,
    }))
}

/// `( expr )` yields the inner expression itself.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.advance();
    let expr = parser.with_struct_literals(true, |parser| {
        parse_expr(parser, BindingPower::Default)
    })?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let property = parser.expect(TokenKind::Identifier)?;

    Ok(ExprWrapper::new(MemberExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: property.span.end,
        },
        object: left,
        property: property.value,
    }))
}

/// `object[index]`. The brackets delimit the index, so it is parsed at the
/// lowest power.
pub fn parse_computed_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let index = parser.with_struct_literals(true, |parser| {
        parse_expr(parser, BindingPower::Default)
    })?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(ExprWrapper::new(ComputedExpr {
        span: parser.span_from(left.get_span().start.clone()),
        object: left,
        index,
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(ExprWrapper::new(CallExpr {
        span: parser.span_from(left.get_span().start.clone()),
        callee: left,
        arguments,
    }))
}

pub fn parse_range_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    parser.advance();
    let upper = parse_expr(parser, bp)?;

    Ok(ExprWrapper::new(RangeExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: upper.get_span().end.clone(),
        },
        lower: left,
        upper,
    }))
}

/// `Name { field: value, ... }`, entered on `{` after a bare name.
pub fn parse_struct_instantiation_expr(
    parser: &mut Parser,
    left: ExprWrapper,
    _bp: BindingPower,
) -> Result<ExprWrapper, Error> {
    let Some(symbol) = left.downcast_ref::<SymbolExpr>() else {
        return Err(Error::new(
            ErrorImpl::MalformedDeclaration {
                reason: String::from("struct literal must follow a plain type name"),
            },
            left.get_span().start.clone(),
        ));
    };
    let struct_name = symbol.value.clone();

    parser.advance();

    let properties = parser.with_struct_literals(true, |parser| -> Result<_, Error> {
        let mut properties: Vec<(String, ExprWrapper)> = vec![];
        if parser.current_token_kind() == TokenKind::CloseCurly {
            return Ok(properties);
        }

        loop {
            let property = parser.expect(TokenKind::Identifier)?;
            parser.expect(TokenKind::Colon)?;
            let value = parse_expr(parser, BindingPower::Assignment)?;

            if properties.iter().any(|(name, _)| *name == property.value) {
                return Err(Error::new(
                    ErrorImpl::MalformedDeclaration {
                        reason: format!(
                            "property `{}` is given more than once in `{}` literal",
                            property.value, struct_name
                        ),
                    },
                    property.span.start,
                ));
            }
            properties.push((property.value, value));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }

        Ok(properties)
    })?;

    parser.expect(TokenKind::CloseCurly)?;

    Ok(ExprWrapper::new(StructInstantiationExpr {
        span: parser.span_from(left.get_span().start.clone()),
        name: struct_name,
        properties,
    }))
}

/// `[]T { a, b, ... }`
pub fn parse_array_instantiation_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::CloseBracket)?;

    let underlying = parse_type(parser, BindingPower::Default)?;

    parser.expect(TokenKind::OpenCurly)?;
    let contents = parse_expr_list(parser, TokenKind::CloseCurly)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(ExprWrapper::new(ArrayInstantiationExpr {
        underlying,
        contents,
        span: parser.span_from(start),
    }))
}

pub fn parse_fn_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.advance().span.start.clone();
    let (parameters, return_type, body) = parse_fn_params_and_body(parser)?;

    Ok(ExprWrapper::new(FunctionExpr {
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    }))
}

/// `new Callee(args)`; anything but a call after `new` is rejected.
pub fn parse_new_expr(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    let start = parser.advance().span.start.clone();
    let instantiation = parse_expr(parser, BindingPower::Default)?;

    let Some(call) = instantiation.downcast_ref::<CallExpr>() else {
        return Err(Error::new(
            ErrorImpl::MalformedDeclaration {
                reason: String::from("`new` must be followed by a constructor call"),
            },
            instantiation.get_span().start.clone(),
        ));
    };

    Ok(ExprWrapper::new(NewExpr {
        instantiation: call.clone(),
        span: parser.span_from(start),
    }))
}

/// Comma separated expressions up to (not including) `closing`. Each item
/// is parsed at assignment power and a trailing comma is rejected.
fn parse_expr_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<ExprWrapper>, Error> {
    parser.with_struct_literals(true, |parser| -> Result<_, Error> {
        let mut items = vec![];
        if parser.current_token_kind() == closing {
            return Ok(items);
        }

        loop {
            items.push(parse_expr(parser, BindingPower::Assignment)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }

        Ok(items)
    })
}
