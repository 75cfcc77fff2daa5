use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, ExprWrapper, StmtWrapper, TypeWrapper},
        statements::{
            BlockStmt, ClassDeclStmt, ClassMethod, ClassProperty, ExpressionStmt, FnDeclStmt,
            ForeachStmt, IfStmt, ImportStmt, Parameter, ReturnStmt, StructDeclStmt,
            StructProperty, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser, types::parse_type};

/// Dispatches on the current token's statement handler, falling back to an
/// expression statement terminated by `;`.
pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let token_kind = parser.current_token_kind();
    if let Some(stmt_fn) = parser.get_grammar().get_stmt(token_kind) {
        debug!(kind = %token_kind, position = %parser.get_position(), "statement");
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

fn parse_expression_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(ExpressionStmt {
        span: parser.span_from(expr.get_span().start.clone()),
        expression: expr,
    }))
}

fn malformed(reason: impl Into<String>, position: Position) -> Error {
    Error::new(
        ErrorImpl::MalformedDeclaration {
            reason: reason.into(),
        },
        position,
    )
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let explicit_type;
    let assigned_value;

    let start_token = parser.advance().clone();
    let is_constant = start_token.kind == TokenKind::Const;

    let variable_name = parser.expect(TokenKind::Identifier)?;

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        explicit_type = Some(parse_type(parser, BindingPower::Default)?);
    } else {
        explicit_type = None;
    }

    if parser.current_token_kind() != TokenKind::Semicolon {
        parser.expect(TokenKind::Assignment)?;
        assigned_value = Some(parse_expr(parser, BindingPower::Assignment)?);
    } else if explicit_type.is_none() {
        return Err(malformed(
            format!(
                "`{}` needs an explicit type or an initial value",
                variable_name.value
            ),
            parser.get_position(),
        ));
    } else {
        assigned_value = None;
    }

    if is_constant && assigned_value.is_none() {
        return Err(malformed(
            format!("constant `{}` needs an initial value", variable_name.value),
            parser.get_position(),
        ));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(VarDeclStmt {
        span: parser.span_from(start_token.span.start),
        is_constant,
        identifier: variable_name.value,
        assigned_value,
        explicit_type,
    }))
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    let from = if parser.current_token_kind() == TokenKind::From {
        parser.advance();
        parser.expect(TokenKind::String)?.value
    } else {
        name.clone()
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(ImportStmt {
        name,
        from,
        span: parser.span_from(start),
    }))
}

/// Parses a condition followed by a body. `{` after the condition always
/// opens the body, never a struct literal.
fn parse_condition(parser: &mut Parser, bp: BindingPower) -> Result<ExprWrapper, Error> {
    parser.with_struct_literals(false, |parser| parse_expr(parser, bp))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser, BindingPower::Assignment)?;
    let consequent = parse_block(parser)?;

    let alternate = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(parse_if_stmt(parser)?)
        } else {
            Some(StmtWrapper::new(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(StmtWrapper::new(IfStmt {
        condition,
        consequent,
        alternate,
        span: parser.span_from(start),
    }))
}

/// `{ stmt* }`. Struct literals are allowed again inside the braces.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let body = parser.with_struct_literals(true, |parser| -> Result<_, Error> {
        let mut statements = Vec::new();
        while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
            statements.push(parse_stmt(parser)?);
        }
        Ok(statements)
    })?;

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: parser.span_from(start),
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    Ok(StmtWrapper::new(parse_block(parser)?))
}

/// `(params) [: Type] { ... }`, shared by declarations, literals and
/// class methods. A trailing comma after the last parameter is allowed.
pub fn parse_fn_params_and_body(
    parser: &mut Parser,
) -> Result<(Vec<Parameter>, Option<TypeWrapper>, BlockStmt), Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters: Vec<Parameter> = Vec::new();
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseParen {
        let name = parser.expect(TokenKind::Identifier)?;
        if parameters.iter().any(|parameter| parameter.name == name.value) {
            return Err(malformed(
                format!("parameter `{}` is declared twice", name.value),
                name.span.start,
            ));
        }

        parser.expect(TokenKind::Colon)?;
        let explicit_type = parse_type(parser, BindingPower::Default)?;
        parameters.push(Parameter {
            name: name.value,
            explicit_type,
        });

        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok((parameters, return_type, body))
}

/// `fn name(...)`. A `fn` directly followed by `(` is a function literal
/// used as an expression statement.
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if parser.peek_token_kind() == TokenKind::OpenParen {
        return parse_expression_stmt(parser);
    }

    let start = parser.advance().span.start.clone();

    let identifier = parser.expect(TokenKind::Identifier)?.value;
    let (parameters, return_type, body) = parse_fn_params_and_body(parser)?;

    Ok(StmtWrapper::new(FnDeclStmt {
        span: parser.span_from(start),
        identifier,
        parameters,
        return_type,
        body,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(ReturnStmt {
        value,
        span: parser.span_from(start),
    }))
}

/// `struct Name { [static] field: Type; ... }`
pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut properties: Vec<StructProperty> = Vec::new();
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let is_static = parser.current_token_kind() == TokenKind::Static;
        if is_static {
            parser.advance();
        }

        if parser.current_token_kind() == TokenKind::Fn {
            return Err(malformed(
                format!("struct `{}` cannot declare methods", name),
                parser.get_position(),
            ));
        }

        let property = parser.expect(TokenKind::Identifier)?;
        parser.expect(TokenKind::Colon)?;
        let explicit_type = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        if properties.iter().any(|existing| existing.name == property.value) {
            return Err(malformed(
                format!(
                    "property `{}` is declared twice in struct `{}`",
                    property.value, name
                ),
                property.span.start,
            ));
        }

        properties.push(StructProperty {
            name: property.value,
            is_static,
            explicit_type,
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(StmtWrapper::new(StructDeclStmt {
        name,
        properties,
        span: parser.span_from(start),
    }))
}

/// `class Name { member* }`, where a member is a method
/// (`[static] fn name(...) [: T] { ... }`) or a property
/// (`[static] name [: T] [= value];`).
pub fn parse_class_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenCurly)?;

    let mut member_names = HashSet::new();
    let mut properties = Vec::new();
    let mut methods = Vec::new();

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let is_static = parser.current_token_kind() == TokenKind::Static;
        if is_static {
            parser.advance();
        }

        let is_method = parser.current_token_kind() == TokenKind::Fn;
        if is_method {
            parser.advance();
        }

        let member = parser.expect(TokenKind::Identifier)?;
        if !member_names.insert(member.value.clone()) {
            return Err(malformed(
                format!(
                    "member `{}` is declared twice in class `{}`",
                    member.value, name
                ),
                member.span.start,
            ));
        }

        if is_method {
            let (parameters, return_type, body) = parse_fn_params_and_body(parser)?;
            methods.push(ClassMethod {
                name: member.value,
                is_static,
                parameters,
                return_type,
                body,
            });
            continue;
        }

        let explicit_type = if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            Some(parse_expr(parser, BindingPower::Assignment)?)
        } else {
            None
        };

        if explicit_type.is_none() && assigned_value.is_none() {
            return Err(malformed(
                format!(
                    "property `{}` needs an explicit type or an initial value",
                    member.value
                ),
                member.span.start,
            ));
        }

        parser.expect(TokenKind::Semicolon)?;

        properties.push(ClassProperty {
            name: member.value,
            is_static,
            explicit_type,
            assigned_value,
        });
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(StmtWrapper::new(ClassDeclStmt {
        name,
        properties,
        methods,
        span: parser.span_from(start),
    }))
}

/// `foreach value[, index] in iterable { ... }`
pub fn parse_foreach_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let value = parser.expect(TokenKind::Identifier)?.value;

    let index = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(parser.expect(TokenKind::Identifier)?.value)
    } else {
        None
    };

    parser.expect(TokenKind::In)?;

    let iterable = parse_condition(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(ForeachStmt {
        value,
        index,
        iterable,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser, BindingPower::Assignment)?;
    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}
