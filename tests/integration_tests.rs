//! Integration tests for the source-to-AST pipeline.
//!
//! Programs go through `tokenize` and `parse` exactly as the binary runs
//! them; the resulting trees are rendered as s-expressions so whole shapes
//! can be compared at once.

use curly::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper, Stmt, StmtType, StmtWrapper, Type},
        expressions::*,
        statements::*,
    },
    errors::errors::ErrorImpl,
    format_error,
    lexer::tokens::TokenKind,
    parse_source,
};
use pretty_assertions::assert_eq;

fn render_expr(expr: &ExprWrapper) -> String {
    let any = expr.as_any();
    match expr.get_expr_type() {
        ExprType::Number => {
            format!("{}", any.downcast_ref::<NumberExpr>().unwrap().value)
        }
        ExprType::String => format!("{:?}", any.downcast_ref::<StringExpr>().unwrap().value),
        ExprType::Symbol => any.downcast_ref::<SymbolExpr>().unwrap().value.clone(),
        ExprType::Binary => {
            let binary = any.downcast_ref::<BinaryExpr>().unwrap();
            format!(
                "({} {} {})",
                binary.operator.value,
                render_expr(&binary.left),
                render_expr(&binary.right)
            )
        }
        ExprType::Prefix => {
            let prefix = any.downcast_ref::<PrefixExpr>().unwrap();
            format!(
                "({} {})",
                prefix.operator.value,
                render_expr(&prefix.right_expr)
            )
        }
        ExprType::Assignment => {
            let assignment = any.downcast_ref::<AssignmentExpr>().unwrap();
            format!(
                "({} {} {})",
                assignment.operator.value,
                render_expr(&assignment.assignee),
                render_expr(&assignment.value)
            )
        }
        ExprType::Member => {
            let member = any.downcast_ref::<MemberExpr>().unwrap();
            format!("(. {} {})", render_expr(&member.object), member.property)
        }
        ExprType::Computed => {
            let computed = any.downcast_ref::<ComputedExpr>().unwrap();
            format!(
                "([] {} {})",
                render_expr(&computed.object),
                render_expr(&computed.index)
            )
        }
        ExprType::Call => render_call(any.downcast_ref::<CallExpr>().unwrap()),
        ExprType::Range => {
            let range = any.downcast_ref::<RangeExpr>().unwrap();
            format!(
                "(.. {} {})",
                render_expr(&range.lower),
                render_expr(&range.upper)
            )
        }
        ExprType::StructInstantiation => {
            let literal = any.downcast_ref::<StructInstantiationExpr>().unwrap();
            let properties: Vec<String> = literal
                .properties
                .iter()
                .map(|(name, value)| format!(" ({} {})", name, render_expr(value)))
                .collect();
            format!("(struct {}{})", literal.name, properties.concat())
        }
        ExprType::ArrayInstantiation => {
            let array = any.downcast_ref::<ArrayInstantiationExpr>().unwrap();
            format!(
                "(array {:?}{})",
                array.underlying.get_type_type(),
                render_list(&array.contents)
            )
        }
        ExprType::Function => {
            let function = any.downcast_ref::<FunctionExpr>().unwrap();
            format!(
                "(fn ({}) {})",
                render_params(&function.parameters),
                render_block(&function.body)
            )
        }
        ExprType::New => {
            let new = any.downcast_ref::<NewExpr>().unwrap();
            format!("(new {})", render_call(&new.instantiation))
        }
    }
}

fn render_call(call: &CallExpr) -> String {
    format!(
        "(call {}{})",
        render_expr(&call.callee),
        render_list(&call.arguments)
    )
}

fn render_list(items: &[ExprWrapper]) -> String {
    items
        .iter()
        .map(|item| format!(" {}", render_expr(item)))
        .collect()
}

fn render_params(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|parameter| parameter.name.clone())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_block(block: &BlockStmt) -> String {
    let body: String = block
        .iter()
        .map(|stmt| format!(" {}", render_stmt(stmt)))
        .collect();
    format!("(block{})", body)
}

fn render_stmt(stmt: &StmtWrapper) -> String {
    let any = stmt.as_any();
    match stmt.get_stmt_type() {
        StmtType::ExpressionStmt => {
            render_expr(&any.downcast_ref::<ExpressionStmt>().unwrap().expression)
        }
        StmtType::BlockStmt => render_block(any.downcast_ref::<BlockStmt>().unwrap()),
        StmtType::VarDeclStmt => {
            let decl = any.downcast_ref::<VarDeclStmt>().unwrap();
            let keyword = if decl.is_constant { "const" } else { "let" };
            match &decl.assigned_value {
                Some(value) => format!("({} {} {})", keyword, decl.identifier, render_expr(value)),
                None => format!("({} {})", keyword, decl.identifier),
            }
        }
        StmtType::ImportStmt => {
            let import = any.downcast_ref::<ImportStmt>().unwrap();
            format!("(import {} {:?})", import.name, import.from)
        }
        StmtType::IfStmt => {
            let stmt = any.downcast_ref::<IfStmt>().unwrap();
            let alternate = stmt
                .alternate
                .as_ref()
                .map(|alternate| format!(" {}", render_stmt(alternate)))
                .unwrap_or_default();
            format!(
                "(if {} {}{})",
                render_expr(&stmt.condition),
                render_block(&stmt.consequent),
                alternate
            )
        }
        StmtType::FnDeclStmt => {
            let function = any.downcast_ref::<FnDeclStmt>().unwrap();
            format!(
                "(fn {} ({}) {})",
                function.identifier,
                render_params(&function.parameters),
                render_block(&function.body)
            )
        }
        StmtType::StructDeclStmt => {
            let decl = any.downcast_ref::<StructDeclStmt>().unwrap();
            let names: Vec<&str> = decl.properties.iter().map(|p| p.name.as_str()).collect();
            format!("(struct {} {})", decl.name, names.join(" "))
        }
        StmtType::ClassDeclStmt => {
            let decl = any.downcast_ref::<ClassDeclStmt>().unwrap();
            let mut members: Vec<String> = decl
                .properties
                .iter()
                .map(|p| p.name.clone())
                .collect();
            members.extend(decl.methods.iter().map(|m| format!("{}()", m.name)));
            format!("(class {} {})", decl.name, members.join(" "))
        }
        StmtType::ForeachStmt => {
            let stmt = any.downcast_ref::<ForeachStmt>().unwrap();
            let binding = match &stmt.index {
                Some(index) => format!("{} {}", stmt.value, index),
                None => stmt.value.clone(),
            };
            format!(
                "(foreach ({}) {} {})",
                binding,
                render_expr(&stmt.iterable),
                render_block(&stmt.body)
            )
        }
        StmtType::WhileStmt => {
            let stmt = any.downcast_ref::<WhileStmt>().unwrap();
            format!(
                "(while {} {})",
                render_expr(&stmt.condition),
                render_block(&stmt.body)
            )
        }
        StmtType::ReturnStmt => {
            let stmt = any.downcast_ref::<ReturnStmt>().unwrap();
            match &stmt.value {
                Some(value) => format!("(return {})", render_expr(value)),
                None => String::from("(return)"),
            }
        }
    }
}

fn render(source: &str) -> Vec<String> {
    parse_source(source, "test.curly")
        .unwrap()
        .iter()
        .map(render_stmt)
        .collect()
}

#[test]
fn test_end_to_end_declaration() {
    assert_eq!(
        render("let total = 1 + 2 * 3;"),
        vec!["(let total (+ 1 (* 2 3)))"]
    );
}

#[test]
fn test_precedence_and_grouping() {
    assert_eq!(
        render("a = b || c && d == e + f * -g; (a + b) * c; a - b - c;"),
        vec![
            "(= a (&& (|| b c) (== d (+ e (* f (- g))))))",
            "(* (+ a b) c)",
            "(- (- a b) c)",
        ]
    );
}

#[test]
fn test_grouping_is_transparent() {
    for expr in ["a.b(c)[d]", "1 + 2 * 3", "Point { x: 1 }", "0..n", "-x"] {
        assert_eq!(
            render(&format!("({});", expr)),
            render(&format!("{};", expr)),
            "{expr}"
        );
    }
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        render("a.b(c)[d]; list.items[0].name;"),
        vec![
            "([] (call (. a b) c) d)",
            "(. ([] (. list items) 0) name)"
        ]
    );
}

#[test]
fn test_literals() {
    assert_eq!(
        render(r#"let s = "a\tb"; let xs = []String{"x", s}; let p = new Point(1, 2);"#),
        vec![
            r#"(let s "a\tb")"#,
            r#"(let xs (array Symbol("String") "x" s))"#,
            "(let p (new (call Point 1 2)))",
        ]
    );
}

#[test]
fn test_if_else_chain_nests_right() {
    assert_eq!(
        render("if a { 1; } else if b { 2; } else { 3; }"),
        vec!["(if a (block 1) (if b (block 2) (block 3)))"]
    );
}

#[test]
fn test_program() {
    let source = r#"
        import math;
        import io from "std/io";

        struct Point {
            x: Number;
            y: Number;
        }

        class Shape {
            static count = 0;
            origin: Point;
            fn area(): Number { return 0; }
        }

        fn sum(xs: []Number): Number {
            let total = 0;
            foreach x, i in xs {
                total += x;
            }
            return total;
        }

        const origin = Point { x: 0, y: 0 };
        while running {
            tick(origin);
        }
    "#;

    assert_eq!(
        render(source),
        vec![
            r#"(import math "math")"#,
            r#"(import io "std/io")"#,
            "(struct Point x y)",
            "(class Shape count origin area())",
            "(fn sum (xs) (block (let total 0) (foreach (x i) xs (block (+= total x))) (return total)))",
            "(const origin (struct Point (x 0) (y 0)))",
            "(while running (block (call tick origin)))",
        ]
    );
}

#[test]
fn test_function_literal_argument() {
    assert_eq!(
        render("map(xs, fn(x: Number): Number { return x * 2; });"),
        vec!["(call map xs (fn (x) (block (return (* x 2)))))"]
    );
}

#[test]
fn test_first_error_aborts() {
    let source = "let a = 1;\nlet b = ;\nlet c = d e;";
    let error = parse_source(source, "bad.curly").unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::NoLeadingHandler {
            kind: TokenKind::Semicolon,
            token: String::from(";"),
        }
    );
    assert_eq!(error.get_position().0, 19);
    assert_eq!(error.get_position().1.as_str(), "bad.curly");
}

#[test]
fn test_lexical_error_surfaces_first() {
    let error = parse_source("let a = 1 +;\nlet s = \"open", "bad.curly").unwrap_err();
    assert_eq!(error.get_error_impl(), &ErrorImpl::UnterminatedString);
}

#[test]
fn test_format_error_report() {
    let source = "let a = 1;\nlet b = ;\n";
    let error = parse_source(source, "bad.curly").unwrap_err();

    let report = format_error(&error, source);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Error: NoLeadingHandler (`;` cannot start an expression or type)",
            "-> bad.curly",
            "  |",
            "2 | let b = ;",
            "  | --------^",
        ]
    );
}
