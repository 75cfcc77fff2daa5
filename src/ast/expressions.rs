use std::any::Any;

use crate::{lexer::tokens::Token, Span};

use super::{
    ast::{Expr, ExprType, ExprWrapper, TypeWrapper},
    statements::{BlockStmt, Parameter},
};

macro_rules! impl_expr {
    ($node:ty, $kind:expr) => {
        impl Expr for $node {
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn get_expr_type(&self) -> ExprType {
                $kind
            }
            fn clone_wrapper(&self) -> ExprWrapper {
                ExprWrapper::new(self.clone())
            }
            fn get_span(&self) -> &Span {
                &self.span
            }
        }
    };
}

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

impl_expr!(NumberExpr, ExprType::Number);

/// String Expression
/// Represents a string literal in the AST.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl_expr!(StringExpr, ExprType::String);

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl_expr!(SymbolExpr, ExprType::Symbol);

// COMPLEX

/// Binary Expression
/// Represents an arithmetic, relational or logical operation (`a + b`).
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: Token,
    pub right: ExprWrapper,
    pub span: Span,
}

impl_expr!(BinaryExpr, ExprType::Binary);

/// Prefix Expression
/// Represents a prefix operation on an expression (`-a`, `!a`, `typeof a`).
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: ExprWrapper,
    pub span: Span,
}

impl_expr!(PrefixExpr, ExprType::Prefix);

/// Assignment Expression
/// Represents `=`, `+=`, `-=`, `*=` and `/=`. The assignee is not checked
/// for being assignable.
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: ExprWrapper,
    pub operator: Token,
    pub value: ExprWrapper,
    pub span: Span,
}

impl_expr!(AssignmentExpr, ExprType::Assignment);

/// Member Expression
/// Represents `object.property`.
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: ExprWrapper,
    pub property: String,
    pub span: Span,
}

impl_expr!(MemberExpr, ExprType::Member);

/// Computed Expression
/// Represents `object[index]`.
#[derive(Debug, Clone)]
pub struct ComputedExpr {
    pub object: ExprWrapper,
    pub index: ExprWrapper,
    pub span: Span,
}

impl_expr!(ComputedExpr, ExprType::Computed);

/// Call Expression
/// Represents a function call in the AST.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl_expr!(CallExpr, ExprType::Call);

/// Range Expression
/// Represents `lower..upper`.
#[derive(Debug, Clone)]
pub struct RangeExpr {
    pub lower: ExprWrapper,
    pub upper: ExprWrapper,
    pub span: Span,
}

impl_expr!(RangeExpr, ExprType::Range);

/// Struct Instantiation Expression
/// Represents `Name { field: value, ... }`. Property names are unique and
/// kept in source order.
#[derive(Debug, Clone)]
pub struct StructInstantiationExpr {
    pub name: String,
    pub properties: Vec<(String, ExprWrapper)>,
    pub span: Span,
}

impl StructInstantiationExpr {
    pub fn get_property(&self, name: &str) -> Option<&ExprWrapper> {
        self.properties
            .iter()
            .find(|(property, _)| property == name)
            .map(|(_, value)| value)
    }
}

impl_expr!(StructInstantiationExpr, ExprType::StructInstantiation);

/// Array Instantiation Expression
/// Represents `[]T { a, b, ... }`.
#[derive(Debug, Clone)]
pub struct ArrayInstantiationExpr {
    pub underlying: TypeWrapper,
    pub contents: Vec<ExprWrapper>,
    pub span: Span,
}

impl_expr!(ArrayInstantiationExpr, ExprType::ArrayInstantiation);

/// Function Expression
/// Represents an anonymous function, `fn (a: T) : R { ... }`.
#[derive(Debug, Clone)]
pub struct FunctionExpr {
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeWrapper>,
    pub body: BlockStmt,
    pub span: Span,
}

impl_expr!(FunctionExpr, ExprType::Function);

/// New Expression
/// Represents `new Callee(args)`. The operand is always a call.
#[derive(Debug, Clone)]
pub struct NewExpr {
    pub instantiation: CallExpr,
    pub span: Span,
}

impl_expr!(NewExpr, ExprType::New);
