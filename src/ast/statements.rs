use std::{any::Any, slice::Iter};

use crate::Span;

use super::ast::{ExprWrapper, Stmt, StmtType, StmtWrapper, TypeWrapper};

macro_rules! impl_stmt {
    ($node:ty, $kind:expr) => {
        impl Stmt for $node {
            fn get_stmt_type(&self) -> StmtType {
                $kind
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn clone_wrapper(&self) -> StmtWrapper {
                StmtWrapper::new(self.clone())
            }
            fn get_span(&self) -> &Span {
                &self.span
            }
        }
    };
}

/// A named, typed parameter of a function or method.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub explicit_type: TypeWrapper,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
    pub fn len(&self) -> usize {
        self.body.len()
    }
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl_stmt!(BlockStmt, StmtType::BlockStmt);

#[derive(Debug)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl Stmt for ExpressionStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ExpressionStmt
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        self.expression.to_stmt_wrapper()
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `let`/`const` declaration. At least one of `explicit_type` and
/// `assigned_value` is present, and constants always have a value.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_constant: bool,
    pub assigned_value: Option<ExprWrapper>,
    pub explicit_type: Option<TypeWrapper>,
    pub span: Span,
}

impl_stmt!(VarDeclStmt, StmtType::VarDeclStmt);

/// `import name;` or `import name from "path";`. Without a `from` clause
/// the name doubles as the path.
#[derive(Debug, Clone)]
pub struct ImportStmt {
    pub name: String,
    pub from: String,
    pub span: Span,
}

impl_stmt!(ImportStmt, StmtType::ImportStmt);

/// `if` with an optional alternate, which is either a block or another `if`.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub consequent: BlockStmt,
    pub alternate: Option<StmtWrapper>,
    pub span: Span,
}

impl_stmt!(IfStmt, StmtType::IfStmt);

#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeWrapper>,
    pub body: BlockStmt,
    pub span: Span,
}

impl_stmt!(FnDeclStmt, StmtType::FnDeclStmt);

#[derive(Debug, Clone)]
pub struct StructProperty {
    pub name: String,
    pub is_static: bool,
    pub explicit_type: TypeWrapper,
}

#[derive(Debug, Clone)]
pub struct StructDeclStmt {
    pub name: String,
    pub properties: Vec<StructProperty>,
    pub span: Span,
}

impl StructDeclStmt {
    pub fn get_property(&self, name: &str) -> Option<&StructProperty> {
        self.properties.iter().find(|property| property.name == name)
    }
}

impl_stmt!(StructDeclStmt, StmtType::StructDeclStmt);

#[derive(Debug, Clone)]
pub struct ClassProperty {
    pub name: String,
    pub is_static: bool,
    pub explicit_type: Option<TypeWrapper>,
    pub assigned_value: Option<ExprWrapper>,
}

#[derive(Debug, Clone)]
pub struct ClassMethod {
    pub name: String,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeWrapper>,
    pub body: BlockStmt,
}

/// Class declaration. Member names are unique across properties and methods.
#[derive(Debug, Clone)]
pub struct ClassDeclStmt {
    pub name: String,
    pub properties: Vec<ClassProperty>,
    pub methods: Vec<ClassMethod>,
    pub span: Span,
}

impl_stmt!(ClassDeclStmt, StmtType::ClassDeclStmt);

/// `foreach value[, index] in iterable { ... }`
#[derive(Debug, Clone)]
pub struct ForeachStmt {
    pub value: String,
    pub index: Option<String>,
    pub iterable: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

impl_stmt!(ForeachStmt, StmtType::ForeachStmt);

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

impl_stmt!(WhileStmt, StmtType::WhileStmt);

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<ExprWrapper>,
    pub span: Span,
}

impl_stmt!(ReturnStmt, StmtType::ReturnStmt);
