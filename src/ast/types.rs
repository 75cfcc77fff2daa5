//! Type annotation nodes.
//!
//! Annotations are kept exactly as written: a named type is stored as a
//! symbol, and `[]T` wraps its element annotation. Resolving names to real
//! types is left to a later stage.

use std::any::Any;

use crate::Span;

use super::ast::{Type, TypeType, TypeWrapper};

/// A named type reference such as `Int` or `Point`.
#[derive(Debug, Clone)]
pub struct SymbolType {
    pub name: String,
    pub span: Span,
}

impl Type for SymbolType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Symbol(self.name.clone())
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// An array annotation, `[]T`.
#[derive(Debug, Clone)]
pub struct ArrayType {
    pub underlying: TypeWrapper, // []T
    pub span: Span,
}

impl Type for ArrayType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_type(&self) -> TypeType {
        TypeType::Array(Box::new(self.underlying.get_type_type()))
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
