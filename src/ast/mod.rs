/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Core AST traits, kind tags and owning wrappers
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes
/// - types: Definitions for type annotations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
