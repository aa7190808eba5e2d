/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the typed AST
///
/// Submodules:
/// - ast: The node variant, node kinds and the program root
/// - expressions: Definitions for value-producing nodes and operators
/// - statements: Definitions for statement nodes
/// - types: Value types and callable signatures
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
