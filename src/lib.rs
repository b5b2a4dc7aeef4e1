//! # Cyntax
//!
//! Front end for a small custom language:
//! - a pull-based tokenizer that reports whitespace and comments as tokens
//! - a precedence-climbing expression parser with import statements
//! - a tagged-union syntax tree and a scoped symbol table
//!
//! ## Architecture
//!
//! - `lexer`: Tokenization of source code
//! - `parser`: Parsing tokens into an Abstract Syntax Tree (AST)
//! - `semantic`: Scoped symbol table used for define-before-use checks
//! - `render`: Box-drawing dump of a syntax tree
//! - `error`: Error handling and diagnostics

pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod semantic;

// Re-export commonly used types
pub use error::{CyntaxError, CyntaxResult, Diagnostic, SourceLocation};
pub use lexer::{Token, TokenKind, Tokenizer};
pub use parser::{Node, NodeKind, Parser};
pub use semantic::SymbolTable;

/// Version of the cyntax front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name reported in diagnostics for input read from stdin
pub const DEFAULT_SOURCE_NAME: &str = "<stdin>";

/// Parse a complete program against a fresh symbol table
///
/// Names brought in by `import` statements are visible to the expressions
/// that follow them; anything else is an undefined identifier.
pub fn parse(source: &str, source_name: &str) -> CyntaxResult<Node> {
    let mut symbols = SymbolTable::new();
    parser::parse(source, source_name, &mut symbols)
}
