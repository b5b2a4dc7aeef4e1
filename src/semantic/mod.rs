//! Semantic analysis module
//!
//! The front end's only semantic check is define-before-use of identifiers,
//! backed by the scoped symbol table.

pub mod symbols;

pub use symbols::{Symbol, SymbolKind, SymbolTable};
