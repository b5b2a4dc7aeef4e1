//! Scoped symbol table
//!
//! A stack of scopes. The bottom scope is the global scope and lives as long
//! as the table; every other scope is pushed and popped strictly LIFO.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CyntaxError, CyntaxResult};

/// What a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Ident,
    Func,
    Lambda,
    Type,
    Module,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ident => "identifier",
            Self::Func => "function",
            Self::Lambda => "lambda",
            Self::Type => "type",
            Self::Module => "module",
        };
        write!(f, "{}", name)
    }
}

/// A named entry in a scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
}

impl Symbol {
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::Ident, name)
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::new(SymbolKind::Module, name)
    }
}

/// Stack of nested scopes; lookups walk from the innermost scope outward
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Symbol>>,
}

impl SymbolTable {
    /// Create a table holding only the global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Open a new innermost scope
    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Discard the innermost scope. The global scope can never be popped.
    pub fn pop(&mut self) -> CyntaxResult<()> {
        if self.scopes.len() == 1 {
            return Err(CyntaxError::scope_underflow());
        }
        self.scopes.pop();
        Ok(())
    }

    /// Number of active scopes, the global scope included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Insert into the innermost scope.
    ///
    /// Returns `false`, leaving the existing entry untouched, if the name is
    /// already bound in that scope. Outer bindings are shadowed, not rejected.
    pub fn add(&mut self, symbol: Symbol) -> bool {
        let scope = self.innermost_mut();
        if scope.contains_key(&symbol.name) {
            return false;
        }
        scope.insert(symbol.name.clone(), symbol);
        true
    }

    /// Find the closest visible binding of `name`
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn innermost_mut(&mut self) -> &mut HashMap<String, Symbol> {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
