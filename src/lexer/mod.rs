//! Lexical analysis module
//!
//! This module handles tokenization of cyntax source code.

pub mod token;
pub mod scanner;

pub use token::{Token, TokenKind, Keyword};
pub use scanner::{unescape, Tokenizer};
