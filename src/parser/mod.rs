//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod parser;

pub use ast::{
    BinaryOp, BinaryOperator, FromCarrier, Import, Kind, Literal, Node, NodeKind, NumberType,
};
pub use parser::{parse, Parser};
