//! Abstract Syntax Tree definitions
//!
//! Every node is a [`Node`]: a variant payload ([`NodeKind`]), the ordered
//! list of children it exclusively owns, and the position it came from.
//! Child order is evaluation and display order.

use crate::error::SourceLocation;
use crate::lexer::TokenKind;

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub location: SourceLocation,
}

/// Variant payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root; children are the top-level statements
    Program,
    Identifier { name: String },
    Import(Import),
    Literal(Literal),
    /// Children are `left` then `right`
    BinaryExpr(BinaryOperator),
    NumberType(NumberType),
}

/// Discriminant of [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Program,
    Ident,
    Import,
    NumberType,
    Literal,
    BinaryExpr,
}

impl Node {
    fn new(kind: NodeKind, children: Vec<Node>, location: SourceLocation) -> Self {
        Self {
            kind,
            children,
            location,
        }
    }

    pub fn program(statements: Vec<Node>, location: SourceLocation) -> Self {
        Self::new(NodeKind::Program, statements, location)
    }

    pub fn identifier(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(NodeKind::Identifier { name: name.into() }, Vec::new(), location)
    }

    pub fn import(import: Import, location: SourceLocation) -> Self {
        Self::new(NodeKind::Import(import), Vec::new(), location)
    }

    pub fn literal(value: Literal, location: SourceLocation) -> Self {
        Self::new(NodeKind::Literal(value), Vec::new(), location)
    }

    pub fn binary(
        operator: BinaryOperator,
        left: Node,
        right: Node,
        location: SourceLocation,
    ) -> Self {
        Self::new(NodeKind::BinaryExpr(operator), vec![left, right], location)
    }

    pub fn number_type(number: NumberType, location: SourceLocation) -> Self {
        Self::new(NodeKind::NumberType(number), Vec::new(), location)
    }

    pub fn tag(&self) -> Kind {
        match &self.kind {
            NodeKind::Program => Kind::Program,
            NodeKind::Identifier { .. } => Kind::Ident,
            NodeKind::Import(_) => Kind::Import,
            NodeKind::Literal(_) => Kind::Literal,
            NodeKind::BinaryExpr(_) => Kind::BinaryExpr,
            NodeKind::NumberType(_) => Kind::NumberType,
        }
    }

    /// Left operand of a binary expression
    pub fn left(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::BinaryExpr(_) => self.children.first(),
            _ => None,
        }
    }

    /// Right operand of a binary expression
    pub fn right(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::BinaryExpr(_) => self.children.get(1),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<&BinaryOperator> {
        match &self.kind {
            NodeKind::BinaryExpr(op) => Some(op),
            _ => None,
        }
    }

    pub fn as_import(&self) -> Option<&Import> {
        match &self.kind {
            NodeKind::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            NodeKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

/// `import module(.member | .{a, b})? (-> alias)?;`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Import {
    pub module_name: String,
    pub symbols: Vec<String>,
    pub alias: Option<String>,
}

/// Literal value.
///
/// Every integer width travels as a `u64`; [`Literal::as_integer`] narrows
/// it to the width the caller asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Char(char),
    Integer(u64),
    Double(f64),
    String(String),
}

/// Integer types that can be read out of the `u64` literal carrier
pub trait FromCarrier: Copy {
    fn from_carrier(value: u64) -> Self;
}

macro_rules! impl_from_carrier {
    ($($t:ty),*) => {
        $(
            impl FromCarrier for $t {
                fn from_carrier(value: u64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_from_carrier!(u8, i8, u16, i16, u32, i32, u64, i64);

impl Literal {
    /// Integer value cast (truncating) to `T`
    pub fn as_integer<T: FromCarrier>(&self) -> Option<T> {
        match self {
            Self::Integer(value) => Some(T::from_carrier(*value)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

/// An operator together with its spelling and binding strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOperator {
    pub op: BinaryOp,
    pub symbol: &'static str,
    pub precedence: u32,
}

impl BinaryOperator {
    const fn new(op: BinaryOp, symbol: &'static str, precedence: u32) -> Self {
        Self {
            op,
            symbol,
            precedence,
        }
    }

    /// Operator a token stands for, if it is a binary operator at all
    pub fn for_token(kind: TokenKind) -> Option<Self> {
        let operator = match kind {
            TokenKind::Plus => Self::new(BinaryOp::Add, "+", 10),
            TokenKind::Minus => Self::new(BinaryOp::Sub, "-", 10),
            TokenKind::Star => Self::new(BinaryOp::Mul, "*", 20),
            TokenKind::Slash => Self::new(BinaryOp::Div, "/", 20),
            TokenKind::Eq => Self::new(BinaryOp::Eq, "==", 30),
            TokenKind::NotEq => Self::new(BinaryOp::NotEq, "!=", 30),
            TokenKind::LessThan => Self::new(BinaryOp::Less, "<", 40),
            TokenKind::GreaterThan => Self::new(BinaryOp::Greater, ">", 40),
            TokenKind::LessEq => Self::new(BinaryOp::LessEq, "<=", 40),
            TokenKind::GreaterEq => Self::new(BinaryOp::GreaterEq, ">=", 40),
            _ => return None,
        };
        Some(operator)
    }
}

/// A primitive numeric type, described by its canonical name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberType {
    pub name: &'static str,
    pub byte_size: usize,
    pub is_signed: bool,
    pub is_float: bool,
}

const fn int(name: &'static str, byte_size: usize, is_signed: bool) -> NumberType {
    NumberType {
        name,
        byte_size,
        is_signed,
        is_float: false,
    }
}

const fn float(name: &'static str, byte_size: usize) -> NumberType {
    NumberType {
        name,
        byte_size,
        is_signed: true,
        is_float: true,
    }
}

static NUMBER_TYPES: [NumberType; 21] = [
    int("i8", 1, true),
    int("u8", 1, false),
    int("i16", 2, true),
    int("u16", 2, false),
    int("i32", 4, true),
    int("u32", 4, false),
    int("i64", 8, true),
    int("u64", 8, false),
    float("f32", 4),
    float("f64", 8),
    float("float", 4),
    float("double", 8),
    int("byte", 1, false),
    int("char", 1, true),
    int("short", 2, true),
    int("ushort", 2, false),
    int("int", 4, true),
    int("uint", 4, false),
    int("unsigned", 4, false),
    int("long", 8, true),
    int("ulong", 8, false),
];

impl NumberType {
    /// Registry entry for `name`; the returned name borrows the registry
    pub fn lookup(name: &str) -> Option<Self> {
        NUMBER_TYPES.iter().find(|ty| ty.name == name).copied()
    }

    /// All registered numeric types
    pub fn all() -> &'static [NumberType] {
        &NUMBER_TYPES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::at(1, 1)
    }

    #[test]
    fn test_binary_node_children_order() {
        let op = BinaryOperator::for_token(TokenKind::Minus).unwrap();
        let node = Node::binary(
            op,
            Node::literal(Literal::Integer(8), loc()),
            Node::identifier("x", loc()),
            loc(),
        );

        assert_eq!(node.tag(), Kind::BinaryExpr);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.left().and_then(Node::as_literal), Some(&Literal::Integer(8)));
        assert_eq!(node.right().and_then(Node::identifier_name), Some("x"));
        assert_eq!(node.operator().map(|o| o.op), Some(BinaryOp::Sub));
    }

    #[test]
    fn test_leaf_accessors_on_wrong_kind() {
        let leaf = Node::identifier("x", loc());
        assert!(leaf.left().is_none());
        assert!(leaf.operator().is_none());
        assert!(leaf.as_import().is_none());
        assert!(leaf.children.is_empty());
    }

    #[test]
    fn test_operator_table() {
        let expected = [
            (TokenKind::Plus, BinaryOp::Add, "+", 10),
            (TokenKind::Minus, BinaryOp::Sub, "-", 10),
            (TokenKind::Star, BinaryOp::Mul, "*", 20),
            (TokenKind::Slash, BinaryOp::Div, "/", 20),
            (TokenKind::Eq, BinaryOp::Eq, "==", 30),
            (TokenKind::NotEq, BinaryOp::NotEq, "!=", 30),
            (TokenKind::LessThan, BinaryOp::Less, "<", 40),
            (TokenKind::GreaterThan, BinaryOp::Greater, ">", 40),
            (TokenKind::LessEq, BinaryOp::LessEq, "<=", 40),
            (TokenKind::GreaterEq, BinaryOp::GreaterEq, ">=", 40),
        ];
        for (kind, op, symbol, precedence) in expected {
            let found = BinaryOperator::for_token(kind).unwrap();
            assert_eq!((found.op, found.symbol, found.precedence), (op, symbol, precedence));
        }
        assert!(BinaryOperator::for_token(TokenKind::Percent).is_none());
        assert!(BinaryOperator::for_token(TokenKind::Equals).is_none());
    }

    #[test]
    fn test_integer_narrowing() {
        let value = Literal::Integer(0x1_0000_01FF);
        assert_eq!(value.as_integer::<u64>(), Some(0x1_0000_01FF));
        assert_eq!(value.as_integer::<u32>(), Some(0x01FF));
        assert_eq!(value.as_integer::<u8>(), Some(0xFF));
        assert_eq!(value.as_integer::<i8>(), Some(-1));
        assert_eq!(Literal::Bool(true).as_integer::<i32>(), None);
    }

    #[test]
    fn test_null_literal() {
        assert!(Literal::Null.is_null());
        assert!(!Literal::Char('a').is_null());
    }

    #[test]
    fn test_number_type_registry() {
        let i16 = NumberType::lookup("i16").unwrap();
        assert_eq!((i16.byte_size, i16.is_signed, i16.is_float), (2, true, false));

        let double = NumberType::lookup("double").unwrap();
        assert_eq!((double.byte_size, double.is_float), (8, true));

        let byte = NumberType::lookup("byte").unwrap();
        assert!(!byte.is_signed);

        assert!(NumberType::lookup("i128").is_none());
        assert!(NumberType::lookup("").is_none());
    }

    #[test]
    fn test_number_type_names_are_unique() {
        let all = NumberType::all();
        for (i, ty) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|other| other.name != ty.name));
        }
    }

    #[test]
    fn test_number_type_node() {
        let node = Node::number_type(NumberType::lookup("u32").unwrap(), loc());
        assert_eq!(node.tag(), Kind::NumberType);
        assert!(node.children.is_empty());
    }
}
