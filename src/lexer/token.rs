//! Token definitions for the cyntax language
//!
//! This module defines all token kinds produced by the tokenizer.

use std::fmt;

/// A token borrowed from the source buffer.
///
/// `value` points into the text the tokenizer was created over, so a token
/// cannot outlive that buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub value: &'src str,
    pub line: usize,
    pub column: usize,
}

impl<'src> Token<'src> {
    /// Create a new token
    pub fn new(kind: TokenKind, value: &'src str, line: usize, column: usize) -> Self {
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    /// Whitespace and comments carry no syntax
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Kind description using the token's own spelling for keywords,
    /// so `u8` reads as `keyword 'u8'` rather than its type category
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Keyword(_) => format!("keyword '{}'", self.value),
            kind => kind.to_string(),
        }
    }
}

/// Token kinds in the cyntax language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural markers
    Eof,
    Whitespace,     // any run of consecutive white space
    Comment,        // `// ...` or `/* ... */`
    StrExpr,        // `${`, start of an expression embedded in a string

    // Literals
    BoolLiteral,    // true | false
    CharLiteral,    // one character under single quotes
    HexLiteral,     // 0x1F
    BinLiteral,     // 0b101
    OctLiteral,     // 017
    DecLiteral,     // 42
    FloatLiteral,   // 1.5e3, 0x1.8p1
    String,         // contents of a double-quoted string

    Identifier,
    Keyword(Keyword),

    // Punctuation
    LBrace,         // {
    RBrace,         // }
    LParen,         // (
    RParen,         // )
    LBracket,       // [
    RBracket,       // ]
    Comptime,       // @
    Comma,          // ,
    Semicolon,      // ;
    Question,       // ?
    Grave,          // `
    Tilde,          // ~
    Colon,          // :
    Dot,            // .

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Percent,        // %
    Caret,          // ^
    Bar,            // |
    Ampersand,      // &
    Exclamation,    // !
    Equals,         // =
    LessThan,       // <
    GreaterThan,    // >
    RArrow,         // ->
    LArrow,         // <-
    Eq,             // ==
    NotEq,          // !=
    GreaterEq,      // >=
    LessEq,         // <=
    PlusEq,         // +=
    MinusEq,        // -=
    StarEq,         // *=
    SlashEq,        // /=
    PercentEq,      // %=
    AmpersandEq,    // &=
    BarEq,          // |=
    CaretEq,        // ^=
    ShiftLeft,      // <<
    ShiftRight,     // >>
    ShiftLeftEq,    // <<=
    ShiftRightEq,   // >>=
    LogicalAnd,     // &&
    LogicalOr,      // ||
    PlusPlus,       // ++
    MinusMinus,     // --
    Scope,          // ::
    Sequence,       // ..
    Ellipsis,       // ...
}

impl TokenKind {
    /// Classify an identifier spelling; `None` means a plain identifier
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "true" | "false" => Some(Self::BoolLiteral),
            _ => Keyword::from_str(word).map(Self::Keyword),
        }
    }

    /// Integer literal radix for the numeric sub-kinds
    pub fn radix(&self) -> Option<u32> {
        match self {
            Self::HexLiteral => Some(16),
            Self::BinLiteral => Some(2),
            Self::OctLiteral => Some(8),
            Self::DecLiteral => Some(10),
            _ => None,
        }
    }
}

/// Keywords in the cyntax language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    In,
    As,
    Is,
    For,
    Auto,
    Case,
    Break,
    Defer,
    Raise,
    Else,
    From,
    Func,
    Void,
    Null,
    This,
    Using,
    Async,
    Await,
    While,
    Module,
    Import,
    Native,
    Switch,
    Return,
    Sizeof,
    Struct,
    Continue,

    // Types
    IntType,
    FloatType,
    BoolType,
    StrType,
    CodeType,
}

impl Keyword {
    /// Get keyword from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "if" => Some(Self::If),
            "in" => Some(Self::In),
            "as" => Some(Self::As),
            "is" => Some(Self::Is),
            "for" => Some(Self::For),
            "auto" => Some(Self::Auto),
            "case" => Some(Self::Case),
            "break" => Some(Self::Break),
            "defer" => Some(Self::Defer),
            "raise" => Some(Self::Raise),
            "else" => Some(Self::Else),
            "from" => Some(Self::From),
            "func" => Some(Self::Func),
            "void" => Some(Self::Void),
            "null" => Some(Self::Null),
            "this" => Some(Self::This),
            "using" => Some(Self::Using),
            "async" => Some(Self::Async),
            "await" => Some(Self::Await),
            "while" => Some(Self::While),
            "module" => Some(Self::Module),
            "import" => Some(Self::Import),
            "native" => Some(Self::Native),
            "switch" => Some(Self::Switch),
            "return" => Some(Self::Return),
            "sizeof" => Some(Self::Sizeof),
            "struct" => Some(Self::Struct),
            "continue" => Some(Self::Continue),
            "short" | "ushort" | "int" | "uint" | "long" | "ulong" | "byte" | "char" | "i8"
            | "u8" | "i16" | "u16" | "i32" | "u32" | "i64" | "u64" => Some(Self::IntType),
            "f32" | "f64" => Some(Self::FloatType),
            "bool" => Some(Self::BoolType),
            "string" => Some(Self::StrType),
            "code" => Some(Self::CodeType),
            _ => None,
        }
    }

    /// Get string representation of keyword.
    ///
    /// Type keywords cover several spellings; they report their category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::If => "if",
            Self::In => "in",
            Self::As => "as",
            Self::Is => "is",
            Self::For => "for",
            Self::Auto => "auto",
            Self::Case => "case",
            Self::Break => "break",
            Self::Defer => "defer",
            Self::Raise => "raise",
            Self::Else => "else",
            Self::From => "from",
            Self::Func => "func",
            Self::Void => "void",
            Self::Null => "null",
            Self::This => "this",
            Self::Using => "using",
            Self::Async => "async",
            Self::Await => "await",
            Self::While => "while",
            Self::Module => "module",
            Self::Import => "import",
            Self::Native => "native",
            Self::Switch => "switch",
            Self::Return => "return",
            Self::Sizeof => "sizeof",
            Self::Struct => "struct",
            Self::Continue => "continue",
            Self::IntType => "int-type",
            Self::FloatType => "float-type",
            Self::BoolType => "bool",
            Self::StrType => "string",
            Self::CodeType => "code",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "EOF"),
            Self::Whitespace => write!(f, "whitespace"),
            Self::Comment => write!(f, "comment"),
            Self::StrExpr => write!(f, "${{"),
            Self::BoolLiteral => write!(f, "bool literal"),
            Self::CharLiteral => write!(f, "char literal"),
            Self::HexLiteral => write!(f, "hex literal"),
            Self::BinLiteral => write!(f, "binary literal"),
            Self::OctLiteral => write!(f, "octal literal"),
            Self::DecLiteral => write!(f, "decimal literal"),
            Self::FloatLiteral => write!(f, "float literal"),
            Self::String => write!(f, "string"),
            Self::Identifier => write!(f, "identifier"),
            Self::Keyword(Keyword::IntType) => write!(f, "integer type keyword"),
            Self::Keyword(Keyword::FloatType) => write!(f, "float type keyword"),
            Self::Keyword(kw) => write!(f, "keyword '{}'", kw),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comptime => write!(f, "@"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::Question => write!(f, "?"),
            Self::Grave => write!(f, "`"),
            Self::Tilde => write!(f, "~"),
            Self::Colon => write!(f, ":"),
            Self::Dot => write!(f, "."),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Caret => write!(f, "^"),
            Self::Bar => write!(f, "|"),
            Self::Ampersand => write!(f, "&"),
            Self::Exclamation => write!(f, "!"),
            Self::Equals => write!(f, "="),
            Self::LessThan => write!(f, "<"),
            Self::GreaterThan => write!(f, ">"),
            Self::RArrow => write!(f, "->"),
            Self::LArrow => write!(f, "<-"),
            Self::Eq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::GreaterEq => write!(f, ">="),
            Self::LessEq => write!(f, "<="),
            Self::PlusEq => write!(f, "+="),
            Self::MinusEq => write!(f, "-="),
            Self::StarEq => write!(f, "*="),
            Self::SlashEq => write!(f, "/="),
            Self::PercentEq => write!(f, "%="),
            Self::AmpersandEq => write!(f, "&="),
            Self::BarEq => write!(f, "|="),
            Self::CaretEq => write!(f, "^="),
            Self::ShiftLeft => write!(f, "<<"),
            Self::ShiftRight => write!(f, ">>"),
            Self::ShiftLeftEq => write!(f, "<<="),
            Self::ShiftRightEq => write!(f, ">>="),
            Self::LogicalAnd => write!(f, "&&"),
            Self::LogicalOr => write!(f, "||"),
            Self::PlusPlus => write!(f, "++"),
            Self::MinusMinus => write!(f, "--"),
            Self::Scope => write!(f, "::"),
            Self::Sequence => write!(f, ".."),
            Self::Ellipsis => write!(f, "..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("import"), Some(Keyword::Import));
        assert_eq!(Keyword::from_str("func"), Some(Keyword::Func));
        assert_eq!(Keyword::from_str("null"), Some(Keyword::Null));
        assert_eq!(Keyword::from_str("u16"), Some(Keyword::IntType));
        assert_eq!(Keyword::from_str("f64"), Some(Keyword::FloatType));
        assert_eq!(Keyword::from_str("Import"), None);
        assert_eq!(Keyword::from_str("imports"), None);
    }

    #[test]
    fn test_bool_spellings_are_literals() {
        assert_eq!(TokenKind::from_word("true"), Some(TokenKind::BoolLiteral));
        assert_eq!(TokenKind::from_word("false"), Some(TokenKind::BoolLiteral));
        assert_eq!(TokenKind::from_word("True"), None);
        assert_eq!(
            TokenKind::from_word("while"),
            Some(TokenKind::Keyword(Keyword::While))
        );
    }

    #[test]
    fn test_radix() {
        assert_eq!(TokenKind::HexLiteral.radix(), Some(16));
        assert_eq!(TokenKind::OctLiteral.radix(), Some(8));
        assert_eq!(TokenKind::FloatLiteral.radix(), None);
    }

    #[test]
    fn test_trivia() {
        assert!(Token::new(TokenKind::Whitespace, " ", 1, 1).is_trivia());
        assert!(Token::new(TokenKind::Comment, " c ", 1, 1).is_trivia());
        assert!(!Token::new(TokenKind::Semicolon, ";", 1, 1).is_trivia());
    }

    #[test]
    fn test_type_keywords_describe_their_spelling() {
        let u8_token = Token::new(TokenKind::Keyword(Keyword::IntType), "u8", 1, 1);
        assert_eq!(u8_token.describe(), "keyword 'u8'");
        assert_eq!(
            Token::new(TokenKind::Keyword(Keyword::FloatType), "f64", 1, 1).describe(),
            "keyword 'f64'"
        );
        assert_eq!(Token::new(TokenKind::Semicolon, ";", 1, 1).describe(), ";");

        assert_eq!(TokenKind::Keyword(Keyword::IntType).to_string(), "integer type keyword");
        assert_eq!(TokenKind::Keyword(Keyword::Import).to_string(), "keyword 'import'");
    }
}
