//! Error handling and diagnostics for the cyntax front end
//!
//! Every failure raised by the tokenizer, the parser or the symbol table is a
//! [`CyntaxError`]. There are no warnings: the first error aborts the parse.

use std::fmt;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for cyntax operations
pub type CyntaxResult<T> = Result<T, CyntaxError>;

/// Source location information for error reporting.
///
/// Positions taken from source text are 1-based. Line and column 0 mark an
/// error with no source position, such as popping the global scope, which
/// is reported at `<symbols>:0:0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Line number (1-based, 0 when there is no source position)
    pub line: usize,
    /// Column number (1-based, 0 when there is no source position)
    pub column: usize,
    /// Optional source name
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// What went wrong while scanning characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that cannot start any token
    UnexpectedChar,
    /// End of input inside a `/* ... */` comment
    UnterminatedComment,
    /// Escape sequence outside the supported table
    BadEscape,
    /// End of input before the closing `"`
    UnterminatedString,
    /// Character literal without its closing `'`
    UnterminatedChar,
    /// Numeric prefix or exponent with no digits after it
    MalformedNumber,
}

/// What went wrong while assembling the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedToken,
    MissingTerminator,
    UndefinedIdentifier,
    ScopeUnderflow,
    LiteralOverflow,
}

/// Main error type for the cyntax front end
#[derive(Debug, Clone, PartialEq)]
pub enum CyntaxError {
    /// Lexical analysis error
    Lexical {
        kind: LexErrorKind,
        message: String,
        location: SourceLocation,
    },
    /// Parsing error
    Syntax {
        kind: SyntaxErrorKind,
        message: String,
        location: SourceLocation,
    },
}

impl CyntaxError {
    /// Create a new lexical error
    pub fn lexical(
        kind: LexErrorKind,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::Lexical {
            kind,
            message: message.into(),
            location,
        }
    }

    /// Create a new syntax error
    pub fn syntax(
        kind: SyntaxErrorKind,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::Syntax {
            kind,
            message: message.into(),
            location,
        }
    }

    /// Popping the global scope; there is no token to blame, so the location
    /// is the symbol table itself.
    pub fn scope_underflow() -> Self {
        Self::syntax(
            SyntaxErrorKind::ScopeUnderflow,
            "cannot pop the global symbol table",
            SourceLocation::new(0, 0, Some("<symbols>".to_string())),
        )
    }

    /// Get the error kind as a string
    pub fn kind(&self) -> &str {
        match self {
            Self::Lexical { .. } => "Lexical Error",
            Self::Syntax { .. } => "Syntax Error",
        }
    }

    pub fn lex_kind(&self) -> Option<LexErrorKind> {
        match self {
            Self::Lexical { kind, .. } => Some(*kind),
            Self::Syntax { .. } => None,
        }
    }

    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            Self::Lexical { .. } => None,
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::Lexical { message, .. } | Self::Syntax { message, .. } => message,
        }
    }

    /// Get the source location
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::Lexical { location, .. } | Self::Syntax { location, .. } => location,
        }
    }
}

impl fmt::Display for CyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error(syntax): {}", self.location(), self.message())
    }
}

impl std::error::Error for CyntaxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::at(10, 5);
        assert_eq!(loc.to_string(), "10:5");

        let loc_with_file = SourceLocation::new(10, 5, Some("test.cy".to_string()));
        assert_eq!(loc_with_file.to_string(), "test.cy:10:5");
    }

    #[test]
    fn test_error_creation() {
        let loc = SourceLocation::at(1, 1);
        let err = CyntaxError::lexical(LexErrorKind::UnexpectedChar, "Unexpected '#'", loc.clone());

        assert_eq!(err.kind(), "Lexical Error");
        assert_eq!(err.lex_kind(), Some(LexErrorKind::UnexpectedChar));
        assert_eq!(err.syntax_kind(), None);
        assert_eq!(err.message(), "Unexpected '#'");
        assert_eq!(err.location(), &loc);
    }

    #[test]
    fn test_error_display() {
        let loc = SourceLocation::new(5, 10, Some("<stdin>".to_string()));
        let err = CyntaxError::syntax(
            SyntaxErrorKind::MissingTerminator,
            "expression's missing terminal semi-colon ';'",
            loc,
        );

        assert_eq!(
            err.to_string(),
            "<stdin>:5:10: error(syntax): expression's missing terminal semi-colon ';'"
        );
    }

    #[test]
    fn test_lexical_error_uses_same_shape() {
        let loc = SourceLocation::new(2, 3, Some("main.cy".to_string()));
        let err = CyntaxError::lexical(
            LexErrorKind::UnterminatedComment,
            "unterminated multiline comment, EOF before */",
            loc,
        );
        assert!(err.to_string().starts_with("main.cy:2:3: error(syntax): "));
    }

    #[test]
    fn test_scope_underflow_location() {
        let err = CyntaxError::scope_underflow();
        assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::ScopeUnderflow));
        assert_eq!(err.location().to_string(), "<symbols>:0:0");
    }
}
