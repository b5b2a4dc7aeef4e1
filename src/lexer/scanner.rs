//! Tokenizer implementation for the cyntax language
//!
//! A pull-based scanner: every call to [`Tokenizer::next_token`] consumes the
//! characters of exactly one token and hands it back. Whitespace and comments
//! are returned as tokens too, so callers decide what to skip.

use crate::error::{CyntaxError, CyntaxResult, LexErrorKind, SourceLocation};
use super::token::{Token, TokenKind};

/// Decoded value of the escape `\c`; `None` for escapes outside the table
pub fn unescape(c: char) -> Option<char> {
    match c {
        'b' => Some('\u{08}'),
        'f' => Some('\u{0C}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\u{0B}'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '?' => Some('?'),
        '0' => Some('\0'),
        _ => None,
    }
}

/// Printable form of a character for error messages
fn char_string(c: char) -> String {
    if c.is_control() {
        format!("ascii-{:02X}", c as u32)
    } else {
        c.to_string()
    }
}

/// Tokenizer over a borrowed source buffer
pub struct Tokenizer<'src> {
    source: &'src str,
    name: &'src str,
    /// Byte offset of the next unread character
    pos: usize,
    line: usize,
    column: usize,
    start: usize,
    start_line: usize,
    start_column: usize,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer; `name` only labels diagnostics
    pub fn new(source: &'src str, name: &'src str) -> Self {
        Self {
            source,
            name,
            pos: 0,
            line: 1,
            column: 1,
            start: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Restart on a new buffer
    pub fn reset(&mut self, source: &'src str, name: &'src str) {
        *self = Self::new(source, name);
    }

    pub fn source_name(&self) -> &'src str {
        self.name
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Location of a token produced by this tokenizer
    pub fn location_of(&self, token: &Token<'_>) -> SourceLocation {
        SourceLocation::new(token.line, token.column, Some(self.name.to_string()))
    }

    /// Tokenize the remaining input, up to and including the end token
    pub fn tokenize(&mut self) -> CyntaxResult<Vec<Token<'src>>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token.is_eof() {
                return Ok(tokens);
            }
        }
    }

    /// Scan a single token. At end of input this keeps returning `Eof`.
    pub fn next_token(&mut self) -> CyntaxResult<Token<'src>> {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;

        let (c, cc, ccc) = self.peek_three();
        let c = match c {
            Some(c) => c,
            None => return Ok(self.token(TokenKind::Eof)),
        };

        match c {
            // Single-character tokens
            '@' => self.operator(TokenKind::Comptime, 1),
            '{' => self.operator(TokenKind::LBrace, 1),
            '}' => self.operator(TokenKind::RBrace, 1),
            '(' => self.operator(TokenKind::LParen, 1),
            ')' => self.operator(TokenKind::RParen, 1),
            '[' => self.operator(TokenKind::LBracket, 1),
            ']' => self.operator(TokenKind::RBracket, 1),
            ',' => self.operator(TokenKind::Comma, 1),
            ';' => self.operator(TokenKind::Semicolon, 1),
            '?' => self.operator(TokenKind::Question, 1),
            '`' => self.operator(TokenKind::Grave, 1),
            '~' => self.operator(TokenKind::Tilde, 1),

            // Longest match first
            '=' => match cc {
                Some('=') => self.operator(TokenKind::Eq, 2),
                _ => self.operator(TokenKind::Equals, 1),
            },
            '!' => match cc {
                Some('=') => self.operator(TokenKind::NotEq, 2),
                _ => self.operator(TokenKind::Exclamation, 1),
            },
            '+' => match cc {
                Some('+') => self.operator(TokenKind::PlusPlus, 2),
                Some('=') => self.operator(TokenKind::PlusEq, 2),
                _ => self.operator(TokenKind::Plus, 1),
            },
            '-' => match cc {
                Some('>') => self.operator(TokenKind::RArrow, 2),
                Some('-') => self.operator(TokenKind::MinusMinus, 2),
                Some('=') => self.operator(TokenKind::MinusEq, 2),
                _ => self.operator(TokenKind::Minus, 1),
            },
            '*' => match cc {
                Some('=') => self.operator(TokenKind::StarEq, 2),
                _ => self.operator(TokenKind::Star, 1),
            },
            '/' => match cc {
                Some('=') => self.operator(TokenKind::SlashEq, 2),
                Some('/') => self.scan_line_comment(),
                Some('*') => self.scan_block_comment(),
                _ => self.operator(TokenKind::Slash, 1),
            },
            '%' => match cc {
                Some('=') => self.operator(TokenKind::PercentEq, 2),
                _ => self.operator(TokenKind::Percent, 1),
            },
            '^' => match cc {
                Some('=') => self.operator(TokenKind::CaretEq, 2),
                _ => self.operator(TokenKind::Caret, 1),
            },
            '|' => match cc {
                Some('|') => self.operator(TokenKind::LogicalOr, 2),
                Some('=') => self.operator(TokenKind::BarEq, 2),
                _ => self.operator(TokenKind::Bar, 1),
            },
            '&' => match cc {
                Some('&') => self.operator(TokenKind::LogicalAnd, 2),
                Some('=') => self.operator(TokenKind::AmpersandEq, 2),
                _ => self.operator(TokenKind::Ampersand, 1),
            },
            '.' => match (cc, ccc) {
                (Some('.'), Some('.')) => self.operator(TokenKind::Ellipsis, 3),
                (Some('.'), _) => self.operator(TokenKind::Sequence, 2),
                _ => self.operator(TokenKind::Dot, 1),
            },
            ':' => match cc {
                Some(':') => self.operator(TokenKind::Scope, 2),
                _ => self.operator(TokenKind::Colon, 1),
            },
            '<' => match (cc, ccc) {
                (Some('='), _) => self.operator(TokenKind::LessEq, 2),
                (Some('-'), _) => self.operator(TokenKind::LArrow, 2),
                (Some('<'), Some('=')) => self.operator(TokenKind::ShiftLeftEq, 3),
                (Some('<'), _) => self.operator(TokenKind::ShiftLeft, 2),
                _ => self.operator(TokenKind::LessThan, 1),
            },
            '>' => match (cc, ccc) {
                (Some('='), _) => self.operator(TokenKind::GreaterEq, 2),
                (Some('>'), Some('=')) => self.operator(TokenKind::ShiftRightEq, 3),
                (Some('>'), _) => self.operator(TokenKind::ShiftRight, 2),
                _ => self.operator(TokenKind::GreaterThan, 1),
            },
            '$' if cc == Some('{') => self.operator(TokenKind::StrExpr, 2),

            '"' => self.scan_string(),
            '\'' => self.scan_char(),

            // Number literals
            '0' => match cc {
                Some('x') | Some('X') => self.scan_hex_number(),
                Some('b') | Some('B') => self.scan_binary_number(),
                Some('0'..='7') => self.scan_octal_number(),
                _ => self.scan_decimal_number(),
            },
            c if c.is_ascii_digit() => self.scan_decimal_number(),

            c if c.is_whitespace() => {
                while self.peek().map_or(false, char::is_whitespace) {
                    self.eat(1);
                }
                Ok(self.token(TokenKind::Whitespace))
            }

            c if c.is_ascii_alphabetic() || c == '_' => self.scan_identifier(),

            _ => Err(self.error(
                LexErrorKind::UnexpectedChar,
                format!("Unexpected '{}'", char_string(c)),
            )),
        }
    }

    /// Scan the body of a `"..."` string; the opening quote is current.
    ///
    /// Stops without consuming `${` so the embedded expression can be
    /// tokenized on the next call.
    fn scan_string(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(1);
        let content_start = self.pos;

        loop {
            let (c, cc, _) = self.peek_three();
            match (c, cc) {
                (None, _) | (Some('\\'), None) => {
                    return Err(self.error_at_start(
                        LexErrorKind::UnterminatedString,
                        "unterminated string literal, EOF before '\"'",
                    ));
                }
                (Some('\\'), Some(e)) => {
                    if unescape(e).is_none() && e != '$' {
                        return Err(self.error(
                            LexErrorKind::BadEscape,
                            format!("unexpected escaped character, '{}'", char_string(e)),
                        ));
                    }
                    self.eat(2);
                }
                (Some('$'), Some('{')) => {
                    let value = &self.source[content_start..self.pos];
                    return Ok(self.token_with(TokenKind::String, value));
                }
                (Some('"'), _) => {
                    let value = &self.source[content_start..self.pos];
                    self.eat(1);
                    return Ok(self.token_with(TokenKind::String, value));
                }
                _ => self.eat(1),
            }
        }
    }

    /// Scan a `'c'` literal holding exactly one (possibly escaped) character
    fn scan_char(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(1);
        let content_start = self.pos;

        match self.peek_three() {
            (None, _, _) | (Some('\\'), None, _) => {
                return Err(self.error_at_start(
                    LexErrorKind::UnterminatedChar,
                    "unterminated character literal, EOF before \"'\"",
                ));
            }
            (Some('\\'), Some(e), _) => {
                if unescape(e).is_none() {
                    return Err(self.error(
                        LexErrorKind::BadEscape,
                        format!("character escape '\\{}' is not supported", char_string(e)),
                    ));
                }
                self.eat(2);
            }
            (Some('\''), _, _) => {
                return Err(self.error(LexErrorKind::UnexpectedChar, "empty character literal"));
            }
            _ => self.eat(1),
        }

        match self.peek() {
            Some('\'') => {
                let value = &self.source[content_start..self.pos];
                self.eat(1);
                Ok(self.token_with(TokenKind::CharLiteral, value))
            }
            Some(c) => Err(self.error(
                LexErrorKind::UnterminatedChar,
                format!("unexpected character '{}', expecting a \"'\"", char_string(c)),
            )),
            None => Err(self.error(
                LexErrorKind::UnterminatedChar,
                "unexpected EOF, expecting a \"'\"",
            )),
        }
    }

    /// Scan an identifier, then classify it against the keyword table
    fn scan_identifier(&mut self) -> CyntaxResult<Token<'src>> {
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.eat(1);
        }

        let word = &self.source[self.start..self.pos];
        let kind = TokenKind::from_word(word).unwrap_or(TokenKind::Identifier);
        Ok(self.token(kind))
    }

    fn scan_hex_number(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(2);
        let digits = self.eat_while(|c| c.is_ascii_hexdigit());

        if matches!(self.peek(), Some('.') | Some('p') | Some('P')) {
            return self.scan_hex_float(digits);
        }
        if digits == 0 {
            return Err(self.error(
                LexErrorKind::MalformedNumber,
                "hexadecimal literal has no digits after '0x'",
            ));
        }
        Ok(self.token(TokenKind::HexLiteral))
    }

    /// `0x` mantissa digits are already consumed
    fn scan_hex_float(&mut self, int_digits: usize) -> CyntaxResult<Token<'src>> {
        let mut digits = int_digits;
        if self.peek() == Some('.') {
            self.eat(1);
            digits += self.eat_while(|c| c.is_ascii_hexdigit());
        }
        if digits == 0 {
            return Err(self.error(
                LexErrorKind::MalformedNumber,
                "hexadecimal float has no digits in its mantissa",
            ));
        }
        if matches!(self.peek(), Some('p') | Some('P')) {
            self.scan_exponent()?;
        }
        Ok(self.token(TokenKind::FloatLiteral))
    }

    fn scan_binary_number(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(2);
        if self.eat_while(|c| c == '0' || c == '1') == 0 {
            return Err(self.error(
                LexErrorKind::MalformedNumber,
                "binary literal has no digits after '0b'",
            ));
        }
        Ok(self.token(TokenKind::BinLiteral))
    }

    fn scan_octal_number(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(1);
        self.eat_while(|c| ('0'..='7').contains(&c));
        Ok(self.token(TokenKind::OctLiteral))
    }

    fn scan_decimal_number(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat_while(|c| c.is_ascii_digit());

        let (c, cc, _) = self.peek_three();
        match (c, cc) {
            // `1..2` is a sequence, not a float
            (Some('.'), Some('.')) => Ok(self.token(TokenKind::DecLiteral)),
            (Some('.'), _) | (Some('e'), _) | (Some('E'), _) => self.scan_decimal_float(),
            _ => Ok(self.token(TokenKind::DecLiteral)),
        }
    }

    fn scan_decimal_float(&mut self) -> CyntaxResult<Token<'src>> {
        if self.peek() == Some('.') {
            self.eat(1);
            self.eat_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            self.scan_exponent()?;
        }
        Ok(self.token(TokenKind::FloatLiteral))
    }

    /// Exponent marker is current: `e`, `E`, `p` or `P`
    fn scan_exponent(&mut self) -> CyntaxResult<()> {
        self.eat(1);
        if matches!(self.peek(), Some('+') | Some('-')) {
            self.eat(1);
        }
        if self.eat_while(|c| c.is_ascii_digit()) == 0 {
            return Err(self.error(
                LexErrorKind::MalformedNumber,
                "exponent has no digits",
            ));
        }
        Ok(())
    }

    /// `//` is current; the comment runs up to, not including, the newline
    fn scan_line_comment(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(2);
        let content_start = self.pos;
        while self.peek().map_or(false, |c| c != '\n') {
            self.eat(1);
        }
        let value = &self.source[content_start..self.pos];
        Ok(self.token_with(TokenKind::Comment, value))
    }

    /// `/*` is current; the comment must be closed before end of input
    fn scan_block_comment(&mut self) -> CyntaxResult<Token<'src>> {
        self.eat(2);
        let content_start = self.pos;

        loop {
            match self.peek_three() {
                (None, _, _) => {
                    return Err(self.error_at_start(
                        LexErrorKind::UnterminatedComment,
                        "unterminated multiline comment, EOF before */",
                    ));
                }
                (Some('*'), Some('/'), _) => break,
                _ => self.eat(1),
            }
        }

        let value = &self.source[content_start..self.pos];
        self.eat(2);
        Ok(self.token_with(TokenKind::Comment, value))
    }

    fn operator(&mut self, kind: TokenKind, len: usize) -> CyntaxResult<Token<'src>> {
        self.eat(len);
        Ok(self.token(kind))
    }

    /// Token spanning everything consumed since `next_token` started
    fn token(&self, kind: TokenKind) -> Token<'src> {
        self.token_with(kind, &self.source[self.start..self.pos])
    }

    fn token_with(&self, kind: TokenKind, value: &'src str) -> Token<'src> {
        Token::new(kind, value, self.start_line, self.start_column)
    }

    /// Consume up to `count` characters, keeping line/column current
    fn eat(&mut self, count: usize) {
        for _ in 0..count {
            let Some(c) = self.peek() else { break };
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consume while `pred` holds; returns how many characters were eaten
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while self.peek().map_or(false, &pred) {
            self.eat(1);
            count += 1;
        }
        count
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_three(&self) -> (Option<char>, Option<char>, Option<char>) {
        let mut chars = self.source[self.pos..].chars();
        (chars.next(), chars.next(), chars.next())
    }

    /// Create an error at the current position
    fn error(&self, kind: LexErrorKind, message: impl Into<String>) -> CyntaxError {
        let location = SourceLocation::new(self.line, self.column, Some(self.name.to_string()));
        CyntaxError::lexical(kind, message, location)
    }

    /// Create an error at the start of the token being scanned
    fn error_at_start(&self, kind: LexErrorKind, message: impl Into<String>) -> CyntaxError {
        let location = SourceLocation::new(
            self.start_line,
            self.start_column,
            Some(self.name.to_string()),
        );
        CyntaxError::lexical(kind, message, location)
    }
}
