//! Parser implementation
//!
//! Single pass, one token of lookahead, no backtracking. Tokens are pulled
//! from the tokenizer on demand; expressions are built by precedence climbing
//! over the operator table in [`BinaryOperator::for_token`].

use crate::error::{CyntaxError, CyntaxResult, SourceLocation, SyntaxErrorKind};
use crate::lexer::{unescape, Keyword, Token, TokenKind, Tokenizer};
use crate::semantic::{Symbol, SymbolTable};
use super::ast::*;

/// Parse `source` into a `Program` node, resolving identifiers against `symbols`
pub fn parse(source: &str, source_name: &str, symbols: &mut SymbolTable) -> CyntaxResult<Node> {
    Parser::new(source, source_name, symbols).parse()
}

/// Parser for cyntax source code
pub struct Parser<'src, 'sym> {
    tokenizer: Tokenizer<'src>,
    lookahead: Token<'src>,
    symbols: &'sym mut SymbolTable,
}

impl<'src, 'sym> Parser<'src, 'sym> {
    /// Create a parser over `source`; `source_name` only labels diagnostics
    pub fn new(source: &'src str, source_name: &'src str, symbols: &'sym mut SymbolTable) -> Self {
        Self {
            tokenizer: Tokenizer::new(source, source_name),
            lookahead: Token::new(TokenKind::Eof, "", 1, 1),
            symbols,
        }
    }

    /// Parse the whole input into a `Program` node
    pub fn parse(&mut self) -> CyntaxResult<Node> {
        let location = SourceLocation::new(1, 1, Some(self.tokenizer.source_name().to_string()));
        let mut statements = Vec::new();

        self.advance()?;
        loop {
            self.skip_trivia()?;
            match self.lookahead.kind {
                TokenKind::Eof => break,
                TokenKind::Keyword(Keyword::Import) => statements.push(self.import_statement()?),
                _ => statements.push(self.expression_statement()?),
            }
        }

        Ok(Node::program(statements, location))
    }

    // ===== Statements =====

    fn expression_statement(&mut self) -> CyntaxResult<Node> {
        let expr = self.binary_expr(0)?;
        self.consume(
            TokenKind::Semicolon,
            SyntaxErrorKind::MissingTerminator,
            "expression's missing terminal semi-colon ';'",
        )?;
        Ok(expr)
    }

    /// `import name (. member | . { a, b })? (-> alias)? ;`
    fn import_statement(&mut self) -> CyntaxResult<Node> {
        let location = self.location();
        self.advance()?;
        self.consume(
            TokenKind::Whitespace,
            SyntaxErrorKind::UnexpectedToken,
            "'import' keyword should be followed by 1 or more spaces",
        )?;

        let mut import = Import {
            module_name: self.consume_identifier("invalid import statement, expecting name of module")?,
            ..Import::default()
        };

        if self.check(TokenKind::Dot) {
            self.advance()?;
            if self.check(TokenKind::Identifier) {
                import.symbols.push(self.lookahead.value.to_string());
                self.advance()?;
            } else {
                self.consume(
                    TokenKind::LBrace,
                    SyntaxErrorKind::UnexpectedToken,
                    "unexpected token, expecting '{' or symbol name",
                )?;
                import.symbols = self.comma_separated_identifiers()?;
                self.consume(
                    TokenKind::RBrace,
                    SyntaxErrorKind::UnexpectedToken,
                    "unexpected token, expecting '}' to import symbols",
                )?;
            }
        }

        self.skip_trivia()?;
        if self.check(TokenKind::RArrow) {
            self.advance()?;
            self.skip_trivia()?;
            import.alias =
                Some(self.consume_identifier("unexpected token, expecting the name of the symbol")?);
            self.skip_trivia()?;
        }

        if !self.check(TokenKind::Semicolon) && !self.check(TokenKind::Eof) {
            return Err(self.unexpected("unexpected token, expecting ';' to end the import statement"));
        }
        self.consume(
            TokenKind::Semicolon,
            SyntaxErrorKind::MissingTerminator,
            "import statement must be terminated by a ';'",
        )?;

        self.bind_import(&import);
        Ok(Node::import(import, location))
    }

    /// `a, b , c` with optional whitespace around each name
    fn comma_separated_identifiers(&mut self) -> CyntaxResult<Vec<String>> {
        let mut names = Vec::new();
        loop {
            self.skip_trivia()?;
            names.push(self.consume_identifier("unexpected token, expecting identifier")?);
            self.skip_trivia()?;
            if !self.check(TokenKind::Comma) {
                return Ok(names);
            }
            self.advance()?;
        }
    }

    /// Make the names an import brings in visible to later expressions.
    /// A name that is already bound stays as it is.
    fn bind_import(&mut self, import: &Import) {
        match &import.alias {
            Some(alias) => {
                self.symbols.add(Symbol::module(alias.as_str()));
            }
            None if import.symbols.is_empty() => {
                self.symbols.add(Symbol::module(import.module_name.as_str()));
            }
            None => {
                for name in &import.symbols {
                    self.symbols.add(Symbol::ident(name.as_str()));
                }
            }
        }
    }

    // ===== Expressions =====

    /// Precedence climbing. Operators binding tighter than `min_precedence`
    /// are folded into the left operand, so equal precedence associates left.
    fn binary_expr(&mut self, min_precedence: u32) -> CyntaxResult<Node> {
        let mut left = self.primary_expr()?;
        if self.at_terminator() {
            return Ok(left);
        }

        let mut operator = self.binary_operator()?;
        while operator.precedence > min_precedence {
            let location = self.location();
            self.advance()?;
            self.skip_trivia()?;

            let right = self.binary_expr(operator.precedence)?;
            left = Node::binary(operator, left, right, location);

            if self.at_terminator() {
                return Ok(left);
            }
            operator = self.binary_operator()?;
        }

        Ok(left)
    }

    fn binary_operator(&self) -> CyntaxResult<BinaryOperator> {
        BinaryOperator::for_token(self.lookahead.kind)
            .ok_or_else(|| self.unexpected("unexpected token, expecting binary operator"))
    }

    /// One atom: a defined identifier or a literal
    fn primary_expr(&mut self) -> CyntaxResult<Node> {
        let token = self.lookahead;
        let location = self.location();

        let node = match token.kind {
            TokenKind::Identifier => {
                if !self.symbols.is_defined(token.value) {
                    return Err(CyntaxError::syntax(
                        SyntaxErrorKind::UndefinedIdentifier,
                        format!("variable '{}' not defined", token.value),
                        location,
                    ));
                }
                Node::identifier(token.value, location)
            }
            TokenKind::HexLiteral
            | TokenKind::BinLiteral
            | TokenKind::OctLiteral
            | TokenKind::DecLiteral => {
                let value = integer_value(&token).ok_or_else(|| {
                    CyntaxError::syntax(
                        SyntaxErrorKind::LiteralOverflow,
                        format!("integer literal '{}' does not fit in 64 bits", token.value),
                        location.clone(),
                    )
                })?;
                Node::literal(Literal::Integer(value), location)
            }
            TokenKind::FloatLiteral => {
                let value = float_value(token.value).ok_or_else(|| {
                    CyntaxError::syntax(
                        SyntaxErrorKind::UnexpectedToken,
                        format!("malformed floating point literal '{}'", token.value),
                        location.clone(),
                    )
                })?;
                Node::literal(Literal::Double(value), location)
            }
            TokenKind::CharLiteral => {
                let value = decode_escapes(token.value).chars().next().ok_or_else(|| {
                    CyntaxError::syntax(
                        SyntaxErrorKind::UnexpectedToken,
                        "empty character literal",
                        location.clone(),
                    )
                })?;
                Node::literal(Literal::Char(value), location)
            }
            TokenKind::BoolLiteral => Node::literal(Literal::Bool(token.value == "true"), location),
            TokenKind::String => Node::literal(Literal::String(decode_escapes(token.value)), location),
            TokenKind::Keyword(Keyword::Null) => Node::literal(Literal::Null, location),
            _ => return Err(self.unexpected("unexpected token, expecting primary-expression")),
        };

        self.advance()?;
        self.skip_trivia()?;
        Ok(node)
    }

    // ===== Helper Methods =====

    fn advance(&mut self) -> CyntaxResult<()> {
        self.lookahead = self.tokenizer.next_token()?;
        Ok(())
    }

    fn skip_trivia(&mut self) -> CyntaxResult<()> {
        while self.lookahead.is_trivia() {
            self.advance()?;
        }
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.lookahead.kind == kind
    }

    fn at_terminator(&self) -> bool {
        matches!(self.lookahead.kind, TokenKind::Semicolon | TokenKind::Eof)
    }

    fn location(&self) -> SourceLocation {
        self.tokenizer.location_of(&self.lookahead)
    }

    fn consume(&mut self, kind: TokenKind, error: SyntaxErrorKind, message: &str) -> CyntaxResult<()> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(CyntaxError::syntax(error, message, self.location()))
        }
    }

    fn consume_identifier(&mut self, message: &str) -> CyntaxResult<String> {
        if self.check(TokenKind::Identifier) {
            let name = self.lookahead.value.to_string();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.unexpected(message))
        }
    }

    fn unexpected(&self, message: &str) -> CyntaxError {
        CyntaxError::syntax(SyntaxErrorKind::UnexpectedToken, message, self.location())
    }
}

/// Value of an integer token in the base its sub-kind names; `None` on overflow
fn integer_value(token: &Token<'_>) -> Option<u64> {
    let radix = token.kind.radix()?;
    let digits = match token.kind {
        TokenKind::HexLiteral | TokenKind::BinLiteral => &token.value[2..],
        _ => token.value,
    };
    u64::from_str_radix(digits, radix).ok()
}

fn float_value(text: &str) -> Option<f64> {
    if text.starts_with("0x") || text.starts_with("0X") {
        hex_float_value(&text[2..])
    } else {
        text.parse().ok()
    }
}

/// `h.hhh[p±d]` without the `0x` prefix
fn hex_float_value(body: &str) -> Option<f64> {
    let (mantissa, exponent) = match body.find(|c: char| c == 'p' || c == 'P') {
        Some(at) => (&body[..at], body[at + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut value = 0.0_f64;
    for c in whole.chars() {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let mut scale = 1.0 / 16.0;
    for c in fraction.chars() {
        value += f64::from(c.to_digit(16)?) * scale;
        scale /= 16.0;
    }
    Some(value * 2.0_f64.powi(exponent))
}

/// Decode the escapes the tokenizer has already validated
fn decode_escapes(raw: &str) -> String {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('$') => decoded.push('$'),
            Some(e) => decoded.push(unescape(e).unwrap_or(e)),
            None => decoded.push('\\'),
        }
    }
    decoded
}
