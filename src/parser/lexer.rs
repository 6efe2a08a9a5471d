//! Indentation-aware lexer for the Python subset
//!
//! Produces `Indent`/`Dedent` tokens from leading spaces, skips blank lines,
//! and ignores line breaks inside parentheses, brackets and braces.

use num_bigint::BigInt;
use std::{iter::Peekable, str::CharIndices};

use crate::parser::error::{SyntaxError, SyntaxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
    Identifier(&'a str),
    Integer(BigInt),
    Float(f64),
    String(String),

    // Keywords
    Def,
    If,
    Elif,
    Else,
    Return,
    And,
    Or,
    Not,
    While,
    For,
    In,
    Pass,
    Break,
    Continue,

    // Operators
    Plus,         // +
    Minus,        // -
    Star,         // *
    DoubleStar,   // **
    Slash,        // /
    DoubleSlash,  // //
    Percent,      // %
    Tilde,        // ~
    Equal,        // =
    PlusEqual,    // +=
    MinusEqual,   // -=
    StarEqual,    // *=
    SlashEqual,   // /=
    PercentEqual, // %=
    EqEq,         // ==
    NotEq,        // !=
    Less,         // <
    LessEqual,    // <=
    Greater,      // >
    GreaterEqual, // >=

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,

    // Structural
    Newline,
    Indent,
    Dedent,
    EOF,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    indent_stack: Vec<usize>,
    pending_tokens: Vec<Token<'a>>,
    at_line_start: bool,
    paren_depth: usize,
    eof_reached: bool,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            indent_stack: vec![0],
            pending_tokens: Vec::new(),
            at_line_start: true,
            paren_depth: 0,
            eof_reached: false,
            line: 1,
            column: 1,
        }
    }

    pub fn next_token(&mut self) -> SyntaxResult<Token<'a>> {
        if let Some(token) = self.pending_tokens.pop() {
            return Ok(token);
        }

        if self.eof_reached {
            return Ok(Token::new(TokenKind::EOF, self.here()));
        }

        if self.at_line_start && self.paren_depth == 0 {
            self.at_line_start = false;
            if let Some(token) = self.handle_indentation()? {
                return Ok(token);
            }
        }

        self.skip_whitespace();

        let (start_idx, ch) = match self.chars.peek() {
            Some(&(idx, c)) => (idx, c),
            None => return Ok(self.finish()),
        };

        let line = self.line;
        let column = self.column;
        let span = |end: usize| Span {
            start: start_idx,
            end,
            line,
            column,
        };

        match ch {
            '\n' => {
                self.advance_char();
                self.at_line_start = true;
                Ok(Token::new(TokenKind::Newline, span(start_idx + 1)))
            }
            '(' => {
                self.advance_char();
                self.paren_depth += 1;
                Ok(Token::new(TokenKind::LParen, span(start_idx + 1)))
            }
            ')' => {
                self.advance_char();
                self.paren_depth = self.paren_depth.saturating_sub(1);
                Ok(Token::new(TokenKind::RParen, span(start_idx + 1)))
            }
            '[' | '{' => {
                self.advance_char();
                self.paren_depth += 1;
                let kind = if ch == '[' { TokenKind::LBracket } else { TokenKind::LBrace };
                Ok(Token::new(kind, span(start_idx + 1)))
            }
            ']' | '}' => {
                self.advance_char();
                self.paren_depth = self.paren_depth.saturating_sub(1);
                let kind = if ch == ']' { TokenKind::RBracket } else { TokenKind::RBrace };
                Ok(Token::new(kind, span(start_idx + 1)))
            }
            ',' => self.single(TokenKind::Comma, span(start_idx + 1)),
            ':' => self.single(TokenKind::Colon, span(start_idx + 1)),
            '~' => self.single(TokenKind::Tilde, span(start_idx + 1)),
            '+' => self.operator(TokenKind::Plus, Some(TokenKind::PlusEqual), None, start_idx, line, column),
            '-' => self.operator(TokenKind::Minus, Some(TokenKind::MinusEqual), None, start_idx, line, column),
            '*' => self.operator(
                TokenKind::Star,
                Some(TokenKind::StarEqual),
                Some(('*', TokenKind::DoubleStar)),
                start_idx,
                line,
                column,
            ),
            '/' => self.operator(
                TokenKind::Slash,
                Some(TokenKind::SlashEqual),
                Some(('/', TokenKind::DoubleSlash)),
                start_idx,
                line,
                column,
            ),
            '%' => self.operator(TokenKind::Percent, Some(TokenKind::PercentEqual), None, start_idx, line, column),
            '=' => self.operator(TokenKind::Equal, Some(TokenKind::EqEq), None, start_idx, line, column),
            '<' => self.operator(TokenKind::Less, Some(TokenKind::LessEqual), None, start_idx, line, column),
            '>' => self.operator(TokenKind::Greater, Some(TokenKind::GreaterEqual), None, start_idx, line, column),
            '!' => {
                self.advance_char();
                if self.eat('=') {
                    Ok(Token::new(TokenKind::NotEq, span(start_idx + 2)))
                } else {
                    Err(self.error("Unexpected character '!'", line, column))
                }
            }
            '"' | '\'' => self.read_string(ch, start_idx, line, column),
            c if c.is_alphabetic() || c == '_' => Ok(self.read_identifier(start_idx, line, column)),
            c if c.is_ascii_digit() => self.read_number(start_idx, line, column),
            '.' if self.next_is_digit() => self.read_number(start_idx, line, column),
            '.' => self.single(TokenKind::Dot, span(start_idx + 1)),
            _ => Err(self.error(format!("Unexpected character '{}'", ch), line, column)),
        }
    }

    /// Consume leading spaces of a logical line and emit `Indent`/`Dedent`.
    ///
    /// Blank lines are skipped entirely and never change the indentation level.
    fn handle_indentation(&mut self) -> SyntaxResult<Option<Token<'a>>> {
        let indent_level = loop {
            let mut count = 0;
            while let Some(&(_, c)) = self.chars.peek() {
                match c {
                    ' ' => {
                        self.advance_char();
                        count += 1;
                    }
                    '\r' => {
                        self.advance_char();
                    }
                    '\t' => {
                        return Err(self.error(
                            "Tabs are not supported for indentation",
                            self.line,
                            self.column,
                        ));
                    }
                    _ => break,
                }
            }
            match self.chars.peek() {
                Some(&(_, '\n')) => {
                    self.advance_char();
                }
                // Trailing blank lines: dedents are produced at end of input
                None => return Ok(None),
                Some(_) => break count,
            }
        };

        let current_indent = self.indent_stack.last().copied().unwrap_or(0);
        let span = self.here();

        if indent_level > current_indent {
            self.indent_stack.push(indent_level);
            return Ok(Some(Token::new(TokenKind::Indent, span)));
        }

        while let Some(&top) = self.indent_stack.last() {
            if top > indent_level {
                self.indent_stack.pop();
                self.pending_tokens.push(Token::new(TokenKind::Dedent, span));
            } else {
                break;
            }
        }
        if self.indent_stack.last().copied().unwrap_or(0) != indent_level {
            return Err(self.error(
                "unindent does not match any outer indentation level",
                span.line,
                span.column,
            ));
        }
        Ok(self.pending_tokens.pop())
    }

    /// End of input: close every open indentation level, then `EOF`.
    fn finish(&mut self) -> Token<'a> {
        self.eof_reached = true;
        let span = self.here();
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending_tokens.push(Token::new(TokenKind::Dedent, span));
        }
        self.pending_tokens
            .pop()
            .unwrap_or_else(|| Token::new(TokenKind::EOF, span))
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            let inside_parens = self.paren_depth > 0 && c == '\n';
            if c == ' ' || c == '\t' || c == '\r' || inside_parens {
                self.advance_char();
            } else if c == '\\' && self.continues_line() {
                self.advance_char();
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn single(&mut self, kind: TokenKind<'a>, span: Span) -> SyntaxResult<Token<'a>> {
        self.advance_char();
        Ok(Token::new(kind, span))
    }

    /// One-character operator, optionally followed by `=` or by a repeat of itself
    fn operator(
        &mut self,
        kind: TokenKind<'a>,
        with_equal: Option<TokenKind<'a>>,
        doubled: Option<(char, TokenKind<'a>)>,
        start: usize,
        line: usize,
        column: usize,
    ) -> SyntaxResult<Token<'a>> {
        self.advance_char();
        let span = |len: usize| Span {
            start,
            end: start + len,
            line,
            column,
        };
        if let Some((repeat, doubled_kind)) = doubled {
            if self.eat(repeat) {
                return Ok(Token::new(doubled_kind, span(2)));
            }
        }
        if let Some(with_equal) = with_equal {
            if self.eat('=') {
                return Ok(Token::new(with_equal, span(2)));
            }
        }
        Ok(Token::new(kind, span(1)))
    }

    fn read_identifier(&mut self, start: usize, line: usize, column: usize) -> Token<'a> {
        self.advance_char(); // Consume first char
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance_char();
            } else {
                break;
            }
        }

        let end_idx = self.current_index();
        let ident = &self.input[start..end_idx];
        let kind = match ident {
            "def" => TokenKind::Def,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "pass" => TokenKind::Pass,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            _ => TokenKind::Identifier(ident),
        };
        Token::new(
            kind,
            Span {
                start,
                end: end_idx,
                line,
                column,
            },
        )
    }

    /// Integer or float literal; `_` digit separators are accepted
    fn read_number(&mut self, start: usize, line: usize, column: usize) -> SyntaxResult<Token<'a>> {
        let mut is_float = false;
        self.eat_digits();
        if self.chars.peek().map(|&(_, c)| c) == Some('.') {
            is_float = true;
            self.advance_char();
            self.eat_digits();
        }
        if matches!(self.chars.peek(), Some(&(_, 'e' | 'E'))) {
            is_float = true;
            self.advance_char();
            if matches!(self.chars.peek(), Some(&(_, '+' | '-'))) {
                self.advance_char();
            }
            if !self.next_is_digit_here() {
                return Err(self.error("invalid decimal literal", line, column));
            }
            self.eat_digits();
        }

        let end_idx = self.current_index();
        let literal = &self.input[start..end_idx];
        let digits = literal.replace('_', "");
        let span = Span {
            start,
            end: end_idx,
            line,
            column,
        };

        if is_float {
            match digits.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::new(TokenKind::Float(value), span)),
                Ok(_) => Err(self.error(
                    format!("float literal '{}' is out of range", literal),
                    line,
                    column,
                )),
                Err(_) => Err(self.error(
                    format!("Invalid float literal '{}'", literal),
                    line,
                    column,
                )),
            }
        } else {
            let value = digits.parse::<BigInt>().map_err(|_| {
                self.error(format!("Invalid integer literal '{}'", literal), line, column)
            })?;
            Ok(Token::new(TokenKind::Integer(value), span))
        }
    }

    fn read_string(
        &mut self,
        quote: char,
        start: usize,
        line: usize,
        column: usize,
    ) -> SyntaxResult<Token<'a>> {
        self.advance_char(); // Consume opening quote
        let mut value = String::new();
        while let Some((idx, c)) = self.advance_char() {
            match c {
                c if c == quote => {
                    return Ok(Token::new(
                        TokenKind::String(value),
                        Span {
                            start,
                            end: idx + c.len_utf8(),
                            line,
                            column,
                        },
                    ));
                }
                '\n' => break,
                '\\' => match self.advance_char() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, '0')) => value.push('\0'),
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                c => value.push(c),
            }
        }
        Err(self.error("unterminated string literal", line, column))
    }
}

impl<'a> Lexer<'a> {
    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek().map(|&(_, c)| c) == Some(expected) {
            self.advance_char();
            true
        } else {
            false
        }
    }

    fn eat_digits(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn next_is_digit_here(&mut self) -> bool {
        matches!(self.chars.peek(), Some(&(_, c)) if c.is_ascii_digit())
    }

    /// Whether the character after the current one is a digit
    fn next_is_digit(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        matches!(lookahead.peek(), Some(&(_, c)) if c.is_ascii_digit())
    }

    /// Backslash immediately followed by a line break
    fn continues_line(&self) -> bool {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        matches!(lookahead.peek(), Some(&(_, '\n')))
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    fn here(&mut self) -> Span {
        let index = self.current_index();
        Span {
            start: index,
            end: index,
            line: self.line,
            column: self.column,
        }
    }

    fn error(&self, message: impl Into<String>, line: usize, column: usize) -> SyntaxError {
        SyntaxError::new(message, self.input, line, column)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = SyntaxResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

pub fn tokenize(input: &str) -> SyntaxResult<Vec<Token<'_>>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = matches!(token.kind, TokenKind::EOF);
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    Ok(tokens)
}
