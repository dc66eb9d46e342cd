use crate::error::{LexError, Span};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,
    String,
    Boolean,
    Identifier,

    // Operators
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,

    // Keywords
    If,
    Elif,
    Else,

    // Special
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Identifier => "identifier",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'=='",
            TokenKind::Ne => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::If => "'if'",
            TokenKind::Elif => "'elif'",
            TokenKind::Else => "'else'",
            TokenKind::EndOfInput => "end of input",
        };
        write!(f, "{}", text)
    }
}

/// Decoded payload of literal and identifier tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Identifier(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Option<Literal>,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    pub span: Span,
}

/// Pull-based scanner. Each call to `next_token` produces exactly one token;
/// once the input is exhausted it keeps returning `EndOfInput`.
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Rewinds the scanner onto fresh text.
    pub fn reset(&mut self, source: &str) {
        *self = Self::new(source);
    }

    /// Scans everything that is left, including the final `EndOfInput`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();

        self.start = self.current;
        self.start_line = self.line;
        self.start_column = self.column;

        if self.is_at_end() {
            return Ok(self.make_token(TokenKind::EndOfInput, None));
        }

        let c = self.advance();
        let token = match c {
            '(' => self.make_token(TokenKind::LParen, None),
            ')' => self.make_token(TokenKind::RParen, None),
            '[' => self.make_token(TokenKind::LBracket, None),
            ']' => self.make_token(TokenKind::RBracket, None),
            '{' => self.make_token(TokenKind::LBrace, None),
            '}' => self.make_token(TokenKind::RBrace, None),
            ',' => self.make_token(TokenKind::Comma, None),
            ':' => self.make_token(TokenKind::Colon, None),
            '+' => self.make_token(TokenKind::Plus, None),
            '-' => self.make_token(TokenKind::Minus, None),
            '*' => self.make_token(TokenKind::Star, None),
            // Comments were already skipped, so this is always division.
            '/' => self.make_token(TokenKind::Slash, None),
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                };
                self.make_token(kind, None)
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::Ne, None)
                } else {
                    return Err(self.invalid_character('!'));
                }
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                };
                self.make_token(kind, None)
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                };
                self.make_token(kind, None)
            }
            '"' => self.string()?,
            '.' if self.peek().is_ascii_digit() => self.number()?,
            c if c.is_ascii_digit() => self.number()?,
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
            c => return Err(self.invalid_character(c)),
        };

        log::trace!(
            "token {:?} '{}' at {}:{}",
            token.kind,
            token.lexeme,
            token.line,
            token.column
        );
        Ok(token)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.peek();
        if !self.is_at_end() {
            self.current += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn skip_trivia(&mut self) {
        while !self.is_at_end() {
            match (self.peek(), self.peek_next()) {
                (c, _) if c.is_whitespace() => {
                    self.advance();
                }
                ('/', '/') => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                ('/', '*') => {
                    self.advance();
                    self.advance();
                    // An unclosed block comment swallows the rest of the input.
                    while !self.is_at_end() {
                        if self.peek() == '*' && self.peek_next() == '/' {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn text(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn string(&mut self) -> Result<Token, LexError> {
        while self.peek() != '"' && !self.is_at_end() {
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexError::UnterminatedString {
                line: self.start_line,
                column: self.start_column,
                span: Span::new(self.start, self.current),
            });
        }

        // Consume the closing "
        self.advance();

        let content: String = self.source[self.start + 1..self.current - 1]
            .iter()
            .collect();
        Ok(self.make_token(TokenKind::String, Some(Literal::String(content))))
    }

    fn number(&mut self) -> Result<Token, LexError> {
        let mut seen_dot = self.source[self.start] == '.';

        loop {
            let c = self.peek();
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        // A second '.' makes the whole digit/dot run malformed, e.g. `1.2.3`.
        if self.peek() == '.' {
            while self.peek().is_ascii_digit() || self.peek() == '.' {
                self.advance();
            }
            return Err(LexError::InvalidNumber {
                literal: self.text(),
                line: self.start_line,
                column: self.start_column,
                span: Span::new(self.start, self.current),
            });
        }

        let text = self.text();
        let literal = if seen_dot {
            text.parse::<f64>().ok().map(Literal::Float)
        } else {
            text.parse::<i64>().ok().map(Literal::Integer)
        };

        match literal {
            Some(literal @ Literal::Float(_)) => Ok(self.make_token(TokenKind::Float, Some(literal))),
            Some(literal) => Ok(self.make_token(TokenKind::Integer, Some(literal))),
            None => Err(LexError::InvalidNumber {
                literal: text,
                line: self.start_line,
                column: self.start_column,
                span: Span::new(self.start, self.current),
            }),
        }
    }

    fn identifier(&mut self) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text = self.text();
        match text.as_str() {
            "true" => self.make_token(TokenKind::Boolean, Some(Literal::Boolean(true))),
            "false" => self.make_token(TokenKind::Boolean, Some(Literal::Boolean(false))),
            "if" => self.make_token(TokenKind::If, None),
            "elif" => self.make_token(TokenKind::Elif, None),
            "else" => self.make_token(TokenKind::Else, None),
            _ => self.make_token(TokenKind::Identifier, Some(Literal::Identifier(text.clone()))),
        }
    }

    fn make_token(&self, kind: TokenKind, literal: Option<Literal>) -> Token {
        let span = if kind == TokenKind::EndOfInput {
            Span::single(self.current)
        } else {
            Span::new(self.start, self.current)
        };
        Token {
            kind,
            literal,
            lexeme: self.text(),
            line: self.start_line,
            column: self.start_column,
            span,
        }
    }

    fn invalid_character(&self, character: char) -> LexError {
        LexError::InvalidCharacter {
            character,
            line: self.start_line,
            column: self.start_column,
            span: Span::single(self.start),
        }
    }
}
