use crate::ast::BinaryOp;
use crate::lexer::TokenKind;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Character-offset range into the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    RuntimeError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Invalid character '{character}' at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: usize,
        column: usize,
        span: Span,
    },
    #[error("Unterminated string starting at line {line}, column {column}")]
    UnterminatedString {
        line: usize,
        column: usize,
        span: Span,
    },
    #[error("Invalid number '{literal}' at line {line}, column {column}")]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::InvalidCharacter { span, .. } => span,
            LexError::UnterminatedString { span, .. } => span,
            LexError::InvalidNumber { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found {found} at line {line}, column {column}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        line: usize,
        column: usize,
        span: Span,
    },
    #[error("Invalid assignment target at line {line}, column {column}")]
    InvalidAssignmentTarget {
        line: usize,
        column: usize,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => span,
            ParseError::InvalidAssignmentTarget { span, .. } => span,
        }
    }
}

/// Every failure the pipeline can produce. All of them abort the statement
/// in progress and surface to the caller of `Session::run`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KexError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Undefined variable '{name}'")]
    Name { name: String, span: Span },
    #[error("Unsupported operand types for '{operator}': {left_type} and {right_type}")]
    Type {
        operator: BinaryOp,
        left_type: &'static str,
        right_type: &'static str,
        span: Span,
    },
    #[error("Division by zero")]
    DivisionByZero { span: Span },
    #[error("Integer overflow in '{operator}'")]
    IntegerOverflow { operator: BinaryOp, span: Span },
    #[error("Dictionary keys must be strings, numbers or booleans, got {type_name}")]
    InvalidKey { type_name: &'static str, span: Span },
}

impl KexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KexError::Lex(_) => ErrorKind::LexError,
            KexError::Parse(_) => ErrorKind::ParseError,
            KexError::Name { .. }
            | KexError::Type { .. }
            | KexError::DivisionByZero { .. }
            | KexError::IntegerOverflow { .. }
            | KexError::InvalidKey { .. } => ErrorKind::RuntimeError,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            KexError::Lex(error) => error.span(),
            KexError::Parse(error) => error.span(),
            KexError::Name { span, .. } => span,
            KexError::Type { span, .. } => span,
            KexError::DivisionByZero { span } => span,
            KexError::IntegerOverflow { span, .. } => span,
            KexError::InvalidKey { span, .. } => span,
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            KexError::Lex(LexError::UnterminatedString { .. }) => {
                Some("Strings must be closed with '\"'. Escape sequences are not supported.")
            }
            KexError::Lex(LexError::InvalidCharacter { character: '!', .. }) => {
                Some("'!' is only valid as part of '!='.")
            }
            KexError::Parse(ParseError::InvalidAssignmentTarget { .. }) => {
                Some("Only a bare variable name can be assigned to. Example: x = 10")
            }
            KexError::Name { .. } => Some("Assign a value first. Example: x = 10"),
            KexError::Type { .. } => Some(
                "Arithmetic needs two numbers, '+' also joins two strings, and comparisons need operands of the same kind.",
            ),
            KexError::InvalidKey { .. } => {
                Some("Lists and dictionaries cannot be used as dictionary keys.")
            }
            _ => None,
        }
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let span = self.span();

        let color = match self.kind() {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        };

        let kind_str = match self.kind() {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
        };

        let message = self.to_string();
        let mut report_builder = Report::build(ReportKind::Error, filename, span.start)
            .with_message(format!("{}: {}", kind_str.fg(color), message))
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(help_text) = self.help() {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(error) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            log::warn!("failed to render diagnostic: {}", error);
            eprintln!("Error: {}", message);
        }
    }
}
