use crate::ast::{BinaryOp, Branch, Expr, Number, Program, Stmt};
use crate::error::{KexError, ParseError, Span};
use crate::lexer::{Lexer, Literal, Token, TokenKind};

/// Recursive-descent parser with a single token of lookahead.
///
/// Tokens are pulled from the lexer one at a time; there is no backtracking
/// and no error recovery, so the first malformed token aborts the whole parse.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    previous_span: Span,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::EndOfInput,
                literal: None,
                lexeme: String::new(),
                line: 1,
                column: 1,
                span: Span::single(0),
            },
            previous_span: Span::single(0),
        }
    }

    /// Points the parser at new source text. The lookahead is refilled by the
    /// next call to `parse`.
    pub fn reset(&mut self, source: &str) {
        self.lexer.reset(source);
        self.previous_span = Span::single(0);
    }

    pub fn parse(&mut self) -> Result<Program, KexError> {
        self.current = self.lexer.next_token()?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::EndOfInput) {
            statements.push(self.statement()?);
        }

        log::debug!("parsed {} statement(s)", statements.len());
        Ok(Program { statements })
    }

    fn statement(&mut self) -> Result<Stmt, KexError> {
        if self.check(TokenKind::If) {
            return self.conditional();
        }

        let start_span = self.current.span.clone();
        let expr = self.expression()?;

        if !self.check(TokenKind::Assign) {
            let span = expr.span().clone();
            return Ok(Stmt::Expression { expr, span });
        }

        // Only a bare identifier may stand left of '='. A parenthesised one
        // starts at the '(' and therefore fails the span check.
        match expr {
            Expr::Identifier { name, span } if span == start_span => {
                self.advance()?;
                let value = self.expression()?;
                let span = span.to(value.span());
                Ok(Stmt::Assignment { name, value, span })
            }
            _ => Err(ParseError::InvalidAssignmentTarget {
                line: self.current.line,
                column: self.current.column,
                span: self.current.span.clone(),
            }
            .into()),
        }
    }

    fn conditional(&mut self) -> Result<Stmt, KexError> {
        let start_span = self.expect(TokenKind::If)?.span;

        let mut branches = vec![self.branch()?];

        while self.check(TokenKind::Elif) {
            self.advance()?;
            branches.push(self.branch()?);
        }

        let else_body = if self.check(TokenKind::Else) {
            self.advance()?;
            self.expect(TokenKind::Colon)?;
            Some(self.block()?)
        } else {
            None
        };

        Ok(Stmt::Conditional {
            branches,
            else_body,
            span: start_span.to(&self.previous_span),
        })
    }

    /// `comparison ':' block`, shared by `if` and `elif`.
    fn branch(&mut self) -> Result<Branch, KexError> {
        let condition = self.comparison()?;
        self.expect(TokenKind::Colon)?;
        let body = self.block()?;
        Ok(Branch { condition, body })
    }

    fn block(&mut self) -> Result<Vec<Stmt>, KexError> {
        self.expect(TokenKind::LBrace)?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::EndOfInput) {
            statements.push(self.statement()?);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(statements)
    }

    fn comparison(&mut self) -> Result<Expr, KexError> {
        let left = self.expression()?;

        let operator = match self.current.kind {
            TokenKind::Eq => BinaryOp::Equal,
            TokenKind::Ne => BinaryOp::NotEqual,
            TokenKind::Lt => BinaryOp::Less,
            TokenKind::Le => BinaryOp::LessEqual,
            TokenKind::Gt => BinaryOp::Greater,
            TokenKind::Ge => BinaryOp::GreaterEqual,
            _ => return Ok(left),
        };
        self.advance()?;

        let right = self.expression()?;
        Ok(binary(left, operator, right))
    }

    fn expression(&mut self) -> Result<Expr, KexError> {
        let mut expr = self.term()?;

        loop {
            let operator = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance()?;

            let right = self.term()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, KexError> {
        let mut expr = self.factor()?;

        loop {
            let operator = match self.current.kind {
                TokenKind::Star => BinaryOp::Multiply,
                TokenKind::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance()?;

            let right = self.factor()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, KexError> {
        let token = self.advance()?;
        let span = token.span;
        let lexeme = token.lexeme;

        match (token.kind, token.literal) {
            (TokenKind::Integer, Some(Literal::Integer(n))) => Ok(Expr::Number {
                value: Number::Integer(n),
                lexeme,
                span,
            }),
            (TokenKind::Float, Some(Literal::Float(n))) => Ok(Expr::Number {
                value: Number::Float(n),
                lexeme,
                span,
            }),
            (TokenKind::String, Some(Literal::String(value))) => Ok(Expr::String { value, span }),
            (TokenKind::Boolean, Some(Literal::Boolean(value))) => {
                Ok(Expr::Boolean { value, span })
            }
            (TokenKind::Identifier, Some(Literal::Identifier(name))) => {
                Ok(Expr::Identifier { name, span })
            }
            (TokenKind::LParen, _) => {
                let expr = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            (TokenKind::LBracket, _) => self.list_literal(span),
            (TokenKind::LBrace, _) => self.dict_literal(span),
            (found, _) => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found,
                line: token.line,
                column: token.column,
                span,
            }
            .into()),
        }
    }

    fn list_literal(&mut self, start_span: Span) -> Result<Expr, KexError> {
        let mut elements = Vec::new();

        if !self.check(TokenKind::RBracket) {
            loop {
                elements.push(self.expression()?);
                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance()?;
            }
        }

        let end_span = self.expect(TokenKind::RBracket)?.span;
        Ok(Expr::List {
            elements,
            span: start_span.to(&end_span),
        })
    }

    fn dict_literal(&mut self, start_span: Span) -> Result<Expr, KexError> {
        let mut pairs = Vec::new();

        if !self.check(TokenKind::RBrace) {
            loop {
                let key = self.expression()?;
                self.expect(TokenKind::Colon)?;
                let value = self.expression()?;
                pairs.push((key, value));

                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance()?;
            }
        }

        let end_span = self.expect(TokenKind::RBrace)?.span;
        Ok(Expr::Dict {
            pairs,
            span: start_span.to(&end_span),
        })
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Pulls the next token into the lookahead slot and hands back the one it
    /// replaced. `EndOfInput` is never consumed past.
    fn advance(&mut self) -> Result<Token, KexError> {
        if self.check(TokenKind::EndOfInput) {
            return Ok(self.current.clone());
        }
        let next = self.lexer.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        self.previous_span = token.span.clone();
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, KexError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(ParseError::UnexpectedToken {
                expected: kind.to_string(),
                found: self.current.kind,
                line: self.current.line,
                column: self.current.column,
                span: self.current.span.clone(),
            }
            .into())
        }
    }
}

fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
    let span = left.span().to(right.span());
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        span,
    }
}
