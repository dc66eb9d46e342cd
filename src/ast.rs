use crate::error::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression {
        expr: Expr,
        span: Span,
    },
    Assignment {
        name: String,
        value: Expr,
        span: Span,
    },
    /// `if` / `elif` chain; `branches` always holds the `if` clause first.
    Conditional {
        branches: Vec<Branch>,
        else_body: Option<Vec<Stmt>>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Expression { span, .. } => span,
            Stmt::Assignment { span, .. } => span,
            Stmt::Conditional { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `lexeme` is the numeral exactly as written, e.g. `1.50` or `007`.
    Number {
        value: Number,
        lexeme: String,
        span: Span,
    },
    String {
        value: String,
        span: Span,
    },
    Boolean {
        value: bool,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    List {
        elements: Vec<Expr>,
        span: Span,
    },
    /// Pairs stay unevaluated and in source order; keys are resolved at run time.
    Dict {
        pairs: Vec<(Expr, Expr)>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Number { span, .. } => span,
            Expr::String { span, .. } => span,
            Expr::Boolean { span, .. } => span,
            Expr::Identifier { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::List { span, .. } => span,
            Expr::Dict { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

/// A `BinaryOp` split by the family it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Arithmetic(Arithmetic),
    Comparison(Comparison),
}

impl BinaryOp {
    pub fn kind(self) -> OperatorKind {
        match self {
            BinaryOp::Add => OperatorKind::Arithmetic(Arithmetic::Add),
            BinaryOp::Subtract => OperatorKind::Arithmetic(Arithmetic::Subtract),
            BinaryOp::Multiply => OperatorKind::Arithmetic(Arithmetic::Multiply),
            BinaryOp::Divide => OperatorKind::Arithmetic(Arithmetic::Divide),
            BinaryOp::Equal => OperatorKind::Comparison(Comparison::Equal),
            BinaryOp::NotEqual => OperatorKind::Comparison(Comparison::NotEqual),
            BinaryOp::Less => OperatorKind::Comparison(Comparison::Less),
            BinaryOp::LessEqual => OperatorKind::Comparison(Comparison::LessEqual),
            BinaryOp::Greater => OperatorKind::Comparison(Comparison::Greater),
            BinaryOp::GreaterEqual => OperatorKind::Comparison(Comparison::GreaterEqual),
        }
    }
}

impl From<Arithmetic> for BinaryOp {
    fn from(op: Arithmetic) -> Self {
        match op {
            Arithmetic::Add => BinaryOp::Add,
            Arithmetic::Subtract => BinaryOp::Subtract,
            Arithmetic::Multiply => BinaryOp::Multiply,
            Arithmetic::Divide => BinaryOp::Divide,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
        };
        write!(f, "{}", symbol)
    }
}
