use crate::ast::{Arithmetic, BinaryOp, Comparison, Expr, Number, OperatorKind, Program, Stmt};
use crate::error::{KexError, Span};
use crate::value::{Dict, Value};
use std::collections::HashMap;

/// Flat name-to-value store shared by every statement of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Binds `name`, replacing any earlier binding.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Tree-walking evaluator over a borrowed session environment.
pub struct Evaluator<'env> {
    environment: &'env mut Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(environment: &'env mut Environment) -> Self {
        Self { environment }
    }

    /// Runs every statement in order and yields the value of the last one.
    pub fn evaluate_program(&mut self, program: &Program) -> Result<Option<Value>, KexError> {
        log::debug!("evaluating {} statement(s)", program.statements.len());
        self.execute_block(&program.statements)
    }

    pub fn execute_statement(&mut self, stmt: &Stmt) -> Result<Option<Value>, KexError> {
        match stmt {
            Stmt::Expression { expr, .. } => self.evaluate_expression(expr).map(Some),
            Stmt::Assignment { name, value, .. } => {
                let value = self.evaluate_expression(value)?;
                log::debug!("assign {} = {}", name, value);
                self.environment.assign(name, value.clone());
                Ok(Some(value))
            }
            Stmt::Conditional {
                branches,
                else_body,
                ..
            } => {
                for branch in branches {
                    if self.evaluate_expression(&branch.condition)?.is_truthy() {
                        return self.execute_block(&branch.body);
                    }
                }
                match else_body {
                    Some(body) => self.execute_block(body),
                    None => Ok(None),
                }
            }
        }
    }

    fn execute_block(&mut self, statements: &[Stmt]) -> Result<Option<Value>, KexError> {
        let mut last = None;
        for statement in statements {
            last = self.execute_statement(statement)?;
        }
        Ok(last)
    }

    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value, KexError> {
        match expr {
            Expr::Number { value, .. } => Ok(match value {
                Number::Integer(n) => Value::Integer(*n),
                Number::Float(n) => Value::Float(*n),
            }),
            Expr::String { value, .. } => Ok(Value::String(value.clone())),
            Expr::Boolean { value, .. } => Ok(Value::Bool(*value)),
            Expr::Identifier { name, span } => {
                self.environment
                    .get(name)
                    .cloned()
                    .ok_or_else(|| KexError::Name {
                        name: name.clone(),
                        span: span.clone(),
                    })
            }
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                evaluate_binary_op(*operator, left_val, right_val, span)
            }
            Expr::List { elements, .. } => {
                let mut list_values = Vec::with_capacity(elements.len());
                for element in elements {
                    list_values.push(self.evaluate_expression(element)?);
                }
                Ok(Value::List(list_values))
            }
            Expr::Dict { pairs, .. } => {
                let mut dict = Dict::new();
                for (key_expr, value_expr) in pairs {
                    let key = match key_expr {
                        // Numeral keys keep their source spelling: `{1.50: x}` keys "1.50".
                        Expr::Number { lexeme, .. } => lexeme.clone(),
                        _ => dict_key(self.evaluate_expression(key_expr)?, key_expr.span())?,
                    };
                    let value = self.evaluate_expression(value_expr)?;
                    dict.insert(key, value);
                }
                Ok(Value::Dict(dict))
            }
        }
    }
}

/// Strings are used as-is; computed scalars key by their display text.
fn dict_key(key: Value, span: &Span) -> Result<String, KexError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Ok(key.to_string()),
        Value::List(_) | Value::Dict(_) => Err(KexError::InvalidKey {
            type_name: key.type_name(),
            span: span.clone(),
        }),
    }
}

fn evaluate_binary_op(
    operator: BinaryOp,
    left: Value,
    right: Value,
    span: &Span,
) -> Result<Value, KexError> {
    let result = match operator.kind() {
        OperatorKind::Arithmetic(op) => arithmetic(op, &left, &right, span)?,
        OperatorKind::Comparison(op) => comparison(op, &left, &right).map(Value::Bool),
    };

    result.ok_or_else(|| KexError::Type {
        operator,
        left_type: left.type_name(),
        right_type: right.type_name(),
        span: span.clone(),
    })
}

/// `Ok(None)` means the operand types do not support `op`.
fn arithmetic(
    op: Arithmetic,
    left: &Value,
    right: &Value,
    span: &Span,
) -> Result<Option<Value>, KexError> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => integer_op(op, *l, *r, span).map(Some),
        (Value::String(l), Value::String(r)) if op == Arithmetic::Add => {
            Ok(Some(Value::String(format!("{}{}", l, r))))
        }
        // At least one side is a float here; promote both.
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => float_op(op, l, r, span).map(Some),
            _ => Ok(None),
        },
    }
}

fn comparison(op: Comparison, left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => Some(compare(op, l, r)),
        (Value::String(l), Value::String(r)) => Some(compare(op, l, r)),
        (Value::Bool(l), Value::Bool(r)) => Some(compare(op, l, r)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => Some(compare(op, &l, &r)),
            _ => None,
        },
    }
}

fn integer_op(op: Arithmetic, l: i64, r: i64, span: &Span) -> Result<Value, KexError> {
    let result = match op {
        Arithmetic::Add => l.checked_add(r),
        Arithmetic::Subtract => l.checked_sub(r),
        Arithmetic::Multiply => l.checked_mul(r),
        Arithmetic::Divide => {
            if r == 0 {
                return Err(KexError::DivisionByZero { span: span.clone() });
            }
            l.checked_div(r)
        }
    };

    result.map(Value::Integer).ok_or_else(|| KexError::IntegerOverflow {
        operator: op.into(),
        span: span.clone(),
    })
}

fn float_op(op: Arithmetic, l: f64, r: f64, span: &Span) -> Result<Value, KexError> {
    match op {
        Arithmetic::Add => Ok(Value::Float(l + r)),
        Arithmetic::Subtract => Ok(Value::Float(l - r)),
        Arithmetic::Multiply => Ok(Value::Float(l * r)),
        Arithmetic::Divide => {
            if r == 0.0 {
                Err(KexError::DivisionByZero { span: span.clone() })
            } else {
                Ok(Value::Float(l / r))
            }
        }
    }
}

fn compare<T: PartialOrd + ?Sized>(op: Comparison, l: &T, r: &T) -> bool {
    match op {
        Comparison::Equal => l == r,
        Comparison::NotEqual => l != r,
        Comparison::Less => l < r,
        Comparison::LessEqual => l <= r,
        Comparison::Greater => l > r,
        Comparison::GreaterEqual => l >= r,
    }
}
