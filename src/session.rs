use crate::error::KexError;
use crate::evaluator::{Environment, Evaluator};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::value::Value;

/// One interpretation session: a reusable parser plus the environment that
/// survives from one source text to the next.
pub struct Session {
    parser: Parser,
    environment: Environment,
}

impl Session {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(Lexer::new("")),
            environment: Environment::new(),
        }
    }

    /// Scans, parses and evaluates `source`, returning the value of its last
    /// statement. On error, bindings made before the failing statement stay.
    pub fn run(&mut self, source: &str) -> Result<Option<Value>, KexError> {
        self.parser.reset(source);
        let program = self.parser.parse()?;
        let result = Evaluator::new(&mut self.environment).evaluate_program(&program);
        if let Err(ref error) = result {
            log::debug!("statement failed: {}", error);
        }
        result
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
