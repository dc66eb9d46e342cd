// Kex Language Interpreter Library
//
// Scanner, parser and tree-walking evaluator for Kex, a small dynamically
// typed expression language with lists, dictionaries and if/elif/else.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod session;
pub mod value;

// Re-export commonly used items
pub use ast::{Expr, Program, Stmt};
pub use error::{KexError, LexError, ParseError, Span};
pub use evaluator::{Environment, Evaluator};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use session::Session;
pub use value::{Dict, Value};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::run;
