use crate::error::KexError;
use crate::lexer::Lexer;
use crate::session::Session;

/// Runs a whole source text in a fresh session and prints its final value.
/// Errors are rendered as diagnostics against `source`.
pub fn run(source: &str, filename: Option<&str>) -> Result<(), KexError> {
    let mut session = Session::new();
    match session.run(source) {
        Ok(Some(value)) => {
            println!("{}", value);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(error) => {
            error.report(source, filename);
            Err(error)
        }
    }
}

/// Prints the token stream of `source`, one token per line.
pub fn dump_tokens(source: &str, filename: Option<&str>) -> Result<(), KexError> {
    let mut lexer = Lexer::new(source);
    match lexer.tokenize() {
        Ok(tokens) => {
            for token in tokens {
                println!(
                    "{:>4}:{:<4} {:<12} {}",
                    token.line,
                    token.column,
                    format!("{:?}", token.kind),
                    token.lexeme
                );
            }
            Ok(())
        }
        Err(error) => {
            let error = KexError::from(error);
            error.report(source, filename);
            Err(error)
        }
    }
}
