use crate::session::Session;
use std::io::{self, Write};

/// Interactive loop. One session lives for the whole loop, so bindings carry
/// over between lines and survive failed ones.
pub fn start() {
    println!("Welcome to Kex! Type 'exit' to quit.");

    let mut session = Session::new();

    loop {
        print!("kex>> ");
        if let Err(error) = io::stdout().flush() {
            log::warn!("failed to flush prompt: {}", error);
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                println!();
                println!("Exiting Kex...");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") {
                    break;
                }

                run_repl_command(line, &mut session);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }

    println!("Goodbye!");
}

fn run_repl_command(source: &str, session: &mut Session) {
    match session.run(source) {
        Ok(Some(value)) => println!("{}", value),
        Ok(None) => {}
        Err(error) => println!("Error: {}", error),
    }
}
