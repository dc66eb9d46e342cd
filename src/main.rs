use clap::{Arg, Command};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let matches = Command::new("kex")
        .about("Interpreter for the Kex expression language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream of FILE instead of running it")
                .requires("file")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(file_path) = matches.get_one::<String>("file") {
        let status = run_file(file_path, matches.get_flag("tokens"));
        if matches.get_flag("interactive") {
            kex::start_repl();
        }
        status
    } else {
        kex::start_repl();
        ExitCode::SUCCESS
    }
}

fn run_file(path: &str, tokens_only: bool) -> ExitCode {
    let path = Path::new(path);
    let filename = path.display().to_string();

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            return ExitCode::FAILURE;
        }
    };

    let result = if tokens_only {
        kex::runner::dump_tokens(&source, Some(&filename))
    } else {
        kex::run(&source, Some(&filename))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
