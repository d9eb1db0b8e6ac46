use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};

use clap::Parser;
use frontend::{display_error, errors::errors::Error, lexer::lexer::tokenize, parse};
use log::info;

const PROMPT: &str = ">> ";

#[derive(Debug, Parser)]
#[clap(about = "Lexes and parses source files into a syntax tree")]
struct FrontendCli {
    #[clap(short = 't', long = "tokens", help = "Prints the token stream instead of the tree")]
    display_tokens: bool,

    #[clap(short = 'd', long = "debug-ast", help = "Prints the Debug form of the tree")]
    debug_ast: bool,

    #[clap(
        long = "max-errors",
        default_value = "3",
        help = "How many diagnostics to display"
    )]
    max_errors: usize,

    #[clap(parse(from_os_str), value_name = "INPUT")]
    input_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = FrontendCli::parse();

    match &cli.input_file {
        Some(path) => {
            let source = match read_to_string(path) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    process::exit(1);
                }
            };
            let file_name = path.to_string_lossy();

            if !run(&cli, &source, &file_name) {
                process::exit(1);
            }
            Ok(())
        }
        None => repl(&cli),
    }
}

/// Processes one source text. Returns false when it had syntax errors.
fn run(cli: &FrontendCli, source: &str, file_name: &str) -> bool {
    if cli.display_tokens {
        for token in tokenize(source) {
            println!("{}", token);
        }
        return true;
    }

    let (program, errors) = parse(source);
    info!(
        "parsed {} statement(s) with {} error(s)",
        program.statements.len(),
        errors.len()
    );

    if !errors.is_empty() {
        display_errors(&errors, cli.max_errors, source, file_name);
        return false;
    }

    if cli.debug_ast {
        println!("{:#?}", program);
    } else {
        println!("{}", program);
    }

    true
}

fn display_errors(errors: &[Error], max_errors: usize, source: &str, file_name: &str) {
    for error in errors.iter().take(max_errors) {
        display_error(error, source, file_name);
    }

    if errors.len() > max_errors {
        eprintln!("... and {} more error(s)", errors.len() - max_errors);
    }
}

fn repl(cli: &FrontendCli) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        if line.trim() == "exit" {
            return Ok(());
        }

        run(cli, &line, "shell");
    }
}
