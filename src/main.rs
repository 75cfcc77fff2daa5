use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use tracing::debug;

use curly::{
    errors::errors::Error, format_error, lexer::lexer::tokenize, parser::parser::parse,
};

#[derive(Parser)]
#[command(name = "curly")]
#[command(about = "Parse a curly source file and print its syntax tree")]
struct Cli {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,
}

/// Enable with `RUST_LOG=curly=debug` or `RUST_LOG=curly=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string();

    match run(&cli, &source, file_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprint!("{}", format_error(&error, &source));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, source: &str, file_name: String) -> Result<(), Error> {
    let start = Instant::now();
    let tokens = tokenize(source, Some(file_name.clone()))?;
    debug!(elapsed = ?start.elapsed(), "tokenized");

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
        return Ok(());
    }

    let parse_start = Instant::now();
    let ast = parse(tokens, Rc::new(file_name))?;
    debug!(elapsed = ?parse_start.elapsed(), total = ?start.elapsed(), "parsed");

    println!("{:#?}", ast);
    Ok(())
}
