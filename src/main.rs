use std::process::ExitCode;

use startribe::cli::{execute, Command, USAGE};
use startribe::error::CliError;
use startribe::utils::version_line;
use startribe::Config;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let command = Command::parse(args)?;
    match command {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("{}", version_line());
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load()?;
    let book = config.trophy_book()?;
    info!(
        milestones = book.milestones().len(),
        max_points = book.max_points(),
        "Trophy tables ready"
    );

    let output = execute(&command, &book, &config.ledger_path())?;
    println!("{:#}", output);
    Ok(())
}
