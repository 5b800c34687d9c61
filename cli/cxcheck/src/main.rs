use anyhow::Result;
use clap::{Parser, ValueEnum};
use cxcheck_core::{Outcome, Validator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "cxcheck", version, about = "Validate code-complexity report JSON files")]
struct Cli {
    /// Report file to validate
    report: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Extra JSON Schema applied after the built-in checks
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Do not print the success line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    // clap exits with 2 on usage errors; invocation errors here exit with 1.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    debug!(report = %cli.report.display(), format = ?cli.format, "validating");
    let mut validator = Validator::new();
    if let Some(schema) = &cli.schema {
        validator = validator.with_schema(schema)?;
    }

    let outcome = validator.outcome(&cli.report);
    print_outcome(&outcome, cli)?;
    Ok(outcome.valid)
}

fn print_outcome(outcome: &Outcome, cli: &Cli) -> Result<()> {
    match cli.format {
        Format::Json => println!("{}", serde_json::to_string(outcome)?),
        Format::Text if outcome.valid => {
            if !cli.quiet {
                println!("{}", outcome.message);
            }
        }
        Format::Text => println!("ERROR: {}", outcome.message),
    }
    Ok(())
}
