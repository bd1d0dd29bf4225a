use clap::{ArgAction, Parser, Subcommand};
use chrono::NaiveDate;
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::process;

mod logging;
mod shell;

use crate::logging::{init_logging, LogConfig, LogFormat};

const EXIT_VALID: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_ERROR: i32 = 2;

/// pnr — Swedish personal identity number (personnummer) checker
///
/// Validate and normalize personnummer. Without a subcommand, starts an
/// interactive session.
#[derive(Parser)]
#[command(name = "pnr", version, about, long_about = None)]
struct Cli {
    /// Evaluation date for century resolution (YYYY-MM-DD, default: today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Suppress normal output; only the exit code reports the outcome
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more personnummer
    Validate {
        /// Personnummer in any accepted format
        #[arg(required = true, allow_hyphen_values = true)]
        numbers: Vec<String>,
        /// Output one JSON object per number
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical YYYYMMDD-XXXX form
    Normalize {
        /// Personnummer in any accepted format
        #[arg(allow_hyphen_values = true)]
        number: String,
    },

    /// Compute the check digit for a YYMMDDNNN prefix
    CheckDigit {
        /// Nine digits (separators are ignored)
        prefix: String,
    },

    /// Interactive session (default)
    Shell,

    /// Show version information
    Version,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_ansi(io::stderr().is_terminal())
        .with_format(cli.log_format);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {}", e);
        process::exit(EXIT_ERROR);
    }

    let today = cli.today.unwrap_or_else(pnr_core::today);

    let exit_code = match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match shell::run(stdin.lock(), &mut stdout, cli.today) {
                Ok(()) => EXIT_VALID,
                Err(e) => {
                    eprintln!("error: {}", e);
                    EXIT_ERROR
                }
            }
        }
        Some(Commands::Validate { numbers, json }) => {
            tracing::info!(count = numbers.len(), %today, "validating");
            let mut exit_code = EXIT_VALID;
            for number in &numbers {
                let result = pnr_core::validate_at(number, today);
                if !result.is_valid() {
                    exit_code = EXIT_INVALID;
                }
                if cli.quiet {
                    continue;
                }
                if json {
                    println!("{}", result.to_json());
                } else {
                    print_result(number, &result);
                }
            }
            exit_code
        }
        Some(Commands::Normalize { number }) => match pnr_core::normalizer::normalize_at(&number, today) {
            Ok(normalized) => {
                if !cli.quiet {
                    println!("{}", normalized);
                }
                EXIT_VALID
            }
            Err(e) => {
                eprintln!("error: {}", e);
                EXIT_INVALID
            }
        },
        Some(Commands::CheckDigit { prefix }) => {
            let digits = pnr_core::checksum::digits(&prefix);
            if digits.len() != 9 {
                eprintln!("error: expected 9 digits (YYMMDDNNN), found {}", digits.len());
                EXIT_ERROR
            } else {
                if !cli.quiet {
                    println!("{}", pnr_core::checksum::check_digit(&digits));
                }
                EXIT_VALID
            }
        }
        Some(Commands::Version) => {
            println!(
                "pnr {} (pnr-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            EXIT_VALID
        }
    };

    process::exit(exit_code);
}

fn print_result(input: &str, result: &pnr_core::ValidationResult) {
    match result.personnummer() {
        Some(pnr) => {
            println!("{} {}", "✓".green(), pnr.normalized.as_str().bold());
            println!("  birth date: {}", pnr.birth_date.format("%Y-%m-%d"));
            println!("  gender (heuristic): {}", pnr.gender_hint);
        }
        None => {
            eprintln!("{} {}: {}", "✗".red(), input, result.error_message());
        }
    }
}
