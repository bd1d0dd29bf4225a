//! Interactive read-eval-print loop
//!
//! Reads one token per line, validates it and prints the outcome. `q` (any
//! case) or end of input ends the session. Blank lines are rejected here
//! without calling the validator.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use colored::Colorize;

const BANNER: &str = "\
Personnummer check
Accepted formats:
YYMMDD-XXXX, YYMMDDXXXX, YYYYMMDD-XXXX, YYYYMMDDXXXX (+ allowed)
";

const PROMPT: &str = "Enter personnummer (or 'q' to quit): ";

/// Run the loop until `q` or EOF.
///
/// `today` pins the evaluation date; `None` re-reads the local date for
/// every line so a long-running session follows the calendar.
pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W, today: Option<NaiveDate>) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            tracing::info!("shell closed on end of input");
            return Ok(());
        }

        let token = line.trim();
        if token.eq_ignore_ascii_case("q") {
            tracing::info!("shell closed by user");
            return Ok(());
        }
        if token.is_empty() {
            writeln!(out, "{}\n", "Error: empty input.".red())?;
            continue;
        }

        let result = pnr_core::validate_at(token, today.unwrap_or_else(pnr_core::today));
        match result.personnummer() {
            Some(pnr) => {
                writeln!(out, "{}", "✔ The personnummer is valid".green())?;
                writeln!(out, "Normalized: {}", pnr.normalized)?;
                writeln!(out, "Birth date: {}", pnr.birth_date.format("%Y-%m-%d"))?;
                writeln!(out, "Gender (heuristic): {}", pnr.gender_hint)?;
            }
            None => {
                writeln!(out, "{}", "✖ The personnummer is invalid".red())?;
                writeln!(out, "{}", result.error_message())?;
            }
        }
        writeln!(out)?;
    }
}
