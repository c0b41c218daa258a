//! agecalc
//!
//! Command-line shell around the date parser and age calculator.

#![allow(clippy::print_stdout)]

use std::io::{self, BufRead, Write};

use agecalc::report::{MessageFormatter, Style, render_report};
use agecalc::{AgeError, AgeResult, CalendarDate, DateParser, ParserConfig, calculate_age};
use anyhow::{Context, bail};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];
const NOT_RECOGNIZED: &str = "Sorry, that date format was not recognized. Please try again.";

/// Age calculator
#[derive(Parser)]
#[command(name = "agecalc")]
#[command(author, version, long_about = None)]
#[command(about = "Exact age from a birthday in almost any format")]
struct Cli {
    /// Birthday to evaluate; starts an interactive prompt when omitted
    date: Option<String>,

    /// Reference date (YYYY-MM-DD) used instead of the local current date
    #[arg(long)]
    today: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Plain messages without emoji
    #[arg(long, env = "AGECALC_NO_EMOJI")]
    no_emoji: bool,

    /// Longest accepted input, in characters
    #[arg(long, env = "AGECALC_MAX_INPUT_LEN", default_value_t = 1000)]
    max_input_len: usize,

    /// Earliest accepted birth year
    #[arg(long, env = "AGECALC_MIN_YEAR", default_value_t = 1900)]
    min_year: i32,

    /// Latest accepted birth year
    #[arg(long, env = "AGECALC_MAX_YEAR", default_value_t = 2100)]
    max_year: i32,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    birth_date: CalendarDate,
    reference_date: CalendarDate,
    #[serde(flatten)]
    age: &'a AgeResult,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

struct Shell {
    parser: DateParser,
    reference: CalendarDate,
    messages: MessageFormatter,
    json: bool,
}

impl Shell {
    /// Parses and evaluates one birthday, returning the text to print.
    fn evaluate(&self, input: &str) -> anyhow::Result<String> {
        let Some(birth) = self.parser.parse(input).date() else {
            bail!(NOT_RECOGNIZED);
        };
        let age = calculate_age(birth, self.reference)?;

        if self.json {
            let report = JsonReport {
                birth_date: birth,
                reference_date: self.reference,
                age: &age,
            };
            return Ok(serde_json::to_string_pretty(&report)?);
        }
        Ok(render_report(birth, &age, self.messages.style()))
    }

    /// Line printed for a failed evaluation in the interactive loop.
    fn failure_line(&self, err: &anyhow::Error) -> String {
        match err.downcast_ref::<AgeError>() {
            Some(age_err) => self.messages.failure(&age_err.to_string()),
            None => self.messages.error(&err.to_string()),
        }
    }

    fn welcome(&self) -> String {
        format!(
            "\n{}\n==============================\n\
             Enter your birthday in any common format, for example:\n\
             • Standard: 12/25/1990, 25-12-1990, 1990.12.25\n\
             • Natural: December 25, 1990, 25th Dec 1990\n\
             • Compact: 19901225, 122590, 16052005\n\
             • Relative: today, yesterday\n\
             (Enter 'quit' or 'exit' to close)\n",
            self.messages.title()
        )
    }

    fn run_interactive(&self) -> anyhow::Result<()> {
        println!("{}", self.welcome());

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("Enter your birthday: ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!("\n\n{}", self.messages.goodbye());
                return Ok(());
            };
            let input = line.context("Failed to read from stdin")?;
            let input = input.trim();

            if EXIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
                println!("{}", self.messages.goodbye());
                return Ok(());
            }
            if input.is_empty() {
                println!("{}", self.messages.warning("Please enter a birthday."));
                continue;
            }

            match self.evaluate(input) {
                Ok(output) => println!("{output}"),
                Err(e) => println!("{}\n", self.failure_line(&e)),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let reference = match cli.today.as_deref() {
        Some(text) => text
            .parse::<CalendarDate>()
            .with_context(|| format!("Invalid --today date '{text}', expected YYYY-MM-DD"))?,
        None => CalendarDate::from_naive(Local::now().date_naive()),
    };

    let config = ParserConfig {
        max_input_len: cli.max_input_len,
        min_year: cli.min_year,
        max_year: cli.max_year,
    };
    info!(?config, %reference, "Starting age calculator");

    let style = if cli.no_emoji { Style::Plain } else { Style::Emoji };
    let shell = Shell {
        parser: DateParser::new(config).with_today(reference),
        reference,
        messages: MessageFormatter::new(style),
        json: cli.json,
    };

    match cli.date {
        Some(date) => {
            let output = shell.evaluate(&date)?;
            println!("{output}");
            Ok(())
        }
        None => shell.run_interactive(),
    }
}
