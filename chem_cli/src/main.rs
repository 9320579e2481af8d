//! # Beaker CLI
//!
//! Command-line front end for `chem_core`. Each subcommand runs one
//! calculation and prints a plain-text summary, or the full result as JSON
//! with `--json`. Errors exit with status 1.
//!
//! ```text
//! beaker mass "Ca(OH)2"
//! beaker stoich "2H2 + O2 -> 2H2O" --mass H2=4.032 --mass O2=32
//! beaker --json convert 2 mol L
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use chem_core::CalcError;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod cli;
mod commands;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging(&cli.global);

    let json = cli.global.json;
    let outcome = commands::build_engine(&cli.global)
        .and_then(|engine| commands::dispatch(cli.command, &engine));

    match outcome {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report.json) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        print_error(&CalcError::from(e), json);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", report.text);
                let _ = io::stdout().flush();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_error(&e, json);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(global: &cli::GlobalOptions) {
    let level = if global.quiet {
        LevelFilter::Error
    } else {
        match global.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("warning: logger already initialized");
    }
    debug!("log level {}", level);
}

fn print_error(error: &CalcError, json: bool) {
    if json {
        let body = serde_json::json!({ "code": error.error_code(), "error": error });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_else(|_| error.to_string()));
    } else {
        eprintln!("error [{}]: {}", error.error_code(), error);
    }
}
