//! Regression-harness CLI: load one or more JSON problem files, solve each,
//! and compare against any embedded reference solution (§0.4, §6).

use std::process::ExitCode;

use clap::Parser;
use quadprog::regression::{self, Verdict};
use tracing::Level;

/// Solve quadratic programs from JSON files and check them against any
/// embedded reference solution.
#[derive(Debug, Parser)]
#[command(name = "quadprog", version, about)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Numeric formatting width when printing solved problems (0-2).
    #[arg(short = 'f', default_value_t = 0)]
    format: u8,

    /// Input files to solve.
    #[arg(required = true)]
    files: Vec<String>,
}

fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn format_value(value: f64, width: u8) -> String {
    match width {
        1 => format!("{value:.13e}"),
        2 => format!("{value:.18e}"),
        _ => format!("{value}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_for(cli.verbose))
        .init();

    let mut any_failure = false;

    for path in &cli.files {
        let outcome = regression::load(path).and_then(|case| {
            let problem = regression::to_problem(&case)?;
            let solved = quadprog::solve(&problem);
            Ok((case, solved))
        });

        match outcome {
            Ok((case, solved)) => {
                let verdict = regression::classify(&case, &solved);
                match verdict {
                    Verdict::Pass => println!("{path}: PASS"),
                    Verdict::PassWithMinorDifferences => {
                        println!("{path}: PASS (minor differences)")
                    }
                    Verdict::Fail => {
                        any_failure = true;
                        println!("{path}: FAIL");
                    }
                    Verdict::Skip => println!("{path}: SKIP (no reference fields)"),
                }
                if cli.verbose > 0 {
                    if let Ok(solution) = solved {
                        println!("  value = {}", format_value(solution.value, cli.format));
                    }
                }
            }
            Err(err) => {
                println!("{path}: SKIP ({err})");
            }
        }
    }

    if any_failure {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
