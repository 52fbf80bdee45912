//! CLI entry point for the gradebook reporting tool.
//!
//! Loads the roster, assignment catalog, and submission log once, then
//! answers grade, statistics, and chart queries either via subcommands or
//! an interactive menu.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gradebook::chart;
use gradebook::model::{AssignmentCatalog, Roster, SubmissionLog};
use gradebook::output;
use gradebook::parser::{read_assignments, read_roster, read_submissions};
use gradebook::stats::{assignment_scores, assignment_statistics, student_grade};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook")]
#[command(about = "Course grades and assignment statistics from flat-file records", long_about = None)]
struct Cli {
    /// Roster file: 3-character student id followed by the name, one per line
    #[arg(long, default_value = "data/students.txt")]
    students: PathBuf,

    /// Assignment definitions file: name, id, and max points on consecutive lines
    #[arg(long, default_value = "data/assignments.txt")]
    assignments: PathBuf,

    /// Directory of pipe-delimited submission files (*.txt)
    #[arg(long, default_value = "data/submissions")]
    submissions: PathBuf,

    /// Query to run; omit for the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a student's overall course grade
    Grade {
        /// Student name as it appears in the roster
        name: String,

        /// Emit the result as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Min/avg/max percentage scores for an assignment
    Stats {
        /// Assignment name as it appears in the catalog
        assignment: String,

        /// Emit the result as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render a histogram of an assignment's score distribution
    Chart {
        /// Assignment name as it appears in the catalog
        assignment: String,
    },
}

/// The immutable snapshot every query runs against.
struct Tables {
    roster: Roster,
    catalog: AssignmentCatalog,
    log: SubmissionLog,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gradebook.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let tables = load_tables(&cli)?;

    match cli.command {
        Some(Commands::Grade { name, json }) => {
            let outcome = student_grade(&tables.roster, &tables.catalog, &tables.log, &name);
            if json {
                output::print_grade_json(&name, &outcome)?;
            } else {
                output::print_grade(&outcome);
            }
        }
        Some(Commands::Stats { assignment, json }) => {
            let outcome = assignment_statistics(&tables.catalog, &tables.log, &assignment);
            if json {
                output::print_stats_json(&assignment, &outcome)?;
            } else {
                output::print_stats(&outcome);
            }
        }
        Some(Commands::Chart { assignment }) => {
            run_chart(&tables, &assignment);
        }
        None => {
            menu_loop(&tables)?;
        }
    }

    Ok(())
}

/// Loads all three tables before any query runs; nothing mutates after this.
#[tracing::instrument(skip(cli))]
fn load_tables(cli: &Cli) -> Result<Tables> {
    let roster = read_roster(&cli.students)?;
    let catalog = read_assignments(&cli.assignments)?;
    let log = read_submissions(&cli.submissions)?;

    info!(
        students = roster.len(),
        assignments = catalog.len(),
        submissions = log.len(),
        "Tables loaded"
    );

    Ok(Tables {
        roster,
        catalog,
        log,
    })
}

fn run_chart(tables: &Tables, assignment: &str) {
    match assignment_scores(&tables.catalog, &tables.log, assignment) {
        Ok(scores) => print!("{}", chart::render(&scores, assignment)),
        Err(_) => println!("Assignment not found"),
    }
}

/// Interactive selection menu over one loaded snapshot. Runs until the user
/// quits or stdin closes.
fn menu_loop(tables: &Tables) -> Result<()> {
    loop {
        println!("1. Student grade");
        println!("2. Assignment statistics");
        println!("3. Assignment graph");
        println!("q. Quit");

        let Some(selection) = prompt("Enter your selection: ")? else {
            break;
        };

        match selection.as_str() {
            "1" => {
                let Some(name) = prompt("What is the student's name: ")? else {
                    break;
                };
                let outcome = student_grade(&tables.roster, &tables.catalog, &tables.log, &name);
                output::print_grade(&outcome);
            }
            "2" => {
                let Some(name) = prompt("What is the assignment name: ")? else {
                    break;
                };
                let outcome = assignment_statistics(&tables.catalog, &tables.log, &name);
                output::print_stats(&outcome);
            }
            "3" => {
                let Some(name) = prompt("What is the assignment name: ")? else {
                    break;
                };
                run_chart(tables, &name);
            }
            "q" | "quit" => break,
            other => println!("Unknown selection: {other}"),
        }
    }

    Ok(())
}

/// Prompts on stdout and reads one trimmed line. `None` means EOF.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
