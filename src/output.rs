//! Console presentation of query results.
//!
//! Text output matches the classic report format; JSON output keeps the
//! unrounded values and distinguishes not-found from no-data.

use anyhow::Result;
use serde_json::json;

use crate::stats::{QueryError, ScoreStats};

/// Rounds a value for display. Ties round to even, the same policy the
/// grade computation uses.
fn round_display(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Prints a grade query result: `"{grade}%"` or a not-found message.
pub fn print_grade(outcome: &Result<i64, QueryError>) {
    match outcome {
        Ok(grade) => println!("{grade}%"),
        Err(_) => println!("Student not found"),
    }
}

/// Prints a statistics query result as rounded Min/Avg/Max lines.
///
/// An unknown assignment and one with no submissions are reported
/// identically here; JSON output keeps them apart.
pub fn print_stats(outcome: &Result<ScoreStats, QueryError>) {
    match outcome {
        Ok(stats) => {
            println!("Min: {}%", round_display(stats.min));
            println!("Avg: {}%", round_display(stats.avg));
            println!("Max: {}%", round_display(stats.max));
        }
        Err(_) => println!("Assignment not found"),
    }
}

/// Prints a grade query result as pretty-printed JSON.
pub fn print_grade_json(student_name: &str, outcome: &Result<i64, QueryError>) -> Result<()> {
    let value = match outcome {
        Ok(grade) => json!({ "student": student_name, "grade": grade }),
        Err(e) => json!({ "student": student_name, "error": error_tag(e) }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Prints a statistics query result as pretty-printed JSON with unrounded
/// values.
pub fn print_stats_json(
    assignment_name: &str,
    outcome: &Result<ScoreStats, QueryError>,
) -> Result<()> {
    let value = match outcome {
        Ok(stats) => json!({ "assignment": assignment_name, "stats": stats }),
        Err(e) => json!({ "assignment": assignment_name, "error": error_tag(e) }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn error_tag(error: &QueryError) -> &'static str {
    match error {
        QueryError::StudentNotFound(_) => "student_not_found",
        QueryError::AssignmentNotFound(_) => "assignment_not_found",
        QueryError::NoSubmissions(_) => "no_submissions",
    }
}
