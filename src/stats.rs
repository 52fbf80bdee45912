//! The query layer: grade computation, assignment statistics, and score
//! extraction over the loaded tables.
//!
//! All functions are pure scans over immutable tables passed in by the
//! caller, so they are safe to run against one snapshot any number of
//! times.

use serde::Serialize;
use thiserror::Error;

use crate::model::{AssignmentCatalog, COURSE_TOTAL_POINTS, Roster, SubmissionLog};

/// Expected, user-facing query outcomes that are not results.
///
/// These are distinct so callers cannot mistake "assignment has no
/// submissions" for "assignment does not exist", even though the console
/// presenter currently reports both the same way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("student not found: {0}")]
    StudentNotFound(String),
    #[error("assignment not found: {0}")]
    AssignmentNotFound(String),
    #[error("no submissions for assignment: {0}")]
    NoSubmissions(String),
}

/// Min, mean, and max of an assignment's percentage scores.
///
/// Values are kept unrounded; rounding happens only at presentation time.
#[derive(Debug, Serialize, PartialEq)]
pub struct ScoreStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

/// Computes a student's overall course grade as an integer percentage.
///
/// Every submission by the student contributes
/// `(percentage / 100) * max_points` for its assignment; duplicates for the
/// same assignment all count, and submissions referencing an id absent from
/// the catalog are skipped. The summed points are taken against the fixed
/// [`COURSE_TOTAL_POINTS`] denominator and rounded half-to-even.
///
/// A student with zero submissions grades 0. Percentages outside [0,100]
/// are used as given.
pub fn student_grade(
    roster: &Roster,
    catalog: &AssignmentCatalog,
    log: &SubmissionLog,
    student_name: &str,
) -> Result<i64, QueryError> {
    let student_id = roster
        .lookup(student_name)
        .ok_or_else(|| QueryError::StudentNotFound(student_name.to_string()))?;

    let mut points_earned = 0.0;
    for sub in log.iter().filter(|s| s.student_id == student_id) {
        if let Some(assignment) = catalog.by_id(&sub.assignment_id) {
            points_earned += (sub.percentage / 100.0) * assignment.max_points;
        }
    }

    let grade = (points_earned / COURSE_TOTAL_POINTS) * 100.0;
    Ok(grade.round_ties_even() as i64)
}

/// Computes min/avg/max over all percentage scores for an assignment.
///
/// Unknown names report [`QueryError::AssignmentNotFound`]; a known
/// assignment with zero submissions reports [`QueryError::NoSubmissions`]
/// rather than dividing by zero.
pub fn assignment_statistics(
    catalog: &AssignmentCatalog,
    log: &SubmissionLog,
    assignment_name: &str,
) -> Result<ScoreStats, QueryError> {
    let scores = assignment_scores(catalog, log, assignment_name)?;
    if scores.is_empty() {
        return Err(QueryError::NoSubmissions(assignment_name.to_string()));
    }

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(ScoreStats {
        min,
        avg: mean(&scores),
        max,
    })
}

/// Extracts the raw percentage scores for an assignment, in log order.
///
/// An empty list is a valid result; only an unknown assignment name is an
/// error. The chart renderer consumes this list as-is.
pub fn assignment_scores(
    catalog: &AssignmentCatalog,
    log: &SubmissionLog,
    assignment_name: &str,
) -> Result<Vec<f64>, QueryError> {
    let assignment = catalog
        .lookup(assignment_name)
        .ok_or_else(|| QueryError::AssignmentNotFound(assignment_name.to_string()))?;

    Ok(log
        .iter()
        .filter(|s| s.assignment_id == assignment.id)
        .map(|s| s.percentage)
        .collect())
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
