//! In-memory tables backing the query layer.
//!
//! All three tables are built once at startup by the loaders in
//! [`crate::parser`] and are never mutated afterwards. Queries receive them
//! by shared reference.

use serde::Deserialize;
use std::collections::HashMap;

/// Fixed course denominator for the grade formula.
///
/// The design assumes assignment max-points values sum to this; the
/// assumption is not checked anywhere.
pub const COURSE_TOTAL_POINTS: f64 = 1000.0;

/// Maps student name to student id.
///
/// Names are assumed unique; a duplicate name silently keeps the last id
/// seen during load.
#[derive(Debug, Default)]
pub struct Roster {
    students: HashMap<String, String>,
}

impl Roster {
    /// Resolves a student name to their id.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.students.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl FromIterator<(String, String)> for Roster {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Roster {
            students: iter.into_iter().collect(),
        }
    }
}

/// One assignment definition: opaque id plus maximum achievable points.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub max_points: f64,
}

/// Maps assignment name to its definition.
#[derive(Debug, Default)]
pub struct AssignmentCatalog {
    assignments: HashMap<String, Assignment>,
}

impl AssignmentCatalog {
    /// Resolves an assignment name to its definition.
    pub fn lookup(&self, name: &str) -> Option<&Assignment> {
        self.assignments.get(name)
    }

    /// Finds an assignment by its opaque id.
    ///
    /// Linear scan; the catalog is keyed by name and datasets are small.
    pub fn by_id(&self, id: &str) -> Option<&Assignment> {
        self.assignments.values().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl FromIterator<(String, Assignment)> for AssignmentCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Assignment)>>(iter: I) -> Self {
        AssignmentCatalog {
            assignments: iter.into_iter().collect(),
        }
    }
}

/// One percentage score for one (student, assignment) pair.
///
/// Deserialized positionally from pipe-delimited rows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Submission {
    pub student_id: String,
    pub assignment_id: String,
    pub percentage: f64,
}

/// Flat list of submissions in load order.
///
/// Duplicate (student, assignment) pairs are kept as-is; every record
/// contributes to aggregation.
#[derive(Debug, Default)]
pub struct SubmissionLog {
    records: Vec<Submission>,
}

impl SubmissionLog {
    pub fn iter(&self) -> impl Iterator<Item = &Submission> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Submission> for SubmissionLog {
    fn from_iter<I: IntoIterator<Item = Submission>>(iter: I) -> Self {
        SubmissionLog {
            records: iter.into_iter().collect(),
        }
    }
}
