//! Loaders for the three flat-file data sources.
//!
//! Malformed input fails fast with context; the query layer assumes
//! well-formed tables once these return.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::model::{Assignment, AssignmentCatalog, Roster, Submission, SubmissionLog};

/// Width of the student id prefix on each roster line.
const STUDENT_ID_LEN: usize = 3;

/// Reads the roster file: a fixed 3-character student id followed by the
/// student's name, one record per line. Blank lines are skipped.
pub fn read_roster(path: &Path) -> Result<Roster> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster file {}", path.display()))?;

    let mut students = Vec::new();
    for (lineno, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((id, name)) = line.split_at_checked(STUDENT_ID_LEN) else {
            bail!(
                "{}:{}: roster line shorter than the {}-character student id",
                path.display(),
                lineno + 1,
                STUDENT_ID_LEN
            );
        };
        students.push((name.trim().to_string(), id.to_string()));
    }

    let roster: Roster = students.into_iter().collect();
    debug!(path = %path.display(), students = roster.len(), "Roster loaded");
    Ok(roster)
}

/// Reads assignment definitions: records of three consecutive lines (name,
/// assignment id, max points). A blank name line ends the file.
pub fn read_assignments(path: &Path) -> Result<AssignmentCatalog> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading assignments file {}", path.display()))?;

    let mut lines = contents.lines();
    let mut entries = Vec::new();

    while let Some(name) = lines.next() {
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        let id = lines
            .next()
            .with_context(|| format!("assignment {name:?}: missing id line"))?
            .trim()
            .to_string();
        let points_line = lines
            .next()
            .with_context(|| format!("assignment {name:?}: missing max-points line"))?;
        let max_points: f64 = points_line
            .trim()
            .parse()
            .with_context(|| format!("assignment {name:?}: invalid max points {points_line:?}"))?;

        entries.push((name.to_string(), Assignment { id, max_points }));
    }

    let catalog: AssignmentCatalog = entries.into_iter().collect();
    debug!(path = %path.display(), assignments = catalog.len(), "Assignment catalog loaded");
    Ok(catalog)
}

/// Reads every `*.txt` file in the submissions directory into one flat log.
///
/// Rows are pipe-delimited `student_id|assignment_id|percentage` triples.
/// Entries without a `.txt` extension are skipped.
pub fn read_submissions(dir: &Path) -> Result<SubmissionLog> {
    let mut records = Vec::new();

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("reading submissions directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }

        let file = File::open(&path)
            .with_context(|| format!("opening submission file {}", path.display()))?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .from_reader(file);

        let before = records.len();
        for result in rdr.deserialize() {
            let record: Submission = result
                .with_context(|| format!("parsing submission row in {}", path.display()))?;
            records.push(record);
        }
        debug!(path = %path.display(), rows = records.len() - before, "Submission file loaded");
    }

    Ok(records.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("gradebook_parser_{name}"))
    }

    #[test]
    fn test_read_roster() {
        let path = temp_path("roster.txt");
        fs::write(&path, "001Alice Johnson\n002Bob Smith\n").unwrap();

        let roster = read_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.lookup("Alice Johnson"), Some("001"));
        assert_eq!(roster.lookup("Bob Smith"), Some("002"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_roster_skips_blank_lines() {
        let path = temp_path("roster_blank.txt");
        fs::write(&path, "001Alice\n\n002Bob\n").unwrap();

        let roster = read_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_roster_short_line_fails() {
        let path = temp_path("roster_short.txt");
        fs::write(&path, "01\n").unwrap();

        assert!(read_roster(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_assignments() {
        let path = temp_path("assignments.txt");
        fs::write(&path, "HW1\nA1\n500.0\nHW2\nA2\n500.0\n").unwrap();

        let catalog = read_assignments(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        let hw1 = catalog.lookup("HW1").unwrap();
        assert_eq!(hw1.id, "A1");
        assert_eq!(hw1.max_points, 500.0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_assignments_stops_at_blank_name() {
        let path = temp_path("assignments_blank.txt");
        fs::write(&path, "HW1\nA1\n500.0\n\nignored\n").unwrap();

        let catalog = read_assignments(&path).unwrap();
        assert_eq!(catalog.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_assignments_truncated_record_fails() {
        let path = temp_path("assignments_truncated.txt");
        fs::write(&path, "HW1\nA1\n").unwrap();

        assert!(read_assignments(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_assignments_bad_points_fails() {
        let path = temp_path("assignments_bad_points.txt");
        fs::write(&path, "HW1\nA1\nlots\n").unwrap();

        assert!(read_assignments(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_submissions_aggregates_txt_files() {
        let dir = temp_path("submissions_ok");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("week1.txt"), "001|A1|80\n002|A1|50.5\n").unwrap();
        fs::write(dir.join("week2.txt"), "001|A2|60\n").unwrap();
        fs::write(dir.join("notes.md"), "not a submission file\n").unwrap();

        let log = read_submissions(&dir).unwrap();
        assert_eq!(log.len(), 3);
        assert!(
            log.iter()
                .any(|s| s.student_id == "002" && s.percentage == 50.5)
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_submissions_malformed_row_fails() {
        let dir = temp_path("submissions_bad");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("week1.txt"), "001|A1|not-a-number\n").unwrap();

        assert!(read_submissions(&dir).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_submissions_missing_dir_fails() {
        let dir = temp_path("submissions_missing");
        let _ = fs::remove_dir_all(&dir);

        assert!(read_submissions(&dir).is_err());
    }
}
