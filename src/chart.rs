//! Terminal histogram for assignment score distributions.
//!
//! Buckets scores into four fixed ranges and renders one bar per bucket.

/// Bucket edges: [0,25), [25,50), [50,75), [75,100].
const BUCKET_LABELS: [&str; 4] = ["  0-25", " 25-50", " 50-75", "75-100"];

/// Buckets percentage scores into the four fixed ranges.
///
/// Scores outside [0,100] are not charted; 100 lands in the last bucket.
pub fn bucket_scores(scores: &[f64]) -> [usize; 4] {
    let mut bins = [0usize; 4];
    for &score in scores {
        if !(0.0..=100.0).contains(&score) {
            continue;
        }
        let idx = if score >= 75.0 {
            3
        } else {
            (score / 25.0) as usize
        };
        bins[idx] += 1;
    }
    bins
}

/// Renders a bar chart of the score distribution, one `#` per student.
pub fn render(scores: &[f64], assignment_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Score Distribution for {assignment_name}\n"));

    if scores.is_empty() {
        out.push_str("(no submissions)\n");
        return out;
    }

    for (label, count) in BUCKET_LABELS.iter().zip(bucket_scores(scores)) {
        out.push_str(&format!("{label} | {} {count}\n", "#".repeat(count)));
    }
    out
}
