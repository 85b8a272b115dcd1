//! Result aggregation: outcomes → successes + batch summary

use docsift_domain::{DocumentData, DocumentFailure, Outcome};
use regex::Regex;
use std::sync::OnceLock;

/// Consolidated view of a finished batch, derived once after all outcomes
/// are collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Total documents submitted
    pub total: usize,

    /// Documents that extracted and validated successfully
    pub success_count: usize,

    /// Documents that failed at some pipeline step
    pub failure_count: usize,

    /// The failures, with format-mismatch messages highlighted
    pub failures: Vec<DocumentFailure>,
}

fn mismatch_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // `[^<]*$` keeps the transform idempotent: once the fragment is
    // wrapped, the trailing `</span>` stops a second match.
    PATTERN.get_or_init(|| {
        Regex::new(r"detected format: ([^<]*)$").expect("mismatch highlight pattern is valid")
    })
}

/// Wrap the `detected format: X` fragment of a mismatch message in the
/// highlight span downstream renderers expect. Messages without the
/// marker pass through untouched.
fn highlight_mismatch(message: &str) -> String {
    mismatch_pattern()
        .replace(
            message,
            r#"<span style="background-color: yellow; font-weight: bold;">detected format: $1</span>"#,
        )
        .into_owned()
}

/// Partition outcomes into successes and a [`BatchSummary`].
///
/// Pure and deterministic: the same outcomes always aggregate to the same
/// summary. Format-mismatch failure messages are rewritten here, exactly
/// once, so the processor's own messages stay plain.
pub fn aggregate(outcomes: Vec<Outcome>) -> (Vec<DocumentData>, BatchSummary) {
    let total = outcomes.len();
    let mut successes = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Outcome::Success(data) => successes.push(data),
            Outcome::Failure(mut failure) => {
                failure.error = highlight_mismatch(&failure.error);
                failures.push(failure);
            }
        }
    }

    let summary = BatchSummary {
        total,
        success_count: successes.len(),
        failure_count: failures.len(),
        failures,
    };
    (successes, summary)
}
