//! Run report: the boundary view of a run's result

use super::annotations::Level;
use crate::error::Error;
use crate::types::Outcome;
use serde::Serialize;

/// Flattened result of one run, ready for any output format
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// `linked`, `skipped` or `failed`
    pub status: &'static str,
    /// Notice, warning or failure text
    pub message: String,
    /// Target pull request, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_number: Option<u64>,
    /// Linked issues (empty unless linked)
    pub issues: &'a [String],
    #[serde(skip)]
    level: Level,
}

impl<'a> Report<'a> {
    /// Build a report from a run result
    ///
    /// Failures carry only the error's message, without its category
    /// prefix, as diagnostic text.
    pub fn from_result(result: &'a Result<Outcome, Error>) -> Self {
        match result {
            Ok(outcome @ Outcome::Linked {
                pull_number,
                issues,
                ..
            }) => Self {
                status: "linked",
                message: outcome.message(),
                pull_number: Some(*pull_number),
                issues: issues.as_slice(),
                level: Level::Notice,
            },
            Ok(outcome @ Outcome::Skipped(_)) => Self {
                status: "skipped",
                message: outcome.message(),
                pull_number: None,
                issues: &[],
                level: Level::Warning,
            },
            Err(err) => Self {
                status: "failed",
                message: err.message().into_owned(),
                pull_number: None,
                issues: &[],
                level: Level::Error,
            },
        }
    }

    /// Annotation level for this report
    #[inline]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// True unless the run failed
    #[inline]
    pub fn is_success(&self) -> bool {
        self.level != Level::Error
    }

    /// Process exit status
    #[inline]
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
