//! Core type definitions

use crate::patterns::IssuePattern;
use serde::Serialize;

/// Everything a single run needs to know about its target
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Repository owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Pull request number; `None` when the triggering event carried none
    pub pull_number: Option<u64>,
    /// Compiled issue pattern (capture group 1 is the issue number)
    pub issue_pattern: IssuePattern,
    /// Body section marker; empty disables section replacement
    pub section: String,
}

/// A commit as listed on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
}

impl Commit {
    /// Convenience constructor
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
        }
    }
}

/// Snapshot of the pull request fields this tool cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Description body; GitHub returns `null` for an empty description
    pub body: Option<String>,
}

/// Ordered set of issue numbers, kept in first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IssueReferences(Vec<String>);

impl IssueReferences {
    /// Create an empty set
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an issue number; returns `false` if it was already present
    pub fn insert(&mut self, issue: &str) -> bool {
        if self.contains(issue) {
            return false;
        }
        self.0.push(issue.to_string());
        true
    }

    /// Membership test
    #[inline]
    pub fn contains(&self, issue: &str) -> bool {
        self.0.iter().any(|i| i == issue)
    }

    /// Number of distinct issues
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was found
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> FromIterator<&'a str> for IssueReferences {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut refs = Self::new();
        for issue in iter {
            refs.insert(issue);
        }
        refs
    }
}

/// Why a run ended without touching the pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event payload had no pull request number
    NoPullRequestNumber,
    /// No non-revert commit referenced an issue
    NoIssuesFound,
}

impl SkipReason {
    /// Warning text reported to the workflow log
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoPullRequestNumber => "No pull request number in payload.",
            Self::NoIssuesFound => "No issue numbers found in commits.",
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The body was rewritten (or would have been, in dry-run mode)
    Linked {
        /// Target pull request
        pull_number: u64,
        /// Issues written into the body
        issues: IssueReferences,
        /// The body that was sent
        body: String,
    },
    /// Nothing to do
    Skipped(SkipReason),
}

impl Outcome {
    /// Human-readable summary line
    pub fn message(&self) -> String {
        match self {
            Outcome::Linked {
                pull_number,
                issues,
                ..
            } => format!(
                "Added issues link to {} in #{}.",
                issues.as_slice().join(","),
                pull_number
            ),
            Outcome::Skipped(reason) => reason.message().to_string(),
        }
    }
}
