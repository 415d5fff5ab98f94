//! Issue number extraction from commit messages

use crate::error::{Error, Result};
use crate::types::{Commit, IssueReferences};
use regex::Regex;
use std::borrow::Cow;

/// Commits whose message starts with this token never contribute issues
pub const REVERT_PREFIX: &str = "Revert";

/// Precompiled issue pattern; capture group 1 yields the issue number
///
/// `\d` and `\D` are ASCII-only (`[0-9]` / `[^0-9]`), so digits from other
/// scripts never become issue numbers. Every other construct keeps the
/// `regex` crate's Unicode semantics.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    source: String,
    regex: Regex,
}

impl IssuePattern {
    /// Compile a pattern, rejecting sources without a capture group
    pub fn new(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::Config("commit-regexp must not be empty".to_string()));
        }

        let regex = Regex::new(&ascii_digit_classes(source))?;

        // captures_len counts the implicit whole-match group 0
        if regex.captures_len() < 2 {
            return Err(Error::Config(format!(
                "commit-regexp '{}' must contain a capture group for the issue number",
                source
            )));
        }

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Pattern source text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True when the message is a revert and must be ignored
    #[inline]
    pub fn is_revert(message: &str) -> bool {
        message.starts_with(REVERT_PREFIX)
    }

    /// All group-1 captures in a message, in match order (zero-copy)
    ///
    /// Matches where group 1 did not participate are dropped.
    pub fn matches_in<'m>(&'m self, message: &'m str) -> impl Iterator<Item = &'m str> + 'm {
        self.regex
            .captures_iter(message)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Collect issue numbers from commits in listing order, skipping reverts
    pub fn extract<'c, I>(&self, commits: I) -> IssueReferences
    where
        I: IntoIterator<Item = &'c Commit>,
    {
        let mut issues = IssueReferences::new();

        for commit in commits {
            if Self::is_revert(&commit.message) {
                tracing::debug!(sha = %commit.sha, "skipping revert commit");
                continue;
            }

            for issue in self.matches_in(&commit.message) {
                if issues.insert(issue) {
                    tracing::debug!(sha = %commit.sha, issue, "found issue reference");
                }
            }
        }

        issues
    }
}

/// Rewrite unescaped `\d` / `\D` to explicit ASCII classes
///
/// Nested classes are valid in `regex`, so the rewrite also holds inside
/// `[...]`.
fn ascii_digit_classes(source: &str) -> Cow<'_, str> {
    if !source.contains("\\d") && !source.contains("\\D") {
        return Cow::Borrowed(source);
    }

    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => out.push_str("[0-9]"),
            Some('D') => out.push_str("[^0-9]"),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}
