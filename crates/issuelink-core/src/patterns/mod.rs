//! Pattern matching module

pub mod matcher;

pub use matcher::{IssuePattern, REVERT_PREFIX};
