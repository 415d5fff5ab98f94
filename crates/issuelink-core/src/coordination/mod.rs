//! Main coordination logic

pub mod linker;

pub use linker::{IssueLinker, LinkerOptions};
