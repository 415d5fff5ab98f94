//! Output formatting module

pub mod annotations;
pub mod report;
pub mod writer;

pub use annotations::{format_command, safe_output_escape, Level};
pub use report::Report;
pub use writer::OutputWriter;
