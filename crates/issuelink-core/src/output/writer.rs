//! Step output writer for `$GITHUB_OUTPUT`

use super::annotations::safe_output_escape;
use crate::error::Result;
use std::io::Write;
use std::path::Path;

/// Heredoc delimiter for multiline-safe values
const DELIM: &str = "ISSUELINK_EOF";

/// Step output file writer
pub struct OutputWriter;

impl OutputWriter {
    /// Append `name` = `value` to a GitHub Actions output file
    ///
    /// The value is escaped so it always occupies a single line inside the
    /// heredoc and cannot terminate it early.
    pub fn append(output_file: &Path, name: &str, value: &str) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(output_file)?;

        writeln!(f, "{name}<<{DELIM}")?;
        writeln!(f, "{}", safe_output_escape(value))?;
        writeln!(f, "{DELIM}")?;
        Ok(())
    }

    /// Append to the file named by `GITHUB_OUTPUT`; returns `false` if unset
    pub fn append_from_env(name: &str, value: &str) -> Result<bool> {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => {
                Self::append(Path::new(&path), name, value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
