//! GitHub Actions workflow command formatting

/// Annotation level understood by the Actions runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// `::warning::`
    Warning,
    /// `::notice::`
    Notice,
    /// `::error::`
    Error,
}

impl Level {
    /// Command name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Notice => "notice",
            Self::Error => "error",
        }
    }
}

/// Escape command data so the message stays on one line
///
/// Prevents injection of workflow commands via commit-controlled text.
pub fn safe_output_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a workflow command line such as `::warning::message`
pub fn format_command(level: Level, message: &str) -> String {
    format!("::{}::{}", level.as_str(), safe_output_escape(message))
}
