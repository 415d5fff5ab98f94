//! Pull request body composition
//!
//! Pure string functions; the linker decides when to call them and the host
//! decides where the result goes.

use crate::types::IssueReferences;
use memchr::memmem;

/// Line separator GitHub uses for text entered in the web editor
pub const CRLF: &str = "\r\n";

/// Render the closing-keyword list, one `Fixes #N` per line
pub fn issues_list(issues: &IssueReferences) -> String {
    let mut buf = String::with_capacity(issues.len() * 12);
    for (i, issue) in issues.iter().enumerate() {
        if i > 0 {
            buf.push_str(CRLF);
        }
        buf.push_str("Fixes #");
        buf.push_str(issue);
    }
    buf
}

/// Byte offset of the first occurrence of `section` in `body`
#[inline]
pub fn find_section(body: &str, section: &str) -> Option<usize> {
    if section.is_empty() {
        return None;
    }
    memmem::find(body.as_bytes(), section.as_bytes())
}

/// Merge the issue list into an existing body
///
/// - no body: the list alone
/// - section marker present: everything from the marker on is replaced by
///   the marker followed by the list; a line break directly before the
///   marker is reused as the separator instead of doubled
/// - otherwise: the list is appended on a new line
///
/// Re-running without a marker appends another copy of the list.
pub fn compose_body(existing: Option<&str>, section: &str, issues: &IssueReferences) -> String {
    let list = issues_list(issues);

    let Some(body) = existing else {
        return list;
    };

    match find_section(body, section) {
        Some(idx) => {
            let head = strip_line_break(&body[..idx]);
            let mut out =
                String::with_capacity(head.len() + section.len() + list.len() + 2 * CRLF.len());
            out.push_str(head);
            out.push_str(CRLF);
            out.push_str(section);
            out.push_str(CRLF);
            out.push_str(&list);
            out
        }
        None => {
            let mut out = String::with_capacity(body.len() + CRLF.len() + list.len());
            out.push_str(body);
            out.push_str(CRLF);
            out.push_str(&list);
            out
        }
    }
}

/// Drop a single trailing `\r\n` or `\n`
fn strip_line_break(s: &str) -> &str {
    s.strip_suffix(CRLF)
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
