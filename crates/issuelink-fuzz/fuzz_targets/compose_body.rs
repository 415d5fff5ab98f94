#![no_main]
use issuelink_core::body::compose_body;
use issuelink_core::IssueReferences;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Split at the first NUL: body before, section after
        let (body, section) = s.split_once('\0').unwrap_or((s, ""));
        let issues: IssueReferences = ["1", "22"].into_iter().collect();

        let first = compose_body(Some(body), section, &issues);
        assert!(first.ends_with("Fixes #1\r\nFixes #22"));

        // Markers are single-line; a marker spanning the inserted CRLF is out of scope
        let single_line = !section.contains(['\r', '\n']);
        if single_line && !section.is_empty() && body.contains(section) {
            let second = compose_body(Some(&first), section, &issues);
            assert_eq!(first, second);
        }
    }
});
