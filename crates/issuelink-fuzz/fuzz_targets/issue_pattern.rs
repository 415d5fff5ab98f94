#![no_main]
use issuelink_core::{Commit, IssuePattern};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // First line = pattern, remaining lines = commit messages
        let mut lines = s.lines();
        let Some(source) = lines.next() else {
            return;
        };
        if let Ok(pattern) = IssuePattern::new(source) {
            let commits: Vec<Commit> = lines.map(|m| Commit::new("0", m)).collect();
            let issues = pattern.extract(&commits);
            let unique: HashSet<&str> = issues.iter().collect();
            assert_eq!(unique.len(), issues.len());
        }
    }
});
