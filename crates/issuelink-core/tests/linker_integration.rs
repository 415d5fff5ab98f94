//! Integration tests for the issue linking pipeline against an in-memory host

use assert_matches::assert_matches;
use issuelink_core::{
    link_issues, link_issues_sync, Commit, Error, ErrorKind, InvocationContext, IssueLinker,
    IssuePattern, LinkerOptions, Outcome, PullRequest, PullRequestHost, Result, SkipReason,
};
use parking_lot::Mutex;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    ListCommits(u64),
    GetPullRequest(u64),
    UpdateBody(u64, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailAt {
    List,
    Get,
    Update,
}

/// Hosting service double that records every call
#[derive(Default)]
struct MemoryHost {
    commits: Vec<Commit>,
    body: Mutex<Option<String>>,
    fail_at: Option<FailAt>,
    calls: Mutex<Vec<Call>>,
}

impl MemoryHost {
    fn new(messages: &[&str], body: Option<&str>) -> Self {
        Self {
            commits: messages
                .iter()
                .enumerate()
                .map(|(i, m)| Commit::new(format!("{:040x}", i), *m))
                .collect(),
            body: Mutex::new(body.map(str::to_string)),
            ..Default::default()
        }
    }

    fn failing_at(mut self, at: FailAt) -> Self {
        self.fail_at = Some(at);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn body(&self) -> Option<String> {
        self.body.lock().clone()
    }

    fn check(&self, at: FailAt) -> Result<()> {
        match self.fail_at {
            Some(f) if f == at => Err(Error::Http("GitHub API returned 500 for pull request #7: boom".to_string())),
            _ => Ok(()),
        }
    }
}

impl PullRequestHost for MemoryHost {
    fn list_commits<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<Vec<Commit>>> + Send + 'a {
        async move {
            self.calls.lock().push(Call::ListCommits(pull_number));
            self.check(FailAt::List)?;
            Ok(self.commits.clone())
        }
    }

    fn get_pull_request<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<PullRequest>> + Send + 'a {
        async move {
            self.calls.lock().push(Call::GetPullRequest(pull_number));
            self.check(FailAt::Get)?;
            Ok(PullRequest {
                number: pull_number,
                body: self.body(),
            })
        }
    }

    fn update_body<'a>(
        &'a self,
        _owner: &'a str,
        _repo: &'a str,
        pull_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        async move {
            self.calls
                .lock()
                .push(Call::UpdateBody(pull_number, body.to_string()));
            self.check(FailAt::Update)?;
            *self.body.lock() = Some(body.to_string());
            Ok(())
        }
    }
}

fn context(pull_number: Option<u64>, section: &str) -> InvocationContext {
    InvocationContext {
        owner: "octo".to_string(),
        repo: "hello".to_string(),
        pull_number,
        issue_pattern: IssuePattern::new(r"#(\d+)").unwrap(),
        section: section.to_string(),
    }
}

#[tokio::test]
async fn test_links_issues_into_empty_body() {
    let host = MemoryHost::new(&["fix bug (#12)", "add feature, closes #34"], None);
    let outcome = link_issues(&host, &context(Some(7), ""), LinkerOptions::default())
        .await
        .unwrap();

    assert_matches!(&outcome, Outcome::Linked { pull_number: 7, issues, body } => {
        assert_eq!(issues.as_slice(), &["12", "34"]);
        assert_eq!(body, "Fixes #12\r\nFixes #34");
    });
    assert_eq!(
        host.calls(),
        vec![
            Call::ListCommits(7),
            Call::GetPullRequest(7),
            Call::UpdateBody(7, "Fixes #12\r\nFixes #34".to_string()),
        ]
    );
    assert_eq!(outcome.message(), "Added issues link to 12,34 in #7.");
}

#[tokio::test]
async fn test_revert_only_commits_skip_without_update() {
    let host = MemoryHost::new(&["Revert \"fix #12\""], Some("Description"));
    let outcome = link_issues(&host, &context(Some(7), ""), LinkerOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoIssuesFound));
    assert_eq!(host.calls(), vec![Call::ListCommits(7)]);
    assert_eq!(host.body().as_deref(), Some("Description"));
}

#[tokio::test]
async fn test_section_marker_replaces_tail() {
    let host = MemoryHost::new(
        &["fix #12"],
        Some("Description\r\n## Linked Issues\r\nold text"),
    );
    link_issues(
        &host,
        &context(Some(7), "## Linked Issues"),
        LinkerOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        host.body().as_deref(),
        Some("Description\r\n## Linked Issues\r\nFixes #12")
    );
}

#[tokio::test]
async fn test_missing_pull_number_makes_no_calls() {
    let host = MemoryHost::new(&["fix #1"], None);
    let outcome = link_issues(&host, &context(None, ""), LinkerOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoPullRequestNumber));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_duplicate_issue_appears_once_at_first_position() {
    let host = MemoryHost::new(&["start #5", "touch #9", "finish #5"], None);
    let outcome = link_issues(&host, &context(Some(1), ""), LinkerOptions::default())
        .await
        .unwrap();

    assert_matches!(outcome, Outcome::Linked { issues, .. } => {
        assert_eq!(issues.as_slice(), &["5", "9"]);
    });
}

#[tokio::test]
async fn test_existing_body_without_section_appends() {
    let host = MemoryHost::new(&["closes #3"], Some("Some description"));
    link_issues(&host, &context(Some(2), "## Issues"), LinkerOptions::default())
        .await
        .unwrap();

    assert_eq!(
        host.body().as_deref(),
        Some("Some description\r\nFixes #3")
    );
}

#[tokio::test]
async fn test_rerun_with_section_is_stable() {
    let host = MemoryHost::new(&["closes #3", "closes #4"], Some("Intro\r\n## Issues\r\n"));
    let ctx = context(Some(2), "## Issues");

    link_issues(&host, &ctx, LinkerOptions::default()).await.unwrap();
    let first = host.body();
    link_issues(&host, &ctx, LinkerOptions::default()).await.unwrap();

    assert_eq!(host.body(), first);
}

#[tokio::test]
async fn test_rerun_without_section_duplicates_list() {
    let host = MemoryHost::new(&["closes #3"], Some("Intro"));
    let ctx = context(Some(2), "");

    link_issues(&host, &ctx, LinkerOptions::default()).await.unwrap();
    link_issues(&host, &ctx, LinkerOptions::default()).await.unwrap();

    assert_eq!(
        host.body().as_deref(),
        Some("Intro\r\nFixes #3\r\nFixes #3")
    );
}

#[tokio::test]
async fn test_dry_run_skips_update() {
    let host = MemoryHost::new(&["fix #8"], Some("Body"));
    let outcome = IssueLinker::new(&host, LinkerOptions { dry_run: true })
        .run(&context(Some(3), ""))
        .await
        .unwrap();

    assert_matches!(outcome, Outcome::Linked { body, .. } => {
        assert_eq!(body, "Body\r\nFixes #8");
    });
    assert_eq!(
        host.calls(),
        vec![Call::ListCommits(3), Call::GetPullRequest(3)]
    );
    assert_eq!(host.body().as_deref(), Some("Body"));
}

#[tokio::test]
async fn test_list_failure_propagates() {
    let host = MemoryHost::new(&["fix #1"], None).failing_at(FailAt::List);
    let err = link_issues(&host, &context(Some(7), ""), LinkerOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Http);
    assert_eq!(host.calls(), vec![Call::ListCommits(7)]);
}

#[tokio::test]
async fn test_get_failure_stops_before_update() {
    let host = MemoryHost::new(&["fix #1"], Some("Body")).failing_at(FailAt::Get);
    let result = link_issues(&host, &context(Some(7), ""), LinkerOptions::default()).await;

    assert_matches!(result, Err(Error::Http(_)));
    assert_eq!(
        host.calls(),
        vec![Call::ListCommits(7), Call::GetPullRequest(7)]
    );
    assert_eq!(host.body().as_deref(), Some("Body"));
}

#[tokio::test]
async fn test_update_failure_propagates_without_rollback() {
    let host = MemoryHost::new(&["fix #1"], Some("Body")).failing_at(FailAt::Update);
    let result = link_issues(&host, &context(Some(7), ""), LinkerOptions::default()).await;

    assert_matches!(result, Err(Error::Http(msg)) => {
        assert!(msg.contains("boom"));
    });
    assert_eq!(host.calls().len(), 3);
}

#[test]
fn test_sync_entry_point() {
    let host = MemoryHost::new(&["fix #10"], None);
    let outcome = link_issues_sync(&host, &context(Some(1), ""), LinkerOptions::default()).unwrap();
    assert_matches!(outcome, Outcome::Linked { pull_number: 1, .. });
}
