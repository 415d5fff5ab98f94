//! Issue linking pipeline coordinator

use crate::body::compose_body;
use crate::error::Result;
use crate::traits::PullRequestHost;
use crate::types::{InvocationContext, Outcome, SkipReason};
use tracing::Instrument;

/// Knobs that change side effects without changing results
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkerOptions {
    /// Compose the body but do not write it back
    pub dry_run: bool,
}

/// Links issues referenced by pull request commits into the pull request body
pub struct IssueLinker<'a, H> {
    host: &'a H,
    options: LinkerOptions,
}

impl<'a, H: PullRequestHost> IssueLinker<'a, H> {
    /// Create a new linker over a hosting service
    pub fn new(host: &'a H, options: LinkerOptions) -> Self {
        Self { host, options }
    }

    /// Run the pipeline once
    ///
    /// Steps, strictly in sequence:
    /// 1. list all commits on the pull request
    /// 2. extract issue numbers from non-revert commits
    /// 3. re-read the pull request and compose the new body
    /// 4. write the body back (skipped in dry-run mode)
    ///
    /// Host failures propagate unchanged; nothing is retried or rolled back.
    pub async fn run(&self, ctx: &InvocationContext) -> Result<Outcome> {
        let Some(pull_number) = ctx.pull_number else {
            tracing::warn!("{}", SkipReason::NoPullRequestNumber.message());
            return Ok(Outcome::Skipped(SkipReason::NoPullRequestNumber));
        };

        let span = tracing::info_span!(
            "link_issues",
            owner = %ctx.owner,
            repo = %ctx.repo,
            pull_number
        );

        self.link(ctx, pull_number).instrument(span).await
    }

    async fn link(&self, ctx: &InvocationContext, pull_number: u64) -> Result<Outcome> {
        // Step 1: Commits
        let commits = self
            .host
            .list_commits(&ctx.owner, &ctx.repo, pull_number)
            .await?;
        tracing::info!(count = commits.len(), "listed pull request commits");

        // Step 2: Extract
        let issues = ctx.issue_pattern.extract(&commits);
        if issues.is_empty() {
            tracing::warn!("{}", SkipReason::NoIssuesFound.message());
            return Ok(Outcome::Skipped(SkipReason::NoIssuesFound));
        }
        tracing::info!(issues = ?issues.as_slice(), "extracted issue references");

        // Step 3: Fresh read of the body, then compose
        let pull = self
            .host
            .get_pull_request(&ctx.owner, &ctx.repo, pull_number)
            .await?;
        let body = compose_body(pull.body.as_deref(), &ctx.section, &issues);

        // Step 4: Full replace
        if self.options.dry_run {
            tracing::info!("dry run: pull request body not updated");
        } else {
            self.host
                .update_body(&ctx.owner, &ctx.repo, pull_number, &body)
                .await?;
            tracing::info!("pull request body updated");
        }

        Ok(Outcome::Linked {
            pull_number,
            issues,
            body,
        })
    }
}
