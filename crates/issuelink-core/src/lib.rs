//! # issuelink Core
//!
//! Links the issues referenced by a pull request's commits into the pull
//! request description as `Fixes #N` closing references.
//!
//! The pipeline is a single linear pass:
//! - **List** every commit on the pull request (all pages)
//! - **Extract** issue numbers with a caller-supplied regex, ignoring reverts
//! - **Compose** the new body, replacing a marked section when present
//! - **Update** the pull request body in one full-replace call
//!
//! ## Example
//!
//! ```no_run
//! use issuelink_core::{link_issues, GitHubApiClient, InvocationContext, IssuePattern, LinkerOptions};
//!
//! # async fn example() -> issuelink_core::Result<()> {
//! let client = GitHubApiClient::from_env()?;
//! let ctx = InvocationContext {
//!     owner: "octo".to_string(),
//!     repo: "hello".to_string(),
//!     pull_number: Some(42),
//!     issue_pattern: IssuePattern::new(r"#(\d+)")?,
//!     section: "## Linked Issues".to_string(),
//! };
//!
//! let outcome = link_issues(&client, &ctx, LinkerOptions::default()).await?;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod body;
pub mod coordination;
pub mod error;
pub mod event;
pub mod http;
pub mod output;
pub mod patterns;
pub mod traits;
pub mod types;

pub use coordination::{IssueLinker, LinkerOptions};
pub use error::{Error, ErrorKind, Result};
pub use event::EventPayload;
pub use http::GitHubApiClient;
pub use patterns::IssuePattern;
pub use traits::PullRequestHost;
pub use types::{
    Commit, InvocationContext, IssueReferences, Outcome, PullRequest, SkipReason,
};

/// Link issues referenced in a pull request's commits into its body
///
/// This is the main entry point for the library. Returns
/// [`Outcome::Skipped`] when there is no pull request number or no issue
/// reference, and [`Outcome::Linked`] after the body has been written.
pub async fn link_issues<H: PullRequestHost>(
    host: &H,
    ctx: &InvocationContext,
    options: LinkerOptions,
) -> Result<Outcome> {
    IssueLinker::new(host, options).run(ctx).await
}

/// Synchronous variant of `link_issues`
///
/// This creates a new Tokio runtime and blocks on the async version.
/// Prefer the async version if you're already in an async context.
pub fn link_issues_sync<H: PullRequestHost>(
    host: &H,
    ctx: &InvocationContext,
    options: LinkerOptions,
) -> Result<Outcome> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?
        .block_on(link_issues(host, ctx, options))
}
