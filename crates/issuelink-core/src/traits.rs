//! Hosting service trait for zero-cost async operations
//!
//! Static dispatch only: the linker is generic over the host, so the GitHub
//! client and test doubles compile down to direct calls.

use crate::error::Result;
use crate::types::{Commit, PullRequest};
use std::future::Future;

/// Pull request operations the linker needs from the hosting service
pub trait PullRequestHost {
    /// List every commit on a pull request, in listing order
    ///
    /// Implementations must exhaust pagination.
    fn list_commits<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<Vec<Commit>>> + Send + 'a;

    /// Fetch the current state of a pull request
    fn get_pull_request<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<PullRequest>> + Send + 'a;

    /// Replace the pull request body
    fn update_body<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a;
}
