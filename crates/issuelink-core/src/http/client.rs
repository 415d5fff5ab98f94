//! GitHub REST API client for pull request commits and bodies

use crate::error::{Error, Result};
use crate::traits::PullRequestHost;
use crate::types::{Commit, PullRequest};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Default public API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub caps `per_page` at 100
const PER_PAGE: usize = 100;

/// Safety limit to prevent infinite loops
const MAX_PAGES: u32 = 1000;

/// GitHub API response item for `GET /pulls/{n}/commits`
#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
    commit: GitHubCommitDetail,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitDetail {
    message: String,
}

/// GitHub API response for `GET /pulls/{n}`
#[derive(Debug, Deserialize)]
struct GitHubPullRequest {
    number: u64,
    body: Option<String>,
}

/// GitHub API error payload
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

/// Request body for `PATCH /pulls/{n}`
#[derive(Debug, Serialize)]
struct UpdatePullRequest<'a> {
    body: &'a str,
}

/// GitHub API client for pull request operations
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    ///
    /// An empty token is treated as no token.
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("issuelink/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Create from environment variables
    ///
    /// The token comes from the action input `github-token`
    /// (`INPUT_GITHUB-TOKEN`), falling back to `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("GITHUB_API_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = resolve_token(
            std::env::var("INPUT_GITHUB-TOKEN").ok(),
            std::env::var("GITHUB_TOKEN").ok(),
        );

        Ok(Self::new(base_url, token))
    }

    /// API base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn pull_url(&self, owner: &str, repo: &str, pull_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.base_url, owner, repo, pull_number
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/vnd.github+json");
        match self.token {
            Some(ref token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fetch every commit on a pull request, following pagination
    pub async fn fetch_commits(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<Commit>> {
        let url = format!("{}/commits", self.pull_url(owner, repo, pull_number));

        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let request = self.client.get(&url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);

            let response = self.authorize(request).send().await?;
            let response = check_status(response, &format!("pull request #{}", pull_number)).await?;

            let batch: Vec<GitHubCommit> = response.json().await?;
            let batch_len = batch.len();
            tracing::debug!(page, count = batch_len, "fetched commit page");

            commits.extend(batch.into_iter().map(|c| Commit {
                sha: c.sha,
                message: c.commit.message,
            }));

            if batch_len < PER_PAGE {
                break;
            }

            page += 1;
            if page > MAX_PAGES {
                return Err(Error::Runtime(
                    "Too many pages in GitHub API response".to_string(),
                ));
            }
        }

        Ok(commits)
    }

    /// Fetch the current pull request
    pub async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<PullRequest> {
        let request = self.client.get(self.pull_url(owner, repo, pull_number));
        let response = self.authorize(request).send().await?;
        let response = check_status(response, &format!("pull request #{}", pull_number)).await?;

        let pull: GitHubPullRequest = response.json().await?;
        Ok(PullRequest {
            number: pull.number,
            body: pull.body,
        })
    }

    /// Replace the pull request body
    pub async fn patch_body(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
        body: &str,
    ) -> Result<()> {
        let request = self
            .client
            .patch(self.pull_url(owner, repo, pull_number))
            .json(&UpdatePullRequest { body });
        let response = self.authorize(request).send().await?;
        check_status(response, &format!("pull request #{}", pull_number)).await?;
        Ok(())
    }
}

impl PullRequestHost for GitHubApiClient {
    fn list_commits<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<Vec<Commit>>> + Send + 'a {
        self.fetch_commits(owner, repo, pull_number)
    }

    fn get_pull_request<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
    ) -> impl Future<Output = Result<PullRequest>> + Send + 'a {
        self.fetch_pull_request(owner, repo, pull_number)
    }

    fn update_body<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        pull_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        self.patch_body(owner, repo, pull_number, body)
    }
}

/// First non-empty token, input before fallback
fn resolve_token(input: Option<String>, fallback: Option<String>) -> Option<String> {
    input
        .filter(|t| !t.is_empty())
        .or_else(|| fallback.filter(|t| !t.is_empty()))
}

/// Map non-success responses onto the error taxonomy
async fn check_status(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "0")
        .unwrap_or(false);

    // GitHub puts a human-readable reason in the JSON body
    let text = response.text().await.unwrap_or_default();
    let api_message = serde_json::from_str::<GitHubErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown").to_string());

    if rate_limited
        && (status == reqwest::StatusCode::FORBIDDEN
            || status == reqwest::StatusCode::TOO_MANY_REQUESTS)
    {
        return Err(Error::RateLimitExceeded(format!(
            "GitHub API rate limit exceeded: {}",
            api_message
        )));
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(Error::NotFound(format!("{}: {}", what, api_message)));
    }

    Err(Error::Http(format!(
        "GitHub API returned {} for {}: {}",
        status.as_u16(),
        what,
        api_message
    )))
}
