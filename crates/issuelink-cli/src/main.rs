#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use issuelink_core::http::DEFAULT_API_URL;
use issuelink_core::output::{format_command, OutputWriter, Report};
use issuelink_core::{
    link_issues, Error, EventPayload, GitHubApiClient, InvocationContext, IssuePattern,
    LinkerOptions, Outcome, Result,
};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "issuelink",
    version,
    about = "Link issues referenced in pull request commits"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add `Fixes #N` references for commit-mentioned issues to the pull request body
    Link(LinkArgs),
}

#[derive(clap::Args)]
struct LinkArgs {
    /// GitHub token for API access
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Regex with one capture group matching the issue number in a commit message
    #[arg(long, env = "INPUT_COMMIT-REGEXP")]
    commit_regexp: Option<String>,

    /// Body section marker after which the issue list replaces existing text
    #[arg(long, env = "INPUT_SECTION", default_value = "")]
    section: String,

    /// Path to the triggering event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "ISSUELINK_OUTPUT_FORMAT")]
    output_format: Option<String>,

    /// Compose the new body without writing it
    #[arg(long, env = "ISSUELINK_DRY_RUN")]
    dry_run: bool,
}

/// Output format for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// GitHub Actions: workflow commands to stdout, outputs to $GITHUB_OUTPUT
    Gha,
    /// JSON report to stdout
    Json,
    /// Human-readable text to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let code = match cli.command {
        Commands::Link(args) => run_link(args),
    };
    std::process::exit(code);
}

/// Diagnostics go to stderr so stdout carries only workflow commands or JSON
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_link(args: LinkArgs) -> i32 {
    let output_format = OutputFormat::detect(clean_opt(&args.output_format));

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let result = match rt {
        Ok(rt) => rt.block_on(link(&args)),
        Err(e) => Err(Error::Runtime(format!("failed to create runtime: {e}"))),
    };

    let report = Report::from_result(&result);

    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    let _ = write!(w, "{}", render_report(&report, output_format));

    if let Ok(Outcome::Linked { issues, body, .. }) = &result {
        if args.dry_run && output_format == OutputFormat::Text {
            let _ = writeln!(w, "\n{body}");
        }
        if output_format == OutputFormat::Gha {
            write_gha_output(&issues.as_slice().join(","));
        }
    }

    report.exit_code()
}

/// Build the invocation context from inputs and the event payload, then run
async fn link(args: &LinkArgs) -> Result<Outcome> {
    let ctx = build_context(args)?;

    let api_url = clean_opt(&args.api_url).unwrap_or(DEFAULT_API_URL);
    let token = clean_opt(&args.token).map(str::to_string);
    let client = GitHubApiClient::new(api_url.to_string(), token);

    let options = LinkerOptions {
        dry_run: args.dry_run,
    };
    link_issues(&client, &ctx, options).await
}

fn build_context(args: &LinkArgs) -> Result<InvocationContext> {
    let source = clean_opt(&args.commit_regexp)
        .ok_or_else(|| Error::Config("commit-regexp input is required".to_string()))?;
    let issue_pattern = IssuePattern::new(source)?;

    let event_path = args
        .event_path
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::Config("GITHUB_EVENT_PATH not set".to_string()))?;
    let payload = EventPayload::from_path(event_path)?;

    Ok(InvocationContext {
        owner: payload.owner,
        repo: payload.repo,
        pull_number: payload.pull_number,
        issue_pattern,
        section: args.section.clone(),
    })
}

/// Render the report in the selected format, newline-terminated
fn render_report(report: &Report<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Gha => format!("{}\n", format_command(report.level(), &report.message)),
        OutputFormat::Json => {
            let json = serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string());
            format!("{json}\n")
        }
        OutputFormat::Text => format!("{}: {}\n", report.level().as_str(), report.message),
    }
}

/// Append the `issues` step output when running under Actions
fn write_gha_output(issues: &str) {
    match OutputWriter::append_from_env("issues", issues) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("GITHUB_OUTPUT not set, skipping step outputs"),
        Err(e) => tracing::error!("cannot write GITHUB_OUTPUT: {e}"),
    }
}
