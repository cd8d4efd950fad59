use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use collector::{fetch_commits, fetch_issues, metrics, write_csv};
use common::config::{AppConfig, GithubConfig};
use common::logging;
use normalizer::StateFilter;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "repo-export",
    version,
    about = "Export GitHub commit and issue metadata to CSV"
)]
struct Cli {
    /// GitHub token; overrides `github.token` from configuration.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Directory holding `config/default.*` and `config/local.*`.
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Write Prometheus metrics in textfile-collector format on exit.
    #[arg(long, global = true)]
    metrics_file: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Export commits of a repository.
    FetchCommits(FetchCommitsArgs),
    /// Export issues of a repository, pull requests excluded.
    FetchIssues(FetchIssuesArgs),
}

#[derive(Debug, Args)]
struct FetchCommitsArgs {
    /// Repository as owner/name.
    #[arg(long)]
    repo: String,

    /// Maximum number of commits; 0 means all.
    #[arg(long)]
    max: Option<usize>,

    #[arg(long, default_value = "commits.csv")]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct FetchIssuesArgs {
    /// Repository as owner/name.
    #[arg(long)]
    repo: String,

    /// One of all, open, closed.
    #[arg(long, default_value = "all", value_parser = parse_state)]
    state: StateFilter,

    /// Maximum number of listing items to visit, pull requests included; 0
    /// means all.
    #[arg(long)]
    max: Option<usize>,

    #[arg(long, default_value = "issues.csv")]
    out: PathBuf,
}

fn parse_state(input: &str) -> Result<StateFilter, String> {
    input.parse::<StateFilter>().map_err(|err| err.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = AppConfig::load_from_path(&cli.config_dir)?;
    if let Some(token) = cli.token.clone() {
        config.github = config.github.with_token(token);
    }

    let outcome = run(&cli.command, &config.github).await;

    if let Some(path) = &cli.metrics_file {
        metrics::write_textfile(path)?;
        info!(path = %path.display(), "wrote metrics");
    }

    outcome
}

async fn run(command: &Command, github: &GithubConfig) -> Result<()> {
    match command {
        Command::FetchCommits(args) => {
            let frame = fetch_commits(github, &args.repo, args.max).await?;
            write_csv(&frame, &args.out)?;
            println!("Wrote {} commits to {}", frame.len(), args.out.display());
        }
        Command::FetchIssues(args) => {
            let frame = fetch_issues(github, &args.repo, args.state, args.max).await?;
            write_csv(&frame, &args.out)?;
            println!("Wrote {} issues to {}", frame.len(), args.out.display());
        }
    }
    Ok(())
}
