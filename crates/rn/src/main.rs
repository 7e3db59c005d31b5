use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use futures::TryStreamExt as _;
use owo_colors::{OwoColorize, Stream};
use rn_core::collector::ReferenceCollector;
use rn_core::config::Settings;
use rn_core::error::ConfigError;
use rn_core::extract::StoryPattern;
use rn_core::local::LocalSourceHost;
use rn_core::types::{ReferenceSource, StoryReference};
use rn_core::walker::{HistoryWalker, PullRequestDiscovery};
use rn_core::ReleaseNotesError;
use rn_vcs::{GitHistory, VcsError};
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RELNOTES_LOG";

#[derive(Parser)]
#[command(name = "relnotes", version, about = "Release notes from story references in git history")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the distinct story ids referenced between two refs
    Scan {
        #[arg(long)]
        base: String,
        #[arg(long)]
        head: String,
        #[arg(long, default_value = ".")]
        repo: PathBuf,
        /// Override the story pattern (must contain one capture group)
        #[arg(long)]
        pattern: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings as JSON
    Config {
        #[arg(long, default_value = ".")]
        repo: PathBuf,
    },
    Completions {
        shell: Shell,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Vcs(#[from] VcsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ReleaseNotes(#[from] ReleaseNotesError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "relnotes failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Scan {
            base,
            head,
            repo,
            pattern,
            json,
        } => {
            let history = GitHistory::open(&repo)?;
            let settings = Settings::load(history.root())?;
            let pattern = match pattern {
                Some(pattern) => StoryPattern::new(&pattern)?,
                None => settings.story_pattern()?,
            };
            let host = LocalSourceHost::new(history);
            let references = scan(&host, &pattern, &base, &head).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&references)?);
            } else {
                for reference in &references {
                    print_reference(reference);
                }
            }
        }
        Command::Config { repo } => {
            let history = GitHistory::open(&repo)?;
            let settings = Settings::load(history.root())?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "relnotes", &mut io::stdout());
        }
    }
    Ok(())
}

async fn scan(
    host: &LocalSourceHost,
    pattern: &StoryPattern,
    base: &str,
    head: &str,
) -> Result<Vec<StoryReference>, ReleaseNotesError> {
    let walker =
        HistoryWalker::new(host, base, head).with_discovery(PullRequestDiscovery::Disabled);
    let references: Vec<StoryReference> = ReferenceCollector::new(walker, pattern)
        .into_stream()
        .try_collect()
        .await?;
    Ok(first_seen(references))
}

/// Keeps the first reference of every story id.
fn first_seen(references: Vec<StoryReference>) -> Vec<StoryReference> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|reference| seen.insert(reference.id))
        .collect()
}

fn describe(source: &ReferenceSource) -> String {
    match source {
        ReferenceSource::Commit { sha } => {
            format!("commit {}", sha.get(..12).unwrap_or(sha))
        }
        ReferenceSource::PullRequest { number } => format!("pull request #{number}"),
        ReferenceSource::Comment { number } => format!("comment on #{number}"),
    }
}

fn print_reference(reference: &StoryReference) {
    let id = reference.id.to_string();
    println!(
        "{}\t{}",
        id.if_supports_color(Stream::Stdout, |text| text.green()),
        describe(&reference.source).if_supports_color(Stream::Stdout, |text| text.dimmed())
    );
}
