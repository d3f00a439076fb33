//! git-scribe - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use scribe::config::{EnvSnapshot, Settings, resolve_editor};
use scribe::generate::{HttpGenerator, MessageSource};
use scribe::git::{GitCommitter, collect_staged, core_editor, open_repository};
use scribe::interaction::{ExternalEditor, Outcome, TerminalPrompter};
use scribe::workflow::{self, Collaborators};
use scribe::{ScribeError, select_provider};

/// Environment variable holding a tracing filter directive.
const LOG_ENV_VAR: &str = "SCRIBE_LOG";

/// Draft a conventional commit message for the staged changes.
#[derive(Parser, Debug)]
#[command(name = "git-scribe")]
#[command(about = "Draft a conventional commit message for the staged changes")]
#[command(version)]
struct Cli {
    /// Commit message to use as-is when SCRIBE_SKIP is set
    #[arg(short = 'm', long)]
    message: Option<String>,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(Outcome::Committed { .. }) => ExitCode::SUCCESS,
        Ok(Outcome::Cancelled) => {
            eprintln!("Commit cancelled.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<ScribeError>()
                .map_or(1, ScribeError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(format!("scribe={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<Outcome> {
    let env = EnvSnapshot::from_process();
    let settings = Settings::from_env(&env);

    // Step 1: Open the repository and read the staged changes
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let repo = open_repository(&cwd)?;
    let workdir = repo
        .workdir()
        .map(std::path::Path::to_path_buf)
        .ok_or(ScribeError::NotARepository)?;

    let changes = collect_staged(&repo)?;
    println!("Staged changes:");
    println!("{}", changes.stat.trim_end());

    // Step 2: Wire up the collaborators
    let editor_command =
        resolve_editor(&env, core_editor(&repo).as_deref()).unwrap_or_else(|| {
            warn!("No editor configured or found on PATH, falling back to vi");
            "vi".to_string()
        });
    let editor = ExternalEditor::new(editor_command);
    let committer = GitCommitter::new(workdir);
    let mut prompter = TerminalPrompter;

    // Step 3: Generate, review and commit
    let outcome = workflow::run(
        &settings,
        cli.message.as_deref(),
        &changes,
        Collaborators {
            committer: &committer,
            prompter: &mut prompter,
            editor: &editor,
        },
        || {
            let credential = select_provider(&env)?;
            let generator = HttpGenerator::new(credential, &settings)?;
            println!(
                "Generating commit message with {} ({})...",
                generator.provider(),
                generator.model()
            );
            Ok(Box::new(generator) as Box<dyn MessageSource>)
        },
    )
    .await?;

    Ok(outcome)
}
