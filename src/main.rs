use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::Level;

use hookguard::cli;

/// Environment variable holding the log level (error, warn, info, debug, trace).
const LOG_ENV: &str = "HOOKGUARD_LOG";

#[derive(Parser)]
#[command(name = "hookguard", version, about = "Guard sensitive files and carry context across sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// PreToolUse hook: block access to sensitive files (exit 2 on block)
    FileGuard,

    /// UserPromptSubmit hook: load the previous session on @LAST
    UserPrompt,

    /// Stop hook: save a context snapshot
    Stop,

    /// PreCompact hook: save a context snapshot before compaction
    PreCompact,

    /// SessionStart hook: mention an available snapshot
    SessionHint,

    /// PostToolUse hook: append file edits to the edit log
    RecordEdit,

    /// Scan files for secrets
    Scan {
        /// Scan git staged files instead of a path
        #[arg(long)]
        staged: bool,

        /// File or directory to scan (default: current directory)
        path: Option<String>,
    },
}

fn init_tracing() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| Level::from_str(v.trim()).ok())
        .unwrap_or(Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::FileGuard => cli::guard::run().await?,
        Commands::UserPrompt => cli::prompt::run().await?,
        Commands::Stop | Commands::PreCompact => cli::snapshot::run().await?,
        Commands::SessionHint => cli::hint::run().await?,
        Commands::RecordEdit => cli::edits::run().await?,
        Commands::Scan { staged, path } => cli::scan::run(staged, path.as_deref()).await?,
    };
    Ok(code)
}
