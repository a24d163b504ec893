mod client;
mod commands;
mod session;
mod status;
mod table;

use crate::{
    client::ScoringClient,
    commands::{
        analyze_command, session_command, suggest_command, AnalyzeArgs, SessionArgs, SuggestArgs,
    },
};
use clap::{Parser, Subcommand};
use std::{process, time::Duration};
use tracing::Level;
use url::Url;

#[derive(Debug, Parser)]
#[command(about = "Rank tasks scored by a remote prioritization service")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[clap(
        long,
        default_value = "http://127.0.0.1:8000",
        env = "TRIAGE_SERVER",
        help = "Base URL of the scoring service"
    )]
    server: Url,

    #[clap(
        long,
        default_value_t = 10,
        env = "TRIAGE_TIMEOUT",
        help = "Request timeout in seconds"
    )]
    timeout: u64,

    #[clap(short, long, default_value_t = false, help = "Log requests to stderr")]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score tasks from a JSON file
    Analyze(AnalyzeArgs),
    /// Show the service's suggested tasks
    Suggest(SuggestArgs),
    /// Collect tasks interactively and rank them
    Session(SessionArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let client = ScoringClient::new(cli.server, Duration::from_secs(cli.timeout))?;

    let result = match cli.command {
        Command::Analyze(args) => analyze_command(args, client).await,
        Command::Suggest(args) => suggest_command(args, client).await,
        Command::Session(args) => session_command(args, client).await,
    };

    if let Err(error) = result {
        status::failure(format!("{error:#}"));
        process::exit(1);
    }

    Ok(())
}
