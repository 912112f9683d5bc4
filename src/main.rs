//! # Schemebot
//!
//! Hybrid chatbot for government welfare schemes: rule-based intents,
//! SQLite FTS5 full-text search, and keyword-overlap fallback.
//!
//! Usage:
//!   schemebot seed                     # Load schemes + intents into the store
//!   schemebot chat                     # Interactive chat on stdin
//!   schemebot serve                    # Run the HTTP gateway

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use schemebot_chat::Chatbot;
use schemebot_core::config::SchemebotConfig;
use schemebot_store::{SqliteSchemeStore, seed};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "schemebot",
    version,
    about = "🏛️ Schemebot — government scheme chatbot"
)]
struct Cli {
    /// Path to config file (defaults to ~/.schemebot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load scheme and intent data files into the store
    Seed {
        /// Schemes JSON file (defaults to the configured data path)
        #[arg(long)]
        schemes: Option<PathBuf>,
        /// Intents JSON file (defaults to the configured data path)
        #[arg(long)]
        intents: Option<PathBuf>,
    },
    /// Interactive chat on stdin
    Chat,
    /// Run the HTTP gateway
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "schemebot=debug,schemebot_chat=debug,schemebot_store=debug,tower_http=debug"
    } else {
        "schemebot=info,schemebot_store=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => SchemebotConfig::load_from(path)?,
        None => SchemebotConfig::load()?,
    };
    let store = SqliteSchemeStore::open(Path::new(&config.store.db_path))?;

    match cli.command {
        Command::Seed { schemes, intents } => {
            let schemes = schemes.unwrap_or_else(|| PathBuf::from(&config.data.schemes_file));
            let intents = intents.unwrap_or_else(|| PathBuf::from(&config.data.intents_file));
            let (n_schemes, n_intents) = seed::seed_from_files(&store, &schemes, &intents)?;
            println!("Seeded {n_schemes} schemes and {n_intents} intents.");
        }
        Command::Chat => {
            seed::warn_if_empty(&store);
            let chatbot = Chatbot::new(Arc::new(store));
            run_repl(&chatbot)?;
        }
        Command::Serve => {
            seed::warn_if_empty(&store);
            let chatbot = Arc::new(Chatbot::new(Arc::new(store)));
            schemebot_gateway::serve(&config.gateway, chatbot).await?;
        }
    }

    Ok(())
}

fn run_repl(chatbot: &Chatbot) -> Result<()> {
    println!("Ask me about government schemes (type 'exit' to quit).");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        println!("{}\n", chatbot.get_response(line));
    }
    Ok(())
}
