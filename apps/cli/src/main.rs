use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quote_client::{FetcherConfig, QuoteFetcher, TcpProbe};
use storage::QuoteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod share;

use config::{load_settings, APP_NAME};
use controller::display::DisplayController;
use controller::saved_list::SavedListController;
use share::StdoutShare;

#[derive(Parser, Debug)]
#[command(name = "winquote", about = "Fetch, save, and share quotes from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a fresh random quote and display it
    Fetch {
        /// Save the fetched quote to the local collection
        #[arg(long)]
        save: bool,
        /// Share the fetched quote
        #[arg(long)]
        share: bool,
    },
    /// Operate on the saved quote collection
    Saved {
        #[command(subcommand)]
        command: SavedCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
    /// List saved quotes with their indices
    List,
    /// Delete the saved quote at INDEX (as printed by `saved list`)
    Delete { index: usize },
    /// Share the saved quote at INDEX
    Share { index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings();
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { save, share } => run_fetch(&settings, save, share).await,
        Command::Saved { command } => run_saved(&settings, command),
    }
}

async fn run_fetch(settings: &config::Settings, save: bool, share: bool) -> Result<()> {
    let connectivity = TcpProbe::new(settings.probe_addr.clone(), settings.probe_timeout());
    let fetcher = QuoteFetcher::new(
        FetcherConfig {
            api_url: settings.api_url.clone(),
            user_agent: settings.user_agent.clone(),
            request_timeout: settings.request_timeout(),
            retry_attempts: settings.retry_attempts,
        },
        Box::new(connectivity),
    )
    .context("failed to build quote fetcher")?;

    let mut display = DisplayController::new(APP_NAME);
    let Some(event) = display.run_fetch(&fetcher).await else {
        bail!("a fetch is already in flight");
    };

    println!("{}", event.message());
    if event.is_failure() {
        bail!("quote fetch failed");
    }

    if save {
        let mut store = QuoteStore::open(&settings.store_path)
            .with_context(|| format!("failed to open store at '{}'", settings.store_path))?;
        let event = display.save(&mut store);
        println!("{}", event.message());
        if event.is_failure() {
            bail!("quote save failed");
        }
    }

    if share {
        let event = display.share(&StdoutShare);
        if event.is_failure() {
            println!("{}", event.message());
            bail!("quote share failed");
        }
    }

    Ok(())
}

fn run_saved(settings: &config::Settings, command: SavedCommand) -> Result<()> {
    let mut store = QuoteStore::open(&settings.store_path)
        .with_context(|| format!("failed to open store at '{}'", settings.store_path))?;
    let mut list = SavedListController::new();
    list.refresh(&store);

    match command {
        SavedCommand::List => {
            if list.quotes().is_empty() {
                println!("No saved quotes yet.");
                return Ok(());
            }
            for (index, quote) in list.quotes().iter().enumerate() {
                println!("[{index}] \"{}\" - {}", quote.text, quote.author);
            }
            Ok(())
        }
        SavedCommand::Delete { index } => {
            list.delete(index, &mut store)?;
            info!(index, remaining = list.quotes().len(), "saved quote deleted");
            println!("Deleted. {} quote(s) remaining.", list.quotes().len());
            Ok(())
        }
        SavedCommand::Share { index } => {
            list.share(index, APP_NAME, &StdoutShare)?;
            Ok(())
        }
    }
}
