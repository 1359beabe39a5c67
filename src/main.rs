//! Cashweb main entry point

use anyhow::Context;
use cashweb_api::start_server;
use cashweb_config::error::ConfigErrorSeverity;
use cashweb_config::Config;
use cashweb_core::Book;
use cashweb_store::JsonFileStore;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "cashweb")]
#[command(author = "Cashweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight income and expense reporting web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // Logging level comes from the config, so the load outcome is reported afterwards
    let (config, load_warning) = match Config::load(&args.config) {
        Ok(config) => (config, None),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => (Config::default(), Some(e)),
        Err(e) => anyhow::bail!("Failed to load configuration from {}: {}", args.config.display(), e.to_details()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    match load_warning {
        Some(e) => log::warn!("Using default configuration: {}", e.to_details()),
        None => log::info!("Config loaded from {}", args.config.display()),
    }

    let rt = Runtime::new().context("Failed to start the async runtime")?;

    rt.block_on(async {
        let transactions_path = config.transactions_path();
        let debts_path = config.debts_path();
        log::info!(
            "Reading collections: transactions={}, debts={}",
            transactions_path.display(),
            debts_path.display()
        );

        let store = Arc::new(JsonFileStore::new(transactions_path, debts_path));
        let book = Arc::new(RwLock::new(Book::new(store)));

        if let Err(e) = book.write().await.load().await {
            log::error!("Failed to load collections: {}", e);
        }

        start_server(config, book).await.context("Server error")
    })
}
