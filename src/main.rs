//! Daftar main entry point

use anyhow::Context;
use clap::Parser;
use daftar_api::{start_server, AppState};
use daftar_config::error::ConfigErrorCode;
use daftar_config::Config;
use daftar_core::{InMemoryStore, ReportEngine, ReportSettings, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "daftar")]
#[command(version = "0.1.0")]
#[command(about = "Personal finance ledger with Jalali calendar reports", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(e) if e.code() == ConfigErrorCode::FileNotFound => (Config::default(), true),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to load configuration from {}", args.config.display())));
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();
    if missing {
        log::warn!("Config file not found: {}, using defaults", args.config.display());
    }

    let rt = Runtime::new().context("Failed to start the async runtime")?;
    rt.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    let ledger_path = config.ledger_path();
    log::info!("Looking for ledger file: {}", ledger_path.display());

    let store = if ledger_path.exists() {
        InMemoryStore::load(&ledger_path)
            .await
            .with_context(|| format!("Failed to load ledger {}", ledger_path.display()))?
    } else {
        log::warn!("Ledger file not found: {}, starting empty", ledger_path.display());
        InMemoryStore::new()
    };

    let engine = ReportEngine::new(Arc::new(store), ReportSettings::from_config(&config));
    let balances = engine.account_balances().await?;
    let total = balances.iter().try_fold(0i64, |total, view| {
        daftar_core::checked_add(total, view.balance, "total balance")
    })?;
    log::info!(
        "{} accounts, total balance {}",
        balances.len(),
        daftar_utils::format_number(total)
    );

    let state = AppState {
        engine: Arc::new(engine),
        clock: Arc::new(SystemClock),
        config,
    };
    start_server(state).await.context("Server error")
}
