//! Wallet Ledger main entry point

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;
use wallet_ledger_api::start_server;
use wallet_ledger_config::{Config, ConfigError};
use wallet_ledger_core::Ledger;
use wallet_ledger_source::{FileSource, SourceRef, StaticSource, TransactionSourceTrait};

#[derive(Parser, Debug)]
#[command(name = "wallet-ledger")]
#[command(version = "0.1.0")]
#[command(about = "Searchable, sortable transaction ledger with summary totals", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn build_source(config: &Config) -> SourceRef {
    match config.data_path() {
        Some(path) if !path.exists() => {
            log::warn!(
                "Data path {} does not exist, serving the built-in sample",
                path.display()
            );
            Arc::new(StaticSource::sample())
        }
        Some(path) => Arc::new(
            FileSource::new(path)
                .with_pattern(config.data.pattern.clone())
                .with_retry(
                    config.data.load_retries,
                    Duration::from_millis(config.data.retry_delay_ms),
                ),
        ),
        None => Arc::new(StaticSource::sample()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, missing) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => return Err(e.into()),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if missing {
        log::warn!(
            "Config file {} not found, using defaults",
            args.config.display()
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = build_source(&config);
        log::info!("Transaction source: {}", source.describe());

        let ledger = Arc::new(RwLock::new(Ledger::new(config.clone(), source)));
        {
            let mut guard = ledger.write().await;
            if let Err(e) = guard.load().await {
                // Served as NOT_LOADED until POST /api/reload succeeds
                log::error!("Failed to load transactions: {}", e);
            }
        }

        start_server(config, ledger).await
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_data_path_uses_sample() {
        let source = build_source(&Config::default());
        assert_eq!(source.describe(), "built-in sample (9 records)");
    }

    #[test]
    fn test_missing_data_path_falls_back_to_sample() {
        let mut config = Config::default();
        config.data.path = PathBuf::from("/no/such/wallet/data");
        let source = build_source(&config);
        assert_eq!(source.describe(), "built-in sample (9 records)");
    }

    #[test]
    fn test_existing_data_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.data.path = dir.path().to_path_buf();
        let source = build_source(&config);
        assert_eq!(
            source.describe(),
            format!("{} (*.json)", dir.path().display())
        );
    }
}
