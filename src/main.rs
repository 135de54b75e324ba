use ca_intake::application::channel::EventChannel;
use ca_intake::application::gateway::{SubmissionGateway, SubmitResponse};
use ca_intake::application::processor::SubmissionProcessor;
use ca_intake::config::IntakeConfig;
use ca_intake::crypto::Cipher;
use ca_intake::domain::ports::RecordStoreBox;
use ca_intake::infrastructure::in_memory::InMemoryRecordStore;
#[cfg(feature = "storage-rocksdb")]
use ca_intake::infrastructure::rocksdb::RocksDbRecordStore;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file with one JSON submission per line.
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Delay between publish and delivery, in milliseconds.
    #[arg(long)]
    delivery_delay_ms: Option<u64>,
}

/// The processor owns one handle, the summary at the end uses the other.
fn open_stores(cli: &Cli) -> Result<(RecordStoreBox, RecordStoreBox)> {
    #[cfg(feature = "storage-rocksdb")]
    {
        if let Some(db_path) = &cli.db_path {
            let store = RocksDbRecordStore::open(db_path).into_diagnostic()?;
            return Ok((Box::new(store.clone()), Box::new(store)));
        }
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    {
        if cli.db_path.is_some() {
            tracing::warn!("--db-path ignored; rebuild with --features storage-rocksdb");
        }
    }

    let store = InMemoryRecordStore::new();
    Ok((Box::new(store.clone()), Box::new(store)))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ca_intake=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = IntakeConfig::from_env();
    if let Some(ms) = cli.delivery_delay_ms {
        config.delivery_delay = Duration::from_millis(ms);
    }

    let (store, summary_store) = open_stores(&cli)?;
    let cipher = Cipher::new(config.encryption_key.clone());
    let processor = Arc::new(SubmissionProcessor::new(store, cipher));
    let channel = EventChannel::new(processor, config.delivery_delay);
    let gateway = SubmissionGateway::new(channel);

    let file = File::open(&cli.input).into_diagnostic()?;
    for line in BufReader::new(file).lines() {
        let line = line.into_diagnostic()?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<serde_json::Value>(&line) {
            Ok(value) => gateway.submit(value).await,
            Err(e) => SubmitResponse::failed(format!("invalid JSON: {e}")),
        };
        println!("{}", serde_json::to_string(&response).into_diagnostic()?);
    }

    // Drain in-flight deliveries before reporting.
    gateway.quiesce().await;

    let stored = summary_store.count().await.into_diagnostic()?;
    println!("records stored: {stored}");

    Ok(())
}
