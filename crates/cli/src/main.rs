//! grobid-batch - submit a directory tree of PDFs to a GROBID server
//!
//! Walks the input directory, uploads every `.pdf` / `.PDF` file to the
//! remote service through a fixed-size worker pool, and writes each response
//! into the output directory as `{file}.tei.xml`.

mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use grobid_batch_core::application::{shutdown_channel, BatchRun, RunSummary};
use grobid_batch_core::domain::{GrobidService, RunConfig, DEFAULT_WORKER_COUNT};
use grobid_batch_infra_http::{Endpoint, GrobidClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "grobid-batch")]
#[command(about = "Batch-process a directory of PDFs through a GROBID server", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory tree to scan for .pdf / .PDF files
    input_dir: PathBuf,

    /// Directory receiving one {file}.tei.xml per processed input
    output_dir: PathBuf,

    /// Remote operation to invoke per file
    #[arg(short, long, value_enum, default_value = "full-text")]
    service: ServiceArg,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// GROBID server host
    #[arg(long, env = "GROBID_HOST", default_value = "localhost")]
    host: String,

    /// GROBID server port
    #[arg(long, env = "GROBID_PORT", default_value = "8070")]
    port: String,

    /// Per-upload deadline in seconds (no deadline when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// CLI-facing names for the closed set of remote operations
#[derive(Clone, Copy, ValueEnum)]
enum ServiceArg {
    /// Full text extraction over the whole document
    FullText,
}

impl From<ServiceArg> for GrobidService {
    fn from(arg: ServiceArg) -> Self {
        match arg {
            ServiceArg::FullText => GrobidService::FullTextDocument,
        }
    }
}

#[derive(Tabled)]
struct SummaryRow {
    submitted: usize,
    succeeded: usize,
    failed: usize,
    skipped: usize,
}

fn init_logging() {
    let log_format =
        std::env::var("GROBID_BATCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

fn report(summary: &RunSummary, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    if summary.failed == 0 {
        println!("{}", "✓ Batch run complete".green().bold());
    } else {
        println!(
            "{}",
            format!("⚠ Batch run complete, {} job(s) failed", summary.failed)
                .yellow()
                .bold()
        );
    }
    println!();

    let table = Table::new(vec![SummaryRow {
        submitted: summary.submitted,
        succeeded: summary.succeeded,
        failed: summary.failed,
        skipped: summary.skipped,
    }])
    .to_string();
    println!("{}", table);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    if let Err(e) = telemetry::init_telemetry() {
        tracing::warn!(error = ?e, "Failed to initialize OpenTelemetry (continuing without it)");
    }

    info!("grobid-batch v{} starting", VERSION);

    let endpoint = Endpoint::new(&cli.host, &cli.port);
    let timeout = cli.timeout_secs.map(Duration::from_secs);
    let client = GrobidClient::with_timeout(endpoint, timeout)
        .map_err(|e| anyhow::anyhow!("failed to build GROBID client: {e}"))?;

    let config = RunConfig::new(cli.input_dir, cli.output_dir, cli.service.into())
        .with_worker_count(cli.workers);
    let run = BatchRun::new(config, Arc::new(client));

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, finishing in-flight jobs");
            shutdown_tx.shutdown();
        }
    });

    let summary = run.execute(shutdown_rx).await.context("batch run failed")?;

    report(&summary, cli.json)?;

    Ok(())
}
