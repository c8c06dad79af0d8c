use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use txload::{run_load, summarize, write_outputs, LoadConfig};

#[derive(Parser, Debug)]
#[command(
    name = "txload",
    about = "Closed-loop load generator for the transaction service"
)]
struct Args {
    /// Base URL of the target service
    #[arg(long, default_value = "http://localhost:5000")]
    base_url: String,

    /// Target requests per second
    #[arg(long, default_value_t = 12.0)]
    rps: f64,

    /// Run duration in seconds
    #[arg(long, default_value_t = 180)]
    duration: u64,

    /// Maximum concurrent workers
    #[arg(long, default_value_t = 30)]
    workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    timeout_secs: f64,

    /// Directory for the summary and per-sample artifacts
    #[arg(long, default_value = "load_output")]
    outdir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = LoadConfig::try_new(
        &args.base_url,
        args.rps,
        Duration::from_secs(args.duration),
        args.workers,
    )?
    .with_request_timeout_secs(args.timeout_secs)?;

    info!(
        target = %config.base_url,
        rps = config.rps,
        duration_secs = args.duration,
        workers = config.max_workers,
        "starting load run"
    );

    let samples = run_load(config).await?;
    let summary = summarize(&samples);
    write_outputs(&samples, &summary, &args.outdir).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
