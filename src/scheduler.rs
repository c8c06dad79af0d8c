use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::config::LoadConfig;
use crate::sampler::{sample_once, Sample};

const PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Dispatches calls at the configured rate until the wall-clock deadline,
/// then drains every in-flight call and returns one Sample per dispatch.
///
/// Pacing is anchored to an absolute cadence: the next dispatch time advances
/// by exactly one interval per call, and the loop sleeps only the residual,
/// so slow calls do not accumulate drift in the target rate. Concurrency is
/// bounded by a worker-pool semaphore; a saturated pool blocks the pacing
/// loop until a slot frees. Samples come back in completion order.
pub async fn run_load(config: LoadConfig) -> Result<Vec<Sample>> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("failed to construct HTTP client")?;

    let interval = config.dispatch_interval();
    let workers = Arc::new(Semaphore::new(config.max_workers));
    let config = Arc::new(config);
    let mut join_set = JoinSet::new();

    let start = Instant::now();
    let deadline = start + config.duration;
    let mut next_at = start;
    let mut next_progress = start + PROGRESS_INTERVAL;
    let mut dispatched: u64 = 0;

    while Instant::now() < deadline {
        let permit = Arc::clone(&workers)
            .acquire_owned()
            .await
            .context("worker pool closed")?;
        // The acquire can block across the deadline under saturation; no
        // call may go out after it.
        if Instant::now() >= deadline {
            break;
        }
        let client = client.clone();
        let config = Arc::clone(&config);
        join_set.spawn(async move {
            let sample = sample_once(&client, &config).await;
            drop(permit);
            sample
        });
        dispatched += 1;

        next_at += interval;
        sleep_until(next_at).await;

        if Instant::now() >= next_progress {
            info!(
                dispatched,
                elapsed_secs = start.elapsed().as_secs(),
                in_flight = join_set.len(),
                "load run in progress"
            );
            next_progress += PROGRESS_INTERVAL;
        }
    }

    debug!(dispatched, in_flight = join_set.len(), "deadline reached, draining");
    let mut samples = Vec::with_capacity(dispatched as usize);
    while let Some(joined) = join_set.join_next().await {
        samples.push(joined.context("sampler task panicked")?);
    }

    info!(
        dispatched,
        collected = samples.len(),
        elapsed_secs = start.elapsed().as_secs(),
        "load run complete"
    );
    Ok(samples)
}
