use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Url;

/// Validated configuration for a single load run.
///
/// Invalid values (non-positive rate, zero duration, empty worker pool) are
/// rejected here, before the scheduler starts, rather than discovered mid-run.
#[derive(Clone, Debug)]
pub struct LoadConfig {
    pub base_url: Url,
    pub rps: f64,
    pub duration: Duration,
    pub max_workers: usize,
    pub request_timeout: Duration,
    pub amount_range: RangeInclusive<u32>,
}

impl LoadConfig {
    pub fn try_new(
        base_url: impl AsRef<str>,
        rps: f64,
        duration: Duration,
        max_workers: usize,
    ) -> Result<Self> {
        if !rps.is_finite() || rps <= 0.0 {
            return Err(anyhow!("rps must be a positive number, got {}", rps));
        }
        if duration.is_zero() {
            return Err(anyhow!("duration must be greater than zero"));
        }
        if max_workers == 0 {
            return Err(anyhow!("max_workers must be greater than zero"));
        }

        let base_url = Url::parse(base_url.as_ref())
            .with_context(|| format!("invalid base URL: {}", base_url.as_ref()))?;

        Ok(Self {
            base_url,
            rps,
            duration,
            max_workers,
            request_timeout: Duration::from_secs_f64(5.0),
            amount_range: 1..=1000,
        })
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        if !request_timeout.is_zero() {
            self.request_timeout = request_timeout;
        }
        self
    }

    /// Fallible variant for externally supplied timeouts: rejects negative,
    /// zero, and non-finite values instead of panicking in the Duration
    /// conversion.
    pub fn with_request_timeout_secs(self, timeout_secs: f64) -> Result<Self> {
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(anyhow!(
                "timeout must be a positive number of seconds, got {}",
                timeout_secs
            ));
        }
        Ok(self.with_request_timeout(Duration::from_secs_f64(timeout_secs)))
    }

    pub fn with_amount_range(mut self, amount_range: RangeInclusive<u32>) -> Result<Self> {
        if amount_range.is_empty() {
            return Err(anyhow!(
                "amount range must be non-empty, got {}..={}",
                amount_range.start(),
                amount_range.end()
            ));
        }
        self.amount_range = amount_range;
        Ok(self)
    }

    /// Interval between two dispatches at the target rate.
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rps)
    }

    /// Full URL of the transaction endpoint.
    pub fn transaction_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/transaction", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }
}
