use std::fmt;

use rand::Rng;
use reqwest::Client;
use serde_json::json;
use tokio::time::Instant;

use crate::config::LoadConfig;

/// Raw outcome indicator of one call: the HTTP status when the call
/// completed, or the exception sentinel when it never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStatus {
    Http(u16),
    Exception,
}

impl fmt::Display for SampleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleStatus::Http(code) => write!(f, "{}", code),
            SampleStatus::Exception => write!(f, "EXC"),
        }
    }
}

/// One observed call outcome. Created once per dispatched call and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub ok: bool,
    pub status: SampleStatus,
    pub latency_ms: f64,
    pub amount: f64,
    pub error: Option<String>,
}

/// Issues exactly one timed POST to the transaction endpoint.
///
/// Always returns a Sample: a transport failure (timeout, refused connection,
/// DNS error) becomes a failed Sample carrying the error text, never a fault
/// that aborts the run. The latency timer wraps the full round trip, timeout
/// expiry included. No retries; retry policy is not this function's concern.
pub(crate) async fn sample_once(client: &Client, config: &LoadConfig) -> Sample {
    let amount = f64::from(rand::thread_rng().gen_range(config.amount_range.clone()));
    let url = config.transaction_url();

    let start = Instant::now();
    let outcome = client.post(url).json(&json!({ "amount": amount })).send().await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok(response) => {
            let code = response.status().as_u16();
            Sample {
                ok: code == 200,
                status: SampleStatus::Http(code),
                latency_ms,
                amount,
                error: None,
            }
        }
        Err(err) => Sample {
            ok: false,
            status: SampleStatus::Exception,
            latency_ms,
            amount,
            error: Some(err.to_string()),
        },
    }
}
