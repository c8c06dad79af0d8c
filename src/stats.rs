use serde::Serialize;

use crate::sampler::Sample;

/// Latency statistics in milliseconds over every sample, failed calls
/// included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyStats {
    pub avg: f64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Aggregate over one finished run. Derived data: a pure function of the
/// sample collection, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub error_rate: f64,
    pub latency_ms: LatencyStats,
}

/// Reduces a sample collection into a Summary.
///
/// Treats the collection as an unordered multiset; an empty collection yields
/// an all-zero Summary rather than a division fault.
pub fn summarize(samples: &[Sample]) -> Summary {
    let total = samples.len() as u64;
    let success = samples.iter().filter(|sample| sample.ok).count() as u64;
    let failed = total - success;
    let error_rate = if total > 0 {
        failed as f64 / total as f64
    } else {
        0.0
    };

    let mut latencies: Vec<f64> = samples.iter().map(|sample| sample.latency_ms).collect();
    latencies.sort_by(f64::total_cmp);
    let avg = if latencies.is_empty() {
        0.0
    } else {
        latencies.iter().sum::<f64>() / latencies.len() as f64
    };

    Summary {
        total,
        success,
        failed,
        error_rate,
        latency_ms: LatencyStats {
            avg,
            p50: percentile(&latencies, 0.50),
            p90: percentile(&latencies, 0.90),
            p95: percentile(&latencies, 0.95),
            p99: percentile(&latencies, 0.99),
        },
    }
}

/// Percentile by linear interpolation on the sorted sequence.
///
/// For quantile `p`, rank `k = p * (n - 1)` falls between neighbors `f` and
/// `c = min(f + 1, n - 1)`; the result interpolates between them, with the
/// upper index clamped at the last element. Dashboards depend on this exact
/// numeric behavior; do not swap in another percentile definition.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let k = (sorted.len() - 1) as f64 * p;
    let f = k.floor() as usize;
    let c = (f + 1).min(sorted.len() - 1);
    if f == c {
        return sorted[f];
    }
    sorted[f] * (c as f64 - k) + sorted[c] * (k - f as f64)
}
