use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

use crate::sampler::Sample;
use crate::stats::Summary;

/// Persists the run artifacts: a structured summary document and a tabular
/// per-sample log. Serialization only; no aggregation happens here.
pub async fn write_outputs(samples: &[Sample], summary: &Summary, outdir: &Path) -> Result<()> {
    fs::create_dir_all(outdir)
        .await
        .with_context(|| format!("failed to create output directory {}", outdir.display()))?;

    let summary_path = outdir.join("load_summary.json");
    let summary_json =
        serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    fs::write(&summary_path, summary_json)
        .await
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    let samples_path = outdir.join("load_samples.csv");
    fs::write(&samples_path, render_samples_csv(samples))
        .await
        .with_context(|| format!("failed to write {}", samples_path.display()))?;

    Ok(())
}

fn render_samples_csv(samples: &[Sample]) -> String {
    let mut csv = String::from("ok,status,latency_ms,amount\n");
    for sample in samples {
        let _ = writeln!(
            csv,
            "{},{},{:.2},{}",
            u8::from(sample.ok),
            sample.status,
            sample.latency_ms,
            sample.amount
        );
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SampleStatus;

    #[test]
    fn csv_encodes_flag_status_and_latency() {
        let samples = vec![
            Sample {
                ok: true,
                status: SampleStatus::Http(200),
                latency_ms: 123.456,
                amount: 500.0,
                error: None,
            },
            Sample {
                ok: false,
                status: SampleStatus::Exception,
                latency_ms: 5000.0,
                amount: 42.0,
                error: Some("connection refused".to_string()),
            },
        ];

        let csv = render_samples_csv(&samples);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("ok,status,latency_ms,amount"));
        assert_eq!(lines.next(), Some("1,200,123.46,500"));
        assert_eq!(lines.next(), Some("0,EXC,5000.00,42"));
        assert_eq!(lines.next(), None);
    }
}
