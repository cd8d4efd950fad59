use std::path::Path;

use common::Result;
use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter,
    IntCounterVec, IntGauge, TextEncoder,
};

pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "repo_export_requests_total",
        "GitHub REST requests grouped by endpoint and outcome",
        &["endpoint", "outcome"]
    )
    .expect("repo export requests total")
});

pub static ITEMS_VISITED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "repo_export_items_visited_total",
        "Items pulled from paginated listings per pipeline",
        &["pipeline"]
    )
    .expect("repo export items visited")
});

pub static RECORDS_EMITTED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "repo_export_records_emitted_total",
        "Normalized records produced per pipeline",
        &["pipeline"]
    )
    .expect("repo export records emitted")
});

pub static PULL_REQUESTS_SKIPPED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "repo_export_pull_requests_skipped_total",
        "Issue listing items skipped because they are pull requests"
    )
    .expect("repo export pull requests skipped")
});

pub static RATE_LIMIT_REMAINING: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "repo_export_rate_limit_remaining",
        "Remaining core API budget reported by the most recent response"
    )
    .expect("repo export rate limit remaining")
});

pub fn record_request(endpoint: &str, outcome: &str) {
    REQUESTS_TOTAL
        .with_label_values(&[endpoint, outcome])
        .inc();
}

/// Text exposition of the default registry.
pub fn render() -> Result<String> {
    let mut buf = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buf)
        .map_err(anyhow::Error::from)?;
    String::from_utf8(buf).map_err(|err| anyhow::Error::from(err).into())
}

/// Writes the registry in the node-exporter textfile format. The file is
/// replaced atomically so a scraper never reads a partial write.
pub fn write_textfile(path: &Path) -> Result<()> {
    let body = render()?;
    let tmp = path.with_extension("prom.tmp");
    std::fs::write(&tmp, body)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
