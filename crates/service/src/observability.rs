use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static QUOTES_TOTAL: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("quote_api_quotes_total", "Quotes currently held in memory")
        .expect("register quotes_total")
});

pub static QUOTES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("quote_api_quotes_created_total", "Quotes appended via the API")
        .expect("register quotes_created_total")
});

pub static RELOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("quote_api_reloads_total", "Successful reloads from the data file")
        .expect("register reloads_total")
});

pub static RELOAD_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("quote_api_reload_failures_total", "Failed reloads from the data file")
        .expect("register reload_failures_total")
});

pub static SAVE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("quote_api_save_failures_total", "Failed saves after an append")
        .expect("register save_failures_total")
});

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
