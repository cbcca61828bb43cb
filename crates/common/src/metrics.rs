use once_cell::sync::Lazy;
use prometheus::{register_histogram, register_int_counter, Encoder, Histogram, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static UPSTREAM_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "playfolio_admin_upstream_requests_total",
        "Total requests forwarded to the Playfolio API"
    )
    .expect("register upstream_requests_total")
});

pub static UPSTREAM_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "playfolio_admin_upstream_errors_total",
        "Upstream calls that failed or answered non-2xx"
    )
    .expect("register upstream_errors_total")
});

pub static UPSTREAM_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "playfolio_admin_upstream_duration_seconds",
        "Upstream call duration in seconds",
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register upstream_duration")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_text_output() {
        UPSTREAM_REQUESTS_TOTAL.inc();
        UPSTREAM_DURATION.observe(0.02);
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("playfolio_admin_upstream_requests_total"));
        assert!(body.contains("playfolio_admin_upstream_duration_seconds_bucket"));
    }
}
