//! Client-side metrics.
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op. Query cache counters live in `unirecords-cache`.

use std::time::Duration;

use metrics::{counter, histogram};

/// Records one completed backend request.
pub fn track_api_request(method: &str, status: u16, latency: Duration) {
    let status_category = match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    };

    counter!("api_requests_total", "method" => method.to_string(), "status" => status_category)
        .increment(1);
    histogram!("api_request_duration_seconds", "method" => method.to_string())
        .record(latency.as_secs_f64());
}

/// Records the outcome of a dashboard mutation or server action.
pub fn track_mutation(resource: &'static str, operation: &'static str, success: bool) {
    let status = if success { "success" } else { "error" };
    counter!(
        "mutations_total",
        "resource" => resource,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
}
