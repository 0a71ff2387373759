//! Best-effort health probe for the OpenAI endpoint.
//!
//! Probes `GET {endpoint}/v1/models` with bearer auth. [`check`] never
//! fails: any error is mapped into an `ok=false` snapshot, which makes the
//! result safe to serialize straight into a `/health` response.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, warn};

use crate::open_ai_service::OpenAiService;

/// A serializable health snapshot for one provider endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend name (always `"OpenAI"` here).
    pub provider: &'static str,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier of the probed profile.
    pub model: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable detail.
    pub message: String,
}

/// Probes the service endpoint and reports a snapshot.
///
/// Transport failures, non-2xx statuses, and timeouts all land in
/// `ok=false`; this function never returns an error.
pub async fn check(svc: &OpenAiService, timeout_secs: u64) -> HealthStatus {
    let url = format!("{}/v1/models", svc.endpoint().trim_end_matches('/'));
    let started = Instant::now();

    debug!(endpoint = %svc.endpoint(), "health probe: GET {url}");

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            return snapshot(svc, false, 0, format!("http client build failed: {e}"));
        }
    };

    let resp = client
        .get(&url)
        .header(header::AUTHORIZATION, format!("Bearer {}", svc.api_key()))
        .send()
        .await;

    let latency_ms = started.elapsed().as_millis();
    match resp {
        Ok(r) if r.status().is_success() => {
            snapshot(svc, true, latency_ms, "endpoint reachable".to_string())
        }
        Ok(r) => {
            warn!(status = %r.status(), %url, "health probe returned non-success status");
            snapshot(svc, false, latency_ms, format!("HTTP {}", r.status()))
        }
        Err(e) => {
            warn!(error = %e, %url, "health probe transport failure");
            snapshot(svc, false, latency_ms, e.to_string())
        }
    }
}

fn snapshot(svc: &OpenAiService, ok: bool, latency_ms: u128, message: String) -> HealthStatus {
    HealthStatus {
        provider: "OpenAI",
        endpoint: svc.endpoint().to_string(),
        model: svc.model().to_string(),
        ok,
        latency_ms,
        message,
    }
}
