//! El País Christmas Lottery results client.
//!
//! Single HTTP GET endpoint, dispatched by query parameter:
//! - `?s=1` — drawing status (integer code 0–4)
//! - `?n=<num>` — prize for a ticket number (`premio`, euros, 0 = none)
//! - `?t=1` — Unix timestamp of the draw the results belong to
//!
//! The service has been observed to prefix the JSON body with extraneous
//! text, so responses go through [`extract_json`] before deserialization.
//! Auth: not required.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::DrawApi;
use crate::config::ApiConfig;
use crate::types::{DrawStatus, PrizeResult, TicketNumber};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const STATUS_QUERY: &str = "s=1";
const TIMESTAMP_QUERY: &str = "t=1";

// ---------------------------------------------------------------------------
// API response types (El País JSON → Rust)
// ---------------------------------------------------------------------------

/// Response to `?s=1`.
#[derive(Debug, Deserialize)]
struct StatusResponse {
    error: bool,
    #[serde(default)]
    status: Option<i64>,
}

/// Response to `?n=<num>`. The `premio` field has been served both as a
/// JSON number and as a numeric string, so it is decoded leniently.
#[derive(Debug, Deserialize)]
struct PrizeResponse {
    error: bool,
    #[serde(default)]
    premio: Option<serde_json::Value>,
}

/// Response to `?t=1`.
#[derive(Debug, Deserialize)]
struct TimestampResponse {
    error: bool,
    #[serde(default)]
    timestamp: Option<i64>,
}

// ---------------------------------------------------------------------------
// Body parsing
// ---------------------------------------------------------------------------

/// Extract the JSON object from a response body that may carry leading
/// non-JSON text. Takes everything from the first `{` onwards; returns
/// `None` if the body contains no object at all.
fn extract_json(body: &str) -> Option<&str> {
    body.find('{').map(|start| &body[start..])
}

/// Decode a `premio` value from either JSON form.
fn parse_premio(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the results service. The base URL is injected via
/// configuration so tests and mirrors can point elsewhere.
pub struct ElPaisClient {
    http: Client,
    base_url: String,
}

impl ElPaisClient {
    /// Create a new client from the API configuration.
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .user_agent("loteria/0.1.0")
            .build()
            .context("Failed to build HTTP client for results API")?;

        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }

    // -- Internal helpers ------------------------------------------------

    /// Issue a GET for the given query string and return the raw body.
    async fn get_body(&self, query: &str) -> Result<String> {
        let url = format!("{}?{}", self.base_url, query);

        debug!(url = %url, "Querying results API");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Results API request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Results API error {status}");
        }

        resp.text()
            .await
            .context("Failed to read results API response body")
    }

    /// Decode a `?s=1` body into a drawing status.
    fn decode_status(body: &str) -> Result<DrawStatus> {
        let json = extract_json(body).context("No JSON object in status response")?;
        let resp: StatusResponse =
            serde_json::from_str(json).context("Failed to parse status response")?;

        if resp.error {
            return Ok(DrawStatus::Error);
        }
        Ok(resp
            .status
            .map(DrawStatus::from_code)
            .unwrap_or(DrawStatus::Error))
    }

    /// Decode a `?n=<num>` body into a prize result.
    fn decode_prize(body: &str) -> Result<PrizeResult> {
        let json = extract_json(body).context("No JSON object in prize response")?;
        let resp: PrizeResponse =
            serde_json::from_str(json).context("Failed to parse prize response")?;

        if resp.error {
            return Ok(PrizeResult::Unknown);
        }
        Ok(resp
            .premio
            .as_ref()
            .and_then(parse_premio)
            .map(PrizeResult::Amount)
            .unwrap_or(PrizeResult::Unknown))
    }

    /// Decode a `?t=1` body into the draw date (UTC).
    fn decode_timestamp(body: &str) -> Result<Option<NaiveDate>> {
        let json = extract_json(body).context("No JSON object in timestamp response")?;
        let resp: TimestampResponse =
            serde_json::from_str(json).context("Failed to parse timestamp response")?;

        if resp.error {
            return Ok(None);
        }
        Ok(resp
            .timestamp
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.date_naive()))
    }
}

// ---------------------------------------------------------------------------
// DrawApi trait implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl DrawApi for ElPaisClient {
    async fn fetch_status(&self) -> DrawStatus {
        let result = self
            .get_body(STATUS_QUERY)
            .await
            .and_then(|body| Self::decode_status(&body));

        match result {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Status query failed");
                DrawStatus::Error
            }
        }
    }

    async fn fetch_prize(&self, number: TicketNumber) -> PrizeResult {
        let result = self
            .get_body(&format!("n={}", number.0))
            .await
            .and_then(|body| Self::decode_prize(&body));

        match result {
            Ok(prize) => prize,
            Err(e) => {
                warn!(number = %number, error = %e, "Prize query failed");
                PrizeResult::Unknown
            }
        }
    }

    async fn fetch_draw_date(&self) -> Option<NaiveDate> {
        let result = self
            .get_body(TIMESTAMP_QUERY)
            .await
            .and_then(|body| Self::decode_timestamp(&body));

        match result {
            Ok(date) => date,
            Err(e) => {
                warn!(error = %e, "Timestamp query failed");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
