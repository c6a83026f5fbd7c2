//! Client for the spreadsheet-backed athlete store.
//!
//! The store is a Google Apps Script web app. Every call is a POST whose body
//! is a JSON object with an `action` field, sent as `text/plain` so browsers
//! treat it as a simple request; the script parses the body itself.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::{Athlete, AthleteUpdate, NewAthlete};

use super::StoreError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// Apps Script cold starts plus photo uploads in a bulk save can be slow.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Maximum number of retries for rate-limited (429) requests.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
const INITIAL_BACKOFF_MS: u64 = 1000;

const PLAIN_TEXT_UTF8: &str = "text/plain;charset=utf-8";

/// Result envelope the script returns for write actions.
#[derive(Debug, Deserialize)]
struct StoreResponse {
    #[serde(default)]
    success: bool,
    count: Option<usize>,
    error: Option<String>,
}

impl StoreResponse {
    fn into_result(self) -> Result<Option<usize>, StoreError> {
        if self.success {
            Ok(self.count)
        } else {
            Err(StoreError::Rejected(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str(body).map_err(|e| {
        StoreError::InvalidResponse(format!("{}: {}", e, StoreError::truncate_body(body)))
    })
}

/// Decode the body of a `get` call.
///
/// A JSON array is the athlete list. An object is an error envelope from the
/// script; anything else is a protocol error rather than an empty roster.
pub(crate) fn parse_athlete_list(body: &str) -> Result<Vec<Athlete>, StoreError> {
    let value: Value = parse_json(body)?;
    match value {
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| StoreError::InvalidResponse(format!("Bad athlete row: {}", e))),
        Value::Object(_) => {
            let envelope: StoreResponse = serde_json::from_value(value)
                .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
            envelope.into_result()?;
            Err(StoreError::InvalidResponse(
                "Expected a list of athletes".to_string(),
            ))
        }
        other => Err(StoreError::InvalidResponse(format!(
            "Expected a list of athletes, got {}",
            StoreError::truncate_body(&other.to_string())
        ))),
    }
}

/// Store client. Clone is cheap - reqwest::Client uses Arc internally.
#[derive(Clone)]
pub struct StoreClient {
    client: Client,
    script_url: String,
}

impl StoreClient {
    /// Create a new client for the web app at `script_url`
    pub fn new(script_url: impl Into<String>) -> Result<Self, StoreError> {
        let script_url = script_url.into();
        if script_url.trim().is_empty() {
            return Err(StoreError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, script_url })
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    /// POST one action and return the raw response body, retrying on 429.
    async fn call(&self, payload: &Value) -> Result<String, StoreError> {
        let action = payload["action"].as_str().unwrap_or("?");
        let body = serde_json::to_string(payload)?;
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            debug!(action = action, bytes = body.len(), "Sending store request");
            let response = self
                .client
                .post(&self.script_url)
                .header(header::CONTENT_TYPE, PLAIN_TEXT_UTF8)
                .body(body.clone())
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.text().await?);
            }

            if status.as_u16() == 429 {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(StoreError::RateLimited);
                }
                warn!(action = action, retry = retries, backoff_ms = backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
                continue;
            }

            let text = response.text().await.unwrap_or_default();
            warn!(action = action, status = %status, "Store request failed");
            return Err(StoreError::from_status(status, &text));
        }
    }

    /// Fetch every registered athlete.
    pub async fn get_athletes(&self) -> Result<Vec<Athlete>, StoreError> {
        let body = self.call(&json!({ "action": "get" })).await?;
        let athletes = parse_athlete_list(&body)?;
        debug!(count = athletes.len(), "Fetched athletes");
        Ok(athletes)
    }

    /// Save a batch of new athletes; returns how many the store wrote.
    pub async fn save_athletes(&self, athletes: &[NewAthlete]) -> Result<usize, StoreError> {
        if athletes.is_empty() {
            return Ok(0);
        }
        let body = self
            .call(&json!({ "action": "save", "data": athletes }))
            .await?;
        let response: StoreResponse = parse_json(&body)?;
        let count = response.into_result()?.unwrap_or(athletes.len());
        debug!(count = count, "Saved athletes");
        Ok(count)
    }

    pub async fn update_athlete(&self, id: &str, update: &AthleteUpdate) -> Result<(), StoreError> {
        let body = self
            .call(&json!({ "action": "update", "id": id, "data": update }))
            .await?;
        let response: StoreResponse = parse_json(&body)?;
        response.into_result()?;
        debug!(id = id, "Updated athlete");
        Ok(())
    }

    pub async fn delete_athlete(&self, id: &str) -> Result<(), StoreError> {
        let body = self.call(&json!({ "action": "delete", "id": id })).await?;
        let response: StoreResponse = parse_json(&body)?;
        response.into_result()?;
        debug!(id = id, "Deleted athlete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_url() {
        assert!(matches!(StoreClient::new("  "), Err(StoreError::NotConfigured)));
        let client = StoreClient::new("https://script.example/exec").unwrap();
        assert_eq!(client.script_url(), "https://script.example/exec");
    }

    #[test]
    fn test_parse_athlete_list() {
        let body = r#"[{"id": "a1", "name": "สมชาย ใจดี", "sportType": "ตะกร้อ", "age": "12", "gender": "ชาย"},
                       {"id": 2, "name": "Jane Doe", "age": 10}]"#;
        let athletes = parse_athlete_list(body).unwrap();
        assert_eq!(athletes.len(), 2);
        assert_eq!(athletes[0].sport_type, "ตะกร้อ");
        assert_eq!(athletes[1].id, "2");
        assert_eq!(athletes[1].age, "10");
        assert_eq!(athletes[1].gender, "");
    }

    #[test]
    fn test_parse_athlete_list_error_envelope() {
        let err = parse_athlete_list(r#"{"success": false, "error": "Sheet not found"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(ref msg) if msg == "Sheet not found"));
    }

    #[test]
    fn test_parse_athlete_list_rejects_garbage() {
        assert!(matches!(
            parse_athlete_list("<html>Moved</html>"),
            Err(StoreError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_athlete_list("42"),
            Err(StoreError::InvalidResponse(_))
        ));
        assert!(parse_athlete_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_store_response_into_result() {
        let ok: StoreResponse = serde_json::from_str(r#"{"success": true, "count": 3}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), Some(3));

        let no_count: StoreResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(no_count.into_result().unwrap(), None);

        let failed: StoreResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(matches!(failed.into_result(), Err(StoreError::Rejected(ref m)) if m == "unknown error"));

        // A bare object without the flag counts as a failure
        let empty: StoreResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.into_result().is_err());
    }
}
