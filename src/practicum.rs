use serde_json::Value;
use tracing::debug;

use crate::config::ENDPOINT;
use crate::error::WatchError;

/// Thin client for the homework review status API.
pub struct PracticumClient {
    http: reqwest::Client,
    token: String,
    endpoint: String,
}

impl PracticumClient {
    pub fn new(token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            endpoint: ENDPOINT.to_string(),
        }
    }

    /// Fetch statuses for submissions updated since `from_date` (unix
    /// seconds). Returns the parsed JSON body of a 200 answer; the
    /// shape is checked later by the validator.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value, WatchError> {
        debug!("Requesting homework statuses, from_date={}", from_date);

        let response = self
            .http
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| WatchError::Upstream(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WatchError::Upstream(format!(
                "unexpected HTTP status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WatchError::Malformed(format!("body is not valid JSON: {}", e)))
    }
}
