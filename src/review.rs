use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::error::WatchError;

/// Review statuses the API is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// Human-readable verdict sentence.
    pub fn verdict(self) -> &'static str {
        match self {
            ReviewStatus::Approved => "Reviewed: the reviewer liked everything.",
            ReviewStatus::Reviewing => "Taken up for review by a reviewer.",
            ReviewStatus::Rejected => "Reviewed: the reviewer has comments.",
        }
    }
}

/// One submission as reported by the API.
#[derive(Debug, Deserialize)]
pub struct Homework {
    pub homework_name: String,
    pub status: ReviewStatus,
}

/// Narrow a response body to its list of submission records, newest
/// first. An empty list is the benign "nothing new" signal.
pub fn submissions(body: &Value) -> Result<&[Value], WatchError> {
    let Some(object) = body.as_object() else {
        return Err(WatchError::Malformed(format!(
            "expected a JSON object, got: {}",
            body
        )));
    };
    let Some(homeworks) = object.get("homeworks") else {
        return Err(WatchError::Malformed(format!(
            "no \"homeworks\" key in response: {}",
            body
        )));
    };
    let Some(records) = homeworks.as_array() else {
        return Err(WatchError::Malformed(format!(
            "\"homeworks\" is not a list: {}",
            homeworks
        )));
    };
    if records.is_empty() {
        return Err(WatchError::NothingToReport);
    }
    Ok(records)
}

/// Render the notification text for one submission record.
pub fn render_status(record: &Value) -> Result<String, WatchError> {
    let homework: Homework = serde_json::from_value(record.clone())
        .map_err(|e| WatchError::Malformed(format!("bad submission record {}: {}", record, e)))?;

    Ok(format!(
        "Changed review status for \"{}\": {}",
        homework.homework_name,
        homework.status.verdict()
    ))
}

/// Status line for the newest submission in a response body.
pub fn latest_status(body: &Value) -> Result<String, WatchError> {
    let records = submissions(body)?;
    let newest = records.first().context("submission list is empty")?;
    render_status(newest)
}
