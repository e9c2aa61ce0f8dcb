use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::POLL_INTERVAL;
use crate::error::WatchError;
use crate::notify::Notifier;
use crate::practicum::PracticumClient;
use crate::review;

/// Loop-local state threaded by `&mut` through every poll cycle.
#[derive(Debug)]
pub struct WatchState {
    /// Lower bound for the next from_date query, unix seconds. Only
    /// ever advances.
    cursor: i64,
    /// Text of the last successfully delivered notification. One slot
    /// shared by status messages and error texts.
    last_sent: Option<String>,
}

impl WatchState {
    /// Start tracking from the current moment.
    pub fn starting_now() -> Self {
        Self::at(chrono::Utc::now().timestamp())
    }

    fn at(cursor: i64) -> Self {
        Self {
            cursor,
            last_sent: None,
        }
    }
}

/// Send `candidate` unless it repeats the last delivered text. The
/// slot is updated only after the notifier accepts the message; a
/// failed delivery leaves it untouched.
async fn publish(
    notifier: &dyn Notifier,
    state: &mut WatchState,
    candidate: &str,
) -> Result<(), WatchError> {
    if state.last_sent.as_deref() == Some(candidate) {
        return Err(WatchError::Unchanged);
    }
    notifier.send(candidate).await?;
    state.last_sent = Some(candidate.to_string());
    Ok(())
}

/// Classify one cycle outcome and notify where the contract asks for
/// it. Nothing here escapes to the caller.
async fn dispatch(
    outcome: Result<String, WatchError>,
    notifier: &dyn Notifier,
    state: &mut WatchState,
) {
    let candidate = match outcome {
        Ok(message) => message,
        Err(e @ (WatchError::Upstream(_) | WatchError::Malformed(_))) => {
            error!("{}", e);
            e.to_string()
        }
        Err(WatchError::NothingToReport) => {
            info!("No submissions under review right now");
            return;
        }
        Err(WatchError::Notify(reason)) => {
            error!("Failed to deliver notification: {}", reason);
            return;
        }
        Err(WatchError::Unchanged) => {
            debug!("Status has not changed, nothing to send");
            return;
        }
        Err(WatchError::Other(e)) => {
            error!("Unexpected failure in the watch loop: {:?}", e);
            format!("Watcher failure: {:#}", e)
        }
    };

    match publish(notifier, state, &candidate).await {
        Ok(()) => info!("Notification delivered: \"{}\"", candidate),
        Err(WatchError::Unchanged) => {
            debug!("Suppressed duplicate notification: \"{}\"", candidate)
        }
        Err(WatchError::Notify(reason)) => {
            error!("Failed to deliver notification: {}", reason)
        }
        Err(e) => error!("Unexpected failure while notifying: {}", e),
    }
}

/// One fetch: newest submission rendered as a status line.
async fn fetch_status(client: &PracticumClient, from_date: i64) -> Result<String, WatchError> {
    let body = client.homework_statuses(from_date).await?;
    review::latest_status(&body)
}

/// Poll forever: fetch, classify, advance the cursor, sleep, repeat.
pub async fn run(
    client: &PracticumClient,
    notifier: &dyn Notifier,
    mut state: WatchState,
) -> Result<()> {
    loop {
        let outcome = fetch_status(client, state.cursor).await;
        dispatch(outcome, notifier, &mut state).await;
        state.cursor += POLL_INTERVAL.as_secs() as i64;
        sleep(POLL_INTERVAL).await;
    }
}
