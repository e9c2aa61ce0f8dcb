use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

use crate::error::WatchError;

/// Telegram caps messages at 4096 chars; stay under it with headroom.
const MAX_MESSAGE_LEN: usize = 4000;

/// Outbound message channel. A trait so the watch loop can be driven
/// against a recording fake in tests.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), WatchError>;
}

/// Sends through a Telegram bot to one fixed recipient.
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, recipient: Recipient) -> Self {
        Self {
            bot: Bot::new(token),
            recipient,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), WatchError> {
        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            debug!("Sending {} chars to Telegram", chunk.len());
            self.bot
                .send_message(self.recipient.clone(), chunk)
                .await
                .map_err(|e| WatchError::Notify(e.to_string()))?;
        }
        Ok(())
    }
}

/// Split long messages for Telegram's size limit, preferring newline
/// or space breaks and never cutting inside a UTF-8 char.
fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        let actual_end = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .or_else(|| text[start..end].rfind(' '))
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(text[start..actual_end].to_string());
        start = actual_end;
    }

    chunks
}
