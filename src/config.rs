use std::time::Duration;

use anyhow::{bail, Context, Result};
use teloxide::types::{ChatId, Recipient};

/// Endpoint of the homework review status API.
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between poll cycles.
pub const POLL_INTERVAL: Duration = Duration::from_secs(600);

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Credentials read once at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub recipient: Recipient,
}

impl Config {
    /// Read the three required variables from the process environment.
    /// Fails listing every variable that is absent or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let chat_id = read(TELEGRAM_CHAT_ID);

        let missing: Vec<&str> = [
            (PRACTICUM_TOKEN, practicum_token.is_none()),
            (TELEGRAM_TOKEN, telegram_token.is_none()),
            (TELEGRAM_CHAT_ID, chat_id.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect();

        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (practicum_token, telegram_token, chat_id)
        else {
            bail!(
                "required environment variables are not set: {}",
                missing.join(", ")
            );
        };

        let recipient = parse_recipient(&chat_id)
            .with_context(|| format!("invalid {}: {:?}", TELEGRAM_CHAT_ID, chat_id))?;

        Ok(Self {
            practicum_token,
            telegram_token,
            recipient,
        })
    }
}

/// `@handle` addresses a channel by username; anything else must be a
/// numeric chat id.
fn parse_recipient(raw: &str) -> Result<Recipient> {
    let raw = raw.trim();
    if raw.starts_with('@') {
        return Ok(Recipient::ChannelUsername(raw.to_string()));
    }
    let id: i64 = raw
        .parse()
        .context("chat id is neither numeric nor an @username")?;
    Ok(Recipient::Id(ChatId(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(key: &str) -> Option<String> {
        match key {
            "PRACTICUM_TOKEN" => Some("practicum-secret".to_string()),
            "TELEGRAM_TOKEN" => Some("123:bot-secret".to_string()),
            "TELEGRAM_CHAT_ID" => Some("424242".to_string()),
            _ => None,
        }
    }

    #[test]
    fn loads_when_all_variables_present() {
        let config = Config::from_lookup(full_env).unwrap();
        assert_eq!(config.practicum_token, "practicum-secret");
        assert_eq!(config.telegram_token, "123:bot-secret");
        assert_eq!(config.recipient, Recipient::Id(ChatId(424242)));
    }

    #[test]
    fn fails_naming_the_missing_variable() {
        let err = Config::from_lookup(|key| full_env(key).filter(|_| key != "TELEGRAM_TOKEN"))
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("TELEGRAM_TOKEN"));
        assert!(!text.contains("PRACTICUM_TOKEN"));
    }

    #[test]
    fn fails_naming_all_missing_variables() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("PRACTICUM_TOKEN"));
        assert!(text.contains("TELEGRAM_TOKEN"));
        assert!(text.contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = Config::from_lookup(|key| {
            if key == "PRACTICUM_TOKEN" {
                Some("   ".to_string())
            } else {
                full_env(key)
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("PRACTICUM_TOKEN"));
    }

    #[test]
    fn channel_username_recipient() {
        let recipient = parse_recipient("@homework_alerts").unwrap();
        assert_eq!(
            recipient,
            Recipient::ChannelUsername("@homework_alerts".to_string())
        );
    }

    #[test]
    fn non_numeric_chat_id_is_rejected() {
        let err = Config::from_lookup(|key| {
            if key == "TELEGRAM_CHAT_ID" {
                Some("not-a-chat".to_string())
            } else {
                full_env(key)
            }
        })
        .unwrap_err();
        assert!(format!("{:#}", err).contains("TELEGRAM_CHAT_ID"));
    }
}
