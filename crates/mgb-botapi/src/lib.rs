//! Telegram Bot API adapter for game methods.
//!
//! Calls `sendGame`, `getGameHighScores` and `setGameScore` directly over
//! HTTP so Telegram's `error_code` / `description` can be relayed verbatim to
//! the game client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize};

use mgb_core::{
    config::Config,
    domain::{ChatId, MessageId, MessageRef, ScoreTarget},
    errors::Error,
    ports::GameApi,
    Result,
};

/// Body used when Telegram returns no high score entries at all.
pub const NO_HIGH_SCORE: &str = "no high score available";

#[derive(Clone)]
pub struct BotApiClient {
    /// `{api}/bot{token}`; contains the bot token, never log it.
    base: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for BotApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotApiClient").finish_non_exhaustive()
    }
}

/// Telegram's response envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HighScoreEntry {
    score: i64,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i32,
    chat: SentChat,
}

#[derive(Debug, Deserialize)]
struct SentChat {
    id: i64,
}

impl BotApiClient {
    pub fn new(api_url: &Url, bot_token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::External(format!("http client build failed: {e}")))?;

        Ok(Self {
            base: format!("{}/bot{bot_token}", api_url.as_str().trim_end_matches('/')),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            &cfg.telegram_api_url,
            &cfg.telegram_bot_token,
            cfg.upstream_timeout,
        )
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(format!("{}/{method}", self.base))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the request URL, which contains the bot token.
                let e = e.without_url();
                tracing::warn!(method, "telegram request failed: {e}");
                Error::Transport(format!("{method}: {e}"))
            })?;

        let status = resp.status();
        let envelope: Envelope<T> = resp.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(method, %status, "unreadable telegram response: {e}");
            Error::Transport(format!("{method}: {e}"))
        })?;

        into_result(method, envelope)
    }
}

fn into_result<T>(method: &str, envelope: Envelope<T>) -> Result<T> {
    if !envelope.ok {
        let status = envelope
            .error_code
            .and_then(|c| u16::try_from(c).ok())
            .filter(|c| (400..=599).contains(c))
            .unwrap_or(500);
        let description = envelope.description.unwrap_or_default();
        tracing::info!(method, status, "telegram rejected call: {description}");
        return Err(Error::Upstream {
            status,
            description,
        });
    }

    envelope
        .result
        .ok_or_else(|| Error::Transport(format!("{method}: ok response without result")))
}

#[async_trait]
impl GameApi for BotApiClient {
    async fn send_game(&self, chat_id: ChatId, game_short_name: &str) -> Result<MessageRef> {
        let msg: SentMessage = self
            .call(
                "sendGame",
                &[
                    ("chat_id", chat_id.0.to_string()),
                    ("game_short_name", game_short_name.to_string()),
                ],
            )
            .await?;

        Ok(MessageRef {
            chat_id: ChatId(msg.chat.id),
            message_id: MessageId(msg.message_id),
        })
    }

    async fn high_score(&self, target: &ScoreTarget) -> Result<i64> {
        let entries: Vec<HighScoreEntry> = self
            .call("getGameHighScores", &target.query_params())
            .await?;

        entries
            .first()
            .map(|e| e.score)
            .ok_or_else(|| Error::Upstream {
                status: 500,
                description: NO_HIGH_SCORE.to_string(),
            })
    }

    async fn set_score(&self, target: &ScoreTarget, score: i64) -> Result<()> {
        let mut params = target.query_params();
        params.push(("score", score.to_string()));
        params.push(("force", "true".to_string()));

        // `result` is the edited Message, or `true` for inline messages.
        let _: serde_json::Value = self.call("setGameScore", &params).await?;
        Ok(())
    }
}
