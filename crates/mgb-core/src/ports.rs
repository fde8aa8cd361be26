use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef, ScoreTarget},
    Result,
};

/// Hexagonal port for Telegram's game methods.
///
/// Implemented over the Bot API by `mgb-botapi`; tests use in-memory fakes.
/// Failures reported by Telegram must surface as [`crate::Error::Upstream`]
/// and network failures as [`crate::Error::Transport`].
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `sendGame`: post the game message into a chat.
    async fn send_game(&self, chat_id: ChatId, game_short_name: &str) -> Result<MessageRef>;

    /// `getGameHighScores`: score of the first entry Telegram returns.
    async fn high_score(&self, target: &ScoreTarget) -> Result<i64>;

    /// `setGameScore` with `force=true`.
    async fn set_score(&self, target: &ScoreTarget, score: i64) -> Result<()>;
}
