//! Game launch: turning a "Play" callback into a tokenized game URL.

use reqwest::Url;

use crate::{
    config::Config,
    domain::{MessageLocator, ScoreTarget, UserId},
    token::{ScoreClaims, TokenCodec},
    Result,
};

/// Messenger-agnostic view of a game callback query.
#[derive(Clone, Debug)]
pub struct GameCallback {
    pub user_id: UserId,
    pub game_short_name: Option<String>,
    /// `None` when Telegram sent neither a message nor an inline message id.
    pub locator: Option<MessageLocator>,
}

/// How a game callback should be answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackAnswer {
    /// Open the game at this URL.
    Launch(Url),
    /// Show a short notice instead of opening anything.
    Notice(&'static str),
    /// Acknowledge without a URL or text.
    Empty,
}

/// Issues score tokens for game callbacks.
#[derive(Clone)]
pub struct GameLauncher {
    game_name: String,
    game_url: Url,
    codec: TokenCodec,
}

impl GameLauncher {
    pub fn new(game_name: impl Into<String>, game_url: Url, codec: TokenCodec) -> Self {
        Self {
            game_name: game_name.into(),
            game_url,
            codec,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.game_name.clone(),
            cfg.game_url.clone(),
            TokenCodec::new(cfg.secret_key.as_bytes()),
        )
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    /// Game URL with a freshly signed `token` query parameter appended.
    pub fn launch_url(&self, target: ScoreTarget) -> Result<Url> {
        let token = self.codec.sign(&ScoreClaims {
            game: self.game_name.clone(),
            target,
        })?;

        let mut url = self.game_url.clone();
        url.query_pairs_mut().append_pair("token", &token);
        Ok(url)
    }

    pub fn answer(&self, cb: GameCallback) -> Result<CallbackAnswer> {
        match cb.game_short_name.as_deref() {
            Some(name) if name == self.game_name => {}
            Some(_) => return Ok(CallbackAnswer::Notice("Unknown game")),
            // Plain button callbacks are not ours to handle.
            None => return Ok(CallbackAnswer::Empty),
        }

        let Some(locator) = cb.locator else {
            return Ok(CallbackAnswer::Empty);
        };

        let url = self.launch_url(ScoreTarget {
            user_id: cb.user_id,
            locator,
        })?;
        Ok(CallbackAnswer::Launch(url))
    }
}
