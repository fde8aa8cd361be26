/// Core error type shared by the bot, the score server and the Telegram client.
///
/// Adapter crates map their specific errors into this type so both the bot
/// handlers and the HTTP layer can decide consistently what the caller sees.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Missing, malformed or forged score token.
    #[error("invalid token: {0}")]
    Token(String),

    /// Submitted score is missing, not an integer or not strictly positive.
    #[error("invalid score")]
    InvalidScore,

    /// Telegram answered with `ok: false`.
    #[error("upstream error {status}: {description}")]
    Upstream { status: u16, description: String },

    /// Telegram could not be reached, timed out or sent an unreadable body.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
