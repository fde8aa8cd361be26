/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Where a game was launched from.
///
/// Games sent into a chat are addressed by chat + message id; games shared via
/// inline mode only carry Telegram's opaque inline message id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageLocator {
    RegularMessage {
        chat_id: ChatId,
        message_id: MessageId,
    },
    InlineMessage(String),
}

/// The game instance a score belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScoreTarget {
    pub user_id: UserId,
    pub locator: MessageLocator,
}

impl ScoreTarget {
    /// Query parameters Telegram uses to locate a game message.
    ///
    /// Locator fields that do not apply are sent as empty values.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let (message_id, chat_id, inline_message_id) = match &self.locator {
            MessageLocator::RegularMessage {
                chat_id,
                message_id,
            } => (message_id.0.to_string(), chat_id.0.to_string(), String::new()),
            MessageLocator::InlineMessage(id) => (String::new(), String::new(), id.clone()),
        };

        vec![
            ("user_id", self.user_id.0.to_string()),
            ("message_id", message_id),
            ("chat_id", chat_id),
            ("inline_message_id", inline_message_id),
        ]
    }
}
