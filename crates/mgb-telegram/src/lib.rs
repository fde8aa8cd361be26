//! Telegram adapter (teloxide).
//!
//! Receives bot updates and maps them onto the `mgb-core` game launch flow.

use teloxide::types::CallbackQuery;

pub mod handlers;
pub mod router;

use mgb_core::{
    domain::{ChatId, MessageId, MessageLocator, UserId},
    launch::GameCallback,
};

fn chat_id(chat_id: teloxide::types::ChatId) -> ChatId {
    ChatId(chat_id.0)
}

/// Messenger-agnostic view of a callback query.
///
/// Inline message ids win over an attached message: Telegram only sends one of
/// them for game callbacks.
pub fn game_callback(q: &CallbackQuery) -> GameCallback {
    let locator = match (&q.inline_message_id, &q.message) {
        (Some(id), _) => Some(MessageLocator::InlineMessage(id.clone())),
        (None, Some(msg)) => Some(MessageLocator::RegularMessage {
            chat_id: chat_id(msg.chat.id),
            message_id: MessageId(msg.id.0),
        }),
        (None, None) => None,
    };

    GameCallback {
        user_id: UserId(q.from.id.0 as i64),
        game_short_name: q.game_short_name.clone(),
        locator,
    }
}
