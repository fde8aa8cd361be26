use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InlineQueryResult, InlineQueryResultGame},
};

use crate::router::AppState;

/// Inline mode: offer the configured game so it can be shared into any chat.
pub async fn handle_inline_query(
    bot: Bot,
    q: InlineQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let game = state.launcher.game_name();
    let results = vec![InlineQueryResult::Game(InlineQueryResultGame::new(
        game.to_string(),
        game.to_string(),
    ))];

    if let Err(e) = bot.answer_inline_query(q.id, results).await {
        tracing::warn!(user_id = q.from.id.0, "failed to answer inline query: {e}");
    }

    Ok(())
}
