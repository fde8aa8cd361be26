use std::sync::Arc;

use teloxide::prelude::*;

use mgb_core::launch::CallbackAnswer;

use crate::{game_callback, router::AppState};

/// "Play" pressed: answer with the tokenized game URL.
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let cb_id = q.id.clone();
    let cb = game_callback(&q);
    let user_id = cb.user_id.0;

    // Always answer the callback query so the client stops its spinner.
    let answer = match state.launcher.answer(cb) {
        Ok(answer) => answer,
        Err(e) => {
            tracing::error!(user_id, "failed to issue score token: {e}");
            CallbackAnswer::Empty
        }
    };

    let res = match answer {
        CallbackAnswer::Launch(url) => {
            tracing::info!(user_id, game = state.launcher.game_name(), "game launched");
            bot.answer_callback_query(cb_id).url(url).await
        }
        CallbackAnswer::Notice(text) => bot.answer_callback_query(cb_id).text(text).await,
        CallbackAnswer::Empty => bot.answer_callback_query(cb_id).await,
    };

    if let Err(e) = res {
        tracing::warn!(user_id, "failed to answer callback query: {e}");
    }

    Ok(())
}
