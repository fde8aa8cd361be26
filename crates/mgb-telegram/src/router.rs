use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};
use tokio_util::sync::CancellationToken;

use mgb_core::{config::Config, launch::GameLauncher, ports::GameApi};

use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub launcher: GameLauncher,
    pub games: Arc<dyn GameApi>,
}

impl AppState {
    pub fn new(cfg: &Config, games: Arc<dyn GameApi>) -> Self {
        Self {
            launcher: GameLauncher::from_config(cfg),
            games,
        }
    }
}

/// Event kind -> handler table. Shares nothing with the HTTP routes but the
/// token codec inside [`GameLauncher`].
fn schema() -> teloxide::dispatching::UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_inline_query().endpoint(handlers::handle_inline_query))
        .branch(Update::filter_message().endpoint(handlers::handle_message))
}

/// Long-poll Telegram until `shutdown` is cancelled.
pub async fn run_polling(
    cfg: Arc<Config>,
    games: Arc<dyn GameApi>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone()).set_api_url(cfg.telegram_api_url.clone());

    // Basic startup info.
    match bot.get_me().await {
        Ok(me) => tracing::info!("bot started: @{}", me.username()),
        Err(e) => tracing::warn!("getMe failed, polling anyway: {e}"),
    }
    tracing::info!(game = %cfg.game_name, url = %cfg.game_url, "serving game");

    let state = Arc::new(AppState::new(&cfg, games));

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .build();

    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        shutdown.cancelled().await;
        match token.shutdown() {
            Ok(done) => {
                done.await;
                tracing::info!("bot dispatcher stopped");
            }
            Err(e) => tracing::warn!("bot dispatcher shutdown: {e}"),
        }
    });

    dispatcher.dispatch().await;

    Ok(())
}
