use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use mgb_botapi::BotApiClient;
use mgb_core::{config::Config, ports::GameApi};
use mgb_http::ScoreState;

#[tokio::main]
async fn main() -> Result<(), mgb_core::Error> {
    mgb_core::logging::init("mgb")?;

    let cfg = Arc::new(Config::load()?);
    tracing::debug!(?cfg, "configuration loaded");

    let games: Arc<dyn GameApi> = Arc::new(BotApiClient::from_config(&cfg)?);

    let listener = mgb_http::bind(cfg.http_bind)
        .await
        .map_err(|e| {
            tracing::error!("{e:#}");
            mgb_core::Error::External(format!("{e:#}"))
        })?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let mut server = tokio::spawn(mgb_http::serve(
        listener,
        ScoreState::new(&cfg, games.clone()),
        shutdown.clone(),
    ));
    let polling = mgb_telegram::router::run_polling(cfg, games, shutdown.clone());

    // Either half stopping takes the other down with it.
    tokio::select! {
        res = polling => {
            shutdown.cancel();
            res.map_err(|e| mgb_core::Error::External(format!("telegram bot failed: {e}")))?;
            join_server(server).await?;
        }
        res = &mut server => {
            if !shutdown.is_cancelled() {
                tracing::warn!("score server stopped before the bot");
                shutdown.cancel();
            }
            flatten_server(res)?;
        }
    }

    Ok(())
}

async fn join_server(server: JoinHandle<anyhow::Result<()>>) -> Result<(), mgb_core::Error> {
    flatten_server(server.await)
}

fn flatten_server(
    res: Result<anyhow::Result<()>, tokio::task::JoinError>,
) -> Result<(), mgb_core::Error> {
    res.map_err(|e| mgb_core::Error::External(format!("score server task failed: {e}")))?
        .map_err(|e| {
            tracing::error!("{e:#}");
            mgb_core::Error::External(format!("{e:#}"))
        })
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c => tracing::info!("SIGINT received, shutting down"),
                    _ = term.recv() => tracing::info!("SIGTERM received, shutting down"),
                }
            }
            Err(e) => {
                tracing::warn!("cannot listen for SIGTERM: {e}");
                let _ = ctrl_c.await;
                tracing::info!("SIGINT received, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        tracing::info!("interrupt received, shutting down");
    }

    shutdown.cancel();
}
