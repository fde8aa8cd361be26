use std::sync::Arc;

use teloxide::prelude::*;

use crate::{chat_id, router::AppState};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// `/start` or `/game`: post the game message.
    Play,
    Unknown,
}

fn parse_command(text: &str) -> Command {
    // Telegram may send `/cmd@botname arg1 ...`
    let first = text.split_whitespace().next().unwrap_or("");
    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    match cmd.as_str() {
        "start" | "game" | "play" => Command::Play,
        _ => Command::Unknown,
    }
}

pub async fn handle_command(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let text = msg.text().unwrap_or("");
    if parse_command(text) != Command::Play {
        return Ok(());
    }

    let chat = chat_id(msg.chat.id);
    let game = state.launcher.game_name();
    match state.games.send_game(chat, game).await {
        Ok(sent) => tracing::info!(
            chat_id = sent.chat_id.0,
            message_id = sent.message_id.0,
            game,
            "game sent"
        ),
        Err(e) => tracing::warn!(chat_id = chat.0, "failed to send game: {e}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_commands() {
        assert_eq!(parse_command("/start"), Command::Play);
        assert_eq!(parse_command("/start payload"), Command::Play);
        assert_eq!(parse_command("/game@micro_game_bot"), Command::Play);
        assert_eq!(parse_command("/PLAY"), Command::Play);
    }

    #[test]
    fn other_commands_are_ignored() {
        assert_eq!(parse_command("/help"), Command::Unknown);
        assert_eq!(parse_command("/"), Command::Unknown);
        assert_eq!(parse_command("/starter"), Command::Unknown);
    }
}
