use std::{env, fs, net::SocketAddr, path::Path, time::Duration};

use reqwest::Url;

use crate::{errors::Error, Result};

/// Typed process configuration.
///
/// Read once at startup and shared read-only (`Arc<Config>`) by the bot and
/// the score server.
#[derive(Clone)]
pub struct Config {
    // Telegram
    pub telegram_bot_token: String,
    pub telegram_api_url: Url,

    // Game
    pub game_name: String,
    pub game_url: Url,

    // Token signing
    pub secret_key: String,

    // Score server
    pub http_bind: SocketAddr,
    pub upstream_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("telegram_bot_token", &"<redacted>")
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .field("game_name", &self.game_name)
            .field("game_url", &self.game_url.as_str())
            .field("secret_key", &"<redacted>")
            .field("http_bind", &self.http_bind)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    /// Load from the process environment, after applying `.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .and_then(non_empty)
                .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
        };

        // Required env vars
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let game_name = required("GAME_NAME")?;
        let game_url = parse_url("GAME_URL", &required("GAME_URL")?)?;
        let secret_key = required("SECRET_KEY")?;

        let telegram_api_url = match lookup("TELEGRAM_API_URL").and_then(non_empty) {
            Some(raw) => parse_url("TELEGRAM_API_URL", &raw)?,
            None => parse_url("TELEGRAM_API_URL", "https://api.telegram.org")?,
        };

        let http_bind = lookup("HTTP_BIND")
            .and_then(non_empty)
            .unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let http_bind: SocketAddr = http_bind
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("HTTP_BIND is not a socket address: {e}")))?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_MS").and_then(non_empty) {
            Some(raw) => parse_timeout_ms("UPSTREAM_TIMEOUT_MS", &raw)?,
            None => Duration::from_millis(10_000),
        };

        Ok(Self {
            telegram_bot_token,
            telegram_api_url,
            game_name,
            game_url,
            secret_key,
            http_bind,
            upstream_timeout,
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| Error::Config(format!("{key} is not a valid URL: {e}")))
}

fn parse_timeout_ms(key: &str, raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(Error::Config(format!("{key} must be greater than zero"))),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(Error::Config(format!(
            "{key} is not a number of milliseconds: {e}"
        ))),
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
