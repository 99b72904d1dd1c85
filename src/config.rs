//! Process configuration, read once at startup from the environment
//! (after `dotenvy` has loaded any `.env` file).

use std::time::Duration;

use actix_web::cookie::Key;

pub const DEFAULT_API_BASE_URL: &str = "https://mysite-kkqt.onrender.com/";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "Idea Hub";

/// Cookie keys shorter than this are replaced by a random key.
const MIN_SESSION_KEY_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub app_name: String,
    pub cookie_secure: bool,
    pub api_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            cookie_secure: false,
            api_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_timeout = non_empty("API_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                log::warn!("Ignoring API_TIMEOUT_SECS={raw:?}: not a whole number of seconds");
                None
            }
        });

        Self {
            api_base_url: non_empty("API_BASE_URL").unwrap_or(defaults.api_base_url),
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            app_name: non_empty("APP_NAME").unwrap_or(defaults.app_name),
            cookie_secure: non_empty("COOKIE_SECURE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.cookie_secure),
            api_timeout,
        }
    }
}

/// Session encryption key. Load from SESSION_KEY for sessions that survive restarts.
pub fn session_key(raw: Option<String>) -> Key {
    match raw {
        Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                val.len()
            );
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    }
}
