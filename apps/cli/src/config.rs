use std::{collections::HashMap, fs, time::Duration};

use quote_client::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

pub const APP_NAME: &str = "WinQuote";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub store_path: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    /// host:port probed before each fetch to decide online/offline.
    pub probe_addr: String,
    pub probe_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            store_path: "./data/saved_quotes.json".into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            request_timeout_secs: 15,
            retry_attempts: 2,
            probe_addr: "zenquotes.io:443".into(),
            probe_timeout_secs: 2,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// Defaults, overridden by `winquote.toml` in the working directory,
/// overridden by `WINQUOTE_*` environment variables. Never fails; bad
/// values fall back to whatever was already in place.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("winquote.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("WINQUOTE_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("WINQUOTE_STORE_PATH") {
        settings.store_path = v;
    }
    if let Ok(v) = std::env::var("WINQUOTE_USER_AGENT") {
        settings.user_agent = v;
    }
    if let Ok(v) = std::env::var("WINQUOTE_REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
    if let Ok(v) = std::env::var("WINQUOTE_RETRY_ATTEMPTS") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.retry_attempts = parsed;
        }
    }
    if let Ok(v) = std::env::var("WINQUOTE_PROBE_ADDR") {
        settings.probe_addr = v;
    }
    if let Ok(v) = std::env::var("WINQUOTE_PROBE_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.probe_timeout_secs = parsed;
        }
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("api_url") {
        settings.api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("store_path") {
        settings.store_path = v.clone();
    }
    if let Some(v) = file_cfg.get("user_agent") {
        settings.user_agent = v.clone();
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
    if let Some(v) = file_cfg.get("retry_attempts") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.retry_attempts = parsed;
        }
    }
    if let Some(v) = file_cfg.get("probe_addr") {
        settings.probe_addr = v.clone();
    }
    if let Some(v) = file_cfg.get("probe_timeout_secs") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.probe_timeout_secs = parsed;
        }
    }
}
