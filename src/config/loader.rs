use std::{env, path::PathBuf, time::Duration};

use super::env::{
    AppConfig, ClassifierConfig, ConfigError, LoggingConfig, NotificationConfig, PathConfig,
    PipelineConfig, SourceConfig, SummarizerConfig,
};

const APP_DIR: &str = ".bookmark-router";
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let app_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        let paths = PathConfig {
            config_file: path_or("BOOKMARKS_CONFIG", app_dir.join("config.yaml")),
            state_file: path_or("BOOKMARKS_STATE", app_dir.join("state.json")),
            vault_dir: path_or("VAULT_DIR", app_dir.join("vault")),
            prompts_dir: path_or("PROMPTS_DIR", app_dir.join("prompts")),
            logs_dir: path_or("LOGS_DIR", app_dir.join("logs")),
        };

        let source = SourceConfig {
            bird_bin: string_or("BIRD_BIN", "bird"),
            limit: parse_or("BOOKMARKS_LIMIT", 50)?,
        };

        let classifier = ClassifierConfig {
            command: string_or("CLASSIFIER_BIN", "gemini"),
            api_key: non_empty("CLASSIFIER_API_KEY"),
            api_url: string_or("CLASSIFIER_API_URL", DEFAULT_API_URL),
            model: string_or("CLASSIFIER_MODEL", "gpt-4o-mini"),
        };

        let summarizer = SummarizerConfig {
            command: string_or("SUMMARIZE_BIN", "summarize"),
            fetch_timeout: Duration::from_millis(parse_or("WEBPAGE_FETCH_TIMEOUT", 10_000)?),
            content_max_length: parse_or("WEBPAGE_CONTENT_MAX_LENGTH", 1_000)?,
        };

        let telegram_chat_id = match non_empty("TELEGRAM_CHAT_ID") {
            Some(value) => Some(value.trim().parse::<i64>().map_err(|_| {
                ConfigError::Invalid {
                    key: "TELEGRAM_CHAT_ID",
                    value,
                }
            })?),
            None => None,
        };

        let notifications = NotificationConfig {
            telegram_bot_token: non_empty("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id,
            quiet_start: string_or("QUIET_START", "23:00"),
            quiet_end: string_or("QUIET_END", "08:00"),
        };

        let pipeline = PipelineConfig {
            parallel: parse_bool_or("PARALLEL", true)?,
            workers: parse_or("WORKERS", 5)?,
        };

        let logging = LoggingConfig {
            level: string_or("LOG_LEVEL", "info"),
        };

        Ok(Self {
            paths,
            source,
            classifier,
            summarizer,
            notifications,
            pipeline,
            logging,
            timezone: string_or("TIMEZONE", "UTC"),
        })
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn string_or(key: &str, fallback: &str) -> String {
    non_empty(key).unwrap_or_else(|| fallback.to_string())
}

fn path_or(key: &str, fallback: PathBuf) -> PathBuf {
    non_empty(key).map(PathBuf::from).unwrap_or(fallback)
}

fn parse_or<T: std::str::FromStr>(key: &'static str, fallback: T) -> Result<T, ConfigError> {
    match non_empty(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(fallback),
    }
}

fn parse_bool_or(key: &'static str, fallback: bool) -> Result<bool, ConfigError> {
    match non_empty(key) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(fallback),
    }
}
