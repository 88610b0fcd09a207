use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: PathConfig,
    pub source: SourceConfig,
    pub classifier: ClassifierConfig,
    pub summarizer: SummarizerConfig,
    pub notifications: NotificationConfig,
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
}

#[derive(Debug, Clone)]
pub struct PathConfig {
    pub config_file: PathBuf,
    pub state_file: PathBuf,
    pub vault_dir: PathBuf,
    pub prompts_dir: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub bird_bin: String,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub command: String,
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub command: String,
    pub fetch_timeout: Duration,
    pub content_max_length: usize,
}

#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<i64>,
    pub quiet_start: String,
    pub quiet_end: String,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub parallel: bool,
    pub workers: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("invalid clock value {0:?}: expected HH:MM")]
    InvalidClock(String),
    #[error("unknown timezone {0:?}")]
    InvalidTimezone(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse category config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config must define at least one category")]
    NoCategories,
}
