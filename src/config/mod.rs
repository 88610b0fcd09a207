pub mod categories;
pub mod env;
mod loader;

pub use categories::load_catalog;
pub use env::{AppConfig, ClassifierConfig, ConfigError, SummarizerConfig};
pub use loader::load_config;
