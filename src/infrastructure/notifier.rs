use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;

use crate::config::env::NotificationConfig;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &str) -> Result<()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(token),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        self.bot.send_message(self.chat_id, message).await?;
        tracing::debug!(target: "notify", chat_id = self.chat_id.0, "telegram notification sent");
        Ok(())
    }
}

pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        println!("NOTIFY: {message}");
        Ok(())
    }
}

pub fn build_notifier(config: &NotificationConfig) -> Box<dyn Notifier> {
    match (&config.telegram_bot_token, config.telegram_chat_id) {
        (Some(token), Some(chat_id)) if chat_id != 0 => {
            tracing::info!(target: "notify", chat_id, "using telegram notifications");
            Box::new(TelegramNotifier::new(token, chat_id))
        }
        (Some(_), _) => {
            tracing::warn!(
                target: "notify",
                "TELEGRAM_BOT_TOKEN set without TELEGRAM_CHAT_ID; printing notifications instead"
            );
            Box::new(StdoutNotifier)
        }
        _ => Box::new(StdoutNotifier),
    }
}
