use async_trait::async_trait;
use reqwest::Url;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, ParseMode};
use tracing::instrument;

use scheduler::transport::{Keyboard, SendOptions, Transport};

use crate::error::AppError;

/// Outbound side of the bot: wraps a teloxide [`Bot`] behind [`Transport`].
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(api_url: &str, token: &str) -> Result<Self, AppError> {
        let url = Url::parse(api_url).map_err(|_| AppError::InvalidConfig {
            name: "TELEGRAM_API_URL",
            value: api_url.to_string(),
        })?;

        Ok(Self {
            bot: Bot::new(token).set_api_url(url),
        })
    }

    /// Handle for the inbound dispatcher; shares the same HTTP client.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    #[instrument(skip(self, text, options), level = "debug")]
    pub async fn send_text(
        &self,
        chat_id: session::ChatId,
        text: &str,
        options: SendOptions,
    ) -> Result<(), AppError> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if options.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if let Some(keyboard) = options.keyboard {
            request = request.reply_markup(reply_keyboard(keyboard));
        }

        request.await?;
        Ok(())
    }
}

/// Reply keyboard rows as teloxide markup.
pub fn reply_keyboard(keyboard: Keyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());

    let markup = KeyboardMarkup::new(rows);
    if keyboard.resize {
        markup.resize_keyboard()
    } else {
        markup
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: session::ChatId,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<()> {
        self.send_text(chat_id, text, options).await?;
        Ok(())
    }
}
