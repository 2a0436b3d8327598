use std::sync::Arc;

use tracing::{debug, warn};

use market::pulse::Spike;
use session::ChatId;
use session::onboarding::Prompt;

use crate::format::{self, DigestLine};
use crate::metrics::Counters;
use crate::transport::{Keyboard, SendOptions, Transport};

/// Labels of the reply-keyboard buttons.
#[derive(Debug, Clone)]
pub struct MenuLabels {
    pub report: String,
    pub add_token: String,
    pub cancel: String,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            report: "Отчёт".to_string(),
            add_token: "Добавить токен".to_string(),
            cancel: "Отмена".to_string(),
        }
    }
}

/// Formats notifications and hands them to the transport.
///
/// Send failures are logged and counted, never retried or propagated.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn Transport>,
    labels: MenuLabels,
    counters: Counters,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn Transport>, labels: MenuLabels, counters: Counters) -> Self {
        Self {
            transport,
            labels,
            counters,
        }
    }

    pub fn labels(&self) -> &MenuLabels {
        &self.labels
    }

    pub fn main_keyboard(&self) -> Keyboard {
        Keyboard::new(vec![vec![
            self.labels.report.clone(),
            self.labels.add_token.clone(),
        ]])
    }

    pub fn cancel_keyboard(&self) -> Keyboard {
        Keyboard::new(vec![vec![self.labels.cancel.clone()]])
    }

    async fn send(&self, chat_id: ChatId, text: &str, options: SendOptions) -> bool {
        match self.transport.send_message(chat_id, text, options).await {
            Ok(()) => {
                debug!(chat_id, "message sent");
                true
            }
            Err(e) => {
                Counters::bump(&self.counters.send_failed);
                warn!(chat_id, error = ?e, "message delivery failed");
                false
            }
        }
    }

    pub async fn greet(&self, chat_id: ChatId, first_contact: bool) {
        let text = if first_contact {
            format::GREETING_FIRST
        } else {
            format::GREETING_AGAIN
        };
        let options = SendOptions {
            keyboard: Some(self.main_keyboard()),
            html: true,
        };
        self.send(chat_id, text, options).await;
    }

    pub async fn prompt(&self, chat_id: ChatId, prompt: Prompt) {
        let text = match prompt {
            Prompt::Address => format::PROMPT_ADDRESS,
            Prompt::Chain => format::PROMPT_CHAIN,
            Prompt::Name => format::PROMPT_NAME,
        };
        let options = SendOptions {
            keyboard: Some(self.cancel_keyboard()),
            html: false,
        };
        self.send(chat_id, text, options).await;
    }

    /// Plain notice that returns the chat to the main menu.
    pub async fn menu_notice(&self, chat_id: ChatId, text: &str) {
        let options = SendOptions {
            keyboard: Some(self.main_keyboard()),
            html: false,
        };
        self.send(chat_id, text, options).await;
    }

    pub async fn token_added(&self, chat_id: ChatId) {
        self.menu_notice(chat_id, format::TOKEN_ADDED).await;
    }

    pub async fn input_cancelled(&self, chat_id: ChatId) {
        self.menu_notice(chat_id, format::INPUT_CANCELLED).await;
    }

    pub async fn not_registered(&self, chat_id: ChatId) {
        self.menu_notice(chat_id, format::NOT_REGISTERED).await;
    }

    pub async fn digest(&self, chat_id: ChatId, lines: &[(String, DigestLine)]) {
        let text = format::render_digest(lines);
        let options = SendOptions {
            keyboard: None,
            html: true,
        };
        if self.send(chat_id, &text, options).await {
            Counters::bump(&self.counters.reports_sent);
        }
    }

    pub async fn spike_alert(&self, chat_id: ChatId, token_name: &str, spike: &Spike) {
        let text = format::render_spike(token_name, spike);
        let options = SendOptions {
            keyboard: None,
            html: true,
        };
        if self.send(chat_id, &text, options).await {
            Counters::bump(&self.counters.alerts_sent);
        }
    }
}
