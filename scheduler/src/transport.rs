//! Outbound seam to the chat platform.

use async_trait::async_trait;

use session::ChatId;

/// Reply keyboard shown under the input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
    pub resize: bool,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows, resize: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub keyboard: Option<Keyboard>,
    /// Text carries `<b>`-style markup.
    pub html: bool,
}

/// Message delivery. Fire-and-forget from the core's point of view: a
/// failed send is logged and never retried.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<()>;
}
