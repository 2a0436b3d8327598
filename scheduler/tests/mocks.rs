use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use market::dexscreener::FeedError;
use market::{PairKey, PriceFeed, Quote};
use scheduler::transport::{SendOptions, Transport};
use session::ChatId;

/// Replays scripted quotes per pair, then falls back to `steady` if set.
/// `None` entries and unknown pairs fail with `EmptyPairs`.
#[derive(Default)]
pub struct ScriptedFeed {
    pub scripts: Mutex<HashMap<PairKey, VecDeque<Option<Quote>>>>,
    pub steady: Mutex<HashMap<PairKey, Quote>>,
    pub delays: Mutex<HashMap<PairKey, Duration>>,
    pub calls: Mutex<Vec<PairKey>>,
}

impl ScriptedFeed {
    pub fn push(&self, key: &PairKey, quote: Option<Quote>) {
        self.scripts
            .lock()
            .entry(key.clone())
            .or_default()
            .push_back(quote);
    }

    pub fn always(&self, key: &PairKey, quote: Quote) {
        self.steady.lock().insert(key.clone(), quote);
    }

    pub fn delay(&self, key: &PairKey, d: Duration) {
        self.delays.lock().insert(key.clone(), d);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl PriceFeed for ScriptedFeed {
    async fn fetch(&self, key: &PairKey) -> Result<Quote, FeedError> {
        self.calls.lock().push(key.clone());

        let delay = self.delays.lock().get(key).copied();
        if let Some(d) = delay {
            tokio::time::sleep(d).await;
        }

        let scripted = self.scripts.lock().get_mut(key).and_then(|q| q.pop_front());
        match scripted {
            Some(entry) => entry.ok_or(FeedError::EmptyPairs),
            None => self
                .steady
                .lock()
                .get(key)
                .copied()
                .ok_or(FeedError::EmptyPairs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: ChatId,
    pub text: String,
    pub options: SendOptions,
}

/// Records every outbound message; optionally fails every send.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail: true,
        }
    }

    pub fn messages_for(&self, chat_id: ChatId) -> Vec<Sent> {
        self.sent
            .lock()
            .iter()
            .filter(|s| s.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("transport offline");
        }
        self.sent.lock().push(Sent {
            chat_id,
            text: text.to_string(),
            options,
        });
        Ok(())
    }
}
