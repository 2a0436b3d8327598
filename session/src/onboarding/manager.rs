use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::ChatId;
use crate::onboarding::model::{OnboardingState, Step};

/// Live onboarding dialogues, one per chat.
///
/// Finished and cancelled dialogues are dropped immediately, so nothing a
/// chat typed survives into its next dialogue.
pub struct OnboardingManager {
    sessions: Mutex<HashMap<ChatId, OnboardingState>>,
    cancel_label: String,
}

impl OnboardingManager {
    pub fn new(cancel_label: impl Into<String>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            cancel_label: cancel_label.into(),
        }
    }

    pub fn cancel_label(&self) -> &str {
        &self.cancel_label
    }

    /// Starts a fresh dialogue, discarding any unfinished one.
    pub fn begin(&self, chat_id: ChatId) -> Step {
        let (state, step) = OnboardingState::start();
        let replaced = self.sessions.lock().insert(chat_id, state);

        if replaced.is_some() {
            debug!(chat_id, "unfinished onboarding replaced");
        }
        info!(chat_id, "onboarding started");

        step
    }

    /// Advances the chat's dialogue. `None` when the chat has none.
    pub fn handle_input(&self, chat_id: ChatId, text: &str) -> Option<Step> {
        let mut sessions = self.sessions.lock();
        let state = sessions.remove(&chat_id)?;

        let (next, step) = state.on_input(text, &self.cancel_label);

        if next.is_terminal() {
            match &step {
                Step::Cancelled => info!(chat_id, "onboarding cancelled"),
                Step::Completed(draft) => {
                    info!(chat_id, token = %draft.name, pair_id = %draft.key(), "onboarding complete")
                }
                _ => {}
            }
        } else {
            sessions.insert(chat_id, next);
        }

        Some(step)
    }

    pub fn is_active(&self, chat_id: ChatId) -> bool {
        self.sessions.lock().contains_key(&chat_id)
    }

    pub fn state(&self, chat_id: ChatId) -> Option<OnboardingState> {
        self.sessions.lock().get(&chat_id).cloned()
    }
}
