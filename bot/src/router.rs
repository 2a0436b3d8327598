//! Routes inbound intents to greeting, onboarding and on-demand reports.
//!
//! Routing is by exact match on button labels. While a chat has an
//! onboarding dialogue open, its text goes to the dialogue first; the cancel
//! label is honoured in every state.

use std::sync::Arc;

use tracing::{Instrument, debug, info, warn};

use common::logger::{TraceId, annotate_span, root_span};
use market::PriceFeed;
use market::token::Token;
use scheduler::dispatcher::NotificationDispatcher;
use scheduler::engine::Scheduler;
use session::ChatId;
use session::onboarding::{OnboardingManager, Step, TokenDraft};
use session::registry::Registry;

use crate::telegram::Intent;

pub struct Router {
    registry: Arc<Registry>,
    onboarding: OnboardingManager,
    scheduler: Arc<Scheduler>,
    dispatcher: NotificationDispatcher,
    feed: Arc<dyn PriceFeed>,
    window_size: usize,
}

impl Router {
    pub fn new(
        registry: Arc<Registry>,
        scheduler: Arc<Scheduler>,
        dispatcher: NotificationDispatcher,
        feed: Arc<dyn PriceFeed>,
        window_size: usize,
    ) -> Self {
        let onboarding = OnboardingManager::new(dispatcher.labels().cancel.clone());
        Self {
            registry,
            onboarding,
            scheduler,
            dispatcher,
            feed,
            window_size,
        }
    }

    pub fn onboarding(&self) -> &OnboardingManager {
        &self.onboarding
    }

    pub async fn handle(&self, intent: Intent) {
        let span = root_span("inbound", &TraceId::default());

        match intent {
            Intent::Greet { chat_id } => {
                annotate_span(&span, chat_id, None);
                self.on_greet(chat_id).instrument(span).await
            }
            Intent::Text { chat_id, text } => {
                annotate_span(&span, chat_id, None);
                self.on_text(chat_id, &text).instrument(span).await
            }
        }
    }

    async fn on_greet(&self, chat_id: ChatId) {
        let registration = self.registry.register_chat(chat_id);
        self.dispatcher.greet(chat_id, registration.created).await;
    }

    async fn on_text(&self, chat_id: ChatId, text: &str) {
        if let Some(step) = self.onboarding.handle_input(chat_id, text) {
            self.apply_step(chat_id, step).await;
            return;
        }

        let labels = self.dispatcher.labels();
        if text == labels.cancel {
            info!("input cancelled");
            self.dispatcher.input_cancelled(chat_id).await;
        } else if text == labels.add_token {
            let step = self.onboarding.begin(chat_id);
            self.apply_step(chat_id, step).await;
        } else if text == labels.report {
            info!("report button pressed");
            if self.scheduler.report_chat(chat_id).await.is_none() {
                self.dispatcher.not_registered(chat_id).await;
            }
        } else {
            debug!("unrouted text ignored");
        }
    }

    async fn apply_step(&self, chat_id: ChatId, step: Step) {
        match step {
            Step::Prompt(prompt) => self.dispatcher.prompt(chat_id, prompt).await,
            Step::Completed(draft) => self.complete_onboarding(chat_id, draft).await,
            Step::Cancelled => self.dispatcher.input_cancelled(chat_id).await,
            Step::Ignored => {}
        }
    }

    /// Builds the token (initial fetch included) and attaches it to the chat.
    async fn complete_onboarding(&self, chat_id: ChatId, draft: TokenDraft) {
        if !self.registry.contains(chat_id) {
            warn!("onboarding finished for unregistered chat; token dropped");
            self.dispatcher.not_registered(chat_id).await;
            return;
        }

        let token = Token::onboard(
            draft.name.clone(),
            draft.key(),
            self.window_size,
            self.feed.as_ref(),
        )
        .await;

        match self.registry.add_token(chat_id, Arc::new(token)) {
            Ok(()) => self.dispatcher.token_added(chat_id).await,
            Err(e) => {
                warn!(error = %e, "token could not be registered");
                self.dispatcher.not_registered(chat_id).await;
            }
        }
    }
}
