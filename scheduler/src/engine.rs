//! The two periodic passes over the registry.
//!
//! Digest report: for every chat, fetch each token, compare with the last
//! reported snapshot, send one message per chat.
//!
//! Spike check: for every token, fetch, average-then-record under the token
//! lock, alert the owning chat when the price breaks above the threshold.
//!
//! Fetches within a pass run concurrently and are each bounded by the feed's
//! own timeout. A failed fetch leaves the token untouched; the digest shows
//! it as unavailable, the spike check skips it silently.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{Instrument, debug, info, warn};

use common::logger::{TraceId, annotate_span, child_span, root_span, warn_if_slow};
use market::dexscreener::FeedError;
use market::pulse::SpikeRule;
use market::token::{Observation, ReportDelta, Token};
use market::{PriceFeed, Quote};
use session::ChatId;
use session::registry::Registry;

use crate::dispatcher::NotificationDispatcher;
use crate::format::DigestLine;
use crate::metrics::Counters;

const SLOW_FETCH: Duration = Duration::from_secs(3);

/// Totals for one pass; also logged when the pass closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub chats: usize,
    pub tokens: usize,
    pub fetch_failures: usize,
    pub alerts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckOutcome {
    Skipped,
    Recorded,
    Alerted,
}

pub struct Scheduler {
    registry: Arc<Registry>,
    feed: Arc<dyn PriceFeed>,
    dispatcher: NotificationDispatcher,
    rule: SpikeRule,
    counters: Counters,
}

impl Scheduler {
    pub fn new(
        registry: Arc<Registry>,
        feed: Arc<dyn PriceFeed>,
        dispatcher: NotificationDispatcher,
        rule: SpikeRule,
        counters: Counters,
    ) -> Self {
        Self {
            registry,
            feed,
            dispatcher,
            rule,
            counters,
        }
    }

    async fn fetch(&self, token: &Token) -> Result<Quote, FeedError> {
        let res = warn_if_slow("price_fetch", SLOW_FETCH, self.feed.fetch(token.key())).await;

        match &res {
            Ok(_) => Counters::bump(&self.counters.fetch_ok),
            Err(e) => {
                Counters::bump(&self.counters.fetch_failed);
                warn!(token = %token.name(), error = %e, "price data unavailable");
            }
        }
        res
    }

    /// Digest report for every registered chat.
    pub async fn report_all(&self) -> PassSummary {
        let span = root_span("report_pass", &TraceId::default());

        async {
            info!("sending digest reports");
            Counters::bump(&self.counters.report_passes);

            let chats = self.registry.snapshot();
            let reports = chats
                .iter()
                .map(|chat| self.report_tokens(chat.chat_id, &chat.tokens));
            let per_chat = join_all(reports).await;

            let summary = per_chat.into_iter().fold(
                PassSummary::default(),
                |mut acc, s| {
                    acc.chats += 1;
                    acc.tokens += s.tokens;
                    acc.fetch_failures += s.fetch_failures;
                    acc
                },
            );

            info!(
                chats = summary.chats,
                tokens = summary.tokens,
                fetch_failures = summary.fetch_failures,
                "digest pass complete"
            );
            summary
        }
        .instrument(span)
        .await
    }

    /// Digest report for one chat, e.g. on button press.
    /// Returns `None` when the chat is not registered.
    pub async fn report_chat(&self, chat_id: ChatId) -> Option<PassSummary> {
        let tokens = self.registry.tokens_for(chat_id)?;
        let span = root_span("report_chat", &TraceId::default());

        let summary = self.report_tokens(chat_id, &tokens).instrument(span).await;
        Some(summary)
    }

    async fn report_tokens(&self, chat_id: ChatId, tokens: &[Arc<Token>]) -> PassSummary {
        let lines = join_all(tokens.iter().map(|t| self.report_token(chat_id, t))).await;

        let fetch_failures = lines
            .iter()
            .filter(|(_, l)| *l == DigestLine::Unavailable)
            .count();

        self.dispatcher.digest(chat_id, &lines).await;

        PassSummary {
            chats: 1,
            tokens: tokens.len(),
            fetch_failures,
            alerts: 0,
        }
    }

    async fn report_token(&self, chat_id: ChatId, token: &Token) -> (String, DigestLine) {
        let span = child_span("report_token");
        annotate_span(&span, chat_id, Some(&token.key().id()));

        async {
            let line = match self.fetch(token).await {
                Err(_) => DigestLine::Unavailable,
                Ok(quote) => match token.report(quote) {
                    ReportDelta::NoBaseline { .. } => {
                        debug!("first report; baseline set");
                        DigestLine::NoBaseline
                    }
                    ReportDelta::Change {
                        percent_change,
                        current,
                        ..
                    } => DigestLine::Change {
                        percent_change,
                        current,
                    },
                },
            };
            (token.name().to_string(), line)
        }
        .instrument(span)
        .await
    }

    /// Spike check over every tracked token.
    pub async fn check_all(&self) -> PassSummary {
        let span = root_span("check_pass", &TraceId::default());

        async {
            Counters::bump(&self.counters.check_passes);

            let chats = self.registry.snapshot();
            let chat_count = chats.len();

            let work: Vec<(ChatId, Arc<Token>)> = chats
                .into_iter()
                .flat_map(|c| {
                    let chat_id = c.chat_id;
                    c.tokens.into_iter().map(move |t| (chat_id, t))
                })
                .collect();

            let outcomes =
                join_all(work.iter().map(|(chat_id, t)| self.check_token(*chat_id, t))).await;

            let summary = PassSummary {
                chats: chat_count,
                tokens: outcomes.len(),
                fetch_failures: outcomes
                    .iter()
                    .filter(|o| **o == CheckOutcome::Skipped)
                    .count(),
                alerts: outcomes
                    .iter()
                    .filter(|o| **o == CheckOutcome::Alerted)
                    .count(),
            };

            debug!(
                tokens = summary.tokens,
                skipped = summary.fetch_failures,
                alerts = summary.alerts,
                "check pass complete"
            );
            summary
        }
        .instrument(span)
        .await
    }

    async fn check_token(&self, chat_id: ChatId, token: &Token) -> CheckOutcome {
        let span = child_span("check_token");
        annotate_span(&span, chat_id, Some(&token.key().id()));

        async {
            let Ok(quote) = self.fetch(token).await else {
                return CheckOutcome::Skipped;
            };

            debug!(price = quote.price, "collecting statistics");

            match token.observe(quote, &self.rule) {
                Observation::Spike(spike) => {
                    info!(
                        token = %token.name(),
                        average = spike.average,
                        price = spike.quote.price,
                        percent_change = spike.percent_change,
                        "price spike; sending alert"
                    );
                    self.dispatcher
                        .spike_alert(chat_id, token.name(), &spike)
                        .await;
                    CheckOutcome::Alerted
                }
                Observation::WarmedUp => {
                    info!(token = %token.name(), "window warmed up on first successful check");
                    CheckOutcome::Recorded
                }
                Observation::Steady { .. } => CheckOutcome::Recorded,
            }
        }
        .instrument(span)
        .await
    }
}
