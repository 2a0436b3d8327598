use parking_lot::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::feed::PriceFeed;
use crate::pulse::{Spike, SpikeRule};
use crate::rolling_window::PriceWindow;
use crate::types::{PairKey, Quote, percent_change};

pub type TokenId = Uuid;

/// A token tracked by one chat.
///
/// Identity is immutable; the window and report baseline sit behind a
/// per-token lock so the spike check and the digest report can run
/// concurrently without interleaving inside one read-modify-write.
#[derive(Debug)]
pub struct Token {
    id: TokenId,
    name: String,
    key: PairKey,
    state: Mutex<TokenState>,
}

#[derive(Debug, Clone)]
struct TokenState {
    window: PriceWindow,
    last_report: Option<Quote>,
}

/// Result of feeding one spike-check sample into a token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Window was empty; the sample warmed it up and nothing was compared.
    WarmedUp,
    /// Sample recorded, price stayed under the threshold.
    Steady { average: f64 },
    /// Sample recorded, price broke above the threshold.
    Spike(Spike),
}

/// Result of comparing a digest-report quote with the previous report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportDelta {
    /// First successful report; `current` is now the baseline.
    NoBaseline { current: Quote },
    Change {
        previous: Quote,
        current: Quote,
        percent_change: f64,
    },
}

impl Token {
    /// Creates a token with an empty window and no report baseline.
    pub fn new(name: impl Into<String>, key: PairKey, window_size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            key,
            state: Mutex::new(TokenState {
                window: PriceWindow::new(window_size),
                last_report: None,
            }),
        }
    }

    /// Creates a token and warms its window with one initial fetch.
    ///
    /// A failed fetch still yields a token; its window stays empty and is
    /// warmed up by the first successful spike check.
    pub async fn onboard(
        name: impl Into<String>,
        key: PairKey,
        window_size: usize,
        feed: &dyn PriceFeed,
    ) -> Self {
        let token = Self::new(name, key, window_size);

        match feed.fetch(&token.key).await {
            Ok(quote) => {
                token.state.lock().window.initialize(quote);
                info!(
                    pair_id = %token.key,
                    price = quote.price,
                    cap_millions = quote.cap_millions,
                    "token window initialized"
                );
            }
            Err(e) => {
                warn!(pair_id = %token.key, error = %e, "initial fetch failed; window left empty");
            }
        }

        token
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &PairKey {
        &self.key
    }

    /// Averages the window, records `quote`, then evaluates `rule` against
    /// the pre-update average. Runs under the token lock.
    pub fn observe(&self, quote: Quote, rule: &SpikeRule) -> Observation {
        let mut state = self.state.lock();

        let Some(average) = state.window.average() else {
            state.window.initialize(quote);
            return Observation::WarmedUp;
        };

        state.window.record(quote);

        match rule.evaluate(average, quote) {
            Some(spike) => Observation::Spike(spike),
            None => Observation::Steady { average },
        }
    }

    /// Compares `quote` with the last reported snapshot and makes it the new
    /// baseline. Independent of the rolling window.
    pub fn report(&self, quote: Quote) -> ReportDelta {
        let mut state = self.state.lock();
        let previous = state.last_report.replace(quote);

        match previous {
            None => ReportDelta::NoBaseline { current: quote },
            Some(previous) => ReportDelta::Change {
                previous,
                current: quote,
                percent_change: percent_change(previous.price, quote.price),
            },
        }
    }

    pub fn window(&self) -> PriceWindow {
        self.state.lock().window.clone()
    }

    pub fn last_report(&self) -> Option<Quote> {
        self.state.lock().last_report
    }
}
