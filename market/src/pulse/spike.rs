//! Upward price spike detection.
//!
//! A spike is a fresh price strictly above `average * threshold`, where the
//! average is taken over the window *before* the fresh sample is recorded.
//! Only upward moves count; there is no cooldown between consecutive alerts.
//! A window averaging zero (a pair quoted at `0`) has no baseline to exceed.

use crate::types::{Quote, percent_change};

/// 3% above the rolling average.
pub const DEFAULT_SPIKE_THRESHOLD: f64 = 1.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    /// Rolling average the quote was compared against.
    pub average: f64,
    pub quote: Quote,
    pub percent_change: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct SpikeRule {
    threshold: f64,
}

impl SpikeRule {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_spike(&self, average: f64, price: f64) -> bool {
        average > 0.0 && price > average * self.threshold
    }

    pub fn evaluate(&self, average: f64, quote: Quote) -> Option<Spike> {
        if !self.is_spike(average, quote.price) {
            return None;
        }

        Some(Spike {
            average,
            quote,
            percent_change: percent_change(average, quote.price),
        })
    }
}

impl Default for SpikeRule {
    fn default() -> Self {
        Self::new(DEFAULT_SPIKE_THRESHOLD)
    }
}
