use std::collections::VecDeque;

use crate::types::Quote;

/// One hour of 5-minute samples.
pub const DEFAULT_WINDOW_SIZE: usize = 12;

/// Fixed-capacity FIFO of the most recent quotes for one token.
///
/// Prices and caps travel together in one `Quote`, so both series always
/// have the same length. The window is either empty (never warmed up) or
/// holds exactly `capacity` samples.
#[derive(Debug, Clone)]
pub struct PriceWindow {
    samples: VecDeque<Quote>,
    capacity: usize,
}

impl PriceWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Fills every slot with `first`, so the average starts at the first
    /// observed price instead of being dragged towards zero.
    pub fn initialize(&mut self, first: Quote) {
        self.samples.clear();
        self.samples.extend(std::iter::repeat_n(first, self.capacity));
    }

    /// Appends `sample` and evicts the oldest one.
    ///
    /// An empty window is warmed up with `sample` instead.
    pub fn record(&mut self, sample: Quote) {
        if self.samples.is_empty() {
            self.initialize(sample);
            return;
        }

        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Arithmetic mean of the prices; `None` before warm-up.
    ///
    /// Computed as a running mean so a window of identical samples averages
    /// to exactly that sample.
    pub fn average(&self) -> Option<f64> {
        let mut prices = self.prices();
        let mut mean = prices.next()?;
        for (i, p) in prices.enumerate() {
            mean += (p - mean) / (i + 2) as f64;
        }
        Some(mean)
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|q| q.price)
    }

    pub fn caps(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|q| q.cap_millions)
    }

    pub fn latest(&self) -> Option<Quote> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PriceWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}
