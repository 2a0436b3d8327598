//! Signals derived from a token's rolling window.

pub mod spike;

pub use spike::{DEFAULT_SPIKE_THRESHOLD, Spike, SpikeRule};
