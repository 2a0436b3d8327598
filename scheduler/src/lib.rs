pub mod dispatcher;
pub mod engine;
pub mod format;
pub mod metrics;
pub mod runner;
pub mod transport;
pub mod types;
