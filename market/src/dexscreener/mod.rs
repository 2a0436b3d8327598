pub mod client;
pub mod errors;
pub mod types;

pub use client::DexScreenerClient;
pub use errors::FeedError;
pub use types::*;
