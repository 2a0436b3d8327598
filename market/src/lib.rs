pub mod dexscreener;
pub mod feed;
pub mod pulse;
pub mod rolling_window;
pub mod token;
pub mod types;

pub use feed::PriceFeed;
pub use types::{PairKey, Quote};
