pub mod config;
pub mod error;
pub mod router;
pub mod telegram;
