//! Telegram Bot API transport over teloxide: a dispatcher for inbound
//! updates and a [`Transport`](scheduler::transport::Transport) for sends.

pub mod client;
pub mod intent;
pub mod listener;

pub use client::TelegramTransport;
pub use intent::Intent;
