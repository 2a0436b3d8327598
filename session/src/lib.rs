pub mod onboarding;
pub mod registry;

/// External chat identity (the Telegram chat id).
pub type ChatId = i64;
