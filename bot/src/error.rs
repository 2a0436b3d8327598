use thiserror::Error;

/// Startup and transport failures of the bot process.
///
/// Configuration variants are fatal: the process logs them and exits.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing required secret: {0}")]
    MissingSecret(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidConfig { name: &'static str, value: String },

    #[error("telegram api error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}
