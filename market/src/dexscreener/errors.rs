use thiserror::Error;

/// Why a quote could not be produced.
///
/// Callers treat every variant the same way ("data unavailable");
/// the variants exist for logs only.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response contained no trading pairs")]
    EmptyPairs,

    #[error("pair is missing priceUsd")]
    MissingPrice,

    #[error("unparseable priceUsd: {0:?}")]
    InvalidPrice(String),
}
