use serde::Deserialize;

use crate::dexscreener::errors::FeedError;
use crate::types::Quote;

/// Body of `GET /latest/dex/pairs/{chain}/{address}`.
///
/// The API answers `"pairs": null` for unknown pairs.
#[derive(Debug, Deserialize)]
pub struct PairsEnvelope {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub price_usd: Option<NumberOrString>,

    /// Fully diluted valuation in USD.
    #[serde(default)]
    pub fdv: Option<f64>,
}

/// `priceUsd` is usually a decimal string but some responses carry a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn to_f64(&self) -> Result<f64, FeedError> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| FeedError::InvalidPrice(s.clone())),
        }
    }
}

/// Rounds a USD valuation down to millions with 3 decimals.
pub fn to_millions(usd: f64) -> f64 {
    (usd / 1_000_000.0 * 1_000.0).round() / 1_000.0
}

impl TryFrom<PairsEnvelope> for Quote {
    type Error = FeedError;

    /// Only the first pair is considered.
    fn try_from(envelope: PairsEnvelope) -> Result<Self, Self::Error> {
        let pair = envelope
            .pairs
            .and_then(|pairs| pairs.into_iter().next())
            .ok_or(FeedError::EmptyPairs)?;

        let price = pair
            .price_usd
            .as_ref()
            .ok_or(FeedError::MissingPrice)?
            .to_f64()?;

        if !price.is_finite() {
            return Err(FeedError::InvalidPrice(price.to_string()));
        }

        let cap_millions = to_millions(pair.fdv.unwrap_or(0.0));

        Ok(Quote::new(price, cap_millions))
    }
}
