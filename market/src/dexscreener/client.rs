use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::dexscreener::errors::FeedError;
use crate::dexscreener::types::PairsEnvelope;
use crate::feed::PriceFeed;
use crate::types::{PairKey, Quote};

pub const DEFAULT_BASE_URL: &str = "https://api.dexscreener.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the DexScreener pairs endpoint.
///
/// Every request is bounded by its own timeout, so one hung lookup never
/// delays lookups running concurrently on other pairs.
#[derive(Clone)]
pub struct DexScreenerClient {
    http: Client,
    url: String,
}

impl DexScreenerClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn pair_url(&self, key: &PairKey) -> String {
        format!(
            "{}/latest/dex/pairs/{}/{}",
            self.url, key.chain, key.address
        )
    }

    #[instrument(skip(self, key), fields(pair_id = %key), level = "debug")]
    pub async fn fetch_quote(&self, key: &PairKey) -> Result<Quote, FeedError> {
        let url = self.pair_url(key);

        let resp = self.http.get(&url).send().await?.error_for_status()?;

        let envelope: PairsEnvelope = resp.json().await?;
        let quote = Quote::try_from(envelope)?;

        debug!(
            price = quote.price,
            cap_millions = quote.cap_millions,
            "dexscreener quote fetched"
        );

        Ok(quote)
    }
}

#[async_trait]
impl PriceFeed for DexScreenerClient {
    async fn fetch(&self, key: &PairKey) -> Result<Quote, FeedError> {
        self.fetch_quote(key).await
    }
}
