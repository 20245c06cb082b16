//! Alpaca market-data provider.

pub mod types;

use std::time::Duration;

use log::{debug, info};
use reqwest::Url;
use reqwest::blocking::Client;
use zeroize::Zeroizing;

use crate::PriceProvider;
use crate::error::QuoteError;
use crate::http;
use types::LatestTradeResponse;

pub const DEFAULT_BASE_URL: &str = "https://data.alpaca.markets";

const USER_AGENT: &str = concat!("sharecalc/", env!("CARGO_PKG_VERSION"));

/// Latest-trade price from the Alpaca stock data API.
///
/// Uses the free `iex` feed unless configured otherwise. Blocking (sync)
/// via reqwest::blocking.
pub struct AlpacaProvider {
    api_key: String,
    secret_key: Zeroizing<String>,
    base_url: String,
    feed: String,
    timeout: Duration,
    client: Option<Client>,
}

impl AlpacaProvider {
    /// Create a new provider handle (not yet connected).
    pub fn new(api_key: &str, secret_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            secret_key: Zeroizing::new(secret_key.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
            feed: "iex".to_string(),
            timeout: Duration::from_secs(10),
            client: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Trade feed (`iex` or `sip`).
    pub fn with_feed(mut self, feed: &str) -> Self {
        self.feed = feed.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request URL for the latest trade of `symbol`.
    pub fn latest_trade_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        http::endpoint(
            &self.base_url,
            &["v2", "stocks", symbol, "trades", "latest"],
            &[("feed", self.feed.as_str())],
        )
    }

    fn require_client(&self) -> Result<&Client, QuoteError> {
        self.client.as_ref().ok_or(QuoteError::NotConnected)
    }
}

/// Pull the trade price out of a latest-trade response.
///
/// The price is returned as reported; the calculator decides whether it is
/// usable.
pub fn price_from_response(resp: &LatestTradeResponse) -> Result<f64, QuoteError> {
    resp.trade
        .as_ref()
        .map(|trade| trade.price)
        .ok_or_else(|| QuoteError::NoData {
            symbol: resp.symbol.clone(),
        })
}

impl PriceProvider for AlpacaProvider {
    fn name(&self) -> &'static str {
        "alpaca"
    }

    fn connect(&mut self) -> Result<(), QuoteError> {
        if self.api_key.is_empty() || self.secret_key.is_empty() {
            return Err(QuoteError::Auth("Alpaca API key and secret are required".into()));
        }
        let client = http::build_client(self.timeout, USER_AGENT)?;
        info!("Alpaca data client ready ({} feed)", self.feed);
        self.client = Some(client);
        Ok(())
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        let client = self.require_client()?;
        let url = self.latest_trade_url(symbol)?;
        debug!("GET {url}");

        let request = client
            .get(url)
            .header("APCA-API-KEY-ID", &self.api_key)
            .header("APCA-API-SECRET-KEY", self.secret_key.as_str());
        let resp: LatestTradeResponse = http::get_json(request, symbol)?;
        price_from_response(&resp)
    }
}
