//! Yahoo Finance daily-close provider.
//!
//! Looks back a few days so weekends and market holidays still leave at
//! least one close in the window.

pub mod types;

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::Url;
use reqwest::blocking::Client;

use crate::PriceProvider;
use crate::error::QuoteError;
use crate::http;
use types::ChartResponse;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; sharecalc)";

/// Most recent daily close from the Yahoo chart endpoint.
pub struct YahooProvider {
    base_url: String,
    lookback_days: u32,
    timeout: Duration,
    client: Option<Client>,
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooProvider {
    /// Create a new provider handle (not yet connected).
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            lookback_days: 5,
            timeout: Duration::from_secs(10),
            client: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Days of daily bars to request, ending now.
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Request URL for daily bars of `symbol` over the lookback window
    /// ending at `now`.
    pub fn chart_url(&self, symbol: &str, now: DateTime<Utc>) -> Result<Url, QuoteError> {
        let end = now.timestamp();
        let start = (end - i64::from(self.lookback_days) * 86_400).to_string();
        let end = end.to_string();
        http::endpoint(
            &self.base_url,
            &["v8", "finance", "chart", symbol],
            &[
                ("period1", start.as_str()),
                ("period2", end.as_str()),
                ("interval", "1d"),
            ],
        )
    }

    fn require_client(&self) -> Result<&Client, QuoteError> {
        self.client.as_ref().ok_or(QuoteError::NotConnected)
    }
}

/// Pull the last non-null close out of a chart response.
///
/// The close is returned as reported, zero included; only bars without a
/// print are skipped.
pub fn last_close(symbol: &str, resp: &ChartResponse) -> Result<f64, QuoteError> {
    if let Some(err) = &resp.chart.error {
        debug!(
            "{symbol}: chart error {} ({})",
            err.code,
            err.description.as_deref().unwrap_or("no description")
        );
        return Err(QuoteError::UnknownSymbol(symbol.to_string()));
    }

    let result = resp
        .chart
        .result
        .as_ref()
        .and_then(|r| r.first())
        .ok_or_else(|| QuoteError::UnknownSymbol(symbol.to_string()))?;

    result
        .indicators
        .quote
        .first()
        .and_then(|bars| bars.close.iter().rev().flatten().next().copied())
        .ok_or_else(|| QuoteError::NoData {
            symbol: symbol.to_string(),
        })
}

impl PriceProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn connect(&mut self) -> Result<(), QuoteError> {
        if self.lookback_days == 0 {
            return Err(QuoteError::Other("lookback_days must be > 0".into()));
        }
        let client = http::build_client(self.timeout, USER_AGENT)?;
        info!(
            "Yahoo chart client ready ({}-day lookback)",
            self.lookback_days
        );
        self.client = Some(client);
        Ok(())
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        let client = self.require_client()?;
        let url = self.chart_url(symbol, Utc::now())?;
        debug!("GET {url}");

        let resp: ChartResponse = http::get_json(client.get(url), symbol)?;
        last_close(symbol, &resp)
    }
}
