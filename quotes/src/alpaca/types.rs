//! Alpaca market-data API response types.

use serde::Deserialize;

/// Latest trade response (`GET /v2/stocks/{symbol}/trades/latest`).
#[derive(Debug, Deserialize)]
pub struct LatestTradeResponse {
    pub symbol: String,
    #[serde(default)]
    pub trade: Option<Trade>,
}

/// A single trade print.
#[derive(Debug, Deserialize)]
pub struct Trade {
    /// RFC 3339 timestamp.
    #[serde(rename = "t")]
    pub timestamp: String,
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s", default)]
    pub size: u64,
    #[serde(rename = "x", default)]
    pub exchange: String,
}
