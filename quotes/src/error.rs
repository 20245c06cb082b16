//! Price provider error types.

/// Errors that can occur while fetching a price.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QuoteError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("provider not connected")]
    NotConnected,

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("no recent price data for {symbol}")]
    NoData { symbol: String },

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("rate limit exceeded")]
    RateLimit,

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}
