//! Price providers for sharecalc.
//!
//! Provides a `PriceProvider` trait that abstracts over market-data sources.
//! Implementations:
//!
//! - **Alpaca** (feature `alpaca`): latest IEX trade from the Alpaca data API
//! - **Yahoo** (feature `yahoo`): latest daily close from the Yahoo chart API
//! - **Mock** (always available): fixed prices for tests
//!
//! A provider is built from explicit settings and initialized with
//! [`PriceProvider::connect`] before use; there is no global client state.

pub mod error;
pub mod fetch;
pub mod mock;

#[cfg(any(feature = "alpaca", feature = "yahoo"))]
mod http;

#[cfg(feature = "alpaca")]
pub mod alpaca;

#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use error::QuoteError;
pub use fetch::{PriceQuote, fetch_prices};

#[cfg(feature = "parallel")]
pub use fetch::fetch_prices_parallel;

/// A market-data source that can report the latest price of a ticker.
///
/// `latest_price` takes `&self` so one connected provider can be shared
/// across fetch workers.
pub trait PriceProvider: Send + Sync {
    /// Short name for logs and `--provider` selection.
    fn name(&self) -> &'static str;

    /// Initialize the client (HTTP session, credential checks).
    fn connect(&mut self) -> Result<(), QuoteError>;

    /// Most recent trade price, or most recent daily close, for `symbol`.
    fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn connect(&mut self) -> Result<(), QuoteError> {
        (**self).connect()
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        (**self).latest_price(symbol)
    }
}
