//! Mock provider for testing: implements `PriceProvider` with fixed prices.
//!
//! Use this in integration tests to simulate a market-data feed without
//! network calls.
//!
//! ```
//! use sharecalc_quotes::mock::MockProvider;
//! use sharecalc_quotes::{PriceProvider, QuoteError};
//!
//! let mut provider = MockProvider::builder()
//!     .with_price("SPY", 500.0)
//!     .with_failure("XYZ", QuoteError::NoData { symbol: "XYZ".into() })
//!     .build();
//! provider.connect().unwrap();
//!
//! assert_eq!(provider.latest_price("SPY").unwrap(), 500.0);
//! assert!(provider.latest_price("XYZ").is_err());
//! assert_eq!(provider.requested(), vec!["SPY", "XYZ"]);
//! ```

use std::sync::Mutex;

use crate::PriceProvider;
use crate::error::QuoteError;

/// Builder for `MockProvider`.
#[derive(Default)]
pub struct MockProviderBuilder {
    prices: Vec<(String, f64)>,
    failures: Vec<(String, QuoteError)>,
    require_connect: bool,
}

impl MockProviderBuilder {
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.push((symbol.to_string(), price));
        self
    }

    /// Make every request for `symbol` fail with `error`.
    pub fn with_failure(mut self, symbol: &str, error: QuoteError) -> Self {
        self.failures.push((symbol.to_string(), error));
        self
    }

    /// Allow `latest_price` without calling `connect` first.
    pub fn connected(mut self) -> Self {
        self.require_connect = false;
        self
    }

    pub fn build(self) -> MockProvider {
        MockProvider {
            connected: !self.require_connect,
            prices: self.prices,
            failures: self.failures,
            requested: Mutex::new(Vec::new()),
        }
    }
}

/// A mock provider that records requested symbols and returns fixed prices.
///
/// Symbols with neither a price nor a failure configured fail with
/// [`QuoteError::UnknownSymbol`].
pub struct MockProvider {
    connected: bool,
    prices: Vec<(String, f64)>,
    failures: Vec<(String, QuoteError)>,
    requested: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn builder() -> MockProviderBuilder {
        MockProviderBuilder {
            require_connect: true,
            ..Default::default()
        }
    }

    /// Symbols passed to `latest_price`, in call order (for assertion in tests).
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl PriceProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn connect(&mut self) -> Result<(), QuoteError> {
        self.connected = true;
        Ok(())
    }

    fn latest_price(&self, symbol: &str) -> Result<f64, QuoteError> {
        if !self.connected {
            return Err(QuoteError::NotConnected);
        }

        self.requested
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(symbol.to_string());

        if let Some((_, err)) = self.failures.iter().find(|(s, _)| s == symbol) {
            return Err(err.clone());
        }
        self.prices
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, p)| *p)
            .ok_or_else(|| QuoteError::UnknownSymbol(symbol.to_string()))
    }
}
