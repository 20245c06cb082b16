//! Fetching prices for a list of symbols.

use log::debug;

use crate::{PriceProvider, QuoteError};

/// A symbol and its latest price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
}

/// Fetch prices one symbol at a time, in input order.
///
/// Stops at the first failure.
pub fn fetch_prices<P>(provider: &P, symbols: &[&str]) -> Result<Vec<PriceQuote>, QuoteError>
where
    P: PriceProvider + ?Sized,
{
    symbols
        .iter()
        .map(|&symbol| {
            let price = provider.latest_price(symbol)?;
            debug!("{} {symbol} = {price}", provider.name());
            Ok(PriceQuote {
                symbol: symbol.to_string(),
                price,
            })
        })
        .collect()
}

/// Fetch prices on a bounded pool of `workers` threads.
///
/// Returns one result per symbol, in input order, so the caller decides how
/// to treat failures. The outer error only covers pool setup.
#[cfg(feature = "parallel")]
pub fn fetch_prices_parallel<P>(
    provider: &P,
    symbols: &[&str],
    workers: usize,
) -> Result<Vec<Result<PriceQuote, QuoteError>>, QuoteError>
where
    P: PriceProvider + ?Sized,
{
    use rayon::prelude::*;

    if workers == 0 {
        return Err(QuoteError::Other("workers must be > 0".into()));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| QuoteError::Other(format!("failed to build fetch pool: {e}")))?;

    Ok(pool.install(|| {
        symbols
            .par_iter()
            .map(|&symbol| {
                let price = provider.latest_price(symbol)?;
                debug!("{} {symbol} = {price}", provider.name());
                Ok(PriceQuote {
                    symbol: symbol.to_string(),
                    price,
                })
            })
            .collect()
    }))
}
