//! Target-share computation.
//!
//! For each holding, in input order:
//!
//! ```text
//! price         = round_half_up(raw_price, 2)
//! target_shares = round_half_up(equity * weight / price, 0)
//! net_shares    = target_shares - current_shares
//! ```
//!
//! The first price that cannot be fetched, or that is not a positive finite
//! amount, aborts the whole computation: no partial table is produced. So
//! does a table whose totals would overflow.

use log::debug;
use rust_decimal::Decimal;

use crate::error::{BoxError, Error, Result};
use crate::input::{Holding, PortfolioInput};
use crate::rounding::{quantize_f64, round_half_up};
use crate::table::{RebalanceRow, RebalanceTable};

/// Decimal places prices are quantized to before the division.
pub const DEFAULT_PRICE_PRECISION: u32 = 2;

/// Stateless calculator turning a [`PortfolioInput`] plus prices into a
/// [`RebalanceTable`].
#[derive(Debug, Clone, Copy)]
pub struct RebalanceCalculator {
    price_precision: u32,
}

impl Default for RebalanceCalculator {
    fn default() -> Self {
        Self {
            price_precision: DEFAULT_PRICE_PRECISION,
        }
    }
}

impl RebalanceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantize prices to `dp` decimal places instead of two.
    pub fn with_price_precision(mut self, dp: u32) -> Self {
        self.price_precision = dp;
        self
    }

    /// Fetch each price through `price_of`, one symbol at a time in input
    /// order, then compute the table.
    ///
    /// A fetch error is wrapped in [`Error::PriceFetch`] with the original
    /// error kept as its source; no further symbols are fetched.
    pub fn compute<F, E>(&self, input: &PortfolioInput, mut price_of: F) -> Result<RebalanceTable>
    where
        F: FnMut(&str) -> std::result::Result<f64, E>,
        E: Into<BoxError>,
    {
        let mut rows = Vec::with_capacity(input.len());
        for holding in &input.holdings {
            let raw = price_of(&holding.symbol).map_err(|e| Error::PriceFetch {
                symbol: holding.symbol.clone(),
                source: e.into(),
            })?;
            rows.push(self.row(input.equity, holding, raw)?);
        }
        RebalanceTable::new(input.equity, rows)
    }

    /// Compute the table from prices fetched elsewhere, given in the same
    /// order as `input.holdings`.
    pub fn compute_with_prices(
        &self,
        input: &PortfolioInput,
        prices: &[f64],
    ) -> Result<RebalanceTable> {
        if prices.len() != input.len() {
            return Err(Error::Validation(format!(
                "got {} prices for {} symbols",
                prices.len(),
                input.len()
            )));
        }

        let rows = input
            .holdings
            .iter()
            .zip(prices)
            .map(|(holding, &raw)| self.row(input.equity, holding, raw))
            .collect::<Result<Vec<_>>>()?;
        RebalanceTable::new(input.equity, rows)
    }

    fn row(&self, equity: Decimal, holding: &Holding, raw_price: f64) -> Result<RebalanceRow> {
        let invalid = || Error::InvalidPrice {
            symbol: holding.symbol.clone(),
            price: raw_price,
        };
        let price = quantize_f64(raw_price, self.price_precision).ok_or_else(invalid)?;
        if price <= Decimal::ZERO {
            return Err(invalid());
        }
        debug!("{}: raw price {raw_price} -> {price}", holding.symbol);
        rebalance_row(equity, holding, price)
    }
}

/// Compute one row from an already-quantized, positive price.
pub fn rebalance_row(equity: Decimal, holding: &Holding, price: Decimal) -> Result<RebalanceRow> {
    let allocation = equity.checked_mul(holding.weight).ok_or_else(|| {
        Error::Arithmetic(format!(
            "{equity} * {} overflows for {}",
            holding.weight, holding.symbol
        ))
    })?;
    let shares = allocation.checked_div(price).ok_or_else(|| {
        Error::Arithmetic(format!(
            "cannot divide {allocation} by price {price} for {}",
            holding.symbol
        ))
    })?;
    let target_shares = round_half_up(shares, 0);
    let net_shares_to_rebalance = target_shares
        .checked_sub(holding.current_shares)
        .ok_or_else(|| Error::Arithmetic(format!("net shares overflow for {}", holding.symbol)))?;

    Ok(RebalanceRow {
        symbol: holding.symbol.clone(),
        price,
        weight: holding.weight,
        target_shares,
        current_shares: holding.current_shares,
        net_shares_to_rebalance,
    })
}
