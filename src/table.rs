//! Rebalance result rows and their text rendering.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// One symbol's line in the result table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RebalanceRow {
    pub symbol: String,
    /// Quantized price actually used for the division.
    pub price: Decimal,
    pub weight: Decimal,
    /// Whole shares.
    pub target_shares: Decimal,
    pub current_shares: Decimal,
    /// Positive = buy, negative = sell.
    pub net_shares_to_rebalance: Decimal,
}

/// Summary figures across all rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Totals {
    /// Σ target_shares × price.
    pub target_value: Decimal,
    /// Equity not allocated after rounding (negative when over-allocated).
    pub cash_left: Decimal,
    pub buys: usize,
    pub sells: usize,
}

impl Totals {
    fn from_rows(equity: Decimal, rows: &[RebalanceRow]) -> Result<Self> {
        let mut target_value = Decimal::ZERO;
        for r in rows {
            target_value = r
                .target_shares
                .checked_mul(r.price)
                .and_then(|v| target_value.checked_add(v))
                .ok_or_else(|| {
                    Error::Arithmetic(format!("total target value overflows at {}", r.symbol))
                })?;
        }
        let cash_left = equity
            .checked_sub(target_value)
            .ok_or_else(|| Error::Arithmetic("unallocated cash overflows".into()))?;

        Ok(Self {
            target_value,
            cash_left,
            buys: rows
                .iter()
                .filter(|r| r.net_shares_to_rebalance > Decimal::ZERO)
                .count(),
            sells: rows
                .iter()
                .filter(|r| r.net_shares_to_rebalance < Decimal::ZERO)
                .count(),
        })
    }
}

/// The full result, rows in input order.
///
/// Totals are computed when the table is built, so a table that exists can
/// always be rendered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RebalanceTable {
    pub equity: Decimal,
    rows: Vec<RebalanceRow>,
    totals: Totals,
}

impl RebalanceTable {
    pub(crate) fn new(equity: Decimal, rows: Vec<RebalanceRow>) -> Result<Self> {
        let totals = Totals::from_rows(equity, &rows)?;
        Ok(Self {
            equity,
            rows,
            totals,
        })
    }

    pub fn rows(&self) -> &[RebalanceRow] {
        &self.rows
    }

    /// First row for `symbol` (symbols are not deduplicated).
    pub fn row(&self, symbol: &str) -> Option<&RebalanceRow> {
        self.rows.iter().find(|r| r.symbol == symbol)
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }
}

const HEADERS: [&str; 6] = [
    "symbol",
    "price",
    "weight",
    "target_shares",
    "current_shares",
    "net_shares_to_rebalance",
];

impl std::fmt::Display for RebalanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<[String; 6]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.symbol.clone(),
                    r.price.normalize().to_string(),
                    r.weight.normalize().to_string(),
                    r.target_shares.normalize().to_string(),
                    r.current_shares.normalize().to_string(),
                    r.net_shares_to_rebalance.normalize().to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        write!(f, "  {:<w$}", HEADERS[0], w = widths[0])?;
        for (h, w) in HEADERS.iter().zip(widths).skip(1) {
            write!(f, "  {h:>w$}")?;
        }
        writeln!(f)?;

        for row in &cells {
            write!(f, "  {:<w$}", row[0], w = widths[0])?;
            for (cell, w) in row.iter().zip(widths).skip(1) {
                write!(f, "  {cell:>w$}")?;
            }
            writeln!(f)?;
        }

        let totals = &self.totals;
        writeln!(
            f,
            "\nTarget value ${:.2} of ${:.2} equity (${:.2} unallocated); {} to buy, {} to sell",
            totals.target_value, self.equity, totals.cash_left, totals.buys, totals.sells,
        )
    }
}
