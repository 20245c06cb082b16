//! Half-up decimal quantization.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `precision` decimal places, ties away from zero.
///
/// Share targets and prices are never negative at the midpoint, so for every
/// value this crate rounds this is plain half-up.
pub fn round_half_up(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantize a float (as returned by a market-data feed) to `precision`
/// decimal places.
///
/// The float goes through its shortest round-trip decimal representation
/// first, so `2.675` quantizes to `2.68` rather than to the `2.67` its binary
/// expansion would suggest. Returns `None` for NaN, infinities and values
/// outside the `Decimal` range.
pub fn quantize_f64(value: f64, precision: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let exact = Decimal::from_str(&value.to_string()).ok()?;
    Some(round_half_up(exact, precision))
}
