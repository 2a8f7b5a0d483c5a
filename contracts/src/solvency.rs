//! Solvency math: price conversion and health factor.
//!
//! All USD amounts and the health factor are 18-decimal fixed point.
//! Feed prices arrive in 8-decimal precision and are scaled up before use.
//! Integer division truncates; the truncation is an accepted approximation
//! and is never corrected toward either party.

use odra::casper_types::U256;

/// Internal precision scale (1e18)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Scales an 8-decimal feed price up to 18 decimals (1e10)
pub const ADDITIONAL_FEED_PRECISION: u64 = 10_000_000_000;

/// Decimal precision the price feeds are expected to quote in
pub const FEED_DECIMALS: u8 = 8;

/// Share of collateral value counted toward solvency (50 of 100 = 50%,
/// i.e. a 200% overcollateralization requirement)
pub const LIQUIDATION_THRESHOLD: u64 = 50;

/// Denominator for `LIQUIDATION_THRESHOLD` and `LIQUIDATION_BONUS`
pub const LIQUIDATION_PRECISION: u64 = 100;

/// Extra collateral awarded to liquidators (10 of 100 = 10%)
pub const LIQUIDATION_BONUS: u64 = 10;

/// Minimum health factor (1.0 in 18-decimal fixed point)
pub const MIN_HEALTH_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Convert a token amount to its USD value.
///
/// `usd = price * ADDITIONAL_FEED_PRECISION * amount / PRECISION`
pub fn usd_value(price: U256, amount: U256) -> U256 {
    price * U256::from(ADDITIONAL_FEED_PRECISION) * amount / U256::from(PRECISION)
}

/// Convert a USD value to the token amount of equal value.
///
/// Inverse of [`usd_value`] up to integer-division truncation.
pub fn token_amount_from_usd(price: U256, usd_amount: U256) -> U256 {
    usd_amount * U256::from(PRECISION) / (price * U256::from(ADDITIONAL_FEED_PRECISION))
}

/// Health factor of a hypothetical position.
///
/// Zero debt has no factor to compute; the position is safe by definition
/// and `U256::MAX` is returned as the sentinel. Otherwise only
/// `LIQUIDATION_THRESHOLD` percent of the collateral value counts:
///
/// `factor = (value * THRESHOLD / 100) * PRECISION / debt`
pub fn calculate_health_factor(total_debt: U256, collateral_value_usd: U256) -> U256 {
    if total_debt.is_zero() {
        return U256::MAX;
    }
    let adjusted_collateral = collateral_value_usd * U256::from(LIQUIDATION_THRESHOLD)
        / U256::from(LIQUIDATION_PRECISION);
    adjusted_collateral * U256::from(PRECISION) / total_debt
}
