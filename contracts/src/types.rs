//! Common types used across the protocol.

use odra::casper_types::U256;
use odra::prelude::*;

/// Price quote returned by a feed.
///
/// Only `answer` and `decimals` are consumed by the protocol; `round_id`
/// and `updated_at` are carried for external verification. Freshness is
/// the feed operator's responsibility.
#[odra::odra_type]
pub struct PriceRound {
    /// Integer price value in `decimals` precision
    pub answer: U256,
    /// Decimal places for `answer`
    pub decimals: u8,
    /// Monotonic round counter
    pub round_id: u64,
    /// Timestamp of the last answer update
    pub updated_at: u64,
}

/// Snapshot of an account's position.
#[odra::odra_type]
pub struct AccountSummary {
    /// Outstanding minted stablecoin debt (18 decimals)
    pub debt_minted: U256,
    /// Total USD value of deposited collateral (18 decimals)
    pub collateral_value_usd: U256,
}
