//! Price Feed Contract
//!
//! Minimal push-model USD price feed the engine can be wired against on
//! test networks and in the host-environment tests. An operator pushes
//! quotes with `set_answer`; the engine only ever reads the latest round.
//!
//! The feed performs no freshness or deviation checks. Consumers that need
//! a hardened oracle should wire the engine against one; the engine only
//! requires the `latest_round_data` entry point.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::types::PriceRound;

/// Price Feed Contract
#[odra::module]
pub struct PriceFeed {
    /// Human-readable pair description, e.g. "WETH / USD"
    description: Var<String>,
    /// Decimal precision of `latest_answer`
    decimals: Var<u8>,
    /// Latest pushed price
    latest_answer: Var<U256>,
    /// Timestamp of the latest push
    latest_timestamp: Var<u64>,
    /// Monotonic round counter
    round_id: Var<u64>,
}

#[odra::module]
impl PriceFeed {
    /// Initialize the feed with its first answer
    pub fn init(&mut self, description: String, decimals: u8, initial_answer: U256) {
        self.description.set(description);
        self.decimals.set(decimals);
        self.latest_answer.set(initial_answer);
        self.latest_timestamp.set(self.env().get_block_time());
        self.round_id.set(1);
    }

    /// Get the latest round
    pub fn latest_round_data(&self) -> PriceRound {
        PriceRound {
            answer: self.latest_answer.get().unwrap_or_default(),
            decimals: self.decimals.get().unwrap_or_default(),
            round_id: self.round_id.get().unwrap_or_default(),
            updated_at: self.latest_timestamp.get().unwrap_or_default(),
        }
    }

    /// Push a new answer, starting a new round
    pub fn set_answer(&mut self, answer: U256) {
        self.latest_answer.set(answer);
        self.latest_timestamp.set(self.env().get_block_time());
        self.round_id.set(self.round_id.get().unwrap_or_default() + 1);
    }

    /// Get the feed's decimal precision
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or_default()
    }

    /// Get the pair description
    pub fn description(&self) -> String {
        self.description.get().unwrap_or_default()
    }
}
