//! Synth USD Contracts
//!
//! Overcollateralized, USD-pegged synthetic asset protocol.
//!
//! ## Architecture
//!
//! - **Engine**: Single entry point; collateral/debt ledger, solvency
//!   enforcement, liquidation
//! - **Stablecoin (synUSD)**: Protocol stablecoin with engine-bound
//!   mint/burn capability
//! - **PriceFeed**: Push-model USD price feed (8-decimal quotes)
//! - **Solvency**: Pure price conversion and health factor math
//!
//! ## Solvency Model
//!
//! Every account must keep its health factor at or above 1.0: only 50% of
//! deposited collateral value counts against minted debt, so positions are
//! at least 200% overcollateralized. Accounts that fall below the minimum
//! can be liquidated by anyone, with a 10% collateral bonus to the
//! liquidator.

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod errors;
pub mod solvency;
pub mod types;

// Contract modules
pub mod engine;
pub mod price_feed;
pub mod stablecoin;
