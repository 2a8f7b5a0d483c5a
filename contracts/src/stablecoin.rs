//! synUSD Stablecoin Contract
//!
//! CEP-18 style pegged token with engine-controlled minting and burning.
//! Supply control is a capability handle rather than an ambient owner: a
//! one-shot `bind_engine` records the engine address, and only that address
//! may call `mint` and `burn`. Transfers and approvals are unrestricted.

use odra::casper_types::U256;
use odra::prelude::*;

use crate::errors::ProtocolError;

const TOKEN_NAME: &str = "Synth USD";
const TOKEN_SYMBOL: &str = "synUSD";
const TOKEN_DECIMALS: u8 = 18;

/// synUSD Stablecoin Contract
#[odra::module]
pub struct SynthUsd {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Decimals (18 for synUSD)
    decimals: Var<u8>,
    /// Total supply
    total_supply: Var<U256>,
    /// Balance mapping
    balances: Mapping<Address, U256>,
    /// Allowance mapping (owner -> spender -> amount)
    allowances: Mapping<(Address, Address), U256>,
    /// The one address allowed to mint and burn, set once via `bind_engine`
    engine: Var<Address>,
}

#[odra::module]
impl SynthUsd {
    /// Initialize the stablecoin
    pub fn init(&mut self) {
        self.name.set(String::from(TOKEN_NAME));
        self.symbol.set(String::from(TOKEN_SYMBOL));
        self.decimals.set(TOKEN_DECIMALS);
        self.total_supply.set(U256::zero());
    }

    // ========== CEP-18 Standard Functions ==========

    /// Get token name
    pub fn name(&self) -> String {
        self.name.get().unwrap_or_else(|| String::from(TOKEN_NAME))
    }

    /// Get token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get().unwrap_or_else(|| String::from(TOKEN_SYMBOL))
    }

    /// Get decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get().unwrap_or(TOKEN_DECIMALS)
    }

    /// Get total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get().unwrap_or(U256::zero())
    }

    /// Get balance of an account
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or(U256::zero())
    }

    /// Get allowance for spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or(U256::zero())
    }

    /// Transfer tokens to recipient
    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.transfer_internal(sender, recipient, amount);
        true
    }

    /// Approve spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.allowances.set(&(owner, spender), amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();

        let current_allowance = self.allowance(owner, spender);
        if current_allowance < amount {
            self.env().revert(ProtocolError::InsufficientTokenBalance);
        }

        self.transfer_internal(owner, recipient, amount);
        self.allowances.set(&(owner, spender), current_allowance - amount);
        true
    }

    // ========== Engine Functions (Restricted) ==========

    /// Mint new tokens to an account (engine only)
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.require_engine();
        if amount.is_zero() {
            self.env().revert(ProtocolError::MustBeMoreThanZero);
        }

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);
        self.total_supply.set(self.total_supply() + amount);
        true
    }

    /// Burn tokens from the engine's own balance (engine only)
    pub fn burn(&mut self, amount: U256) {
        self.require_engine();
        if amount.is_zero() {
            self.env().revert(ProtocolError::MustBeMoreThanZero);
        }

        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(ProtocolError::InsufficientTokenBalance);
        }

        self.balances.set(&caller, current_balance - amount);
        self.total_supply.set(self.total_supply() - amount);
    }

    // ========== Capability Wiring ==========

    /// Bind the engine address. Callable exactly once; the bound address
    /// becomes the sole holder of the mint/burn capability.
    pub fn bind_engine(&mut self, engine: Address) {
        if self.engine.get().is_some() {
            self.env().revert(ProtocolError::EngineAlreadyBound);
        }
        self.engine.set(engine);
    }

    /// Get the bound engine address
    pub fn engine(&self) -> Option<Address> {
        self.engine.get()
    }

    // ========== Internal Functions ==========

    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(ProtocolError::InsufficientTokenBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);
    }

    fn require_engine(&self) {
        let caller = self.env().caller();
        match self.engine.get() {
            Some(engine) if caller == engine => {}
            Some(_) => self.env().revert(ProtocolError::UnauthorizedEngine),
            None => self.env().revert(ProtocolError::EngineNotBound),
        }
    }
}
