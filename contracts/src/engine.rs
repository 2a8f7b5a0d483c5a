//! Synth Engine Contract
//!
//! The single entry point of the protocol. Keeps the per-account collateral
//! and debt ledger, prices collateral through the paired feeds, enforces the
//! minimum health factor, and runs the liquidation path.
//!
//! Mutation discipline: every operation computes and validates its
//! hypothetical post-state first, persists ledger writes only after all
//! checks pass, and performs collaborator token transfers last. A failed
//! transfer reverts the call and the host discards the earlier writes, so
//! no partial update can survive.

use odra::casper_types::{runtime_args, RuntimeArgs, U256};
use odra::prelude::*;
use odra::CallDef;

use crate::errors::ProtocolError;
use crate::solvency;
use crate::solvency::{
    ADDITIONAL_FEED_PRECISION, FEED_DECIMALS, LIQUIDATION_BONUS, LIQUIDATION_PRECISION,
    LIQUIDATION_THRESHOLD, MIN_HEALTH_FACTOR, PRECISION,
};
use crate::types::{AccountSummary, PriceRound};

/// CEP-18 interface the engine requires of collateral tokens
#[odra::external_contract]
pub trait Cep18 {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
}

/// Price feed interface the engine requires
#[odra::external_contract]
pub trait PriceFeedSource {
    fn latest_round_data(&self) -> PriceRound;
}

/// Stablecoin interface the engine requires
#[odra::external_contract]
pub trait Stablecoin {
    fn mint(&mut self, to: Address, amount: U256) -> bool;
    fn burn(&mut self, amount: U256);
}

/// Collateral entered an account's position
#[odra::event]
pub struct CollateralDeposited {
    /// Depositing account
    pub account: Address,
    /// Collateral token
    pub token: Address,
    /// Deposited amount
    pub amount: U256,
}

/// Collateral left an account's position.
///
/// `from` and `to` differ on liquidation seizure: `from` is the
/// undercollateralized account, `to` the liquidator.
#[odra::event]
pub struct CollateralRedeemed {
    /// Account whose ledger balance decreased
    pub from: Address,
    /// Recipient of the tokens
    pub to: Address,
    /// Collateral token
    pub token: Address,
    /// Redeemed amount
    pub amount: U256,
}

/// Synth Engine Contract
#[odra::module(events = [CollateralDeposited, CollateralRedeemed])]
pub struct SynthEngine {
    /// Stablecoin contract address
    stablecoin: Var<Address>,
    /// Ordered registry of approved collateral tokens; immutable after init
    collateral_tokens: Var<Vec<Address>>,
    /// Collateral token -> price feed pairing; immutable after init
    price_feeds: Mapping<Address, Address>,
    /// (account, token) -> deposited amount; absent key means zero
    collateral_deposited: Mapping<(Address, Address), U256>,
    /// account -> outstanding minted debt; absent key means zero
    debt_minted: Mapping<Address, U256>,
}

#[odra::module]
impl SynthEngine {
    /// Initialize the engine with its collateral registry.
    ///
    /// `collateral_tokens[i]` is priced by `price_feeds[i]`; the two lists
    /// must have the same length and the pairing is fixed for the life of
    /// the contract.
    pub fn init(
        &mut self,
        collateral_tokens: Vec<Address>,
        price_feeds: Vec<Address>,
        stablecoin: Address,
    ) {
        if collateral_tokens.len() != price_feeds.len() {
            self.env().revert(ProtocolError::TokenFeedLengthMismatch);
        }

        for (token, feed) in collateral_tokens.iter().zip(price_feeds.iter()) {
            self.price_feeds.set(token, *feed);
        }
        self.collateral_tokens.set(collateral_tokens);
        self.stablecoin.set(stablecoin);
    }

    // ========== Protocol Operations ==========

    /// Deposit collateral into the caller's position.
    ///
    /// Pulls `amount` of `token` from the caller into the engine's custody.
    /// Deposits only strengthen a position, so no solvency check runs.
    pub fn deposit_collateral(&mut self, token: Address, amount: U256) {
        self.require_nonzero(amount);
        self.require_allowed_token(token);
        let caller = self.env().caller();

        let balance = self.collateral_balance_of(caller, token);
        self.collateral_deposited.set(&(caller, token), balance + amount);
        self.env().emit_event(CollateralDeposited {
            account: caller,
            token,
            amount,
        });

        self.pull_token(token, caller, amount);
    }

    /// Mint stablecoin against the caller's collateral.
    ///
    /// The resulting position must satisfy the minimum health factor; the
    /// staged debt is checked before anything is written.
    pub fn mint(&mut self, amount: U256) {
        self.require_nonzero(amount);
        let caller = self.env().caller();

        let new_debt = self.debt_of(caller) + amount;
        let collateral_value = self.account_collateral_value(caller);
        if solvency::calculate_health_factor(new_debt, collateral_value)
            < U256::from(MIN_HEALTH_FACTOR)
        {
            self.env().revert(ProtocolError::BreaksHealthFactor);
        }
        self.debt_minted.set(&caller, new_debt);

        let args = runtime_args! {
            "to" => caller,
            "amount" => amount
        };
        let call_def = CallDef::new("mint", true, args);
        let success: bool = self.env().call_contract(self.stablecoin_address(), call_def);
        if !success {
            self.env().revert(ProtocolError::MintFailed);
        }
    }

    /// Deposit collateral and mint against it as one atomic unit
    pub fn deposit_collateral_and_mint(
        &mut self,
        token: Address,
        collateral_amount: U256,
        mint_amount: U256,
    ) {
        self.deposit_collateral(token, collateral_amount);
        self.mint(mint_amount);
    }

    /// Burn stablecoin, reducing the caller's debt.
    ///
    /// Pulls `amount` of stablecoin from the caller and destroys it.
    /// Burning only strengthens a position, so no solvency check runs.
    pub fn burn(&mut self, amount: U256) {
        self.require_nonzero(amount);
        let caller = self.env().caller();
        self.burn_internal(caller, caller, amount);
    }

    /// Redeem collateral from the caller's position back to their wallet.
    ///
    /// While the caller has debt, the reduced position must still satisfy
    /// the minimum health factor; with zero debt any amount up to the
    /// deposited balance can be redeemed.
    pub fn redeem_collateral(&mut self, token: Address, amount: U256) {
        self.require_nonzero(amount);
        self.require_allowed_token(token);
        let caller = self.env().caller();

        self.require_healthy_after_redeem(caller, token, amount);
        self.redeem_internal(caller, caller, token, amount);
    }

    /// Burn stablecoin and redeem collateral as one atomic unit.
    ///
    /// The burn runs first so the freed margin is available to the
    /// redemption's solvency check.
    pub fn redeem_collateral_for_synth(
        &mut self,
        token: Address,
        collateral_amount: U256,
        burn_amount: U256,
    ) {
        self.require_nonzero(collateral_amount);
        self.require_nonzero(burn_amount);
        self.require_allowed_token(token);
        let caller = self.env().caller();

        self.burn_internal(caller, caller, burn_amount);
        self.require_healthy_after_redeem(caller, token, collateral_amount);
        self.redeem_internal(caller, caller, token, collateral_amount);
    }

    /// Liquidate an undercollateralized account.
    ///
    /// The caller repays `debt_to_cover` of the account's debt and receives
    /// collateral of equal USD value plus a 10% bonus. The account's health
    /// factor must be below the minimum before, and strictly higher after;
    /// a liquidation that leaves the target no better off is rejected.
    pub fn liquidate(&mut self, token: Address, account: Address, debt_to_cover: U256) {
        self.require_nonzero(debt_to_cover);
        self.require_allowed_token(token);
        let liquidator = self.env().caller();

        let starting_health_factor = self.health_factor(account);
        if starting_health_factor >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(ProtocolError::HealthFactorOk);
        }

        let seized_base = self.token_amount_from_usd(token, debt_to_cover);
        let bonus = seized_base * U256::from(LIQUIDATION_BONUS) / U256::from(LIQUIDATION_PRECISION);
        let seized = seized_base + bonus;

        // Stage the whole post-liquidation position before writing anything.
        let debt = self.debt_of(account);
        if debt < debt_to_cover {
            self.env().revert(ProtocolError::InsufficientDebt);
        }
        let balance = self.collateral_balance_of(account, token);
        if balance < seized {
            self.env().revert(ProtocolError::InsufficientCollateral);
        }

        let ending_collateral_value =
            self.account_collateral_value(account) - self.usd_value(token, seized);
        let ending_health_factor =
            solvency::calculate_health_factor(debt - debt_to_cover, ending_collateral_value);
        if ending_health_factor <= starting_health_factor {
            self.env().revert(ProtocolError::HealthFactorNotImproved);
        }

        self.redeem_internal(account, liquidator, token, seized);
        self.burn_internal(account, liquidator, debt_to_cover);

        self.require_healthy(liquidator);
    }

    // ========== Solvency Queries ==========

    /// Total USD value of an account's deposited collateral
    pub fn account_collateral_value(&self, account: Address) -> U256 {
        let tokens = self.collateral_tokens.get().unwrap_or_default();
        let mut total = U256::zero();
        for token in tokens {
            let balance = self.collateral_balance_of(account, token);
            if balance.is_zero() {
                continue;
            }
            total = total + self.usd_value(token, balance);
        }
        total
    }

    /// Current health factor of an account
    pub fn health_factor(&self, account: Address) -> U256 {
        solvency::calculate_health_factor(
            self.debt_of(account),
            self.account_collateral_value(account),
        )
    }

    /// Health factor of a hypothetical position, for simulating an
    /// operation before committing it
    pub fn calculate_health_factor(&self, total_debt: U256, collateral_value_usd: U256) -> U256 {
        solvency::calculate_health_factor(total_debt, collateral_value_usd)
    }

    /// Account position snapshot
    pub fn account_information(&self, account: Address) -> AccountSummary {
        AccountSummary {
            debt_minted: self.debt_of(account),
            collateral_value_usd: self.account_collateral_value(account),
        }
    }

    // ========== Price Queries ==========

    /// USD value of `amount` of `token` at the latest feed quote
    pub fn usd_value(&self, token: Address, amount: U256) -> U256 {
        let round = self.fetch_round(token);
        solvency::usd_value(round.answer, amount)
    }

    /// Token amount of `token` worth `usd_amount` at the latest feed quote
    pub fn token_amount_from_usd(&self, token: Address, usd_amount: U256) -> U256 {
        let round = self.fetch_round(token);
        solvency::token_amount_from_usd(round.answer, usd_amount)
    }

    // ========== Ledger Accessors ==========

    /// Deposited collateral of an account for a token
    pub fn collateral_balance_of(&self, account: Address, token: Address) -> U256 {
        self.collateral_deposited.get(&(account, token)).unwrap_or_default()
    }

    /// Outstanding minted debt of an account
    pub fn debt_of(&self, account: Address) -> U256 {
        self.debt_minted.get(&account).unwrap_or_default()
    }

    /// Ordered registry of approved collateral tokens
    pub fn collateral_tokens(&self) -> Vec<Address> {
        self.collateral_tokens.get().unwrap_or_default()
    }

    /// Price feed paired with a collateral token
    pub fn price_feed_of(&self, token: Address) -> Option<Address> {
        self.price_feeds.get(&token)
    }

    /// Stablecoin contract address
    pub fn stablecoin(&self) -> Address {
        self.stablecoin_address()
    }

    // ========== Constant Accessors ==========

    /// Internal 18-decimal precision scale
    pub fn precision(&self) -> U256 {
        U256::from(PRECISION)
    }

    /// Scale applied to feed quotes before use
    pub fn additional_feed_precision(&self) -> U256 {
        U256::from(ADDITIONAL_FEED_PRECISION)
    }

    /// Decimal precision feeds are expected to quote in
    pub fn feed_decimals(&self) -> u8 {
        FEED_DECIMALS
    }

    /// Share of collateral value counted toward solvency
    pub fn liquidation_threshold(&self) -> U256 {
        U256::from(LIQUIDATION_THRESHOLD)
    }

    /// Denominator for threshold and bonus
    pub fn liquidation_precision(&self) -> U256 {
        U256::from(LIQUIDATION_PRECISION)
    }

    /// Liquidator bonus share
    pub fn liquidation_bonus(&self) -> U256 {
        U256::from(LIQUIDATION_BONUS)
    }

    /// Minimum health factor
    pub fn min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    // ========== Internal Functions ==========

    fn require_nonzero(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(ProtocolError::MustBeMoreThanZero);
        }
    }

    fn require_allowed_token(&self, token: Address) {
        if self.price_feeds.get(&token).is_none() {
            self.env().revert(ProtocolError::TokenNotAllowed);
        }
    }

    fn require_healthy(&self, account: Address) {
        if self.health_factor(account) < U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(ProtocolError::BreaksHealthFactor);
        }
    }

    /// Check the health factor the account would have after redeeming
    /// `amount` of `token`, without touching state.
    fn require_healthy_after_redeem(&self, account: Address, token: Address, amount: U256) {
        let balance = self.collateral_balance_of(account, token);
        if balance < amount {
            self.env().revert(ProtocolError::InsufficientCollateral);
        }

        let debt = self.debt_of(account);
        if debt.is_zero() {
            return;
        }

        let remaining_value = self.account_collateral_value(account) - self.usd_value(token, amount);
        if solvency::calculate_health_factor(debt, remaining_value) < U256::from(MIN_HEALTH_FACTOR)
        {
            self.env().revert(ProtocolError::BreaksHealthFactor);
        }
    }

    /// Move `amount` of `token` out of `from`'s position to `to`'s wallet
    fn redeem_internal(&mut self, from: Address, to: Address, token: Address, amount: U256) {
        let balance = self.collateral_balance_of(from, token);
        if balance < amount {
            self.env().revert(ProtocolError::InsufficientCollateral);
        }
        self.collateral_deposited.set(&(from, token), balance - amount);
        self.env().emit_event(CollateralRedeemed {
            from,
            to,
            token,
            amount,
        });

        self.push_token(token, to, amount);
    }

    /// Reduce `on_behalf_of`'s debt by `amount`, destroying stablecoin
    /// pulled from `payer`
    fn burn_internal(&mut self, on_behalf_of: Address, payer: Address, amount: U256) {
        let debt = self.debt_of(on_behalf_of);
        if debt < amount {
            self.env().revert(ProtocolError::InsufficientDebt);
        }
        self.debt_minted.set(&on_behalf_of, debt - amount);

        let stablecoin = self.stablecoin_address();
        self.pull_stablecoin(stablecoin, payer, amount);

        let call_def = CallDef::new("burn", true, runtime_args! { "amount" => amount });
        self.env().call_contract::<()>(stablecoin, call_def);
    }

    fn fetch_round(&self, token: Address) -> PriceRound {
        let feed = match self.price_feeds.get(&token) {
            Some(feed) => feed,
            None => self.env().revert(ProtocolError::TokenNotAllowed),
        };
        let call_def = CallDef::new("latest_round_data", false, RuntimeArgs::new());
        self.env().call_contract(feed, call_def)
    }

    fn pull_token(&self, token: Address, from: Address, amount: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => amount
        };
        let call_def = CallDef::new("transfer_from", true, args);
        let success: bool = self.env().call_contract(token, call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn push_token(&self, token: Address, to: Address, amount: U256) {
        let args = runtime_args! {
            "recipient" => to,
            "amount" => amount
        };
        let call_def = CallDef::new("transfer", true, args);
        let success: bool = self.env().call_contract(token, call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn pull_stablecoin(&self, stablecoin: Address, from: Address, amount: U256) {
        let args = runtime_args! {
            "owner" => from,
            "recipient" => self.env().self_address(),
            "amount" => amount
        };
        let call_def = CallDef::new("transfer_from", true, args);
        let success: bool = self.env().call_contract(stablecoin, call_def);
        if !success {
            self.env().revert(ProtocolError::TransferFailed);
        }
    }

    fn stablecoin_address(&self) -> Address {
        self.stablecoin.get().expect("stablecoin not set")
    }
}
