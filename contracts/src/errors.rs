//! Protocol error definitions.

use odra::prelude::*;

/// Synth USD protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProtocolError {
    // Amount validation (1xx)
    MustBeMoreThanZero = 100,

    // Collateral registry (2xx)
    TokenNotAllowed = 200,
    TokenFeedLengthMismatch = 201,

    // Ledger underflow guards (3xx)
    InsufficientCollateral = 300,
    InsufficientDebt = 301,

    // Solvency (4xx)
    BreaksHealthFactor = 400,
    HealthFactorOk = 401,
    HealthFactorNotImproved = 402,

    // Token collaborators (5xx)
    TransferFailed = 500,
    MintFailed = 501,
    InsufficientTokenBalance = 502,

    // Mint/burn capability wiring (6xx)
    UnauthorizedEngine = 600,
    EngineAlreadyBound = 601,
    EngineNotBound = 602,
}

impl ProtocolError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Amount validation
            ProtocolError::MustBeMoreThanZero => "Amount must be more than zero",

            // Collateral registry
            ProtocolError::TokenNotAllowed => "Collateral token is not registered",
            ProtocolError::TokenFeedLengthMismatch => {
                "Collateral token and price feed lists must be the same length"
            }

            // Ledger
            ProtocolError::InsufficientCollateral => "Insufficient collateral deposited",
            ProtocolError::InsufficientDebt => "Insufficient outstanding debt",

            // Solvency
            ProtocolError::BreaksHealthFactor => "Operation breaks the minimum health factor",
            ProtocolError::HealthFactorOk => "Account health factor is not below the minimum",
            ProtocolError::HealthFactorNotImproved => {
                "Liquidation did not improve the account health factor"
            }

            // Token collaborators
            ProtocolError::TransferFailed => "Token transfer failed",
            ProtocolError::MintFailed => "Stablecoin mint failed",
            ProtocolError::InsufficientTokenBalance => "Insufficient token balance",

            // Capability wiring
            ProtocolError::UnauthorizedEngine => "Caller is not the bound engine",
            ProtocolError::EngineAlreadyBound => "Engine is already bound",
            ProtocolError::EngineNotBound => "No engine has been bound",
        }
    }
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ProtocolError> for OdraError {
    fn from(error: ProtocolError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
