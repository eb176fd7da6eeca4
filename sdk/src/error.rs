//! Error types for the affiliate escrow SDK
//!
//! Custom program errors (Anchor codes 6000 and up) are mapped back to the
//! program's own [`EscrowError`] so callers can match on the exact failure:
//!
//! ```rust
//! use affiliate_escrow::errors::EscrowError;
//! use affiliate_escrow_sdk::SdkError;
//!
//! fn describe(error: &SdkError) -> &'static str {
//!     match error {
//!         SdkError::Program(EscrowError::CampaignPaused) => "top up the campaign budget",
//!         SdkError::Program(EscrowError::AlreadyJoined) => "already promoting this campaign",
//!         _ => "unexpected failure",
//!     }
//! }
//! ```

use affiliate_escrow::errors::EscrowError;
use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

/// Error types that can occur when using the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// Typed program error, either returned by the local ledger or decoded
    /// from a failed transaction
    #[error("Program error {code}: {0}", code = u32::from(*.0))]
    Program(EscrowError),

    /// Error from Anchor framework
    #[error("Anchor error: {0}")]
    Anchor(anchor_lang::error::Error),

    /// Error from Anchor client
    #[error("Anchor client error: {0}")]
    AnchorClient(Box<anchor_client::ClientError>),

    /// Error from serde JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("Affiliate escrow SDK error: {0}")]
    Generic(String),

    /// Event parsing error
    #[error("Event parsing error: {0}")]
    ParseError(String),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Global configuration has not been initialized
    #[error("Global configuration account not found. Ensure the program has been initialized.")]
    ConfigNotFound,

    /// A wallet cannot cover a transfer
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },
}

impl From<EscrowError> for SdkError {
    fn from(error: EscrowError) -> Self {
        Self::Program(error)
    }
}

impl From<anchor_client::ClientError> for SdkError {
    fn from(error: anchor_client::ClientError) -> Self {
        Self::from_anchor_client_error(error)
    }
}

impl From<anchor_lang::error::Error> for SdkError {
    fn from(error: anchor_lang::error::Error) -> Self {
        Self::from_anchor_error(error)
    }
}

impl From<String> for SdkError {
    fn from(msg: String) -> Self {
        Self::Generic(msg)
    }
}

impl From<&str> for SdkError {
    fn from(msg: &str) -> Self {
        Self::Generic(msg.to_string())
    }
}

impl From<anyhow::Error> for SdkError {
    fn from(error: anyhow::Error) -> Self {
        Self::Generic(error.to_string())
    }
}

impl SdkError {
    /// Map an Anchor error to a typed program error when its code is one of ours
    ///
    /// Framework errors (account constraint failures and the like) stay wrapped
    /// in `SdkError::Anchor`.
    #[must_use]
    pub fn from_anchor_error(anchor_error: anchor_lang::error::Error) -> Self {
        use anchor_lang::error::Error;

        match &anchor_error {
            Error::AnchorError(anchor_err) => EscrowError::from_code(anchor_err.error_code_number)
                .map_or(Self::Anchor(anchor_error), Self::Program),
            Error::ProgramError(_) => Self::Anchor(anchor_error),
        }
    }

    /// Map an Anchor client error to a typed program error when the failed
    /// transaction carries one of our custom codes
    pub fn from_anchor_client_error(client_error: anchor_client::ClientError) -> Self {
        if let anchor_client::ClientError::SolanaClientError(solana_err) = &client_error {
            if let Some(
                anchor_client::solana_sdk::transaction::TransactionError::InstructionError(
                    _,
                    anchor_client::solana_sdk::instruction::InstructionError::Custom(error_code),
                ),
            ) = solana_err.get_transaction_error()
            {
                if let Some(error) = EscrowError::from_code(error_code) {
                    return Self::Program(error);
                }
            }
        }

        Self::AnchorClient(Box::new(client_error))
    }

    /// The program error carried by this error, if any
    #[must_use]
    pub const fn program_error(&self) -> Option<EscrowError> {
        match self {
            Self::Program(error) => Some(*error),
            _ => None,
        }
    }
}
