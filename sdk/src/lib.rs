//! Affiliate Escrow SDK - Rust SDK for the affiliate escrow Solana program
//!
//! This crate provides:
//!
//! - Program Derived Address (PDA) derivation for every record and vault
//! - Instruction builders for all twelve program instructions
//! - Event parsing from transaction logs
//! - Client-side validation and fee quotes
//! - A blocking RPC account reader
//! - [`LocalLedger`], an in-memory ledger that runs every operation through the
//!   program's own state transitions, for simulations and tests
//!
//! # Example Usage
//!
//! ```no_run
//! use affiliate_escrow_sdk::{pda, transaction_builder, SimpleEscrowClient};
//! use affiliate_escrow::create_campaign::CreateCampaignArgs;
//! use anchor_client::solana_sdk::pubkey::Pubkey;
//!
//! # fn main() -> affiliate_escrow_sdk::Result<()> {
//! let client = SimpleEscrowClient::new("https://api.devnet.solana.com")?;
//!
//! let owner = Pubkey::new_unique();
//! let merchant_pda = pda::merchant_address(&owner);
//! let campaign_pda = pda::campaign_address(&merchant_pda, 1);
//!
//! if client.get_campaign(&campaign_pda)?.is_none() {
//!     let _instruction = transaction_builder::create_campaign()
//!         .owner(owner)
//!         .args(CreateCampaignArgs {
//!             seed: 1,
//!             name: "Summer launch".to_string(),
//!             product_uri: "https://shop.example/launch".to_string(),
//!             budget: 10_000_000_000,
//!             commission_per_referral: 7_000_000_000,
//!             ..CreateCampaignArgs::default()
//!         })
//!         .build_instruction()?;
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod events;
pub mod ledger;
pub mod pda;
pub mod program_types;
pub mod simple_client;
pub mod transaction_builder;
pub mod utils;
pub mod validation;

// Re-export commonly used items
pub use error::{Result, SdkError};
pub use events::{parse_events_from_logs, parse_single_event, EscrowEvent};
pub use ledger::LocalLedger;
pub use program_types::{
    AffiliateSummary, CampaignAffiliateSummary, CampaignStatus, CampaignSummary, ConfigSummary,
    MerchantSummary,
};
pub use simple_client::SimpleEscrowClient;
pub use transaction_builder::{
    close_campaign, create_affiliate, create_campaign, create_merchant, init_config,
    join_campaign, report_conversion, update_affiliate, update_campaign, update_config,
    update_merchant, withdraw_fees, CloseCampaignBuilder, CreateAffiliateBuilder,
    CreateCampaignBuilder, CreateMerchantBuilder, InitConfigBuilder, JoinCampaignBuilder,
    ReportConversionBuilder, UpdateAffiliateBuilder, UpdateCampaignBuilder, UpdateConfigBuilder,
    UpdateMerchantBuilder, WithdrawFeesBuilder,
};
pub use validation::{quote_conversion, quote_creation_fee, ConversionQuote};

// Re-export the program crate and commonly used external types
pub use affiliate_escrow;
pub use anchor_client::solana_client;
pub use anchor_client::solana_sdk;
pub use anchor_client::ClientError;
pub use anchor_lang::{AnchorDeserialize, AnchorSerialize};

use anchor_lang::prelude::Pubkey;
use once_cell::sync::Lazy;

/// Environment variable overriding the program ID compiled into the program crate
pub const PROGRAM_ID_ENV: &str = "AFFILIATE_ESCROW_PROGRAM_ID";

/// Program ID resolved once per process.
///
/// Taken from `AFFILIATE_ESCROW_PROGRAM_ID` when it holds a valid address,
/// otherwise from `affiliate_escrow::ID`.
///
/// # Example
/// ```bash
/// export AFFILIATE_ESCROW_PROGRAM_ID=YourProgramIdHere111111111111111111111111111
/// ```
pub static PROGRAM_ID: Lazy<Pubkey> = Lazy::new(|| {
    let Ok(value) = std::env::var(PROGRAM_ID_ENV) else {
        return affiliate_escrow::ID;
    };
    value.trim().parse().unwrap_or_else(|e| {
        tracing::warn!(
            value = %value,
            error = %e,
            "ignoring invalid {PROGRAM_ID_ENV}, using the compiled program ID"
        );
        affiliate_escrow::ID
    })
});

/// Get the program ID as a `Pubkey`
#[must_use]
pub fn program_id() -> Pubkey {
    *PROGRAM_ID
}

/// Get the program ID as a base58 string
#[must_use]
pub fn program_id_string() -> String {
    program_id().to_string()
}
