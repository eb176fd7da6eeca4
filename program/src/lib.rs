//! Affiliate Escrow Program
//!
//! A Solana-native referral marketplace. Merchants fund campaigns whose budget
//! sits in a program-controlled escrow; affiliates join campaigns and are paid a
//! fixed commission out of escrow for every conversion the merchant reports.
//!
//! ## Core Features
//! - Global configuration with campaign creation and commission fees
//! - Merchant and affiliate registries keyed by owner wallet
//! - Campaign escrow with top-ups and an automatic pause when the budget can
//!   no longer cover one commission
//! - Atomic conversion payouts split between the affiliate and the treasury
//! - Campaign closure returning the remaining escrow to the merchant
//! - Admin fee withdrawal from the treasury

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(unexpected_cfgs)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::needless_pass_by_value)] // Anchor handlers take an owned Context
#![allow(clippy::unnecessary_wraps)] // Anchor handlers return Result<()> for consistency
#![allow(clippy::missing_errors_doc)]
#![allow(deprecated)] // Anchor framework uses deprecated AccountInfo::realloc internally

use anchor_lang::prelude::*;

pub mod close_campaign;
pub mod constants;
pub mod create_affiliate;
pub mod create_campaign;
pub mod create_merchant;
pub mod errors;
pub mod events;
pub mod init_config;
pub mod join_campaign;
pub mod report_conversion;
pub mod state;
pub mod update_affiliate;
pub mod update_campaign;
pub mod update_config;
pub mod update_merchant;
pub mod utils;
pub mod validation;
pub mod withdraw_fees;

use close_campaign::*;
use create_affiliate::*;
use create_campaign::*;
use create_merchant::*;
use init_config::*;
use join_campaign::*;
use report_conversion::*;
use update_affiliate::*;
use update_campaign::*;
use update_config::*;
use update_merchant::*;
use withdraw_fees::*;

declare_id!("2t869qi1VcP7H2o4zYfWX8sw9fcZwrCP4GBwmFuWa7u9");

#[program]
pub mod affiliate_escrow {
    use super::*;

    /// Initialize global program configuration and the fee treasury
    ///
    /// # Errors
    /// Returns an error if:
    /// - The signer is not the program's upgrade authority
    /// - The program data account is wrong or unreadable
    /// - The configuration was already initialized
    /// - Either fee rate exceeds 10,000 basis points
    pub fn init_config(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
        init_config::handler(ctx, args)
    }

    /// Update fee rates, policy switches or the admin
    ///
    /// Changes apply to operations executed afterwards only.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - No field is provided
    /// - A fee rate exceeds 10,000 basis points
    pub fn update_config(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
        update_config::handler(ctx, args)
    }

    /// Sweep the collected fees to a destination wallet; the rent reserve stays
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the admin
    /// - The treasury is empty
    pub fn withdraw_fees(ctx: Context<WithdrawFees>) -> Result<()> {
        withdraw_fees::handler(ctx)
    }

    /// Register the signer as a merchant
    ///
    /// # Errors
    /// Returns an error if:
    /// - A merchant record already exists for the signer
    /// - Name or description is out of bounds
    pub fn create_merchant(ctx: Context<CreateMerchant>, args: CreateMerchantArgs) -> Result<()> {
        create_merchant::handler(ctx, args)
    }

    /// Patch the signer's merchant record
    ///
    /// # Errors
    /// Returns an error if a provided name or description is out of bounds
    pub fn update_merchant(ctx: Context<UpdateMerchant>, args: UpdateMerchantArgs) -> Result<()> {
        update_merchant::handler(ctx, args)
    }

    /// Register the signer as an affiliate
    ///
    /// # Errors
    /// Returns an error if:
    /// - An affiliate record already exists for the signer
    /// - Name or description is out of bounds
    /// - The configuration requires a payout address and none is given
    pub fn create_affiliate(
        ctx: Context<CreateAffiliate>,
        args: CreateAffiliateArgs,
    ) -> Result<()> {
        create_affiliate::handler(ctx, args)
    }

    /// Patch the signer's affiliate record
    ///
    /// # Errors
    /// Returns an error if a provided name or description is out of bounds
    pub fn update_affiliate(
        ctx: Context<UpdateAffiliate>,
        args: UpdateAffiliateArgs,
    ) -> Result<()> {
        update_affiliate::handler(ctx, args)
    }

    /// Open a campaign and fund its escrow
    ///
    /// Moves the budget into the escrow PDA and the creation fee into the
    /// treasury.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The merchant already has a campaign with this seed
    /// - Name, description, product URI or end time is invalid
    /// - Budget or commission is zero
    /// - The merchant cannot pay budget plus fee
    pub fn create_campaign(ctx: Context<CreateCampaign>, args: CreateCampaignArgs) -> Result<()> {
        create_campaign::handler(ctx, args)
    }

    /// Edit campaign fields and optionally top up its escrow
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller does not own the campaign
    /// - The campaign is closed
    /// - Any provided field is invalid
    pub fn update_campaign(ctx: Context<UpdateCampaign>, args: UpdateCampaignArgs) -> Result<()> {
        update_campaign::handler(ctx, args)
    }

    /// Link the signing affiliate to a campaign
    ///
    /// # Errors
    /// Returns an error if:
    /// - The campaign is closed, paused or past its end time
    /// - The affiliate already joined
    pub fn join_campaign(ctx: Context<JoinCampaign>) -> Result<()> {
        join_campaign::handler(ctx)
    }

    /// Pay one commission out of escrow for a conversion
    ///
    /// The protocol fee goes to the treasury and the remainder to the
    /// affiliate's payout address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller does not own the campaign
    /// - The campaign is closed, or expired while expiry blocks conversions
    /// - The payout address does not match the affiliate's
    /// - The escrow cannot cover the commission
    pub fn report_conversion(ctx: Context<ReportConversion>) -> Result<()> {
        report_conversion::handler(ctx)
    }

    /// Close a campaign and return its escrow
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller does not own the campaign
    /// - The campaign is already closed
    pub fn close_campaign(ctx: Context<CloseCampaign>) -> Result<()> {
        close_campaign::handler(ctx)
    }
}
