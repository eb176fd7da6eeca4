//! Client-side validation and fee quotes
//!
//! Every check delegates to the program's own validation layer so a request
//! that passes here fails on-chain only for state reasons (duplicates, pause,
//! balances), never for malformed input.

use crate::error::{Result, SdkError};
use affiliate_escrow::{
    constants::VAULT_RENT_RESERVE_LAMPORTS,
    create_affiliate::CreateAffiliateArgs,
    create_campaign::CreateCampaignArgs,
    state::{Campaign, Config},
    update_campaign::UpdateCampaignArgs,
    utils::{calculate_fee, split_commission},
    validation,
};
use serde::{Deserialize, Serialize};

/// Amounts moved by one conversion at the current configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionQuote {
    /// Lamports leaving escrow
    pub commission: u64,
    /// Lamports credited to the treasury
    pub fee: u64,
    /// Lamports credited to the affiliate's payout address
    pub net: u64,
    /// Escrow balance after the conversion
    pub available_budget_after: u64,
    /// Whether the campaign pauses as a result
    pub pauses_campaign: bool,
}

/// Creation fee charged on a deposit of `budget` lamports
///
/// The same rate applies to initial budgets and top-ups.
///
/// # Example
/// ```
/// use affiliate_escrow_sdk::validation::quote_creation_fee;
///
/// // 1% of 10 SOL
/// assert_eq!(quote_creation_fee(10_000_000_000, 100).unwrap(), 100_000_000);
/// ```
pub fn quote_creation_fee(budget: u64, campaign_creation_fee_bps: u16) -> Result<u64> {
    validation::validate_fee_bps(campaign_creation_fee_bps)?;
    Ok(calculate_fee(budget, campaign_creation_fee_bps)?)
}

/// Total a merchant wallet pays to open a campaign: budget, creation fee and
/// the escrow's rent reserve
pub fn quote_campaign_cost(budget: u64, campaign_creation_fee_bps: u16) -> Result<u64> {
    let fee = quote_creation_fee(budget, campaign_creation_fee_bps)?;
    budget
        .checked_add(fee)
        .and_then(|cost| cost.checked_add(VAULT_RENT_RESERVE_LAMPORTS))
        .ok_or_else(|| SdkError::Generic("Campaign cost overflows u64".to_string()))
}

/// Quote the next conversion on `campaign` without mutating it
///
/// # Errors
/// - `CampaignClosed` if the campaign is closed
/// - `InsufficientFunds` if the escrow cannot cover one commission
pub fn quote_conversion(campaign: &Campaign, config: &Config) -> Result<ConversionQuote> {
    campaign.ensure_open()?;
    let mut preview = campaign.clone();
    let split = preview.debit_commission(config.commission_fee_bps)?;

    Ok(ConversionQuote {
        commission: split.commission,
        fee: split.fee,
        net: split.net,
        available_budget_after: preview.available_budget,
        pauses_campaign: preview.is_paused,
    })
}

/// Number of conversions the current escrow can still pay for
#[must_use]
pub fn remaining_conversions(campaign: &Campaign) -> u64 {
    campaign
        .available_budget
        .checked_div(campaign.commission_per_referral)
        .unwrap_or_default()
}

/// Validate merchant or affiliate profile fields
pub fn validate_profile(name: &str, description: &str) -> Result<()> {
    validation::validate_name(name)?;
    validation::validate_description(description)?;
    Ok(())
}

/// Validate affiliate registration against the live configuration
pub fn validate_affiliate_registration(args: &CreateAffiliateArgs, config: &Config) -> Result<()> {
    Ok(args.validate(config)?)
}

/// Validate campaign creation arguments at `now`
pub fn validate_campaign_creation(args: &CreateCampaignArgs, now: i64) -> Result<()> {
    Ok(args.validate(now)?)
}

/// Validate campaign update arguments at `now`
pub fn validate_campaign_update(args: &UpdateCampaignArgs, now: i64) -> Result<()> {
    Ok(args.validate(now)?)
}

/// Validate a product URI
pub fn validate_product_uri(product_uri: &str) -> Result<()> {
    Ok(validation::validate_product_uri(product_uri)?)
}

/// Validate a fee rate in basis points
pub fn validate_fee_bps(fee_bps: u16) -> Result<()> {
    Ok(validation::validate_fee_bps(fee_bps)?)
}

/// Split a commission into fee and net at `commission_fee_bps`
pub fn split(commission: u64, commission_fee_bps: u16) -> Result<(u64, u64)> {
    validation::validate_fee_bps(commission_fee_bps)?;
    let split = split_commission(commission, commission_fee_bps)?;
    Ok((split.fee, split.net))
}
