//! Program Derived Address (PDA) computation utilities
//!
//! Every function comes in two forms: the plain one derives against the
//! configured program ID ([`crate::program_id`]), the `_with_program_id` one
//! against an explicit ID.

use crate::program_id;
use affiliate_escrow::constants::{
    AFFILIATE_SEED, CAMPAIGN_AFFILIATE_SEED, CAMPAIGN_SEED, CONFIG_SEED, ESCROW_SEED,
    MERCHANT_SEED, TREASURY_SEED,
};
use anchor_lang::prelude::Pubkey;

/// Compute the Config PDA with custom program ID
#[must_use]
pub fn config_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

#[must_use]
pub fn config_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    config_with_program_id(program_id).0
}

/// Compute the Config PDA
#[must_use]
pub fn config() -> (Pubkey, u8) {
    config_with_program_id(&program_id())
}

#[must_use]
pub fn config_address() -> Pubkey {
    config().0
}

/// Compute the fee treasury PDA with custom program ID
#[must_use]
pub fn treasury_with_program_id(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURY_SEED], program_id)
}

#[must_use]
pub fn treasury_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    treasury_with_program_id(program_id).0
}

/// Compute the fee treasury PDA
#[must_use]
pub fn treasury() -> (Pubkey, u8) {
    treasury_with_program_id(&program_id())
}

#[must_use]
pub fn treasury_address() -> Pubkey {
    treasury().0
}

/// Compute the Merchant PDA with custom program ID
///
/// # Arguments
/// * `owner` - The wallet that registered the merchant
/// * `program_id` - The program ID to use for PDA computation
#[must_use]
pub fn merchant_with_program_id(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MERCHANT_SEED, owner.as_ref()], program_id)
}

#[must_use]
pub fn merchant_address_with_program_id(owner: &Pubkey, program_id: &Pubkey) -> Pubkey {
    merchant_with_program_id(owner, program_id).0
}

/// Compute the Merchant PDA
#[must_use]
pub fn merchant(owner: &Pubkey) -> (Pubkey, u8) {
    merchant_with_program_id(owner, &program_id())
}

#[must_use]
pub fn merchant_address(owner: &Pubkey) -> Pubkey {
    merchant(owner).0
}

/// Compute the Affiliate PDA with custom program ID
///
/// # Arguments
/// * `owner` - The wallet that registered the affiliate
/// * `program_id` - The program ID to use for PDA computation
#[must_use]
pub fn affiliate_with_program_id(owner: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AFFILIATE_SEED, owner.as_ref()], program_id)
}

#[must_use]
pub fn affiliate_address_with_program_id(owner: &Pubkey, program_id: &Pubkey) -> Pubkey {
    affiliate_with_program_id(owner, program_id).0
}

/// Compute the Affiliate PDA
#[must_use]
pub fn affiliate(owner: &Pubkey) -> (Pubkey, u8) {
    affiliate_with_program_id(owner, &program_id())
}

#[must_use]
pub fn affiliate_address(owner: &Pubkey) -> Pubkey {
    affiliate(owner).0
}

/// Compute the Campaign PDA with custom program ID
///
/// # Arguments
/// * `merchant` - The merchant PDA (not the owner wallet)
/// * `seed` - The merchant-chosen campaign seed, encoded little-endian
/// * `program_id` - The program ID to use for PDA computation
#[must_use]
pub fn campaign_with_program_id(merchant: &Pubkey, seed: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CAMPAIGN_SEED, merchant.as_ref(), &seed.to_le_bytes()],
        program_id,
    )
}

#[must_use]
pub fn campaign_address_with_program_id(merchant: &Pubkey, seed: u64, program_id: &Pubkey) -> Pubkey {
    campaign_with_program_id(merchant, seed, program_id).0
}

/// Compute the Campaign PDA
#[must_use]
pub fn campaign(merchant: &Pubkey, seed: u64) -> (Pubkey, u8) {
    campaign_with_program_id(merchant, seed, &program_id())
}

#[must_use]
pub fn campaign_address(merchant: &Pubkey, seed: u64) -> Pubkey {
    campaign(merchant, seed).0
}

/// Compute a campaign's escrow vault PDA with custom program ID
#[must_use]
pub fn escrow_with_program_id(campaign: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_SEED, campaign.as_ref()], program_id)
}

#[must_use]
pub fn escrow_address_with_program_id(campaign: &Pubkey, program_id: &Pubkey) -> Pubkey {
    escrow_with_program_id(campaign, program_id).0
}

/// Compute a campaign's escrow vault PDA
#[must_use]
pub fn escrow(campaign: &Pubkey) -> (Pubkey, u8) {
    escrow_with_program_id(campaign, &program_id())
}

#[must_use]
pub fn escrow_address(campaign: &Pubkey) -> Pubkey {
    escrow(campaign).0
}

/// Compute the `CampaignAffiliate` link PDA with custom program ID
///
/// # Arguments
/// * `campaign` - The campaign PDA
/// * `affiliate` - The affiliate PDA (not the owner wallet)
/// * `program_id` - The program ID to use for PDA computation
#[must_use]
pub fn campaign_affiliate_with_program_id(
    campaign: &Pubkey,
    affiliate: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CAMPAIGN_AFFILIATE_SEED, campaign.as_ref(), affiliate.as_ref()],
        program_id,
    )
}

#[must_use]
pub fn campaign_affiliate_address_with_program_id(
    campaign: &Pubkey,
    affiliate: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    campaign_affiliate_with_program_id(campaign, affiliate, program_id).0
}

/// Compute the `CampaignAffiliate` link PDA
#[must_use]
pub fn campaign_affiliate(campaign: &Pubkey, affiliate: &Pubkey) -> (Pubkey, u8) {
    campaign_affiliate_with_program_id(campaign, affiliate, &program_id())
}

#[must_use]
pub fn campaign_affiliate_address(campaign: &Pubkey, affiliate: &Pubkey) -> Pubkey {
    campaign_affiliate(campaign, affiliate).0
}

/// Compute the upgradeable loader program data address for a program
#[must_use]
pub fn program_data_address_with_program_id(program_id: &Pubkey) -> Pubkey {
    affiliate_escrow::init_config::get_program_data_address(program_id)
}
