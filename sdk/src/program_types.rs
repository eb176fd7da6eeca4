//! JSON-serializable views of the program's accounts
//!
//! The on-chain records are re-exported as-is; the summaries below add the
//! account address and derived fields for dashboards and APIs.

pub use affiliate_escrow::state::{Affiliate, Campaign, CampaignAffiliate, Config, Merchant};

use crate::utils::format_sol;
use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a campaign at a given time
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Accepting affiliates and conversions
    Active,
    /// Escrow cannot cover one commission; a top-up reactivates it
    Paused,
    /// Past its end time; no new affiliates
    Expired,
    /// Terminal
    Closed,
}

impl CampaignStatus {
    /// Status of `campaign` at `now`, closed taking precedence over paused over expired
    #[must_use]
    pub fn of(campaign: &Campaign, now: i64) -> Self {
        if campaign.is_closed {
            Self::Closed
        } else if campaign.is_paused {
            Self::Paused
        } else if campaign.is_expired(now) {
            Self::Expired
        } else {
            Self::Active
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub address: Pubkey,
    pub admin: Pubkey,
    pub campaign_creation_fee_bps: u16,
    pub commission_fee_bps: u16,
    pub require_payout_address: bool,
    pub expiry_blocks_conversions: bool,
}

impl ConfigSummary {
    #[must_use]
    pub const fn new(address: Pubkey, config: &Config) -> Self {
        Self {
            address,
            admin: config.admin,
            campaign_creation_fee_bps: config.campaign_creation_fee_bps,
            commission_fee_bps: config.commission_fee_bps,
            require_payout_address: config.require_payout_address,
            expiry_blocks_conversions: config.expiry_blocks_conversions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantSummary {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub description: String,
    pub total_campaigns: u32,
    pub total_spent: u64,
    /// `total_spent` rendered in SOL
    pub total_spent_display: String,
}

impl MerchantSummary {
    #[must_use]
    pub fn new(address: Pubkey, merchant: &Merchant) -> Self {
        Self {
            address,
            owner: merchant.owner,
            name: merchant.name.clone(),
            description: merchant.description.clone(),
            total_campaigns: merchant.total_campaigns,
            total_spent: merchant.total_spent,
            total_spent_display: format_sol(merchant.total_spent),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateSummary {
    pub address: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub description: String,
    pub payout_address: Pubkey,
    pub total_campaigns: u32,
    pub total_earned: u64,
    pub total_earned_display: String,
}

impl AffiliateSummary {
    #[must_use]
    pub fn new(address: Pubkey, affiliate: &Affiliate) -> Self {
        Self {
            address,
            owner: affiliate.owner,
            name: affiliate.name.clone(),
            description: affiliate.description.clone(),
            payout_address: affiliate.payout_address,
            total_campaigns: affiliate.total_campaigns,
            total_earned: affiliate.total_earned,
            total_earned_display: format_sol(affiliate.total_earned),
        }
    }
}

/// Campaign view with its lifecycle status and spend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub address: Pubkey,
    pub merchant: Pubkey,
    pub seed: u64,
    pub name: String,
    pub description: String,
    pub product_uri: String,
    pub status: CampaignStatus,
    pub total_budget: u64,
    pub available_budget: u64,
    /// Lamports paid out as commissions so far
    pub spent_budget: u64,
    pub commission_per_referral: u64,
    /// Conversions the remaining escrow can pay for
    pub remaining_conversions: u64,
    pub successful_referrals: u64,
    pub total_affiliates: u32,
    pub created_at: i64,
    pub ends_at: Option<i64>,
}

impl CampaignSummary {
    /// Summarize `campaign` as seen at `now`
    #[must_use]
    pub fn new(address: Pubkey, campaign: &Campaign, now: i64) -> Self {
        Self {
            address,
            merchant: campaign.merchant,
            seed: campaign.seed,
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            product_uri: campaign.product_uri.clone(),
            status: CampaignStatus::of(campaign, now),
            total_budget: campaign.total_budget,
            available_budget: campaign.available_budget,
            spent_budget: campaign
                .total_budget
                .saturating_sub(campaign.available_budget),
            commission_per_referral: campaign.commission_per_referral,
            remaining_conversions: crate::validation::remaining_conversions(campaign),
            successful_referrals: campaign.successful_referrals,
            total_affiliates: campaign.total_affiliates,
            created_at: campaign.created_at,
            ends_at: campaign.ends_at,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignAffiliateSummary {
    pub address: Pubkey,
    pub campaign: Pubkey,
    pub affiliate: Pubkey,
    pub successful_referrals: u64,
    pub total_earned: u64,
    pub joined_at: i64,
}

impl CampaignAffiliateSummary {
    #[must_use]
    pub const fn new(address: Pubkey, link: &CampaignAffiliate) -> Self {
        Self {
            address,
            campaign: link.campaign,
            affiliate: link.affiliate,
            successful_referrals: link.successful_referrals,
            total_earned: link.total_earned,
            joined_at: link.joined_at,
        }
    }
}
