use anchor_lang::prelude::*;

/// Event emitted when the global configuration is created
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigInitialized {
    /// Protocol admin
    pub admin: Pubkey,
    /// Fee on deposited budgets, in basis points
    pub campaign_creation_fee_bps: u16,
    /// Fee on commission payments, in basis points
    pub commission_fee_bps: u16,
    pub require_payout_address: bool,
    pub expiry_blocks_conversions: bool,
}

/// Event emitted when the admin changes the global configuration
///
/// Carries the values in effect after the update.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub campaign_creation_fee_bps: u16,
    pub commission_fee_bps: u16,
    pub require_payout_address: bool,
    pub expiry_blocks_conversions: bool,
}

/// Event emitted when accumulated protocol fees leave the treasury
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeesWithdrawn {
    /// Admin who signed the withdrawal
    pub admin: Pubkey,
    /// Wallet receiving the fees
    pub destination: Pubkey,
    /// Lamports withdrawn
    pub amount: u64,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerchantCreated {
    /// Merchant PDA
    pub merchant: Pubkey,
    pub owner: Pubkey,
    pub name: String,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerchantUpdated {
    pub merchant: Pubkey,
    pub owner: Pubkey,
    pub name: String,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffiliateCreated {
    /// Affiliate PDA
    pub affiliate: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    /// Wallet that will receive net commissions
    pub payout_address: Pubkey,
}

#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffiliateUpdated {
    pub affiliate: Pubkey,
    pub owner: Pubkey,
    pub name: String,
    pub payout_address: Pubkey,
}

/// Event emitted when a merchant funds a new campaign
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignCreated {
    /// Campaign PDA
    pub campaign: Pubkey,
    /// Merchant PDA that owns the campaign
    pub merchant: Pubkey,
    /// Merchant-chosen campaign seed
    pub seed: u64,
    /// Lamports deposited into escrow
    pub budget: u64,
    pub commission_per_referral: u64,
    /// Lamports sent to the treasury on top of the budget
    pub creation_fee: u64,
    pub ends_at: Option<i64>,
}

/// Event emitted when a merchant edits or tops up a campaign
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignUpdated {
    pub campaign: Pubkey,
    pub merchant: Pubkey,
    /// Lamports added to escrow (zero when there was no top-up)
    pub additional_budget: u64,
    /// Fee charged on the top-up
    pub fee: u64,
    pub available_budget: u64,
    pub commission_per_referral: u64,
    /// Pause flag after re-evaluation
    pub is_paused: bool,
}

/// Event emitted when an affiliate registers attribution to a campaign
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignJoined {
    pub campaign: Pubkey,
    /// Affiliate PDA
    pub affiliate: Pubkey,
    /// `CampaignAffiliate` link PDA
    pub campaign_affiliate: Pubkey,
    pub joined_at: i64,
}

/// Event emitted when a conversion is paid out of escrow
///
/// `fee + net == commission`.
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReported {
    pub campaign: Pubkey,
    pub affiliate: Pubkey,
    /// Wallet that received `net`
    pub payout_address: Pubkey,
    /// Full commission debited from escrow
    pub commission: u64,
    /// Protocol share sent to the treasury
    pub fee: u64,
    /// Affiliate share
    pub net: u64,
    /// Campaign budget left after the payment
    pub available_budget: u64,
    /// Pause flag after the payment
    pub is_paused: bool,
}

/// Event emitted when a merchant closes a campaign and recovers its escrow
#[event]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CampaignClosed {
    pub campaign: Pubkey,
    pub merchant: Pubkey,
    /// Wallet that received the escrow balance
    pub withdraw_address: Pubkey,
    /// Lamports swept out of escrow
    pub amount: u64,
}
