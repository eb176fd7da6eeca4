use anchor_lang::prelude::*;

use crate::errors::{EscrowError, EscrowResult};
use crate::utils::{split_commission, CommissionSplit};

/// Global configuration account for protocol fees and policy
/// PDA seeds: `["config"]`
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Protocol admin (fee withdrawals and config updates)
    pub admin: Pubkey, // 32 bytes
    /// Fee charged on every deposited budget, in basis points
    pub campaign_creation_fee_bps: u16, // 2 bytes
    /// Fee withheld from every commission payment, in basis points
    pub commission_fee_bps: u16, // 2 bytes
    /// When true, affiliates must name a payout address at registration
    /// instead of defaulting to their own wallet
    pub require_payout_address: bool, // 1 byte
    /// When true, conversions cannot be reported once a campaign's end time has passed
    pub expiry_blocks_conversions: bool, // 1 byte
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Treasury PDA bump seed
    pub treasury_bump: u8, // 1 byte
}

impl Config {
    /// Total space: 8 (discriminator) + 32 + 2 + 2 + 1 + 1 + 1 + 1 = 48 bytes
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }
}

/// Merchant account tracks a campaign owner's lifetime spend
/// PDA seeds: ["merchant", owner]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Merchant {
    /// Wallet that registered the merchant
    pub owner: Pubkey,
    #[max_len(50)]
    pub name: String,
    #[max_len(100)]
    pub description: String,
    /// Number of campaigns created
    pub total_campaigns: u32,
    /// Lamports paid out as commissions and protocol fees
    pub total_spent: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Merchant {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn record_spend(&mut self, amount: u64) -> EscrowResult<()> {
        self.total_spent = self
            .total_spent
            .checked_add(amount)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }

    pub fn record_campaign(&mut self) -> EscrowResult<()> {
        self.total_campaigns = self
            .total_campaigns
            .checked_add(1)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }
}

/// Affiliate account tracks a promoter's earnings and payout destination
/// PDA seeds: ["affiliate", owner]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Affiliate {
    /// Wallet that registered the affiliate
    pub owner: Pubkey,
    #[max_len(50)]
    pub name: String,
    #[max_len(100)]
    pub description: String,
    /// Wallet receiving net commissions; may differ from `owner`
    pub payout_address: Pubkey,
    /// Number of campaigns joined
    pub total_campaigns: u32,
    /// Gross commissions credited, before the protocol fee
    pub total_earned: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl Affiliate {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn record_join(&mut self) -> EscrowResult<()> {
        self.total_campaigns = self
            .total_campaigns
            .checked_add(1)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }

    pub fn record_earning(&mut self, commission: u64) -> EscrowResult<()> {
        self.total_earned = self
            .total_earned
            .checked_add(commission)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }
}

/// Campaign account holds the budget accounting for one referral campaign.
/// Its lamports live in a separate system-owned escrow PDA.
/// PDA seeds: ["campaign", merchant, `seed` (little-endian)]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Campaign {
    /// Merchant PDA that owns the campaign
    pub merchant: Pubkey, // 32 bytes
    /// Merchant-chosen sequence number
    pub seed: u64, // 8 bytes
    #[max_len(50)]
    pub name: String,
    #[max_len(100)]
    pub description: String,
    /// Product promoted by affiliates
    #[max_len(100)]
    pub product_uri: String,
    /// Lamports ever deposited (initial budget plus top-ups)
    pub total_budget: u64, // 8 bytes
    /// Lamports still held in escrow
    pub available_budget: u64, // 8 bytes
    /// Lamports paid per reported conversion, protocol fee included
    pub commission_per_referral: u64, // 8 bytes
    pub successful_referrals: u64, // 8 bytes
    pub created_at: i64, // 8 bytes
    /// Optional end of the join window
    pub ends_at: Option<i64>, // 9 bytes
    /// Set whenever the escrow cannot cover one more commission
    pub is_paused: bool, // 1 byte
    /// Terminal; set by `close_campaign`
    pub is_closed: bool, // 1 byte
    pub total_affiliates: u32, // 4 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
    /// Escrow PDA bump seed
    pub escrow_bump: u8, // 1 byte
}

impl Campaign {
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.merchant != Pubkey::default()
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.ends_at.is_some_and(|ends_at| ends_at <= now)
    }

    pub fn ensure_owner(&self, merchant: &Pubkey) -> EscrowResult<()> {
        if self.merchant != *merchant {
            return Err(EscrowError::InvalidCampaignOwner);
        }
        Ok(())
    }

    pub const fn ensure_open(&self) -> EscrowResult<()> {
        if self.is_closed {
            return Err(EscrowError::CampaignClosed);
        }
        Ok(())
    }

    /// Join-window check: open, unpaused and unexpired, in that order.
    pub fn ensure_joinable(&self, now: i64) -> EscrowResult<()> {
        self.ensure_open()?;
        if self.is_paused {
            return Err(EscrowError::CampaignPaused);
        }
        if self.is_expired(now) {
            return Err(EscrowError::CampaignExpired);
        }
        Ok(())
    }

    /// Re-derives the pause flag from the current budget and commission.
    ///
    /// Returns `true` when the flag changed.
    pub fn refresh_pause(&mut self) -> bool {
        let paused = self.available_budget < self.commission_per_referral;
        let changed = paused != self.is_paused;
        self.is_paused = paused;
        changed
    }

    /// Credits a deposit to both budgets and re-evaluates the pause flag.
    pub fn add_budget(&mut self, amount: u64) -> EscrowResult<()> {
        self.total_budget = self
            .total_budget
            .checked_add(amount)
            .ok_or(EscrowError::ArithmeticError)?;
        self.available_budget = self
            .available_budget
            .checked_add(amount)
            .ok_or(EscrowError::ArithmeticError)?;
        self.refresh_pause();
        Ok(())
    }

    pub fn record_join(&mut self) -> EscrowResult<()> {
        self.total_affiliates = self
            .total_affiliates
            .checked_add(1)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }

    /// Debits one commission from the budget at the current rate.
    ///
    /// The pause flag is set when the remaining budget no longer covers the
    /// same commission. Nothing changes if the budget is already short.
    pub fn debit_commission(&mut self, commission_fee_bps: u16) -> EscrowResult<CommissionSplit> {
        let commission = self.commission_per_referral;
        if self.available_budget < commission {
            return Err(EscrowError::InsufficientFunds);
        }
        let split = split_commission(commission, commission_fee_bps)?;
        let successful_referrals = self
            .successful_referrals
            .checked_add(1)
            .ok_or(EscrowError::ArithmeticError)?;

        self.available_budget = self
            .available_budget
            .checked_sub(commission)
            .ok_or(EscrowError::ArithmeticError)?;
        self.successful_referrals = successful_referrals;
        if self.available_budget < commission {
            self.is_paused = true;
        }
        Ok(split)
    }

    /// Marks the campaign closed and zeroes the available budget.
    ///
    /// Returns the budget that was still available.
    pub fn close(&mut self) -> EscrowResult<u64> {
        self.ensure_open()?;
        let remaining = self.available_budget;
        self.available_budget = 0;
        self.is_closed = true;
        Ok(remaining)
    }
}

/// Link between one affiliate and one campaign
/// PDA seeds: ["campaign_affiliate", campaign, affiliate]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct CampaignAffiliate {
    /// Campaign PDA
    pub campaign: Pubkey, // 32 bytes
    /// Affiliate PDA
    pub affiliate: Pubkey, // 32 bytes
    /// Conversions attributed to this affiliate in this campaign
    pub successful_referrals: u64, // 8 bytes
    /// Gross commissions earned in this campaign
    pub total_earned: u64, // 8 bytes
    /// Unix timestamp of the join
    pub joined_at: i64, // 8 bytes
    /// PDA bump seed
    pub bump: u8, // 1 byte
}

impl CampaignAffiliate {
    /// Total space: 8 (discriminator) + 32 + 32 + 8 + 8 + 8 + 1 = 97 bytes
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.campaign != Pubkey::default()
    }

    pub fn record_conversion(&mut self, commission: u64) -> EscrowResult<()> {
        self.successful_referrals = self
            .successful_referrals
            .checked_add(1)
            .ok_or(EscrowError::ArithmeticError)?;
        self.total_earned = self
            .total_earned
            .checked_add(commission)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }
}
