use anchor_lang::prelude::*;

use crate::constants::{AFFILIATE_SEED, CAMPAIGN_AFFILIATE_SEED, CAMPAIGN_SEED};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::CampaignJoined;
use crate::state::{Affiliate, Campaign, CampaignAffiliate};

#[derive(Accounts)]
pub struct JoinCampaign<'info> {
    #[account(
        mut,
        seeds = [CAMPAIGN_SEED, campaign.merchant.as_ref(), campaign.seed.to_le_bytes().as_ref()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        mut,
        seeds = [AFFILIATE_SEED, owner.key().as_ref()],
        bump = affiliate.bump
    )]
    pub affiliate: Box<Account<'info, Affiliate>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = CampaignAffiliate::SPACE,
        seeds = [CAMPAIGN_AFFILIATE_SEED, campaign.key().as_ref(), affiliate.key().as_ref()],
        bump
    )]
    pub campaign_affiliate: Box<Account<'info, CampaignAffiliate>>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Records touched when an affiliate joins a campaign
pub struct JoinCampaignRecords<'a> {
    pub campaign: &'a mut Campaign,
    pub campaign_key: Pubkey,
    pub affiliate: &'a mut Affiliate,
    pub affiliate_key: Pubkey,
    pub campaign_affiliate: &'a mut CampaignAffiliate,
    pub campaign_affiliate_key: Pubkey,
    pub bump: u8,
}

impl JoinCampaignRecords<'_> {
    /// Creates the link between the campaign and the affiliate.
    ///
    /// # Errors
    /// Checked in this order:
    /// - `CampaignClosed`
    /// - `CampaignPaused`
    /// - `CampaignExpired` once `ends_at <= now`
    /// - `AlreadyJoined` if the link already exists
    pub fn join(self, now: i64) -> EscrowResult<CampaignJoined> {
        self.campaign.ensure_joinable(now)?;
        if self.campaign_affiliate.is_initialized() {
            return Err(EscrowError::AlreadyJoined);
        }

        *self.campaign_affiliate = CampaignAffiliate {
            campaign: self.campaign_key,
            affiliate: self.affiliate_key,
            successful_referrals: 0,
            total_earned: 0,
            joined_at: now,
            bump: self.bump,
        };
        self.campaign.record_join()?;
        self.affiliate.record_join()?;

        Ok(CampaignJoined {
            campaign: self.campaign_key,
            affiliate: self.affiliate_key,
            campaign_affiliate: self.campaign_affiliate_key,
            joined_at: now,
        })
    }
}

pub fn handler(ctx: Context<JoinCampaign>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let campaign_key = accounts.campaign.key();
    let affiliate_key = accounts.affiliate.key();
    let campaign_affiliate_key = accounts.campaign_affiliate.key();

    let event = JoinCampaignRecords {
        campaign: &mut accounts.campaign,
        campaign_key,
        affiliate: &mut accounts.affiliate,
        affiliate_key,
        campaign_affiliate: &mut accounts.campaign_affiliate,
        campaign_affiliate_key,
        bump: ctx.bumps.campaign_affiliate,
    }
    .join(now)?;

    emit!(event);

    Ok(())
}
