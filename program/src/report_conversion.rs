use anchor_lang::prelude::*;

use crate::constants::{
    AFFILIATE_SEED, CAMPAIGN_AFFILIATE_SEED, CAMPAIGN_SEED, CONFIG_SEED, ESCROW_SEED,
    MERCHANT_SEED, TREASURY_SEED,
};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::ConversionReported;
use crate::state::{Affiliate, Campaign, CampaignAffiliate, Config, Merchant};
use crate::utils::transfer_lamports;

#[derive(Accounts)]
pub struct ReportConversion<'info> {
    /// Global configuration account
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [MERCHANT_SEED, owner.key().as_ref()],
        bump = merchant.bump
    )]
    pub merchant: Box<Account<'info, Merchant>>,

    #[account(
        mut,
        seeds = [CAMPAIGN_SEED, campaign.merchant.as_ref(), campaign.seed.to_le_bytes().as_ref()],
        bump = campaign.bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, campaign.key().as_ref()],
        bump = campaign.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [AFFILIATE_SEED, affiliate.owner.as_ref()],
        bump = affiliate.bump
    )]
    pub affiliate: Box<Account<'info, Affiliate>>,

    #[account(
        mut,
        seeds = [CAMPAIGN_AFFILIATE_SEED, campaign.key().as_ref(), affiliate.key().as_ref()],
        bump = campaign_affiliate.bump
    )]
    pub campaign_affiliate: Box<Account<'info, CampaignAffiliate>>,

    /// Must match the affiliate's registered payout address (checked in handler)
    #[account(mut)]
    pub payout_address: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Records touched by a conversion payout
pub struct ConversionRecords<'a> {
    pub config: &'a Config,
    pub merchant: &'a mut Merchant,
    pub merchant_key: Pubkey,
    pub campaign: &'a mut Campaign,
    pub affiliate: &'a mut Affiliate,
    pub campaign_affiliate: &'a mut CampaignAffiliate,
}

impl ConversionRecords<'_> {
    /// Debits one commission at the campaign's current rate and credits every
    /// counter.
    ///
    /// The returned event carries the fee and net amounts the caller must move
    /// out of escrow. Nothing is written unless every check passes.
    ///
    /// # Errors
    /// Checked in this order:
    /// - `InvalidCampaignOwner`
    /// - `CampaignClosed`
    /// - `CampaignExpired`, only when the configuration blocks expired conversions
    /// - `InvalidPayoutAddress`
    /// - `InsufficientFunds`
    pub fn settle(self, payout_address: &Pubkey, now: i64) -> EscrowResult<ConversionReported> {
        self.campaign.ensure_owner(&self.merchant_key)?;
        self.campaign.ensure_open()?;
        if self.config.expiry_blocks_conversions && self.campaign.is_expired(now) {
            return Err(EscrowError::CampaignExpired);
        }
        if self.affiliate.payout_address != *payout_address {
            return Err(EscrowError::InvalidPayoutAddress);
        }

        let split = self.campaign.debit_commission(self.config.commission_fee_bps)?;
        self.merchant.record_spend(split.commission)?;
        self.affiliate.record_earning(split.commission)?;
        self.campaign_affiliate.record_conversion(split.commission)?;

        Ok(ConversionReported {
            campaign: self.campaign_affiliate.campaign,
            affiliate: self.campaign_affiliate.affiliate,
            payout_address: *payout_address,
            commission: split.commission,
            fee: split.fee,
            net: split.net,
            available_budget: self.campaign.available_budget,
            is_paused: self.campaign.is_paused,
        })
    }
}

pub fn handler(ctx: Context<ReportConversion>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let merchant_key = accounts.merchant.key();
    let campaign_key = accounts.campaign.key();
    let payout_address = accounts.payout_address.key();

    let event = ConversionRecords {
        config: &accounts.config,
        merchant: &mut accounts.merchant,
        merchant_key,
        campaign: &mut accounts.campaign,
        affiliate: &mut accounts.affiliate,
        campaign_affiliate: &mut accounts.campaign_affiliate,
    }
    .settle(&payout_address, now)?;

    let escrow_bump = [accounts.campaign.escrow_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[ESCROW_SEED, campaign_key.as_ref(), &escrow_bump]];

    transfer_lamports(
        accounts.escrow.to_account_info(),
        accounts.treasury.to_account_info(),
        event.fee,
        accounts.system_program.to_account_info(),
        Some(signer_seeds),
    )?;
    transfer_lamports(
        accounts.escrow.to_account_info(),
        accounts.payout_address.to_account_info(),
        event.net,
        accounts.system_program.to_account_info(),
        Some(signer_seeds),
    )?;

    if event.is_paused {
        msg!(
            "Campaign {} paused: {} lamports left, commission is {}",
            campaign_key,
            event.available_budget,
            event.commission
        );
    }
    emit!(event);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    struct Fixture {
        config: Config,
        merchant_key: Pubkey,
        merchant: Merchant,
        campaign: Campaign,
        affiliate: Affiliate,
        link: CampaignAffiliate,
        payout: Pubkey,
    }

    impl Fixture {
        fn new() -> Self {
            let merchant_key = Pubkey::new_unique();
            let payout = Pubkey::new_unique();
            Self {
                config: Config {
                    commission_fee_bps: 50,
                    ..Config::default()
                },
                merchant_key,
                merchant: Merchant::default(),
                campaign: Campaign {
                    merchant: merchant_key,
                    total_budget: 10 * SOL,
                    available_budget: 10 * SOL,
                    commission_per_referral: 7 * SOL,
                    ends_at: Some(2_000),
                    ..Campaign::default()
                },
                affiliate: Affiliate {
                    payout_address: payout,
                    ..Affiliate::default()
                },
                link: CampaignAffiliate {
                    campaign: Pubkey::new_unique(),
                    affiliate: Pubkey::new_unique(),
                    ..CampaignAffiliate::default()
                },
                payout,
            }
        }

        fn settle_as(
            &mut self,
            merchant_key: Pubkey,
            payout: Pubkey,
            now: i64,
        ) -> EscrowResult<ConversionReported> {
            ConversionRecords {
                config: &self.config,
                merchant: &mut self.merchant,
                merchant_key,
                campaign: &mut self.campaign,
                affiliate: &mut self.affiliate,
                campaign_affiliate: &mut self.link,
            }
            .settle(&payout, now)
        }

        fn settle(&mut self, now: i64) -> EscrowResult<ConversionReported> {
            self.settle_as(self.merchant_key, self.payout, now)
        }
    }

    #[test]
    fn test_conversion_splits_and_pauses() {
        let mut fixture = Fixture::new();

        let event = fixture.settle(1_000).unwrap();

        assert_eq!(event.commission, 7 * SOL);
        assert_eq!(event.fee, 35_000_000);
        assert_eq!(event.net, 6_965_000_000);
        assert_eq!(fixture.campaign.available_budget, 3 * SOL);
        assert!(fixture.campaign.is_paused);
        assert_eq!(fixture.campaign.successful_referrals, 1);
        assert_eq!(fixture.merchant.total_spent, 7 * SOL);
        assert_eq!(fixture.affiliate.total_earned, 7 * SOL);
        assert_eq!(fixture.link.successful_referrals, 1);
        assert_eq!(fixture.link.total_earned, 7 * SOL);
    }

    #[test]
    fn test_paused_campaign_still_guards_funds() {
        let mut fixture = Fixture::new();
        fixture.settle(1_000).unwrap();

        assert!(matches!(
            fixture.settle(1_000),
            Err(EscrowError::InsufficientFunds)
        ));
        assert_eq!(fixture.campaign.successful_referrals, 1);
        assert_eq!(fixture.merchant.total_spent, 7 * SOL);
    }

    #[test]
    fn test_wrong_merchant_rejected_first() {
        let mut fixture = Fixture::new();
        fixture.campaign.is_closed = true;

        assert!(matches!(
            fixture.settle_as(Pubkey::new_unique(), Pubkey::new_unique(), 1_000),
            Err(EscrowError::InvalidCampaignOwner)
        ));
    }

    #[test]
    fn test_wrong_payout_rejected() {
        let mut fixture = Fixture::new();
        let merchant_key = fixture.merchant_key;

        assert!(matches!(
            fixture.settle_as(merchant_key, Pubkey::new_unique(), 1_000),
            Err(EscrowError::InvalidPayoutAddress)
        ));
        assert_eq!(fixture.campaign.available_budget, 10 * SOL);
    }

    #[test]
    fn test_expiry_only_blocks_when_configured() {
        let mut fixture = Fixture::new();
        assert!(fixture.settle(5_000).is_ok());

        let mut fixture = Fixture::new();
        fixture.config.expiry_blocks_conversions = true;
        assert!(matches!(
            fixture.settle(5_000),
            Err(EscrowError::CampaignExpired)
        ));
    }

    #[test]
    fn test_closed_campaign_rejected() {
        let mut fixture = Fixture::new();
        fixture.campaign.is_closed = true;

        assert!(matches!(
            fixture.settle(1_000),
            Err(EscrowError::CampaignClosed)
        ));
    }
}
