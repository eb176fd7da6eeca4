use anchor_lang::prelude::*;

use crate::constants::{CAMPAIGN_SEED, CONFIG_SEED, ESCROW_SEED, MERCHANT_SEED, TREASURY_SEED};
use crate::errors::EscrowResult;
use crate::events::CampaignUpdated;
use crate::state::{Campaign, Config, Merchant};
use crate::utils::{calculate_fee, transfer_lamports};
use crate::validation::{
    validate_amount, validate_campaign_period, validate_description, validate_name,
    validate_product_uri,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateCampaignArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub product_uri: Option<String>,
    pub commission_per_referral: Option<u64>,
    pub ends_at: Option<i64>,
    /// Lamports added to escrow; charged the creation fee rate
    pub additional_budget: Option<u64>,
}

impl UpdateCampaignArgs {
    pub fn validate(&self, now: i64) -> EscrowResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(product_uri) = &self.product_uri {
            validate_product_uri(product_uri)?;
        }
        if let Some(commission) = self.commission_per_referral {
            validate_amount(commission)?;
        }
        if self.ends_at.is_some() {
            validate_campaign_period(self.ends_at, now)?;
        }
        if let Some(additional_budget) = self.additional_budget {
            validate_amount(additional_budget)?;
        }
        Ok(())
    }
}

#[derive(Accounts)]
pub struct UpdateCampaign<'info> {
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

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Records touched by a campaign edit or top-up
pub struct UpdateCampaignRecords<'a> {
    pub config: &'a Config,
    pub merchant: &'a mut Merchant,
    pub merchant_key: Pubkey,
    pub campaign: &'a mut Campaign,
    pub campaign_key: Pubkey,
}

impl UpdateCampaignRecords<'_> {
    /// Applies the patch and re-evaluates the pause flag when the commission
    /// or the budget changed.
    ///
    /// Every provided field is validated before any is written. The fee on a
    /// top-up counts toward `merchant.total_spent`, like the creation fee. The
    /// returned event carries the top-up and its fee for the caller to transfer.
    ///
    /// # Errors
    /// - `InvalidCampaignOwner` if the merchant does not own the campaign
    /// - `CampaignClosed` once the campaign is closed
    /// - Field validation errors, `InvalidAmount` for a zero commission or top-up
    pub fn apply(self, args: &UpdateCampaignArgs, now: i64) -> EscrowResult<CampaignUpdated> {
        self.campaign.ensure_owner(&self.merchant_key)?;
        self.campaign.ensure_open()?;
        args.validate(now)?;

        let additional_budget = args.additional_budget.unwrap_or(0);
        let fee = calculate_fee(additional_budget, self.config.campaign_creation_fee_bps)?;

        if let Some(name) = &args.name {
            self.campaign.name.clone_from(name);
        }
        if let Some(description) = &args.description {
            self.campaign.description.clone_from(description);
        }
        if let Some(product_uri) = &args.product_uri {
            self.campaign.product_uri.clone_from(product_uri);
        }
        if let Some(commission) = args.commission_per_referral {
            self.campaign.commission_per_referral = commission;
        }
        if let Some(ends_at) = args.ends_at {
            self.campaign.ends_at = Some(ends_at);
        }
        if additional_budget > 0 {
            self.campaign.add_budget(additional_budget)?;
            self.merchant.record_spend(fee)?;
        } else if args.commission_per_referral.is_some() {
            self.campaign.refresh_pause();
        }

        Ok(CampaignUpdated {
            campaign: self.campaign_key,
            merchant: self.merchant_key,
            additional_budget,
            fee,
            available_budget: self.campaign.available_budget,
            commission_per_referral: self.campaign.commission_per_referral,
            is_paused: self.campaign.is_paused,
        })
    }
}

pub fn handler(ctx: Context<UpdateCampaign>, args: UpdateCampaignArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let merchant_key = accounts.merchant.key();
    let campaign_key = accounts.campaign.key();
    let was_paused = accounts.campaign.is_paused;

    let event = UpdateCampaignRecords {
        config: &accounts.config,
        merchant: &mut accounts.merchant,
        merchant_key,
        campaign: &mut accounts.campaign,
        campaign_key,
    }
    .apply(&args, now)?;

    transfer_lamports(
        accounts.owner.to_account_info(),
        accounts.escrow.to_account_info(),
        event.additional_budget,
        accounts.system_program.to_account_info(),
        None,
    )?;
    transfer_lamports(
        accounts.owner.to_account_info(),
        accounts.treasury.to_account_info(),
        event.fee,
        accounts.system_program.to_account_info(),
        None,
    )?;

    if was_paused != event.is_paused {
        msg!(
            "Campaign {} {}",
            campaign_key,
            if event.is_paused { "paused" } else { "resumed" }
        );
    }
    emit!(event);

    Ok(())
}
