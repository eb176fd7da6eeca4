use anchor_lang::prelude::*;

use crate::constants::{CAMPAIGN_SEED, CONFIG_SEED, ESCROW_SEED, MERCHANT_SEED, TREASURY_SEED};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::CampaignCreated;
use crate::state::{Campaign, Config, Merchant};
use crate::utils::{calculate_fee, fund_vault_reserve, transfer_lamports};
use crate::validation::{
    validate_amount, validate_campaign_period, validate_description, validate_name,
    validate_product_uri,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct CreateCampaignArgs {
    /// Merchant-chosen campaign identifier, unique per merchant
    pub seed: u64,
    pub name: String,
    pub description: String,
    pub product_uri: String,
    /// Lamports moved into escrow
    pub budget: u64,
    /// Lamports paid per reported conversion
    pub commission_per_referral: u64,
    /// Optional end of the join window (unix seconds)
    pub ends_at: Option<i64>,
}

impl CreateCampaignArgs {
    pub fn validate(&self, now: i64) -> EscrowResult<()> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_product_uri(&self.product_uri)?;
        validate_campaign_period(self.ends_at, now)?;
        validate_amount(self.budget)?;
        validate_amount(self.commission_per_referral)
    }
}

#[derive(Accounts)]
#[instruction(args: CreateCampaignArgs)]
pub struct CreateCampaign<'info> {
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
        init_if_needed,
        payer = owner,
        space = Campaign::SPACE,
        seeds = [CAMPAIGN_SEED, merchant.key().as_ref(), args.seed.to_le_bytes().as_ref()],
        bump
    )]
    pub campaign: Box<Account<'info, Campaign>>,

    /// Escrow vault holding the campaign budget
    #[account(
        mut,
        seeds = [ESCROW_SEED, campaign.key().as_ref()],
        bump
    )]
    pub escrow: SystemAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Records written when a campaign is opened
pub struct CreateCampaignRecords<'a> {
    pub config: &'a Config,
    pub merchant: &'a mut Merchant,
    pub merchant_key: Pubkey,
    pub campaign: &'a mut Campaign,
    pub campaign_key: Pubkey,
    pub bump: u8,
    pub escrow_bump: u8,
}

impl CreateCampaignRecords<'_> {
    /// Initializes the campaign and charges the merchant's counters.
    ///
    /// A new campaign always opens unpaused, even when its budget is below one
    /// commission; conversions then fail with `InsufficientFunds` until it is
    /// topped up. The returned event carries the budget and creation fee the
    /// caller must move into escrow and the treasury.
    ///
    /// # Errors
    /// - `CampaignAlreadyExists` if the record is already populated
    /// - Field validation errors, `InvalidAmount` for a zero budget or commission
    /// - `ArithmeticError` on counter overflow
    pub fn open(self, args: &CreateCampaignArgs, now: i64) -> EscrowResult<CampaignCreated> {
        if self.campaign.is_initialized() {
            return Err(EscrowError::CampaignAlreadyExists);
        }
        args.validate(now)?;

        let creation_fee = calculate_fee(args.budget, self.config.campaign_creation_fee_bps)?;

        *self.campaign = Campaign {
            merchant: self.merchant_key,
            seed: args.seed,
            name: args.name.clone(),
            description: args.description.clone(),
            product_uri: args.product_uri.clone(),
            total_budget: args.budget,
            available_budget: args.budget,
            commission_per_referral: args.commission_per_referral,
            successful_referrals: 0,
            created_at: now,
            ends_at: args.ends_at,
            is_paused: false,
            is_closed: false,
            total_affiliates: 0,
            bump: self.bump,
            escrow_bump: self.escrow_bump,
        };

        self.merchant.record_campaign()?;
        self.merchant.record_spend(creation_fee)?;

        Ok(CampaignCreated {
            campaign: self.campaign_key,
            merchant: self.merchant_key,
            seed: args.seed,
            budget: args.budget,
            commission_per_referral: args.commission_per_referral,
            creation_fee,
            ends_at: args.ends_at,
        })
    }
}

pub fn handler(ctx: Context<CreateCampaign>, args: CreateCampaignArgs) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let merchant_key = accounts.merchant.key();
    let campaign_key = accounts.campaign.key();

    let event = CreateCampaignRecords {
        config: &accounts.config,
        merchant: &mut accounts.merchant,
        merchant_key,
        campaign: &mut accounts.campaign,
        campaign_key,
        bump: ctx.bumps.campaign,
        escrow_bump: ctx.bumps.escrow,
    }
    .open(&args, now)?;

    fund_vault_reserve(
        accounts.owner.to_account_info(),
        accounts.escrow.to_account_info(),
        accounts.system_program.to_account_info(),
    )?;
    transfer_lamports(
        accounts.owner.to_account_info(),
        accounts.escrow.to_account_info(),
        event.budget,
        accounts.system_program.to_account_info(),
        None,
    )?;
    transfer_lamports(
        accounts.owner.to_account_info(),
        accounts.treasury.to_account_info(),
        event.creation_fee,
        accounts.system_program.to_account_info(),
        None,
    )?;

    msg!("Campaign {} opened with {} lamports in escrow", event.seed, event.budget);
    emit!(event);

    Ok(())
}
