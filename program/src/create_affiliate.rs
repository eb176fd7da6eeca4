use anchor_lang::prelude::*;

use crate::constants::{AFFILIATE_SEED, CONFIG_SEED};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::AffiliateCreated;
use crate::state::{Affiliate, Config};
use crate::validation::{validate_description, validate_name};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct CreateAffiliateArgs {
    pub name: String,
    pub description: String,
    /// Wallet receiving net commissions; defaults to the owner
    pub payout_address: Option<Pubkey>,
}

impl CreateAffiliateArgs {
    pub fn validate(&self, config: &Config) -> EscrowResult<()> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        if config.require_payout_address && self.payout_address.is_none() {
            return Err(EscrowError::PayoutAddressRequired);
        }
        Ok(())
    }
}

#[derive(Accounts)]
pub struct CreateAffiliate<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Affiliate::SPACE,
        seeds = [AFFILIATE_SEED, owner.key().as_ref()],
        bump
    )]
    pub affiliate: Account<'info, Affiliate>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Fills a fresh affiliate record with zeroed counters.
///
/// # Errors
/// - `AffiliateAlreadyExists` if the record is already populated
/// - `PayoutAddressRequired` if the configuration demands an explicit payout
///   address and none was given
/// - Name or description validation errors
pub fn register(
    affiliate: &mut Affiliate,
    affiliate_key: Pubkey,
    owner: Pubkey,
    config: &Config,
    args: &CreateAffiliateArgs,
    bump: u8,
) -> EscrowResult<AffiliateCreated> {
    if affiliate.is_initialized() {
        return Err(EscrowError::AffiliateAlreadyExists);
    }
    args.validate(config)?;

    *affiliate = Affiliate {
        owner,
        name: args.name.clone(),
        description: args.description.clone(),
        payout_address: args.payout_address.unwrap_or(owner),
        total_campaigns: 0,
        total_earned: 0,
        bump,
    };

    Ok(AffiliateCreated {
        affiliate: affiliate_key,
        owner,
        name: affiliate.name.clone(),
        payout_address: affiliate.payout_address,
    })
}

pub fn handler(ctx: Context<CreateAffiliate>, args: CreateAffiliateArgs) -> Result<()> {
    let affiliate_key = ctx.accounts.affiliate.key();
    let event = register(
        &mut ctx.accounts.affiliate,
        affiliate_key,
        ctx.accounts.owner.key(),
        &ctx.accounts.config,
        &args,
        ctx.bumps.affiliate,
    )?;

    emit!(event);

    Ok(())
}
