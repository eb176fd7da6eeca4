use anchor_lang::prelude::*;

use crate::constants::AFFILIATE_SEED;
use crate::errors::EscrowResult;
use crate::events::AffiliateUpdated;
use crate::state::Affiliate;
use crate::validation::{validate_description, validate_name};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateAffiliateArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub payout_address: Option<Pubkey>,
}

impl UpdateAffiliateArgs {
    pub fn validate(&self) -> EscrowResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

#[derive(Accounts)]
pub struct UpdateAffiliate<'info> {
    #[account(
        mut,
        seeds = [AFFILIATE_SEED, owner.key().as_ref()],
        bump = affiliate.bump
    )]
    pub affiliate: Account<'info, Affiliate>,

    pub owner: Signer<'info>,
}

/// Patches the affiliate record. A new payout address applies to every later
/// conversion, including those for campaigns joined earlier.
pub fn apply_update(
    affiliate: &mut Affiliate,
    affiliate_key: Pubkey,
    args: &UpdateAffiliateArgs,
) -> EscrowResult<AffiliateUpdated> {
    args.validate()?;

    if let Some(name) = &args.name {
        affiliate.name.clone_from(name);
    }
    if let Some(description) = &args.description {
        affiliate.description.clone_from(description);
    }
    if let Some(payout_address) = args.payout_address {
        affiliate.payout_address = payout_address;
    }

    Ok(AffiliateUpdated {
        affiliate: affiliate_key,
        owner: affiliate.owner,
        name: affiliate.name.clone(),
        payout_address: affiliate.payout_address,
    })
}

pub fn handler(ctx: Context<UpdateAffiliate>, args: UpdateAffiliateArgs) -> Result<()> {
    let affiliate_key = ctx.accounts.affiliate.key();
    let event = apply_update(&mut ctx.accounts.affiliate, affiliate_key, &args)?;

    emit!(event);

    Ok(())
}
