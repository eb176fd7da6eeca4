use anchor_lang::prelude::*;

use crate::constants::CONFIG_SEED;
use crate::errors::{EscrowError, EscrowResult};
use crate::events::ConfigUpdated;
use crate::state::Config;
use crate::validation::validate_fee_bps;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateConfigArgs {
    pub new_admin: Option<Pubkey>,
    pub campaign_creation_fee_bps: Option<u16>,
    pub commission_fee_bps: Option<u16>,
    pub require_payout_address: Option<bool>,
    pub expiry_blocks_conversions: Option<bool>,
}

impl UpdateConfigArgs {
    pub const fn has_update(&self) -> bool {
        self.new_admin.is_some()
            || self.campaign_creation_fee_bps.is_some()
            || self.commission_fee_bps.is_some()
            || self.require_payout_address.is_some()
            || self.expiry_blocks_conversions.is_some()
    }

    /// # Errors
    /// - `InvalidConfiguration` if no field is set
    /// - `InvalidFeeBasisPoints` if a provided rate exceeds 10,000
    pub fn validate(&self) -> EscrowResult<()> {
        if !self.has_update() {
            return Err(EscrowError::InvalidConfiguration);
        }
        if let Some(fee_bps) = self.campaign_creation_fee_bps {
            validate_fee_bps(fee_bps)?;
        }
        if let Some(fee_bps) = self.commission_fee_bps {
            validate_fee_bps(fee_bps)?;
        }
        Ok(())
    }
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

/// Applies an admin patch to the configuration.
///
/// New rates only affect operations executed afterwards; campaigns keep their
/// recorded budgets and commissions.
pub fn apply_update(
    config: &mut Config,
    signer: &Pubkey,
    args: &UpdateConfigArgs,
) -> EscrowResult<ConfigUpdated> {
    if config.admin != *signer {
        return Err(EscrowError::Unauthorized);
    }
    args.validate()?;

    if let Some(new_admin) = args.new_admin {
        config.admin = new_admin;
    }
    if let Some(fee_bps) = args.campaign_creation_fee_bps {
        config.campaign_creation_fee_bps = fee_bps;
    }
    if let Some(fee_bps) = args.commission_fee_bps {
        config.commission_fee_bps = fee_bps;
    }
    if let Some(required) = args.require_payout_address {
        config.require_payout_address = required;
    }
    if let Some(blocks) = args.expiry_blocks_conversions {
        config.expiry_blocks_conversions = blocks;
    }

    Ok(ConfigUpdated {
        admin: config.admin,
        campaign_creation_fee_bps: config.campaign_creation_fee_bps,
        commission_fee_bps: config.commission_fee_bps,
        require_payout_address: config.require_payout_address,
        expiry_blocks_conversions: config.expiry_blocks_conversions,
    })
}

pub fn handler(ctx: Context<UpdateConfig>, args: UpdateConfigArgs) -> Result<()> {
    let event = apply_update(
        &mut ctx.accounts.config,
        &ctx.accounts.admin.key(),
        &args,
    )?;

    emit!(event);

    Ok(())
}
