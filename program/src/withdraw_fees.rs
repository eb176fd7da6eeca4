use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, TREASURY_SEED};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::FeesWithdrawn;
use crate::state::Config;
use crate::utils::{balance_above_reserve, transfer_lamports, vault_rent_reserve};

#[derive(Accounts)]
pub struct WithdrawFees<'info> {
    /// Global configuration account
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump = config.treasury_bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    /// Wallet receiving the fees
    #[account(mut)]
    pub destination: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Authorizes a sweep of every collected fee.
///
/// `collected_fees` is the treasury balance above its rent-exempt reserve;
/// the reserve itself never leaves the treasury.
///
/// # Errors
/// - `Unauthorized` if `signer` is not the admin
/// - `InvalidAmount` if there are no fees to withdraw
pub fn authorize_withdrawal(
    config: &Config,
    signer: &Pubkey,
    destination: Pubkey,
    collected_fees: u64,
) -> EscrowResult<FeesWithdrawn> {
    if config.admin != *signer {
        return Err(EscrowError::Unauthorized);
    }
    if collected_fees == 0 {
        return Err(EscrowError::InvalidAmount);
    }
    Ok(FeesWithdrawn {
        admin: *signer,
        destination,
        amount: collected_fees,
    })
}

pub fn handler(ctx: Context<WithdrawFees>) -> Result<()> {
    let event = authorize_withdrawal(
        &ctx.accounts.config,
        &ctx.accounts.admin.key(),
        ctx.accounts.destination.key(),
        balance_above_reserve(ctx.accounts.treasury.lamports(), vault_rent_reserve()?),
    )?;

    let treasury_bump = [ctx.accounts.config.treasury_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[TREASURY_SEED, &treasury_bump]];
    transfer_lamports(
        ctx.accounts.treasury.to_account_info(),
        ctx.accounts.destination.to_account_info(),
        event.amount,
        ctx.accounts.system_program.to_account_info(),
        Some(signer_seeds),
    )?;

    msg!("Withdrew {} lamports of protocol fees", event.amount);
    emit!(event);

    Ok(())
}
