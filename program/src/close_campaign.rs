use anchor_lang::prelude::*;

use crate::constants::{CAMPAIGN_SEED, ESCROW_SEED, MERCHANT_SEED};
use crate::errors::EscrowResult;
use crate::events::CampaignClosed;
use crate::state::{Campaign, Merchant};
use crate::utils::transfer_lamports;

#[derive(Accounts)]
pub struct CloseCampaign<'info> {
    #[account(
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

    /// Wallet receiving the remaining escrow
    #[account(mut)]
    pub withdraw_address: SystemAccount<'info>,

    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Closes the campaign for good.
///
/// `escrow_balance` is the vault's current balance; the whole of it is swept to
/// `withdraw_address`.
///
/// # Errors
/// - `InvalidCampaignOwner` if the merchant does not own the campaign
/// - `CampaignClosed` if the campaign was already closed
pub fn close(
    campaign: &mut Campaign,
    campaign_key: Pubkey,
    merchant_key: &Pubkey,
    withdraw_address: Pubkey,
    escrow_balance: u64,
) -> EscrowResult<CampaignClosed> {
    campaign.ensure_owner(merchant_key)?;
    campaign.close()?;

    Ok(CampaignClosed {
        campaign: campaign_key,
        merchant: *merchant_key,
        withdraw_address,
        amount: escrow_balance,
    })
}

pub fn handler(ctx: Context<CloseCampaign>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let campaign_key = accounts.campaign.key();

    let event = close(
        &mut accounts.campaign,
        campaign_key,
        &accounts.merchant.key(),
        accounts.withdraw_address.key(),
        accounts.escrow.lamports(),
    )?;

    let escrow_bump = [accounts.campaign.escrow_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[ESCROW_SEED, campaign_key.as_ref(), &escrow_bump]];
    transfer_lamports(
        accounts.escrow.to_account_info(),
        accounts.withdraw_address.to_account_info(),
        event.amount,
        accounts.system_program.to_account_info(),
        Some(signer_seeds),
    )?;

    msg!("Campaign {} closed, {} lamports returned", campaign_key, event.amount);
    emit!(event);

    Ok(())
}
