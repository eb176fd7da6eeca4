use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::constants::FEE_BASIS_POINTS_DIVISOR;
use crate::errors::{EscrowError, EscrowResult};

/// Computes `amount * fee_bps / 10_000`, truncating toward zero.
///
/// The multiplication is widened to `u128` so any `u64` amount and any rate up
/// to 100% fit without overflow.
///
/// # Errors
/// Returns `ArithmeticError` if the result does not fit in a `u64`, which can
/// only happen for rates above 100%.
pub fn calculate_fee(amount: u64, fee_bps: u16) -> EscrowResult<u64> {
    let fee = u128::from(amount)
        .checked_mul(u128::from(fee_bps))
        .ok_or(EscrowError::ArithmeticError)?
        .checked_div(FEE_BASIS_POINTS_DIVISOR)
        .ok_or(EscrowError::ArithmeticError)?;
    u64::try_from(fee).map_err(|_| EscrowError::ArithmeticError)
}

/// Split of a single commission payment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommissionSplit {
    /// Full commission leaving escrow
    pub commission: u64,
    /// Protocol share sent to the treasury
    pub fee: u64,
    /// Remainder sent to the affiliate payout address
    pub net: u64,
}

pub fn split_commission(commission: u64, commission_fee_bps: u16) -> EscrowResult<CommissionSplit> {
    let fee = calculate_fee(commission, commission_fee_bps)?;
    let net = commission
        .checked_sub(fee)
        .ok_or(EscrowError::ArithmeticError)?;
    Ok(CommissionSplit {
        commission,
        fee,
        net,
    })
}

/// Lamports a vault holding `balance` still needs to reach `reserve`.
#[must_use]
pub const fn reserve_shortfall(balance: u64, reserve: u64) -> u64 {
    reserve.saturating_sub(balance)
}

/// Lamports a vault holding `balance` can release without dipping into `reserve`.
#[must_use]
pub const fn balance_above_reserve(balance: u64, reserve: u64) -> u64 {
    balance.saturating_sub(reserve)
}

/// Rent-exempt minimum for a zero-data vault PDA
pub fn vault_rent_reserve() -> Result<u64> {
    Ok(Rent::get()?.minimum_balance(0))
}

/// Tops `vault` up to the rent-exempt minimum at `payer`'s expense.
///
/// Returns the lamports moved, zero when the vault already holds the reserve.
pub fn fund_vault_reserve<'info>(
    payer: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    system_program: AccountInfo<'info>,
) -> Result<u64> {
    let shortfall = reserve_shortfall(vault.lamports(), vault_rent_reserve()?);
    transfer_lamports(payer, vault, shortfall, system_program, None)?;
    Ok(shortfall)
}

/// Moves lamports through the system program.
///
/// Pass `signer_seeds` when `from` is one of the program's vault PDAs. Zero
/// amounts are skipped.
pub fn transfer_lamports<'info>(
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
    system_program: AccountInfo<'info>,
    signer_seeds: Option<&[&[&[u8]]]>,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let accounts = Transfer { from, to };
    let cpi_context = match signer_seeds {
        Some(seeds) => CpiContext::new_with_signer(system_program, accounts, seeds),
        None => CpiContext::new(system_program, accounts),
    };
    transfer(cpi_context, amount)
}
