use anchor_lang::prelude::*;

use crate::constants::MERCHANT_SEED;
use crate::errors::{EscrowError, EscrowResult};
use crate::events::MerchantCreated;
use crate::state::Merchant;
use crate::validation::{validate_description, validate_name};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct CreateMerchantArgs {
    pub name: String,
    pub description: String,
}

impl CreateMerchantArgs {
    pub fn validate(&self) -> EscrowResult<()> {
        validate_name(&self.name)?;
        validate_description(&self.description)
    }
}

#[derive(Accounts)]
pub struct CreateMerchant<'info> {
    #[account(
        init_if_needed,
        payer = owner,
        space = Merchant::SPACE,
        seeds = [MERCHANT_SEED, owner.key().as_ref()],
        bump
    )]
    pub merchant: Account<'info, Merchant>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Fills a fresh merchant record with zeroed counters.
///
/// # Errors
/// - `MerchantAlreadyExists` if the record is already populated
/// - Name or description validation errors
pub fn register(
    merchant: &mut Merchant,
    merchant_key: Pubkey,
    owner: Pubkey,
    args: &CreateMerchantArgs,
    bump: u8,
) -> EscrowResult<MerchantCreated> {
    if merchant.is_initialized() {
        return Err(EscrowError::MerchantAlreadyExists);
    }
    args.validate()?;

    *merchant = Merchant {
        owner,
        name: args.name.clone(),
        description: args.description.clone(),
        total_campaigns: 0,
        total_spent: 0,
        bump,
    };

    Ok(MerchantCreated {
        merchant: merchant_key,
        owner,
        name: merchant.name.clone(),
    })
}

pub fn handler(ctx: Context<CreateMerchant>, args: CreateMerchantArgs) -> Result<()> {
    let merchant_key = ctx.accounts.merchant.key();
    let event = register(
        &mut ctx.accounts.merchant,
        merchant_key,
        ctx.accounts.owner.key(),
        &args,
        ctx.bumps.merchant,
    )?;

    emit!(event);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CreateMerchantArgs {
        CreateMerchantArgs {
            name: "Acme Outdoor Gear".to_string(),
            description: "Tents and stoves".to_string(),
        }
    }

    #[test]
    fn test_register_starts_counters_at_zero() {
        let owner = Pubkey::new_unique();
        let mut merchant = Merchant::default();

        register(&mut merchant, Pubkey::new_unique(), owner, &args(), 250).unwrap();

        assert_eq!(merchant.owner, owner);
        assert_eq!(merchant.total_campaigns, 0);
        assert_eq!(merchant.total_spent, 0);
        assert_eq!(merchant.bump, 250);
    }

    #[test]
    fn test_duplicate_registration_keeps_existing_record() {
        let owner = Pubkey::new_unique();
        let mut merchant = Merchant::default();
        register(&mut merchant, Pubkey::new_unique(), owner, &args(), 250).unwrap();
        merchant.total_spent = 42;

        let mut other = args();
        other.name = "Another Merchant Name".to_string();
        assert!(matches!(
            register(&mut merchant, Pubkey::new_unique(), owner, &other, 250),
            Err(EscrowError::MerchantAlreadyExists)
        ));
        assert_eq!(merchant.name, "Acme Outdoor Gear");
        assert_eq!(merchant.total_spent, 42);
    }

    #[test]
    fn test_short_name_leaves_record_empty() {
        let mut merchant = Merchant::default();
        let mut short = args();
        short.name = "Acme".to_string();

        assert!(matches!(
            register(&mut merchant, Pubkey::new_unique(), Pubkey::new_unique(), &short, 250),
            Err(EscrowError::NameTooShort)
        ));
        assert!(!merchant.is_initialized());
    }
}
