use anchor_lang::prelude::*;

use crate::constants::MERCHANT_SEED;
use crate::errors::EscrowResult;
use crate::events::MerchantUpdated;
use crate::state::Merchant;
use crate::validation::{validate_description, validate_name};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct UpdateMerchantArgs {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateMerchantArgs {
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
pub struct UpdateMerchant<'info> {
    #[account(
        mut,
        seeds = [MERCHANT_SEED, owner.key().as_ref()],
        bump = merchant.bump
    )]
    pub merchant: Account<'info, Merchant>,

    pub owner: Signer<'info>,
}

/// Replaces the provided fields; omitted fields keep their values.
/// Every provided field is validated before any is written.
pub fn apply_update(
    merchant: &mut Merchant,
    merchant_key: Pubkey,
    args: &UpdateMerchantArgs,
) -> EscrowResult<MerchantUpdated> {
    args.validate()?;

    if let Some(name) = &args.name {
        merchant.name.clone_from(name);
    }
    if let Some(description) = &args.description {
        merchant.description.clone_from(description);
    }

    Ok(MerchantUpdated {
        merchant: merchant_key,
        owner: merchant.owner,
        name: merchant.name.clone(),
    })
}

pub fn handler(ctx: Context<UpdateMerchant>, args: UpdateMerchantArgs) -> Result<()> {
    let merchant_key = ctx.accounts.merchant.key();
    let event = apply_update(&mut ctx.accounts.merchant, merchant_key, &args)?;

    emit!(event);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EscrowError;

    fn merchant() -> Merchant {
        Merchant {
            owner: Pubkey::new_unique(),
            name: "Acme Outdoor Gear".to_string(),
            description: "Tents".to_string(),
            ..Merchant::default()
        }
    }

    #[test]
    fn test_description_only_patch() {
        let mut merchant = merchant();
        let args = UpdateMerchantArgs {
            description: Some("Tents, stoves and packs".to_string()),
            ..UpdateMerchantArgs::default()
        };

        apply_update(&mut merchant, Pubkey::new_unique(), &args).unwrap();

        assert_eq!(merchant.name, "Acme Outdoor Gear");
        assert_eq!(merchant.description, "Tents, stoves and packs");
    }

    #[test]
    fn test_invalid_field_blocks_valid_one() {
        let mut merchant = merchant();
        let args = UpdateMerchantArgs {
            name: Some("Acme Camping Supplies".to_string()),
            description: Some("x".repeat(101)),
        };

        assert!(matches!(
            apply_update(&mut merchant, Pubkey::new_unique(), &args),
            Err(EscrowError::DescriptionTooLong)
        ));
        assert_eq!(merchant.name, "Acme Outdoor Gear");
    }
}
