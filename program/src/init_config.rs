use anchor_lang::prelude::*;
use anchor_lang::solana_program::bpf_loader_upgradeable::{self, UpgradeableLoaderState};

use crate::constants::{CONFIG_SEED, TREASURY_SEED};
use crate::errors::{EscrowError, EscrowResult};
use crate::events::ConfigInitialized;
use crate::state::Config;
use crate::utils::fund_vault_reserve;
use crate::validation::validate_fee_bps;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct InitConfigArgs {
    /// Protocol admin; defaults to the signing upgrade authority
    pub admin: Option<Pubkey>,
    pub campaign_creation_fee_bps: u16,
    pub commission_fee_bps: u16,
    pub require_payout_address: bool,
    pub expiry_blocks_conversions: bool,
}

impl InitConfigArgs {
    /// # Errors
    /// Returns `InvalidFeeBasisPoints` if either rate exceeds 10,000.
    pub fn validate(&self) -> EscrowResult<()> {
        validate_fee_bps(self.campaign_creation_fee_bps)?;
        validate_fee_bps(self.commission_fee_bps)
    }
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init_if_needed,
        payer = authority,
        space = Config::SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// Fee treasury; a system-owned PDA holding lamports only.
    /// Funded with its rent-exempt reserve here.
    #[account(
        mut,
        seeds = [TREASURY_SEED],
        bump
    )]
    pub treasury: SystemAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// Program data account for upgrade authority validation
    /// CHECK: Validated in handler by deserializing and checking upgrade authority
    pub program_data: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Gets the expected program data address for a program
pub fn get_program_data_address(program_id: &Pubkey) -> Pubkey {
    let (program_data_address, _) =
        Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id());
    program_data_address
}

/// Reads the upgrade authority out of raw program data account bytes.
///
/// # Errors
/// Returns `InvalidProgramData` if the bytes are not an upgradeable loader
/// `ProgramData` record.
pub fn upgrade_authority_from_program_data(data: &[u8]) -> EscrowResult<Option<Pubkey>> {
    let state: UpgradeableLoaderState =
        bincode::deserialize(data).map_err(|_| EscrowError::InvalidProgramData)?;

    let UpgradeableLoaderState::ProgramData {
        upgrade_authority_address,
        ..
    } = state
    else {
        return Err(EscrowError::InvalidProgramData);
    };
    Ok(upgrade_authority_address)
}

/// Only the current upgrade authority may create the configuration.
/// An immutable program (no upgrade authority) can never be configured.
pub fn ensure_initializer(upgrade_authority: Option<Pubkey>, signer: &Pubkey) -> EscrowResult<()> {
    let upgrade_authority = upgrade_authority.ok_or(EscrowError::Unauthorized)?;
    if upgrade_authority != *signer {
        return Err(EscrowError::Unauthorized);
    }
    Ok(())
}

/// Writes the singleton configuration.
///
/// # Errors
/// - `AlreadyInitialized` if the record already holds an admin
/// - `InvalidFeeBasisPoints` if either fee rate is out of range
pub fn initialize(
    config: &mut Config,
    signer: Pubkey,
    args: &InitConfigArgs,
    bump: u8,
    treasury_bump: u8,
) -> EscrowResult<ConfigInitialized> {
    if config.is_initialized() {
        return Err(EscrowError::AlreadyInitialized);
    }
    args.validate()?;

    *config = Config {
        admin: args.admin.unwrap_or(signer),
        campaign_creation_fee_bps: args.campaign_creation_fee_bps,
        commission_fee_bps: args.commission_fee_bps,
        require_payout_address: args.require_payout_address,
        expiry_blocks_conversions: args.expiry_blocks_conversions,
        bump,
        treasury_bump,
    };

    Ok(ConfigInitialized {
        admin: config.admin,
        campaign_creation_fee_bps: config.campaign_creation_fee_bps,
        commission_fee_bps: config.commission_fee_bps,
        require_payout_address: config.require_payout_address,
        expiry_blocks_conversions: config.expiry_blocks_conversions,
    })
}

pub fn handler(ctx: Context<InitConfig>, args: InitConfigArgs) -> Result<()> {
    // Validate that program_data account matches expected address
    let expected_program_data = get_program_data_address(ctx.program_id);
    require!(
        ctx.accounts.program_data.key() == expected_program_data,
        EscrowError::InvalidProgramData
    );

    let upgrade_authority = {
        let program_data_bytes = ctx.accounts.program_data.try_borrow_data()?;
        upgrade_authority_from_program_data(&program_data_bytes)?
    };
    ensure_initializer(upgrade_authority, &ctx.accounts.authority.key())?;

    let event = initialize(
        &mut ctx.accounts.config,
        ctx.accounts.authority.key(),
        &args,
        ctx.bumps.config,
        ctx.bumps.treasury,
    )?;

    let reserve = fund_vault_reserve(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.treasury.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
    )?;
    if reserve > 0 {
        msg!("Treasury funded with {} lamports of rent reserve", reserve);
    }

    msg!(
        "Config initialized: creation fee {} bps, commission fee {} bps",
        event.campaign_creation_fee_bps,
        event.commission_fee_bps
    );
    emit!(event);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_program_data_address() {
        let program_id = Pubkey::new_unique();
        let program_data_address = get_program_data_address(&program_id);

        let (expected, _bump) =
            Pubkey::find_program_address(&[program_id.as_ref()], &bpf_loader_upgradeable::id());

        assert_eq!(program_data_address, expected);
    }

    #[test]
    fn test_upgrade_authority_from_program_data() {
        let upgrade_authority = Pubkey::new_unique();
        let program_data_state = UpgradeableLoaderState::ProgramData {
            slot: 42,
            upgrade_authority_address: Some(upgrade_authority),
        };
        let mut bytes = bincode::serialize(&program_data_state).unwrap();
        // Program data accounts carry the ELF after the header
        bytes.extend_from_slice(&[0u8; 64]);

        assert_eq!(
            upgrade_authority_from_program_data(&bytes).unwrap(),
            Some(upgrade_authority)
        );
    }

    #[test]
    fn test_program_account_is_not_program_data() {
        let program_state = UpgradeableLoaderState::Program {
            programdata_address: Pubkey::new_unique(),
        };
        let bytes = bincode::serialize(&program_state).unwrap();

        assert!(matches!(
            upgrade_authority_from_program_data(&bytes),
            Err(EscrowError::InvalidProgramData)
        ));
        assert!(matches!(
            upgrade_authority_from_program_data(&[]),
            Err(EscrowError::InvalidProgramData)
        ));
    }

    #[test]
    fn test_immutable_program_cannot_be_configured() {
        let signer = Pubkey::new_unique();
        assert!(matches!(
            ensure_initializer(None, &signer),
            Err(EscrowError::Unauthorized)
        ));
        assert!(matches!(
            ensure_initializer(Some(Pubkey::new_unique()), &signer),
            Err(EscrowError::Unauthorized)
        ));
        assert!(ensure_initializer(Some(signer), &signer).is_ok());
    }

    #[test]
    fn test_admin_defaults_to_signer() {
        let signer = Pubkey::new_unique();
        let mut config = Config::default();
        let args = InitConfigArgs {
            campaign_creation_fee_bps: 100,
            commission_fee_bps: 50,
            ..InitConfigArgs::default()
        };

        let event = initialize(&mut config, signer, &args, 254, 253).unwrap();

        assert_eq!(config.admin, signer);
        assert_eq!(event.admin, signer);
        assert_eq!(config.treasury_bump, 253);
    }

    #[test]
    fn test_second_initialization_rejected() {
        let signer = Pubkey::new_unique();
        let mut config = Config::default();
        let args = InitConfigArgs::default();
        initialize(&mut config, signer, &args, 255, 255).unwrap();

        let retry = InitConfigArgs {
            admin: Some(Pubkey::new_unique()),
            campaign_creation_fee_bps: 9_000,
            ..InitConfigArgs::default()
        };
        assert!(matches!(
            initialize(&mut config, signer, &retry, 255, 255),
            Err(EscrowError::AlreadyInitialized)
        ));
        assert_eq!(config.admin, signer);
        assert_eq!(config.campaign_creation_fee_bps, 0);
    }
}
