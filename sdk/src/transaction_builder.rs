//! Instruction builders for every affiliate escrow instruction
//!
//! Account metas are listed in the order the program's `Accounts` structs
//! declare them. Instruction data is the Anchor discriminator followed by the
//! borsh-encoded arguments.

use crate::{
    error::{Result, SdkError},
    pda, program_id,
};
use affiliate_escrow::{
    create_affiliate::CreateAffiliateArgs, create_campaign::CreateCampaignArgs,
    create_merchant::CreateMerchantArgs, init_config::InitConfigArgs,
    update_affiliate::UpdateAffiliateArgs, update_campaign::UpdateCampaignArgs,
    update_config::UpdateConfigArgs, update_merchant::UpdateMerchantArgs,
};
use anchor_client::solana_sdk::instruction::{AccountMeta, Instruction};
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_lang::InstructionData;

/// Builder for `init_config` instructions
#[derive(Clone, Debug, Default)]
pub struct InitConfigBuilder {
    authority: Option<Pubkey>,
    args: Option<InitConfigArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `update_config` instructions
#[derive(Clone, Debug, Default)]
pub struct UpdateConfigBuilder {
    admin: Option<Pubkey>,
    args: Option<UpdateConfigArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `withdraw_fees` instructions
#[derive(Clone, Debug, Default)]
pub struct WithdrawFeesBuilder {
    admin: Option<Pubkey>,
    destination: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

/// Builder for `create_merchant` instructions
#[derive(Clone, Debug, Default)]
pub struct CreateMerchantBuilder {
    owner: Option<Pubkey>,
    args: Option<CreateMerchantArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `update_merchant` instructions
#[derive(Clone, Debug, Default)]
pub struct UpdateMerchantBuilder {
    owner: Option<Pubkey>,
    args: Option<UpdateMerchantArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `create_affiliate` instructions
#[derive(Clone, Debug, Default)]
pub struct CreateAffiliateBuilder {
    owner: Option<Pubkey>,
    args: Option<CreateAffiliateArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `update_affiliate` instructions
#[derive(Clone, Debug, Default)]
pub struct UpdateAffiliateBuilder {
    owner: Option<Pubkey>,
    args: Option<UpdateAffiliateArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `create_campaign` instructions
#[derive(Clone, Debug, Default)]
pub struct CreateCampaignBuilder {
    owner: Option<Pubkey>,
    args: Option<CreateCampaignArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `update_campaign` instructions
#[derive(Clone, Debug, Default)]
pub struct UpdateCampaignBuilder {
    owner: Option<Pubkey>,
    campaign: Option<Pubkey>,
    campaign_seed: Option<u64>,
    args: Option<UpdateCampaignArgs>,
    program_id: Option<Pubkey>,
}

/// Builder for `join_campaign` instructions
#[derive(Clone, Debug, Default)]
pub struct JoinCampaignBuilder {
    owner: Option<Pubkey>,
    campaign: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

/// Builder for `report_conversion` instructions
#[derive(Clone, Debug, Default)]
pub struct ReportConversionBuilder {
    owner: Option<Pubkey>,
    campaign: Option<Pubkey>,
    campaign_seed: Option<u64>,
    affiliate_owner: Option<Pubkey>,
    payout_address: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

/// Builder for `close_campaign` instructions
#[derive(Clone, Debug, Default)]
pub struct CloseCampaignBuilder {
    owner: Option<Pubkey>,
    campaign: Option<Pubkey>,
    campaign_seed: Option<u64>,
    withdraw_address: Option<Pubkey>,
    program_id: Option<Pubkey>,
}

/// Campaign PDA from an explicit address or from the owner's merchant and a seed
fn resolve_campaign(
    campaign: Option<Pubkey>,
    campaign_seed: Option<u64>,
    merchant_pda: &Pubkey,
    program_id: &Pubkey,
) -> Result<Pubkey> {
    match (campaign, campaign_seed) {
        (Some(campaign), _) => Ok(campaign),
        (None, Some(seed)) => Ok(pda::campaign_address_with_program_id(
            merchant_pda,
            seed,
            program_id,
        )),
        (None, None) => Err(SdkError::Generic(
            "Campaign not set (provide an address or a seed)".to_string(),
        )),
    }
}

impl InitConfigBuilder {
    /// Create a new init config builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signing upgrade authority
    #[must_use]
    pub const fn authority(mut self, authority: Pubkey) -> Self {
        self.authority = Some(authority);
        self
    }

    /// Set the configuration arguments
    #[must_use]
    pub const fn args(mut self, args: InitConfigArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `init_config` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let authority = self.authority.ok_or("Authority not set")?;
        let args = self.args.ok_or("Config args not set")?;
        args.validate()?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::treasury_address_with_program_id(&program_id), false), // treasury
            AccountMeta::new(authority, true), // authority (signer)
            AccountMeta::new_readonly(pda::program_data_address_with_program_id(&program_id), false), // program_data
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::InitConfig { args }.data(),
        })
    }
}

impl UpdateConfigBuilder {
    /// Create a new update config builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signing admin
    #[must_use]
    pub const fn admin(mut self, admin: Pubkey) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Set the fields to change
    #[must_use]
    pub const fn args(mut self, args: UpdateConfigArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `update_config` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let admin = self.admin.ok_or("Admin not set")?;
        let args = self.args.ok_or("Config update args not set")?;
        args.validate()?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new_readonly(admin, true), // admin (signer)
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::UpdateConfig { args }.data(),
        })
    }
}

impl WithdrawFeesBuilder {
    /// Create a new withdraw fees builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signing admin
    #[must_use]
    pub const fn admin(mut self, admin: Pubkey) -> Self {
        self.admin = Some(admin);
        self
    }

    /// Set the wallet receiving the collected fees (defaults to the admin)
    #[must_use]
    pub const fn destination(mut self, destination: Pubkey) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `withdraw_fees` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let admin = self.admin.ok_or("Admin not set")?;
        let destination = self.destination.unwrap_or(admin);

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new_readonly(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::treasury_address_with_program_id(&program_id), false), // treasury
            AccountMeta::new(admin, true),        // admin (signer)
            AccountMeta::new(destination, false), // destination
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::WithdrawFees {}.data(),
        })
    }
}

impl CreateMerchantBuilder {
    /// Create a new create merchant builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wallet registering as a merchant
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the merchant profile
    #[must_use]
    pub fn args(mut self, args: CreateMerchantArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `create_merchant` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Merchant args not set")?;
        args.validate()?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new(pda::merchant_address_with_program_id(&owner, &program_id), false), // merchant
            AccountMeta::new(owner, true), // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::CreateMerchant { args }.data(),
        })
    }
}

impl UpdateMerchantBuilder {
    /// Create a new update merchant builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merchant owner
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the fields to change
    #[must_use]
    pub fn args(mut self, args: UpdateMerchantArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `update_merchant` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Merchant update args not set")?;
        args.validate()?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new(pda::merchant_address_with_program_id(&owner, &program_id), false), // merchant
            AccountMeta::new_readonly(owner, true), // owner (signer)
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::UpdateMerchant { args }.data(),
        })
    }
}

impl CreateAffiliateBuilder {
    /// Create a new create affiliate builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wallet registering as an affiliate
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the affiliate profile
    #[must_use]
    pub fn args(mut self, args: CreateAffiliateArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `create_affiliate` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Affiliate args not set")?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new_readonly(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::affiliate_address_with_program_id(&owner, &program_id), false), // affiliate
            AccountMeta::new(owner, true), // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::CreateAffiliate { args }.data(),
        })
    }
}

impl UpdateAffiliateBuilder {
    /// Create a new update affiliate builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the affiliate owner
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the fields to change
    #[must_use]
    pub fn args(mut self, args: UpdateAffiliateArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `update_affiliate` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Affiliate update args not set")?;
        args.validate()?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let accounts = vec![
            AccountMeta::new(pda::affiliate_address_with_program_id(&owner, &program_id), false), // affiliate
            AccountMeta::new_readonly(owner, true), // owner (signer)
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::UpdateAffiliate { args }.data(),
        })
    }
}

impl CreateCampaignBuilder {
    /// Create a new create campaign builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merchant owner funding the campaign
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the campaign arguments
    #[must_use]
    pub fn args(mut self, args: CreateCampaignArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `create_campaign` instruction
    ///
    /// Time-dependent checks (`ends_at`) are left to the program.
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Campaign args not set")?;
        // the end time is checked on-chain against the cluster clock
        crate::validation::validate_profile(&args.name, &args.description)?;
        crate::validation::validate_product_uri(&args.product_uri)?;
        affiliate_escrow::validation::validate_amount(args.budget)?;
        affiliate_escrow::validation::validate_amount(args.commission_per_referral)?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let merchant_pda = pda::merchant_address_with_program_id(&owner, &program_id);
        let campaign_pda =
            pda::campaign_address_with_program_id(&merchant_pda, args.seed, &program_id);
        let escrow_pda = pda::escrow_address_with_program_id(&campaign_pda, &program_id);

        let accounts = vec![
            AccountMeta::new_readonly(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::treasury_address_with_program_id(&program_id), false), // treasury
            AccountMeta::new(merchant_pda, false), // merchant
            AccountMeta::new(campaign_pda, false), // campaign
            AccountMeta::new(escrow_pda, false),   // escrow
            AccountMeta::new(owner, true),         // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::CreateCampaign { args }.data(),
        })
    }
}

impl UpdateCampaignBuilder {
    /// Create a new update campaign builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merchant owner
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the campaign address
    #[must_use]
    pub const fn campaign(mut self, campaign: Pubkey) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the campaign by the seed it was created with
    #[must_use]
    pub const fn campaign_seed(mut self, seed: u64) -> Self {
        self.campaign_seed = Some(seed);
        self
    }

    /// Set the fields to change
    #[must_use]
    pub fn args(mut self, args: UpdateCampaignArgs) -> Self {
        self.args = Some(args);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `update_campaign` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let args = self.args.ok_or("Campaign update args not set")?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let merchant_pda = pda::merchant_address_with_program_id(&owner, &program_id);
        let campaign_pda =
            resolve_campaign(self.campaign, self.campaign_seed, &merchant_pda, &program_id)?;
        let escrow_pda = pda::escrow_address_with_program_id(&campaign_pda, &program_id);

        let accounts = vec![
            AccountMeta::new_readonly(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::treasury_address_with_program_id(&program_id), false), // treasury
            AccountMeta::new(merchant_pda, false), // merchant
            AccountMeta::new(campaign_pda, false), // campaign
            AccountMeta::new(escrow_pda, false),   // escrow
            AccountMeta::new(owner, true),         // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::UpdateCampaign { args }.data(),
        })
    }
}

impl JoinCampaignBuilder {
    /// Create a new join campaign builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the affiliate owner joining the campaign
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the campaign address
    #[must_use]
    pub const fn campaign(mut self, campaign: Pubkey) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `join_campaign` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let campaign_pda = self.campaign.ok_or("Campaign not set")?;

        let program_id = self.program_id.unwrap_or_else(program_id);
        let affiliate_pda = pda::affiliate_address_with_program_id(&owner, &program_id);
        let link_pda = pda::campaign_affiliate_address_with_program_id(
            &campaign_pda,
            &affiliate_pda,
            &program_id,
        );

        let accounts = vec![
            AccountMeta::new(campaign_pda, false),  // campaign
            AccountMeta::new(affiliate_pda, false), // affiliate
            AccountMeta::new(link_pda, false),      // campaign_affiliate
            AccountMeta::new(owner, true),          // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::JoinCampaign {}.data(),
        })
    }
}

impl ReportConversionBuilder {
    /// Create a new report conversion builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merchant owner reporting the conversion
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the campaign address
    #[must_use]
    pub const fn campaign(mut self, campaign: Pubkey) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the campaign by the seed it was created with
    #[must_use]
    pub const fn campaign_seed(mut self, seed: u64) -> Self {
        self.campaign_seed = Some(seed);
        self
    }

    /// Set the wallet that registered the credited affiliate
    #[must_use]
    pub const fn affiliate_owner(mut self, affiliate_owner: Pubkey) -> Self {
        self.affiliate_owner = Some(affiliate_owner);
        self
    }

    /// Set the affiliate's payout address (defaults to the affiliate owner)
    #[must_use]
    pub const fn payout_address(mut self, payout_address: Pubkey) -> Self {
        self.payout_address = Some(payout_address);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `report_conversion` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let affiliate_owner = self.affiliate_owner.ok_or("Affiliate owner not set")?;
        let payout_address = self.payout_address.unwrap_or(affiliate_owner);

        let program_id = self.program_id.unwrap_or_else(program_id);
        let merchant_pda = pda::merchant_address_with_program_id(&owner, &program_id);
        let campaign_pda =
            resolve_campaign(self.campaign, self.campaign_seed, &merchant_pda, &program_id)?;
        let escrow_pda = pda::escrow_address_with_program_id(&campaign_pda, &program_id);
        let affiliate_pda = pda::affiliate_address_with_program_id(&affiliate_owner, &program_id);
        let link_pda = pda::campaign_affiliate_address_with_program_id(
            &campaign_pda,
            &affiliate_pda,
            &program_id,
        );

        let accounts = vec![
            AccountMeta::new_readonly(pda::config_address_with_program_id(&program_id), false), // config
            AccountMeta::new(pda::treasury_address_with_program_id(&program_id), false), // treasury
            AccountMeta::new(merchant_pda, false),   // merchant
            AccountMeta::new(campaign_pda, false),   // campaign
            AccountMeta::new(escrow_pda, false),     // escrow
            AccountMeta::new(affiliate_pda, false),  // affiliate
            AccountMeta::new(link_pda, false),       // campaign_affiliate
            AccountMeta::new(payout_address, false), // payout_address
            AccountMeta::new(owner, true),           // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::ReportConversion {}.data(),
        })
    }
}

impl CloseCampaignBuilder {
    /// Create a new close campaign builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the merchant owner
    #[must_use]
    pub const fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the campaign address
    #[must_use]
    pub const fn campaign(mut self, campaign: Pubkey) -> Self {
        self.campaign = Some(campaign);
        self
    }

    /// Set the campaign by the seed it was created with
    #[must_use]
    pub const fn campaign_seed(mut self, seed: u64) -> Self {
        self.campaign_seed = Some(seed);
        self
    }

    /// Set the wallet receiving the remaining escrow (defaults to the owner)
    #[must_use]
    pub const fn withdraw_address(mut self, withdraw_address: Pubkey) -> Self {
        self.withdraw_address = Some(withdraw_address);
        self
    }

    /// Set the program ID to use
    #[must_use]
    pub const fn program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    /// Build the `close_campaign` instruction
    pub fn build_instruction(self) -> Result<Instruction> {
        let owner = self.owner.ok_or("Owner not set")?;
        let withdraw_address = self.withdraw_address.unwrap_or(owner);

        let program_id = self.program_id.unwrap_or_else(program_id);
        let merchant_pda = pda::merchant_address_with_program_id(&owner, &program_id);
        let campaign_pda =
            resolve_campaign(self.campaign, self.campaign_seed, &merchant_pda, &program_id)?;
        let escrow_pda = pda::escrow_address_with_program_id(&campaign_pda, &program_id);

        let accounts = vec![
            AccountMeta::new_readonly(merchant_pda, false), // merchant
            AccountMeta::new(campaign_pda, false),          // campaign
            AccountMeta::new(escrow_pda, false),            // escrow
            AccountMeta::new(withdraw_address, false),      // withdraw_address
            AccountMeta::new_readonly(owner, true),         // owner (signer)
            AccountMeta::new_readonly(system_program::ID, false), // system_program
        ];

        Ok(Instruction {
            program_id,
            accounts,
            data: affiliate_escrow::instruction::CloseCampaign {}.data(),
        })
    }
}

/// Create a config initialization builder
#[must_use]
pub fn init_config() -> InitConfigBuilder {
    InitConfigBuilder::new()
}

/// Create a config update builder
#[must_use]
pub fn update_config() -> UpdateConfigBuilder {
    UpdateConfigBuilder::new()
}

/// Create a treasury withdrawal builder
#[must_use]
pub fn withdraw_fees() -> WithdrawFeesBuilder {
    WithdrawFeesBuilder::new()
}

/// Create a merchant registration builder
#[must_use]
pub fn create_merchant() -> CreateMerchantBuilder {
    CreateMerchantBuilder::new()
}

/// Create a merchant update builder
#[must_use]
pub fn update_merchant() -> UpdateMerchantBuilder {
    UpdateMerchantBuilder::new()
}

/// Create an affiliate registration builder
#[must_use]
pub fn create_affiliate() -> CreateAffiliateBuilder {
    CreateAffiliateBuilder::new()
}

/// Create an affiliate update builder
#[must_use]
pub fn update_affiliate() -> UpdateAffiliateBuilder {
    UpdateAffiliateBuilder::new()
}

/// Create a campaign creation builder
#[must_use]
pub fn create_campaign() -> CreateCampaignBuilder {
    CreateCampaignBuilder::new()
}

/// Create a campaign update builder
#[must_use]
pub fn update_campaign() -> UpdateCampaignBuilder {
    UpdateCampaignBuilder::new()
}

/// Create a campaign join builder
#[must_use]
pub fn join_campaign() -> JoinCampaignBuilder {
    JoinCampaignBuilder::new()
}

/// Create a conversion report builder
#[must_use]
pub fn report_conversion() -> ReportConversionBuilder {
    ReportConversionBuilder::new()
}

/// Create a campaign close builder
#[must_use]
pub fn close_campaign() -> CloseCampaignBuilder {
    CloseCampaignBuilder::new()
}
