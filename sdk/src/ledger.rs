//! In-memory ledger running the program's own state transitions
//!
//! [`LocalLedger`] keeps every record and every lamport balance in memory and
//! executes each operation the way the matching instruction handler does: the
//! program's pure transition first, then the transfers named by the event it
//! returns. An operation runs against a copy of the whole state, and the copy
//! replaces the committed state only when the operation succeeds, so a failed
//! operation leaves no trace.
//!
//! Record rent is not modelled, so records cost nothing to create. Vault rent
//! is: the treasury and every campaign escrow hold a rent-exempt reserve of
//! [`VAULT_RENT_RESERVE_LAMPORTS`] on top of the lamports they account for,
//! paid by the signer that first funds them. An escrow's balance is therefore
//! `available_budget` plus the reserve until the campaign closes and sweeps
//! both.
//!
//! ```
//! use affiliate_escrow::create_merchant::CreateMerchantArgs;
//! use affiliate_escrow::init_config::InitConfigArgs;
//! use affiliate_escrow_sdk::LocalLedger;
//! use anchor_lang::prelude::Pubkey;
//!
//! # fn main() -> affiliate_escrow_sdk::Result<()> {
//! let authority = Pubkey::new_unique();
//! let mut ledger = LocalLedger::new(affiliate_escrow::ID, Some(authority));
//! ledger.airdrop(&authority, 1_000_000_000)?;
//! ledger.init_config(&authority, &InitConfigArgs::default())?;
//!
//! let merchant_owner = Pubkey::new_unique();
//! ledger.create_merchant(
//!     &merchant_owner,
//!     &CreateMerchantArgs {
//!         name: "Trail Outfitters".to_string(),
//!         description: String::new(),
//!     },
//! )?;
//! assert!(ledger.merchant(&ledger.merchant_address(&merchant_owner)).is_some());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, SdkError};
use crate::events::EscrowEvent;
use crate::pda;
use crate::program_types::CampaignSummary;
use affiliate_escrow::close_campaign;
use affiliate_escrow::constants::VAULT_RENT_RESERVE_LAMPORTS;
use affiliate_escrow::create_affiliate::{self, CreateAffiliateArgs};
use affiliate_escrow::create_campaign::{CreateCampaignArgs, CreateCampaignRecords};
use affiliate_escrow::create_merchant::{self, CreateMerchantArgs};
use affiliate_escrow::errors::EscrowError;
use affiliate_escrow::events::{
    AffiliateCreated, AffiliateUpdated, CampaignClosed, CampaignCreated, CampaignJoined,
    CampaignUpdated, ConfigInitialized, ConfigUpdated, ConversionReported, FeesWithdrawn,
    MerchantCreated, MerchantUpdated,
};
use affiliate_escrow::init_config::{self, InitConfigArgs};
use affiliate_escrow::join_campaign::JoinCampaignRecords;
use affiliate_escrow::report_conversion::ConversionRecords;
use affiliate_escrow::state::{Affiliate, Campaign, CampaignAffiliate, Config, Merchant};
use affiliate_escrow::update_affiliate::{self, UpdateAffiliateArgs};
use affiliate_escrow::update_campaign::{UpdateCampaignArgs, UpdateCampaignRecords};
use affiliate_escrow::update_config::{self, UpdateConfigArgs};
use affiliate_escrow::update_merchant::{self, UpdateMerchantArgs};
use affiliate_escrow::utils::{balance_above_reserve, reserve_shortfall};
use affiliate_escrow::withdraw_fees;
use anchor_lang::prelude::Pubkey;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Lamport balances of wallets and vaults
#[derive(Clone, Debug, Default)]
struct Balances(BTreeMap<Pubkey, u64>);

impl Balances {
    fn get(&self, address: &Pubkey) -> u64 {
        self.0.get(address).copied().unwrap_or_default()
    }

    fn credit(&mut self, address: Pubkey, lamports: u64) -> Result<()> {
        let balance = self.0.entry(address).or_default();
        *balance = balance
            .checked_add(lamports)
            .ok_or(EscrowError::ArithmeticError)?;
        Ok(())
    }

    /// Tops `vault` up to `reserve` from `payer`
    fn fund_reserve(&mut self, payer: &Pubkey, vault: &Pubkey, reserve: u64) -> Result<u64> {
        let shortfall = reserve_shortfall(self.get(vault), reserve);
        self.transfer(payer, vault, shortfall)?;
        Ok(shortfall)
    }

    /// System-program transfer; zero amounts are skipped
    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, lamports: u64) -> Result<()> {
        if lamports == 0 {
            return Ok(());
        }
        let available = self.get(from);
        let remaining = available
            .checked_sub(lamports)
            .ok_or(SdkError::InsufficientFunds {
                required: lamports,
                available,
            })?;
        self.0.insert(*from, remaining);
        self.credit(*to, lamports)
    }
}

/// Everything a transaction can touch
#[derive(Clone, Debug, Default)]
struct LedgerState {
    config: Option<Config>,
    merchants: BTreeMap<Pubkey, Merchant>,
    affiliates: BTreeMap<Pubkey, Affiliate>,
    campaigns: BTreeMap<Pubkey, Campaign>,
    links: BTreeMap<Pubkey, CampaignAffiliate>,
    balances: Balances,
    events: Vec<EscrowEvent>,
}

/// Per-operation execution environment
#[derive(Clone, Copy, Debug)]
struct Env {
    program_id: Pubkey,
    upgrade_authority: Option<Pubkey>,
    vault_reserve: u64,
    now: i64,
}

fn record_mut<'a, T>(
    records: &'a mut BTreeMap<Pubkey, T>,
    address: &Pubkey,
    kind: &str,
) -> Result<&'a mut T> {
    records
        .get_mut(address)
        .ok_or_else(|| SdkError::AccountNotFound(format!("{kind} {address}")))
}

/// In-memory affiliate escrow ledger
#[derive(Clone, Debug)]
pub struct LocalLedger {
    program_id: Pubkey,
    upgrade_authority: Option<Pubkey>,
    vault_reserve: u64,
    clock: i64,
    state: LedgerState,
}

impl LocalLedger {
    /// Create an empty ledger
    ///
    /// `upgrade_authority` stands in for the program data account: only that
    /// signer may initialize the configuration, and `None` models an
    /// immutable program that can never be configured. The clock starts at
    /// the current wall-clock time.
    #[must_use]
    pub fn new(program_id: Pubkey, upgrade_authority: Option<Pubkey>) -> Self {
        Self {
            program_id,
            upgrade_authority,
            vault_reserve: VAULT_RENT_RESERVE_LAMPORTS,
            clock: chrono::Utc::now().timestamp(),
            state: LedgerState::default(),
        }
    }

    #[must_use]
    pub const fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Rent-exempt reserve kept in the treasury and in every open escrow
    #[must_use]
    pub const fn vault_reserve(&self) -> u64 {
        self.vault_reserve
    }

    /// Lamports the admin can withdraw from the treasury
    #[must_use]
    pub fn collected_fees(&self) -> u64 {
        balance_above_reserve(self.treasury_balance(), self.vault_reserve)
    }

    /// Current ledger time as a Unix timestamp
    #[must_use]
    pub const fn now(&self) -> i64 {
        self.clock
    }

    pub fn set_clock(&mut self, unix_timestamp: i64) {
        self.clock = unix_timestamp;
    }

    /// Move the clock forward (or back, for negative values); returns the new time
    pub fn advance_clock(&mut self, seconds: i64) -> i64 {
        self.clock = self.clock.saturating_add(seconds);
        self.clock
    }

    /// Credit lamports to any address out of thin air
    pub fn airdrop(&mut self, address: &Pubkey, lamports: u64) -> Result<()> {
        self.state.balances.credit(*address, lamports)?;
        debug!(address = %address, lamports, "airdrop");
        Ok(())
    }

    #[must_use]
    pub fn balance(&self, address: &Pubkey) -> u64 {
        self.state.balances.get(address)
    }

    #[must_use]
    pub fn treasury_balance(&self) -> u64 {
        self.balance(&pda::treasury_address_with_program_id(&self.program_id))
    }

    #[must_use]
    pub fn escrow_balance(&self, campaign: &Pubkey) -> u64 {
        self.balance(&pda::escrow_address_with_program_id(
            campaign,
            &self.program_id,
        ))
    }

    #[must_use]
    pub const fn config(&self) -> Option<&Config> {
        self.state.config.as_ref()
    }

    #[must_use]
    pub fn merchant(&self, address: &Pubkey) -> Option<&Merchant> {
        self.state.merchants.get(address)
    }

    #[must_use]
    pub fn affiliate(&self, address: &Pubkey) -> Option<&Affiliate> {
        self.state.affiliates.get(address)
    }

    #[must_use]
    pub fn campaign(&self, address: &Pubkey) -> Option<&Campaign> {
        self.state.campaigns.get(address)
    }

    #[must_use]
    pub fn campaign_affiliate(&self, address: &Pubkey) -> Option<&CampaignAffiliate> {
        self.state.links.get(address)
    }

    /// Summary of a campaign at the current ledger time
    #[must_use]
    pub fn campaign_summary(&self, address: &Pubkey) -> Option<CampaignSummary> {
        self.campaign(address)
            .map(|campaign| CampaignSummary::new(*address, campaign, self.clock))
    }

    /// Campaigns owned by a merchant PDA, in address order
    pub fn campaigns_of<'a>(
        &'a self,
        merchant: &'a Pubkey,
    ) -> impl Iterator<Item = (&'a Pubkey, &'a Campaign)> + 'a {
        self.state
            .campaigns
            .iter()
            .filter(move |(_, campaign)| campaign.merchant == *merchant)
    }

    /// Every event emitted by committed operations, oldest first
    #[must_use]
    pub fn events(&self) -> &[EscrowEvent] {
        &self.state.events
    }

    #[must_use]
    pub fn merchant_address(&self, owner: &Pubkey) -> Pubkey {
        pda::merchant_address_with_program_id(owner, &self.program_id)
    }

    #[must_use]
    pub fn affiliate_address(&self, owner: &Pubkey) -> Pubkey {
        pda::affiliate_address_with_program_id(owner, &self.program_id)
    }

    /// Campaign PDA for the merchant registered by `merchant_owner`
    #[must_use]
    pub fn campaign_address(&self, merchant_owner: &Pubkey, seed: u64) -> Pubkey {
        pda::campaign_address_with_program_id(
            &self.merchant_address(merchant_owner),
            seed,
            &self.program_id,
        )
    }

    #[must_use]
    pub fn campaign_affiliate_address(&self, campaign: &Pubkey, affiliate: &Pubkey) -> Pubkey {
        pda::campaign_affiliate_address_with_program_id(campaign, affiliate, &self.program_id)
    }

    /// Run `apply` on a working copy and commit it only on success
    fn transact<T>(
        &mut self,
        operation: &'static str,
        apply: impl FnOnce(&mut LedgerState, Env) -> Result<T>,
    ) -> Result<T> {
        let env = Env {
            program_id: self.program_id,
            upgrade_authority: self.upgrade_authority,
            vault_reserve: self.vault_reserve,
            now: self.clock,
        };
        let mut working = self.state.clone();

        match apply(&mut working, env) {
            Ok(outcome) => {
                self.state = working;
                info!(operation, now = env.now, "ledger operation committed");
                Ok(outcome)
            }
            Err(error) => {
                warn!(operation, error = %error, "ledger operation rejected");
                Err(error)
            }
        }
    }

    /// Create the configuration; `signer` must be the upgrade authority and
    /// pays the treasury's rent reserve
    pub fn init_config(
        &mut self,
        signer: &Pubkey,
        args: &InitConfigArgs,
    ) -> Result<ConfigInitialized> {
        self.transact("init_config", |state, env| {
            init_config::ensure_initializer(env.upgrade_authority, signer)?;
            let (_, bump) = pda::config_with_program_id(&env.program_id);
            let (_, treasury_bump) = pda::treasury_with_program_id(&env.program_id);

            let config = state.config.get_or_insert_with(Config::default);
            let event = init_config::initialize(config, *signer, args, bump, treasury_bump)?;

            let treasury = pda::treasury_address_with_program_id(&env.program_id);
            let reserve = state
                .balances
                .fund_reserve(signer, &treasury, env.vault_reserve)?;
            debug!(reserve, "treasury rent reserve funded");
            state.events.push(EscrowEvent::ConfigInitialized(event.clone()));
            Ok(event)
        })
    }

    pub fn update_config(
        &mut self,
        signer: &Pubkey,
        args: &UpdateConfigArgs,
    ) -> Result<ConfigUpdated> {
        self.transact("update_config", |state, _| {
            let config = state.config.as_mut().ok_or(SdkError::ConfigNotFound)?;
            let event = update_config::apply_update(config, signer, args)?;

            state.events.push(EscrowEvent::ConfigUpdated(event.clone()));
            Ok(event)
        })
    }

    /// Sweep the collected fees to `destination`; admin only. The treasury
    /// keeps its rent reserve.
    pub fn withdraw_fees(&mut self, signer: &Pubkey, destination: &Pubkey) -> Result<FeesWithdrawn> {
        self.transact("withdraw_fees", |state, env| {
            let config = state.config.as_ref().ok_or(SdkError::ConfigNotFound)?;
            let treasury = pda::treasury_address_with_program_id(&env.program_id);
            let event = withdraw_fees::authorize_withdrawal(
                config,
                signer,
                *destination,
                balance_above_reserve(state.balances.get(&treasury), env.vault_reserve),
            )?;

            state.balances.transfer(&treasury, destination, event.amount)?;
            state.events.push(EscrowEvent::FeesWithdrawn(event.clone()));
            Ok(event)
        })
    }

    pub fn create_merchant(
        &mut self,
        signer: &Pubkey,
        args: &CreateMerchantArgs,
    ) -> Result<MerchantCreated> {
        self.transact("create_merchant", |state, env| {
            let (merchant_key, bump) = pda::merchant_with_program_id(signer, &env.program_id);
            let merchant = state.merchants.entry(merchant_key).or_default();
            let event = create_merchant::register(merchant, merchant_key, *signer, args, bump)?;

            state.events.push(EscrowEvent::MerchantCreated(event.clone()));
            Ok(event)
        })
    }

    pub fn update_merchant(
        &mut self,
        signer: &Pubkey,
        args: &UpdateMerchantArgs,
    ) -> Result<MerchantUpdated> {
        self.transact("update_merchant", |state, env| {
            let merchant_key = pda::merchant_address_with_program_id(signer, &env.program_id);
            let merchant = record_mut(&mut state.merchants, &merchant_key, "merchant")?;
            let event = update_merchant::apply_update(merchant, merchant_key, args)?;

            state.events.push(EscrowEvent::MerchantUpdated(event.clone()));
            Ok(event)
        })
    }

    pub fn create_affiliate(
        &mut self,
        signer: &Pubkey,
        args: &CreateAffiliateArgs,
    ) -> Result<AffiliateCreated> {
        self.transact("create_affiliate", |state, env| {
            let config = state.config.as_ref().ok_or(SdkError::ConfigNotFound)?;
            let (affiliate_key, bump) = pda::affiliate_with_program_id(signer, &env.program_id);
            let affiliate = state.affiliates.entry(affiliate_key).or_default();
            let event =
                create_affiliate::register(affiliate, affiliate_key, *signer, config, args, bump)?;

            state.events.push(EscrowEvent::AffiliateCreated(event.clone()));
            Ok(event)
        })
    }

    pub fn update_affiliate(
        &mut self,
        signer: &Pubkey,
        args: &UpdateAffiliateArgs,
    ) -> Result<AffiliateUpdated> {
        self.transact("update_affiliate", |state, env| {
            let affiliate_key = pda::affiliate_address_with_program_id(signer, &env.program_id);
            let affiliate = record_mut(&mut state.affiliates, &affiliate_key, "affiliate")?;
            let event = update_affiliate::apply_update(affiliate, affiliate_key, args)?;

            state.events.push(EscrowEvent::AffiliateUpdated(event.clone()));
            Ok(event)
        })
    }

    /// Open a campaign for the signer's merchant, funding escrow (budget and
    /// rent reserve) and treasury from the signer's wallet
    pub fn create_campaign(
        &mut self,
        signer: &Pubkey,
        args: &CreateCampaignArgs,
    ) -> Result<CampaignCreated> {
        self.transact("create_campaign", |state, env| {
            let config = state.config.as_ref().ok_or(SdkError::ConfigNotFound)?;
            let merchant_key = pda::merchant_address_with_program_id(signer, &env.program_id);
            let merchant = record_mut(&mut state.merchants, &merchant_key, "merchant")?;
            let (campaign_key, bump) =
                pda::campaign_with_program_id(&merchant_key, args.seed, &env.program_id);
            let (escrow_key, escrow_bump) =
                pda::escrow_with_program_id(&campaign_key, &env.program_id);
            let campaign = state.campaigns.entry(campaign_key).or_default();

            let event = CreateCampaignRecords {
                config,
                merchant,
                merchant_key,
                campaign,
                campaign_key,
                bump,
                escrow_bump,
            }
            .open(args, env.now)?;

            debug!(
                campaign = %campaign_key,
                budget = event.budget,
                creation_fee = event.creation_fee,
                "funding campaign escrow"
            );
            let treasury = pda::treasury_address_with_program_id(&env.program_id);
            state
                .balances
                .fund_reserve(signer, &escrow_key, env.vault_reserve)?;
            state.balances.transfer(signer, &escrow_key, event.budget)?;
            state.balances.transfer(signer, &treasury, event.creation_fee)?;

            state.events.push(EscrowEvent::CampaignCreated(event.clone()));
            Ok(event)
        })
    }

    /// Patch a campaign and optionally top up its escrow
    pub fn update_campaign(
        &mut self,
        signer: &Pubkey,
        campaign: &Pubkey,
        args: &UpdateCampaignArgs,
    ) -> Result<CampaignUpdated> {
        self.transact("update_campaign", |state, env| {
            let config = state.config.as_ref().ok_or(SdkError::ConfigNotFound)?;
            let merchant_key = pda::merchant_address_with_program_id(signer, &env.program_id);
            let merchant = record_mut(&mut state.merchants, &merchant_key, "merchant")?;
            let record = record_mut(&mut state.campaigns, campaign, "campaign")?;
            let was_paused = record.is_paused;

            let event = UpdateCampaignRecords {
                config,
                merchant,
                merchant_key,
                campaign: record,
                campaign_key: *campaign,
            }
            .apply(args, env.now)?;

            debug!(
                campaign = %campaign,
                additional_budget = event.additional_budget,
                fee = event.fee,
                "applying campaign update"
            );
            let escrow = pda::escrow_address_with_program_id(campaign, &env.program_id);
            let treasury = pda::treasury_address_with_program_id(&env.program_id);
            state.balances.transfer(signer, &escrow, event.additional_budget)?;
            state.balances.transfer(signer, &treasury, event.fee)?;

            if was_paused != event.is_paused {
                warn!(
                    campaign = %campaign,
                    is_paused = event.is_paused,
                    available_budget = event.available_budget,
                    "campaign pause state changed"
                );
            }
            state.events.push(EscrowEvent::CampaignUpdated(event.clone()));
            Ok(event)
        })
    }

    /// Link the signer's affiliate to a campaign
    pub fn join_campaign(&mut self, signer: &Pubkey, campaign: &Pubkey) -> Result<CampaignJoined> {
        self.transact("join_campaign", |state, env| {
            let record = record_mut(&mut state.campaigns, campaign, "campaign")?;
            let affiliate_key = pda::affiliate_address_with_program_id(signer, &env.program_id);
            let affiliate = record_mut(&mut state.affiliates, &affiliate_key, "affiliate")?;
            let (link_key, bump) = pda::campaign_affiliate_with_program_id(
                campaign,
                &affiliate_key,
                &env.program_id,
            );
            let link = state.links.entry(link_key).or_default();

            let event = JoinCampaignRecords {
                campaign: record,
                campaign_key: *campaign,
                affiliate,
                affiliate_key,
                campaign_affiliate: link,
                campaign_affiliate_key: link_key,
                bump,
            }
            .join(env.now)?;

            state.events.push(EscrowEvent::CampaignJoined(event.clone()));
            Ok(event)
        })
    }

    /// Pay one commission out of escrow
    ///
    /// `affiliate` is the affiliate PDA; `payout_address` must match the
    /// affiliate's recorded payout address.
    pub fn report_conversion(
        &mut self,
        signer: &Pubkey,
        campaign: &Pubkey,
        affiliate: &Pubkey,
        payout_address: &Pubkey,
    ) -> Result<ConversionReported> {
        self.transact("report_conversion", |state, env| {
            let config = state.config.as_ref().ok_or(SdkError::ConfigNotFound)?;
            let merchant_key = pda::merchant_address_with_program_id(signer, &env.program_id);
            let merchant = record_mut(&mut state.merchants, &merchant_key, "merchant")?;
            let record = record_mut(&mut state.campaigns, campaign, "campaign")?;
            let affiliate_record = record_mut(&mut state.affiliates, affiliate, "affiliate")?;
            let link_key =
                pda::campaign_affiliate_address_with_program_id(campaign, affiliate, &env.program_id);
            let link = record_mut(&mut state.links, &link_key, "campaign affiliate link")?;

            let event = ConversionRecords {
                config,
                merchant,
                merchant_key,
                campaign: record,
                affiliate: affiliate_record,
                campaign_affiliate: link,
            }
            .settle(payout_address, env.now)?;

            debug!(
                campaign = %campaign,
                commission = event.commission,
                fee = event.fee,
                net = event.net,
                "settling conversion"
            );
            let escrow = pda::escrow_address_with_program_id(campaign, &env.program_id);
            let treasury = pda::treasury_address_with_program_id(&env.program_id);
            state.balances.transfer(&escrow, &treasury, event.fee)?;
            state.balances.transfer(&escrow, payout_address, event.net)?;

            if event.is_paused {
                warn!(
                    campaign = %campaign,
                    available_budget = event.available_budget,
                    commission = event.commission,
                    "campaign paused: escrow below one commission"
                );
            }
            state.events.push(EscrowEvent::ConversionReported(event.clone()));
            Ok(event)
        })
    }

    /// Close a campaign and sweep its escrow to `withdraw_address`
    pub fn close_campaign(
        &mut self,
        signer: &Pubkey,
        campaign: &Pubkey,
        withdraw_address: &Pubkey,
    ) -> Result<CampaignClosed> {
        self.transact("close_campaign", |state, env| {
            let merchant_key = pda::merchant_address_with_program_id(signer, &env.program_id);
            if !state.merchants.contains_key(&merchant_key) {
                return Err(SdkError::AccountNotFound(format!("merchant {merchant_key}")));
            }
            let record = record_mut(&mut state.campaigns, campaign, "campaign")?;
            let escrow = pda::escrow_address_with_program_id(campaign, &env.program_id);

            let event = close_campaign::close(
                record,
                *campaign,
                &merchant_key,
                *withdraw_address,
                state.balances.get(&escrow),
            )?;

            state.balances.transfer(&escrow, withdraw_address, event.amount)?;
            state.events.push(EscrowEvent::CampaignClosed(event.clone()));
            Ok(event)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL: u64 = 1_000_000_000;

    fn ledger() -> (LocalLedger, Pubkey) {
        let authority = Pubkey::new_unique();
        let mut ledger = LocalLedger::new(Pubkey::new_unique(), Some(authority));
        ledger.set_clock(1_700_000_000);
        ledger.airdrop(&authority, SOL).unwrap();
        ledger
            .init_config(
                &authority,
                &InitConfigArgs {
                    campaign_creation_fee_bps: 100,
                    commission_fee_bps: 50,
                    ..InitConfigArgs::default()
                },
            )
            .unwrap();
        (ledger, authority)
    }

    fn merchant(ledger: &mut LocalLedger) -> Pubkey {
        let owner = Pubkey::new_unique();
        ledger
            .create_merchant(
                &owner,
                &CreateMerchantArgs {
                    name: "Trail Outfitters".to_string(),
                    description: String::new(),
                },
            )
            .unwrap();
        owner
    }

    fn campaign_args() -> CreateCampaignArgs {
        CreateCampaignArgs {
            seed: 1,
            name: "Summer Hiking Sale".to_string(),
            description: String::new(),
            product_uri: "https://shop.example/boots".to_string(),
            budget: 10 * SOL,
            commission_per_referral: 7 * SOL,
            ends_at: None,
        }
    }

    #[test]
    fn test_wallet_shortfall_rolls_back_everything() {
        let (mut ledger, _) = ledger();
        let owner = merchant(&mut ledger);
        let funds = (10 * SOL).checked_add(ledger.vault_reserve()).unwrap();
        ledger.airdrop(&owner, funds).unwrap();

        // reserve and budget fit but the creation fee does not
        let result = ledger.create_campaign(&owner, &campaign_args());
        assert!(matches!(
            result,
            Err(SdkError::InsufficientFunds {
                required: 100_000_000,
                available: 0
            })
        ));

        let campaign_key = ledger.campaign_address(&owner, 1);
        assert!(ledger.campaign(&campaign_key).is_none());
        assert_eq!(ledger.balance(&owner), funds);
        assert_eq!(ledger.escrow_balance(&campaign_key), 0);
        let merchant = ledger.merchant(&ledger.merchant_address(&owner)).unwrap();
        assert_eq!(merchant.total_campaigns, 0);
        assert_eq!(ledger.events().len(), 2);
    }

    #[test]
    fn test_missing_merchant_is_account_not_found() {
        let (mut ledger, _) = ledger();
        let stranger = Pubkey::new_unique();
        assert!(matches!(
            ledger.create_campaign(&stranger, &campaign_args()),
            Err(SdkError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_init_config_requires_upgrade_authority() {
        let mut ledger = LocalLedger::new(Pubkey::new_unique(), None);
        let result = ledger.init_config(&Pubkey::new_unique(), &InitConfigArgs::default());
        assert!(matches!(
            result,
            Err(SdkError::Program(EscrowError::Unauthorized))
        ));
        assert!(ledger.config().is_none());
    }

    #[test]
    fn test_unfunded_authority_cannot_seed_treasury() {
        let authority = Pubkey::new_unique();
        let mut ledger = LocalLedger::new(Pubkey::new_unique(), Some(authority));

        let result = ledger.init_config(&authority, &InitConfigArgs::default());

        assert!(matches!(
            result,
            Err(SdkError::InsufficientFunds {
                required: VAULT_RENT_RESERVE_LAMPORTS,
                available: 0
            })
        ));
        assert!(ledger.config().is_none());
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_vaults_hold_rent_reserve() {
        let (mut ledger, authority) = ledger();
        let reserve = ledger.vault_reserve();
        assert_eq!(ledger.treasury_balance(), reserve);
        assert_eq!(ledger.collected_fees(), 0);
        assert_eq!(ledger.balance(&authority), SOL.checked_sub(reserve).unwrap());

        let owner = merchant(&mut ledger);
        ledger.airdrop(&owner, 20 * SOL).unwrap();
        let created = ledger.create_campaign(&owner, &campaign_args()).unwrap();

        assert_eq!(
            ledger.escrow_balance(&created.campaign),
            (10 * SOL).checked_add(reserve).unwrap()
        );
        assert_eq!(ledger.collected_fees(), 100_000_000);

        // the treasury keeps its reserve across withdrawals
        let destination = Pubkey::new_unique();
        let withdrawn = ledger.withdraw_fees(&authority, &destination).unwrap();
        assert_eq!(withdrawn.amount, 100_000_000);
        assert_eq!(ledger.treasury_balance(), reserve);

        // closing returns the escrow reserve with the budget
        let closed = ledger
            .close_campaign(&owner, &created.campaign, &owner)
            .unwrap();
        assert_eq!(closed.amount, (10 * SOL).checked_add(reserve).unwrap());
        assert_eq!(ledger.escrow_balance(&created.campaign), 0);
    }

    #[test]
    fn test_dust_remainder_stays_above_reserve() {
        let (mut ledger, _) = ledger();
        let owner = merchant(&mut ledger);
        ledger.airdrop(&owner, 20 * SOL).unwrap();
        let mut args = campaign_args();
        args.budget = 7_000_500_000;
        let campaign = ledger.create_campaign(&owner, &args).unwrap().campaign;

        let affiliate_owner = Pubkey::new_unique();
        ledger
            .create_affiliate(
                &affiliate_owner,
                &CreateAffiliateArgs {
                    name: "Summit Reviews".to_string(),
                    description: String::new(),
                    payout_address: None,
                },
            )
            .unwrap();
        ledger.join_campaign(&affiliate_owner, &campaign).unwrap();
        let affiliate = ledger.affiliate_address(&affiliate_owner);
        ledger
            .report_conversion(&owner, &campaign, &affiliate, &affiliate_owner)
            .unwrap();

        // 500,000 lamports of budget left, still backed by the full reserve
        assert_eq!(
            ledger.escrow_balance(&campaign),
            500_000_u64.checked_add(ledger.vault_reserve()).unwrap()
        );
    }

    #[test]
    fn test_clock_controls() {
        let (mut ledger, _) = ledger();
        assert_eq!(ledger.advance_clock(5), 1_700_000_005);
        ledger.set_clock(10);
        assert_eq!(ledger.now(), 10);
    }

    #[test]
    fn test_self_transfer_keeps_balance() {
        let mut balances = Balances::default();
        let wallet = Pubkey::new_unique();
        balances.credit(wallet, 5).unwrap();
        balances.transfer(&wallet, &wallet, 5).unwrap();
        assert_eq!(balances.get(&wallet), 5);
    }
}
