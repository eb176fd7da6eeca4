//! Shared fixtures for ledger-driven tests

#![allow(dead_code)]

use affiliate_escrow::create_affiliate::CreateAffiliateArgs;
use affiliate_escrow::create_campaign::CreateCampaignArgs;
use affiliate_escrow::create_merchant::CreateMerchantArgs;
use affiliate_escrow::events::ConversionReported;
use affiliate_escrow::init_config::InitConfigArgs;
use affiliate_escrow_sdk::{EscrowEvent, LocalLedger, Result};
use anchor_lang::prelude::Pubkey;

pub const SOL: u64 = 1_000_000_000;
pub const START: i64 = 1_700_000_000;
pub const MERCHANT_FUNDS: u64 = 100 * SOL;
/// Enough for the admin to seed the treasury's rent reserve
pub const ADMIN_FUNDS: u64 = SOL;

/// A configured ledger with one funded merchant and one affiliate
pub struct Market {
    pub ledger: LocalLedger,
    pub admin: Pubkey,
    pub merchant_owner: Pubkey,
    pub affiliate_owner: Pubkey,
}

impl Market {
    pub fn new(campaign_creation_fee_bps: u16, commission_fee_bps: u16) -> Self {
        Self::with_config(InitConfigArgs {
            campaign_creation_fee_bps,
            commission_fee_bps,
            ..InitConfigArgs::default()
        })
    }

    pub fn with_config(args: InitConfigArgs) -> Self {
        let admin = Pubkey::new_unique();
        let mut ledger = LocalLedger::new(Pubkey::new_unique(), Some(admin));
        ledger.set_clock(START);
        ledger.airdrop(&admin, ADMIN_FUNDS).unwrap();
        ledger.init_config(&admin, &args).unwrap();

        let merchant_owner = Pubkey::new_unique();
        ledger
            .create_merchant(&merchant_owner, &merchant_args("Trail Outfitters"))
            .unwrap();
        ledger.airdrop(&merchant_owner, MERCHANT_FUNDS).unwrap();

        let affiliate_owner = Pubkey::new_unique();
        ledger
            .create_affiliate(
                &affiliate_owner,
                &CreateAffiliateArgs {
                    name: "Summit Reviews".to_string(),
                    description: "Gear reviews for alpine routes".to_string(),
                    payout_address: Some(affiliate_owner),
                },
            )
            .unwrap();

        Self {
            ledger,
            admin,
            merchant_owner,
            affiliate_owner,
        }
    }

    /// Affiliate PDA of the default affiliate
    pub fn affiliate(&self) -> Pubkey {
        self.ledger.affiliate_address(&self.affiliate_owner)
    }

    pub fn open_campaign(&mut self, seed: u64, budget: u64, commission: u64) -> Pubkey {
        self.ledger
            .create_campaign(&self.merchant_owner, &campaign_args(seed, budget, commission))
            .unwrap()
            .campaign
    }

    pub fn join(&mut self, campaign: &Pubkey) {
        self.ledger
            .join_campaign(&self.affiliate_owner, campaign)
            .unwrap();
    }

    /// Report a conversion for the default affiliate, paid to its own wallet
    pub fn convert(&mut self, campaign: &Pubkey) -> Result<ConversionReported> {
        let affiliate = self.affiliate();
        self.ledger.report_conversion(
            &self.merchant_owner,
            campaign,
            &affiliate,
            &self.affiliate_owner,
        )
    }

    /// Register another affiliate and return its owner wallet
    pub fn register_affiliate(&mut self, name: &str) -> Pubkey {
        let owner = Pubkey::new_unique();
        self.ledger
            .create_affiliate(
                &owner,
                &CreateAffiliateArgs {
                    name: name.to_string(),
                    description: String::new(),
                    payout_address: None,
                },
            )
            .unwrap();
        owner
    }

    /// Register another funded merchant and return its owner wallet
    pub fn register_merchant(&mut self, name: &str) -> Pubkey {
        let owner = Pubkey::new_unique();
        self.ledger
            .create_merchant(&owner, &merchant_args(name))
            .unwrap();
        self.ledger.airdrop(&owner, MERCHANT_FUNDS).unwrap();
        owner
    }
}

pub fn merchant_args(name: &str) -> CreateMerchantArgs {
    CreateMerchantArgs {
        name: name.to_string(),
        description: "Outdoor equipment".to_string(),
    }
}

pub fn campaign_args(seed: u64, budget: u64, commission: u64) -> CreateCampaignArgs {
    CreateCampaignArgs {
        seed,
        name: "Summer Hiking Sale".to_string(),
        description: "Boots and packs".to_string(),
        product_uri: "https://shop.example/summer".to_string(),
        budget,
        commission_per_referral: commission,
        ends_at: None,
    }
}

/// Lamports an open campaign's escrow holds: its budget plus the rent reserve
pub fn escrow_holding(ledger: &LocalLedger, available_budget: u64) -> u64 {
    available_budget.checked_add(ledger.vault_reserve()).unwrap()
}

/// Escrow balance equals the available budget over the rent reserve (zero
/// once closed), and the spent budget equals the commissions paid out of
/// this campaign
pub fn assert_conserved(ledger: &LocalLedger, campaign_key: &Pubkey) {
    let campaign = ledger.campaign(campaign_key).unwrap();
    let paid: u64 = ledger
        .events()
        .iter()
        .filter_map(|event| match event {
            EscrowEvent::ConversionReported(reported) if reported.campaign == *campaign_key => {
                Some(reported.commission)
            }
            _ => None,
        })
        .sum();

    let expected = if campaign.is_closed {
        0
    } else {
        escrow_holding(ledger, campaign.available_budget)
    };
    assert_eq!(
        ledger.escrow_balance(campaign_key),
        expected,
        "escrow balance must equal the available budget plus the reserve"
    );
    if !campaign.is_closed {
        assert_eq!(
            campaign
                .total_budget
                .checked_sub(campaign.available_budget)
                .unwrap(),
            paid,
            "spent budget must equal commissions paid"
        );
    }
}

/// The pause flag matches the budget against the commission
pub fn assert_pause_consistent(ledger: &LocalLedger, campaign_key: &Pubkey) {
    let campaign = ledger.campaign(campaign_key).unwrap();
    assert_eq!(
        campaign.is_paused,
        campaign.available_budget < campaign.commission_per_referral,
        "pause flag out of sync with budget"
    );
}
