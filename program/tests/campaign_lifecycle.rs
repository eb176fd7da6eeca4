//! Unit tests for the campaign lifecycle through the pure transition layer
//!
//! These tests drive the same record transitions the instruction handlers
//! run, without a runtime: open, join, settle conversions, top up, close.
//! Lamport movement is asserted through the amounts each event carries.
//!
//! Test coverage:
//! - Opening a campaign charges the creation fee and always starts unpaused
//! - Joining links an affiliate once and bumps both counters
//! - Conversions debit escrow, split the commission and pause on shortfall
//! - Top-ups resume a paused campaign and are charged the creation fee
//! - Commission changes re-evaluate the pause flag and apply to later
//!   conversions only
//! - Closing sweeps the escrow balance and is terminal

use anchor_lang::prelude::*;
use affiliate_escrow::close_campaign;
use affiliate_escrow::events::{CampaignCreated, CampaignUpdated, ConversionReported};
use affiliate_escrow::create_campaign::{CreateCampaignArgs, CreateCampaignRecords};
use affiliate_escrow::errors::{EscrowError, EscrowResult};
use affiliate_escrow::join_campaign::JoinCampaignRecords;
use affiliate_escrow::report_conversion::ConversionRecords;
use affiliate_escrow::state::{Affiliate, Campaign, CampaignAffiliate, Config, Merchant};
use affiliate_escrow::update_campaign::{UpdateCampaignArgs, UpdateCampaignRecords};

const SOL: u64 = 1_000_000_000;
const NOW: i64 = 1_700_000_000;

/// Records for one merchant, one campaign and one affiliate
struct World {
    config: Config,
    merchant: Merchant,
    merchant_key: Pubkey,
    campaign: Campaign,
    campaign_key: Pubkey,
    affiliate: Affiliate,
    affiliate_key: Pubkey,
    link: CampaignAffiliate,
    payout: Pubkey,
}

impl World {
    fn new() -> Self {
        let payout = Pubkey::new_unique();
        Self {
            config: Config {
                admin: Pubkey::new_unique(),
                campaign_creation_fee_bps: 100,
                commission_fee_bps: 50,
                ..Config::default()
            },
            merchant: Merchant {
                owner: Pubkey::new_unique(),
                name: "Trail Outfitters".to_string(),
                ..Merchant::default()
            },
            merchant_key: Pubkey::new_unique(),
            campaign: Campaign::default(),
            campaign_key: Pubkey::new_unique(),
            affiliate: Affiliate {
                owner: payout,
                name: "Summit Reviews".to_string(),
                payout_address: payout,
                ..Affiliate::default()
            },
            affiliate_key: Pubkey::new_unique(),
            link: CampaignAffiliate::default(),
            payout,
        }
    }

    fn open(
        &mut self,
        budget: u64,
        commission: u64,
    ) -> EscrowResult<CampaignCreated> {
        CreateCampaignRecords {
            config: &self.config,
            merchant: &mut self.merchant,
            merchant_key: self.merchant_key,
            campaign: &mut self.campaign,
            campaign_key: self.campaign_key,
            bump: 254,
            escrow_bump: 253,
        }
        .open(
            &CreateCampaignArgs {
                seed: 1,
                name: "Summer Hiking Sale".to_string(),
                description: "Boots and packs".to_string(),
                product_uri: "https://shop.example/summer".to_string(),
                budget,
                commission_per_referral: commission,
                ends_at: Some(NOW.checked_add(86_400).unwrap()),
            },
            NOW,
        )
    }

    fn join(&mut self) -> EscrowResult<()> {
        JoinCampaignRecords {
            campaign: &mut self.campaign,
            campaign_key: self.campaign_key,
            affiliate: &mut self.affiliate,
            affiliate_key: self.affiliate_key,
            campaign_affiliate: &mut self.link,
            campaign_affiliate_key: Pubkey::new_unique(),
            bump: 252,
        }
        .join(NOW)
        .map(|_| ())
    }

    fn convert(
        &mut self,
    ) -> EscrowResult<ConversionReported> {
        ConversionRecords {
            config: &self.config,
            merchant: &mut self.merchant,
            merchant_key: self.merchant_key,
            campaign: &mut self.campaign,
            affiliate: &mut self.affiliate,
            campaign_affiliate: &mut self.link,
        }
        .settle(&self.payout, NOW)
    }

    fn update(
        &mut self,
        args: &UpdateCampaignArgs,
    ) -> EscrowResult<CampaignUpdated> {
        UpdateCampaignRecords {
            config: &self.config,
            merchant: &mut self.merchant,
            merchant_key: self.merchant_key,
            campaign: &mut self.campaign,
            campaign_key: self.campaign_key,
        }
        .apply(args, NOW)
    }
}

/// Opening a campaign records both budgets and the creation fee
#[test]
fn test_open_campaign() {
    let mut world = World::new();
    let event = world.open(10 * SOL, 7 * SOL).unwrap();

    assert_eq!(event.budget, 10 * SOL);
    assert_eq!(event.creation_fee, 100_000_000);
    assert!(!world.campaign.is_paused);

    assert_eq!(world.campaign.merchant, world.merchant_key);
    assert_eq!(world.campaign.total_budget, 10 * SOL);
    assert_eq!(world.campaign.available_budget, 10 * SOL);
    assert_eq!(world.campaign.created_at, NOW);
    assert_eq!(world.campaign.bump, 254);
    assert_eq!(world.campaign.escrow_bump, 253);
    assert_eq!(world.merchant.total_campaigns, 1);
    assert_eq!(world.merchant.total_spent, 100_000_000);
}

/// A budget below one commission still opens unpaused and can be joined,
/// but cannot pay a conversion until it is topped up
#[test]
fn test_underfunded_campaign_opens_unpaused() {
    let mut world = World::new();
    world.open(SOL, 2 * SOL).unwrap();

    assert!(!world.campaign.is_paused);
    world.join().unwrap();
    assert_eq!(world.campaign.total_affiliates, 1);

    assert!(matches!(world.convert(), Err(EscrowError::InsufficientFunds)));
    assert_eq!(world.campaign.available_budget, SOL);
    assert_eq!(world.campaign.successful_referrals, 0);

    let updated = world
        .update(&UpdateCampaignArgs {
            additional_budget: Some(SOL),
            ..UpdateCampaignArgs::default()
        })
        .unwrap();
    assert!(!updated.is_paused);
    let reported = world.convert().unwrap();
    assert_eq!(reported.available_budget, 0);
    assert!(reported.is_paused);
}

#[test]
fn test_join_links_once() {
    let mut world = World::new();
    world.open(10 * SOL, 7 * SOL).unwrap();
    world.join().unwrap();

    assert_eq!(world.link.campaign, world.campaign_key);
    assert_eq!(world.link.affiliate, world.affiliate_key);
    assert_eq!(world.link.joined_at, NOW);
    assert_eq!(world.campaign.total_affiliates, 1);
    assert_eq!(world.affiliate.total_campaigns, 1);

    assert!(matches!(world.join(), Err(EscrowError::AlreadyJoined)));
    assert_eq!(world.campaign.total_affiliates, 1);
    assert_eq!(world.affiliate.total_campaigns, 1);
}

/// 10 SOL budget, 7 SOL commission, 0.5% commission fee
#[test]
fn test_conversion_then_top_up_then_close() {
    let mut world = World::new();
    world.open(10 * SOL, 7 * SOL).unwrap();
    world.join().unwrap();

    let reported = world.convert().unwrap();
    assert_eq!(reported.campaign, world.campaign_key);
    assert_eq!(reported.affiliate, world.affiliate_key);
    assert_eq!(reported.fee, 35_000_000);
    assert_eq!(reported.net, 6_965_000_000);
    assert_eq!(reported.available_budget, 3 * SOL);
    assert!(reported.is_paused);
    assert_eq!(world.merchant.total_spent, 7_100_000_000);

    // a paused campaign rejects the next conversion without side effects
    assert!(matches!(world.convert(), Err(EscrowError::InsufficientFunds)));
    assert_eq!(world.campaign.successful_referrals, 1);

    let updated = world
        .update(&UpdateCampaignArgs {
            additional_budget: Some(10 * SOL),
            ..UpdateCampaignArgs::default()
        })
        .unwrap();
    assert_eq!(updated.fee, 100_000_000);
    assert_eq!(updated.available_budget, 13 * SOL);
    assert!(!updated.is_paused);
    assert_eq!(world.campaign.total_budget, 20 * SOL);

    let closed = close_campaign::close(
        &mut world.campaign,
        world.campaign_key,
        &world.merchant_key,
        world.merchant.owner,
        13 * SOL,
    )
    .unwrap();
    assert_eq!(closed.amount, 13 * SOL);
    assert!(world.campaign.is_closed);
    assert_eq!(world.campaign.available_budget, 0);

    assert!(matches!(world.convert(), Err(EscrowError::CampaignClosed)));
    assert!(matches!(world.join(), Err(EscrowError::CampaignClosed)));
    assert!(matches!(
        world.update(&UpdateCampaignArgs {
            name: Some("Autumn Hiking Sale".to_string()),
            ..UpdateCampaignArgs::default()
        }),
        Err(EscrowError::CampaignClosed)
    ));
}

/// Raising the commission above the budget pauses; lowering it resumes
#[test]
fn test_commission_change_reevaluates_pause() {
    let mut world = World::new();
    world.open(10 * SOL, 7 * SOL).unwrap();

    let raised = world
        .update(&UpdateCampaignArgs {
            commission_per_referral: Some(11 * SOL),
            ..UpdateCampaignArgs::default()
        })
        .unwrap();
    assert!(raised.is_paused);
    assert_eq!(raised.fee, 0);

    let lowered = world
        .update(&UpdateCampaignArgs {
            commission_per_referral: Some(5 * SOL),
            ..UpdateCampaignArgs::default()
        })
        .unwrap();
    assert!(!lowered.is_paused);
    assert_eq!(world.campaign.commission_per_referral, 5 * SOL);
}

/// Conversions settled before a commission change keep their amounts; later
/// ones pay the new rate
#[test]
fn test_commission_change_applies_to_later_conversions() {
    let mut world = World::new();
    world.open(20 * SOL, 2 * SOL).unwrap();
    world.join().unwrap();

    let first = world.convert().unwrap();
    let second = world.convert().unwrap();
    world
        .update(&UpdateCampaignArgs {
            commission_per_referral: Some(3 * SOL),
            ..UpdateCampaignArgs::default()
        })
        .unwrap();
    let third = world.convert().unwrap();

    assert_eq!(first.commission, 2 * SOL);
    assert_eq!(second.commission, 2 * SOL);
    assert_eq!(third.commission, 3 * SOL);
    assert_eq!(third.fee, 15_000_000, "0.5% of 3 SOL");

    let paid = 7 * SOL;
    assert_eq!(
        world
            .campaign
            .total_budget
            .checked_sub(world.campaign.available_budget)
            .unwrap(),
        paid
    );
    assert_eq!(world.link.total_earned, paid);
    assert_eq!(world.link.successful_referrals, 3);
    assert_eq!(world.affiliate.total_earned, paid);
}

/// An invalid field rejects the whole update
#[test]
fn test_update_is_all_or_nothing() {
    let mut world = World::new();
    world.open(10 * SOL, 7 * SOL).unwrap();
    let before = world.campaign.clone();

    let result = world.update(&UpdateCampaignArgs {
        name: Some("Autumn Hiking Sale".to_string()),
        product_uri: Some("product".to_string()),
        additional_budget: Some(SOL),
        ..UpdateCampaignArgs::default()
    });

    assert!(matches!(result, Err(EscrowError::InvalidProductURI)));
    assert_eq!(world.campaign, before);
}

/// Reopening the same seed fails and leaves the first campaign intact
#[test]
fn test_duplicate_seed_rejected() {
    let mut world = World::new();
    world.open(10 * SOL, 7 * SOL).unwrap();
    let before = world.campaign.clone();

    assert!(matches!(
        world.open(SOL, SOL),
        Err(EscrowError::CampaignAlreadyExists)
    ));
    assert_eq!(world.campaign, before);
    assert_eq!(world.merchant.total_campaigns, 1);
}
