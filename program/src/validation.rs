//! Input validation shared by every instruction
//!
//! All checks are pure: they never touch accounts, so a handler runs them
//! before any lamports move or any record changes.

use url::Url;

use crate::constants::{
    MAX_DESCRIPTION_LEN, MAX_FEE_BPS, MAX_NAME_LEN, MAX_PRODUCT_URI_LEN, MIN_NAME_LEN,
    RECOGNIZED_URI_SCHEMES,
};
use crate::errors::{EscrowError, EscrowResult};

/// Checks a merchant, affiliate or campaign name against the byte length bounds.
pub fn validate_name(name: &str) -> EscrowResult<()> {
    if name.len() < MIN_NAME_LEN {
        return Err(EscrowError::NameTooShort);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(EscrowError::NameTooLong);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> EscrowResult<()> {
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(EscrowError::DescriptionTooLong);
    }
    Ok(())
}

/// Checks that a product URI is absolute and uses a recognized scheme.
///
/// Bare words such as `"product"` fail to parse without a base and are rejected,
/// as are parseable URIs with unrecognized schemes (`"mailto:a@b.c"`).
pub fn validate_product_uri(product_uri: &str) -> EscrowResult<()> {
    if product_uri.len() > MAX_PRODUCT_URI_LEN {
        return Err(EscrowError::InvalidProductURI);
    }
    let url = Url::parse(product_uri).map_err(|_| EscrowError::InvalidProductURI)?;
    if !RECOGNIZED_URI_SCHEMES.contains(&url.scheme()) {
        return Err(EscrowError::InvalidProductURI);
    }
    Ok(())
}

/// Checks an optional campaign end timestamp against the current clock.
///
/// The end must be strictly after `now`; an absent end is always valid.
pub fn validate_campaign_period(ends_at: Option<i64>, now: i64) -> EscrowResult<()> {
    match ends_at {
        Some(ends_at) if ends_at <= now => Err(EscrowError::InvalidCampaignPeriod),
        _ => Ok(()),
    }
}

pub const fn validate_fee_bps(fee_bps: u16) -> EscrowResult<()> {
    if fee_bps > MAX_FEE_BPS {
        return Err(EscrowError::InvalidFeeBasisPoints);
    }
    Ok(())
}

pub const fn validate_amount(amount: u64) -> EscrowResult<()> {
    if amount == 0 {
        return Err(EscrowError::InvalidAmount);
    }
    Ok(())
}
