//! General utility functions for amounts, rates and timestamps
//!
//! Amounts on the ledger are always lamports. These helpers convert to and from
//! SOL for display and input, and render campaign timestamps.

use anchor_lang::prelude::Pubkey;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert lamports to a SOL amount
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::lamports_to_sol;
///
/// assert_eq!(lamports_to_sol(1_000_000_000), 1.0);
/// assert_eq!(lamports_to_sol(6_965_000_000), 6.965);
/// ```
#[must_use]
pub fn lamports_to_sol(lamports: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        lamports as f64 / LAMPORTS_PER_SOL as f64
    }
}

/// Convert a SOL amount to lamports, rounding to the nearest lamport
///
/// Negative and non-finite inputs map to zero.
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::sol_to_lamports;
///
/// assert_eq!(sol_to_lamports(10.0), 10_000_000_000);
/// assert_eq!(sol_to_lamports(0.035), 35_000_000);
/// assert_eq!(sol_to_lamports(-1.0), 0);
/// ```
#[must_use]
pub fn sol_to_lamports(sol: f64) -> u64 {
    if !sol.is_finite() {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    {
        (sol.max(0.0) * LAMPORTS_PER_SOL as f64)
            .round()
            .min(u64::MAX as f64) as u64
    }
}

/// Render lamports as an exact SOL string, without float rounding
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::format_sol;
///
/// assert_eq!(format_sol(10_000_000_000), "10 SOL");
/// assert_eq!(format_sol(100_000_000), "0.1 SOL");
/// assert_eq!(format_sol(6_965_000_000), "6.965 SOL");
/// assert_eq!(format_sol(1), "0.000000001 SOL");
/// ```
#[must_use]
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports.checked_div(LAMPORTS_PER_SOL).unwrap_or_default();
    let fraction = lamports.checked_rem(LAMPORTS_PER_SOL).unwrap_or_default();
    if fraction == 0 {
        return format!("{whole} SOL");
    }
    let digits = format!("{fraction:09}");
    format!("{whole}.{} SOL", digits.trim_end_matches('0'))
}

/// Convert basis points to a percentage (100 bps -> 1.0)
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::basis_points_to_percentage;
///
/// assert_eq!(basis_points_to_percentage(100), 1.0);
/// assert_eq!(basis_points_to_percentage(50), 0.5);
/// ```
#[must_use]
pub fn basis_points_to_percentage(basis_points: u16) -> f64 {
    f64::from(basis_points) / 100.0
}

/// Check if a string is a valid base58 Solana address
#[must_use]
pub fn is_valid_pubkey(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

/// Render a Unix timestamp as RFC 3339, or `None` when out of range
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::format_timestamp;
///
/// assert_eq!(format_timestamp(0).as_deref(), Some("1970-01-01T00:00:00+00:00"));
/// ```
#[must_use]
pub fn format_timestamp(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|moment| moment.to_rfc3339())
}

/// Format a number of seconds as a compact duration
///
/// # Examples
/// ```
/// use affiliate_escrow_sdk::utils::format_duration;
///
/// assert_eq!(format_duration(30), "30s");
/// assert_eq!(format_duration(3661), "1h 1m 1s");
/// assert_eq!(format_duration(90061), "1d 1h 1m 1s");
/// ```
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let days = seconds.checked_div(86_400).unwrap_or_default();
    let hours = seconds
        .checked_rem(86_400)
        .and_then(|rest| rest.checked_div(3_600))
        .unwrap_or_default();
    let minutes = seconds
        .checked_rem(3_600)
        .and_then(|rest| rest.checked_div(60))
        .unwrap_or_default();
    let secs = seconds.checked_rem(60).unwrap_or_default();

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Seconds until a campaign's end time, `None` when open-ended or already ended
#[must_use]
pub fn seconds_until_end(ends_at: Option<i64>, now: i64) -> Option<u64> {
    let remaining = ends_at?.checked_sub(now)?;
    u64::try_from(remaining).ok().filter(|seconds| *seconds > 0)
}
