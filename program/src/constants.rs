//! Program constants
//!
//! Protocol-level bounds and PDA seeds shared by the handlers, the validation
//! layer and the client SDK. Changing any of these after deployment changes
//! account addresses or invalidates stored records.

/// Basis points divisor for percentage calculations
///
/// 10,000 basis points = 100%. Both protocol fees (campaign creation and
/// commission) are expressed against this divisor.
///
/// # Examples
/// ```ignore
/// // 1% creation fee on a 10 SOL budget:
/// let fee = (10_000_000_000u128 * 100) / FEE_BASIS_POINTS_DIVISOR;
/// // fee = 100_000_000 lamports (0.1 SOL)
/// ```
pub const FEE_BASIS_POINTS_DIVISOR: u128 = 10_000;

/// Largest accepted fee rate (100%)
pub const MAX_FEE_BPS: u16 = 10_000;

/// Minimum byte length of merchant, affiliate and campaign names
pub const MIN_NAME_LEN: usize = 10;

/// Maximum byte length of merchant, affiliate and campaign names
pub const MAX_NAME_LEN: usize = 50;

/// Maximum byte length of descriptions
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Maximum byte length of a campaign product URI
pub const MAX_PRODUCT_URI_LEN: usize = 100;

/// Rent-exempt minimum of a zero-data system account under default rent
///
/// The treasury and every campaign escrow keep this reserve on top of the
/// lamports they account for. Handlers read the live figure from the `Rent`
/// sysvar; off-chain tooling uses this value.
pub const VAULT_RENT_RESERVE_LAMPORTS: u64 = 890_880;

/// URI schemes accepted for campaign product references
pub const RECOGNIZED_URI_SCHEMES: [&str; 4] = ["http", "https", "ipfs", "ar"];

pub const CONFIG_SEED: &[u8] = b"config";
pub const TREASURY_SEED: &[u8] = b"treasury";
pub const MERCHANT_SEED: &[u8] = b"merchant";
pub const AFFILIATE_SEED: &[u8] = b"affiliate";
pub const CAMPAIGN_SEED: &[u8] = b"campaign";
pub const ESCROW_SEED: &[u8] = b"escrow";
pub const CAMPAIGN_AFFILIATE_SEED: &[u8] = b"campaign_affiliate";
