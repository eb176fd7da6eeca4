use anchor_lang::prelude::*;

/// Result type used by the pure state-transition layer.
///
/// Handlers convert it into `anchor_lang::Result` with `?`.
pub type EscrowResult<T> = std::result::Result<T, EscrowError>;

/// Custom error codes for the affiliate escrow program
///
/// Note: Anchor automatically assigns error codes starting from 6000.
#[error_code]
pub enum EscrowError {
    /// Error Code: 6000
    #[msg("Name is too short. Names must be at least 10 bytes long.")]
    NameTooShort,

    /// Error Code: 6001
    #[msg("Name is too long. Names must be at most 50 bytes long.")]
    NameTooLong,

    /// Error Code: 6002
    #[msg("Description is too long. Descriptions must be at most 100 bytes long.")]
    DescriptionTooLong,

    /// Error Code: 6003
    /// Product URI is not an absolute URL with a recognized scheme, or exceeds 100 bytes
    #[msg("Invalid product URI. Expected an http, https, ipfs or ar URI of at most 100 bytes.")]
    InvalidProductURI,

    /// Error Code: 6004
    #[msg("Invalid campaign period. The end timestamp must be in the future.")]
    InvalidCampaignPeriod,

    /// Error Code: 6005
    #[msg("Invalid campaign owner. Only the merchant that created the campaign can perform this action.")]
    InvalidCampaignOwner,

    /// Error Code: 6006
    #[msg("Invalid payout address. The address must match the affiliate's registered payout address.")]
    InvalidPayoutAddress,

    /// Error Code: 6007
    #[msg("Campaign is paused. The merchant must top up the budget before affiliates can join.")]
    CampaignPaused,

    /// Error Code: 6008
    #[msg("Campaign has expired.")]
    CampaignExpired,

    /// Error Code: 6009
    #[msg("Campaign is closed and can no longer be modified.")]
    CampaignClosed,

    /// Error Code: 6010
    #[msg("Affiliate has already joined this campaign.")]
    AlreadyJoined,

    /// Error Code: 6011
    #[msg("Global configuration has already been initialized.")]
    AlreadyInitialized,

    /// Error Code: 6012
    #[msg("A campaign with this seed already exists for this merchant.")]
    CampaignAlreadyExists,

    /// Error Code: 6013
    /// Available campaign budget does not cover one commission payment
    #[msg("Insufficient campaign budget to pay the commission.")]
    InsufficientFunds,

    /// Error Code: 6014
    #[msg("A merchant account already exists for this owner.")]
    MerchantAlreadyExists,

    /// Error Code: 6015
    #[msg("An affiliate account already exists for this owner.")]
    AffiliateAlreadyExists,

    /// Error Code: 6016
    #[msg("Invalid fee rate. Fees must be between 0 and 10000 basis points.")]
    InvalidFeeBasisPoints,

    /// Error Code: 6017
    #[msg("Invalid amount provided. Amount must be greater than zero.")]
    InvalidAmount,

    /// Error Code: 6018
    #[msg("Unauthorized access. Only the protocol admin can perform this action.")]
    Unauthorized,

    /// Error Code: 6019
    /// Program data account does not belong to this program or cannot be deserialized
    #[msg("Invalid program data account. Ensure the account is the correct program data account for this program.")]
    InvalidProgramData,

    /// Error Code: 6020
    #[msg("Arithmetic operation would result in overflow or underflow.")]
    ArithmeticError,

    /// Error Code: 6021
    #[msg("A payout address is required when creating an affiliate.")]
    PayoutAddressRequired,

    /// Error Code: 6022
    #[msg("Invalid configuration update. Provide at least one field to change.")]
    InvalidConfiguration,
}

impl EscrowError {
    /// Every variant in error code order
    pub const ALL: [Self; 23] = [
        Self::NameTooShort,
        Self::NameTooLong,
        Self::DescriptionTooLong,
        Self::InvalidProductURI,
        Self::InvalidCampaignPeriod,
        Self::InvalidCampaignOwner,
        Self::InvalidPayoutAddress,
        Self::CampaignPaused,
        Self::CampaignExpired,
        Self::CampaignClosed,
        Self::AlreadyJoined,
        Self::AlreadyInitialized,
        Self::CampaignAlreadyExists,
        Self::InsufficientFunds,
        Self::MerchantAlreadyExists,
        Self::AffiliateAlreadyExists,
        Self::InvalidFeeBasisPoints,
        Self::InvalidAmount,
        Self::Unauthorized,
        Self::InvalidProgramData,
        Self::ArithmeticError,
        Self::PayoutAddressRequired,
        Self::InvalidConfiguration,
    ];

    /// Looks up the variant for an Anchor custom error code (6000-based)
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|error| u32::from(*error) == code)
    }
}
