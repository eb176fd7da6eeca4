//! Event parsing utilities for affiliate escrow program events
//!
//! Anchor emits events as `Program data: <base64>` log lines, where the decoded
//! bytes are the event's 8-byte discriminator followed by its borsh encoding.

use crate::error::{Result, SdkError};
use affiliate_escrow::events::{
    AffiliateCreated, AffiliateUpdated, CampaignClosed, CampaignCreated, CampaignJoined,
    CampaignUpdated, ConfigInitialized, ConfigUpdated, ConversionReported, FeesWithdrawn,
    MerchantCreated, MerchantUpdated,
};
use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, Event};
use base64::prelude::*;

const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Any event emitted by the program
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EscrowEvent {
    ConfigInitialized(ConfigInitialized),
    ConfigUpdated(ConfigUpdated),
    FeesWithdrawn(FeesWithdrawn),
    MerchantCreated(MerchantCreated),
    MerchantUpdated(MerchantUpdated),
    AffiliateCreated(AffiliateCreated),
    AffiliateUpdated(AffiliateUpdated),
    CampaignCreated(CampaignCreated),
    CampaignUpdated(CampaignUpdated),
    CampaignJoined(CampaignJoined),
    ConversionReported(ConversionReported),
    CampaignClosed(CampaignClosed),
}

impl EscrowEvent {
    /// Event type name as declared by the program
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConfigInitialized(_) => "ConfigInitialized",
            Self::ConfigUpdated(_) => "ConfigUpdated",
            Self::FeesWithdrawn(_) => "FeesWithdrawn",
            Self::MerchantCreated(_) => "MerchantCreated",
            Self::MerchantUpdated(_) => "MerchantUpdated",
            Self::AffiliateCreated(_) => "AffiliateCreated",
            Self::AffiliateUpdated(_) => "AffiliateUpdated",
            Self::CampaignCreated(_) => "CampaignCreated",
            Self::CampaignUpdated(_) => "CampaignUpdated",
            Self::CampaignJoined(_) => "CampaignJoined",
            Self::ConversionReported(_) => "ConversionReported",
            Self::CampaignClosed(_) => "CampaignClosed",
        }
    }

    /// Campaign PDA the event refers to, for campaign-scoped events
    #[must_use]
    pub const fn campaign(&self) -> Option<Pubkey> {
        match self {
            Self::CampaignCreated(event) => Some(event.campaign),
            Self::CampaignUpdated(event) => Some(event.campaign),
            Self::CampaignJoined(event) => Some(event.campaign),
            Self::ConversionReported(event) => Some(event.campaign),
            Self::CampaignClosed(event) => Some(event.campaign),
            _ => None,
        }
    }

    /// Lamports that left the emitting operation's source account, if any
    #[must_use]
    pub const fn amount(&self) -> Option<u64> {
        match self {
            Self::FeesWithdrawn(event) => Some(event.amount),
            Self::CampaignCreated(event) => Some(event.budget),
            Self::CampaignUpdated(event) => Some(event.additional_budget),
            Self::ConversionReported(event) => Some(event.commission),
            Self::CampaignClosed(event) => Some(event.amount),
            _ => None,
        }
    }

    /// Anchor wire encoding: discriminator followed by the borsh payload
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::ConfigInitialized(event) => event.data(),
            Self::ConfigUpdated(event) => event.data(),
            Self::FeesWithdrawn(event) => event.data(),
            Self::MerchantCreated(event) => event.data(),
            Self::MerchantUpdated(event) => event.data(),
            Self::AffiliateCreated(event) => event.data(),
            Self::AffiliateUpdated(event) => event.data(),
            Self::CampaignCreated(event) => event.data(),
            Self::CampaignUpdated(event) => event.data(),
            Self::CampaignJoined(event) => event.data(),
            Self::ConversionReported(event) => event.data(),
            Self::CampaignClosed(event) => event.data(),
        }
    }

    /// The log line the runtime prints when the program emits this event
    #[must_use]
    pub fn to_log_line(&self) -> String {
        format!("{PROGRAM_DATA_PREFIX}{}", BASE64_STANDARD.encode(self.data()))
    }
}

fn decode<T: AnchorDeserialize>(name: &str, mut payload: &[u8]) -> Result<T> {
    T::deserialize(&mut payload)
        .map_err(|e| SdkError::ParseError(format!("Failed to deserialize {name} event: {e}")))
}

/// Parse a single event from base64-encoded `Program data`
pub fn parse_single_event(data: &str) -> Result<EscrowEvent> {
    let decoded_data = BASE64_STANDARD
        .decode(data.trim())
        .map_err(|e| SdkError::ParseError(format!("Failed to decode base64: {e}")))?;

    if decoded_data.len() < 8 {
        return Err(SdkError::ParseError(
            "Event data too short, must be at least 8 bytes for discriminator".to_string(),
        ));
    }
    let (discriminator, payload) = decoded_data.split_at(8);

    let event = match discriminator {
        d if d == ConfigInitialized::DISCRIMINATOR => {
            EscrowEvent::ConfigInitialized(decode("ConfigInitialized", payload)?)
        }
        d if d == ConfigUpdated::DISCRIMINATOR => {
            EscrowEvent::ConfigUpdated(decode("ConfigUpdated", payload)?)
        }
        d if d == FeesWithdrawn::DISCRIMINATOR => {
            EscrowEvent::FeesWithdrawn(decode("FeesWithdrawn", payload)?)
        }
        d if d == MerchantCreated::DISCRIMINATOR => {
            EscrowEvent::MerchantCreated(decode("MerchantCreated", payload)?)
        }
        d if d == MerchantUpdated::DISCRIMINATOR => {
            EscrowEvent::MerchantUpdated(decode("MerchantUpdated", payload)?)
        }
        d if d == AffiliateCreated::DISCRIMINATOR => {
            EscrowEvent::AffiliateCreated(decode("AffiliateCreated", payload)?)
        }
        d if d == AffiliateUpdated::DISCRIMINATOR => {
            EscrowEvent::AffiliateUpdated(decode("AffiliateUpdated", payload)?)
        }
        d if d == CampaignCreated::DISCRIMINATOR => {
            EscrowEvent::CampaignCreated(decode("CampaignCreated", payload)?)
        }
        d if d == CampaignUpdated::DISCRIMINATOR => {
            EscrowEvent::CampaignUpdated(decode("CampaignUpdated", payload)?)
        }
        d if d == CampaignJoined::DISCRIMINATOR => {
            EscrowEvent::CampaignJoined(decode("CampaignJoined", payload)?)
        }
        d if d == ConversionReported::DISCRIMINATOR => {
            EscrowEvent::ConversionReported(decode("ConversionReported", payload)?)
        }
        d if d == CampaignClosed::DISCRIMINATOR => {
            EscrowEvent::CampaignClosed(decode("CampaignClosed", payload)?)
        }
        other => {
            return Err(SdkError::ParseError(format!(
                "Unknown event discriminator: {other:?}"
            )))
        }
    };
    Ok(event)
}

/// Parse program events from transaction logs
///
/// Only `Program data` lines printed while `program_id` is the executing
/// program are considered, so events from other programs invoked in the same
/// transaction are skipped. Lines that fail to decode are skipped as well.
#[must_use]
pub fn parse_events_from_logs(logs: &[String], program_id: &Pubkey) -> Vec<EscrowEvent> {
    let invoke_prefix = format!("Program {program_id} invoke");
    let mut call_stack: Vec<bool> = Vec::new();
    let mut events = Vec::new();

    for log in logs {
        if let Some(rest) = log.strip_prefix("Program ") {
            if log.starts_with(&invoke_prefix) {
                call_stack.push(true);
                continue;
            }
            if rest.contains(" invoke [") {
                call_stack.push(false);
                continue;
            }
            if rest.ends_with(" success") || rest.contains(" failed: ") {
                call_stack.pop();
                continue;
            }
        }

        let Some(data) = log.strip_prefix(PROGRAM_DATA_PREFIX) else {
            continue;
        };
        if call_stack.last() != Some(&true) {
            continue;
        }
        match parse_single_event(data) {
            Ok(event) => events.push(event),
            Err(e) => tracing::debug!(error = %e, "skipping undecodable program data"),
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion() -> EscrowEvent {
        EscrowEvent::ConversionReported(ConversionReported {
            campaign: Pubkey::new_unique(),
            affiliate: Pubkey::new_unique(),
            payout_address: Pubkey::new_unique(),
            commission: 7_000_000_000,
            fee: 35_000_000,
            net: 6_965_000_000,
            available_budget: 3_000_000_000,
            is_paused: true,
        })
    }

    #[test]
    fn test_parse_single_event() {
        let event = conversion();
        let line = event.to_log_line();
        let data = line.strip_prefix(PROGRAM_DATA_PREFIX).unwrap();

        assert_eq!(parse_single_event(data).unwrap(), event);
    }

    #[test]
    fn test_short_data_rejected() {
        let data = BASE64_STANDARD.encode([1u8, 2, 3]);
        assert!(matches!(
            parse_single_event(&data),
            Err(SdkError::ParseError(_))
        ));
    }

    #[test]
    fn test_unknown_discriminator_rejected() {
        let data = BASE64_STANDARD.encode([0u8; 16]);
        assert!(matches!(
            parse_single_event(&data),
            Err(SdkError::ParseError(_))
        ));
    }

    #[test]
    fn test_events_from_other_programs_are_skipped() {
        let program_id = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();
        let ours = conversion();
        let theirs = conversion();

        let logs = vec![
            format!("Program {program_id} invoke [1]"),
            "Program log: Instruction: ReportConversion".to_string(),
            format!("Program {other_program} invoke [2]"),
            theirs.to_log_line(),
            format!("Program {other_program} success"),
            ours.to_log_line(),
            format!("Program {program_id} consumed 12000 of 200000 compute units"),
            format!("Program {program_id} success"),
        ];

        assert_eq!(parse_events_from_logs(&logs, &program_id), vec![ours]);
    }

    #[test]
    fn test_event_accessors() {
        let event = conversion();
        assert_eq!(event.name(), "ConversionReported");
        assert_eq!(event.amount(), Some(7_000_000_000));
        assert!(event.campaign().is_some());
    }
}
