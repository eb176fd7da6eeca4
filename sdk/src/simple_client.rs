//! Blocking RPC reader for affiliate escrow accounts

use crate::{
    error::{Result, SdkError},
    events::{parse_events_from_logs, EscrowEvent},
    pda, program_id,
    program_types::{Affiliate, Campaign, CampaignAffiliate, Config, Merchant},
};
use anchor_client::solana_account_decoder::UiAccountEncoding;
use anchor_client::solana_client::rpc_client::RpcClient;
use anchor_client::solana_client::rpc_config::{
    RpcAccountInfoConfig, RpcProgramAccountsConfig, RpcTransactionConfig,
};
use anchor_client::solana_client::rpc_filter::{Memcmp, RpcFilterType};
use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::instruction::Instruction;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::{Keypair, Signature, Signer};
use anchor_client::solana_sdk::transaction::Transaction;
use anchor_lang::{AccountDeserialize, Discriminator};
use std::str::FromStr;

/// Byte offset of the first field after the 8-byte account discriminator
const FIRST_FIELD_OFFSET: usize = 8;

/// Simple affiliate escrow client for account reads and transaction submission
pub struct SimpleEscrowClient {
    /// RPC client for queries
    pub rpc_client: RpcClient,
    /// Program ID
    pub program_id: Pubkey,
}

impl SimpleEscrowClient {
    /// Create a client for the configured program ID
    pub fn new(cluster_url: &str) -> Result<Self> {
        Ok(Self {
            rpc_client: RpcClient::new_with_commitment(cluster_url, CommitmentConfig::confirmed()),
            program_id: program_id(),
        })
    }

    /// Create a client for a custom program ID
    pub fn new_with_program_id(cluster_url: &str, program_id: &str) -> Result<Self> {
        let program_id = Pubkey::from_str(program_id)
            .map_err(|e| SdkError::Generic(format!("Invalid program ID '{program_id}': {e}")))?;

        Ok(Self {
            rpc_client: RpcClient::new_with_commitment(cluster_url, CommitmentConfig::confirmed()),
            program_id,
        })
    }

    #[must_use]
    pub const fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Fetch and decode an Anchor account, `None` if it does not exist
    ///
    /// # Errors
    /// Returns an error if the RPC call fails or the data is not a `T`
    pub fn fetch_account<T: AccountDeserialize>(&self, address: &Pubkey) -> Result<Option<T>> {
        let Some(account) = self
            .rpc_client
            .get_account_with_commitment(address, CommitmentConfig::confirmed())
            .map_err(|e| SdkError::Generic(format!("Failed to fetch account {address}: {e}")))?
            .value
        else {
            return Ok(None);
        };

        let record = T::try_deserialize(&mut account.data.as_slice()).map_err(|e| {
            SdkError::ParseError(format!("Failed to deserialize account {address}: {e}"))
        })?;
        Ok(Some(record))
    }

    pub fn get_config(&self) -> Result<Option<Config>> {
        self.fetch_account(&pda::config_address_with_program_id(&self.program_id))
    }

    /// Like [`Self::get_config`] but fails with `ConfigNotFound` when absent
    pub fn require_config(&self) -> Result<Config> {
        self.get_config()?.ok_or(SdkError::ConfigNotFound)
    }

    /// Get the merchant registered by `owner`
    pub fn get_merchant(&self, owner: &Pubkey) -> Result<Option<Merchant>> {
        self.fetch_account(&pda::merchant_address_with_program_id(
            owner,
            &self.program_id,
        ))
    }

    /// Get the affiliate registered by `owner`
    pub fn get_affiliate(&self, owner: &Pubkey) -> Result<Option<Affiliate>> {
        self.fetch_account(&pda::affiliate_address_with_program_id(
            owner,
            &self.program_id,
        ))
    }

    pub fn get_campaign(&self, campaign: &Pubkey) -> Result<Option<Campaign>> {
        self.fetch_account(campaign)
    }

    /// Get the link between a campaign and an affiliate PDA
    pub fn get_campaign_affiliate(
        &self,
        campaign: &Pubkey,
        affiliate: &Pubkey,
    ) -> Result<Option<CampaignAffiliate>> {
        self.fetch_account(&pda::campaign_affiliate_address_with_program_id(
            campaign,
            affiliate,
            &self.program_id,
        ))
    }

    /// Lamports held by an account (treasury, escrow or wallet)
    pub fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        self.rpc_client
            .get_balance(address)
            .map_err(|e| SdkError::Generic(format!("Failed to fetch balance of {address}: {e}")))
    }

    /// Lamports held by a campaign's escrow vault
    pub fn get_escrow_balance(&self, campaign: &Pubkey) -> Result<u64> {
        self.get_balance(&pda::escrow_address_with_program_id(
            campaign,
            &self.program_id,
        ))
    }

    /// List every campaign owned by a merchant PDA
    pub fn list_campaigns(&self, merchant: &Pubkey) -> Result<Vec<(Pubkey, Campaign)>> {
        self.list_by_first_field::<Campaign>(merchant)
    }

    /// List every affiliate link of a campaign PDA
    pub fn list_campaign_affiliates(
        &self,
        campaign: &Pubkey,
    ) -> Result<Vec<(Pubkey, CampaignAffiliate)>> {
        self.list_by_first_field::<CampaignAffiliate>(campaign)
    }

    /// Program accounts of type `T` whose first field equals `key`
    fn list_by_first_field<T: AccountDeserialize + Discriminator>(
        &self,
        key: &Pubkey,
    ) -> Result<Vec<(Pubkey, T)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(0, T::DISCRIMINATOR.to_vec())),
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                    FIRST_FIELD_OFFSET,
                    key.to_bytes().to_vec(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: None,
                commitment: Some(CommitmentConfig::confirmed()),
                min_context_slot: None,
            },
            with_context: Some(false),
            sort_results: None,
        };

        let accounts = self
            .rpc_client
            .get_program_accounts_with_config(&self.program_id, config)
            .map_err(|e| SdkError::Generic(format!("Failed to list program accounts: {e}")))?;

        accounts
            .into_iter()
            .map(|(address, account)| {
                T::try_deserialize(&mut account.data.as_slice())
                    .map(|record| (address, record))
                    .map_err(|e| {
                        SdkError::ParseError(format!("Failed to deserialize account {address}: {e}"))
                    })
            })
            .collect()
    }

    /// Sign and submit instructions, mapping program failures to `SdkError::Program`
    pub fn submit_instructions(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let payer = signers
            .first()
            .ok_or("At least one signer is required")?;
        let recent_blockhash = self
            .rpc_client
            .get_latest_blockhash()
            .map_err(|e| SdkError::Generic(format!("Failed to get recent blockhash: {e}")))?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            signers,
            recent_blockhash,
        );

        let signature = self
            .rpc_client
            .send_and_confirm_transaction(&transaction)
            .map_err(|e| SdkError::from(anchor_client::ClientError::from(e)))?;
        tracing::info!(%signature, instructions = instructions.len(), "transaction confirmed");
        Ok(signature)
    }

    /// Events emitted by this program in a confirmed transaction
    pub fn get_transaction_events(&self, signature: &Signature) -> Result<Vec<EscrowEvent>> {
        let config = RpcTransactionConfig {
            commitment: Some(CommitmentConfig::confirmed()),
            max_supported_transaction_version: Some(0),
            ..RpcTransactionConfig::default()
        };
        let transaction = self
            .rpc_client
            .get_transaction_with_config(signature, config)
            .map_err(|e| SdkError::Generic(format!("Failed to fetch transaction {signature}: {e}")))?;

        let transaction = serde_json::to_value(transaction)?;
        let logs: Vec<String> = transaction["meta"]["logMessages"]
            .as_array()
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(|line| line.as_str().map(ToString::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(parse_events_from_logs(&logs, &self.program_id))
    }
}
