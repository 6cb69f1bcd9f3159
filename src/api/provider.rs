//! Capabilities the session coordinator consumes
//!
//! Each external collaborator (wallet, ledger, key-value cache, user alerts)
//! is injected as a trait object so the coordinator can run against the
//! JSON-RPC adapters in production and against fakes in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RawTransferRecord;

/// Gas limit for a plain value transfer (0x5208)
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Failure reported by an external capability
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The user declined the request in the wallet
    #[error("User rejected the request: {0}")]
    Rejected(String),

    /// The call reached the remote side but the transaction reverted
    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("{0}")]
    Call(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// Native value transfer handed to the wallet for signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTransfer {
    pub from: String,
    pub to: String,
    pub gas: u64,
    /// Amount in wei
    pub value: u128,
}

/// Finalization proof for a ledger write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReceipt {
    pub hash: String,
    pub block_number: Option<u64>,
}

/// Browser-resident signing agent
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts already granted to this application, without prompting
    async fn granted_accounts(&self) -> Result<Vec<String>, CapabilityError>;

    /// Ask the user to grant access to their accounts
    async fn request_account_grant(&self) -> Result<Vec<String>, CapabilityError>;

    /// Sign and send a value transfer, returning its transaction hash
    async fn send_value_transfer(&self, transfer: ValueTransfer) -> Result<String, CapabilityError>;
}

/// Handle for a ledger write that has been sent but not finalized
#[async_trait]
pub trait PendingRecord: Send {
    fn hash(&self) -> &str;

    /// Resolve once the write is durably finalized on the ledger
    async fn wait(self: Box<Self>) -> Result<RecordReceipt, CapabilityError>;
}

/// Remote append-only store of transfer records
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// All records in ledger insertion order
    async fn list_records(&self) -> Result<Vec<RawTransferRecord>, CapabilityError>;

    async fn record_count(&self) -> Result<u64, CapabilityError>;

    async fn submit_record(
        &self,
        to: &str,
        amount_wei: u128,
        message: &str,
        keyword: &str,
    ) -> Result<Box<dyn PendingRecord>, CapabilityError>;
}

/// Durable string cache that survives process restarts
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError>;
}

/// User-facing alert sink
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}
