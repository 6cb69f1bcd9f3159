pub mod provider;
pub mod rpc;

pub use provider::{
    CapabilityError, KeyValueStore, LedgerService, Notifier, PendingRecord, RecordReceipt, ValueTransfer,
    WalletProvider, TRANSFER_GAS_LIMIT,
};
