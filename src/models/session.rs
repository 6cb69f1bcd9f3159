//! Session state held by the coordinator

use super::form::PendingForm;
use super::record::TransferRecord;

/// Where an in-flight submission currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// Waiting for the wallet to sign and send the value transfer
    WalletConfirming,
    /// Waiting for the ledger record to be finalized
    LedgerConfirming,
}

/// Snapshot of everything the presentation layer can read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Empty until a wallet grant succeeds
    pub current_account: Option<String>,
    pub is_loading: bool,
    /// Last known ledger record count, never authoritative
    pub transaction_count: Option<u64>,
    /// Ledger order, replaced wholesale on refresh
    pub records: Vec<TransferRecord>,
    pub form: PendingForm,
    pub phase: SubmissionPhase,
    /// Message of the last failed submission, cleared when a new one starts
    pub last_error: Option<String>,
}

impl SessionState {
    /// Initial state, seeded with a count restored from the key-value store
    pub fn with_cached_count(cached: Option<&str>) -> Self {
        Self {
            transaction_count: cached.and_then(|s| s.trim().parse().ok()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_count_parsing() {
        assert_eq!(SessionState::with_cached_count(Some("12")).transaction_count, Some(12));
        assert_eq!(SessionState::with_cached_count(Some("junk")).transaction_count, None);
        assert_eq!(SessionState::with_cached_count(None).transaction_count, None);
    }

    #[test]
    fn test_default_state_is_disconnected_and_idle() {
        let state = SessionState::default();
        assert_eq!(state.current_account, None);
        assert!(!state.is_loading);
        assert_eq!(state.phase, SubmissionPhase::Idle);
        assert!(state.records.is_empty());
    }
}
