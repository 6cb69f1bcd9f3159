//! Session coordinator
//!
//! Owns the wallet connection, the pending form, the loading flag and the
//! cached ledger records, and sequences the wallet and ledger calls that
//! connect, list and submit transfer records.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;

use crate::api::provider::{
    KeyValueStore, LedgerService, Notifier, RecordReceipt, ValueTransfer, WalletProvider, TRANSFER_GAS_LIMIT,
};
use crate::models::{FormField, PendingForm, SessionState, SubmissionPhase, TransferRecord};
use crate::utils::errors::SessionError;
use crate::utils::retry::{retry_read, RetryPolicy};
use crate::utils::short_address;
use crate::utils::units::parse_units;

/// Key under which the last known record count is cached
pub const TRANSACTION_COUNT_KEY: &str = "transactionCount";

/// Alert shown when no wallet provider is available
pub const INSTALL_PROMPT: &str = "Please install MetaMask";

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Policy for idempotent ledger and wallet reads
    pub read_retry: RetryPolicy,
}

/// Result of a finalized submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub submission_id: Uuid,
    /// Hash of the native value transfer
    pub transfer_hash: String,
    /// Hash of the finalized ledger write
    pub record_hash: String,
    pub block_number: Option<u64>,
}

/// Clears the loading flag when the submission ends, however it ends
struct LoadingGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.is_loading = false;
        state.phase = SubmissionPhase::Idle;
    }
}

pub struct SessionCoordinator {
    wallet: Option<Arc<dyn WalletProvider>>,
    ledger: Arc<dyn LedgerService>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    config: SessionConfig,
    state: Mutex<SessionState>,
    initialized: AtomicBool,
}

impl SessionCoordinator {
    /// Create a coordinator, restoring the cached record count from `store`
    ///
    /// `wallet` is `None` when no wallet provider is installed.
    pub async fn new(
        wallet: Option<Arc<dyn WalletProvider>>,
        ledger: Arc<dyn LedgerService>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        config: SessionConfig,
    ) -> Self {
        let cached = match store.get(TRANSACTION_COUNT_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read cached transaction count: {}", e);
                None
            }
        };

        Self {
            wallet,
            ledger,
            store,
            notifier,
            config,
            state: Mutex::new(SessionState::with_cached_count(cached.as_deref())),
            initialized: AtomicBool::new(false),
        }
    }

    // ---- Read-only views ----

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().clone()
    }

    pub fn current_account(&self) -> Option<String> {
        self.state.lock().current_account.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn records(&self) -> Vec<TransferRecord> {
        self.state.lock().records.clone()
    }

    pub fn form(&self) -> PendingForm {
        self.state.lock().form.clone()
    }

    pub fn transaction_count(&self) -> Option<u64> {
        self.state.lock().transaction_count
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.state.lock().phase
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    // ---- Operations ----

    /// Startup routine, run once per process
    ///
    /// Restores an already granted account (loading its records) and caches
    /// the ledger record count. Failures are logged and never returned.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("Session already initialized, skipping");
            return;
        }

        self.check_wallet_connection().await;
        self.cache_transaction_count().await;
    }

    async fn check_wallet_connection(&self) {
        let wallet = match &self.wallet {
            Some(wallet) => wallet,
            None => {
                self.prompt_install();
                return;
            }
        };

        let accounts = retry_read(&self.config.read_retry, "eth_accounts", || wallet.granted_accounts()).await;

        match accounts {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    info!("Restored connected account {}", short_address(&account));
                    self.state.lock().current_account = Some(account);

                    if let Err(e) = self.refresh_records().await {
                        debug!("Initial record load failed: {}", e);
                    }
                }
                None => info!("No accounts found"),
            },
            Err(e) => warn!("No accounts found: {}", e),
        }
    }

    async fn cache_transaction_count(&self) {
        match retry_read(&self.config.read_retry, "getTransactionCount", || self.ledger.record_count()).await {
            Ok(count) => {
                self.state.lock().transaction_count = Some(count);
                self.persist_transaction_count(count).await;
            }
            Err(e) => error!("Failed to read transaction count: {}", e),
        }
    }

    async fn persist_transaction_count(&self, count: u64) {
        if let Err(e) = self.store.set(TRANSACTION_COUNT_KEY, &count.to_string()).await {
            warn!("Failed to cache transaction count: {}", e);
        }
    }

    /// Ask the wallet for an account grant
    ///
    /// Returns `Ok(None)` after prompting for an install when no provider is
    /// present. A rejected or failed grant is returned as `GrantRejected`.
    pub async fn connect(&self) -> Result<Option<String>, SessionError> {
        let wallet = match &self.wallet {
            Some(wallet) => wallet,
            None => {
                self.prompt_install();
                return Ok(None);
            }
        };

        match wallet.request_account_grant().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    info!("🔗 Connected account {}", short_address(&account));
                    self.state.lock().current_account = Some(account.clone());
                    Ok(Some(account))
                }
                None => {
                    error!("Wallet granted no accounts");
                    Err(SessionError::GrantRejected("wallet returned no accounts".to_string()))
                }
            },
            Err(e) => {
                error!("Account grant failed: {}", e);
                Err(SessionError::GrantRejected(e.to_string()))
            }
        }
    }

    /// Replace one field of the pending form
    pub fn update_form_field(&self, field: FormField, value: impl Into<String>) {
        let mut state = self.state.lock();
        state.form = state.form.with_field(field, value);
    }

    pub fn clear_form(&self) {
        self.state.lock().form = PendingForm::default();
    }

    /// Reload every record from the ledger, keeping ledger order
    ///
    /// On failure the previous records stay in place.
    pub async fn refresh_records(&self) -> Result<usize, SessionError> {
        let raw = retry_read(&self.config.read_retry, "getAllTransactions", || self.ledger.list_records())
            .await
            .map_err(|e| {
                error!("Failed to load transfer records: {}", e);
                SessionError::from(e)
            })?;

        let records: Vec<TransferRecord> = raw.iter().map(TransferRecord::from_raw).collect();
        let count = records.len();
        self.state.lock().records = records;

        debug!("Loaded {} transfer record(s)", count);
        Ok(count)
    }

    /// Send the pending form as a value transfer plus a ledger record
    ///
    /// Prompts for an install and returns `ProviderAbsent` when no provider is
    /// present. Only one submission may be in flight at a time; the loading
    /// flag is cleared whether the submission succeeds or fails. Never retried.
    pub async fn submit(&self) -> Result<SubmitReceipt, SessionError> {
        let wallet = match &self.wallet {
            Some(wallet) => Arc::clone(wallet),
            None => {
                self.prompt_install();
                return Err(SessionError::ProviderAbsent);
            }
        };

        let (from, form, amount_wei) = {
            let mut state = self.state.lock();
            if state.is_loading {
                warn!("Submission ignored, another one is in progress");
                return Err(SessionError::SubmissionInFlight);
            }

            let from = match state.current_account.clone() {
                Some(account) => account,
                None => {
                    state.last_error = Some(SessionError::NotConnected.to_string());
                    return Err(SessionError::NotConnected);
                }
            };

            let amount_wei = match parse_units(&state.form.amount) {
                Ok(wei) => wei,
                Err(e) => {
                    error!("Invalid amount '{}': {}", state.form.amount, e);
                    state.last_error = Some(e.to_string());
                    return Err(e.into());
                }
            };

            state.is_loading = true;
            state.phase = SubmissionPhase::WalletConfirming;
            state.last_error = None;
            (from, state.form.clone(), amount_wei)
        };

        let guard = LoadingGuard { state: &self.state };
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", %submission_id);

        info!(parent: &span, "Loading....");

        let result = self
            .run_submission(wallet.as_ref(), &from, &form, amount_wei)
            .instrument(span.clone())
            .await;

        let (transfer_hash, receipt) = match result {
            Ok(done) => done,
            Err(e) => {
                error!(parent: &span, "Submission failed: {}", e);
                self.state.lock().last_error = Some(e.user_message());
                return Err(e);
            }
        };

        drop(guard);
        info!(parent: &span, "Success - {}", receipt.hash);

        self.refresh_transaction_count().instrument(span.clone()).await;
        if let Err(e) = self.refresh_records().instrument(span).await {
            debug!("Post-submit record refresh failed: {}", e);
        }

        Ok(SubmitReceipt {
            submission_id,
            transfer_hash,
            record_hash: receipt.hash,
            block_number: receipt.block_number,
        })
    }

    /// Wallet transfer then ledger write, awaiting finalization of the write
    async fn run_submission(
        &self,
        wallet: &dyn WalletProvider,
        from: &str,
        form: &PendingForm,
        amount_wei: u128,
    ) -> Result<(String, RecordReceipt), SessionError> {
        // Step 1: Native value transfer through the wallet
        let transfer = ValueTransfer {
            from: from.to_string(),
            to: form.address_to.clone(),
            gas: TRANSFER_GAS_LIMIT,
            value: amount_wei,
        };
        let transfer_hash = wallet.send_value_transfer(transfer).await?;
        debug!("Value transfer sent: {}", transfer_hash);

        // Step 2: Ledger record, waiting until it is durable
        self.state.lock().phase = SubmissionPhase::LedgerConfirming;
        let pending = self
            .ledger
            .submit_record(&form.address_to, amount_wei, &form.message, &form.keyword)
            .await?;
        debug!("Ledger write pending: {}", pending.hash());

        let receipt = pending.wait().await?;

        Ok((transfer_hash, receipt))
    }

    async fn refresh_transaction_count(&self) {
        match retry_read(&self.config.read_retry, "getTransactionCount", || self.ledger.record_count()).await {
            Ok(count) => {
                self.state.lock().transaction_count = Some(count);
                self.persist_transaction_count(count).await;
            }
            Err(e) => error!("Failed to refresh transaction count: {}", e),
        }
    }

    fn prompt_install(&self) {
        warn!("No wallet provider available");
        self.notifier.alert(INSTALL_PROMPT);
    }
}
