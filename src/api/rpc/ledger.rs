//! Ledger service adapter
//!
//! The transfer-record contract is reached through a JSON-RPC gateway that
//! exposes each contract method as `ledger_<method>` with the contract
//! address as first parameter. Finalization is observed by polling
//! `eth_getTransactionReceipt` on the same endpoint.

use async_trait::async_trait;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use super::client::RpcClient;
use super::models::{validate_tx_hash, LedgerRecordWire, ReceiptWire, RpcError, WireQuantity};
use crate::api::provider::{CapabilityError, LedgerService, PendingRecord, RecordReceipt};
use crate::models::RawTransferRecord;
use crate::utils::retry::{retry_read, RetryPolicy};
use crate::utils::units::to_quantity;

pub struct RpcLedgerService {
    client: RpcClient,
    contract_address: String,
    receipt_poll_interval: Duration,
    receipt_retry: RetryPolicy,
}

impl RpcLedgerService {
    /// `receipt_retry` bounds consecutive failed receipt polls, not the total wait
    pub fn new(
        client: RpcClient,
        contract_address: String,
        receipt_poll_interval: Duration,
        receipt_retry: RetryPolicy,
    ) -> Self {
        info!(
            "📒 Ledger contract {} via {}",
            contract_address,
            client.endpoint()
        );
        Self {
            client,
            contract_address,
            receipt_poll_interval,
            receipt_retry,
        }
    }

    fn decode_records(value: serde_json::Value) -> Result<Vec<RawTransferRecord>, RpcError> {
        let wires: Vec<LedgerRecordWire> = serde_json::from_value(value)
            .map_err(|e| RpcError::InvalidResponse(format!("Malformed transfer records: {}", e)))?;

        wires.into_iter().map(RawTransferRecord::try_from).collect()
    }
}

#[async_trait]
impl LedgerService for RpcLedgerService {
    async fn list_records(&self) -> Result<Vec<RawTransferRecord>, CapabilityError> {
        let value = self
            .client
            .call("ledger_getAllTransactions", json!([self.contract_address]))
            .await?;

        let records = Self::decode_records(value)?;
        debug!("Ledger returned {} record(s)", records.len());
        Ok(records)
    }

    async fn record_count(&self) -> Result<u64, CapabilityError> {
        let count: WireQuantity = self
            .client
            .call_as("ledger_getTransactionCount", json!([self.contract_address]))
            .await?;

        Ok(count.to_u64()?)
    }

    async fn submit_record(
        &self,
        to: &str,
        amount_wei: u128,
        message: &str,
        keyword: &str,
    ) -> Result<Box<dyn PendingRecord>, CapabilityError> {
        let hash: String = self
            .client
            .call_as(
                "ledger_addToBlockchain",
                json!([self.contract_address, to, to_quantity(amount_wei), message, keyword]),
            )
            .await?;
        validate_tx_hash(&hash)?;

        info!("Ledger write {} sent, waiting for finalization", hash);

        Ok(Box::new(RpcPendingRecord {
            client: self.client.clone(),
            hash,
            poll_interval: self.receipt_poll_interval,
            retry: self.receipt_retry,
        }))
    }
}

/// Ledger write waiting for its receipt
pub struct RpcPendingRecord {
    client: RpcClient,
    hash: String,
    poll_interval: Duration,
    retry: RetryPolicy,
}

#[async_trait]
impl PendingRecord for RpcPendingRecord {
    fn hash(&self) -> &str {
        &self.hash
    }

    async fn wait(self: Box<Self>) -> Result<RecordReceipt, CapabilityError> {
        let client = &self.client;
        let hash = self.hash.as_str();

        let receipt = poll_receipt(hash, self.poll_interval, &self.retry, || {
            client.call("eth_getTransactionReceipt", json!([hash]))
        })
        .await?;

        Ok(receipt)
    }
}

/// Poll `fetch` until it yields a receipt
///
/// A `null` result means the write is still pending. Failed polls are retried
/// under `retry`; only a reverted receipt or running out of retries ends the wait
/// with an error, since the write itself may still finalize.
async fn poll_receipt<F, Fut>(
    hash: &str,
    poll_interval: Duration,
    retry: &RetryPolicy,
    mut fetch: F,
) -> Result<RecordReceipt, RpcError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<serde_json::Value, RpcError>>,
{
    let mut polls: u64 = 0;

    loop {
        let value = retry_read(retry, "eth_getTransactionReceipt", &mut fetch).await?;

        if !value.is_null() {
            let receipt: ReceiptWire = serde_json::from_value(value)
                .map_err(|e| RpcError::InvalidResponse(format!("Malformed receipt: {}", e)))?;
            let receipt = receipt.into_receipt()?;
            info!(
                "✅ Ledger write {} finalized in block {:?}",
                receipt.hash, receipt.block_number
            );
            return Ok(receipt);
        }

        polls += 1;
        if polls % 10 == 0 {
            debug!("Still waiting for receipt of {} ({} polls)", hash, polls);
        }
        tokio::time::sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    const HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

    fn fast_retry(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
        }
    }

    /// Replays canned node answers, one per poll
    async fn poll_script(
        answers: Vec<Result<serde_json::Value, RpcError>>,
        retry: RetryPolicy,
    ) -> (Result<RecordReceipt, RpcError>, usize) {
        let answers = Mutex::new(VecDeque::from(answers));
        let calls = Mutex::new(0usize);

        let result = poll_receipt(HASH, Duration::from_millis(1), &retry, || {
            *calls.lock() += 1;
            let next = answers.lock().pop_front();
            async move { next.unwrap_or_else(|| Err(RpcError::InvalidResponse("script exhausted".into()))) }
        })
        .await;

        let calls = *calls.lock();
        (result, calls)
    }

    fn receipt(status: &str) -> serde_json::Value {
        json!({ "transactionHash": HASH, "blockNumber": "0x10", "status": status })
    }

    #[tokio::test]
    async fn test_wait_survives_pending_and_transient_failure() {
        let (result, calls) = poll_script(
            vec![
                Ok(serde_json::Value::Null),
                Err(RpcError::http(503, String::new())),
                Ok(receipt("0x1")),
            ],
            fast_retry(3),
        )
        .await;

        let receipt = result.unwrap();
        assert_eq!(receipt.hash, HASH);
        assert_eq!(receipt.block_number, Some(16));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_wait_ends_on_revert() {
        let (result, calls) = poll_script(vec![Ok(receipt("0x0"))], fast_retry(3)).await;

        assert!(matches!(result, Err(RpcError::Reverted(_))));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_wait_gives_up_after_consecutive_failures() {
        let (result, calls) = poll_script(
            vec![
                Err(RpcError::http(503, String::new())),
                Err(RpcError::http(503, String::new())),
                Ok(receipt("0x1")),
            ],
            fast_retry(2),
        )
        .await;

        assert!(matches!(result, Err(RpcError::Http(503, _))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_decode_records_keeps_ledger_order() {
        let value = json!([
            { "sender": "0x1", "receiver": "0x2", "amount": { "hex": "0x01" }, "keyword": "a", "message": "", "timestamp": 3 },
            { "sender": "0x3", "receiver": "0x4", "amount": { "hex": "0x02" }, "keyword": "b", "message": "", "timestamp": 1 },
            { "sender": "0x5", "receiver": "0x6", "amount": { "hex": "0x03" }, "keyword": "c", "message": "", "timestamp": 2 }
        ]);

        let records = RpcLedgerService::decode_records(value).unwrap();
        let keywords: Vec<&str> = records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decode_records_rejects_non_array() {
        assert!(RpcLedgerService::decode_records(json!({ "oops": true })).is_err());
    }
}
