use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::provider::{CapabilityError, RecordReceipt};
use crate::models::RawTransferRecord;
use crate::utils::units::parse_quantity;

/// EIP-1193 code for "user rejected the request"
pub const USER_REJECTED_CODE: i64 = 4001;

/// JSON-RPC 2.0 request
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 response
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Errors from the JSON-RPC transport
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP error {0}: {1}")]
    Http(u16, String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),
}

impl RpcError {
    pub fn http(status: u16, body: String) -> Self {
        let body = if body.is_empty() {
            match status {
                400 => "Bad Request",
                404 => "Not Found",
                429 => "Too Many Requests",
                500 => "Internal Server Error",
                503 => "Service Unavailable",
                _ => "Unknown Error",
            }
            .to_string()
        } else {
            body
        };
        RpcError::Http(status, body)
    }
}

impl From<RpcError> for CapabilityError {
    fn from(e: RpcError) -> Self {
        match e {
            RpcError::Rpc { code, message } if code == USER_REJECTED_CODE => {
                CapabilityError::Rejected(message)
            }
            RpcError::Reverted(hash) => CapabilityError::Reverted(format!("transaction {}", hash)),
            other => CapabilityError::Call(other.to_string()),
        }
    }
}

/// Numeric value as the ledger gateway encodes it
///
/// Big numbers arrive as `{ "hex": "0x..." }` (older encoders use `_hex`),
/// small ones as hex strings or plain JSON numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireQuantity {
    Object {
        #[serde(alias = "_hex")]
        hex: String,
    },
    Text(String),
    Number(u64),
}

impl WireQuantity {
    pub fn to_u128(&self) -> Result<u128, RpcError> {
        match self {
            WireQuantity::Object { hex } | WireQuantity::Text(hex) => parse_quantity(hex)
                .map_err(|e| RpcError::InvalidResponse(e.to_string())),
            WireQuantity::Number(n) => Ok(*n as u128),
        }
    }

    pub fn to_u64(&self) -> Result<u64, RpcError> {
        let value = self.to_u128()?;
        u64::try_from(value)
            .map_err(|_| RpcError::InvalidResponse(format!("Quantity {} does not fit in u64", value)))
    }
}

/// Transfer record struct as returned by `getAllTransactions`
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerRecordWire {
    pub sender: String,
    pub receiver: String,
    pub amount: WireQuantity,
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub message: String,
    pub timestamp: WireQuantity,
}

impl TryFrom<LedgerRecordWire> for RawTransferRecord {
    type Error = RpcError;

    fn try_from(wire: LedgerRecordWire) -> Result<Self, Self::Error> {
        Ok(RawTransferRecord {
            amount_wei: wire.amount.to_u128()?,
            timestamp: wire.timestamp.to_u64()?,
            sender: wire.sender,
            receiver: wire.receiver,
            keyword: wire.keyword,
            message: wire.message,
        })
    }
}

/// Subset of `eth_getTransactionReceipt` the client cares about
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptWire {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ReceiptWire {
    /// Convert into a receipt, treating status `0x0` as a revert
    pub fn into_receipt(self) -> Result<RecordReceipt, RpcError> {
        if let Some(status) = &self.status {
            if parse_quantity(status).ok() == Some(0) {
                return Err(RpcError::Reverted(self.transaction_hash));
            }
        }

        let block_number = match &self.block_number {
            Some(n) => Some(WireQuantity::Text(n.clone()).to_u64()?),
            None => None,
        };

        Ok(RecordReceipt {
            hash: self.transaction_hash,
            block_number,
        })
    }
}

/// Check that a transaction hash is 32 bytes of `0x`-prefixed hex
pub fn validate_tx_hash(hash: &str) -> Result<(), RpcError> {
    let digits = hash
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("Transaction hash '{}' is missing 0x prefix", hash)))?;

    let bytes = hex::decode(digits)
        .map_err(|e| RpcError::InvalidResponse(format!("Invalid transaction hash '{}': {}", hash, e)))?;

    if bytes.len() != 32 {
        return Err(RpcError::InvalidResponse(format!(
            "Transaction hash '{}' is {} bytes, expected 32",
            hash,
            bytes.len()
        )));
    }

    Ok(())
}
