use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use super::client::RpcClient;
use super::models::validate_tx_hash;
use crate::api::provider::{CapabilityError, ValueTransfer, WalletProvider};
use crate::utils::short_address;
use crate::utils::units::to_quantity;

/// Wallet provider reached through an EIP-1193 style JSON-RPC bridge
pub struct RpcWalletProvider {
    client: RpcClient,
}

impl RpcWalletProvider {
    pub fn new(client: RpcClient) -> Self {
        info!("👛 Wallet provider bridge at {}", client.endpoint());
        Self { client }
    }

    /// Parameters for `eth_sendTransaction`
    fn transfer_params(transfer: &ValueTransfer) -> serde_json::Value {
        json!([{
            "from": transfer.from,
            "to": transfer.to,
            "gas": to_quantity(transfer.gas as u128),
            "value": to_quantity(transfer.value),
        }])
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn granted_accounts(&self) -> Result<Vec<String>, CapabilityError> {
        let accounts: Vec<String> = self.client.call_as("eth_accounts", json!([])).await?;
        debug!("Wallet reports {} granted account(s)", accounts.len());
        Ok(accounts)
    }

    async fn request_account_grant(&self) -> Result<Vec<String>, CapabilityError> {
        let accounts: Vec<String> = self.client.call_as("eth_requestAccounts", json!([])).await?;
        info!("Wallet granted {} account(s)", accounts.len());
        Ok(accounts)
    }

    async fn send_value_transfer(&self, transfer: ValueTransfer) -> Result<String, CapabilityError> {
        debug!(
            "Sending {} wei from {} to {}",
            transfer.value,
            short_address(&transfer.from),
            short_address(&transfer.to)
        );

        let hash: String = self
            .client
            .call_as("eth_sendTransaction", Self::transfer_params(&transfer))
            .await?;
        validate_tx_hash(&hash)?;

        Ok(hash)
    }
}
