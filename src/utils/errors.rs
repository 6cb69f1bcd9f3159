use thiserror::Error;

use crate::api::provider::CapabilityError;

/// Amount strings that cannot be represented exactly as wei
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Amount is empty")]
    Empty,
    #[error("Invalid amount '{0}': expected a plain decimal number")]
    Malformed(String),
    #[error("Amount '{value}' has {digits} fractional digits, at most 18 are allowed")]
    TooPrecise { value: String, digits: usize },
    #[error("Amount '{0}' is too large")]
    Overflow(String),
    #[error("Invalid quantity '{0}'")]
    InvalidQuantity(String),
}

/// Errors surfaced by the session coordinator
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet provider is installed, so nothing was sent
    #[error("No wallet provider available, transfer not sent")]
    ProviderAbsent,

    /// The user declined the connection or the provider failed to grant one
    #[error("No Ethereum Object: {0}")]
    GrantRejected(String),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Wallet provider or ledger service call failed or reverted
    #[error("Remote call failed: {0}")]
    RemoteCall(String),

    /// A submission is already waiting on the wallet or the ledger
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Store error: {0}")]
    Store(String),
}

impl From<CapabilityError> for SessionError {
    fn from(e: CapabilityError) -> Self {
        match e {
            CapabilityError::Store(msg) => SessionError::Store(msg),
            other => SessionError::RemoteCall(other.to_string()),
        }
    }
}

impl SessionError {
    /// Short message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            SessionError::RemoteCall(msg) => extract_revert_reason(msg),
            other => other.to_string(),
        }
    }
}

/// Extract the revert reason from a node error string
///
/// Removes transport prefixes like:
/// "RPC error 3: execution reverted: Insufficient funds"
///
/// Returns only the meaningful reason:
/// "Insufficient funds"
pub fn extract_revert_reason(error_msg: &str) -> String {
    const MARKER: &str = "execution reverted:";

    match error_msg.rfind(MARKER) {
        Some(idx) => {
            let reason = error_msg[idx + MARKER.len()..].trim();
            if reason.is_empty() {
                "Transaction reverted".to_string()
            } else {
                reason.to_string()
            }
        }
        None => error_msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_revert_reason() {
        assert_eq!(
            extract_revert_reason("RPC error 3: execution reverted: Insufficient funds"),
            "Insufficient funds"
        );
        assert_eq!(extract_revert_reason("execution reverted:"), "Transaction reverted");
        assert_eq!(extract_revert_reason("connection refused"), "connection refused");
    }

    #[test]
    fn test_user_message_strips_remote_prefix() {
        let err = SessionError::RemoteCall("RPC error -32000: execution reverted: paused".into());
        assert_eq!(err.user_message(), "paused");
        assert_eq!(SessionError::SubmissionInFlight.user_message(), "A submission is already in progress");
    }
}
