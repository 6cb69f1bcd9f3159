//! Transfer record models

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::warn;

use crate::utils::units::{format_units, to_display_amount};

/// Timestamp layout matching an en-US locale string, e.g. `3/14/2024, 9:05:00 AM`
const DISPLAY_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Transfer record exactly as stored on the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransferRecord {
    pub sender: String,
    pub receiver: String,
    pub amount_wei: u128,
    pub keyword: String,
    pub message: String,
    /// Unix seconds
    pub timestamp: u64,
}

/// Transfer record normalized for display
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub address_from: String,
    pub address_to: String,
    /// Decimal ether amount (wei / 10^18)
    pub amount: f64,
    pub keyword: String,
    pub message: String,
    /// Locale-formatted timestamp
    pub timestamp: String,
    /// Exact amount as stored on the ledger
    pub amount_wei: u128,
    pub recorded_at: DateTime<Utc>,
}

impl TransferRecord {
    /// Normalize a ledger record using the local timezone
    pub fn from_raw(raw: &RawTransferRecord) -> Self {
        Self::from_raw_in(raw, &Local)
    }

    /// Normalize a ledger record, formatting the timestamp in `tz`
    pub fn from_raw_in<Tz>(raw: &RawTransferRecord, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let recorded_at = match i64::try_from(raw.timestamp)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            Some(at) => at,
            None => {
                warn!(
                    "Record {} -> {} has out-of-range timestamp {}, showing epoch",
                    raw.sender, raw.receiver, raw.timestamp
                );
                DateTime::<Utc>::default()
            }
        };

        Self {
            address_from: raw.sender.clone(),
            address_to: raw.receiver.clone(),
            amount: to_display_amount(raw.amount_wei),
            keyword: raw.keyword.clone(),
            message: raw.message.clone(),
            timestamp: recorded_at
                .with_timezone(tz)
                .format(DISPLAY_TIME_FORMAT)
                .to_string(),
            amount_wei: raw.amount_wei,
            recorded_at,
        }
    }

    /// Exact decimal amount, e.g. `0.000000000000000001`
    pub fn exact_amount(&self) -> String {
        format_units(self.amount_wei)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount_wei: u128, timestamp: u64) -> RawTransferRecord {
        RawTransferRecord {
            sender: "0xA".to_string(),
            receiver: "0xB".to_string(),
            amount_wei,
            keyword: "k".to_string(),
            message: "m".to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_one_ether_normalizes_to_one() {
        let record = TransferRecord::from_raw_in(&raw(1_000_000_000_000_000_000, 0), &Utc);
        assert_eq!(record.amount, 1.0);
        assert_eq!(record.exact_amount(), "1.0");
        assert_eq!(record.address_from, "0xA");
        assert_eq!(record.address_to, "0xB");
        assert_eq!(record.keyword, "k");
        assert_eq!(record.message, "m");
    }

    #[test]
    fn test_timestamp_formatting() {
        // 2024-03-14 09:05:00 UTC
        let record = TransferRecord::from_raw_in(&raw(1, 1_710_407_100), &Utc);
        assert_eq!(record.timestamp, "3/14/2024, 9:05:00 AM");
        assert_eq!(record.recorded_at.timestamp(), 1_710_407_100);
    }

    #[test]
    fn test_out_of_range_timestamp_falls_back_to_epoch() {
        let record = TransferRecord::from_raw_in(&raw(1, u64::MAX), &Utc);
        assert_eq!(record.recorded_at.timestamp(), 0);
        assert_eq!(record.timestamp, "1/1/1970, 12:00:00 AM");
        assert_eq!(record.amount_wei, 1);
    }
}
