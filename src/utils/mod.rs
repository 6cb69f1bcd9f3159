pub mod errors;
pub mod page;
pub mod retry;
pub mod table;
pub mod units;

pub use errors::{extract_revert_reason, ConversionError, SessionError};
pub use page::Page;
pub use retry::{retry_read, RetryPolicy};
pub use table::Table;
pub use units::{format_units, parse_units, to_display_amount};

/// Shorten an address for log lines, e.g. `0x1234…abcd`
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234…5678"
        );
        assert_eq!(short_address("0xA"), "0xA");
    }
}
