use tracing::info;

use crate::models::FormField;
use crate::services::SessionCoordinator;

/// `$send` submits the pending form as is
/// `$send <address> <amount> <keyword> [message...]` fills the form first
pub async fn execute(session: &SessionCoordinator, args: &[&str]) -> Result<String, String> {
    match args.len() {
        0 => {}
        1 | 2 => return Err("Usage: $send <address> <amount> <keyword> [message...]".to_string()),
        _ => {
            session.update_form_field(FormField::AddressTo, args[0]);
            session.update_form_field(FormField::Amount, args[1]);
            session.update_form_field(FormField::Keyword, args[2]);
            session.update_form_field(FormField::Message, args[3..].join(" "));
        }
    }

    let form = session.form();
    if form.address_to.is_empty() {
        return Err("Recipient address is empty. Use $set addressTo <address>".to_string());
    }

    info!("Submitting {} ETH to {}", form.amount, form.address_to);

    match session.submit().await {
        Ok(receipt) => Ok(format!(
            "💸 Transfer recorded\nTransfer: {}\nRecord:   {}\nBlock:    {}",
            receipt.transfer_hash,
            receipt.record_hash,
            receipt
                .block_number
                .map(|b| b.to_string())
                .unwrap_or_else(|| "pending".to_string())
        )),
        Err(e) => Err(e.user_message()),
    }
}
