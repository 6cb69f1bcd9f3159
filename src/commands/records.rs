use crate::models::TransferRecord;
use crate::services::SessionCoordinator;
use crate::utils::{Page, Table};

const RECORDS_PER_PAGE: usize = 10;

/// `$records [page]`, renders the cached records
pub fn execute(session: &SessionCoordinator, args: &[&str]) -> Result<String, String> {
    let page_number = match args.first() {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|_| format!("Invalid page number '{}'", arg))?,
        None => 1,
    };

    let records = session.records();
    if records.is_empty() {
        return Ok("📋 No transfers recorded yet".to_string());
    }

    let mut page = Page::new(&records, RECORDS_PER_PAGE);
    if !page.go_to(page_number) {
        return Err(format!(
            "Invalid page number. There are {} page(s)",
            page.total_pages()
        ));
    }

    Ok(format!(
        "📋 Transfer history ({} total)\n{}\n{}",
        records.len(),
        render(page.current()),
        page.footer()
    ))
}

/// `$refresh`, reloads records from the ledger
pub async fn refresh(session: &SessionCoordinator) -> Result<String, String> {
    let count = session.refresh_records().await.map_err(|e| e.user_message())?;
    Ok(format!("🔄 Loaded {} record(s)", count))
}

fn render(records: &[TransferRecord]) -> String {
    let mut table = Table::new(&["From", "To", "Amount", "Keyword", "Message", "Time"]);

    for record in records {
        table.add_row(vec![
            record.address_from.clone(),
            record.address_to.clone(),
            format!("{} ETH", record.exact_amount()),
            record.keyword.clone(),
            record.message.clone(),
            record.timestamp.clone(),
        ]);
    }

    table.render()
}
