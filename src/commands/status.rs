use crate::services::SessionCoordinator;

pub fn execute(session: &SessionCoordinator) -> String {
    let state = session.snapshot();

    let account = state.current_account.as_deref().unwrap_or("not connected");
    let count = state
        .transaction_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        "📊 Session".to_string(),
        format!("Account:      {}", account),
        format!("Wallet:       {}", if session.has_wallet() { "available" } else { "not installed" }),
        format!("Loading:      {}", if state.is_loading { "yes" } else { "no" }),
        format!("Phase:        {:?}", session.phase()),
        format!("Transactions: {}", count),
        format!("Records:      {} loaded", state.records.len()),
    ];

    if let Some(err) = &state.last_error {
        lines.push(format!("Last error:   {}", err));
    }

    lines.join("\n")
}
