pub fn execute() -> String {
    [
        "📖 Commands",
        "",
        "👛 Wallet",
        "  $connect                                   Connect your wallet",
        "  $status                                    Account, loading flag and record count",
        "",
        "📝 Transfer form",
        "  $form                                      Show the pending transfer",
        "  $set <addressTo|amount|keyword|message> <value>",
        "  $clear                                     Reset the form",
        "",
        "💸 Transfers",
        "  $send                                      Submit the pending transfer",
        "  $send <address> <amount> <keyword> [message...]",
        "  $records [page]                            Show recorded transfers",
        "  $refresh                                   Reload records from the ledger",
        "",
        "  $quit                                      Exit",
    ]
    .join("\n")
}
