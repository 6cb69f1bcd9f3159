//! `$`-prefixed text commands driving the session coordinator
//!
//! This is the presentation layer of the binary: it only reads session state
//! and calls coordinator operations.

pub mod connect;
pub mod form;
pub mod help;
pub mod records;
pub mod send;
pub mod status;

use tracing::{debug, error};

use crate::api::provider::Notifier;
use crate::services::SessionCoordinator;

/// What the input loop should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Reply(String),
    Quit,
    Ignored,
}

/// Notifier that writes alerts to the terminal
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        println!("⚠️  {}", message);
    }
}

/// Whether a line starts a submission that should not block the input loop
pub fn runs_in_background(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some("$send"))
}

pub async fn handle_line(session: &SessionCoordinator, line: &str) -> CommandOutcome {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return CommandOutcome::Ignored;
    }

    let command = parts[0];
    let args = &parts[1..];
    debug!("Command {} with {} arg(s)", command, args.len());

    let result = match command {
        "$help" | "$h" => Ok(help::execute()),
        "$connect" => connect::execute(session).await,
        "$records" => records::execute(session, args),
        "$refresh" => records::refresh(session).await,
        "$form" => Ok(form::show(session)),
        "$set" => form::set(session, args),
        "$clear" => Ok(form::clear(session)),
        "$send" => send::execute(session, args).await,
        "$status" => Ok(status::execute(session)),
        "$quit" | "$exit" => return CommandOutcome::Quit,
        _ if command.starts_with('$') => Err(format!("Unknown command {}. Type $help for a list.", command)),
        _ => return CommandOutcome::Ignored,
    };

    match result {
        Ok(reply) => CommandOutcome::Reply(reply),
        Err(e) => {
            error!("❌ Error executing command {}: {}", command, e);
            CommandOutcome::Reply(format!("❌ {}", e))
        }
    }
}
