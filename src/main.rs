use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use ledger_session::api::provider::{KeyValueStore, WalletProvider};
use ledger_session::api::rpc::{RpcClient, RpcLedgerService, RpcWalletProvider};
use ledger_session::commands::{self, CommandOutcome, ConsoleNotifier};
use ledger_session::db::{self, SqlKeyValueStore};
use ledger_session::{Config, SessionCoordinator};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::from_default_env();
    let filter = match "ledger_session=debug".parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📒 Starting ledger session...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Initializing database...");
    let store: Arc<dyn KeyValueStore> = match db::init_db(&config.database_url).await {
        Ok(pool) => Arc::new(SqlKeyValueStore::new(pool)),
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let ledger_client = match RpcClient::new(&config.ledger_rpc_url, config.rpc_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create ledger client: {}", e);
            return;
        }
    };
    let session_config = config.session_config();
    let ledger = Arc::new(RpcLedgerService::new(
        ledger_client,
        config.ledger_contract_address.clone(),
        config.receipt_poll_interval,
        session_config.read_retry,
    ));

    let wallet: Option<Arc<dyn WalletProvider>> = match &config.wallet_rpc_url {
        Some(url) => match RpcClient::new(url, config.rpc_timeout) {
            Ok(client) => Some(Arc::new(RpcWalletProvider::new(client)) as Arc<dyn WalletProvider>),
            Err(e) => {
                warn!("Wallet provider unusable, continuing without it: {}", e);
                None
            }
        },
        None => None,
    };

    let session = SessionCoordinator::new(
        wallet,
        ledger,
        store,
        Arc::new(ConsoleNotifier),
        session_config,
    )
    .await;

    let session = Arc::new(session);
    session.initialize().await;

    println!("{}", commands::help::execute());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        // Submissions run in the background so the form stays editable
        if commands::runs_in_background(&line) {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                if let CommandOutcome::Reply(text) = commands::handle_line(&session, &line).await {
                    println!("{}", text);
                }
            });
            continue;
        }

        match commands::handle_line(&session, &line).await {
            CommandOutcome::Reply(text) => println!("{}", text),
            CommandOutcome::Quit => break,
            CommandOutcome::Ignored => {}
        }
    }

    info!("👋 Session closed");
}
