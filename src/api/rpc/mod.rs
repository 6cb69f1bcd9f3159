pub mod client;
pub mod ledger;
pub mod models;
pub mod wallet;

pub use client::RpcClient;
pub use ledger::RpcLedgerService;
pub use models::RpcError;
pub use wallet::RpcWalletProvider;
