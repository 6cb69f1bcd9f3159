//! Client-side coordinator between a wallet provider and a ledger of
//! transfer records.
//!
//! The [`services::SessionCoordinator`] owns the session state and sequences
//! the wallet and ledger calls; the `api` module defines the capabilities it
//! consumes along with JSON-RPC adapters for them.

pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use services::{SessionConfig, SessionCoordinator, SubmitReceipt};
pub use utils::errors::SessionError;
