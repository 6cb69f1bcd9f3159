pub mod session_service;

pub use session_service::{
    SessionConfig, SessionCoordinator, SubmitReceipt, INSTALL_PROMPT, TRANSACTION_COUNT_KEY,
};
