//! Data models for the session coordinator
//!
//! Plain data only: ledger records, the pending form and the session state
//! snapshot handed to the presentation layer.

pub mod form;
pub mod record;
pub mod session;

pub use form::{FormField, PendingForm};
pub use record::{RawTransferRecord, TransferRecord};
pub use session::{SessionState, SubmissionPhase};
