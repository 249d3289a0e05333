//! Payment flow state machine and derived computations.

pub mod controller;
pub mod summary;

pub use controller::{FlowError, FlowState, PaymentFlow, PaymentLookup};
pub use summary::{days_remaining, pending_count, total_pending_amount, DueStatus};
