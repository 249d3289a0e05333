//! Event type definitions.

use crate::flow::controller::FlowState;

/// Events emitted by the payment flow controller.
///
/// Events are ephemeral notifications; subscribers read current data from
/// the controller, not from the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The view-state machine moved to a new phase.
    StateChanged { from: FlowState, to: FlowState },
    /// The backend rejected a lookup; `message` is the user-facing text.
    LookupFailed { message: String },
    /// A payment settled; carries the synthetic operation code.
    PaymentSettled {
        payment_id: String,
        operation_code: String,
    },
}
