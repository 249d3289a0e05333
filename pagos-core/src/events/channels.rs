//! Event channel factory and handles.

use super::types::FlowEvent;
use tokio::sync::mpsc;

/// Default buffer size for the flow event channel.
///
/// One user drives the flow, so a small buffer absorbs any rendering lag.
pub const DEFAULT_CHANNEL_BUFFER: usize = 64;

/// Sender handle for FlowEvent events.
pub type FlowEventSender = mpsc::Sender<FlowEvent>;
/// Receiver handle for FlowEvent events.
pub type FlowEventReceiver = mpsc::Receiver<FlowEvent>;

/// Create a new FlowEvent channel.
///
/// Returns a (sender, receiver) pair; the sender is handed to the
/// controller and the receiver to the rendering layer.
pub fn flow_event_channel() -> (FlowEventSender, FlowEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
