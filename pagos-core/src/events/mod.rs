//! Event infrastructure for rendering-layer subscriptions.
//!
//! The flow controller owns all logic; rendering layers subscribe to the
//! [`FlowEvent`] channel instead of polling the controller for changes.

pub mod channels;
pub mod types;

pub use channels::{flow_event_channel, FlowEventReceiver, FlowEventSender, DEFAULT_CHANNEL_BUFFER};
pub use types::FlowEvent;
