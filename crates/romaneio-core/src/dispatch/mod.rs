//! Recipient dispatch: per-document queue and message delivery.

pub mod queue;
pub mod sink;

pub use queue::{DispatchQueue, QueueState};
pub use sink::{build_send_url, render_message, DispatchSink, PLATE_PLACEHOLDER};
