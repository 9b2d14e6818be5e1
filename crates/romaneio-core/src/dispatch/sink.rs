//! Message rendering and the delivery seam.

use crate::error::DispatchError;

/// Placeholder substituted with the document's first plate.
pub const PLATE_PLACEHOLDER: &str = "{placa}";

/// Where rendered messages go. The production sink drives a messaging
/// web session; tests substitute an in-memory recorder.
pub trait DispatchSink {
    fn send(&mut self, phone: &str, message: &str) -> Result<(), DispatchError>;
}

/// Substitute the plate placeholder once. A template without the
/// placeholder is sent unchanged.
pub fn render_message(template: &str, plate: &str) -> String {
    template.replacen(PLATE_PLACEHOLDER, plate, 1)
}

/// Compose the send URL for a web-session sink: the phone goes in as
/// digits, the message is percent-encoded.
pub fn build_send_url(endpoint: &str, phone: &str, message: &str) -> String {
    format!(
        "{}?phone={}&text={}",
        endpoint,
        phone,
        urlencoding::encode(message)
    )
}
