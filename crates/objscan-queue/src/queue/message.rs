//! A single delivery received from the queue.

use aws_sdk_sqs::types::Message;
use serde::{Deserialize, Serialize};

/// Opaque envelope for one delivery.
///
/// Each receive produces new envelopes; the receipt handle identifies this
/// delivery only and is what a delete call needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    id: String,
    body: String,
    receipt_handle: Option<String>,
}

impl RawMessage {
    /// Creates a delivery.
    pub fn new(
        id: impl Into<String>,
        body: impl Into<String>,
        receipt_handle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            receipt_handle: Some(receipt_handle.into()),
        }
    }

    /// Delivery identifier assigned by the queue.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw payload.
    #[inline]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Handle required to delete this delivery, if the queue returned one.
    #[inline]
    pub fn receipt_handle(&self) -> Option<&str> {
        self.receipt_handle.as_deref()
    }
}

impl From<Message> for RawMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.message_id.unwrap_or_default(),
            body: message.body.unwrap_or_default(),
            receipt_handle: message.receipt_handle.filter(|h| !h.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_sdk_message() {
        let message = Message::builder()
            .message_id("m-1")
            .body(r#"{"Records":[]}"#)
            .receipt_handle("rh-1")
            .build();

        let raw = RawMessage::from(message);
        assert_eq!(raw.id(), "m-1");
        assert_eq!(raw.body(), r#"{"Records":[]}"#);
        assert_eq!(raw.receipt_handle(), Some("rh-1"));
    }

    #[test]
    fn missing_fields_become_empty() {
        let raw = RawMessage::from(Message::builder().build());
        assert_eq!(raw.id(), "");
        assert_eq!(raw.body(), "");
        assert_eq!(raw.receipt_handle(), None);
    }

    #[test]
    fn empty_receipt_handle_is_missing() {
        let raw = RawMessage::from(Message::builder().message_id("m").receipt_handle("").build());
        assert_eq!(raw.receipt_handle(), None);
    }
}
