//! Object-only view of an S3 event notification.
//!
//! Every level of the document must be a JSON object. Arrays are never read
//! positionally, so a payload only matches when its fields carry the
//! expected names.

use serde_json::{Map, Value};

/// Top-level notification document.
#[derive(Debug)]
pub(super) struct EventDocument(Map<String, Value>);

impl EventDocument {
    /// Parses `payload`, which must be a JSON object.
    pub(super) fn parse(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload).map(Self)
    }

    /// The `Records` list, if present and a list.
    pub(super) fn records(&self) -> Option<&[Value]> {
        self.0.get("Records")?.as_array().map(Vec::as_slice)
    }
}

/// Returns `value` as an object.
pub(super) fn object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Returns the member `name` of `parent` if it is an object.
pub(super) fn child<'a>(
    parent: &'a Map<String, Value>,
    name: &str,
) -> Option<&'a Map<String, Value>> {
    parent.get(name)?.as_object()
}

/// Returns the member `name` of `parent` if it is a non-empty string.
pub(super) fn text<'a>(parent: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    parent.get(name)?.as_str().filter(|value| !value.is_empty())
}
