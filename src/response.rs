// ============================
// session-guard/src/response.rs
// ============================
//! JSON response envelope.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializable action result: a status code plus exactly one of `data`
/// or `error`. The constructors keep the other side `None`, and absent
/// sides are omitted from the wire form, so output is always
/// `{statusCode, data}` or `{statusCode, error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ActionError>,
}

/// Error payload carried by a failed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionError {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

impl Envelope {
    /// A successful envelope carrying `data`.
    pub fn ok(status_code: u16, data: Value) -> Self {
        Self {
            status_code,
            data: Some(data),
            error: None,
        }
    }

    /// A failed envelope carrying `error`.
    pub fn err(status_code: u16, error: ActionError) -> Self {
        Self {
            status_code,
            data: None,
            error: Some(error),
        }
    }
}

impl ActionError {
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
        }
    }
}
