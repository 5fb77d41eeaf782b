use crate::error::AoError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// What an action hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub text: String,
    #[serde(default)]
    pub data: Value,
}

impl ActionResponse {
    pub fn ok(text: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            text: text.into(),
            data,
        }
    }

    /// Failure envelope. `data.error` keeps the full normalized error for machine consumers.
    pub fn failure(context: &str, err: &AoError) -> Self {
        Self {
            success: false,
            text: format!("{context}: {}", err.message),
            data: json!({ "error": err }),
        }
    }

    /// Normalized error carried by a failure envelope, if any.
    pub fn error(&self) -> Option<AoError> {
        self.data
            .get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok())
    }
}
