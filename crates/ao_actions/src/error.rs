//! Caller-facing error taxonomy.
//!
//! Typed failures (validation, lifecycle, config, signer) map straight to
//! their kind. Raw client failures are classified by substring on their
//! message, first match wins:
//!
//! | message contains         | kind                  |
//! |--------------------------|-----------------------|
//! | `insufficient funds`     | `InsufficientBalance` |
//! | `network` / `connection` | `NetworkError`        |
//! | `reverted`               | `TransactionFailed`   |
//! | anything else            | `ProtocolError`       |
//!
//! Matching is case-sensitive and best effort: an unrelated message that
//! happens to contain one of these words is classified accordingly.

use crate::request::ValidationError;
use ao_adapter::AdapterError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    NetworkError,
    ProtocolError,
    SecurityError,
    InsufficientBalance,
    TransactionFailed,
    Unauthorized,
    ServiceNotInitialized,
    ConfigurationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::ProtocolError => "ProtocolError",
            ErrorKind::SecurityError => "SecurityError",
            ErrorKind::InsufficientBalance => "InsufficientBalance",
            ErrorKind::TransactionFailed => "TransactionFailed",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::ServiceNotInitialized => "ServiceNotInitialized",
            ErrorKind::ConfigurationError => "ConfigurationError",
        }
    }

    fn suggestions(&self) -> &'static [&'static str] {
        match self {
            ErrorKind::ValidationError => {
                &["Check the request fields against the action's expected input"]
            }
            ErrorKind::NetworkError => &[
                "Check your network connection",
                "Verify the configured AO gateway and unit URLs are reachable",
                "Try again in a few moments",
            ],
            ErrorKind::ProtocolError => &[
                "Verify the process and message identifiers",
                "Check the AO network status",
            ],
            ErrorKind::SecurityError => &["Verify the configured wallet key is a valid JWK"],
            ErrorKind::InsufficientBalance => &[
                "Add funds to the wallet",
                "Reduce the amount or fee of the operation",
            ],
            ErrorKind::TransactionFailed => &[
                "Inspect the process logic for the rejected message",
                "Check the tags and data sent with the message",
            ],
            ErrorKind::Unauthorized => &["Provide a valid API key"],
            ErrorKind::ServiceNotInitialized => {
                &["Ensure the AO plugin is configured and started before use"]
            }
            ErrorKind::ConfigurationError => &["Review the AO_* configuration values"],
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized error: kind, human message, opaque details and remediation hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct AoError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl AoError {
    /// New error carrying the kind's default suggestions.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            suggestions: kind.suggestions().iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_original(mut self, original: impl fmt::Display) -> Self {
        self.details = Some(json!({ "originalError": original.to_string() }));
        self
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized, "Missing or invalid API key")
    }
}

/// Kind for a raw failure message.
pub fn classify(message: &str) -> ErrorKind {
    if message.contains("insufficient funds") {
        ErrorKind::InsufficientBalance
    } else if message.contains("network") || message.contains("connection") {
        ErrorKind::NetworkError
    } else if message.contains("reverted") {
        ErrorKind::TransactionFailed
    } else {
        ErrorKind::ProtocolError
    }
}

/// Map an adapter failure into the taxonomy.
pub fn normalize(err: &AdapterError) -> AoError {
    match err {
        AdapterError::NotInitialized => {
            AoError::new(ErrorKind::ServiceNotInitialized, "AO service not initialized")
        }
        AdapterError::Config(e) => AoError::new(
            ErrorKind::ConfigurationError,
            format!("Invalid AO configuration: {e}"),
        )
        .with_original(e),
        AdapterError::Signer(e) => {
            AoError::new(ErrorKind::SecurityError, "Failed to derive AO signer").with_original(e)
        }
        AdapterError::Client(e) => classify_raw(&e.to_string()),
    }
}

fn classify_raw(raw: &str) -> AoError {
    let kind = classify(raw);
    let message = match kind {
        ErrorKind::InsufficientBalance => {
            "Insufficient balance to complete the operation".to_string()
        }
        ErrorKind::NetworkError => "Network error while contacting AO".to_string(),
        ErrorKind::TransactionFailed => "AO transaction was rejected".to_string(),
        _ => format!("AO operation failed: {raw}"),
    };
    AoError::new(kind, message).with_original(raw)
}

impl From<&ValidationError> for AoError {
    fn from(err: &ValidationError) -> Self {
        let mut out = AoError::new(ErrorKind::ValidationError, format!("Invalid input: {err}"));
        if let Some(field) = err.field() {
            out.details = Some(json!({ "field": field }));
        }
        out
    }
}

impl From<ValidationError> for AoError {
    fn from(err: ValidationError) -> Self {
        AoError::from(&err)
    }
}

impl From<AdapterError> for AoError {
    fn from(err: AdapterError) -> Self {
        normalize(&err)
    }
}
