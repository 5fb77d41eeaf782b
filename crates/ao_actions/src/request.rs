//! Typed requests parsed from untrusted JSON payloads.
//!
//! Required identifiers must be non-empty strings; beyond that the network
//! decides what is valid. `null` is treated the same as an absent field.

use ao_adapter::Tag;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{0}` must be a non-empty string")]
    Empty(&'static str),

    #[error("field `{field}` is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::Missing(f) | ValidationError::Empty(f) => Some(*f),
            ValidationError::Invalid { field, .. } => Some(*field),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Spawn,
    SendMessage,
    ReadResult,
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub module: String,
    pub scheduler: String,
    pub tags: Vec<Tag>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub process: String,
    pub data: String,
    pub tags: Vec<Tag>,
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResultRequest {
    pub process: String,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunRequest {
    pub process: String,
    pub data: String,
    pub tags: Vec<Tag>,
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    Spawn(SpawnRequest),
    SendMessage(SendMessageRequest),
    ReadResult(ReadResultRequest),
    DryRun(DryRunRequest),
}

impl OperationRequest {
    pub fn parse(kind: OperationKind, payload: &Value) -> Result<Self> {
        Ok(match kind {
            OperationKind::Spawn => Self::Spawn(SpawnRequest::parse(payload)?),
            OperationKind::SendMessage => Self::SendMessage(SendMessageRequest::parse(payload)?),
            OperationKind::ReadResult => Self::ReadResult(ReadResultRequest::parse(payload)?),
            OperationKind::DryRun => Self::DryRun(DryRunRequest::parse(payload)?),
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Spawn(_) => OperationKind::Spawn,
            Self::SendMessage(_) => OperationKind::SendMessage,
            Self::ReadResult(_) => OperationKind::ReadResult,
            Self::DryRun(_) => OperationKind::DryRun,
        }
    }
}

impl SpawnRequest {
    pub fn parse(payload: &Value) -> Result<Self> {
        let obj = object(payload)?;
        Ok(Self {
            module: required_str(obj, "module")?,
            scheduler: required_str(obj, "scheduler")?,
            tags: tags(obj)?,
            data: optional_str(obj, "data")?,
        })
    }
}

impl SendMessageRequest {
    pub fn parse(payload: &Value) -> Result<Self> {
        let obj = object(payload)?;
        Ok(Self {
            process: required_str(obj, "process")?,
            data: required_str(obj, "data")?,
            tags: tags(obj)?,
            anchor: optional_str(obj, "anchor")?,
        })
    }
}

impl ReadResultRequest {
    pub fn parse(payload: &Value) -> Result<Self> {
        let obj = object(payload)?;
        Ok(Self {
            process: required_str(obj, "process")?,
            message_id: required_str(obj, "messageId")?,
        })
    }
}

impl DryRunRequest {
    pub fn parse(payload: &Value) -> Result<Self> {
        let obj = object(payload)?;
        Ok(Self {
            process: required_str(obj, "process")?,
            data: required_str(obj, "data")?,
            tags: tags(obj)?,
            anchor: optional_str(obj, "anchor")?,
        })
    }
}

fn object(payload: &Value) -> Result<&Map<String, Value>> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String> {
    match present(obj, field) {
        None => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Empty(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::Invalid {
            field,
            reason: "expected a string".into(),
        }),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &'static str) -> Result<Option<String>> {
    match present(obj, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::Invalid {
            field,
            reason: "expected a string".into(),
        }),
    }
}

fn tags(obj: &Map<String, Value>) -> Result<Vec<Tag>> {
    match present(obj, "tags") {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| ValidationError::Invalid {
            field: "tags",
            reason: e.to_string(),
        }),
    }
}
