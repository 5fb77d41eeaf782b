use ao_config::{ConnectionProfile, Mode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Application-level metadata pair. Order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Evaluation outcome returned by result reads and dry runs.
///
/// Contents are defined by the remote process; nothing here interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "Output", default)]
    pub output: Value,
    #[serde(rename = "Messages", default)]
    pub messages: Vec<Value>,
    #[serde(rename = "Spawns", default)]
    pub spawns: Vec<Value>,
    #[serde(rename = "Error", default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnParams {
    pub module: String,
    pub scheduler: String,
    pub tags: Vec<Tag>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams {
    pub process: String,
    pub data: String,
    pub tags: Vec<Tag>,
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultParams {
    pub process: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunParams {
    pub process: String,
    pub data: String,
    pub tags: Vec<Tag>,
    pub anchor: Option<String>,
}

/// Connection parameters handed to the client. `None` means "keep the client default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectOptions {
    pub gateway_url: Option<Url>,
    pub graphql_url: Option<Url>,
    pub mu_url: Option<Url>,
    pub cu_url: Option<Url>,
    pub mode: Option<Mode>,
    pub timeout_ms: Option<u64>,
}

impl From<&ConnectionProfile> for ConnectOptions {
    fn from(profile: &ConnectionProfile) -> Self {
        Self {
            gateway_url: profile.gateway_url.clone(),
            graphql_url: profile.graphql_url.clone(),
            mu_url: profile.mu_url.clone(),
            cu_url: profile.cu_url.clone(),
            mode: profile.mode,
            timeout_ms: profile.timeout_ms,
        }
    }
}
