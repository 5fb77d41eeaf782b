//! Connection profile resolution.
//!
//! Precedence per field: instance value (if present and non-empty) →
//! process-wide [`PluginConfig`] value → unset.

use crate::env::{non_empty, parse_mode, parse_url, PluginConfig};
use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::wallet::WalletCredential;
use serde::{Deserialize, Serialize};
use url::Url;

/// Per-adapter overrides supplied at construction. Raw strings; validated on resolve.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    #[serde(default)]
    pub gateway_url: Option<String>,
    #[serde(default)]
    pub graphql_url: Option<String>,
    #[serde(default)]
    pub mu_url: Option<String>,
    #[serde(default)]
    pub cu_url: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(skip)]
    pub wallet: Option<WalletCredential>,
}

/// The effective connection parameters. Absent fields are left to the client's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionProfile {
    pub gateway_url: Option<Url>,
    pub graphql_url: Option<Url>,
    pub mu_url: Option<Url>,
    pub cu_url: Option<Url>,
    pub mode: Option<Mode>,
    pub timeout_ms: Option<u64>,
    pub wallet: Option<WalletCredential>,
}

impl ConnectionProfile {
    /// Mode with the `legacy` default applied.
    pub fn effective_mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}

/// Merge instance overrides over the process-wide snapshot.
pub fn resolve(
    instance: &InstanceConfig,
    process: Option<&PluginConfig>,
) -> Result<ConnectionProfile> {
    let gateway_url = match non_empty(instance.gateway_url.clone()) {
        Some(raw) => Some(parse_url("gatewayUrl", &raw)?),
        None => process.map(|p| p.gateway_url.clone()),
    };
    let graphql_url = match non_empty(instance.graphql_url.clone()) {
        Some(raw) => Some(parse_url("graphqlUrl", &raw)?),
        None => process.map(|p| p.graphql_url.clone()),
    };
    let mu_url = match non_empty(instance.mu_url.clone()) {
        Some(raw) => Some(parse_url("muUrl", &raw)?),
        None => process.and_then(|p| p.mu_url.clone()),
    };
    let cu_url = match non_empty(instance.cu_url.clone()) {
        Some(raw) => Some(parse_url("cuUrl", &raw)?),
        None => process.and_then(|p| p.cu_url.clone()),
    };
    let mode = match non_empty(instance.mode.clone()) {
        Some(raw) => Some(parse_mode("mode", &raw)?),
        None => process.map(|p| p.mode),
    };
    let timeout_ms = match instance.timeout_ms {
        Some(0) => {
            return Err(ConfigError::InvalidTimeout {
                key: "timeoutMs",
                value: "0".into(),
            })
        }
        Some(ms) => Some(ms),
        None => process.map(|p| p.default_timeout_ms),
    };
    let wallet = match instance.wallet.as_ref().filter(|w| !w.expose().trim().is_empty()) {
        Some(w) => Some(w.clone()),
        None => process.and_then(|p| p.wallet.clone()),
    };

    Ok(ConnectionProfile {
        gateway_url,
        graphql_url,
        mu_url,
        cu_url,
        mode,
        timeout_ms,
        wallet,
    })
}
