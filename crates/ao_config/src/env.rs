//! Process-wide plugin configuration, read once from the environment.
//!
//! Empty values are treated as unset and fall back to the defaults below.
//! Anything present but malformed is rejected with the offending key.

use crate::error::{ConfigError, Result};
use crate::mode::Mode;
use crate::wallet::WalletCredential;
use url::Url;

pub const AO_API_KEY: &str = "AO_API_KEY";
pub const AO_GATEWAY_URL: &str = "AO_GATEWAY_URL";
pub const AO_GRAPHQL_URL: &str = "AO_GRAPHQL_URL";
pub const AO_MU_URL: &str = "AO_MU_URL";
pub const AO_CU_URL: &str = "AO_CU_URL";
pub const AO_MODE: &str = "AO_MODE";
pub const AO_DEFAULT_TIMEOUT: &str = "AO_DEFAULT_TIMEOUT";
pub const AO_WALLET: &str = "AO_WALLET";

pub const DEFAULT_GATEWAY_URL: &str = "https://arweave.net";
pub const DEFAULT_GRAPHQL_URL: &str = "https://arweave.net/graphql";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Validated plugin configuration with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub api_key: Option<String>,
    pub gateway_url: Url,
    pub graphql_url: Url,
    pub mu_url: Option<Url>,
    pub cu_url: Option<Url>,
    pub mode: Mode,
    pub default_timeout_ms: u64,
    pub wallet: Option<WalletCredential>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gateway_url: Url::parse(DEFAULT_GATEWAY_URL).expect("static url"),
            graphql_url: Url::parse(DEFAULT_GRAPHQL_URL).expect("static url"),
            mu_url: None,
            cu_url: None,
            mode: Mode::default(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
            wallet: None,
        }
    }
}

impl PluginConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (env, settings map, test fixture).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        let defaults = Self::default();

        let gateway_url = match get(AO_GATEWAY_URL) {
            Some(raw) => parse_url(AO_GATEWAY_URL, &raw)?,
            None => defaults.gateway_url,
        };
        let graphql_url = match get(AO_GRAPHQL_URL) {
            Some(raw) => parse_url(AO_GRAPHQL_URL, &raw)?,
            None => defaults.graphql_url,
        };
        let mu_url = get(AO_MU_URL)
            .map(|raw| parse_url(AO_MU_URL, &raw))
            .transpose()?;
        let cu_url = get(AO_CU_URL)
            .map(|raw| parse_url(AO_CU_URL, &raw))
            .transpose()?;
        let mode = match get(AO_MODE) {
            Some(raw) => parse_mode(AO_MODE, &raw)?,
            None => defaults.mode,
        };
        let default_timeout_ms = match get(AO_DEFAULT_TIMEOUT) {
            Some(raw) => parse_timeout(AO_DEFAULT_TIMEOUT, &raw)?,
            None => defaults.default_timeout_ms,
        };

        let config = Self {
            api_key: get(AO_API_KEY),
            gateway_url,
            graphql_url,
            mu_url,
            cu_url,
            mode,
            default_timeout_ms,
            wallet: get(AO_WALLET).map(WalletCredential::new),
        };
        tracing::debug!(
            gateway = %config.gateway_url,
            mode = %config.mode,
            timeout_ms = config.default_timeout_ms,
            wallet = config.wallet.is_some(),
            "loaded AO plugin config"
        );
        Ok(config)
    }
}

pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub(crate) fn parse_url(key: &'static str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        scheme => Err(ConfigError::InvalidUrl {
            key,
            value: raw.to_string(),
            reason: format!("unsupported scheme or missing host ({scheme})"),
        }),
    }
}

pub(crate) fn parse_mode(key: &'static str, raw: &str) -> Result<Mode> {
    raw.parse().map_err(|_| ConfigError::InvalidMode {
        key,
        value: raw.to_string(),
    })
}

pub(crate) fn parse_timeout(key: &'static str, raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidTimeout {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PluginConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PluginConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.gateway_url.as_str(), "https://arweave.net/");
        assert_eq!(cfg.graphql_url.as_str(), "https://arweave.net/graphql");
        assert_eq!(cfg.mode, Mode::Legacy);
        assert_eq!(cfg.default_timeout_ms, 30_000);
        assert!(cfg.api_key.is_none());
        assert!(cfg.mu_url.is_none());
        assert!(cfg.cu_url.is_none());
        assert!(cfg.wallet.is_none());
    }

    #[test]
    fn reads_every_key() {
        let cfg = load(&[
            (AO_API_KEY, "k-123"),
            (AO_GATEWAY_URL, "https://gw.example"),
            (AO_GRAPHQL_URL, "https://gw.example/graphql"),
            (AO_MU_URL, "https://mu.example"),
            (AO_CU_URL, "https://cu.example"),
            (AO_MODE, "mainnet"),
            (AO_DEFAULT_TIMEOUT, "5000"),
            (AO_WALLET, "{\"kty\":\"RSA\"}"),
        ])
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("k-123"));
        assert_eq!(cfg.gateway_url.as_str(), "https://gw.example/");
        assert_eq!(cfg.mu_url.unwrap().as_str(), "https://mu.example/");
        assert_eq!(cfg.cu_url.unwrap().as_str(), "https://cu.example/");
        assert_eq!(cfg.mode, Mode::Mainnet);
        assert_eq!(cfg.default_timeout_ms, 5000);
        assert_eq!(cfg.wallet.unwrap().expose(), "{\"kty\":\"RSA\"}");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = load(&[(AO_GATEWAY_URL, "   "), (AO_MODE, ""), (AO_API_KEY, " ")]).unwrap();
        assert_eq!(cfg.gateway_url.as_str(), "https://arweave.net/");
        assert_eq!(cfg.mode, Mode::Legacy);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn relative_url_is_rejected() {
        let err = load(&[(AO_CU_URL, "cu.example/path")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: AO_CU_URL, .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = load(&[(AO_GATEWAY_URL, "mailto:ops@example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { key: AO_GATEWAY_URL, .. }));
    }

    #[test]
    fn bad_mode_is_rejected() {
        let err = load(&[(AO_MODE, "testnet")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMode {
                key: AO_MODE,
                value: "testnet".into()
            }
        );
    }

    #[test]
    fn zero_and_garbage_timeouts_are_rejected() {
        for raw in ["0", "-5", "fast", "1.5"] {
            let err = load(&[(AO_DEFAULT_TIMEOUT, raw)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTimeout { .. }),
                "{raw} should be rejected"
            );
        }
    }
}
