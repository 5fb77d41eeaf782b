//! Context providers: small read-only snapshots of the adapter state.

use ao_adapter::AoService;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

pub const AO_SERVICE_PROVIDER: &str = "AO_SERVICE";
pub const AO_WALLET_PROVIDER: &str = "AO_WALLET";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub text: String,
    pub values: Value,
}

pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// `service` is `None` when the host has no AO service registered.
    fn get(&self, service: Option<&AoService>) -> ProviderResult;
}

pub struct ServiceStatusProvider;

impl Provider for ServiceStatusProvider {
    fn name(&self) -> &'static str {
        AO_SERVICE_PROVIDER
    }

    fn description(&self) -> &'static str {
        "Whether the AO service is available and initialized"
    }

    fn get(&self, service: Option<&AoService>) -> ProviderResult {
        let available = service.is_some();
        let initialized = service.map(|s| s.is_initialized()).unwrap_or(false);
        let agent_id = service
            .and_then(|s| s.runtime())
            .map(|r| r.agent_id.clone());
        let text = match (available, initialized) {
            (false, _) => "AO service is not available",
            (true, false) => "AO service is available but not initialized",
            (true, true) => "AO service is available and initialized",
        };
        ProviderResult {
            text: text.to_string(),
            values: json!({
                "available": available,
                "initialized": initialized,
                "agentId": agent_id,
            }),
        }
    }
}

/// Reports whether a signer is loaded.
///
/// Address extraction from the signer is not implemented; `address` is
/// always `null` until the wallet format question is settled.
pub struct WalletProvider;

impl Provider for WalletProvider {
    fn name(&self) -> &'static str {
        AO_WALLET_PROVIDER
    }

    fn description(&self) -> &'static str {
        "Whether an AO wallet is connected"
    }

    fn get(&self, service: Option<&AoService>) -> ProviderResult {
        let connected = service.and_then(|s| s.signer()).is_some();
        let text = if connected {
            "AO wallet connected"
        } else {
            "No AO wallet connected"
        };
        ProviderResult {
            text: text.to_string(),
            values: json!({ "connected": connected, "address": Value::Null }),
        }
    }
}

pub fn default_providers() -> Vec<Arc<dyn Provider>> {
    vec![Arc::new(ServiceStatusProvider), Arc::new(WalletProvider)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ao_adapter::testing::MockAoClient;
    use ao_adapter::RuntimeHandle;
    use ao_config::{InstanceConfig, WalletCredential};

    fn service(wallet: bool) -> AoService {
        let instance = InstanceConfig {
            wallet: wallet.then(|| WalletCredential::new("{}")),
            ..Default::default()
        };
        AoService::new(Arc::new(MockAoClient::new()), instance, None)
    }

    #[test]
    fn service_provider_flags() {
        let p = ServiceStatusProvider;
        assert_eq!(
            p.get(None).values,
            json!({"available": false, "initialized": false, "agentId": null})
        );

        let mut svc = service(false);
        assert_eq!(p.get(Some(&svc)).values["initialized"], false);
        svc.initialize(RuntimeHandle::new("agent-7")).unwrap();
        let res = p.get(Some(&svc));
        assert_eq!(
            res.values,
            json!({"available": true, "initialized": true, "agentId": "agent-7"})
        );
        assert_eq!(res.text, "AO service is available and initialized");
    }

    #[test]
    fn wallet_provider_tracks_signer() {
        let p = WalletProvider;
        let mut svc = service(true);
        assert_eq!(p.get(Some(&svc)).values["connected"], false);
        svc.initialize(RuntimeHandle::default()).unwrap();
        let res = p.get(Some(&svc));
        assert_eq!(res.values["connected"], true);
        assert!(res.values["address"].is_null());
        svc.stop();
        assert_eq!(p.get(Some(&svc)).values["connected"], false);
    }

    #[test]
    fn defaults_have_distinct_names() {
        let names: Vec<_> = default_providers().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![AO_SERVICE_PROVIDER, AO_WALLET_PROVIDER]);
    }
}
