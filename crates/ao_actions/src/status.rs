use ao_adapter::AoService;
use ao_config::env::DEFAULT_GATEWAY_URL;
use ao_config::Mode;
use serde::{Deserialize, Serialize};

/// Read-only plugin status: mode, gateway and whether the adapter is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub mode: Mode,
    pub gateway: String,
    pub configured: bool,
}

impl StatusSnapshot {
    /// Prefers the resolved profile; falls back to plugin config, then defaults.
    pub fn of(service: &AoService) -> Self {
        let profile = service.profile();
        let plugin = service.plugin_config();
        let mode = profile
            .and_then(|p| p.mode)
            .or(plugin.map(|c| c.mode))
            .unwrap_or_default();
        let gateway = profile
            .and_then(|p| p.gateway_url.as_ref())
            .or(plugin.map(|c| &c.gateway_url))
            .map(|u| u.to_string())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        Self {
            mode,
            gateway,
            configured: service.is_initialized(),
        }
    }
}
