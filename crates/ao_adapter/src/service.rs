//! The AO service adapter.
//!
//! Lifecycle: `Uninitialized → initialize() → Initialized → stop() → Stopped`.
//! Every operation checks the lifecycle first and fails with
//! [`AdapterError::NotInitialized`] before touching the client.
//!
//! `initialize`/`stop` take `&mut self` and operations take `&self`, so the
//! owner decides how (or whether) to share the adapter across tasks.

use crate::client::AoClient;
use crate::error::{AdapterError, Result};
use crate::signer::Signer;
use crate::types::{
    ConnectOptions, DryRunParams, MessageParams, OutcomeRecord, ResultParams, SpawnParams, Tag,
};
use ao_config::{resolve, ConnectionProfile, InstanceConfig, PluginConfig};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Stopped,
}

/// Opaque handle passed in by the host runtime at initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeHandle {
    pub agent_id: String,
}

impl RuntimeHandle {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
        }
    }
}

pub struct AoService {
    client: Arc<dyn AoClient>,
    instance: InstanceConfig,
    plugin: Option<PluginConfig>,
    lifecycle: Lifecycle,
    signer: Option<Signer>,
    profile: Option<ConnectionProfile>,
    runtime: Option<RuntimeHandle>,
}

impl AoService {
    pub fn new(
        client: Arc<dyn AoClient>,
        instance: InstanceConfig,
        plugin: Option<PluginConfig>,
    ) -> Self {
        Self {
            client,
            instance,
            plugin,
            lifecycle: Lifecycle::Uninitialized,
            signer: None,
            profile: None,
            runtime: None,
        }
    }

    /// Resolve the connection profile, derive the signer and configure the client.
    ///
    /// Re-running while initialized rebuilds everything from scratch. On
    /// failure the adapter is left uninitialized with no signer.
    pub fn initialize(&mut self, runtime: RuntimeHandle) -> Result<()> {
        match self.prepare() {
            Ok((profile, signer)) => {
                info!(
                    agent = %runtime.agent_id,
                    mode = %profile.effective_mode(),
                    signer = signer.is_some(),
                    "AO service initialized"
                );
                self.profile = Some(profile);
                self.signer = signer;
                self.runtime = Some(runtime);
                self.lifecycle = Lifecycle::Initialized;
                Ok(())
            }
            Err(e) => {
                error!(agent = %runtime.agent_id, error = %e, "AO service initialization failed");
                self.profile = None;
                self.signer = None;
                self.runtime = None;
                self.lifecycle = Lifecycle::Uninitialized;
                Err(e)
            }
        }
    }

    fn prepare(&self) -> Result<(ConnectionProfile, Option<Signer>)> {
        let profile = resolve(&self.instance, self.plugin.as_ref())?;
        let signer = match &profile.wallet {
            Some(wallet) => {
                let signer = self
                    .client
                    .create_signer(wallet)
                    .map_err(AdapterError::Signer)?;
                info!("AO signer derived from configured wallet");
                Some(signer)
            }
            None => None,
        };
        self.client.configure(ConnectOptions::from(&profile))?;
        Ok((profile, signer))
    }

    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Initialized {
            info!("AO service stopped");
        }
        self.signer = None;
        self.lifecycle = Lifecycle::Stopped;
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// Host handle from the last successful initialization.
    pub fn runtime(&self) -> Option<&RuntimeHandle> {
        self.runtime.as_ref()
    }

    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Profile from the last successful initialization.
    pub fn profile(&self) -> Option<&ConnectionProfile> {
        self.profile.as_ref()
    }

    pub fn plugin_config(&self) -> Option<&PluginConfig> {
        self.plugin.as_ref()
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            warn!(lifecycle = ?self.lifecycle, "AO operation rejected: service not initialized");
            Err(AdapterError::NotInitialized)
        }
    }

    pub async fn spawn_process(
        &self,
        module: impl Into<String>,
        scheduler: impl Into<String>,
        tags: Vec<Tag>,
        data: Option<String>,
    ) -> Result<String> {
        self.ensure_initialized()?;
        let params = SpawnParams {
            module: module.into(),
            scheduler: scheduler.into(),
            tags,
            data,
        };
        match self.client.spawn(params, self.signer.as_ref()).await {
            Ok(process_id) => {
                info!(process_id = %process_id, "spawned AO process");
                Ok(process_id)
            }
            Err(e) => {
                error!(error = %e, "failed to spawn AO process");
                Err(e.into())
            }
        }
    }

    pub async fn send_message(
        &self,
        process: impl Into<String>,
        data: impl Into<String>,
        tags: Vec<Tag>,
        anchor: Option<String>,
    ) -> Result<String> {
        self.ensure_initialized()?;
        let params = MessageParams {
            process: process.into(),
            data: data.into(),
            tags,
            anchor,
        };
        let process = params.process.clone();
        match self.client.message(params, self.signer.as_ref()).await {
            Ok(message_id) => {
                info!(%process, message_id = %message_id, "sent AO message");
                Ok(message_id)
            }
            Err(e) => {
                error!(%process, error = %e, "failed to send AO message");
                Err(e.into())
            }
        }
    }

    pub async fn read_result(
        &self,
        process: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Result<OutcomeRecord> {
        self.ensure_initialized()?;
        let params = ResultParams {
            process: process.into(),
            message: message_id.into(),
        };
        let message = params.message.clone();
        match self.client.result(params).await {
            Ok(outcome) => {
                info!(message_id = %message, "read AO result");
                Ok(outcome)
            }
            Err(e) => {
                error!(message_id = %message, error = %e, "failed to read AO result");
                Err(e.into())
            }
        }
    }

    pub async fn dry_run(
        &self,
        process: impl Into<String>,
        data: impl Into<String>,
        tags: Vec<Tag>,
        anchor: Option<String>,
    ) -> Result<OutcomeRecord> {
        self.ensure_initialized()?;
        let params = DryRunParams {
            process: process.into(),
            data: data.into(),
            tags,
            anchor,
        };
        let process = params.process.clone();
        match self.client.dry_run(params).await {
            Ok(outcome) => {
                info!(%process, "AO dry run completed");
                Ok(outcome)
            }
            Err(e) => {
                error!(%process, error = %e, "AO dry run failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::testing::{Call, MockAoClient};
    use ao_config::{ConfigError, Mode, Url, WalletCredential};
    use serde_json::json;

    fn service(mock: &Arc<MockAoClient>, instance: InstanceConfig) -> AoService {
        AoService::new(mock.clone(), instance, None)
    }

    fn with_wallet() -> InstanceConfig {
        InstanceConfig {
            wallet: Some(WalletCredential::new(r#"{"kty":"RSA"}"#)),
            ..Default::default()
        }
    }

    async fn every_operation_fails(svc: &AoService) {
        assert!(matches!(
            svc.spawn_process("m", "s", vec![], None).await,
            Err(AdapterError::NotInitialized)
        ));
        assert!(matches!(
            svc.send_message("p", "d", vec![], None).await,
            Err(AdapterError::NotInitialized)
        ));
        assert!(matches!(
            svc.read_result("p", "m").await,
            Err(AdapterError::NotInitialized)
        ));
        assert!(matches!(
            svc.dry_run("p", "d", vec![], None).await,
            Err(AdapterError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn operations_rejected_before_initialize() {
        let mock = Arc::new(MockAoClient::new());
        let svc = service(&mock, InstanceConfig::default());
        assert_eq!(svc.lifecycle(), Lifecycle::Uninitialized);
        every_operation_fails(&svc).await;
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn operations_rejected_after_stop() {
        let mock = Arc::new(MockAoClient::new());
        let mut svc = service(&mock, with_wallet());
        svc.initialize(RuntimeHandle::new("agent")).unwrap();
        svc.stop();
        every_operation_fails(&svc).await;
        assert_eq!(mock.network_calls(), 0);
    }

    #[test]
    fn stop_clears_state_from_any_lifecycle() {
        let mock = Arc::new(MockAoClient::new());

        let mut fresh = service(&mock, with_wallet());
        fresh.stop();
        assert!(!fresh.is_initialized());
        assert!(fresh.signer().is_none());

        let mut live = service(&mock, with_wallet());
        live.initialize(RuntimeHandle::default()).unwrap();
        assert!(live.signer().is_some());
        live.stop();
        live.stop();
        assert_eq!(live.lifecycle(), Lifecycle::Stopped);
        assert!(!live.is_initialized());
        assert!(live.signer().is_none());
    }

    #[test]
    fn signer_present_only_with_wallet() {
        let mock = Arc::new(MockAoClient::new());
        let mut signed = service(&mock, with_wallet());
        signed.initialize(RuntimeHandle::default()).unwrap();
        assert!(signed.signer().is_some());

        let mut unsigned = service(&mock, InstanceConfig::default());
        unsigned.initialize(RuntimeHandle::default()).unwrap();
        assert!(unsigned.is_initialized());
        assert!(unsigned.signer().is_none());
    }

    #[test]
    fn configure_receives_only_present_fields() {
        let mock = Arc::new(MockAoClient::new());
        let mut svc = service(
            &mock,
            InstanceConfig {
                cu_url: Some("https://cu.example".into()),
                ..Default::default()
            },
        );
        svc.initialize(RuntimeHandle::default()).unwrap();
        let configured = mock.configured();
        assert_eq!(configured.len(), 1);
        assert_eq!(
            configured[0],
            ConnectOptions {
                cu_url: Some(Url::parse("https://cu.example").unwrap()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn plugin_config_feeds_profile() {
        let mock = Arc::new(MockAoClient::new());
        let plugin = PluginConfig {
            mode: Mode::Mainnet,
            ..Default::default()
        };
        let mut svc = AoService::new(mock.clone(), InstanceConfig::default(), Some(plugin));
        svc.initialize(RuntimeHandle::default()).unwrap();
        let profile = svc.profile().unwrap();
        assert_eq!(profile.effective_mode(), Mode::Mainnet);
        assert_eq!(profile.timeout_ms, Some(30_000));
        assert_eq!(mock.configured()[0].mode, Some(Mode::Mainnet));
    }

    #[test]
    fn reinitialize_recomputes_state() {
        let mock = Arc::new(MockAoClient::new());
        let mut svc = service(&mock, with_wallet());
        svc.initialize(RuntimeHandle::new("a")).unwrap();
        svc.initialize(RuntimeHandle::new("b")).unwrap();
        assert!(svc.is_initialized());
        assert_eq!(svc.runtime(), Some(&RuntimeHandle::new("b")));
        assert_eq!(mock.configured().len(), 2);
    }

    #[test]
    fn signer_failure_is_fatal() {
        let mock = Arc::new(
            MockAoClient::new().failing_signer(ClientError::InvalidWallet("bad".into())),
        );
        let mut svc = service(&mock, with_wallet());
        let err = svc.initialize(RuntimeHandle::default()).unwrap_err();
        assert!(matches!(err, AdapterError::Signer(_)));
        assert_eq!(svc.lifecycle(), Lifecycle::Uninitialized);
        assert!(svc.signer().is_none());
        assert!(mock.configured().is_empty(), "client must not be configured");
    }

    #[test]
    fn invalid_config_is_fatal() {
        let mock = Arc::new(MockAoClient::new());
        let mut svc = service(
            &mock,
            InstanceConfig {
                mode: Some("devnet".into()),
                ..Default::default()
            },
        );
        let err = svc.initialize(RuntimeHandle::default()).unwrap_err();
        assert!(matches!(err, AdapterError::Config(ConfigError::InvalidMode { .. })));
        assert!(!svc.is_initialized());
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn failed_reinitialize_leaves_service_uninitialized() {
        let mock =
            Arc::new(MockAoClient::new().failing_configure(ClientError::Other("boom".into())));
        let mut svc = service(&mock, with_wallet());
        assert!(svc.initialize(RuntimeHandle::default()).is_err());
        assert_eq!(svc.lifecycle(), Lifecycle::Uninitialized);
        assert!(svc.signer().is_none());
        assert!(svc.profile().is_none());
        assert!(svc.runtime().is_none());
    }

    #[tokio::test]
    async fn spawn_attaches_signer_and_passes_tags_verbatim() {
        let mock = Arc::new(MockAoClient::new().with_spawn(Ok("PROCESS_ID_789".into())));
        let mut svc = service(&mock, with_wallet());
        svc.initialize(RuntimeHandle::default()).unwrap();

        let tags = vec![Tag::new("App", "x"), Tag::new("App", "x"), Tag::new("Name", "y")];
        let id = svc
            .spawn_process("MODULE", "SCHED", tags.clone(), Some("boot".into()))
            .await
            .unwrap();
        assert_eq!(id, "PROCESS_ID_789");

        let spawn = mock.calls().into_iter().find_map(|c| match c {
            Call::Spawn { params, wallet } => Some((params, wallet)),
            _ => None,
        });
        let (params, wallet) = spawn.unwrap();
        assert_eq!(wallet, with_wallet().wallet);
        assert_eq!(params.module, "MODULE");
        assert_eq!(params.scheduler, "SCHED");
        assert_eq!(params.tags, tags);
        assert_eq!(params.data.as_deref(), Some("boot"));
    }

    #[tokio::test]
    async fn send_message_returns_client_id() {
        let mock = Arc::new(MockAoClient::new().with_message(Ok("MSG_1".into())));
        let mut svc = service(&mock, with_wallet());
        svc.initialize(RuntimeHandle::default()).unwrap();
        let id = svc
            .send_message("PROC", "ping", vec![], Some("anchor-1".into()))
            .await
            .unwrap();
        assert_eq!(id, "MSG_1");
        assert!(mock.calls().contains(&Call::Message {
            params: MessageParams {
                process: "PROC".into(),
                data: "ping".into(),
                tags: vec![],
                anchor: Some("anchor-1".into()),
            },
            wallet: with_wallet().wallet,
        }));
    }

    #[tokio::test]
    async fn reads_pass_outcome_through() {
        let outcome = OutcomeRecord {
            output: json!({"status": "ok"}),
            messages: vec![json!({"Data": "1"})],
            spawns: vec![],
            error: None,
        };
        let mock = Arc::new(
            MockAoClient::new()
                .with_result(Ok(outcome.clone()))
                .with_dry_run(Ok(outcome.clone())),
        );
        let mut svc = service(&mock, InstanceConfig::default());
        svc.initialize(RuntimeHandle::default()).unwrap();

        assert_eq!(svc.read_result("PROC", "MSG").await.unwrap(), outcome);
        assert_eq!(svc.dry_run("PROC", "q", vec![], None).await.unwrap(), outcome);
        assert!(mock.calls().contains(&Call::Result(ResultParams {
            process: "PROC".into(),
            message: "MSG".into(),
        })));
    }

    #[tokio::test]
    async fn client_errors_surface_unmodified() {
        let raw = ClientError::Other("insufficient funds for fee".into());
        let mock = Arc::new(MockAoClient::new().with_spawn(Err(raw.clone())));
        let mut svc = service(&mock, InstanceConfig::default());
        svc.initialize(RuntimeHandle::default()).unwrap();
        match svc.spawn_process("m", "s", vec![], None).await {
            Err(AdapterError::Client(e)) => assert_eq!(e, raw),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
