use ao_adapter::http::{HttpAoClient, UNSUPPORTED_OPERATIONS};
use ao_adapter::{AoService, RuntimeHandle};
use ao_config::{InstanceConfig, PluginConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = PluginConfig::from_env()?;
    let client = HttpAoClient::new()?;
    warn!(
        unsupported = ?UNSUPPORTED_OPERATIONS,
        "HTTP CU client cannot sign; these operations will fail with ProtocolError"
    );
    let mut service = AoService::new(Arc::new(client), InstanceConfig::default(), Some(config));
    let agent = std::env::var("AO_AGENT_ID").unwrap_or_else(|_| "ao-gate".into());
    service.initialize(RuntimeHandle::new(agent))?;

    let state = ao_gate::AppState::new(service);
    let app = ao_gate::app(state.clone());

    let addr = std::env::var("AO_GATE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    state.service.write().await.stop();
    Ok(())
}
