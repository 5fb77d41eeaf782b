//! HTTP client for the AO compute unit (CU).
//!
//! Covers the read side of the protocol, which needs no signing:
//! - `GET  {cu}/result/{message}?process-id={process}`
//! - `POST {cu}/dry-run?process-id={process}`
//!
//! Spawns and messages travel as signed data items to the message unit;
//! producing those belongs to a signing client, so this one reports them as
//! unsupported.

use crate::client::{AoClient, ClientResult};
use crate::error::ClientError;
use crate::signer::Signer;
use crate::types::{
    ConnectOptions, DryRunParams, MessageParams, OutcomeRecord, ResultParams, SpawnParams,
};
use ao_config::{Mode, Url, WalletCredential};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::RwLock;
use std::time::Duration;

pub const DEFAULT_CU_URL: &str = "https://cu.ao-testnet.xyz";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Operations this client always rejects with [`ClientError::Unsupported`].
pub const UNSUPPORTED_OPERATIONS: &[&str] = &[SPAWN, MESSAGE];

const SPAWN: &str = "spawn";
const MESSAGE: &str = "message";

/// Placeholder owner/id for dry runs; the CU never persists them.
const DRY_RUN_PLACEHOLDER: &str = "1234";

#[derive(Clone)]
struct Connection {
    http: reqwest::Client,
    cu_url: Url,
    mode: Mode,
}

pub struct HttpAoClient {
    conn: RwLock<Connection>,
}

impl HttpAoClient {
    pub fn new() -> ClientResult<Self> {
        let conn = connect(&ConnectOptions::default())?;
        Ok(Self {
            conn: RwLock::new(conn),
        })
    }

    fn connection(&self) -> ClientResult<Connection> {
        self.conn
            .read()
            .map(|c| c.clone())
            .map_err(|_| ClientError::Other("connection state poisoned".into()))
    }

    pub fn mode(&self) -> ClientResult<Mode> {
        Ok(self.connection()?.mode)
    }
}

fn connect(options: &ConnectOptions) -> ClientResult<Connection> {
    let timeout = Duration::from_millis(options.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS));
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    let cu_url = match &options.cu_url {
        Some(url) => url.clone(),
        None => Url::parse(DEFAULT_CU_URL).map_err(|e| ClientError::Other(e.to_string()))?,
    };
    Ok(Connection {
        http,
        cu_url,
        mode: options.mode.unwrap_or_default(),
    })
}

fn endpoint(base: &Url, segments: &[&str], process: &str) -> ClientResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::Other(format!("cannot use {base} as a base URL")))?
        .pop_if_empty()
        .extend(segments);
    url.query_pairs_mut().append_pair("process-id", process);
    Ok(url)
}

async fn read_outcome(resp: reqwest::Response) -> ClientResult<OutcomeRecord> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    resp.json::<OutcomeRecord>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

pub(crate) fn dry_run_body(params: &DryRunParams) -> Value {
    json!({
        "Id": DRY_RUN_PLACEHOLDER,
        "Target": params.process,
        "Owner": DRY_RUN_PLACEHOLDER,
        "Anchor": params.anchor.as_deref().unwrap_or("0"),
        "Data": params.data,
        "Tags": params.tags,
    })
}

#[async_trait]
impl AoClient for HttpAoClient {
    fn configure(&self, options: ConnectOptions) -> ClientResult<()> {
        let conn = connect(&options)?;
        tracing::debug!(cu = %conn.cu_url, mode = %conn.mode, "CU client configured");
        let mut guard = self
            .conn
            .write()
            .map_err(|_| ClientError::Other("connection state poisoned".into()))?;
        *guard = conn;
        Ok(())
    }

    fn create_signer(&self, wallet: &WalletCredential) -> ClientResult<Signer> {
        let parsed: Value = serde_json::from_str(wallet.expose())
            .map_err(|e| ClientError::InvalidWallet(e.to_string()))?;
        if !parsed.is_object() {
            return Err(ClientError::InvalidWallet("expected a JSON key object".into()));
        }
        Ok(Signer::from_wallet(wallet.clone()))
    }

    async fn spawn(
        &self,
        _params: SpawnParams,
        _signer: Option<&Signer>,
    ) -> ClientResult<String> {
        Err(ClientError::Unsupported { operation: SPAWN })
    }

    async fn message(
        &self,
        _params: MessageParams,
        _signer: Option<&Signer>,
    ) -> ClientResult<String> {
        Err(ClientError::Unsupported { operation: MESSAGE })
    }

    async fn result(&self, params: ResultParams) -> ClientResult<OutcomeRecord> {
        let conn = self.connection()?;
        let url = endpoint(&conn.cu_url, &["result", &params.message], &params.process)?;
        let resp = conn
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_outcome(resp).await
    }

    async fn dry_run(&self, params: DryRunParams) -> ClientResult<OutcomeRecord> {
        let conn = self.connection()?;
        let url = endpoint(&conn.cu_url, &["dry-run"], &params.process)?;
        let resp = conn
            .http
            .post(url)
            .json(&dry_run_body(&params))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_outcome(resp).await
    }
}
