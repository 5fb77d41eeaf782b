//! In-memory [`AoClient`] for tests: records every call, replies from fixtures.

use crate::client::{AoClient, ClientResult};
use crate::error::ClientError;
use crate::signer::Signer;
use crate::types::{
    ConnectOptions, DryRunParams, MessageParams, OutcomeRecord, ResultParams, SpawnParams,
};
use ao_config::WalletCredential;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Configure(ConnectOptions),
    CreateSigner,
    /// `wallet` is the credential carried by the signer handed to the client.
    Spawn {
        params: SpawnParams,
        wallet: Option<WalletCredential>,
    },
    Message {
        params: MessageParams,
        wallet: Option<WalletCredential>,
    },
    Result(ResultParams),
    DryRun(DryRunParams),
}

impl Call {
    /// True for calls that would reach the network.
    pub fn is_network(&self) -> bool {
        !matches!(self, Call::Configure(_) | Call::CreateSigner)
    }
}

pub struct MockAoClient {
    calls: Mutex<Vec<Call>>,
    spawn_reply: Mutex<ClientResult<String>>,
    message_reply: Mutex<ClientResult<String>>,
    result_reply: Mutex<ClientResult<OutcomeRecord>>,
    dry_run_reply: Mutex<ClientResult<OutcomeRecord>>,
    signer_error: Mutex<Option<ClientError>>,
    configure_error: Mutex<Option<ClientError>>,
}

impl Default for MockAoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAoClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            spawn_reply: Mutex::new(Ok("PROCESS_ID".into())),
            message_reply: Mutex::new(Ok("MESSAGE_ID".into())),
            result_reply: Mutex::new(Ok(OutcomeRecord::default())),
            dry_run_reply: Mutex::new(Ok(OutcomeRecord::default())),
            signer_error: Mutex::new(None),
            configure_error: Mutex::new(None),
        }
    }

    pub fn with_spawn(self, reply: ClientResult<String>) -> Self {
        *self.spawn_reply.lock().expect("mock lock") = reply;
        self
    }

    pub fn with_message(self, reply: ClientResult<String>) -> Self {
        *self.message_reply.lock().expect("mock lock") = reply;
        self
    }

    pub fn with_result(self, reply: ClientResult<OutcomeRecord>) -> Self {
        *self.result_reply.lock().expect("mock lock") = reply;
        self
    }

    pub fn with_dry_run(self, reply: ClientResult<OutcomeRecord>) -> Self {
        *self.dry_run_reply.lock().expect("mock lock") = reply;
        self
    }

    pub fn failing_signer(self, err: ClientError) -> Self {
        *self.signer_error.lock().expect("mock lock") = Some(err);
        self
    }

    pub fn failing_configure(self, err: ClientError) -> Self {
        *self.configure_error.lock().expect("mock lock") = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("mock lock").clone()
    }

    pub fn network_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_network()).count()
    }

    pub fn configured(&self) -> Vec<ConnectOptions> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Configure(opts) => Some(opts),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("mock lock").push(call);
    }
}

#[async_trait]
impl AoClient for MockAoClient {
    fn configure(&self, options: ConnectOptions) -> ClientResult<()> {
        self.record(Call::Configure(options));
        match self.configure_error.lock().expect("mock lock").clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_signer(&self, wallet: &WalletCredential) -> ClientResult<Signer> {
        self.record(Call::CreateSigner);
        match self.signer_error.lock().expect("mock lock").clone() {
            Some(err) => Err(err),
            None => Ok(Signer::from_wallet(wallet.clone())),
        }
    }

    async fn spawn(&self, params: SpawnParams, signer: Option<&Signer>) -> ClientResult<String> {
        self.record(Call::Spawn {
            params,
            wallet: signer.map(|s| s.wallet().clone()),
        });
        self.spawn_reply.lock().expect("mock lock").clone()
    }

    async fn message(
        &self,
        params: MessageParams,
        signer: Option<&Signer>,
    ) -> ClientResult<String> {
        self.record(Call::Message {
            params,
            wallet: signer.map(|s| s.wallet().clone()),
        });
        self.message_reply.lock().expect("mock lock").clone()
    }

    async fn result(&self, params: ResultParams) -> ClientResult<OutcomeRecord> {
        self.record(Call::Result(params));
        self.result_reply.lock().expect("mock lock").clone()
    }

    async fn dry_run(&self, params: DryRunParams) -> ClientResult<OutcomeRecord> {
        self.record(Call::DryRun(params));
        self.dry_run_reply.lock().expect("mock lock").clone()
    }
}
