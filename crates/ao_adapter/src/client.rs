//! Seam to the external AO client library.
//!
//! Signing, transport and protocol details live behind this trait.

use crate::error::ClientError;
use crate::signer::Signer;
use crate::types::{
    ConnectOptions, DryRunParams, MessageParams, OutcomeRecord, ResultParams, SpawnParams,
};
use ao_config::WalletCredential;
use async_trait::async_trait;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[async_trait]
pub trait AoClient: Send + Sync {
    /// Apply connection parameters. Called once per adapter initialization.
    fn configure(&self, options: ConnectOptions) -> ClientResult<()>;

    /// Derive a signer from wallet material.
    fn create_signer(&self, wallet: &WalletCredential) -> ClientResult<Signer>;

    /// Spawn a process; returns its id.
    async fn spawn(&self, params: SpawnParams, signer: Option<&Signer>) -> ClientResult<String>;

    /// Send a message; returns its id.
    async fn message(&self, params: MessageParams, signer: Option<&Signer>) -> ClientResult<String>;

    async fn result(&self, params: ResultParams) -> ClientResult<OutcomeRecord>;

    async fn dry_run(&self, params: DryRunParams) -> ClientResult<OutcomeRecord>;
}
