use ao_config::ConfigError;
use thiserror::Error;

/// Failures reported by the external AO client.
///
/// Display text is what error normalization classifies on, so keep the
/// wording of each variant stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("network request failed: {0}")]
    Transport(String),

    #[error("unit responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid wallet: {0}")]
    InvalidWallet(String),

    #[error("{operation} is not supported by this client")]
    Unsupported { operation: &'static str },

    /// Raw message from an external library, passed through verbatim.
    #[error("{0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("AO service not initialized")]
    NotInitialized,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to derive signer: {0}")]
    Signer(ClientError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, AdapterError>;
