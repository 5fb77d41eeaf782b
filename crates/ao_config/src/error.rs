use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config: {key} is not a valid absolute URL ({value:?}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("config: {key} must be one of legacy|mainnet, got {value:?}")]
    InvalidMode { key: &'static str, value: String },

    #[error("config: {key} must be a positive integer of milliseconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
