//! Connection configuration for the AO process adapter.
//!
//! Two layers feed one [`ConnectionProfile`]:
//!
//! ```text
//! InstanceConfig (per adapter, optional strings)
//!   │  overrides
//!   ▼
//! PluginConfig (process-wide, loaded once from AO_* env vars)
//!   │
//!   ▼
//! resolve() → ConnectionProfile
//! ```
//!
//! Nothing here is global: the plugin config is built once at startup and
//! handed to whoever needs it.

pub mod env;
pub mod error;
pub mod mode;
pub mod profile;
pub mod wallet;

pub use env::PluginConfig;
pub use error::ConfigError;
pub use mode::Mode;
pub use profile::{resolve, ConnectionProfile, InstanceConfig};
pub use url::Url;
pub use wallet::WalletCredential;
