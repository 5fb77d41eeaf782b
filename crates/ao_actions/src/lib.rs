//! Host-facing AO actions and providers.
//!
//! ```text
//! untrusted JSON ──parse──▶ typed request ──▶ AoService op ──▶ outcome
//!        │ (ValidationError)                     │ (AdapterError)
//!        ▼                                       ▼
//!   validate() = false                 normalize() → AoError
//!                                                │
//!                                                ▼
//!                              ActionResponse { success, text, data }
//! ```

pub mod actions;
pub mod envelope;
pub mod error;
pub mod format;
pub mod providers;
pub mod request;
pub mod status;

pub use actions::{execute, Action, ActionRegistry};
pub use envelope::ActionResponse;
pub use error::{classify, normalize, AoError, ErrorKind};
pub use format::format_outcome;
pub use providers::{default_providers, Provider, ProviderResult};
pub use request::{OperationKind, OperationRequest, ValidationError};
pub use status::StatusSnapshot;
