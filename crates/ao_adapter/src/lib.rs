//! AO service adapter: lifecycle-gated access to AO process primitives.
//!
//! # Architecture
//!
//! ```text
//! caller (action handler / provider)
//!   │
//!   ▼
//! AoService  ── guard: lifecycle == Initialized, else NotInitialized
//!   │
//!   ▼  (external client: signing, transport, protocol)
//! dyn AoClient::{spawn, message, result, dry_run}
//!   │
//!   ▼
//! process id / message id / OutcomeRecord (opaque JSON)
//! ```
//!
//! Client failures come back as [`ClientError`] unmodified; mapping them to
//! user-facing error kinds is the caller's job.

pub mod client;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod service;
pub mod signer;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod types;

pub use client::AoClient;
pub use error::{AdapterError, ClientError};
pub use service::{AoService, Lifecycle, RuntimeHandle};
pub use signer::Signer;
pub use types::{ConnectOptions, OutcomeRecord, Tag};
