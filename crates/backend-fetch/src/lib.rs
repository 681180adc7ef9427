//! Session-scoped resource fetcher.
//!
//! Every dashboard view reads its data the same way: resolve the caller's
//! session, send one authenticated request to the backend, check the status,
//! parse the JSON. This crate is that path, once.
//!
//! # Architecture
//!
//! ```text
//! caller → Fetcher (session check → URL build → HttpTransport → status check → JSON)
//! ```
//!
//! # Behavior
//!
//! - **No session, no request**: a missing or invalid session fails with
//!   [`FetchError::NoSession`] before the transport is touched
//! - **Fresh reads**: every request carries `Cache-Control: no-store`
//! - **No retries**: failures surface to the caller immediately
//! - **Typed invalidation**: successful mutations mark dependent views stale
//!   through an [`Invalidator`], keyed by [`InvalidationKey`]

mod error;
mod fetcher;
mod invalidation;
mod request;
mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use error::{FetchError, FetchResult};
pub use fetcher::Fetcher;
pub use invalidation::{InvalidationKey, Invalidator, NoopInvalidator, ResourceKind, StaleViews};
pub use request::{Method, QueryParams, ResourceRequest};
pub use transport::{HttpTransport, OutboundRequest, ReqwestTransport, ResourceResponse};

pub use session_store::Session;
