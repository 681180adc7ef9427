//! Session credentials for authenticated backend access.
//!
//! A [`Session`] is owned by whatever signs the user in. Backend calls never
//! reach for it through global state: callers hold a [`SessionProvider`] and
//! pass the resolved session into each request explicitly.
//!
//! - [`StaticSessionProvider`]: a fixed session (or none), for tests and
//!   one-shot tools
//! - [`StoredSessionProvider`]: reads whatever a [`SessionStore`] holds
//! - [`MemorySessionStore`] / [`FileSessionStore`]: where sign-in puts it

mod error;
mod provider;
mod session;
mod store;

pub use error::{SessionError, SessionResult};
pub use provider::{SessionProvider, StaticSessionProvider, StoredSessionProvider};
pub use session::{Session, EXPIRY_SKEW_SECS};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
