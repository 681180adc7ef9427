//! Configuration, file system paths, and logging setup for the admin dashboard.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, BACKEND_URL_ENV, DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
