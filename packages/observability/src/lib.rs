//! # Observability
//!
//! Logging setup for the admin dashboard binaries.
//!
//! Library crates only use `tracing` macros. Binaries call
//! [`init_with_config`] once at startup to decide where events go:
//!
//! - a compact, human-readable stream on stderr, and/or
//! - structured JSONL appended to a log file
//!   (`~/.admin-dashboard/logs/dashboard.jsonl` by default).
//!
//! The level filter comes from `RUST_LOG` when set, otherwise from
//! [`LogConfig::default_level`].
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "admin-dashboard".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!     tracing::info!("ready");
//! }
//! ```

mod file_writer;

pub use file_writer::LogFileWriter;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service, written once at startup so log files shared by
    /// several tools stay attributable.
    pub service_name: String,

    /// Default log level filter (e.g., "debug", "info", "warn").
    /// Overridden by the `RUST_LOG` environment variable.
    pub default_level: String,

    /// JSONL log file. `None` uses the default location.
    pub log_path: Option<PathBuf>,

    /// Write JSONL events to the log file.
    pub write_file: bool,

    /// Also emit compact logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            write_file: true,
            also_stderr: false,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_level))
    }

    fn resolved_log_path(&self) -> Option<PathBuf> {
        if !self.write_file {
            return None;
        }
        self.log_path.clone().or_else(file_writer::default_log_path)
    }
}

/// Initialize logging with custom configuration.
///
/// Returns `false` when a global subscriber was already installed (for
/// example by an earlier call in the same process); the existing one stays.
pub fn init_with_config(config: LogConfig) -> bool {
    let log_path = config.resolved_log_path();

    let file_layer = match log_path.as_deref().map(LogFileWriter::new) {
        Some(Ok(writer)) => Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(writer)
                .with_filter(config.env_filter()),
        ),
        Some(Err(err)) => {
            eprintln!("observability: log file unavailable, skipping file output: {err}");
            None
        }
        None => None,
    };

    let stderr_layer = if config.also_stderr {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_filter(config.env_filter()),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            log_path = ?log_path,
            "observability initialized"
        );
    }

    installed
}
