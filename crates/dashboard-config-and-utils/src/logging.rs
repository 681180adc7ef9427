//! Logging initialization for the dashboard binaries.
//!
//! Thin wrapper over the observability crate: compact logs on stderr plus
//! structured JSONL under `<base>/logs/dashboard.jsonl`.

use crate::Paths;

/// Initialize the logging system.
///
/// # Arguments
///
/// * `service_name` - Written into the startup event of the log stream
/// * `level` - Default log level; `RUST_LOG` takes precedence when set
/// * `paths` - Where the JSONL log file lives; `None` skips file output
pub fn init_logging(service_name: &str, level: &str, paths: Option<&Paths>) {
    observability::init_with_config(observability::LogConfig {
        service_name: service_name.into(),
        default_level: level.into(),
        log_path: paths.map(Paths::log_file),
        write_file: paths.is_some(),
        also_stderr: true,
    });
}
