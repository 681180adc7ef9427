//! Admin dashboard command-line entry points.

mod app;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dashboard_api::OrderStatus;
use dashboard_config_and_utils::{init_logging, Config, Paths, BACKEND_URL_ENV};

/// Admin dashboard command-line interface.
#[derive(Debug, Parser)]
#[command(name = "admin-dashboard")]
#[command(about = "Read and manage the restaurant admin dashboard from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Base directory for config, session and logs. Defaults to ~/.admin-dashboard
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Backend API base URL
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    backend_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Backend(BackendCommand),
    /// Save the backend API base URL to the config file
    SetBackend { url: String },
    /// Store a session token for later commands
    Login {
        /// Bearer token issued by the identity provider
        #[arg(long, env = "ADMIN_DASHBOARD_TOKEN", hide_env_values = true)]
        token: String,
        /// Token expiry (RFC 3339)
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
}

/// Commands that call the backend with the stored session.
#[derive(Debug, Subcommand)]
enum BackendCommand {
    /// List meal categories
    Categories,
    /// List meals
    Meals,
    /// List one page of orders
    Orders {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one order
    Order { id: String },
    /// Change an order's status
    SetStatus { id: String, status: OrderStatus },
    /// Show the dashboard overview numbers
    Overview,
    /// List users
    Users,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let mut config = Config::load(&paths)?;
    if let Some(url) = cli.backend_url {
        config.backend_endpoint_url = Some(url);
    }

    let level = cli.log_level.unwrap_or_else(|| config.log_level.clone());
    init_logging("admin-dashboard", &level, Some(&paths));

    app::run(cli.command, &config, &paths).await
}
