//! Command execution.

use std::sync::Arc;

use backend_fetch::{Fetcher, StaleViews};
use dashboard_api::{DashboardApi, PageRequest};
use dashboard_config_and_utils::{Config, Paths};
use serde::Serialize;
use serde_json::json;
use session_store::{FileSessionStore, Session, SessionStore, StoredSessionProvider};
use tracing::info;

use crate::{BackendCommand, Commands};

type AppResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn run(command: Commands, config: &Config, paths: &Paths) -> AppResult<()> {
    let store = FileSessionStore::new(paths.session_file());

    match command {
        Commands::Login {
            token,
            expires_at,
            user_id,
            email,
        } => login(&store, token, expires_at, user_id, email),
        Commands::Logout => {
            if store.clear()? {
                info!("Session removed");
                println!("Logged out");
            } else {
                println!("No stored session");
            }
            Ok(())
        }
        Commands::Whoami => whoami(&store),
        Commands::SetBackend { url } => set_backend(paths, url),
        Commands::Backend(command) => {
            let views = Arc::new(StaleViews::new());
            let api = DashboardApi::new(
                Fetcher::with_reqwest(config.backend_url()?),
                Arc::new(StoredSessionProvider::new(store)),
            )
            .with_invalidator(views.clone());
            fetch(command, &api, &views).await
        }
    }
}

async fn fetch(command: BackendCommand, api: &DashboardApi, views: &StaleViews) -> AppResult<()> {
    match command {
        BackendCommand::Categories => print_json(&api.list_categories().await?),
        BackendCommand::Meals => print_json(&api.list_meals().await?),
        BackendCommand::Orders { page, limit } => {
            print_json(&api.list_orders(PageRequest::new(page, limit)).await?)
        }
        BackendCommand::Order { id } => print_json(&api.get_order(&id).await?),
        BackendCommand::SetStatus { id, status } => {
            let answer = api.update_order_status(&id, &status).await?;
            let stale: Vec<String> = views.stale_keys().iter().map(ToString::to_string).collect();
            info!(order_id = %id, %status, stale = ?stale, "Order status updated");
            print_json(&answer)
        }
        BackendCommand::Overview => print_json(&api.dashboard_overview().await?),
        BackendCommand::Users => print_json(&api.list_users().await?),
    }
}

/// Persist the backend URL. Only the file's own values are written back,
/// never environment overrides.
fn set_backend(paths: &Paths, url: String) -> AppResult<()> {
    let config_file = paths.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file)?
    } else {
        Config::default()
    };
    config.backend_endpoint_url = Some(url);
    let parsed = config.backend_url()?;

    config.save(paths)?;
    println!("Backend set to {parsed}");
    Ok(())
}

fn login(
    store: &FileSessionStore,
    token: String,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
    user_id: Option<String>,
    email: Option<String>,
) -> AppResult<()> {
    let mut session = Session::new(token);
    if let Some(expires_at) = expires_at {
        session = session.with_expiry(expires_at);
    }
    if let Some(user_id) = user_id {
        session = session.with_user(user_id, email);
    } else {
        session.email = email;
    }

    if !session.is_valid() {
        return Err("session token is blank or already expired".into());
    }

    store.save(&session)?;
    info!(path = %store.path().display(), "Session stored");
    println!("Logged in");
    Ok(())
}

fn whoami(store: &FileSessionStore) -> AppResult<()> {
    match store.load()? {
        Some(session) => print_json(&json!({
            "user_id": session.user_id,
            "email": session.email,
            "expires_at": session.expires_at,
            "valid": session.is_valid(),
        })),
        None => {
            println!("Not logged in");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
