//! The dashboard's backend operations.

use crate::envelope::{ListPayload, Page, PageRequest};
use crate::models::{Category, DashboardOverview, Meal, Order, OrderStatus, User};
use backend_fetch::{
    FetchError, FetchResult, Fetcher, InvalidationKey, Invalidator, NoopInvalidator, ResourceKind,
    ResourceRequest,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use session_store::{Session, SessionProvider};
use std::sync::Arc;
use tracing::debug;

pub const CATEGORIES_PATH: &str = "/api/categories";
/// Meals are served from the backend's recipes collection.
pub const MEALS_PATH: &str = "/api/recipes";
pub const ORDERS_PATH: &str = "/api/orders";
pub const ORDERS_LIST_PATH: &str = "/api/orders/all";
pub const DASHBOARD_OVERVIEW_PATH: &str = "/api/dashboard/overview";
pub const USERS_PATH: &str = "/api/users/";

/// Typed access to the admin resources for whoever the session provider says
/// is signed in.
#[derive(Clone)]
pub struct DashboardApi {
    fetcher: Fetcher,
    sessions: Arc<dyn SessionProvider>,
    invalidator: Arc<dyn Invalidator>,
}

impl DashboardApi {
    /// API without cached views; mutations invalidate nothing observable.
    pub fn new(fetcher: Fetcher, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            fetcher,
            sessions,
            invalidator: Arc::new(NoopInvalidator),
        }
    }

    /// Report stale views to `invalidator` after successful mutations.
    pub fn with_invalidator(mut self, invalidator: Arc<dyn Invalidator>) -> Self {
        self.invalidator = invalidator;
        self
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub async fn list_categories(&self) -> FetchResult<Vec<Category>> {
        self.list(CATEGORIES_PATH).await
    }

    pub async fn list_meals(&self) -> FetchResult<Vec<Meal>> {
        self.list(MEALS_PATH).await
    }

    /// One page of orders, newest first as the backend orders them.
    pub async fn list_orders(&self, page: PageRequest) -> FetchResult<Page<Order>> {
        let session = self.session().await?;
        let request = ResourceRequest::get(ORDERS_LIST_PATH)
            .query("page", page.page())
            .query("limit", page.limit());
        self.fetcher.fetch(Some(&session), &request).await
    }

    pub async fn get_order(&self, id: &str) -> FetchResult<Order> {
        let session = self.session().await?;
        let request = ResourceRequest::get(order_path(id)?);
        self.fetcher.fetch(Some(&session), &request).await
    }

    /// Set an order's status.
    ///
    /// On success the order list, this order's detail and the dashboard
    /// overview are reported stale before the backend's answer is returned.
    pub async fn update_order_status(&self, id: &str, status: &OrderStatus) -> FetchResult<Value> {
        let session = self.session().await?;
        let id = id.trim();
        let path = format!("{}/status", order_path(id)?);
        let request = ResourceRequest::put(path).json(&json!({ "status": status.as_str() }))?;

        let invalidates = [
            InvalidationKey::list(ResourceKind::Orders),
            InvalidationKey::detail(ResourceKind::Orders, id),
            InvalidationKey::list(ResourceKind::Dashboard),
        ];
        self.fetcher
            .send_mutation(
                Some(&session),
                &request,
                &invalidates,
                self.invalidator.as_ref(),
            )
            .await
    }

    pub async fn dashboard_overview(&self) -> FetchResult<DashboardOverview> {
        self.get(DASHBOARD_OVERVIEW_PATH).await
    }

    pub async fn list_users(&self) -> FetchResult<Vec<User>> {
        self.list(USERS_PATH).await
    }

    /// The caller's session, checked before any request is built.
    async fn session(&self) -> FetchResult<Session> {
        match self.sessions.current_session().await? {
            Some(session) if session.is_valid() => Ok(session),
            _ => {
                debug!("No valid session for dashboard call");
                Err(FetchError::NoSession)
            }
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> FetchResult<T> {
        let session = self.session().await?;
        self.fetcher
            .fetch(Some(&session), &ResourceRequest::get(path))
            .await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> FetchResult<Vec<T>> {
        let payload: ListPayload<T> = self.get(path).await?;
        let items = payload.into_vec();
        debug!(path, count = items.len(), "Fetched list");
        Ok(items)
    }
}

/// `/api/orders/{id}` with `id` as one encoded path segment.
///
/// `.` and `..` survive percent-encoding and would be resolved as
/// dot-segments, so they are rejected along with blank ids.
fn order_path(id: &str) -> FetchResult<String> {
    let id = id.trim();
    match id {
        "" => Err(FetchError::InvalidRequest("order id is empty".to_string())),
        "." | ".." => Err(FetchError::InvalidRequest(format!(
            "order id {id:?} is not a path segment"
        ))),
        _ => Ok(format!("{ORDERS_PATH}/{}", urlencoding::encode(id))),
    }
}
