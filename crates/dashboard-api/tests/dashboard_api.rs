//! Dashboard operations against a scripted transport.

use backend_fetch::testing::RecordingTransport;
use backend_fetch::{FetchError, Fetcher, InvalidationKey, Method, ResourceKind, StaleViews};
use dashboard_api::{DashboardApi, OrderStatus, PageRequest};
use serde_json::json;
use session_store::{
    Session, SessionError, SessionProvider, SessionResult, StaticSessionProvider,
};
use std::sync::Arc;
use url::Url;

struct Harness {
    transport: Arc<RecordingTransport>,
    views: Arc<StaleViews>,
    api: DashboardApi,
}

impl Harness {
    fn signed_in() -> Self {
        Self::with_provider(StaticSessionProvider::new(Session::new("tok-admin")))
    }

    fn anonymous() -> Self {
        Self::with_provider(StaticSessionProvider::anonymous())
    }

    fn with_provider(provider: StaticSessionProvider) -> Self {
        let transport = Arc::new(RecordingTransport::new());
        let views = Arc::new(StaleViews::new());
        let base_url = Url::parse("http://backend.test").unwrap();
        let api = DashboardApi::new(Fetcher::new(base_url, transport.clone()), Arc::new(provider))
            .with_invalidator(views.clone());
        Self {
            transport,
            views,
            api,
        }
    }
}

#[tokio::test]
async fn no_session_makes_no_request() {
    let h = Harness::anonymous();

    let err = h.api.list_categories().await.unwrap_err();
    assert!(matches!(err, FetchError::NoSession));

    let err = h
        .api
        .update_order_status("abc123", &OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NoSession));

    assert_eq!(h.transport.call_count(), 0);
    assert!(h.views.stale_keys().is_empty());
}

#[tokio::test]
async fn orders_page_two() {
    let h = Harness::signed_in();
    let orders: Vec<_> = (11..=15)
        .map(|n| json!({ "_id": format!("o{n}"), "status": "pending" }))
        .collect();
    h.transport.respond_json(
        200,
        &json!({
            "data": orders,
            "pagination": { "total": 15, "currentPage": 2, "totalPages": 2 }
        }),
    );

    let page = h.api.list_orders(PageRequest::new(2, 10)).await.unwrap();

    assert_eq!(page.pagination.current_page, 2);
    assert!(page.data.len() <= 10);
    assert_eq!(page.data[0].id, "o11");

    let sent = h.transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url.path(), "/api/orders/all");
    assert_eq!(sent.url.query(), Some("page=2&limit=10"));
    assert_eq!(sent.header("authorization"), Some("Bearer tok-admin"));
}

#[tokio::test]
async fn shipping_an_order_marks_views_stale() {
    let h = Harness::signed_in();
    h.transport
        .respond_json(200, &json!({ "_id": "abc123", "status": "shipped" }));

    let status: OrderStatus = "Shipped".parse().unwrap();
    let answer = h.api.update_order_status("abc123", &status).await.unwrap();
    assert_eq!(answer["status"], "shipped");

    let sent = h.transport.last_request().unwrap();
    assert_eq!(sent.method, Method::Put);
    assert_eq!(sent.url.path(), "/api/orders/abc123/status");
    assert_eq!(sent.body, Some(json!({ "status": "shipped" })));

    let stale: Vec<String> = h
        .views
        .stale_keys()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert!(stale.contains(&"/orders".to_string()));
    assert!(stale.contains(&"/orders/abc123".to_string()));
    assert!(h
        .views
        .is_stale(&InvalidationKey::list(ResourceKind::Dashboard)));
}

#[tokio::test]
async fn failed_status_update_keeps_views_fresh() {
    let h = Harness::signed_in();
    h.transport
        .respond_json(404, &json!({ "message": "Order not found" }));

    let err = h
        .api
        .update_order_status("missing", &OrderStatus::Delivered)
        .await
        .unwrap_err();

    match err {
        FetchError::Backend { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Order not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(h.views.stale_keys().is_empty());
}

#[tokio::test]
async fn blank_order_id_is_rejected_locally() {
    let h = Harness::signed_in();

    let err = h.api.get_order("   ").await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidRequest(_)));
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn order_id_is_one_path_segment() {
    let h = Harness::signed_in();
    h.transport.respond_json(200, &json!({ "_id": "a/b" }));

    let order = h.api.get_order("a/b").await.unwrap();
    assert_eq!(order.id, "a/b");

    let sent = h.transport.last_request().unwrap();
    assert_eq!(sent.url.path(), "/api/orders/a%2Fb");
}

#[tokio::test]
async fn dot_segment_order_ids_never_leave_the_orders_path() {
    let h = Harness::signed_in();

    for id in [".", ".."] {
        let err = h.api.get_order(id).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)), "get {id:?}");

        let err = h
            .api
            .update_order_status(id, &OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)), "update {id:?}");
    }

    assert_eq!(h.transport.call_count(), 0);
    assert!(h.views.stale_keys().is_empty());
}

#[tokio::test]
async fn missing_session_wins_over_bad_order_id() {
    let h = Harness::anonymous();

    let err = h.api.get_order(" ").await.unwrap_err();
    assert!(matches!(err, FetchError::NoSession));

    let err = h
        .api
        .update_order_status("..", &OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NoSession));
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn expired_session_is_no_session() {
    let expired = Session::new("old").with_expiry(chrono::Utc::now() - chrono::Duration::hours(1));
    let h = Harness::with_provider(StaticSessionProvider::new(expired));

    let err = h.api.get_order("abc123").await.unwrap_err();
    assert!(matches!(err, FetchError::NoSession));
    assert_eq!(h.transport.call_count(), 0);
}

#[tokio::test]
async fn repeated_reads_return_equal_payloads() {
    let overview = json!({ "totalOrders": 3, "totalRevenue": 42.5, "topMeal": "Pho" });
    let transport = Arc::new(RecordingTransport::with_handler(move |_| {
        Ok(backend_fetch::ResourceResponse::new(200, overview.to_string()))
    }));
    let api = DashboardApi::new(
        Fetcher::new(Url::parse("http://backend.test").unwrap(), transport.clone()),
        Arc::new(StaticSessionProvider::new(Session::new("tok"))),
    );

    let first = api.dashboard_overview().await.unwrap();
    let second = api.dashboard_overview().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total_orders, Some(3));
    assert_eq!(transport.call_count(), 2);
    for sent in transport.requests() {
        assert_eq!(sent.url.path(), "/api/dashboard/overview");
        assert_eq!(sent.header("cache-control"), Some("no-store"));
    }
}

#[tokio::test]
async fn lists_accept_bare_and_enveloped_bodies() {
    let h = Harness::signed_in();
    h.transport
        .respond_json(200, &json!([{ "_id": "c1", "name": "Soups" }]));
    h.transport.respond_json(
        200,
        &json!({ "data": [{ "_id": "m1", "name": "Pho", "price": 9.5 }] }),
    );
    h.transport
        .respond_json(200, &json!([{ "_id": "u1", "email": "admin@example.com" }]));

    let categories = h.api.list_categories().await.unwrap();
    let meals = h.api.list_meals().await.unwrap();
    let users = h.api.list_users().await.unwrap();

    assert_eq!(categories[0].name, "Soups");
    assert_eq!(meals[0].price, Some(9.5));
    assert_eq!(users[0].email.as_deref(), Some("admin@example.com"));

    let paths: Vec<String> = h
        .transport
        .requests()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/api/categories", "/api/recipes", "/api/users/"]);
}

#[tokio::test]
async fn unexpected_shape_is_a_parse_error() {
    let h = Harness::signed_in();
    h.transport.respond_json(200, &json!({ "items": [] }));

    let err = h.api.list_categories().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn transport_failure_surfaces_unchanged() {
    let h = Harness::signed_in();
    h.transport.fail("connection refused");

    let err = h.api.list_users().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(msg) if msg == "connection refused"));
}

struct BrokenProvider;

#[async_trait::async_trait]
impl SessionProvider for BrokenProvider {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        Err(SessionError::Unavailable("identity provider offline".to_string()))
    }
}

#[tokio::test]
async fn provider_failure_is_a_session_error() {
    let transport = Arc::new(RecordingTransport::new());
    let api = DashboardApi::new(
        Fetcher::new(Url::parse("http://backend.test").unwrap(), transport.clone()),
        Arc::new(BrokenProvider),
    );

    let err = api.list_meals().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Session(SessionError::Unavailable(_))
    ));
    assert_eq!(transport.call_count(), 0);
}
