//! Admin dashboard resources: categories, meals, orders, the overview, and
//! users.
//!
//! [`DashboardApi`] is what a dashboard view calls. Each operation resolves
//! the session from the injected provider, sends one request through
//! [`backend_fetch::Fetcher`], and parses the answer into the typed models in
//! [`models`]. Order status updates mark the order list, the order detail,
//! and the overview stale.

mod api;
mod envelope;
pub mod models;

pub use api::{
    DashboardApi, CATEGORIES_PATH, DASHBOARD_OVERVIEW_PATH, MEALS_PATH, ORDERS_LIST_PATH,
    ORDERS_PATH, USERS_PATH,
};
pub use envelope::{ListPayload, Page, PageRequest, Pagination};
pub use models::{
    Category, DashboardOverview, Meal, Order, OrderItem, OrderStatus, ParseOrderStatusError,
    RecordId, User,
};
