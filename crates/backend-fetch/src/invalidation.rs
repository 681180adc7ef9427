//! Typed cache invalidation for views that depend on mutated resources.

use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fmt;

/// Resource families the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Categories,
    Meals,
    Orders,
    Payments,
    Users,
    Dashboard,
}

impl ResourceKind {
    /// View path segment for this kind.
    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Categories => "categories",
            ResourceKind::Meals => "meals",
            ResourceKind::Orders => "orders",
            ResourceKind::Payments => "payments",
            ResourceKind::Users => "users",
            ResourceKind::Dashboard => "dashboard",
        }
    }
}

/// Identifies one view: a resource list, or one item's detail.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidationKey {
    pub kind: ResourceKind,
    pub id: Option<String>,
}

impl InvalidationKey {
    /// The list view for `kind`.
    pub fn list(kind: ResourceKind) -> Self {
        Self { kind, id: None }
    }

    /// The detail view for item `id` of `kind`.
    pub fn detail(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }
}

/// Renders the view path, e.g. `/orders` or `/orders/abc123`.
impl fmt::Display for InvalidationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "/{}/{}", self.kind.segment(), id),
            None => write!(f, "/{}", self.kind.segment()),
        }
    }
}

/// Receives "this view is stale" signals after successful mutations.
pub trait Invalidator: Send + Sync {
    fn invalidate(&self, key: &InvalidationKey);
}

/// Invalidator for callers that keep no cached views.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl Invalidator for NoopInvalidator {
    fn invalidate(&self, _key: &InvalidationKey) {}
}

/// Records stale views until the caller re-fetches them.
#[derive(Debug, Default)]
pub struct StaleViews {
    stale: Mutex<BTreeSet<InvalidationKey>>,
}

impl StaleViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_stale(&self, key: &InvalidationKey) -> bool {
        self.stale.lock().contains(key)
    }

    /// All stale views, in a stable order.
    pub fn stale_keys(&self) -> Vec<InvalidationKey> {
        self.stale.lock().iter().cloned().collect()
    }

    /// Mark a view fresh after it was re-fetched. Returns whether it was stale.
    pub fn mark_fresh(&self, key: &InvalidationKey) -> bool {
        self.stale.lock().remove(key)
    }

    pub fn clear(&self) {
        self.stale.lock().clear();
    }
}

impl Invalidator for StaleViews {
    fn invalidate(&self, key: &InvalidationKey) {
        tracing::debug!(view = %key, "View marked stale");
        self.stale.lock().insert(key.clone());
    }
}
