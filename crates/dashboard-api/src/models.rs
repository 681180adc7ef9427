//! Typed views of the backend's JSON.
//!
//! Each model names the fields the dashboard relies on and keeps every other
//! field in `extra`, so a payload survives the trip to the view intact.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// A record's id.
///
/// Read from `_id` or `id` (string or number; `_id` wins when both are
/// present), written back as `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRecordId")]
pub struct RecordId {
    id: String,
}

#[derive(Deserialize)]
struct RawRecordId {
    #[serde(rename = "_id", default)]
    mongo_id: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

impl TryFrom<RawRecordId> for RecordId {
    type Error = String;

    fn try_from(raw: RawRecordId) -> Result<Self, Self::Error> {
        match raw.mongo_id.or(raw.id) {
            Some(Value::String(id)) => Ok(Self { id }),
            Some(Value::Number(n)) => Ok(Self { id: n.to_string() }),
            Some(other) => Err(format!("expected a string or number id, got {other}")),
            None => Err("missing field `id` or `_id`".to_string()),
        }
    }
}

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.id == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.id == *other
    }
}

/// A meal category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A meal (served by the backend's recipes endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(flatten)]
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Order lifecycle status.
///
/// Parsing is case-insensitive; the wire form is always lowercase. Values the
/// dashboard has no name for are kept in [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }
}

/// Order status was blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("order status must not be empty")]
pub struct ParseOrderStatusError;

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "" => return Err(ParseOrderStatusError),
            "pending" => OrderStatus::Pending,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(normalized),
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Headline numbers for the dashboard landing view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_orders: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_meals: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_orders: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A dashboard user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_status_parse_is_case_insensitive() {
        assert_eq!("Shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" PENDING ".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert_eq!(
            "Refunded".parse::<OrderStatus>().unwrap(),
            OrderStatus::Other("refunded".to_string())
        );
        assert_eq!("  ".parse::<OrderStatus>(), Err(ParseOrderStatusError));
    }

    #[test]
    fn test_order_status_wire_form_is_lowercase() {
        let status: OrderStatus = "Delivered".parse().unwrap();
        assert_eq!(serde_json::to_value(&status).unwrap(), json!("delivered"));

        let parsed: OrderStatus = serde_json::from_value(json!("PROCESSING")).unwrap();
        assert_eq!(parsed, OrderStatus::Processing);
    }

    #[test]
    fn test_category_accepts_mongo_style_id_and_keeps_extra() {
        let category: Category = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Soups",
            "slug": "soups",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(category.id, "c1");
        assert_eq!(category.name, "Soups");
        assert!(category.description.is_none());
        assert_eq!(category.extra.get("slug"), Some(&json!("soups")));
        assert_eq!(
            category.extra.get("createdAt"),
            Some(&json!("2024-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let user: User = serde_json::from_value(json!({ "id": 42, "email": "a@b.c" })).unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_both_id_fields_prefer_mongo_id() {
        let order: Order = serde_json::from_value(json!({
            "_id": "abc",
            "id": "abc",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(order.id, "abc");
        assert!(order.extra.is_empty());

        let user: User =
            serde_json::from_value(json!({ "_id": "m-1", "id": "virtual-1" })).unwrap();
        assert_eq!(user.id, "m-1");
    }

    #[test]
    fn test_id_is_written_back_as_id() {
        let category: Category =
            serde_json::from_value(json!({ "_id": "c1", "id": "c1", "name": "Soups" })).unwrap();
        let value = serde_json::to_value(&category).unwrap();

        assert_eq!(value["id"], "c1");
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_non_scalar_id_is_rejected() {
        let result: Result<User, _> = serde_json::from_value(json!({ "_id": { "$oid": "x" } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<Meal, _> = serde_json::from_value(json!({ "name": "Pho" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_order_fields() {
        let order: Order = serde_json::from_value(json!({
            "_id": "abc123",
            "status": "Pending",
            "totalAmount": 25,
            "items": [{ "name": "Pho", "quantity": 2, "price": 12.5, "mealId": "m1" }],
            "createdAt": "2024-03-01T10:00:00Z",
            "user": { "name": "Ana" }
        }))
        .unwrap();

        assert_eq!(order.id, "abc123");
        assert_eq!(order.status, Some(OrderStatus::Pending));
        assert_eq!(order.total_amount, Some(25.0));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, Some(2));
        assert_eq!(order.items[0].extra.get("mealId"), Some(&json!("m1")));
        assert_eq!(order.extra.get("user"), Some(&json!({ "name": "Ana" })));
    }

    #[test]
    fn test_overview_tolerates_partial_payload() {
        let overview: DashboardOverview =
            serde_json::from_value(json!({ "totalOrders": 7, "topMeal": "Pho" })).unwrap();
        assert_eq!(overview.total_orders, Some(7));
        assert!(overview.total_revenue.is_none());
        assert_eq!(overview.extra.get("topMeal"), Some(&json!("Pho")));
    }
}
