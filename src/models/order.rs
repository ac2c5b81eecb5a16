use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};
use crate::error::RepoError;

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    /// Wire representation, also used as filter text.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A customer order visible on the orders page.
///
/// The status-filtered views of this collection double as the order
/// reports; there is no separate report record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_cents: i64,
    #[serde(default = "Utc::now")]
    pub placed_at: DateTime<Utc>,
}

/// Input payload for creating or editing an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_id: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_cents: i64,
}

impl Entity for Order {
    type Draft = OrderDraft;

    const COLLECTION: &'static str = "orders";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["id", "customerId"]
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "customerId" => Some(self.customer_id.clone()),
            "status" => Some(self.status.as_str().to_string()),
            "totalCents" => Some(self.total_cents.to_string()),
            _ => None,
        }
    }

    fn from_draft(id: String, draft: &OrderDraft) -> Self {
        Self {
            id,
            customer_id: draft.customer_id.clone(),
            status: draft.status,
            total_cents: draft.total_cents,
            placed_at: Utc::now(),
        }
    }

    fn apply_draft(&mut self, draft: &OrderDraft) {
        self.customer_id = draft.customer_id.clone();
        self.status = draft.status;
        self.total_cents = draft.total_cents;
    }

    fn validate_draft(draft: &OrderDraft) -> Result<(), RepoError> {
        if draft.customer_id.trim().is_empty() {
            return Err(RepoError::invalid_field("customerId", "must not be empty"));
        }
        if draft.total_cents < 0 {
            return Err(RepoError::invalid_field("totalCents", "must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OrderStatus::Paid).unwrap(), json!("paid"));
        assert_eq!(
            serde_json::from_value::<OrderStatus>(json!("cancelled")).unwrap(),
            OrderStatus::Cancelled
        );
    }

    #[test]
    fn test_status_filter_text_round_trips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus =
                serde_json::from_value(json!(status.as_str())).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_field_text_exposes_status_and_total() {
        let order = Order::from_draft(
            "o1".to_string(),
            &OrderDraft {
                customer_id: "c9".to_string(),
                status: OrderStatus::Shipped,
                total_cents: 12_050,
            },
        );
        assert_eq!(order.field_text("status").as_deref(), Some("shipped"));
        assert_eq!(order.field_text("totalCents").as_deref(), Some("12050"));
        assert_eq!(order.field_text("customerId").as_deref(), Some("c9"));
    }

    #[test]
    fn test_validate_rejects_missing_customer() {
        let err = Order::validate_draft(&OrderDraft {
            customer_id: String::new(),
            status: OrderStatus::Pending,
            total_cents: 100,
        })
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation { .. }));
    }

    #[test]
    fn test_deserializes_defaults_for_missing_status() {
        let order: Order = serde_json::from_value(json!({
            "id": 7,
            "customerId": "c1",
            "totalCents": 990
        }))
        .unwrap();
        assert_eq!(order.id, "7");
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
