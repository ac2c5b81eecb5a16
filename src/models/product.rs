use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};
use crate::error::RepoError;

/// A catalog product visible on the products page.
///
/// Prices are carried in cents to keep money exact on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating or editing a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub stock: i32,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

impl Entity for Product {
    type Draft = ProductDraft;

    const COLLECTION: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "sku"]
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "sku" => Some(self.sku.clone()),
            "priceCents" => Some(self.price_cents.to_string()),
            "stock" => Some(self.stock.to_string()),
            "categoryId" => self.category_id.clone(),
            "supplierId" => self.supplier_id.clone(),
            _ => None,
        }
    }

    fn from_draft(id: String, draft: &ProductDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            sku: draft.sku.clone(),
            price_cents: draft.price_cents,
            stock: draft.stock,
            category_id: draft.category_id.clone(),
            supplier_id: draft.supplier_id.clone(),
            created_at: Utc::now(),
        }
    }

    fn apply_draft(&mut self, draft: &ProductDraft) {
        self.name = draft.name.clone();
        self.sku = draft.sku.clone();
        self.price_cents = draft.price_cents;
        self.stock = draft.stock;
        self.category_id = draft.category_id.clone();
        self.supplier_id = draft.supplier_id.clone();
    }

    fn validate_draft(draft: &ProductDraft) -> Result<(), RepoError> {
        if draft.name.trim().is_empty() {
            return Err(RepoError::invalid_field("name", "must not be empty"));
        }
        if draft.sku.trim().is_empty() {
            return Err(RepoError::invalid_field("sku", "must not be empty"));
        }
        if draft.price_cents < 0 {
            return Err(RepoError::invalid_field("priceCents", "must not be negative"));
        }
        Ok(())
    }
}
