//! Entity catalog for the dashboard pages.
//!
//! Each page (customers, products, orders, suppliers, categories) browses
//! one record type. The [`Entity`] trait carries what the generic browsing
//! machinery needs to know about a record: its collection name, id, which
//! fields free-text search covers, and a by-name text accessor the
//! in-memory store uses to evaluate search and filters.

mod category;
mod customer;
mod order;
mod product;
mod supplier;

pub use category::{Category, CategoryDraft};
pub use customer::{Customer, CustomerDraft};
pub use order::{Order, OrderDraft, OrderStatus};
pub use product::{Product, ProductDraft};
pub use supplier::{Supplier, SupplierDraft};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RepoError;

/// A browsable, mutable record type.
///
/// Field names passed to [`Entity::field_text`] and returned from
/// [`Entity::search_fields`] use the wire casing (camelCase), matching the
/// keys the rendering layer puts into filters.
pub trait Entity:
    Clone + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Input payload for creating or updating a record of this type.
    type Draft: Clone + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Collection name as it appears in URLs and log messages.
    const COLLECTION: &'static str;

    /// Backend-assigned identifier.
    fn id(&self) -> &str;

    /// Fields free-text search covers by default.
    fn search_fields() -> &'static [&'static str];

    /// Text rendering of a field, by wire name. `None` for unknown fields.
    fn field_text(&self, field: &str) -> Option<String>;

    /// Materialize a record from a draft and a store-assigned id.
    fn from_draft(id: String, draft: &Self::Draft) -> Self;

    /// Overwrite the draft-editable fields of an existing record.
    fn apply_draft(&mut self, draft: &Self::Draft);

    /// Minimal structural validation of a draft.
    ///
    /// Backends run their own full validation; this exists so local stores
    /// reject obviously broken input the same way the real one would.
    fn validate_draft(_draft: &Self::Draft) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Helper to deserialize an id sent as either string or integer.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => Ok(s),
        IdRepr::Number(n) => Ok(n.to_string()),
    }
}
