use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};
use crate::error::RepoError;

/// A supplier visible on the suppliers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub contact_email: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating or editing a supplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub name: String,
    pub contact_email: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl Entity for Supplier {
    type Draft = SupplierDraft;

    const COLLECTION: &'static str = "suppliers";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "contactEmail", "city"]
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "contactEmail" => Some(self.contact_email.clone()),
            "city" => self.city.clone(),
            _ => None,
        }
    }

    fn from_draft(id: String, draft: &SupplierDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            contact_email: draft.contact_email.clone(),
            city: draft.city.clone(),
            created_at: Utc::now(),
        }
    }

    fn apply_draft(&mut self, draft: &SupplierDraft) {
        self.name = draft.name.clone();
        self.contact_email = draft.contact_email.clone();
        self.city = draft.city.clone();
    }

    fn validate_draft(draft: &SupplierDraft) -> Result<(), RepoError> {
        if draft.name.trim().is_empty() {
            return Err(RepoError::invalid_field("name", "must not be empty"));
        }
        if draft.contact_email.trim().is_empty() {
            return Err(RepoError::invalid_field("contactEmail", "must not be empty"));
        }
        Ok(())
    }
}
