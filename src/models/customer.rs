use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};
use crate::error::RepoError;

/// A customer account visible on the customers page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend-assigned identifier (string or integer on the wire).
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for creating or editing a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Entity for Customer {
    type Draft = CustomerDraft;

    const COLLECTION: &'static str = "customers";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "email", "city"]
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "email" => Some(self.email.clone()),
            "phone" => self.phone.clone(),
            "city" => self.city.clone(),
            _ => None,
        }
    }

    fn from_draft(id: String, draft: &CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            city: draft.city.clone(),
            created_at: Utc::now(),
        }
    }

    fn apply_draft(&mut self, draft: &CustomerDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
        self.phone = draft.phone.clone();
        self.city = draft.city.clone();
    }

    fn validate_draft(draft: &CustomerDraft) -> Result<(), RepoError> {
        if draft.name.trim().is_empty() {
            return Err(RepoError::invalid_field("name", "must not be empty"));
        }
        if draft.email.trim().is_empty() {
            return Err(RepoError::invalid_field("email", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CustomerDraft {
        CustomerDraft {
            name: "Acme Corp".to_string(),
            email: "billing@acme.test".to_string(),
            phone: Some("+33 1 23 45 67 89".to_string()),
            city: Some("Lyon".to_string()),
        }
    }

    #[test]
    fn test_from_draft_copies_all_editable_fields() {
        let customer = Customer::from_draft("c1".to_string(), &draft());
        assert_eq!(customer.id, "c1");
        assert_eq!(customer.name, "Acme Corp");
        assert_eq!(customer.email, "billing@acme.test");
        assert_eq!(customer.city.as_deref(), Some("Lyon"));
    }

    #[test]
    fn test_apply_draft_keeps_id_and_created_at() {
        let mut customer = Customer::from_draft("c1".to_string(), &draft());
        let created = customer.created_at;

        let mut updated = draft();
        updated.name = "Acme Industries".to_string();
        customer.apply_draft(&updated);

        assert_eq!(customer.id, "c1");
        assert_eq!(customer.created_at, created);
        assert_eq!(customer.name, "Acme Industries");
    }

    #[test]
    fn test_field_text_uses_wire_names() {
        let customer = Customer::from_draft("c1".to_string(), &draft());
        assert_eq!(customer.field_text("name").as_deref(), Some("Acme Corp"));
        assert_eq!(customer.field_text("city").as_deref(), Some("Lyon"));
        assert_eq!(customer.field_text("unknown"), None);
    }

    #[test]
    fn test_validate_rejects_blank_required_fields() {
        let mut bad = draft();
        bad.name = "  ".to_string();
        let err = Customer::validate_draft(&bad).unwrap_err();
        assert!(matches!(err, RepoError::Validation { field: Some(f), .. } if f == "name"));

        let mut bad = draft();
        bad.email = String::new();
        assert!(Customer::validate_draft(&bad).is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let customer = Customer::from_draft("c1".to_string(), &draft());
        let value = serde_json::to_value(&customer).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
