use serde::{Deserialize, Serialize};

use super::{deserialize_id, Entity};
use crate::error::RepoError;

/// A product category visible on the categories page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Input payload for creating or editing a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for Category {
    type Draft = CategoryDraft;

    const COLLECTION: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            "description" => self.description.clone(),
            _ => None,
        }
    }

    fn from_draft(id: String, draft: &CategoryDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &CategoryDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
    }

    fn validate_draft(draft: &CategoryDraft) -> Result<(), RepoError> {
        if draft.name.trim().is_empty() {
            return Err(RepoError::invalid_field("name", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_json() {
        let category = Category {
            id: "cat-1".to_string(),
            name: "Furniture".to_string(),
            description: Some("Desks and chairs".to_string()),
        };
        let json = serde_json::to_string(&category).unwrap();
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn test_validate_requires_name() {
        assert!(Category::validate_draft(&CategoryDraft::default()).is_err());
        assert!(Category::validate_draft(&CategoryDraft {
            name: "Lighting".to_string(),
            description: None,
        })
        .is_ok());
    }
}
