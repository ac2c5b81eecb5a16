//! Who is driving the dashboard.
//!
//! The browsing core itself is identity-agnostic; shells resolve the
//! signed-in actor through [`IdentityProvider`] for display and for
//! attributing mutations in their own audit trails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RepoError;

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Source of the current actor, injectable like a repository.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Result<Actor, RepoError>;
}

/// Fixed identity for development shells and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    actor: Actor,
}

impl StaticIdentity {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }

    /// The stand-in actor local shells run as.
    pub fn developer() -> Self {
        Self::new(Actor {
            id: "dev".to_string(),
            display_name: "Developer".to_string(),
            email: None,
        })
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_actor(&self) -> Result<Actor, RepoError> {
        Ok(self.actor.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_identity_returns_its_actor() {
        let identity = StaticIdentity::developer();
        let actor = identity.current_actor().await.unwrap();
        assert_eq!(actor.id, "dev");
        assert_eq!(actor.display_name, "Developer");
    }

    #[test]
    fn test_actor_serializes_camel_case() {
        let actor = Actor {
            id: "u1".to_string(),
            display_name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
        };
        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["displayName"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
    }
}
