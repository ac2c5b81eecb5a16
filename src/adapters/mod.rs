//! Concrete [`EntityRepository`](crate::repository::EntityRepository)
//! implementations.
//!
//! # Adapters
//!
//! - [`HttpRepository`] - REST backend over reqwest
//! - [`InMemoryRepository`] - in-process store for tests and offline work
//!
//! Both speak the same trait, so a browser wired against one runs
//! unchanged against the other.

pub mod http;
pub mod memory;

pub use http::HttpRepository;
pub use memory::InMemoryRepository;

use serde_json::Value;

/// Canonical text form of a filter value for comparison against a
/// record's own field text. Strings compare without their quotes.
pub(crate) fn filter_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
