//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures and helper functions for
//! integration testing the browsing core against the in-memory and HTTP
//! repositories.
//!
//! # Example
//!
//! ```ignore
//! use common::{seeded_browser, sample_customers};
//!
//! let mut browser = seeded_browser(12);
//! browser.refresh().await;
//! ```

use backoffice_core::adapters::InMemoryRepository;
use backoffice_core::browser::EntityBrowser;
use backoffice_core::models::{Customer, CustomerDraft, Entity};

/// Builds `count` customers with stable ids `c1..cN`.
///
/// Names cycle through a fixed roster so search has something to bite
/// on; every third customer lives in London for filter tests.
pub fn sample_customers(count: usize) -> Vec<Customer> {
    const NAMES: [&str; 4] = ["Ada Lovelace", "Grace Hopper", "Alan Turing", "Barbara Liskov"];
    (1..=count)
        .map(|i| {
            let name = NAMES[(i - 1) % NAMES.len()];
            let city = if i % 3 == 0 { "London" } else { "Boston" };
            Customer::from_draft(
                format!("c{i}"),
                &CustomerDraft {
                    name: name.to_string(),
                    email: format!("user{i}@example.com"),
                    phone: None,
                    city: Some(city.to_string()),
                },
            )
        })
        .collect()
}

/// A draft that passes validation.
pub fn valid_draft(name: &str) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: None,
        city: None,
    }
}

/// In-memory repository seeded with `count` sample customers.
pub fn seeded_repo(count: usize) -> InMemoryRepository<Customer> {
    InMemoryRepository::seeded(sample_customers(count))
}

/// Browser over a seeded repository, page size 5.
///
/// Returns the repository handle too so tests can inspect the store
/// behind the browser's back.
pub fn seeded_browser(
    count: usize,
) -> (
    EntityBrowser<InMemoryRepository<Customer>>,
    InMemoryRepository<Customer>,
) {
    let repo = seeded_repo(count);
    let browser = EntityBrowser::new(repo.clone()).with_limit(5);
    (browser, repo)
}
