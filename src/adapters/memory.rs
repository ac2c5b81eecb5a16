//! In-process repository for tests, demos and offline development.
//!
//! Serves the same windowing, search and filter semantics as the REST
//! backend from a plain `Vec`, and adds two test hooks: fault injection
//! through [`InMemoryRepository::fail_next`] and a log of every served
//! descriptor through [`InMemoryRepository::served_queries`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::adapters::filter_text;
use crate::error::RepoError;
use crate::models::Entity;
use crate::query::QueryDescriptor;
use crate::repository::{EntityRepository, PageWindow};

/// Repository over an in-memory record list.
///
/// Clones share the same store, so a test can keep a handle for
/// inspection while the browser owns another.
pub struct InMemoryRepository<E: Entity> {
    records: Arc<Mutex<Vec<E>>>,
    fail_next: Arc<Mutex<VecDeque<RepoError>>>,
    served: Arc<Mutex<Vec<QueryDescriptor>>>,
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            fail_next: Arc::clone(&self.fail_next),
            served: Arc::clone(&self.served),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(VecDeque::new())),
            served: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a store pre-populated with records.
    pub fn seeded(records: Vec<E>) -> Self {
        let repo = Self::new();
        *repo.records.lock().unwrap() = records;
        repo
    }

    /// Queue an error for the next repository call. Queued errors are
    /// consumed in order, one per call; a failed `list` still shows up in
    /// the served-query log.
    pub fn fail_next(&self, error: RepoError) {
        self.fail_next.lock().unwrap().push_back(error);
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<E> {
        self.records.lock().unwrap().clone()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }

    /// Every descriptor `list` has served, in call order.
    pub fn served_queries(&self) -> Vec<QueryDescriptor> {
        self.served.lock().unwrap().clone()
    }

    fn take_fault(&self) -> Option<RepoError> {
        self.fail_next.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository for InMemoryRepository<E> {
    type Record = E;
    type Create = E::Draft;
    type Update = E::Draft;

    async fn list(&self, query: &QueryDescriptor) -> Result<PageWindow<E>, RepoError> {
        self.served.lock().unwrap().push(query.clone());
        if let Some(err) = self.take_fault() {
            return Err(err);
        }
        let records = self.records.lock().unwrap();
        let matches: Vec<E> = records
            .iter()
            .filter(|record| matches_query(*record, query))
            .cloned()
            .collect();
        let total = matches.len();
        let limit = query.pagination.limit;
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        // Past-the-end requests are served the last page that exists.
        let page = query.pagination.page.clamp(1, total_pages.max(1));
        let data: Vec<E> = matches
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();
        debug!(
            "Serving {} of {} {} from memory (page {})",
            data.len(),
            total,
            E::COLLECTION,
            page
        );
        let window = PageWindow::new(data, page, limit, total);
        debug_assert!(window.is_consistent());
        Ok(window)
    }

    async fn create(&self, data: &E::Draft) -> Result<E, RepoError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }
        E::validate_draft(data)?;
        let record = E::from_draft(Uuid::new_v4().to_string(), data);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, data: &E::Draft) -> Result<E, RepoError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }
        E::validate_draft(data)?;
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.apply_draft(data);
                Ok(record.clone())
            }
            None => Err(RepoError::not_found(E::COLLECTION, id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            Err(RepoError::not_found(E::COLLECTION, id))
        } else {
            Ok(())
        }
    }
}

/// Search and filter semantics mirroring the backend: search is a
/// case-insensitive substring match over the named fields, filters are
/// exact matches on the field's text form.
fn matches_query<E: Entity>(record: &E, query: &QueryDescriptor) -> bool {
    if let Some(search) = &query.search {
        let needle = search.query.to_lowercase();
        let hit = search.fields.iter().any(|field| {
            record
                .field_text(field)
                .map_or(false, |text| text.to_lowercase().contains(&needle))
        });
        if !hit {
            return false;
        }
    }
    query.filters.iter().all(|(field, value)| {
        record
            .field_text(field)
            .map_or(false, |text| text == filter_text(value))
    })
}
