//! Generic page controller for one entity collection.
//!
//! [`EntityBrowser`] wires a repository, the fetch and mutation
//! coordinators and the view-state machine into the control surface a
//! rendering shell drives: parameter setters, view intents and the three
//! write operations. One browser instance backs one page (customers,
//! products, orders, ...); the entity type comes in through the
//! repository's record type, so every page shares this one implementation
//! instead of carrying its own copy of the flow.
//!
//! Parameter setters are synchronous; [`EntityBrowser::refresh`] runs the
//! actual fetch. Changing the search text, a filter or the page size
//! resets to page 1; changing the page number resets nothing else.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{CoreConfig, DEFAULT_PAGE_LIMIT};
use crate::error::RepoError;
use crate::fetch::{FetchCoordinator, FetchTicket};
use crate::models::Entity;
use crate::mutation::{MutationCoordinator, MutationKind, MutationState};
use crate::pagination::{PaginationMeta, DEFAULT_MAX_VISIBLE};
use crate::query::{Pagination, QueryDescriptor};
use crate::repository::{EntityRepository, PageWindow};
use crate::view_state::ViewState;

/// Browsing and CRUD controller for one entity page.
pub struct EntityBrowser<R>
where
    R: EntityRepository,
    R::Record: Entity,
{
    repo: R,
    page: usize,
    limit: usize,
    search_query: String,
    search_fields: &'static [&'static str],
    filters: BTreeMap<String, Value>,
    strip_width: usize,
    fetch: FetchCoordinator<R::Record>,
    mutations: MutationCoordinator,
    view: ViewState<R::Record>,
}

impl<R> EntityBrowser<R>
where
    R: EntityRepository,
    R::Record: Entity,
{
    const ENTITY: &'static str = <R::Record as Entity>::COLLECTION;

    /// Create a browser over the given repository with default settings.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            search_query: String::new(),
            search_fields: <R::Record as Entity>::search_fields(),
            filters: BTreeMap::new(),
            strip_width: DEFAULT_MAX_VISIBLE,
            fetch: FetchCoordinator::new(),
            mutations: MutationCoordinator::new(),
            view: ViewState::List,
        }
    }

    /// Create a browser taking page size and strip width from config.
    pub fn with_config(repo: R, config: &CoreConfig) -> Self {
        Self::new(repo)
            .with_limit(config.page_limit)
            .with_strip_width(config.strip_width)
    }

    /// Override the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Override the pagination strip width.
    pub fn with_strip_width(mut self, width: usize) -> Self {
        self.strip_width = width.max(1);
        self
    }

    /// Override which fields free-text search covers.
    pub fn with_search_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.search_fields = fields;
        self
    }

    // ── Query parameters ────────────────────────────────────────────────

    /// The descriptor the current parameters compose to.
    pub fn descriptor(&self) -> QueryDescriptor {
        QueryDescriptor::build(
            Pagination::new(self.page, self.limit),
            &self.search_query,
            self.search_fields,
            self.filters.clone(),
        )
    }

    /// Move to another page. Search and filters stay untouched.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Replace the search text. Any actual change restarts at page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.search_query {
            return;
        }
        self.search_query = query;
        self.page = 1;
    }

    /// Set one structured filter. Any actual change restarts at page 1.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if self.filters.get(&field) == Some(&value) {
            return;
        }
        self.filters.insert(field, value);
        self.page = 1;
    }

    /// Drop one structured filter. Restarts at page 1 when it was set.
    pub fn clear_filter(&mut self, field: &str) {
        if self.filters.remove(field).is_some() {
            self.page = 1;
        }
    }

    /// Change the page size. Restarts at page 1.
    pub fn set_limit(&mut self, limit: usize) {
        let limit = limit.max(1);
        if limit == self.limit {
            return;
        }
        self.limit = limit;
        self.page = 1;
    }

    // ── Fetching ────────────────────────────────────────────────────────

    /// Fetch the window for the current parameters.
    ///
    /// Skips the round trip when the coordinator already holds a good
    /// window for this descriptor. The outcome lands in [`Self::window`]
    /// and [`Self::fetch_error`] rather than a return value; a failed
    /// fetch keeps the previous window visible.
    pub async fn refresh(&mut self) {
        let Some(ticket) = self.fetch.request(self.descriptor()) else {
            return;
        };
        self.run_fetch(ticket).await;
    }

    /// Force a fetch for the current parameters, bypassing the cache.
    ///
    /// A fresh window can reveal that the current page no longer exists
    /// (rows were deleted from the tail); the browser then steps back to
    /// the last page that does and fetches that window.
    pub async fn revalidate(&mut self) {
        let ticket = match self.fetch.refetch() {
            Some(ticket) => ticket,
            None => match self.fetch.request(self.descriptor()) {
                Some(ticket) => ticket,
                None => return,
            },
        };
        self.run_fetch(ticket).await;
        self.step_back_if_past_end().await;
    }

    /// Snap to the last existing page after the collection shrank under
    /// the current one. Only acts on a fresh window; a failed fetch keeps
    /// the user's position.
    async fn step_back_if_past_end(&mut self) {
        let last_page = match (self.fetch.window(), self.fetch.error()) {
            (Some(window), None) if self.page > window.total_pages.max(1) => {
                window.total_pages.max(1)
            }
            _ => return,
        };
        debug!(
            "Page {} of {} is past the end, stepping back to {}",
            self.page,
            Self::ENTITY,
            last_page
        );
        self.set_page(last_page);
        self.refresh().await;
    }

    async fn run_fetch(&mut self, ticket: FetchTicket) {
        debug!("Fetching {} window for page {}", Self::ENTITY, self.page);
        let result = self.repo.list(ticket.descriptor()).await;
        self.fetch.resolve(&ticket, result);
    }

    /// The last good result window.
    pub fn window(&self) -> Option<&PageWindow<R::Record>> {
        self.fetch.window()
    }

    /// The current fetch error, if the last fetch failed.
    pub fn fetch_error(&self) -> Option<&RepoError> {
        self.fetch.error()
    }

    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Pagination strip for the current page position.
    ///
    /// Anchored on the browser's page, not the window's: while a fetch for
    /// a new page is failing, the strip keeps showing where the user asked
    /// to go.
    pub fn page_strip(&self) -> PaginationMeta {
        let total_pages = self.window().map(|w| w.total_pages).unwrap_or(0);
        PaginationMeta::compute(self.page, total_pages, self.strip_width)
    }

    // ── View intents ────────────────────────────────────────────────────

    /// Current view mode.
    pub fn view(&self) -> &ViewState<R::Record> {
        &self.view
    }

    /// Open the create form.
    pub fn open_create(&mut self) -> bool {
        self.transition("create", |view| view.request_create())
    }

    /// Open the detail view for a record on the current page.
    ///
    /// A stale or unknown id is a no-op.
    pub fn open_detail(&mut self, id: &str) -> bool {
        if self.find_in_window(id).is_none() {
            debug!("Detail intent for unknown {} id {}, ignoring", Self::ENTITY, id);
            return false;
        }
        self.transition("detail", |view| view.request_detail(id))
    }

    /// Open the edit form for a record on the current page.
    ///
    /// A stale or unknown id is a no-op.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(record) = self.find_in_window(id).cloned() else {
            debug!("Edit intent for unknown {} id {}, ignoring", Self::ENTITY, id);
            return false;
        };
        self.transition("edit", |view| view.request_edit(record))
    }

    /// Leave the detail view for the list.
    pub fn back(&mut self) -> bool {
        self.transition("back", |view| view.back())
    }

    /// Abandon the open form, returning to where it was opened from.
    pub fn cancel(&mut self) -> bool {
        let form_kind = match &self.view {
            ViewState::Create => Some(MutationKind::Create),
            ViewState::Edit { .. } => Some(MutationKind::Update),
            _ => None,
        };
        let applied = self.transition("cancel", |view| view.cancel());
        if applied {
            if let Some(kind) = form_kind {
                self.mutations.reset(kind);
            }
        }
        applied
    }

    fn transition(&mut self, intent: &str, apply: impl FnOnce(&mut ViewState<R::Record>) -> bool) -> bool {
        let applied = apply(&mut self.view);
        if applied {
            debug!("Applied {} intent, {} now in {} mode", intent, Self::ENTITY, self.view.mode());
        } else {
            debug!("Ignoring {} intent in {} mode", intent, self.view.mode());
        }
        applied
    }

    fn find_in_window(&self, id: &str) -> Option<&R::Record> {
        self.window().and_then(|w| w.data.iter().find(|r| r.id() == id))
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Tracking state for one mutation kind.
    pub fn mutation_state(&self, kind: MutationKind) -> &MutationState {
        self.mutations.state(kind)
    }

    /// Submit the create form.
    ///
    /// On success the view moves to the new record's detail and the window
    /// is revalidated. On failure the form stays open with the error in
    /// the create slot for inline display.
    pub async fn submit_create(&mut self, draft: R::Create) -> Result<(), RepoError> {
        let ticket = self.mutations.begin(MutationKind::Create);
        match self.repo.create(&draft).await {
            Ok(record) => {
                self.mutations.finish(&ticket, Ok(()));
                self.view.on_create_succeeded(record.id());
                debug!("Created record {} in {}", record.id(), Self::ENTITY);
                self.revalidate().await;
                Ok(())
            }
            Err(err) => {
                self.mutations.finish(&ticket, Err(err.clone()));
                self.handle_mutation_error(&err).await;
                Err(err)
            }
        }
    }

    /// Submit the edit form for the record under edit.
    ///
    /// Outside of edit mode there is nothing to update and the call is a
    /// no-op. On success the view moves to the record's detail (never back
    /// to the list) and the window is revalidated.
    pub async fn submit_update(&mut self, patch: R::Update) -> Result<(), RepoError> {
        let Some(id) = self.view.editing().map(|r| r.id().to_string()) else {
            debug!("Update submitted outside edit mode, ignoring");
            return Ok(());
        };
        let ticket = self.mutations.begin(MutationKind::Update);
        match self.repo.update(&id, &patch).await {
            Ok(record) => {
                self.mutations.finish(&ticket, Ok(()));
                self.view.on_update_succeeded(record.id());
                debug!("Updated record {} in {}", record.id(), Self::ENTITY);
                self.revalidate().await;
                Ok(())
            }
            Err(err) => {
                self.mutations.finish(&ticket, Err(err.clone()));
                self.handle_mutation_error(&err).await;
                Err(err)
            }
        }
    }

    /// Delete a record. The caller has already confirmed with the user;
    /// this runs unconditionally.
    ///
    /// On success the window is revalidated, and if the deleted record's
    /// detail view was open the view returns to the list. Deleting the
    /// only row of the last page steps the browser back to the page
    /// before it.
    pub async fn remove(&mut self, id: &str) -> Result<(), RepoError> {
        let ticket = self.mutations.begin(MutationKind::Delete);
        match self.repo.delete(id).await {
            Ok(()) => {
                self.mutations.finish(&ticket, Ok(()));
                if self.view.detail_id() == Some(id) {
                    self.view.reset_to_list();
                }
                debug!("Deleted record {} from {}", id, Self::ENTITY);
                self.revalidate().await;
                Ok(())
            }
            Err(err) => {
                self.mutations.finish(&ticket, Err(err.clone()));
                self.handle_mutation_error(&err).await;
                Err(err)
            }
        }
    }

    /// A missing record means the window is lying; the list is the only
    /// safe place to land, with fresh data.
    async fn handle_mutation_error(&mut self, err: &RepoError) {
        if matches!(err, RepoError::NotFound { .. }) {
            warn!("Record vanished underneath the {} page, returning to list", Self::ENTITY);
            self.view.reset_to_list();
            self.revalidate().await;
        }
    }

    // ── Plumbing for shells ─────────────────────────────────────────────

    /// Current page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current search text, possibly blank.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Current structured filters.
    pub fn filters(&self) -> &BTreeMap<String, Value> {
        &self.filters
    }

    /// The repository this browser operates on.
    pub fn repository(&self) -> &R {
        &self.repo
    }
}
