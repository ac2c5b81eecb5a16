//! Fetch lifecycle for one paginated list.
//!
//! [`FetchCoordinator`] owns the current [`QueryDescriptor`], the last good
//! [`PageWindow`] and the loading/error status for one list view. Callers
//! obtain a [`FetchTicket`] before running the repository call and hand the
//! outcome back through [`FetchCoordinator::resolve`], which enforces the
//! stale-response guard: a result is only applied while its descriptor
//! still matches the current one, so an older fetch completing after a
//! newer one can never clobber the newer parameters' data. On failure the
//! last good window stays visible next to the error.

use tracing::{debug, warn};

use crate::error::RepoError;
use crate::query::QueryDescriptor;
use crate::repository::PageWindow;

/// Permission to run one repository fetch.
///
/// Carries the descriptor the fetch was issued for and a generation number
/// used to decide when the loading flag may clear.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    descriptor: QueryDescriptor,
    generation: u64,
}

impl FetchTicket {
    /// The descriptor this fetch must be executed with.
    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Issue order of this ticket, monotonically increasing.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`FetchCoordinator::resolve`] did with a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The result was applied to the coordinator state.
    Applied,
    /// The descriptor no longer matches current input; result dropped.
    DiscardedStale,
}

/// Cached, revalidatable fetch state for one list view.
#[derive(Debug)]
pub struct FetchCoordinator<T> {
    descriptor: Option<QueryDescriptor>,
    window: Option<PageWindow<T>>,
    error: Option<RepoError>,
    loading: bool,
    generation: u64,
}

impl<T> Default for FetchCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchCoordinator<T> {
    pub fn new() -> Self {
        Self {
            descriptor: None,
            window: None,
            error: None,
            loading: false,
            generation: 0,
        }
    }

    /// Ask for a fetch of `descriptor`.
    ///
    /// Returns `None` when nothing needs to run: the descriptor equals the
    /// current one and either a fetch for it is already in flight or a good
    /// window for it is already held. Any actual parameter change (or a
    /// previous failure) yields a ticket.
    pub fn request(&mut self, descriptor: QueryDescriptor) -> Option<FetchTicket> {
        if self.descriptor.as_ref() == Some(&descriptor) {
            if self.loading {
                debug!("Fetch already in flight, coalescing");
                return None;
            }
            if self.window.is_some() && self.error.is_none() {
                debug!("Window already current, skipping fetch");
                return None;
            }
        }
        self.descriptor = Some(descriptor.clone());
        Some(self.issue(descriptor))
    }

    /// Re-issue the fetch for the current descriptor, bypassing the cache
    /// and superseding any in-flight fetch.
    ///
    /// `None` only when no descriptor has ever been requested.
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let descriptor = self.descriptor.clone()?;
        Some(self.issue(descriptor))
    }

    fn issue(&mut self, descriptor: QueryDescriptor) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        debug!("Issued fetch generation {}", self.generation);
        FetchTicket {
            descriptor,
            generation: self.generation,
        }
    }

    /// Apply a completed repository call.
    ///
    /// Results arrive in completion order, not issue order; the descriptor
    /// comparison drops results that no longer answer the current input.
    /// The loading flag clears only when the newest issued ticket resolves,
    /// so a superseded fetch cannot end a newer fetch's loading state.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PageWindow<T>, RepoError>,
    ) -> ResolveOutcome {
        if self.descriptor.as_ref() != Some(&ticket.descriptor) {
            warn!(
                "Discarding fetch generation {} for a superseded descriptor",
                ticket.generation
            );
            return ResolveOutcome::DiscardedStale;
        }

        if ticket.generation == self.generation {
            self.loading = false;
        }

        match result {
            Ok(window) => {
                debug!(
                    "Fetch resolved with {} rows of {} total",
                    window.data.len(),
                    window.total
                );
                self.window = Some(window);
                self.error = None;
            }
            Err(err) => {
                // Last good window stays visible under the error banner.
                warn!("Fetch failed: {}", err);
                self.error = Some(err);
            }
        }

        ResolveOutcome::Applied
    }

    /// The last good window, if any fetch has succeeded.
    pub fn window(&self) -> Option<&PageWindow<T>> {
        self.window.as_ref()
    }

    /// The error from the most recent failed fetch, if it has not been
    /// superseded by a success.
    pub fn error(&self) -> Option<&RepoError> {
        self.error.as_ref()
    }

    /// Whether the newest issued fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The descriptor the coordinator currently answers for.
    pub fn descriptor(&self) -> Option<&QueryDescriptor> {
        self.descriptor.as_ref()
    }

    /// Drop the current error, keeping the window (banner dismissed).
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
