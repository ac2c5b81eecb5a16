//! Mutation tracking for create, update and delete operations.
//!
//! [`MutationCoordinator`] reports the status of the three write paths
//! independently, so a pending update never blocks a delete. It only
//! tracks; it neither retries nor refetches. Callers wrap the repository
//! call between [`MutationCoordinator::begin`] and
//! [`MutationCoordinator::finish`], and decide themselves when to
//! revalidate the list afterwards.

use tracing::{debug, warn};

use crate::error::RepoError;

/// The three write operations a page can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    /// Lowercase name for log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

/// Lifecycle position of one mutation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Status plus last error for one mutation kind.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    status: MutationStatus,
    error: Option<RepoError>,
    generation: u64,
}

impl MutationState {
    pub fn status(&self) -> MutationStatus {
        self.status
    }

    /// The error from the last failed run, until the next begin.
    pub fn error(&self) -> Option<&RepoError> {
        self.error.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }
}

/// Permission to finish one begun mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    kind: MutationKind,
    generation: u64,
}

impl MutationTicket {
    pub fn kind(&self) -> MutationKind {
        self.kind
    }
}

/// Independent status tracking for the three write paths of one page.
#[derive(Debug, Default)]
pub struct MutationCoordinator {
    create: MutationState,
    update: MutationState,
    delete: MutationState,
}

impl MutationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a mutation as started and get the ticket to finish it with.
    ///
    /// A newer begin of the same kind supersedes an older one: the older
    /// ticket's finish is ignored.
    pub fn begin(&mut self, kind: MutationKind) -> MutationTicket {
        let slot = self.slot_mut(kind);
        slot.generation += 1;
        slot.status = MutationStatus::Pending;
        slot.error = None;
        debug!("Starting {} mutation (generation {})", kind.as_str(), slot.generation);
        MutationTicket {
            kind,
            generation: slot.generation,
        }
    }

    /// Record the outcome of a begun mutation.
    ///
    /// Returns false when the ticket was superseded by a newer begin of the
    /// same kind; the newer run's status stands.
    pub fn finish(&mut self, ticket: &MutationTicket, outcome: Result<(), RepoError>) -> bool {
        let slot = self.slot_mut(ticket.kind);
        if ticket.generation != slot.generation {
            warn!(
                "Ignoring finish for superseded {} mutation",
                ticket.kind.as_str()
            );
            return false;
        }
        match outcome {
            Ok(()) => {
                debug!("Completed {} mutation", ticket.kind.as_str());
                slot.status = MutationStatus::Succeeded;
                slot.error = None;
            }
            Err(err) => {
                warn!("Failed {} mutation: {}", ticket.kind.as_str(), err);
                slot.status = MutationStatus::Failed;
                slot.error = Some(err);
            }
        }
        true
    }

    /// Current state of one mutation kind.
    pub fn state(&self, kind: MutationKind) -> &MutationState {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Update => &self.update,
            MutationKind::Delete => &self.delete,
        }
    }

    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.state(kind).is_pending()
    }

    /// Whether any of the three paths is currently running.
    pub fn any_pending(&self) -> bool {
        self.create.is_pending() || self.update.is_pending() || self.delete.is_pending()
    }

    /// Return a slot to Idle, dropping its error (form dismissed).
    pub fn reset(&mut self, kind: MutationKind) {
        let slot = self.slot_mut(kind);
        slot.status = MutationStatus::Idle;
        slot.error = None;
    }

    fn slot_mut(&mut self, kind: MutationKind) -> &mut MutationState {
        match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Delete => &mut self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let mutations = MutationCoordinator::new();
        assert_eq!(mutations.state(MutationKind::Create).status(), MutationStatus::Idle);
        assert_eq!(mutations.state(MutationKind::Update).status(), MutationStatus::Idle);
        assert_eq!(mutations.state(MutationKind::Delete).status(), MutationStatus::Idle);
        assert!(!mutations.any_pending());
    }

    #[test]
    fn test_begin_finish_success() {
        let mut mutations = MutationCoordinator::new();
        let ticket = mutations.begin(MutationKind::Create);
        assert!(mutations.is_pending(MutationKind::Create));

        assert!(mutations.finish(&ticket, Ok(())));
        assert_eq!(mutations.state(MutationKind::Create).status(), MutationStatus::Succeeded);
        assert!(mutations.state(MutationKind::Create).error().is_none());
    }

    #[test]
    fn test_begin_finish_failure_keeps_error() {
        let mut mutations = MutationCoordinator::new();
        let ticket = mutations.begin(MutationKind::Update);
        mutations.finish(&ticket, Err(RepoError::transport("boom")));

        let state = mutations.state(MutationKind::Update);
        assert_eq!(state.status(), MutationStatus::Failed);
        assert!(state.error().is_some());
    }

    #[test]
    fn test_kinds_do_not_block_each_other() {
        let mut mutations = MutationCoordinator::new();
        let update = mutations.begin(MutationKind::Update);
        let delete = mutations.begin(MutationKind::Delete);

        assert!(mutations.is_pending(MutationKind::Update));
        assert!(mutations.is_pending(MutationKind::Delete));
        assert!(!mutations.is_pending(MutationKind::Create));

        // they also complete independently, in either order
        mutations.finish(&delete, Ok(()));
        assert_eq!(mutations.state(MutationKind::Delete).status(), MutationStatus::Succeeded);
        assert!(mutations.is_pending(MutationKind::Update));

        mutations.finish(&update, Err(RepoError::transport("boom")));
        assert_eq!(mutations.state(MutationKind::Update).status(), MutationStatus::Failed);
        assert_eq!(mutations.state(MutationKind::Delete).status(), MutationStatus::Succeeded);
    }

    #[test]
    fn test_superseded_finish_is_ignored() {
        let mut mutations = MutationCoordinator::new();
        let old = mutations.begin(MutationKind::Delete);
        let new = mutations.begin(MutationKind::Delete);

        assert!(!mutations.finish(&old, Err(RepoError::transport("late failure"))));
        assert!(mutations.is_pending(MutationKind::Delete), "newer run still pending");

        assert!(mutations.finish(&new, Ok(())));
        assert_eq!(mutations.state(MutationKind::Delete).status(), MutationStatus::Succeeded);
        assert!(mutations.state(MutationKind::Delete).error().is_none());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut mutations = MutationCoordinator::new();
        let ticket = mutations.begin(MutationKind::Create);
        mutations.finish(&ticket, Err(RepoError::transport("boom")));
        assert!(mutations.state(MutationKind::Create).error().is_some());

        mutations.begin(MutationKind::Create);
        assert!(mutations.state(MutationKind::Create).error().is_none());
        assert!(mutations.is_pending(MutationKind::Create));
    }

    #[test]
    fn test_reset_returns_slot_to_idle() {
        let mut mutations = MutationCoordinator::new();
        let ticket = mutations.begin(MutationKind::Update);
        mutations.finish(&ticket, Err(RepoError::transport("boom")));

        mutations.reset(MutationKind::Update);
        let state = mutations.state(MutationKind::Update);
        assert_eq!(state.status(), MutationStatus::Idle);
        assert!(state.error().is_none());
    }
}
