//! Per-page view mode machine.
//!
//! Each entity page is in exactly one of four modes: browsing the list,
//! inspecting one record, filling the create form, or editing a record.
//! Transitions are driven by user intents and by mutation completions;
//! anything outside the transition table is a no-op rather than an error,
//! so a misfired intent can never wedge the page.
//!
//! ```text
//! List ──create──▶ Create ──saved──▶ Detail(new id)
//!   │  ◀─cancel──┘
//!   ├──view────▶ Detail(id) ──back──▶ List
//!   │               │ edit
//!   └──edit────▶ Edit(record) ──saved──▶ Detail(record id)
//!                   └─cancel──▶ List or Detail, per entry point
//! ```

/// Where an edit was started from, deciding where cancel returns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOrigin {
    /// Edit opened from the list; cancel returns to the list.
    List,
    /// Edit opened from a detail view; cancel returns there.
    Detail { id: String },
}

/// The active mode of one entity page.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Browsing the paginated list.
    List,
    /// Inspecting the record with this id.
    Detail { id: String },
    /// Filling the create form.
    Create,
    /// Editing a copy of an existing record.
    Edit { record: T, origin: EditOrigin },
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::List
    }
}

impl<T> ViewState<T> {
    /// Open the create form. Legal from the list only.
    pub fn request_create(&mut self) -> bool {
        match self {
            ViewState::List => {
                *self = ViewState::Create;
                true
            }
            _ => false,
        }
    }

    /// Open a record's detail view. Legal from the list only.
    ///
    /// The caller has already resolved `id` against the current window;
    /// this machine does not second-guess it.
    pub fn request_detail(&mut self, id: impl Into<String>) -> bool {
        match self {
            ViewState::List => {
                *self = ViewState::Detail { id: id.into() };
                true
            }
            _ => false,
        }
    }

    /// Start editing a resolved record, from the list or a detail view.
    pub fn request_edit(&mut self, record: T) -> bool {
        let origin = match self {
            ViewState::List => EditOrigin::List,
            ViewState::Detail { id } => EditOrigin::Detail { id: id.clone() },
            _ => return false,
        };
        *self = ViewState::Edit { record, origin };
        true
    }

    /// Leave a detail view for the list.
    pub fn back(&mut self) -> bool {
        match self {
            ViewState::Detail { .. } => {
                *self = ViewState::List;
                true
            }
            _ => false,
        }
    }

    /// Abandon the create or edit form without saving.
    ///
    /// Cancelling an edit returns to wherever the edit was opened from.
    pub fn cancel(&mut self) -> bool {
        match self {
            ViewState::Create => {
                *self = ViewState::List;
                true
            }
            ViewState::Edit { origin, .. } => {
                *self = match origin {
                    EditOrigin::List => ViewState::List,
                    EditOrigin::Detail { id } => ViewState::Detail { id: id.clone() },
                };
                true
            }
            _ => false,
        }
    }

    /// A create mutation finished; show the new record.
    pub fn on_create_succeeded(&mut self, new_id: &str) -> bool {
        match self {
            ViewState::Create => {
                *self = ViewState::Detail { id: new_id.to_string() };
                true
            }
            _ => false,
        }
    }

    /// An update mutation finished; show the saved record, never the list.
    pub fn on_update_succeeded(&mut self, id: &str) -> bool {
        match self {
            ViewState::Edit { .. } => {
                *self = ViewState::Detail { id: id.to_string() };
                true
            }
            _ => false,
        }
    }

    /// Unconditionally return to the list (record vanished underneath us).
    pub fn reset_to_list(&mut self) {
        *self = ViewState::List;
    }

    /// Whether the list is the active mode.
    pub fn is_list(&self) -> bool {
        matches!(self, ViewState::List)
    }

    /// Id in focus when a detail view is open.
    pub fn detail_id(&self) -> Option<&str> {
        match self {
            ViewState::Detail { id } => Some(id),
            _ => None,
        }
    }

    /// The record under edit, when the edit form is open.
    pub fn editing(&self) -> Option<&T> {
        match self {
            ViewState::Edit { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Mode name for log messages.
    pub fn mode(&self) -> &'static str {
        match self {
            ViewState::List => "list",
            ViewState::Detail { .. } => "detail",
            ViewState::Create => "create",
            ViewState::Edit { .. } => "edit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec(&'static str);

    #[test]
    fn test_initial_state_is_list() {
        let view: ViewState<Rec> = ViewState::default();
        assert!(view.is_list());
    }

    #[test]
    fn test_list_to_create_and_cancel_back() {
        let mut view: ViewState<Rec> = ViewState::default();
        assert!(view.request_create());
        assert_eq!(view.mode(), "create");
        assert!(view.cancel());
        assert!(view.is_list());
    }

    #[test]
    fn test_list_to_detail_and_back() {
        let mut view: ViewState<Rec> = ViewState::default();
        assert!(view.request_detail("r1"));
        assert_eq!(view.detail_id(), Some("r1"));
        assert!(view.back());
        assert!(view.is_list());
    }

    #[test]
    fn test_edit_from_list_cancels_to_list() {
        let mut view: ViewState<Rec> = ViewState::default();
        assert!(view.request_edit(Rec("r1")));
        assert_eq!(view.editing(), Some(&Rec("r1")));
        assert!(view.cancel());
        assert!(view.is_list());
    }

    #[test]
    fn test_edit_from_detail_cancels_to_detail() {
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_detail("r1");
        assert!(view.request_edit(Rec("r1")));
        assert!(view.cancel());
        assert_eq!(view.detail_id(), Some("r1"));
    }

    #[test]
    fn test_create_success_lands_on_new_detail() {
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_create();
        assert!(view.on_create_succeeded("fresh-id"));
        assert_eq!(view.detail_id(), Some("fresh-id"));
    }

    #[test]
    fn test_update_success_lands_on_detail_not_list() {
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_edit(Rec("r1"));
        assert!(view.on_update_succeeded("r1"));
        assert_eq!(view.detail_id(), Some("r1"));
        assert!(!view.is_list());
    }

    #[test]
    fn test_update_success_from_detail_entry_also_lands_on_detail() {
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_detail("r1");
        view.request_edit(Rec("r1"));
        assert!(view.on_update_succeeded("r1"));
        assert_eq!(view.detail_id(), Some("r1"));
    }

    #[test]
    fn test_illegal_transitions_are_noops() {
        let mut view: ViewState<Rec> = ViewState::default();

        // nothing to go back from or cancel in list mode
        assert!(!view.back());
        assert!(!view.cancel());
        assert!(!view.on_create_succeeded("x"));
        assert!(!view.on_update_succeeded("x"));
        assert!(view.is_list());

        // no create/detail/edit from within the create form
        view.request_create();
        assert!(!view.request_create());
        assert!(!view.request_detail("r1"));
        assert!(!view.request_edit(Rec("r1")));
        assert_eq!(view.mode(), "create");

        // detail cannot jump straight to another detail or create
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_detail("r1");
        assert!(!view.request_detail("r2"));
        assert!(!view.request_create());
        assert_eq!(view.detail_id(), Some("r1"));
    }

    #[test]
    fn test_reset_to_list_from_anywhere() {
        let mut view: ViewState<Rec> = ViewState::default();
        view.request_detail("r1");
        view.request_edit(Rec("r1"));
        view.reset_to_list();
        assert!(view.is_list());
    }
}
