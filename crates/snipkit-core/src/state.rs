//! Selection lifecycle states and their capability predicates.
//!
//! Every mutating model operation is gated by the capability predicates
//! defined here, never by direct state comparison at the call site.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a selection in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionState {
    /// No selection is in progress; no starting point has been placed.
    NoSelection,
    /// A starting point has been placed and the boundary is being assembled.
    Selecting,
    /// The boundary is closed. Points may be moved and the region extracted,
    /// but no further points may be added.
    Selected,
    /// A background boundary search is running. Only undo (as cancellation)
    /// is permitted until it completes or is cancelled.
    Processing,
}

/// The full capability record for one state.
///
/// Produced by [`SelectionState::capabilities`]; useful when a caller wants
/// to snapshot everything an observer may do (e.g. to enable UI actions in
/// one pass).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub is_empty: bool,
    pub is_finished: bool,
    pub can_undo: bool,
    pub can_add_point: bool,
    pub can_finish: bool,
    pub can_edit: bool,
    pub is_processing: bool,
}

impl SelectionState {
    /// Maps this state to its capability record.
    pub fn capabilities(self) -> Capabilities {
        use SelectionState::*;
        Capabilities {
            is_empty: self == NoSelection,
            is_finished: self == Selected,
            can_undo: matches!(self, Selecting | Selected | Processing),
            can_add_point: matches!(self, NoSelection | Selecting),
            can_finish: self == Selecting,
            can_edit: self == Selected,
            is_processing: self == Processing,
        }
    }

    /// True only for [`SelectionState::NoSelection`].
    pub fn is_empty(self) -> bool {
        self.capabilities().is_empty
    }

    /// True only for [`SelectionState::Selected`].
    pub fn is_finished(self) -> bool {
        self.capabilities().is_finished
    }

    /// True while selecting, selected, or processing. During processing,
    /// undo doubles as cancellation.
    pub fn can_undo(self) -> bool {
        self.capabilities().can_undo
    }

    /// True when a point may be appended to the selection path.
    pub fn can_add_point(self) -> bool {
        self.capabilities().can_add_point
    }

    /// True when the boundary may be closed.
    pub fn can_finish(self) -> bool {
        self.capabilities().can_finish
    }

    /// True when control points may be moved.
    pub fn can_edit(self) -> bool {
        self.capabilities().can_edit
    }

    /// True while a background search is running.
    pub fn is_processing(self) -> bool {
        self.capabilities().is_processing
    }
}
