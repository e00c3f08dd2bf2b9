//! Event type definitions for the change notifier.

use serde::{Deserialize, Serialize};

use crate::geometry::PolyLine;
use crate::state::SelectionState;

/// The observable properties of a selection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// The lifecycle state changed.
    State,
    /// The selection geometry (segments) changed.
    Selection,
    /// The associated image changed.
    Image,
    /// A background search reported progress.
    Progress,
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Property::State => write!(f, "state"),
            Property::Selection => write!(f, "selection"),
            Property::Image => write!(f, "image"),
            Property::Progress => write!(f, "progress"),
        }
    }
}

/// A property-change event raised by a selection model.
///
/// Events carry the old and new values where both exist; geometry events
/// carry the new segment list (the previous geometry is superseded and not
/// retained).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelEvent {
    /// The lifecycle state changed.
    State {
        /// State before the transition.
        old: SelectionState,
        /// State after the transition.
        new: SelectionState,
    },
    /// The selection geometry changed.
    Selection {
        /// The segments after the change, in boundary order.
        segments: Vec<PolyLine>,
    },
    /// A new image was associated with the model.
    Image {
        /// New image width in pixels.
        width: u32,
        /// New image height in pixels.
        height: u32,
    },
    /// Background search progress, as a monotonic percentage.
    Progress {
        /// Completion estimate in `0..=100`.
        percent: u8,
    },
}

impl ModelEvent {
    /// Get the property this event belongs to.
    pub fn property(&self) -> Property {
        match self {
            ModelEvent::State { .. } => Property::State,
            ModelEvent::Selection { .. } => Property::Selection,
            ModelEvent::Image { .. } => Property::Image,
            ModelEvent::Progress { .. } => Property::Progress,
        }
    }
}
