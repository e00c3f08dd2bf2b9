//! # SnipKit Core
//!
//! Core types for SnipKit's region tracing stack: geometry primitives,
//! the selection lifecycle state machine, the error taxonomy, the
//! property-change notifier, and read-only raster image access.

pub mod error;
pub mod events;
pub mod geometry;
pub mod raster;
pub mod state;

pub use error::{Error, ExtractError, Result, SearchError, SelectionError, SelectionResult};
pub use events::{ChangeNotifier, EventFilter, ModelEvent, Property, SubscriptionId};
pub use geometry::{Point, PolyLine};
pub use raster::{ImageSource, Raster};
pub use state::{Capabilities, SelectionState};
