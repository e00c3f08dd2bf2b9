//! # SnipKit Scissors
//!
//! The boundary search engine behind SnipKit's intelligent-scissors
//! tracing strategy: a cancellable, progress-reporting shortest-path
//! search over a cost graph derived from local image gradients.
//!
//! The engine is independent of the selection model. It derives a
//! [`CostField`] once per image, runs full-tree Dijkstra expansions from
//! any anchor on a worker thread, and exposes a lock-free
//! [`SearchSnapshot`] that observers may query while the search runs.

pub mod cost;
pub mod engine;
pub mod search;
pub mod snapshot;

pub use cost::CostField;
pub use engine::{BoundaryEngine, ProgressFn, SearchHandle, SearchOutcome};
pub use search::{find_path, PathTree};
pub use snapshot::{NodeClass, SearchSnapshot};
