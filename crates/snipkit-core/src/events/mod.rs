//! # Property-change events
//!
//! Provides the model-scoped change notifier used by every selection model.
//! There is deliberately no global bus: each model owns its own
//! [`ChangeNotifier`], so events never leak across tracing sessions.
//!
//! ## Overview
//!
//! - A model publishes one typed event per logically atomic mutation, after
//!   the mutation is internally consistent
//! - Subscribers filter by property and receive events synchronously, in
//!   mutation order, on the publishing thread
//!
//! ## Usage
//!
//! ```rust,ignore
//! use snipkit_core::events::{EventFilter, ModelEvent, Property};
//!
//! let sub = model.notifier().subscribe(
//!     EventFilter::Properties(vec![Property::State]),
//!     |event| {
//!         if let ModelEvent::State { old, new } = event {
//!             println!("state: {:?} -> {:?}", old, new);
//!         }
//!     },
//! );
//!
//! // ... later
//! model.notifier().unsubscribe(sub);
//! ```

mod model_event;
mod notifier;

pub use model_event::*;
pub use notifier::*;
