//! # SnipKit Select
//!
//! Selection models for tracing a closed region boundary over a raster
//! image. One [`SelectionModel`] drives a tracing session: it owns the
//! control points, boundary segments, and lifecycle state, and delegates
//! geometry construction to the chosen [`TracerKind`] - straight edges,
//! a synthesized circle, a smoothed spline, or intelligent scissors
//! backed by the asynchronous boundary search engine.

mod extract;
pub mod model;
pub mod tracer;

pub use model::SelectionModel;
pub use tracer::{TracerKind, CIRCLE_SAMPLES, SPLINE_SAMPLES_PER_SPAN};

// The engine surface a scissors-driven host needs (progress overlays).
pub use snipkit_scissors::{NodeClass, SearchSnapshot};
