//! Error handling for SnipKit.
//!
//! The taxonomy keeps the failure classes distinct so callers can react to
//! each with a targeted message:
//! - Selection errors (precondition and argument-range violations)
//! - Extraction errors (region extraction requested when not ready)
//! - Search errors (boundary search failures; cancellation is *not* an
//!   error, it is a normal search outcome)
//!
//! All error types use `thiserror`.

use thiserror::Error;

use crate::geometry::Point;
use crate::state::SelectionState;

/// Selection model error type.
///
/// Covers caller errors: operations invoked in a state whose capability
/// predicate forbids them, and invalid arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Operation invoked in a state that does not permit it
    #[error("cannot {op} in state {state:?}")]
    InvalidState {
        /// The operation that was attempted.
        op: &'static str,
        /// The state the model was in.
        state: SelectionState,
    },

    /// Control point index outside `[0, len)`
    #[error("invalid control point index {index} (have {len} points)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of control points.
        len: usize,
    },

    /// Operation requires a starting point but the selection path has none
    #[error("selection path has no starting point")]
    NoStartingPoint,

    /// A fixed-arity strategy was given more control points than it allows
    #[error("strategy accepts at most {max} control points")]
    TooManyPoints {
        /// The strategy's control point limit.
        max: usize,
    },

    /// A polyline was constructed from an empty point sequence
    #[error("polyline must contain at least one point")]
    EmptyPolyLine,

    /// The strategy needs an image and the model has none
    #[error("operation requires an image")]
    NoImage,
}

/// Region extraction error type.
///
/// Distinct from [`SelectionError`] so a host can tell "you used the API
/// wrong" apart from "the selection is not ready to be saved".
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The selection is not finished
    #[error("cannot extract region in state {state:?}; selection must be finished")]
    NotReady {
        /// The state the model was in.
        state: SelectionState,
    },

    /// The selection is finished but encloses nothing
    #[error("selection is empty; nothing to extract")]
    EmptySelection,

    /// No image is associated with the model
    #[error("no image to extract from")]
    NoImage,

    /// Encoding the extracted region failed
    #[error("failed to encode extracted region: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing to the caller's sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boundary search engine error type.
///
/// Cancellation is deliberately absent: a cancelled search is a normal
/// terminal outcome, not a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No path exists between the two points
    #[error("no path from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y)]
    NoPath {
        /// The search anchor.
        from: Point,
        /// The unreachable target.
        to: Point,
    },

    /// A query point lies outside the image
    #[error("point ({}, {}) is outside the {width}x{height} image", point.x, point.y)]
    OutOfBounds {
        /// The offending point.
        point: Point,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// A search result was requested but no search has completed
    #[error("no completed search is available")]
    NotSolved,
}

/// Main error type for SnipKit.
///
/// A unified error that can represent any failure from all layers; the
/// primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Selection model error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Region extraction error
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Boundary search error
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl Error {
    /// Check if this is a precondition (invalid state) violation.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::Selection(SelectionError::InvalidState { .. }))
    }

    /// Check if this is an argument-range error.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::Selection(SelectionError::IndexOutOfRange { .. })
                | Error::Selection(SelectionError::NoStartingPoint)
                | Error::Selection(SelectionError::TooManyPoints { .. })
        )
    }

    /// Check if this is a resource error from region extraction.
    pub fn is_extract_error(&self) -> bool {
        matches!(self, Error::Extract(_))
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for selection model operations.
pub type SelectionResult<T> = std::result::Result<T, SelectionError>;
