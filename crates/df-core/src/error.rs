//! Errors raised while building a floor plan
//!
//! Geometric and precondition violations abort the generation session and
//! carry enough context to tell which step and which shape or coordinate
//! caused them. Nothing here is retried inside the engine.

use thiserror::Error;

use crate::grid::{GridCoordinate, GridEdge};

/// Failures of a generation session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Invalid room shape parameters: {reason}")]
    InvalidShapeParameters { reason: String },

    #[error("Invalid room count: {requested} (at least one room is required)")]
    InvalidRoomCount { requested: usize },

    /// `step` is the index of the room being placed, which is also the
    /// number of rooms already placed
    #[error("No placement candidates at step {step} for shape {shape_index}")]
    NoPlacementCandidates { step: usize, shape_index: usize },

    #[error("Edges {first} and {second} do not form a corner")]
    DegenerateCornerConstruction { first: GridEdge, second: GridEdge },

    #[error("Tiles from {min} do not form a 2x2 corner block")]
    InvalidCorner { min: GridCoordinate },

    #[error("Edge endpoints must differ, both are {coordinate}")]
    DegenerateEdge { coordinate: GridCoordinate },

    #[error("Connection from room {child} to room {parent} has no shared boundary for a door")]
    EmptyDoorCandidates { child: usize, parent: usize },

    #[error("Shape index {index} is outside the catalog of {len} shapes")]
    UnknownShape { index: usize, len: usize },
}

/// Result alias for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;
