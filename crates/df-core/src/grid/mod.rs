//! Grid geometry
//!
//! Coordinates, edges and corners on an unbounded integer grid, plus the
//! footprint operators used to build and compare room shapes.

mod coord;
mod edge;

pub use coord::{
    Direction, GridCoordinate, TileRect, adjacent, expand, max_extent, rotate_clockwise, translate,
};
pub use edge::{GridCorner, GridEdge};
