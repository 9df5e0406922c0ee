//! Edges between tiles and the corners where walls meet
//!
//! An edge is the boundary between two tiles; walls and doors are edges.
//! A corner is the block of four tiles meeting at one lattice point; corner
//! pillars sit there.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::{GridCoordinate, adjacent};
use crate::error::{GenerationError, Result};

/// A pair of distinct coordinates
///
/// Undirected edges are stored in canonical order (`a < b`) so equality and
/// hashing do not depend on the order the endpoints were given in. Directed
/// edges keep their order and never compare equal to an undirected edge.
/// Deserializing goes through the same constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawEdge")]
pub struct GridEdge {
    a: GridCoordinate,
    b: GridCoordinate,
    directed: bool,
}

impl GridEdge {
    /// Canonical undirected edge between `a` and `b`
    pub fn new(a: GridCoordinate, b: GridCoordinate) -> Result<Self> {
        if a == b {
            return Err(GenerationError::DegenerateEdge { coordinate: a });
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            a,
            b,
            directed: false,
        })
    }

    /// Edge going from `from` to `to`
    pub fn directed(from: GridCoordinate, to: GridCoordinate) -> Result<Self> {
        if from == to {
            return Err(GenerationError::DegenerateEdge { coordinate: from });
        }
        Ok(Self {
            a: from,
            b: to,
            directed: true,
        })
    }

    pub fn a(&self) -> GridCoordinate {
        self.a
    }

    pub fn b(&self) -> GridCoordinate {
        self.b
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.a == coord || self.b == coord
    }

    /// The endpoint that is not `coord`, if `coord` is an endpoint
    pub fn other(&self, coord: GridCoordinate) -> Option<GridCoordinate> {
        if self.a == coord {
            Some(self.b)
        } else if self.b == coord {
            Some(self.a)
        } else {
            None
        }
    }

    /// True when the endpoints are orthogonal neighbours
    pub fn is_unit(&self) -> bool {
        self.a.is_orthogonal_neighbour(self.b)
    }

    /// The single coordinate shared with `other`
    ///
    /// `None` if the edges share no coordinate or both of them.
    pub fn shares_single_coordinate(&self, other: &GridEdge) -> Option<GridCoordinate> {
        let shares_a = other.contains(self.a);
        let shares_b = other.contains(self.b);
        match (shares_a, shares_b) {
            (true, false) => Some(self.a),
            (false, true) => Some(self.b),
            _ => None,
        }
    }

    /// True when both edges are unit edges meeting at a right angle
    ///
    /// They must share exactly one coordinate and their other endpoints must
    /// be diagonal neighbours.
    pub fn forms_corner(&self, other: &GridEdge) -> bool {
        if !self.is_unit() || !other.is_unit() {
            return false;
        }
        let Some(shared) = self.shares_single_coordinate(other) else {
            return false;
        };
        match (self.other(shared), other.other(shared)) {
            (Some(p), Some(q)) => p.is_diagonal_neighbour(q),
            _ => false,
        }
    }

    /// Midpoint of the boundary in world space
    pub fn world_midpoint(&self, tile_size: f32) -> [f32; 3] {
        let [ax, ay, _] = self.a.world_position(tile_size);
        let [bx, by, _] = self.b.world_position(tile_size);
        [(ax + bx) / 2.0, (ay + by) / 2.0, 0.0]
    }
}

#[derive(Deserialize)]
struct RawEdge {
    a: GridCoordinate,
    b: GridCoordinate,
    #[serde(default)]
    directed: bool,
}

impl TryFrom<RawEdge> for GridEdge {
    type Error = GenerationError;

    fn try_from(raw: RawEdge) -> Result<Self> {
        if raw.directed {
            GridEdge::directed(raw.a, raw.b)
        } else {
            GridEdge::new(raw.a, raw.b)
        }
    }
}

impl fmt::Display for GridEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.directed { "->" } else { "-" };
        write!(f, "{}{}{}", self.a, sep, self.b)
    }
}

/// The four tiles around one lattice point, in sorted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCorner")]
pub struct GridCorner {
    tiles: [GridCoordinate; 4],
}

impl GridCorner {
    /// Corner whose lowest tile (smallest x, then y) is `min`
    pub fn from_block(min: GridCoordinate) -> Self {
        Self {
            tiles: [
                min,
                GridCoordinate::new(min.x, min.y + 1),
                GridCoordinate::new(min.x + 1, min.y),
                GridCoordinate::new(min.x + 1, min.y + 1),
            ],
        }
    }

    /// Corner formed by two perpendicular edges sharing one tile
    pub fn from_edges(first: &GridEdge, second: &GridEdge) -> Result<Self> {
        let degenerate = || GenerationError::DegenerateCornerConstruction {
            first: *first,
            second: *second,
        };
        if !first.forms_corner(second) {
            return Err(degenerate());
        }

        let shared = first.shares_single_coordinate(second).ok_or_else(degenerate)?;
        let p = first.other(shared).ok_or_else(degenerate)?;
        let q = second.other(shared).ok_or_else(degenerate)?;

        // The fourth tile neighbours both p and q and is not the shared one.
        let fourth = adjacent(p, false, None)
            .into_iter()
            .find(|&c| c != shared && c.is_orthogonal_neighbour(q))
            .ok_or_else(degenerate)?;

        let mut tiles = [shared, p, q, fourth];
        tiles.sort();
        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[GridCoordinate; 4] {
        &self.tiles
    }

    /// Lowest tile of the block
    pub fn min(&self) -> GridCoordinate {
        self.tiles[0]
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.tiles.contains(&coord)
    }

    /// World position of the shared lattice point
    pub fn world_position(&self, tile_size: f32) -> [f32; 3] {
        let [x, y, _] = self.min().world_position(tile_size);
        [x + tile_size / 2.0, y + tile_size / 2.0, 0.0]
    }
}

#[derive(Deserialize)]
struct RawCorner {
    tiles: [GridCoordinate; 4],
}

impl TryFrom<RawCorner> for GridCorner {
    type Error = GenerationError;

    /// Accepts the tiles in any order as long as they form a 2x2 block
    fn try_from(raw: RawCorner) -> Result<Self> {
        let mut tiles = raw.tiles;
        tiles.sort();
        let corner = GridCorner::from_block(tiles[0]);
        if corner.tiles != tiles {
            return Err(GenerationError::InvalidCorner { min: tiles[0] });
        }
        Ok(corner)
    }
}

impl fmt::Display for GridCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.tiles[0], self.tiles[1], self.tiles[2], self.tiles[3]
        )
    }
}
