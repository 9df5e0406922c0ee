//! Integer grid coordinates and footprint operators
//!
//! The grid is unbounded in every direction. `+y` is "up" and `+x` is
//! "right"; a clockwise quarter turn maps `(x, y)` to `(y, -x)`.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A tile position on the grid
///
/// Ordering is lexicographic on `(x, y)`; edges and corners rely on it for
/// their canonical form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

impl GridCoordinate {
    pub const ORIGIN: GridCoordinate = GridCoordinate { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate-wise negation
    pub fn inverse(self) -> Self {
        -self
    }

    /// Rotate clockwise about the origin by `times` quarter turns
    pub fn rotate(self, times: u32) -> Self {
        let mut c = self;
        for _ in 0..times % 4 {
            c = GridCoordinate::new(c.y, -c.x);
        }
        c
    }

    /// Euclidean distance from the origin
    pub fn distance_from_centre(self) -> f32 {
        ((self.x as f32).powi(2) + (self.y as f32).powi(2)).sqrt()
    }

    /// Largest absolute component (Chebyshev norm)
    pub fn chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// True when `other` is one of the four orthogonal neighbours
    pub fn is_orthogonal_neighbour(self, other: GridCoordinate) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }

    /// True when `other` touches this tile only at a lattice point
    pub fn is_diagonal_neighbour(self, other: GridCoordinate) -> bool {
        (self.x - other.x).abs() == 1 && (self.y - other.y).abs() == 1
    }

    /// World-plane position of the tile for a given tile size (z is always 0)
    pub fn world_position(self, tile_size: f32) -> [f32; 3] {
        [self.x as f32 * tile_size, self.y as f32 * tile_size, 0.0]
    }

    /// Neighbour one step in `direction`
    pub fn step(self, direction: Direction) -> Self {
        self + direction.offset()
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for GridCoordinate {
    type Output = GridCoordinate;

    fn add(self, rhs: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridCoordinate {
    type Output = GridCoordinate;

    fn sub(self, rhs: GridCoordinate) -> GridCoordinate {
        GridCoordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for GridCoordinate {
    type Output = GridCoordinate;

    fn neg(self) -> GridCoordinate {
        GridCoordinate::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from((x, y): (i32, i32)) -> Self {
        GridCoordinate::new(x, y)
    }
}

/// One of the four orthogonal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit offset for this direction
    pub fn offset(self) -> GridCoordinate {
        match self {
            Direction::Up => GridCoordinate::new(0, 1),
            Direction::Right => GridCoordinate::new(1, 0),
            Direction::Down => GridCoordinate::new(0, -1),
            Direction::Left => GridCoordinate::new(-1, 0),
        }
    }
}

/// Neighbours of `coord`
///
/// With `direction == None` this is the four orthogonal neighbours, followed
/// by the four diagonal ones when `include_diagonal` is set. A direction
/// restricts the result to that single orthogonal neighbour and diagonals
/// are never added.
pub fn adjacent(
    coord: GridCoordinate,
    include_diagonal: bool,
    direction: Option<Direction>,
) -> Vec<GridCoordinate> {
    if let Some(direction) = direction {
        return vec![coord.step(direction)];
    }

    let mut neighbours = Vec::with_capacity(if include_diagonal { 8 } else { 4 });
    neighbours.push(GridCoordinate::new(coord.x + 1, coord.y));
    neighbours.push(GridCoordinate::new(coord.x - 1, coord.y));
    neighbours.push(GridCoordinate::new(coord.x, coord.y + 1));
    neighbours.push(GridCoordinate::new(coord.x, coord.y - 1));

    if include_diagonal {
        neighbours.push(GridCoordinate::new(coord.x + 1, coord.y + 1));
        neighbours.push(GridCoordinate::new(coord.x + 1, coord.y - 1));
        neighbours.push(GridCoordinate::new(coord.x - 1, coord.y + 1));
        neighbours.push(GridCoordinate::new(coord.x - 1, coord.y - 1));
    }

    neighbours
}

/// Grow a footprint `distance` times by the adjacency of every current tile
pub fn expand<I>(
    footprint: I,
    distance: u32,
    include_diagonal: bool,
    direction: Option<Direction>,
) -> BTreeSet<GridCoordinate>
where
    I: IntoIterator<Item = GridCoordinate>,
{
    let mut grown: BTreeSet<GridCoordinate> = footprint.into_iter().collect();
    for _ in 0..distance {
        let frontier: Vec<GridCoordinate> = grown
            .iter()
            .flat_map(|&c| adjacent(c, include_diagonal, direction))
            .collect();
        grown.extend(frontier);
    }
    grown
}

/// Rotate every offset of a footprint clockwise by `times` quarter turns
pub fn rotate_clockwise<'a, I>(footprint: I, times: u32) -> BTreeSet<GridCoordinate>
where
    I: IntoIterator<Item = &'a GridCoordinate>,
{
    footprint.into_iter().map(|c| c.rotate(times)).collect()
}

/// Translate every offset of a footprint by `by`
pub fn translate<'a, I>(footprint: I, by: GridCoordinate) -> BTreeSet<GridCoordinate>
where
    I: IntoIterator<Item = &'a GridCoordinate>,
{
    footprint.into_iter().map(|&c| c + by).collect()
}

/// Largest Chebyshev distance from the origin among the offsets, 0 if empty
pub fn max_extent<'a, I>(footprint: I) -> i32
where
    I: IntoIterator<Item = &'a GridCoordinate>,
{
    footprint.into_iter().map(|c| c.chebyshev()).max().unwrap_or(0)
}

/// An inclusive, axis-aligned box of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRect {
    pub min: GridCoordinate,
    pub max: GridCoordinate,
}

impl TileRect {
    /// Build a box from any two opposite corners
    pub fn new(a: GridCoordinate, b: GridCoordinate) -> Self {
        Self {
            min: GridCoordinate::new(a.x.min(b.x), a.y.min(b.y)),
            max: GridCoordinate::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Number of tiles in the box
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    /// Every tile inside the box
    pub fn fill(&self) -> Vec<GridCoordinate> {
        (self.min.x..=self.max.x)
            .flat_map(|x| (self.min.y..=self.max.y).map(move |y| GridCoordinate::new(x, y)))
            .collect()
    }
}
