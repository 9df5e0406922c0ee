//! Room shapes and the catalog they are sampled from
//!
//! A shape is a set of tile offsets around an implicit local origin. The
//! catalog holds every rectangle in a size range plus an L-shaped footprint
//! in its four orientations. Only a random, capped subset is used per
//! session because the offset table grows with the square of its size.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::grid::{Direction, GridCoordinate, expand, max_extent, rotate_clockwise};
use crate::rng::DungeonRng;

/// A room footprint independent of position
///
/// Two shapes are equal when their offset sets are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct RoomShape {
    offsets: BTreeSet<GridCoordinate>,
}

#[derive(Deserialize)]
struct RawShape {
    offsets: BTreeSet<GridCoordinate>,
}

impl TryFrom<RawShape> for RoomShape {
    type Error = GenerationError;

    fn try_from(raw: RawShape) -> Result<Self> {
        RoomShape::new(raw.offsets)
    }
}

impl RoomShape {
    /// Build a shape from tile offsets; an empty set is rejected
    pub fn new<I>(offsets: I) -> Result<Self>
    where
        I: IntoIterator<Item = GridCoordinate>,
    {
        let offsets: BTreeSet<GridCoordinate> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(GenerationError::InvalidShapeParameters {
                reason: "a room shape needs at least one tile".to_string(),
            });
        }
        Ok(Self { offsets })
    }

    /// A `width` x `height` rectangle centred as close to the origin as the
    /// grid allows (even sizes lean towards negative coordinates)
    pub fn rectangle(width: i32, height: i32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!("rectangle {width}x{height} has no tiles"),
            });
        }
        let x0 = -(width / 2);
        let y0 = -(height / 2);
        Self::new(
            (x0..x0 + width).flat_map(|x| (y0..y0 + height).map(move |y| GridCoordinate::new(x, y))),
        )
    }

    /// An L of two bars, each `leg` tiles long and two tiles thick, meeting
    /// at the origin and extending up and right
    pub fn l_shape(leg: i32) -> Result<Self> {
        if leg < 3 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!("an L-shape needs legs of at least 3 tiles, got {leg}"),
            });
        }
        let reach = (leg - 1) as u32;
        let origin = [GridCoordinate::ORIGIN];
        let vertical = expand(
            expand(origin, reach, false, Some(Direction::Up)),
            1,
            false,
            Some(Direction::Right),
        );
        let horizontal = expand(
            expand(origin, reach, false, Some(Direction::Right)),
            1,
            false,
            Some(Direction::Up),
        );
        Self::new(vertical.into_iter().chain(horizontal))
    }

    pub fn offsets(&self) -> &BTreeSet<GridCoordinate> {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: GridCoordinate) -> bool {
        self.offsets.contains(&offset)
    }

    pub fn contains_origin(&self) -> bool {
        self.contains(GridCoordinate::ORIGIN)
    }

    /// Largest Chebyshev distance of any offset from the origin
    pub fn max_extent(&self) -> i32 {
        max_extent(&self.offsets)
    }

    /// This shape turned clockwise by `times` quarter turns
    pub fn rotated(&self, times: u32) -> Self {
        Self {
            offsets: rotate_clockwise(&self.offsets, times),
        }
    }

    /// Global tiles covered when the shape is centred on `centre`
    pub fn footprint_at(&self, centre: GridCoordinate) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.offsets.iter().map(move |&offset| offset + centre)
    }
}

impl fmt::Display for RoomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min_x = self.offsets.iter().map(|c| c.x).min().unwrap_or(0);
        let max_x = self.offsets.iter().map(|c| c.x).max().unwrap_or(0);
        let min_y = self.offsets.iter().map(|c| c.y).min().unwrap_or(0);
        let max_y = self.offsets.iter().map(|c| c.y).max().unwrap_or(0);
        write!(
            f,
            "{} tiles, {}x{}",
            self.len(),
            max_x - min_x + 1,
            max_y - min_y + 1
        )
    }
}

/// Shapes available to one generation session, addressed by index
#[derive(Debug, Clone, Default)]
pub struct ShapeCatalog {
    shapes: Vec<Arc<RoomShape>>,
}

impl ShapeCatalog {
    pub fn new(shapes: Vec<Arc<RoomShape>>) -> Self {
        Self { shapes }
    }

    /// Every rectangle with sides in `min_size..=max_size`, plus the L-shape
    /// (legs of `max_size`) in four orientations when requested and large
    /// enough
    ///
    /// Duplicates are not removed; shapes compare structurally downstream.
    pub fn build_all(min_size: i32, max_size: i32, include_l_shapes: bool) -> Result<Self> {
        if min_size < 1 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!("minimum room size must be at least 1, got {min_size}"),
            });
        }
        if min_size > max_size {
            return Err(GenerationError::InvalidShapeParameters {
                reason: format!("minimum room size {min_size} exceeds maximum {max_size}"),
            });
        }

        let mut shapes = Vec::new();
        for width in min_size..=max_size {
            for height in min_size..=max_size {
                shapes.push(Arc::new(RoomShape::rectangle(width, height)?));
            }
        }

        if include_l_shapes && max_size >= 3 {
            let l_shape = RoomShape::l_shape(max_size)?;
            for turns in 0..4 {
                shapes.push(Arc::new(l_shape.rotated(turns)));
            }
        }

        log::debug!(
            "Built shape catalog of {} shapes (sizes {}..={})",
            shapes.len(),
            min_size,
            max_size
        );
        Ok(Self { shapes })
    }

    /// Shuffle a copy of the catalog and keep the first `max_count` shapes
    pub fn sample(&self, max_count: usize, rng: &mut DungeonRng) -> Result<Self> {
        if max_count == 0 {
            return Err(GenerationError::InvalidShapeParameters {
                reason: "the sampled catalog must hold at least one shape".to_string(),
            });
        }
        let mut shapes = self.shapes.clone();
        rng.shuffle(&mut shapes);
        shapes.truncate(max_count);
        Ok(Self { shapes })
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<RoomShape>> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RoomShape>> {
        self.shapes.iter()
    }

    pub fn shapes(&self) -> &[Arc<RoomShape>] {
        &self.shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i32, y: i32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn test_rectangle_centering() {
        let square = RoomShape::rectangle(2, 2).unwrap();
        let expected: BTreeSet<_> = [c(-1, -1), c(-1, 0), c(0, -1), c(0, 0)].into_iter().collect();
        assert_eq!(square.offsets(), &expected);

        let wide = RoomShape::rectangle(3, 1).unwrap();
        assert_eq!(wide.len(), 3);
        assert!(wide.contains(c(-1, 0)) && wide.contains(c(1, 0)));
        assert_eq!(wide.max_extent(), 1);
    }

    #[test]
    fn test_rectangles_contain_origin() {
        for w in 1..=5 {
            for h in 1..=5 {
                let shape = RoomShape::rectangle(w, h).unwrap();
                assert_eq!(shape.len() as i32, w * h);
                assert!(shape.contains_origin());
            }
        }
    }

    #[test]
    fn test_empty_shape_rejected() {
        assert!(RoomShape::new(Vec::new()).is_err());
        assert!(RoomShape::rectangle(0, 3).is_err());
    }

    #[test]
    fn test_l_shape() {
        let l = RoomShape::l_shape(4).unwrap();
        // two 2x4 bars overlapping in a 2x2 block
        assert_eq!(l.len(), 8 + 8 - 4);
        assert!(l.contains_origin());
        assert!(l.contains(c(1, 3)));
        assert!(l.contains(c(3, 1)));
        assert!(!l.contains(c(2, 2)));
        assert!(RoomShape::l_shape(2).is_err());
    }

    #[test]
    fn test_deserialize_shape() {
        let json = serde_json::to_string(&RoomShape::rectangle(2, 3).unwrap()).unwrap();
        let shape: RoomShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, RoomShape::rectangle(2, 3).unwrap());

        assert!(serde_json::from_str::<RoomShape>(r#"{"offsets":[]}"#).is_err());
    }

    #[test]
    fn test_rotations_are_distinct_for_l_shape() {
        let l = RoomShape::l_shape(3).unwrap();
        let rotations: Vec<_> = (0..4).map(|t| l.rotated(t)).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(rotations[i], rotations[j]);
            }
        }
        assert_eq!(l.rotated(4), l);
    }

    #[test]
    fn test_shape_equality_is_structural() {
        let a = RoomShape::new([c(0, 0), c(1, 0)]).unwrap();
        let b = RoomShape::new([c(1, 0), c(0, 0)]).unwrap();
        let same_size = RoomShape::new([c(0, 0), c(0, 1)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, same_size);
    }

    #[test]
    fn test_footprint_at() {
        let square = RoomShape::rectangle(2, 2).unwrap();
        let tiles: BTreeSet<_> = square.footprint_at(c(10, 5)).collect();
        assert!(tiles.contains(&c(9, 4)));
        assert!(tiles.contains(&c(10, 5)));
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn test_build_all_counts() {
        let catalog = ShapeCatalog::build_all(2, 4, true).unwrap();
        assert_eq!(catalog.len(), 9 + 4);

        let no_l = ShapeCatalog::build_all(2, 4, false).unwrap();
        assert_eq!(no_l.len(), 9);

        // legs of 2 would collapse into a square, so no L-shapes
        let small = ShapeCatalog::build_all(2, 2, true).unwrap();
        assert_eq!(small.len(), 1);
    }

    #[test]
    fn test_build_all_invalid_bounds() {
        assert!(matches!(
            ShapeCatalog::build_all(0, 3, true),
            Err(GenerationError::InvalidShapeParameters { .. })
        ));
        assert!(matches!(
            ShapeCatalog::build_all(5, 3, true),
            Err(GenerationError::InvalidShapeParameters { .. })
        ));
    }

    #[test]
    fn test_sample_caps_size() {
        let catalog = ShapeCatalog::build_all(2, 4, true).unwrap();
        let mut rng = DungeonRng::new(5);
        let sampled = catalog.sample(12, &mut rng).unwrap();
        assert_eq!(sampled.len(), 12);
        for shape in sampled.iter() {
            assert!(catalog.iter().any(|s| s == shape));
        }

        let all = catalog.sample(100, &mut rng).unwrap();
        assert_eq!(all.len(), catalog.len());

        assert!(catalog.sample(0, &mut rng).is_err());
    }

    #[test]
    fn test_sample_is_deterministic_per_seed() {
        let catalog = ShapeCatalog::build_all(2, 4, true).unwrap();
        let a = catalog.sample(5, &mut DungeonRng::new(11)).unwrap();
        let b = catalog.sample(5, &mut DungeonRng::new(11)).unwrap();
        assert_eq!(a.shapes(), b.shapes());
    }
}
