//! Relative placements between pairs of room shapes
//!
//! For an ordered pair of shapes (A, B) the table holds every centre offset
//! at which B touches A (placed at the origin) without overlapping it. The
//! offsets are found by a breadth-first search over the lattice, bounded by
//! the extents of both shapes.
//!
//! Translation invariance gives `offsets(B, A) == -offsets(A, B)`, so only
//! one BFS runs per unordered pair. Self pairs are always searched directly.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use crate::grid::{GridCoordinate, adjacent};
use crate::shapes::{RoomShape, ShapeCatalog};

/// True when the two placed footprints share at least one tile
pub fn overlap(
    a: &RoomShape,
    a_centre: GridCoordinate,
    b: &RoomShape,
    b_centre: GridCoordinate,
) -> bool {
    let a_tiles: HashSet<GridCoordinate> = a.footprint_at(a_centre).collect();
    b.footprint_at(b_centre).any(|tile| a_tiles.contains(&tile))
}

/// True when the placed footprints do not overlap and some tile of B is an
/// orthogonal neighbour of some tile of A
pub fn touching(
    a: &RoomShape,
    a_centre: GridCoordinate,
    b: &RoomShape,
    b_centre: GridCoordinate,
) -> bool {
    let a_tiles: HashSet<GridCoordinate> = a.footprint_at(a_centre).collect();
    touches_tiles(&a_tiles, b, b_centre)
}

fn touches_tiles(a_tiles: &HashSet<GridCoordinate>, b: &RoomShape, b_centre: GridCoordinate) -> bool {
    if b.footprint_at(b_centre).any(|tile| a_tiles.contains(&tile)) {
        return false;
    }
    b.footprint_at(b_centre).any(|tile| {
        adjacent(tile, false, None)
            .into_iter()
            .any(|n| a_tiles.contains(&n))
    })
}

/// Every centre at which `b` touches `a` placed at the origin, in BFS order
pub fn offsets_between(a: &RoomShape, b: &RoomShape) -> Vec<GridCoordinate> {
    // No touching centre lies further than this ring; the sum of components
    // only exceeds it once the BFS has moved past that ring.
    let max_range = 2 * (a.max_extent() + b.max_extent() + 1);

    let a_tiles: HashSet<GridCoordinate> = a.footprint_at(GridCoordinate::ORIGIN).collect();
    // A centre inside A can only be skipped when B covers its own centre.
    let skip_inside_a = b.contains_origin();

    let mut offsets = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(GridCoordinate::ORIGIN);
    queue.push_back(GridCoordinate::ORIGIN);

    while let Some(centre) = queue.pop_front() {
        if centre.x + centre.y > max_range {
            break;
        }

        if !(skip_inside_a && a_tiles.contains(&centre)) && touches_tiles(&a_tiles, b, centre) {
            offsets.push(centre);
        }

        for next in adjacent(centre, true, None) {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    offsets
}

/// Precomputed offsets for every ordered pair of catalog shapes
///
/// Keys are catalog indices `(existing, new)`. A missing entry reads as an
/// empty offset list.
#[derive(Debug, Clone, Default)]
pub struct OffsetTable {
    entries: HashMap<(usize, usize), Vec<GridCoordinate>>,
}

impl OffsetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the table for every pair of shapes in `catalog`
    pub fn build(catalog: &ShapeCatalog) -> Self {
        let mut table = Self::new();
        let shapes = catalog.shapes();

        for i in 0..shapes.len() {
            for j in i..shapes.len() {
                if table.contains(i, j) {
                    continue;
                }
                let offsets = offsets_between(&shapes[i], &shapes[j]);
                if i != j {
                    let inverse = offsets.iter().map(|o| o.inverse()).collect();
                    table.insert(j, i, inverse);
                }
                table.insert(i, j, offsets);
            }
        }

        log::debug!(
            "Offset table: {} entries, {} offsets",
            table.len(),
            table.total_offsets()
        );
        table
    }

    pub fn insert(&mut self, existing: usize, new: usize, offsets: Vec<GridCoordinate>) {
        self.entries.insert((existing, new), offsets);
    }

    pub fn contains(&self, existing: usize, new: usize) -> bool {
        self.entries.contains_key(&(existing, new))
    }

    /// Offsets of the `new` shape's centre relative to the `existing` one's
    pub fn get(&self, existing: usize, new: usize) -> &[GridCoordinate] {
        self.entries
            .get(&(existing, new))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of ordered pairs stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of offsets over all entries
    pub fn total_offsets(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn c(x: i32, y: i32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn as_set(offsets: &[GridCoordinate]) -> BTreeSet<GridCoordinate> {
        offsets.iter().copied().collect()
    }

    #[test]
    fn test_overlap_and_touching() {
        let square = RoomShape::rectangle(2, 2).unwrap();
        assert!(overlap(&square, c(0, 0), &square, c(1, 0)));
        assert!(!touching(&square, c(0, 0), &square, c(1, 0)));
        assert!(touching(&square, c(0, 0), &square, c(2, 0)));
        assert!(touching(&square, c(0, 0), &square, c(2, 1)));
        // diagonal contact only
        assert!(!touching(&square, c(0, 0), &square, c(2, 2)));
        // gap of one tile
        assert!(!touching(&square, c(0, 0), &square, c(3, 0)));
    }

    #[test]
    fn test_square_self_offsets() {
        let square = RoomShape::rectangle(2, 2).unwrap();
        let offsets = as_set(&offsets_between(&square, &square));

        let mut expected = BTreeSet::new();
        for k in -1..=1 {
            expected.insert(c(2, k));
            expected.insert(c(-2, k));
            expected.insert(c(k, 2));
            expected.insert(c(k, -2));
        }
        assert_eq!(offsets, expected);

        // the flush, face-to-face placements
        for flush in [c(2, 0), c(-2, 0), c(0, 2), c(0, -2)] {
            assert!(offsets.contains(&flush));
        }
    }

    #[test]
    fn test_single_tile_offsets() {
        let tile = RoomShape::rectangle(1, 1).unwrap();
        let offsets = as_set(&offsets_between(&tile, &tile));
        let expected: BTreeSet<_> = [c(1, 0), c(-1, 0), c(0, 1), c(0, -1)].into_iter().collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn test_offsets_have_no_duplicates() {
        let l = RoomShape::l_shape(4).unwrap();
        let rect = RoomShape::rectangle(3, 2).unwrap();
        let offsets = offsets_between(&l, &rect);
        assert_eq!(as_set(&offsets).len(), offsets.len());
    }

    #[test]
    fn test_every_offset_touches() {
        let l = RoomShape::l_shape(3).unwrap();
        let rect = RoomShape::rectangle(4, 2).unwrap();
        let offsets = offsets_between(&l, &rect);
        assert!(!offsets.is_empty());
        for o in offsets {
            assert!(touching(&l, c(0, 0), &rect, o));
        }
    }

    #[test]
    fn test_inverse_law_matches_direct_search() {
        let l = RoomShape::l_shape(4).unwrap();
        let rect = RoomShape::rectangle(2, 3).unwrap();
        let forward = offsets_between(&l, &rect);
        let backward = offsets_between(&rect, &l);
        let negated: BTreeSet<_> = forward.iter().map(|o| o.inverse()).collect();
        assert_eq!(negated, as_set(&backward));
    }

    #[test]
    fn test_self_pair_closed_under_negation() {
        let l = RoomShape::l_shape(3).unwrap();
        let offsets = as_set(&offsets_between(&l, &l));
        let negated: BTreeSet<_> = offsets.iter().map(|o| o.inverse()).collect();
        assert_eq!(offsets, negated);
    }

    #[test]
    fn test_build_table_uses_inverse() {
        let catalog = ShapeCatalog::new(vec![
            Arc::new(RoomShape::rectangle(2, 2).unwrap()),
            Arc::new(RoomShape::rectangle(3, 2).unwrap()),
            Arc::new(RoomShape::l_shape(3).unwrap()),
        ]);
        let table = OffsetTable::build(&catalog);
        assert_eq!(table.len(), 9);
        for i in 0..3 {
            for j in 0..3 {
                let negated: BTreeSet<_> = table.get(i, j).iter().map(|o| o.inverse()).collect();
                assert_eq!(negated, as_set(table.get(j, i)), "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_missing_entry_is_empty() {
        let table = OffsetTable::new();
        assert!(table.get(0, 1).is_empty());
        assert!(table.is_empty());
    }
}
