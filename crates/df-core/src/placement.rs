//! Incremental room placement
//!
//! Grows a connected layout one room at a time. Each new room is put at a
//! random collision-free centre taken from the offset table of some room
//! already placed, and remembers that room as its parent. The parent links
//! form a spanning tree rooted at the seed room.

use std::collections::BTreeSet;
use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::grid::GridCoordinate;
use crate::offsets::{OffsetTable, overlap, touching};
use crate::rng::DungeonRng;
use crate::shapes::{RoomShape, ShapeCatalog};

/// A shape put down at a global centre
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedRoom {
    pub shape: Arc<RoomShape>,
    /// Index of the shape in the session catalog
    pub shape_index: usize,
    pub centre: GridCoordinate,
}

impl PlacedRoom {
    pub fn new(shape: Arc<RoomShape>, shape_index: usize, centre: GridCoordinate) -> Self {
        Self {
            shape,
            shape_index,
            centre,
        }
    }

    /// Global tiles covered by the room
    pub fn footprint(&self) -> BTreeSet<GridCoordinate> {
        self.shape.footprint_at(self.centre).collect()
    }

    pub fn overlaps(&self, other: &PlacedRoom) -> bool {
        overlap(&self.shape, self.centre, &other.shape, other.centre)
    }

    pub fn touches(&self, other: &PlacedRoom) -> bool {
        touching(&self.shape, self.centre, &other.shape, other.centre)
    }
}

/// A room attached to the room it was placed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// Index of the newly placed room
    pub child: usize,
    /// Index of the existing room it was attached to
    pub parent: usize,
}

/// Rooms and connections produced by a placement run
#[derive(Debug, Clone, Default)]
pub struct PlacementOutcome {
    pub rooms: Vec<PlacedRoom>,
    pub connections: Vec<Connection>,
}

/// Working state of one placement session
#[derive(Debug)]
pub struct PlacementEngine<'a> {
    catalog: &'a ShapeCatalog,
    table: &'a OffsetTable,
    rooms: Vec<PlacedRoom>,
    used_tiles: HashSet<GridCoordinate>,
    connections: Vec<Connection>,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(catalog: &'a ShapeCatalog, table: &'a OffsetTable) -> Self {
        Self {
            catalog,
            table,
            rooms: Vec::new(),
            used_tiles: HashSet::new(),
            connections: Vec::new(),
        }
    }

    fn shape(&self, index: usize) -> Result<Arc<RoomShape>> {
        self.catalog
            .get(index)
            .cloned()
            .ok_or(GenerationError::UnknownShape {
                index,
                len: self.catalog.len(),
            })
    }

    /// Start a fresh layout with catalog shape `shape_index` at the origin
    ///
    /// Anything placed before is discarded.
    pub fn seed(&mut self, shape_index: usize) -> Result<&PlacedRoom> {
        let shape = self.shape(shape_index)?;
        self.rooms.clear();
        self.connections.clear();
        self.used_tiles.clear();

        let room = PlacedRoom::new(shape, shape_index, GridCoordinate::ORIGIN);
        self.used_tiles.extend(room.shape.footprint_at(room.centre));
        self.rooms.push(room);
        Ok(&self.rooms[0])
    }

    /// Place one more room of a randomly drawn shape
    pub fn place_one(&mut self, rng: &mut DungeonRng) -> Result<&PlacedRoom> {
        let shape_index = rng
            .index(self.catalog.len())
            .ok_or(GenerationError::UnknownShape { index: 0, len: 0 })?;
        self.place_one_with_shape(shape_index, rng)
    }

    /// Every collision-free centre for the shape, with the room it attaches to
    ///
    /// When several rooms offer the same centre the first one wins.
    pub fn candidates(&self, shape_index: usize) -> Result<Vec<(GridCoordinate, usize)>> {
        let shape = self.shape(shape_index)?;
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for (existing_index, existing) in self.rooms.iter().enumerate() {
            for &offset in self.table.get(existing.shape_index, shape_index) {
                let centre = existing.centre + offset;
                if !seen.insert(centre) {
                    continue;
                }
                let collides = shape
                    .footprint_at(centre)
                    .any(|tile| self.used_tiles.contains(&tile));
                if !collides {
                    candidates.push((centre, existing_index));
                }
            }
        }

        Ok(candidates)
    }

    /// Place one more room using catalog shape `shape_index`
    ///
    /// Fails with `NoPlacementCandidates` when the shape fits nowhere; the
    /// engine is left unchanged so the caller may retry with another shape.
    pub fn place_one_with_shape(
        &mut self,
        shape_index: usize,
        rng: &mut DungeonRng,
    ) -> Result<&PlacedRoom> {
        let shape = self.shape(shape_index)?;
        let candidates = self.candidates(shape_index)?;

        let Some(&(centre, parent)) = rng.choose(&candidates) else {
            log::warn!(
                "No placement for shape {} after {} rooms",
                shape_index,
                self.rooms.len()
            );
            return Err(GenerationError::NoPlacementCandidates {
                step: self.rooms.len(),
                shape_index,
            });
        };

        let child = self.rooms.len();
        log::debug!(
            "Room {} (shape {}) at {} attached to room {} ({} candidates)",
            child,
            shape_index,
            centre,
            parent,
            candidates.len()
        );

        let room = PlacedRoom::new(shape, shape_index, centre);
        self.used_tiles.extend(room.shape.footprint_at(centre));
        self.rooms.push(room);
        self.connections.push(Connection { child, parent });
        Ok(&self.rooms[child])
    }

    /// Seed with the first catalog shape, then place `target_count - 1` rooms
    pub fn run(&mut self, target_count: usize, rng: &mut DungeonRng) -> Result<()> {
        if target_count == 0 {
            return Err(GenerationError::InvalidRoomCount {
                requested: target_count,
            });
        }
        self.seed(0)?;
        for _ in 1..target_count {
            self.place_one(rng)?;
        }
        Ok(())
    }

    pub fn rooms(&self) -> &[PlacedRoom] {
        &self.rooms
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn used_tiles(&self) -> &HashSet<GridCoordinate> {
        &self.used_tiles
    }

    pub fn into_outcome(self) -> PlacementOutcome {
        PlacementOutcome {
            rooms: self.rooms,
            connections: self.connections,
        }
    }
}
