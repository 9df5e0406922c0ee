//! Queryable floor plan
//!
//! A layout holds room and corridor tiles plus door edges. Walls and corner
//! pillars are either stored explicitly by a generator or imputed from tile
//! adjacency when queried. Walls never include an edge that is a door.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::grid::{GridCoordinate, GridCorner, GridEdge, TileRect, adjacent};
use crate::placement::{Connection, PlacedRoom, PlacementOutcome};
use crate::rng::DungeonRng;

/// Where a derived feature comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureSource<T: Ord> {
    /// Computed from the floor tiles on every query
    Imputed,
    /// Stored by the generator and returned as is
    Explicit(BTreeSet<T>),
}

impl<T: Ord> Default for FeatureSource<T> {
    fn default() -> Self {
        FeatureSource::Imputed
    }
}

/// How the placement generator lays down walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallMode {
    /// Every room is walled on its own outline, so touching rooms keep a
    /// wall between them except where the door is
    #[default]
    PerRoom,
    /// Walls only where floor meets non-floor
    Imputed,
}

/// Tiles, doors, walls and corner pillars of one floor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayout {
    room_tiles: BTreeSet<GridCoordinate>,
    corridor_tiles: BTreeSet<GridCoordinate>,
    doors: BTreeSet<GridEdge>,
    walls: FeatureSource<GridEdge>,
    corners: FeatureSource<GridCorner>,
}

impl DungeonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the floor plan for placed rooms, cutting one door per connection
    pub fn from_placement(
        outcome: &PlacementOutcome,
        wall_mode: WallMode,
        rng: &mut DungeonRng,
    ) -> Result<Self> {
        let mut layout = Self::new();
        let footprints: Vec<BTreeSet<GridCoordinate>> =
            outcome.rooms.iter().map(PlacedRoom::footprint).collect();

        for footprint in &footprints {
            layout.add_room_tiles(footprint.iter().copied());
        }

        for connection in &outcome.connections {
            let door = derive_door(&footprints, connection, rng)?;
            layout.add_doors([door]);
        }

        if wall_mode == WallMode::PerRoom {
            let mut walls = BTreeSet::new();
            for footprint in &footprints {
                walls.extend(outline(footprint));
            }
            layout.set_walls(walls);
        }

        Ok(layout)
    }

    /// Add room tiles; a tile that was a corridor becomes a room tile
    pub fn add_room_tiles<I>(&mut self, tiles: I)
    where
        I: IntoIterator<Item = GridCoordinate>,
    {
        for tile in tiles {
            self.corridor_tiles.remove(&tile);
            self.room_tiles.insert(tile);
        }
    }

    /// Add corridor tiles; tiles already in a room are left alone
    pub fn add_corridor_tiles<I>(&mut self, tiles: I)
    where
        I: IntoIterator<Item = GridCoordinate>,
    {
        for tile in tiles {
            if !self.room_tiles.contains(&tile) {
                self.corridor_tiles.insert(tile);
            }
        }
    }

    pub fn add_doors<I>(&mut self, doors: I)
    where
        I: IntoIterator<Item = GridEdge>,
    {
        self.doors.extend(doors);
    }

    /// Store walls explicitly (added to any walls stored before)
    pub fn set_walls<I>(&mut self, walls: I)
    where
        I: IntoIterator<Item = GridEdge>,
    {
        match &mut self.walls {
            FeatureSource::Explicit(stored) => stored.extend(walls),
            FeatureSource::Imputed => self.walls = FeatureSource::Explicit(walls.into_iter().collect()),
        }
    }

    /// Store corner pillars explicitly (added to any stored before)
    pub fn set_corners<I>(&mut self, corners: I)
    where
        I: IntoIterator<Item = GridCorner>,
    {
        match &mut self.corners {
            FeatureSource::Explicit(stored) => stored.extend(corners),
            FeatureSource::Imputed => {
                self.corners = FeatureSource::Explicit(corners.into_iter().collect())
            }
        }
    }

    /// Drop stored walls and derive them from the tiles again
    pub fn impute_walls(&mut self) {
        self.walls = FeatureSource::Imputed;
    }

    /// Drop stored corners and derive them from the walls again
    pub fn impute_corners(&mut self) {
        self.corners = FeatureSource::Imputed;
    }

    pub fn wall_source(&self) -> &FeatureSource<GridEdge> {
        &self.walls
    }

    pub fn corner_source(&self) -> &FeatureSource<GridCorner> {
        &self.corners
    }

    pub fn room_tiles(&self) -> Vec<GridCoordinate> {
        self.room_tiles.iter().copied().collect()
    }

    pub fn corridor_tiles(&self) -> Vec<GridCoordinate> {
        self.corridor_tiles.iter().copied().collect()
    }

    /// Room and corridor tiles together
    pub fn all_floor_tiles(&self) -> Vec<GridCoordinate> {
        self.room_tiles
            .union(&self.corridor_tiles)
            .copied()
            .collect()
    }

    pub fn is_room(&self, tile: GridCoordinate) -> bool {
        self.room_tiles.contains(&tile)
    }

    pub fn is_corridor(&self, tile: GridCoordinate) -> bool {
        self.corridor_tiles.contains(&tile)
    }

    pub fn is_floor(&self, tile: GridCoordinate) -> bool {
        self.is_room(tile) || self.is_corridor(tile)
    }

    pub fn doors(&self) -> Vec<GridEdge> {
        self.doors.iter().copied().collect()
    }

    pub fn is_door(&self, edge: &GridEdge) -> bool {
        self.doors.contains(edge)
    }

    /// Wall edges, excluding every door edge
    pub fn walls(&self) -> Vec<GridEdge> {
        match &self.walls {
            FeatureSource::Explicit(stored) => stored
                .iter()
                .filter(|edge| !self.doors.contains(*edge))
                .copied()
                .collect(),
            FeatureSource::Imputed => self.imputed_walls().into_iter().collect(),
        }
    }

    fn imputed_walls(&self) -> BTreeSet<GridEdge> {
        let mut walls = BTreeSet::new();
        for &tile in self.room_tiles.iter().chain(&self.corridor_tiles) {
            for neighbour in adjacent(tile, false, None) {
                if self.is_floor(neighbour) {
                    continue;
                }
                if let Ok(edge) = GridEdge::new(tile, neighbour)
                    && !self.doors.contains(&edge)
                {
                    walls.insert(edge);
                }
            }
        }
        walls
    }

    /// Corner pillars: the stored set, or one per pair of perpendicular walls
    pub fn corner_pillars(&self) -> Result<Vec<GridCorner>> {
        match &self.corners {
            FeatureSource::Explicit(stored) => Ok(stored.iter().copied().collect()),
            FeatureSource::Imputed => {
                let corners = impute_corners(&self.walls())?;
                Ok(corners.into_iter().collect())
            }
        }
    }

    /// Smallest box holding every floor tile
    pub fn bounds(&self) -> Option<TileRect> {
        let mut tiles = self.room_tiles.iter().chain(&self.corridor_tiles);
        let first = *tiles.next()?;
        let (mut min, mut max) = (first, first);
        for tile in tiles {
            min = GridCoordinate::new(min.x.min(tile.x), min.y.min(tile.y));
            max = GridCoordinate::new(max.x.max(tile.x), max.y.max(tile.y));
        }
        Some(TileRect::new(min, max))
    }
}

/// Pick the door between a connected child and parent room
///
/// Every (child tile, orthogonal neighbour in the parent) pair is a
/// candidate; one is chosen uniformly.
pub fn derive_door(
    footprints: &[BTreeSet<GridCoordinate>],
    connection: &Connection,
    rng: &mut DungeonRng,
) -> Result<GridEdge> {
    let empty = || GenerationError::EmptyDoorCandidates {
        child: connection.child,
        parent: connection.parent,
    };
    let child = footprints.get(connection.child).ok_or_else(empty)?;
    let parent = footprints.get(connection.parent).ok_or_else(empty)?;

    let candidates: Vec<(GridCoordinate, GridCoordinate)> = child
        .iter()
        .flat_map(|&tile| {
            adjacent(tile, false, None)
                .into_iter()
                .filter(|n| parent.contains(n))
                .map(move |n| (tile, n))
        })
        .collect();

    let &(tile, target) = rng.choose(&candidates).ok_or_else(empty)?;
    GridEdge::new(tile, target)
}

/// Edges between a footprint and every orthogonal neighbour outside it
fn outline(footprint: &BTreeSet<GridCoordinate>) -> BTreeSet<GridEdge> {
    let mut edges = BTreeSet::new();
    for &tile in footprint {
        for neighbour in adjacent(tile, false, None) {
            if footprint.contains(&neighbour) {
                continue;
            }
            if let Ok(edge) = GridEdge::new(tile, neighbour) {
                edges.insert(edge);
            }
        }
    }
    edges
}

fn impute_corners(walls: &[GridEdge]) -> Result<BTreeSet<GridCorner>> {
    let mut by_tile: HashMap<GridCoordinate, Vec<GridEdge>> = HashMap::new();
    for wall in walls {
        by_tile.entry(wall.a()).or_default().push(*wall);
        by_tile.entry(wall.b()).or_default().push(*wall);
    }

    let mut corners = BTreeSet::new();
    for edges in by_tile.values() {
        for (i, first) in edges.iter().enumerate() {
            for second in &edges[i + 1..] {
                if first.forms_corner(second) {
                    corners.insert(GridCorner::from_edges(first, second)?);
                }
            }
        }
    }
    Ok(corners)
}
