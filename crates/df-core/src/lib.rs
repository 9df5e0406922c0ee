//! df-core: Procedural tile-based dungeon generation
//!
//! Rooms are drawn from a catalog of shapes and attached one at a time to
//! rooms already placed, using a precomputed table of touching offsets for
//! every pair of shapes. The result is a connected floor plan with one door
//! per connection and walls and corner pillars derived from the tiles.
//!
//! This crate has no I/O beyond loading a configuration file.

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod layout;
pub mod offsets;
pub mod placement;
pub mod rng;
pub mod shapes;
pub mod showcase;

pub use config::{ConfigError, GeneratorConfig};
pub use error::{GenerationError, Result};
pub use generator::{DungeonGenerator, GeneratedDungeon, GenerationStats, generate_dungeon};
pub use grid::{Direction, GridCoordinate, GridCorner, GridEdge, TileRect};
pub use layout::{DungeonLayout, FeatureSource, WallMode};
pub use offsets::OffsetTable;
pub use placement::{Connection, PlacedRoom, PlacementEngine, PlacementOutcome};
pub use rng::DungeonRng;
pub use shapes::{RoomShape, ShapeCatalog};
pub use showcase::showcase_layout;
