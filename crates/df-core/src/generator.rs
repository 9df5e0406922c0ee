//! End-to-end dungeon generation
//!
//! Ties the pipeline together: build the shape catalog, sample a session
//! subset, precompute the offset table, place the rooms and cut the doors.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::layout::DungeonLayout;
use crate::offsets::OffsetTable;
use crate::placement::{Connection, PlacedRoom, PlacementEngine};
use crate::rng::DungeonRng;
use crate::shapes::ShapeCatalog;

/// Counters and timings collected during one generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub seed: u64,
    /// Shapes in the full catalog
    pub catalog_size: usize,
    /// Shapes kept for this session
    pub sampled_shapes: usize,
    /// Ordered shape pairs in the offset table
    pub table_entries: usize,
    pub total_offsets: usize,
    pub room_count: usize,
    pub door_count: usize,
    pub floor_tiles: usize,
    pub table_time: Duration,
    pub placement_time: Duration,
    pub total_time: Duration,
}

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct GeneratedDungeon {
    pub layout: DungeonLayout,
    pub rooms: Vec<PlacedRoom>,
    pub connections: Vec<Connection>,
    pub stats: GenerationStats,
}

/// Runs generation sessions for one configuration
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one dungeon, drawing every random choice from `rng`
    ///
    /// `config.seed` is ignored here; the caller owns the generator.
    pub fn generate(&self, rng: &mut DungeonRng) -> Result<GeneratedDungeon> {
        let config = &self.config;
        config.validate()?;
        let start = Instant::now();

        let catalog = ShapeCatalog::build_all(
            config.min_room_size,
            config.max_room_size,
            config.include_l_shapes,
        )?;
        let sampled = catalog.sample(config.max_sampled_shapes, rng)?;

        let table_start = Instant::now();
        let table = OffsetTable::build(&sampled);
        let table_time = table_start.elapsed();
        log::info!(
            "Offset table for {} shapes built in {:?}",
            sampled.len(),
            table_time
        );

        let placement_start = Instant::now();
        let mut engine = PlacementEngine::new(&sampled, &table);
        engine.run(config.room_count, rng)?;
        let outcome = engine.into_outcome();
        let placement_time = placement_start.elapsed();

        let layout = DungeonLayout::from_placement(&outcome, config.wall_mode, rng)?;

        let stats = GenerationStats {
            seed: rng.seed(),
            catalog_size: catalog.len(),
            sampled_shapes: sampled.len(),
            table_entries: table.len(),
            total_offsets: table.total_offsets(),
            room_count: outcome.rooms.len(),
            door_count: layout.doors().len(),
            floor_tiles: layout.all_floor_tiles().len(),
            table_time,
            placement_time,
            total_time: start.elapsed(),
        };
        log::info!(
            "Generated {} rooms with {} doors in {:?}",
            stats.room_count,
            stats.door_count,
            stats.total_time
        );

        Ok(GeneratedDungeon {
            layout,
            rooms: outcome.rooms,
            connections: outcome.connections,
            stats,
        })
    }
}

/// Generate with a generator seeded from `config.seed`, or from entropy
pub fn generate_dungeon(config: GeneratorConfig) -> Result<GeneratedDungeon> {
    let mut rng = match config.seed {
        Some(seed) => DungeonRng::new(seed),
        None => DungeonRng::from_entropy(),
    };
    log::debug!("Generating with seed {}", rng.seed());
    DungeonGenerator::new(config).generate(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::layout::WallMode;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_default_config() {
        let dungeon = generate_dungeon(seeded(42)).unwrap();
        assert_eq!(dungeon.rooms.len(), 10);
        assert_eq!(dungeon.connections.len(), 9);
        assert_eq!(dungeon.layout.doors().len(), 9);

        let stats = &dungeon.stats;
        assert_eq!(stats.seed, 42);
        assert_eq!(stats.catalog_size, 13);
        assert_eq!(stats.sampled_shapes, 12);
        assert_eq!(stats.table_entries, 144);
        let tiles: usize = dungeon.rooms.iter().map(|r| r.shape.len()).sum();
        assert_eq!(stats.floor_tiles, tiles);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = generate_dungeon(seeded(7)).unwrap();
        let b = generate_dungeon(seeded(7)).unwrap();
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.connections, b.connections);
    }

    #[test]
    fn test_imputed_wall_mode() {
        let config = GeneratorConfig {
            wall_mode: WallMode::Imputed,
            room_count: 6,
            ..seeded(3)
        };
        let dungeon = generate_dungeon(config).unwrap();
        let layout = &dungeon.layout;
        for wall in layout.walls() {
            // imputed walls always separate floor from void
            assert_ne!(layout.is_floor(wall.a()), layout.is_floor(wall.b()));
        }
    }

    #[test]
    fn test_single_room() {
        let config = GeneratorConfig {
            room_count: 1,
            ..seeded(1)
        };
        let dungeon = generate_dungeon(config).unwrap();
        assert_eq!(dungeon.rooms.len(), 1);
        assert!(dungeon.connections.is_empty());
        assert!(dungeon.layout.doors().is_empty());
        assert!(!dungeon.layout.walls().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            room_count: 0,
            ..seeded(1)
        };
        assert_eq!(
            generate_dungeon(config).unwrap_err(),
            GenerationError::InvalidRoomCount { requested: 0 }
        );
    }
}
