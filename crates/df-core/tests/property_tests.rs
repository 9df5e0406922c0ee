use std::collections::BTreeSet;

use proptest::prelude::*;

use df_core::offsets::{offsets_between, touching};
use df_core::{GeneratorConfig, GridCoordinate, RoomShape, generate_dungeon};

fn shape(kind: u8, width: i32, height: i32, turns: u32) -> RoomShape {
    let base = match kind {
        0 => RoomShape::rectangle(width, height).unwrap(),
        _ => RoomShape::l_shape(width.max(3)).unwrap(),
    };
    base.rotated(turns)
}

fn shape_strategy() -> impl Strategy<Value = RoomShape> {
    (0u8..2, 1i32..5, 1i32..5, 0u32..4).prop_map(|(kind, w, h, turns)| shape(kind, w, h, turns))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rotation_has_order_four(x in -50i32..50, y in -50i32..50) {
        let coord = GridCoordinate::new(x, y);
        prop_assert_eq!(coord.rotate(4), coord);
        prop_assert_eq!(coord.rotate(1).rotate(3), coord);
        prop_assert_eq!(coord.rotate(2), -coord);
    }

    #[test]
    fn touching_is_symmetric(a in shape_strategy(), b in shape_strategy(), x in -6i32..7, y in -6i32..7) {
        let centre = GridCoordinate::new(x, y);
        prop_assert_eq!(
            touching(&a, GridCoordinate::ORIGIN, &b, centre),
            touching(&b, GridCoordinate::ORIGIN, &a, -centre)
        );
    }

    #[test]
    fn offsets_obey_inverse_law(a in shape_strategy(), b in shape_strategy()) {
        let forward: BTreeSet<_> = offsets_between(&a, &b).into_iter().map(|o| -o).collect();
        let backward: BTreeSet<_> = offsets_between(&b, &a).into_iter().collect();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn offsets_are_exactly_the_touching_centres(a in shape_strategy(), b in shape_strategy()) {
        let offsets: BTreeSet<_> = offsets_between(&a, &b).into_iter().collect();
        let reach = a.max_extent() + b.max_extent() + 1;
        for x in -reach..=reach {
            for y in -reach..=reach {
                let centre = GridCoordinate::new(x, y);
                prop_assert_eq!(
                    offsets.contains(&centre),
                    touching(&a, GridCoordinate::ORIGIN, &b, centre),
                    "centre {}", centre
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn generation_places_every_room(seed in any::<u64>(), rooms in 1usize..15) {
        let config = GeneratorConfig {
            room_count: rooms,
            seed: Some(seed),
            ..Default::default()
        };
        let dungeon = generate_dungeon(config).unwrap();
        prop_assert_eq!(dungeon.rooms.len(), rooms);
        prop_assert_eq!(dungeon.layout.doors().len(), rooms - 1);
        for i in 0..dungeon.rooms.len() {
            for j in (i + 1)..dungeon.rooms.len() {
                prop_assert!(!dungeon.rooms[i].overlaps(&dungeon.rooms[j]));
            }
        }
    }
}
