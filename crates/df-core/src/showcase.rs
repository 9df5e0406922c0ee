//! Fixed demonstration layout
//!
//! Six rectangular rooms joined by corridors, with a door wherever a
//! corridor tile meets a room tile. Walls and corners are imputed.

use crate::grid::{GridCoordinate, GridEdge, TileRect, adjacent};
use crate::layout::DungeonLayout;

const ROOMS: [((i32, i32), (i32, i32)); 6] = [
    ((0, 0), (4, 2)),
    ((-5, -1), (-2, 1)),
    ((-6, -6), (-2, -3)),
    ((8, -4), (12, 0)),
    ((4, -7), (6, -5)),
    ((8, -10), (10, -8)),
];

const CORRIDORS: [((i32, i32), (i32, i32)); 9] = [
    ((-1, 0), (-1, 0)),
    ((-4, -2), (-4, -2)),
    ((6, -4), (6, 0)),
    ((7, -6), (8, -6)),
    ((8, -7), (8, -5)),
    ((6, -9), (6, -8)),
    ((7, -9), (7, -9)),
    ((5, 0), (5, 0)),
    ((7, -2), (7, -2)),
];

fn fill(((ax, ay), (bx, by)): ((i32, i32), (i32, i32))) -> Vec<GridCoordinate> {
    TileRect::new(GridCoordinate::new(ax, ay), GridCoordinate::new(bx, by)).fill()
}

/// Build the demonstration layout
pub fn showcase_layout() -> DungeonLayout {
    let mut layout = DungeonLayout::new();
    for room in ROOMS {
        layout.add_room_tiles(fill(room));
    }
    for corridor in CORRIDORS {
        layout.add_corridor_tiles(fill(corridor));
    }

    let mut doors = Vec::new();
    for tile in layout.corridor_tiles() {
        for neighbour in adjacent(tile, false, None) {
            if !layout.is_room(neighbour) {
                continue;
            }
            if let Ok(door) = GridEdge::new(tile, neighbour) {
                doors.push(door);
            }
        }
    }
    layout.add_doors(doors);
    layout
}
