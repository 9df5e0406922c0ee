//! ASCII rendering of a floor plan
//!
//! Tiles sit on the odd cells of a doubled lattice so that edges and
//! corners get a cell of their own between them. North is up.

use df_core::{DungeonLayout, GenerationError, GridCoordinate, GridCorner, GridEdge};

const ROOM: char = '.';
const CORRIDOR: char = '#';
const DOOR: char = '+';
const PILLAR: char = 'o';

struct Canvas {
    min: GridCoordinate,
    max: GridCoordinate,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(min: GridCoordinate, max: GridCoordinate) -> Self {
        let width = (2 * (max.x - min.x + 1) + 1) as usize;
        let height = (2 * (max.y - min.y + 1) + 1) as usize;
        Self {
            min,
            max,
            cells: vec![vec![' '; width]; height],
        }
    }

    fn column(&self, x: i32) -> i32 {
        2 * (x - self.min.x) + 1
    }

    fn row(&self, y: i32) -> i32 {
        2 * (self.max.y - y) + 1
    }

    fn put(&mut self, column: i32, row: i32, glyph: char) {
        if column < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|line| line.get_mut(column as usize))
        {
            *cell = glyph;
        }
    }

    fn put_tile(&mut self, tile: GridCoordinate, glyph: char) {
        self.put(self.column(tile.x), self.row(tile.y), glyph);
    }

    /// Draw on the cell between the two tiles of a unit edge
    fn put_edge(&mut self, edge: &GridEdge, glyph: Option<char>) {
        if !edge.is_unit() {
            return;
        }
        let (a, b) = (edge.a(), edge.b());
        let column = (self.column(a.x) + self.column(b.x)) / 2;
        let row = (self.row(a.y) + self.row(b.y)) / 2;
        let glyph = glyph.unwrap_or(if a.x != b.x { '|' } else { '-' });
        self.put(column, row, glyph);
    }

    fn finish(self) -> String {
        self.cells
            .into_iter()
            .map(|line| line.into_iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render the layout, one character per lattice cell
pub fn render_ascii(layout: &DungeonLayout) -> Result<String, GenerationError> {
    let Some(bounds) = layout.bounds() else {
        return Ok(String::new());
    };
    let mut canvas = Canvas::new(
        bounds.min - GridCoordinate::new(1, 1),
        bounds.max + GridCoordinate::new(1, 1),
    );

    for tile in layout.room_tiles() {
        canvas.put_tile(tile, ROOM);
    }
    for tile in layout.corridor_tiles() {
        canvas.put_tile(tile, CORRIDOR);
    }
    for wall in layout.walls() {
        canvas.put_edge(&wall, None);
    }
    for door in layout.doors() {
        canvas.put_edge(&door, Some(DOOR));
    }
    for corner in layout.corner_pillars()? {
        let min = GridCorner::min(&corner);
        let column = canvas.column(min.x) + 1;
        let row = canvas.row(min.y) - 1;
        canvas.put(column, row, PILLAR);
    }

    Ok(canvas.finish())
}
