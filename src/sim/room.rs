//! Procedural room layouts
//!
//! Each room is a fixed 16x14 tile grid. Layouts are a pure function of
//! (floor index, room index): the interior pattern is drawn from a small
//! linear-congruential generator seeded with `floor * 100 + room`, so the
//! same room always looks the same.

use serde::{Deserialize, Serialize};

use crate::consts::{ROOM_COLS, ROOM_ROWS, ROOMS_PER_FLOOR};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Floor,
    Wall,
}

/// Rows carved open on the right edge when a room is cleared
pub const EXIT_GAP_HEIGHT: usize = 4;

/// First row of the exit gap (gap is vertically centered)
pub const EXIT_GAP_TOP: usize = ROOM_ROWS / 2 - EXIT_GAP_HEIGHT / 2;

/// Wall/floor grid for one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLayout {
    cells: [[Tile; ROOM_COLS]; ROOM_ROWS],
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::filled(Tile::Floor)
    }
}

impl RoomLayout {
    /// Grid with every cell set to `tile`
    pub fn filled(tile: Tile) -> Self {
        Self {
            cells: [[tile; ROOM_COLS]; ROOM_ROWS],
        }
    }

    /// Cell at (row, col), `None` outside the grid
    pub fn get(&self, row: i32, col: i32) -> Option<Tile> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        if row < ROOM_ROWS && col < ROOM_COLS {
            self.cells[row][col] = tile;
        }
    }

    /// Walls and everything outside the grid are solid
    #[inline]
    pub fn is_solid(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_none_or(|t| t == Tile::Wall)
    }

    /// Wall tile inside the grid (out-of-range cells report false)
    #[inline]
    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(Tile::Wall)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile; ROOM_COLS]> {
        self.cells.iter()
    }

    /// Open the exit gap in the right edge column
    pub fn carve_exit(&mut self) {
        for row in EXIT_GAP_TOP..EXIT_GAP_TOP + EXIT_GAP_HEIGHT {
            self.cells[row][ROOM_COLS - 1] = Tile::Floor;
        }
    }

    /// True once the exit gap has been carved
    pub fn exit_open(&self) -> bool {
        (EXIT_GAP_TOP..EXIT_GAP_TOP + EXIT_GAP_HEIGHT)
            .all(|row| self.cells[row][ROOM_COLS - 1] == Tile::Floor)
    }

    fn fill_interior(&mut self, rows: impl Iterator<Item = i32> + Clone, cols: impl Iterator<Item = i32> + Clone) {
        for r in rows {
            for c in cols.clone() {
                if r > 0 && r < ROOM_ROWS as i32 - 1 && c > 0 && c < ROOM_COLS as i32 - 1 {
                    self.cells[r as usize][c as usize] = Tile::Wall;
                }
            }
        }
    }
}

/// Linear-congruential generator used only for room layouts
///
/// `s = (s * 1103515245 + 12345) mod 2^31`, output `s / 2^31` in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct LayoutRng {
    state: u32,
}

impl LayoutRng {
    const MODULUS_MASK: u32 = 0x7fff_ffff;

    pub fn new(seed: u32) -> Self {
        Self {
            state: seed & Self::MODULUS_MASK,
        }
    }

    /// Seed for a (floor, room) pair
    pub fn for_room(floor_index: usize, room_index: usize) -> Self {
        Self::new((floor_index * 100 + room_index) as u32)
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_103_515_245)
            .wrapping_add(12_345)
            & Self::MODULUS_MASK;
        self.state as f64 / (1u64 << 31) as f64
    }

    /// Uniform integer in `0..n`
    fn below(&mut self, n: usize) -> usize {
        ((self.next_f64() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// Interior obstacle pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomPattern {
    CornerBlocks,
    CenterBlock,
    HorizontalWalls,
    Pillars,
}

impl RoomPattern {
    pub fn for_room(room_index: usize) -> Self {
        if is_boss_room(room_index) {
            return RoomPattern::Pillars;
        }
        match room_index % 4 {
            0 => RoomPattern::CornerBlocks,
            1 => RoomPattern::CenterBlock,
            2 => RoomPattern::HorizontalWalls,
            _ => RoomPattern::Pillars,
        }
    }
}

/// The last room of every floor holds the boss
#[inline]
pub fn is_boss_room(room_index: usize) -> bool {
    room_index == ROOMS_PER_FLOOR - 1
}

/// Build the layout for a room. The right edge is always fully walled.
pub fn generate_layout(floor_index: usize, room_index: usize) -> RoomLayout {
    let mut layout = RoomLayout::filled(Tile::Floor);

    for c in 0..ROOM_COLS {
        layout.cells[0][c] = Tile::Wall;
        layout.cells[ROOM_ROWS - 1][c] = Tile::Wall;
    }
    for r in 0..ROOM_ROWS {
        layout.cells[r][0] = Tile::Wall;
        layout.cells[r][ROOM_COLS - 1] = Tile::Wall;
    }

    let mut rng = LayoutRng::for_room(floor_index, room_index);
    match RoomPattern::for_room(room_index) {
        RoomPattern::CornerBlocks => add_corner_blocks(&mut layout, &mut rng),
        RoomPattern::CenterBlock => add_center_block(&mut layout, &mut rng),
        RoomPattern::HorizontalWalls => add_horizontal_walls(&mut layout, &mut rng),
        RoomPattern::Pillars => add_pillars(&mut layout, &mut rng),
    }

    layout
}

/// Apply the exit gap to a layout (free-function form of `RoomLayout::carve_exit`)
pub fn carve_exit(layout: &mut RoomLayout) {
    layout.carve_exit();
}

/// Square blocks growing out of the top-left and bottom-right corners
fn add_corner_blocks(layout: &mut RoomLayout, rng: &mut LayoutRng) {
    let size = 2 + rng.below(2) as i32;
    let rows = ROOM_ROWS as i32;
    let cols = ROOM_COLS as i32;

    layout.fill_interior(1..1 + size, 1..1 + size);
    layout.fill_interior(rows - 1 - size..rows - 1, cols - 1 - size..cols - 1);
}

fn add_center_block(layout: &mut RoomLayout, rng: &mut LayoutRng) {
    let cx = (ROOM_COLS / 2) as i32;
    let cy = (ROOM_ROWS / 2) as i32;
    let size = 1 + rng.below(2) as i32;

    layout.fill_interior(cy - size..=cy + size, cx - size..=cx + size);
}

/// Two horizontal walls, each with a three-tile gap
fn add_horizontal_walls(layout: &mut RoomLayout, rng: &mut LayoutRng) {
    let r1 = 3 + rng.below(2);
    let r2 = ROOM_ROWS - 4 - rng.below(2);
    let gap1 = 2 + rng.below(ROOM_COLS - 6);
    let gap2 = 2 + rng.below(ROOM_COLS - 6);

    for c in 2..ROOM_COLS - 2 {
        if c.abs_diff(gap1) > 1 {
            layout.cells[r1][c] = Tile::Wall;
        }
        if c.abs_diff(gap2) > 1 {
            layout.cells[r2][c] = Tile::Wall;
        }
    }
}

/// Up to four 2x2 pillars, each kept with 70% probability
fn add_pillars(layout: &mut RoomLayout, rng: &mut LayoutRng) {
    let rows = ROOM_ROWS as i32;
    let cols = ROOM_COLS as i32;
    let anchors = [(3, 4), (3, cols - 6), (rows - 5, 4), (rows - 5, cols - 6)];

    for (pr, pc) in anchors {
        if rng.next_f64() < 0.7 {
            layout.fill_interior(pr..pr + 2, pc..pc + 2);
        }
    }
}
