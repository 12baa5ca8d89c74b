//! Axis-aligned collision and wall-grid tests
//!
//! Everything in the room is an axis-aligned box in screen pixels. Boxes are
//! tested against each other and against the tile grid of the current room.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::room::RoomLayout;
use crate::consts::{GAME_AREA_Y, TILE_SIZE};

/// Axis-aligned box: top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square box of side `size` at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Same extent, moved to a new top-left corner
    #[inline]
    pub fn at(&self, pos: Vec2) -> Self {
        Self { pos, size: self.size }
    }
}

/// True iff the two boxes intersect. Touching edges do not count.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Tile (row, col) containing a screen point. May be outside the grid.
#[inline]
pub fn tile_at(point: Vec2) -> (i32, i32) {
    let col = (point.x / TILE_SIZE).floor() as i32;
    let row = ((point.y - GAME_AREA_Y) / TILE_SIZE).floor() as i32;
    (row, col)
}

/// True if any tile the box covers is a wall or lies outside the grid
pub fn blocked_by_walls(rect: &Rect, layout: &RoomLayout) -> bool {
    let left = (rect.pos.x / TILE_SIZE).floor() as i32;
    let right = ((rect.pos.x + rect.size.x - 1.0) / TILE_SIZE).floor() as i32;
    let top = ((rect.pos.y - GAME_AREA_Y) / TILE_SIZE).floor() as i32;
    let bottom = ((rect.pos.y + rect.size.y - 1.0 - GAME_AREA_Y) / TILE_SIZE).floor() as i32;

    for row in top..=bottom {
        for col in left..=right {
            if layout.is_solid(row, col) {
                return true;
            }
        }
    }
    false
}

/// Distance between box centers
pub fn distance(a: &Rect, b: &Rect) -> f32 {
    a.center().distance(b.center())
}

/// Bearing (radians) from the center of `a` to the center of `b`
pub fn angle_to(a: &Rect, b: &Rect) -> f32 {
    let d = b.center() - a.center();
    d.y.atan2(d.x)
}

/// True iff the centers are closer than `radius`
pub fn is_near(a: &Rect, b: &Rect, radius: f32) -> bool {
    distance(a, b) < radius
}
