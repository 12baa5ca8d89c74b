//! Player and boss projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, tile_at};
use super::room::RoomLayout;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Boss,
}

impl BulletOwner {
    fn speed(self) -> f32 {
        match self {
            BulletOwner::Player => BULLET_SPEED,
            BulletOwner::Boss => BOSS_BULLET_SPEED,
        }
    }

    fn size(self) -> f32 {
        match self {
            BulletOwner::Player => BULLET_SIZE,
            BulletOwner::Boss => BOSS_BULLET_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub owner: BulletOwner,
    pub active: bool,
}

impl Bullet {
    /// Bullet centered on `center`, travelling along `dir` at the owner's speed
    pub fn new(center: Vec2, dir: Vec2, owner: BulletOwner) -> Self {
        let size = owner.size();
        Self {
            pos: center - Vec2::splat(size / 2.0),
            vel: dir * owner.speed(),
            size,
            owner,
            active: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    /// Linear step. Deactivates once outside the screen margin.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.pos += self.vel;

        let m = BULLET_OFFSCREEN_MARGIN;
        if self.pos.x < -m
            || self.pos.x > SCREEN_WIDTH + m
            || self.pos.y < -m
            || self.pos.y > SCREEN_HEIGHT + m
        {
            self.active = false;
        }
    }

    /// True when the tile under the bullet's corner is a wall
    pub fn in_wall(&self, layout: &RoomLayout) -> bool {
        let (row, col) = tile_at(self.pos);
        layout.is_wall(row, col)
    }
}
