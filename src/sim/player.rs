//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::collision::{Rect, blocked_by_walls};
use super::room::RoomLayout;
use crate::consts::*;

/// Facing direction, used as the shot direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Right,
    Down,
    Left,
}

impl Facing {
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::new(0.0, -1.0),
            Facing::Right => Vec2::new(1.0, 0.0),
            Facing::Down => Vec2::new(0.0, 1.0),
            Facing::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Held-direction intent for one frame. Each axis is -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub dx: i8,
    pub dy: i8,
}

impl MoveIntent {
    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Frames between walk-animation steps
const ANIM_STEP_FRAMES: u32 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    pub lives: i32,
    pub ammo: u32,
    pub shoot_cooldown: u32,
    pub invincibility: u32,
    /// Walk animation phase (0 or 1)
    pub anim_frame: u8,
    anim_timer: u32,
    pub active: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Fresh player at the room start with full lives and starting ammo
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            facing: Facing::Right,
            lives: PLAYER_MAX_LIVES,
            ammo: STARTING_AMMO,
            shoot_cooldown: 0,
            invincibility: 0,
            anim_frame: 0,
            anim_timer: 0,
            active: true,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, PLAYER_SIZE)
    }

    /// Move back to the room start. Lives and ammo are kept unless `full`,
    /// which also restores lives to max.
    pub fn reset(&mut self, full: bool) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.facing = Facing::Right;
        self.shoot_cooldown = 0;
        self.invincibility = 0;
        self.active = true;
        if full {
            self.lives = PLAYER_MAX_LIVES;
        }
    }

    /// Advance one frame: move, maybe shoot, tick counters.
    ///
    /// Returns the bullet fired this frame, if any.
    pub fn update(&mut self, intent: MoveIntent, shoot: bool, layout: &RoomLayout) -> Option<Bullet> {
        if !self.active {
            return None;
        }

        if !intent.is_idle() {
            self.facing = if intent.dx > 0 {
                Facing::Right
            } else if intent.dx < 0 {
                Facing::Left
            } else if intent.dy < 0 {
                Facing::Up
            } else {
                Facing::Down
            };

            self.anim_timer += 1;
            if self.anim_timer >= ANIM_STEP_FRAMES {
                self.anim_timer = 0;
                self.anim_frame = (self.anim_frame + 1) % 2;
            }

            // Horizontal first, vertical tested from the post-horizontal x
            let new_x = self.pos.x + intent.dx as f32 * PLAYER_SPEED;
            let max_x = SCREEN_WIDTH - PLAYER_SIZE;
            if (0.0..=max_x).contains(&new_x)
                && !blocked_by_walls(&Rect::square(Vec2::new(new_x, self.pos.y), PLAYER_SIZE), layout)
            {
                self.pos.x = new_x;
            }

            let new_y = self.pos.y + intent.dy as f32 * PLAYER_SPEED;
            let max_y = SCREEN_HEIGHT - PLAYER_SIZE;
            if (GAME_AREA_Y..=max_y).contains(&new_y)
                && !blocked_by_walls(&Rect::square(Vec2::new(self.pos.x, new_y), PLAYER_SIZE), layout)
            {
                self.pos.y = new_y;
            }
        }

        let mut fired = None;
        if self.shoot_cooldown > 0 {
            self.shoot_cooldown -= 1;
        }
        if shoot && self.shoot_cooldown == 0 && self.ammo > 0 {
            fired = Some(Bullet::new(
                self.bounds().center(),
                self.facing.unit(),
                BulletOwner::Player,
            ));
            self.ammo -= 1;
            self.shoot_cooldown = SHOOT_COOLDOWN;
        }

        if self.invincibility > 0 {
            self.invincibility -= 1;
        }

        fired
    }

    /// Lose a life unless invincible. Returns whether damage was applied.
    ///
    /// Lives are not clamped here; the caller reacts to `lives <= 0`.
    pub fn damage(&mut self) -> bool {
        if self.invincibility > 0 {
            return false;
        }
        self.lives -= 1;
        self.invincibility = INVINCIBILITY_FRAMES;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.lives <= 0
    }

    /// Gain a life if below max
    pub fn heal(&mut self) -> bool {
        if self.lives < PLAYER_MAX_LIVES {
            self.lives += 1;
            true
        } else {
            false
        }
    }

    /// Add ammo up to max. Returns false (no change) when already full.
    pub fn add_ammo(&mut self, amount: u32) -> bool {
        if self.ammo >= MAX_AMMO {
            return false;
        }
        self.ammo = (self.ammo + amount).min(MAX_AMMO);
        true
    }

    /// Raise ammo to at least `min` (capped at max); never lowers it
    pub fn ensure_min_ammo(&mut self, min: u32) {
        if self.ammo < min {
            self.ammo = min.min(MAX_AMMO);
        }
    }

    /// Close enough to the right screen edge to leave through the exit
    pub fn at_right_edge(&self) -> bool {
        self.pos.x >= SCREEN_WIDTH - PLAYER_SIZE - 2.0
    }
}
