//! Room monsters: chase the player with a wandering drift

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, blocked_by_walls};
use super::room::RoomLayout;
use crate::consts::*;

/// Spawn-position attempts per monster before settling for the last candidate
pub const SPAWN_ATTEMPTS: u32 = 100;

/// Monsters never spawn left of this x (player start side)
pub const SPAWN_MIN_X: f32 = 80.0;

const CHASE_WEIGHT: f32 = 0.7;
const WANDER_WEIGHT: f32 = 0.3;
/// Frames between random wander-angle nudges
const WANDER_PERIOD: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub pos: Vec2,
    pub size: f32,
    /// Which of the floor's two monster designs (0 or 1)
    pub kind: u8,
    pub speed: f32,
    pub active: bool,
    pub wander_angle: f32,
    pub move_timer: u32,
    pub hit_flash: u32,
}

impl Monster {
    pub fn new(pos: Vec2, kind: u8, wander_angle: f32, move_timer: u32) -> Self {
        Self {
            pos,
            size: MONSTER_SIZE,
            kind,
            speed: MONSTER_BASE_SPEED,
            active: true,
            wander_angle,
            move_timer,
            hit_flash: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Mark dead. The entry stays in the room's list until the room resets.
    pub fn kill(&mut self) {
        self.active = false;
    }

    /// One frame of chase-and-wander movement toward `target` (the player's
    /// top-left corner)
    pub fn update<R: Rng>(&mut self, target: Vec2, speed_mult: f32, layout: &RoomLayout, rng: &mut R) {
        if !self.active {
            return;
        }
        self.move_timer += 1;

        let to_target = target - self.pos;
        let dist = to_target.length();

        let step = if dist > 0.0 {
            if self.move_timer % WANDER_PERIOD == 0 {
                self.wander_angle += (rng.random::<f32>() - 0.5) * PI;
            }
            let wander = Vec2::new(self.wander_angle.cos(), self.wander_angle.sin());
            let blended = to_target / dist * CHASE_WEIGHT + wander * WANDER_WEIGHT;
            blended.normalize_or_zero() * self.speed * speed_mult
        } else {
            Vec2::ZERO
        };

        let new_x = self.pos.x + step.x;
        if new_x > 0.0
            && new_x < SCREEN_WIDTH - self.size
            && !blocked_by_walls(&Rect::square(Vec2::new(new_x, self.pos.y), self.size), layout)
        {
            self.pos.x = new_x;
        } else {
            self.wander_angle += FRAC_PI_2;
        }

        let new_y = self.pos.y + step.y;
        if new_y > GAME_AREA_Y
            && new_y < SCREEN_HEIGHT - self.size
            && !blocked_by_walls(&Rect::square(Vec2::new(self.pos.x, new_y), self.size), layout)
        {
            self.pos.y = new_y;
        } else {
            self.wander_angle -= FRAC_PI_2;
        }

        if self.hit_flash > 0 {
            self.hit_flash -= 1;
        }
    }
}

/// Place `count` monsters on open floor away from the player's start side.
///
/// Each monster gets up to [`SPAWN_ATTEMPTS`] tries; if none is valid the last
/// candidate is used as-is.
pub fn spawn_monsters<R: Rng>(count: usize, layout: &RoomLayout, rng: &mut R) -> Vec<Monster> {
    let mut monsters = Vec::with_capacity(count);

    for _ in 0..count {
        let mut pos = Vec2::ZERO;
        let mut valid = false;
        let mut attempts = 0;

        while !valid && attempts < SPAWN_ATTEMPTS {
            pos = Vec2::new(
                TILE_SIZE * 2.0 + rng.random::<f32>() * (SCREEN_WIDTH - TILE_SIZE * 6.0),
                GAME_AREA_Y
                    + TILE_SIZE * 2.0
                    + rng.random::<f32>() * (SCREEN_HEIGHT - GAME_AREA_Y - TILE_SIZE * 5.0),
            );
            valid = pos.x >= SPAWN_MIN_X
                && !blocked_by_walls(&Rect::square(pos, MONSTER_SIZE), layout);
            attempts += 1;
        }
        if !valid {
            log::debug!("No free spawn spot after {} attempts, using {:?}", SPAWN_ATTEMPTS, pos);
        }

        let kind = if rng.random_bool(0.5) { 0 } else { 1 };
        let move_timer = rng.random_range(0..WANDER_PERIOD);
        let wander_angle = rng.random::<f32>() * TAU;
        monsters.push(Monster::new(pos, kind, wander_angle, move_timer));
    }

    monsters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::room::{Tile, generate_layout};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_positions_are_valid() {
        let mut rng = Pcg32::seed_from_u64(7);
        for room in 0..7 {
            let layout = generate_layout(0, room);
            let monsters = spawn_monsters(5, &layout, &mut rng);
            assert_eq!(monsters.len(), 5);
            for m in &monsters {
                assert!(m.active);
                assert!(m.pos.x >= SPAWN_MIN_X);
                assert!(!blocked_by_walls(&m.bounds(), &layout));
                assert!(m.kind <= 1);
            }
        }
    }

    #[test]
    fn test_spawn_falls_back_to_last_candidate() {
        let layout = RoomLayout::filled(Tile::Wall);
        let mut rng = Pcg32::seed_from_u64(3);
        let monsters = spawn_monsters(2, &layout, &mut rng);
        assert_eq!(monsters.len(), 2);
        for m in &monsters {
            // Inside the spawn window even though it is a wall
            assert!(m.pos.x >= TILE_SIZE * 2.0);
            assert!(blocked_by_walls(&m.bounds(), &layout));
        }
    }

    #[test]
    fn test_chases_player() {
        let layout = RoomLayout::filled(Tile::Floor);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut m = Monster::new(Vec2::new(150.0, 120.0), 0, 0.0, 1);
        let target = Vec2::new(40.0, 120.0);
        let start = m.pos.distance(target);
        for _ in 0..30 {
            m.update(target, 1.0, &layout, &mut rng);
        }
        assert!(m.pos.distance(target) < start);
    }

    #[test]
    fn test_step_length_scales_with_multiplier() {
        let layout = RoomLayout::filled(Tile::Floor);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut m = Monster::new(Vec2::new(150.0, 120.0), 0, 1.0, 1);
        let before = m.pos;
        m.update(Vec2::new(40.0, 60.0), 1.4, &layout, &mut rng);
        let moved = m.pos.distance(before);
        assert!((moved - MONSTER_BASE_SPEED * 1.4).abs() < 1e-4);
    }

    #[test]
    fn test_blocked_axes_rotate_wander() {
        let mut layout = RoomLayout::filled(Tile::Floor);
        // Wall immediately left of the monster
        for row in 0..crate::consts::ROOM_ROWS {
            layout.set(row, 5, Tile::Wall);
        }
        let mut rng = Pcg32::seed_from_u64(1);
        let mut m = Monster::new(Vec2::new(96.0, 120.0), 0, 0.0, 1);
        // Target straight left: x blocked, y free but unchanged
        m.update(Vec2::new(20.0, 120.0), 1.0, &layout, &mut rng);
        assert_eq!(m.pos.x, 96.0);
        assert!((m.wander_angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_blocked_vertical_move_rotates_wander_back() {
        let mut layout = RoomLayout::filled(Tile::Floor);
        // Wall row immediately above the monster
        for col in 0..crate::consts::ROOM_COLS {
            layout.set(5, col, Tile::Wall);
        }
        let mut rng = Pcg32::seed_from_u64(1);
        let mut m = Monster::new(Vec2::new(96.0, 120.0), 0, 0.0, 1);
        // Target straight up: x drifts with the wander, y is blocked
        m.update(Vec2::new(96.0, 30.0), 1.0, &layout, &mut rng);
        assert_eq!(m.pos.y, 120.0);
        assert!(m.pos.x > 96.0);
        assert!((m.wander_angle + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_dead_monster_does_not_move() {
        let layout = RoomLayout::filled(Tile::Floor);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut m = Monster::new(Vec2::new(150.0, 120.0), 0, 0.0, 1);
        m.kill();
        m.update(Vec2::new(40.0, 120.0), 1.0, &layout, &mut rng);
        assert_eq!(m.pos, Vec2::new(150.0, 120.0));
        assert_eq!(m.move_timer, 1);
    }
}
