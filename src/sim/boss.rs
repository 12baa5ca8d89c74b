//! Floor boss: chase / shoot / reposition cycle

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletOwner};
use super::collision::{Rect, blocked_by_walls};
use super::room::RoomLayout;
use crate::consts::*;

/// Frames spent in each phase before moving on
pub const CHASE_FRAMES: u32 = 120;
pub const SHOOT_FRAMES: u32 = 90;
pub const MOVE_FRAMES: u32 = 90;

/// Angle between the aimed shot and each flanking shot (radians)
pub const SPREAD_ANGLE: f32 = 0.3;
/// Frames of hit flash after taking damage
pub const HIT_FLASH_FRAMES: u32 = 8;
/// Speed factor while repositioning
const MOVE_SPEED_FACTOR: f32 = 1.5;
/// Closer than this to the move target counts as arrived
const ARRIVE_DISTANCE: f32 = 10.0;
/// No step is taken when the goal is closer than this
const STOP_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    Chase,
    Shoot,
    Move,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub active: bool,
    pub phase: BossPhase,
    pub phase_timer: u32,
    pub shoot_timer: u32,
    pub shoot_interval: u32,
    pub target: Vec2,
    pub hit_flash: u32,
    pub speed_mult: f32,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            size: BOSS_SIZE,
            hp: 0,
            max_hp: 0,
            active: false,
            phase: BossPhase::Chase,
            phase_timer: 0,
            shoot_timer: 0,
            shoot_interval: 0,
            target: Vec2::ZERO,
            hit_flash: 0,
            speed_mult: 1.0,
        }
    }
}

impl Boss {
    /// Boss at the right side of the room, vertically centered, in `Chase`
    pub fn spawn(hp: i32) -> Self {
        let pos = Vec2::new(
            SCREEN_WIDTH - TILE_SIZE * 2.0 - BOSS_SIZE,
            GAME_AREA_Y + (SCREEN_HEIGHT - GAME_AREA_Y) / 2.0 - BOSS_SIZE / 2.0,
        );
        Self {
            pos,
            hp,
            max_hp: hp,
            active: true,
            target: pos,
            ..Self::default()
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    fn enter(&mut self, phase: BossPhase) {
        self.phase = phase;
        self.phase_timer = 0;
    }

    /// Advance one frame against the player's box.
    ///
    /// Returns the three-bullet spread when the boss fires this frame.
    pub fn update<R: Rng>(
        &mut self,
        player: &Rect,
        speed_mult: f32,
        shoot_interval: u32,
        layout: &RoomLayout,
        rng: &mut R,
    ) -> Option<[Bullet; 3]> {
        if !self.active {
            return None;
        }

        self.speed_mult = speed_mult;
        self.shoot_interval = shoot_interval;
        self.phase_timer += 1;

        let mut volley = None;
        match self.phase {
            BossPhase::Chase => {
                self.step_toward(player.pos, BOSS_BASE_SPEED * speed_mult, layout);
                if self.phase_timer >= CHASE_FRAMES {
                    self.enter(BossPhase::Shoot);
                }
            }
            BossPhase::Shoot => {
                self.shoot_timer += 1;
                if self.shoot_timer >= shoot_interval / 3 {
                    volley = Some(self.fire_spread(player));
                    self.shoot_timer = 0;
                }
                if self.phase_timer >= SHOOT_FRAMES {
                    self.enter(BossPhase::Move);
                    self.target = Vec2::new(
                        TILE_SIZE * 2.0
                            + rng.random::<f32>() * (SCREEN_WIDTH - TILE_SIZE * 4.0 - BOSS_SIZE),
                        GAME_AREA_Y
                            + TILE_SIZE * 2.0
                            + rng.random::<f32>()
                                * (SCREEN_HEIGHT - GAME_AREA_Y - TILE_SIZE * 4.0 - BOSS_SIZE),
                    );
                }
            }
            BossPhase::Move => {
                self.step_toward(
                    self.target,
                    BOSS_BASE_SPEED * speed_mult * MOVE_SPEED_FACTOR,
                    layout,
                );
                if self.phase_timer >= MOVE_FRAMES || self.at_target() {
                    self.enter(BossPhase::Chase);
                }
            }
        }

        if self.hit_flash > 0 {
            self.hit_flash -= 1;
        }

        volley
    }

    fn at_target(&self) -> bool {
        self.pos.distance(self.target) < ARRIVE_DISTANCE
    }

    fn step_toward(&mut self, goal: Vec2, speed: f32, layout: &RoomLayout) {
        let delta = goal - self.pos;
        let dist = delta.length();
        if dist < STOP_DISTANCE {
            return;
        }
        self.try_move(delta / dist * speed, layout);
    }

    /// Per-axis move, kept one tile inside the room edges
    fn try_move(&mut self, step: Vec2, layout: &RoomLayout) {
        let new_x = self.pos.x + step.x;
        if new_x > TILE_SIZE
            && new_x < SCREEN_WIDTH - TILE_SIZE - self.size
            && !blocked_by_walls(&Rect::square(Vec2::new(new_x, self.pos.y), self.size), layout)
        {
            self.pos.x = new_x;
        }

        let new_y = self.pos.y + step.y;
        if new_y > GAME_AREA_Y + TILE_SIZE
            && new_y < SCREEN_HEIGHT - TILE_SIZE - self.size
            && !blocked_by_walls(&Rect::square(Vec2::new(self.pos.x, new_y), self.size), layout)
        {
            self.pos.y = new_y;
        }
    }

    fn fire_spread(&self, player: &Rect) -> [Bullet; 3] {
        let origin = self.bounds().center();
        let aim = player.center() - origin;
        let angle = aim.y.atan2(aim.x);
        [-1.0f32, 0.0, 1.0].map(|i| {
            let a = angle + i * SPREAD_ANGLE;
            Bullet::new(origin, Vec2::new(a.cos(), a.sin()), BulletOwner::Boss)
        })
    }

    /// Take one hit. Returns true when this hit defeats the boss.
    pub fn damage(&mut self) -> bool {
        self.hp -= 1;
        self.hit_flash = HIT_FLASH_FRAMES;
        self.hp <= 0
    }

    pub fn clear(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::room::Tile;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_room() -> RoomLayout {
        RoomLayout::filled(Tile::Floor)
    }

    fn player_at(x: f32, y: f32) -> Rect {
        Rect::square(Vec2::new(x, y), PLAYER_SIZE)
    }

    #[test]
    fn test_spawn_state() {
        let boss = Boss::spawn(10);
        assert!(boss.active);
        assert_eq!(boss.hp, 10);
        assert_eq!(boss.max_hp, 10);
        assert_eq!(boss.phase, BossPhase::Chase);
        assert_eq!(boss.pos, Vec2::new(192.0, 120.0));
    }

    #[test]
    fn test_chase_lasts_exactly_120_frames() {
        for player in [player_at(32.0, 120.0), player_at(200.0, 60.0), player_at(100.0, 200.0)] {
            let layout = open_room();
            let mut rng = Pcg32::seed_from_u64(5);
            let mut boss = Boss::spawn(10);
            for _ in 0..CHASE_FRAMES - 1 {
                boss.update(&player, 1.0, 120, &layout, &mut rng);
                assert_eq!(boss.phase, BossPhase::Chase);
            }
            boss.update(&player, 1.0, 120, &layout, &mut rng);
            assert_eq!(boss.phase, BossPhase::Shoot);
            assert_eq!(boss.phase_timer, 0);
        }
    }

    #[test]
    fn test_shoot_phase_fires_spreads() {
        let layout = open_room();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut boss = Boss::spawn(10);
        boss.enter(BossPhase::Shoot);
        let player = player_at(32.0, 120.0);

        let mut volleys = 0;
        for _ in 0..SHOOT_FRAMES {
            if let Some(spread) = boss.update(&player, 1.0, 120, &layout, &mut rng) {
                volleys += 1;
                assert!(spread.iter().all(|b| b.owner == BulletOwner::Boss));
            }
        }
        // Every 40 frames over 90 frames
        assert_eq!(volleys, 2);
        assert_eq!(boss.phase, BossPhase::Move);
        assert_eq!(boss.pos, Vec2::new(192.0, 120.0));
    }

    #[test]
    fn test_spread_is_centered_on_player() {
        let boss = Boss::spawn(10);
        let player = player_at(32.0, boss.bounds().center().y - PLAYER_SIZE / 2.0);
        let spread = boss.fire_spread(&player);
        let angles: Vec<f32> = spread.iter().map(|b| b.vel.y.atan2(b.vel.x)).collect();
        // Player is due west
        assert!((angles[1].abs() - std::f32::consts::PI).abs() < 1e-4);
        let flank = (angles[0] - angles[2]).abs();
        let wrapped = std::f32::consts::TAU - 2.0 * SPREAD_ANGLE;
        assert!((flank - 2.0 * SPREAD_ANGLE).abs() < 1e-4 || (flank - wrapped).abs() < 1e-4);
    }

    #[test]
    fn test_move_phase_returns_to_chase() {
        let layout = open_room();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut boss = Boss::spawn(10);
        boss.enter(BossPhase::Move);
        boss.target = Vec2::new(60.0, 60.0);
        let player = player_at(32.0, 120.0);
        for _ in 0..MOVE_FRAMES {
            boss.update(&player, 1.0, 120, &layout, &mut rng);
            if boss.phase == BossPhase::Chase {
                break;
            }
        }
        assert_eq!(boss.phase, BossPhase::Chase);
    }

    #[test]
    fn test_move_phase_ends_on_arrival() {
        let layout = open_room();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut boss = Boss::spawn(10);
        boss.enter(BossPhase::Move);
        boss.target = boss.pos + Vec2::new(3.0, 0.0);
        boss.update(&player_at(32.0, 120.0), 1.0, 120, &layout, &mut rng);
        assert_eq!(boss.phase, BossPhase::Chase);
    }

    #[test]
    fn test_damage_until_defeated() {
        let mut boss = Boss::spawn(3);
        assert!(!boss.damage());
        assert_eq!(boss.hit_flash, HIT_FLASH_FRAMES);
        assert!(!boss.damage());
        assert!(boss.damage());
        assert_eq!(boss.hp, 0);
    }

    #[test]
    fn test_stays_inside_tile_margin() {
        let layout = open_room();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut boss = Boss::spawn(10);
        let player = player_at(0.0, GAME_AREA_Y);
        for _ in 0..CHASE_FRAMES - 1 {
            boss.update(&player, 3.0, 120, &layout, &mut rng);
        }
        assert!(boss.pos.x > TILE_SIZE);
        assert!(boss.pos.y > GAME_AREA_Y + TILE_SIZE);
    }
}
