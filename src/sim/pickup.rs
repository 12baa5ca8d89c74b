//! Heart and ammo-pack pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::PICKUP_SIZE;

/// Bob amplitude in pixels
const BOB_AMPLITUDE: f32 = 2.0;

/// Extra life, left behind when a room is cleared. Collected with the
/// action key while standing close to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Heart {
    pub pos: Vec2,
    pub active: bool,
    pub bob_timer: u32,
    pub bob_offset: f32,
}

impl Heart {
    /// Activate centered on `center`
    pub fn spawn(&mut self, center: Vec2) {
        self.pos = center - Vec2::splat(PICKUP_SIZE / 2.0);
        self.active = true;
        self.bob_timer = 0;
        self.bob_offset = 0.0;
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, PICKUP_SIZE)
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.bob_timer += 1;
        self.bob_offset = (self.bob_timer as f32 * 0.1).sin() * BOB_AMPLITUDE;
    }

    pub fn clear(&mut self) {
        self.active = false;
    }
}

/// Ammo refill dropped by monsters. Collected on touch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoPack {
    pub pos: Vec2,
    pub active: bool,
    /// Bob phase; packs start at different phases so they don't move in sync
    pub bob_timer: f32,
    pub bob_offset: f32,
}

impl AmmoPack {
    pub fn new(center: Vec2, bob_phase: f32) -> Self {
        Self {
            pos: center - Vec2::splat(PICKUP_SIZE / 2.0),
            active: true,
            bob_timer: bob_phase,
            bob_offset: 0.0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.pos, PICKUP_SIZE)
    }

    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.bob_timer += 1.0;
        self.bob_offset = (self.bob_timer * 0.12).sin() * BOB_AMPLITUDE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_spawns_centered() {
        let mut heart = Heart::default();
        heart.spawn(Vec2::new(100.0, 80.0));
        assert!(heart.active);
        assert_eq!(heart.bounds().center(), Vec2::new(100.0, 80.0));
    }

    #[test]
    fn test_heart_bob_stays_in_amplitude() {
        let mut heart = Heart::default();
        heart.spawn(Vec2::new(100.0, 80.0));
        for _ in 0..200 {
            heart.update();
            assert!(heart.bob_offset.abs() <= BOB_AMPLITUDE);
        }
        assert_eq!(heart.bob_timer, 200);
    }

    #[test]
    fn test_inactive_heart_does_not_animate() {
        let mut heart = Heart::default();
        heart.update();
        assert_eq!(heart.bob_timer, 0);
    }

    #[test]
    fn test_pack_bob() {
        let mut pack = AmmoPack::new(Vec2::new(50.0, 50.0), 1.0);
        pack.update();
        assert!((pack.bob_offset - (2.0f32 * 0.12).sin() * BOB_AMPLITUDE).abs() < 1e-6);
    }
}
