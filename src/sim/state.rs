//! Game state and flow phases
//!
//! `GameState` is the whole simulation context: one value owns the player,
//! every entity list, progress and the run RNG. Nothing is global, so any
//! number of independent runs can exist side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::bullet::Bullet;
use super::monster::Monster;
use super::pickup::{AmmoPack, Heart};
use super::player::Player;
use super::progress::Progress;
use super::room::RoomLayout;
use crate::audio::SoundEffect;
use crate::tuning::{DifficultyParams, Tuning, TuningError};

/// Frames for the room slide to complete
pub const TRANSITION_FRAMES: u32 = 50;

/// Frame counts gating each timed screen
pub const FLOOR_INTRO_FRAMES: u32 = 120;
pub const FLOOR_INTRO_SKIP_FRAMES: u32 = 30;
pub const BOSS_INTRO_FRAMES: u32 = 120;
pub const BOSS_INTRO_SKIP_FRAMES: u32 = 40;
pub const GAME_OVER_LOCK_FRAMES: u32 = 60;
pub const FLOOR_CLEAR_LOCK_FRAMES: u32 = 90;
pub const WIN_LOCK_FRAMES: u32 = 150;

/// Current screen, each carrying only its own data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    Title,
    /// Menu cursor: 0 easy, 1 normal, 2 hard
    DifficultySelect { selected: usize },
    FloorIntro { timer: u32 },
    Playing,
    /// Slide from the old room to the new one
    RoomTransition {
        frame: u32,
        old_layout: Box<RoomLayout>,
        new_layout: Box<RoomLayout>,
    },
    BossIntro { timer: u32 },
    GameOver { timer: u32 },
    FloorClear { timer: u32 },
    Win { timer: u32 },
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Title => "title",
            GamePhase::DifficultySelect { .. } => "difficulty_select",
            GamePhase::FloorIntro { .. } => "floor_intro",
            GamePhase::Playing => "playing",
            GamePhase::RoomTransition { .. } => "room_transition",
            GamePhase::BossIntro { .. } => "boss_intro",
            GamePhase::GameOver { .. } => "game_over",
            GamePhase::FloorClear { .. } => "floor_clear",
            GamePhase::Win { .. } => "win",
        }
    }

    /// Slide completion in `[0, 1]`; `None` outside a room transition
    pub fn transition_progress(&self) -> Option<f32> {
        match self {
            GamePhase::RoomTransition { frame, .. } => {
                Some((*frame as f32 / TRANSITION_FRAMES as f32).min(1.0))
            }
            _ => None,
        }
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed; per-room RNG streams derive from it
    pub seed: u64,
    /// Randomness for spawns, wander, drops and boss targets
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub progress: Progress,
    /// Layout of the room being played
    pub layout: RoomLayout,
    pub player: Player,
    /// Dead monsters stay (inactive) until the room resets
    pub monsters: Vec<Monster>,
    pub boss: Boss,
    pub bullets: Vec<Bullet>,
    pub heart: Heart,
    pub ammo_packs: Vec<AmmoPack>,
    /// Center of the most recent monster kill (heart spawn point)
    pub last_kill_pos: Vec2,
    /// Simulation frame counter
    pub frame: u64,
    /// Sounds requested since the last drain
    sounds: Vec<SoundEffect>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a game state with custom balance. The tuning is validated first.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Title,
            progress: Progress::default(),
            layout: RoomLayout::default(),
            player: Player::new(),
            monsters: Vec::new(),
            boss: Boss::default(),
            bullets: Vec::new(),
            heart: Heart::default(),
            ammo_packs: Vec::new(),
            last_kill_pos: Vec2::ZERO,
            frame: 0,
            sounds: Vec::new(),
        }
    }

    /// Difficulty numbers for the selected tier
    pub fn params(&self) -> DifficultyParams {
        *self.tuning.params(self.progress.difficulty)
    }

    /// Replace the phase; the new phase starts with fresh data
    pub fn set_phase(&mut self, phase: GamePhase) {
        log::trace!("phase {} -> {}", self.phase.name(), phase.name());
        self.phase = phase;
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    /// Take the sounds queued since the last call
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// Queued sounds without draining them
    pub fn pending_sounds(&self) -> &[SoundEffect] {
        &self.sounds
    }

    /// Re-seed the run RNG for the current room so each room's content
    /// depends only on (seed, floor, room)
    pub fn reseed_for_room(&mut self) {
        let stream = (self.progress.floor as u64) * 1000 + self.progress.room as u64;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(stream));
    }

    pub fn active_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|m| m.active)
    }

    pub fn active_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.active)
    }

    pub fn active_ammo_packs(&self) -> impl Iterator<Item = &AmmoPack> {
        self.ammo_packs.iter().filter(|p| p.active)
    }

    pub fn clear_bullets(&mut self) {
        self.bullets.clear();
    }

    pub fn clear_monsters(&mut self) {
        self.monsters.clear();
    }

    /// Drop inactive bullets and packs. Monsters are only cleared on room reset.
    pub fn compact(&mut self) {
        self.bullets.retain(|b| b.active);
        self.ammo_packs.retain(|p| p.active);
    }
}
