//! The Tower - a top-down arcade shooter across ten themed floors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game flow)
//! - `tuning`: Data-driven game balance
//! - `audio`: Sound trigger boundary
//! - `renderer`: Read-only frame snapshots and a debug text renderer
//! - `platform`: Keyboard input state
//! - `autopilot`: Scripted player for headless runs

pub mod audio;
pub mod autopilot;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation frames per second
    pub const FRAME_RATE: u32 = 60;

    /// Screen dimensions (HUD band on top, room grid below)
    pub const SCREEN_WIDTH: f32 = 256.0;
    pub const SCREEN_HEIGHT: f32 = 248.0;
    pub const HUD_HEIGHT: f32 = 24.0;
    /// Top edge of the playfield
    pub const GAME_AREA_Y: f32 = HUD_HEIGHT;

    /// Room grid
    pub const TILE_SIZE: f32 = 16.0;
    pub const ROOM_COLS: usize = 16;
    pub const ROOM_ROWS: usize = 14;

    /// Player
    pub const PLAYER_SIZE: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 1.5;
    pub const PLAYER_MAX_LIVES: i32 = 10;
    pub const SHOOT_COOLDOWN: u32 = 15;
    pub const INVINCIBILITY_FRAMES: u32 = 60;
    pub const PLAYER_START_X: f32 = 32.0;
    pub const PLAYER_START_Y: f32 = GAME_AREA_Y + 96.0;

    /// Ammo
    pub const STARTING_AMMO: u32 = 10;
    pub const MAX_AMMO: u32 = 25;

    /// Bullets
    pub const BULLET_SPEED: f32 = 3.0;
    pub const BULLET_SIZE: f32 = 4.0;
    pub const BOSS_BULLET_SPEED: f32 = 1.8;
    pub const BOSS_BULLET_SIZE: f32 = 6.0;
    /// Bullets are dropped once this far outside the screen
    pub const BULLET_OFFSCREEN_MARGIN: f32 = 10.0;

    /// Monsters
    pub const MONSTER_SIZE: f32 = 16.0;
    pub const MONSTER_BASE_SPEED: f32 = 0.5;

    /// Boss
    pub const BOSS_SIZE: f32 = 32.0;
    pub const BOSS_BASE_SPEED: f32 = 0.6;

    /// Pickups
    pub const PICKUP_SIZE: f32 = 16.0;
    pub const HEART_PICKUP_RADIUS: f32 = 20.0;

    /// Progression
    pub const ROOMS_PER_FLOOR: usize = 8;
    pub const TOTAL_FLOORS: usize = 10;
}
