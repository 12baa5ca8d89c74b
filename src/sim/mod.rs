//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (room layouts use their own per-room generator)
//! - Stable iteration order (entity list order)
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod bullet;
pub mod collision;
pub mod monster;
pub mod pickup;
pub mod player;
pub mod progress;
pub mod room;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossPhase};
pub use bullet::{Bullet, BulletOwner};
pub use collision::{Rect, blocked_by_walls, is_near, overlaps};
pub use monster::{Monster, spawn_monsters};
pub use pickup::{AmmoPack, Heart};
pub use player::{Facing, MoveIntent, Player};
pub use progress::{Difficulty, FLOOR_THEMES, FloorTheme, Progress};
pub use room::{LayoutRng, RoomLayout, RoomPattern, Tile, generate_layout, is_boss_room};
pub use state::{GamePhase, GameState, TRANSITION_FRAMES};
pub use tick::{TickInput, tick};
