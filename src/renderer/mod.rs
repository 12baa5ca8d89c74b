//! Rendering boundary
//!
//! Renderers only ever see a [`Snapshot`]: a borrowed, read-only view of one
//! frame. Inactive entities are already filtered out.

pub mod text;

use serde::Serialize;

use crate::sim::{
    AmmoPack, Boss, Bullet, GamePhase, GameState, Heart, Monster, Player, Progress, RoomLayout,
};

pub use text::TextRenderer;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub frame: u64,
    pub phase: &'a GamePhase,
    pub progress: &'a Progress,
    pub theme: &'static str,
    pub layout: &'a RoomLayout,
    pub player: &'a Player,
    pub monsters: Vec<&'a Monster>,
    pub boss: Option<&'a Boss>,
    pub bullets: Vec<&'a Bullet>,
    pub heart: Option<&'a Heart>,
    pub ammo_packs: Vec<&'a AmmoPack>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            frame: state.frame,
            phase: &state.phase,
            progress: &state.progress,
            theme: state.progress.theme().name,
            layout: &state.layout,
            player: &state.player,
            monsters: state.active_monsters().collect(),
            boss: state.boss.active.then_some(&state.boss),
            bullets: state.active_bullets().collect(),
            heart: state.heart.active.then_some(&state.heart),
            ammo_packs: state.active_ammo_packs().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Anything that can present a frame
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}
