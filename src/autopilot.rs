//! Demo player for headless runs
//!
//! Reads the state and produces the next frame's input: confirm every
//! screen, hunt the nearest monster (or the boss) along an axis and shoot,
//! grab the heart when hurt, then walk out through the exit.

use glam::Vec2;

use crate::consts::*;
use crate::sim::room::{EXIT_GAP_HEIGHT, EXIT_GAP_TOP};
use crate::sim::{GamePhase, GameState, MoveIntent, TickInput};

/// Within this many pixels on the cross axis the target counts as lined up
const ALIGN_TOLERANCE: f32 = 6.0;
/// Frames without movement before trying a sidestep
const STUCK_FRAMES: u32 = 20;
const DETOUR_FRAMES: u32 = 24;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    last_pos: Vec2,
    stuck: u32,
    detour: u32,
    detour_intent: MoveIntent,
    detours_taken: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Playing => self.play(state),
            GamePhase::RoomTransition { .. } => TickInput::default(),
            // Every other screen is confirmed as soon as it accepts input
            _ => TickInput::action(),
        }
    }

    fn play(&mut self, state: &GameState) -> TickInput {
        let player = state.player.bounds().center();

        if state.player.pos.distance(self.last_pos) < 0.01 {
            self.stuck += 1;
        } else {
            self.stuck = 0;
        }
        self.last_pos = state.player.pos;

        if self.detour > 0 {
            self.detour -= 1;
            return TickInput {
                movement: self.detour_intent,
                ..Default::default()
            };
        }

        let mut input = if let Some(target) = self.pick_target(state) {
            aim_at(player, target)
        } else if state.heart.active && state.player.lives < PLAYER_MAX_LIVES {
            let heart = state.heart.bounds().center();
            TickInput {
                movement: toward(player, heart),
                action: player.distance(heart) < HEART_PICKUP_RADIUS,
                ..Default::default()
            }
        } else {
            let exit = Vec2::new(
                SCREEN_WIDTH,
                GAME_AREA_Y + TILE_SIZE * (EXIT_GAP_TOP as f32 + EXIT_GAP_HEIGHT as f32 / 2.0),
            );
            TickInput {
                movement: toward(player, exit),
                ..Default::default()
            }
        };

        if self.stuck >= STUCK_FRAMES && !input.movement.is_idle() {
            self.stuck = 0;
            self.detours_taken += 1;
            // Alternate sides so repeated detours don't cancel out
            let side = if self.detours_taken % 2 == 0 { 1 } else { -1 };
            self.detour_intent = if input.movement.dx != 0 {
                MoveIntent::new(0, side)
            } else {
                MoveIntent::new(side, 0)
            };
            self.detour = DETOUR_FRAMES;
            input.movement = self.detour_intent;
        }

        input
    }

    fn pick_target(&self, state: &GameState) -> Option<Vec2> {
        if state.boss.active {
            return Some(state.boss.bounds().center());
        }
        let player = state.player.bounds().center();
        state
            .active_monsters()
            .map(|m| m.bounds().center())
            .min_by(|a, b| {
                a.distance(player)
                    .partial_cmp(&b.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

fn toward(from: Vec2, to: Vec2) -> MoveIntent {
    let d = to - from;
    let step = |v: f32| {
        if v > PLAYER_SPEED {
            1
        } else if v < -PLAYER_SPEED {
            -1
        } else {
            0
        }
    };
    MoveIntent::new(step(d.x), step(d.y))
}

/// Line up on one axis, then face the target along the other and fire
fn aim_at(from: Vec2, target: Vec2) -> TickInput {
    let d = target - from;
    let dir = |v: f32| if v >= 0.0 { 1 } else { -1 };

    if d.y.abs() < ALIGN_TOLERANCE {
        TickInput {
            movement: MoveIntent::new(dir(d.x), 0),
            action: true,
            ..Default::default()
        }
    } else if d.x.abs() < ALIGN_TOLERANCE {
        TickInput {
            movement: MoveIntent::new(0, dir(d.y)),
            action: true,
            ..Default::default()
        }
    } else if d.y.abs() < d.x.abs() {
        TickInput {
            movement: MoveIntent::new(0, dir(d.y)),
            ..Default::default()
        }
    } else {
        TickInput {
            movement: MoveIntent::new(dir(d.x), 0),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    #[test]
    fn test_confirms_menus() {
        let mut pilot = Autopilot::new();
        let mut state = GameState::new(1);
        for _ in 0..3 {
            let input = pilot.next_input(&state);
            tick(&mut state, &input);
        }
        assert!(matches!(state.phase, GamePhase::FloorIntro { .. }));
    }

    #[test]
    fn test_aim_fires_when_lined_up() {
        let input = aim_at(Vec2::new(40.0, 128.0), Vec2::new(150.0, 130.0));
        assert!(input.action);
        assert_eq!(input.movement, MoveIntent::new(1, 0));

        let input = aim_at(Vec2::new(40.0, 128.0), Vec2::new(150.0, 200.0));
        assert!(!input.action);
        assert_eq!(input.movement, MoveIntent::new(0, 1));
    }

    #[test]
    fn test_autopilot_run_is_deterministic() {
        let run = |seed| {
            let mut pilot = Autopilot::new();
            let mut state = GameState::new(seed);
            for _ in 0..3000 {
                let input = pilot.next_input(&state);
                tick(&mut state, &input);
            }
            (state.frame, state.player.pos, state.progress.clone(), state.phase.name())
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_autopilot_shoots() {
        let mut pilot = Autopilot::new();
        let mut state = GameState::new(7);
        let mut shots = 0;
        for _ in 0..1200 {
            let input = pilot.next_input(&state);
            tick(&mut state, &input);
            shots += state
                .drain_sounds()
                .into_iter()
                .filter(|s| *s == crate::audio::SoundEffect::Shoot)
                .count();
        }
        assert!(shots > 0);
    }
}
