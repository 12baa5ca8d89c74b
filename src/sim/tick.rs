//! Fixed-step game flow
//!
//! One call to [`tick`] advances the whole game by one frame. The `Playing`
//! update runs its steps in a fixed order; a lethal hit on the player ends
//! the frame immediately.

use glam::Vec2;
use rand::Rng;

use super::boss::Boss;
use super::bullet::BulletOwner;
use super::collision::{is_near, overlaps};
use super::monster::spawn_monsters;
use super::pickup::AmmoPack;
use super::player::MoveIntent;
use super::progress::Difficulty;
use super::room::generate_layout;
use super::state::*;
use crate::audio::SoundEffect;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Up pressed this frame (menu cursor)
    pub up_pressed: bool,
    /// Down pressed this frame (menu cursor)
    pub down_pressed: bool,
    /// Action pressed this frame: shoot, confirm, pick up
    pub action: bool,
}

impl TickInput {
    pub fn action() -> Self {
        Self {
            action: true,
            ..Default::default()
        }
    }

    pub fn moving(dx: i8, dy: i8) -> Self {
        Self {
            movement: MoveIntent::new(dx, dy),
            ..Default::default()
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    match state.phase {
        GamePhase::Title => update_title(state, input),
        GamePhase::DifficultySelect { .. } => update_difficulty_select(state, input),
        GamePhase::FloorIntro { .. } => update_floor_intro(state, input),
        GamePhase::Playing => update_playing(state, input),
        GamePhase::RoomTransition { .. } => update_room_transition(state),
        GamePhase::BossIntro { .. } => update_boss_intro(state, input),
        GamePhase::GameOver { .. } => update_game_over(state, input),
        GamePhase::FloorClear { .. } => update_floor_clear(state, input),
        GamePhase::Win { .. } => update_win(state, input),
    }

    state.compact();
}

/// Bump the timer of a timed screen and return the new value
fn bump_timer(phase: &mut GamePhase) -> u32 {
    match phase {
        GamePhase::FloorIntro { timer }
        | GamePhase::BossIntro { timer }
        | GamePhase::GameOver { timer }
        | GamePhase::FloorClear { timer }
        | GamePhase::Win { timer } => {
            *timer += 1;
            *timer
        }
        _ => 0,
    }
}

fn update_title(state: &mut GameState, input: &TickInput) {
    if input.action {
        state.play(SoundEffect::Select);
        state.set_phase(GamePhase::DifficultySelect {
            selected: Difficulty::Normal.index(),
        });
    }
}

fn update_difficulty_select(state: &mut GameState, input: &TickInput) {
    let GamePhase::DifficultySelect { selected } = &mut state.phase else {
        return;
    };
    let max = Difficulty::ALL.len() - 1;
    let mut moved = false;
    if input.up_pressed {
        *selected = selected.saturating_sub(1);
        moved = true;
    }
    if input.down_pressed {
        *selected = (*selected + 1).min(max);
        moved = true;
    }
    let choice = Difficulty::from_index(*selected);

    if moved {
        state.play(SoundEffect::Select);
    }
    if input.action {
        state.progress.reset();
        state.progress.difficulty = choice;
        state.player = super::player::Player::new();
        state.play(SoundEffect::Select);
        start_floor(state);
    }
}

fn update_floor_intro(state: &mut GameState, input: &TickInput) {
    let timer = bump_timer(&mut state.phase);
    if timer > FLOOR_INTRO_FRAMES || (timer > FLOOR_INTRO_SKIP_FRAMES && input.action) {
        state.set_phase(GamePhase::Playing);
        setup_room(state);
    }
}

fn update_boss_intro(state: &mut GameState, input: &TickInput) {
    let timer = bump_timer(&mut state.phase);
    if timer > BOSS_INTRO_FRAMES || (timer > BOSS_INTRO_SKIP_FRAMES && input.action) {
        state.set_phase(GamePhase::Playing);
    }
}

fn update_game_over(state: &mut GameState, input: &TickInput) {
    let timer = bump_timer(&mut state.phase);
    if timer > GAME_OVER_LOCK_FRAMES && input.action {
        log::info!("Restarting floor {}", state.progress.floor + 1);
        state.progress.restart_floor();
        state.player.reset(true);
        start_floor(state);
    }
}

fn update_floor_clear(state: &mut GameState, input: &TickInput) {
    let timer = bump_timer(&mut state.phase);
    if timer > FLOOR_CLEAR_LOCK_FRAMES && input.action {
        if state.progress.advance_floor() {
            enter_win(state);
        } else {
            state.player.ensure_min_ammo(STARTING_AMMO);
            state.player.reset(true);
            start_floor(state);
        }
    }
}

fn update_win(state: &mut GameState, input: &TickInput) {
    let timer = bump_timer(&mut state.phase);
    if timer > WIN_LOCK_FRAMES && input.action {
        state.set_phase(GamePhase::Title);
    }
}

fn update_room_transition(state: &mut GameState) {
    let GamePhase::RoomTransition { frame, .. } = &mut state.phase else {
        return;
    };
    *frame += 1;
    let done = *frame >= TRANSITION_FRAMES;

    // Player waits at the left of the incoming room during the slide
    state.player.pos.x = 8.0;

    if !done {
        return;
    }

    let phase = std::mem::replace(&mut state.phase, GamePhase::Playing);
    if let GamePhase::RoomTransition { new_layout, .. } = phase {
        state.layout = *new_layout;
    }
    log::trace!("phase room_transition -> playing");
    state.progress.room_cleared = false;
    state.progress.heart_collected = false;
    state.player.pos = Vec2::new(20.0, PLAYER_START_Y);
    state.clear_bullets();
    state.heart.clear();
    state.ammo_packs.clear();
    log::debug!(
        "Entered floor {} room {}",
        state.progress.floor + 1,
        state.progress.room + 1
    );
    // May switch to BossIntro
    setup_room_entities(state);
}

fn update_playing(state: &mut GameState, input: &TickInput) {
    let params = state.params();
    let boss_room = state.progress.is_boss_room();

    // 1. Entity updates
    if let Some(bullet) = state.player.update(input.movement, input.action, &state.layout) {
        state.bullets.push(bullet);
        state.play(SoundEffect::Shoot);
    }

    for bullet in &mut state.bullets {
        bullet.update();
    }

    let player_box = state.player.bounds();
    if !boss_room {
        for monster in &mut state.monsters {
            monster.update(player_box.pos, params.monster_speed_mult, &state.layout, &mut state.rng);
        }
    }

    if boss_room && state.boss.active {
        let volley = state.boss.update(
            &player_box,
            params.boss_speed_mult,
            params.boss_shoot_interval,
            &state.layout,
            &mut state.rng,
        );
        if let Some(spread) = volley {
            state.bullets.extend(spread);
            state.play(SoundEffect::BossShoot);
        }
    }

    state.heart.update();

    // 2. Player bullets vs monsters: one kill per bullet, first monster wins
    if !boss_room {
        for bi in 0..state.bullets.len() {
            if !state.bullets[bi].active || !state.bullets[bi].is_player() {
                continue;
            }
            let bullet_box = state.bullets[bi].bounds();
            let Some(mi) = state
                .monsters
                .iter()
                .position(|m| m.active && overlaps(&bullet_box, &m.bounds()))
            else {
                continue;
            };

            let kill_pos = state.monsters[mi].bounds().center();
            state.last_kill_pos = kill_pos;
            state.monsters[mi].kill();
            state.bullets[bi].active = false;
            state.play(SoundEffect::MonsterDeath);

            if state.rng.random_bool(state.tuning.drop_chance()) {
                let bob_phase = state.rng.random::<f32>() * std::f32::consts::TAU;
                state.ammo_packs.push(AmmoPack::new(kill_pos, bob_phase));
            }
        }
    }

    // 3. Player bullets vs boss: first hit only
    if boss_room && state.boss.active {
        let boss_box = state.boss.bounds();
        if let Some(bi) = state
            .bullets
            .iter()
            .position(|b| b.active && b.is_player() && overlaps(&b.bounds(), &boss_box))
        {
            state.bullets[bi].active = false;
            if state.boss.damage() {
                state.play(SoundEffect::BossDeath);
                state.boss.clear();
                on_boss_defeated(state);
                // Phase is now FloorClear or Win; the exit check below must not replace it
                return;
            }
            state.play(SoundEffect::BossHit);
        }
    }

    // 4. Contact damage
    let player_box = state.player.bounds();
    if !boss_room {
        let touching = state
            .monsters
            .iter()
            .filter(|m| m.active && overlaps(&player_box, &m.bounds()))
            .count();
        for _ in 0..touching {
            if hurt_player(state) {
                return;
            }
        }
    }
    if boss_room && state.boss.active && overlaps(&player_box, &state.boss.bounds()) && hurt_player(state) {
        return;
    }

    // 5. Boss bullets vs player
    for bi in 0..state.bullets.len() {
        let bullet = &state.bullets[bi];
        if !bullet.active || bullet.owner != BulletOwner::Boss {
            continue;
        }
        if overlaps(&bullet.bounds(), &player_box) {
            state.bullets[bi].active = false;
            if hurt_player(state) {
                return;
            }
        }
    }

    // 6. Bullets stopped by walls
    for bullet in &mut state.bullets {
        if bullet.active && bullet.in_wall(&state.layout) {
            bullet.active = false;
        }
    }

    // 7. Room clear (boss rooms clear through the boss kill above)
    if !state.progress.room_cleared && !boss_room && state.active_monsters().next().is_none() {
        on_room_cleared(state);
    }

    // 8. Heart: stand close and press action
    if state.heart.active
        && input.action
        && is_near(&state.player.bounds(), &state.heart.bounds(), HEART_PICKUP_RADIUS)
        && state.player.heal()
    {
        state.heart.clear();
        state.progress.mark_heart_collected();
        state.play(SoundEffect::Pickup);
    }

    // 9. Ammo packs: walk over them
    let player_box = state.player.bounds();
    let amount = state.tuning.ammo_pack_amount;
    let mut collected = 0;
    for pack in &mut state.ammo_packs {
        pack.update();
    }
    for pack in state.ammo_packs.iter_mut().filter(|p| p.active) {
        if overlaps(&player_box, &pack.bounds()) && state.player.add_ammo(amount) {
            pack.active = false;
            collected += 1;
        }
    }
    for _ in 0..collected {
        state.play(SoundEffect::Pickup);
    }

    // 10. Leave through the exit
    if state.progress.room_cleared && state.player.at_right_edge() {
        start_room_transition(state);
    }
}

/// Apply one hit to the player. Returns true when the hit was lethal and
/// the game is now over.
fn hurt_player(state: &mut GameState) -> bool {
    if !state.player.damage() {
        return false;
    }
    state.play(SoundEffect::PlayerHit);
    if state.player.is_dead() {
        on_player_death(state);
        return true;
    }
    false
}

fn start_floor(state: &mut GameState) {
    state.clear_bullets();
    state.clear_monsters();
    state.boss.clear();
    state.heart.clear();
    state.ammo_packs.clear();
    log::info!(
        "Floor {}: {} ({})",
        state.progress.floor + 1,
        state.progress.theme().name,
        state.progress.difficulty.as_str()
    );
    state.set_phase(GamePhase::FloorIntro { timer: 0 });
}

/// Build the current room from scratch (first room of a floor)
fn setup_room(state: &mut GameState) {
    state.layout = generate_layout(state.progress.floor, state.progress.room);
    state.progress.room_cleared = false;
    state.progress.heart_collected = false;
    state.player.reset(false);
    state.clear_bullets();
    state.heart.clear();
    setup_room_entities(state);
}

/// Spawn monsters, or the boss plus its intro screen
fn setup_room_entities(state: &mut GameState) {
    state.clear_monsters();
    state.boss.clear();
    state.clear_bullets();
    state.reseed_for_room();

    if state.progress.is_boss_room() {
        state.boss = Boss::spawn(state.tuning.boss_hp);
        log::info!("Boss room: {} ({} hp)", state.progress.theme().boss, state.boss.hp);
        state.set_phase(GamePhase::BossIntro { timer: 0 });
    } else {
        let count = state.params().monsters_per_room;
        state.monsters = spawn_monsters(count, &state.layout, &mut state.rng);
    }
}

fn on_room_cleared(state: &mut GameState) {
    state.progress.mark_room_cleared();
    state.layout.carve_exit();
    state.play(SoundEffect::RoomClear);
    log::debug!(
        "Room {} of floor {} cleared",
        state.progress.room + 1,
        state.progress.floor + 1
    );

    if !state.progress.heart_collected {
        state.heart.spawn(state.last_kill_pos);
    }
}

fn on_boss_defeated(state: &mut GameState) {
    state.progress.mark_room_cleared();
    state.clear_bullets();
    state.play(SoundEffect::FloorClear);
    log::info!("{} defeated", state.progress.theme().boss);

    if state.progress.is_last_floor() {
        enter_win(state);
    } else {
        state.set_phase(GamePhase::FloorClear { timer: 0 });
    }
}

fn on_player_death(state: &mut GameState) {
    state.play(SoundEffect::GameOver);
    log::info!(
        "Game over on floor {} room {}",
        state.progress.floor + 1,
        state.progress.room + 1
    );
    state.set_phase(GamePhase::GameOver { timer: 0 });
}

fn enter_win(state: &mut GameState) {
    state.play(SoundEffect::Victory);
    log::info!("Tower conquered on {}", state.progress.difficulty.as_str());
    state.set_phase(GamePhase::Win { timer: 0 });
}

fn start_room_transition(state: &mut GameState) {
    let old_layout = Box::new(state.layout.clone());

    if state.progress.advance_room() {
        // Boss rooms end the floor themselves; only reached on a bad room index
        log::warn!("Walked past the last room of floor {}", state.progress.floor + 1);
        state.play(SoundEffect::FloorClear);
        state.set_phase(GamePhase::FloorClear { timer: 0 });
        return;
    }

    let new_layout = Box::new(generate_layout(state.progress.floor, state.progress.room));
    state.set_phase(GamePhase::RoomTransition {
        frame: 0,
        old_layout,
        new_layout,
    });
}
