//! ASCII renderer for headless runs and debugging
//!
//! One character per tile. Entities are drawn at the tile under their center;
//! the boss covers its full 2x2 footprint.

use std::fmt::Write;

use glam::Vec2;

use super::{Renderer, Snapshot};
use crate::consts::{ROOM_COLS, ROOM_ROWS};
use crate::sim::collision::tile_at;
use crate::sim::{BulletOwner, GamePhase, Tile};

#[derive(Debug, Default, Clone)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn render(snapshot: &Snapshot<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", status_line(snapshot));

        if !shows_room(snapshot.phase) {
            let _ = writeln!(out, "{}", banner(snapshot));
            return out;
        }

        let mut grid: Vec<Vec<char>> = snapshot
            .layout
            .rows()
            .map(|row| {
                row.iter()
                    .map(|t| match t {
                        Tile::Wall => '#',
                        Tile::Floor => '.',
                    })
                    .collect()
            })
            .collect();

        let mut put = |center: Vec2, glyph: char| {
            let (row, col) = tile_at(center);
            if (0..ROOM_ROWS as i32).contains(&row) && (0..ROOM_COLS as i32).contains(&col) {
                grid[row as usize][col as usize] = glyph;
            }
        };

        if let Some(heart) = snapshot.heart {
            put(heart.bounds().center(), 'h');
        }
        for pack in &snapshot.ammo_packs {
            put(pack.bounds().center(), 'a');
        }
        for monster in &snapshot.monsters {
            put(monster.bounds().center(), if monster.kind == 0 { 'm' } else { 'M' });
        }
        if let Some(boss) = snapshot.boss {
            let b = boss.bounds();
            for corner in [
                b.pos,
                b.pos + Vec2::new(b.size.x - 1.0, 0.0),
                b.pos + Vec2::new(0.0, b.size.y - 1.0),
                b.pos + b.size - Vec2::ONE,
            ] {
                put(corner, 'B');
            }
        }
        for bullet in &snapshot.bullets {
            let glyph = match bullet.owner {
                BulletOwner::Player => '*',
                BulletOwner::Boss => 'o',
            };
            put(bullet.bounds().center(), glyph);
        }
        put(snapshot.player.bounds().center(), '@');

        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>) {
        self.frame = Self::render(snapshot);
    }
}

fn shows_room(phase: &GamePhase) -> bool {
    matches!(
        phase,
        GamePhase::Playing
            | GamePhase::RoomTransition { .. }
            | GamePhase::BossIntro { .. }
            | GamePhase::GameOver { .. }
    )
}

fn status_line(snapshot: &Snapshot<'_>) -> String {
    let p = snapshot.progress;
    let mut line = format!(
        "[{}] {}-{} {} | lives {} | ammo {}",
        snapshot.phase.name(),
        p.floor + 1,
        p.room + 1,
        snapshot.theme,
        snapshot.player.lives.max(0),
        snapshot.player.ammo,
    );
    if let Some(boss) = snapshot.boss {
        let _ = write!(line, " | boss {}/{}", boss.hp.max(0), boss.max_hp);
    }
    if let Some(t) = snapshot.phase.transition_progress() {
        let _ = write!(line, " | slide {:.0}%", t * 100.0);
    }
    line
}

fn banner(snapshot: &Snapshot<'_>) -> String {
    match snapshot.phase {
        GamePhase::Title => "THE TOWER - press space".to_string(),
        GamePhase::DifficultySelect { selected } => ["Easy", "Normal", "Hard"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == *selected {
                    format!("> {name}")
                } else {
                    format!("  {name}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        GamePhase::FloorIntro { .. } => {
            format!("FLOOR {}: {}", snapshot.progress.floor + 1, snapshot.theme)
        }
        GamePhase::FloorClear { .. } => "FLOOR CLEAR".to_string(),
        GamePhase::Win { .. } => "THE TOWER IS CONQUERED".to_string(),
        _ => String::new(),
    }
}
