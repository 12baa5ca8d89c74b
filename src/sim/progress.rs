//! Run progress: floor, room, difficulty and per-room flags

use serde::{Deserialize, Serialize};

use crate::consts::{ROOMS_PER_FLOOR, TOTAL_FLOORS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Menu index to tier, clamped to the last tier
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Names shown for a floor and its inhabitants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorTheme {
    pub name: &'static str,
    pub monsters: [&'static str; 2],
    pub boss: &'static str,
}

pub const FLOOR_THEMES: [FloorTheme; TOTAL_FLOORS] = [
    FloorTheme { name: "Dungeon", monsters: ["Rat", "Bat"], boss: "Giant Spider" },
    FloorTheme { name: "Sewers", monsters: ["Slime", "Croc"], boss: "Sewer Beast" },
    FloorTheme { name: "Forest", monsters: ["Wolf", "Goblin"], boss: "Treant" },
    FloorTheme { name: "Graveyard", monsters: ["Skeleton", "Zombie"], boss: "Lich" },
    FloorTheme { name: "Ice Cave", monsters: ["Ice Elem", "Frost Wolf"], boss: "Frost Giant" },
    FloorTheme { name: "Volcano", monsters: ["Fire Imp", "Lava Snake"], boss: "Fire Dragon" },
    FloorTheme { name: "Swamp", monsters: ["Bog Thing", "Toxic Frog"], boss: "Swamp Hydra" },
    FloorTheme { name: "Sky Castle", monsters: ["Harpy", "Cloud Spirit"], boss: "Storm Eagle" },
    FloorTheme { name: "Shadow Realm", monsters: ["Dark Knight", "Wraith"], boss: "Shadow Lord" },
    FloorTheme { name: "Throne Room", monsters: ["Elite Guard", "Dark Wizard"], boss: "Dark King" },
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub floor: usize,
    pub room: usize,
    pub difficulty: Difficulty,
    pub room_cleared: bool,
    pub heart_collected: bool,
}

impl Progress {
    pub fn theme(&self) -> &'static FloorTheme {
        &FLOOR_THEMES[self.floor.min(TOTAL_FLOORS - 1)]
    }

    pub fn is_boss_room(&self) -> bool {
        super::room::is_boss_room(self.room)
    }

    pub fn is_last_floor(&self) -> bool {
        self.floor == TOTAL_FLOORS - 1
    }

    fn clear_room_flags(&mut self) {
        self.room_cleared = false;
        self.heart_collected = false;
    }

    /// Step to the next room. Returns true if that walks off the floor.
    pub fn advance_room(&mut self) -> bool {
        self.room += 1;
        self.clear_room_flags();
        self.room >= ROOMS_PER_FLOOR
    }

    /// Step to room 0 of the next floor. Returns true past the last floor.
    pub fn advance_floor(&mut self) -> bool {
        self.floor += 1;
        self.room = 0;
        self.clear_room_flags();
        self.floor >= TOTAL_FLOORS
    }

    pub fn restart_floor(&mut self) {
        self.room = 0;
        self.clear_room_flags();
    }

    /// Back to floor 0, room 0, keeping the selected difficulty
    pub fn reset(&mut self) {
        self.floor = 0;
        self.room = 0;
        self.clear_room_flags();
    }

    pub fn mark_room_cleared(&mut self) {
        self.room_cleared = true;
    }

    pub fn mark_heart_collected(&mut self) {
        self.heart_collected = true;
    }
}
