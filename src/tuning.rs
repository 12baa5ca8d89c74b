//! Data-driven game balance
//!
//! Difficulty tiers plus the pickup and boss numbers. Defaults match the
//! shipped game; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::progress::Difficulty;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Per-tier numbers, looked up every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub monsters_per_room: usize,
    pub monster_speed_mult: f32,
    /// Frames per boss volley cycle; the boss fires every third of this
    pub boss_shoot_interval: u32,
    pub boss_speed_mult: f32,
}

impl DifficultyParams {
    pub const EASY: Self = Self {
        monsters_per_room: 3,
        monster_speed_mult: 0.7,
        boss_shoot_interval: 180,
        boss_speed_mult: 0.6,
    };
    pub const NORMAL: Self = Self {
        monsters_per_room: 4,
        monster_speed_mult: 1.0,
        boss_shoot_interval: 120,
        boss_speed_mult: 1.0,
    };
    pub const HARD: Self = Self {
        monsters_per_room: 5,
        monster_speed_mult: 1.4,
        boss_shoot_interval: 72,
        boss_speed_mult: 1.3,
    };

    fn validate(&self, tier: &str) -> Result<(), TuningError> {
        if self.monsters_per_room > MAX_MONSTERS_PER_ROOM {
            return Err(TuningError::Invalid(format!(
                "{tier}: monsters_per_room {} exceeds {MAX_MONSTERS_PER_ROOM}",
                self.monsters_per_room
            )));
        }
        for (name, v) in [
            ("monster_speed_mult", self.monster_speed_mult),
            ("boss_speed_mult", self.boss_speed_mult),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(TuningError::Invalid(format!("{tier}: {name} must be positive, got {v}")));
            }
        }
        if self.boss_shoot_interval < 3 {
            return Err(TuningError::Invalid(format!(
                "{tier}: boss_shoot_interval must be at least 3, got {}",
                self.boss_shoot_interval
            )));
        }
        Ok(())
    }
}

/// Upper bound accepted for `monsters_per_room`
pub const MAX_MONSTERS_PER_ROOM: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: DifficultyParams,
    pub normal: DifficultyParams,
    pub hard: DifficultyParams,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyParams::EASY,
            normal: DifficultyParams::NORMAL,
            hard: DifficultyParams::HARD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub difficulties: DifficultyTable,
    /// Boss hit points (same on every floor and tier)
    pub boss_hp: i32,
    /// Ammo granted by one pack
    pub ammo_pack_amount: u32,
    /// Chance a killed monster drops a pack
    pub ammo_drop_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulties: DifficultyTable::default(),
            boss_hp: 10,
            ammo_pack_amount: 5,
            ammo_drop_chance: 0.3,
        }
    }
}

impl Tuning {
    pub fn params(&self, difficulty: Difficulty) -> &DifficultyParams {
        match difficulty {
            Difficulty::Easy => &self.difficulties.easy,
            Difficulty::Normal => &self.difficulties.normal,
            Difficulty::Hard => &self.difficulties.hard,
        }
    }

    /// Drop chance usable as a probability; out-of-range or NaN values are
    /// pulled back into `[0, 1]`
    pub fn drop_chance(&self) -> f64 {
        if self.ammo_drop_chance.is_nan() {
            0.0
        } else {
            self.ammo_drop_chance.clamp(0.0, 1.0)
        }
    }

    /// Parse and validate a JSON tuning document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&content)?;
        log::info!("Loaded tuning (boss hp {}, drop chance {})", tuning.boss_hp, tuning.ammo_drop_chance);
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.difficulties.easy.validate("easy")?;
        self.difficulties.normal.validate("normal")?;
        self.difficulties.hard.validate("hard")?;
        if self.boss_hp < 1 {
            return Err(TuningError::Invalid(format!("boss_hp must be at least 1, got {}", self.boss_hp)));
        }
        if self.ammo_pack_amount < 1 {
            return Err(TuningError::Invalid("ammo_pack_amount must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.ammo_drop_chance) {
            return Err(TuningError::Invalid(format!(
                "ammo_drop_chance must be within [0, 1], got {}",
                self.ammo_drop_chance
            )));
        }
        Ok(())
    }
}
