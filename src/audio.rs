//! Sound trigger boundary
//!
//! The simulation only names the sounds it wants; a host-side sink decides
//! how (or whether) to play them. Triggers are fire-and-forget.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Player loses a life
    PlayerHit,
    /// Monster killed
    MonsterDeath,
    /// Boss fires a spread
    BossShoot,
    /// Boss hit but still standing
    BossHit,
    /// Boss defeated
    BossDeath,
    /// Heart or ammo pack collected
    Pickup,
    /// Last monster in the room died
    RoomClear,
    /// Boss room finished
    FloorClear,
    /// Player out of lives
    GameOver,
    /// Final floor finished
    Victory,
    /// Menu confirm / cursor move
    Select,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::MonsterDeath => "monster_death",
            SoundEffect::BossShoot => "boss_shoot",
            SoundEffect::BossHit => "boss_hit",
            SoundEffect::BossDeath => "boss_death",
            SoundEffect::Pickup => "pickup",
            SoundEffect::RoomClear => "room_clear",
            SoundEffect::FloorClear => "floor_clear",
            SoundEffect::GameOver => "game_over",
            SoundEffect::Victory => "victory",
            SoundEffect::Select => "select",
        }
    }
}

/// Something that can play sound effects. Must not block.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    fn play_all(&mut self, effects: impl IntoIterator<Item = SoundEffect>)
    where
        Self: Sized,
    {
        for effect in effects {
            self.play(effect);
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs each trigger and keeps a per-effect count, for headless runs
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    muted: bool,
    counts: std::collections::BTreeMap<&'static str, u32>,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute logging (counts are still kept)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn count(&self, effect: SoundEffect) -> u32 {
        self.counts.get(effect.as_str()).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            log::trace!("sfx {}", effect.as_str());
        }
        *self.counts.entry(effect.as_str()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_audio_counts() {
        let mut audio = LogAudio::new();
        audio.play_all([SoundEffect::Shoot, SoundEffect::Shoot, SoundEffect::Victory]);
        assert_eq!(audio.count(SoundEffect::Shoot), 2);
        assert_eq!(audio.count(SoundEffect::Victory), 1);
        assert_eq!(audio.count(SoundEffect::BossHit), 0);
    }

    #[test]
    fn test_muted_still_counts() {
        let mut audio = LogAudio::new();
        audio.set_muted(true);
        audio.play(SoundEffect::Select);
        assert_eq!(audio.count(SoundEffect::Select), 1);
    }
}
