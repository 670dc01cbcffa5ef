//! Sound cue routing
//!
//! The simulation never talks to an audio device. It queues `SoundCue`s on
//! the game state each tick, and the host drains them into an `AudioSink`.
//! Cues are fire-and-forget: a sink may drop them without affecting gameplay.

/// Sound cue types emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Walking on the ground
    Footstep,
    /// Player leaves the ground
    Jump,
    /// Coin or coin bag collected
    Coin,
    /// Player takes damage
    Damage,
    /// Sword swing
    Attack,
    /// Gun fired
    Shoot,
    /// Landing on a trampoline platform
    Bounce,
    /// Contact with lava
    Lava,
    /// Chest opened
    ChestOpen,
    /// Armor piece or weapon equipped
    ArmorEquip,
    /// Potion consumed
    PotionDrink,
    /// Goal reached with enough coins
    LevelComplete,
    /// Player died
    Fail,
}

/// Destination for sound cues drained from the simulation
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink that logs cues instead of playing them; used by the headless
/// binary and in tests
pub struct LogAudioSink {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for LogAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudioSink {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sound cue: {cue:?} (volume {vol:.2})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_volume_is_zero() {
        let mut sink = LogAudioSink::new();
        sink.set_muted(true);
        assert_eq!(sink.effective_volume(), 0.0);
        sink.set_muted(false);
        assert!(sink.effective_volume() > 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut sink = LogAudioSink::new();
        sink.set_master_volume(2.0);
        sink.set_sfx_volume(-1.0);
        assert_eq!(sink.effective_volume(), 0.0);
        sink.set_sfx_volume(0.5);
        assert_eq!(sink.effective_volume(), 0.5);
    }
}
