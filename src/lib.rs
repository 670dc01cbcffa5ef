//! Skyward - a side-scrolling 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, loot, game state)
//! - `audio`: Fire-and-forget sound cue sink for downstream playback
//! - `settings`: Player preferences with JSON persistence

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, LogAudioSink, SoundCue};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per second
    pub const TICK_HZ: u64 = 60;

    /// Viewport (canvas) dimensions in world pixels
    pub const VIEWPORT_WIDTH: f32 = 1300.0;
    pub const VIEWPORT_HEIGHT: f32 = 700.0;
    /// Height of the ground strip at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 70.0;
    /// Y coordinate of the walkable ground line
    pub const GROUND_Y: f32 = VIEWPORT_HEIGHT - GROUND_HEIGHT - 105.0;
    /// Upper world boundary, comfortably above the highest authored
    /// platforms so it never blocks a reachable jump
    pub const WORLD_TOP: f32 = GROUND_Y - 1200.0;
    /// Ticks between footstep cues while walking on the ground
    pub const FOOTSTEP_INTERVAL_TICKS: u64 = 18;
    /// Falling this far below the viewport is instant death
    pub const DEATH_PLANE_MARGIN: f32 = 100.0;

    /// Downward acceleration per tick²
    pub const GRAVITY: f32 = 0.65;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 35.0;
    pub const PLAYER_HEIGHT: f32 = 35.0;
    pub const PLAYER_CROUCH_HEIGHT: f32 = 18.7;
    /// Player spawn x at the start of every level
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_FRICTION: f32 = 0.8;
    pub const BASE_JUMP_POWER: f32 = 13.0;
    /// Crouch jump is 60% of a normal jump
    pub const CROUCH_JUMP_FACTOR: f32 = 0.6;
    /// Extra fall acceleration while crouching mid-air
    pub const FAST_FALL_MULTIPLIER: f32 = 1.53;
    pub const MAX_MOMENTUM: f32 = 2.25;
    /// Momentum gained per moving jump
    pub const MOMENTUM_STEP: f32 = 0.25;
    /// Airborne dx scaling per unit of momentum
    pub const MOMENTUM_SCALE: f32 = 0.075;
    pub const MAX_HEALTH: f32 = 100.0;
    pub const MAX_ARMOR: f32 = 100.0;

    /// Combat tuning
    pub const ENEMY_CONTACT_DAMAGE: f32 = 7.0;
    pub const KNOCKBACK_X: f32 = 15.0;
    pub const KNOCKBACK_Y: f32 = -8.0;
    pub const INVULNERABILITY_MS: u64 = 1000;
    /// Per-enemy cooldown between contact-damage applications
    pub const ENEMY_DAMAGE_COOLDOWN_MS: u64 = 500;
    /// Idle time after the last hit before health regeneration starts
    pub const REGEN_IDLE_MS: u64 = 5700;
    /// Interval between +1 regeneration ticks
    pub const REGEN_INTERVAL_MS: u64 = 178;
    pub const HAZARD_DAMAGE: f32 = 5.0;

    /// Pickup box edge for level coins
    pub const COIN_SIZE: f32 = 10.0;

    /// Checkpoint marker hitbox
    pub const CHECKPOINT_WIDTH: f32 = 30.0;
    pub const CHECKPOINT_HEIGHT: f32 = 50.0;

    /// Loot tuning
    pub const CHEST_INTERACT_RANGE: f32 = 50.0;
    pub const CHEST_WIDTH: f32 = 40.0;
    pub const CHEST_HEIGHT: f32 = 30.0;
    pub const LOOT_SPAWN_RADIUS: f32 = 60.0;
    pub const LOOT_ITEM_SIZE: f32 = 25.0;
    /// Floating pickup text lifetime
    pub const EFFECT_TEXT_MS: u64 = 2000;
    pub const EFFECT_TEXT_RISE: f32 = -0.5;

    /// Delay between LevelComplete and loading the next level
    pub const LEVEL_ADVANCE_DELAY_MS: u64 = 2000;
    /// Collapsing platforms fall this many pixels per tick
    pub const PLATFORM_FALL_SPEED: f32 = 5.0;
}

/// Convert a millisecond duration to whole simulation ticks.
///
/// All gameplay timers are stored as tick counts so that pausing (which
/// freezes the tick counter) can never silently expire them.
#[inline]
pub const fn ticks_from_ms(ms: u64) -> u64 {
    ms * consts::TICK_HZ / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_from_ms() {
        assert_eq!(ticks_from_ms(1000), 60);
        assert_eq!(ticks_from_ms(500), 30);
        assert_eq!(ticks_from_ms(5700), 342);
        // 178ms regen interval rounds down to 10 ticks (6 per second)
        assert_eq!(ticks_from_ms(178), 10);
    }
}
