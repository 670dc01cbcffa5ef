//! Game state and core simulation types
//!
//! All state that must be persisted for save/determinism lives here. Entity
//! vectors are kept sorted by id (see `normalize_order`) so iteration order
//! never depends on insertion history.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use super::level;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::ticks_from_ms;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start input
    MainMenu,
    /// Story panels before the first level
    StoryIntro,
    /// Active gameplay
    Playing,
    /// Game is paused (simulation frozen)
    Paused,
    /// Player died; waiting for restart input
    GameOver,
    /// Level goal reached; auto-advances after a short delay
    LevelComplete,
    /// All levels cleared
    GameComplete,
}

/// Horizontal direction the player is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Equippable weapon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Gun,
    Sword,
}

impl WeaponKind {
    pub fn damage(&self) -> f32 {
        match self {
            WeaponKind::Gun => 40.0,
            WeaponKind::Sword => 75.0,
        }
    }

    pub fn cooldown_ticks(&self) -> u64 {
        match self {
            WeaponKind::Gun => ticks_from_ms(1000),
            WeaponKind::Sword => ticks_from_ms(3000),
        }
    }

    /// Melee reach for the sword; unused for the gun
    pub fn range(&self) -> f32 {
        match self {
            WeaponKind::Gun => 0.0,
            WeaponKind::Sword => 50.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WeaponKind::Gun => "Gun",
            WeaponKind::Sword => "Sword",
        }
    }
}

/// A weapon held by the player, with its own cooldown clock
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub last_used_tick: Option<u64>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            last_used_tick: None,
        }
    }

    pub fn ready(&self, now: u64) -> bool {
        match self.last_used_tick {
            Some(t) => now.saturating_sub(t) >= self.kind.cooldown_ticks(),
            None => true,
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner (y grows downward)
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    pub crouching: bool,
    pub jumping: bool,
    pub falling: bool,
    pub on_platform: bool,
    /// Builds with successive jumps while moving, amplifies air speed
    pub momentum: f32,

    // Tunables that potions mutate and restore
    pub speed: f32,
    pub jump_power: f32,
    pub gravity_scale: f32,
    pub damage_multiplier: f32,
    pub coin_multiplier: u32,
    pub visible: bool,

    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    /// Damage immunity window after taking a hit (tick when it ends)
    pub invulnerable_until: u64,
    pub last_damaged_tick: Option<u64>,
    pub regenerating: bool,
    pub next_regen_tick: u64,
    pub weapon: Option<Weapon>,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            facing: Facing::Right,
            crouching: false,
            jumping: false,
            falling: false,
            on_platform: false,
            momentum: 0.0,
            speed: PLAYER_SPEED,
            jump_power: BASE_JUMP_POWER,
            gravity_scale: 1.0,
            damage_multiplier: 1.0,
            coin_multiplier: 1,
            visible: true,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            armor: 0.0,
            invulnerable_until: 0,
            last_damaged_tick: None,
            regenerating: false,
            next_regen_tick: 0,
            weapon: None,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn invulnerable(&self, now: u64) -> bool {
        now < self.invulnerable_until
    }
}

/// How a moving platform patrols
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformMotion {
    Horizontal { dx: f32, min_x: f32, max_x: f32 },
    Vertical { dy: f32, min_y: f32, max_y: f32 },
}

/// A solid platform; also carries the special behaviors some platforms have
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    /// Jump power multiplier applied on landing (trampoline platforms)
    pub bounce_power: Option<f32>,
    /// Collapses after `fall_delay_ticks` once first touched
    pub fall_on_touch: bool,
    pub fall_delay_ticks: u64,
    pub touched_at_tick: Option<u64>,
    pub falling: bool,
    pub motion: Option<PlatformMotion>,
    /// Standing here with enough coins completes the level
    pub is_goal: bool,
}

impl Platform {
    pub fn fixed(id: u32, rect: Rect) -> Self {
        Self {
            id,
            rect,
            bounce_power: None,
            fall_on_touch: false,
            fall_delay_ticks: 0,
            touched_at_tick: None,
            falling: false,
            motion: None,
            is_goal: false,
        }
    }
}

/// A collectible coin placed in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Top-left corner of the coin's pickup box
    pub pos: Vec2,
    pub value: u32,
}

impl Coin {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COIN_SIZE, COIN_SIZE)
    }
}

/// A patrolling enemy (circle collider)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub dx: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub health: f32,
    /// Last tick this enemy hurt the player (contact damage rate limiting)
    pub last_damage_tick: Option<u64>,
}

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    pub dx: f32,
    pub damage: f32,
}

/// A damaging region (lava)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub rect: Rect,
    pub damage: f32,
}

/// A treasure chest the player can open with the interact key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chest {
    pub id: u32,
    pub pos: Vec2,
    pub opened: bool,
}

/// A respawn point; activates when the player walks past it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub id: u32,
    pub pos: Vec2,
    pub activated: bool,
}

impl Checkpoint {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT)
    }
}

/// Potion varieties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionKind {
    Regeneration,
    Weakness,
    Strength,
    Speed,
    Poison,
    SlowFall,
    JumpBoost,
    Slowness,
    Fortune,
    Invisibility,
}

impl PotionKind {
    pub fn duration_ticks(&self) -> u64 {
        let ms = match self {
            PotionKind::Regeneration => 10_000,
            PotionKind::Weakness => 8_000,
            PotionKind::Strength => 12_000,
            PotionKind::Speed => 10_000,
            PotionKind::Poison => 15_000,
            PotionKind::SlowFall => 15_000,
            PotionKind::JumpBoost => 10_000,
            PotionKind::Slowness => 10_000,
            PotionKind::Fortune => 20_000,
            PotionKind::Invisibility => 15_000,
        };
        ticks_from_ms(ms)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PotionKind::Regeneration => "Regeneration",
            PotionKind::Weakness => "Weakness",
            PotionKind::Strength => "Strength",
            PotionKind::Speed => "Speed",
            PotionKind::Poison => "Poison",
            PotionKind::SlowFall => "Slow Fall",
            PotionKind::JumpBoost => "Jump Boost",
            PotionKind::Slowness => "Slowness",
            PotionKind::Fortune => "Fortune",
            PotionKind::Invisibility => "Invisibility",
        }
    }
}

/// A timed potion effect on the player.
///
/// Variants that mutate a player tunable carry the value they replaced, so
/// expiry (or replacement by a fresh potion of the same kind) restores the
/// exact prior state instead of guessing at a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActiveEffect {
    Regeneration { expires_at: u64 },
    Weakness { expires_at: u64, prev_damage_multiplier: f32 },
    Strength { expires_at: u64, prev_damage_multiplier: f32 },
    Speed { expires_at: u64, prev_speed: f32 },
    Poison { expires_at: u64 },
    SlowFall { expires_at: u64, prev_gravity_scale: f32 },
    JumpBoost { expires_at: u64, prev_jump_power: f32 },
    Slowness { expires_at: u64, prev_speed: f32 },
    Fortune { expires_at: u64, prev_coin_multiplier: u32 },
    Invisibility { expires_at: u64 },
}

impl ActiveEffect {
    pub fn kind(&self) -> PotionKind {
        match self {
            ActiveEffect::Regeneration { .. } => PotionKind::Regeneration,
            ActiveEffect::Weakness { .. } => PotionKind::Weakness,
            ActiveEffect::Strength { .. } => PotionKind::Strength,
            ActiveEffect::Speed { .. } => PotionKind::Speed,
            ActiveEffect::Poison { .. } => PotionKind::Poison,
            ActiveEffect::SlowFall { .. } => PotionKind::SlowFall,
            ActiveEffect::JumpBoost { .. } => PotionKind::JumpBoost,
            ActiveEffect::Slowness { .. } => PotionKind::Slowness,
            ActiveEffect::Fortune { .. } => PotionKind::Fortune,
            ActiveEffect::Invisibility { .. } => PotionKind::Invisibility,
        }
    }

    pub fn expires_at(&self) -> u64 {
        match *self {
            ActiveEffect::Regeneration { expires_at }
            | ActiveEffect::Weakness { expires_at, .. }
            | ActiveEffect::Strength { expires_at, .. }
            | ActiveEffect::Speed { expires_at, .. }
            | ActiveEffect::Poison { expires_at }
            | ActiveEffect::SlowFall { expires_at, .. }
            | ActiveEffect::JumpBoost { expires_at, .. }
            | ActiveEffect::Slowness { expires_at, .. }
            | ActiveEffect::Fortune { expires_at, .. }
            | ActiveEffect::Invisibility { expires_at } => expires_at,
        }
    }

    /// Undo this effect's mutation on the player
    pub fn revert(&self, player: &mut Player) {
        match *self {
            ActiveEffect::Regeneration { .. } | ActiveEffect::Poison { .. } => {}
            ActiveEffect::Weakness {
                prev_damage_multiplier,
                ..
            }
            | ActiveEffect::Strength {
                prev_damage_multiplier,
                ..
            } => player.damage_multiplier = prev_damage_multiplier,
            ActiveEffect::Speed { prev_speed, .. }
            | ActiveEffect::Slowness { prev_speed, .. } => player.speed = prev_speed,
            ActiveEffect::SlowFall {
                prev_gravity_scale, ..
            } => player.gravity_scale = prev_gravity_scale,
            ActiveEffect::JumpBoost {
                prev_jump_power, ..
            } => player.jump_power = prev_jump_power,
            ActiveEffect::Fortune {
                prev_coin_multiplier,
                ..
            } => player.coin_multiplier = prev_coin_multiplier,
            ActiveEffect::Invisibility { .. } => {
                player.visible = true;
                player.invulnerable_until = 0;
            }
        }
    }
}

/// What a chest loot item grants when picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    Coin { value: u32 },
    CoinBag { value: u32 },
    Armor,
    Weapon(WeaponKind),
    Potion(PotionKind),
}

/// A dropped item waiting on the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootItem {
    pub id: u32,
    pub rect: Rect,
    pub kind: LootKind,
}

/// Floating feedback text ("+3 coins!", "Picked up Sword!")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectText {
    pub text: String,
    pub pos: Vec2,
    pub alpha: f32,
    pub spawned_tick: u64,
}

/// RNG wrapper: a fresh generator is derived per draw site from the run seed
/// and a monotone counter, so replays from the same seed are bit-identical
/// while successive chest openings still differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream = self.stream.wrapping_add(1);
        Pcg32::seed_from_u64(
            self.seed
                .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        )
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Current level index (0-based)
    pub level_index: usize,
    pub coin_count: u32,
    /// Simulation tick counter (frozen while paused)
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Tick at which LevelComplete auto-advances to the next level
    pub advance_at_tick: Option<u64>,
    /// Tick until which the "need more coins" goal message stays visible
    pub goal_message_until: Option<u64>,
    pub level_length: f32,
    pub min_coins_required: u32,
    /// Horizontal camera scroll in world units
    pub camera_offset: f32,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub hazards: Vec<Hazard>,
    pub chests: Vec<Chest>,
    pub checkpoints: Vec<Checkpoint>,
    pub loot: Vec<LootItem>,
    pub effects: Vec<ActiveEffect>,
    pub effect_texts: Vec<EffectText>,
    /// Sound cues emitted this tick (drained by the host, not persisted)
    #[serde(skip)]
    pub sound_queue: Vec<SoundCue>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, at the main menu
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            level_index: 0,
            coin_count: 0,
            time_ticks: 0,
            phase: GamePhase::MainMenu,
            advance_at_tick: None,
            goal_message_until: None,
            level_length: 0.0,
            min_coins_required: 0,
            camera_offset: 0.0,
            player: Player::new(Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT)),
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            hazards: Vec::new(),
            chests: Vec::new(),
            checkpoints: Vec::new(),
            loot: Vec::new(),
            effects: Vec::new(),
            effect_texts: Vec::new(),
            sound_queue: Vec::new(),
            next_id: 1,
        };

        level::load_level(&mut state, 0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn queue_sound(&mut self, cue: SoundCue) {
        self.sound_queue.push(cue);
    }

    /// Spawn floating feedback text at a world position
    pub fn add_effect_text(&mut self, text: impl Into<String>, pos: Vec2) {
        self.effect_texts.push(EffectText {
            text: text.into(),
            pos,
            alpha: 1.0,
            spawned_tick: self.time_ticks,
        });
    }

    /// Floating text above the player's head
    pub fn add_player_text(&mut self, text: impl Into<String>) {
        let pos = Vec2::new(
            self.player.pos.x + self.player.width / 2.0,
            self.player.pos.y - 30.0,
        );
        self.add_effect_text(text, pos);
    }

    /// Ensure entity vectors are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
        self.coins.sort_by_key(|c| c.id);
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
        self.hazards.sort_by_key(|h| h.id);
        self.chests.sort_by_key(|c| c.id);
        self.checkpoints.sort_by_key(|c| c.id);
        self.loot.sort_by_key(|l| l.id);
    }

    /// Player spawn position for this run: feet at the base of the furthest
    /// activated checkpoint, or the level start
    pub fn respawn_point(&self) -> Vec2 {
        self.checkpoints
            .iter()
            .filter(|c| c.activated)
            .max_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|c| Vec2::new(c.pos.x, c.pos.y + CHECKPOINT_HEIGHT - PLAYER_HEIGHT))
            .unwrap_or(Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT))
    }
}
