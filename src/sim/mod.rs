//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod combat;
pub mod geom;
pub mod level;
pub mod loot;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::update_camera;
pub use geom::{Circle, Rect, Shape, circle_rect_intersect, circles_intersect, intersects,
    rects_intersect};
pub use level::{LEVEL_COUNT, level_name, load_level};
pub use state::{
    ActiveEffect, Checkpoint, Chest, Coin, EffectText, Enemy, Facing, GamePhase, GameState,
    Hazard, LootItem, LootKind, Platform, PlatformMotion, Player, PotionKind, Projectile,
    RngState, Weapon, WeaponKind,
};
pub use tick::{TickInput, tick};
