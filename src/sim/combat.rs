//! Enemies, damage, and weapons
//!
//! All incoming damage funnels through `damage_player`, which owns the
//! armor split, the invulnerability window, knockback, and regen cancel.
//! Timers here are tick counts, never wall-clock time.

use glam::Vec2;

use crate::audio::SoundCue;
use crate::consts::*;
use crate::ticks_from_ms;

use super::geom::{Circle, Rect, circle_rect_intersect, rects_intersect};
use super::state::{Facing, GameState, Projectile, WeaponKind};

/// Projectile dimensions for the gun
const PROJECTILE_WIDTH: f32 = 10.0;
const PROJECTILE_HEIGHT: f32 = 5.0;
const GUN_PROJECTILE_SPEED: f32 = 15.0;

/// Advance enemy patrols, reflecting at their bounds
pub fn update_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.pos.x += enemy.dx;
        if enemy.pos.x >= enemy.max_x {
            enemy.pos.x = enemy.max_x;
            enemy.dx = -enemy.dx.abs();
        } else if enemy.pos.x <= enemy.min_x {
            enemy.pos.x = enemy.min_x;
            enemy.dx = enemy.dx.abs();
        }
    }
}

/// Apply damage to the player, splitting it between armor and health.
/// Armor absorbs up to half the hit. `source_x` adds knockback away from
/// the attacker. No-op while the invulnerability window is open.
pub fn damage_player(state: &mut GameState, amount: f32, source_x: Option<f32>) {
    if state.player.invulnerable(state.time_ticks) {
        return;
    }
    apply_damage(state, amount, source_x);
}

/// The damage path behind `damage_player`, without the invulnerability
/// gate. Hits that land on the same tick each go through here before the
/// window opens.
fn apply_damage(state: &mut GameState, amount: f32, source_x: Option<f32>) {
    let now = state.time_ticks;

    let armor_reduction = (amount * 0.5).min(state.player.armor);
    state.player.health = (state.player.health - (amount - armor_reduction)).max(0.0);
    state.player.armor = (state.player.armor - armor_reduction).max(0.0);

    if let Some(sx) = source_x {
        let direction = if state.player.pos.x < sx { -1.0 } else { 1.0 };
        state.player.vel.x = direction * KNOCKBACK_X;
        state.player.vel.y = KNOCKBACK_Y;
    }

    state.player.invulnerable_until = now + ticks_from_ms(INVULNERABILITY_MS);
    state.player.last_damaged_tick = Some(now);
    state.player.regenerating = false;
    state.queue_sound(SoundCue::Damage);
}

/// Contact damage from patrolling enemies, rate limited per enemy
pub fn enemy_contact(state: &mut GameState) {
    let now = state.time_ticks;
    if state.player.invulnerable(now) {
        return;
    }

    let player_center = state.player.center();
    let player_half = state.player.width.max(state.player.height) / 2.0;
    let cooldown = ticks_from_ms(ENEMY_DAMAGE_COOLDOWN_MS);

    // Every touching enemy off cooldown lands its hit this tick; the
    // invulnerability window opens after, so simultaneous contacts from
    // different enemies each count
    let mut hits = Vec::new();
    for enemy in &mut state.enemies {
        let touching = enemy.pos.distance(player_center) < enemy.radius + player_half;
        if !touching {
            continue;
        }
        let ready = match enemy.last_damage_tick {
            Some(t) => now.saturating_sub(t) > cooldown,
            None => true,
        };
        if ready {
            enemy.last_damage_tick = Some(now);
            hits.push(enemy.pos.x);
        }
    }

    for sx in hits {
        apply_damage(state, ENEMY_CONTACT_DAMAGE, Some(sx));
    }
}

/// Lava and other damaging regions; goes through the same invulnerability
/// window as enemy contact so standing in lava ticks, not drains
pub fn hazard_contact(state: &mut GameState) {
    if state.player.invulnerable(state.time_ticks) {
        return;
    }
    let player_rect = state.player.rect();
    let hit = state
        .hazards
        .iter()
        .find(|h| rects_intersect(&player_rect, &h.rect))
        .map(|h| h.damage);
    if let Some(damage) = hit {
        damage_player(state, damage, None);
        state.queue_sound(SoundCue::Lava);
    }
}

/// Passive health regeneration after a damage-free idle period
pub fn apply_regen(state: &mut GameState) {
    let now = state.time_ticks;
    let Some(last) = state.player.last_damaged_tick else {
        return;
    };
    if now.saturating_sub(last) <= ticks_from_ms(REGEN_IDLE_MS) {
        return;
    }
    if state.player.health >= state.player.max_health {
        state.player.regenerating = false;
        return;
    }

    if !state.player.regenerating {
        state.player.regenerating = true;
        state.player.next_regen_tick = now;
    }
    if now >= state.player.next_regen_tick {
        state.player.health = (state.player.health + 1.0).min(state.player.max_health);
        state.player.next_regen_tick = now + ticks_from_ms(REGEN_INTERVAL_MS);
    }
}

/// Use the equipped weapon, honoring its cooldown. The gun spawns a
/// projectile at the facing edge; the sword hits every enemy in reach.
/// Strength/Weakness potions scale the damage dealt.
pub fn handle_attack(state: &mut GameState) {
    let now = state.time_ticks;
    let Some(mut weapon) = state.player.weapon else {
        return;
    };
    if !weapon.ready(now) {
        return;
    }
    weapon.last_used_tick = Some(now);
    state.player.weapon = Some(weapon);

    let damage = weapon.kind.damage() * state.player.damage_multiplier;

    match weapon.kind {
        WeaponKind::Gun => {
            state.queue_sound(SoundCue::Shoot);
            let (x, dx) = match state.player.facing {
                Facing::Right => (
                    state.player.pos.x + state.player.width,
                    GUN_PROJECTILE_SPEED,
                ),
                Facing::Left => (state.player.pos.x, -GUN_PROJECTILE_SPEED),
            };
            let y = state.player.pos.y + state.player.height / 2.0;
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                rect: Rect::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
                dx,
                damage,
            });
        }
        WeaponKind::Sword => {
            state.queue_sound(SoundCue::Attack);
            let px = state.player.pos.x;
            let range = weapon.kind.range();
            let mut texts = Vec::new();
            for enemy in &mut state.enemies {
                if (enemy.pos.x - px).abs() < range {
                    enemy.health -= damage;
                    texts.push(enemy.pos);
                }
            }
            for pos in texts {
                state.add_effect_text(format!("{}", damage as i32), pos);
            }
        }
    }
}

/// Move projectiles, resolve enemy hits, and cull out-of-world shots
pub fn update_projectiles(state: &mut GameState) {
    let level_length = state.level_length;
    let mut hits: Vec<(Vec2, f32)> = Vec::new();

    let enemies = &mut state.enemies;
    state.projectiles.retain_mut(|proj| {
        proj.rect.x += proj.dx;

        let hit = enemies.iter_mut().find(|e| {
            circle_rect_intersect(&Circle::new(e.pos, e.radius), &proj.rect)
        });
        if let Some(enemy) = hit {
            enemy.health -= proj.damage;
            hits.push((enemy.pos, proj.damage));
            return false;
        }
        proj.rect.x > 0.0 && proj.rect.x < level_length
    });

    for (pos, damage) in hits {
        state.add_effect_text(format!("{}", damage as i32), pos);
    }
}

/// Drop enemies whose health has been exhausted
pub fn remove_dead_enemies(state: &mut GameState) {
    state.enemies.retain(|e| e.health > 0.0);
}
