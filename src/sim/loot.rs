//! Chests, loot, and potion effects
//!
//! Loot rolls use mutually exclusive probability bands over a single d100:
//! coins 55%, coin bags 10%, armor 20%, weapons 10%, potions 5%. Potion
//! effects are replace-not-stack: drinking a potion whose type is already
//! active reverts the old instance before applying the fresh one.

use glam::Vec2;
use rand::Rng;

use crate::audio::SoundCue;
use crate::consts::*;
use crate::ticks_from_ms;

use super::geom::{Rect, rects_intersect};
use super::state::{ActiveEffect, GameState, LootItem, LootKind, PotionKind, Weapon, WeaponKind};

/// Open the nearest unopened chest within interaction range, scattering
/// loot in a ring around it. No-op when no chest is close enough.
pub fn interact_with_chest(state: &mut GameState) {
    let px = state.player.pos.x;
    let py = state.player.pos.y;
    let near = state.chests.iter_mut().find(|c| {
        !c.opened
            && (px - c.pos.x).abs() < CHEST_INTERACT_RANGE
            && (py - c.pos.y).abs() < CHEST_INTERACT_RANGE
    });

    let Some(chest) = near else {
        return;
    };
    chest.opened = true;
    let chest_pos = chest.pos;
    state.queue_sound(SoundCue::ChestOpen);
    spawn_loot(state, chest_pos);
}

/// Scatter 2-5 rolled items evenly on a ring around the chest
fn spawn_loot(state: &mut GameState, chest_pos: Vec2) {
    let mut rng = state.rng_state.next_rng();
    let count = rng.random_range(2..=5);
    let angle_step = std::f32::consts::TAU / count as f32;

    for i in 0..count {
        let angle = angle_step * i as f32;
        let x = chest_pos.x + CHEST_WIDTH / 2.0 + angle.cos() * LOOT_SPAWN_RADIUS
            - LOOT_ITEM_SIZE / 2.0;
        let y = chest_pos.y + angle.sin() * LOOT_SPAWN_RADIUS - LOOT_ITEM_SIZE / 2.0;

        let kind = roll_loot(&mut rng);
        let id = state.next_entity_id();
        state.loot.push(LootItem {
            id,
            rect: Rect::new(x, y, LOOT_ITEM_SIZE, LOOT_ITEM_SIZE),
            kind,
        });
    }
}

/// One d100 roll across the loot bands
fn roll_loot<R: Rng>(rng: &mut R) -> LootKind {
    let roll: f32 = rng.random_range(0.0..100.0);
    if roll < 55.0 {
        LootKind::Coin {
            value: roll_coin_value(rng),
        }
    } else if roll < 65.0 {
        LootKind::CoinBag {
            value: rng.random_range(4..=7),
        }
    } else if roll < 85.0 {
        LootKind::Armor
    } else if roll < 95.0 {
        let kind = if rng.random_range(0.0..1.0) < 0.33 {
            WeaponKind::Gun
        } else {
            WeaponKind::Sword
        };
        LootKind::Weapon(kind)
    } else {
        LootKind::Potion(roll_potion(rng))
    }
}

/// Weighted single-coin value: small denominations dominate
fn roll_coin_value<R: Rng>(rng: &mut R) -> u32 {
    let roll: f32 = rng.random_range(0.0..100.0);
    if roll < 35.0 {
        1
    } else if roll < 65.0 {
        2
    } else if roll < 85.0 {
        3
    } else if roll < 95.0 {
        4
    } else {
        5
    }
}

fn roll_potion<R: Rng>(rng: &mut R) -> PotionKind {
    let roll: f32 = rng.random_range(0.0..100.0);
    if roll < 15.0 {
        PotionKind::Regeneration
    } else if roll < 30.0 {
        PotionKind::Weakness
    } else if roll < 42.5 {
        PotionKind::Strength
    } else if roll < 55.0 {
        PotionKind::Speed
    } else if roll < 65.0 {
        PotionKind::Poison
    } else if roll < 75.0 {
        PotionKind::SlowFall
    } else if roll < 85.0 {
        PotionKind::JumpBoost
    } else if roll < 95.0 {
        PotionKind::Slowness
    } else if roll < 99.0 {
        PotionKind::Fortune
    } else {
        PotionKind::Invisibility
    }
}

/// Pick up any loot items the player is touching
pub fn collect_loot(state: &mut GameState) {
    let player_rect = state.player.rect();
    let touched: Vec<LootKind> = {
        let mut kinds = Vec::new();
        state.loot.retain(|item| {
            if rects_intersect(&player_rect, &item.rect) {
                kinds.push(item.kind);
                false
            } else {
                true
            }
        });
        kinds
    };

    for kind in touched {
        match kind {
            LootKind::Coin { value } | LootKind::CoinBag { value } => {
                state.coin_count += value * state.player.coin_multiplier;
                state.add_player_text(format!("+{value} coins!"));
                state.queue_sound(SoundCue::Coin);
            }
            LootKind::Armor => {
                state.player.armor = (state.player.armor + 10.0).min(MAX_ARMOR);
                state.add_player_text("Armor +10!");
                state.queue_sound(SoundCue::ArmorEquip);
            }
            LootKind::Weapon(weapon_kind) => {
                state.player.weapon = Some(Weapon::new(weapon_kind));
                state.add_player_text(format!("Equipped {}!", weapon_kind.display_name()));
                state.queue_sound(SoundCue::ArmorEquip);
            }
            LootKind::Potion(potion_kind) => {
                apply_potion(state, potion_kind);
                state.queue_sound(SoundCue::PotionDrink);
            }
        }
    }
}

/// Pick up level coins the player is touching
pub fn collect_coins(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = 0u32;
    state.coins.retain(|coin| {
        if rects_intersect(&player_rect, &coin.rect()) {
            collected += coin.value;
            false
        } else {
            true
        }
    });
    if collected > 0 {
        state.coin_count += collected;
        state.queue_sound(SoundCue::Coin);
    }
}

/// Drink a potion: an already-active effect of the same type is reverted
/// first, so effects replace rather than stack
pub fn apply_potion(state: &mut GameState, kind: PotionKind) {
    cancel_potion(state, kind);

    let expires_at = state.time_ticks + kind.duration_ticks();
    let player = &mut state.player;
    let effect = match kind {
        PotionKind::Regeneration => ActiveEffect::Regeneration { expires_at },
        PotionKind::Weakness => {
            let prev = player.damage_multiplier;
            player.damage_multiplier = 0.5;
            ActiveEffect::Weakness {
                expires_at,
                prev_damage_multiplier: prev,
            }
        }
        PotionKind::Strength => {
            let prev = player.damage_multiplier;
            player.damage_multiplier = 2.0;
            ActiveEffect::Strength {
                expires_at,
                prev_damage_multiplier: prev,
            }
        }
        PotionKind::Speed => {
            let prev = player.speed;
            player.speed *= 1.75;
            ActiveEffect::Speed {
                expires_at,
                prev_speed: prev,
            }
        }
        PotionKind::Poison => ActiveEffect::Poison { expires_at },
        PotionKind::SlowFall => {
            let prev = player.gravity_scale;
            player.gravity_scale *= 0.3;
            ActiveEffect::SlowFall {
                expires_at,
                prev_gravity_scale: prev,
            }
        }
        PotionKind::JumpBoost => {
            let prev = player.jump_power;
            player.jump_power *= 1.8;
            ActiveEffect::JumpBoost {
                expires_at,
                prev_jump_power: prev,
            }
        }
        PotionKind::Slowness => {
            let prev = player.speed;
            player.speed *= 0.5;
            ActiveEffect::Slowness {
                expires_at,
                prev_speed: prev,
            }
        }
        PotionKind::Fortune => {
            let prev = player.coin_multiplier;
            player.coin_multiplier = 2;
            ActiveEffect::Fortune {
                expires_at,
                prev_coin_multiplier: prev,
            }
        }
        PotionKind::Invisibility => {
            player.visible = false;
            player.invulnerable_until = expires_at;
            ActiveEffect::Invisibility { expires_at }
        }
    };

    state.effects.push(effect);
    state.add_player_text(kind.display_name());
}

/// Revert and remove an active effect of the given type, if any
pub fn cancel_potion(state: &mut GameState, kind: PotionKind) {
    let mut reverted = Vec::new();
    state.effects.retain(|e| {
        if e.kind() == kind {
            reverted.push(*e);
            false
        } else {
            true
        }
    });
    for effect in reverted {
        effect.revert(&mut state.player);
    }
}

/// Advance timed effects: expire finished ones (reverting their mutation)
/// and run the once-per-second pulses of Regeneration and Poison
pub fn update_effects(state: &mut GameState) {
    let now = state.time_ticks;
    let second = ticks_from_ms(1000);

    let mut expired = Vec::new();
    state.effects.retain(|e| {
        if now >= e.expires_at() {
            expired.push(*e);
            false
        } else {
            true
        }
    });
    for effect in expired {
        effect.revert(&mut state.player);
    }

    for effect in state.effects.clone() {
        let start = effect.expires_at() - effect.kind().duration_ticks();
        let elapsed = now.saturating_sub(start);
        let pulse = elapsed > 0 && elapsed % second == 0;
        match effect {
            ActiveEffect::Regeneration { .. } if pulse => {
                state.player.health = (state.player.health + 2.0).min(state.player.max_health);
            }
            // Poison wears the player down but never kills outright
            ActiveEffect::Poison { .. } if pulse => {
                state.player.health = (state.player.health - 1.0).max(1.0);
            }
            _ => {}
        }
    }
}

/// Fade and cull floating feedback texts
pub fn update_effect_texts(state: &mut GameState) {
    let now = state.time_ticks;
    let lifetime = ticks_from_ms(EFFECT_TEXT_MS);
    state.effect_texts.retain_mut(|text| {
        text.pos.y += EFFECT_TEXT_RISE;
        text.alpha -= 0.01;
        text.alpha > 0.0 && now.saturating_sub(text.spawned_tick) < lifetime
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Chest;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_chest_opens_within_range_and_only_once() {
        let mut state = GameState::new(11);
        state.chests.clear();
        state.loot.clear();
        let id = state.next_entity_id();
        state.chests.push(Chest {
            id,
            pos: Vec2::new(state.player.pos.x + 30.0, state.player.pos.y + 10.0),
            opened: false,
        });

        interact_with_chest(&mut state);
        assert!(state.chests[0].opened);
        let count = state.loot.len();
        assert!((2..=5).contains(&count));

        // Opening again yields nothing new
        interact_with_chest(&mut state);
        assert_eq!(state.loot.len(), count);
    }

    #[test]
    fn test_chest_out_of_range_ignored() {
        let mut state = GameState::new(11);
        state.chests.clear();
        let id = state.next_entity_id();
        state.chests.push(Chest {
            id,
            pos: Vec2::new(state.player.pos.x + 200.0, state.player.pos.y),
            opened: false,
        });
        interact_with_chest(&mut state);
        assert!(!state.chests[0].opened);
    }

    #[test]
    fn test_loot_ring_radius() {
        let mut state = GameState::new(11);
        state.loot.clear();
        let chest_pos = Vec2::new(1000.0, 300.0);
        spawn_loot(&mut state, chest_pos);

        let center = Vec2::new(chest_pos.x + CHEST_WIDTH / 2.0, chest_pos.y);
        for item in &state.loot {
            let item_center = Vec2::new(
                item.rect.x + LOOT_ITEM_SIZE / 2.0,
                item.rect.y + LOOT_ITEM_SIZE / 2.0,
            );
            let dist = item_center.distance(center);
            assert!((dist - LOOT_SPAWN_RADIUS).abs() < 0.001);
        }
    }

    #[test]
    fn test_loot_bands_cover_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut saw_coin = false;
        let mut saw_armor = false;
        let mut saw_weapon = false;
        for _ in 0..500 {
            match roll_loot(&mut rng) {
                LootKind::Coin { value } => {
                    assert!((1..=5).contains(&value));
                    saw_coin = true;
                }
                LootKind::CoinBag { value } => assert!((4..=7).contains(&value)),
                LootKind::Armor => saw_armor = true,
                LootKind::Weapon(_) => saw_weapon = true,
                LootKind::Potion(_) => {}
            }
        }
        assert!(saw_coin && saw_armor && saw_weapon);
    }

    #[test]
    fn test_fortune_doubles_loot_coins() {
        let mut state = GameState::new(11);
        state.loot.clear();
        state.player.coin_multiplier = 2;
        let id = state.next_entity_id();
        state.loot.push(LootItem {
            id,
            rect: state.player.rect(),
            kind: LootKind::Coin { value: 3 },
        });
        let before = state.coin_count;
        collect_loot(&mut state);
        assert_eq!(state.coin_count, before + 6);
        assert!(state.loot.is_empty());
    }

    #[test]
    fn test_armor_pickup_clamped_at_max() {
        let mut state = GameState::new(11);
        state.loot.clear();
        state.player.armor = 95.0;
        let id = state.next_entity_id();
        state.loot.push(LootItem {
            id,
            rect: state.player.rect(),
            kind: LootKind::Armor,
        });
        collect_loot(&mut state);
        assert_eq!(state.player.armor, MAX_ARMOR);
    }

    #[test]
    fn test_strength_applies_and_expires() {
        let mut state = GameState::new(11);
        apply_potion(&mut state, PotionKind::Strength);
        assert_eq!(state.player.damage_multiplier, 2.0);
        assert_eq!(state.effects.len(), 1);

        state.time_ticks += PotionKind::Strength.duration_ticks();
        update_effects(&mut state);
        assert_eq!(state.player.damage_multiplier, 1.0);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_same_potion_replaces_not_stacks() {
        let mut state = GameState::new(11);
        apply_potion(&mut state, PotionKind::Speed);
        let boosted = state.player.speed;
        assert_eq!(boosted, PLAYER_SPEED * 1.75);

        // Drinking again halfway through does not compound
        state.time_ticks += PotionKind::Speed.duration_ticks() / 2;
        apply_potion(&mut state, PotionKind::Speed);
        assert_eq!(state.player.speed, boosted);
        assert_eq!(state.effects.len(), 1);

        // And expiry restores the unboosted baseline
        state.time_ticks += PotionKind::Speed.duration_ticks();
        update_effects(&mut state);
        assert_eq!(state.player.speed, PLAYER_SPEED);
    }

    #[test]
    fn test_opposing_multipliers_replace_cleanly() {
        let mut state = GameState::new(11);
        apply_potion(&mut state, PotionKind::Strength);
        // Weakness does not cancel Strength; both track their own baselines
        apply_potion(&mut state, PotionKind::Weakness);
        assert_eq!(state.player.damage_multiplier, 0.5);

        state.time_ticks += PotionKind::Weakness.duration_ticks();
        update_effects(&mut state);
        // Weakness expiry restores what it replaced (Strength's 2.0)
        assert_eq!(state.player.damage_multiplier, 2.0);
    }

    #[test]
    fn test_poison_never_kills() {
        let mut state = GameState::new(11);
        state.player.health = 3.0;
        apply_potion(&mut state, PotionKind::Poison);
        for _ in 0..PotionKind::Poison.duration_ticks() {
            state.time_ticks += 1;
            update_effects(&mut state);
        }
        assert_eq!(state.player.health, 1.0);
    }

    #[test]
    fn test_regeneration_pulses() {
        let mut state = GameState::new(11);
        state.player.health = 50.0;
        apply_potion(&mut state, PotionKind::Regeneration);
        for _ in 0..ticks_from_ms(3000) {
            state.time_ticks += 1;
            update_effects(&mut state);
        }
        assert_eq!(state.player.health, 56.0);
    }

    #[test]
    fn test_invisibility_grants_immunity_until_expiry() {
        let mut state = GameState::new(11);
        apply_potion(&mut state, PotionKind::Invisibility);
        assert!(!state.player.visible);
        assert!(state.player.invulnerable(state.time_ticks));

        state.time_ticks += PotionKind::Invisibility.duration_ticks();
        update_effects(&mut state);
        assert!(state.player.visible);
        assert!(!state.player.invulnerable(state.time_ticks));
    }

    #[test]
    fn test_slow_fall_scales_gravity_and_restores() {
        let mut state = GameState::new(11);
        apply_potion(&mut state, PotionKind::SlowFall);
        assert!((state.player.gravity_scale - 0.3).abs() < 1e-6);

        state.time_ticks += PotionKind::SlowFall.duration_ticks();
        update_effects(&mut state);
        assert_eq!(state.player.gravity_scale, 1.0);
    }

    #[test]
    fn test_level_coin_pickup() {
        let mut state = GameState::new(11);
        state.coins.clear();
        let id = state.next_entity_id();
        state.coins.push(crate::sim::state::Coin {
            id,
            pos: state.player.pos,
            value: 1,
        });
        collect_coins(&mut state);
        assert_eq!(state.coin_count, 1);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_effect_texts_fade_out() {
        let mut state = GameState::new(11);
        state.add_player_text("+3 coins!");
        let y0 = state.effect_texts[0].pos.y;
        update_effect_texts(&mut state);
        assert!(state.effect_texts[0].pos.y < y0);
        assert!(state.effect_texts[0].alpha < 1.0);

        for _ in 0..200 {
            state.time_ticks += 1;
            update_effect_texts(&mut state);
        }
        assert!(state.effect_texts.is_empty());
    }
}
