//! Player movement and platform physics
//!
//! Velocities are in world pixels per tick, so no dt scaling appears here.
//! The update order within a tick is load-bearing: gravity, integrate,
//! friction, platform resolution, world clamps, ground snap, then the
//! momentum multiplier. Reordering changes jump feel.

use crate::audio::SoundCue;
use crate::consts::*;

use super::geom::rects_intersect;
use super::state::{Facing, GameState, PlatformMotion, Player};

/// Downward speed above which the player counts as airborne-falling.
/// Gravity crosses this after a few ticks of freefall, which gives a short
/// coyote window at ledge edges.
pub const FALL_SPEED_THRESHOLD: f32 = std::f32::consts::PI;

/// Restore full height after a crouch, keeping the feet planted
fn stand_up(player: &mut Player) {
    player.height = PLAYER_HEIGHT;
    player.pos.y -= PLAYER_HEIGHT - PLAYER_CROUCH_HEIGHT;
    player.crouching = false;
}

/// Apply held movement keys and edge-triggered jump/crouch transitions.
/// Runs before the physics step each tick.
pub fn apply_input(state: &mut GameState, left: bool, right: bool, jump: bool, crouch: bool) {
    let grounded = !state.player.jumping && !state.player.falling;

    if left {
        state.player.vel.x = -state.player.speed;
        state.player.facing = Facing::Left;
    }
    if right {
        state.player.vel.x = state.player.speed;
        state.player.facing = Facing::Right;
    }

    // Footsteps on a fixed cadence while walking on the ground
    if grounded && (left || right) && state.time_ticks % FOOTSTEP_INTERVAL_TICKS == 0 {
        state.queue_sound(SoundCue::Footstep);
    }

    if crouch && !state.player.crouching {
        state.player.crouching = true;
        state.player.height = PLAYER_CROUCH_HEIGHT;
        // Keep the feet planted when entering a grounded crouch
        if grounded {
            state.player.pos.y += PLAYER_HEIGHT - PLAYER_CROUCH_HEIGHT;
        }
    } else if !crouch && state.player.crouching {
        state.player.crouching = false;
        state.player.height = PLAYER_HEIGHT;
        if grounded {
            state.player.pos.y -= PLAYER_HEIGHT - PLAYER_CROUCH_HEIGHT;
        }
    }

    if jump && grounded {
        state.player.jumping = true;
        let jump_power = if state.player.crouching {
            state.player.jump_power * CROUCH_JUMP_FACTOR
        } else {
            state.player.jump_power
        };
        state.player.vel.y = -jump_power;

        // Successive moving jumps build momentum
        if state.player.vel.x.abs() > 0.0 {
            state.player.momentum = (state.player.momentum + MOMENTUM_STEP).min(MAX_MOMENTUM);
        }

        if state.player.crouching {
            stand_up(&mut state.player);
        }
        state.queue_sound(SoundCue::Jump);
    }
}

/// Advance moving and collapsing platforms
pub fn update_platforms(state: &mut GameState) {
    let now = state.time_ticks;
    let player_rect = state.player.rect();
    let mut bounced = false;

    for platform in &mut state.platforms {
        match platform.motion {
            Some(PlatformMotion::Horizontal { dx, min_x, max_x }) => {
                platform.rect.x += dx;
                if platform.rect.x >= max_x || platform.rect.x <= min_x {
                    if let Some(PlatformMotion::Horizontal { dx, .. }) = &mut platform.motion {
                        *dx = -*dx;
                    }
                }
            }
            Some(PlatformMotion::Vertical { dy, min_y, max_y }) => {
                platform.rect.y += dy;
                if platform.rect.y >= max_y || platform.rect.y <= min_y {
                    if let Some(PlatformMotion::Vertical { dy, .. }) = &mut platform.motion {
                        *dy = -*dy;
                    }
                }
            }
            None => {}
        }

        if platform.fall_on_touch {
            if platform.touched_at_tick.is_none() && rects_intersect(&player_rect, &platform.rect) {
                platform.touched_at_tick = Some(now);
            }
            if let Some(touched) = platform.touched_at_tick {
                if now.saturating_sub(touched) >= platform.fall_delay_ticks {
                    platform.falling = true;
                }
            }
            if platform.falling {
                platform.rect.y += PLATFORM_FALL_SPEED;
            }
        }

        if let Some(bounce) = platform.bounce_power {
            if rects_intersect(&player_rect, &platform.rect) {
                state.player.vel.y = -bounce * state.player.jump_power;
                bounced = true;
            }
        }
    }

    if bounced {
        state.queue_sound(SoundCue::Bounce);
    }
}

/// Integrate the player for one tick and resolve platform, wall, and
/// ground collisions
pub fn step_player(state: &mut GameState) {
    let player = &mut state.player;

    // Gravity, with fast fall while crouching mid-air
    let gravity = GRAVITY * player.gravity_scale;
    if player.crouching && player.falling {
        player.vel.y += gravity * FAST_FALL_MULTIPLIER;
    } else {
        player.vel.y += gravity;
    }

    player.pos.y += player.vel.y;
    player.pos.x += player.vel.x;

    // Friction bleeds horizontal speed toward zero without overshooting
    if player.vel.x > 0.0 {
        player.vel.x = (player.vel.x - PLAYER_FRICTION * 0.1).max(0.0);
    } else if player.vel.x < 0.0 {
        player.vel.x = (player.vel.x + PLAYER_FRICTION * 0.1).min(0.0);
    }

    let mut on_platform = false;
    for platform in &state.platforms {
        let p = &platform.rect;
        let horizontal_overlap =
            player.pos.x + player.width > p.x && player.pos.x < p.x + p.width;

        // Landing: feet were at or above the surface and would pass it
        if player.vel.y >= 0.0
            && horizontal_overlap
            && player.pos.y + player.height <= p.y + 5.0
            && player.pos.y + player.height + player.vel.y >= p.y
        {
            player.pos.y = p.y - player.height;
            player.vel.y = 0.0;
            player.jumping = false;
            player.falling = false;
            on_platform = true;

            if player.crouching {
                stand_up(player);
            }
        }
        // Head bump from below
        else if player.vel.y < 0.0
            && horizontal_overlap
            && player.pos.y <= p.y + p.height
            && player.pos.y + player.height >= p.y + p.height
        {
            player.pos.y = p.y + p.height;
            player.vel.y = 0.0;
        }
    }

    // World boundary walls. The ceiling sits well above the highest
    // authored platforms: high platforms rise past y = 0 and must stay
    // reachable.
    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
        player.vel.x = 0.0;
    }
    if player.pos.y < WORLD_TOP {
        player.pos.y = WORLD_TOP;
        player.vel.y = 0.0;
    }
    if player.pos.x + player.width > state.level_length {
        player.pos.x = state.level_length - player.width;
        player.vel.x = 0.0;
    }

    // Ground
    if player.pos.y + player.height > GROUND_Y {
        player.pos.y = GROUND_Y - player.height;
        player.vel.y = 0.0;
        player.jumping = false;
        player.falling = false;
        on_platform = true;

        if player.crouching {
            stand_up(player);
        }
    }

    player.on_platform = on_platform;
    if !on_platform {
        player.falling = true;
    }

    // Momentum amplifies air control; grounded movement resets it
    if player.jumping || player.falling {
        player.vel.x *= 1.0 + player.momentum * MOMENTUM_SCALE;
    } else {
        player.momentum = 0.0;
    }

    // Settle the falling flag for the next tick's input and fast-fall checks
    player.falling = player.vel.y > FALL_SPEED_THRESHOLD;

    // Height reconciliation keeps render state honest if a crouch toggle
    // raced a landing this tick
    player.height = if player.crouching {
        PLAYER_CROUCH_HEIGHT
    } else {
        PLAYER_HEIGHT
    };
}
