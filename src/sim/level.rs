//! Level definitions and loading
//!
//! Four hand-authored levels. Platform, coin, enemy, hazard, and checkpoint
//! tables are fixed data; chests past the first level spawn probabilistically
//! from the run's RNG, so the same seed always yields the same chest set.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::ticks_from_ms;

use super::geom::Rect;
use super::state::{
    Checkpoint, Chest, Coin, Enemy, GameState, Hazard, Platform, PlatformMotion,
};

pub const LEVEL_COUNT: usize = 4;

/// Platform table entry, before IDs are assigned
struct Plat {
    rect: Rect,
    bounce: Option<f32>,
    collapse_ms: Option<u64>,
    motion: Option<PlatformMotion>,
    goal: bool,
}

impl Plat {
    fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            bounce: None,
            collapse_ms: None,
            motion: None,
            goal: false,
        }
    }

    fn goal(mut self) -> Self {
        self.goal = true;
        self
    }

    fn bounce(mut self, power: f32) -> Self {
        self.bounce = Some(power);
        self
    }

    fn collapsing(mut self, delay_ms: u64) -> Self {
        self.collapse_ms = Some(delay_ms);
        self
    }

    fn moving_x(mut self, dx: f32, min_x: f32, max_x: f32) -> Self {
        self.motion = Some(PlatformMotion::Horizontal { dx, min_x, max_x });
        self
    }

    fn moving_y(mut self, dy: f32, min_y: f32, max_y: f32) -> Self {
        self.motion = Some(PlatformMotion::Vertical { dy, min_y, max_y });
        self
    }
}

/// Enemy table entry: x, y (center), radius, dx, patrol min, patrol max
struct Foe(f32, f32, f32, f32, f32, f32);

/// Chest placement with spawn probability in percent
struct ChestSpot {
    pos: Vec2,
    spawn_rate: f32,
}

struct LevelData {
    name: &'static str,
    length: f32,
    min_coins: u32,
    platforms: Vec<Plat>,
    coins: Vec<Vec2>,
    enemies: Vec<Foe>,
    hazards: Vec<Rect>,
    checkpoints: Vec<Vec2>,
    chests: Vec<ChestSpot>,
}

fn level_data(index: usize) -> LevelData {
    match index {
        0 => level_forest(),
        1 => level_caverns(),
        2 => level_fortress(),
        _ => level_abyss(),
    }
}

pub fn level_name(index: usize) -> &'static str {
    level_data(index).name
}

/// Reset the run state for the given level and populate its entity tables
pub fn load_level(state: &mut GameState, index: usize) {
    let index = index.min(LEVEL_COUNT - 1);
    let data = level_data(index);

    state.level_index = index;
    state.level_length = data.length;
    state.min_coins_required = data.min_coins;
    state.coin_count = 0;
    state.camera_offset = 0.0;
    state.advance_at_tick = None;
    state.goal_message_until = None;

    // Reposition the player but carry stats, weapon, and active effects
    // between levels
    state.player.pos = Vec2::new(PLAYER_START_X, GROUND_Y - state.player.height);
    state.player.vel = Vec2::ZERO;
    state.player.jumping = false;
    state.player.falling = false;
    state.player.on_platform = false;
    state.player.momentum = 0.0;

    state.platforms.clear();
    state.coins.clear();
    state.enemies.clear();
    state.projectiles.clear();
    state.hazards.clear();
    state.chests.clear();
    state.checkpoints.clear();
    state.loot.clear();
    state.effect_texts.clear();

    for p in data.platforms {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            rect: p.rect,
            bounce_power: p.bounce,
            fall_on_touch: p.collapse_ms.is_some(),
            fall_delay_ticks: p.collapse_ms.map(ticks_from_ms).unwrap_or(0),
            touched_at_tick: None,
            falling: false,
            motion: p.motion,
            is_goal: p.goal,
        });
    }

    for pos in data.coins {
        let id = state.next_entity_id();
        state.coins.push(Coin { id, pos, value: 1 });
    }

    for Foe(x, y, radius, dx, min_x, max_x) in data.enemies {
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(x, y),
            radius,
            dx,
            min_x,
            max_x,
            health: 100.0,
            last_damage_tick: None,
        });
    }

    for rect in data.hazards {
        let id = state.next_entity_id();
        state.hazards.push(Hazard {
            id,
            rect,
            damage: HAZARD_DAMAGE,
        });
    }

    for pos in data.checkpoints {
        let id = state.next_entity_id();
        state.checkpoints.push(Checkpoint {
            id,
            pos,
            activated: false,
        });
    }

    let mut rng = state.rng_state.next_rng();
    for spot in data.chests {
        if rng.random_range(0.0..100.0) <= spot.spawn_rate {
            let id = state.next_entity_id();
            state.chests.push(Chest {
                id,
                pos: spot.pos,
                opened: false,
            });
        }
    }

    log::info!(
        "loaded level {} ({}): length {}, {} coins required",
        index + 1,
        data.name,
        data.length,
        data.min_coins
    );
}

fn level_forest() -> LevelData {
    let g = GROUND_Y;
    LevelData {
        name: "Forest Adventure",
        length: 8_000.0,
        min_coins: 15,
        platforms: vec![
            Plat::new(200.0, 300.0, 100.0, 10.0),
            Plat::new(300.0, 400.0, 100.0, 10.0),
            Plat::new(475.0, 459.0, 100.0, 10.0),
            Plat::new(400.0, 250.0, 100.0, 10.0),
            Plat::new(600.0, 200.0, 100.0, 10.0),
            Plat::new(900.0, 300.0, 120.0, 10.0),
            Plat::new(1200.0, 250.0, 120.0, 10.0),
            Plat::new(1500.0, 200.0, 130.0, 10.0),
            Plat::new(1800.0, 300.0, 100.0, 10.0),
            Plat::new(1100.0, 350.0, 80.0, 10.0),
            Plat::new(1250.0, 370.0, 80.0, 10.0),
            Plat::new(1400.0, 350.0, 80.0, 10.0),
            Plat::new(1550.0, 400.0, 80.0, 10.0),
            Plat::new(1700.0, 350.0, 80.0, 10.0),
            Plat::new(2100.0, g - 100.0, 150.0, 10.0),
            Plat::new(2300.0, g - 150.0, 150.0, 10.0),
            Plat::new(2500.0, g - 200.0, 150.0, 10.0),
            Plat::new(2700.0, g - 150.0, 150.0, 10.0),
            Plat::new(2900.0, g - 100.0, 150.0, 10.0),
            Plat::new(2200.0, 200.0, 60.0, 10.0),
            Plat::new(2400.0, 250.0, 60.0, 10.0),
            Plat::new(2600.0, 200.0, 60.0, 10.0),
            Plat::new(3100.0, g - 250.0, 100.0, 10.0),
            Plat::new(3200.0, g - 350.0, 100.0, 10.0),
            Plat::new(3300.0, g - 450.0, 100.0, 10.0),
            Plat::new(3400.0, g - 550.0, 100.0, 10.0),
            Plat::new(3150.0, g - 150.0, 50.0, 10.0),
            Plat::new(3350.0, g - 250.0, 100.0, 10.0),
            Plat::new(3550.0, g - 350.0, 100.0, 10.0),
            Plat::new(3800.0, 250.0, 200.0, 10.0),
            Plat::new(4000.0, 160.0, 10.0, 100.0),
            Plat::new(4100.0, 150.0, 200.0, 10.0),
            Plat::new(4400.0, 250.0, 200.0, 10.0),
            Plat::new(4700.0, 150.0, 200.0, 10.0),
            Plat::new(4300.0, 200.0, 50.0, 10.0),
            Plat::new(4600.0, 200.0, 50.0, 10.0),
            Plat::new(5000.0, g + 30.0, 200.0, 30.0),
            Plat::new(5100.0, g + 50.0, 200.0, 10.0),
            Plat::new(5400.0, g + 100.0, 200.0, 10.0),
            Plat::new(5700.0, g + 50.0, 200.0, 10.0),
            Plat::new(5200.0, 100.0, 100.0, 10.0),
            Plat::new(5500.0, 150.0, 100.0, 10.0),
            Plat::new(5800.0, 100.0, 100.0, 10.0),
            Plat::new(6200.0, g - 300.0, 150.0, 10.0),
            Plat::new(6400.0, g - 400.0, 150.0, 10.0),
            Plat::new(6600.0, g - 500.0, 150.0, 10.0),
            Plat::new(6800.0, g - 400.0, 150.0, 10.0),
            Plat::new(7000.0, g - 300.0, 150.0, 10.0),
            Plat::new(7200.0, 200.0, 80.0, 10.0),
            Plat::new(7350.0, 150.0, 80.0, 10.0),
            Plat::new(7500.0, 100.0, 80.0, 10.0),
            Plat::new(7650.0, 150.0, 80.0, 10.0),
            Plat::new(7700.0, g - 600.0, 100.0, 10.0).goal(),
        ],
        coins: vec![
            Vec2::new(300.0, 270.0),
            Vec2::new(700.0, 170.0),
            Vec2::new(1120.0, 320.0),
            Vec2::new(1270.0, 370.0),
            Vec2::new(2150.0, g - 150.0),
            Vec2::new(3250.0, g - 400.0),
            Vec2::new(4750.0, 120.0),
            Vec2::new(5150.0, g + 20.0),
            Vec2::new(5750.0, g + 20.0),
            Vec2::new(7250.0, 170.0),
            Vec2::new(7750.0, g - 650.0),
        ],
        enemies: vec![
            Foe(800.0, g - 20.0, 32.0, 2.0, 700.0, 900.0),
            Foe(1600.0, g - 20.0, 18.0, 2.0, 1500.0, 1700.0),
            Foe(2300.0, g - 170.0, 20.0, 1.5, 2200.0, 2400.0),
            Foe(2700.0, g - 170.0, 20.0, 1.5, 2600.0, 2800.0),
            Foe(3300.0, g - 470.0, 15.0, 1.0, 3200.0, 3400.0),
            Foe(4400.0, 220.0, 15.0, 3.0, 4300.0, 4500.0),
            Foe(5400.0, g + 70.0, 18.0, 2.0, 5300.0, 5500.0),
            Foe(6600.0, g - 520.0, 20.0, 2.5, 6500.0, 6700.0),
            Foe(7200.0, 170.0, 15.0, 2.0, 7100.0, 7300.0),
        ],
        hazards: vec![],
        checkpoints: vec![
            Vec2::new(2000.0, g - 50.0),
            Vec2::new(4000.0, 100.0),
            Vec2::new(6000.0, g + 30.0),
        ],
        chests: vec![ChestSpot {
            pos: Vec2::new(3980.0, 110.0),
            spawn_rate: 100.0,
        }],
    }
}

fn level_caverns() -> LevelData {
    let g = GROUND_Y;
    LevelData {
        name: "Lava Caverns",
        length: 10_000.0,
        min_coins: 17,
        platforms: vec![
            Plat::new(200.0, 300.0, 100.0, 10.0),
            Plat::new(400.0, 250.0, 100.0, 10.0).collapsing(1000),
            Plat::new(600.0, 200.0, 100.0, 10.0).collapsing(1500),
            Plat::new(900.0, 300.0, 120.0, 10.0),
            Plat::new(1200.0, 250.0, 120.0, 10.0).collapsing(2000),
            Plat::new(1500.0, 200.0, 130.0, 10.0),
            Plat::new(1800.0, 300.0, 100.0, 10.0),
            Plat::new(2100.0, g - 100.0, 150.0, 10.0),
            Plat::new(2300.0, g - 150.0, 150.0, 10.0),
            Plat::new(2500.0, g - 200.0, 150.0, 10.0),
            Plat::new(2700.0, g - 150.0, 150.0, 10.0),
            Plat::new(2900.0, g - 100.0, 150.0, 10.0),
            Plat::new(3200.0, g - 350.0, 100.0, 10.0),
            Plat::new(3400.0, g - 550.0, 100.0, 10.0),
            Plat::new(3800.0, 250.0, 200.0, 10.0),
            Plat::new(4100.0, 150.0, 200.0, 10.0),
            Plat::new(4400.0, 250.0, 200.0, 10.0),
            Plat::new(4700.0, 150.0, 200.0, 10.0),
            Plat::new(5000.0, g + 30.0, 200.0, 30.0),
            Plat::new(5400.0, g + 100.0, 200.0, 10.0),
            Plat::new(5700.0, g + 50.0, 200.0, 10.0),
            Plat::new(6200.0, g - 300.0, 150.0, 10.0),
            Plat::new(6400.0, g - 400.0, 150.0, 10.0),
            Plat::new(6600.0, g - 500.0, 150.0, 10.0),
            Plat::new(6800.0, g - 400.0, 150.0, 10.0),
            Plat::new(7000.0, g - 300.0, 150.0, 10.0),
            Plat::new(9_700.0, g - 600.0, 100.0, 10.0).goal(),
        ],
        coins: vec![
            Vec2::new(300.0, 270.0),
            Vec2::new(700.0, 170.0),
            Vec2::new(1120.0, 320.0),
            Vec2::new(2150.0, g - 150.0),
            Vec2::new(3250.0, g - 400.0),
            Vec2::new(4750.0, 120.0),
            Vec2::new(5750.0, g + 20.0),
            Vec2::new(7750.0, g - 650.0),
        ],
        enemies: vec![
            Foe(800.0, g - 20.0, 32.0, 2.0, 700.0, 900.0),
            Foe(1600.0, g - 20.0, 18.0, 2.0, 1500.0, 1700.0),
            Foe(2300.0, g - 170.0, 20.0, 1.5, 2200.0, 2400.0),
            Foe(2700.0, g - 170.0, 20.0, 1.5, 2600.0, 2800.0),
            Foe(3300.0, g - 470.0, 15.0, 1.0, 3200.0, 3400.0),
            Foe(4400.0, 220.0, 15.0, 3.0, 4300.0, 4500.0),
            Foe(5400.0, g + 70.0, 18.0, 2.0, 5300.0, 5500.0),
            Foe(6600.0, g - 520.0, 20.0, 2.5, 6500.0, 6700.0),
        ],
        hazards: vec![
            Rect::new(3000.0, g, 500.0, GROUND_HEIGHT),
            Rect::new(4500.0, g, 300.0, GROUND_HEIGHT),
            Rect::new(7000.0, g, 400.0, GROUND_HEIGHT),
        ],
        checkpoints: vec![
            Vec2::new(2000.0, g - 50.0),
            Vec2::new(4000.0, 100.0),
            Vec2::new(6000.0, g + 30.0),
        ],
        chests: vec![
            ChestSpot {
                pos: Vec2::new(3980.0, 110.0),
                spawn_rate: 100.0,
            },
            ChestSpot {
                pos: Vec2::new(6500.0, g - 520.0),
                spawn_rate: 100.0,
            },
        ],
    }
}

fn level_fortress() -> LevelData {
    let g = GROUND_Y;
    LevelData {
        name: "Sky Fortress",
        length: 12_000.0,
        min_coins: 25,
        platforms: vec![
            Plat::new(200.0, g - 100.0, 200.0, 20.0),
            Plat::new(500.0, g - 150.0, 150.0, 20.0),
            Plat::new(800.0, g - 200.0, 100.0, 20.0).moving_x(1.5, 700.0, 1000.0),
            Plat::new(1200.0, g - 300.0, 150.0, 20.0),
            Plat::new(1500.0, g - 350.0, 100.0, 20.0).moving_y(1.0, g - 400.0, g - 300.0),
            Plat::new(1800.0, g - 400.0, 120.0, 20.0),
            Plat::new(2200.0, g - 500.0, 180.0, 20.0).bounce(1.2),
            Plat::new(2500.0, g - 550.0, 150.0, 20.0),
            Plat::new(2800.0, g - 600.0, 120.0, 20.0).moving_x(-1.0, 2500.0, 3000.0),
            Plat::new(3500.0, g - 450.0, 200.0, 20.0),
            Plat::new(4000.0, g - 500.0, 150.0, 20.0).moving_y(1.2, g - 550.0, g - 450.0),
            Plat::new(4500.0, g - 400.0, 180.0, 20.0),
            Plat::new(5200.0, g - 700.0, 200.0, 20.0),
            Plat::new(5600.0, g - 750.0, 150.0, 20.0).moving_x(2.0, 5400.0, 5800.0),
            Plat::new(6000.0, g - 800.0, 120.0, 20.0),
            Plat::new(6500.0, g - 700.0, 200.0, 20.0),
            Plat::new(7000.0, g - 650.0, 150.0, 20.0).moving_y(-1.5, g - 700.0, g - 600.0),
            Plat::new(7500.0, g - 600.0, 180.0, 20.0),
            Plat::new(8000.0, g - 700.0, 200.0, 20.0),
            Plat::new(8500.0, g - 750.0, 150.0, 20.0),
            Plat::new(9000.0, g - 800.0, 120.0, 20.0).moving_x(-1.0, 8800.0, 9200.0),
            Plat::new(10_000.0, g - 850.0, 200.0, 20.0).goal(),
        ],
        coins: vec![
            Vec2::new(300.0, g - 150.0),
            Vec2::new(600.0, g - 200.0),
            Vec2::new(900.0, g - 250.0),
            Vec2::new(1300.0, g - 350.0),
            Vec2::new(1600.0, g - 400.0),
            Vec2::new(1900.0, g - 450.0),
            Vec2::new(2300.0, g - 550.0),
            Vec2::new(2600.0, g - 600.0),
            Vec2::new(2900.0, g - 650.0),
            Vec2::new(3600.0, g - 500.0),
            Vec2::new(4100.0, g - 550.0),
            Vec2::new(4600.0, g - 450.0),
            Vec2::new(5300.0, g - 750.0),
            Vec2::new(5700.0, g - 800.0),
            Vec2::new(6100.0, g - 850.0),
            Vec2::new(6600.0, g - 750.0),
            Vec2::new(7100.0, g - 700.0),
            Vec2::new(7600.0, g - 650.0),
            Vec2::new(8100.0, g - 750.0),
            Vec2::new(8600.0, g - 800.0),
            Vec2::new(9100.0, g - 850.0),
            Vec2::new(10_100.0, g - 900.0),
        ],
        enemies: vec![
            Foe(1000.0, g - 300.0, 20.0, 2.0, 800.0, 1200.0),
            Foe(1700.0, g - 400.0, 25.0, -1.5, 1500.0, 1900.0),
            Foe(2400.0, g - 550.0, 22.0, 1.8, 2200.0, 2600.0),
            Foe(3800.0, g - 500.0, 20.0, 2.2, 3600.0, 4000.0),
            Foe(5400.0, g - 750.0, 25.0, -1.2, 5200.0, 5600.0),
            Foe(6800.0, g - 700.0, 20.0, 1.5, 6600.0, 7000.0),
            Foe(8200.0, g - 800.0, 22.0, -1.8, 8000.0, 8400.0),
        ],
        hazards: vec![],
        checkpoints: vec![
            Vec2::new(2000.0, g - 100.0),
            Vec2::new(5000.0, g - 600.0),
            Vec2::new(8000.0, g - 700.0),
        ],
        chests: vec![
            ChestSpot {
                pos: Vec2::new(2500.0, g - 200.0),
                spawn_rate: 100.0,
            },
            ChestSpot {
                pos: Vec2::new(5500.0, 150.0),
                spawn_rate: 55.0,
            },
            ChestSpot {
                pos: Vec2::new(8500.0, g - 400.0),
                spawn_rate: 100.0,
            },
        ],
    }
}

fn level_abyss() -> LevelData {
    let g = GROUND_Y;
    LevelData {
        name: "Dark Abyss",
        length: 15_000.0,
        min_coins: 30,
        platforms: vec![
            Plat::new(200.0, g - 100.0, 200.0, 20.0),
            Plat::new(500.0, g - 150.0, 150.0, 20.0),
            Plat::new(800.0, g - 200.0, 100.0, 20.0),
            Plat::new(1200.0, g - 250.0, 150.0, 20.0),
            Plat::new(1500.0, g - 300.0, 100.0, 20.0),
            Plat::new(1800.0, g - 350.0, 120.0, 20.0),
            Plat::new(2200.0, g - 400.0, 180.0, 20.0),
            Plat::new(2500.0, g - 450.0, 150.0, 20.0),
            Plat::new(2800.0, g - 500.0, 120.0, 20.0),
            Plat::new(3500.0, g - 550.0, 200.0, 20.0),
            Plat::new(4000.0, g - 600.0, 150.0, 20.0),
            Plat::new(4500.0, g - 650.0, 180.0, 20.0),
            Plat::new(5200.0, g - 500.0, 200.0, 20.0),
            Plat::new(5600.0, g - 550.0, 150.0, 20.0),
            Plat::new(6000.0, g - 600.0, 120.0, 20.0),
            Plat::new(6500.0, g - 700.0, 200.0, 20.0),
            Plat::new(7000.0, g - 750.0, 150.0, 20.0),
            Plat::new(7500.0, g - 800.0, 180.0, 20.0),
            Plat::new(8000.0, g - 700.0, 200.0, 20.0),
            Plat::new(8500.0, g - 650.0, 150.0, 20.0),
            Plat::new(9000.0, g - 600.0, 120.0, 20.0),
            Plat::new(10_000.0, g - 550.0, 200.0, 20.0),
            Plat::new(11_000.0, g - 500.0, 150.0, 20.0),
            Plat::new(12_000.0, g - 450.0, 120.0, 20.0),
            Plat::new(14_000.0, g - 400.0, 200.0, 20.0).goal(),
        ],
        coins: vec![
            Vec2::new(300.0, g - 150.0),
            Vec2::new(600.0, g - 200.0),
            Vec2::new(900.0, g - 250.0),
            Vec2::new(1300.0, g - 300.0),
            Vec2::new(1600.0, g - 350.0),
            Vec2::new(1900.0, g - 400.0),
            Vec2::new(2300.0, g - 450.0),
            Vec2::new(2600.0, g - 500.0),
            Vec2::new(2900.0, g - 550.0),
            Vec2::new(3600.0, g - 600.0),
            Vec2::new(4100.0, g - 650.0),
            Vec2::new(4600.0, g - 700.0),
            Vec2::new(5300.0, g - 550.0),
            Vec2::new(5700.0, g - 600.0),
            Vec2::new(6100.0, g - 650.0),
            Vec2::new(6600.0, g - 750.0),
            Vec2::new(7100.0, g - 800.0),
            Vec2::new(7600.0, g - 850.0),
            Vec2::new(8100.0, g - 750.0),
            Vec2::new(8600.0, g - 700.0),
            Vec2::new(9100.0, g - 650.0),
            Vec2::new(10_100.0, g - 600.0),
            Vec2::new(11_100.0, g - 550.0),
            Vec2::new(12_100.0, g - 500.0),
            Vec2::new(14_100.0, g - 450.0),
        ],
        enemies: vec![
            Foe(1000.0, g - 300.0, 20.0, 2.0, 800.0, 1200.0),
            Foe(1700.0, g - 400.0, 25.0, -1.5, 1500.0, 1900.0),
            Foe(2400.0, g - 500.0, 22.0, 1.8, 2200.0, 2600.0),
            Foe(3800.0, g - 600.0, 20.0, 2.2, 3600.0, 4000.0),
            Foe(5400.0, g - 700.0, 25.0, -1.2, 5200.0, 5600.0),
            Foe(6800.0, g - 800.0, 20.0, 1.5, 6600.0, 7000.0),
            Foe(8200.0, g - 700.0, 22.0, -1.8, 8000.0, 8400.0),
            Foe(10_500.0, g - 600.0, 25.0, 2.0, 10_300.0, 10_700.0),
            Foe(12_500.0, g - 500.0, 30.0, -1.5, 12_300.0, 12_700.0),
        ],
        hazards: vec![],
        checkpoints: vec![
            Vec2::new(2000.0, g - 100.0),
            Vec2::new(5000.0, g - 550.0),
            Vec2::new(8000.0, g - 650.0),
            Vec2::new(11_000.0, g - 450.0),
        ],
        chests: vec![
            ChestSpot {
                pos: Vec2::new(3000.0, g - 150.0),
                spawn_rate: 100.0,
            },
            ChestSpot {
                pos: Vec2::new(6000.0, g - 300.0),
                spawn_rate: 100.0,
            },
            ChestSpot {
                pos: Vec2::new(9000.0, g - 450.0),
                spawn_rate: 75.0,
            },
            ChestSpot {
                pos: Vec2::new(12_000.0, g - 600.0),
                spawn_rate: 35.0,
            },
        ],
    }
}
