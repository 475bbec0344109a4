use serde::{Deserialize, Serialize};

use crate::constants::{
    ASTEROID_MAX_AXIS_SPEED, ASTEROID_MAX_SPIN, ASTEROID_SPLIT_MIN_RADIUS, ASTEROID_START_RADIUS,
    BLINK_PERIOD_TICKS, BULLET_LIFETIME_TICKS, BULLET_SPEED, FIELD_HEIGHT, FIELD_WIDTH,
    INITIAL_ASTEROID_COUNT, INVULNERABLE_TICKS, REPOPULATE_BASE_COUNT, REPOPULATE_MAX_COUNT,
    REPOPULATE_SCORE_STEP, SHIP_DRAG, SHIP_MAX_SPEED, SHIP_RADIUS, SHIP_THRUST, SHIP_TURN_RATE,
    STARTING_LIVES,
};
use crate::error::InvariantViolation;
use crate::input::{decode_key_byte, InputTracker, KeyState, TickInput};
use crate::math::{clamp_speed, distance, wrap_x, wrap_y};
use crate::rng::SeededRng;

mod game;

use game::Game;

#[derive(Clone, Copy, Debug)]
struct Ship {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    angle: f64,
    radius: f64,
}

#[derive(Clone, Copy, Debug)]
struct Bullet {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    life: i32,
    alive: bool,
}

#[derive(Clone, Copy, Debug)]
struct Asteroid {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    radius: f64,
    angle: f64,
    spin: f64,
    alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub radius: f64,
    /// True on ticks where the invulnerability flicker hides the ship.
    pub blink_hidden: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub angle: f64,
    pub spin: f64,
}

/// Read-only view of the post-tick world. The render and scoreboard layers
/// consume this and feed nothing back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick_count: u32,
    pub score: u32,
    pub lives: i32,
    pub invulnerable_ticks: i32,
    pub is_game_over: bool,
    pub rng_state: u32,
    pub ship: ShipSnapshot,
    pub bullets: Vec<BulletSnapshot>,
    pub asteroids: Vec<AsteroidSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_score: u32,
    pub final_rng_state: u32,
    pub tick_count: u32,
}

/// Replays a recorded run: one raw key byte per tick, identical seed and
/// bytes give an identical result.
pub fn replay(seed: u32, key_bytes: &[u8]) -> ReplayResult {
    let mut live = LiveGame::new(seed);
    for byte in key_bytes {
        live.step_byte(*byte);
    }
    live.result()
}

/// A stepped game plus the per-action edge tracker that converts raw held
/// keys into the simulation's edge-resolved input.
pub struct LiveGame {
    game: Game,
    tracker: InputTracker,
}

impl LiveGame {
    pub fn new(seed: u32) -> Self {
        Self {
            game: Game::new(seed),
            tracker: InputTracker::new(),
        }
    }

    /// Advances one tick from a raw held-key map. The tracker always runs,
    /// so a fire edge is still observable while the game is over; the
    /// simulation itself freezes on game-over.
    pub fn step(&mut self, keys: KeyState) -> TickInput {
        let input = self.tracker.track(keys);
        self.game.step(input);
        input
    }

    #[inline]
    pub fn step_byte(&mut self, byte: u8) -> TickInput {
        self.step(decode_key_byte(byte))
    }

    /// Restores the starting state: lives, score, timers, ship pose, and a
    /// fresh initial asteroid field. The RNG keeps rolling forward.
    pub fn reset(&mut self) {
        self.game.reset();
    }

    #[inline]
    pub fn snapshot(&self) -> WorldSnapshot {
        self.game.snapshot()
    }

    #[inline]
    pub fn result(&self) -> ReplayResult {
        self.game.result()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    #[inline]
    pub fn lives(&self) -> i32 {
        self.game.lives()
    }

    #[inline]
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.game.validate_invariants()
    }
}
