use std::f64::consts::{FRAC_PI_4, FRAC_PI_6, PI};

use asteroids_core::constants::{FIELD_HEIGHT, FIELD_WIDTH};
use asteroids_core::input::KeyState;
use asteroids_core::math::{distance, heading_between, normalize_angle};
use asteroids_core::sim::AsteroidSnapshot;
use asteroids_core::WorldSnapshot;

/// Re-decide every this many calls; between decisions the previous key map
/// is held as-is.
const DECISION_PERIOD_TICKS: u32 = 10;

/// Below this distance the nearest rock is an emergency and aiming is
/// abandoned for the tick.
const AVOID_DISTANCE: f64 = 80.0;
/// Deadband on the escape heading before the avoid turn engages.
const AVOID_TURN_DEADBAND: f64 = 0.3;

/// Rocks beyond this range are never aim targets.
const TARGET_RANGE: f64 = 400.0;
/// Above this heading error the pilot turns every decision.
const COARSE_AIM_ERROR: f64 = 0.5;
/// Between the fine and coarse error the turn is duty-gated; below it the
/// aim is considered settled.
const FINE_AIM_ERROR: f64 = 0.1;
/// Firing solution distance window, both bounds exclusive.
const FIRE_MIN_DISTANCE: f64 = 50.0;
const FIRE_MAX_DISTANCE: f64 = 350.0;
/// Target lead extrapolation cap, in ticks.
const LEAD_TICKS_CAP: f64 = 30.0;

/// Speed above which the pilot considers a retro burn.
const BRAKE_SPEED: f64 = 2.0;
/// Distance from a field edge below which the pilot nudges toward center.
const EDGE_MARGIN: f64 = 100.0;

const DUTY_WINDOW_MS: u64 = 100;
const FINE_TURN_DUTY_MS: u64 = 50;
const BRAKE_DUTY_MS: u64 = 30;
const RECENTER_DUTY_MS: u64 = 20;

/// A key-map source driving the game in place of a human. Decisions are made
/// from the post-tick world snapshot only; pilots get no private channel into
/// the simulation.
pub trait Pilot {
    fn id(&self) -> &str;
    fn description(&self) -> &str;
    fn reset(&mut self, seed: u32);
    fn next_keys(&mut self, world: &WorldSnapshot, now_ms: u64) -> KeyState;
}

/// The attract-mode pilot: dodge the nearest rock when it gets close,
/// otherwise line up on the most shootable target, leading it by its
/// velocity, and keep the ship slow and centered.
#[derive(Clone, Debug, Default)]
pub struct DemoPilot {
    decision_timer: u32,
    keys: KeyState,
}

impl DemoPilot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pilot for DemoPilot {
    fn id(&self) -> &str {
        "demo"
    }

    fn description(&self) -> &str {
        "attract-mode heuristic: avoid, lead-aim, brake, recenter"
    }

    fn reset(&mut self, _seed: u32) {
        self.decision_timer = 0;
        self.keys = KeyState::default();
    }

    fn next_keys(&mut self, world: &WorldSnapshot, now_ms: u64) -> KeyState {
        self.decision_timer += 1;
        if self.decision_timer < DECISION_PERIOD_TICKS {
            return self.keys;
        }
        self.decision_timer = 0;

        self.keys = decide(world, now_ms);
        self.keys
    }
}

/// Time-based duty gate over a repeating 100 ms window of the injected
/// clock. Used to soften fine turns, retro burns, and recenter nudges.
fn duty_gate(now_ms: u64, on_ms: u64) -> bool {
    now_ms % DUTY_WINDOW_MS < on_ms
}

fn decide(world: &WorldSnapshot, now_ms: u64) -> KeyState {
    let ship = &world.ship;
    let mut keys = KeyState::default();

    let mut nearest: Option<(&AsteroidSnapshot, f64)> = None;
    let mut target: Option<(&AsteroidSnapshot, f64)> = None;
    for asteroid in &world.asteroids {
        let dist = distance(ship.x, ship.y, asteroid.x, asteroid.y);
        if nearest.map_or(true, |(_, best)| dist < best) {
            nearest = Some((asteroid, dist));
        }

        // Shootability favors close rocks the ship is already pointing at.
        let heading = heading_between(ship.x, ship.y, asteroid.x, asteroid.y);
        let error = normalize_angle(heading - ship.angle).abs();
        let value = 1_000.0 / dist - error * 100.0;
        if dist < TARGET_RANGE && target.map_or(true, |(_, best)| value > best) {
            target = Some((asteroid, value));
        }
    }

    let Some((threat, threat_distance)) = nearest else {
        return keys;
    };

    if threat_distance < AVOID_DISTANCE {
        let escape = heading_between(threat.x, threat.y, ship.x, ship.y);
        let error = normalize_angle(escape - ship.angle);
        if error.abs() > AVOID_TURN_DEADBAND {
            if error > 0.0 {
                keys.right = true;
            } else {
                keys.left = true;
            }
        }
        if error.abs() < FRAC_PI_4 {
            keys.thrust = true;
        }
        return keys;
    }

    let Some((target, _)) = target else {
        return keys;
    };

    // Lead the target by straight-line extrapolation, scaled by how much
    // breathing room the nearest rock allows.
    let lead_ticks = (threat_distance / 8.0).min(LEAD_TICKS_CAP);
    let aim_x = target.x + target.vx * lead_ticks;
    let aim_y = target.y + target.vy * lead_ticks;
    let error = normalize_angle(heading_between(ship.x, ship.y, aim_x, aim_y) - ship.angle);

    if error.abs() > FINE_AIM_ERROR {
        if error.abs() > COARSE_AIM_ERROR || duty_gate(now_ms, FINE_TURN_DUTY_MS) {
            if error > 0.0 {
                keys.right = true;
            } else {
                keys.left = true;
            }
        }
    } else {
        let aim_distance = distance(ship.x, ship.y, aim_x, aim_y);
        if aim_distance > FIRE_MIN_DISTANCE && aim_distance < FIRE_MAX_DISTANCE {
            keys.fire = true;
        }
    }

    // Retro burn when drifting fast and already pointing against the drift.
    let speed = (ship.vx * ship.vx + ship.vy * ship.vy).sqrt();
    if speed > BRAKE_SPEED {
        let reverse = ship.vy.atan2(ship.vx) + PI;
        let brake_error = normalize_angle(reverse - ship.angle);
        if brake_error.abs() < FRAC_PI_4 && duty_gate(now_ms, BRAKE_DUTY_MS) {
            keys.thrust = true;
        }
    }

    // Nudge toward field center when hugging an edge.
    let near_edge = ship.x < EDGE_MARGIN
        || ship.x > FIELD_WIDTH - EDGE_MARGIN
        || ship.y < EDGE_MARGIN
        || ship.y > FIELD_HEIGHT - EDGE_MARGIN;
    if near_edge {
        let center = heading_between(ship.x, ship.y, FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0);
        let center_error = normalize_angle(center - ship.angle);
        if center_error.abs() < FRAC_PI_6 && duty_gate(now_ms, RECENTER_DUTY_MS) {
            keys.thrust = true;
        }
    }

    keys
}
