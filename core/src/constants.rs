pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

pub const SHIP_RADIUS: f64 = 8.0;
pub const SHIP_TURN_RATE: f64 = 0.15;
pub const SHIP_THRUST: f64 = 0.3;
pub const SHIP_DRAG: f64 = 0.99;
pub const SHIP_MAX_SPEED: f64 = 8.0;

pub const BULLET_SPEED: f64 = 8.0;
pub const BULLET_LIFETIME_TICKS: i32 = 60;

pub const STARTING_LIVES: i32 = 3;
pub const INVULNERABLE_TICKS: i32 = 120;
pub const BLINK_PERIOD_TICKS: i32 = 5;

pub const INITIAL_ASTEROID_COUNT: u32 = 8;
pub const ASTEROID_START_RADIUS: f64 = 40.0;
pub const ASTEROID_SPLIT_MIN_RADIUS: f64 = 15.0;
pub const ASTEROID_MAX_AXIS_SPEED: f64 = 1.5;
pub const ASTEROID_MAX_SPIN: f64 = 0.1;

pub const REPOPULATE_BASE_COUNT: u32 = 5;
pub const REPOPULATE_MAX_COUNT: u32 = 10;
pub const REPOPULATE_SCORE_STEP: u32 = 1_000;
