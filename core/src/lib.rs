pub mod constants;
pub mod error;
pub mod input;
pub mod math;
pub mod rng;
pub mod sim;

pub use error::InvariantViolation;
pub use sim::{replay, LiveGame, ReplayResult, WorldSnapshot};
