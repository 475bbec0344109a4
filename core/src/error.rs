use thiserror::Error;

/// Simulation invariants that must hold between ticks. None of these are
/// reachable through the public stepping API; they exist to catch corruption
/// in tests and in harnesses that mutate state directly.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("ship left the field at ({x}, {y})")]
    ShipBounds { x: f64, y: f64 },
    #[error("invulnerability countdown is negative: {ticks}")]
    InvulnerabilityRange { ticks: i32 },
    #[error("lives out of range: {lives}")]
    LivesRange { lives: i32 },
    #[error("game-over flag inconsistent with lives {lives}")]
    GameOverConsistency { lives: i32 },
    #[error("bullet {index} alive with non-positive lifetime {life}")]
    BulletLifetime { index: usize, life: i32 },
    #[error("bullet {index} left the field at ({x}, {y})")]
    BulletBounds { index: usize, x: f64, y: f64 },
    #[error("asteroid {index} has non-positive radius {radius}")]
    AsteroidRadius { index: usize, radius: f64 },
    #[error("asteroid {index} left the field at ({x}, {y})")]
    AsteroidBounds { index: usize, x: f64, y: f64 },
}
