//! Deterministic game simulation
//!
//! Everything in this module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles by id)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod paddle;
pub mod simulation;
pub mod state;

pub use ball::Ball;
pub use paddle::Paddle;
pub use simulation::GameSimulation;
pub use state::{
    BallProperties, CollisionInfo, GamePhase, GameStatus, Obstacle, ObstacleId, ObstacleKind,
    ObstacleProperties, PaddleProperties, Rgb,
};
