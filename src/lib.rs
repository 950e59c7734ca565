//! Tui Breakout - a terminal block-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, obstacles, game state)
//! - `term`: Terminal frontend (framebuffer, board view, diff renderer)
//! - `config`: Runtime configuration with JSON overrides

pub mod config;
pub mod sim;
pub mod term;

pub use config::Config;
pub use sim::GameSimulation;

/// Game configuration constants
pub mod consts {
    /// Ball speed on serve, and the speed-boost increment
    pub const DEFAULT_BALL_SPEED: f32 = 0.04;
    /// Ball radius, fixed for the whole session
    pub const BALL_RADIUS: f32 = 0.05;

    /// Paddle defaults - full span, centered on its position
    pub const DEFAULT_PADDLE_SIZE: f32 = 0.5;
    /// Size gained when a paddle-grow obstacle is struck
    pub const PADDLE_GROW_INCREMENT: f32 = 0.2;
    /// Acceleration magnitude applied per held direction key
    pub const PADDLE_ACCELERATION: f32 = 0.01;
    /// Maximum wall reflections resolved in one paddle step
    pub const MAX_PADDLE_BOUNCES: u32 = 8;

    /// Frame driver pacing
    pub const FRAME_RATE: u32 = 30;
    /// Simulation sub-steps per rendered frame
    pub const STEPS_PER_FRAME: u32 = 10;
}
