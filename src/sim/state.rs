//! Game state and core simulation types
//!
//! Pure data: phases, entity properties, obstacle variants, and the
//! transient collision report the resolution loop threads around.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball not in play, waiting for a serve
    WaitingForPlayer,
    /// Active gameplay
    Running,
    /// Session aborted by the player
    Ended,
    /// Board cleared
    Won,
    /// Last ball lost
    Lost,
}

impl GamePhase {
    /// True once the session can no longer leave its phase
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Ended | GamePhase::Won | GamePhase::Lost)
    }
}

/// Session counters and phase, owned by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Balls left to serve, including the one in play
    pub balls: u8,
    pub score: u64,
    pub phase: GamePhase,
}

impl Default for GameStatus {
    fn default() -> Self {
        Self { balls: 3, score: 0, phase: GamePhase::WaitingForPlayer }
    }
}

/// Paddle pose: center position on the bottom edge and full span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleProperties {
    /// Horizontal center, board coordinates
    pub position: f32,
    /// Full width; the paddle occupies `position ± size / 2`
    pub size: f32,
}

impl Default for PaddleProperties {
    fn default() -> Self {
        Self { position: 0.0, size: DEFAULT_PADDLE_SIZE }
    }
}

/// Ball pose: center and fixed radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallProperties {
    pub position: Vec2,
    pub radius: f32,
}

impl Default for BallProperties {
    fn default() -> Self {
        Self { position: Vec2::ZERO, radius: BALL_RADIUS }
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Sum of the three channels, the point value of a standard obstacle
    #[inline]
    pub fn channel_sum(self) -> u32 {
        u32::from(self.r) + u32::from(self.g) + u32::from(self.b)
    }
}

/// Obstacle rectangle: top-left corner, extent toward +x/+y, fill color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleProperties {
    pub position: Vec2,
    pub size: Vec2,
    pub color: Rgb,
}

/// Stable obstacle handle, issued at construction and never reused
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ObstacleId(u64);

impl ObstacleId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Collision-effect variant of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Scores its color's channel sum
    Standard,
    /// Adds the default ball speed to the ball, drawn black
    SpeedBoost,
    /// Widens the paddle, drawn red
    PaddleGrow,
}

/// A destructible board obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub properties: ObstacleProperties,
}

impl Obstacle {
    pub fn standard(position: Vec2, size: Vec2, color: Rgb) -> Self {
        Self {
            kind: ObstacleKind::Standard,
            properties: ObstacleProperties { position, size, color },
        }
    }

    pub fn speed_boost(position: Vec2, size: Vec2) -> Self {
        Self {
            kind: ObstacleKind::SpeedBoost,
            properties: ObstacleProperties { position, size, color: Rgb::new(0, 0, 0) },
        }
    }

    pub fn paddle_grow(position: Vec2, size: Vec2) -> Self {
        Self {
            kind: ObstacleKind::PaddleGrow,
            properties: ObstacleProperties { position, size, color: Rgb::new(255, 0, 0) },
        }
    }

    /// Effect applied when this obstacle is struck; `new_delta_t` is left
    /// for the collision resolver to fill in
    pub fn collision_info(&self) -> CollisionInfo {
        match self.kind {
            ObstacleKind::Standard => CollisionInfo {
                points: self.properties.color.channel_sum(),
                ..CollisionInfo::default()
            },
            ObstacleKind::SpeedBoost => CollisionInfo {
                ball_speed: DEFAULT_BALL_SPEED,
                ..CollisionInfo::default()
            },
            ObstacleKind::PaddleGrow => CollisionInfo {
                paddle_size: PADDLE_GROW_INCREMENT,
                ..CollisionInfo::default()
            },
        }
    }
}

/// Outcome of one resolved collision
///
/// `new_delta_t` is the tick time still unspent after the ball was moved
/// to the collision point; the other fields are additive effects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionInfo {
    pub new_delta_t: f32,
    pub points: u32,
    pub paddle_size: f32,
    pub ball_speed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!GamePhase::WaitingForPlayer.is_terminal());
        assert!(!GamePhase::Running.is_terminal());
        assert!(GamePhase::Ended.is_terminal());
        assert!(GamePhase::Won.is_terminal());
        assert!(GamePhase::Lost.is_terminal());
    }

    #[test]
    fn test_standard_obstacle_scores_channel_sum() {
        let obstacle = Obstacle::standard(
            Vec2::new(-0.1, -0.5),
            Vec2::new(0.2, 0.2),
            Rgb::new(10, 20, 30),
        );
        let info = obstacle.collision_info();
        assert_eq!(info.points, 60);
        assert_eq!(info.paddle_size, 0.0);
        assert_eq!(info.ball_speed, 0.0);
    }

    #[test]
    fn test_special_obstacles_force_marker_colors() {
        let boost = Obstacle::speed_boost(Vec2::ZERO, Vec2::new(0.2, 0.2));
        assert_eq!(boost.properties.color, Rgb::new(0, 0, 0));
        assert_eq!(boost.collision_info().ball_speed, DEFAULT_BALL_SPEED);
        assert_eq!(boost.collision_info().points, 0);

        let grow = Obstacle::paddle_grow(Vec2::ZERO, Vec2::new(0.2, 0.2));
        assert_eq!(grow.properties.color, Rgb::new(255, 0, 0));
        assert_eq!(grow.collision_info().paddle_size, PADDLE_GROW_INCREMENT);
        assert_eq!(grow.collision_info().points, 0);
    }
}
