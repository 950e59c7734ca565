//! Paddle: a one-dimensional actuator on the bottom board edge
//!
//! The paddle integrates speed and acceleration each step and bounces off
//! the side walls, losing half its speed per bounce. Unspent time is
//! replayed after each bounce, up to `MAX_PADDLE_BOUNCES` reflections per
//! step.

use serde::{Deserialize, Serialize};

use super::state::PaddleProperties;
use crate::consts::MAX_PADDLE_BOUNCES;

/// Player-controlled paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub(crate) properties: PaddleProperties,
    pub(crate) speed: f32,
    pub(crate) acceleration: f32,
}

impl Paddle {
    pub fn new() -> Self {
        Self {
            properties: PaddleProperties::default(),
            speed: 0.0,
            acceleration: 0.0,
        }
    }

    /// Advance the paddle by `delta_t`, resolving wall bounces
    ///
    /// Each bounce clamps the paddle flush to the wall, inverts the speed
    /// at half magnitude, and replays the unspent time.
    pub fn step(&mut self, delta_t: f32) {
        let mut remaining = delta_t;
        for _ in 0..MAX_PADDLE_BOUNCES {
            if remaining <= 0.0 {
                return;
            }
            let new_speed = self.speed + self.acceleration * remaining;
            let predicted = self.properties.position + self.speed * remaining;
            let half_size = self.properties.size / 2.0;

            let edge = predicted + half_size.copysign(predicted);
            if edge.abs() < 1.0 {
                self.speed = new_speed;
                self.properties.position = predicted;
                return;
            }

            // Clamp flush to the wall, then replay the overshoot time
            // measured at the pre-bounce speed.
            self.properties.position = (1.0 - half_size).copysign(edge);
            let residual = (edge - 1.0f32.copysign(predicted)) / self.speed;
            self.speed = -new_speed / 2.0;
            if !residual.is_finite() {
                return;
            }
            remaining = residual;
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    /// Additive size change from a collision effect
    pub fn change_size_by(&mut self, delta: f32) {
        self.properties.size += delta;
    }

    pub fn properties(&self) -> PaddleProperties {
        self.properties
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrates_position_and_speed() {
        let mut paddle = Paddle::new();
        paddle.speed = 0.5;
        paddle.acceleration = 0.1;
        paddle.step(0.1);
        assert!((paddle.properties.position - 0.05).abs() < 1e-6);
        assert!((paddle.speed - 0.51).abs() < 1e-6);
    }

    #[test]
    fn test_wall_bounce_clamps_and_halves_speed() {
        let mut paddle = Paddle::new();
        paddle.properties.position = 0.9;
        paddle.speed = 2.0;
        paddle.step(0.1);
        // Overshoot past the right wall replays at inverted half speed:
        // clamp to 0.75, then 0.175 time units at speed -1.0.
        assert!((paddle.properties.position - 0.575).abs() < 1e-5);
        assert!((paddle.speed + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_delta_t_is_noop() {
        let mut paddle = Paddle::new();
        paddle.properties.position = 0.8;
        paddle.speed = 3.0;
        paddle.acceleration = -1.0;
        paddle.step(0.0);
        assert_eq!(paddle.properties.position, 0.8);
        assert_eq!(paddle.speed, 3.0);
    }

    #[test]
    fn test_resting_on_wall_does_not_poison_state() {
        let mut paddle = Paddle::new();
        paddle.properties.position = 0.75;
        paddle.speed = 0.0;
        paddle.acceleration = 0.01;
        for _ in 0..100 {
            paddle.step(0.1);
            assert!(paddle.properties.position.is_finite());
            assert!(paddle.speed.is_finite());
        }
    }

    proptest! {
        #[test]
        fn test_step_keeps_paddle_inside_board(
            position in -0.7f32..=0.7,
            size in 0.1f32..=0.6,
            speed in -20.0f32..=20.0,
            acceleration in -5.0f32..=5.0,
            delta_t in 0.0f32..=1.5,
        ) {
            let mut paddle = Paddle::new();
            paddle.properties = PaddleProperties { position, size };
            paddle.speed = speed;
            paddle.acceleration = acceleration;
            paddle.step(delta_t);
            let edge = paddle.properties.position.abs() + paddle.properties.size / 2.0;
            prop_assert!(edge <= 1.0 + 1e-4);
            prop_assert!(paddle.properties.position.is_finite());
            prop_assert!(paddle.speed.is_finite());
        }

        #[test]
        fn test_zero_delta_t_never_moves(
            position in -0.7f32..=0.7,
            size in 0.1f32..=0.6,
            speed in -20.0f32..=20.0,
            acceleration in -5.0f32..=5.0,
        ) {
            let mut paddle = Paddle::new();
            paddle.properties = PaddleProperties { position, size };
            paddle.speed = speed;
            paddle.acceleration = acceleration;
            paddle.step(0.0);
            prop_assert_eq!(paddle.properties.position, position);
            prop_assert_eq!(paddle.speed, speed);
        }
    }
}
