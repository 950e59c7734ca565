//! Ball: a moving circle with exact sub-step collision accounting
//!
//! Each step predicts the end-of-tick position, then resolves at most one
//! contact: obstacles are checked before the board area (walls and
//! paddle). A resolved contact moves the ball to the contact point and
//! reports the tick time still unspent, so the caller can replay it.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{distance_to_segment, reflect};
use super::state::{BallProperties, CollisionInfo, Obstacle, ObstacleId, PaddleProperties};
use crate::consts::DEFAULT_BALL_SPEED;

/// The ball in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub(crate) properties: BallProperties,
    pub(crate) speed: f32,
    /// Unit travel direction; zero until the first serve
    pub(crate) direction: Vec2,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            properties: BallProperties::default(),
            speed: 0.0,
            direction: Vec2::ZERO,
        }
    }

    /// Advance the ball by `delta_t`, resolving at most one contact
    ///
    /// Returns the contact report, or `None` when the tick completed
    /// without one. A bottom exit is not a contact; the ball just leaves.
    pub fn step(
        &mut self,
        delta_t: f32,
        obstacles: &mut BTreeMap<ObstacleId, Obstacle>,
        paddle: PaddleProperties,
    ) -> Option<CollisionInfo> {
        let predicted = self.properties.position + delta_t * self.speed * self.direction;

        if let Some(info) = self.obstacles_collide(predicted, obstacles) {
            return Some(info);
        }
        self.area_collide(predicted, paddle)
    }

    /// Put the ball in play: default speed, random heading, epsilon nudge
    /// off the spawn point so it never starts exactly in contact
    pub fn spawn(&mut self, position: Vec2, rng: &mut impl Rng) {
        self.speed = DEFAULT_BALL_SPEED;
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        self.direction = Vec2::from_angle(angle);
        self.properties.position = position + self.direction * f32::EPSILON;
    }

    /// Additive speed change from a collision effect
    pub fn change_speed_by(&mut self, delta: f32) {
        self.speed += delta;
    }

    pub fn properties(&self) -> BallProperties {
        self.properties
    }

    /// Tick time not yet spent once the ball sits at the contact point
    ///
    /// Zero speed means the tick is fully consumed; there is no meaningful
    /// residual to replay.
    fn remaining_time(&self, predicted: Vec2) -> f32 {
        if self.speed == 0.0 {
            return 0.0;
        }
        (predicted - self.properties.position).length() / self.speed
    }

    /// First obstacle (in id order) the predicted position touches
    ///
    /// Removes the struck obstacle and returns its effect with the
    /// remaining time filled in. At most one obstacle per invocation.
    fn obstacles_collide(
        &mut self,
        predicted: Vec2,
        obstacles: &mut BTreeMap<ObstacleId, Obstacle>,
    ) -> Option<CollisionInfo> {
        let mut hit = None;
        for (&id, obstacle) in obstacles.iter() {
            let rect_min = obstacle.properties.position;
            let rect_max = rect_min + obstacle.properties.size;
            let nearest = predicted.clamp(rect_min, rect_max);

            let to_obstacle = nearest - predicted;
            let mut overlap = self.properties.radius - to_obstacle.length();
            if overlap.is_nan() {
                // Touching, not penetrating
                overlap = 0.0;
            }
            if overlap >= 0.0 {
                hit = Some((id, to_obstacle, overlap));
                break;
            }
        }
        let (id, to_obstacle, overlap) = hit?;

        // A center exactly on the nearest point has no usable normal; the
        // direction is left unchanged and the push-out collapses to zero.
        let normal = to_obstacle.normalize_or_zero();
        self.direction = reflect(self.direction, normal);
        self.properties.position = predicted - normal * overlap;

        let removed = obstacles.remove(&id);
        debug_assert!(removed.is_some(), "struck obstacle vanished from the map");
        let mut info = removed?.collision_info();
        info.new_delta_t = self.remaining_time(predicted);
        Some(info)
    }

    /// Walls and paddle, checked in that order; a miss commits the
    /// predicted position
    fn area_collide(
        &mut self,
        predicted: Vec2,
        paddle: PaddleProperties,
    ) -> Option<CollisionInfo> {
        let radius = self.properties.radius;
        let edge_x = predicted.x + radius.copysign(predicted.x);
        let edge_y = predicted.y + radius.copysign(predicted.y);

        // Side bounce
        if edge_x.abs() >= 1.0 {
            self.properties.position = Vec2::new((1.0 - radius).copysign(edge_x), predicted.y);
            self.direction = reflect(self.direction, Vec2::new(-1.0, 0.0));
            return Some(CollisionInfo {
                new_delta_t: self.remaining_time(predicted),
                ..CollisionInfo::default()
            });
        }

        // Top bounce
        if edge_y <= -1.0 {
            self.properties.position = Vec2::new(predicted.x, -1.0 + radius);
            self.direction = reflect(self.direction, Vec2::new(0.0, -1.0));
            return Some(CollisionInfo {
                new_delta_t: self.remaining_time(predicted),
                ..CollisionInfo::default()
            });
        }

        // Paddle bounce
        let half_span = paddle.size / 2.0;
        if edge_y >= 1.0
            && distance_to_segment(
                Vec2::new(paddle.position - half_span, 1.0),
                Vec2::new(paddle.position + half_span, 1.0),
                predicted,
            ) < radius
        {
            self.properties.position = Vec2::new(predicted.x, 1.0 - radius);
            self.direction = reflect(self.direction, Vec2::new(0.0, -1.0));
            return Some(CollisionInfo {
                new_delta_t: self.remaining_time(predicted),
                ..CollisionInfo::default()
            });
        }

        self.properties.position = predicted;
        None
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}
