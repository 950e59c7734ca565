//! Single owner of a game session
//!
//! `GameSimulation` holds the paddle, ball, obstacle map, counters, and
//! the session RNG. External code reads by-value snapshots and mutates
//! only through the narrow intent surface (`serve`, `end_session`, the
//! paddle inputs); `step` is the one place state advances.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::paddle::Paddle;
use super::state::{
    BallProperties, CollisionInfo, GamePhase, GameStatus, Obstacle, ObstacleId,
    ObstacleProperties, PaddleProperties,
};

#[derive(Debug, Clone)]
pub struct GameSimulation {
    status: GameStatus,
    paddle: Paddle,
    ball: Ball,
    obstacles: BTreeMap<ObstacleId, Obstacle>,
    rng: Pcg32,
}

impl GameSimulation {
    /// Start a session in `WaitingForPlayer` with the given board
    ///
    /// Obstacle ids are issued here, in supply order; the map never grows
    /// afterward, so ids are unique for the whole session.
    pub fn new(obstacles: Vec<Obstacle>, lives: u8, seed: u64) -> Self {
        let obstacles = obstacles
            .into_iter()
            .enumerate()
            .map(|(raw, obstacle)| (ObstacleId::new(raw as u64), obstacle))
            .collect();
        Self {
            status: GameStatus { balls: lives, ..GameStatus::default() },
            paddle: Paddle::new(),
            ball: Ball::new(),
            obstacles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Advance the session by one tick
    ///
    /// The paddle moves in every phase. While `Running`, the ball's tick
    /// is replayed collision by collision: each contact report spends part
    /// of the tick and its effects apply before the remainder runs, so a
    /// mid-tick paddle grow already counts for the next contact.
    pub fn step(&mut self, delta_t: f32) {
        self.paddle.step(delta_t);

        if self.status.phase != GamePhase::Running {
            return;
        }

        let mut remaining = delta_t;
        while remaining > 0.0 {
            match self
                .ball
                .step(remaining, &mut self.obstacles, self.paddle.properties())
            {
                Some(info) => {
                    self.apply_collision_effects(info);
                    remaining = info.new_delta_t;
                }
                None => break,
            }
        }

        self.evaluate_game_conditions();
    }

    /// Put the ball in play from `WaitingForPlayer`; no-op elsewhere
    ///
    /// The ball spawns on the paddle row, one radius above it, centered on
    /// the paddle's current position.
    pub fn serve(&mut self) {
        if self.status.phase != GamePhase::WaitingForPlayer {
            return;
        }
        let spawn = Vec2::new(
            self.paddle.properties().position,
            1.0 - self.ball.properties().radius,
        );
        self.ball.spawn(spawn, &mut self.rng);
        self.status.phase = GamePhase::Running;
    }

    /// Abort the session; sticky once any terminal phase is reached
    pub fn end_session(&mut self) {
        if !self.status.phase.is_terminal() {
            self.status.phase = GamePhase::Ended;
        }
    }

    pub fn set_paddle_acceleration(&mut self, acceleration: f32) {
        self.paddle.set_acceleration(acceleration);
    }

    pub fn set_paddle_speed(&mut self, speed: f32) {
        self.paddle.set_speed(speed);
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn paddle(&self) -> PaddleProperties {
        self.paddle.properties()
    }

    pub fn ball(&self) -> BallProperties {
        self.ball.properties()
    }

    /// Surviving obstacles in id order
    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleId, &ObstacleProperties)> {
        self.obstacles
            .iter()
            .map(|(&id, obstacle)| (id, &obstacle.properties))
    }

    pub fn obstacles_remaining(&self) -> usize {
        self.obstacles.len()
    }

    fn apply_collision_effects(&mut self, info: CollisionInfo) {
        self.status.score += u64::from(info.points);
        self.paddle.change_size_by(info.paddle_size);
        self.ball.change_speed_by(info.ball_speed);
    }

    /// End-of-tick phase transitions
    ///
    /// The bottom-exit check runs first and can leave `Running`, which
    /// makes a same-tick ball loss take precedence over a same-tick board
    /// clear.
    fn evaluate_game_conditions(&mut self) {
        if self.status.phase == GamePhase::Running && self.ball.properties().position.y >= 1.0 {
            self.status.balls = self.status.balls.saturating_sub(1);
            self.status.phase = if self.status.balls > 0 {
                GamePhase::WaitingForPlayer
            } else {
                GamePhase::Lost
            };
        }

        if self.status.phase == GamePhase::Running && self.obstacles.is_empty() {
            self.status.phase = GamePhase::Won;
        }
    }
}
