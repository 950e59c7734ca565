//! Runtime configuration
//!
//! Loaded from an optional JSON file; anything missing or malformed falls
//! back to defaults so a bare `tui-breakout` always starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_RATE, STEPS_PER_FRAME};

/// Runtime options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Balls available per session
    pub lives: u8,
    /// Session seed; drawn from the clock when absent
    pub seed: Option<u64>,
    /// Rendered frames per second
    pub frame_rate: u32,
    /// Simulation sub-steps per frame
    pub steps_per_frame: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lives: 3,
            seed: None,
            frame_rate: FRAME_RATE,
            steps_per_frame: STEPS_PER_FRAME,
        }
    }
}

impl Config {
    /// Environment variable naming an alternate config path
    const PATH_ENV: &'static str = "TUI_BREAKOUT_CONFIG";
    /// Config file looked up in the working directory
    const DEFAULT_PATH: &'static str = "tui-breakout.json";

    /// Load the config file, falling back to defaults
    pub fn load() -> Self {
        let path =
            std::env::var(Self::PATH_ENV).unwrap_or_else(|_| Self::DEFAULT_PATH.to_string());
        let config = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Config>(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(err) => {
                    log::warn!("Ignoring malformed config {path}: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default config");
                Self::default()
            }
        };
        config.sanitized()
    }

    /// Replace unusable values with their defaults
    fn sanitized(mut self) -> Self {
        if self.lives == 0 {
            log::warn!("lives must be at least 1, using default");
            self.lives = Self::default().lives;
        }
        if self.frame_rate == 0 {
            log::warn!("frame_rate must be at least 1, using default");
            self.frame_rate = Self::default().frame_rate;
        }
        if self.steps_per_frame == 0 {
            log::warn!("steps_per_frame must be at least 1, using default");
            self.steps_per_frame = Self::default().steps_per_frame;
        }
        self
    }

    /// Simulation tick length; the sub-steps partition one time unit per
    /// frame
    pub fn step_dt(&self) -> f32 {
        1.0 / self.steps_per_frame as f32
    }

    /// Wall-clock budget of one rendered frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }

    /// Seed for this session, from the config or the clock
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lives, 3);
        assert_eq!(config.seed, None);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.steps_per_frame, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"lives": 5}"#).unwrap();
        assert_eq!(config.lives, 5);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.steps_per_frame, 10);
    }

    #[test]
    fn test_sanitize_replaces_zeros() {
        let config = Config {
            lives: 0,
            seed: Some(1),
            frame_rate: 0,
            steps_per_frame: 0,
        }
        .sanitized();
        assert_eq!(config.lives, 3);
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.steps_per_frame, 10);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_step_dt_partitions_frame() {
        let config = Config::default();
        assert!((config.step_dt() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_session_seed_prefers_config() {
        let config = Config {
            seed: Some(99),
            ..Config::default()
        };
        assert_eq!(config.session_seed(), 99);
    }
}
