//! Terminal Breakout runner.
//!
//! Crossterm input plus the framebuffer diff renderer; the simulation
//! advances in fixed sub-steps, several per rendered frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tui_breakout::Config;
use tui_breakout::consts::PADDLE_ACCELERATION;
use tui_breakout::sim::{GamePhase, GameSimulation, GameStatus, Obstacle, Rgb};
use tui_breakout::term::{BoardView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load();
    let seed = config.session_seed();
    log::info!("tui-breakout starting, session seed {seed}");

    let mut layout_rng = Pcg32::seed_from_u64(seed);
    let obstacles = standard_layout(&mut layout_rng);
    let mut sim = GameSimulation::new(obstacles, config.lives, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut sim, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let status = result?;
    match status.phase {
        GamePhase::Won => println!("Player has won the game with score: {}", status.score),
        GamePhase::Lost => println!("Player has lost the game with score: {}", status.score),
        GamePhase::Ended => println!("Player has ended the game"),
        _ => println!("Game has ended unexpectedly."),
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    sim: &mut GameSimulation,
    config: &Config,
) -> Result<GameStatus> {
    let view = BoardView::default();
    let frame_duration = config.frame_duration();
    let step_dt = config.step_dt();
    let mut last_frame = Instant::now();

    while !sim.status().phase.is_terminal() {
        // Render.
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(sim, Viewport::new(width, height));
        term.draw(fb)?;

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => sim.end_session(),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            sim.end_session()
                        }
                        KeyCode::Char(' ') => sim.serve(),
                        KeyCode::Left => sim.set_paddle_acceleration(-PADDLE_ACCELERATION),
                        KeyCode::Right => sim.set_paddle_acceleration(PADDLE_ACCELERATION),
                        KeyCode::Down => sim.set_paddle_speed(0.0),
                        _ => {}
                    },
                    KeyEventKind::Release => {}
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Frame: a batch of fixed sub-steps, then the per-frame
        // acceleration reset so steering needs a fresh key each frame.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            for _ in 0..config.steps_per_frame {
                sim.step(step_dt);
            }
            sim.set_paddle_acceleration(0.0);
        }
    }

    Ok(sim.status())
}

/// The 7x4 opening board: standard obstacles with random colors, one
/// speed boost and one paddle grow mixed in at fixed grid slots.
fn standard_layout(rng: &mut impl Rng) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(7 * 4);
    for i in 0..7 {
        for j in 0..4 {
            let position = Vec2::new(-0.85 + 0.25 * i as f32, -0.85 + 0.25 * j as f32);
            let size = Vec2::new(0.2, 0.2);
            let obstacle = match (i, j) {
                (3, 1) => Obstacle::speed_boost(position, size),
                (3, 3) => Obstacle::paddle_grow(position, size),
                _ => Obstacle::standard(
                    position,
                    size,
                    Rgb::new(rng.random(), rng.random(), rng.random()),
                ),
            };
            obstacles.push(obstacle);
        }
    }
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_breakout::sim::ObstacleKind;

    #[test]
    fn test_standard_layout_composition() {
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacles = standard_layout(&mut rng);
        assert_eq!(obstacles.len(), 28);

        let boosts = obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::SpeedBoost)
            .count();
        let grows = obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::PaddleGrow)
            .count();
        assert_eq!(boosts, 1);
        assert_eq!(grows, 1);

        // Grid corners per the fixed spacing.
        assert_eq!(obstacles[0].properties.position, Vec2::new(-0.85, -0.85));
        let last = obstacles.last().unwrap();
        assert!((last.properties.position.x - 0.65).abs() < 1e-6);
        assert!((last.properties.position.y + 0.1).abs() < 1e-6);
    }
}
