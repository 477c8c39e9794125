//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one step. Time only moves through here, so
//! tests drive the pause and restart by counting ticks.

use super::state::{GameEvent, GameMode, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump before the physics step
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<GameEvent> {
    state.time_ticks += 1;

    match state.mode {
        GameMode::Playing => {
            if input.jump {
                state.bird.jump();
            }
            state.pipes.spawn_tick();
            step(state);

            if state.bird.is_dead() {
                state.deaths += 1;
                state.mode = GameMode::GameOverPause {
                    remaining_ticks: state.rules.game_over_ticks,
                };
                log::debug!(
                    "Bird died at tick {} (y={:.1}, {} pipes)",
                    state.time_ticks,
                    state.bird.y,
                    state.pipes.len()
                );
                return Some(GameEvent::Died);
            }
            None
        }
        GameMode::GameOverPause { remaining_ticks } => {
            let remaining_ticks = remaining_ticks.saturating_sub(1);
            state.mode = if remaining_ticks == 0 {
                GameMode::Restarting
            } else {
                GameMode::GameOverPause { remaining_ticks }
            };
            None
        }
        GameMode::Restarting => {
            state.restart();
            log::info!("Restarted (run {})", state.deaths + 1);
            Some(GameEvent::Restarted)
        }
    }
}

/// Bird, then pipes, then collisions against the new positions
pub fn step(state: &mut GameState) {
    state.bird.update();
    state.pipes.update();
    state.pipes.touch(&mut state.bird);
}
