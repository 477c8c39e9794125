//! Game state and the death/pause/restart mode machine

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::pipes::PipeField;
use crate::tuning::Rules;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Normal play: physics, spawning and collisions run every tick
    Playing,
    /// Bird died; simulation frozen while "Game Over" is shown
    GameOverPause { remaining_ticks: u32 },
    /// Pause elapsed; the next tick resets bird and pipes
    Restarting,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Died,
    Restarted,
}

/// Everything the simulation owns
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rules: Rules,
    pub mode: GameMode,
    pub bird: Bird,
    pub pipes: PipeField,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Completed runs (deaths) since start
    pub deaths: u32,
}

impl GameState {
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rules,
            mode: GameMode::Playing,
            bird: Bird::new(rules.gravity, rules.jump_speed),
            pipes: PipeField::new(
                rules.scroll_speed,
                rules.spawn_interval_ticks,
                Pcg32::seed_from_u64(seed),
            ),
            time_ticks: 0,
            deaths: 0,
        }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self.mode, GameMode::Playing)
    }

    /// Reset bird and pipes, back to play
    pub fn restart(&mut self) {
        self.bird.restart();
        self.pipes.restart();
        self.mode = GameMode::Playing;
    }
}
