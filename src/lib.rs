//! Flapper - a flappy side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (gravity, obstacles, collisions, game mode)
//! - `scene`: Tick/input loop, painting, restart coordination
//! - `shell`: Render/asset shell abstraction and the terminal backend
//! - `input`: Input events fed to the scene
//! - `settings` / `tuning`: Configuration and data-driven game balance

pub mod error;
pub mod input;
pub mod scene;
pub mod settings;
pub mod shell;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use input::InputEvent;
pub use scene::Scene;
pub use settings::{Settings, SettingsSource};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical screen size (y grows downward on screen, upward in the sim)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Fixed simulation period (100 Hz)
    pub const TICK_MS: u64 = 10;

    /// Added to the bird's fall speed every tick
    pub const GRAVITY: f32 = 0.1;
    /// Upward impulse applied by a jump
    pub const JUMP_SPEED: f32 = 5.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 10.0;
    pub const BIRD_SPAWN_Y: f32 = 300.0;
    pub const BIRD_WIDTH: f32 = 50.0;
    pub const BIRD_HEIGHT: f32 = 43.0;
    /// Ticks each animation frame stays on screen
    pub const BIRD_FRAME_TICKS: u64 = 10;
    pub const BIRD_FRAME_COUNT: usize = 4;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_SPAWN_X: f32 = SCREEN_WIDTH;
    /// Pipe heights are drawn from [PIPE_MIN_HEIGHT, PIPE_MAX_HEIGHT)
    pub const PIPE_MIN_HEIGHT: f32 = 100.0;
    pub const PIPE_MAX_HEIGHT: f32 = 150.0;
    /// Horizontal distance every pipe moves per tick
    pub const SCROLL_SPEED: f32 = 1.0;

    /// Wall-clock durations, converted to ticks through `Tuning`
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    pub const GAME_OVER_MS: u64 = 1000;
    pub const TITLE_MS: u64 = 1000;
}
