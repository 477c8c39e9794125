//! Data-driven game balance
//!
//! `Tuning` is what the settings file carries (durations in milliseconds).
//! `Rules` is what the simulation consumes (durations in ticks).

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs exposed to the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fall speed added per tick
    pub gravity: f32,
    /// Upward speed set by a jump
    pub jump_speed: f32,
    /// Pipe movement per tick
    pub scroll_speed: f32,
    /// Time between pipe spawns
    pub spawn_interval_ms: u64,
    /// How long "Game Over" stays up before the restart
    pub game_over_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            scroll_speed: SCROLL_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            game_over_ms: GAME_OVER_MS,
        }
    }
}

impl Tuning {
    /// Resolve millisecond durations against the tick period
    pub fn rules(&self, tick_ms: u64) -> Rules {
        Rules {
            gravity: self.gravity,
            jump_speed: self.jump_speed,
            scroll_speed: self.scroll_speed,
            spawn_interval_ticks: ms_to_ticks(self.spawn_interval_ms, tick_ms),
            game_over_ticks: ms_to_ticks(self.game_over_ms, tick_ms),
        }
    }
}

/// Simulation parameters, all time in ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub gravity: f32,
    pub jump_speed: f32,
    pub scroll_speed: f32,
    pub spawn_interval_ticks: u32,
    pub game_over_ticks: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Tuning::default().rules(TICK_MS)
    }
}

/// Round up so a non-zero duration never collapses to zero ticks
fn ms_to_ticks(ms: u64, tick_ms: u64) -> u32 {
    let tick_ms = tick_ms.max(1);
    let ticks = ms.div_ceil(tick_ms).max(1);
    u32::try_from(ticks).unwrap_or(u32::MAX)
}
