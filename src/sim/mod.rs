//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies beyond draw-rect geometry

pub mod bird;
pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use collision::{Bounds, bird_hits_pipe};
pub use pipes::{Pipe, PipeField};
pub use state::{GameEvent, GameMode, GameState};
pub use tick::{TickInput, step, tick};
