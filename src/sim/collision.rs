//! Collision detection between the bird and a pipe
//!
//! Sim space has y growing upward from the floor (y = 0). A normal pipe stands
//! on the floor and leaves its gap above; an inverted pipe hangs from the
//! ceiling and leaves its gap below. Touching edges count as a hit.

use super::pipes::Pipe;
use crate::consts::SCREEN_HEIGHT;

/// Axis-aligned box in sim space (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Bounds {
    /// Box of width `w` starting at `left`, vertically centred on `center_y`
    pub fn centered(left: f32, center_y: f32, w: f32, h: f32) -> Self {
        Self {
            left,
            right: left + w,
            bottom: center_y - h / 2.0,
            top: center_y + h / 2.0,
        }
    }
}

/// Vertical extent of a pipe's solid part
pub fn pipe_solid(pipe: &Pipe) -> (f32, f32) {
    if pipe.inverted {
        (SCREEN_HEIGHT - pipe.h, SCREEN_HEIGHT)
    } else {
        (0.0, pipe.h)
    }
}

/// Whether the bird box overlaps the pipe's solid region
pub fn bird_hits_pipe(bird: &Bounds, pipe: &Pipe) -> bool {
    // Horizontal ranges disjoint
    if pipe.x > bird.right || pipe.x + pipe.w < bird.left {
        return false;
    }

    let (solid_bottom, solid_top) = pipe_solid(pipe);
    if !pipe.inverted && solid_top < bird.bottom {
        // Flying in the gap above
        return false;
    }
    if pipe.inverted && solid_bottom > bird.top {
        // Flying in the gap below
        return false;
    }

    true
}
