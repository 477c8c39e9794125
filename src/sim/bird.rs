//! The player's bird
//!
//! Falls under gravity, jumps on input, dies on the floor or on a pipe.

use glam::Vec2;

use super::collision::{Bounds, bird_hits_pipe};
use super::pipes::Pipe;
use crate::consts::*;
use crate::shell::Rect;

/// The player-controlled bird
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Ticks since creation (drives the flap animation)
    pub time: u64,
    /// Fixed horizontal position of the left edge
    pub x: f32,
    /// Height of the centre above the floor
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Fall speed (positive = falling, negative = rising)
    pub speed: f32,
    pub dead: bool,
    gravity: f32,
    jump_speed: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new(GRAVITY, JUMP_SPEED)
    }
}

impl Bird {
    pub fn new(gravity: f32, jump_speed: f32) -> Self {
        Self {
            time: 0,
            x: BIRD_X,
            y: BIRD_SPAWN_Y,
            w: BIRD_WIDTH,
            h: BIRD_HEIGHT,
            speed: 0.0,
            dead: false,
            gravity,
            jump_speed,
        }
    }

    /// Advance one tick: move, bounce off the floor (fatal), then accelerate
    pub fn update(&mut self) {
        self.time += 1;
        self.y -= self.speed;
        if self.y < 0.0 {
            self.y = 0.0;
            self.speed = -self.speed;
            self.dead = true;
        }
        self.speed += self.gravity;
    }

    /// Replace the current speed with the upward jump impulse
    pub fn jump(&mut self) {
        self.speed = -self.jump_speed;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Back to the spawn height, at rest and alive
    pub fn restart(&mut self) {
        self.y = BIRD_SPAWN_Y;
        self.speed = 0.0;
        self.dead = false;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.x, self.y, self.w, self.h)
    }

    /// Mark dead if the bird overlaps the pipe's solid part
    pub fn touch(&mut self, pipe: &Pipe) {
        if bird_hits_pipe(&self.bounds(), pipe) {
            self.dead = true;
        }
    }

    /// Animation frame to show, cycling every `BIRD_FRAME_TICKS`
    pub fn frame_index(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        ((self.time / BIRD_FRAME_TICKS) % frame_count as u64) as usize
    }

    /// Destination rect in screen space (y down)
    pub fn dest_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, SCREEN_HEIGHT - self.y - self.h / 2.0),
            Vec2::new(self.w, self.h),
        )
    }
}
