//! Pipes and the scrolling field that owns them
//!
//! Pipes spawn off-screen right, scroll left at a shared speed and are retired
//! once their right edge reaches the left boundary. The field keeps them in
//! spawn order, which is also left-to-right screen order.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use crate::consts::*;
use crate::shell::{Flip, Rect};

/// A single pipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Height of the solid part, fixed at spawn
    pub h: f32,
    pub w: f32,
    /// Hangs from the ceiling instead of standing on the floor
    pub inverted: bool,
}

impl Pipe {
    /// A fresh pipe at the right edge with random height and orientation
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            x: PIPE_SPAWN_X,
            h: rng.random_range(PIPE_MIN_HEIGHT..PIPE_MAX_HEIGHT).floor(),
            w: PIPE_WIDTH,
            inverted: rng.random_bool(0.5),
        }
    }

    /// Still at least partially on screen
    pub fn is_visible(&self) -> bool {
        self.x + self.w > 0.0
    }

    /// Destination rect (y down) and flip for drawing
    pub fn dest_rect(&self) -> (Rect, Flip) {
        if self.inverted {
            (
                Rect::new(Vec2::new(self.x, 0.0), Vec2::new(self.w, self.h)),
                Flip::Vertical,
            )
        } else {
            (
                Rect::new(
                    Vec2::new(self.x, SCREEN_HEIGHT - self.h),
                    Vec2::new(self.w, self.h),
                ),
                Flip::None,
            )
        }
    }
}

/// All active pipes plus the spawn countdown
#[derive(Debug, Clone)]
pub struct PipeField {
    pipes: Vec<Pipe>,
    speed: f32,
    /// Ticks between spawns
    spawn_interval: u32,
    /// Ticks until the next spawn (0 = spawn on the next tick)
    spawn_countdown: u32,
    rng: Pcg32,
}

impl PipeField {
    pub fn new(speed: f32, spawn_interval: u32, rng: Pcg32) -> Self {
        Self {
            pipes: Vec::new(),
            speed,
            spawn_interval: spawn_interval.max(1),
            spawn_countdown: 0,
            rng,
        }
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }

    /// Append a new random pipe at the tail
    pub fn spawn(&mut self) {
        let pipe = Pipe::random(&mut self.rng);
        log::debug!(
            "Spawned pipe h={} inverted={} ({} active)",
            pipe.h,
            pipe.inverted,
            self.pipes.len() + 1
        );
        self.pipes.push(pipe);
    }

    /// Append a specific pipe (used for scripted layouts)
    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    /// Count down one tick; spawn when the countdown runs out.
    /// Returns true if a pipe was spawned.
    pub fn spawn_tick(&mut self) -> bool {
        if self.spawn_countdown > 0 {
            self.spawn_countdown -= 1;
            return false;
        }
        self.spawn();
        self.spawn_countdown = self.spawn_interval - 1;
        true
    }

    /// Scroll every pipe left, then keep only the visible ones in order
    pub fn update(&mut self) {
        let speed = self.speed;
        let before = self.pipes.len();
        self.pipes = self
            .pipes
            .drain(..)
            .map(|mut pipe| {
                pipe.x -= speed;
                pipe
            })
            .filter(Pipe::is_visible)
            .collect();

        let retired = before - self.pipes.len();
        if retired > 0 {
            log::trace!("Retired {} pipe(s)", retired);
        }
    }

    /// Kill the bird if it overlaps any pipe
    pub fn touch(&self, bird: &mut Bird) {
        for pipe in &self.pipes {
            bird.touch(pipe);
            if bird.is_dead() {
                break;
            }
        }
    }

    /// Drop every pipe, leaving the spawn countdown alone
    pub fn clear(&mut self) {
        self.pipes.clear();
    }

    /// Drop every pipe and spawn again on the next tick
    pub fn restart(&mut self) {
        self.clear();
        self.spawn_countdown = 0;
    }
}
