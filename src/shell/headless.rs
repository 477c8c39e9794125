//! Recording canvas for tests
//!
//! Textures are just labels; every call is appended to a shared log so a test
//! can inspect what the scene painted after handing the canvas away.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::{Canvas, Flip, Rect, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    Draw {
        texture: String,
        dest: Option<Rect>,
        flip: Flip,
    },
    Present,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessCanvas {
    calls: Arc<Mutex<Vec<Call>>>,
    /// Paths that fail to load
    missing: Vec<String>,
    /// Fail every draw once this many have succeeded
    fail_after_draws: Option<usize>,
    draws: usize,
}

impl HeadlessCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.push(path.to_string());
        self
    }

    pub fn failing_after(mut self, draws: usize) -> Self {
        self.fail_after_draws = Some(draws);
        self
    }

    /// Shared handle to the call log
    pub fn log(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_missing(&self, path: &Path) -> io::Result<String> {
        let label = path.to_string_lossy().into_owned();
        if self.missing.contains(&label) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "missing asset"));
        }
        Ok(label)
    }
}

impl Canvas for HeadlessCanvas {
    type Texture = String;
    type Font = String;

    fn load_image(&mut self, path: &Path) -> io::Result<String> {
        self.check_missing(path)
    }

    fn load_font(&mut self, path: &Path, _size: u16) -> io::Result<String> {
        self.check_missing(path)
    }

    fn render_text(&mut self, _font: &String, text: &str, _color: Rgba) -> io::Result<String> {
        Ok(format!("text:{}", text))
    }

    fn draw(&mut self, texture: &String, dest: Option<Rect>, flip: Flip) -> io::Result<()> {
        if self.fail_after_draws.is_some_and(|limit| self.draws >= limit) {
            return Err(io::Error::other("renderer lost"));
        }
        self.draws += 1;
        self.record(Call::Draw {
            texture: texture.clone(),
            dest,
            flip,
        });
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.record(Call::Clear);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.record(Call::Present);
        Ok(())
    }
}
