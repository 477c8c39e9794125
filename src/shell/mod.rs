//! Render/asset shell
//!
//! The game only needs to load images and fonts, turn text into a texture,
//! and copy textures into rects. Backends implement `Canvas`; coordinates are
//! logical screen pixels (800x600, y down).

pub mod term;

#[cfg(test)]
pub mod headless;

use std::io;
use std::path::Path;

use glam::Vec2;

pub use term::TermCanvas;

/// Destination rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// How a texture is mirrored when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Vertical,
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Title and game-over text colour
pub const TITLE_COLOR: Rgba = Rgba::new(255, 100, 0, 255);

/// Drawing and asset primitives provided by a backend
pub trait Canvas {
    type Texture: Send + 'static;
    type Font: Send + 'static;

    fn load_image(&mut self, path: &Path) -> io::Result<Self::Texture>;
    fn load_font(&mut self, path: &Path, size: u16) -> io::Result<Self::Font>;
    fn render_text(
        &mut self,
        font: &Self::Font,
        text: &str,
        color: Rgba,
    ) -> io::Result<Self::Texture>;

    /// Copy a texture into `dest` (`None` = whole screen)
    fn draw(&mut self, texture: &Self::Texture, dest: Option<Rect>, flip: Flip) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}
