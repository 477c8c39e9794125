//! Terminal backend for the render shell
//!
//! Logical screen pixels are scaled onto the terminal's cell grid. Draw calls
//! rasterise into an off-screen grid; `present` writes the whole grid out.
//!
//! Asset formats:
//! - `.sprite`: line 1 is the glyph, line 2 the foreground colour (optional),
//!   line 3 the background colour (optional)
//! - `.font`: a single style word, `bold` or `plain`

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::QueueableCommand;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use super::{Canvas, Flip, Rect, Rgba};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// A single-glyph image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub glyph: char,
    pub fg: Color,
    /// `None` keeps whatever background is already in the cell
    pub bg: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TermTexture {
    Sprite(Sprite),
    Text { text: String, fg: Color, bold: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermFont {
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
    bold: bool,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
        bg: Color::Reset,
        bold: false,
    };
}

pub struct TermCanvas<W: Write> {
    out: W,
    /// Follow the real terminal size on every clear
    auto_size: bool,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl<W: Write> TermCanvas<W> {
    /// Canvas sized to the current terminal, resizing with it
    pub fn new(out: W) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::with_size(out, cols, rows);
        canvas.auto_size = true;
        Ok(canvas)
    }

    /// Canvas with a fixed grid size
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            auto_size: false,
            cols,
            rows,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            log::debug!("Terminal resized to {}x{}", cols, rows);
            self.cols = cols;
            self.rows = rows;
        }
        self.cells.clear();
        self.cells.resize(cols as usize * rows as usize, Cell::BLANK);
    }

    /// Map a logical rect to a clipped half-open cell range
    fn cell_span(&self, dest: Option<Rect>) -> (u16, u16, u16, u16) {
        let Some(rect) = dest else {
            return (0, self.cols, 0, self.rows);
        };
        let cols = self.cols as f32;
        let rows = self.rows as f32;
        let clip = |v: f32, max: f32| v.clamp(0.0, max) as u16;
        (
            clip((rect.pos.x * cols / SCREEN_WIDTH).floor(), cols),
            clip((rect.right() * cols / SCREEN_WIDTH).ceil(), cols),
            clip((rect.pos.y * rows / SCREEN_HEIGHT).floor(), rows),
            clip((rect.bottom() * rows / SCREEN_HEIGHT).ceil(), rows),
        )
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> &mut Cell {
        let idx = row as usize * self.cols as usize + col as usize;
        &mut self.cells[idx]
    }

    #[cfg(test)]
    fn glyph_at(&self, col: u16, row: u16) -> char {
        self.cells[row as usize * self.cols as usize + col as usize].ch
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Canvas for TermCanvas<W> {
    type Texture = TermTexture;
    type Font = TermFont;

    fn load_image(&mut self, path: &Path) -> io::Result<TermTexture> {
        let text = fs::read_to_string(path)?;
        parse_sprite(&text).map(TermTexture::Sprite)
    }

    /// Cells have one glyph size, so the point size is not used
    fn load_font(&mut self, path: &Path, _size: u16) -> io::Result<TermFont> {
        let text = fs::read_to_string(path)?;
        parse_font(&text)
    }

    fn render_text(&mut self, font: &TermFont, text: &str, color: Rgba) -> io::Result<TermTexture> {
        if text.chars().any(char::is_control) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "text contains control characters",
            ));
        }
        Ok(TermTexture::Text {
            text: text.to_string(),
            fg: Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            },
            bold: font.bold,
        })
    }

    fn draw(&mut self, texture: &TermTexture, dest: Option<Rect>, flip: Flip) -> io::Result<()> {
        let (c0, c1, r0, r1) = self.cell_span(dest);
        if c0 >= c1 || r0 >= r1 {
            return Ok(());
        }

        match texture {
            TermTexture::Sprite(sprite) => {
                let glyph = match flip {
                    Flip::None => sprite.glyph,
                    Flip::Vertical => flip_glyph(sprite.glyph),
                };
                for row in r0..r1 {
                    for col in c0..c1 {
                        let cell = self.cell_mut(col, row);
                        cell.ch = glyph;
                        cell.fg = sprite.fg;
                        cell.bold = false;
                        if let Some(bg) = sprite.bg {
                            cell.bg = bg;
                        }
                    }
                }
            }
            TermTexture::Text { text, fg, bold } => {
                let row = r0 + (r1 - r0) / 2;
                let width = (c1 - c0) as usize;
                let len = text.chars().count();
                let start = c0 as usize + width.saturating_sub(len) / 2;
                for (i, ch) in text.chars().take(width).enumerate() {
                    let cell = self.cell_mut((start + i) as u16, row);
                    cell.ch = ch;
                    cell.fg = *fg;
                    cell.bold = *bold;
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        let (cols, rows) = if self.auto_size {
            terminal::size()?
        } else {
            (self.cols, self.rows)
        };
        self.resize(cols, rows);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut current: Option<Cell> = None;
        for row in 0..self.rows {
            self.out.queue(MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                let prev = current.unwrap_or(Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg: Color::Reset,
                    bold: !cell.bold,
                });
                if current.is_none() || prev.fg != cell.fg {
                    self.out.queue(SetForegroundColor(cell.fg))?;
                }
                if current.is_none() || prev.bg != cell.bg {
                    self.out.queue(SetBackgroundColor(cell.bg))?;
                }
                if prev.bold != cell.bold {
                    let attr = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    self.out.queue(SetAttribute(attr))?;
                }
                self.out.queue(Print(cell.ch))?;
                current = Some(cell);
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

/// Raw mode, alternate screen and mouse capture for the lifetime of the guard
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout
            .queue(EnterAlternateScreen)?
            .queue(EnableMouseCapture)?
            .queue(Hide)?;
        stdout.flush()?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let screen = stdout
            .queue(Show)
            .and_then(|out| out.queue(DisableMouseCapture))
            .and_then(|out| out.queue(LeaveAlternateScreen))
            .and_then(|out| out.flush());
        if let Err(e) = screen.and(terminal::disable_raw_mode()) {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

fn parse_sprite(text: &str) -> io::Result<Sprite> {
    let mut lines = text.lines();
    let glyph = lines
        .next()
        .and_then(|line| line.chars().next())
        .ok_or_else(|| invalid("sprite has no glyph"))?;
    let fg = match lines.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => parse_color(name)?,
        None => Color::White,
    };
    let bg = match lines.next().map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => Some(parse_color(name)?),
        None => None,
    };
    Ok(Sprite { glyph, fg, bg })
}

fn parse_font(text: &str) -> io::Result<TermFont> {
    match text.lines().next().map(str::trim) {
        Some("bold") => Ok(TermFont { bold: true }),
        Some("plain") => Ok(TermFont { bold: false }),
        _ => Err(invalid("font style must be `bold` or `plain`")),
    }
}

fn parse_color(name: &str) -> io::Result<Color> {
    if let Some(hex) = name.strip_prefix('#') {
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| invalid("bad hex colour"))
        };
        if hex.len() != 6 {
            return Err(invalid("bad hex colour"));
        }
        return Ok(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }

    let color = match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "reset" => Color::Reset,
        _ => return Err(invalid("unknown colour name")),
    };
    Ok(color)
}

/// Mirror glyphs that point up or down
fn flip_glyph(glyph: char) -> char {
    match glyph {
        '^' => 'v',
        'v' => '^',
        '/' => '\\',
        '\\' => '/',
        '▀' => '▄',
        '▄' => '▀',
        other => other,
    }
}

fn invalid(msg: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}
