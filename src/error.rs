//! Error taxonomy
//!
//! Every variant is terminal for the process: load failures abort the launch,
//! draw and terminal failures end the running game.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// Image asset missing or unreadable
    LoadImage { path: PathBuf, source: io::Error },
    /// Font asset missing or unreadable
    LoadFont { path: PathBuf, source: io::Error },
    /// Text could not be rendered into a texture
    RenderText { text: String, source: io::Error },
    /// A draw, clear or present call failed mid-game
    Draw { what: &'static str, source: io::Error },
    /// Terminal setup or teardown failed
    Terminal(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::LoadImage { path, source } => {
                write!(f, "could not load image {}: {}", path.display(), source)
            }
            GameError::LoadFont { path, source } => {
                write!(f, "could not open font {}: {}", path.display(), source)
            }
            GameError::RenderText { text, source } => {
                write!(f, "could not render text {:?}: {}", text, source)
            }
            GameError::Draw { what, source } => write!(f, "could not draw {}: {}", what, source),
            GameError::Terminal(source) => write!(f, "terminal error: {}", source),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::LoadImage { source, .. }
            | GameError::LoadFont { source, .. }
            | GameError::RenderText { source, .. }
            | GameError::Draw { source, .. }
            | GameError::Terminal(source) => Some(source),
        }
    }
}

impl GameError {
    /// Wrap a draw-path failure with what was being drawn
    pub fn draw(what: &'static str) -> impl FnOnce(io::Error) -> GameError {
        move |source| GameError::Draw { what, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_the_asset() {
        let err = GameError::LoadImage {
            path: PathBuf::from("res/sprites/pipe.sprite"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("res/sprites/pipe.sprite"));
        assert!(msg.contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_draw_context() {
        let err = GameError::draw("bird")(io::Error::other("device lost"));
        assert_eq!(err.to_string(), "could not draw bird: device lost");
    }
}
