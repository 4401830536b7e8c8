//! Textrix: text-driven falling-block puzzle. Command tokens in, board dumps out.

pub mod app;
pub mod game;
pub mod glyphs;
pub mod input;

pub use app::{App, GAME_OVER_MESSAGE};
pub use game::{Board, Cell, GameState, GameStatus, Piece, PieceKind};
pub use glyphs::{GlyphError, Glyphs};
pub use input::{Command, InputError, Tokens};

/// Options derived from CLI that affect how the game is drawn.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub glyphs: Glyphs,
}
