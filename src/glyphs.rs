//! Render glyphs: the symbols a board dump is drawn with.

use crate::game::Cell;
use thiserror::Error;

pub const DEFAULT_FILLED: char = '0';
pub const DEFAULT_EMPTY: char = '-';

/// Filled and empty cell symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub filled: char,
    pub empty: char,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlyphError {
    #[error("glyph must be a visible character, got {0:?}")]
    Invisible(char),
    #[error("filled and empty glyphs must differ, both are {0:?}")]
    Indistinct(char),
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            filled: DEFAULT_FILLED,
            empty: DEFAULT_EMPTY,
        }
    }
}

impl Glyphs {
    /// Whitespace or control glyphs would break the space-separated row format.
    pub fn new(filled: char, empty: char) -> Result<Self, GlyphError> {
        for glyph in [filled, empty] {
            if glyph.is_whitespace() || glyph.is_control() {
                return Err(GlyphError::Invisible(glyph));
            }
        }
        if filled == empty {
            return Err(GlyphError::Indistinct(filled));
        }
        Ok(Self { filled, empty })
    }

    #[inline]
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => self.empty,
            Cell::Filled => self.filled,
        }
    }
}
