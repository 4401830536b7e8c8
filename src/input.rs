//! Command tokens: board dimensions and per-turn commands from a line-oriented source.

use std::collections::VecDeque;
use std::io::BufRead;
use thiserror::Error;

/// Command named by one input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Rotate,
    Left,
    Right,
    Down,
    /// Spawn; the piece identifier is the next token.
    Piece,
    /// Clear full rows.
    Break,
}

impl Command {
    /// Map a token to a command. Unknown tokens give None and are skipped by the caller.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "exit" => Some(Self::Exit),
            "rotate" => Some(Self::Rotate),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "down" => Some(Self::Down),
            "piece" => Some(Self::Piece),
            "break" => Some(Self::Break),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended before the board {0} was given")]
    MissingDimension(&'static str),
    #[error("board {name} must be a positive integer up to {max}, got {token:?}", max = u16::MAX)]
    InvalidDimension { name: &'static str, token: String },
}

/// Whitespace-separated tokens read lazily, one line at a time.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or None at end of input. Blank lines are skipped.
    pub fn next_token(&mut self) -> Result<Option<String>, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }

    /// Board width then height.
    pub fn dimensions(&mut self) -> Result<(u16, u16), InputError> {
        let width = self.dimension("width")?;
        let height = self.dimension("height")?;
        Ok((width, height))
    }

    fn dimension(&mut self, name: &'static str) -> Result<u16, InputError> {
        let token = self
            .next_token()?
            .ok_or(InputError::MissingDimension(name))?;
        match token.parse::<u16>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(InputError::InvalidDimension { name, token }),
        }
    }
}
