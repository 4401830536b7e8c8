//! App: main loop. Render, read a command token, apply it, repeat until the game stops.

use crate::GameConfig;
use crate::game::{GameState, GameStatus};
use crate::glyphs::Glyphs;
use crate::input::{Command, Tokens};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Printed after the final board when the stack reaches the top row.
pub const GAME_OVER_MESSAGE: &str = "Game Over!";

pub struct App<R, W> {
    tokens: Tokens<R>,
    out: W,
    glyphs: Glyphs,
    state: GameState,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Read the board dimensions from `input` and set up an empty game.
    pub fn new(input: R, out: W, config: &GameConfig) -> Result<Self> {
        let mut tokens = Tokens::new(input);
        let (width, height) = tokens.dimensions()?;
        info!(width, height, "new game");
        Ok(Self {
            tokens,
            out,
            glyphs: config.glyphs,
            state: GameState::new(width, height),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self) -> Result<()> {
        while self.state.is_running() {
            self.draw()?;
            let Some(token) = self.tokens.next_token()? else {
                debug!("end of input");
                self.state.exit();
                break;
            };
            match Command::parse(&token) {
                Some(command) => self.apply_command(command)?,
                None => debug!(token = %token, "ignoring unknown command"),
            }
            if self.state.status() == GameStatus::GameOver {
                self.draw()?;
                writeln!(self.out, "{GAME_OVER_MESSAGE}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        debug!(?command, "command");
        match command {
            Command::Exit => self.state.exit(),
            Command::Rotate => self.state.rotate(),
            Command::Left => self.state.move_left(),
            Command::Right => self.state.move_right(),
            Command::Down => self.state.step_down(),
            Command::Piece => match self.tokens.next_token()? {
                Some(symbol) => self.state.spawn_symbol(&symbol),
                None => {
                    debug!("end of input while waiting for a piece identifier");
                    self.state.exit();
                }
            },
            Command::Break => {
                self.state.clear_lines();
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        self.out
            .write_all(self.state.render(&self.glyphs).as_bytes())?;
        Ok(())
    }
}
