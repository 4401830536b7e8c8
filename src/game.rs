//! Game state: board, active piece, collision, landing, line clear.

use crate::glyphs::Glyphs;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// One rotation state: 4 cells as (dx, dy) from the anchor, inside a 4x4 box.
pub type Shape = [(i32, i32); 4];

/// Tetromino kinds (O, I, S, Z, L, J, T).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [Self::O, Self::I, Self::S, Self::Z, Self::L, Self::J, Self::T];

    /// Parse a piece identifier token. Only the exact upper-case letter matches.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "O" => Some(Self::O),
            "I" => Some(Self::I),
            "S" => Some(Self::S),
            "Z" => Some(Self::Z),
            "L" => Some(Self::L),
            "J" => Some(Self::J),
            "T" => Some(Self::T),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::O => 'O',
            Self::I => 'I',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::L => 'L',
            Self::J => 'J',
            Self::T => 'T',
        }
    }

    /// Rotation states in the order `rotate` cycles through them.
    pub fn rotations(&self) -> &'static [Shape] {
        match self {
            Self::O => &[[(1, 0), (1, 1), (2, 1), (2, 0)]],
            Self::I => &[
                [(1, 0), (1, 1), (1, 2), (1, 3)],
                [(0, 0), (1, 0), (2, 0), (3, 0)],
            ],
            Self::S => &[
                [(1, 0), (2, 0), (1, 1), (0, 1)],
                [(1, 0), (1, 1), (2, 1), (2, 2)],
            ],
            Self::Z => &[
                [(1, 0), (2, 0), (2, 1), (3, 1)],
                [(2, 0), (2, 1), (1, 1), (1, 2)],
            ],
            Self::L => &[
                [(1, 0), (1, 1), (1, 2), (2, 2)],
                [(2, 0), (2, 1), (1, 1), (0, 1)],
                [(1, 0), (2, 0), (2, 1), (2, 2)],
                [(3, 0), (2, 0), (1, 0), (1, 1)],
            ],
            Self::J => &[
                [(2, 0), (2, 1), (2, 2), (1, 2)],
                [(2, 1), (2, 0), (1, 0), (0, 0)],
                [(2, 0), (1, 0), (1, 1), (1, 2)],
                [(1, 0), (1, 1), (2, 1), (3, 1)],
            ],
            Self::T => &[
                [(1, 0), (1, 1), (1, 2), (2, 1)],
                [(1, 0), (0, 1), (1, 1), (2, 1)],
                [(2, 0), (2, 1), (2, 2), (1, 1)],
                [(1, 0), (2, 0), (3, 0), (2, 1)],
            ],
        }
    }
}

/// Active piece: kind, rotation index and anchor in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: usize,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Fresh piece at the spawn anchor for a board of the given width.
    pub fn spawned(kind: PieceKind, board_width: u16) -> Self {
        Self {
            kind,
            rotation: 0,
            // Integer division truncates toward zero, also for boards narrower than 4.
            x: (i32::from(board_width) - 4) / 2,
            y: 0,
        }
    }

    pub fn next_rotation(&self) -> usize {
        (self.rotation + 1) % self.kind.rotations().len()
    }

    /// Absolute board cells at the given rotation and offset from the anchor.
    pub fn cells_at(&self, rotation: usize, dx: i32, dy: i32) -> [(i32, i32); 4] {
        self.kind.rotations()[rotation].map(|(ox, oy)| (self.x + ox + dx, self.y + oy + dy))
    }

    /// Absolute board cells as the piece currently stands.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.cells_at(self.rotation, 0, 0)
    }
}

/// Single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

/// Board: grid of cells. y=0 is top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// rows[y][x] = cell. rows[0] is top.
    rows: VecDeque<Vec<Cell>>,
}

impl Board {
    pub fn new(width: u16, height: u16) -> Self {
        let (w, h) = (width as usize, height as usize);
        let rows = (0..h).map(|_| vec![Cell::Empty; w]).collect();
        Self {
            width: w,
            height: h,
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Cell at (x, y), or None if off the board.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        let (x, y) = self.index(x, y)?;
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Returns false if (x, y) is off the board.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.rows[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// True if a piece cell may not sit at (x, y): side walls, floor or a filled cell.
    /// Rows above the board (y < 0) are open.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return true;
        }
        self.get(x, y) == Some(Cell::Filled)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|&c| c == Cell::Filled))
    }

    pub fn top_row_has_filled(&self) -> bool {
        self.rows
            .front()
            .is_some_and(|row| row.contains(&Cell::Filled))
    }

    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Filled)
            .count()
    }

    /// Remove every full row, pushing an empty row in at the top for each.
    /// Rows below a removed row keep their index, so one top-down pass is enough.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.height {
            if self.is_row_full(y) {
                self.rows.remove(y);
                self.rows.push_front(vec![Cell::Empty; self.width]);
                cleared += 1;
            }
        }
        cleared
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Stopped by `exit` or end of input.
    Exited,
    /// A landed piece left a filled cell in the top row.
    GameOver,
}

/// Game state: board, active piece and status.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    piece: Option<Piece>,
    status: GameStatus,
}

impl GameState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            board: Board::new(width, height),
            piece: None,
            status: GameStatus::Running,
        }
    }

    /// Start from an existing board, e.g. a prepared position.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            piece: None,
            status: GameStatus::Running,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Put a new piece at the spawn anchor. Replaces any piece in play; no collision check.
    pub fn spawn(&mut self, kind: PieceKind) {
        if !self.is_running() {
            return;
        }
        let piece = Piece::spawned(kind, self.board.width as u16);
        debug!(kind = %kind.symbol(), x = piece.x, y = piece.y, "spawn");
        self.piece = Some(piece);
    }

    /// Spawn from an identifier token. Unknown identifiers leave no piece in play.
    pub fn spawn_symbol(&mut self, symbol: &str) {
        if !self.is_running() {
            return;
        }
        match PieceKind::from_symbol(symbol) {
            Some(kind) => self.spawn(kind),
            None => {
                warn!(symbol, "unknown piece identifier, nothing in play");
                self.piece = None;
            }
        }
    }

    /// True if the active piece at `rotation`, shifted by (dx, dy), hits a wall, the floor
    /// or a filled cell. False with no piece in play.
    pub fn collides(&self, dx: i32, dy: i32, rotation: usize) -> bool {
        self.piece.is_some_and(|piece| {
            piece
                .cells_at(rotation, dx, dy)
                .iter()
                .any(|&(x, y)| self.board.is_blocked(x, y))
        })
    }

    /// True if the active piece cannot move one row down.
    pub fn is_grounded(&self) -> bool {
        self.piece
            .is_some_and(|piece| self.collides(0, 1, piece.rotation))
    }

    /// Write the active piece into the board and clear it. Ends the game if the
    /// top row now holds a filled cell.
    pub fn land(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        for (x, y) in piece.cells() {
            if !self.board.set(x, y, Cell::Filled) {
                debug!(x, y, "landed cell off the board, dropped");
            }
        }
        debug!(kind = %piece.kind.symbol(), x = piece.x, y = piece.y, rotation = piece.rotation, "landed");
        if self.board.top_row_has_filled() {
            info!("stack reached the top row, game over");
            self.status = GameStatus::GameOver;
        }
    }

    /// Land the piece if it is grounded. Returns whether it landed.
    fn land_if_grounded(&mut self) -> bool {
        if self.is_grounded() {
            self.land();
            true
        } else {
            false
        }
    }

    pub fn rotate(&mut self) {
        if !self.is_running() || self.land_if_grounded() {
            return;
        }
        let Some(piece) = self.piece else {
            return;
        };
        let next = piece.next_rotation();
        if !self.collides(0, 0, next) {
            self.piece = Some(Piece {
                rotation: next,
                ..piece
            });
        }
        self.step_down();
    }

    pub fn move_left(&mut self) {
        self.shift(-1);
    }

    pub fn move_right(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, dx: i32) {
        if !self.is_running() || self.land_if_grounded() {
            return;
        }
        let Some(piece) = self.piece else {
            return;
        };
        if !self.collides(dx, 0, piece.rotation) {
            self.piece = Some(Piece {
                x: piece.x + dx,
                ..piece
            });
        }
        self.step_down();
    }

    /// Move the piece one row down, or land it if it is grounded.
    pub fn step_down(&mut self) {
        if !self.is_running() || self.land_if_grounded() {
            return;
        }
        if let Some(piece) = self.piece.as_mut() {
            piece.y += 1;
        }
    }

    /// Clear every full row. Returns the number of rows cleared.
    pub fn clear_lines(&mut self) -> usize {
        if !self.is_running() {
            return 0;
        }
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            info!(cleared, "lines cleared");
        }
        cleared
    }

    pub fn exit(&mut self) {
        if self.is_running() {
            self.status = GameStatus::Exited;
        }
    }

    /// Board with the active piece drawn over it: one line per row, cells separated by a
    /// space, then a blank line. The stored board is left untouched.
    pub fn render(&self, glyphs: &Glyphs) -> String {
        let overlay = self.piece.map(|p| p.cells());
        let mut out = String::with_capacity((self.board.width * 2 + 1) * self.board.height + 1);
        for (y, row) in self.board.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if x > 0 {
                    out.push(' ');
                }
                let covered = overlay
                    .as_ref()
                    .is_some_and(|cells| cells.contains(&(x as i32, y as i32)));
                out.push(if covered {
                    glyphs.filled
                } else {
                    glyphs.glyph(cell)
                });
            }
            out.push('\n');
        }
        out.push('\n');
        out
    }
}
