use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::heuristic::is_solvable;

/// Width and height of the grid.
pub const SIZE: usize = 3;
/// Number of cells, blank included.
pub const CELLS: usize = SIZE * SIZE;
/// The symbol standing for the empty cell.
pub const BLANK: u8 = 0;

/// Direction the blank slides in. `Up` moves the blank one row towards the
/// top, which is the same as the tile above it sliding down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Every move, in the order neighbors are generated.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, column)` delta applied to the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One arrangement of the eight tiles and the blank, stored row-major.
///
/// A `Board` always holds each of the symbols 0-8 exactly once; every
/// constructor checks this, so the solver never sees a malformed board.
/// Boards are plain values: moving produces a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELLS],
}

impl Board {
    /// Goal with the blank in the centre and the tiles running clockwise.
    pub const CENTER_GOAL: Board = Board {
        tiles: [1, 2, 3, 8, 0, 4, 7, 6, 5],
    };

    /// Goal with the tiles in ascending order and the blank last.
    pub const SORTED_GOAL: Board = Board {
        tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
    };

    pub fn new(tiles: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        for &value in &tiles {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(BoardError::OutOfRange { value })?;
            if *slot {
                return Err(BoardError::Duplicate { value });
            }
            *slot = true;
        }
        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Tile at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIZE + col]
    }

    /// Row-major index of `tile`.
    pub fn position_of(&self, tile: u8) -> usize {
        // Every symbol is present exactly once.
        self.tiles.iter().position(|&t| t == tile).unwrap_or(0)
    }

    pub fn blank(&self) -> usize {
        self.position_of(BLANK)
    }

    /// The board after sliding the blank one cell in `movement`, or `None`
    /// when that would take the blank off the grid.
    pub fn apply(&self, movement: Move) -> Option<Self> {
        let blank = self.blank();
        let (dr, dc) = movement.as_offset();

        let new_row = (blank / SIZE) as isize + dr;
        let new_col = (blank % SIZE) as isize + dc;

        if new_row >= 0 && new_row < SIZE as isize && new_col >= 0 && new_col < SIZE as isize {
            let target = new_row as usize * SIZE + new_col as usize;
            let mut tiles = self.tiles;
            tiles.swap(blank, target);
            Some(Self { tiles })
        } else {
            None
        }
    }

    /// Boards one slide away, paired with the move that reaches them.
    /// Yields two boards for a corner blank, three for an edge and four for
    /// the centre.
    pub fn neighbors(&self) -> impl Iterator<Item = (Move, Board)> {
        let board = *self;
        Move::ALL
            .into_iter()
            .filter_map(move |m| board.apply(m).map(|next| (m, next)))
    }

    pub fn is_goal(&self, goal: &Board) -> bool {
        self == goal
    }

    /// A uniformly shuffled board that can reach `goal`.
    pub fn random_solvable<R: Rng + ?Sized>(goal: &Board, rng: &mut R) -> Self {
        let mut tiles = goal.tiles;
        loop {
            tiles.shuffle(rng);
            let candidate = Self { tiles };
            if is_solvable(&candidate, goal) {
                return candidate;
            }
        }
    }
}

impl TryFrom<&[u8]> for Board {
    type Error = BoardError;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        let tiles: [u8; CELLS] = values
            .try_into()
            .map_err(|_| BoardError::WrongLength {
                found: values.len(),
            })?;
        Self::new(tiles)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Accepts `"123804765"` or nine numbers separated by whitespace and/or
    /// commas, e.g. `"1 2 3, 8 0 4, 7 6 5"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() == CELLS && s.bytes().all(|b| b.is_ascii_digit()) {
            let values: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
            return Self::try_from(values.as_slice());
        }

        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<u8>().map_err(|_| BoardError::InvalidToken {
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Self::try_from(values.as_slice())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIZE) {
            for &val in row {
                if val == BLANK {
                    write!(f, "   ")?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
