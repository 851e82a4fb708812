//! Board geometry: spaces, the hex distance metric, and the 5x5 grid

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Player;

/// Board dimension (rows and columns)
pub const BOARD_SIZE: i32 = 5;

/// A space on the board. Coordinates are in model space unless a view-space
/// context says otherwise; `to_view`/`to_model` convert between the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSpace {
    pub x: i32,
    pub y: i32,
}

impl BoardSpace {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Hex-adapted Manhattan distance between two spaces
    pub fn distance_to(&self, other: BoardSpace) -> u32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (((dx + dy).abs() + dx.abs() + dy.abs()) / 2) as u32
    }

    /// Column shift compensating for the staggered hex rows
    fn skew(row: i32) -> i32 {
        let mut offset = (row * 2 - BOARD_SIZE) / 2;
        offset += if offset < 0 { -1 } else { 1 };
        offset / 2
    }

    /// Translate model coordinates to display (view) coordinates
    pub fn to_view(&self) -> BoardSpace {
        BoardSpace::new(self.x + Self::skew(self.y), BOARD_SIZE - 1 - self.y)
    }

    /// Translate display (view) coordinates back to model coordinates
    pub fn to_model(&self) -> BoardSpace {
        let y = BOARD_SIZE - 1 - self.y;
        BoardSpace::new(self.x - Self::skew(y), y)
    }
}

impl fmt::Display for BoardSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Contents of a single board space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    OutOfBounds,
    Owner(Player),
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::OutOfBounds => '-',
            Cell::Empty => '.',
            Cell::Owner(player) => player.symbol(),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(Cell::OutOfBounds),
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::Owner(Player::White)),
            'O' => Some(Cell::Owner(Player::Black)),
            _ => None,
        }
    }
}

/// Malformed board layout
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected {BOARD_SIZE} rows, found {0}")]
    WrongRowCount(usize),
    #[error("row {row} has {count} columns, expected {BOARD_SIZE}")]
    WrongColumnCount { row: usize, count: usize },
    #[error("unknown symbol '{symbol}' in row {row}")]
    UnknownSymbol { row: usize, symbol: char },
    #[error("{player} has {count} pieces, at most {max} allowed")]
    TooManyPieces { player: Player, count: u8, max: u8 },
}

/// Fixed 5x5 position grid, indexed `[y][x]` with row 0 at the top
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// Parse a textual layout: `-` out-of-bounds, `.` empty, `X`/`O` pieces.
    /// Whitespace between symbols is ignored.
    pub fn parse(template: &str) -> Result<Self, LayoutError> {
        let rows: Vec<Vec<char>> = template
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .filter(|row: &Vec<char>| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE as usize {
            return Err(LayoutError::WrongRowCount(rows.len()));
        }

        let mut grid = [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE as usize {
                return Err(LayoutError::WrongColumnCount { row: y, count: row.len() });
            }
            for (x, &symbol) in row.iter().enumerate() {
                grid[y][x] = Cell::from_symbol(symbol)
                    .ok_or(LayoutError::UnknownSymbol { row: y, symbol })?;
            }
        }

        Ok(Self { grid })
    }

    /// Render back to the textual layout form parsed by [`Board::parse`]
    pub fn render(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.symbol().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Cell at a space; anything off the grid reads as out-of-bounds
    pub fn cell(&self, space: BoardSpace) -> Cell {
        if space.x < 0 || space.x >= BOARD_SIZE || space.y < 0 || space.y >= BOARD_SIZE {
            return Cell::OutOfBounds;
        }
        self.grid[space.y as usize][space.x as usize]
    }

    pub(crate) fn set(&mut self, space: BoardSpace, cell: Cell) {
        self.grid[space.y as usize][space.x as usize] = cell;
    }

    /// All grid spaces in row-major order (the canonical enumeration order)
    pub fn spaces() -> impl Iterator<Item = BoardSpace> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| BoardSpace::new(x, y)))
    }

    /// Spaces holding a piece of the given player, in row-major order
    pub fn pieces(&self, player: Player) -> Vec<BoardSpace> {
        Self::spaces()
            .filter(|&space| self.cell(space) == Cell::Owner(player))
            .collect()
    }

    /// Number of pieces the given player has on the board
    pub fn count(&self, player: Player) -> u8 {
        self.pieces(player).len() as u8
    }
}
