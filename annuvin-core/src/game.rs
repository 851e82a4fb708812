//! Game state, move application, and legal-move generation

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardSpace, Cell, LayoutError};

/// Starting piece count per side
pub const PIECES_PER_SIDE: u8 = 4;

/// Fixed starting layout in model space. White (`X`) moves first from the
/// bottom rows; Black (`O`) starts on the top rows. The corner triangles
/// are permanently out of bounds.
pub const INITIAL_LAYOUT: &str = "\
- - O O O
- O . . .
. . . . .
. . . X -
X X X - -";

/// Player side. White moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Board symbol used by the textual layout
    pub fn symbol(self) -> char {
        match self {
            Player::White => 'X',
            Player::Black => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Relocation of one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: BoardSpace,
    pub to: BoardSpace,
}

impl Move {
    pub const fn new(from: BoardSpace, to: BoardSpace) -> Self {
        Self { from, to }
    }

    pub fn distance(&self) -> u32 {
        self.from.distance_to(self.to)
    }

    pub fn to_view(&self) -> Move {
        Move::new(self.from.to_view(), self.to.to_view())
    }

    pub fn to_model(&self) -> Move {
        Move::new(self.from.to_model(), self.to.to_model())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Turn phase. A multi-capture chain pins the moving piece until the chain
/// runs dry, with the travel allowance it has left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    Normal,
    Continuing { piece: BoardSpace, moves_left: u32 },
}

/// Rejected move. The state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("no piece of the active player at {0}")]
    NotYourPiece(BoardSpace),
    #[error("destination {0} is out of bounds")]
    OutOfBounds(BoardSpace),
    #[error("destination {0} is occupied by the mover's own piece")]
    OccupiedByOwn(BoardSpace),
    #[error("distance {distance} exceeds the movement allowance of {allowance}")]
    OutOfRange { distance: u32, allowance: u32 },
    #[error("a capture chain is in progress; the piece at {piece} must keep capturing")]
    CaptureRequired { piece: BoardSpace },
    #[error("until the first capture, Black may only move toward White")]
    MustAdvance,
}

/// Outcome of a successful `apply`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    pub captured: bool,
    /// Same player stays on the move, capturing with the same piece
    pub continues: bool,
}

/// Authoritative game position. Mutated only through [`GameState::apply`];
/// the search takes independent clones per explored branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    active: Player,
    pieces_left: [u8; 2],
    turn: TurnState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Start a new game from the fixed initial layout
    pub fn new() -> Self {
        Self::from_template(INITIAL_LAYOUT).expect("initial layout is valid")
    }

    /// Build a state from a textual layout, White to move. Piece counts are
    /// taken from the layout census.
    pub fn from_template(template: &str) -> Result<Self, LayoutError> {
        let board = Board::parse(template)?;
        let mut pieces_left = [0u8; 2];
        for player in [Player::White, Player::Black] {
            let count = board.count(player);
            if count > PIECES_PER_SIDE {
                return Err(LayoutError::TooManyPieces {
                    player,
                    count,
                    max: PIECES_PER_SIDE,
                });
            }
            pieces_left[player.index()] = count;
        }
        Ok(Self {
            board,
            active: Player::White,
            pieces_left,
            turn: TurnState::Normal,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn pieces_left(&self, player: Player) -> u8 {
        self.pieces_left[player.index()]
    }

    /// Spaces holding the player's pieces, in row-major order
    pub fn pieces(&self, player: Player) -> Vec<BoardSpace> {
        self.board.pieces(player)
    }

    /// Material difference from the player's perspective
    pub fn score(&self, player: Player) -> i32 {
        self.pieces_left(player) as i32 - self.pieces_left(player.opponent()) as i32
    }

    // ========================================================================
    // WIN / LOSS
    // ========================================================================

    pub fn is_loss(&self, player: Player) -> bool {
        self.pieces_left(player) == 0
    }

    pub fn is_win(&self, player: Player) -> bool {
        self.pieces_left(player.opponent()) == 0
    }

    pub fn is_over(&self) -> bool {
        self.is_loss(self.active) || self.is_win(self.active)
    }

    pub fn winner(&self) -> Option<Player> {
        [Player::White, Player::Black]
            .into_iter()
            .find(|&player| self.is_win(player))
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Maximum distance the player may travel this turn: mid-chain it is the
    /// allowance the chain has left, otherwise it grows as pieces are lost.
    pub fn move_allowance(&self, player: Player) -> u32 {
        if let TurnState::Continuing { moves_left, .. } = self.turn {
            if player == self.active {
                return moves_left;
            }
        }
        1 + (PIECES_PER_SIDE - self.pieces_left(player)) as u32
    }

    /// Black may only advance until the first capture of the game
    fn opening_restricted(&self, player: Player) -> bool {
        player == Player::Black && self.pieces_left == [PIECES_PER_SIDE; 2]
    }

    /// Destinations for one piece, bounded by the player's allowance.
    /// Enumeration is row-major over the board, so generation order is
    /// deterministic.
    pub fn piece_moves(&self, player: Player, from: BoardSpace, captures_only: bool) -> Vec<Move> {
        self.piece_moves_within(player, from, captures_only, self.move_allowance(player))
    }

    fn piece_moves_within(
        &self,
        player: Player,
        from: BoardSpace,
        captures_only: bool,
        allowance: u32,
    ) -> Vec<Move> {
        let restricted = self.opening_restricted(player);
        Board::spaces()
            .filter(|&to| {
                let distance = from.distance_to(to);
                if distance == 0 || distance > allowance {
                    return false;
                }
                if restricted && to.y <= from.y {
                    return false;
                }
                match self.board.cell(to) {
                    Cell::Owner(owner) => owner == player.opponent(),
                    Cell::Empty => !captures_only,
                    Cell::OutOfBounds => false,
                }
            })
            .map(|to| Move::new(from, to))
            .collect()
    }

    /// All legal moves for the player. Mid-chain, only the pinned piece may
    /// move and only onto opposing pieces.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        if self.is_over() {
            return vec![];
        }
        if player == self.active {
            if let TurnState::Continuing { piece, moves_left } = self.turn {
                return self.piece_moves_within(player, piece, true, moves_left);
            }
        }
        self.pieces(player)
            .into_iter()
            .flat_map(|piece| self.piece_moves(player, piece, false))
            .collect()
    }

    /// Legal destinations for the piece at `from`, for display. Empty when
    /// the space does not hold a piece the active player may move right now.
    pub fn destinations_from(&self, from: BoardSpace) -> Vec<BoardSpace> {
        if self.is_over() {
            return vec![];
        }
        match self.turn {
            TurnState::Continuing { piece, moves_left } => {
                if from != piece {
                    return vec![];
                }
                self.piece_moves_within(self.active, from, true, moves_left)
                    .into_iter()
                    .map(|mv| mv.to)
                    .collect()
            }
            TurnState::Normal => {
                if self.board.cell(from) != Cell::Owner(self.active) {
                    return vec![];
                }
                self.piece_moves(self.active, from, false)
                    .into_iter()
                    .map(|mv| mv.to)
                    .collect()
            }
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move for the active player. Rejection leaves the state
    /// unchanged; a capture with follow-up captures in range keeps the same
    /// player on the move (`continues`), otherwise the turn passes.
    pub fn apply(&mut self, mv: Move) -> Result<AppliedMove, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.board.cell(mv.from) != Cell::Owner(self.active) {
            return Err(MoveError::NotYourPiece(mv.from));
        }
        let target = self.board.cell(mv.to);
        if target == Cell::OutOfBounds {
            return Err(MoveError::OutOfBounds(mv.to));
        }
        if target == Cell::Owner(self.active) {
            return Err(MoveError::OccupiedByOwn(mv.to));
        }
        let capture = target == Cell::Owner(self.active.opponent());
        if let TurnState::Continuing { piece, .. } = self.turn {
            if mv.from != piece || !capture {
                return Err(MoveError::CaptureRequired { piece });
            }
        }
        let distance = mv.distance();
        let allowance = self.move_allowance(self.active);
        if distance > allowance {
            return Err(MoveError::OutOfRange { distance, allowance });
        }
        if self.opening_restricted(self.active) && mv.to.y <= mv.from.y {
            return Err(MoveError::MustAdvance);
        }

        // Relocate, then either chain or pass the turn
        self.board.set(mv.from, Cell::Empty);
        self.board.set(mv.to, Cell::Owner(self.active));
        if capture {
            self.pieces_left[self.active.opponent().index()] -= 1;
            let moves_left = allowance - distance;
            self.turn = TurnState::Continuing { piece: mv.to, moves_left };
            let chain = moves_left > 0
                && !self
                    .piece_moves_within(self.active, mv.to, true, moves_left)
                    .is_empty();
            if chain {
                return Ok(AppliedMove { captured: true, continues: true });
            }
        }
        self.end_turn();
        Ok(AppliedMove { captured: capture, continues: false })
    }

    fn end_turn(&mut self) {
        self.active = self.active.opponent();
        self.turn = TurnState::Normal;
    }
}
