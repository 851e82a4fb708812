//! Presentation boundary: a display-space facade over the core engine
//!
//! Presentation layers talk to [`GameSession`] exclusively in view
//! coordinates (the skewed system used for staggered-row display); the
//! session translates to model space before touching the game state.

use crate::ai::{AlphaBetaAI, SearchBudget};
use crate::board::BoardSpace;
use crate::game::{GameState, Move, MoveError, Player};

/// Look-ahead depth used when the caller does not pick one
pub const DEFAULT_SEARCH_DEPTH: u32 = 7;

/// What a confirmed move did, for display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub captured: bool,
    /// The same side stays on the move and must keep capturing
    pub continues_capturing: bool,
}

/// One game plus the engine for the machine side
pub struct GameSession {
    state: GameState,
    ai: AlphaBetaAI,
    machine: Player,
}

impl GameSession {
    pub fn new(machine: Player) -> Self {
        Self::with_depth(machine, DEFAULT_SEARCH_DEPTH)
    }

    pub fn with_depth(machine: Player, depth: u32) -> Self {
        Self {
            state: GameState::new(),
            ai: AlphaBetaAI::new(depth),
            machine,
        }
    }

    /// Cap the engine's effort per move
    pub fn set_budget(&mut self, budget: SearchBudget) {
        self.ai.budget = budget;
    }

    /// Throw the position away and start over from the fixed initial layout
    pub fn reset_game(&mut self) {
        self.state = GameState::new();
    }

    /// Read-only snapshot of the authoritative position
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn machine_side(&self) -> Player {
        self.machine
    }

    /// The player's pieces in view coordinates
    pub fn pieces_for(&self, player: Player) -> Vec<BoardSpace> {
        self.state
            .pieces(player)
            .into_iter()
            .map(|space| space.to_view())
            .collect()
    }

    /// Legal destinations for the piece at `from` (view space in and out)
    pub fn legal_moves(&self, from: BoardSpace) -> Vec<BoardSpace> {
        self.state
            .destinations_from(from.to_model())
            .into_iter()
            .map(|space| space.to_view())
            .collect()
    }

    /// Apply a move given in view coordinates
    pub fn move_piece(&mut self, mv: Move) -> Result<MoveReport, MoveError> {
        let applied = self.state.apply(mv.to_model())?;
        Ok(MoveReport {
            captured: applied.captured,
            continues_capturing: applied.continues,
        })
    }

    /// Engine move for the side to move, in view coordinates. The move is
    /// not applied; confirm it through [`GameSession::move_piece`] like any
    /// other move. `None` means the side has no legal move.
    pub fn ai_move(&self) -> Option<Move> {
        self.ai.best_move(&self.state).map(|mv| mv.to_view())
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TurnState;

    #[test]
    fn test_pieces_for_in_view_space() {
        let session = GameSession::new(Player::Black);
        assert_eq!(
            session.pieces_for(Player::White),
            vec![
                BoardSpace::new(3, 1),
                BoardSpace::new(1, 0),
                BoardSpace::new(2, 0),
                BoardSpace::new(3, 0),
            ]
        );
        assert_eq!(
            session.pieces_for(Player::Black),
            vec![
                BoardSpace::new(1, 4),
                BoardSpace::new(2, 4),
                BoardSpace::new(3, 4),
                BoardSpace::new(0, 3),
            ]
        );
    }

    #[test]
    fn test_legal_moves_in_view_space() {
        let session = GameSession::new(Player::Black);
        // White's piece at model (3, 3) sits at view (3, 1)
        let destinations = session.legal_moves(BoardSpace::new(3, 1));
        let in_model: Vec<BoardSpace> = destinations.iter().map(|to| to.to_model()).collect();
        assert_eq!(
            in_model,
            vec![
                BoardSpace::new(3, 2),
                BoardSpace::new(4, 2),
                BoardSpace::new(2, 3),
            ]
        );
        // An empty space selects nothing
        assert!(session.legal_moves(BoardSpace::new(2, 2)).is_empty());
    }

    #[test]
    fn test_move_piece_round_trip() {
        let mut session = GameSession::new(Player::Black);
        // Model (3, 3) -> (3, 2) expressed in view coordinates
        let mv = Move::new(BoardSpace::new(3, 3), BoardSpace::new(3, 2)).to_view();
        let report = session.move_piece(mv).unwrap();
        assert!(!report.captured);
        assert!(!report.continues_capturing);
        assert_eq!(session.state().active_player(), Player::Black);
    }

    #[test]
    fn test_move_piece_rejects_illegal() {
        let mut session = GameSession::new(Player::Black);
        let before = session.state().clone();
        let mv = Move::new(BoardSpace::new(0, 0), BoardSpace::new(1, 1));
        assert!(session.move_piece(mv).is_err());
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn test_ai_move_is_playable() {
        let mut session = GameSession::with_depth(Player::Black, 2);
        let mv = session.ai_move().expect("side to move has moves");
        session.move_piece(mv).expect("engine move is legal");
    }

    #[test]
    fn test_reset_game() {
        let mut session = GameSession::with_depth(Player::Black, 1);
        let mv = session.ai_move().unwrap();
        session.move_piece(mv).unwrap();
        session.reset_game();
        assert_eq!(session.state(), &GameState::new());
        assert_eq!(session.state().turn(), TurnState::Normal);
        assert_eq!(session.winner(), None);
    }
}
