//! Integration tests for the Annuvin engine
//!
//! Tests the full stack: board geometry, game rules, the alpha-beta
//! engine, and the display-space session facade.

use std::time::Duration;

use annuvin_core::{
    AlphaBetaAI, Board, BoardSpace, GameModel, GameSession, GameState, Move, Player, SearchBudget,
    TurnState,
};

// ============================================================================
// FULL GAME TESTS
// ============================================================================

#[test]
fn test_selfplay_terminates_within_thirty_plies() {
    let ai = AlphaBetaAI::new(2);
    let mut state = GameState::new();
    let mut plies = 0;

    while !state.is_over() {
        let mv = ai
            .best_move(&state)
            .expect("side to move always has a move until the game is decided");
        state.apply(mv).expect("engine move is legal");
        plies += 1;
        assert!(plies < 30, "game did not terminate within 30 plies");
    }

    assert!(state.winner().is_some());
    let loser = state.winner().unwrap().opponent();
    assert_eq!(state.pieces_left(loser), 0);
}

#[test]
fn test_selfplay_through_play_game_helper() {
    let ai = AlphaBetaAI::new(3);
    let (final_state, history) = ai.play_game(GameState::new(), 30);
    assert!(final_state.is_terminal());
    assert!(!history.is_empty());
    assert!(history.len() < 30);
}

#[test]
fn test_budgeted_search_still_finishes_games() {
    let ai = AlphaBetaAI::with_budget(4, SearchBudget::time(Duration::from_secs(1)));
    let (final_state, history) = ai.play_game(GameState::new(), 60);
    assert!(final_state.is_terminal(), "stalled after {} plies", history.len());
}

// ============================================================================
// SESSION FACADE TESTS
// ============================================================================

#[test]
fn test_session_full_game_against_engine() {
    // Drive both sides through the facade: the human side plays the
    // engine's recommendation, so the whole game flows through move_piece
    let mut session = GameSession::with_depth(Player::Black, 2);
    let mut plies = 0;

    while session.winner().is_none() {
        let mv = match session.ai_move() {
            Some(mv) => mv,
            None => panic!("no move available before the game was decided"),
        };
        session.move_piece(mv).expect("recommended move is legal");
        plies += 1;
        assert!(plies < 30, "session game did not terminate");
    }

    let winner = session.winner().unwrap();
    assert!(session.pieces_for(winner.opponent()).is_empty());
}

#[test]
fn test_session_capture_chain_reporting() {
    let mut session = GameSession::with_depth(Player::Black, 1);
    let mut saw_capture = false;

    while session.winner().is_none() {
        let mv = session.ai_move().expect("move available");
        let report = session.move_piece(mv).expect("legal");
        if report.captured {
            saw_capture = true;
        }
        if report.continues_capturing {
            // Mid-chain the state must pin the moved piece
            assert!(matches!(
                session.state().turn(),
                TurnState::Continuing { piece, .. } if piece == mv.to.to_model()
            ));
        }
    }

    assert!(saw_capture, "a decided game includes at least one capture");
}

#[test]
fn test_view_coordinates_round_trip_through_facade() {
    let session = GameSession::new(Player::Black);
    for space in Board::spaces() {
        assert_eq!(space.to_view().to_model(), space);
    }
    // Every reported piece maps back onto a piece in model space
    for player in [Player::White, Player::Black] {
        for view_space in session.pieces_for(player) {
            let model_space = view_space.to_model();
            assert!(session.state().pieces(player).contains(&model_space));
        }
    }
}

#[test]
fn test_facade_rejects_what_the_rules_reject() {
    let mut session = GameSession::new(Player::Black);
    // Model (3, 3) -> (3, 1) is two spaces with an allowance of one
    let mv = Move::new(
        BoardSpace::new(3, 3).to_view(),
        BoardSpace::new(3, 1).to_view(),
    );
    assert!(session.move_piece(mv).is_err());
    // The board is untouched, so the legal fixture move still works
    let legal = Move::new(
        BoardSpace::new(3, 3).to_view(),
        BoardSpace::new(3, 2).to_view(),
    );
    assert!(session.move_piece(legal).is_ok());
}
