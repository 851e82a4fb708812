//! Terminal board rendering in view coordinates

use annuvin_core::{BoardSpace, Cell, GameState, Player, TurnState, BOARD_SIZE};

/// Staggered-row picture of the position, rows labeled with view-space
/// coordinates. Odd rows are shifted half a cell, mirroring the hex grid.
pub fn view_grid(state: &GameState) -> String {
    let mut lines = Vec::new();
    for vy in (0..BOARD_SIZE).rev() {
        let indent = if vy % 2 == 1 { " " } else { "" };
        let row: Vec<String> = (0..BOARD_SIZE)
            .map(|vx| {
                let cell = state.board().cell(BoardSpace::new(vx, vy).to_model());
                match cell {
                    Cell::OutOfBounds => "-".to_string(),
                    Cell::Empty => ".".to_string(),
                    Cell::Owner(player) => player.symbol().to_string(),
                }
            })
            .collect();
        lines.push(format!(" {} {}{}", vy, indent, row.join(" ")));
    }
    let header: Vec<String> = (0..BOARD_SIZE).map(|x| x.to_string()).collect();
    lines.push(format!("    {}", header.join(" ")));
    lines.join("\n")
}

/// One-line turn summary: side to move, piece counts, chain status
pub fn turn_summary(state: &GameState) -> String {
    let mut summary = format!(
        "{} to move (X: {}, O: {})",
        state.active_player(),
        state.pieces_left(Player::White),
        state.pieces_left(Player::Black),
    );
    if let TurnState::Continuing { piece, moves_left } = state.turn() {
        summary.push_str(&format!(
            " - capture chain at {}, {} moves left",
            piece.to_view(),
            moves_left
        ));
    }
    summary
}
