//! Selfplay command - engine vs engine from the initial position

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use annuvin_core::{AlphaBetaAI, GameState, Player};

use crate::display::{turn_summary, view_grid};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Look-ahead depth for both sides
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Stop after this many plies even if the game is undecided
    #[arg(long, default_value = "60")]
    pub max_plies: usize,

    /// Output the game record as JSON
    #[arg(long)]
    pub json: bool,
}

/// One applied move, in model coordinates
#[derive(Clone, Copy, Debug, Serialize)]
struct PlyRecord {
    ply: usize,
    player: Player,
    from: (i32, i32),
    to: (i32, i32),
    captured: bool,
    continues: bool,
}

/// A finished selfplay game
#[derive(Debug, Serialize)]
struct GameRecord {
    depth: u32,
    plies: usize,
    winner: Option<Player>,
    pieces_left: [u8; 2],
    moves: Vec<PlyRecord>,
}

pub fn run(args: SelfplayArgs) -> Result<()> {
    let ai = AlphaBetaAI::new(args.depth);
    let mut state = GameState::new();
    let mut moves = Vec::new();

    while !state.is_over() && moves.len() < args.max_plies {
        let player = state.active_player();
        let mv = match ai.best_move(&state) {
            Some(mv) => mv,
            None => {
                tracing::warn!("{player} has no legal moves, stopping");
                break;
            }
        };
        let applied = state.apply(mv).expect("searched move is legal");
        let record = PlyRecord {
            ply: moves.len() + 1,
            player,
            from: (mv.from.x, mv.from.y),
            to: (mv.to.x, mv.to.y),
            captured: applied.captured,
            continues: applied.continues,
        };
        tracing::info!(
            ply = record.ply,
            %player,
            %mv,
            captured = applied.captured,
            continues = applied.continues,
            "applied"
        );
        moves.push(record);
    }

    let record = GameRecord {
        depth: args.depth,
        plies: moves.len(),
        winner: state.winner(),
        pieces_left: [
            state.pieces_left(Player::White),
            state.pieces_left(Player::Black),
        ],
        moves,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", view_grid(&state));
        println!("{}", turn_summary(&state));
        match record.winner {
            Some(winner) => println!("{} wins in {} plies.", winner, record.plies),
            None => println!("Undecided after {} plies.", record.plies),
        }
    }

    Ok(())
}
