//! Play command - interactive game against the engine
//!
//! All coordinates typed and shown here are view-space, the same system a
//! graphical front end would use for its staggered rows.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use annuvin_core::{BoardSpace, GameSession, Move, Player};

use crate::display::{turn_summary, view_grid};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Player {
    fn from(side: Side) -> Player {
        match side {
            Side::White => Player::White,
            Side::Black => Player::Black,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Engine look-ahead depth
    #[arg(long, default_value = "7")]
    pub depth: u32,

    /// Side played by the engine
    #[arg(long, value_enum, default_value = "black")]
    pub machine: Side,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let machine: Player = args.machine.into();
    let mut session = GameSession::with_depth(machine, args.depth);

    println!("You are {}. Commands:", machine.opponent());
    println!("  move FX FY TX TY   make a move");
    println!("  moves X Y          show destinations for a piece");
    println!("  board              reprint the position");
    println!("  reset              start over");
    println!("  quit               leave the game");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("\n{}", view_grid(session.state()));
        println!("{}", turn_summary(session.state()));

        if let Some(winner) = session.winner() {
            println!("Game over: {} wins.", winner);
            return Ok(());
        }

        let active = session.state().active_player();
        if session.state().legal_moves(active).is_empty() {
            // Not a defined loss; the turn just cannot be completed
            println!("{} has no legal moves. Game stops here.", active);
            return Ok(());
        }

        if active == machine {
            tracing::info!(depth = args.depth, "engine searching");
            let mv = match session.ai_move() {
                Some(mv) => mv,
                None => {
                    println!("Engine found no move. Game stops here.");
                    return Ok(());
                }
            };
            let report = session
                .move_piece(mv)
                .context("engine produced an illegal move")?;
            announce(machine, mv, report.captured, report.continues_capturing);
        } else if !human_turn(&mut session, &mut input)? {
            return Ok(());
        }
    }
}

/// One human interaction; false means the player quit
fn human_turn(session: &mut GameSession, input: &mut impl BufRead) -> Result<bool> {
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line).context("reading input")? == 0 {
            return Ok(false);
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            ["quit"] | ["exit"] => return Ok(false),
            ["board"] => {
                println!("\n{}", view_grid(session.state()));
                println!("{}", turn_summary(session.state()));
            }
            ["reset"] => {
                session.reset_game();
                println!("New game.");
                return Ok(true);
            }
            ["moves", x, y] => match parse_space(x, y) {
                Some(space) => {
                    let destinations = session.legal_moves(space);
                    if destinations.is_empty() {
                        println!("No moves for {}.", space);
                    } else {
                        let list: Vec<String> =
                            destinations.iter().map(|d| d.to_string()).collect();
                        println!("{} can reach: {}", space, list.join(", "));
                    }
                }
                None => println!("Coordinates must be numbers."),
            },
            ["move", fx, fy, tx, ty] => {
                let (from, to) = match (parse_space(fx, fy), parse_space(tx, ty)) {
                    (Some(from), Some(to)) => (from, to),
                    _ => {
                        println!("Coordinates must be numbers.");
                        continue;
                    }
                };
                let mv = Move::new(from, to);
                match session.move_piece(mv) {
                    Ok(report) => {
                        let player = session.machine_side().opponent();
                        announce(player, mv, report.captured, report.continues_capturing);
                        if report.continues_capturing {
                            println!("Keep capturing with the piece at {}.", to);
                        }
                        return Ok(true);
                    }
                    Err(err) => println!("Illegal move: {err}"),
                }
            }
            [] => {}
            _ => println!("Unrecognized command."),
        }
    }
}

fn parse_space(x: &str, y: &str) -> Option<BoardSpace> {
    Some(BoardSpace::new(x.parse().ok()?, y.parse().ok()?))
}

fn announce(player: Player, mv: Move, captured: bool, continues: bool) {
    let action = if captured { "captures at" } else { "moves to" };
    let tail = if continues { ", chain continues" } else { "" };
    println!("{} {} {} from {}{}", player, action, mv.to, mv.from, tail);
}
