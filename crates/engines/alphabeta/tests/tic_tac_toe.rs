//! Strength checks on the 3x3 board with three-in-a-row.

use alphabeta_engine::AlphaBetaEngine;
use grid_core::{Board, Engine, Move, Player};

#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    draws: u32,
    losses: u32,
}

/// Plays the engine as `engine_side` against every possible sequence of
/// opponent replies.
fn explore(board: &mut Board, engine: &mut AlphaBetaEngine, engine_side: Player, tally: &mut Tally) {
    match board.is_terminal() {
        (false, _) => {}
        (true, Some(p)) if p == engine_side => {
            tally.wins += 1;
            return;
        }
        (true, Some(_)) => {
            tally.losses += 1;
            return;
        }
        (true, None) => {
            tally.draws += 1;
            return;
        }
    }

    let to_move = board.to_move();
    if to_move == engine_side {
        let mv = engine.select_move(board, to_move).unwrap();
        let undo = board.make_move(mv);
        explore(board, engine, engine_side, tally);
        board.unmake_move(mv, undo);
    } else {
        let replies: Vec<Move> = board.legal_moves(to_move).collect();
        for mv in replies {
            let undo = board.make_move(mv);
            explore(board, engine, engine_side, tally);
            board.unmake_move(mv, undo);
        }
    }
}

#[test]
fn depth_three_never_loses_moving_first() {
    let mut engine = AlphaBetaEngine::new(3);
    let mut board = Board::new(3).unwrap();
    let mut tally = Tally::default();

    explore(&mut board, &mut engine, Player::One, &mut tally);

    assert_eq!(tally.losses, 0, "{tally:?}");
    assert!(tally.wins > tally.draws, "{tally:?}");
}

#[test]
fn depth_three_never_loses_as_player_two_moving_first() {
    let mut engine = AlphaBetaEngine::new(3);
    let mut board = Board::new(3).unwrap();
    board.set_to_move(Player::Two);
    let mut tally = Tally::default();

    explore(&mut board, &mut engine, Player::Two, &mut tally);

    assert_eq!(tally.losses, 0, "{tally:?}");
}

#[test]
fn opens_in_the_center() {
    let mut engine = AlphaBetaEngine::new(3);
    let board = Board::new(3).unwrap();
    assert_eq!(
        engine.select_move(&board, Player::One).unwrap(),
        Move::new(1, 1, Player::One)
    );
}
