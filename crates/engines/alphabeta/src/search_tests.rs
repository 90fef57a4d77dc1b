use super::*;
use crate::eval::LineEvaluator;

fn board(diagram: &str, to_move: Player) -> Board {
    Board::from_diagram(diagram, to_move).unwrap()
}

fn best(board: &Board, player: Player, depth: u8) -> (Move, i32) {
    pick_best_move(board, player, depth, &LineEvaluator, Pruning::AlphaBeta, false)
        .best_move
        .unwrap()
}

#[test]
fn test_pick_best_move_empty_board() {
    let pos = Board::new(3).unwrap();
    let result = pick_best_move(&pos, Player::One, 3, &LineEvaluator, Pruning::AlphaBeta, false);
    let (mv, _) = result.best_move.unwrap();
    assert_eq!(mv, Move::new(1, 1, Player::One));
    assert!(result.nodes > 0);
}

#[test]
fn test_full_board_has_no_move() {
    let pos = board("XOX XOO OXX", Player::One);
    let result = pick_best_move(&pos, Player::One, 3, &LineEvaluator, Pruning::AlphaBeta, false);
    assert_eq!(result.best_move, None);
    assert_eq!(result.nodes, 0);
}

#[test]
fn test_takes_immediate_win() {
    let pos = board("XX. OO. ...", Player::One);
    let (mv, score) = best(&pos, Player::One, 3);
    assert_eq!(mv, Move::new(0, 2, Player::One));
    assert_eq!(score, WIN_SCORE - 1);
}

#[test]
fn test_blocks_immediate_loss() {
    let pos = board("OO. X.. ..X", Player::One);
    let (mv, _) = best(&pos, Player::One, 2);
    assert_eq!(mv, Move::new(0, 2, Player::One));
}

#[test]
fn test_prefers_faster_win() {
    // Both (0,2) and a slower plan win; the immediate one must be chosen.
    let pos = board("XX.. .... O... O...", Player::One);
    let pos = Board::from_diagram_with_win_length(&pos.to_string(), 3, Player::One).unwrap();
    let (mv, score) = best(&pos, Player::One, 3);
    assert_eq!(mv, Move::new(0, 2, Player::One));
    assert_eq!(score, WIN_SCORE - 1);
}

#[test]
fn test_lost_position_still_returns_a_move() {
    // O threatens two lines at once; every X move loses.
    let pos = board("OO. O.. ..X", Player::One);
    let (_, score) = best(&pos, Player::One, 2);
    assert_eq!(score, -(WIN_SCORE - 2));
}

#[test]
fn test_ties_break_in_scan_order() {
    // A flat evaluator makes every move equal at depth 1.
    let flat = |_: &Board, _: Player| 0;
    let pos = board("... .X. ...", Player::Two);
    let result = pick_best_move(&pos, Player::Two, 1, &flat, Pruning::AlphaBeta, false);
    assert_eq!(result.best_move, Some((Move::new(0, 0, Player::Two), 0)));
}

#[test]
fn test_search_restores_the_board() {
    let mut pos = board("X.. .O. ...", Player::One);
    let before = pos.clone();
    let mut search = Search::new(3, Player::One, &LineEvaluator, Pruning::AlphaBeta);
    search.alpha_beta(&mut pos, 4, -INFINITY, INFINITY, 0);
    assert_eq!(pos, before);
    assert!(search.nodes() > 0);
}

#[test]
fn test_cutoffs_feed_killers() {
    let mut pos = Board::with_win_length(4, 3).unwrap();
    let mut search = Search::new(4, Player::One, &LineEvaluator, Pruning::AlphaBeta);
    search.alpha_beta(&mut pos, 3, -INFINITY, INFINITY, 0);
    assert!((0..3).any(|ply| search.heuristics.killers_at(ply)[0].is_some()));

    let mut exhaustive = Search::new(4, Player::One, &LineEvaluator, Pruning::Exhaustive);
    exhaustive.alpha_beta(&mut pos, 2, -INFINITY, INFINITY, 0);
    assert_eq!(exhaustive.heuristics.killers_at(0), [None, None]);
}

#[test]
fn test_won_board_has_no_best_move() {
    // X already won; empty cells remain.
    let pos = board("XXX OO. ...", Player::Two);
    let result = pick_best_move(&pos, Player::Two, 3, &LineEvaluator, Pruning::AlphaBeta, false);
    assert_eq!(result.best_move, None);
    assert_eq!(result.nodes, 0);
}

#[test]
fn test_pruning_visits_fewer_nodes() {
    let pos = Board::with_win_length(4, 3).unwrap();
    let pruned = pick_best_move(&pos, Player::One, 3, &LineEvaluator, Pruning::AlphaBeta, false);
    let full = pick_best_move(&pos, Player::One, 3, &LineEvaluator, Pruning::Exhaustive, false);
    assert_eq!(pruned.best_move, full.best_move);
    assert_eq!(full.nodes, 16 + 16 * 15 + 16 * 15 * 14);
    assert!(pruned.nodes < full.nodes);
}

#[test]
fn test_ordering_prefers_contact_then_center() {
    let pos = board("X.. ... ...", Player::Two);
    let moves = SearchHeuristics::new(3).order(&pos, Player::Two, 1);
    assert_eq!(moves.len(), 8);
    // (1,1) touches the stone and is central
    assert_eq!(moves[0], Move::new(1, 1, Player::Two));
    // far corner: no contact, lowest centrality, last in scan order among equals
    assert_eq!(moves[7], Move::new(2, 2, Player::Two));
}
