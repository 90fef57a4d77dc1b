use super::*;
use rand::rngs::mock::StepRng;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::seeded(7);
    let board = Board::from_diagram("X.O .X. O..", Player::Two).unwrap();

    let mv = engine.select_move(&board, Player::Two).unwrap();

    assert_eq!(mv.player(), Player::Two);
    assert!(board.legal_moves(Player::Two).any(|m| m == mv));
    assert!(board.clone().apply_move(mv).is_ok());
}

#[test]
fn random_engine_fails_on_full_board() {
    let mut engine = RandomEngine::seeded(7);
    let board = Board::from_diagram("XOX XOO OXX", Player::Two).unwrap();

    let err = engine.select_move(&board, Player::Two).unwrap_err();

    assert_eq!(
        err,
        EngineError::NoLegalMove {
            player: Player::Two
        }
    );
}

#[test]
fn same_seed_gives_same_choices() {
    let board = Board::new(9).unwrap();
    let mut a = RandomEngine::seeded(42);
    let mut b = RandomEngine::seeded(42);

    for _ in 0..20 {
        assert_eq!(
            a.select_move(&board, Player::One).unwrap(),
            b.select_move(&board, Player::One).unwrap()
        );
    }
}

#[test]
fn injected_rng_drives_the_choice() {
    // A constant-zero generator always picks the first empty cell in scan order.
    let mut engine = RandomEngine::with_rng(StepRng::new(0, 0));
    let board = Board::from_diagram("XO. ... ...", Player::One).unwrap();

    let mv = engine.select_move(&board, Player::One).unwrap();

    assert_eq!(mv, Move::new(0, 2, Player::One));
}

#[test]
fn choices_cover_the_board_roughly_uniformly() {
    let mut engine = RandomEngine::seeded(2024);
    let board = Board::new(3).unwrap();
    let mut counts = [0u32; 9];

    for _ in 0..9000 {
        let mv = engine.select_move(&board, Player::One).unwrap();
        counts[mv.row() * 3 + mv.col()] += 1;
    }

    for (cell, &n) in counts.iter().enumerate() {
        assert!((800..1200).contains(&n), "cell {cell} chosen {n} times");
    }
}

#[test]
fn does_not_mutate_the_board() {
    let mut engine = RandomEngine::seeded(1);
    let board = Board::new(4).unwrap();
    let before = board.clone();

    engine.select_move(&board, Player::One).unwrap();

    assert_eq!(board, before);
}

#[test]
fn random_engine_fails_on_won_board() {
    let mut engine = RandomEngine::seeded(7);
    let board = Board::from_diagram("XXX OO. ...", Player::Two).unwrap();
    assert!(board.legal_moves(Player::Two).count() > 0);

    assert_eq!(
        engine.select_move(&board, Player::Two),
        Err(EngineError::NoLegalMove {
            player: Player::Two
        })
    );
}
