use alphabeta_engine::AlphaBetaEngine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grid_core::{Board, Engine, Player};
use random_engine::RandomEngine;

fn mid_game_board() -> Board {
    Board::from_diagram(
        "......... ......... ..XO..... ..OX..... ....XO... ....OX... ......... ......... .........",
        Player::One,
    )
    .expect("valid diagram")
}

fn bench_alpha_beta(c: &mut Criterion) {
    let empty = Board::new(9).expect("valid size");
    let mid = mid_game_board();
    let mut engine = AlphaBetaEngine::new(2);

    c.bench_function("alphabeta_d2_empty_9x9", |b| {
        b.iter(|| engine.select_move(black_box(&empty), Player::One))
    });
    c.bench_function("alphabeta_d2_midgame_9x9", |b| {
        b.iter(|| engine.select_move(black_box(&mid), Player::One))
    });

    let mut parallel = AlphaBetaEngine::new(3).with_parallel_root(true);
    c.bench_function("alphabeta_d3_parallel_midgame_9x9", |b| {
        b.iter(|| parallel.select_move(black_box(&mid), Player::One))
    });
}

fn bench_random(c: &mut Criterion) {
    let empty = Board::new(9).expect("valid size");
    let mid = mid_game_board();
    let mut engine = RandomEngine::seeded(1);

    c.bench_function("random_empty_9x9", |b| {
        b.iter(|| engine.select_move(black_box(&empty), Player::One))
    });
    c.bench_function("random_midgame_9x9", |b| {
        b.iter(|| engine.select_move(black_box(&mid), Player::Two))
    });
}

criterion_group!(benches, bench_alpha_beta, bench_random);
criterion_main!(benches);
