//! Neon 2048 demo harness
//!
//! Plays one seeded random game to completion in the terminal. Exists to
//! exercise the engine end to end; real front ends drive the same API.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use neon_2048::{BestScore, Direction, GameConfig, GameState, GameStatus};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    let config = GameConfig::default();
    let mut state = GameState::new(config, seed).expect("default config is valid");
    let mut dice = Pcg32::seed_from_u64(seed ^ 0x5EED);
    let mut best = BestScore::new();

    while state.status == GameStatus::Playing {
        let dir = Direction::ALL[dice.random_range(0..4)];
        state.apply_move(dir);
    }

    best.observe(state.score, state.grid.highest_tile());
    best.record_game();

    println!("{}", state.grid);
    println!(
        "seed {seed}: {:?} with {} points in {} moves (best tile {})",
        state.status,
        state.score,
        state.moves_played,
        state.grid.highest_tile()
    );
}
