//! Random playthroughs, checking the board stays sane after every tick.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use gridsnake::config::{in_bounds, GameConfig, FOOD_REWARD};
use gridsnake::game::{TickOutcome, UpdateLoop};
use gridsnake::snake::Direction;
use gridsnake::state::{RunState, Snapshot};

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

fn check(snap: &Snapshot) {
    let unique: HashSet<_> = snap.snake.iter().collect();
    assert_eq!(unique.len(), snap.snake.len(), "snake overlaps itself: {:?}", snap.snake);
    assert!(snap.snake.len() >= 3);
    assert!(snap.snake.iter().all(|&p| in_bounds(p)));
    assert!(in_bounds(snap.food));
    assert!(!snap.snake.contains(&snap.food), "food {:?} on the snake", snap.food);
    assert_eq!(snap.score % FOOD_REWARD, 0);
    assert!(snap.speed_ms > 0.0);
}

fn play(seed: u64, frames: usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = UpdateLoop::new(GameConfig::with_seed(seed)).unwrap();
    let mut now = 0.0;
    game.start(now);

    let mut prev = game.snapshot();
    check(&prev);

    for _ in 0..frames {
        // Uneven frame pacing, sometimes several turns per frame
        now += rng.gen_range(1.0..40.0);
        for _ in 0..rng.gen_range(0..3) {
            game.set_pending_direction(DIRECTIONS[rng.gen_range(0..4)]);
        }

        let outcome = game.tick(now);
        let snap = game.snapshot();

        match outcome {
            TickOutcome::Waiting => assert_eq!(snap, prev),
            TickOutcome::Moved => {
                check(&snap);
                assert_eq!(snap.snake.len(), prev.snake.len());
                assert_eq!(snap.score, prev.score);
                assert!(!snap.direction.is_opposite(prev.direction));
            },
            TickOutcome::Ate { score } => {
                check(&snap);
                assert_eq!(score, prev.score + FOOD_REWARD);
                assert_eq!(snap.snake.len(), prev.snake.len() + 1);
                assert!(snap.speed_ms <= prev.speed_ms);
                assert!(!snap.direction.is_opposite(prev.direction));
            },
            TickOutcome::GameOver(_) => {
                assert_eq!(snap.snake, prev.snake);
                assert_eq!(snap.score, prev.score);
                game.start(now);
                assert_eq!(game.run_state(), RunState::Running);
            },
            TickOutcome::Idle => panic!("game should always be running here"),
        }

        prev = game.snapshot();
    }
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..20 {
        play(seed, 5_000);
    }
}

#[test]
fn seeded_games_repeat() {
    let run = |seed| {
        let mut game = UpdateLoop::new(GameConfig::with_seed(seed)).unwrap();
        game.start(0.0);
        let mut foods = vec![game.snapshot().food];
        for i in 1..50 {
            game.tick(i as f64 * 101.0);
            foods.push(game.snapshot().food);
        }
        foods
    };

    assert_eq!(run(99), run(99));
}
