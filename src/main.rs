//! Headless demo driver
//!
//! Runs the engine for up to a minute of simulated time with a scripted
//! paddle that tracks the lowest ball, then prints the resulting run state.
//! Doubles as a smoke test: the whole engine exercises without any
//! rendering or audio backend.

use std::cmp::Ordering;

use brickbloom::audio::NullAudio;
use brickbloom::persistence::FileStore;
use brickbloom::render::NullSurface;
use brickbloom::{FrameInput, Game, Mode};

const FRAME_MS: f64 = 16.667;

fn main() {
    env_logger::init();

    let mut game = Game::new(
        800.0,
        600.0,
        0xB10C_B1007,
        Box::new(NullAudio),
        Box::new(FileStore::new("brickbloom_save.json")),
    );
    let mut surface = NullSurface;

    let mut now = 0.0_f64;
    // click through the menu
    game.frame(
        now,
        &FrameInput {
            target_x: None,
            activate: true,
        },
        &mut surface,
    );

    for frame in 0..3600u32 {
        now += FRAME_MS;
        // chase the ball closest to the floor; re-serve every two seconds
        let target_x = game
            .field()
            .balls
            .iter()
            .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
            .map(|ball| ball.pos.x);
        let input = FrameInput {
            target_x,
            activate: frame % 120 == 0,
        };
        game.frame(now, &input, &mut surface);
        if game.mode() == Mode::GameOver {
            break;
        }
    }

    println!(
        "{:?} after {:.1}s: level {}, score {}, lives {}, high score {}",
        game.mode(),
        now / 1000.0,
        game.level(),
        game.score(),
        game.lives(),
        game.high_score(),
    );
}
