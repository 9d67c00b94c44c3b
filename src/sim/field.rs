//! Playfield construction
//!
//! Builds a fresh paddle/ball/brick layout for a given level and viewport
//! size. Brick width is computed by integer floor so the grid tiles the
//! available width without rounding drift beyond a pixel.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Ball, Brick, Paddle, Playfield};
use crate::consts::*;

/// Number of brick rows for a level (ramps up, capped at 10)
pub fn rows_for_level(level: u32) -> u32 {
    BRICK_BASE_ROWS + level.min(BRICK_MAX_EXTRA_ROWS)
}

/// Number of brick columns for a field width (narrow-screen adaptation)
pub fn cols_for_width(w: f32) -> u32 {
    if w < NARROW_FIELD { 5 } else { 8 }
}

/// Build a fresh playfield for `level` at the given viewport size
pub fn build(w: f32, h: f32, level: u32, epoch: u64, seed: u64) -> Playfield {
    debug_assert!(w > 0.0 && h > 0.0);
    let mut rng = Pcg32::seed_from_u64(seed);

    let paddle_w = PADDLE_WIDTH.clamp(PADDLE_MIN_WIDTH, PADDLE_MAX_WIDTH);
    let paddle = Paddle {
        pos: Vec2::new(w / 2.0 - paddle_w / 2.0, h - PADDLE_FLOOR_OFFSET),
        size: Vec2::new(paddle_w, PADDLE_HEIGHT),
        follow: PADDLE_FOLLOW,
        sticky: false,
    };

    let balls = vec![Ball::spawn(w, h, level)];

    let rows = rows_for_level(level);
    let cols = cols_for_width(w);
    let padding_x = if w < 600.0 { 10.0 } else { 40.0 };
    let top = if w < 600.0 { 50.0 } else { 60.0 };
    let total_spacing = (cols - 1) as f32 * BRICK_SPACING;
    let brick_w = ((w - padding_x * 2.0 - total_spacing) / cols as f32).floor();

    let mut bricks = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            // hp climbs toward the bottom-right and with level
            let hp = 1 + (row + col + level) / 8;
            bricks.push(Brick {
                pos: Vec2::new(
                    padding_x + col as f32 * (brick_w + BRICK_SPACING),
                    top + row as f32 * BRICK_ROW_PITCH,
                ),
                size: Vec2::new(brick_w, BRICK_HEIGHT),
                hp,
                max_hp: hp,
                ornament: rng.random_range(0..100u32) < ORNAMENT_PCT,
            });
        }
    }

    log::info!("field init: level {level}, {rows}x{cols} bricks in {w}x{h}");

    Playfield {
        w,
        h,
        epoch,
        tick: 0,
        paddle,
        balls,
        bricks,
        powerups: Vec::new(),
        particles: Vec::new(),
        rng,
    }
}
