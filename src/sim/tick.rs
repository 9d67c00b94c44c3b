//! Per-tick physics and collision update
//!
//! Advances every entity by one normalized-delta step and reports what
//! happened as a list of `TickEvent`s for the state machine to act on.
//! Score and lives are mutated here; mode changes, timers, and persistence
//! belong to the caller.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{Axis, circle_hits_rect, paddle_deflect, reflection_axis};
use super::particles;
use super::state::{Ball, ParticleKind, Playfield, PowerUp, PowerUpKind, RunState};
use crate::audio::Cue;
use crate::consts::*;

/// Per-tick input sampled from the pointer
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal follow target for the paddle, if the pointer is known
    pub target_x: Option<f32>,
}

/// What a tick wants the state machine to do about it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Fire-and-forget sound trigger
    Cue(Cue),
    /// A power-up effect was applied this tick
    PowerUpCaught(PowerUpKind),
    /// Last brick destroyed; start the level transition
    LevelCleared,
    /// Lives hit zero
    GameOver,
}

/// Cumulative-weight drop table, percent out of 100
const DROP_TABLE: [(PowerUpKind, u32); 6] = [
    (PowerUpKind::Enlarge, 25),
    (PowerUpKind::Sticky, 20),
    (PowerUpKind::Multi, 15),
    (PowerUpKind::Fire, 15),
    (PowerUpKind::Slow, 15),
    (PowerUpKind::Life, 10),
];

/// Map a roll in [0, 100) onto the weighted kind table
fn kind_for_roll(roll: u32) -> PowerUpKind {
    let mut acc = 0;
    for &(kind, weight) in &DROP_TABLE {
        acc += weight;
        if roll < acc {
            return kind;
        }
    }
    // weights sum to 100, so this is unreachable for roll < 100
    PowerUpKind::Life
}

fn roll_kind(rng: &mut Pcg32) -> PowerUpKind {
    kind_for_roll(rng.random_range(0..100u32))
}

/// Debris color for a destroyed brick, keyed by its hp tier
fn debris_color(max_hp: u32) -> [f32; 4] {
    let r = if max_hp > 1 { 180.0 } else { 240.0 };
    [r / 255.0, 200.0 / 255.0, 100.0 / 255.0, 1.0]
}

const SPARKLE_GOLD: [f32; 4] = [1.0, 0.84, 0.0, 1.0];

/// Advance the playfield by one tick.
///
/// `delta` is elapsed wall time divided by the reference frame interval,
/// already clamped by the caller; `now_ms` is the wall clock used for timed
/// mode deadlines.
pub fn tick(
    field: &mut Playfield,
    run: &mut RunState,
    input: &TickInput,
    delta: f32,
    now_ms: f64,
    events: &mut Vec<TickEvent>,
) {
    field.tick += 1;

    // 1. decay visuals
    particles::update(&mut field.particles, delta);
    run.shake = (run.shake - delta * SHAKE_DECAY).max(0.0);

    // 2. expire timed modes (wall-clock deadlines, independent of tick rate)
    if run.fire_mode && now_ms > run.fire_until {
        run.fire_mode = false;
    }
    if run.slow_mode && now_ms > run.slow_until {
        run.slow_mode = false;
    }

    // 3. slow mode scales ball motion only
    let speed_mod = if run.slow_mode { SLOW_FACTOR } else { 1.0 };
    let eff_delta = delta * speed_mod;

    // 4. paddle follow
    if let Some(target_x) = input.target_x {
        field.paddle.follow_target(target_x, field.w);
    }

    // 5. ball motion, wall and paddle contact
    for ball in &mut field.balls {
        if ball.sticky {
            ball.pin_to(&field.paddle);
            continue;
        }
        ball.pos += ball.vel * eff_delta;

        if ball.pos.x - ball.r < 0.0 {
            ball.pos.x = ball.r;
            ball.vel.x = -ball.vel.x;
            events.push(TickEvent::Cue(Cue::WallBounce));
        }
        if ball.pos.x + ball.r > field.w {
            ball.pos.x = field.w - ball.r;
            ball.vel.x = -ball.vel.x;
            events.push(TickEvent::Cue(Cue::WallBounce));
        }
        if ball.pos.y - ball.r < 0.0 {
            ball.pos.y = ball.r;
            ball.vel.y = -ball.vel.y;
            events.push(TickEvent::Cue(Cue::WallBounce));
        }

        let paddle = &field.paddle;
        let bottom = ball.pos.y + ball.r;
        if bottom >= paddle.pos.y
            && bottom <= paddle.pos.y + paddle.size.y + PADDLE_BAND
            && ball.pos.x >= paddle.pos.x - PADDLE_REACH
            && ball.pos.x <= paddle.pos.x + paddle.size.x + PADDLE_REACH
            && ball.vel.y > 0.0
        {
            let rel = (ball.pos.x - paddle.center_x()) / (paddle.size.x / 2.0);
            ball.vel = paddle_deflect(rel, ball.speed());
            // nudge above the paddle so motion stays upward
            ball.pos.y = paddle.pos.y - ball.r - 1.0;
            events.push(TickEvent::Cue(Cue::PaddleHit));
            if paddle.sticky {
                ball.sticky = true;
            }
        }
    }
    // a ball whose top edge passes the bottom is lost
    let field_h = field.h;
    field.balls.retain(|b| b.pos.y - b.r <= field_h);

    // 6. all balls lost
    if field.balls.is_empty() {
        run.lives = run.lives.saturating_sub(1);
        if run.lives == 0 {
            run.shake = GAMEOVER_SHAKE;
            events.push(TickEvent::Cue(Cue::GameOver));
            events.push(TickEvent::GameOver);
            return;
        }
        field.balls.push(Ball::respawn(field.w, field_h));
        events.push(TickEvent::Cue(Cue::NewLife));
    }

    // 7. brick contact, at most one resolution per ball per tick
    for bi in 0..field.balls.len() {
        if field.balls[bi].sticky {
            continue;
        }
        let (pos, r) = (field.balls[bi].pos, field.balls[bi].r);
        let Some(i) = field
            .bricks
            .iter()
            .position(|br| circle_hits_rect(pos, r, br.pos, br.size))
        else {
            continue;
        };

        if !run.fire_mode {
            let axis = reflection_axis(pos, field.bricks[i].pos, field.bricks[i].size);
            let ball = &mut field.balls[bi];
            match axis {
                Axis::X => ball.vel.x = -ball.vel.x,
                Axis::Y => ball.vel.y = -ball.vel.y,
            }
        }

        field.bricks[i].hp -= 1;
        events.push(TickEvent::Cue(Cue::BrickHit));

        if field.bricks[i].hp == 0 {
            let brick = field.bricks.remove(i);
            events.push(TickEvent::Cue(Cue::BrickBreak));
            particles::spawn(
                &mut field.particles,
                &mut field.rng,
                brick.center(),
                debris_color(brick.max_hp),
                DEBRIS_BURST,
                ParticleKind::Debris,
            );
            if run.fire_mode {
                run.shake = FIRE_BREAK_SHAKE;
            }
            if field.rng.random_range(0..100u32) < POWERUP_DROP_PCT {
                field.powerups.push(PowerUp {
                    pos: brick.center(),
                    vy: POWERUP_FALL_SPEED,
                    kind: roll_kind(&mut field.rng),
                });
            }
            run.score += brick.max_hp as u64 * 10;
        } else {
            run.score += 5;
        }

        if !run.fire_mode {
            field.balls[bi].vel *= BALL_SPEEDUP;
        }
    }

    // 8. power-ups fall; paddle catch applies the effect exactly once
    let mut i = 0;
    while i < field.powerups.len() {
        field.powerups[i].pos.y += field.powerups[i].vy * delta;
        let pos = field.powerups[i].pos;
        let paddle = &field.paddle;
        let caught = pos.y >= paddle.pos.y
            && pos.x >= paddle.pos.x
            && pos.x <= paddle.pos.x + paddle.size.x;
        if caught {
            let p = field.powerups.remove(i);
            particles::spawn(
                &mut field.particles,
                &mut field.rng,
                p.pos,
                SPARKLE_GOLD,
                SPARKLE_BURST,
                ParticleKind::Sparkle,
            );
            events.push(TickEvent::Cue(Cue::PowerUp));
            apply_powerup(field, run, p.kind, now_ms, events);
            events.push(TickEvent::PowerUpCaught(p.kind));
        } else if pos.y > field.h + POWERUP_CULL_MARGIN {
            field.powerups.remove(i);
        } else {
            i += 1;
        }
    }

    // 9. level clear
    if field.bricks.is_empty() {
        events.push(TickEvent::LevelCleared);
    }
}

fn apply_powerup(
    field: &mut Playfield,
    run: &mut RunState,
    kind: PowerUpKind,
    now_ms: f64,
    events: &mut Vec<TickEvent>,
) {
    match kind {
        PowerUpKind::Enlarge => {
            let paddle = &mut field.paddle;
            paddle.size.x = (paddle.size.x * PADDLE_ENLARGE).min(field.w - PADDLE_ENLARGE_MARGIN);
        }
        PowerUpKind::Sticky => {
            // the release timer is the state machine's job
            field.paddle.sticky = true;
        }
        PowerUpKind::Multi => {
            events.push(TickEvent::Cue(Cue::PowerUpSplit));
            // every ball keeps flying and gains two children rotated off its
            // heading; rotation preserves speed
            let parents = field.balls.clone();
            for parent in &parents {
                for angle in [SPLIT_ANGLE, -SPLIT_ANGLE] {
                    let mut child = parent.clone();
                    child.vel = Vec2::from_angle(angle).rotate(parent.vel);
                    field.balls.push(child);
                }
            }
        }
        PowerUpKind::Fire => {
            events.push(TickEvent::Cue(Cue::PowerUpFire));
            run.fire_mode = true;
            run.fire_until = now_ms + POWERUP_DURATION_MS;
        }
        PowerUpKind::Slow => {
            run.slow_mode = true;
            run.slow_until = now_ms + POWERUP_DURATION_MS;
        }
        PowerUpKind::Life => {
            events.push(TickEvent::Cue(Cue::ExtraLife));
            run.lives = (run.lives + 1).min(LIVES_MAX);
        }
    }
}
