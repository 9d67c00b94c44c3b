//! State-to-surface render pass
//!
//! Read-only and deterministic: the same snapshot always produces the same
//! draw calls (shake jitter hashes the tick counter instead of drawing from
//! the RNG), so the pass is safe to run every display frame at any rate.
//!
//! Draw order: shake-translated world first (background, ground, bricks,
//! power-ups, paddle, balls, particles), then the untranslated HUD on top.

use glam::Vec2;

use super::surface::{Color, Fill, Surface};
use crate::sim::state::{ParticleKind, Playfield, PowerUpKind, RunState};

const BACKGROUND: Color = [0.875, 0.965, 0.890, 1.0];
const GROUND: Color = [0.741, 0.878, 0.659, 1.0];
const GROUND_HEIGHT: f32 = 28.0;
const PADDLE_COLOR: Color = [0.314, 0.380, 0.427, 1.0];
const HUD_INK: Color = [0.059, 0.090, 0.165, 1.0];
const CAPSULE_INK: Color = [0.067, 0.067, 0.067, 1.0];
const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
const BALL_EDGE: Color = [0.490, 0.725, 0.714, 1.0];
const FIRE_CORE: Color = [1.0, 0.961, 0.961, 1.0];
const FIRE_EDGE: Color = [0.941, 0.243, 0.243, 1.0];
const ORNAMENT_MARK: &str = "\u{2740}"; // ❀

/// Color of a brick, interpolated by remaining hp
fn brick_color(hp: u32, max_hp: u32) -> Color {
    let t = hp as f32 / max_hp as f32;
    [
        (120.0 + 120.0 * (1.0 - t)) / 255.0,
        (200.0 - 80.0 * (1.0 - t)) / 255.0,
        (100.0 + 40.0 * t) / 255.0,
        1.0,
    ]
}

/// Capsule color and label for a power-up kind
fn powerup_style(kind: PowerUpKind) -> (Color, &'static str) {
    match kind {
        PowerUpKind::Enlarge => ([1.0, 0.820, 0.400, 1.0], "+P"),
        PowerUpKind::Sticky => ([0.024, 0.839, 0.627, 1.0], "S"),
        PowerUpKind::Multi => ([0.063, 0.725, 0.506, 1.0], "M"),
        PowerUpKind::Fire => ([0.937, 0.278, 0.435, 1.0], "F"),
        PowerUpKind::Slow => ([0.067, 0.541, 0.698, 1.0], "Sl"),
        PowerUpKind::Life => ([1.0, 0.565, 0.702, 1.0], "\u{2665}"),
    }
}

/// Deterministic jitter in [-0.5, 0.5) from the tick counter
fn jitter(tick: u64, salt: u64) -> f32 {
    let hash = tick
        .wrapping_mul(2654435761)
        .wrapping_add(salt.wrapping_mul(7919));
    (hash % 1000) as f32 / 1000.0 - 0.5
}

/// Draw one frame. Never mutates simulation state.
pub fn draw_frame(surface: &mut dyn Surface, field: &Playfield, run: &RunState, high_score: u64) {
    let shake = if run.shake > 0.0 {
        Vec2::new(
            jitter(field.tick, 1) * run.shake,
            jitter(field.tick, 2) * run.shake,
        )
    } else {
        Vec2::ZERO
    };
    surface.push_translate(shake);

    // background and ground strip
    surface.fill_rect(Vec2::ZERO, Vec2::new(field.w, field.h), BACKGROUND);
    surface.fill_rect(
        Vec2::new(0.0, field.h - GROUND_HEIGHT),
        Vec2::new(field.w, GROUND_HEIGHT),
        GROUND,
    );

    // bricks: color by remaining hp, hit-count label, ornament marker
    for brick in &field.bricks {
        surface.fill_round_rect(brick.pos, brick.size, 4.0, brick_color(brick.hp, brick.max_hp));
        if brick.hp > 1 {
            surface.text(
                brick.pos + Vec2::new(6.0, 16.0),
                12.0,
                &brick.hp.to_string(),
                [1.0, 1.0, 1.0, 0.2],
            );
        }
        if brick.ornament {
            surface.text(
                brick.pos + Vec2::new(brick.size.x - 22.0, 18.0),
                18.0,
                ORNAMENT_MARK,
                HUD_INK,
            );
        }
    }

    // falling power-ups
    for p in &field.powerups {
        let (color, label) = powerup_style(p.kind);
        surface.fill_circle(p.pos, 10.0, Fill::Solid(color));
        surface.text(p.pos + Vec2::new(-7.0, 4.0), 11.0, label, CAPSULE_INK);
    }

    // paddle
    surface.fill_round_rect(field.paddle.pos, field.paddle.size, 6.0, PADDLE_COLOR);
    if field.paddle.sticky {
        surface.text(
            field.paddle.pos + Vec2::new(8.0, -6.0),
            12.0,
            "STICKY",
            WHITE,
        );
    }

    // balls: radial gradient, fire mode restyles
    for ball in &field.balls {
        let fill = if run.fire_mode {
            Fill::Radial {
                inner: FIRE_CORE,
                outer: FIRE_EDGE,
            }
        } else {
            Fill::Radial {
                inner: WHITE,
                outer: BALL_EDGE,
            }
        };
        surface.fill_circle(ball.pos, ball.r, fill);
        // glint
        surface.fill_rect(
            ball.pos + Vec2::new(-1.0, -3.0),
            Vec2::splat(2.0),
            [1.0, 1.0, 1.0, 0.6],
        );
    }

    // particles: alpha by remaining life, shape by kind
    for p in &field.particles {
        surface.set_alpha(p.life);
        match p.kind {
            ParticleKind::Sparkle => surface.fill_circle(p.pos, p.size, Fill::Solid(p.color)),
            ParticleKind::Debris => {
                let sz = p.size * p.life;
                surface.fill_rect(p.pos - Vec2::splat(sz / 2.0), Vec2::splat(sz), p.color);
            }
        }
    }
    surface.set_alpha(1.0);
    surface.pop_translate();

    // HUD, unaffected by shake
    surface.text(
        Vec2::new(16.0, 24.0),
        16.0,
        &format!("Score: {}", run.score),
        HUD_INK,
    );
    surface.text(
        Vec2::new(16.0, 44.0),
        16.0,
        &format!("High: {high_score}"),
        HUD_INK,
    );
    surface.text(
        Vec2::new(field.w - 140.0, 24.0),
        16.0,
        &format!("Lives: {}", run.lives),
        HUD_INK,
    );
    surface.text(
        Vec2::new(field.w - 140.0, 44.0),
        16.0,
        &format!("Level: {}", run.level),
        HUD_INK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field;
    use crate::sim::state::{Particle, PowerUp, RunState};
    use crate::consts::POWERUP_FALL_SPEED;

    /// Records every draw call as a comparable line
    #[derive(Default)]
    struct RecordingSurface {
        commands: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
            self.commands.push(format!("rect {pos} {size} {color:?}"));
        }
        fn fill_round_rect(&mut self, pos: Vec2, size: Vec2, radius: f32, color: Color) {
            self.commands
                .push(format!("rrect {pos} {size} {radius} {color:?}"));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
            self.commands.push(format!("circle {center} {radius} {fill:?}"));
        }
        fn text(&mut self, pos: Vec2, px: f32, text: &str, color: Color) {
            self.commands.push(format!("text {pos} {px} {text} {color:?}"));
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.commands.push(format!("alpha {alpha}"));
        }
        fn push_translate(&mut self, offset: Vec2) {
            self.commands.push(format!("push {offset}"));
        }
        fn pop_translate(&mut self) {
            self.commands.push("pop".into());
        }
    }

    fn busy_field() -> (Playfield, RunState) {
        let mut field = field::build(800.0, 600.0, 3, 0, 7);
        let mut run = RunState::new_run(3);
        run.score = 420;
        run.shake = 4.0;
        field.powerups.push(PowerUp {
            pos: Vec2::new(300.0, 200.0),
            vy: POWERUP_FALL_SPEED,
            kind: PowerUpKind::Multi,
        });
        field.particles.push(Particle {
            pos: Vec2::new(120.0, 140.0),
            vel: Vec2::ZERO,
            life: 0.5,
            color: [1.0, 0.0, 0.0, 1.0],
            kind: ParticleKind::Debris,
            size: 3.0,
        });
        (field, run)
    }

    #[test]
    fn render_is_idempotent_on_unchanged_snapshot() {
        let (field, run) = busy_field();
        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        draw_frame(&mut first, &field, &run, 1000);
        draw_frame(&mut second, &field, &run, 1000);
        assert!(!first.commands.is_empty());
        assert_eq!(first.commands, second.commands);
    }

    #[test]
    fn hud_is_drawn_after_the_shake_scope_ends() {
        let (field, run) = busy_field();
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &field, &run, 1000);
        let pop_at = surface.commands.iter().rposition(|c| c == "pop").unwrap();
        let hud: Vec<_> = surface.commands[pop_at + 1..].to_vec();
        assert_eq!(hud.len(), 4);
        assert!(hud[0].contains("Score: 420"));
        assert!(hud[1].contains("High: 1000"));
        assert!(hud[2].contains("Lives:"));
        assert!(hud[3].contains("Level: 3"));
    }

    #[test]
    fn shake_translates_world_by_bounded_jitter() {
        let (field, run) = busy_field();
        let mut surface = RecordingSurface::default();
        draw_frame(&mut surface, &field, &run, 0);
        // first command is the push; jitter magnitude is bounded by shake/2
        assert!(surface.commands[0].starts_with("push"));
        let quiet = {
            let mut quiet_run = run.clone();
            quiet_run.shake = 0.0;
            let mut s = RecordingSurface::default();
            draw_frame(&mut s, &field, &quiet_run, 0);
            s.commands[0].clone()
        };
        assert_eq!(quiet, format!("push {}", Vec2::ZERO));
    }

    #[test]
    fn fire_mode_restyles_balls() {
        let (field, mut run) = busy_field();
        let mut normal = RecordingSurface::default();
        draw_frame(&mut normal, &field, &run, 0);
        run.fire_mode = true;
        let mut fired = RecordingSurface::default();
        draw_frame(&mut fired, &field, &run, 0);
        assert_ne!(normal.commands, fired.commands);
    }
}
