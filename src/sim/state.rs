//! Entity model and run-state bookkeeping
//!
//! Everything one playfield owns lives here. Entities are plain data; the
//! per-tick rules that move them are in `tick`.

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::consts::*;

/// The player's paddle. One per playfield, re-created on field reset.
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fraction of the remaining follow distance covered per tick
    pub follow: f32,
    /// Caught balls re-attach instead of reflecting
    pub sticky: bool,
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Move toward a horizontal follow target (critically damped, never snaps),
    /// then clamp to the field with the side margin.
    pub fn follow_target(&mut self, target_x: f32, field_w: f32) {
        let dx = target_x - self.center_x();
        self.pos.x += dx * self.follow;
        self.pos.x = self
            .pos
            .x
            .clamp(PADDLE_MARGIN, field_w - self.size.x - PADDLE_MARGIN);
    }
}

/// A ball entity. Zero or more per playfield.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub r: f32,
    /// Pinned to the paddle until released by an activate input; velocity is
    /// ignored while set
    pub sticky: bool,
}

impl Ball {
    /// Fresh ball at the default spawn point, velocity scaled by level
    pub fn spawn(field_w: f32, field_h: f32, level: u32) -> Self {
        Self {
            pos: Vec2::new(field_w / 2.0, field_h - BALL_SPAWN_OFFSET),
            vel: Vec2::new(
                BALL_BASE_VX + BALL_VX_PER_LEVEL * level as f32,
                -(BALL_BASE_VY + BALL_VY_PER_LEVEL * level as f32),
            ),
            r: BALL_RADIUS,
            sticky: true,
        }
    }

    /// Respawn after a lost life: base velocity regardless of level
    pub fn respawn(field_w: f32, field_h: f32) -> Self {
        Self {
            pos: Vec2::new(field_w / 2.0, field_h - BALL_SPAWN_OFFSET),
            vel: Vec2::new(BALL_BASE_VX, -BALL_BASE_VY),
            r: BALL_RADIUS,
            sticky: true,
        }
    }

    /// Pin a sticky ball to the paddle center, just above its top edge
    pub fn pin_to(&mut self, paddle: &Paddle) {
        self.pos.x = paddle.center_x();
        self.pos.y = paddle.pos.y - self.r - 1.0;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A brick cell. Removed when `hp` reaches zero.
#[derive(Debug, Clone)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: u32,
    /// Hit points at creation; drives color and score weighting
    pub max_hp: u32,
    /// Purely decorative marker, no physics effect
    pub ornament: bool,
}

impl Brick {
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Power-up kinds, in drop-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Enlarge,
    Sticky,
    Multi,
    Fire,
    Slow,
    Life,
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    /// Fall speed, px per reference frame
    pub vy: f32,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Subject to gravity, rendered as a shrinking square
    Debris,
    /// No gravity, upward spawn bias, rendered as a disc
    Sparkle,
}

/// A short-lived visual effect particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in [0, 1]; alpha at render time
    pub life: f32,
    pub color: [f32; 4],
    pub kind: ParticleKind,
    pub size: f32,
}

/// Score/lives/level bookkeeping that survives field resets within one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Balls pass through bricks without reflecting while set
    pub fire_mode: bool,
    /// Wall-clock deadline (ms) for fire mode
    pub fire_until: f64,
    /// Ball motion scaled by `SLOW_FACTOR` while set
    pub slow_mode: bool,
    pub slow_until: f64,
    /// Screen-shake magnitude, decays toward zero
    pub shake: f32,
}

impl RunState {
    /// Fresh run at the given level: zero score, starting lives, no modes
    pub fn new_run(level: u32) -> Self {
        Self {
            score: 0,
            lives: LIVES_START,
            level,
            fire_mode: false,
            fire_until: 0.0,
            slow_mode: false,
            slow_until: 0.0,
            shake: 0.0,
        }
    }
}

/// The complete entity set for one active session. Exclusively owns every
/// entity container; replaced wholesale on reset and level transition.
#[derive(Debug, Clone)]
pub struct Playfield {
    pub w: f32,
    pub h: f32,
    /// Generation id; deferred timers compare against it before mutating
    pub epoch: u64,
    /// Simulation tick counter (drives hash-based render jitter)
    pub tick: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Seeded RNG for all random branching within this field's lifetime
    pub rng: Pcg32,
}
