//! BrickBloom - a paddle-and-ball brick-breaking arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, field construction, physics, particles)
//! - `game`: Session state machine (menu/playing/paused/transition/game over)
//! - `render`: Read-only mapping from simulation state to an abstract 2D surface
//! - `audio`: Named sound-cue service interface
//! - `persistence`: High score + settings storage

pub mod audio;
pub mod game;
pub mod persistence;
pub mod render;
pub mod sim;

pub use audio::{AudioSink, Cue, NullAudio};
pub use game::{FrameInput, Game, Mode};
pub use persistence::{FileStore, MemStore, SaveData, Store};

/// Game configuration constants
pub mod consts {
    /// Reference frame interval for delta normalization (60 Hz)
    pub const REF_FRAME_MS: f64 = 16.666_7;
    /// Elapsed wall time is clamped to this before normalizing (stall guard)
    pub const MAX_FRAME_MS: f64 = 40.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_MIN_WIDTH: f32 = 80.0;
    pub const PADDLE_MAX_WIDTH: f32 = 220.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    /// Distance from the bottom edge to the paddle top
    pub const PADDLE_FLOOR_OFFSET: f32 = 40.0;
    /// Side margin the paddle is clamped to
    pub const PADDLE_MARGIN: f32 = 8.0;
    /// Fraction of the remaining distance to the follow target covered per tick
    pub const PADDLE_FOLLOW: f32 = 0.35;
    /// Vertical slack below the paddle top that still counts as contact
    pub const PADDLE_BAND: f32 = 8.0;
    /// Horizontal slack beyond the paddle edges that still counts as contact
    pub const PADDLE_REACH: f32 = 4.0;
    /// Enlarge power-up growth factor
    pub const PADDLE_ENLARGE: f32 = 1.4;
    /// Enlarged paddle width is capped at field width minus this
    pub const PADDLE_ENLARGE_MARGIN: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Spawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 60.0;
    pub const BALL_BASE_VX: f32 = 3.0;
    pub const BALL_VX_PER_LEVEL: f32 = 0.2;
    pub const BALL_BASE_VY: f32 = 4.0;
    pub const BALL_VY_PER_LEVEL: f32 = 0.15;
    /// Multiplicative speed-up per non-fire brick hit
    pub const BALL_SPEEDUP: f32 = 1.02;
    /// Maximum paddle-reflection angle off vertical (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
    /// Velocity rotation applied to multi-ball children (~11.5 degrees)
    pub const SPLIT_ANGLE: f32 = 0.2;

    /// Brick grid
    pub const BRICK_HEIGHT: f32 = 22.0;
    pub const BRICK_SPACING: f32 = 6.0;
    pub const BRICK_ROW_PITCH: f32 = 28.0;
    pub const BRICK_BASE_ROWS: u32 = 4;
    pub const BRICK_MAX_EXTRA_ROWS: u32 = 6;
    /// Fields narrower than this get the 5-column layout
    pub const NARROW_FIELD: f32 = 400.0;
    /// Percentage of bricks flagged as purely decorative
    pub const ORNAMENT_PCT: u32 = 12;

    /// Power-ups
    /// Fall speed, px per reference frame
    pub const POWERUP_FALL_SPEED: f32 = 1.3;
    /// Drop chance on brick destruction, percent
    pub const POWERUP_DROP_PCT: u32 = 12;
    /// Wall-clock duration of sticky/fire/slow effects
    pub const POWERUP_DURATION_MS: f64 = 10_000.0;
    /// Distance below the bottom edge at which an uncaught drop is culled
    pub const POWERUP_CULL_MARGIN: f32 = 40.0;
    /// Ball displacement factor while slow mode is active
    pub const SLOW_FACTOR: f32 = 0.6;

    /// Run state
    pub const LIVES_START: u8 = 3;
    pub const LIVES_MAX: u8 = 9;
    /// Score bonus per completed level is this times the new level number
    pub const LEVEL_BONUS: u64 = 50;
    /// Level-clear transition length
    pub const TRANSITION_MS: f64 = 2_000.0;

    /// Screen shake
    pub const SHAKE_DECAY: f32 = 0.5;
    pub const GAMEOVER_SHAKE: f32 = 20.0;
    pub const FIRE_BREAK_SHAKE: f32 = 5.0;

    /// Particles
    /// Life lost per reference frame
    pub const PARTICLE_LIFE_DECAY: f32 = 0.02;
    /// Downward acceleration on debris per reference frame
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    /// Upward spawn bias for sparkle particles
    pub const SPARKLE_LIFT: f32 = 2.0;
    /// Burst sizes for brick debris and power-up catch sparkles
    pub const DEBRIS_BURST: u32 = 8;
    pub const SPARKLE_BURST: u32 = 12;
}
