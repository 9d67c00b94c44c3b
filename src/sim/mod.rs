//! Deterministic simulation
//!
//! All gameplay logic lives here: the entity model, field construction, the
//! per-tick physics update, and the particle subsystem. No rendering or
//! platform dependencies; randomness comes only from the playfield's seeded
//! RNG, so every behavior is reproducible in tests.

pub mod collision;
pub mod field;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Axis, circle_hits_rect, paddle_deflect, reflection_axis};
pub use state::{
    Ball, Brick, Paddle, Particle, ParticleKind, Playfield, PowerUp, PowerUpKind, RunState,
};
pub use tick::{TickEvent, TickInput, tick};
