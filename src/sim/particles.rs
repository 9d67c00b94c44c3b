//! Short-lived visual effect particles
//!
//! Spawned in bursts by collision/catch events, advanced and culled each
//! tick. Purely cosmetic: nothing in the simulation reads particle state.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Particle, ParticleKind};
use crate::consts::{PARTICLE_GRAVITY, PARTICLE_LIFE_DECAY, SPARKLE_LIFT};

/// Spawn a burst of `count` particles at a point. Angle is uniform, speed
/// uniform in [1, 3); sparkles get an upward bias.
pub fn spawn(
    out: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: [f32; 4],
    count: u32,
    kind: ParticleKind,
) {
    for _ in 0..count {
        let angle = rng.random::<f32>() * TAU;
        let speed = rng.random::<f32>() * 2.0 + 1.0;
        let lift = if kind == ParticleKind::Sparkle {
            SPARKLE_LIFT
        } else {
            0.0
        };
        out.push(Particle {
            pos,
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - lift),
            life: 1.0,
            color,
            kind,
            size: rng.random::<f32>() * 3.0 + 2.0,
        });
    }
}

/// Advance every particle one tick and drop the dead ones
pub fn update(particles: &mut Vec<Particle>, delta: f32) {
    for p in particles.iter_mut() {
        p.life -= PARTICLE_LIFE_DECAY * delta;
        p.pos += p.vel * delta;
        if p.kind == ParticleKind::Debris {
            p.vel.y += PARTICLE_GRAVITY * delta;
        }
    }
    particles.retain(|p| p.life > 0.0);
}
