//! Collision geometry for circle-vs-rect contacts
//!
//! The broad test is the standard exact-closest-point circle/rect check:
//! early-out on separating axes, accept when the center projects inside
//! either half-extent, otherwise compare squared distance to the nearest
//! corner. Reproduced exactly to avoid tunneling at edges and corners at
//! high speed.

use glam::Vec2;

use crate::consts::MAX_BOUNCE_ANGLE;

/// Does a circle overlap an axis-aligned rect given by top-left and size?
pub fn circle_hits_rect(center: Vec2, radius: f32, rect_pos: Vec2, rect_size: Vec2) -> bool {
    let half = rect_size / 2.0;
    let dist = (center - (rect_pos + half)).abs();
    if dist.x > half.x + radius {
        return false;
    }
    if dist.y > half.y + radius {
        return false;
    }
    if dist.x <= half.x || dist.y <= half.y {
        return true;
    }
    let corner = dist - half;
    corner.length_squared() <= radius * radius
}

/// Which velocity component a brick hit reflects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Flip `vx`
    X,
    /// Flip `vy`
    Y,
}

/// Reflection axis for a circle-vs-rect hit: the axis with the larger
/// normalized offset from the rect center wins; exact ties resolve to `Y`.
/// Corner hits can misclassify. That policy is part of the gameplay feel
/// and stays as-is.
pub fn reflection_axis(center: Vec2, rect_pos: Vec2, rect_size: Vec2) -> Axis {
    let half = rect_size / 2.0;
    let offset = (center - (rect_pos + half)) / half;
    if offset.x.abs() > offset.y.abs() {
        Axis::X
    } else {
        Axis::Y
    }
}

/// Paddle reflection: outgoing angle linear in the contact offset from the
/// paddle center (`rel` is -1/+1 at the physical edges), speed magnitude
/// preserved, vertical component forced upward.
pub fn paddle_deflect(rel: f32, speed: f32) -> Vec2 {
    let angle = rel * MAX_BOUNCE_ANGLE;
    Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}
