//! Render contract
//!
//! A deterministic, read-only mapping from simulation state to draw calls on
//! an abstract 2D surface. The engine never touches a concrete backend; the
//! embedding environment implements `Surface` over whatever it draws with.

pub mod frame;
pub mod surface;

pub use frame::draw_frame;
pub use surface::{Color, Fill, NullSurface, Surface};
