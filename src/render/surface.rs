//! The drawing contract between the engine and its rendering backend

use glam::Vec2;

/// RGBA color, components in [0, 1]
pub type Color = [f32; 4];

/// Fill style for circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// Two-stop radial gradient, inner to outer
    Radial { inner: Color, outer: Color },
}

/// Minimum primitive set the render pass requires.
///
/// Implementations draw in playfield pixel coordinates, origin top-left,
/// y increasing downward. Translation and alpha are global state scoped by
/// the caller: every `push_translate` is paired with a `pop_translate`, and
/// alpha is restored to 1.0 before the pass ends.
pub trait Surface {
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_round_rect(&mut self, pos: Vec2, size: Vec2, radius: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill);
    /// Draw `text` with its baseline-left anchor at `pos`
    fn text(&mut self, pos: Vec2, px: f32, text: &str, color: Color);
    /// Global alpha applied to subsequent fills
    fn set_alpha(&mut self, alpha: f32);
    /// Push a translation applied to subsequent draws
    fn push_translate(&mut self, offset: Vec2);
    /// Pop the most recent translation
    fn pop_translate(&mut self);
}

/// Surface that draws nothing; for headless runs and benchmarks
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _pos: Vec2, _size: Vec2, _color: Color) {}
    fn fill_round_rect(&mut self, _pos: Vec2, _size: Vec2, _radius: f32, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _fill: Fill) {}
    fn text(&mut self, _pos: Vec2, _px: f32, _text: &str, _color: Color) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn push_translate(&mut self, _offset: Vec2) {}
    fn pop_translate(&mut self) {}
}
