//! Named sound-cue service
//!
//! The engine only knows cue names; synthesis belongs to the embedding
//! environment. `NullAudio` keeps the engine runnable fully headless.

/// Sound cues raised by the simulation and state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    WallBounce,
    PaddleHit,
    BrickHit,
    BrickBreak,
    PowerUp,
    PowerUpSplit,
    PowerUpFire,
    ExtraLife,
    LevelComplete,
    GameOver,
    NewLife,
}

/// Fire-and-forget cue sink. Calls must never block; implementations clamp
/// volume to [0, 1] and honor the enable gate for every cue.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    /// Master volume in [0, 1]
    fn set_volume(&mut self, volume: f32);
    /// Gate for all cues
    fn set_enabled(&mut self, enabled: bool);
}

/// Silent sink for headless runs and failed audio initialization
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn set_enabled(&mut self, _enabled: bool) {}
}
