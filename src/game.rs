//! Session state machine and frame driver
//!
//! Owns the run state, the active playfield, the collaborator handles, and
//! the deferred-timer queue. The physics tick reports what happened through
//! `TickEvent`s; everything with a side effect outside the playfield (mode
//! changes, sound dispatch, timers, persistence) is orchestrated here.

use crate::audio::{AudioSink, Cue};
use crate::consts::*;
use crate::persistence::{SaveData, Store};
use crate::render::{Surface, draw_frame};
use crate::sim::field;
use crate::sim::state::{Playfield, PowerUpKind, RunState};
use crate::sim::tick::{TickEvent, TickInput, tick};

/// Session mode. Physics runs only in `Playing`; rendering runs everywhere
/// on the last-known snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
    Transition,
    GameOver,
}

#[derive(Debug, Clone, Copy)]
enum TimerAction {
    /// Sticky paddle effect wore off
    ReleaseSticky,
    /// Level-clear delay elapsed; build the next field
    FinishTransition,
}

/// A deferred side effect keyed by a wall-clock deadline. `epoch` is the
/// playfield generation that scheduled it; a stale timer must not mutate the
/// field that replaced it.
#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline_ms: f64,
    epoch: u64,
    action: TimerAction,
}

/// Per-frame input sampled by the embedding environment
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Pointer x in playfield coordinates
    pub target_x: Option<f32>,
    /// Discrete activate edge (click/tap): releases sticky balls, starts a
    /// run from menu/game-over, resumes from pause
    pub activate: bool,
}

/// One game session: state machine, run bookkeeping, collaborators.
pub struct Game {
    mode: Mode,
    run: RunState,
    field: Playfield,
    audio: Box<dyn AudioSink>,
    store: Box<dyn Store>,
    save: SaveData,
    timers: Vec<Timer>,
    viewport: (f32, f32),
    seed: u64,
    next_epoch: u64,
    last_time_ms: f64,
    new_high_score: bool,
    /// Event scratch buffer, reused across frames
    events: Vec<TickEvent>,
}

impl Game {
    /// Build a session for the given viewport. Loads persisted data up front;
    /// a failing store just yields defaults.
    pub fn new(
        w: f32,
        h: f32,
        seed: u64,
        mut audio: Box<dyn AudioSink>,
        mut store: Box<dyn Store>,
    ) -> Self {
        let save = store.load();
        audio.set_enabled(save.settings.sound);
        Self {
            mode: Mode::Menu,
            run: RunState::new_run(1),
            // menu backdrop; replaced when a run starts
            field: field::build(w, h, 1, 0, seed),
            audio,
            store,
            save,
            timers: Vec::new(),
            viewport: (w, h),
            seed,
            next_epoch: 1,
            last_time_ms: 0.0,
            new_high_score: false,
            events: Vec::new(),
        }
    }

    /// Advance one display frame: input edges, due timers, at most one
    /// physics update (only while playing), exactly one render pass.
    pub fn frame(&mut self, now_ms: f64, input: &FrameInput, surface: &mut dyn Surface) {
        if input.activate {
            self.activate();
        }
        self.fire_due_timers(now_ms);

        if self.mode == Mode::Playing {
            let elapsed = (now_ms - self.last_time_ms).clamp(0.0, MAX_FRAME_MS);
            let delta = (elapsed / REF_FRAME_MS) as f32;
            let mut events = std::mem::take(&mut self.events);
            tick(
                &mut self.field,
                &mut self.run,
                &TickInput {
                    target_x: input.target_x,
                },
                delta,
                now_ms,
                &mut events,
            );
            for event in events.drain(..) {
                self.dispatch(event, now_ms);
            }
            self.events = events;
        }
        self.last_time_ms = now_ms;

        draw_frame(surface, &self.field, &self.run, self.save.high_score);
    }

    /// Start a fresh run at level 1
    pub fn start(&mut self) {
        self.reset_field(1, false);
        self.new_high_score = false;
        self.mode = Mode::Playing;
        log::info!("run started");
    }

    /// Pause widget hook; only meaningful from Playing/Paused
    pub fn set_paused(&mut self, paused: bool) {
        match (self.mode, paused) {
            (Mode::Playing, true) => self.mode = Mode::Paused,
            (Mode::Paused, false) => self.mode = Mode::Playing,
            _ => {}
        }
    }

    /// Viewport change. A resize mid-run rebuilds the field at the current
    /// level; in-flight balls/bricks/power-ups are discarded, the run's
    /// score and lives survive.
    pub fn resize(&mut self, w: f32, h: f32) {
        self.viewport = (w, h);
        if self.mode == Mode::Playing {
            let level = self.run.level;
            self.reset_field(level, true);
        }
    }

    /// Quit to the menu (game-over / pause overlay button)
    pub fn to_menu(&mut self) {
        if matches!(self.mode, Mode::GameOver | Mode::Paused) {
            self.mode = Mode::Menu;
        }
    }

    /// Enable/disable sound and persist the preference
    pub fn set_sound(&mut self, on: bool) {
        self.save.settings.sound = on;
        self.audio.set_enabled(on);
        self.store.save(&self.save);
    }

    /// Master volume passthrough, [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u64 {
        self.run.score
    }

    pub fn lives(&self) -> u8 {
        self.run.lives
    }

    pub fn level(&self) -> u32 {
        self.run.level
    }

    pub fn high_score(&self) -> u64 {
        self.save.high_score
    }

    /// Did the run that just ended set a new high score?
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    fn activate(&mut self) {
        match self.mode {
            Mode::Menu | Mode::GameOver => self.start(),
            Mode::Paused => self.mode = Mode::Playing,
            Mode::Playing => {
                for ball in &mut self.field.balls {
                    ball.sticky = false;
                }
            }
            Mode::Transition => {}
        }
    }

    /// Replace the playfield wholesale for `level`. Timed modes and shake
    /// never survive a field swap; score and lives do when preserving.
    fn reset_field(&mut self, level: u32, preserve_score: bool) {
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        let field_seed = self.seed.wrapping_add(epoch.wrapping_mul(2654435761));
        self.field = field::build(self.viewport.0, self.viewport.1, level, epoch, field_seed);
        if preserve_score {
            self.run.level = level;
            self.run.fire_mode = false;
            self.run.slow_mode = false;
            self.run.shake = 0.0;
        } else {
            self.run = RunState::new_run(level);
        }
    }

    fn dispatch(&mut self, event: TickEvent, now_ms: f64) {
        match event {
            TickEvent::Cue(cue) => self.audio.play(cue),
            TickEvent::PowerUpCaught(PowerUpKind::Sticky) => {
                self.timers.push(Timer {
                    deadline_ms: now_ms + POWERUP_DURATION_MS,
                    epoch: self.field.epoch,
                    action: TimerAction::ReleaseSticky,
                });
            }
            TickEvent::PowerUpCaught(_) => {}
            TickEvent::LevelCleared => {
                self.mode = Mode::Transition;
                self.audio.play(Cue::LevelComplete);
                self.timers.push(Timer {
                    deadline_ms: now_ms + TRANSITION_MS,
                    epoch: self.field.epoch,
                    action: TimerAction::FinishTransition,
                });
            }
            TickEvent::GameOver => {
                self.mode = Mode::GameOver;
                if self.run.score > self.save.high_score {
                    self.save.high_score = self.run.score;
                    self.store.save(&self.save);
                    self.new_high_score = true;
                    log::info!("new high score: {}", self.run.score);
                }
            }
        }
    }

    fn fire_due_timers(&mut self, now_ms: f64) {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline_ms <= now_ms {
                due.push(self.timers.swap_remove(i));
            } else {
                i += 1;
            }
        }
        for timer in due {
            match timer.action {
                TimerAction::ReleaseSticky => {
                    // drop silently if the field it armed no longer exists
                    if timer.epoch == self.field.epoch {
                        self.field.paddle.sticky = false;
                    }
                }
                TimerAction::FinishTransition => {
                    if self.mode == Mode::Transition {
                        let next = self.run.level + 1;
                        self.reset_field(next, true);
                        self.run.lives = (self.run.lives + 1).min(LIVES_MAX);
                        self.run.score += LEVEL_BONUS * next as u64;
                        self.mode = Mode::Playing;
                        log::info!("level {next}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::{BALL_RADIUS, LIVES_START};
    use crate::persistence::MemStore;
    use crate::render::NullSurface;
    use crate::sim::field::rows_for_level;
    use crate::sim::state::Ball;

    /// Cue sink shared with the test body
    #[derive(Default, Clone)]
    struct CueLog(Rc<RefCell<Vec<Cue>>>);

    impl AudioSink for CueLog {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
        fn set_volume(&mut self, _volume: f32) {}
        fn set_enabled(&mut self, _enabled: bool) {}
    }

    /// Store backed by shared memory so tests can observe writes
    #[derive(Default, Clone)]
    struct SharedStore(Rc<RefCell<SaveData>>);

    impl Store for SharedStore {
        fn load(&mut self) -> SaveData {
            self.0.borrow().clone()
        }
        fn save(&mut self, data: &SaveData) {
            *self.0.borrow_mut() = data.clone();
        }
    }

    fn test_game() -> Game {
        Game::new(
            800.0,
            600.0,
            1234,
            Box::new(NullAudio),
            Box::new(MemStore::default()),
        )
    }

    fn drive(game: &mut Game, now_ms: f64, input: FrameInput) {
        game.frame(now_ms, &input, &mut NullSurface);
    }

    fn drop_ball_through_floor(game: &mut Game) {
        game.field.balls = vec![Ball {
            pos: Vec2::new(400.0, 590.0),
            vel: Vec2::new(0.0, 50.0),
            r: BALL_RADIUS,
            sticky: false,
        }];
    }

    #[test]
    fn activate_from_menu_starts_a_run() {
        let mut game = test_game();
        assert_eq!(game.mode(), Mode::Menu);
        drive(&mut game, 0.0, FrameInput {
            target_x: None,
            activate: true,
        });
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), LIVES_START);
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn pause_freezes_physics_but_still_renders() {
        let mut game = test_game();
        game.start();
        drive(&mut game, 16.0, FrameInput::default());
        let ticks = game.field.tick;
        game.set_paused(true);
        drive(&mut game, 32.0, FrameInput::default());
        drive(&mut game, 48.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::Paused);
        assert_eq!(game.field.tick, ticks);
        // activate resumes
        drive(&mut game, 64.0, FrameInput {
            target_x: None,
            activate: true,
        });
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.field.tick, ticks + 1);
    }

    #[test]
    fn level_clear_runs_the_full_transition() {
        let mut game = test_game();
        game.start();
        game.run.score = 123;
        let lives_before = game.run.lives;
        // one brick left, destroyed by an overlapping ball this tick
        game.field.bricks.truncate(1);
        game.field.bricks[0].pos = Vec2::new(100.0, 100.0);
        game.field.bricks[0].size = Vec2::new(40.0, 22.0);
        game.field.bricks[0].hp = 1;
        game.field.bricks[0].max_hp = 1;
        game.field.balls = vec![Ball {
            pos: Vec2::new(120.0, 130.0),
            vel: Vec2::new(0.0, -5.0),
            r: BALL_RADIUS,
            sticky: false,
        }];
        drive(&mut game, 16.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::Transition);
        assert_eq!(game.score(), 133);

        // transition holds until the 2s deadline
        drive(&mut game, 1000.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::Transition);

        drive(&mut game, 2100.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.level(), 2);
        assert_eq!(game.lives(), lives_before + 1);
        assert_eq!(game.score(), 133 + 100);
        assert_eq!(
            game.field.bricks.len(),
            (rows_for_level(2) * 8) as usize
        );
        assert_eq!(game.field.balls.len(), 1);
        assert!(game.field.balls[0].sticky);
    }

    #[test]
    fn game_over_reports_and_persists_high_score() {
        let store = SharedStore::default();
        let cues = CueLog::default();
        let mut game = Game::new(
            800.0,
            600.0,
            1,
            Box::new(cues.clone()),
            Box::new(store.clone()),
        );
        game.start();
        game.run.score = 999;
        game.run.lives = 1;
        drop_ball_through_floor(&mut game);
        drive(&mut game, 16.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::GameOver);
        assert!(game.new_high_score());
        assert_eq!(game.high_score(), 999);
        assert_eq!(store.0.borrow().high_score, 999);
        assert!(cues.0.borrow().contains(&Cue::GameOver));
    }

    #[test]
    fn lower_score_does_not_touch_the_high_score() {
        let store = SharedStore::default();
        store.0.borrow_mut().high_score = 5000;
        let mut game = Game::new(
            800.0,
            600.0,
            1,
            Box::new(NullAudio),
            Box::new(store.clone()),
        );
        game.start();
        game.run.score = 10;
        game.run.lives = 1;
        drop_ball_through_floor(&mut game);
        drive(&mut game, 16.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::GameOver);
        assert!(!game.new_high_score());
        assert_eq!(store.0.borrow().high_score, 5000);
    }

    #[test]
    fn sticky_release_timer_clears_after_ten_seconds() {
        let mut game = test_game();
        game.start();
        game.field.paddle.sticky = true;
        game.dispatch(TickEvent::PowerUpCaught(PowerUpKind::Sticky), 1_000.0);
        drive(&mut game, 5_000.0, FrameInput::default());
        assert!(game.field.paddle.sticky);
        drive(&mut game, 11_001.0, FrameInput::default());
        assert!(!game.field.paddle.sticky);
    }

    #[test]
    fn stale_sticky_timer_is_discarded() {
        let mut game = test_game();
        game.start();
        game.field.paddle.sticky = true;
        game.dispatch(TickEvent::PowerUpCaught(PowerUpKind::Sticky), 1_000.0);
        // resize replaces the field (new epoch); arm the new paddle manually
        game.resize(900.0, 700.0);
        game.field.paddle.sticky = true;
        drive(&mut game, 11_001.0, FrameInput::default());
        assert!(game.field.paddle.sticky);
    }

    #[test]
    fn resize_mid_run_discards_entities_but_keeps_the_run() {
        let mut game = test_game();
        game.start();
        game.run.score = 77;
        game.run.lives = 5;
        let old_epoch = game.field.epoch;
        game.resize(1024.0, 768.0);
        assert_eq!(game.field.w, 1024.0);
        assert_ne!(game.field.epoch, old_epoch);
        assert_eq!(game.score(), 77);
        assert_eq!(game.lives(), 5);
        assert_eq!(game.level(), 1);
        assert_eq!(game.mode(), Mode::Playing);
    }

    #[test]
    fn resize_in_menu_only_records_the_viewport() {
        let mut game = test_game();
        let old_epoch = game.field.epoch;
        game.resize(1024.0, 768.0);
        assert_eq!(game.field.epoch, old_epoch);
        game.start();
        assert_eq!(game.field.w, 1024.0);
    }

    #[test]
    fn activate_while_playing_releases_sticky_balls() {
        let mut game = test_game();
        game.start();
        assert!(game.field.balls[0].sticky);
        drive(&mut game, 16.0, FrameInput {
            target_x: None,
            activate: true,
        });
        assert!(!game.field.balls[0].sticky);
    }

    #[test]
    fn quit_to_menu_only_from_game_over_or_pause() {
        let mut game = test_game();
        game.start();
        game.to_menu();
        assert_eq!(game.mode(), Mode::Playing);
        game.set_paused(true);
        game.to_menu();
        assert_eq!(game.mode(), Mode::Menu);
    }

    #[test]
    fn restart_from_game_over_resets_the_run() {
        let mut game = test_game();
        game.start();
        game.run.score = 50;
        game.run.lives = 1;
        drop_ball_through_floor(&mut game);
        drive(&mut game, 16.0, FrameInput::default());
        assert_eq!(game.mode(), Mode::GameOver);
        drive(&mut game, 32.0, FrameInput {
            target_x: None,
            activate: true,
        });
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), LIVES_START);
    }
}
