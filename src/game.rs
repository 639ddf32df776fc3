//! Frame driver
//!
//! [`Game`] owns one [`GameSession`] and everything around it: the input
//! intent written by event handlers, the deferred level start and the
//! score/sound sinks. Hosts call [`Game::update`] then [`Game::render`] once
//! per frame, and forward input events in between.

use crate::audio::{SoundEffect, SoundSink};
use crate::platform::{Control, InputState, ScoreSink, control_for_key};
use crate::renderer::{DrawBackend, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameSession, Scheduler, TaskToken, tick};

/// Work deferred to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Generate the bricks for the current level and go to Ready
    StartLevel,
}

/// One running game
pub struct Game {
    session: GameSession,
    input: InputState,
    scheduler: Scheduler<Deferred>,
    /// Pending level start after a cleared level
    level_advance: Option<TaskToken>,
    settings: Settings,
    score_sink: Box<dyn ScoreSink>,
    sound_sink: Box<dyn SoundSink>,
}

impl Game {
    pub fn new(
        width: f32,
        height: f32,
        settings: Settings,
        seed: u64,
        score_sink: Box<dyn ScoreSink>,
        sound_sink: Box<dyn SoundSink>,
    ) -> Self {
        let session = GameSession::new(width, height, settings.start_lives, seed);
        let mut game = Self {
            session,
            input: InputState::default(),
            scheduler: Scheduler::new(),
            level_advance: None,
            settings,
            score_sink,
            sound_sink,
        };
        game.show_score();
        game
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a level start is waiting on the level-complete delay
    pub fn level_advance_pending(&self) -> bool {
        self.level_advance
            .is_some_and(|token| self.scheduler.is_pending(token))
    }

    /// Key pressed (DOM key name). Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.press(control);
                true
            }
            None => false,
        }
    }

    /// Key released (DOM key name). Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        match control_for_key(key) {
            Some(control) => {
                self.release(control);
                true
            }
            None => false,
        }
    }

    pub fn press(&mut self, control: Control) {
        self.input.press(control);
        if control == Control::Start {
            self.start();
        }
    }

    pub fn release(&mut self, control: Control) {
        self.input.release(control);
    }

    /// Pointer moved; `x` is relative to the play area's left edge
    pub fn pointer_moved(&mut self, x: f32) {
        self.input.pointer_moved(x);
    }

    /// Drop all held input (window lost focus)
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Start/restart signal: serve from Ready, full reset from GameOver
    pub fn start(&mut self) {
        match self.session.phase {
            GamePhase::Ready => {
                self.session.phase = GamePhase::Playing;
                log::info!("Level {} started", self.session.level);
            }
            GamePhase::GameOver => self.reset_game(),
            GamePhase::Playing | GamePhase::LevelComplete => {}
        }
    }

    /// Score 0, full lives, level 1, Ready. Cancels a pending level start.
    pub fn reset_game(&mut self) {
        self.cancel_level_advance();
        self.session.reset();
        self.show_score();
    }

    /// Adopt a new play area size and restart the current level on it.
    /// A finished game keeps its GameOver phase.
    pub fn resize(&mut self, width: f32, height: f32) {
        // The level starts right here; a pending start would be stale
        self.cancel_level_advance();
        self.session.resize(width, height);
        log::info!("Play area resized to {}x{}", width, height);
    }

    /// Advance deferred work by `dt_ms`, then run one physics tick
    pub fn update(&mut self, dt_ms: f64) {
        for (token, task) in self.scheduler.advance(dt_ms) {
            if self.level_advance == Some(token) {
                self.level_advance = None;
            }
            match task {
                Deferred::StartLevel => self.session.start_level(),
            }
        }

        let input = self.input.snapshot();
        tick(&mut self.session, &input, self.settings.paddle_speed);
        self.dispatch_events();
    }

    /// Paint the current state. Never mutates the game.
    pub fn render<B: DrawBackend + ?Sized>(&self, backend: &mut B) {
        draw_frame(&self.session, backend);
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Bounce => self.sound_sink.play(SoundEffect::Bounce),
                GameEvent::BrickBroken { .. } => {
                    self.show_score();
                    self.sound_sink.play(SoundEffect::Break);
                }
                GameEvent::LifeLost { .. } => self.show_score(),
                GameEvent::LevelCleared { .. } => {
                    self.cancel_level_advance();
                    let token = self
                        .scheduler
                        .schedule(self.settings.level_complete_delay_ms, Deferred::StartLevel);
                    self.level_advance = Some(token);
                }
            }
        }
    }

    fn cancel_level_advance(&mut self) {
        if let Some(token) = self.level_advance.take() {
            if self.scheduler.cancel(token) {
                log::debug!("Cancelled pending level start");
            }
        }
    }

    fn show_score(&mut self) {
        self.score_sink.show(self.session.score, self.session.lives);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::renderer::RecordingBackend;
    use crate::sim::Brick;

    #[derive(Default, Clone)]
    struct Recorder {
        scores: Rc<RefCell<Vec<(u64, u32)>>>,
        sounds: Rc<RefCell<Vec<SoundEffect>>>,
    }

    impl ScoreSink for Recorder {
        fn show(&mut self, score: u64, lives: u32) {
            self.scores.borrow_mut().push((score, lives));
        }
    }

    impl SoundSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.borrow_mut().push(effect);
        }
    }

    fn game() -> (Game, Recorder) {
        let rec = Recorder::default();
        let game = Game::new(
            800.0,
            600.0,
            Settings::default(),
            9,
            Box::new(rec.clone()),
            Box::new(rec.clone()),
        );
        (game, rec)
    }

    /// One brick right above the ball so the next tick clears the level
    fn arm_last_brick(game: &mut Game) {
        let session = game.session_mut();
        session.bricks = vec![Brick {
            pos: Vec2::new(380.0, 280.0),
            size: Vec2::new(40.0, 20.0),
            color: [1.0, 0.0, 0.0],
            points: 60,
            visible: true,
        }];
        session.ball.pos = Vec2::new(400.0, 296.0);
        session.ball.vel = Vec2::new(0.0, -4.0);
    }

    #[test]
    fn test_initial_state() {
        let (game, rec) = game();
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.session().bricks.len(), 60);
        assert_eq!(*rec.scores.borrow(), vec![(0, 3)]);
    }

    #[test]
    fn test_ready_waits_for_start() {
        let (mut game, _) = game();
        let ball = game.session().ball.clone();
        game.update(16.0);
        assert_eq!(game.session().ball, ball);

        assert!(game.key_down(" "));
        assert_eq!(game.phase(), GamePhase::Playing);
        game.update(16.0);
        assert_ne!(game.session().ball.pos, ball.pos);
    }

    #[test]
    fn test_unbound_key() {
        let (mut game, _) = game();
        assert!(!game.key_down("Enter"));
        assert!(!game.key_up("x"));
        assert_eq!(game.phase(), GamePhase::Ready);
    }

    #[test]
    fn test_held_key_moves_paddle_each_tick() {
        let (mut game, _) = game();
        game.start();
        let x0 = game.session().paddle.pos.x;
        game.key_down("ArrowRight");
        game.update(16.0);
        game.update(16.0);
        assert_eq!(game.session().paddle.pos.x, x0 + 16.0);
        game.key_up("ArrowRight");
        game.update(16.0);
        assert_eq!(game.session().paddle.pos.x, x0 + 16.0);
    }

    #[test]
    fn test_brick_break_notifies_sinks() {
        let (mut game, rec) = game();
        arm_last_brick(&mut game);
        game.session_mut().bricks.push(Brick {
            pos: Vec2::new(10.0, 10.0),
            size: Vec2::new(10.0, 10.0),
            color: [0.0, 0.0, 1.0],
            points: 10,
            visible: true,
        });
        game.start();
        game.update(16.0);

        assert_eq!(game.session().score, 60);
        assert_eq!(rec.scores.borrow().last(), Some(&(60, 3)));
        assert_eq!(*rec.sounds.borrow(), vec![SoundEffect::Break]);
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_level_complete_then_next_level_after_delay() {
        let (mut game, _) = game();
        arm_last_brick(&mut game);
        game.start();
        game.update(16.0);

        assert_eq!(game.phase(), GamePhase::LevelComplete);
        assert_eq!(game.session().level, 2);
        assert!(game.level_advance_pending());

        // Start is ignored while the level-complete banner shows
        game.start();
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        game.update(1400.0);
        assert_eq!(game.phase(), GamePhase::LevelComplete);

        game.update(100.0);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert!(!game.level_advance_pending());
        // Level 2: 7 rows x 10 columns
        assert_eq!(game.session().bricks.len(), 70);
        assert_eq!(game.session().bricks[0].points, 70);
        assert_eq!(game.session().ball.pos, Vec2::new(400.0, 550.0));
    }

    #[test]
    fn test_reset_cancels_pending_level_start() {
        let (mut game, _) = game();
        arm_last_brick(&mut game);
        game.start();
        game.update(16.0);
        assert!(game.level_advance_pending());

        game.reset_game();
        assert!(!game.level_advance_pending());
        assert_eq!(game.session().level, 1);

        game.start();
        game.update(2000.0);
        // A stale level start would have dropped us back to Ready
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.session().level, 1);
    }

    #[test]
    fn test_resize_cancels_pending_level_start() {
        let (mut game, _) = game();
        arm_last_brick(&mut game);
        game.start();
        game.update(16.0);

        game.resize(400.0, 300.0);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.session().bricks.len(), 70);
        assert!(!game.level_advance_pending());
    }

    #[test]
    fn test_resize_keeps_game_over() {
        let (mut game, _) = game();
        {
            let session = game.session_mut();
            session.lives = 1;
            session.score = 450;
            session.level = 3;
            session.ball.pos = Vec2::new(100.0, 595.0);
            session.ball.vel = Vec2::new(0.0, 4.0);
        }
        game.start();
        game.update(16.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        let ball = game.session().ball.clone();

        game.resize(700.0, 500.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        let s = game.session();
        assert_eq!((s.score, s.lives, s.level), (450, 0, 3));
        assert_eq!(s.ball, ball);
        assert_eq!(s.bricks.len(), 80);
        assert!(s.bricks.iter().all(|b| b.pos.x + b.size.x <= 700.0));

        game.update(16.0);
        assert_eq!(game.session().ball, ball);
        assert_eq!(game.phase(), GamePhase::GameOver);

        // Only a full reset leaves GameOver
        game.key_down(" ");
        let s = game.session();
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!((s.score, s.lives, s.level), (0, 3, 1));
    }

    #[test]
    fn test_game_over_and_restart() {
        let (mut game, rec) = game();
        {
            let session = game.session_mut();
            session.lives = 1;
            session.score = 450;
            session.level = 3;
            session.ball.pos = Vec2::new(100.0, 595.0);
            session.ball.vel = Vec2::new(0.0, 4.0);
        }
        game.start();
        game.update(16.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(rec.scores.borrow().last(), Some(&(450, 0)));

        let frozen = game.session().ball.clone();
        game.update(16.0);
        assert_eq!(game.session().ball, frozen);

        game.key_down(" ");
        assert_eq!(game.phase(), GamePhase::Ready);
        let s = game.session();
        assert_eq!((s.score, s.lives, s.level), (0, 3, 1));
        assert_eq!(s.bricks.len(), 60);
        assert_eq!(rec.scores.borrow().last(), Some(&(0, 3)));
    }

    #[test]
    fn test_bounce_sound() {
        let (mut game, rec) = game();
        {
            let session = game.session_mut();
            session.ball.pos = Vec2::new(400.0, 10.0);
            session.ball.vel = Vec2::new(0.0, -4.0);
            session.bricks.retain(|b| b.pos.x > 500.0);
        }
        game.start();
        game.update(16.0);
        assert_eq!(*rec.sounds.borrow(), vec![SoundEffect::Bounce]);
    }

    #[test]
    fn test_render_overlay_follows_phase() {
        let (mut game, _) = game();
        let mut backend = RecordingBackend::new();
        game.render(&mut backend);
        assert_eq!(backend.texts(), vec!["PRESS SPACE TO START"]);

        game.start();
        game.render(&mut backend);
        assert!(backend.texts().is_empty());
    }
}
