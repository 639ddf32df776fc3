//! Game session and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::generate_level;
use crate::consts::*;

/// RGB color, each channel in 0..=1
pub type Rgb = [f32; 3];

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball parked at the serve position, waiting for the start signal
    #[default]
    Ready,
    /// Physics active
    Playing,
    /// Lives exhausted; only a full reset leaves this phase
    GameOver,
    /// Level cleared, waiting for the next level to start
    LevelComplete,
}

/// Something the host may want to react to (sound, HUD, scheduling)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reflected off a wall or the paddle
    Bounce,
    /// A brick was destroyed and its points awarded
    BrickBroken { points: u32 },
    /// Ball left through the bottom edge
    LifeLost { lives_left: u32 },
    /// Last brick cleared; `level` is the level that was just completed
    LevelCleared { level: u32 },
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Square bound of the ball (2 * radius on each side)
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.0),
        )
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Clamp x into `[0, play_width - width]`; a paddle wider than the area sits at 0
    pub fn clamp_x(&mut self, play_width: f32) {
        self.pos.x = self.pos.x.min(play_width - self.size.x).max(0.0);
    }
}

/// A brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgb,
    pub points: u32,
    pub visible: bool,
}

impl Brick {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Complete state of one game: session counters, phase and entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Play area size in surface units
    pub area: Vec2,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Bricks in generation order
    pub bricks: Vec<Brick>,
    /// Lives granted by a full reset
    pub start_lives: u32,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameSession {
    /// Create a session for a play area of `width` x `height`, already at level 1 and Ready
    pub fn new(width: f32, height: f32, start_lives: u32, seed: u64) -> Self {
        let mut session = Self {
            score: 0,
            lives: start_lives,
            level: 1,
            phase: GamePhase::Ready,
            area: Vec2::new(width, height),
            ball: Ball::default(),
            paddle: Paddle {
                pos: Vec2::ZERO,
                size: Vec2::new(0.0, PADDLE_HEIGHT),
            },
            bricks: Vec::new(),
            start_lives,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        session.layout_paddle();
        session.paddle.pos.x = (width - session.paddle.size.x) / 2.0;
        session.start_level();
        session
    }

    /// Replace the brick field for the current level, go to Ready and re-serve the ball
    pub fn start_level(&mut self) {
        self.bricks = generate_level(self.level, self.area.x, self.area.y * BRICK_AREA_FRACTION);
        self.phase = GamePhase::Ready;
        self.reset_ball();
        log::info!("Level {} ready ({} bricks)", self.level, self.bricks.len());
    }

    /// Put the ball at the serve position with a random horizontal direction
    pub fn reset_ball(&mut self) {
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.pos = Vec2::new(self.area.x / 2.0, self.area.y - BALL_SERVE_OFFSET);
        self.ball.vel = Vec2::new(BALL_SERVE_SPEED * dir, -BALL_SERVE_SPEED);
    }

    /// Score 0, starting lives, level 1, then start the level
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.start_lives;
        self.level = 1;
        self.start_level();
        log::info!("Game reset");
    }

    /// Adopt a new play area: relayout the paddle and restart the current level.
    ///
    /// A finished game stays finished: the bricks are laid out for the new
    /// area but the phase and the ball are left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.area = Vec2::new(width, height);
        self.layout_paddle();
        self.ball.radius = BALL_RADIUS;
        if self.phase == GamePhase::GameOver {
            self.bricks = generate_level(self.level, width, height * BRICK_AREA_FRACTION);
        } else {
            self.start_level();
        }
    }

    /// Number of bricks still standing
    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn layout_paddle(&mut self) {
        self.paddle.size = Vec2::new(self.area.x / PADDLE_WIDTH_DIVISOR, PADDLE_HEIGHT);
        self.paddle.pos.y = self.area.y - PADDLE_BOTTOM_OFFSET;
        self.paddle.clamp_x(self.area.x);
    }
}
