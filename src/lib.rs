//! Brick Breaker - a ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, level layout, collisions, game phases)
//! - `game`: Frame driver tying input, simulation, timers and sinks together
//! - `renderer`: Draw backend trait, render dispatch and the WebGPU backend
//! - `platform`: Input mapping, canvas sizing and the score display sink
//! - `audio`: Sound notification sink
//! - `settings`: Data-driven tunables

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Lives at the start of a game
    pub const START_LIVES: u32 = 3;

    /// Level layout
    pub const BRICK_COLUMNS: usize = 10;
    pub const BASE_BRICK_ROWS: usize = 5;
    /// Spacing between bricks (half of it is the outer margin)
    pub const BRICK_GUTTER: f32 = 4.0;
    /// Share of the play height covered by the brick field
    pub const BRICK_AREA_FRACTION: f32 = 1.0 / 3.0;
    pub const POINTS_PER_ROW: u32 = 10;

    /// Paddle defaults
    pub const PADDLE_KEY_SPEED: f32 = 8.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Distance from the bottom edge to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Paddle width is play width divided by this
    pub const PADDLE_WIDTH_DIVISOR: f32 = 6.0;
    /// Horizontal speed at the paddle edge after a bounce
    pub const PADDLE_BOUNCE_SPEED: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Distance from the bottom edge to the serve position
    pub const BALL_SERVE_OFFSET: f32 = 50.0;
    pub const BALL_SERVE_SPEED: f32 = 4.0;

    /// Pause between clearing a level and starting the next one
    pub const LEVEL_COMPLETE_DELAY_MS: f64 = 1500.0;

    /// Canvas sizing
    pub const MAX_CANVAS_WIDTH: u32 = 800;
    pub const MAX_CANVAS_HEIGHT: u32 = 600;
    pub const CANVAS_MARGIN: u32 = 40;
}
