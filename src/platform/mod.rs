//! Platform abstraction layer
//!
//! Host-facing glue that has no business in the simulation:
//! - Key name to control mapping
//! - Input intent accumulated between frames
//! - Canvas sizing from the window size
//! - Score/lives display sink

use crate::settings::Settings;
use crate::sim::TickInput;

/// Logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    /// Start a served ball, or restart after game over
    Start,
}

/// Map a DOM `KeyboardEvent.key` value to a control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Control::Left),
        "ArrowRight" | "d" | "D" => Some(Control::Right),
        " " => Some(Control::Start),
        _ => None,
    }
}

/// Input intent written by event handlers and read once per frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    pointer_x: Option<f32>,
}

impl InputState {
    pub fn press(&mut self, control: Control) {
        self.set_held(control, true);
    }

    pub fn release(&mut self, control: Control) {
        self.set_held(control, false);
    }

    /// Record the pointer position relative to the play area's left edge
    pub fn pointer_moved(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    /// Release everything (focus loss, reset)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Immutable view for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.left_held,
            right: self.right_held,
            pointer_x: self.pointer_x,
        }
    }

    fn set_held(&mut self, control: Control, held: bool) {
        match control {
            Control::Left => self.left_held = held,
            Control::Right => self.right_held = held,
            Control::Start => {}
        }
    }
}

/// Receives the current score and lives for display
pub trait ScoreSink {
    fn show(&mut self, score: u64, lives: u32);
}

/// Sink that only logs
#[derive(Debug, Default)]
pub struct LogScore;

impl ScoreSink for LogScore {
    fn show(&mut self, score: u64, lives: u32) {
        log::debug!("SCORE: {} LIVES: {}", score, lives);
    }
}

/// HUD text for the score display
pub fn score_label(score: u64) -> String {
    format!("SCORE: {}", score)
}

/// HUD text for the lives display
pub fn lives_label(lives: u32) -> String {
    format!("LIVES: {}", lives)
}

/// Canvas size for a window: capped at the configured maximum, keeping a margin free
pub fn canvas_size(window_width: f64, window_height: f64, settings: &Settings) -> (u32, u32) {
    let fit = |window: f64, max: u32| -> u32 {
        let available = (window - f64::from(settings.window_margin)).max(1.0);
        (available as u32).clamp(1, max)
    };
    (
        fit(window_width, settings.max_width),
        fit(window_height, settings.max_height),
    )
}
