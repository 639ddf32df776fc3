//! Collision detection and response for axis-aligned geometry
//!
//! Everything is an axis-aligned box: the ball is tested as its square bound,
//! bricks and the paddle as plain rectangles. Responses are sign flips, except
//! the paddle which sets the horizontal speed from the impact offset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_BOUNCE_SPEED;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Strict AABB overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        a_max.x > other.min.x
            && self.min.x < b_max.x
            && a_max.y > other.min.y
            && self.min.y < b_max.y
    }
}

/// Which velocity component a brick hit flips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Reflect off the side walls and the ceiling.
///
/// Returns the number of reflections applied (0..=2). The floor is open.
pub fn reflect_off_walls(pos: Vec2, vel: &mut Vec2, radius: f32, width: f32) -> u32 {
    let mut bounces = 0;
    if pos.x - radius < 0.0 || pos.x + radius > width {
        vel.x = -vel.x;
        bounces += 1;
    }
    if pos.y - radius < 0.0 {
        vel.y = -vel.y;
        bounces += 1;
    }
    bounces
}

/// Velocity after hitting the paddle.
///
/// The horizontal component depends only on where the ball struck: -5 at the
/// left edge, 0 dead center, +5 at the right edge. Vertical always points up.
pub fn paddle_bounce(ball_x: f32, vel: Vec2, paddle: &Rect) -> Vec2 {
    let half = paddle.size.x / 2.0;
    let hit_pos = (ball_x - paddle.center().x) / half;
    Vec2::new(hit_pos * PADDLE_BOUNCE_SPEED, -vel.y.abs())
}

/// Axis to reflect when the ball hits a brick: the dominant center offset, ties go to Y
pub fn brick_reflect_axis(ball_pos: Vec2, brick: &Rect) -> Axis {
    let d = ball_pos - brick.center();
    if d.x.abs() > d.y.abs() { Axis::X } else { Axis::Y }
}
