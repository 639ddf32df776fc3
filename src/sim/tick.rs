//! Per-frame simulation tick
//!
//! One call advances the ball by one unit step. There is no delta-time scaling:
//! the simulation runs at whatever rate the host calls it.

use serde::{Deserialize, Serialize};

use super::collision::{Axis, brick_reflect_axis, paddle_bounce, reflect_off_walls};
use super::state::{GameEvent, GamePhase, GameSession};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move-left control held
    pub left: bool,
    /// Move-right control held
    pub right: bool,
    /// Last known pointer x in play-area units
    pub pointer_x: Option<f32>,
}

/// Advance the session by one tick. Does nothing unless the phase is Playing.
pub fn tick(session: &mut GameSession, input: &TickInput, paddle_speed: f32) {
    if session.phase != GamePhase::Playing {
        return;
    }

    let width = session.area.x;
    let height = session.area.y;

    // Keys first, pointer overrides them
    let paddle = &mut session.paddle;
    if input.left {
        paddle.pos.x -= paddle_speed;
    }
    if input.right {
        paddle.pos.x += paddle_speed;
    }
    if let Some(x) = input.pointer_x.filter(|x| *x > 0.0) {
        paddle.pos.x = x - paddle.size.x / 2.0;
    }
    paddle.clamp_x(width);

    let ball = &mut session.ball;
    ball.pos += ball.vel;

    for _ in 0..reflect_off_walls(ball.pos, &mut ball.vel, ball.radius, width) {
        session.events.push(GameEvent::Bounce);
    }

    let paddle_rect = session.paddle.rect();
    if ball.bounds().overlaps(&paddle_rect) {
        ball.vel = paddle_bounce(ball.pos.x, ball.vel, &paddle_rect);
        session.events.push(GameEvent::Bounce);
    }

    if ball.pos.y + ball.radius > height {
        session.lives = session.lives.saturating_sub(1);
        session.events.push(GameEvent::LifeLost {
            lives_left: session.lives,
        });
        if session.lives == 0 {
            session.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", session.score);
        } else {
            session.phase = GamePhase::Ready;
            session.reset_ball();
            log::info!("Ball lost, {} lives left", session.lives);
        }
    }

    hit_first_brick(session);
}

/// Destroy at most one brick: the first visible one the ball overlaps
fn hit_first_brick(session: &mut GameSession) {
    let ball_bounds = session.ball.bounds();
    let Some(brick) = session
        .bricks
        .iter_mut()
        .find(|b| b.visible && ball_bounds.overlaps(&b.rect()))
    else {
        return;
    };

    match brick_reflect_axis(session.ball.pos, &brick.rect()) {
        Axis::X => session.ball.vel.x = -session.ball.vel.x,
        Axis::Y => session.ball.vel.y = -session.ball.vel.y,
    }
    brick.visible = false;
    let points = brick.points;
    session.score += u64::from(points);
    session.events.push(GameEvent::BrickBroken { points });
    log::debug!("Brick broken for {points} points, score {}", session.score);

    if session.bricks_left() == 0 {
        let cleared = session.level;
        session.level += 1;
        session.phase = GamePhase::LevelComplete;
        session.events.push(GameEvent::LevelCleared { level: cleared });
        log::info!("Level {cleared} complete, score {}", session.score);
    }
}
