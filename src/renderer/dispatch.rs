//! Frame composition: session snapshot in, ordered draw calls out

use super::DrawBackend;
use super::vertex::colors;
use crate::sim::{GamePhase, GameSession};

pub const READY_PROMPT: &str = "PRESS SPACE TO START";
pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_PROMPT: &str = "PRESS SPACE TO PLAY AGAIN";

/// Paint the whole frame. Reads the session only.
pub fn draw_frame<B: DrawBackend + ?Sized>(session: &GameSession, backend: &mut B) {
    backend.clear();

    for brick in session.bricks.iter().filter(|b| b.visible) {
        backend.draw_rect(brick.pos.x, brick.pos.y, brick.size.x, brick.size.y, brick.color);
    }

    let paddle = &session.paddle;
    backend.draw_rect(
        paddle.pos.x,
        paddle.pos.y,
        paddle.size.x,
        paddle.size.y,
        colors::PADDLE,
    );

    let ball = &session.ball;
    backend.draw_circle(ball.pos.x, ball.pos.y, ball.radius, colors::BALL);

    let cx = session.area.x / 2.0;
    let cy = session.area.y / 2.0;
    match session.phase {
        GamePhase::Ready => backend.draw_text(READY_PROMPT, cx, cy, 24.0, colors::TEXT),
        GamePhase::GameOver => {
            backend.draw_text(GAME_OVER_TEXT, cx, cy, 32.0, colors::GAME_OVER);
            backend.draw_text(RESTART_PROMPT, cx, cy + 40.0, 20.0, colors::TEXT);
        }
        GamePhase::LevelComplete => {
            // Level was already bumped when the last brick fell
            let text = format!("LEVEL {} COMPLETE!", session.level.saturating_sub(1));
            backend.draw_text(&text, cx, cy, 32.0, colors::LEVEL_COMPLETE);
        }
        GamePhase::Playing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_LIVES;
    use crate::renderer::{DrawCommand, RecordingBackend};

    fn session() -> GameSession {
        GameSession::new(800.0, 600.0, START_LIVES, 5)
    }

    #[test]
    fn test_draw_order_ready() {
        let session = session();
        let mut backend = RecordingBackend::new();
        draw_frame(&session, &mut backend);

        let cmds = &backend.commands;
        // clear + 60 bricks + paddle + ball + prompt
        assert_eq!(cmds.len(), 1 + 60 + 1 + 1 + 1);
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[61], DrawCommand::Rect { color, .. } if color == colors::PADDLE));
        assert!(matches!(cmds[62], DrawCommand::Circle { radius, .. } if radius == 8.0));
        assert_eq!(
            cmds[63],
            DrawCommand::Text {
                text: READY_PROMPT.to_string(),
                x: 400.0,
                y: 300.0,
                size: 24.0,
                color: colors::TEXT,
            }
        );
    }

    #[test]
    fn test_hidden_bricks_not_drawn() {
        let mut session = session();
        session.phase = GamePhase::Playing;
        for brick in session.bricks.iter_mut().skip(10) {
            brick.visible = false;
        }
        let mut backend = RecordingBackend::new();
        draw_frame(&session, &mut backend);
        assert_eq!(backend.commands.len(), 1 + 10 + 2);
        assert!(backend.texts().is_empty());
    }

    #[test]
    fn test_game_over_overlay() {
        let mut session = session();
        session.phase = GamePhase::GameOver;
        let mut backend = RecordingBackend::new();
        draw_frame(&session, &mut backend);
        assert_eq!(backend.texts(), vec![GAME_OVER_TEXT, RESTART_PROMPT]);
        let last = backend.commands.last().unwrap();
        assert!(matches!(last, DrawCommand::Text { y, size, .. } if *y == 340.0 && *size == 20.0));
    }

    #[test]
    fn test_level_complete_names_finished_level() {
        let mut session = session();
        session.phase = GamePhase::LevelComplete;
        session.level = 3;
        let mut backend = RecordingBackend::new();
        draw_frame(&session, &mut backend);
        assert_eq!(backend.texts(), vec!["LEVEL 2 COMPLETE!"]);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let session = session();
        let before = serde_json::to_string(&session).unwrap();
        let mut backend = RecordingBackend::new();
        draw_frame(&session, &mut backend);
        draw_frame(&session, &mut backend);
        assert_eq!(serde_json::to_string(&session).unwrap(), before);
        assert_eq!(backend.frames, 2);
    }
}
