//! Level layout generation
//!
//! A level is a grid of `BASE_BRICK_ROWS + level` rows by `BRICK_COLUMNS`
//! columns filling the given area. Pure function of its arguments.

use glam::Vec2;

use super::state::{Brick, Rgb};
use crate::consts::*;

/// Row colors, cycled top to bottom
pub const PALETTE: [Rgb; 5] = [
    [1.0, 0.0, 0.0], // Red
    [1.0, 0.5, 0.0], // Orange
    [1.0, 1.0, 0.0], // Yellow
    [0.0, 1.0, 0.0], // Green
    [0.0, 0.0, 1.0], // Blue
];

/// Number of brick rows for a level
pub fn rows_for_level(level: u32) -> usize {
    BASE_BRICK_ROWS + level as usize
}

/// Generate the bricks for `level` inside an area of `width` x `height`.
///
/// Bricks come out row-major. A degenerate area gives degenerate bricks.
pub fn generate_level(level: u32, width: f32, height: f32) -> Vec<Brick> {
    let rows = rows_for_level(level);
    let cols = BRICK_COLUMNS;
    let size = Vec2::new(
        width / cols as f32 - BRICK_GUTTER,
        height / rows as f32 - BRICK_GUTTER,
    );
    let margin = BRICK_GUTTER / 2.0;

    let mut bricks = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let pos = Vec2::new(
                col as f32 * (size.x + BRICK_GUTTER) + margin,
                row as f32 * (size.y + BRICK_GUTTER) + margin,
            );
            bricks.push(Brick {
                pos,
                size,
                color: PALETTE[row % PALETTE.len()],
                points: (rows - row) as u32 * POINTS_PER_ROW,
                visible: true,
            });
        }
    }

    log::debug!("Generated level {level}: {rows}x{cols} bricks of {}x{}", size.x, size.y);
    bricks
}
