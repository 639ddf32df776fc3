//! Simulation module
//!
//! All gameplay logic lives here:
//! - Unit time step per tick, no rendering or platform dependencies
//! - Seeded RNG only
//! - Stable brick order (generation order)

pub mod collision;
pub mod level;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{Axis, Rect};
pub use level::{PALETTE, generate_level};
pub use schedule::{Scheduler, TaskToken};
pub use state::{Ball, Brick, GameEvent, GamePhase, GameSession, Paddle, Rgb};
pub use tick::{TickInput, tick};
