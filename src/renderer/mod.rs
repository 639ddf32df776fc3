//! Rendering
//!
//! The game draws through the [`DrawBackend`] capability trait and never looks
//! inside a backend. `pipeline` implements it on WebGPU; [`RecordingBackend`]
//! records the calls for the headless host and tests.

pub mod dispatch;
pub mod font;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use dispatch::draw_frame;
pub use pipeline::RenderState;

use crate::sim::Rgb;

/// Draw calls issued each frame, in order. Nothing is returned to the caller.
pub trait DrawBackend {
    /// Start a new frame
    fn clear(&mut self);
    /// Filled rectangle with its top-left corner at (x, y)
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);
    /// Filled circle centered at (x, y)
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb);
    /// Single line of text centered at (x, y); `size` is the line height
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgb);
}

/// The draw backend could not be brought up. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
    },
}

/// Backend that keeps the calls of the current frame
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<DrawCommand>,
    /// Frames started so far
    pub frames: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text lines drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawBackend for RecordingBackend {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}
