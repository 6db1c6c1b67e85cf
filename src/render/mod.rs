mod color;
mod frame;
mod null_renderer;

pub use color::Color;
pub use frame::ViewFrame;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the finished per-frame view state, so drawing code stays
/// isolated from camera arithmetic and input handling.
pub trait Renderer {
    fn render(&mut self, frame: &ViewFrame) -> ChartResult<()>;
}
