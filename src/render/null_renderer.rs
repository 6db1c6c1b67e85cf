use crate::error::ChartResult;
use crate::render::{Renderer, ViewFrame};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests can catch broken view state
/// before a real backend is involved.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_x_tick_count: usize,
    pub last_y_tick_count: usize,
    pub last_frame: Option<ViewFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ViewFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_x_tick_count = frame.x_tick_positions.values.len();
        self.last_y_tick_count = frame.y_tick_positions.values.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
