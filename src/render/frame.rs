use glam::DMat4;

use crate::core::{AxisTicks, TickPositions, ViewBounds, ViewTransform, Viewport};
use crate::error::{ChartError, ChartResult};

/// Everything a backend needs to draw one chart region for one frame.
///
/// Plot geometry is uploaded in world coordinates; the backend subtracts
/// `x_offset` from every x before applying `matrix`, exactly like
/// [`ViewTransform::to_ndc`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    pub viewport: Viewport,
    pub bounds: ViewBounds,
    pub transform: ViewTransform,
    pub x_ticks: AxisTicks,
    pub y_ticks: AxisTicks,
    pub x_tick_positions: TickPositions,
    pub y_tick_positions: TickPositions,
    /// Fixed label precision per axis; `None` lets the label renderer choose.
    pub x_tick_label_decimals: Option<u32>,
    pub y_tick_label_decimals: Option<u32>,
    /// Data `(min, max)` inside the x-window, `None` when only gaps are visible.
    pub visible_range: Option<(f64, f64)>,
    pub show_x_gridlines: bool,
    pub show_y_gridlines: bool,
}

impl ViewFrame {
    #[must_use]
    pub fn matrix(&self) -> DMat4 {
        self.transform.matrix()
    }

    /// Column-major `f32` matrix for GPU uniforms.
    #[must_use]
    pub fn matrix_f32(&self) -> [[f32; 4]; 4] {
        self.transform.to_cols_f32()
    }

    #[must_use]
    pub fn x_offset(&self) -> f64 {
        self.transform.x_offset()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        let ViewBounds {
            left,
            right,
            bottom,
            top,
        } = self.bounds;
        let finite = [left, right, bottom, top].iter().all(|value| value.is_finite());
        if !finite || left >= right || bottom >= top {
            return Err(ChartError::InvalidData(format!(
                "view bounds must be finite and non-empty (x: {left}..{right}, y: {bottom}..{top})"
            )));
        }

        for (axis, ticks) in [("x", self.x_ticks), ("y", self.y_ticks)] {
            if !ticks.tick_delta.is_finite() || ticks.tick_delta <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{axis} tick delta must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}
