use glam::{DMat4, DVec2, DVec3};

use crate::core::types::ViewBounds;

/// View-to-NDC mapping derived from camera bounds.
///
/// The orthographic matrix spans `[0, right - left]` in x rather than
/// `[left, right]`: x coordinates are shifted by `x_offset` first so that
/// large index positions keep their precision once narrowed to `f32`. Every
/// consumer must subtract the same offset before applying the matrix, which
/// is what [`ViewTransform::to_ndc`] does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    matrix: DMat4,
    x_offset: f64,
}

impl ViewTransform {
    #[must_use]
    pub fn from_bounds(bounds: ViewBounds) -> Self {
        let matrix =
            DMat4::orthographic_rh_gl(0.0, bounds.width(), bounds.bottom, bounds.top, -1.0, 1.0);
        Self {
            matrix,
            x_offset: bounds.left,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    #[must_use]
    pub fn x_offset(&self) -> f64 {
        self.x_offset
    }

    /// Column-major `f32` copy for GPU uniforms.
    #[must_use]
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        self.matrix.as_mat4().to_cols_array_2d()
    }

    #[must_use]
    pub fn to_ndc(&self, x: f64, y: f64) -> DVec2 {
        self.matrix
            .transform_point3(DVec3::new(x - self.x_offset, y, 0.0))
            .truncate()
    }

    #[must_use]
    pub fn from_ndc(&self, ndc: DVec2) -> DVec2 {
        let view = self
            .matrix
            .inverse()
            .transform_point3(DVec3::new(ndc.x, ndc.y, 0.0));
        DVec2::new(view.x + self.x_offset, view.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_unit_square() {
        let transform = ViewTransform::from_bounds(ViewBounds {
            left: 0.5,
            right: 0.7,
            bottom: 100.0,
            top: 200.0,
        });

        let low = transform.to_ndc(0.5, 100.0);
        let high = transform.to_ndc(0.7, 200.0);
        assert!((low.x + 1.0).abs() < 1e-9 && (low.y + 1.0).abs() < 1e-9);
        assert!((high.x - 1.0).abs() < 1e-9 && (high.y - 1.0).abs() < 1e-9);

        let back = transform.from_ndc(DVec2::ZERO);
        assert!((back.x - 0.6).abs() < 1e-9);
        assert!((back.y - 150.0).abs() < 1e-9);
    }
}
