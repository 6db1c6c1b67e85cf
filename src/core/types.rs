use serde::{Deserialize, Serialize};

/// Plot-area size in physical pixels, excluding axis gutters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height, `1.0` for a degenerate viewport.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        if !self.is_valid() {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Side of the plot that carries the y-axis and the most recent data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    #[default]
    Right,
}

/// How the y-axis bounds are chosen.
///
/// - `Pinned`: re-fit every frame to the data visible in the x-window.
/// - `FixedAuto`: user-zoomable, limited to the data extent plus padding.
/// - `FixedUser`: user-zoomable, limited to explicitly set bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum YAxisMode {
    #[default]
    Pinned,
    FixedAuto,
    FixedUser,
}

impl YAxisMode {
    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::FixedAuto | Self::FixedUser)
    }
}

/// Camera window: x in normalized index units, y in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl ViewBounds {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.top - self.bottom
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }
}
