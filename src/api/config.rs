use serde::{Deserialize, Serialize};

use crate::core::{
    AxisSettings, AxisSide, CameraSettings, DEFAULT_NUM_STARTING_DATAPOINTS, Viewport, YAxisMode,
};
use crate::error::{ChartError, ChartResult};

use super::{ColorMode, ResolvedTheme, ThemeOverrides};

/// When the hover read-out reports series values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverValueDisplayMode {
    /// Report every series at the hovered index.
    #[default]
    AlwaysShow,
    /// Report a series only when the pointer is close to what it draws.
    OnlyUnderMouse,
    Off,
}

/// Explicit y-limits; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct YAxisLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Plot area in physical pixels, axis gutters excluded.
    pub viewport: Viewport,
    #[serde(default)]
    pub axis_side: AxisSide,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default = "AxisSettings::x_default")]
    pub x_axis: AxisSettings,
    #[serde(default = "AxisSettings::y_default")]
    pub y_axis: AxisSettings,
    #[serde(default)]
    pub y_axis_mode: YAxisMode,
    /// Only read when `y_axis_mode` is `FixedUser`.
    #[serde(default)]
    pub y_axis_limits: YAxisLimits,
    /// Normalized x-limits overriding the data extent.
    #[serde(default)]
    pub x_axis_limits: Option<(f64, f64)>,
    #[serde(default = "default_num_starting_datapoints")]
    pub num_starting_datapoints: usize,
    /// Apply y pan/zoom gestures to every linked region, not just the active one.
    #[serde(default)]
    pub link_y_zoom_and_pan: bool,
    #[serde(default)]
    pub hover_mode: HoverValueDisplayMode,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub theme_overrides: ThemeOverrides,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            axis_side: AxisSide::default(),
            camera: CameraSettings::default(),
            x_axis: AxisSettings::x_default(),
            y_axis: AxisSettings::y_default(),
            y_axis_mode: YAxisMode::default(),
            y_axis_limits: YAxisLimits::default(),
            x_axis_limits: None,
            num_starting_datapoints: DEFAULT_NUM_STARTING_DATAPOINTS,
            link_y_zoom_and_pan: false,
            hover_mode: HoverValueDisplayMode::default(),
            color_mode: ColorMode::default(),
            theme_overrides: ThemeOverrides::default(),
        }
    }

    #[must_use]
    pub fn with_axis_side(mut self, axis_side: AxisSide) -> Self {
        self.axis_side = axis_side;
        self
    }

    #[must_use]
    pub fn with_camera_settings(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, settings: AxisSettings) -> Self {
        self.x_axis = settings;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, settings: AxisSettings) -> Self {
        self.y_axis = settings;
        self
    }

    #[must_use]
    pub fn with_y_axis_mode(mut self, mode: YAxisMode) -> Self {
        self.y_axis_mode = mode;
        self
    }

    /// Sets explicit limits and switches to `FixedUser`.
    #[must_use]
    pub fn with_y_axis_limits(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.y_axis_mode = YAxisMode::FixedUser;
        self.y_axis_limits = YAxisLimits { min, max };
        self
    }

    #[must_use]
    pub fn with_x_axis_limits(mut self, limits: Option<(f64, f64)>) -> Self {
        self.x_axis_limits = limits;
        self
    }

    #[must_use]
    pub fn with_num_starting_datapoints(mut self, count: usize) -> Self {
        self.num_starting_datapoints = count;
        self
    }

    #[must_use]
    pub fn with_link_y_zoom_and_pan(mut self, linked: bool) -> Self {
        self.link_y_zoom_and_pan = linked;
        self
    }

    #[must_use]
    pub fn with_hover_mode(mut self, mode: HoverValueDisplayMode) -> Self {
        self.hover_mode = mode;
        self
    }

    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    #[must_use]
    pub fn with_theme_overrides(mut self, overrides: ThemeOverrides) -> Self {
        self.theme_overrides = overrides;
        self
    }

    /// Palette for this configuration with overrides merged in.
    #[must_use]
    pub fn resolve_theme(&self) -> ResolvedTheme {
        self.theme_overrides.resolve(self.color_mode)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.camera.validate()?;
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        self.theme_overrides.validate()?;

        if self.num_starting_datapoints == 0 {
            return Err(ChartError::InvalidData(
                "num_starting_datapoints must be > 0".to_owned(),
            ));
        }
        if let Some((min, max)) = self.x_axis_limits {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(ChartError::InvalidData(format!(
                    "x-axis limits must be finite with min < max (got {min}, {max})"
                )));
            }
        }
        if let YAxisLimits {
            min: Some(min),
            max: Some(max),
        } = self.y_axis_limits
        {
            if min >= max {
                return Err(ChartError::InvalidData(format!(
                    "y-axis limits must satisfy min < max (got {min}, {max})"
                )));
            }
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_num_starting_datapoints() -> usize {
    DEFAULT_NUM_STARTING_DATAPOINTS
}
