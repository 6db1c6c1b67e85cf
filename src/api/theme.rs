use serde::{Deserialize, Serialize};

use crate::error::ChartResult;
use crate::render::Color;

/// Built-in palettes. `Custom` starts from a deliberately loud palette so
/// missing overrides are easy to spot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
    Custom,
}

/// Per-field colour overrides merged over a [`ColorMode`]'s defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub background: Option<Color>,
    pub axis: Option<Color>,
    pub gridline: Option<Color>,
    pub font: Option<Color>,
}

/// Fully populated palette handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    pub background: Color,
    pub axis: Color,
    pub gridline: Color,
    pub font: Color,
}

impl ColorMode {
    #[must_use]
    pub fn defaults(self) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme {
                background: Color::rgb(0.9999, 0.9999, 0.9999),
                axis: Color::rgb(0.290, 0.290, 0.290),
                gridline: Color::rgb(1.0, 1.0, 1.0),
                font: Color::rgb(0.290, 0.290, 0.290),
            },
            Self::Dark => ResolvedTheme {
                background: Color::rgb(0.122, 0.122, 0.122),
                axis: Color::rgb(0.843, 0.843, 0.843),
                gridline: Color::rgb(0.251, 0.251, 0.251),
                font: Color::rgb(0.843, 0.843, 0.843),
            },
            Self::Custom => ResolvedTheme {
                background: Color::rgb(0.67, 0.23, 0.56),
                axis: Color::rgb(0.67, 0.23, 0.56),
                gridline: Color::rgb(1.0, 0.0, 0.0),
                font: Color::rgb(0.67, 0.23, 0.56),
            },
        }
    }
}

impl ThemeOverrides {
    pub fn validate(self) -> ChartResult<Self> {
        for color in [self.background, self.axis, self.gridline, self.font]
            .into_iter()
            .flatten()
        {
            color.validate()?;
        }
        Ok(self)
    }

    /// Merges the overrides over `mode`'s palette.
    #[must_use]
    pub fn resolve(self, mode: ColorMode) -> ResolvedTheme {
        let base = mode.defaults();
        ResolvedTheme {
            background: self.background.unwrap_or(base.background),
            axis: self.axis.unwrap_or(base.axis),
            gridline: self.gridline.unwrap_or(base.gridline),
            font: self.font.unwrap_or(base.font),
        }
    }
}
