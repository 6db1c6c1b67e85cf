mod chart_region;
mod config;
mod linked;
mod theme;

pub use chart_region::{ChartRegion, HOVER_Y_PADDING_RATIO, HoverInfo};
pub use config::{ChartConfig, HoverValueDisplayMode, YAxisLimits};
pub use linked::LinkedCharts;
pub use theme::{ColorMode, ResolvedTheme, ThemeOverrides};
