//! chart-viewport: interaction and coordinate engine for financial charts.
//!
//! The crate owns the camera (pan/zoom arithmetic, edge pinning, transforms),
//! nice-tick placement for both axes and the multi-series min/max aggregator
//! behind y-axis auto-fit. Drawing is left to a [`render::Renderer`] that
//! consumes one [`render::ViewFrame`] per region per frame.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartRegion, LinkedCharts};
pub use error::{ChartError, ChartResult};
