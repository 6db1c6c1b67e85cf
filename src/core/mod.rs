pub mod aggregator;
pub mod bar_series;
pub mod camera;
pub mod candlestick;
pub mod date_index;
pub mod line_series;
pub mod primitives;
pub mod scatter_series;
pub mod series;
pub mod tick_finder;
pub mod tick_state;
pub mod transform;
pub mod types;

pub use aggregator::{SeriesAggregator, Y_AXIS_PADDING_RATIO};
pub use bar_series::BarSeries;
pub use camera::{
    Camera, CameraSettings, DEFAULT_NUM_STARTING_DATAPOINTS, KEY_REFERENCE_RATE_HZ,
    RIGHT_DRAG_MAGNITUDE_CAP_PX, X_AXIS_PADDING_FACTOR, XExtent,
};
pub use candlestick::{CandlestickSeries, OhlcBar};
pub use date_index::DateIndex;
pub use line_series::LineSeries;
pub use scatter_series::ScatterSeries;
pub use series::{HoverValue, Series, SeriesId, SeriesKind};
pub use tick_finder::{TickCandidate, find_ticks, round_to_sample_spacing};
pub use tick_state::{
    Axis, AxisSettings, AxisTicks, MAX_MATERIALIZED_TICKS, TickPositions, TickState,
};
pub use transform::ViewTransform;
pub use types::{AxisSide, ViewBounds, Viewport, YAxisMode};
