use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("invalid plot area: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series has {actual} datapoints but the chart domain has {expected}")]
    DomainMismatch { expected: usize, actual: usize },

    #[error("scatter series cannot be the first series of a chart")]
    ScatterBaseSeries,

    #[error("scatter index {index} is outside the chart domain of {num_datapoints} datapoints")]
    IndexOutOfDomain { index: usize, num_datapoints: usize },

    #[error(
        "invalid tick bounds: min={min_ticks}, max={max_ticks}, init={init_ticks} (need 1 <= min <= init <= max, init > 1)"
    )]
    InvalidTickBounds {
        min_ticks: usize,
        max_ticks: usize,
        init_ticks: usize,
    },
}
