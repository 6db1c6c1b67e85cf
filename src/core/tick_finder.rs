use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Step multipliers tried for every power of ten, in preference order.
const NICE_STEP_MULTIPLIERS: [f64; 18] = [
    0.01, 0.025, 0.05, 0.1, 0.2, 0.25, 0.4, 0.5, 0.75, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
];

/// Steps finer than a tenth of the target spacing are never considered.
const MIN_STEP_FRACTION: f64 = 0.1;

/// Keeps exact multiples of the sample spacing from flooring one sample short.
const SAMPLE_EPSILON: f64 = 1e-9;

/// Best-scoring evenly spaced tick layout covering a data range.
///
/// `tick_count` is the number of steps needed to span the data, which is
/// what the tick band constrains; the layout itself runs from `first_tick`
/// to `last_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickCandidate {
    pub first_tick: f64,
    pub last_tick: f64,
    pub step: f64,
    pub tick_count: usize,
    pub score: f64,
}

/// Picks a "nice" tick step and start value for `[data_min, data_max]`.
///
/// Each candidate step is a multiplier times the power of ten below the
/// target spacing. A candidate needs `ceil(range / step)` inside
/// `[min_ticks, max_ticks]` and must cover the whole range; `tick_count`
/// reports that count. The covering span starts at `target_ticks` ticks, so
/// `last_tick` may sit one step past the band. Candidates are scored
/// by how much of the tick span the data covers minus how far the span
/// overshoots; ties keep the earlier multiplier.
///
/// Returns `None` for non-finite input, an empty range, `target_ticks <= 1`,
/// or when no candidate survives.
#[must_use]
pub fn find_ticks(
    data_min: f64,
    data_max: f64,
    target_ticks: usize,
    min_ticks: usize,
    max_ticks: usize,
) -> Option<TickCandidate> {
    if !data_min.is_finite() || !data_max.is_finite() || target_ticks <= 1 {
        return None;
    }
    let range = data_max - data_min;
    if range <= 0.0 {
        return None;
    }

    let intervals = (target_ticks - 1) as f64;
    let target_spacing = range / intervals;
    let base = 10_f64.powf(target_spacing.log10().floor());
    let tick_band = min_ticks as f64..=max_ticks as f64;

    NICE_STEP_MULTIPLIERS
        .iter()
        .filter_map(|multiplier| {
            let step = multiplier * base;
            let tick_count = (range / step).ceil();
            if !tick_band.contains(&tick_count) {
                return None;
            }
            if step < target_spacing * MIN_STEP_FRACTION {
                return None;
            }

            let first_tick = (data_min / step).floor() * step;
            let mut last_tick = first_tick + intervals * step;
            if last_tick < data_max {
                last_tick = first_tick + ((data_max - first_tick) / step).ceil() * step;
            }
            if first_tick > data_min || last_tick < data_max {
                return None;
            }

            let span = last_tick - first_tick;
            let coverage = range / span;
            let granularity = (span - range).abs() / range;
            Some(TickCandidate {
                first_tick,
                last_tick,
                step,
                tick_count: tick_count as usize,
                score: coverage - granularity,
            })
        })
        // `max_by_key` keeps the last maximum; folding keeps the first.
        .fold(None, |best: Option<TickCandidate>, candidate| match best {
            Some(best) if OrderedFloat(best.score) >= OrderedFloat(candidate.score) => Some(best),
            _ => Some(candidate),
        })
}

/// Snaps an x-axis value down onto the sample grid so ticks sit on sample
/// centres.
#[must_use]
pub fn round_to_sample_spacing(value: f64, delta: f64) -> f64 {
    if delta <= 0.0 {
        return value;
    }
    (value / delta + SAMPLE_EPSILON).floor() * delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_input() {
        assert_eq!(find_ticks(1.0, 1.0, 8, 6, 12), None);
        assert_eq!(find_ticks(0.0, 10.0, 1, 6, 12), None);
        assert_eq!(find_ticks(f64::NAN, 10.0, 8, 6, 12), None);
    }

    #[test]
    fn rounding_snaps_down_to_sample_grid() {
        let delta = 0.01;
        let rounded = round_to_sample_spacing(0.057, delta);
        assert!((rounded - 0.05).abs() < 1e-12);
        assert_eq!(round_to_sample_spacing(0.3, 0.0), 0.3);
    }
}
