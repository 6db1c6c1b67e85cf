use std::time::Duration;

use chart_viewport::core::{
    BarSeries, CandlestickSeries, DateIndex, LineSeries, Viewport, YAxisMode,
};
use chart_viewport::interaction::NavigationKey;
use chart_viewport::render::NullRenderer;
use chart_viewport::{ChartConfig, ChartError, LinkedCharts};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

const FRAME: Duration = Duration::from_millis(16);
const LEN: usize = 800;

fn price_candles() -> CandlestickSeries {
    let close: Vec<f64> = (0..LEN).map(|i| 50.0 + (i as f64 * 0.03).cos() * 5.0).collect();
    let open: Vec<f64> = close.iter().map(|c| c + 0.2).collect();
    let high: Vec<f64> = close.iter().map(|c| c + 0.8).collect();
    let low: Vec<f64> = close.iter().map(|c| c - 0.8).collect();
    CandlestickSeries::new(open, high, low, close).expect("valid candles")
}

fn volume() -> BarSeries {
    BarSeries::new((0..LEN).map(|i| 1_000.0 + (i % 17) as f64 * 40.0).collect::<Vec<_>>())
        .expect("valid bars")
        .with_baseline(0.0)
        .expect("baseline")
}

fn fixed_y_config() -> ChartConfig {
    ChartConfig::new(Viewport::new(1000, 300)).with_y_axis_mode(YAxisMode::FixedAuto)
}

fn stacked(price: ChartConfig, volume_config: ChartConfig) -> LinkedCharts<NullRenderer> {
    let mut charts = LinkedCharts::new(NullRenderer::default());
    let top = charts.add_region(price).expect("price region");
    let bottom = charts.add_region(volume_config).expect("volume region");
    charts.add_series(top, price_candles()).expect("candles");
    charts.add_series(bottom, volume()).expect("volume");
    charts
}

fn dates(len: usize) -> Vec<DateTime<Utc>> {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    (0..len)
        .map(|i| start + ChronoDuration::hours(i as i64))
        .collect()
}

fn x_windows(charts: &LinkedCharts<NullRenderer>) -> Vec<(f64, f64)> {
    charts
        .regions()
        .iter()
        .map(|region| (region.camera().left(), region.camera().right()))
        .collect()
}

#[test]
fn regions_share_initial_x_window() {
    let charts = stacked(fixed_y_config(), fixed_y_config());

    let windows = x_windows(&charts);
    assert_eq!(charts.len(), 2);
    assert_eq!(windows[0], windows[1]);
}

#[test]
fn x_drag_moves_every_region_y_only_active() {
    let mut charts = stacked(fixed_y_config(), fixed_y_config());
    let bottom_y = charts.regions()[1].camera().view_bounds();

    charts.on_pointer_move(0, 0.5, 0.5);
    charts.on_pan_start(0);
    charts.on_drag(200.0, 40.0);
    charts.on_drag_end();

    let windows = x_windows(&charts);
    assert_eq!(windows[0], windows[1]);
    assert!(windows[0].1 < 0.999);

    let bottom_after = charts.regions()[1].camera().view_bounds();
    assert_eq!(bottom_after.bottom, bottom_y.bottom);
    assert_eq!(bottom_after.top, bottom_y.top);
}

#[test]
fn linked_y_follows_gestures_from_other_regions() {
    let linked = fixed_y_config().with_link_y_zoom_and_pan(true);
    let mut charts = stacked(fixed_y_config(), linked);
    let bottom_y = charts.regions()[1].camera().view_bounds();

    charts.on_pointer_move(0, 0.5, 0.5);
    charts.on_pan_start(0);
    charts.on_drag(0.0, 60.0);
    charts.on_drag_end();

    let bottom_after = charts.regions()[1].camera().view_bounds();
    assert_ne!(bottom_after.bottom, bottom_y.bottom);
}

#[test]
fn wheel_zooms_x_everywhere_and_y_only_on_hovered_region() {
    let mut charts = stacked(fixed_y_config(), fixed_y_config());
    let before = x_windows(&charts);
    let top_y = charts.regions()[0].camera().view_bounds();
    let bottom_y = charts.regions()[1].camera().view_bounds();

    charts.on_pointer_move(1, 0.5, 0.5);
    charts.on_wheel(-200.0, true);

    assert_eq!(x_windows(&charts), before);
    assert_eq!(charts.regions()[0].camera().view_bounds(), top_y);
    assert_ne!(charts.regions()[1].camera().view_bounds(), bottom_y);

    charts.on_wheel(200.0, false);
    let after = x_windows(&charts);
    assert_eq!(after[0], after[1]);
    assert!(after[0].1 - after[0].0 < before[0].1 - before[0].0);
}

#[test]
fn y_keys_reach_only_active_region() {
    let mut charts = stacked(fixed_y_config(), fixed_y_config());
    charts.render(FRAME).expect("first frame");
    let top_y = charts.regions()[0].camera().view_bounds();
    let bottom_y = charts.regions()[1].camera().view_bounds();

    charts.on_pointer_move(1, 0.5, 0.5);
    charts.on_key(NavigationKey::PanUp, true);
    charts.on_key(NavigationKey::PanLeft, true);
    charts.render(FRAME).expect("second frame");

    let top_after = charts.regions()[0].camera().view_bounds();
    let bottom_after = charts.regions()[1].camera().view_bounds();
    assert_eq!(top_after.bottom, top_y.bottom);
    assert!(bottom_after.bottom > bottom_y.bottom);
    assert!(top_after.left < top_y.left);
    assert_eq!(top_after.left, bottom_after.left);
    assert_eq!(charts.renderer().frames_rendered, 4);
}

#[test]
fn regions_must_share_domain() {
    let mut charts = LinkedCharts::new(NullRenderer::default());
    let top = charts.add_region(ChartConfig::default()).expect("region");
    let bottom = charts.add_region(ChartConfig::default()).expect("region");
    charts.add_series(top, price_candles()).expect("candles");

    let err = charts
        .add_series(bottom, LineSeries::new(vec![1.0; LEN + 1]).expect("line"))
        .expect_err("length mismatch");
    assert_eq!(
        err,
        ChartError::DomainMismatch {
            expected: LEN,
            actual: LEN + 1
        }
    );

    assert!(charts.add_series(5, volume()).is_err());
}

#[test]
fn late_region_adopts_current_window() {
    let mut charts = LinkedCharts::new(NullRenderer::default());
    let top = charts.add_region(ChartConfig::default()).expect("region");
    charts.add_series(top, price_candles()).expect("candles");
    charts.on_pointer_move(top, 0.5, 0.5);
    charts.on_wheel(150.0, false);

    let bottom = charts.add_region(ChartConfig::default()).expect("region");
    charts.add_series(bottom, volume()).expect("volume");

    let windows = x_windows(&charts);
    assert_eq!(windows[0], windows[1]);
}

#[test]
fn reset_and_gridlines_apply_to_all_regions() {
    let mut charts = stacked(ChartConfig::default(), ChartConfig::default());
    charts.on_pointer_move(0, 0.3, 0.5);
    charts.on_wheel(250.0, false);

    charts.reset_view();
    charts.toggle_gridlines();
    let frames = charts.frames(FRAME);

    assert_eq!(frames.len(), 2);
    for (frame, region) in frames.iter().zip(charts.regions()) {
        let extent = region.camera().x_extent();
        assert_eq!(frame.bounds.left, extent.lower());
        assert_eq!(frame.bounds.right, extent.upper());
        assert!(!frame.show_x_gridlines);
    }
}

#[test]
fn rejected_date_index_leaves_every_region_untouched() {
    let mut charts = LinkedCharts::new(NullRenderer::default());
    let empty = charts.add_region(ChartConfig::default()).expect("region");
    let filled = charts.add_region(ChartConfig::default()).expect("region");
    charts.add_series(filled, volume()).expect("volume");

    let err = charts
        .set_date_index(DateIndex::new(dates(LEN / 2)).expect("dates"))
        .expect_err("length mismatch");
    assert_eq!(
        err,
        ChartError::DomainMismatch {
            expected: LEN,
            actual: LEN / 2
        }
    );
    assert!(charts.date_index().is_none());
    assert!(charts.regions().iter().all(|region| region.date_index().is_none()));

    charts
        .add_series(empty, price_candles())
        .expect("full-length series still fits");
    let late = charts.add_region(ChartConfig::default()).expect("region");
    assert!(charts.region(late).and_then(|r| r.date_index()).is_none());
}

#[test]
fn accepted_date_index_reaches_late_regions() {
    let mut charts = LinkedCharts::new(NullRenderer::default());
    charts
        .set_date_index(DateIndex::new(dates(LEN)).expect("dates"))
        .expect("no regions yet");

    let top = charts.add_region(ChartConfig::default()).expect("region");
    charts.add_series(top, price_candles()).expect("candles");

    let expected = dates(LEN)[LEN - 1];
    assert_eq!(
        charts.region(top).and_then(|r| r.date_index()).map(DateIndex::len),
        Some(LEN)
    );
    assert_eq!(
        charts.regions()[top]
            .date_index()
            .and_then(|index| index.date_at(LEN - 1)),
        Some(expected)
    );
}

#[test]
fn wheel_y_zoom_reaches_linked_regions() {
    let linked = fixed_y_config().with_link_y_zoom_and_pan(true);
    let mut charts = stacked(fixed_y_config(), linked);
    let top_y = charts.regions()[0].camera().view_bounds();
    let bottom_y = charts.regions()[1].camera().view_bounds();

    charts.on_pointer_move(0, 0.5, 0.5);
    charts.on_wheel(200.0, true);

    let top_after = charts.regions()[0].camera().view_bounds();
    let bottom_after = charts.regions()[1].camera().view_bounds();
    assert!(top_after.height() < top_y.height());
    assert!(bottom_after.height() < bottom_y.height());
    assert_eq!(x_windows(&charts)[0], x_windows(&charts)[1]);
}
