use std::time::Duration;

use approx::assert_relative_eq;
use chart_viewport::core::{
    AxisSide, Camera, CameraSettings, LineSeries, SeriesAggregator, Viewport, YAxisMode,
};
use chart_viewport::interaction::{HeldKeys, NavigationKey, PinState};
use proptest::prelude::*;

fn ramp(len: usize) -> Vec<f64> {
    (0..len).map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0).collect()
}

fn aggregator_with(len: usize) -> SeriesAggregator {
    let mut aggregator = SeriesAggregator::new();
    aggregator
        .add_series(LineSeries::new(ramp(len)).expect("valid line"))
        .expect("attach line");
    aggregator
}

fn build_camera(
    settings: CameraSettings,
    axis_side: AxisSide,
    len: usize,
) -> (Camera, SeriesAggregator) {
    let aggregator = aggregator_with(len);
    let mut camera =
        Camera::new(settings, axis_side, Viewport::new(1000, 500)).expect("camera init");
    camera.setup_view(&aggregator);
    (camera, aggregator)
}

#[test]
fn initial_window_shows_most_recent_samples_flush_right() {
    let (camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);

    assert_relative_eq!(camera.right(), 0.999, epsilon = 1e-12);
    assert_relative_eq!(camera.view_width(), 0.150, epsilon = 1e-12);
    assert!(camera.bottom() < camera.top());
}

#[test]
fn initial_window_flush_left_for_left_axis() {
    let (camera, _) = build_camera(CameraSettings::default(), AxisSide::Left, 1000);

    assert_relative_eq!(camera.left(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(camera.view_width(), 0.150, epsilon = 1e-12);
}

#[test]
fn short_series_starts_with_full_domain() {
    let (camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 40);

    let extent = camera.x_extent();
    assert!(camera.left() >= extent.lower() - 1e-12);
    assert!(camera.right() <= extent.upper() + 1e-12);
    assert!(camera.view_width() >= camera.delta());
}

#[test]
fn keyboard_zoom_halves_width() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let width = camera.view_width();
    let (centre, _) = camera.view_bounds().center();

    camera.zoom_x(2.0, centre, -1.0);

    assert_relative_eq!(camera.view_width(), width / 2.0, epsilon = 1e-12);
    // The window started against the right edge, so that edge stays put.
    assert_eq!(camera.pin_state(-1.0), PinState::PinnedRight);
    assert_relative_eq!(camera.right(), 0.999, epsilon = 1e-12);
}

#[test]
fn zoom_by_one_is_identity() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let before = camera.view_bounds();

    camera.zoom_x(1.0, 0.9, 0.5);

    assert_eq!(camera.view_bounds(), before);
}

#[test]
fn zoom_then_inverse_zoom_restores_bounds() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    camera.pan_x(-2.0);
    let before = camera.view_bounds();
    let focus = camera.x_value_at(0.4);

    camera.zoom_x(1.6, focus, 0.4);
    camera.zoom_x(1.0 / 1.6, focus, 0.4);

    let after = camera.view_bounds();
    assert_relative_eq!(after.left, before.left, epsilon = 1e-12);
    assert_relative_eq!(after.right, before.right, epsilon = 1e-12);
}

#[test]
fn zoom_below_one_sample_is_rejected() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let before = camera.view_bounds();

    camera.zoom_x(1_000.0, camera.x_value_at(0.5), 0.5);

    assert_eq!(camera.view_bounds(), before);
}

#[test]
fn zooming_out_stops_at_padded_extent() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);

    for _ in 0..50 {
        camera.zoom_x(0.5, camera.x_value_at(0.5), 0.5);
    }

    let extent = camera.x_extent();
    assert_relative_eq!(camera.left(), extent.lower(), epsilon = 1e-12);
    assert_relative_eq!(camera.right(), extent.upper(), epsilon = 1e-12);
}

#[test]
fn locked_pan_moves_only_trailing_edge() {
    let settings = CameraSettings {
        lock_most_recent_date: true,
        ..CameraSettings::default()
    };
    let (mut camera, _) = build_camera(settings, AxisSide::Right, 1000);
    let before = camera.view_bounds();

    camera.pan_x(-0.1);

    assert_eq!(camera.right(), before.right);
    assert!(camera.left() > before.left);
    assert_relative_eq!(camera.left(), before.left + 0.1 * before.width(), epsilon = 1e-12);
}

#[test]
fn pan_is_clamped_at_data_edge() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let width = camera.view_width();

    camera.pan_x(5.0);

    assert_relative_eq!(camera.right(), camera.x_extent().upper(), epsilon = 1e-12);
    assert_relative_eq!(camera.view_width(), width, epsilon = 1e-12);
}

#[test]
fn non_finite_pan_is_ignored() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let before = camera.view_bounds();

    camera.pan_x(f64::NAN);
    camera.pan_y(f64::INFINITY, false);

    assert_eq!(camera.view_bounds(), before);
}

#[test]
fn held_keys_scale_with_elapsed_time() {
    let (mut slow, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    slow.pan_x(-3.0);
    let mut fast = slow.clone();
    let start = slow.left();

    let mut keys = HeldKeys::default();
    keys.press(NavigationKey::PanLeft);
    slow.apply_held_keys(&keys, Duration::from_millis(8));
    fast.apply_held_keys(&keys, Duration::from_millis(16));

    let slow_moved = start - slow.left();
    let fast_moved = start - fast.left();
    assert!(slow_moved > 0.0);
    assert_relative_eq!(fast_moved, slow_moved * 2.0, max_relative = 1e-9);
}

#[test]
fn reset_shows_everything() {
    let (mut camera, aggregator) = build_camera(CameraSettings::default(), AxisSide::Right, 500);
    camera.zoom_x(3.0, camera.x_value_at(0.5), 0.5);

    camera.reset_x();
    camera.reset_y(&aggregator);

    let extent = camera.x_extent();
    assert_relative_eq!(camera.left(), extent.lower(), epsilon = 1e-12);
    assert_relative_eq!(camera.right(), extent.upper(), epsilon = 1e-12);
    assert_relative_eq!(camera.bottom(), aggregator.global_min().expect("min"));
    assert_relative_eq!(camera.top(), aggregator.global_max().expect("max"));
}

#[test]
fn user_limits_bound_y_gestures() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 500);
    camera.set_y_limits(Some(80.0), Some(120.0)).expect("valid limits");
    assert_eq!(camera.y_axis_mode(), YAxisMode::FixedUser);

    for _ in 0..20 {
        camera.zoom_y(0.5, camera.y_value_at(0.5));
        camera.pan_y(0.5, true);
    }

    assert!(camera.bottom() >= 80.0);
    assert!(camera.top() <= 120.0);
    assert!(camera.bottom() < camera.top());
}

#[test]
fn invalid_y_limits_are_rejected() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 500);

    assert!(camera.set_y_limits(Some(5.0), Some(1.0)).is_err());
    assert_eq!(camera.y_axis_mode(), YAxisMode::Pinned);
}

#[test]
fn pinned_y_ignores_vertical_zoom() {
    let (mut camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 500);
    let before = camera.view_bounds();

    camera.wheel_zoom(120.0, (0.5, 0.5), true);

    assert_eq!(camera.view_bounds(), before);
}

#[test]
fn fixed_auto_limits_pad_global_extent() {
    let (mut camera, aggregator) = build_camera(CameraSettings::default(), AxisSide::Right, 500);

    camera.pin_y_axis(false, &aggregator);

    let (lower, upper) = camera.y_axis_limits();
    let min = aggregator.global_min().expect("min");
    let max = aggregator.global_max().expect("max");
    assert_relative_eq!(lower, min - (max - min) * 0.05, epsilon = 1e-9);
    assert_relative_eq!(upper, max + (max - min) * 0.05, epsilon = 1e-9);
}

#[test]
fn pointer_queries_map_proportions() {
    let (camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);

    assert_relative_eq!(camera.x_value_at(0.0), camera.left());
    assert_relative_eq!(camera.y_value_at(1.0), camera.top());
    assert_eq!(camera.index_at(1.0), Some(999));
    assert_eq!(camera.index_at(f64::NAN), None);
}

#[test]
fn transform_maps_view_corners_to_ndc() {
    let (camera, _) = build_camera(CameraSettings::default(), AxisSide::Right, 1000);
    let transform = camera.transform();

    let lower_left = transform.to_ndc(camera.left(), camera.bottom());
    let upper_right = transform.to_ndc(camera.right(), camera.top());

    assert_relative_eq!(lower_left.x, -1.0, epsilon = 1e-9);
    assert_relative_eq!(lower_left.y, -1.0, epsilon = 1e-9);
    assert_relative_eq!(upper_right.x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(upper_right.y, 1.0, epsilon = 1e-9);
}

#[derive(Debug, Clone)]
enum Gesture {
    Pan(f64),
    Zoom(f64, f64),
    LeftDrag(f64, f64),
    RightDrag(f64, f64, f64),
    Wheel(f64, f64),
    Modifier(bool),
    Reset,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (-3.0f64..3.0).prop_map(Gesture::Pan),
        (0.05f64..20.0, 0.0f64..1.0).prop_map(|(f, p)| Gesture::Zoom(f, p)),
        (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(dx, dy)| Gesture::LeftDrag(dx, dy)),
        (-200.0f64..200.0, -200.0f64..200.0, 0.0f64..1.0)
            .prop_map(|(dx, dy, p)| Gesture::RightDrag(dx, dy, p)),
        (-600.0f64..600.0, 0.0f64..1.0).prop_map(|(d, p)| Gesture::Wheel(d, p)),
        any::<bool>().prop_map(Gesture::Modifier),
        Just(Gesture::Reset),
    ]
}

proptest! {
    #[test]
    fn camera_window_stays_valid_under_gestures(
        len in 2usize..3_000,
        lock in any::<bool>(),
        fix_at_edge in any::<bool>(),
        left_axis in any::<bool>(),
        gestures in prop::collection::vec(gesture(), 1..60)
    ) {
        let settings = CameraSettings {
            lock_most_recent_date: lock,
            fix_zoom_at_edge: fix_at_edge,
            ..CameraSettings::default()
        };
        let axis_side = if left_axis { AxisSide::Left } else { AxisSide::Right };
        let (mut camera, aggregator) = build_camera(settings, axis_side, len);

        for gesture in gestures {
            match gesture {
                Gesture::Pan(amount) => camera.pan_x(amount),
                Gesture::Zoom(factor, proportion) => {
                    camera.zoom_x(factor, camera.x_value_at(proportion), proportion);
                }
                Gesture::LeftDrag(dx, dy) => camera.left_drag(dx, dy, true),
                Gesture::RightDrag(dx, dy, proportion) => {
                    let anchor = camera.click_anchor(proportion, 0.5);
                    camera.right_drag(dx, dy, true, anchor);
                }
                Gesture::Wheel(delta, proportion) => {
                    camera.wheel_zoom(delta, (proportion, 0.5), false);
                }
                Gesture::Modifier(on) => camera.fix_zoom_to_edge(on, false),
                Gesture::Reset => camera.reset_x(),
            }
            camera.fit_y_to_view(&aggregator);

            let extent = camera.x_extent();
            let tolerance = 1e-12;
            prop_assert!(camera.view_width() >= camera.delta() - tolerance);
            prop_assert!(camera.left() >= extent.lower() - tolerance);
            prop_assert!(camera.right() <= extent.upper() + tolerance);
            prop_assert!(camera.bottom() < camera.top());
        }
    }
}
