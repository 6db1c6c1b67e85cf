use serde::{Deserialize, Serialize};

use crate::core::types::AxisSide;

/// Fraction of the x-extent that counts as "at the edge", both for the view
/// bounds and for the pointer proportion.
pub const EDGE_PROXIMITY_RATIO: f64 = 0.01;

/// Which window edge stays fixed during an x zoom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinState {
    #[default]
    Unpinned,
    PinnedLeft,
    PinnedRight,
}

/// Everything the pin decision depends on, captured at zoom time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinInputs {
    pub lock_most_recent_date: bool,
    pub fix_zoom_at_edge: bool,
    pub zoom_mode_switched: bool,
    pub axis_side: AxisSide,
    pub left: f64,
    pub right: f64,
    pub min_x: f64,
    pub max_x: f64,
    /// Pointer position as a fraction of the plot width; negative when the
    /// zoom is not pointer-driven.
    pub focus_proportion: f64,
}

fn pin_to_axis(axis_side: AxisSide) -> PinState {
    match axis_side {
        AxisSide::Left => PinState::PinnedLeft,
        AxisSide::Right => PinState::PinnedRight,
    }
}

/// Resolves the zoom pin with precedence lock > modifier > edge proximity.
///
/// The modifier pins to the axis side when exactly one of the configured
/// edge-zoom default and the held switch key is active. Otherwise a view
/// already flush with one data edge stays pinned there: keyboard and wheel
/// zooms need only the view to be at that edge (and not at both), pointer
/// zooms additionally need the pointer within the same margin of that edge.
#[must_use]
pub fn resolve_pin_state(inputs: &PinInputs) -> PinState {
    if inputs.lock_most_recent_date {
        return pin_to_axis(inputs.axis_side);
    }
    if inputs.fix_zoom_at_edge != inputs.zoom_mode_switched {
        return pin_to_axis(inputs.axis_side);
    }

    let cutoff = EDGE_PROXIMITY_RATIO * (inputs.max_x - inputs.min_x);
    let at_left = inputs.left < inputs.min_x + cutoff;
    let at_right = inputs.right + cutoff > inputs.max_x;

    let (pin_left, pin_right) = if inputs.focus_proportion < 0.0 {
        (at_left && !at_right, at_right && !at_left)
    } else {
        (
            at_left && inputs.focus_proportion < cutoff,
            at_right && inputs.focus_proportion > 1.0 - cutoff,
        )
    };

    if pin_right {
        PinState::PinnedRight
    } else if pin_left {
        PinState::PinnedLeft
    } else {
        PinState::Unpinned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> PinInputs {
        PinInputs {
            lock_most_recent_date: false,
            fix_zoom_at_edge: false,
            zoom_mode_switched: false,
            axis_side: AxisSide::Right,
            left: 0.4,
            right: 0.6,
            min_x: 0.0,
            max_x: 0.999,
            focus_proportion: 0.5,
        }
    }

    #[test]
    fn lock_wins_over_everything() {
        let pin = resolve_pin_state(&PinInputs {
            lock_most_recent_date: true,
            axis_side: AxisSide::Left,
            zoom_mode_switched: true,
            ..inputs()
        });
        assert_eq!(pin, PinState::PinnedLeft);
    }

    #[test]
    fn modifier_inverts_configured_default() {
        let switched = PinInputs {
            zoom_mode_switched: true,
            ..inputs()
        };
        assert_eq!(resolve_pin_state(&switched), PinState::PinnedRight);

        let both = PinInputs {
            fix_zoom_at_edge: true,
            ..switched
        };
        assert_eq!(resolve_pin_state(&both), PinState::Unpinned);
    }

    #[test]
    fn keyboard_zoom_pins_at_single_edge_only() {
        let at_right = PinInputs {
            left: 0.8,
            right: 0.999,
            focus_proportion: -1.0,
            ..inputs()
        };
        assert_eq!(resolve_pin_state(&at_right), PinState::PinnedRight);

        let fully_out = PinInputs {
            left: 0.0,
            ..at_right
        };
        assert_eq!(resolve_pin_state(&fully_out), PinState::Unpinned);
    }

    #[test]
    fn pointer_zoom_needs_pointer_near_edge() {
        let at_right = PinInputs {
            left: 0.8,
            right: 0.999,
            ..inputs()
        };
        assert_eq!(resolve_pin_state(&at_right), PinState::Unpinned);
        assert_eq!(
            resolve_pin_state(&PinInputs {
                focus_proportion: 0.999,
                ..at_right
            }),
            PinState::PinnedRight
        );
    }
}
