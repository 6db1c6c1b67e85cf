use serde::{Deserialize, Serialize};

pub mod pin_state;

pub use pin_state::{EDGE_PROXIMITY_RATIO, PinInputs, PinState, resolve_pin_state};

/// Which pointer gesture is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    #[default]
    Idle,
    /// Primary button held: drag pans.
    Panning,
    /// Secondary button held: drag zooms around the press location.
    Zooming,
}

/// Press location captured when a zoom drag starts.
///
/// The zoom focus stays at the pressed world position for the whole drag,
/// not at the moving pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseState {
    pub click_x_proportion: f64,
    pub click_view_x: f64,
    pub click_view_y: f64,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            click_x_proportion: -1.0,
            click_view_x: 0.0,
            click_view_y: 0.0,
        }
    }
}

/// Latch for the key that flips the configured edge-zoom behaviour.
///
/// Releasing the key while a zoom drag is in progress keeps the switched
/// mode until the drag ends, so a long drag never changes its pin halfway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomModifierState {
    key_pressed: bool,
    zoom_mode_switched: bool,
}

impl ZoomModifierState {
    #[must_use]
    pub fn is_switched(self) -> bool {
        self.zoom_mode_switched
    }

    #[must_use]
    pub fn is_key_pressed(self) -> bool {
        self.key_pressed
    }

    pub fn fix_zoom_to_edge(&mut self, on: bool, zoom_drag_active: bool) {
        self.key_pressed = on;
        if on {
            self.zoom_mode_switched = true;
        } else if !zoom_drag_active {
            self.zoom_mode_switched = false;
        }
    }

    /// Called when a zoom drag ends.
    pub fn ensure_switched_mode_off(&mut self) {
        if self.zoom_mode_switched && !self.key_pressed {
            self.zoom_mode_switched = false;
        }
    }
}

/// Polled navigation keys. X keys act on every linked region, y keys only on
/// the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationKey {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomInX,
    ZoomOutX,
    ZoomInY,
    ZoomOutY,
}

impl NavigationKey {
    pub const ALL: [Self; 8] = [
        Self::PanLeft,
        Self::PanRight,
        Self::PanUp,
        Self::PanDown,
        Self::ZoomInX,
        Self::ZoomOutX,
        Self::ZoomInY,
        Self::ZoomOutY,
    ];

    fn slot(self) -> usize {
        match self {
            Self::PanLeft => 0,
            Self::PanRight => 1,
            Self::PanUp => 2,
            Self::PanDown => 3,
            Self::ZoomInX => 4,
            Self::ZoomOutX => 5,
            Self::ZoomInY => 6,
            Self::ZoomOutY => 7,
        }
    }

    #[must_use]
    pub fn affects_x(self) -> bool {
        matches!(
            self,
            Self::PanLeft | Self::PanRight | Self::ZoomInX | Self::ZoomOutX
        )
    }
}

/// Currently held navigation keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    held: [bool; 8],
}

impl HeldKeys {
    pub fn set(&mut self, key: NavigationKey, held: bool) {
        self.held[key.slot()] = held;
    }

    pub fn press(&mut self, key: NavigationKey) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: NavigationKey) {
        self.set(key, false);
    }

    pub fn clear(&mut self) {
        self.held = [false; 8];
    }

    #[must_use]
    pub fn is_held(&self, key: NavigationKey) -> bool {
        self.held[key.slot()]
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.held.iter().any(|held| *held)
    }

    #[must_use]
    pub fn any_x(&self) -> bool {
        NavigationKey::ALL
            .iter()
            .any(|key| key.affects_x() && self.is_held(*key))
    }

    #[must_use]
    pub fn any_y(&self) -> bool {
        NavigationKey::ALL
            .iter()
            .any(|key| !key.affects_x() && self.is_held(*key))
    }
}

/// Pointer and keyboard state of one chart surface.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionState {
    drag_mode: DragMode,
    mouse: MouseState,
    held_keys: HeldKeys,
    pointer: Option<(f64, f64)>,
}

impl InteractionState {
    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    #[must_use]
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    #[must_use]
    pub fn held_keys(&self) -> &HeldKeys {
        &self.held_keys
    }

    pub fn held_keys_mut(&mut self) -> &mut HeldKeys {
        &mut self.held_keys
    }

    /// Last pointer position as plot-area proportions, `None` when outside.
    #[must_use]
    pub fn pointer(&self) -> Option<(f64, f64)> {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, x_proportion: f64, y_proportion: f64) {
        self.pointer = Some((x_proportion, y_proportion));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    pub fn on_pan_start(&mut self) {
        self.drag_mode = DragMode::Panning;
    }

    pub fn on_zoom_start(&mut self, mouse: MouseState) {
        self.drag_mode = DragMode::Zooming;
        self.mouse = mouse;
    }

    /// Ends any drag and reports whether it was a zoom drag.
    pub fn on_drag_end(&mut self) -> bool {
        let was_zooming = self.drag_mode == DragMode::Zooming;
        self.drag_mode = DragMode::Idle;
        was_zooming
    }
}
