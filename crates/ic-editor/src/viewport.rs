//! Viewport controller: the only place the world→screen transform
//! changes.
//!
//! The invariant that matters is anchor stability — the world point
//! under the pointer before a zoom step is still under the pointer
//! after it. Everything else follows from `screen = world * scale +
//! offset`.

use ic_core::geometry::screen_to_world;
use ic_core::model::{MAX_SCALE, MIN_SCALE, ZOOM_SENSITIVITY};
use ic_core::{Vec2, ViewportState};

#[derive(Debug, Default)]
pub struct ViewportController {
    state: ViewportState,
}

impl ViewportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ViewportState) -> Self {
        // Incoming state may predate the clamp; normalize it.
        let mut ctl = Self { state };
        ctl.state.scale = state.scale.clamp(MIN_SCALE, MAX_SCALE);
        ctl
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    /// Translate the view by a screen-space delta. Scale is untouched.
    pub fn pan(&mut self, delta: Vec2) {
        self.state.offset += delta;
    }

    /// Adjust scale by `scale_delta`, clamped, keeping the world point
    /// under `anchor` (screen-space) fixed on screen.
    ///
    /// A delta that clamps to the current scale leaves the offset
    /// bit-for-bit untouched, so wheel events at the zoom limits cause
    /// no drift.
    pub fn zoom(&mut self, anchor: Vec2, scale_delta: f32) {
        let new_scale = (self.state.scale + scale_delta).clamp(MIN_SCALE, MAX_SCALE);
        if new_scale == self.state.scale {
            return;
        }
        let world = screen_to_world(&self.state, anchor);
        self.state.scale = new_scale;
        self.state.offset = anchor - world * new_scale;
    }

    /// Route a wheel gesture: modifier held zooms around the pointer,
    /// plain wheel pans opposite the delta (scroll down moves the view
    /// down).
    pub fn handle_wheel(&mut self, pos: Vec2, delta: Vec2, zoom_modifier: bool) {
        if zoom_modifier {
            self.zoom(pos, -delta.y * ZOOM_SENSITIVITY);
        } else {
            self.pan(-delta);
        }
    }
}
