//! Pure coordinate transforms and connection curve math.
//!
//! Screen space is the pixel grid of the viewing surface; world space is
//! the node coordinate system. The viewport maps between them:
//! `screen = world * scale + offset`. Both directions are total — scale
//! is positive by construction, so no error cases exist.

use crate::model::{Vec2, ViewportState};

/// Invert the viewport map: `world = (screen - offset) / scale`.
pub fn screen_to_world(viewport: &ViewportState, p: Vec2) -> Vec2 {
    (p - viewport.offset) / viewport.scale
}

/// Apply the viewport map: `screen = world * scale + offset`.
pub fn world_to_screen(viewport: &ViewportState, p: Vec2) -> Vec2 {
    p * viewport.scale + viewport.offset
}

/// Minimum horizontal control-point offset for connection curves.
pub const MIN_CURVE_OFFSET: f32 = 50.0;

/// A cubic Bezier in world space, horizontal at both endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDescriptor {
    pub start: Vec2,
    pub control1: Vec2,
    pub control2: Vec2,
    pub end: Vec2,
}

/// S-curve between two node centers. The control points extend
/// horizontally by `max(0.5 * |dx|, 50)` on each side, so the curve
/// leaves and enters horizontally regardless of vertical offset.
pub fn connection_curve(start: Vec2, end: Vec2) -> CurveDescriptor {
    let control_offset = (0.5 * (end.x - start.x).abs()).max(MIN_CURVE_OFFSET);
    CurveDescriptor {
        start,
        control1: Vec2::new(start.x + control_offset, start.y),
        control2: Vec2::new(end.x - control_offset, end.y),
        end,
    }
}
