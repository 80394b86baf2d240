//! Host-neutral input events.
//!
//! The host (windowing layer, test harness) translates its native
//! events into these and feeds them to the interaction engine. All
//! positions are screen-space pixels; the engine does its own
//! world-space conversion.

use ic_core::{NodeId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// What the pointer landed on, resolved by the host's hit test (or by
/// the engine's own [`GraphStore::node_at`] when the host has no
/// display list of its own).
///
/// [`GraphStore::node_at`]: ic_core::GraphStore::node_at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Node(NodeId),
    Canvas,
}

/// One pointer or wheel event, already hit-tested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        /// Screen-space position.
        pos: Vec2,
        button: PointerButton,
        target: HitTarget,
        /// Shift was held — toggles membership instead of replacing.
        shift: bool,
    },
    PointerMove {
        pos: Vec2,
    },
    PointerUp {
        pos: Vec2,
    },
    Wheel {
        /// Screen-space pointer position, the zoom anchor.
        pos: Vec2,
        /// Raw wheel delta in pixels, both axes.
        delta: Vec2,
        /// Ctrl/Cmd was held — wheel zooms instead of panning.
        zoom_modifier: bool,
    },
}
