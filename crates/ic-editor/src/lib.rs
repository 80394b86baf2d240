//! Interaction layer for the idea canvas: host-neutral input events,
//! the viewport controller, and the pointer gesture state machine.

pub mod input;
pub mod interaction;
pub mod viewport;

pub use input::{HitTarget, InputEvent, PointerButton};
pub use interaction::{DragState, InteractionEngine};
pub use viewport::ViewportController;
