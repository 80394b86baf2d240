//! Core data model for the idea canvas: interned identifiers, node and
//! viewport types, coordinate geometry, and the graph store that owns
//! nodes, connections, and the selection.
//!
//! Everything here is synchronous and platform-neutral. Interaction
//! state machines and generative actions build on top of this crate.

pub mod geometry;
pub mod id;
pub mod model;
pub mod store;

pub use id::NodeId;
pub use model::{
    Bounds, Color, IdeaNode, NodeKind, Size, ToolMode, Vec2, ViewportState,
};
pub use store::{Connection, GraphStore};
