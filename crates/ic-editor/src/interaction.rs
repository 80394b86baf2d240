//! Pointer gesture state machine.
//!
//! One engine instance per canvas. The engine holds the active tool and
//! the transient drag state; the store and viewport are passed in per
//! event so the host keeps ownership of both.
//!
//! Gesture rules:
//! - Middle button always pans, whatever the tool or target.
//! - Hand tool pans from empty canvas; presses on nodes are ignored.
//! - Select tool: empty canvas clears the selection and arms the
//!   marquee; a node press updates the selection (shift toggles,
//!   plain replaces unless already selected) and starts a drag.
//! - Node drags move every selected node by the pointer's world-space
//!   delta, converted at the scale in effect for each move event.

use ic_core::geometry::screen_to_world;
use ic_core::model::{
    ADD_NODE_SCATTER, DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, NODE_COLORS, palette_color,
};
use ic_core::{Bounds, GraphStore, IdeaNode, NodeId, ToolMode, Vec2};
use rand::Rng;
use smallvec::SmallVec;

use crate::input::{HitTarget, InputEvent, PointerButton};
use crate::viewport::ViewportController;

/// Transient gesture state. Exactly one variant is live between a
/// pointer-down and its matching pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `anchor` is the previous pointer position, screen-space.
    PanningCanvas { anchor: Vec2 },
    /// `last` is the previous pointer position, screen-space.
    DraggingNodes { last: Vec2 },
}

#[derive(Debug, Default)]
pub struct InteractionEngine {
    tool: ToolMode,
    state: DragState,
    /// Screen-space press position while a marquee is armed. Rectangle
    /// selection itself is host-drawn; the engine only tracks the anchor.
    marquee_anchor: Option<Vec2>,
}

impl InteractionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.tool != tool {
            log::debug!("tool switched to {tool:?}");
        }
        self.tool = tool;
        // A tool switch mid-gesture abandons the gesture.
        self.state = DragState::Idle;
        self.marquee_anchor = None;
    }

    pub fn drag_state(&self) -> DragState {
        self.state
    }

    /// Marquee rectangle in screen space, if one is armed and the
    /// pointer is at `pos`.
    pub fn marquee_rect(&self, pos: Vec2) -> Option<Bounds> {
        self.marquee_anchor.map(|a| Bounds {
            x: a.x.min(pos.x),
            y: a.y.min(pos.y),
            width: (pos.x - a.x).abs(),
            height: (pos.y - a.y).abs(),
        })
    }

    /// Feed one input event through the state machine.
    pub fn handle(
        &mut self,
        store: &mut GraphStore,
        viewport: &mut ViewportController,
        event: InputEvent,
    ) {
        match event {
            InputEvent::PointerDown {
                pos,
                button,
                target,
                shift,
            } => self.pointer_down(store, pos, button, target, shift),
            InputEvent::PointerMove { pos } => self.pointer_move(store, viewport, pos),
            InputEvent::PointerUp { .. } => {
                self.state = DragState::Idle;
                self.marquee_anchor = None;
            }
            InputEvent::Wheel {
                pos,
                delta,
                zoom_modifier,
            } => viewport.handle_wheel(pos, delta, zoom_modifier),
        }
    }

    fn pointer_down(
        &mut self,
        store: &mut GraphStore,
        pos: Vec2,
        button: PointerButton,
        target: HitTarget,
        shift: bool,
    ) {
        // Middle button overrides tool and target.
        if button == PointerButton::Middle {
            self.state = DragState::PanningCanvas { anchor: pos };
            return;
        }
        if button != PointerButton::Left {
            return;
        }

        match (self.tool, target) {
            (ToolMode::Hand, HitTarget::Canvas) => {
                self.state = DragState::PanningCanvas { anchor: pos };
            }
            // Hand tool never manipulates nodes.
            (ToolMode::Hand, HitTarget::Node(_)) => {}
            (ToolMode::Select, HitTarget::Canvas) => {
                store.clear_selection();
                self.marquee_anchor = Some(pos);
            }
            (ToolMode::Select, HitTarget::Node(id)) => {
                if shift {
                    // Toggle membership; no drag starts from a shift-click.
                    store.toggle_selection(id);
                    return;
                }
                // Pressing an unselected node replaces the selection;
                // pressing a selected one keeps the group for dragging.
                if !store.is_selected(id) {
                    store.set_selection([id]);
                }
                self.state = DragState::DraggingNodes { last: pos };
            }
        }
    }

    fn pointer_move(
        &mut self,
        store: &mut GraphStore,
        viewport: &mut ViewportController,
        pos: Vec2,
    ) {
        match self.state {
            DragState::Idle => {}
            DragState::PanningCanvas { anchor } => {
                viewport.pan(pos - anchor);
                self.state = DragState::PanningCanvas { anchor: pos };
            }
            DragState::DraggingNodes { last } => {
                // Screen delta → world delta at the live scale, so a
                // mid-drag zoom changes the gearing from that point on.
                let delta = (pos - last) / viewport.scale();
                let ids: SmallVec<[NodeId; 8]> = store.selection().iter().copied().collect();
                store.move_nodes(&ids, delta);
                self.state = DragState::DraggingNodes { last: pos };
            }
        }
    }

    /// Create an empty text node roughly at the given screen position
    /// (normally the view center), scattered slightly so repeated adds
    /// don't stack. The new node becomes the sole selection and the
    /// tool snaps back to Select for immediate editing.
    pub fn add_node_at<R: Rng>(
        &mut self,
        store: &mut GraphStore,
        viewport: &ViewportController,
        screen_pos: Vec2,
        rng: &mut R,
    ) -> NodeId {
        let center = screen_to_world(viewport.state(), screen_pos);
        let half = ADD_NODE_SCATTER / 2.0;
        let scatter = Vec2::new(rng.gen_range(-half..half), rng.gen_range(-half..half));
        let top_left =
            center - Vec2::new(DEFAULT_NODE_WIDTH / 2.0, DEFAULT_NODE_HEIGHT / 2.0) + scatter;

        let mut node = IdeaNode::text(top_left, "");
        node.color = palette_color(rng.gen_range(0..NODE_COLORS.len()));
        let id = store.add_node(node);

        store.set_selection([id]);
        self.set_tool(ToolMode::Select);
        id
    }
}
