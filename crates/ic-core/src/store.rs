//! The graph store: owns nodes, connections, and the selection set.
//!
//! Nodes are weights in a `StableDiGraph`; connections are edge weights,
//! so deleting a node cascades its incident connections by construction —
//! no read-side filtering of dangling references ever happens.
//!
//! Every operation is synchronous and immediately consistent. Missing-id
//! arguments are benign no-ops throughout: with concurrent drags,
//! deletions, and in-flight generative calls, "object vanished before I
//! got to it" is an expected condition, not an error.

use crate::id::NodeId;
use crate::model::{IdeaNode, Vec2};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A directed provenance edge: `from` is the source node, `to` the
/// derived one. Created only by generative actions, destroyed only by
/// endpoint cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: NodeId,
    pub from: NodeId,
    pub to: NodeId,
}

/// Owns the node/connection collections and the selection set.
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: StableDiGraph<IdeaNode, Connection>,
    /// Index from NodeId → NodeIndex for fast lookup.
    id_index: HashMap<NodeId, NodeIndex>,
    /// Invariant: every id here references a live node.
    selection: HashSet<NodeId>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Node mutation ───────────────────────────────────────────────────

    /// Insert a node. The selection is untouched.
    pub fn add_node(&mut self, node: IdeaNode) -> NodeId {
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        id
    }

    /// Replace a node's text content. No-op if the id is absent.
    pub fn update_content(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.content = text.into();
        }
    }

    /// Add `delta` to the position of every existing node in `ids`.
    /// Ids not found are silently skipped — concurrent deletion during a
    /// drag must not crash.
    pub fn move_nodes(&mut self, ids: &[NodeId], delta: Vec2) {
        for &id in ids {
            if let Some(node) = self.node_mut(id) {
                node.position += delta;
            }
        }
    }

    /// Remove a node, every connection touching it, and its selection
    /// entry. No-op if the id is absent.
    pub fn delete_node(&mut self, id: NodeId) {
        if let Some(idx) = self.id_index.remove(&id) {
            // StableDiGraph removes incident edges with the node.
            self.graph.remove_node(idx);
            self.selection.remove(&id);
            log::debug!("deleted node {id}");
        }
    }

    /// Set the busy flag for an outstanding asynchronous action.
    /// No-op if the id is absent.
    pub fn set_busy(&mut self, id: NodeId, busy: bool) {
        if let Some(node) = self.node_mut(id) {
            node.busy = busy;
        }
    }

    /// Set or clear the node's error marker. No-op if the id is absent.
    pub fn set_error(&mut self, id: NodeId, message: Option<String>) {
        if let Some(node) = self.node_mut(id) {
            node.last_error = message;
        }
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Insert a directed connection and return its id.
    ///
    /// The store does not check endpoint existence: callers create the
    /// endpoints in the same operation and own that contract.
    pub fn add_connection(&mut self, from: NodeId, to: NodeId) -> NodeId {
        let conn = Connection {
            id: NodeId::fresh_connection(),
            from,
            to,
        };
        // Missing endpoints would mean a caller bug; fall back to a
        // detached bookkeeping entry rather than panicking.
        if let (Some(&a), Some(&b)) = (self.id_index.get(&from), self.id_index.get(&to)) {
            self.graph.add_edge(a, b, conn);
        } else {
            log::warn!("connection {} -> {} references a missing endpoint", from, to);
        }
        conn.id
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Replace the selection. Ids without a live node are dropped to
    /// keep the selection invariant.
    pub fn set_selection<I: IntoIterator<Item = NodeId>>(&mut self, ids: I) {
        self.selection = ids
            .into_iter()
            .filter(|id| self.id_index.contains_key(id))
            .collect();
    }

    /// Add the id if absent, remove it if present. Unknown nodes are
    /// never added.
    pub fn toggle_selection(&mut self, id: NodeId) {
        if !self.selection.remove(&id) && self.id_index.contains_key(&id) {
            self.selection.insert(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &HashSet<NodeId> {
        &self.selection
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selection.contains(&id)
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&IdeaNode> {
        self.id_index.get(&id).map(|&idx| &self.graph[idx])
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut IdeaNode> {
        self.id_index.get(&id).copied().map(|idx| &mut self.graph[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// All live nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &IdeaNode> {
        self.graph.node_weights()
    }

    /// All live connections. Both endpoints are guaranteed live.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Topmost node at a world-space point, or `None` for empty canvas.
    /// Later-added nodes paint above earlier ones, so scan back-to-front.
    pub fn node_at(&self, world: Vec2) -> Option<NodeId> {
        self.graph
            .node_weights()
            .filter(|n| n.bounds().contains(world))
            .last()
            .map(|n| n.id)
    }
}
