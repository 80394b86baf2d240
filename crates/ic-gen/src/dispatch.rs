//! Generative action dispatch: expand, visualize, synthesize.
//!
//! Each action is split into a `begin_*` / `finish_*` pair around the
//! service call. `begin` validates the request against the store,
//! snapshots everything the action needs, and marks the targets busy;
//! `finish` folds the service result back in. The store is never
//! borrowed across the await, so the canvas stays fully interactive —
//! nodes can move or disappear while a call is in flight, and `finish`
//! tolerates both.
//!
//! The `expand` / `visualize` / `synthesize` functions chain the pair
//! through an [`IdeaService`] for hosts that just want the whole action.

use ic_core::model::{
    Color, EXPANSION_JITTER, EXPANSION_RADIUS, IMAGE_NODE_GAP, NODE_COLORS, SYNTHESIS_COLOR,
    SYNTHESIS_DROP, palette_color,
};
use ic_core::{GraphStore, IdeaNode, NodeId, Vec2};
use rand::Rng;
use std::f32::consts::TAU;

use crate::service::{IdeaService, ServiceError};

// ─── Expand ──────────────────────────────────────────────────────────────

/// Snapshot of an expansion request taken at `begin_expand`.
#[derive(Debug, Clone)]
pub struct ExpandJob {
    pub source: NodeId,
    /// Source content at begin time; later edits don't retarget the call.
    pub prompt: String,
    /// Ring center, world-space — the source position at begin time.
    origin: Vec2,
}

/// Validate and arm an expansion. Returns `None` (and changes nothing)
/// if the node is missing or its content is blank.
pub fn begin_expand(store: &mut GraphStore, source: NodeId) -> Option<ExpandJob> {
    let node = store.node(source)?;
    if node.content.trim().is_empty() {
        return None;
    }
    let job = ExpandJob {
        source,
        prompt: node.content.clone(),
        origin: node.position,
    };
    store.set_busy(source, true);
    store.set_error(source, None);
    Some(job)
}

/// Fold an expansion result back into the store. Returns the ids of
/// the created nodes, placed on a jittered ring around the source.
///
/// If the source was deleted mid-flight the result is dropped whole —
/// orphan idea nodes with no provenance edge would be noise.
pub fn finish_expand<R: Rng>(
    store: &mut GraphStore,
    job: &ExpandJob,
    result: Result<Vec<String>, ServiceError>,
    rng: &mut R,
) -> Vec<NodeId> {
    if !store.contains(job.source) {
        log::debug!("expand source {} deleted mid-flight; dropping result", job.source);
        return Vec::new();
    }
    store.set_busy(job.source, false);

    let ideas = match result {
        Ok(ideas) => ideas,
        Err(err) => {
            log::warn!("expand failed for {}: {err}", job.source);
            store.set_error(job.source, Some(err.to_string()));
            return Vec::new();
        }
    };
    if ideas.is_empty() {
        store.set_error(job.source, Some("no ideas returned".to_string()));
        return Vec::new();
    }

    // Evenly spaced ring with a random phase, each node jittered so
    // repeated expansions of the same source don't stack.
    let start = rng.gen_range(0.0..TAU);
    let count = ideas.len() as f32;
    let mut created = Vec::with_capacity(ideas.len());
    for (i, content) in ideas.into_iter().enumerate() {
        let angle = start + (i as f32 / count) * TAU;
        let pos = job.origin
            + Vec2::new(angle.cos(), angle.sin()) * EXPANSION_RADIUS
            + Vec2::new(
                rng.gen_range(0.0..EXPANSION_JITTER),
                rng.gen_range(0.0..EXPANSION_JITTER),
            );
        let mut node = IdeaNode::text(pos, content);
        node.color = palette_color(rng.gen_range(0..NODE_COLORS.len()));
        let id = store.add_node(node);
        store.add_connection(job.source, id);
        created.push(id);
    }
    created
}

// ─── Visualize ───────────────────────────────────────────────────────────

/// Snapshot of a visualization request taken at `begin_visualize`.
#[derive(Debug, Clone)]
pub struct VisualizeJob {
    pub source: NodeId,
    pub prompt: String,
}

/// Validate and arm a visualization. Same preconditions as expand.
pub fn begin_visualize(store: &mut GraphStore, source: NodeId) -> Option<VisualizeJob> {
    let node = store.node(source)?;
    if node.content.trim().is_empty() {
        return None;
    }
    let job = VisualizeJob {
        source,
        prompt: node.content.clone(),
    };
    store.set_busy(source, true);
    store.set_error(source, None);
    Some(job)
}

/// Fold a visualization result back in. The image node lands just right
/// of the source's current position, captioned with the prompt, linked
/// by a provenance edge.
///
/// `Ok(None)` — backend declined — creates nothing and sets no error.
pub fn finish_visualize(
    store: &mut GraphStore,
    job: &VisualizeJob,
    result: Result<Option<String>, ServiceError>,
) -> Option<NodeId> {
    let (pos, width) = {
        let node = store.node(job.source)?;
        (node.position, node.size.width)
    };
    store.set_busy(job.source, false);

    match result {
        Ok(Some(data)) => {
            let image_pos = Vec2::new(pos.x + width + IMAGE_NODE_GAP, pos.y);
            let id = store.add_node(IdeaNode::image(image_pos, job.prompt.clone(), data));
            store.add_connection(job.source, id);
            Some(id)
        }
        Ok(None) => {
            log::debug!("visualize declined for {}", job.source);
            None
        }
        Err(err) => {
            log::warn!("visualize failed for {}: {err}", job.source);
            store.set_error(job.source, Some(err.to_string()));
            None
        }
    }
}

// ─── Synthesize ──────────────────────────────────────────────────────────

/// Snapshot of a synthesis request over the two selected nodes.
#[derive(Debug, Clone)]
pub struct SynthesizeJob {
    pub first: NodeId,
    pub second: NodeId,
    pub text_first: String,
    pub text_second: String,
    /// Geometry is frozen at begin time; dragging the sources mid-call
    /// doesn't move where the synthesis lands.
    midpoint: Vec2,
}

/// Validate and arm a synthesis. Requires a selection of exactly two
/// nodes; anything else returns `None` and changes nothing.
pub fn begin_synthesize(store: &mut GraphStore) -> Option<SynthesizeJob> {
    let mut ids = store.selection().iter().copied();
    let (first, second) = match (ids.next(), ids.next(), ids.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => return None,
    };

    // Selection invariant guarantees both nodes are live.
    let (a, b) = (store.node(first)?, store.node(second)?);
    let job = SynthesizeJob {
        first,
        second,
        text_first: a.content.clone(),
        text_second: b.content.clone(),
        midpoint: (a.position + b.position) * 0.5,
    };
    for id in [first, second] {
        store.set_busy(id, true);
        store.set_error(id, None);
    }
    Some(job)
}

/// Fold a synthesis result back in: a new node below the midpoint of
/// the two sources, linked from both, replacing the selection.
///
/// If either source died mid-flight the result is dropped silently —
/// the user dismantled the pair, so the combination no longer applies.
pub fn finish_synthesize(
    store: &mut GraphStore,
    job: &SynthesizeJob,
    result: Result<String, ServiceError>,
) -> Option<NodeId> {
    store.set_busy(job.first, false);
    store.set_busy(job.second, false);
    if !store.contains(job.first) || !store.contains(job.second) {
        log::debug!("synthesize source deleted mid-flight; dropping result");
        return None;
    }

    match result {
        Ok(text) => {
            let pos = job.midpoint + Vec2::new(0.0, SYNTHESIS_DROP);
            let mut node = IdeaNode::text(pos, text);
            node.color =
                Color::from_hex(SYNTHESIS_COLOR).unwrap_or(Color::rgba(0.31, 0.27, 0.9, 1.0));
            let id = store.add_node(node);
            store.add_connection(job.first, id);
            store.add_connection(job.second, id);
            store.set_selection([id]);
            Some(id)
        }
        Err(err) => {
            log::warn!("synthesize failed for {} + {}: {err}", job.first, job.second);
            store.set_error(job.first, Some(err.to_string()));
            store.set_error(job.second, Some(err.to_string()));
            None
        }
    }
}

// ─── Whole-action drivers ────────────────────────────────────────────────

/// Run a full expansion against a service. Runtime-agnostic; the store
/// is only borrowed before and after the call.
pub async fn expand<S: IdeaService, R: Rng>(
    store: &mut GraphStore,
    service: &S,
    rng: &mut R,
    source: NodeId,
    style: Option<&str>,
) -> Vec<NodeId> {
    let Some(job) = begin_expand(store, source) else {
        return Vec::new();
    };
    let result = service.request_expansion(&job.prompt, style).await;
    finish_expand(store, &job, result, rng)
}

/// Run a full visualization against a service.
pub async fn visualize<S: IdeaService>(
    store: &mut GraphStore,
    service: &S,
    source: NodeId,
) -> Option<NodeId> {
    let job = begin_visualize(store, source)?;
    let result = service.request_image(&job.prompt).await;
    finish_visualize(store, &job, result)
}

/// Run a full synthesis of the current two-node selection.
pub async fn synthesize<S: IdeaService>(
    store: &mut GraphStore,
    service: &S,
    style: Option<&str>,
) -> Option<NodeId> {
    let job = begin_synthesize(store)?;
    let result = service
        .request_synthesis(&job.text_first, &job.text_second, style)
        .await;
    finish_synthesize(store, &job, result)
}
