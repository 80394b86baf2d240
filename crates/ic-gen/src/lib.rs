//! Generative actions for the idea canvas: the backend service seam and
//! the dispatcher that turns service responses into graph mutations.

pub mod dispatch;
pub mod service;

pub use dispatch::{
    begin_expand, begin_synthesize, begin_visualize, expand, finish_expand, finish_synthesize,
    finish_visualize, synthesize, visualize, ExpandJob, SynthesizeJob, VisualizeJob,
};
pub use service::{parse_idea_list, IdeaService, ServiceError};
