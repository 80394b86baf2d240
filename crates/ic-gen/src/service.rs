//! The generative backend seam.
//!
//! [`IdeaService`] is the only place the crate touches a network or a
//! model. Implementations live in the host (an HTTP client in
//! production, a canned mock in tests); the dispatcher only cares about
//! the three request shapes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend could not be reached or returned a failure status.
    #[error("service transport failed: {0}")]
    Transport(String),
    /// The backend answered with something the caller cannot use.
    #[error("malformed service response: {0}")]
    Malformed(String),
}

/// Asynchronous generative backend. `style` is an optional free-form
/// steering hint appended to every prompt.
#[allow(async_fn_in_trait)]
pub trait IdeaService {
    /// Ask for related ideas branching off `prompt`. An empty list is a
    /// valid answer ("nothing came to mind").
    async fn request_expansion(
        &self,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<Vec<String>, ServiceError>;

    /// Ask for a single concept combining two idea texts.
    async fn request_synthesis(
        &self,
        a: &str,
        b: &str,
        style: Option<&str>,
    ) -> Result<String, ServiceError>;

    /// Ask for an image rendering of `prompt`. `Ok(None)` means the
    /// backend declined without failing; the payload is an opaque
    /// reference (data URI or host handle).
    async fn request_image(&self, prompt: &str) -> Result<Option<String>, ServiceError>;
}

/// Recover a list of idea strings from a raw expansion response.
///
/// Backends are asked for a JSON string array but don't always comply.
/// A clean parse wins; any other non-blank payload is demoted to a
/// single-element list rather than discarded.
pub fn parse_idea_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<String>>(trimmed) {
        Ok(ideas) => ideas,
        Err(err) => {
            log::warn!("expansion response was not a JSON array ({err}); using raw text");
            vec![trimmed.to_string()]
        }
    }
}
