//! Fatal error types surfaced from the top-level [`crate::render::render`]
//! entry point. Numerical edge cases (self-intersection, NaN samples) are
//! recovered locally and never become a `RenderError` -- see the
//! `tracing::warn!` call sites in the integrators instead.

use std::fmt;

#[derive(Debug, Clone)]
pub enum RenderError {
    /// Invalid `RenderParams`, caught by `RenderParams::validate` before a
    /// render starts.
    Configuration(String),

    /// A degenerate primitive or an unresolved material/light reference,
    /// caught while building the scene's acceleration structure.
    SceneBuild(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Configuration(msg) => write!(f, "invalid render configuration: {}", msg),
            RenderError::SceneBuild(msg) => write!(f, "scene build error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = RenderError::Configuration("max_depth must be > 0".into());
        assert!(err.to_string().contains("max_depth must be > 0"));
    }
}
