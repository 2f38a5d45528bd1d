//! # mcpgen_core
//!
//! Core generation engine for mcpgen.
//!
//! Takes a validated [`models::ProjectRequest`] and deterministically produces
//! a [`models::GenerationPlan`] — an in-memory manifest of rendered project
//! files plus advisory risk findings. Persistence, argument parsing, and the
//! MCP transport live in collaborator crates; the engine itself performs no
//! I/O beyond the injected [`render::Render`] and
//! [`identity::IdentityLookup`] collaborators.

pub mod catalog;
pub mod commands;
pub mod guidance;
pub mod identity;
pub mod models;
pub mod naming;
pub mod plan;
pub mod render;
pub mod risk;
pub mod templates;
pub mod writer;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
