//! Rendering adapter — the builder's sole bridge to the template corpus.
//!
//! Template identifiers form a fixed, closed set known at build time, so a
//! render failure indicates a programming defect rather than a transient
//! condition; the builder propagates it verbatim and emits no partial plan.

use thiserror::Error;

/// Rendering errors. Both variants are fatal for the current request.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("template {template}: {message}")]
    Render { template: String, message: String },
}

impl RenderError {
    pub(crate) fn render(template: &str, message: impl Into<String>) -> Self {
        Self::Render {
            template: template.to_string(),
            message: message.into(),
        }
    }
}

/// Materialize a named template with a parameter set into text.
pub trait Render {
    fn render(&self, template_id: &str, params: &serde_json::Value)
    -> Result<String, RenderError>;
}
