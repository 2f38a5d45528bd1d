//! Builtin template backend.
//!
//! Embeds the template corpus at compile time and implements [`Render`] with
//! single-pass `{{ident}}` substitution. Substituted values are never
//! rescanned, so caller-supplied text (descriptions, author names) cannot
//! inject further placeholders. A `{{` that is not followed by a plain
//! identifier and `}}` is copied verbatim, which keeps GitHub Actions
//! `${{ ... }}` expressions intact.

use crate::render::{Render, RenderError};

const TEMPLATES: &[(&str, &str)] = &[
    ("package_init", include_str!("../templates/package_init.py.tmpl")),
    ("server", include_str!("../templates/server.py.tmpl")),
    ("cli", include_str!("../templates/cli.py.tmpl")),
    ("logic_module", include_str!("../templates/generator.py.tmpl")),
    ("tests_init", include_str!("../templates/tests_init.py.tmpl")),
    ("test_server", include_str!("../templates/test_server.py.tmpl")),
    ("test_logic", include_str!("../templates/test_generator.py.tmpl")),
    ("readme", include_str!("../templates/README.md.tmpl")),
    ("mcp_usage", include_str!("../templates/MCP-USAGE.md.tmpl")),
    ("pyproject", include_str!("../templates/pyproject.toml.tmpl")),
    ("setup", include_str!("../templates/setup.py.tmpl")),
    ("license", include_str!("../templates/LICENSE.tmpl")),
    ("gitignore", include_str!("../templates/gitignore.tmpl")),
    ("workflow", include_str!("../templates/release.yml.tmpl")),
];

/// Renderer over the embedded template corpus.
#[derive(Debug, Default)]
pub struct BuiltinTemplates;

impl Render for BuiltinTemplates {
    fn render(
        &self,
        template_id: &str,
        params: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let (_, text) = TEMPLATES
            .iter()
            .find(|(id, _)| *id == template_id)
            .ok_or_else(|| RenderError::TemplateNotFound(template_id.to_string()))?;
        substitute(template_id, text, params)
    }
}

/// Parse a `key}}` head off `s`; keys are plain lowercase identifiers.
fn parse_placeholder(s: &str) -> Option<(&str, &str)> {
    let end = s.find("}}")?;
    let key = &s[..end];
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_lowercase() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return None;
    }
    Some((key, &s[end + 2..]))
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn substitute(
    template_id: &str,
    text: &str,
    params: &serde_json::Value,
) -> Result<String, RenderError> {
    let obj = params
        .as_object()
        .ok_or_else(|| RenderError::render(template_id, "parameters must be a JSON object"))?;

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("{{") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];
        match parse_placeholder(after) {
            Some((key, tail)) => {
                let value = obj.get(key).ok_or_else(|| {
                    RenderError::render(template_id, format!("missing parameter {key:?}"))
                })?;
                out.push_str(&value_to_string(value));
                rest = tail;
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_template_id_fails() {
        let err = BuiltinTemplates
            .render("no_such_template", &json!({}))
            .expect_err("should fail");
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn substitutes_known_placeholders() {
        let out = substitute("t", "Hello {{name}}, v{{major}}!", &json!({"name": "x", "major": 2}))
            .expect("substitute");
        assert_eq!(out, "Hello x, v2!");
    }

    #[test]
    fn missing_parameter_is_a_render_error() {
        let err = substitute("t", "Hello {{name}}", &json!({})).expect_err("should fail");
        assert!(err.to_string().contains("missing parameter"));
    }

    #[test]
    fn non_identifier_braces_are_copied_verbatim() {
        let out = substitute("t", "uses ${{ secrets.TOKEN }} here", &json!({}))
            .expect("substitute");
        assert_eq!(out, "uses ${{ secrets.TOKEN }} here");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let out = substitute("t", "desc: {{description}}", &json!({"description": "{{author}}"}))
            .expect("substitute");
        assert_eq!(out, "desc: {{author}}");
    }

    #[test]
    fn license_template_renders_with_author_only() {
        let out = BuiltinTemplates
            .render("license", &json!({"author": "Test Author"}))
            .expect("render");
        assert!(out.starts_with("MIT License"));
        assert!(out.contains("Copyright (c) Test Author"));
    }

    #[test]
    fn every_embedded_template_is_reachable() {
        for (id, text) in TEMPLATES {
            assert!(!text.is_empty(), "template {id} is empty");
        }
    }
}
