//! Domain models for the generation engine.
//!
//! A [`ProjectRequest`] is constructed once by a collaborator (CLI or MCP
//! dispatcher) from raw input, is immutable thereafter, and is consumed
//! exactly once by [`crate::plan::build`].

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Normalized parameter type for generated tool schemas.
///
/// Deserialization accepts the looser aliases seen in raw tool lists
/// (`int`, `integer`, `float` → [`TypeTag::Number`], and so on); an
/// unrecognised alias is a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl TypeTag {
    /// Parse a raw type string, normalizing known aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "string" | "str" | "text" => Some(Self::String),
            "number" | "int" | "integer" | "float" | "double" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            "array" | "list" => Some(Self::Array),
            "object" | "dict" | "map" => Some(Self::Object),
            _ => None,
        }
    }

    /// JSON Schema type name used in generated tool schemas.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Python annotation used in generated stub signatures.
    pub fn python_annotation(&self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Number => "float",
            Self::Boolean => "bool",
            Self::Array => "list",
            Self::Object => "dict",
        }
    }
}

impl Serialize for TypeTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.json_type())
    }
}

impl<'de> Deserialize<'de> for TypeTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown parameter type {raw:?} (expected string, number, boolean, array, or object)"
            ))
        })
    }
}

/// Prefix policy for the generated package name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMode {
    Auto,
    None,
    Custom,
}

impl PrefixMode {
    /// Split a raw prefix flag (`"AUTO"`, `"NONE"`, or a literal prefix)
    /// into a mode and an optional custom prefix value.
    pub fn parse_flag(raw: &str) -> (Self, Option<String>) {
        match raw.trim() {
            "AUTO" => (Self::Auto, None),
            "NONE" => (Self::None, None),
            other => (Self::Custom, Some(other.to_string())),
        }
    }
}

/// Severity tier of a risk finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
}

// =============================================================================
// Tool specification
// =============================================================================

/// A single parameter of a declared tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// A declared tool the generated server will provide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One full generation request, as assembled by a collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRequest {
    pub project_name: String,
    pub description: String,
    pub author: String,
    pub email: String,
    pub tools: Vec<ToolSpec>,
    #[serde(default = "default_prefix_mode")]
    pub prefix_mode: PrefixMode,
    #[serde(default)]
    pub custom_prefix: Option<String>,
    #[serde(default = "default_true")]
    pub async_enabled: bool,
    /// Python version for the generated project; floored to 3.10.
    #[serde(default)]
    pub python_version: Option<String>,
}

fn default_prefix_mode() -> PrefixMode {
    PrefixMode::Auto
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Engine output
// =============================================================================

/// Advisory finding produced by the risk classifier. Never blocks generation.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFinding {
    pub tool_name: String,
    pub severity: Severity,
    pub matched_pattern: String,
    pub recommendation: String,
}

/// One rendered file in a generation plan, keyed by project-relative path.
#[derive(Debug, Clone, Serialize)]
pub struct PlanFile {
    pub path: String,
    pub content: String,
}

/// Complete output of one generation request, prior to any persistence.
///
/// Ownership transfers entirely to the caller; the engine keeps nothing.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    /// Resolved package name; also marks generator-owned sections when
    /// merging into existing files.
    pub package_name: String,
    pub files: Vec<PlanFile>,
    pub warnings: Vec<RiskFinding>,
    /// Non-fatal advisories (e.g. AUTO prefix resolution found no identity).
    pub notices: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_normalizes_aliases() {
        assert_eq!(TypeTag::parse("str"), Some(TypeTag::String));
        assert_eq!(TypeTag::parse("int"), Some(TypeTag::Number));
        assert_eq!(TypeTag::parse("Integer"), Some(TypeTag::Number));
        assert_eq!(TypeTag::parse("float"), Some(TypeTag::Number));
        assert_eq!(TypeTag::parse("bool"), Some(TypeTag::Boolean));
        assert_eq!(TypeTag::parse("list"), Some(TypeTag::Array));
        assert_eq!(TypeTag::parse("dict"), Some(TypeTag::Object));
        assert_eq!(TypeTag::parse("tuple"), None);
    }

    #[test]
    fn type_tag_deserializes_from_alias() {
        let param: ToolParameter = serde_json::from_str(
            r#"{"name": "count", "type": "int", "description": "How many", "required": true}"#,
        )
        .expect("deserialize");
        assert_eq!(param.type_tag, TypeTag::Number);
        assert!(param.required);
        assert!(param.default.is_none());
    }

    #[test]
    fn unknown_type_alias_is_an_error() {
        let result: Result<ToolParameter, _> =
            serde_json::from_str(r#"{"name": "x", "type": "tuple"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn prefix_flag_parses_modes() {
        assert_eq!(PrefixMode::parse_flag("AUTO"), (PrefixMode::Auto, None));
        assert_eq!(PrefixMode::parse_flag("NONE"), (PrefixMode::None, None));
        assert_eq!(
            PrefixMode::parse_flag("acme"),
            (PrefixMode::Custom, Some("acme".to_string()))
        );
    }

    #[test]
    fn tool_spec_defaults_apply() {
        let tool: ToolSpec = serde_json::from_str(r#"{"name": "ping"}"#).expect("deserialize");
        assert!(tool.description.is_empty());
        assert!(tool.parameters.is_empty());
        assert!(tool.category.is_none());
    }
}
