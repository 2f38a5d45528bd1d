//! Project plan builder — orchestrates naming, risk classification, and
//! rendering into an ordered generation plan.
//!
//! The manifest order is fixed (package files, tests, docs, packaging, CI)
//! so repeated generations with the same input are diff-friendly. The
//! builder performs no I/O itself; rendering and identity lookup are
//! injected collaborators, and persistence belongs to [`crate::writer`].

use std::collections::HashSet;
use std::fmt::Write;

use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::identity::IdentityLookup;
use crate::models::{GenerationPlan, PlanFile, ProjectRequest, ToolParameter, ToolSpec, TypeTag};
use crate::naming::{self, NameError};
use crate::render::{Render, RenderError};
use crate::risk;

/// Lowest Python version the generated projects support.
const MIN_PYTHON: (u32, u32) = (3, 10);

/// Build failures. Validation aggregates every violation found; the other
/// variants propagate collaborator errors verbatim.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid tool specification:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Build a complete generation plan for one request.
///
/// Fails on the first of: aggregated tool-list validation errors, naming
/// policy violations, or a render failure. Nothing partial is emitted on
/// failure. Identical inputs and identical collaborator responses yield a
/// byte-identical plan.
pub fn build(
    request: &ProjectRequest,
    identity: &dyn IdentityLookup,
    renderer: &dyn Render,
) -> Result<GenerationPlan, BuildError> {
    let violations = validate_tools(&request.tools);
    if !violations.is_empty() {
        return Err(BuildError::Validation(violations));
    }

    let outcome = naming::resolve(
        &request.project_name,
        request.prefix_mode,
        request.custom_prefix.as_deref(),
        identity,
    )?;
    let names = &outcome.naming;
    let warnings = risk::classify(&request.tools);
    let notices = outcome.advisory.into_iter().collect();

    let base = base_params(request, names);
    let import = &names.import_name;

    // Fixed manifest order: package files, tests, docs, packaging, CI.
    let manifest: Vec<(String, &str, Map<String, Value>)> = vec![
        (format!("{import}/__init__.py"), "package_init", base.clone()),
        (
            format!("{import}/server.py"),
            "server",
            with(&base, &[("tool_handlers", tool_handlers(request))]),
        ),
        (
            format!("{import}/cli.py"),
            "cli",
            with(
                &base,
                &[
                    ("tool_name_choices", tool_name_choices(&request.tools)),
                    (
                        "maybe_import_asyncio",
                        if request.async_enabled {
                            "import asyncio\n".to_string()
                        } else {
                            String::new()
                        },
                    ),
                    (
                        "cli_invoke",
                        if request.async_enabled {
                            "asyncio.run(func(**kwargs))".to_string()
                        } else {
                            "func(**kwargs)".to_string()
                        },
                    ),
                ],
            ),
        ),
        (
            format!("{import}/generator.py"),
            "logic_module",
            with(&base, &[("tool_stubs", tool_stubs(request))]),
        ),
        ("tests/__init__.py".to_string(), "tests_init", base.clone()),
        (
            "tests/test_server.py".to_string(),
            "test_server",
            with(&base, &[("tool_name_choices", tool_name_choices(&request.tools))]),
        ),
        (
            "tests/test_generator.py".to_string(),
            "test_logic",
            with(&base, &[("test_cases", test_cases(request))]),
        ),
        (
            "README.md".to_string(),
            "readme",
            with(&base, &[("tool_docs", tool_docs(&request.tools))]),
        ),
        (
            "MCP-USAGE.md".to_string(),
            "mcp_usage",
            with(&base, &[("tool_docs", tool_docs(&request.tools))]),
        ),
        ("pyproject.toml".to_string(), "pyproject", base.clone()),
        ("setup.py".to_string(), "setup", base.clone()),
        ("LICENSE".to_string(), "license", base.clone()),
        (".gitignore".to_string(), "gitignore", base.clone()),
        (
            ".github/workflows/release.yml".to_string(),
            "workflow",
            base.clone(),
        ),
    ];

    let mut files = Vec::with_capacity(manifest.len());
    for (path, template_id, params) in manifest {
        let content = renderer.render(template_id, &Value::Object(params))?;
        files.push(PlanFile { path, content });
    }

    Ok(GenerationPlan {
        package_name: names.package_name.clone(),
        files,
        warnings,
        notices,
    })
}

// =============================================================================
// Validation
// =============================================================================

/// Validate the full tool list, collecting every violation.
pub fn validate_tools(tools: &[ToolSpec]) -> Vec<String> {
    let mut violations = Vec::new();

    if tools.is_empty() {
        violations.push("at least one tool is required".to_string());
        return violations;
    }

    let mut seen_tools = HashSet::new();
    for tool in tools {
        check_identifier(&mut violations, "tool name", &tool.name);
        if !tool.name.is_empty() && !seen_tools.insert(tool.name.as_str()) {
            violations.push(format!("duplicate tool name {:?}", tool.name));
        }

        let mut seen_params = HashSet::new();
        for param in &tool.parameters {
            check_identifier(
                &mut violations,
                &format!("tool {:?}: parameter name", tool.name),
                &param.name,
            );
            if !param.name.is_empty() && !seen_params.insert(param.name.as_str()) {
                violations.push(format!(
                    "tool {:?}: duplicate parameter name {:?}",
                    tool.name, param.name
                ));
            }
        }
    }

    violations
}

fn check_identifier(violations: &mut Vec<String>, what: &str, name: &str) {
    if name.is_empty() {
        violations.push(format!("{what} is empty"));
    } else if naming::is_python_keyword(name) {
        violations.push(format!("{what} {name:?} is a Python keyword"));
    } else if !naming::is_valid_identifier(name) {
        violations.push(format!("{what} {name:?} is not a valid identifier"));
    }
}

// =============================================================================
// Template parameter derivation
// =============================================================================

fn base_params(request: &ProjectRequest, names: &crate::naming::ResolvedNaming) -> Map<String, Value> {
    let mut base = Map::new();
    base.insert("project_name".into(), json!(request.project_name));
    base.insert("package_name".into(), json!(names.package_name));
    base.insert("import_name".into(), json!(names.import_name));
    base.insert("cli_command".into(), json!(names.cli_command));
    base.insert("mcp_command".into(), json!(names.mcp_command));
    base.insert("description".into(), json!(request.description));
    base.insert("author".into(), json!(request.author));
    base.insert("email".into(), json!(request.email));
    base.insert(
        "author_handle".into(),
        json!(naming::normalize(&request.author)),
    );
    base.insert(
        "python_version".into(),
        json!(effective_python_version(request.python_version.as_deref())),
    );
    base
}

fn with(base: &Map<String, Value>, extra: &[(&str, String)]) -> Map<String, Value> {
    let mut params = base.clone();
    for (key, value) in extra {
        params.insert((*key).to_string(), json!(value));
    }
    params
}

/// Floor the requested Python version to the supported minimum.
pub fn effective_python_version(requested: Option<&str>) -> String {
    let fallback = format!("{}.{}", MIN_PYTHON.0, MIN_PYTHON.1);
    let Some(raw) = requested else {
        return fallback;
    };
    let mut parts = raw.trim().splitn(2, '.');
    let major: Option<u32> = parts.next().and_then(|p| p.parse().ok());
    let minor: Option<u32> = parts.next().and_then(|p| p.parse().ok());
    match (major, minor) {
        (Some(major), Some(minor)) if (major, minor) >= MIN_PYTHON => format!("{major}.{minor}"),
        _ => fallback,
    }
}

/// Sort required parameters ahead of optional ones; Python rejects a
/// defaulted parameter before a non-defaulted one.
fn ordered_params(params: &[ToolParameter]) -> Vec<&ToolParameter> {
    let mut ordered: Vec<&ToolParameter> = params.iter().collect();
    ordered.sort_by_key(|p| !p.required);
    ordered
}

fn python_signature(params: &[ToolParameter]) -> String {
    ordered_params(params)
        .iter()
        .map(|p| {
            let annotation = p.type_tag.python_annotation();
            if p.required {
                format!("{}: {annotation}", p.name)
            } else {
                format!("{}: {annotation} = {}", p.name, python_literal(p.default.as_ref()))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn python_literal(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(Value::String(s)) => format!("{s:?}"),
        Some(other) => serde_json::to_string(other).unwrap_or_else(|_| "None".to_string()),
    }
}

fn forward_args(params: &[ToolParameter]) -> String {
    ordered_params(params)
        .iter()
        .map(|p| format!("{}={}", p.name, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sample argument list covering required parameters only, for test stubs.
fn sample_args(params: &[ToolParameter]) -> String {
    params
        .iter()
        .filter(|p| p.required)
        .map(|p| {
            let literal = match p.type_tag {
                TypeTag::String => "\"example\"",
                TypeTag::Number => "0",
                TypeTag::Boolean => "False",
                TypeTag::Array => "[]",
                TypeTag::Object => "{}",
            };
            format!("{}={literal}", p.name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-line docstring text; defuses triple quotes and newlines.
fn docstring(text: &str, fallback: &str) -> String {
    let text = if text.trim().is_empty() { fallback } else { text };
    text.replace("\"\"\"", "'''").replace('\n', " ")
}

fn tool_handlers(request: &ProjectRequest) -> String {
    let (def, invoke) = if request.async_enabled {
        ("async def", "await generator")
    } else {
        ("def", "generator")
    };
    let mut out = String::new();
    for tool in &request.tools {
        let doc = docstring(&tool.description, &tool.name);
        writeln!(out, "\n@mcp.tool()").ok();
        writeln!(out, "{def} {}({}) -> str:", tool.name, python_signature(&tool.parameters)).ok();
        writeln!(out, "    \"\"\"{doc}\"\"\"").ok();
        writeln!(
            out,
            "    result = {invoke}.{}({})",
            tool.name,
            forward_args(&tool.parameters)
        )
        .ok();
        writeln!(out, "    return json.dumps(result, indent=2)").ok();
        writeln!(out).ok();
    }
    out.trim_end().to_string()
}

fn tool_stubs(request: &ProjectRequest) -> String {
    let def = if request.async_enabled { "async def" } else { "def" };
    let mut out = String::new();
    for tool in &request.tools {
        let doc = docstring(&tool.description, &tool.name);
        writeln!(out, "\n{def} {}({}) -> dict:", tool.name, python_signature(&tool.parameters)).ok();
        writeln!(out, "    \"\"\"{doc}\"\"\"").ok();
        writeln!(out, "    # TODO: implement {}", tool.name).ok();
        writeln!(
            out,
            "    raise NotImplementedError(\"{} is not implemented yet\")",
            tool.name
        )
        .ok();
        writeln!(out).ok();
    }
    out.trim_end().to_string()
}

fn test_cases(request: &ProjectRequest) -> String {
    let mut out = String::new();
    for tool in &request.tools {
        let args = sample_args(&tool.parameters);
        writeln!(out).ok();
        if request.async_enabled {
            writeln!(out, "@pytest.mark.asyncio").ok();
            writeln!(out, "async def test_{}_is_stubbed():", tool.name).ok();
            writeln!(out, "    with pytest.raises(NotImplementedError):").ok();
            writeln!(out, "        await generator.{}({args})", tool.name).ok();
        } else {
            writeln!(out, "def test_{}_is_stubbed():", tool.name).ok();
            writeln!(out, "    with pytest.raises(NotImplementedError):").ok();
            writeln!(out, "        generator.{}({args})", tool.name).ok();
        }
        writeln!(out).ok();
    }
    out.trim_end().to_string()
}

fn tool_name_choices(tools: &[ToolSpec]) -> String {
    tools
        .iter()
        .map(|t| format!("{:?}", t.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn tool_docs(tools: &[ToolSpec]) -> String {
    let mut out = String::new();
    for tool in tools {
        let desc = if tool.description.trim().is_empty() {
            tool.name.as_str()
        } else {
            tool.description.as_str()
        };
        writeln!(out, "- **{}** — {}", tool.name, desc.replace('\n', " ")).ok();
        for param in &tool.parameters {
            writeln!(
                out,
                "  - `{}` ({}{}): {}",
                param.name,
                param.type_tag.json_type(),
                if param.required { ", required" } else { "" },
                param.description
            )
            .ok();
        }
    }
    out.trim_end().to_string()
}
