//! Static development guidance — best practices and an implementation guide
//! for working with generated servers.
//!
//! Pure content lookups over fixed tables, built once per process like the
//! catalog. Callers pick a single topic or step, or fetch everything.

use std::sync::OnceLock;

use serde_json::{Map, Value, json};
use thiserror::Error;

/// Guidance lookup errors.
#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("unknown topic {topic:?} (available: {})", .available.join(", "))]
    UnknownTopic { topic: String, available: Vec<String> },

    #[error("unknown step {step:?} (available: {})", .available.join(", "))]
    UnknownStep { step: String, available: Vec<String> },
}

fn build_best_practices() -> Vec<(&'static str, Value)> {
    vec![
        (
            "progressive_disclosure",
            json!({
                "title": "Progressive Disclosure",
                "summary": "Present tools as discoverable rather than loading all definitions upfront",
                "principles": [
                    "Implement a search capability to find relevant tools by query",
                    "Include detail-level parameters (name only, name+description, full schema)",
                    "Let agents read tool definitions on demand instead of upfront",
                    "Models are good at navigating filesystem-like structures",
                ],
                "benefits": [
                    "Reduces initial context window usage",
                    "Enables scaling to hundreds or thousands of tools",
                    "Improves agent efficiency in tool discovery",
                ],
            }),
        ),
        (
            "tool_design",
            json!({
                "title": "Context-Efficient Tool Design",
                "summary": "Filter and transform data before returning to the model",
                "principles": [
                    "Process data in the execution environment before returning results",
                    "Apply aggregations, joins, and filtering client-side",
                    "Return only relevant data to the model",
                    "Avoid passing large datasets through the context window",
                ],
                "example": "Process a 10,000-row spreadsheet locally, return only the 5 rows matching criteria",
            }),
        ),
        (
            "control_flow",
            json!({
                "title": "Control Flow Optimization",
                "summary": "Implement logic in code rather than chaining tool calls",
                "principles": [
                    "Use loops, conditionals, and error handling in tool implementations",
                    "Reduce latency by handling logic in the execution environment",
                    "Avoid alternating between tool calls and model reasoning for repetitive tasks",
                ],
                "benefits": [
                    "More efficient than sequential tool calls",
                    "Lower latency",
                    "Reduced token usage",
                ],
            }),
        ),
        (
            "security",
            json!({
                "title": "Privacy and Security",
                "summary": "Keep sensitive data in the execution environment by default",
                "principles": [
                    "Only explicit logs and returns should reach the model",
                    "Implement automatic PII tokenization",
                    "Define deterministic security rules for data flow",
                    "Use secure sandboxing for code execution",
                ],
            }),
        ),
        (
            "state_management",
            json!({
                "title": "State Persistence and Skills",
                "summary": "Enable resumable workflows and reusable capabilities",
                "principles": [
                    "Allow agents to write intermediate results to files",
                    "Support persisting reusable functions as skills",
                    "Include documentation (e.g. SKILL.md) with skills",
                    "Build evolving toolboxes of higher-level capabilities",
                ],
            }),
        ),
        (
            "testing",
            json!({
                "title": "Testing and Validation",
                "summary": "Ensure reliability through comprehensive testing",
                "principles": [
                    "Test both MCP protocol compliance and business logic",
                    "Include async test coverage",
                    "Validate tool schemas and parameter handling",
                    "Test error cases and edge conditions",
                ],
            }),
        ),
    ]
}

fn build_guide() -> Vec<(&'static str, Value)> {
    vec![
        (
            "overview",
            json!({
                "title": "MCP Server Implementation Overview",
                "description": "Complete workflow for building and deploying MCP servers",
                "steps": ["setup", "implementation", "testing", "deployment", "integration"],
            }),
        ),
        (
            "setup",
            json!({
                "title": "Project Setup",
                "description": "Initialize your MCP server project",
                "steps": [
                    "Use the generate_server tool to create the project structure",
                    "Review generated files and documentation",
                    "Install dependencies: pip install -e .",
                    "Verify project structure and configuration",
                ],
                "files_created": [
                    "server.py (MCP server implementation)",
                    "cli.py (CLI interface)",
                    "generator.py (business logic with TODO stubs)",
                    "tests/ (test suite)",
                    "README.md and MCP-USAGE.md",
                    ".github/workflows/ (CI/CD pipelines)",
                ],
            }),
        ),
        (
            "implementation",
            json!({
                "title": "Tool Implementation",
                "description": "Implement your MCP server tools",
                "steps": [
                    "Locate the TODO stubs in generator.py",
                    "Implement business logic for each tool",
                    "Follow async patterns for I/O operations",
                    "Add proper error handling and validation",
                    "Update docstrings with implementation details",
                ],
                "best_practices": [
                    "Keep tool functions focused and single-purpose",
                    "Filter data before returning to the model",
                    "Implement control flow in code, not through tool chaining",
                    "Add logging for debugging",
                ],
            }),
        ),
        (
            "testing",
            json!({
                "title": "Testing Your Server",
                "description": "Validate functionality and reliability",
                "steps": [
                    "Run the test suite: pytest",
                    "Check coverage: pytest --cov",
                    "Test MCP protocol compliance",
                    "Test business logic and edge cases",
                    "Test with Claude Desktop integration",
                ],
                "commands": [
                    "pytest (run all tests)",
                    "pytest -v (verbose output)",
                    "pytest --cov=<package> --cov-report=term-missing",
                ],
            }),
        ),
        (
            "deployment",
            json!({
                "title": "Deployment and Publishing",
                "description": "Publish your MCP server to PyPI",
                "steps": [
                    "Ensure all tests pass",
                    "Update the version in setup.py",
                    "Create a GitHub release tag",
                    "GitHub Actions will publish to PyPI automatically",
                    "Verify the package on PyPI",
                ],
                "requirements": [
                    "GitHub repository with the code",
                    "PyPI account and API token",
                    "PYPI_API_TOKEN secret configured in GitHub",
                ],
            }),
        ),
        (
            "integration",
            json!({
                "title": "Claude Desktop Integration",
                "description": "Configure your server with Claude Desktop",
                "steps": [
                    "Install using uvx (recommended): uvx <package-name>",
                    "Or install with pipx: pipx install <package-name>",
                    "Configure in the Claude Desktop config JSON",
                    "Restart Claude Desktop",
                    "Test the tools in a Claude chat",
                ],
                "config_example": {
                    "mcpServers": {
                        "your-server": {
                            "command": "uvx",
                            "args": ["your-package-name"],
                        }
                    }
                },
            }),
        ),
    ]
}

static BEST_PRACTICES: OnceLock<Vec<(&'static str, Value)>> = OnceLock::new();
static GUIDE: OnceLock<Vec<(&'static str, Value)>> = OnceLock::new();

fn best_practices_content() -> &'static [(&'static str, Value)] {
    BEST_PRACTICES.get_or_init(build_best_practices)
}

fn guide_content() -> &'static [(&'static str, Value)] {
    GUIDE.get_or_init(build_guide)
}

/// Best-practice topic identifiers, in table order.
pub fn best_practice_topics() -> Vec<String> {
    best_practices_content()
        .iter()
        .map(|(id, _)| (*id).to_string())
        .collect()
}

/// Guide step identifiers, in table order, excluding the overview.
pub fn guide_steps() -> Vec<String> {
    guide_content()
        .iter()
        .map(|(id, _)| (*id).to_string())
        .filter(|id| id != "overview")
        .collect()
}

fn collect(entries: &[(&'static str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(id, body)| ((*id).to_string(), body.clone()))
        .collect()
}

/// Look up best practices.
///
/// With a topic, returns `{"topic", "practice"}`; without, returns the full
/// table as `{"best_practices", "count"}`.
pub fn best_practices(topic: Option<&str>) -> Result<Value, GuidanceError> {
    let content = best_practices_content();
    match topic {
        Some(topic) => {
            let practice = content
                .iter()
                .find(|(id, _)| *id == topic)
                .map(|(_, body)| body)
                .ok_or_else(|| GuidanceError::UnknownTopic {
                    topic: topic.to_string(),
                    available: best_practice_topics(),
                })?;
            Ok(json!({ "topic": topic, "practice": practice }))
        }
        None => Ok(json!({
            "best_practices": collect(content),
            "count": content.len(),
        })),
    }
}

/// Look up the implementation guide.
///
/// With a step (including `"overview"`), returns `{"step", "guide"}`;
/// without, returns the whole guide keyed by step.
pub fn implementation_guide(step: Option<&str>) -> Result<Value, GuidanceError> {
    let content = guide_content();
    match step {
        Some(step) => {
            let section = content
                .iter()
                .find(|(id, _)| *id == step)
                .map(|(_, body)| body)
                .ok_or_else(|| GuidanceError::UnknownStep {
                    step: step.to_string(),
                    available: guide_steps(),
                })?;
            Ok(json!({ "step": step, "guide": section }))
        }
        None => Ok(Value::Object(collect(content))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_best_practices_include_a_count() {
        let all = best_practices(None).expect("lookup");
        assert_eq!(all["count"], 6);
        assert!(all["best_practices"]["progressive_disclosure"]["title"].is_string());
    }

    #[test]
    fn single_topic_lookup_returns_topic_and_practice() {
        let result = best_practices(Some("tool_design")).expect("lookup");
        assert_eq!(result["topic"], "tool_design");
        assert!(result["practice"]["summary"].is_string());
    }

    #[test]
    fn unknown_topic_lists_available_topics() {
        let err = best_practices(Some("nonsense")).expect_err("should fail");
        let GuidanceError::UnknownTopic { topic, available } = err else {
            panic!("expected unknown-topic error");
        };
        assert_eq!(topic, "nonsense");
        assert!(available.contains(&"security".to_string()));
    }

    #[test]
    fn full_guide_includes_overview_and_steps() {
        let guide = implementation_guide(None).expect("lookup");
        assert!(guide["overview"]["steps"].is_array());
        assert!(guide["setup"]["files_created"].is_array());
        assert!(guide["integration"]["config_example"]["mcpServers"].is_object());
    }

    #[test]
    fn single_step_lookup_returns_step_and_guide() {
        let result = implementation_guide(Some("testing")).expect("lookup");
        assert_eq!(result["step"], "testing");
        assert!(result["guide"]["commands"].is_array());
    }

    #[test]
    fn unknown_step_excludes_overview_from_available() {
        let err = implementation_guide(Some("nonsense")).expect_err("should fail");
        let GuidanceError::UnknownStep { available, .. } = err else {
            panic!("expected unknown-step error");
        };
        assert!(available.contains(&"setup".to_string()));
        assert!(!available.contains(&"overview".to_string()));
    }
}
