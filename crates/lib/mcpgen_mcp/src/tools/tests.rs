//! Tests for the mcpgen MCP tool surface.

use serde_json::Value;

use crate::server::McpGenServer;
use crate::tools::types::{GenerateResult, SearchResult, ValidateResult};

use mcpgen_core::catalog::{self, DetailLevel};

#[test]
fn server_exposes_seven_tools() {
    let tools = McpGenServer::list_tools();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
    assert_eq!(tools.len(), 7, "Expected 7 tools, got: {names:?}");
    assert!(names.contains(&"search_tools"));
    assert!(names.contains(&"get_tool_info"));
    assert!(names.contains(&"generate_server"));
    assert!(names.contains(&"validate_project_name"));
    assert!(names.contains(&"generate_claude_command"));
    assert!(names.contains(&"get_best_practices"));
    assert!(names.contains(&"get_implementation_guide"));
}

#[test]
fn every_exposed_tool_is_in_the_catalog() {
    let exposed: Vec<String> = McpGenServer::list_tools()
        .iter()
        .map(|t| t.name.to_string())
        .collect();
    for name in catalog::tool_names() {
        assert!(exposed.contains(&name), "catalog entry {name} has no MCP tool");
    }
}

#[test]
fn search_result_serializes_with_count_and_matches() {
    let matches = catalog::search("generate", DetailLevel::Summary);
    let result = SearchResult {
        query: "generate".to_string(),
        detail_level: "summary".to_string(),
        count: matches.len(),
        matches,
    };
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["query"], "generate");
    assert!(json["matches"].is_array());
    assert_eq!(json["count"].as_u64().unwrap() as usize, result.count);

    let first = &json["matches"][0];
    assert!(first["tool_name"].is_string());
    assert!(first["short_description"].is_string());
    assert!(first.get("use_cases").is_none(), "summary must omit use cases");
}

#[test]
fn generate_result_omits_empty_warning_lists() {
    let result = GenerateResult {
        success: true,
        project_path: "/tmp/demo".to_string(),
        files_created: vec!["README.md".to_string()],
        files_merged: Vec::new(),
        warnings: Vec::new(),
        notices: Vec::new(),
    };
    let json = serde_json::to_value(&result).expect("serialize");
    assert!(json.get("warnings").is_none());
    assert!(json.get("notices").is_none());
    assert!(json.get("files_merged").is_none());
}

#[test]
fn validate_result_carries_a_reason_only_on_failure() {
    let ok = ValidateResult {
        name: "my-server".to_string(),
        valid: true,
        reason: None,
    };
    let json: Value = serde_json::to_value(&ok).expect("serialize");
    assert_eq!(json["valid"], true);
    assert!(json.get("reason").is_none());

    let bad = ValidateResult {
        name: "class".to_string(),
        valid: false,
        reason: Some("name is a Python keyword".to_string()),
    };
    let json: Value = serde_json::to_value(&bad).expect("serialize");
    assert_eq!(json["valid"], false);
    assert!(json["reason"].is_string());
}

#[test]
fn command_request_defaults_to_the_generator_workflow() {
    let raw = serde_json::json!({"command_name": "mcp-generate"});
    let request: crate::tools::requests::GenerateClaudeCommandRequest =
        serde_json::from_value(raw).expect("deserialize");
    assert_eq!(request.command_name, "mcp-generate");
    let command_type: mcpgen_core::commands::CommandType = request.command_type.into();
    assert_eq!(command_type, mcpgen_core::commands::CommandType::McpGenerator);
    assert!(request.output_dir.is_none());
}

#[test]
fn command_type_parses_snake_case_variants() {
    let raw = serde_json::json!({
        "command_name": "mcp-impl",
        "command_type": "implementation_helper"
    });
    let request: crate::tools::requests::GenerateClaudeCommandRequest =
        serde_json::from_value(raw).expect("deserialize");
    let command_type: mcpgen_core::commands::CommandType = request.command_type.into();
    assert_eq!(
        command_type,
        mcpgen_core::commands::CommandType::ImplementationHelper
    );
}

#[test]
fn tool_declaration_parses_from_raw_json() {
    let raw = serde_json::json!({
        "name": "fetch_page",
        "description": "Fetch a web page",
        "parameters": [
            {"name": "url", "type": "str", "required": true},
            {"name": "timeout", "type": "int", "default": 30}
        ]
    });
    let decl: crate::tools::requests::ToolDecl =
        serde_json::from_value(raw).expect("deserialize");
    assert_eq!(decl.name, "fetch_page");
    assert_eq!(decl.parameters.len(), 2);
    assert!(!decl.parameters[1].required);
}
