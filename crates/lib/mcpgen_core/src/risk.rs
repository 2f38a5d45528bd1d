//! Static security-risk classification of declared tools.
//!
//! Advisory only: findings are attached to the generation plan as warnings
//! and never block generation. Matching is case-insensitive substring search
//! over a fixed vocabulary; the first matching rule per severity tier wins,
//! so a tool receives at most one HIGH and one MEDIUM finding.

use crate::models::{RiskFinding, Severity, ToolSpec};

struct RiskRule {
    pattern: &'static str,
    recommendation: &'static str,
}

/// HIGH tier: command execution, code evaluation, arbitrary-path deletion,
/// credential management. Ordered; earlier rules win.
const HIGH_RULES: &[RiskRule] = &[
    RiskRule {
        pattern: "execute",
        recommendation: "Executing commands can run arbitrary code. Restrict to an \
                         allow-list and never pass unsanitized input to a shell.",
    },
    RiskRule {
        pattern: "command",
        recommendation: "Command-style tools can run arbitrary code. Restrict to an \
                         allow-list and never pass unsanitized input to a shell.",
    },
    RiskRule {
        pattern: "shell",
        recommendation: "Shell access is equivalent to full code execution. Prefer a \
                         narrow, purpose-built tool over a generic shell.",
    },
    RiskRule {
        pattern: "subprocess",
        recommendation: "Spawning subprocesses can run arbitrary code. Validate the \
                         program path and arguments against a fixed list.",
    },
    RiskRule {
        pattern: "spawn",
        recommendation: "Spawning processes can run arbitrary code. Validate the \
                         program path and arguments against a fixed list.",
    },
    RiskRule {
        pattern: "eval",
        recommendation: "Evaluating code from input is remote code execution by \
                         design. Use a restricted expression parser instead.",
    },
    RiskRule {
        pattern: "compile",
        recommendation: "Compiling and loading code at runtime is equivalent to code \
                         execution. Treat all inputs as untrusted.",
    },
    RiskRule {
        pattern: "delete",
        recommendation: "Deletion across arbitrary paths is destructive. Confine the \
                         tool to a dedicated directory and require confirmation.",
    },
    RiskRule {
        pattern: "remove",
        recommendation: "Removal across arbitrary paths is destructive. Confine the \
                         tool to a dedicated directory and require confirmation.",
    },
    RiskRule {
        pattern: "unlink",
        recommendation: "Unlinking arbitrary paths is destructive. Confine the tool \
                         to a dedicated directory and require confirmation.",
    },
    RiskRule {
        pattern: "credential",
        recommendation: "Credential handling demands care. Never log secrets and \
                         store them only in the platform keyring.",
    },
    RiskRule {
        pattern: "password",
        recommendation: "Password handling demands care. Never log secrets and store \
                         them only in the platform keyring.",
    },
    RiskRule {
        pattern: "secret",
        recommendation: "Secret handling demands care. Never log secrets and store \
                         them only in the platform keyring.",
    },
    RiskRule {
        pattern: "token",
        recommendation: "Token handling demands care. Never log tokens and store \
                         them only in the platform keyring.",
    },
    RiskRule {
        pattern: "api key",
        recommendation: "API key handling demands care. Never log keys and store \
                         them only in the platform keyring.",
    },
];

/// MEDIUM tier: file I/O, network calls, database writes, system-information
/// disclosure. Ordered; earlier rules win.
const MEDIUM_RULES: &[RiskRule] = &[
    RiskRule {
        pattern: "file",
        recommendation: "File access should be confined to an explicit base \
                         directory; reject paths that escape it.",
    },
    RiskRule {
        pattern: "directory",
        recommendation: "Directory access should be confined to an explicit base \
                         directory; reject paths that escape it.",
    },
    RiskRule {
        pattern: "filesystem",
        recommendation: "Filesystem access should be confined to an explicit base \
                         directory; reject paths that escape it.",
    },
    RiskRule {
        pattern: "http",
        recommendation: "Outbound requests can exfiltrate data. Restrict reachable \
                         hosts and time out aggressively.",
    },
    RiskRule {
        pattern: "network",
        recommendation: "Network access can exfiltrate data. Restrict reachable \
                         hosts and time out aggressively.",
    },
    RiskRule {
        pattern: "request",
        recommendation: "Outbound requests can exfiltrate data. Restrict reachable \
                         hosts and time out aggressively.",
    },
    RiskRule {
        pattern: "url",
        recommendation: "Fetching caller-supplied URLs enables SSRF. Validate \
                         schemes and block internal address ranges.",
    },
    RiskRule {
        pattern: "download",
        recommendation: "Downloads pull untrusted content onto the host. Cap sizes \
                         and confine destination paths.",
    },
    RiskRule {
        pattern: "upload",
        recommendation: "Uploads can leak local data. Confine readable source paths \
                         to an explicit base directory.",
    },
    RiskRule {
        pattern: "database",
        recommendation: "Database writes should use parameterized statements only; \
                         never interpolate caller input into SQL.",
    },
    RiskRule {
        pattern: "sql",
        recommendation: "SQL access should use parameterized statements only; never \
                         interpolate caller input into queries.",
    },
    RiskRule {
        pattern: "query",
        recommendation: "Query tools should use parameterized statements only; \
                         never interpolate caller input into queries.",
    },
    RiskRule {
        pattern: "environment",
        recommendation: "Environment data often contains secrets. Return an \
                         allow-listed subset rather than the full environment.",
    },
    RiskRule {
        pattern: "system",
        recommendation: "System information aids reconnaissance. Return only the \
                         fields the use case actually needs.",
    },
    RiskRule {
        pattern: "process",
        recommendation: "Process listings expose other workloads on the host. \
                         Return only the fields the use case actually needs.",
    },
];

/// Classify a tool list. Pure and infallible; no findings means an empty list.
pub fn classify(tools: &[ToolSpec]) -> Vec<RiskFinding> {
    let mut findings = Vec::new();
    for tool in tools {
        let haystack = format!("{} {}", tool.name, tool.description).to_lowercase();
        if let Some(rule) = HIGH_RULES.iter().find(|r| haystack.contains(r.pattern)) {
            findings.push(finding(tool, Severity::High, rule));
        }
        if let Some(rule) = MEDIUM_RULES.iter().find(|r| haystack.contains(r.pattern)) {
            findings.push(finding(tool, Severity::Medium, rule));
        }
    }
    findings
}

fn finding(tool: &ToolSpec, severity: Severity, rule: &RiskRule) -> RiskFinding {
    RiskFinding {
        tool_name: tool.name.clone(),
        severity,
        matched_pattern: rule.pattern.to_string(),
        recommendation: rule.recommendation.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, description: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: description.to_string(),
            parameters: Vec::new(),
            category: None,
        }
    }

    #[test]
    fn benign_tools_produce_no_findings() {
        let tools = vec![tool("add_numbers", "Add two numbers together")];
        assert!(classify(&tools).is_empty());
    }

    #[test]
    fn execute_command_gets_exactly_one_high_finding() {
        let tools = vec![tool(
            "execute_command",
            "Execute a command on the host with shell semantics",
        )];
        let findings = classify(&tools);
        let high: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::High)
            .collect();
        // "execute", "command", and "shell" all match, but only the first
        // rule produces a finding.
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].matched_pattern, "execute");
        assert_eq!(high[0].tool_name, "execute_command");
    }

    #[test]
    fn at_most_one_finding_per_tier_but_both_tiers_possible() {
        let tools = vec![tool(
            "backup_tool",
            "Delete old backup files from a directory",
        )];
        let findings = classify(&tools);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(findings[0].matched_pattern, "delete");
        assert_eq!(findings[1].severity, Severity::Medium);
        assert_eq!(findings[1].matched_pattern, "file");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let tools = vec![tool("store_creds", "Manage the user's PASSWORD vault")];
        let findings = classify(&tools);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched_pattern, "password");
    }

    #[test]
    fn medium_only_tools_are_flagged_medium() {
        let tools = vec![tool("fetch_page", "Fetch a web page over HTTP")];
        let findings = classify(&tools);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[0].matched_pattern, "http");
    }

    #[test]
    fn one_finding_pair_per_tool() {
        let tools = vec![
            tool("execute_command", "Execute a command"),
            tool("read_file", "Read a file from disk"),
        ];
        let findings = classify(&tools);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].tool_name, "execute_command");
        assert_eq!(findings[1].tool_name, "read_file");
    }
}
