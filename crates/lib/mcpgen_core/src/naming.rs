//! Name resolution — derives package, import, and command names from a
//! project name and a prefix policy.
//!
//! Resolution is deterministic: identical inputs and identical
//! [`IdentityLookup`] responses always produce identical output. Nothing is
//! cached across requests since prefix sources may change between runs.

use thiserror::Error;

use crate::identity::IdentityLookup;
use crate::models::PrefixMode;

/// Python keywords; generated projects are Python packages, so normalized
/// names must not collide with these.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Naming policy errors.
#[derive(Debug, Error)]
pub enum NameError {
    #[error("invalid project name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid custom prefix {0:?}: normalizes to empty")]
    InvalidPrefix(String),
}

/// All names derived from one project name + resolved prefix.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedNaming {
    pub package_name: String,
    pub import_name: String,
    pub cli_command: String,
    pub mcp_command: String,
}

/// Result of name resolution, including any non-fatal advisory raised while
/// resolving an AUTO prefix.
#[derive(Debug, Clone)]
pub struct NamingOutcome {
    pub naming: ResolvedNaming,
    pub advisory: Option<String>,
}

/// Whether `s` is a Python keyword.
pub fn is_python_keyword(s: &str) -> bool {
    PYTHON_KEYWORDS.contains(&s)
}

/// Whether `s` is a valid Python identifier (and not a keyword).
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !is_python_keyword(s)
}

/// Normalize a raw name to canonical hyphenated form: lowercase,
/// non-alphanumeric runs collapsed to a single hyphen, edges trimmed.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Validate a raw project name against packaging rules, without normalizing.
///
/// Accepts lowercase alphanumeric names with hyphens or underscores, not
/// starting with a digit and not colliding with a Python keyword.
pub fn validate_project_name(name: &str) -> Result<(), NameError> {
    let invalid = |reason: &str| NameError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if is_python_keyword(name) {
        return Err(invalid("name is a Python keyword"));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or('-');
    if !first.is_ascii_lowercase() && first != '_' {
        return Err(invalid("name must start with a lowercase letter"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(invalid(
            "name may only contain lowercase letters, digits, hyphens, and underscores",
        ));
    }
    Ok(())
}

/// Resolve all derived names for a project.
///
/// The effective prefix comes from the policy: NONE → no prefix, CUSTOM →
/// normalized `custom_prefix`, AUTO → first non-empty candidate from
/// `identity`, falling back to no prefix with an advisory.
pub fn resolve(
    project_name: &str,
    prefix_mode: PrefixMode,
    custom_prefix: Option<&str>,
    identity: &dyn IdentityLookup,
) -> Result<NamingOutcome, NameError> {
    let name = normalize(project_name);
    if name.is_empty() {
        return Err(NameError::InvalidName {
            name: project_name.to_string(),
            reason: "normalizes to empty".to_string(),
        });
    }

    // The project name must stand on its own, prefix or not.
    let bare_import = name.replace('-', "_");
    if is_python_keyword(&bare_import) {
        return Err(NameError::InvalidName {
            name: project_name.to_string(),
            reason: "name is a Python keyword".to_string(),
        });
    }
    if !is_valid_identifier(&bare_import) {
        return Err(NameError::InvalidName {
            name: project_name.to_string(),
            reason: format!("import name {bare_import:?} is not a valid identifier"),
        });
    }

    let mut advisory = None;
    let prefix = match prefix_mode {
        PrefixMode::None => String::new(),
        PrefixMode::Custom => {
            let raw = custom_prefix.unwrap_or_default();
            let normalized = normalize(raw);
            if normalized.is_empty() {
                return Err(NameError::InvalidPrefix(raw.to_string()));
            }
            normalized
        }
        PrefixMode::Auto => {
            let found = identity
                .lookup()
                .into_iter()
                .flatten()
                .map(|candidate| normalize(&candidate))
                .find(|candidate| !candidate.is_empty());
            match found {
                Some(p) => p,
                None => {
                    advisory = Some(
                        "No prefix source found (git identity unavailable); \
                         generating without a package prefix"
                            .to_string(),
                    );
                    String::new()
                }
            }
        }
    };

    let package_name = if prefix.is_empty() {
        name
    } else {
        format!("{prefix}-{name}")
    };
    let import_name = package_name.replace('-', "_");
    if !is_valid_identifier(&import_name) {
        return Err(NameError::InvalidName {
            name: project_name.to_string(),
            reason: format!("import name {import_name:?} is not a valid identifier"),
        });
    }

    Ok(NamingOutcome {
        naming: ResolvedNaming {
            cli_command: package_name.clone(),
            mcp_command: format!("mcp-{package_name}"),
            import_name,
            package_name,
        },
        advisory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::NoIdentity;

    struct FixedIdentity(Vec<Option<String>>);

    impl IdentityLookup for FixedIdentity {
        fn lookup(&self) -> Vec<Option<String>> {
            self.0.clone()
        }
    }

    #[test]
    fn normalize_collapses_and_trims() {
        assert_eq!(normalize("My Cool Tool!"), "my-cool-tool");
        assert_eq!(normalize("--already--hyphenated--"), "already-hyphenated");
        assert_eq!(normalize("___"), "");
    }

    #[test]
    fn resolve_without_prefix() {
        let outcome =
            resolve("My Cool Tool!", PrefixMode::None, None, &NoIdentity).expect("resolve");
        assert_eq!(
            outcome.naming,
            ResolvedNaming {
                package_name: "my-cool-tool".to_string(),
                import_name: "my_cool_tool".to_string(),
                cli_command: "my-cool-tool".to_string(),
                mcp_command: "mcp-my-cool-tool".to_string(),
            }
        );
        assert!(outcome.advisory.is_none());
    }

    #[test]
    fn resolve_custom_prefix_is_normalized() {
        let outcome = resolve("calculator", PrefixMode::Custom, Some("Acme"), &NoIdentity)
            .expect("resolve");
        assert_eq!(outcome.naming.package_name, "acme-calculator");
        assert_eq!(outcome.naming.import_name, "acme_calculator");
        assert_eq!(outcome.naming.mcp_command, "mcp-acme-calculator");
    }

    #[test]
    fn resolve_custom_prefix_empty_after_normalization_fails() {
        let err = resolve("calculator", PrefixMode::Custom, Some("!!!"), &NoIdentity)
            .expect_err("should fail");
        assert!(matches!(err, NameError::InvalidPrefix(_)));
    }

    #[test]
    fn resolve_auto_takes_first_non_empty_candidate() {
        let identity = FixedIdentity(vec![
            None,
            Some("  ".to_string()),
            Some("Some Handle".to_string()),
            Some("ignored".to_string()),
        ]);
        let outcome = resolve("calculator", PrefixMode::Auto, None, &identity).expect("resolve");
        assert_eq!(outcome.naming.package_name, "some-handle-calculator");
        assert!(outcome.advisory.is_none());
    }

    #[test]
    fn resolve_auto_without_identity_advises_and_continues() {
        let outcome = resolve("calculator", PrefixMode::Auto, None, &NoIdentity).expect("resolve");
        assert_eq!(outcome.naming.package_name, "calculator");
        assert!(outcome.advisory.is_some());
    }

    #[test]
    fn resolve_rejects_empty_and_digit_leading_names() {
        assert!(resolve("", PrefixMode::None, None, &NoIdentity).is_err());
        assert!(resolve("!!!", PrefixMode::None, None, &NoIdentity).is_err());
        assert!(resolve("123-invalid", PrefixMode::None, None, &NoIdentity).is_err());
    }

    #[test]
    fn resolve_rejects_keyword_collision() {
        // "class" normalizes to "class", whose import form is the keyword.
        assert!(resolve("class", PrefixMode::None, None, &NoIdentity).is_err());
    }

    #[test]
    fn resolve_rejects_keyword_name_even_with_prefix() {
        let err = resolve("class", PrefixMode::Custom, Some("acme"), &NoIdentity)
            .expect_err("keyword name must be rejected regardless of prefix");
        assert!(err.to_string().contains("Python keyword"));

        let identity = FixedIdentity(vec![Some("acme".to_string())]);
        assert!(resolve("class", PrefixMode::Auto, None, &identity).is_err());
    }

    #[test]
    fn validate_project_name_rules() {
        assert!(validate_project_name("my-mcp-server").is_ok());
        assert!(validate_project_name("my_mcp_server").is_ok());
        assert!(validate_project_name("mcp123").is_ok());
        assert!(validate_project_name("class").is_err());
        assert!(validate_project_name("123-invalid").is_err());
        assert!(validate_project_name("my server").is_err());
        assert!(validate_project_name("my.server").is_err());
        assert!(validate_project_name("").is_err());
    }
}
