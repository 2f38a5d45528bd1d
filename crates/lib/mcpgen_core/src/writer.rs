//! Plan persistence — writes a [`GenerationPlan`] to disk.
//!
//! This is the persistence collaborator, deliberately outside the engine
//! boundary: [`crate::plan::build`] only ever produces an in-memory plan.
//! In-place generation preserves caller-owned content: an existing
//! `.gitignore` gains only new entries, and existing `README.md` and
//! `MCP-USAGE.md` get the generated content appended inside delimited
//! marker comments instead of being replaced.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::GenerationPlan;

/// Files that must not be clobbered when generating into an existing
/// directory.
const CRITICAL_FILES: &[&str] = &["pyproject.toml", "setup.py"];

/// Existing files merged line-by-line in place; only new entries are added.
const LINE_MERGED_FILES: &[&str] = &[".gitignore"];

/// Existing files extended by appending a delimited generated section.
const SECTION_APPENDED_FILES: &[&str] = &["README.md", "MCP-USAGE.md"];

/// Persistence failures.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("directory already exists: {0}")]
    ProjectDirExists(PathBuf),

    #[error("cannot generate in place, critical files exist: {}", .0.join(", "))]
    CriticalFilesExist(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of writing a plan to disk.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WriteReport {
    pub project_path: PathBuf,
    pub files_created: Vec<String>,
    /// Existing files extended in place rather than replaced.
    pub files_merged: Vec<String>,
}

/// Write every file of `plan` under `output_dir`.
///
/// With `project_dir = Some(name)`, files land in a fresh `output_dir/name`
/// subdirectory; an existing one is refused. With `project_dir = None`, the
/// plan is written into `output_dir` itself (in-place generation), refused
/// when critical files are already present.
pub fn write_plan(
    plan: &GenerationPlan,
    output_dir: &Path,
    project_dir: Option<&str>,
) -> Result<WriteReport, WriteError> {
    let root = match project_dir {
        Some(name) => {
            let root = output_dir.join(name);
            if root.exists() {
                return Err(WriteError::ProjectDirExists(root));
            }
            root
        }
        None => {
            let existing: Vec<String> = CRITICAL_FILES
                .iter()
                .filter(|f| output_dir.join(f).exists())
                .map(|f| f.to_string())
                .collect();
            if !existing.is_empty() {
                return Err(WriteError::CriticalFilesExist(existing));
            }
            output_dir.to_path_buf()
        }
    };

    let in_place = project_dir.is_none();
    let mut files_created = Vec::with_capacity(plan.files.len());
    let mut files_merged = Vec::new();
    for file in &plan.files {
        let target = root.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if in_place && target.exists() {
            if LINE_MERGED_FILES.contains(&file.path.as_str()) {
                let existing = std::fs::read_to_string(&target)?;
                let (merged, added) = merge_lines(&existing, &file.content);
                if added > 0 {
                    std::fs::write(&target, merged)?;
                    files_merged.push(file.path.clone());
                }
                continue;
            }
            if SECTION_APPENDED_FILES.contains(&file.path.as_str()) {
                let existing = std::fs::read_to_string(&target)?;
                if let Some(appended) =
                    append_section(&existing, &file.content, &plan.package_name)
                {
                    std::fs::write(&target, appended)?;
                    files_merged.push(file.path.clone());
                }
                continue;
            }
        }
        std::fs::write(&target, &file.content)?;
        files_created.push(file.path.clone());
    }

    Ok(WriteReport {
        project_path: root,
        files_created,
        files_merged,
    })
}

/// Append lines of `template` missing from `existing`; returns the merged
/// content and the number of lines added. Blank lines are ignored.
fn merge_lines(existing: &str, template: &str) -> (String, usize) {
    let present: std::collections::HashSet<&str> =
        existing.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut merged = existing.to_string();
    let mut added = 0;
    for line in template.lines() {
        let line = line.trim();
        if line.is_empty() || present.contains(line) {
            continue;
        }
        if !merged.is_empty() && !merged.ends_with('\n') {
            merged.push('\n');
        }
        merged.push_str(line);
        merged.push('\n');
        added += 1;
    }
    (merged, added)
}

fn section_markers(marker: &str) -> (String, String) {
    (
        format!("<!-- MCPGEN-CONTENT-START:{marker} -->"),
        format!("<!-- MCPGEN-CONTENT-END:{marker} -->"),
    )
}

/// Append `content` to `existing` inside marker comments. Returns `None`
/// when a section with this marker is already present.
fn append_section(existing: &str, content: &str, marker: &str) -> Option<String> {
    let (start, end) = section_markers(marker);
    if existing.contains(&start) {
        return None;
    }
    let mut appended = existing.to_string();
    if !appended.is_empty() && !appended.ends_with('\n') {
        appended.push('\n');
    }
    appended.push('\n');
    appended.push_str(&start);
    appended.push('\n');
    appended.push_str(content);
    if !content.ends_with('\n') {
        appended.push('\n');
    }
    appended.push_str(&end);
    appended.push('\n');
    Some(appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanFile;

    fn plan_with(files: Vec<PlanFile>) -> GenerationPlan {
        GenerationPlan {
            package_name: "my-project".to_string(),
            files,
            warnings: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn plan() -> GenerationPlan {
        plan_with(vec![
            PlanFile {
                path: "pkg/__init__.py".to_string(),
                content: "\"\"\"pkg\"\"\"\n".to_string(),
            },
            PlanFile {
                path: "pyproject.toml".to_string(),
                content: "[project]\n".to_string(),
            },
        ])
    }

    #[test]
    fn writes_into_fresh_subdirectory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = write_plan(&plan(), dir.path(), Some("my-project")).expect("write");

        assert_eq!(report.project_path, dir.path().join("my-project"));
        assert_eq!(report.files_created.len(), 2);
        assert!(dir.path().join("my-project/pkg/__init__.py").exists());
        assert!(dir.path().join("my-project/pyproject.toml").exists());
    }

    #[test]
    fn refuses_existing_project_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("my-project")).expect("mkdir");

        let err = write_plan(&plan(), dir.path(), Some("my-project")).expect_err("should fail");
        assert!(matches!(err, WriteError::ProjectDirExists(_)));
    }

    #[test]
    fn writes_in_place_into_empty_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = write_plan(&plan(), dir.path(), None).expect("write");

        assert_eq!(report.project_path, dir.path());
        assert!(dir.path().join("pkg/__init__.py").exists());
    }

    #[test]
    fn in_place_merge_adds_only_new_gitignore_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(".gitignore"), "*.pyc\n__pycache__/\n").expect("seed");

        let plan = plan_with(vec![PlanFile {
            path: ".gitignore".to_string(),
            content: "*.pyc\n__pycache__/\n.venv/\ndist/\n".to_string(),
        }]);
        let report = write_plan(&plan, dir.path(), None).expect("write");
        assert_eq!(report.files_merged, [".gitignore"]);
        assert!(report.files_created.is_empty());

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).expect("read");
        assert!(content.contains(".venv/"));
        assert!(content.contains("dist/"));
        assert_eq!(content.matches("*.pyc").count(), 1);
        assert_eq!(content.matches("__pycache__/").count(), 1);
    }

    #[test]
    fn in_place_append_preserves_existing_readme_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("README.md"),
            "# My Project\n\nCustom content here.\n",
        )
        .expect("seed");

        let plan = plan_with(vec![PlanFile {
            path: "README.md".to_string(),
            content: "## Generated Section\n\nThis is generated.\n".to_string(),
        }]);
        let report = write_plan(&plan, dir.path(), None).expect("write");
        assert_eq!(report.files_merged, ["README.md"]);

        let content = std::fs::read_to_string(dir.path().join("README.md")).expect("read");
        assert!(content.contains("Custom content here."));
        assert!(content.contains("Generated Section"));
        assert!(content.contains("MCPGEN-CONTENT-START:my-project"));
        assert!(content.contains("MCPGEN-CONTENT-END:my-project"));
    }

    #[test]
    fn in_place_append_skips_an_already_marked_readme() {
        let dir = tempfile::tempdir().expect("tempdir");
        let seeded = "# Test\n<!-- MCPGEN-CONTENT-START:my-project -->\nOld\n\
                      <!-- MCPGEN-CONTENT-END:my-project -->\n";
        std::fs::write(dir.path().join("README.md"), seeded).expect("seed");

        let plan = plan_with(vec![PlanFile {
            path: "README.md".to_string(),
            content: "New content\n".to_string(),
        }]);
        let report = write_plan(&plan, dir.path(), None).expect("write");
        assert!(report.files_merged.is_empty());

        let content = std::fs::read_to_string(dir.path().join("README.md")).expect("read");
        assert_eq!(content, seeded);
        assert!(!content.contains("New content"));
    }

    #[test]
    fn subdirectory_mode_writes_docs_fresh() {
        let dir = tempfile::tempdir().expect("tempdir");
        let plan = plan_with(vec![PlanFile {
            path: "README.md".to_string(),
            content: "## Generated Section\n".to_string(),
        }]);
        let report = write_plan(&plan, dir.path(), Some("my-project")).expect("write");
        assert_eq!(report.files_created, ["README.md"]);

        let content =
            std::fs::read_to_string(dir.path().join("my-project/README.md")).expect("read");
        assert!(!content.contains("MCPGEN-CONTENT-START"));
    }

    #[test]
    fn refuses_in_place_over_critical_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("pyproject.toml"), "existing").expect("write");

        let err = write_plan(&plan(), dir.path(), None).expect_err("should fail");
        let WriteError::CriticalFilesExist(files) = err else {
            panic!("expected critical-files error");
        };
        assert_eq!(files, ["pyproject.toml"]);
    }
}
