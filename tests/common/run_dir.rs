//! Temporary run directories for rendering tests

use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

/// A run directory that is removed when dropped.
///
/// # Example
/// ```
/// let run = RunDir::new().with_json("intent.json", json!({"goal": "x"}));
/// assert!(run.path().join("intent.json").exists());
/// ```
pub struct RunDir {
    _dir: TempDir,
    path: PathBuf,
}

impl RunDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().to_path_buf();
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `value` as pretty JSON to `name`.
    pub fn with_json(self, name: &str, value: Value) -> Self {
        let text = serde_json::to_string_pretty(&value).expect("Failed to serialize fixture");
        self.with_raw(name, &text)
    }

    /// Write `contents` verbatim to `name`.
    pub fn with_raw(self, name: &str, contents: &str) -> Self {
        std::fs::write(self.path.join(name), contents).expect("Failed to write fixture");
        self
    }

    /// A run with every known document present.
    pub fn complete() -> Self {
        Self::new()
            .with_json("intent.json", json!({"goal": "add a greeting"}))
            .with_json(
                "coga.json",
                json!({
                    "reasoning_pack": {"id": "deep", "version": "2"},
                    "options": [{"title": "minimal"}, {"title": "full"}]
                }),
            )
            .with_json(
                "ca.json",
                json!({
                    "policy_pack_id": "strict",
                    "files": [{"path": "hello.py", "content": "print('hi')"}],
                    "patch": "diff --git a/hello.py b/hello.py\n+print('hi')\n"
                }),
            )
            .with_json("verdicts.json", json!({"verdicts": []}))
            .with_json(
                "receipt.json",
                json!({
                    "steps": [{"id": "plan", "status": "ok"}],
                    "fixtures": [{"id": "f1"}]
                }),
            )
            .with_json("execution_receipt.json", json!({"hashes": {"intent": "abc"}}))
            .with_json(
                "replay_report.json",
                json!({"results": [{"id": "f1", "verified": true}]}),
            )
            .with_json("accept_report.json", json!({"verdicts": [{"name": "a1", "status": "ok"}]}))
            .with_json(
                "report.json",
                json!({"fixtures": [{"name": "t1", "status": "passed"}]}),
            )
    }
}

impl Default for RunDir {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_run_has_all_known_documents() {
        let run = RunDir::complete();
        for name in [
            "intent.json",
            "coga.json",
            "ca.json",
            "verdicts.json",
            "receipt.json",
            "execution_receipt.json",
            "replay_report.json",
            "accept_report.json",
            "report.json",
        ] {
            assert!(run.path().join(name).is_file(), "{name} missing");
        }
    }
}
