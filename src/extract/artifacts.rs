//! Embedded file artifacts (`files: [{path, content}]`) in build documents.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::fields::{display_value, first_truthy};
use crate::scan::{self, Visitor};

const PATH_KEYS: &[&str] = &["path", "file", "filename"];
const CONTENT_FALLBACK_KEYS: &[&str] = &["text", "body"];

/// A file-like `(path, content)` pair recovered from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FileArtifact {
    pub path: String,
    /// Either a string (rendered verbatim) or a structured value (pretty-printed).
    pub content: Value,
}

impl FileArtifact {
    pub fn content_text(&self) -> Option<&str> {
        self.content.as_str()
    }
}

#[derive(Default)]
struct ArtifactCollector {
    artifacts: Vec<FileArtifact>,
    seen: HashSet<(String, String)>,
}

impl ArtifactCollector {
    fn add_entry(&mut self, entry: &Map<String, Value>) {
        let Some(path) = first_truthy(entry, PATH_KEYS) else {
            return;
        };
        // An explicit `content` key wins even when it is empty.
        let content = match entry.get("content") {
            Some(content) => content,
            None => match first_truthy(entry, CONTENT_FALLBACK_KEYS) {
                Some(content) => content,
                None => return,
            },
        };
        if content.is_null() {
            return;
        }

        let path = display_value(path);
        let key = (path.clone(), display_value(content));
        if self.seen.insert(key) {
            self.artifacts.push(FileArtifact {
                path,
                content: content.clone(),
            });
        }
    }
}

impl<'v> Visitor<'v> for ArtifactCollector {
    type Context = ();

    fn object(&mut self, map: &'v Map<String, Value>, _ctx: &()) {
        if let Some(files) = map.get("files").and_then(Value::as_array) {
            for entry in files.iter().filter_map(Value::as_object) {
                self.add_entry(entry);
            }
        }
        // Nested `artifacts` bundles are reached by the regular walk below; the
        // seen-set keeps the extra visit from producing duplicates.
    }
}

/// Collect unique file artifacts, in first-seen order.
pub fn extract_file_artifacts(data: &Value) -> Vec<FileArtifact> {
    let mut collector = ArtifactCollector::default();
    scan::walk(data, &(), &mut collector);
    tracing::debug!(count = collector.artifacts.len(), "Extracted file artifacts");
    collector.artifacts
}
