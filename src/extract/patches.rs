//! Unified-diff patch bundles nested under diff/patch/bundle keys.

use std::collections::HashSet;

use serde_json::Value;

use crate::scan::{self, Visitor, Walk};

/// Keys (lower-cased) whose subtree may hold patch text.
const PATCH_KEYS: &[&str] = &["diff", "patch", "patches", "patch_bundle", "bundle"];

/// Heuristic check for unified-diff text.
pub fn looks_like_unified_diff(value: &str) -> bool {
    if value.trim_start().starts_with("diff --git") {
        return true;
    }
    value.contains("--- ") && value.contains("+++ ") && value.contains("@@")
}

#[derive(Default)]
struct PatchCollector<'v> {
    patches: Vec<&'v str>,
    seen: HashSet<&'v str>,
}

impl<'v> Visitor<'v> for PatchCollector<'v> {
    /// Nearest enclosing patch-indicating key, if any.
    type Context = Option<String>;

    fn entry(
        &mut self,
        key: &'v str,
        _value: &'v Value,
        ctx: &Self::Context,
    ) -> Walk<Self::Context> {
        let lowered = key.to_lowercase();
        if PATCH_KEYS.contains(&lowered.as_str()) {
            Walk::Descend(Some(lowered))
        } else {
            Walk::Descend(ctx.clone())
        }
    }

    fn scalar(&mut self, value: &'v Value, ctx: &Self::Context) {
        if ctx.is_none() {
            return;
        }
        if let Some(text) = value.as_str() {
            if looks_like_unified_diff(text) && self.seen.insert(text) {
                self.patches.push(text);
            }
        }
    }
}

/// Collect unique patch strings, in first-seen order.
pub fn extract_patch_bundles(data: &Value) -> Vec<String> {
    let mut collector = PatchCollector::default();
    scan::walk(data, &None, &mut collector);
    tracing::debug!(count = collector.patches.len(), "Extracted patch bundles");
    collector.patches.into_iter().map(str::to_string).collect()
}
