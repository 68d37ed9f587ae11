//! Execution step records from run graphs and timelines.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::fields::first_display;
use crate::scan::{self, Visitor, Walk};

/// Keys (lower-cased) whose array value lists step records.
const STEP_LIST_KEYS: &[&str] = &["steps", "run_steps", "timeline", "nodes"];

const ID_KEYS: &[&str] = &["id", "name"];
const STATUS_KEYS: &[&str] = &["status", "state"];
const HASH_KEYS: &[&str] = &["hash", "content_hash", "digest", "sha"];
const START_KEYS: &[&str] = &["started_at", "start_time"];
const END_KEYS: &[&str] = &["ended_at", "end_time"];

/// A step record borrowed from the source document.
#[derive(Debug, Clone, Copy)]
pub struct RunStep<'v> {
    pub record: &'v Map<String, Value>,
}

impl RunStep<'_> {
    pub fn identifier(&self) -> Option<String> {
        first_display(self.record, ID_KEYS)
    }

    pub fn status(&self) -> Option<String> {
        first_display(self.record, STATUS_KEYS)
    }

    pub fn hash(&self) -> Option<String> {
        first_display(self.record, HASH_KEYS)
    }

    /// `start -> end`, or whichever of the two is present.
    pub fn timeline(&self) -> Option<String> {
        join_timeline(
            first_display(self.record, START_KEYS),
            first_display(self.record, END_KEYS),
        )
    }

    /// Display line; `position` is 1-based and only used when the step has no identifier.
    pub fn display_line(&self, position: usize) -> String {
        let identifier = self
            .identifier()
            .unwrap_or_else(|| format!("step-{position}"));
        let status = self.status().unwrap_or_else(|| "unknown".to_string());

        let mut suffix = Vec::new();
        if let Some(hash) = self.hash() {
            suffix.push(format!("hash={hash}"));
        }
        if let Some(timeline) = self.timeline() {
            suffix.push(timeline);
        }

        if suffix.is_empty() {
            format!("{identifier}: {status}")
        } else {
            format!("{identifier}: {status} ({})", suffix.join(", "))
        }
    }
}

pub(crate) fn join_timeline(start: Option<String>, end: Option<String>) -> Option<String> {
    let parts: Vec<String> = [start, end].into_iter().flatten().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" -> "))
    }
}

#[derive(Default)]
struct StepCollector<'v> {
    steps: Vec<RunStep<'v>>,
    /// Records are deduplicated by identity, not content.
    seen: HashSet<*const Map<String, Value>>,
}

impl<'v> StepCollector<'v> {
    fn add(&mut self, record: &'v Map<String, Value>) {
        if self.seen.insert(record as *const _) {
            self.steps.push(RunStep { record });
        }
    }
}

impl<'v> Visitor<'v> for StepCollector<'v> {
    type Context = ();

    fn entry(&mut self, key: &'v str, value: &'v Value, _ctx: &()) -> Walk<()> {
        let lowered = key.to_lowercase();
        if STEP_LIST_KEYS.contains(&lowered.as_str()) {
            if let Some(items) = value.as_array() {
                for record in items.iter().filter_map(Value::as_object) {
                    self.add(record);
                }
                return Walk::Prune;
            }
        }
        // `run_graph`/`graph` wrappers need no special handling: every other key,
        // wrappers included, is scanned recursively.
        Walk::Descend(())
    }
}

/// Collect step records in document order.
pub fn extract_run_steps(data: &Value) -> Vec<RunStep<'_>> {
    let mut collector = StepCollector::default();
    scan::walk(data, &(), &mut collector);
    tracing::debug!(count = collector.steps.len(), "Extracted run steps");
    collector.steps
}

/// Display lines for every step found in `data`.
pub fn run_step_lines(data: &Value) -> Vec<String> {
    extract_run_steps(data)
        .iter()
        .enumerate()
        .map(|(index, step)| step.display_line(index + 1))
        .collect()
}
