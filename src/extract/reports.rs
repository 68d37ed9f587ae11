//! Line formatting for report-style documents: reasoning options, agent runs,
//! replay/acceptance fixtures and harness results.

use serde::Serialize;
use serde_json::{Map, Value};

use super::fields::{display_value, first_array, first_display, first_truthy, is_truthy};
use super::steps::join_timeline;

pub const FIXTURE_LIST_KEYS: &[&str] = &["fixtures", "results", "cases"];
pub const VERDICT_LIST_KEYS: &[&str] = &["verdicts", "acceptance", "results"];
pub const SUMMARY_KEYS: &[&str] = &["summary", "totals", "results_summary"];

/// Numbered option lines of a reasoning document.
pub fn option_lines(data: &Value) -> Vec<String> {
    let Some(options) = data.get("options").and_then(Value::as_array) else {
        return Vec::new();
    };
    options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let label = match option {
                Value::Object(map) => first_display(map, &["name", "title", "summary"])
                    .unwrap_or_else(|| "Option".to_string()),
                other => display_value(other),
            };
            format!("{}. {label}", index + 1)
        })
        .collect()
}

/// `id: status (start -> end)` for each entry of `agent_runs`.
pub fn agent_run_lines(data: &Value) -> Vec<String> {
    let Some(runs) = data.get("agent_runs").and_then(Value::as_array) else {
        return Vec::new();
    };
    runs.iter()
        .map(|run| match run {
            Value::Object(map) => {
                let identifier =
                    first_display(map, &["id", "name"]).unwrap_or_else(|| "run".to_string());
                let status =
                    first_display(map, &["status"]).unwrap_or_else(|| "unknown".to_string());
                let timeline = join_timeline(
                    first_display(map, &["started_at", "start_time"]),
                    first_display(map, &["ended_at", "end_time"]),
                );
                match timeline {
                    Some(timeline) => format!("{identifier}: {status} ({timeline})"),
                    None => format!("{identifier}: {status}"),
                }
            }
            other => display_value(other),
        })
        .collect()
}

/// `name: status (details)` for replay fixtures and acceptance verdicts.
pub fn fixture_line(fixture: &Value) -> String {
    let Value::Object(map) = fixture else {
        return display_value(fixture);
    };
    let name =
        first_display(map, &["name", "id", "fixture"]).unwrap_or_else(|| "fixture".to_string());
    let status =
        first_display(map, &["status", "verdict"]).unwrap_or_else(|| "unknown".to_string());
    match first_display(map, &["details", "note"]) {
        Some(details) => format!("{name}: {status} ({details})"),
        None => format!("{name}: {status}"),
    }
}

/// Fixture lines from the first non-empty list among `keys`.
pub fn fixture_lines(data: &Value, keys: &[&str]) -> Vec<String> {
    data.as_object()
        .and_then(|map| first_array(map, keys))
        .map(|items| items.iter().map(fixture_line).collect())
        .unwrap_or_default()
}

/// Pass/fail/skip counts derived from statuses a harness report already carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HarnessSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total: usize,
}

impl HarnessSummary {
    pub fn from_fixtures(fixtures: &[Value]) -> Self {
        let mut summary = Self::default();
        for fixture in fixtures {
            if let Some(status) = fixture.as_object().and_then(recorded_status) {
                let normalized = status.to_lowercase();
                if normalized.starts_with("pass") {
                    summary.passed += 1;
                } else if normalized.starts_with("skip") {
                    summary.skipped += 1;
                } else {
                    summary.failed += 1;
                }
            }
            summary.total += 1;
        }
        summary
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Explicit `status`, else a boolean `passed` flag.
fn recorded_status(fixture: &Map<String, Value>) -> Option<String> {
    match fixture.get("status") {
        Some(status) if !status.is_null() => is_truthy(status).then(|| display_value(status)),
        _ => match fixture.get("passed") {
            Some(Value::Bool(true)) => Some("passed".to_string()),
            Some(Value::Bool(false)) => Some("failed".to_string()),
            _ => None,
        },
    }
}

/// Summary object for a harness report: declared, else computed from its fixtures.
pub fn harness_summary(data: &Value) -> Option<Value> {
    let map = data.as_object()?;
    if let Some(summary) = first_truthy(map, SUMMARY_KEYS) {
        return Some(summary.clone());
    }
    first_array(map, FIXTURE_LIST_KEYS)
        .map(|fixtures| HarnessSummary::from_fixtures(fixtures).to_value())
}

/// `name: status (duration)` for each harness fixture.
pub fn harness_fixture_lines(data: &Value) -> Vec<String> {
    let Some(fixtures) = data
        .as_object()
        .and_then(|map| first_array(map, FIXTURE_LIST_KEYS))
    else {
        return Vec::new();
    };
    fixtures
        .iter()
        .map(|fixture| {
            let Value::Object(map) = fixture else {
                return display_value(fixture);
            };
            let name =
                first_display(map, &["name", "id"]).unwrap_or_else(|| "fixture".to_string());
            let status = first_display(map, &["status"]).unwrap_or_else(|| {
                if map.get("passed").is_some_and(is_truthy) {
                    "passed".to_string()
                } else {
                    "failed".to_string()
                }
            });
            match first_display(map, &["duration_ms", "duration"]) {
                Some(duration) => format!("{name}: {status} ({duration})"),
                None => format!("{name}: {status}"),
            }
        })
        .collect()
}
