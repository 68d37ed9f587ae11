//! Requested/resolved version negotiation records.
//!
//! Three encodings are in circulation and a receipt may carry any combination:
//!
//! 1. per-run fields on `agent_runs[*]`
//! 2. parallel `requested_versions` / `resolved_versions` maps
//! 3. a combined `version_negotiation` map of `{requested, resolved}` objects
//!
//! Lines from all three are concatenated in that order.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};

use super::fields::{display_opt, first_display, first_truthy};

const RUN_ID_KEYS: &[&str] = &["id", "name"];
const RUN_REQUESTED_KEYS: &[&str] = &["requested_version", "requested", "requested_range"];
const RUN_RESOLVED_KEYS: &[&str] = &["resolved_version", "resolved"];
const ENTRY_REQUESTED_KEYS: &[&str] = &["requested", "requested_version"];
const ENTRY_RESOLVED_KEYS: &[&str] = &["resolved", "resolved_version"];

#[derive(Debug, Clone, PartialEq)]
pub struct VersionLine<'v> {
    pub key: String,
    pub requested: Option<&'v Value>,
    pub resolved: Option<&'v Value>,
}

impl fmt::Display for VersionLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: requested={}, resolved={}",
            self.key,
            display_opt(self.requested),
            display_opt(self.resolved)
        )
    }
}

fn from_agent_runs(data: &Map<String, Value>) -> Vec<VersionLine<'_>> {
    let Some(runs) = data.get("agent_runs").and_then(Value::as_array) else {
        return Vec::new();
    };
    runs.iter()
        .filter_map(Value::as_object)
        .filter_map(|run| {
            let requested = first_truthy(run, RUN_REQUESTED_KEYS);
            let resolved = first_truthy(run, RUN_RESOLVED_KEYS);
            if requested.is_none() && resolved.is_none() {
                return None;
            }
            Some(VersionLine {
                key: first_display(run, RUN_ID_KEYS).unwrap_or_else(|| "run".to_string()),
                requested,
                resolved,
            })
        })
        .collect()
}

fn from_parallel_maps(data: &Map<String, Value>) -> Vec<VersionLine<'_>> {
    let requested = data.get("requested_versions").and_then(Value::as_object);
    let resolved = data.get("resolved_versions").and_then(Value::as_object);
    if requested.is_none() && resolved.is_none() {
        return Vec::new();
    }

    let keys: BTreeSet<&String> = requested
        .into_iter()
        .chain(resolved)
        .flat_map(Map::keys)
        .collect();

    keys.into_iter()
        .map(|key| VersionLine {
            key: key.clone(),
            requested: requested.and_then(|map| map.get(key)),
            resolved: resolved.and_then(|map| map.get(key)),
        })
        .collect()
}

fn from_combined_map(data: &Map<String, Value>) -> Vec<VersionLine<'_>> {
    let Some(negotiation) = data.get("version_negotiation").and_then(Value::as_object) else {
        return Vec::new();
    };
    negotiation
        .iter()
        .filter_map(|(key, value)| {
            let entry = value.as_object()?;
            Some(VersionLine {
                key: key.clone(),
                requested: first_truthy(entry, ENTRY_REQUESTED_KEYS),
                resolved: first_truthy(entry, ENTRY_RESOLVED_KEYS),
            })
        })
        .collect()
}

/// All negotiation lines of a receipt document; empty for non-objects.
pub fn extract_version_negotiation(data: &Value) -> Vec<VersionLine<'_>> {
    let Some(map) = data.as_object() else {
        return Vec::new();
    };
    let mut lines = from_agent_runs(map);
    lines.extend(from_parallel_maps(map));
    lines.extend(from_combined_map(map));
    lines
}
