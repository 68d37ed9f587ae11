//! Dataset/fixture linkage between a receipt and a replay report.
//!
//! The receipt names the fixtures a run consumed; the replay report independently
//! records whether each fixture reproduced. Linking the two gives every referenced
//! fixture a [`Badge`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use super::fields::{first_array, first_display};

const REFERENCE_LIST_KEYS: &[&str] =
    &["fixtures", "fixture_refs", "datasets", "dataset_fixtures"];
const REFERENCE_ID_KEYS: &[&str] = &["id", "fixture_id", "name"];
const RESULT_LIST_KEYS: &[&str] = &["fixtures", "results", "cases"];
const RESULT_ID_KEYS: &[&str] = &["id", "name", "fixture_id"];
const HASH_KEYS: &[&str] = &["hash", "content_hash"];
const STATUS_KEYS: &[&str] = &["status", "verdict"];

/// Verification outcome shown in front of each linked fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Verified,
    Mismatch,
    Unknown,
}

impl Badge {
    /// Total mapping from a normalized status label to a badge.
    pub fn from_status(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "verified" | "pass" | "passed" | "ok" => Badge::Verified,
            "mismatch" | "fail" | "failed" => Badge::Mismatch,
            _ => Badge::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::Verified => "[verified]",
            Badge::Mismatch => "[mismatch]",
            Badge::Unknown => "[unknown]",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixture referenced by a receipt. Scalar entries are normalized to `{id: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRef<'v> {
    pub record: Cow<'v, Map<String, Value>>,
}

impl FixtureRef<'_> {
    pub fn id(&self) -> Option<String> {
        first_display(&self.record, REFERENCE_ID_KEYS)
    }

    pub fn hash(&self) -> Option<String> {
        first_display(&self.record, HASH_KEYS)
    }

    /// `id=..., hash=...`, or the compact record when it has neither.
    pub fn label(&self) -> String {
        let mut details = Vec::new();
        if let Some(id) = self.id() {
            details.push(format!("id={id}"));
        }
        if let Some(hash) = self.hash() {
            details.push(format!("hash={hash}"));
        }
        if details.is_empty() {
            Value::Object(self.record.clone().into_owned()).to_string()
        } else {
            details.join(", ")
        }
    }
}

/// Fixture references of a receipt, from every reference list in fixed key order.
pub fn extract_fixture_refs(receipt: &Value) -> Vec<FixtureRef<'_>> {
    let Some(map) = receipt.as_object() else {
        return Vec::new();
    };
    REFERENCE_LIST_KEYS
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_array))
        .flatten()
        .map(|item| match item {
            Value::Object(record) => FixtureRef {
                record: Cow::Borrowed(record),
            },
            scalar => {
                let mut record = Map::new();
                record.insert("id".to_string(), scalar.clone());
                FixtureRef {
                    record: Cow::Owned(record),
                }
            }
        })
        .collect()
}

/// Normalized verification status of one replay result.
///
/// An explicit boolean `verified` wins over any status string.
pub fn normalize_verification_status(result: &Map<String, Value>) -> String {
    if let Some(verified) = result.get("verified").and_then(Value::as_bool) {
        return if verified { "verified" } else { "mismatch" }.to_string();
    }
    let status = first_display(result, STATUS_KEYS)
        .unwrap_or_else(|| "unknown".to_string())
        .to_lowercase();
    if status.contains("pass") || status.contains("verified") {
        "verified".to_string()
    } else if status.contains("fail") || status.contains("mismatch") {
        "mismatch".to_string()
    } else {
        status
    }
}

/// Replay results keyed by both identifier and hash.
#[derive(Debug, Default, Clone)]
pub struct VerificationMap {
    statuses: HashMap<String, String>,
}

impl VerificationMap {
    pub fn from_report(report: &Value) -> Self {
        let mut statuses = HashMap::new();
        let results = report
            .as_object()
            .and_then(|map| first_array(map, RESULT_LIST_KEYS));
        for result in results.into_iter().flatten().filter_map(Value::as_object) {
            let status = normalize_verification_status(result);
            if let Some(id) = first_display(result, RESULT_ID_KEYS) {
                statuses.insert(id, status.clone());
            }
            if let Some(hash) = first_display(result, HASH_KEYS) {
                statuses.insert(hash, status);
            }
        }
        Self { statuses }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Status for a reference, looked up by identifier first, then hash.
    pub fn status_for(&self, fixture: &FixtureRef<'_>) -> &str {
        fixture
            .id()
            .or_else(|| fixture.hash())
            .and_then(|key| self.statuses.get(&key))
            .map(String::as_str)
            .unwrap_or("unknown")
    }
}

/// One `Dataset Linkage` line per receipt fixture reference.
pub fn dataset_linkage_lines(receipt: &Value, replay_report: &Value) -> Vec<String> {
    let fixtures = extract_fixture_refs(receipt);
    if fixtures.is_empty() {
        return Vec::new();
    }
    let verification = VerificationMap::from_report(replay_report);
    if verification.is_empty() {
        tracing::debug!("Replay report has no usable results");
    }
    tracing::debug!(
        references = fixtures.len(),
        results = verification.len(),
        "Linking fixtures"
    );
    fixtures
        .iter()
        .map(|fixture| {
            let badge = Badge::from_status(verification.status_for(fixture));
            format!("{badge} {}", fixture.label())
        })
        .collect()
}
