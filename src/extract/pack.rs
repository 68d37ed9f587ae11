//! Reasoning/policy pack references used to annotate panel titles.

use std::fmt;

use serde_json::{Map, Value};

use super::fields::{display_value, first_truthy, is_truthy};
use crate::scan;

const NESTED_ID_KEYS: &[&str] = &["id", "pack_id", "identifier"];
const NESTED_VERSION_KEYS: &[&str] = &["version", "pack_version", "ver"];

/// Which pack a document may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackKind {
    Reasoning,
    Policy,
}

impl PackKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            PackKind::Reasoning => "reasoning",
            PackKind::Policy => "policy",
        }
    }
}

/// Identifier and version of a pack; either half may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackRef {
    pub id: String,
    pub version: String,
}

impl PackRef {
    fn from_parts(id: Option<&Value>, version: Option<&Value>) -> Self {
        Self {
            id: id.filter(|v| !v.is_null()).map(display_value).unwrap_or_default(),
            version: version
                .filter(|v| !v.is_null())
                .map(display_value)
                .unwrap_or_default(),
        }
    }

    /// `id@version`, or whichever half is present.
    pub fn label(&self) -> Option<String> {
        match (self.id.is_empty(), self.version.is_empty()) {
            (false, false) => Some(format!("{}@{}", self.id, self.version)),
            (false, true) => Some(self.id.clone()),
            (true, false) => Some(self.version.clone()),
            (true, true) => None,
        }
    }
}

impl fmt::Display for PackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().unwrap_or_default())
    }
}

/// Normalize a nested pack object (`{id, version}` and synonyms).
fn normalize_pack_object(value: &Map<String, Value>) -> Option<PackRef> {
    let id = first_truthy(value, NESTED_ID_KEYS);
    let version = first_truthy(value, NESTED_VERSION_KEYS);
    if id.is_none() && version.is_none() {
        return None;
    }
    Some(PackRef::from_parts(id, version))
}

/// Pack reference declared directly on `map`, without looking at descendants.
fn pack_ref_here(map: &Map<String, Value>, kind: PackKind) -> Option<PackRef> {
    let prefix = kind.prefix();
    let id_key = format!("{prefix}_pack_id");
    let version_key = format!("{prefix}_pack_version");

    let id = map.get(&id_key);
    let version = map.get(&version_key);
    if id.is_some_and(is_truthy) || version.is_some_and(is_truthy) {
        return Some(PackRef::from_parts(id, version));
    }

    for suffix in ["pack", "pack_info", "pack_metadata", "pack_meta"] {
        match map.get(&format!("{prefix}_{suffix}")) {
            Some(Value::Object(nested)) => {
                if let Some(pack) = normalize_pack_object(nested) {
                    return Some(pack);
                }
            }
            Some(Value::String(id)) => {
                return Some(PackRef {
                    id: id.clone(),
                    version: String::new(),
                });
            }
            _ => {}
        }
    }
    None
}

/// First pack reference of the given kind, searching the document in pre-order.
pub fn extract_pack_ref(data: &Value, kind: PackKind) -> Option<PackRef> {
    scan::find_map(data, |map| pack_ref_here(map, kind))
}
