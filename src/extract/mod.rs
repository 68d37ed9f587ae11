//! Extractors that recover semantic structures from loosely-schematized documents.
//!
//! Every extractor is total: unexpected shapes produce an empty result, never an error.

pub mod artifacts;
pub mod fields;
pub mod fixtures;
pub mod pack;
pub mod patches;
pub mod reports;
pub mod steps;
pub mod versions;

pub use artifacts::{extract_file_artifacts, FileArtifact};
pub use fixtures::{dataset_linkage_lines, extract_fixture_refs, Badge, FixtureRef, VerificationMap};
pub use pack::{extract_pack_ref, PackKind, PackRef};
pub use patches::{extract_patch_bundles, looks_like_unified_diff};
pub use steps::{extract_run_steps, run_step_lines, RunStep};
pub use versions::{extract_version_negotiation, VersionLine};
