//! Composes the report for one run directory.

use std::path::Path;

use serde_json::Value;

use super::context::{Document, LoadOptions, RunContext};
use super::error::ViewError;
use super::panel::{Panel, Report, DEFAULT_INDENT};
use super::roles::DocumentRole;
use crate::config::Config;
use crate::extract::reports::{self, FIXTURE_LIST_KEYS, VERDICT_LIST_KEYS};
use crate::extract::{
    dataset_linkage_lines, extract_file_artifacts, extract_pack_ref, extract_patch_bundles,
    extract_version_negotiation, run_step_lines,
};

/// Knobs for a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub indent: usize,
    pub strict: bool,
    pub raw_json: bool,
    pub pack_titles: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            strict: false,
            raw_json: true,
            pack_titles: true,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            indent: config.indent,
            strict: config.strict,
            raw_json: config.raw_json,
            pack_titles: config.pack_titles,
        }
    }
}

/// Load `directory` and render every panel.
pub fn render_directory(directory: &Path, options: &RenderOptions) -> Result<Report, ViewError> {
    let context = RunContext::load(
        directory,
        LoadOptions {
            strict: options.strict,
            include_extras: options.raw_json,
        },
    )?;
    Ok(render_context(&context, options))
}

/// Render an already loaded run directory. Never fails.
pub fn render_context(context: &RunContext, options: &RenderOptions) -> Report {
    let mut report = Report::new(options.indent);

    for role in DocumentRole::ALL {
        let path = context.path_for(role);
        match context.document(role) {
            None => report.push(Panel::missing(role.title(), path)),
            Some(Document::Unreadable { error }) => {
                report.push(Panel::unreadable(role.title(), path, error.clone()))
            }
            Some(Document::Loaded(data)) => {
                report.push(Panel::json(panel_title(role, data, options), data.clone()));
                report.extend(role_panels(role, data, context));
            }
        }
    }

    if options.raw_json {
        for extra in context.extras() {
            let title = format!("Raw JSON: {}", extra.file_name);
            report.push(match &extra.document {
                Document::Loaded(data) => Panel::json(title, data.clone()),
                Document::Unreadable { error } => {
                    Panel::unreadable(title, extra.path.clone(), error.clone())
                }
            });
        }
    }

    tracing::debug!(
        directory = %context.directory().display(),
        panels = report.panels.len(),
        "Rendered report"
    );
    report
}

/// Role title, annotated with a pack reference when one is recoverable.
pub fn panel_title(role: DocumentRole, data: &Value, options: &RenderOptions) -> String {
    let label = role
        .pack_kind()
        .filter(|_| options.pack_titles)
        .and_then(|kind| extract_pack_ref(data, kind))
        .and_then(|pack| pack.label());
    match label {
        Some(label) => format!("{} [pack: {label}]", role.title()),
        None => role.title().to_string(),
    }
}

/// Extractor panels registered for a role.
fn role_panels(role: DocumentRole, data: &Value, context: &RunContext) -> Vec<Panel> {
    match role {
        DocumentRole::Intent | DocumentRole::Verdicts => Vec::new(),
        DocumentRole::Reasoning => reasoning_panels(data),
        DocumentRole::Build => {
            let mut panels = artifact_panels(data);
            panels.extend(patch_panels(data));
            panels
        }
        DocumentRole::Receipt => {
            let mut panels = receipt_panels(data);
            if let Some(replay_report) = context.value(DocumentRole::ReplayReport) {
                panels.extend(Panel::list(
                    "Dataset Linkage",
                    dataset_linkage_lines(data, replay_report),
                ));
            }
            panels
        }
        DocumentRole::SystemReceipt => receipt_panels(data),
        DocumentRole::ReplayReport => {
            Panel::list("Replay Fixtures", reports::fixture_lines(data, FIXTURE_LIST_KEYS))
                .into_iter()
                .collect()
        }
        DocumentRole::AcceptanceReport => Panel::list(
            "Acceptance Verdicts",
            reports::fixture_lines(data, VERDICT_LIST_KEYS),
        )
        .into_iter()
        .collect(),
        DocumentRole::HarnessReport => harness_panels(data),
    }
}

fn reasoning_panels(data: &Value) -> Vec<Panel> {
    let mut panels: Vec<Panel> = Panel::list("CogA Options", reports::option_lines(data))
        .into_iter()
        .collect();
    if let Some(matrix) = data.get("comparison_matrix").filter(|m| !m.is_null()) {
        panels.push(Panel::json("CogA Comparison Matrix", matrix.clone()));
    }
    panels
}

fn artifact_panels(data: &Value) -> Vec<Panel> {
    let artifacts = extract_file_artifacts(data);
    let paths = artifacts.iter().map(|a| a.path.clone()).collect();
    let mut panels: Vec<Panel> = Panel::list("Multi-file Artifacts (File List)", paths)
        .into_iter()
        .collect();
    for artifact in artifacts {
        let title = format!("Multi-file Artifact: {}", artifact.path);
        panels.push(match artifact.content {
            Value::String(text) => Panel::text(title, text),
            structured => Panel::json(title, structured),
        });
    }
    panels
}

fn patch_panels(data: &Value) -> Vec<Panel> {
    extract_patch_bundles(data)
        .into_iter()
        .enumerate()
        .map(|(index, patch)| {
            Panel::text(format!("Patch Bundle {} (Unified Diff)", index + 1), patch)
        })
        .collect()
}

fn receipt_panels(data: &Value) -> Vec<Panel> {
    let mut panels: Vec<Panel> = Vec::new();
    panels.extend(Panel::list("Receipt Agent Runs", reports::agent_run_lines(data)));
    for (key, title) in [("versions", "Receipt Versions"), ("hashes", "Receipt Hashes")] {
        if let Some(map) = data.get(key).and_then(Value::as_object) {
            if !map.is_empty() {
                panels.push(Panel::json(title, Value::Object(map.clone())));
            }
        }
    }
    panels.extend(Panel::list("Run Steps", run_step_lines(data)));
    let versions = extract_version_negotiation(data)
        .iter()
        .map(ToString::to_string)
        .collect();
    panels.extend(Panel::list("Version Negotiation", versions));
    panels
}

fn harness_panels(data: &Value) -> Vec<Panel> {
    let mut panels = Vec::new();
    if let Some(summary) = reports::harness_summary(data) {
        panels.push(Panel::json("Harness Report Summary", summary));
    }
    panels.extend(Panel::list(
        "Harness Fixtures",
        reports::harness_fixture_lines(data),
    ));
    panels
}
