//! The fixed, ordered set of documents a run directory may contain.

use crate::extract::PackKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentRole {
    Intent,
    Reasoning,
    Build,
    Verdicts,
    Receipt,
    SystemReceipt,
    ReplayReport,
    AcceptanceReport,
    HarnessReport,
}

impl DocumentRole {
    /// Panel order of the report.
    pub const ALL: [DocumentRole; 9] = [
        DocumentRole::Intent,
        DocumentRole::Reasoning,
        DocumentRole::Build,
        DocumentRole::Verdicts,
        DocumentRole::Receipt,
        DocumentRole::SystemReceipt,
        DocumentRole::ReplayReport,
        DocumentRole::AcceptanceReport,
        DocumentRole::HarnessReport,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DocumentRole::Intent => "Intent",
            DocumentRole::Reasoning => "Reasoning (CogA)",
            DocumentRole::Build => "Build (cA)",
            DocumentRole::Verdicts => "Verdicts",
            DocumentRole::Receipt => "Execution Receipt",
            DocumentRole::SystemReceipt => "Execution Receipt (System)",
            DocumentRole::ReplayReport => "Replay Report",
            DocumentRole::AcceptanceReport => "Acceptance Report",
            DocumentRole::HarnessReport => "Harness Report",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            DocumentRole::Intent => "intent.json",
            DocumentRole::Reasoning => "coga.json",
            DocumentRole::Build => "ca.json",
            DocumentRole::Verdicts => "verdicts.json",
            DocumentRole::Receipt => "receipt.json",
            DocumentRole::SystemReceipt => "execution_receipt.json",
            DocumentRole::ReplayReport => "replay_report.json",
            DocumentRole::AcceptanceReport => "accept_report.json",
            DocumentRole::HarnessReport => "report.json",
        }
    }

    /// Pack whose reference annotates this role's title, if any.
    pub fn pack_kind(&self) -> Option<PackKind> {
        match self {
            DocumentRole::Reasoning => Some(PackKind::Reasoning),
            DocumentRole::Build => Some(PackKind::Policy),
            _ => None,
        }
    }

    pub fn from_filename(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.filename() == name)
    }
}
