//! End-to-end rendering of run directories through the library API

use serde_json::json;

use super::common::run_dir::RunDir;
use blux::{render_directory, PanelBody, RenderOptions, ViewError};

const KNOWN_DOCUMENTS: [(&str, &str); 9] = [
    ("Intent", "intent.json"),
    ("Reasoning (CogA)", "coga.json"),
    ("Build (cA)", "ca.json"),
    ("Verdicts", "verdicts.json"),
    ("Execution Receipt", "receipt.json"),
    ("Execution Receipt (System)", "execution_receipt.json"),
    ("Replay Report", "replay_report.json"),
    ("Acceptance Report", "accept_report.json"),
    ("Harness Report", "report.json"),
];

fn render(run: &RunDir) -> String {
    render_directory(run.path(), &RenderOptions::default())
        .expect("render should succeed")
        .render()
}

#[test]
fn empty_directory_renders_every_known_document_as_missing() {
    let run = RunDir::new();
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    assert_eq!(report.panels.len(), KNOWN_DOCUMENTS.len());
    for ((title, file), panel) in KNOWN_DOCUMENTS.iter().zip(&report.panels) {
        assert_eq!(panel.title, *title);
        assert_eq!(panel.body, PanelBody::Missing(run.path().join(file)));
    }
}

#[test]
fn intent_only_directory_renders_one_populated_panel() {
    let run = RunDir::new().with_json("intent.json", json!({"goal": "x"}));
    let output = render(&run);

    let mut expected = String::from("\n== Intent ==\n{\n  \"goal\": \"x\"\n}\n");
    for (title, file) in &KNOWN_DOCUMENTS[1..] {
        expected.push_str(&format!(
            "\n== {title} ==\n(missing) {}\n",
            run.path().join(file).display()
        ));
    }
    assert_eq!(output, expected);
}

#[test]
fn duplicate_build_files_are_listed_once() {
    let run = RunDir::new().with_json(
        "ca.json",
        json!({
            "files": [{"path": "a.py", "content": "x"}],
            "artifacts": {"files": [{"path": "a.py", "content": "x"}]}
        }),
    );
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    let list = report
        .panel("Multi-file Artifacts (File List)")
        .expect("file list panel");
    assert_eq!(list.body, PanelBody::List(vec!["a.py".to_string()]));
    let content_panels = report
        .titles()
        .into_iter()
        .filter(|title| title.starts_with("Multi-file Artifact: "))
        .count();
    assert_eq!(content_panels, 1);
    assert!(report.render().contains("\n== Multi-file Artifact: a.py ==\nx\n"));
}

#[test]
fn receipt_fixtures_are_linked_to_replay_results() {
    let run = RunDir::new()
        .with_json("receipt.json", json!({"fixtures": [{"id": "f1"}]}))
        .with_json(
            "replay_report.json",
            json!({"results": [{"id": "f1", "verified": true}]}),
        );
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    let linkage = report.panel("Dataset Linkage").expect("linkage panel");
    assert_eq!(linkage.body, PanelBody::List(vec!["[verified] id=f1".to_string()]));
}

#[test]
fn dataset_linkage_needs_a_replay_report() {
    let run = RunDir::new().with_json("receipt.json", json!({"fixtures": [{"id": "f1"}]}));
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();
    assert!(report.panel("Dataset Linkage").is_none());
}

#[test]
fn complete_run_renders_panels_in_role_order() {
    let run = RunDir::complete();
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    assert_eq!(
        report.titles(),
        vec![
            "Intent",
            "Reasoning (CogA) [pack: deep@2]",
            "CogA Options",
            "Build (cA) [pack: strict]",
            "Multi-file Artifacts (File List)",
            "Multi-file Artifact: hello.py",
            "Patch Bundle 1 (Unified Diff)",
            "Verdicts",
            "Execution Receipt",
            "Run Steps",
            "Dataset Linkage",
            "Execution Receipt (System)",
            "Receipt Hashes",
            "Replay Report",
            "Replay Fixtures",
            "Acceptance Report",
            "Acceptance Verdicts",
            "Harness Report",
            "Harness Report Summary",
            "Harness Fixtures",
        ]
    );
    assert!(report.panels.iter().all(|panel| !panel.is_missing()));

    let options = report.panel("CogA Options").unwrap();
    assert_eq!(
        options.body,
        PanelBody::List(vec!["1. minimal".to_string(), "2. full".to_string()])
    );
    let summary = report.panel("Harness Report Summary").unwrap();
    assert_eq!(
        summary.body,
        PanelBody::Json(json!({"passed": 1, "failed": 0, "skipped": 0, "total": 1}))
    );
}

#[test]
fn rendering_is_deterministic() {
    let run = RunDir::complete().with_json("zeta.json", json!({"b": 1, "a": 2}));
    assert_eq!(render(&run), render(&run));
}

#[test]
fn unknown_json_files_get_sorted_raw_panels() {
    let run = RunDir::new()
        .with_json("zeta.json", json!({"z": true}))
        .with_json("alpha.json", json!({"a": true}))
        .with_raw("notes.txt", "not json");
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    let raw: Vec<&str> = report
        .titles()
        .into_iter()
        .filter(|title| title.starts_with("Raw JSON: "))
        .collect();
    assert_eq!(raw, vec!["Raw JSON: alpha.json", "Raw JSON: zeta.json"]);

    let without_raw = RenderOptions {
        raw_json: false,
        ..RenderOptions::default()
    };
    let report = render_directory(run.path(), &without_raw).unwrap();
    assert_eq!(report.panels.len(), KNOWN_DOCUMENTS.len());
}

#[test]
fn json_panels_sort_keys_and_honor_indent() {
    let run = RunDir::new().with_raw("intent.json", r#"{"b": 1, "a": [true]}"#);
    let options = RenderOptions {
        indent: 4,
        ..RenderOptions::default()
    };
    let output = render_directory(run.path(), &options).unwrap().render();
    assert!(output.starts_with(
        "\n== Intent ==\n{\n    \"a\": [\n        true\n    ],\n    \"b\": 1\n}\n"
    ));
}

#[test]
fn malformed_document_is_shown_as_unreadable() {
    let run = RunDir::new().with_raw("verdicts.json", "{not json");
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    let panel = report.panel("Verdicts").expect("verdicts panel");
    match &panel.body {
        PanelBody::Unreadable { path, .. } => assert_eq!(path, &run.path().join("verdicts.json")),
        other => panic!("expected unreadable panel, got {other:?}"),
    }
    assert!(report
        .render()
        .contains(&format!("(unreadable) {}: ", run.path().join("verdicts.json").display())));
}

#[test]
fn strict_mode_fails_on_malformed_document() {
    let run = RunDir::new().with_raw("verdicts.json", "{not json");
    let strict = RenderOptions {
        strict: true,
        ..RenderOptions::default()
    };
    let err = render_directory(run.path(), &strict).unwrap_err();
    assert!(matches!(err, ViewError::Parse { .. }));
}

#[test]
fn missing_directory_is_an_error() {
    let run = RunDir::new();
    let missing = run.path().join("nope");
    let err = render_directory(&missing, &RenderOptions::default()).unwrap_err();
    assert!(matches!(err, ViewError::MissingDirectory(_)));
    assert_eq!(
        err.to_string(),
        format!("Input directory does not exist: {}", missing.display())
    );
}

#[test]
fn pack_titles_follow_render_options() {
    let run = RunDir::new().with_json("coga.json", json!({"reasoning_pack_id": "deep"}));
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();
    assert_eq!(report.titles()[1], "Reasoning (CogA) [pack: deep]");

    let plain = RenderOptions {
        pack_titles: false,
        ..RenderOptions::default()
    };
    let report = render_directory(run.path(), &plain).unwrap();
    assert_eq!(report.titles()[1], "Reasoning (CogA)");
}

#[test]
fn run_steps_follow_file_order() {
    let run = RunDir::new().with_raw(
        "receipt.json",
        r#"{"timeline": [{"id": "first"}], "steps": [{"id": "second"}], "nodes": [{"status": "ok"}]}"#,
    );
    let report = render_directory(run.path(), &RenderOptions::default()).unwrap();

    let steps = report.panel("Run Steps").expect("run steps panel");
    assert_eq!(
        steps.body,
        PanelBody::List(vec![
            "first: unknown".to_string(),
            "second: unknown".to_string(),
            "step-3: ok".to_string(),
        ])
    );
    assert!(report
        .render()
        .contains("{\n  \"nodes\": [\n    {\n      \"status\": \"ok\"\n    }\n  ],\n  \"steps\""));
}
