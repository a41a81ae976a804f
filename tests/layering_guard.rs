//! Layering guardrails for the workspace.
//!
//! `sable_core` is the vocabulary crate and must stay dependency-free. `sable_syntax` is the pure front end and
//! must not pull in the CLI stack (`clap`, `serde_json`) or the facade crate. These tests scan the manifests'
//! `[dependencies]` tables.

/// Crate names listed in the `[dependencies]` table of a manifest.
fn main_dependencies(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let deps = main_dependencies(include_str!("../crates/sable_core/Cargo.toml"));
    assert!(deps.is_empty(), "`sable_core` must stay dependency-free, found {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_cli_stack() {
    let deps = main_dependencies(include_str!("../crates/sable_syntax/Cargo.toml"));
    assert!(deps.iter().any(|d| d == "sable_core"), "{deps:?}");
    for forbidden in ["clap", "serde_json", "sable", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in sable_syntax [dependencies]"
        );
    }
}
