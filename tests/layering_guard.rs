//! Layering guardrails for the workspace crates.
//!
//! - `cand_core` is the vocabulary layer and must stay dependency-free.
//! - `cand_syntax` may depend on `cand_core` but never on the CLI crate (`cand`) or on CLI-only crates.
//!
//! These tests scan the crate manifests' `[dependencies]` tables.

/// Dependency names declared in the `[dependencies]` table of a manifest.
fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn core_has_no_dependencies() {
    let manifest = include_str!("../crates/cand_core/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.is_empty(), "`cand_core` must stay dependency-free, found: {deps:?}");
}

#[test]
fn syntax_does_not_depend_on_cli_layer() {
    let manifest = include_str!("../crates/cand_syntax/Cargo.toml");
    let deps = dependency_names(manifest);
    assert!(deps.iter().any(|d| d == "cand_core"), "`cand_syntax` should use the `cand_core` registries");
    for forbidden in ["cand", "clap", "tracing-subscriber"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in cand_syntax [dependencies]"
        );
    }
}

#[test]
fn dependency_scanner_reads_only_the_dependencies_table() {
    let manifest = "[package]\nname = \"x\"\n\n[dependencies]\na = \"1\" # note\nb = { path = \"../b\" }\n\n[dev-dependencies]\nc = \"1\"\n";
    assert_eq!(dependency_names(manifest), vec!["a".to_string(), "b".to_string()]);
}
