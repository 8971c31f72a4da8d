//! Layering guardrails for the workspace crates.
//!
//! `describe_core` is the shared vocabulary and must stay dependency-free so every other crate (and any external
//! emitter) can use it without pulling in the engine. `describe_syntax` may depend on `describe_core` and logging
//! only; it must never reach back into the runner crate.

/// Dependency names listed in the `[dependencies]` table of a manifest.
fn dependencies(manifest: &str) -> Vec<String> {
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
    let deps = dependencies(include_str!("../crates/describe_core/Cargo.toml"));
    assert!(deps.is_empty(), "describe_core must stay dependency-free, found: {deps:?}");
}

#[test]
fn syntax_depends_only_on_core_and_logging() {
    let deps = dependencies(include_str!("../crates/describe_syntax/Cargo.toml"));
    for dep in &deps {
        assert!(
            dep == "describe_core" || dep == "tracing",
            "describe_syntax must not depend on `{dep}`"
        );
    }
}

#[test]
fn engine_uses_both_workspace_crates() {
    let deps = dependencies(include_str!("../Cargo.toml"));
    assert!(deps.iter().any(|d| d == "describe_core"));
    assert!(deps.iter().any(|d| d == "describe_syntax"));
}
