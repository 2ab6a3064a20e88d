//! Layering guardrails for the workspace crates.
//!
//! - `reqlgen_core` holds plain lexical tables and must stay dependency-free.
//! - `reqlgen_syntax` only knows the host grammar: it may depend on `reqlgen_core`, never on the emitter crate or
//!   on serialization.

/// Names listed in a manifest's `[dependencies]` table.
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
    let manifest = include_str!("../crates/reqlgen_core/Cargo.toml");
    assert!(dependencies(manifest).is_empty(), "reqlgen_core must not depend on anything");
}

#[test]
fn syntax_does_not_depend_on_the_emitter() {
    let manifest = include_str!("../crates/reqlgen_syntax/Cargo.toml");
    let deps = dependencies(manifest);
    for forbidden in ["reqlgen", "serde", "serde_json"] {
        assert!(
            !deps.iter().any(|d| d == forbidden),
            "`{forbidden}` must not appear in reqlgen_syntax [dependencies]"
        );
    }
    assert!(deps.iter().any(|d| d == "reqlgen_core"));
}
