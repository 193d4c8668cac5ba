//! End-to-end tests over the checked-in fixture project
//!
//! The fixture's `contributions.json` is exactly what extraction produces
//! from its `package.json`, and generating from it reproduces every
//! contribution of the manifest.

use std::fs;
use std::path::{Path, PathBuf};

use contrib_core::{Compiler, SyncConfig, SyncEngine, SyncOptions};
use contrib_meta::{ContributionSchema, Contributes};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects/gitlens-lite")
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Copies the fixture project into a scratch directory.
fn scratch_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["package.json", "contributions.json"] {
        fs::copy(fixture_dir().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

#[test]
fn test_extract_matches_checked_in_schema() {
    let manifest = read_json(&fixture_dir().join("package.json"));
    let contributes = Contributes::from_manifest(&manifest).unwrap();

    let schema = Compiler::default().extract(&contributes).unwrap();

    let expected = read_json(&fixture_dir().join("contributions.json"));
    assert_eq!(serde_json::to_value(&schema).unwrap(), expected);
}

#[test]
fn test_generate_reproduces_manifest() {
    let manifest = read_json(&fixture_dir().join("package.json"));
    let schema: ContributionSchema =
        serde_json::from_value(read_json(&fixture_dir().join("contributions.json"))).unwrap();

    let mut compiler = Compiler::default().with_category(Some("GitLens Lite".to_string()));
    let generated = compiler.generate(&schema).unwrap();
    let existing = Contributes::from_manifest(&manifest).unwrap();

    let report = compiler.check(&existing, &generated).unwrap();
    assert!(report.is_clean(), "unexpected drift:\n{report}");
}

#[test]
fn test_engine_generate_then_extract_is_stable() {
    let dir = scratch_project();
    let engine = SyncEngine::new(SyncConfig::discover(dir.path()).unwrap());

    engine.generate(&SyncOptions { validate: true }).unwrap();
    let generated = fs::read_to_string(dir.path().join("package.json")).unwrap();

    // Foreign fields survive, in their original position
    let manifest: Value = serde_json::from_str(&generated).unwrap();
    let top: Vec<_> = manifest.as_object().unwrap().keys().cloned().collect();
    assert_eq!(top, vec!["name", "displayName", "version", "engines", "contributes"]);
    assert_eq!(manifest["contributes"]["configuration"]["title"], "GitLens Lite");

    let again = engine.generate(&SyncOptions { validate: true }).unwrap();
    assert!(!again.written);

    engine.extract().unwrap();
    assert_eq!(
        read_json(&dir.path().join("contributions.json")),
        read_json(&fixture_dir().join("contributions.json"))
    );
}

#[test]
fn test_generated_menus_are_sorted() {
    let dir = scratch_project();
    let engine = SyncEngine::new(SyncConfig::new(dir.path()));
    engine.generate(&SyncOptions::default()).unwrap();

    let manifest = read_json(&dir.path().join("package.json"));
    let view_title: Vec<_> = manifest["contributes"]["menus"]["view/title"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["command"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(view_title, vec!["gitlens.showGraph", "gitlens.refresh"]);

    let locations: Vec<_> = manifest["contributes"]["menus"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(
        locations,
        vec!["commandPalette", "gitlens/commit/copy", "view/item/context", "view/title"]
    );
}
