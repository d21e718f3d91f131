mod helper;

use std::fs;

use tempfile::TempDir;

use harmony::HarmonyError;
use harmony::tool::{ToolRegistry, save_descriptor};
use harmony::update::UpdateEngine;
use harmony::version::SemanticVersion;

use helper::workspace::ToolWorkspace;

#[test]
fn saved_descriptor_drives_an_update() {
    let workspace = ToolWorkspace::new()
        .with_installed("tool_v1.0.0.exe")
        .with_source("tool_v1.1.0.exe");
    let config_dir = workspace.root().join("config");
    save_descriptor(&config_dir, &workspace.descriptor("binary")).unwrap();

    let registry = ToolRegistry::load_dir(&config_dir).unwrap();
    let tool = registry.get("tool").unwrap();
    let outcome = UpdateEngine::new().apply_update(tool).unwrap();

    assert!(outcome.is_success());
    assert_eq!(workspace.installed(), vec!["tool_v1.1.0.exe"]);
    assert_eq!(workspace.archived(), vec!["tool_v1.0.0.exe"]);
}

#[test]
fn legacy_descriptor_is_loaded() {
    let workspace = ToolWorkspace::new().with_installed("tool_v3.2.1.exe");
    let config_dir = TempDir::new().unwrap();
    let yaml = format!(
        r#"
id: legacy
name: Legacy tool
description: written by an older release
current_version: v3.2.1
location: {}
archive_location: {}
update_location: {}
name_format: "tool_v{{major}}.{{minor}}.{{patch}}"
type: binary
update_frequency: weekly
last_updated: "2023-06-01 08:00"
"#,
        workspace.install.display(),
        workspace.archive.display(),
        workspace.source.display(),
    );
    fs::write(config_dir.path().join("legacy.yml"), yaml).unwrap();

    let registry = ToolRegistry::load_dir(config_dir.path()).unwrap();
    let tool = registry.get("legacy").unwrap();

    assert_eq!(tool.current_version_hint, SemanticVersion::new(3, 2, 1));
    let current = UpdateEngine::new().locate_current(tool).unwrap();
    assert_eq!(current.filename, "tool_v3.2.1.exe");
    assert_eq!(current.version, SemanticVersion::new(3, 2, 1));
}

#[test]
fn duplicate_ids_across_files_fail_the_load() {
    let workspace = ToolWorkspace::new();
    let config_dir = TempDir::new().unwrap();
    save_descriptor(config_dir.path(), &workspace.descriptor("binary")).unwrap();
    fs::copy(
        config_dir.path().join("tool.yaml"),
        config_dir.path().join("tool-copy.yml"),
    )
    .unwrap();

    assert!(matches!(
        ToolRegistry::load_dir(config_dir.path()),
        Err(HarmonyError::Config(_))
    ));
}

#[test]
fn template_without_placeholders_fails_the_load() {
    let workspace = ToolWorkspace::new();
    let config_dir = TempDir::new().unwrap();
    let mut descriptor = workspace.descriptor("binary");
    descriptor.name_template = "tool_latest.exe".to_string();
    let yaml = serde_yaml::to_string(&descriptor).unwrap();
    fs::write(config_dir.path().join("tool.yaml"), yaml).unwrap();

    assert!(matches!(
        ToolRegistry::load_dir(config_dir.path()),
        Err(HarmonyError::Config(_))
    ));
}
