//! Integration tests for the jumpkeysd runtime

use jump_types::JumpHost;
use jumpkeysd::{load_config, HostRuntime, HostRuntimeConfig, HostRuntimeError};
use pretty_assertions::assert_eq;
use services_jump_commands::SETTINGS_ID;
use services_jump_gesture::HoldModifier;
use std::io::Write;

fn run(script: &str) -> HostRuntime {
    run_with(HostRuntimeConfig {
        script: Some(script.to_string()),
        ..HostRuntimeConfig::default()
    })
}

fn run_with(config: HostRuntimeConfig) -> HostRuntime {
    let mut runtime = HostRuntime::new(config).unwrap();
    runtime.run();
    runtime
}

fn host_lines(runtime: &HostRuntime) -> Vec<&str> {
    runtime
        .output()
        .iter()
        .filter_map(|line| line.strip_prefix("host: "))
        .collect()
}

fn recency(runtime: &HostRuntime) -> Vec<&str> {
    runtime.keys().recency().iter().map(|id| id.as_str()).collect()
}

#[test]
fn test_display_cycle_release_scenario() {
    let runtime = run(r#"
        # opening displays each document, then B is displayed again
        open A
        open B
        open C
        display B
        press Ctrl
        tap J
        tap ArrowDown
        release Ctrl
    "#);

    // overlay order was B, C, A with C preselected; ArrowDown moved to A
    let activations: Vec<&str> = host_lines(&runtime)
        .into_iter()
        .filter(|line| line.starts_with("activate"))
        .collect();
    assert_eq!(activations, vec!["activate A (scroll into view)"]);
    assert_eq!(recency(&runtime), vec!["A", "B", "C"]);
    assert!(!runtime.keys().overlay().is_open());
    assert_eq!(runtime.host().active().map(|id| id.as_str()), Some("A"));
}

#[test]
fn test_focus_touches_recency() {
    let runtime = run("open A\nopen B\nopen C\nfocus A\npress Ctrl\ntap J\nrelease Ctrl");

    let activations: Vec<&str> = host_lines(&runtime)
        .into_iter()
        .filter(|line| line.starts_with("activate"))
        .collect();
    assert_eq!(activations, vec!["activate C (scroll into view)"]);
    assert_eq!(recency(&runtime), vec!["C", "A", "B"]);
}

#[test]
fn test_frames_printed_on_change() {
    let runtime = run("open A\nopen B editing\npress Ctrl\ntap J\ntap J\nrelease Ctrl");

    let frames: Vec<&String> = runtime
        .output()
        .iter()
        .filter(|line| line.starts_with("[jump]"))
        .collect();

    assert_eq!(frames.len(), 3);
    assert!(frames[0].contains(">  1  A"));
    assert!(frames[0].contains("   0  B  editable"));
    assert!(frames[1].contains(">  0  B  editable"));
    assert_eq!(frames[2].as_str(), "[jump] closed");
    assert!(runtime.output().iter().all(|line| !line.contains('\x1b')));
}

#[test]
fn test_close_command_during_gesture() {
    let runtime = run(r#"
        open A
        open B
        open C
        press Ctrl
        tap J
        tap X
        tap X
        tap X
        release Ctrl
    "#);

    assert_eq!(
        host_lines(&runtime)
            .into_iter()
            .filter(|line| line.starts_with("command"))
            .collect::<Vec<_>>(),
        vec![
            "command close B (animations off)",
            "command close A (animations off)",
            "command close C (animations off)",
        ]
    );
    assert!(runtime.host().documents().is_empty());
    assert!(runtime.keys().recency().is_empty());
    assert!(!runtime.keys().overlay().is_open());
    assert!(runtime.host().animations_enabled());
}

#[test]
fn test_blur_never_commits() {
    let runtime = run("open A\nopen B\npress Ctrl\ntap J\nblur\ntap J");

    assert!(!runtime.keys().gesture().is_modifier_held());
    assert!(runtime.keys().overlay().is_open());
    assert!(host_lines(&runtime)
        .iter()
        .all(|line| !line.starts_with("activate")));
}

#[test]
fn test_outside_click_and_row_click() {
    let runtime = run(r#"
        open A
        open B
        open C
        jump
        click 0 0
        jump
        click 512 384
    "#);

    // 3 rows of 28 with gaps of 8: list spans 100px, centered at 768 / 2;
    // y = 384 is 50px into the list, inside row 1 (36..64)
    let activations: Vec<&str> = host_lines(&runtime)
        .into_iter()
        .filter(|line| line.starts_with("activate"))
        .collect();
    assert_eq!(activations, vec!["activate B (scroll into view)"]);
    assert!(!runtime.keys().overlay().is_open());
}

#[test]
fn test_theme_change_rerenders() {
    let runtime = run("open A\nopen B\njump\ntheme\ntheme");

    let frames = runtime
        .output()
        .iter()
        .filter(|line| line.starts_with("[jump] r"))
        .count();
    assert_eq!(frames, 3);
}

#[test]
fn test_theme_change_while_closed_prints_nothing() {
    let runtime = run("open A\ntheme");
    assert!(runtime.output().iter().all(|line| !line.starts_with("[jump]")));
}

#[test]
fn test_stored_legacy_bindings_migrate() {
    let runtime = run_with(HostRuntimeConfig {
        script: Some("open A\nopen B\npress Ctrl\ntap J\ntap Q\nrelease Ctrl".to_string()),
        bindings: Some(r#"{ "q": "close" }"#.to_string()),
        ..HostRuntimeConfig::default()
    });

    assert_eq!(runtime.host().documents().len(), 1);
    assert_eq!(runtime.host().documents()[0].id.as_str(), "B");
    assert_eq!(host_lines(&runtime)[0], "publish JumpKeysSettings");
    assert_eq!(
        runtime.host().stored_settings(SETTINGS_ID),
        Some("{\n  \"close\": \"KeyQ\"\n}")
    );
}

#[test]
fn test_malformed_bindings_keep_defaults() {
    let runtime = run_with(HostRuntimeConfig {
        script: Some("open A\nopen B\npress Ctrl\ntap J\ntap X\nrelease Ctrl".to_string()),
        bindings: Some("{ not json".to_string()),
        ..HostRuntimeConfig::default()
    });

    assert_eq!(runtime.host().documents().len(), 1);
    assert!(!host_lines(&runtime).contains(&"publish JumpKeysSettings"));
    assert_eq!(runtime.host().stored_settings(SETTINGS_ID), Some("{ not json"));
}

#[test]
fn test_config_file_changes_gesture_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "gesture": {{ "hold": "alt", "trigger": "Backquote" }}, "override_jump_command": false }}"#
    )
    .unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.gesture.hold, HoldModifier::Alt);
    assert!(!config.override_jump_command);

    let runtime = run_with(HostRuntimeConfig {
        script: Some("open A\nopen B\npress Alt\ntap Backquote\nrelease Alt\njump".to_string()),
        jump_keys: config,
        ..HostRuntimeConfig::default()
    });

    let lines = host_lines(&runtime);
    assert!(lines.contains(&"activate A (scroll into view)"));
    assert!(!lines.contains(&"claim jump"));
    assert!(!runtime.keys().overlay().is_open());
}

#[test]
fn test_config_file_errors() {
    let missing = load_config(std::path::Path::new("/nonexistent/jumpkeys.json"));
    assert!(matches!(missing, Err(HostRuntimeError::Io { .. })));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"gesture\": {{ \"trigger\": \"NotAKey\" }} }}").unwrap();
    assert!(matches!(
        load_config(file.path()),
        Err(HostRuntimeError::ConfigError(_))
    ));
}

#[test]
fn test_script_exhaustion() {
    let runtime = run("open A\nblur");
    assert_eq!(runtime.step_count(), 2);
}
