use std::fs;

use assert_cmd::Command;
use folioverse_engine::{BackgroundPreferences, BackgroundStyle, ThemeMode};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn folioverse() -> Command {
    Command::new(env!("CARGO_BIN_EXE_folioverse"))
}

#[test]
fn lists_presets_as_text() {
    let output = folioverse().arg("presets").output().expect("Failed to execute folioverse");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("tech"));
    assert!(lines[0].contains("Tech Grid"));
    assert!(lines[5].contains("Circuit Board"));
    assert!(lines[5].ends_with("20 particles"));
}

#[test]
fn lists_presets_as_json() {
    let output = folioverse()
        .args(["presets", "--json"])
        .output()
        .expect("Failed to execute folioverse");
    assert!(output.status.success());

    let presets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = presets
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["tech", "business", "creative", "minimal", "geometric", "circuit"]);
    assert_eq!(presets[3]["name"], "Minimal Dots");
}

#[test]
fn renders_svg_snapshot() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("shots/minimal.svg");

    folioverse()
        .args(["render", "--style", "minimal", "--dark", "--frames", "10", "--width", "320", "--height", "200"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="320" height="200""#));
    assert_eq!(svg.matches("<circle").count(), 30);
    assert!(svg.contains(r#"<g opacity="0.5">"#));
}

#[test]
fn render_is_deterministic_for_a_seed() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.svg");
    let b = dir.path().join("b.svg");
    for out in [&a, &b] {
        folioverse()
            .args(["render", "--style", "geometric", "--seed", "9", "--frames", "3"])
            .arg("-o")
            .arg(out)
            .assert()
            .success();
    }
    assert_eq!(fs::read_to_string(a).unwrap(), fs::read_to_string(b).unwrap());
}

#[test]
fn rejects_unknown_style() {
    let dir = tempdir().unwrap();
    folioverse()
        .args(["render", "--style", "neon"])
        .arg("-o")
        .arg(dir.path().join("x.svg"))
        .assert()
        .failure();
}

#[test]
fn rejects_infinite_width() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("x.svg");
    folioverse()
        .args(["render", "--width", "inf"])
        .arg("-o")
        .arg(&out)
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn prefs_edits_follow_settings_rules() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("prefs.yaml");

    folioverse().arg("prefs").arg(&file).args(["preset", "circuit"]).assert().success();
    folioverse().arg("prefs").arg(&file).args(["theme", "light"]).assert().success();
    let prefs: BackgroundPreferences = serde_yaml::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(prefs.style, BackgroundStyle::Circuit);
    assert_eq!(prefs.theme, ThemeMode::Light);

    folioverse()
        .arg("prefs")
        .arg(&file)
        .args(["image", "/uploads/me.jpg"])
        .assert()
        .success();
    let prefs: BackgroundPreferences = serde_yaml::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(prefs.style, BackgroundStyle::Tech);
    assert_eq!(prefs.custom_background.as_deref(), Some("/uploads/me.jpg"));

    folioverse().arg("prefs").arg(&file).arg("clear-image").assert().success();
    let prefs: BackgroundPreferences = serde_yaml::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(prefs.custom_background, None);
    assert_eq!(prefs.theme, ThemeMode::Light);
}

#[test]
fn prefs_show_prints_resolved_config() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("prefs.json");
    fs::write(&file, r#"{"style":"business","theme":"dark"}"#).unwrap();

    let output = folioverse()
        .arg("prefs")
        .arg(&file)
        .arg("show")
        .output()
        .expect("Failed to execute folioverse");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""style": "business""#));
    assert!(stdout.contains(r#""darkMode": true"#));
}

#[test]
fn prefs_rejects_unsupported_extension() {
    let dir = tempdir().unwrap();
    folioverse()
        .arg("prefs")
        .arg(dir.path().join("prefs.toml"))
        .arg("show")
        .assert()
        .failure();
}

#[test]
fn writes_gallery() {
    let dir = tempdir().unwrap();
    let prefs = dir.path().join("prefs.json");
    fs::write(&prefs, r#"{"style":"creative","theme":"system"}"#).unwrap();
    let out = dir.path().join("gallery");

    folioverse()
        .arg("gallery")
        .arg("--prefs")
        .arg(&prefs)
        .arg("--output")
        .arg(&out)
        .args(["--frames", "2"])
        .assert()
        .success();

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("Creative Shapes"));
    assert!(html.contains("Theme: system"));
    assert!(html.contains(r#"class="card selected" id="creative""#));
    for id in ["tech", "business", "creative", "minimal", "geometric", "circuit"] {
        assert!(out.join(format!("{id}-dark.svg")).exists());
        assert!(out.join(format!("{id}-light.svg")).exists());
    }
}
