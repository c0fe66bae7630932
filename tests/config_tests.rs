// Config file loading tests.

use std::fs;
use vision_live::Config;

#[test]
fn test_load_config_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vision-live.toml");

    fs::write(
        &path,
        r#"
[backend]
url = "wss://example.invalid/live"
model = "realtime-preview"

[capture]
audio = true
video = false
"#,
    )
    .unwrap();

    let name = dir.path().join("vision-live");
    let cfg = Config::load(name.to_str().unwrap()).unwrap();

    assert_eq!(cfg.backend.url, "wss://example.invalid/live");
    assert_eq!(cfg.backend.model, "realtime-preview");
    assert!(cfg.capture.audio);
    assert!(!cfg.capture.video);
}

#[test]
fn test_missing_config_file_is_an_error() {
    assert!(Config::load("/nonexistent/vision-live").is_err());
}
