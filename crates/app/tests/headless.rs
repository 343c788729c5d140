//! Headless rendering to PNG.

use std::path::PathBuf;

use lightlab_app::headless;
use lightlab_core::AppConfig;

fn output_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("lightlab-app-tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn test_headless_writes_png_of_window_size() {
    let mut config = AppConfig::default();
    config.scene.texture = None;
    config.window.width = 64;
    config.window.height = 40;
    let output = output_path("frame.png");

    let stats = headless::run(config, 3, &output).unwrap();
    assert_eq!(stats.meshes, 3);

    let image = image::open(&output).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (64, 40));
}

#[test]
fn test_headless_rejects_zero_frames() {
    let mut config = AppConfig::default();
    config.scene.texture = None;
    assert!(headless::run(config, 0, &output_path("never.png")).is_err());
}

#[test]
fn test_missing_texture_still_renders() {
    let mut config = AppConfig::default();
    config.scene.texture = Some(PathBuf::from("no/such/texture.png"));
    config.window.width = 16;
    config.window.height = 16;
    let stats = headless::run(config, 1, &output_path("untextured.png")).unwrap();
    assert!(stats.fragments > 0);
}
