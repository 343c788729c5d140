//! Integration tests for texture loading.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use glam::{Vec2, Vec4};
use lightlab_resources::{Filter, Texture, TextureImage, TextureLoader};

fn wait_until_settled(texture: &Texture) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !texture.is_settled() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn write_test_png(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lightlab-{}-{}.png", name, std::process::id()));
    let image = image::RgbaImage::from_fn(4, 2, |x, _| {
        if x < 2 {
            image::Rgba([255, 0, 0, 255])
        } else {
            image::Rgba([0, 0, 255, 255])
        }
    });
    image.save(&path).expect("Failed to write test image");
    path
}

#[test]
fn test_load_png_texture() {
    let path = write_test_png("load");

    let texture = TextureLoader::new()
        .load(&path)
        .with_mag_filter(Filter::Nearest);
    wait_until_settled(&texture);

    assert!(texture.is_ready(), "Texture should have an image after loading");
    let image = texture.image().expect("image attached");
    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 2);

    let left = texture.sample(Vec2::new(0.1, 0.5)).unwrap();
    let right = texture.sample(Vec2::new(0.9, 0.5)).unwrap();
    assert_eq!(left, Vec4::new(1.0, 0.0, 0.0, 1.0));
    assert_eq!(right, Vec4::new(0.0, 0.0, 1.0, 1.0));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_blocking_open_reports_missing_file() {
    let err = TextureImage::open(std::path::Path::new("/no/such/file.png")).unwrap_err();
    assert!(err.to_string().contains("File not found"));
}

#[test]
fn test_clones_share_the_loaded_image() {
    let path = write_test_png("shared");

    let texture = TextureLoader::new().load(&path);
    let tiled = texture.clone().with_repeat(Vec2::splat(20.0));
    wait_until_settled(&texture);

    assert!(tiled.is_ready());
    assert_eq!(tiled.repeat, Vec2::splat(20.0));
    assert_eq!(texture.repeat, Vec2::ONE);

    let _ = std::fs::remove_file(path);
}
