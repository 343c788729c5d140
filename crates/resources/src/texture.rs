//! Textures and asynchronous image loading.
//!
//! A [`Texture`] is a set of sampling parameters plus a shared image slot.
//! [`TextureLoader::load`] hands back a texture immediately and decodes the
//! file on a worker thread; until the slot is filled, sampling returns
//! `None` and callers fall back to the material color.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use glam::{Vec2, Vec4};
use tracing::{debug, warn};

use crate::{ResourceError, ResourceResult};

/// Texture coordinate wrapping mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Wrapping {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl Wrapping {
    fn apply(self, t: f32) -> f32 {
        match self {
            Wrapping::ClampToEdge => t.clamp(0.0, 1.0),
            Wrapping::Repeat => t - t.floor(),
            Wrapping::MirroredRepeat => {
                let period = t.rem_euclid(2.0);
                if period > 1.0 { 2.0 - period } else { period }
            }
        }
    }
}

/// Magnification filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
}

/// How texel values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorSpace {
    /// Texels are display-referred and used as-is
    #[default]
    Srgb,
    /// Texels are linear data and get encoded before display
    Linear,
}

/// Decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl TextureImage {
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> ResourceResult<Self> {
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(ResourceError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an image file.
    pub fn open(path: &Path) -> ResourceResult<Self> {
        if !path.exists() {
            return Err(ResourceError::FileNotFound(path.to_path_buf()));
        }
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba.pixels().map(|p| p.0).collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates, clamped to the image.
    pub fn texel(&self, x: i64, y: i64) -> [u8; 4] {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}

/// Where a texture's image comes from and whether it has arrived.
#[derive(Debug, Default)]
struct ImageSlot {
    path: Option<PathBuf>,
    /// `Some(None)` means loading finished and failed
    image: OnceLock<Option<TextureImage>>,
}

/// Sampling parameters over a shared image.
#[derive(Debug, Clone)]
pub struct Texture {
    pub wrap_s: Wrapping,
    pub wrap_t: Wrapping,
    pub mag_filter: Filter,
    pub color_space: ColorSpace,
    /// UV scale; `(n, n)` tiles the image n times across the surface
    pub repeat: Vec2,
    pub offset: Vec2,
    slot: Arc<ImageSlot>,
}

impl Texture {
    fn with_slot(slot: Arc<ImageSlot>) -> Self {
        Self {
            wrap_s: Wrapping::default(),
            wrap_t: Wrapping::default(),
            mag_filter: Filter::default(),
            color_space: ColorSpace::default(),
            repeat: Vec2::ONE,
            offset: Vec2::ZERO,
            slot,
        }
    }

    /// A texture whose image is already available.
    pub fn from_image(image: TextureImage) -> Self {
        let slot = ImageSlot::default();
        let _ = slot.image.set(Some(image));
        Self::with_slot(Arc::new(slot))
    }

    /// Set both wrap modes.
    pub fn with_wrapping(mut self, wrapping: Wrapping) -> Self {
        self.wrap_s = wrapping;
        self.wrap_t = wrapping;
        self
    }

    pub fn with_mag_filter(mut self, filter: Filter) -> Self {
        self.mag_filter = filter;
        self
    }

    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    pub fn with_repeat(mut self, repeat: Vec2) -> Self {
        self.repeat = repeat;
        self
    }

    /// The source file, for loaded textures.
    pub fn path(&self) -> Option<&Path> {
        self.slot.path.as_deref()
    }

    /// The decoded image, once it has arrived.
    pub fn image(&self) -> Option<&TextureImage> {
        self.slot.image.get().and_then(Option::as_ref)
    }

    pub fn is_ready(&self) -> bool {
        self.image().is_some()
    }

    /// Loading has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.slot.image.get().is_some()
    }

    /// Sample RGBA in `[0, 1]` at `uv`, or `None` while no image is attached.
    pub fn sample(&self, uv: Vec2) -> Option<Vec4> {
        let image = self.image()?;
        let uv = uv * self.repeat + self.offset;
        let s = self.wrap_s.apply(uv.x);
        // Row 0 of the image is the top edge, where v = 1.
        let t = 1.0 - self.wrap_t.apply(uv.y);

        let x = s * image.width() as f32;
        let y = t * image.height() as f32;

        let texel = |x: i64, y: i64| {
            let [r, g, b, a] = image.texel(
                self.wrap_index(x, image.width(), self.wrap_s),
                self.wrap_index(y, image.height(), self.wrap_t),
            );
            Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
        };

        let color = match self.mag_filter {
            Filter::Nearest => texel(x.floor() as i64, y.floor() as i64),
            Filter::Linear => {
                let fx = x - 0.5;
                let fy = y - 0.5;
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = fx - x0;
                let ty = fy - y0;
                let (x0, y0) = (x0 as i64, y0 as i64);
                let top = texel(x0, y0).lerp(texel(x0 + 1, y0), tx);
                let bottom = texel(x0, y0 + 1).lerp(texel(x0 + 1, y0 + 1), tx);
                top.lerp(bottom, ty)
            }
        };

        Some(match self.color_space {
            ColorSpace::Srgb => color,
            ColorSpace::Linear => {
                let encode = |c: f32| c.clamp(0.0, 1.0).powf(1.0 / 2.2);
                Vec4::new(encode(color.x), encode(color.y), encode(color.z), color.w)
            }
        })
    }

    fn wrap_index(&self, i: i64, size: u32, wrapping: Wrapping) -> i64 {
        let size = size as i64;
        match wrapping {
            Wrapping::Repeat => i.rem_euclid(size),
            Wrapping::ClampToEdge | Wrapping::MirroredRepeat => i.clamp(0, size - 1),
        }
    }
}

/// Loads textures from disk without blocking the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextureLoader;

impl TextureLoader {
    pub fn new() -> Self {
        Self
    }

    /// Start loading `path` and return its texture right away.
    ///
    /// Decoding happens on a worker thread. A failed load is logged and
    /// leaves the texture permanently without an image.
    pub fn load(&self, path: impl Into<PathBuf>) -> Texture {
        let path = path.into();
        let slot = Arc::new(ImageSlot {
            path: Some(path.clone()),
            image: OnceLock::new(),
        });
        let worker_slot = Arc::clone(&slot);

        let spawned = std::thread::Builder::new()
            .name("texture-loader".to_string())
            .spawn(move || {
                let result = TextureImage::open(&path);
                let image = match result {
                    Ok(image) => {
                        debug!(
                            "Texture loaded: {} ({}x{})",
                            path.display(),
                            image.width(),
                            image.height()
                        );
                        Some(image)
                    }
                    Err(e) => {
                        warn!("Failed to load texture {}: {}", path.display(), e);
                        None
                    }
                };
                let _ = worker_slot.image.set(image);
            });

        if let Err(e) = spawned {
            warn!("Could not start texture loader thread: {}", e);
            let _ = slot.image.set(None);
        }

        Texture::with_slot(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> TextureImage {
        // 2x2: black, white / white, black
        TextureImage::new(
            2,
            2,
            vec![
                [0, 0, 0, 255],
                [255, 255, 255, 255],
                [255, 255, 255, 255],
                [0, 0, 0, 255],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_image_rejects_bad_dimensions() {
        assert!(TextureImage::new(0, 2, vec![]).is_err());
        assert!(TextureImage::new(2, 2, vec![[0; 4]; 3]).is_err());
    }

    #[test]
    fn test_nearest_sampling_flips_v() {
        let texture = Texture::from_image(checker()).with_mag_filter(Filter::Nearest);
        // Top-left texel (row 0) is black and sits at v close to 1.
        let top_left = texture.sample(Vec2::new(0.25, 0.75)).unwrap();
        assert_eq!(top_left, Vec4::new(0.0, 0.0, 0.0, 1.0));
        let bottom_left = texture.sample(Vec2::new(0.25, 0.25)).unwrap();
        assert_eq!(bottom_left, Vec4::ONE);
    }

    #[test]
    fn test_repeat_tiles_image() {
        let texture = Texture::from_image(checker())
            .with_mag_filter(Filter::Nearest)
            .with_wrapping(Wrapping::Repeat)
            .with_repeat(Vec2::splat(20.0));
        // uv 0.0125 * 20 = 0.25, same texel as the untiled sample above.
        let a = texture.sample(Vec2::new(0.0125, 0.0375)).unwrap();
        let b = texture.sample(Vec2::new(0.5125, 0.5375)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrapping_modes() {
        assert!((Wrapping::Repeat.apply(1.25) - 0.25).abs() < 1e-6);
        assert!((Wrapping::Repeat.apply(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(Wrapping::ClampToEdge.apply(1.5), 1.0);
        assert!((Wrapping::MirroredRepeat.apply(1.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_settles_without_image() {
        let texture = TextureLoader::new().load("/no/such/texture.png");
        assert_eq!(texture.path(), Some(Path::new("/no/such/texture.png")));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !texture.is_settled() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(texture.is_settled());
        assert!(!texture.is_ready());
        assert!(texture.sample(Vec2::ZERO).is_none());
    }
}
