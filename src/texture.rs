use crate::error::{RenderError, Result};
use crate::math::{Color, Point3};
use crate::perlin::Perlin;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A procedural or image-backed color field, sampled by surface coordinates
/// `(u, v)` and world position `p`. Deterministic given its inputs.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A texture that ignores its inputs and always returns the same color.
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// A spatial 3-D checkerboard: parity of the floor of each scaled
/// coordinate, summed and taken mod 2. Depends on world position, not uv,
/// so it wraps seamlessly around curved surfaces.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let x = (self.inv_scale * p.x).floor() as i64;
        let y = (self.inv_scale * p.y).floor() as i64;
        let z = (self.inv_scale * p.z).floor() as i64;
        if (x + y + z) % 2 == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// An 8-bit RGB raster sampled by `(u, v)`, decoded through the `image`
/// crate at construction time (textures never touch the disk on the hot
/// render path). Returns solid cyan when no image data is present, as a
/// visible marker of a missing texture.
pub struct ImageTexture {
    width: u32,
    height: u32,
    data: Vec<u8>, // tightly packed RGB8, row-major
}

impl ImageTexture {
    /// Loads a texture, trying `${RAYTRACER_TEXTURE_DIR}/name` first, then
    /// `textures/name`.
    pub fn load(name: &str) -> Result<Self> {
        let candidates = Self::candidate_paths(name);
        let mut last_err = None;
        for path in &candidates {
            match image::open(path) {
                Ok(img) => {
                    let rgb = img.to_rgb8();
                    return Ok(Self {
                        width: rgb.width(),
                        height: rgb.height(),
                        data: rgb.into_raw(),
                    });
                }
                Err(e) => last_err = Some((path.clone(), e)),
            }
        }
        let (path, source) = last_err.unwrap_or_else(|| {
            (
                candidates.last().cloned().unwrap_or_default(),
                image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no search path configured",
                )),
            )
        });
        Err(RenderError::TextureUnreadable { path, source })
    }

    /// An empty texture — `value()` always returns the debug cyan.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    fn candidate_paths(name: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(dir) = env::var("RAYTRACER_TEXTURE_DIR") {
            paths.push(Path::new(&dir).join(name));
        }
        paths.push(Path::new("textures").join(name));
        paths
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = 3 * (y * self.width + x) as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        if self.height == 0 {
            return Color::new(0.0, 1.0, 1.0);
        }
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let mut i = (u * self.width as f64) as u32;
        let mut j = (v * self.height as f64) as u32;
        if i >= self.width {
            i = self.width - 1;
        }
        if j >= self.height {
            j = self.height - 1;
        }

        let [r, g, b] = self.pixel(i, j);
        let scale = 1.0 / 255.0;
        Color::new(scale * r as f64, scale * g as f64, scale * b as f64)
    }
}

/// A grayscale lattice-noise texture driven by a [`Perlin`] generator.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f64,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f64) -> Self {
        Self { noise, scale }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        let n = self.noise.noise(p * self.scale);
        Color::ones() * n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_color_ignores_inputs() {
        let t = SolidColor::new(Color::new(0.2, 0.4, 0.6));
        assert_eq!(t.value(0.0, 0.0, Point3::zero()), t.value(1.0, 1.0, Point3::new(9.0, 9.0, 9.0)));
    }

    #[test]
    fn checker_alternates_across_a_unit_boundary() {
        let t = CheckerTexture::from_colors(1.0, Color::zero(), Color::ones());
        let a = t.value(0.0, 0.0, Point3::new(0.5, 0.5, 0.5));
        let b = t.value(0.0, 0.0, Point3::new(1.5, 0.5, 0.5));
        assert_ne!(a, b);
    }

    #[test]
    fn empty_image_texture_is_debug_cyan() {
        let t = ImageTexture::empty();
        assert_eq!(t.value(0.3, 0.3, Point3::zero()), Color::new(0.0, 1.0, 1.0));
    }
}
