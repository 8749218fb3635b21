use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::core::Viewport;
use crate::error::{SceneError, SceneResult};
use crate::render::Color;

/// RGBA color buffer plus a normalized-device depth buffer.
///
/// Depth follows the projection convention: 0 at the near plane, 1 at the
/// far plane, smaller is nearer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pub(crate) color: Vec<u8>,
    pub(crate) depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(viewport: Viewport, background: Color) -> SceneResult<Self> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        background.validate()?;

        let pixels = viewport.width as usize * viewport.height as usize;
        let rgba = background.to_rgba8();
        let mut color = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            color.extend_from_slice(&rgba);
        }

        Ok(Self {
            width: viewport.width,
            height: viewport.height,
            color,
            depth: vec![1.0; pixels],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Writes `color` at (`x`, `y`) when `depth` passes the depth test.
    /// Out-of-bounds and out-of-range depth writes are dropped.
    pub fn put_pixel(&mut self, x: i64, y: i64, depth: f64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        if !(0.0..=1.0).contains(&depth) {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        if depth > self.depth[index] {
            return;
        }
        self.depth[index] = depth;
        self.color[index * 4..index * 4 + 4].copy_from_slice(&color.to_rgba8());
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.color[index],
            self.color[index + 1],
            self.color[index + 2],
            self.color[index + 3],
        ])
    }

    pub fn into_image(self) -> SceneResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.color).ok_or_else(|| {
            SceneError::InvalidData("framebuffer size does not match pixel data".to_owned())
        })
    }

    pub fn to_image(&self) -> SceneResult<RgbaImage> {
        self.clone().into_image()
    }

    pub fn png_bytes(&self) -> SceneResult<Vec<u8>> {
        let image = self.to_image()?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> SceneResult<()> {
        let image = self.to_image()?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_cleared_to_background() {
        let fb = Framebuffer::new(Viewport::new(4, 3), Color::rgb(0.8, 0.8, 0.8)).expect("valid");
        assert_eq!(fb.pixel(0, 0), Some([204, 204, 204, 255]));
        assert_eq!(fb.pixel(3, 2), Some([204, 204, 204, 255]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn nearer_write_wins_farther_is_dropped() {
        let mut fb = Framebuffer::new(Viewport::new(2, 2), Color::BLACK).expect("valid");
        fb.put_pixel(1, 1, 0.5, Color::rgb(1.0, 0.0, 0.0));
        fb.put_pixel(1, 1, 0.8, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(fb.pixel(1, 1), Some([255, 0, 0, 255]));
        fb.put_pixel(1, 1, 0.2, Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(fb.pixel(1, 1), Some([0, 0, 255, 255]));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = Framebuffer::new(Viewport::new(2, 2), Color::BLACK).expect("valid");
        fb.put_pixel(-1, 0, 0.5, Color::WHITE);
        fb.put_pixel(0, 5, 0.5, Color::WHITE);
        fb.put_pixel(0, 0, 1.5, Color::WHITE);
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn png_bytes_carry_signature() {
        let fb = Framebuffer::new(Viewport::new(2, 2), Color::WHITE).expect("valid");
        let bytes = fb.png_bytes().expect("encoded");
        assert!(bytes.starts_with(&[137, 80, 78, 71]));
    }
}
