use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub fn validate(self) -> SceneResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SceneError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Per-channel scale, clamped back into range.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            red: (self.red * factor).clamp(0.0, 1.0),
            green: (self.green * factor).clamp(0.0, 1.0),
            blue: (self.blue * factor).clamp(0.0, 1.0),
            alpha: self.alpha,
        }
    }

    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.red),
            quantize(self.green),
            quantize(self.blue),
            quantize(self.alpha),
        ]
    }
}

/// Draw command for one depth-tested line segment in pixel space.
///
/// `depth` values are normalized device depth in [0, 1], 0 nearest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthLine {
    pub x1: f64,
    pub y1: f64,
    pub depth1: f64,
    pub x2: f64,
    pub y2: f64,
    pub depth2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl DepthLine {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        x1: f64,
        y1: f64,
        depth1: f64,
        x2: f64,
        y2: f64,
        depth2: f64,
        stroke_width: f64,
        color: Color,
    ) -> Self {
        Self {
            x1,
            y1,
            depth1,
            x2,
            y2,
            depth2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> SceneResult<()> {
        for value in [self.x1, self.y1, self.depth1, self.x2, self.y2, self.depth2] {
            if !value.is_finite() {
                return Err(SceneError::InvalidData(
                    "line coordinates must be finite".to_owned(),
                ));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(SceneError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Draw command for one z-buffered triangle with per-vertex shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedTriangle {
    /// Pixel-space vertex positions.
    pub vertices: [(f64, f64); 3],
    /// Normalized device depth per vertex, 0 nearest.
    pub depths: [f64; 3],
    /// Shaded vertex colors, interpolated across the face.
    pub colors: [Color; 3],
}

impl ShadedTriangle {
    #[must_use]
    pub const fn new(vertices: [(f64, f64); 3], depths: [f64; 3], colors: [Color; 3]) -> Self {
        Self {
            vertices,
            depths,
            colors,
        }
    }

    pub fn validate(self) -> SceneResult<()> {
        for (x, y) in self.vertices {
            if !x.is_finite() || !y.is_finite() {
                return Err(SceneError::InvalidData(
                    "triangle coordinates must be finite".to_owned(),
                ));
            }
        }
        for depth in self.depths {
            if !depth.is_finite() {
                return Err(SceneError::InvalidData(
                    "triangle depth must be finite".to_owned(),
                ));
            }
        }
        for color in self.colors {
            color.validate()?;
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `ScreenText::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one overlay label in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Depth used when the label competes with scene geometry.
    pub depth: f64,
    pub glyph_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl ScreenText {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        depth: f64,
        glyph_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            depth,
            glyph_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.text.is_empty() {
            return Err(SceneError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.depth.is_finite() {
            return Err(SceneError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.glyph_size_px.is_finite() || self.glyph_size_px <= 0.0 {
            return Err(SceneError::InvalidData(
                "glyph size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
