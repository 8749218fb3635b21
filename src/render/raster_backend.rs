//! Deterministic CPU rasterizer.
//!
//! Triangles are filled with an edge-function scan over their pixel bounding
//! box, depth-tested per pixel and Gouraud-shaded from the per-vertex colors.
//! Lines and stroke-font labels draw on top with a small depth bias so
//! overlay geometry wins ties against coplanar surfaces.

use image::RgbaImage;

use crate::error::{SceneError, SceneResult};
use crate::render::stroke_font::{self, GLYPH_ASPECT};
use crate::render::{
    Color, DepthLine, Framebuffer, RenderFrame, Renderer, ScreenText, ShadedTriangle, TextHAlign,
};

const LINE_DEPTH_BIAS: f64 = 5e-4;
const TEXT_DEPTH_BIAS: f64 = 1e-3;

/// Software rendering backend producing an RGBA framebuffer.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    framebuffer: Option<Framebuffer>,
}

impl RasterRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn framebuffer(&self) -> Option<&Framebuffer> {
        self.framebuffer.as_ref()
    }

    /// Consumes the backend and returns the last rendered image.
    pub fn into_image(self) -> SceneResult<RgbaImage> {
        self.framebuffer
            .ok_or_else(|| SceneError::InvalidData("no frame has been rendered".to_owned()))?
            .into_image()
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SceneResult<()> {
        frame.validate()?;

        let mut framebuffer = Framebuffer::new(frame.viewport, frame.background)?;
        fill_triangles(&mut framebuffer, &frame.triangles);
        for line in &frame.lines {
            draw_line(&mut framebuffer, line, LINE_DEPTH_BIAS);
        }
        for text in &frame.texts {
            draw_text(&mut framebuffer, text);
        }

        tracing::debug!(
            width = frame.viewport.width,
            height = frame.viewport.height,
            triangles = frame.triangles.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            "rasterized frame"
        );

        self.framebuffer = Some(framebuffer);
        Ok(())
    }
}

#[cfg(not(feature = "parallel-raster"))]
fn fill_triangles(framebuffer: &mut Framebuffer, triangles: &[ShadedTriangle]) {
    let width = framebuffer.width();
    let height = framebuffer.height();
    let row_pixels = width as usize;

    for triangle in triangles {
        let Some((y_min, y_max)) = row_span(triangle, height) else {
            continue;
        };
        for y in y_min..=y_max {
            let color_row =
                &mut framebuffer.color[y as usize * row_pixels * 4..(y as usize + 1) * row_pixels * 4];
            let depth_row =
                &mut framebuffer.depth[y as usize * row_pixels..(y as usize + 1) * row_pixels];
            raster_triangle_row(triangle, y, width, color_row, depth_row);
        }
    }
}

#[cfg(feature = "parallel-raster")]
fn fill_triangles(framebuffer: &mut Framebuffer, triangles: &[ShadedTriangle]) {
    use rayon::prelude::*;

    let width = framebuffer.width();
    let row_pixels = width as usize;

    framebuffer
        .color
        .par_chunks_exact_mut(row_pixels * 4)
        .zip(framebuffer.depth.par_chunks_exact_mut(row_pixels))
        .enumerate()
        .for_each(|(y, (color_row, depth_row))| {
            for triangle in triangles {
                raster_triangle_row(triangle, y as u32, width, color_row, depth_row);
            }
        });
}

fn edge(ax: f64, ay: f64, bx: f64, by: f64, px: f64, py: f64) -> f64 {
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// Clipped inclusive pixel-row span of the triangle, `None` when offscreen.
fn row_span(triangle: &ShadedTriangle, height: u32) -> Option<(u32, u32)> {
    let ys = triangle.vertices.map(|(_, y)| y);
    let y_min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if y_max < 0.0 || y_min >= f64::from(height) {
        return None;
    }
    let y_min = (y_min.floor().max(0.0)) as u32;
    let y_max = (y_max.ceil().min(f64::from(height) - 1.0)) as u32;
    Some((y_min, y_max))
}

fn raster_triangle_row(
    triangle: &ShadedTriangle,
    y: u32,
    width: u32,
    color_row: &mut [u8],
    depth_row: &mut [f64],
) {
    let [(ax, ay), (bx, by), (cx, cy)] = triangle.vertices;

    let area = edge(ax, ay, bx, by, cx, cy);
    if area.abs() < 1e-12 {
        return;
    }

    let y_center = f64::from(y) + 0.5;
    let row_min = ay.min(by).min(cy);
    let row_max = ay.max(by).max(cy);
    if y_center < row_min - 0.5 || y_center > row_max + 0.5 {
        return;
    }

    let x_min = ax.min(bx).min(cx).floor().max(0.0) as u32;
    let x_max = ax.max(bx).max(cx).ceil().min(f64::from(width) - 1.0);
    if x_max < 0.0 {
        return;
    }
    let x_max = x_max as u32;

    for x in x_min..=x_max {
        let x_center = f64::from(x) + 0.5;

        let l0 = edge(bx, by, cx, cy, x_center, y_center) / area;
        let l1 = edge(cx, cy, ax, ay, x_center, y_center) / area;
        let l2 = edge(ax, ay, bx, by, x_center, y_center) / area;
        if l0 < 0.0 || l1 < 0.0 || l2 < 0.0 {
            continue;
        }

        let depth =
            l0 * triangle.depths[0] + l1 * triangle.depths[1] + l2 * triangle.depths[2];
        if !(0.0..=1.0).contains(&depth) {
            continue;
        }
        let index = x as usize;
        if depth > depth_row[index] {
            continue;
        }

        let [c0, c1, c2] = triangle.colors;
        let color = Color::rgba(
            l0 * c0.red + l1 * c1.red + l2 * c2.red,
            l0 * c0.green + l1 * c1.green + l2 * c2.green,
            l0 * c0.blue + l1 * c1.blue + l2 * c2.blue,
            l0 * c0.alpha + l1 * c1.alpha + l2 * c2.alpha,
        );

        depth_row[index] = depth;
        color_row[index * 4..index * 4 + 4].copy_from_slice(&color.to_rgba8());
    }
}

fn draw_line(framebuffer: &mut Framebuffer, line: &DepthLine, depth_bias: f64) {
    let dx = line.x2 - line.x1;
    let dy = line.y2 - line.y1;

    let margin = line.stroke_width.ceil() + 1.0;
    let Some((t_enter, t_exit)) = clip_segment(
        (line.x1, line.y1),
        (dx, dy),
        -margin,
        f64::from(framebuffer.width()) + margin,
        -margin,
        f64::from(framebuffer.height()) + margin,
    ) else {
        return;
    };

    let span_x = (dx * (t_exit - t_enter)).abs();
    let span_y = (dy * (t_exit - t_enter)).abs();
    let steps = span_x.max(span_y).ceil() as usize;
    let stamp_radius = ((line.stroke_width - 1.0) / 2.0).ceil().max(0.0) as i64;

    for step in 0..=steps {
        let local = if steps == 0 {
            0.0
        } else {
            step as f64 / steps as f64
        };
        let t = t_enter + (t_exit - t_enter) * local;
        let x = line.x1 + dx * t;
        let y = line.y1 + dy * t;
        let depth = (line.depth1 + (line.depth2 - line.depth1) * t - depth_bias).max(0.0);

        stamp(framebuffer, x, y, stamp_radius, depth, line.color);
    }
}

/// Liang-Barsky parametric clip of `origin + t * delta`, t in [0, 1], against
/// an axis-aligned rectangle. `None` when fully outside.
fn clip_segment(
    origin: (f64, f64),
    delta: (f64, f64),
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Option<(f64, f64)> {
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for (p, q) in [
        (-delta.0, origin.0 - x_min),
        (delta.0, x_max - origin.0),
        (-delta.1, origin.1 - y_min),
        (delta.1, y_max - origin.1),
    ] {
        if p.abs() < f64::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t_enter = t_enter.max(t);
        } else {
            t_exit = t_exit.min(t);
        }
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, t_exit))
}

fn stamp(framebuffer: &mut Framebuffer, x: f64, y: f64, radius: i64, depth: f64, color: Color) {
    let px = x.floor() as i64;
    let py = y.floor() as i64;
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            if ox * ox + oy * oy <= radius * radius {
                framebuffer.put_pixel(px + ox, py + oy, depth, color);
            }
        }
    }
}

fn draw_text(framebuffer: &mut Framebuffer, text: &ScreenText) {
    let size = text.glyph_size_px;
    let advance = size * stroke_font::ADVANCE_FACTOR;
    let total_width = stroke_font::text_width_px(&text.text, size);
    let origin_x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - total_width / 2.0,
        TextHAlign::Right => text.x - total_width,
    };
    let stroke_width = (size / 9.0).max(1.0);
    let depth = (text.depth - TEXT_DEPTH_BIAS).max(0.0);

    for (slot, character) in text.text.chars().enumerate() {
        let Some(strokes) = stroke_font::glyph_strokes(character) else {
            continue;
        };
        let pen_x = origin_x + slot as f64 * advance;
        for ((x1, y1), (x2, y2)) in strokes {
            let line = DepthLine::new(
                pen_x + x1 * size * GLYPH_ASPECT,
                text.y - y1 * size,
                depth,
                pen_x + x2 * size * GLYPH_ASPECT,
                text.y - y2 * size,
                depth,
                stroke_width,
                text.color,
            );
            draw_line(framebuffer, &line, 0.0);
        }
    }
}
