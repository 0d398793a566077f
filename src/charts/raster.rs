//! Pixel canvas used by the chart renderers.
//!
//! Wraps an [`RgbImage`] with the handful of primitives the charts need: filled and outlined
//! shapes from `imageproc`, thick and dashed strokes, alpha blending and `rusttype` text.  All
//! coordinates are in canvas pixels; callers convert from millimetres or CSS pixels through
//! [`Scale`].

use image::{ImageBuffer, Rgb as Pixel, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_circle_mut, draw_line_segment_mut,
    draw_polygon_mut,
};
use imageproc::point::Point;
use imageproc::rect::Rect;
use rusttype::{point, Font, Scale as GlyphScale};

use crate::palette::{neutral, Rgb};

const MM_PER_INCH: f64 = 25.4;
const CSS_PX_PER_INCH: f64 = 96.0;

/// Converts between physical units and canvas pixels for a given resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    dpi: f64,
}

impl Scale {
    pub fn new(dpi: f64) -> Self {
        Self { dpi: dpi.max(1.0) }
    }

    pub fn dpi(self) -> f64 {
        self.dpi
    }

    /// Canvas pixels for a length in millimetres.
    pub fn mm(self, mm: f64) -> f64 {
        mm * self.dpi / MM_PER_INCH
    }

    /// Canvas pixels for a length in CSS pixels (1/96 inch).
    pub fn css(self, px: f64) -> f64 {
        px * self.dpi / CSS_PX_PER_INCH
    }
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// A white canvas that charts and badges are painted on.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            image: ImageBuffer::from_pixel(width, height, background.to_pixel()),
        }
    }

    /// Creates a white canvas.
    pub fn white(width: u32, height: u32) -> Self {
        Self::new(width, height, neutral::WHITE)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.image.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.image.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.image.width() && y < self.image.height() {
            let p = self.image.get_pixel(x, y);
            Some(Rgb(p[0], p[1], p[2]))
        } else {
            None
        }
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Fills an axis-aligned rectangle; degenerate rectangles are skipped.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let w = width.round();
        let h = height.round();
        if w < 1.0 || h < 1.0 {
            return;
        }
        draw_filled_rect_mut(
            &mut self.image,
            Rect::at(x.round() as i32, y.round() as i32).of_size(w as u32, h as u32),
            color.to_pixel(),
        );
    }

    /// Fills a rectangle whose top corners are rounded with `radius`.
    pub fn fill_rounded_top(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, color: Rgb) {
        let radius = radius.min(width / 2.0).min(height).max(0.0);
        if radius < 1.0 {
            self.fill_rect(x, y, width, height, color);
            return;
        }
        self.fill_rect(x, y + radius, width, height - radius, color);
        self.fill_rect(x + radius, y, width - 2.0 * radius, radius + 1.0, color);
        self.fill_circle(x + radius, y + radius, radius, color);
        self.fill_circle(x + width - radius - 1.0, y + radius, radius, color);
    }

    /// Fills a rectangle with all four corners rounded.
    pub fn fill_rounded(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64, color: Rgb) {
        let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);
        if radius < 1.0 {
            self.fill_rect(x, y, width, height, color);
            return;
        }
        self.fill_rect(x + radius, y, width - 2.0 * radius, height, color);
        self.fill_rect(x, y + radius, width, height - 2.0 * radius, color);
        for (cx, cy) in [
            (x + radius, y + radius),
            (x + width - radius - 1.0, y + radius),
            (x + radius, y + height - radius - 1.0),
            (x + width - radius - 1.0, y + height - radius - 1.0),
        ] {
            self.fill_circle(cx, cy, radius, color);
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb) {
        if radius < 0.5 {
            return;
        }
        draw_filled_circle_mut(
            &mut self.image,
            (cx.round() as i32, cy.round() as i32),
            radius.round() as i32,
            color.to_pixel(),
        );
    }

    /// Strokes a circle outline of the given thickness.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, thickness: f64, color: Rgb) {
        let inner = (radius - thickness / 2.0).max(0.0).round() as i32;
        let outer = (radius + thickness / 2.0).round() as i32;
        for r in inner..=outer {
            draw_hollow_circle_mut(
                &mut self.image,
                (cx.round() as i32, cy.round() as i32),
                r,
                color.to_pixel(),
            );
        }
    }

    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        draw_line_segment_mut(
            &mut self.image,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            color.to_pixel(),
        );
    }

    /// Strokes a segment `thickness` pixels wide with round caps.
    pub fn thick_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, thickness: f64, color: Rgb) {
        if thickness <= 1.0 {
            self.line(x0, y0, x1, y1, color);
            return;
        }
        let (dx, dy) = (x1 - x0, y1 - y0);
        let length = (dx * dx + dy * dy).sqrt();
        if length > f64::EPSILON {
            let (nx, ny) = (-dy / length, dx / length);
            let half = thickness / 2.0;
            let mut offset = -half;
            while offset <= half {
                self.line(
                    x0 + nx * offset,
                    y0 + ny * offset,
                    x1 + nx * offset,
                    y1 + ny * offset,
                    color,
                );
                offset += 0.5;
            }
        }
        self.fill_circle(x0, y0, thickness / 2.0, color);
        self.fill_circle(x1, y1, thickness / 2.0, color);
    }

    /// Strokes a polyline through `points`.
    pub fn polyline(&mut self, points: &[(f64, f64)], thickness: f64, color: Rgb) {
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            self.thick_line(x0, y0, x1, y1, thickness, color);
        }
    }

    /// Draws a horizontal dashed line (`dash` on, `gap` off).
    pub fn dashed_hline(&mut self, x0: f64, x1: f64, y: f64, dash: f64, gap: f64, color: Rgb) {
        let step = (dash + gap).max(1.0);
        let mut x = x0;
        while x < x1 {
            let end = (x + dash).min(x1);
            self.line(x, y, end, y, color);
            x += step;
        }
    }

    /// Fills a simple polygon.  Consecutive duplicate vertices are collapsed and polygons with
    /// fewer than three distinct vertices are ignored.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb) {
        let mut vertices: Vec<Point<i32>> = Vec::with_capacity(points.len());
        for &(x, y) in points {
            let vertex = Point::new(x.round() as i32, y.round() as i32);
            if vertices.last() != Some(&vertex) {
                vertices.push(vertex);
            }
        }
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return;
        }
        draw_polygon_mut(&mut self.image, &vertices, color.to_pixel());
    }

    /// Blends `color` over the pixel at (`x`, `y`) with the given opacity.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height()) {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let mix = |fg: u8, bg: u8| -> u8 {
            (f64::from(fg) * alpha + f64::from(bg) * (1.0 - alpha)).round() as u8
        };
        *pixel = Pixel([
            mix(color.0, pixel[0]),
            mix(color.1, pixel[1]),
            mix(color.2, pixel[2]),
        ]);
    }

    /// Width in pixels of `text` set in `font` at `size` pixels.
    pub fn measure(font: &Font<'_>, size: f64, text: &str) -> f64 {
        let scale = GlyphScale::uniform(size as f32);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| f64::from(glyph.position().x + glyph.unpositioned().h_metrics().advance_width))
            .unwrap_or(0.0)
    }

    /// Line height in pixels for `font` at `size` pixels.
    pub fn line_height(font: &Font<'_>, size: f64) -> f64 {
        let metrics = font.v_metrics(GlyphScale::uniform(size as f32));
        f64::from(metrics.ascent - metrics.descent + metrics.line_gap)
    }

    /// Draws `text` with its top edge at `y`, anchored horizontally at `x`.
    pub fn text(
        &mut self,
        font: &Font<'_>,
        size: f64,
        text: &str,
        x: f64,
        y: f64,
        anchor: Anchor,
        color: Rgb,
    ) {
        let width = Self::measure(font, size, text);
        let left = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x - width / 2.0,
            Anchor::End => x - width,
        };
        let scale = GlyphScale::uniform(size as f32);
        let ascent = font.v_metrics(scale).ascent;
        for glyph in font.layout(text, scale, point(left as f32, y as f32 + ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = i64::from(bb.min.x) + i64::from(gx);
                    let py = i64::from(bb.min.y) + i64::from(gy);
                    if coverage > 0.0 {
                        self.blend(px, py, color, f64::from(coverage));
                    }
                });
            }
        }
    }

    /// Greedily wraps `text` into lines no wider than `max_width` pixels.
    pub fn wrap(font: &Font<'_>, size: f64, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if !current.is_empty() && Self::measure(font, size, &candidate) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_converts_units() {
        let scale = Scale::new(96.0);
        assert!((scale.css(10.0) - 10.0).abs() < 1e-9);
        assert!((scale.mm(25.4) - 96.0).abs() < 1e-9);
    }

    #[test]
    fn fill_rect_paints_inside_only() {
        let mut canvas = Canvas::white(20, 20);
        canvas.fill_rect(5.0, 5.0, 4.0, 4.0, Rgb(255, 0, 0));
        assert_eq!(canvas.pixel(6, 6), Some(Rgb(255, 0, 0)));
        assert_eq!(canvas.pixel(12, 12), Some(neutral::WHITE));
    }

    #[test]
    fn degenerate_shapes_are_ignored() {
        let mut canvas = Canvas::white(10, 10);
        canvas.fill_rect(1.0, 1.0, 0.2, 5.0, Rgb(0, 0, 0));
        canvas.fill_polygon(&[(1.0, 1.0), (1.0, 1.0), (4.0, 4.0), (1.0, 1.0)], Rgb(0, 0, 0));
        assert!((0..10).all(|x| (0..10).all(|y| canvas.pixel(x, y) == Some(neutral::WHITE))));
    }

    #[test]
    fn polygon_fill_covers_interior() {
        let mut canvas = Canvas::white(30, 30);
        canvas.fill_polygon(
            &[(2.0, 2.0), (27.0, 2.0), (27.0, 27.0), (2.0, 27.0), (2.0, 2.0)],
            Rgb(0, 128, 0),
        );
        assert_eq!(canvas.pixel(15, 15), Some(Rgb(0, 128, 0)));
    }

    #[test]
    fn blend_mixes_with_background() {
        let mut canvas = Canvas::white(2, 2);
        canvas.blend(0, 0, Rgb(0, 0, 0), 0.5);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb(128, 128, 128)));
        canvas.blend(-1, 5, Rgb(0, 0, 0), 1.0);
    }
}
