//! Donut (ring) charts with a legend underneath.

use std::f64::consts::PI;

use super::format;
use super::raster::{Anchor, Canvas, Scale};
use super::{ChartFonts, DonutChart, LegendLayout};
use crate::palette::neutral;

const ARC_STEP_DEGREES: f64 = 2.0;

/// Start and end angle (degrees, counter-clockwise from three o'clock) of every slice.
///
/// Each slice is followed by `pad` degrees of empty space, so the sweep available to the data
/// is `360 - pad * n`.  Slices with a non-positive value get an empty sweep.
pub(super) fn slice_angles(values: &[f64], pad: f64) -> Vec<(f64, f64)> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let visible = values.iter().filter(|v| **v > 0.0).count();
    let pad = if visible > 1 { pad.max(0.0) } else { 0.0 };
    let sweep = (360.0 - pad * visible as f64).max(0.0);

    let mut angles = Vec::with_capacity(values.len());
    let mut cursor = 0.0;
    for value in values {
        if *value <= 0.0 || total <= 0.0 {
            angles.push((cursor, cursor));
            continue;
        }
        let span = sweep * value / total;
        angles.push((cursor, cursor + span));
        cursor += span + pad;
    }
    angles
}

fn wedge(cx: f64, cy: f64, inner: f64, outer: f64, start: f64, end: f64) -> Vec<(f64, f64)> {
    let steps = (((end - start) / ARC_STEP_DEGREES).ceil() as usize).max(2);
    let at = |radius: f64, degrees: f64| {
        let radians = degrees * PI / 180.0;
        (cx + radius * radians.cos(), cy - radius * radians.sin())
    };

    let mut points = Vec::with_capacity(2 * (steps + 1));
    for step in 0..=steps {
        points.push(at(outer, start + (end - start) * step as f64 / steps as f64));
    }
    for step in (0..=steps).rev() {
        points.push(at(inner, start + (end - start) * step as f64 / steps as f64));
    }
    points
}

pub(super) fn paint(canvas: &mut Canvas, chart: &DonutChart, fonts: &ChartFonts, scale: Scale) {
    let count = chart.slices.len();
    let (row_height, rows) = match chart.legend {
        LegendLayout::Grid => (scale.css(15.0), (count + 1) / 2),
        LegendLayout::List => (scale.css(14.0), count),
    };
    let legend_height = rows as f64 * row_height + scale.css(6.0);
    let ring_height = (canvas.height() - legend_height).max(scale.css(20.0));

    let cx = canvas.width() / 2.0;
    let cy = ring_height / 2.0;
    let available = (canvas.width().min(ring_height) / 2.0 - scale.css(4.0)).max(1.0);
    let outer = scale.css(chart.outer_css).min(available);
    let inner = outer * (chart.inner_css / chart.outer_css.max(1.0)).clamp(0.0, 0.95);

    let values: Vec<f64> = chart.slices.iter().map(|slice| slice.value).collect();
    for (index, (start, end)) in slice_angles(&values, chart.pad_degrees).into_iter().enumerate() {
        if end - start <= f64::EPSILON {
            continue;
        }
        canvas.fill_polygon(&wedge(cx, cy, inner, outer, start, end), chart.color_for(index));
    }

    if let Some(center) = &chart.center {
        let caption_size = scale.css(9.0);
        let value_size = scale.css(14.0);
        let caption_height = Canvas::line_height(&fonts.bold, caption_size);
        let value_height = Canvas::line_height(&fonts.bold, value_size);
        let top = cy - (caption_height + value_height) / 2.0;
        canvas.text(
            &fonts.bold,
            caption_size,
            &center.caption.to_uppercase(),
            cx,
            top,
            Anchor::Middle,
            neutral::SLATE_500,
        );
        let value_size = value_size.min(fit_size(fonts, &center.value, value_size, inner * 1.8));
        canvas.text(
            &fonts.bold,
            value_size,
            &center.value,
            cx,
            top + caption_height,
            Anchor::Middle,
            neutral::SLATE_800,
        );
    }

    paint_legend(canvas, chart, fonts, scale, ring_height + scale.css(6.0), row_height);
}

/// Largest size not above `size` at which `text` fits in `width` pixels.
fn fit_size(fonts: &ChartFonts, text: &str, size: f64, width: f64) -> f64 {
    let natural = Canvas::measure(&fonts.bold, size, text);
    if natural <= width || natural <= f64::EPSILON {
        size
    } else {
        size * width / natural
    }
}

fn paint_legend(
    canvas: &mut Canvas,
    chart: &DonutChart,
    fonts: &ChartFonts,
    scale: Scale,
    top: f64,
    row_height: f64,
) {
    let swatch = scale.css(10.0);
    let pad = scale.css(6.0);
    match chart.legend {
        LegendLayout::Grid => {
            let size = scale.css(10.0);
            let column = (canvas.width() - 2.0 * pad) / 2.0;
            for (index, slice) in chart.slices.iter().enumerate() {
                let x = pad + column * (index % 2) as f64;
                let y = top + row_height * (index / 2) as f64;
                canvas.fill_rounded(x, y, swatch, swatch, scale.css(2.0), chart.color_for(index));
                canvas.text(
                    &fonts.bold,
                    size,
                    &slice.name,
                    x + swatch + scale.css(6.0),
                    y - scale.css(1.0),
                    Anchor::Start,
                    neutral::GRAY_700,
                );
            }
        }
        LegendLayout::List => {
            let size = scale.css(9.0);
            for (index, slice) in chart.slices.iter().enumerate() {
                let y = top + row_height * index as f64;
                canvas.fill_rounded(pad, y, swatch, swatch, scale.css(2.0), chart.color_for(index));
                canvas.text(
                    &fonts.bold,
                    size,
                    &slice.name,
                    pad + swatch + scale.css(6.0),
                    y,
                    Anchor::Start,
                    neutral::GRAY_700,
                );
                canvas.text(
                    &fonts.bold,
                    size,
                    &format::percent(slice.value),
                    canvas.width() - pad,
                    y,
                    Anchor::End,
                    neutral::GRAY_400,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_reserve_padding_between_slices() {
        let angles = slice_angles(&[50.0, 50.0], 2.0);
        assert_eq!(angles.len(), 2);
        assert!((angles[0].1 - angles[0].0 - 178.0).abs() < 1e-9);
        assert!((angles[1].0 - 180.0).abs() < 1e-9);
        assert!((angles[1].1 - 358.0).abs() < 1e-9);
    }

    #[test]
    fn single_slice_fills_the_ring() {
        let angles = slice_angles(&[42.0], 3.0);
        assert_eq!(angles, vec![(0.0, 360.0)]);
    }

    #[test]
    fn zero_slices_are_empty() {
        let angles = slice_angles(&[0.0, 10.0], 2.0);
        assert_eq!(angles[0], (0.0, 0.0));
        assert_eq!(angles[1], (0.0, 360.0));
    }

    #[test]
    fn wedge_starts_on_outer_arc() {
        let points = wedge(0.0, 0.0, 5.0, 10.0, 0.0, 90.0);
        assert!((points[0].0 - 10.0).abs() < 1e-9);
        let last = points[points.len() - 1];
        assert!((last.0 - 5.0).abs() < 1e-9 && last.1.abs() < 1e-9);
    }
}
