//! Bar and area charts over a categorical axis.

use super::raster::{Anchor, Canvas, Scale};
use super::{CategoryChart, CategoryStyle, ChartFonts};
use crate::palette::neutral;

const GRID_DIVISIONS: usize = 4;
const AREA_SAMPLES_PER_SEGMENT: usize = 16;

/// Plot rectangle in canvas pixels.
#[derive(Clone, Copy, Debug)]
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Rounds `max` up to a readable axis ceiling.
pub(super) fn nice_ceiling(max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 1.0;
    }
    let step = nice_step(max, 8);
    (max / step).ceil() * step
}

fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

fn value_domain(chart: &CategoryChart) -> (f64, f64) {
    if let Some((min, max)) = chart.domain {
        if max > min {
            return (min, max);
        }
    }
    let max = chart
        .series
        .iter()
        .flat_map(|series| series.values.iter().copied())
        .fold(0.0_f64, f64::max);
    (0.0, nice_ceiling(max))
}

fn map_y(value: f64, domain: (f64, f64), plot: &Plot) -> f64 {
    let (min, max) = domain;
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    plot.bottom() - ratio * plot.height
}

/// Slopes for monotone cubic interpolation (Fritsch–Carlson).
fn monotone_tangents(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let secants: Vec<f64> = (0..n - 1)
        .map(|i| {
            let dx = xs[i + 1] - xs[i];
            if dx.abs() < f64::EPSILON {
                0.0
            } else {
                (ys[i + 1] - ys[i]) / dx
            }
        })
        .collect();

    let mut tangents = vec![0.0; n];
    tangents[0] = secants[0];
    tangents[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        tangents[i] = if secants[i - 1] * secants[i] <= 0.0 {
            0.0
        } else {
            (secants[i - 1] + secants[i]) / 2.0
        };
    }

    for i in 0..n - 1 {
        if secants[i] == 0.0 {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }
        let a = tangents[i] / secants[i];
        let b = tangents[i + 1] / secants[i];
        let h = a * a + b * b;
        if h > 9.0 {
            let t = 3.0 / h.sqrt();
            tangents[i] = t * a * secants[i];
            tangents[i + 1] = t * b * secants[i];
        }
    }
    tangents
}

/// Samples a monotone cubic through the given knots.
pub(super) fn monotone_curve(knots: &[(f64, f64)], samples_per_segment: usize) -> Vec<(f64, f64)> {
    if knots.len() < 2 {
        return knots.to_vec();
    }
    let xs: Vec<f64> = knots.iter().map(|k| k.0).collect();
    let ys: Vec<f64> = knots.iter().map(|k| k.1).collect();
    let tangents = monotone_tangents(&xs, &ys);
    let samples = samples_per_segment.max(1);

    let mut curve = Vec::with_capacity((knots.len() - 1) * samples + 1);
    for i in 0..knots.len() - 1 {
        let h = xs[i + 1] - xs[i];
        for step in 0..samples {
            let t = step as f64 / samples as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            let y = h00 * ys[i] + h10 * h * tangents[i] + h01 * ys[i + 1] + h11 * h * tangents[i + 1];
            curve.push((xs[i] + t * h, y));
        }
    }
    curve.push(knots[knots.len() - 1]);
    curve
}

/// Linear lookup of the curve height at `x`.
fn curve_y_at(curve: &[(f64, f64)], x: f64) -> Option<f64> {
    curve.windows(2).find_map(|pair| {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        if x >= x0 && x <= x1 {
            let span = x1 - x0;
            let t = if span.abs() < f64::EPSILON { 0.0 } else { (x - x0) / span };
            Some(y0 + t * (y1 - y0))
        } else {
            None
        }
    })
}

/// Opacity of the area gradient at relative depth `t` (0 at the crest, 1 at the floor).
fn gradient_alpha(t: f64) -> f64 {
    const START: f64 = 0.05;
    const END: f64 = 0.95;
    const PEAK: f64 = 0.8;
    if t <= START {
        PEAK
    } else if t >= END {
        0.0
    } else {
        PEAK * (1.0 - (t - START) / (END - START))
    }
}

pub(super) fn paint(canvas: &mut Canvas, chart: &CategoryChart, fonts: &ChartFonts, scale: Scale) {
    let count = chart.categories.len();
    if count == 0 {
        return;
    }

    let tick_size = scale.css(10.5);
    let label_size = scale.css(10.0);
    let note_size = scale.css(7.5);
    let legend_height = if chart.legend { scale.css(18.0) } else { 0.0 };

    let side = scale.css(12.0);
    let band = (canvas.width() - 2.0 * side) / count as f64;
    let notes: Vec<Vec<String>> = chart
        .notes
        .iter()
        .map(|note| {
            let mut lines = Canvas::wrap(&fonts.regular, note_size, note, band * 0.95);
            lines.truncate(2);
            lines
        })
        .collect();
    let note_lines = notes.iter().map(Vec::len).max().unwrap_or(0);
    let note_line_height = Canvas::line_height(&fonts.regular, note_size);
    let tick_line_height = Canvas::line_height(&fonts.bold, tick_size);

    let top = legend_height + scale.css(20.0);
    let bottom_margin =
        scale.css(6.0) + tick_line_height + note_lines as f64 * note_line_height + scale.css(4.0);
    let plot = Plot {
        left: side,
        top,
        width: (canvas.width() - 2.0 * side).max(1.0),
        height: (canvas.height() - top - bottom_margin).max(1.0),
    };
    let domain = value_domain(chart);

    if chart.legend {
        paint_legend(canvas, chart, fonts, scale);
    }

    for division in 0..=GRID_DIVISIONS {
        let value = domain.0 + (domain.1 - domain.0) * division as f64 / GRID_DIVISIONS as f64;
        let y = map_y(value, domain, &plot).round();
        canvas.dashed_hline(plot.left, plot.right(), y, scale.css(3.0), scale.css(3.0), chart.grid_color);
    }

    let x_positions: Vec<f64> = match chart.style {
        CategoryStyle::Bars { max_bar_css } => {
            paint_bars(canvas, chart, fonts, scale, &plot, domain, max_bar_css);
            (0..count)
                .map(|i| plot.left + band * (i as f64 + 0.5))
                .collect()
        }
        CategoryStyle::Area => {
            let xs = point_positions(count, &plot, scale);
            paint_areas(canvas, chart, fonts, scale, &plot, domain, &xs, label_size);
            xs
        }
    };

    let tick_top = plot.bottom() + scale.css(6.0);
    for (index, category) in chart.categories.iter().enumerate() {
        let x = x_positions[index];
        canvas.text(&fonts.bold, tick_size, category, x, tick_top, Anchor::Middle, neutral::SLATE_500);
        if let Some(lines) = notes.get(index) {
            for (line_index, line) in lines.iter().enumerate() {
                let y = tick_top + tick_line_height + line_index as f64 * note_line_height;
                canvas.text(&fonts.regular, note_size, line, x, y, Anchor::Middle, neutral::GRAY_400);
            }
        }
    }
}

fn point_positions(count: usize, plot: &Plot, scale: Scale) -> Vec<f64> {
    let inset = scale.css(15.0).min(plot.width / 4.0);
    let usable = (plot.width - 2.0 * inset).max(0.0);
    if count == 1 {
        return vec![plot.left + plot.width / 2.0];
    }
    (0..count)
        .map(|i| plot.left + inset + usable * i as f64 / (count - 1) as f64)
        .collect()
}

fn paint_bars(
    canvas: &mut Canvas,
    chart: &CategoryChart,
    fonts: &ChartFonts,
    scale: Scale,
    plot: &Plot,
    domain: (f64, f64),
    max_bar_css: Option<f64>,
) {
    let count = chart.categories.len();
    let series_count = chart.series.len().max(1);
    let band = plot.width / count as f64;
    let group = band * 0.8;
    let gap = if series_count > 1 { scale.css(4.0) } else { 0.0 };
    let mut bar_width = (group - gap * (series_count - 1) as f64) / series_count as f64;
    if let Some(max) = max_bar_css {
        bar_width = bar_width.min(scale.css(max));
    }
    let group_width = bar_width * series_count as f64 + gap * (series_count - 1) as f64;
    let label_size = if series_count > 1 { scale.css(9.0) } else { scale.css(10.0) };
    let radius = scale.css(4.0);

    for (series_index, series) in chart.series.iter().enumerate() {
        let labels = series.value_labels();
        for (index, value) in series.values.iter().enumerate().take(count) {
            let center = plot.left + band * (index as f64 + 0.5);
            let x = center - group_width / 2.0 + series_index as f64 * (bar_width + gap);
            let top = map_y(*value, domain, plot);
            canvas.fill_rounded_top(x, top, bar_width, plot.bottom() - top, radius, series.color);

            if let Some(Some(label)) = labels.get(index) {
                let y = top - scale.css(3.0) - label_size;
                canvas.text(
                    &fonts.bold,
                    label_size,
                    label,
                    x + bar_width / 2.0,
                    y,
                    Anchor::Middle,
                    series.label_color,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_areas(
    canvas: &mut Canvas,
    chart: &CategoryChart,
    fonts: &ChartFonts,
    scale: Scale,
    plot: &Plot,
    domain: (f64, f64),
    xs: &[f64],
    label_size: f64,
) {
    for series in &chart.series {
        let knots: Vec<(f64, f64)> = xs
            .iter()
            .zip(series.values.iter())
            .map(|(x, value)| (*x, map_y(*value, domain, plot)))
            .collect();
        if knots.is_empty() {
            continue;
        }
        let curve = monotone_curve(&knots, AREA_SAMPLES_PER_SEGMENT);
        let crest = curve.iter().map(|p| p.1).fold(plot.bottom(), f64::min);
        let depth = (plot.bottom() - crest).max(1.0);

        let first_x = curve[0].0.round() as i64;
        let last_x = curve[curve.len() - 1].0.round() as i64;
        for x in first_x..=last_x {
            if let Some(y_top) = curve_y_at(&curve, x as f64) {
                let mut y = y_top.round() as i64;
                while (y as f64) < plot.bottom() {
                    let t = (y as f64 - crest) / depth;
                    canvas.blend(x, y, series.color, gradient_alpha(t));
                    y += 1;
                }
            }
        }

        canvas.polyline(&curve, scale.css(3.0), series.color);

        let labels = series.value_labels();
        for ((x, y), label) in knots.iter().zip(labels.iter()) {
            if let Some(label) = label {
                let top = y - scale.css(10.0) - label_size;
                canvas.text(&fonts.bold, label_size, label, *x, top, Anchor::Middle, series.label_color);
            }
        }
    }
}

fn paint_legend(canvas: &mut Canvas, chart: &CategoryChart, fonts: &ChartFonts, scale: Scale) {
    let size = scale.css(9.0);
    let swatch = scale.css(10.0);
    let spacing = scale.css(16.0);
    let mut right = canvas.width() - scale.css(12.0);
    let y = scale.css(4.0);
    for series in chart.series.iter().rev() {
        let name = series.name.to_uppercase();
        let width = Canvas::measure(&fonts.bold, size, &name);
        canvas.text(&fonts.bold, size, &name, right, y, Anchor::End, neutral::GRAY_500);
        let swatch_x = right - width - scale.css(4.0) - swatch;
        canvas.fill_rounded(swatch_x, y, swatch, swatch, scale.css(2.0), series.color);
        right = swatch_x - spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ceiling_rounds_up() {
        assert!((nice_ceiling(300.13) - 350.0).abs() < 1e-6);
        assert!((nice_ceiling(840000.0) - 1_000_000.0).abs() < 1e-3);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }

    #[test]
    fn monotone_curve_passes_through_knots() {
        let knots = [(0.0, 10.0), (10.0, 4.0), (20.0, 6.0)];
        let curve = monotone_curve(&knots, 4);
        assert_eq!(curve.len(), 9);
        assert_eq!(curve[0], (0.0, 10.0));
        assert_eq!(curve[4], (10.0, 4.0));
        assert_eq!(curve[8], (20.0, 6.0));
    }

    #[test]
    fn monotone_curve_does_not_overshoot_flat_segments() {
        let knots = [(0.0, 5.0), (10.0, 5.0), (20.0, 9.0)];
        let curve = monotone_curve(&knots, 8);
        assert!(curve[..=8].iter().all(|p| (p.1 - 5.0).abs() < 1e-9));
    }

    #[test]
    fn gradient_fades_to_transparent() {
        assert_eq!(gradient_alpha(0.0), 0.8);
        assert_eq!(gradient_alpha(1.0), 0.0);
        assert!(gradient_alpha(0.5) > 0.0 && gradient_alpha(0.5) < 0.8);
    }

    #[test]
    fn fixed_domain_is_respected() {
        let chart = CategoryChart::area(["2020"]).with_domain(2500.0, 3600.0);
        assert_eq!(value_domain(&chart), (2500.0, 3600.0));
    }
}
