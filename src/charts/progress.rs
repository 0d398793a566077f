//! Labelled horizontal percentage bars.

use super::format;
use super::raster::{Anchor, Canvas, Scale};
use super::{ChartFonts, ProgressChart};
use crate::palette::neutral;

/// Filled width of a bar for `percent`, clamped to the track.
pub(super) fn fill_width(track: f64, percent: f64) -> f64 {
    track * percent.clamp(0.0, 100.0) / 100.0
}

pub(super) fn paint(canvas: &mut Canvas, chart: &ProgressChart, fonts: &ChartFonts, scale: Scale) {
    if chart.items.is_empty() {
        return;
    }
    let size = scale.css(10.0);
    let text_height = Canvas::line_height(&fonts.bold, size);
    let track_height = scale.css(8.0);
    let gap = scale.css(4.0);
    let row = canvas.height() / chart.items.len() as f64;
    let width = canvas.width();

    for (index, item) in chart.items.iter().enumerate() {
        let top = row * index as f64 + ((row - text_height - gap - track_height) / 2.0).max(0.0);
        canvas.text(&fonts.bold, size, &item.label, 0.0, top, Anchor::Start, neutral::GRAY_700);
        canvas.text(
            &fonts.bold,
            size,
            &format::percent(item.percent),
            width,
            top,
            Anchor::End,
            item.text,
        );

        let track_top = top + text_height + gap;
        canvas.fill_rounded(0.0, track_top, width, track_height, track_height / 2.0, neutral::GRAY_200);
        let filled = fill_width(width, item.percent);
        canvas.fill_rounded(0.0, track_top, filled, track_height, track_height / 2.0, item.bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional_and_clamped() {
        assert!((fill_width(200.0, 65.0) - 130.0).abs() < 1e-9);
        assert_eq!(fill_width(200.0, 140.0), 200.0);
        assert_eq!(fill_width(200.0, -5.0), 0.0);
    }
}
