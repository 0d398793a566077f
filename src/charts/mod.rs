//! Chart descriptions and the rasteriser that turns them into images.
//!
//! Pages describe charts declaratively (data, colours, label formats, size in millimetres).
//! [`rasterize`] paints a description onto an RGB image at the configured resolution; the PDF
//! layer then embeds the image at its nominal width.

mod category;
mod donut;
pub mod format;
pub mod icons;
mod progress;
pub mod raster;

use image::RgbImage;
use rusttype::Font;

use crate::data::Share;
use crate::palette::{cycle_color, neutral, Rgb};

pub use format::LabelFormat;
pub use raster::{Canvas, Scale};

/// Regular and bold faces used for chart text.
#[derive(Clone)]
pub struct ChartFonts {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

impl ChartFonts {
    /// Parses the two faces from raw TrueType data.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> Option<Self> {
        Some(Self {
            regular: Font::try_from_vec(regular)?,
            bold: Font::try_from_vec(bold)?,
        })
    }
}

/// One data series of a category chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Rgb,
    pub label_color: Rgb,
    pub values: Vec<f64>,
    pub labels: LabelFormat,
}

impl Series {
    pub fn new(name: impl Into<String>, color: Rgb, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            color,
            label_color: color,
            values: values.into(),
            labels: LabelFormat::Plain,
        }
    }

    pub fn with_labels(mut self, labels: LabelFormat) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_label_color(mut self, color: Rgb) -> Self {
        self.label_color = color;
        self
    }

    /// Formatted value labels in category order.
    pub fn value_labels(&self) -> Vec<Option<String>> {
        self.values.iter().map(|value| self.labels.format(*value)).collect()
    }
}

/// Mark used for the series of a category chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CategoryStyle {
    /// Grouped bars; the optional value caps the bar width in CSS pixels.
    Bars { max_bar_css: Option<f64> },
    /// Monotone curve with a gradient fill down to the domain floor.
    Area,
}

/// Bars or areas plotted over a categorical (year) axis.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryChart {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub style: CategoryStyle,
    pub domain: Option<(f64, f64)>,
    pub notes: Vec<String>,
    pub grid_color: Rgb,
    pub legend: bool,
}

impl CategoryChart {
    fn new<I, S>(categories: I, style: CategoryStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            series: Vec::new(),
            style,
            domain: None,
            notes: Vec::new(),
            grid_color: neutral::SLATE_200,
            legend: false,
        }
    }

    pub fn bars<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(categories, CategoryStyle::Bars { max_bar_css: None })
    }

    pub fn area<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(categories, CategoryStyle::Area)
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_max_bar_width(mut self, css_px: f64) -> Self {
        if let CategoryStyle::Bars { max_bar_css } = &mut self.style {
            *max_bar_css = Some(css_px);
        }
        self
    }

    /// Pins the value axis instead of deriving it from the data.
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some((min, max));
        self
    }

    /// Adds one note per category, printed under the axis label.
    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_grid_color(mut self, color: Rgb) -> Self {
        self.grid_color = color;
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }
}

/// A single donut slice.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub name: String,
    pub value: f64,
}

impl From<&Share> for Slice {
    fn from(share: &Share) -> Self {
        Self {
            name: share.name.to_string(),
            value: share.value,
        }
    }
}

/// Text printed in the hole of a donut.
#[derive(Clone, Debug, PartialEq)]
pub struct CenterLabel {
    pub caption: String,
    pub value: String,
}

/// How a donut's legend is laid out beneath the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendLayout {
    /// Names only, two per row.
    Grid,
    /// One row per slice with its share as a percentage.
    List,
}

/// Ring chart of a breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct DonutChart {
    pub slices: Vec<Slice>,
    pub colors: Vec<Rgb>,
    pub inner_css: f64,
    pub outer_css: f64,
    pub pad_degrees: f64,
    pub center: Option<CenterLabel>,
    pub legend: LegendLayout,
}

impl DonutChart {
    pub fn new<'a, I>(shares: I, colors: &[Rgb]) -> Self
    where
        I: IntoIterator<Item = &'a Share>,
    {
        Self {
            slices: shares.into_iter().map(Slice::from).collect(),
            colors: colors.to_vec(),
            inner_css: 45.0,
            outer_css: 70.0,
            pad_degrees: 2.0,
            center: None,
            legend: LegendLayout::List,
        }
    }

    pub fn with_radii(mut self, inner_css: f64, outer_css: f64) -> Self {
        self.inner_css = inner_css;
        self.outer_css = outer_css;
        self
    }

    pub fn with_padding(mut self, degrees: f64) -> Self {
        self.pad_degrees = degrees;
        self
    }

    pub fn with_center(mut self, caption: impl Into<String>, value: impl Into<String>) -> Self {
        self.center = Some(CenterLabel {
            caption: caption.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_legend(mut self, legend: LegendLayout) -> Self {
        self.legend = legend;
        self
    }

    /// Colour of the `index`-th slice; wraps around the palette.
    pub fn color_for(&self, index: usize) -> Rgb {
        cycle_color(&self.colors, index).unwrap_or(neutral::GRAY_400)
    }

    /// Legend rows as (name, optional share text).
    pub fn legend_entries(&self) -> Vec<(String, Option<String>)> {
        self.slices
            .iter()
            .map(|slice| {
                let share = match self.legend {
                    LegendLayout::Grid => None,
                    LegendLayout::List => Some(format::percent(slice.value)),
                };
                (slice.name.clone(), share)
            })
            .collect()
    }
}

/// One labelled percentage bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressItem {
    pub label: String,
    pub percent: f64,
    pub bar: Rgb,
    pub text: Rgb,
}

/// Stack of horizontal percentage bars.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProgressChart {
    pub items: Vec<ProgressItem>,
}

impl ProgressChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, share: &Share, bar: Rgb, text: Rgb) -> Self {
        self.items.push(ProgressItem {
            label: share.name.to_string(),
            percent: share.value,
            bar,
            text,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChartKind {
    Category(CategoryChart),
    Donut(DonutChart),
    Progress(ProgressChart),
}

/// A chart together with its printed size.
#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub width_mm: f64,
    pub height_mm: f64,
    pub background: Rgb,
}

impl Chart {
    pub fn new(kind: ChartKind, width_mm: f64, height_mm: f64) -> Self {
        Self {
            kind,
            width_mm,
            height_mm,
            background: neutral::WHITE,
        }
    }

    pub fn category(chart: CategoryChart, width_mm: f64, height_mm: f64) -> Self {
        Self::new(ChartKind::Category(chart), width_mm, height_mm)
    }

    pub fn donut(chart: DonutChart, width_mm: f64, height_mm: f64) -> Self {
        Self::new(ChartKind::Donut(chart), width_mm, height_mm)
    }

    pub fn progress(chart: ProgressChart, width_mm: f64, height_mm: f64) -> Self {
        Self::new(ChartKind::Progress(chart), width_mm, height_mm)
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Category or legend labels shown by the chart, in display order.
    pub fn labels(&self) -> Vec<String> {
        match &self.kind {
            ChartKind::Category(chart) => chart.categories.clone(),
            ChartKind::Donut(chart) => chart.slices.iter().map(|s| s.name.clone()).collect(),
            ChartKind::Progress(chart) => chart.items.iter().map(|i| i.label.clone()).collect(),
        }
    }

    /// Canvas size in pixels at the given scale.
    pub fn pixel_size(&self, scale: Scale) -> (u32, u32) {
        (
            scale.mm(self.width_mm).round().max(1.0) as u32,
            scale.mm(self.height_mm).round().max(1.0) as u32,
        )
    }
}

/// Paints `chart` onto a new image at `scale`.
pub fn rasterize(chart: &Chart, fonts: &ChartFonts, scale: Scale) -> RgbImage {
    let (width, height) = chart.pixel_size(scale);
    let mut canvas = Canvas::new(width, height, chart.background);
    match &chart.kind {
        ChartKind::Category(chart) => category::paint(&mut canvas, chart, fonts, scale),
        ChartKind::Donut(chart) => donut::paint(&mut canvas, chart, fonts, scale),
        ChartKind::Progress(chart) => progress::paint(&mut canvas, chart, fonts, scale),
    }
    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tea;
    use crate::palette::Sector;

    #[test]
    fn donut_labels_follow_table_order() {
        let chart = Chart::donut(
            DonutChart::new(&tea::KEY_MARKETS, Sector::Tea.palette().categorical),
            60.0,
            70.0,
        );
        let expected: Vec<String> = tea::KEY_MARKETS.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(chart.labels(), expected);
    }

    #[test]
    fn donut_colors_wrap_past_palette_end() {
        let colors = [Rgb(1, 1, 1), Rgb(2, 2, 2)];
        let shares = [
            Share { name: "a", value: 1.0 },
            Share { name: "b", value: 1.0 },
            Share { name: "c", value: 1.0 },
        ];
        let donut = DonutChart::new(&shares, &colors);
        assert_eq!(donut.color_for(2), Rgb(1, 1, 1));
    }

    #[test]
    fn list_legend_shows_percentages() {
        let shares = [Share { name: "Local Consumption", value: 98.5 }];
        let donut = DonutChart::new(&shares, &[Rgb(0, 0, 0)]);
        assert_eq!(
            donut.legend_entries(),
            vec![("Local Consumption".to_string(), Some("98.5%".to_string()))]
        );
    }

    #[test]
    fn pixel_size_follows_resolution() {
        let chart = Chart::progress(ProgressChart::new(), 25.4, 50.8);
        assert_eq!(chart.pixel_size(Scale::new(100.0)), (100, 200));
    }
}
