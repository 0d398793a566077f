//! Report widgets: stat cards, section labels, bullet items, asset images and charts.
//!
//! Each widget is a [`genpdf::Element`] that lays itself out in the area it is given.  Images
//! and charts are fitted to the width of that area, so the same description works in any
//! column.

use std::rc::Rc;

use image::RgbImage;

use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Alignment, Context, Element, RenderResult, Size};

use crate::assets::fit_image;
use crate::charts::{self, Canvas, Chart, ChartFonts, Scale};
use crate::elements::{
    area_height, area_width, fill_rect, fit_font_size, line_height, mm_from_f64, print_text,
    stroke_rect, sub_area, text_style, text_width, IconText, Picture,
};
use crate::model::{ImageBlock, StatTile, ValueSize};
use crate::palette::{neutral, Rgb};

const CARD_PADDING_MM: f64 = 3.0;
const BADGE_MM: f64 = 8.0;
const LABEL_SIZE: u8 = 7;
const VALUE_SIZE_LARGE: u8 = 15;
const VALUE_SIZE_SMALL: u8 = 13;
const VALUE_SIZE_MIN: u8 = 9;
const SUB_SIZE: u8 = 6;

/// Font size of a stat value before it is shrunk to fit.
pub fn value_font_size(size: ValueSize) -> u8 {
    match size {
        ValueSize::Large => VALUE_SIZE_LARGE,
        ValueSize::Small => VALUE_SIZE_SMALL,
    }
}

/// Smallest size a value may be shrunk to; large values never drop below the small size.
pub fn min_value_font_size(size: ValueSize) -> u8 {
    match size {
        ValueSize::Large => VALUE_SIZE_SMALL,
        ValueSize::Small => VALUE_SIZE_MIN,
    }
}

/// Style of a stat value before it is shrunk to fit.
pub fn value_style(size: ValueSize) -> Style {
    text_style(value_font_size(size), true, neutral::GRAY_800)
}

/// Bordered, fixed-height stat tile with an icon badge.
pub struct StatCard {
    tile: StatTile,
    badge: Option<RgbImage>,
    height_mm: f64,
}

impl StatCard {
    pub fn new(tile: StatTile, badge: RgbImage, height_mm: f64) -> Self {
        Self {
            tile,
            badge: Some(badge),
            height_mm,
        }
    }
}

impl Element for StatCard {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.height_mm > area_height(&area) + 1e-6 {
            result.has_more = true;
            return Ok(result);
        }
        let width = area_width(&area);

        fill_rect(context, &area, 0.0, 0.0, width, self.height_mm, neutral::WHITE)?;
        stroke_rect(&area, 0.0, 0.0, width, self.height_mm, neutral::GRAY_200);

        let text_width_mm = width - 3.0 * CARD_PADDING_MM - BADGE_MM;
        let size = self.tile.value_size();
        let value = value_style(size);
        let value_size = fit_font_size(
            context,
            &self.tile.value,
            value,
            value_font_size(size),
            min_value_font_size(size),
            text_width_mm,
        );

        let mut content = IconText::new(self.badge.take(), BADGE_MM)
            .with_gap(CARD_PADDING_MM)
            .with_line(
                self.tile.label.to_uppercase(),
                text_style(LABEL_SIZE, true, neutral::GRAY_500),
            )
            .with_line(self.tile.value.clone(), value.with_font_size(value_size))
            .with_line(
                self.tile.sub.to_uppercase(),
                text_style(SUB_SIZE, true, neutral::GRAY_400),
            );
        let inner = self.height_mm - 2.0 * CARD_PADDING_MM;
        content.render(
            context,
            sub_area(
                &area,
                CARD_PADDING_MM,
                CARD_PADDING_MM,
                Some(width - 2.0 * CARD_PADDING_MM),
                Some(inner),
            ),
            style,
        )?;

        result.size = Size::new(area.size().width, mm_from_f64(self.height_mm));
        Ok(result)
    }
}

const LABEL_TEXT_SIZE: u8 = 13;
const LEGEND_TEXT_SIZE: u8 = 7;
const LEGEND_SWATCH_MM: f64 = 2.5;

/// Accent-coloured heading with a bar or icon in front and an optional legend on the right.
pub struct LabelRow {
    text: String,
    color: Rgb,
    glyph: Option<RgbImage>,
    legend: Vec<(String, Rgb)>,
}

impl LabelRow {
    pub fn new(text: impl Into<String>, color: Rgb, glyph: Option<RgbImage>) -> Self {
        Self {
            text: text.into(),
            color,
            glyph,
            legend: Vec::new(),
        }
    }

    pub fn with_legend(mut self, legend: Vec<(String, Rgb)>) -> Self {
        self.legend = legend;
        self
    }
}

impl Element for LabelRow {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let heading = text_style(LABEL_TEXT_SIZE, true, self.color);
        let height = line_height(context, heading);
        if height > area_height(&area) + 1e-6 {
            result.has_more = true;
            return Ok(result);
        }
        let width = area_width(&area);

        let marker = height * 0.7;
        let marker_y = (height - marker) / 2.0;
        let text_x = match self.glyph.take() {
            Some(glyph) => {
                Picture::new(glyph, marker, marker).render(
                    context,
                    sub_area(&area, 0.0, marker_y, None, None),
                    style,
                )?;
                marker + 2.0
            }
            None => {
                fill_rect(context, &area, 0.0, marker_y, 1.2, marker, self.color)?;
                3.2
            }
        };

        let legend_style = text_style(LEGEND_TEXT_SIZE, true, neutral::GRAY_600);
        let legend_height = line_height(context, legend_style);
        let mut right = width;
        for (name, color) in self.legend.iter().rev() {
            let name_width = text_width(context, name, legend_style);
            let x = right - name_width;
            print_text(
                context,
                &area,
                x,
                (height - legend_height) / 2.0,
                name_width + 1.0,
                name,
                legend_style,
                Alignment::Left,
            )?;
            let swatch_x = x - LEGEND_SWATCH_MM - 1.2;
            fill_rect(
                context,
                &area,
                swatch_x,
                (height - LEGEND_SWATCH_MM) / 2.0,
                LEGEND_SWATCH_MM,
                LEGEND_SWATCH_MM,
                *color,
            )?;
            right = swatch_x - 3.0;
        }

        print_text(
            context,
            &area,
            text_x,
            0.0,
            (right - text_x).max(0.0),
            &self.text.to_uppercase(),
            heading,
            Alignment::Left,
        )?;

        result.size = Size::new(area.size().width, mm_from_f64(height));
        Ok(result)
    }
}

/// One list entry with a round marker.
pub struct BulletItem {
    text: String,
    dot: Option<RgbImage>,
    text_size: u8,
}

impl BulletItem {
    pub fn new(text: impl Into<String>, marker: Rgb, surface: Rgb, scale: Scale) -> Self {
        let size = scale.mm(1.6).round().max(2.0) as u32;
        let mut canvas = Canvas::new(size, size, surface);
        let radius = f64::from(size) / 2.0;
        canvas.fill_circle(radius, radius, radius, marker);
        Self {
            text: text.into(),
            dot: Some(canvas.into_image()),
            text_size: 8,
        }
    }
}

impl Element for BulletItem {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let text = text_style(self.text_size, true, neutral::GRAY_700);
        let mut line = IconText::new(self.dot.take(), 1.6).with_line(self.text.clone(), text);
        line.render(context, area, style)
    }
}

/// External image fitted to the area width at a fixed height.
///
/// A missing asset is drawn as a framed box with the alt text.
pub struct AssetImage {
    source: Option<RgbImage>,
    block: ImageBlock,
    scale: Scale,
}

impl AssetImage {
    pub fn new(source: Option<RgbImage>, block: ImageBlock, scale: Scale) -> Self {
        Self {
            source,
            block,
            scale,
        }
    }

    fn placeholder(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        width: f64,
        height: f64,
    ) -> Result<(), Error> {
        fill_rect(context, area, 0.0, 0.0, width, height, neutral::GRAY_100)?;
        stroke_rect(area, 0.0, 0.0, width, height, neutral::GRAY_400);
        let label = text_style(7, true, neutral::GRAY_500);
        let y = (height - line_height(context, label)) / 2.0;
        print_text(
            context,
            area,
            1.0,
            y.max(0.0),
            (width - 2.0).max(0.0),
            &self.block.alt,
            label,
            Alignment::Center,
        )?;
        Ok(())
    }
}

impl Element for AssetImage {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let height = self.block.height_mm;
        if height > area_height(&area) + 1e-6 {
            result.has_more = true;
            return Ok(result);
        }
        let width = area_width(&area);

        match self.source.take() {
            Some(source) => {
                let box_w = self.scale.mm(width).round().max(1.0) as u32;
                let box_h = self.scale.mm(height).round().max(1.0) as u32;
                let fitted = fit_image(&source, box_w, box_h, self.block.fit);
                let px_per_mm = self.scale.mm(1.0);
                let (fit_w, fit_h) = fitted.dimensions();
                let (w_mm, h_mm) = (f64::from(fit_w) / px_per_mm, f64::from(fit_h) / px_per_mm);
                let mut picture = Picture::new(fitted, w_mm, h_mm)
                    .with_alignment(Alignment::Center)
                    .with_border(self.block.border);
                picture.render(
                    context,
                    sub_area(&area, 0.0, (height - h_mm) / 2.0, None, None),
                    style,
                )?;
            }
            None => self.placeholder(context, &area, width, height)?,
        }

        result.size = Size::new(area.size().width, mm_from_f64(height));
        Ok(result)
    }
}

/// Chart rasterised at render time, no wider than the area.
pub struct ChartImage {
    chart: Chart,
    fonts: Rc<ChartFonts>,
    scale: Scale,
}

impl ChartImage {
    pub fn new(chart: Chart, fonts: Rc<ChartFonts>, scale: Scale, surface: Rgb) -> Self {
        Self {
            chart: chart.with_background(surface),
            fonts,
            scale,
        }
    }
}

impl Element for ChartImage {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.chart.height_mm > area_height(&area) + 1e-6 {
            result.has_more = true;
            return Ok(result);
        }
        self.chart.width_mm = self.chart.width_mm.min(area_width(&area));
        let image = charts::rasterize(&self.chart, &self.fonts, self.scale);
        let mut picture = Picture::new(image, self.chart.width_mm, self.chart.height_mm)
            .with_alignment(Alignment::Center);
        picture.render(context, area.clone(), style)?;
        result.size = Size::new(area.size().width, mm_from_f64(self.chart.height_mm));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_values_start_smaller() {
        assert!(value_font_size(ValueSize::Small) < value_font_size(ValueSize::Large));
    }

    #[test]
    fn short_values_never_shrink_below_the_long_value_size() {
        assert_eq!(min_value_font_size(ValueSize::Large), value_font_size(ValueSize::Small));
        assert!(min_value_font_size(ValueSize::Small) < value_font_size(ValueSize::Small));
    }

    #[test]
    fn values_are_dark_grey_whatever_the_accent() {
        for size in [ValueSize::Large, ValueSize::Small] {
            let style = value_style(size);
            assert_eq!(style.color(), Some(neutral::GRAY_800.into()));
            assert!(style.is_bold());
        }
    }
}
