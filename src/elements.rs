//! Extended element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` only knows text, images and stroked lines.  Filled shapes are painted by stretching
//! a one-pixel image, and everything that needs anti-aliased curves (charts, icons) is
//! rasterised separately and embedded as a [`Picture`].

use image::{DynamicImage, RgbImage};

use genpdf::elements::{Image, Paragraph};
use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Context, Element, Margins, Mm, Position, RenderResult, Size};

use crate::palette::{neutral, Rgb};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn natural_size_mm(image: &RgbImage) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    (
        MM_PER_INCH * f64::from(px_width) / DEFAULT_IMAGE_DPI,
        MM_PER_INCH * f64::from(px_height) / DEFAULT_IMAGE_DPI,
    )
}

/// Converts the image into a `genpdf` image stretched to `width_mm` × `height_mm`.
fn sized_image(image: RgbImage, width_mm: f64, height_mm: f64) -> Result<Image, Error> {
    let (natural_width, natural_height) = natural_size_mm(&image);
    let mut pdf_image = Image::from_dynamic_image(DynamicImage::ImageRgb8(image))?;
    if natural_width > f64::EPSILON && natural_height > f64::EPSILON {
        pdf_image.set_scale(genpdf::Scale::new(
            width_mm / natural_width,
            height_mm / natural_height,
        ));
    }
    Ok(pdf_image)
}

/// Width of the area in millimetres.
pub fn area_width(area: &render::Area<'_>) -> f64 {
    mm_to_f64(area.size().width)
}

/// Height of the area in millimetres.
pub fn area_height(area: &render::Area<'_>) -> f64 {
    mm_to_f64(area.size().height)
}

/// Returns a copy of `area` moved by (`x`, `y`) and optionally narrowed or shortened.
pub fn sub_area<'p>(
    area: &render::Area<'p>,
    x: f64,
    y: f64,
    width: Option<f64>,
    height: Option<f64>,
) -> render::Area<'p> {
    let mut sub = area.clone();
    sub.add_offset(Position::new(mm_from_f64(x), mm_from_f64(y)));
    if let Some(width) = width {
        sub.set_width(mm_from_f64(width.max(0.0)));
    }
    if let Some(height) = height {
        sub.set_height(mm_from_f64(height.max(0.0)));
    }
    sub
}

/// Style of a hairline stroke; `genpdf` draws every line at the default width.
pub fn line_style(color: Rgb) -> Style {
    Style::new().with_color(Color::from(color))
}

/// Paints a solid rectangle with its top-left corner at (`x`, `y`) inside `area`.
pub fn fill_rect(
    context: &Context,
    area: &render::Area<'_>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Rgb,
) -> Result<(), Error> {
    if width <= 0.0 || height <= 0.0 {
        return Ok(());
    }
    let swatch = RgbImage::from_pixel(1, 1, color.to_pixel());
    let mut image = sized_image(swatch, width, height)?;
    image.render(context, sub_area(area, x, y, None, None), Style::new())?;
    Ok(())
}

/// Strokes the outline of a rectangle with a hairline.
pub fn stroke_rect(area: &render::Area<'_>, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
    let corners = [
        (x, y),
        (x + width, y),
        (x + width, y + height),
        (x, y + height),
        (x, y),
    ];
    area.draw_line(
        corners
            .iter()
            .map(|&(px, py)| Position::new(mm_from_f64(px), mm_from_f64(py)))
            .collect::<Vec<_>>(),
        line_style(color),
    );
}

/// Draws a hairline between two points.
pub fn stroke_line(area: &render::Area<'_>, from: (f64, f64), to: (f64, f64), color: Rgb) {
    area.draw_line(
        vec![
            Position::new(mm_from_f64(from.0), mm_from_f64(from.1)),
            Position::new(mm_from_f64(to.0), mm_from_f64(to.1)),
        ],
        line_style(color),
    );
}

/// Text style shorthand used by the report widgets.
pub fn text_style(size: u8, bold: bool, color: Rgb) -> Style {
    let mut style = Style::new().with_font_size(size).with_color(Color::from(color));
    if bold {
        style = style.bold();
    }
    style
}

/// A paragraph of `text` in a single style.
pub fn paragraph(text: impl Into<String>, style: Style, alignment: Alignment) -> Paragraph {
    let mut paragraph = Paragraph::new(StyledString::new(text.into(), style));
    paragraph.set_alignment(alignment);
    paragraph
}

/// Width of `text` in millimetres when set in `style`.
pub fn text_width(context: &Context, text: &str, style: Style) -> f64 {
    mm_to_f64(StyledString::new(text.to_string(), style).width(&context.font_cache))
}

/// Height of one line of `style` in millimetres.
pub fn line_height(context: &Context, style: Style) -> f64 {
    mm_to_f64(style.line_height(&context.font_cache))
}

/// Prints `text` with its top edge at (`x`, `y`) inside a box `width` wide.
pub fn print_text(
    context: &Context,
    area: &render::Area<'_>,
    x: f64,
    y: f64,
    width: f64,
    text: &str,
    style: Style,
    alignment: Alignment,
) -> Result<RenderResult, Error> {
    let mut element = paragraph(text, style, alignment);
    element.render(context, sub_area(area, x, y, Some(width), None), style)
}

/// Largest font size not above `size` (and not below `min`) at which `text` fits `width`.
pub fn fit_font_size(context: &Context, text: &str, style: Style, size: u8, min: u8, width: f64) -> u8 {
    let mut current = size;
    while current > min && text_width(context, text, style.with_font_size(current)) > width {
        current -= 1;
    }
    current
}

/// A raster image printed at a fixed size, optionally outlined.
pub struct Picture {
    image: Option<RgbImage>,
    width_mm: f64,
    height_mm: f64,
    alignment: Alignment,
    border: Option<Rgb>,
}

impl Picture {
    pub fn new(image: RgbImage, width_mm: f64, height_mm: f64) -> Self {
        Self {
            image: Some(image),
            width_mm,
            height_mm,
            alignment: Alignment::Left,
            border: None,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_border(mut self, border: impl Into<Option<Rgb>>) -> Self {
        self.border = border.into();
        self
    }
}

impl Element for Picture {
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

        let x = match self.alignment {
            Alignment::Left => 0.0,
            Alignment::Center => ((area_width(&area) - self.width_mm) / 2.0).max(0.0),
            Alignment::Right => (area_width(&area) - self.width_mm).max(0.0),
        };

        if let Some(image) = self.image.take() {
            let mut pdf_image = sized_image(image, self.width_mm, self.height_mm)?;
            pdf_image.render(context, sub_area(&area, x, 0.0, None, None), style)?;
        }
        if let Some(border) = self.border {
            stroke_rect(&area, x, 0.0, self.width_mm, self.height_mm, border);
        }

        result.size = Size::new(area.size().width, mm_from_f64(self.height_mm));
        Ok(result)
    }
}

/// An element whose concrete type is picked at runtime.
pub struct BoxedElement(Box<dyn Element>);

impl BoxedElement {
    pub fn new<E: Element + 'static>(element: E) -> Self {
        Self(Box::new(element))
    }
}

impl Element for BoxedElement {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.0.render(context, area, style)
    }
}

/// Fixed vertical gap.
pub struct Spacer {
    height_mm: f64,
}

impl Spacer {
    pub fn new(height_mm: f64) -> Self {
        Self { height_mm }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let height = self.height_mm.min(area_height(&area)).max(0.0);
        result.size = Size::new(Mm::default(), mm_from_f64(height));
        Ok(result)
    }
}

/// Horizontal coloured bar across the full width, painted as a fill.
pub struct Rule {
    color: Rgb,
    thickness_mm: f64,
}

impl Rule {
    pub fn new(color: Rgb, thickness_mm: f64) -> Self {
        Self {
            color,
            thickness_mm,
        }
    }
}

impl Element for Rule {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.thickness_mm > area_height(&area) {
            result.has_more = true;
            return Ok(result);
        }
        fill_rect(context, &area, 0.0, 0.0, area_width(&area), self.thickness_mm, self.color)?;
        result.size = Size::new(area.size().width, mm_from_f64(self.thickness_mm));
        Ok(result)
    }
}

/// Box decorations of a [`Frame`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStyle {
    pub background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub accent: Option<Rgb>,
    pub padding_mm: f64,
    pub height_mm: Option<f64>,
    pub title: Option<(String, Rgb)>,
}

const TITLE_FONT_SIZE: u8 = 9;
const TITLE_PADDING_MM: f64 = 2.2;
const ACCENT_WIDTH_MM: f64 = 1.4;

/// Container that pads its content and paints fill, border, accent bar and title bar.
///
/// A fill is only painted for fixed-height frames; content that does not fit a fixed-height
/// frame is clipped.
pub struct Frame {
    content: Box<dyn Element>,
    style: FrameStyle,
}

impl Frame {
    pub fn new<E: Element + 'static>(content: E, style: FrameStyle) -> Self {
        Self {
            content: Box::new(content),
            style,
        }
    }
}

impl Element for Frame {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let width = area_width(&area);
        let available = area_height(&area);
        let fixed = self.style.height_mm;
        if let Some(height) = fixed {
            if height > available + 1e-6 {
                result.has_more = true;
                return Ok(result);
            }
        }

        if let (Some(background), Some(height)) = (self.style.background, fixed) {
            fill_rect(context, &area, 0.0, 0.0, width, height, background)?;
        }

        let mut top = 0.0;
        if let Some((title, color)) = &self.style.title {
            let title_style = text_style(TITLE_FONT_SIZE, true, neutral::WHITE);
            let bar = line_height(context, title_style) + 2.0 * TITLE_PADDING_MM;
            fill_rect(context, &area, 0.0, 0.0, width, bar, *color)?;
            print_text(
                context,
                &area,
                TITLE_PADDING_MM * 1.6,
                TITLE_PADDING_MM,
                width - 3.2 * TITLE_PADDING_MM,
                &title.to_uppercase(),
                title_style,
                Alignment::Left,
            )?;
            top = bar;
        }

        let inset = if self.style.accent.is_some() { ACCENT_WIDTH_MM } else { 0.0 };
        let padding = self.style.padding_mm;
        let mut content_area = sub_area(&area, inset, top, None, None);
        content_area.add_margins(Margins::trbl(
            mm_from_f64(padding),
            mm_from_f64(padding),
            mm_from_f64(padding),
            mm_from_f64(padding),
        ));
        if let Some(height) = fixed {
            content_area.set_height(mm_from_f64((height - top - 2.0 * padding).max(0.0)));
        }

        let inner = self.content.render(context, content_area, style)?;
        let height = match fixed {
            Some(height) => height,
            None => {
                result.has_more = inner.has_more;
                (top + mm_to_f64(inner.size.height) + 2.0 * padding).min(available)
            }
        };

        if let Some(border) = self.style.border {
            stroke_rect(&area, 0.0, 0.0, width, height, border);
        }
        if let Some(accent) = self.style.accent {
            fill_rect(context, &area, 0.0, 0.0, ACCENT_WIDTH_MM, height, accent)?;
        }

        result.size = Size::new(area.size().width, mm_from_f64(height));
        Ok(result)
    }
}

/// Side-by-side columns sized by weight with a fixed gap between them.
pub struct Row {
    columns: Vec<(usize, Box<dyn Element>)>,
    gap_mm: f64,
}

impl Row {
    pub fn new(gap_mm: f64) -> Self {
        Self {
            columns: Vec::new(),
            gap_mm,
        }
    }

    pub fn push<E: Element + 'static>(&mut self, weight: usize, element: E) {
        self.columns.push((weight.max(1), Box::new(element)));
    }

    /// Left offset and width of every column inside `width`.
    pub fn column_spans(weights: &[usize], width: f64, gap: f64) -> Vec<(f64, f64)> {
        let total: usize = weights.iter().sum();
        if total == 0 {
            return Vec::new();
        }
        let usable = (width - gap * (weights.len().saturating_sub(1)) as f64).max(0.0);
        let mut x = 0.0;
        weights
            .iter()
            .map(|weight| {
                let span = usable * *weight as f64 / total as f64;
                let column = (x, span);
                x += span + gap;
                column
            })
            .collect()
    }
}

impl Element for Row {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let weights: Vec<usize> = self.columns.iter().map(|(weight, _)| *weight).collect();
        let spans = Self::column_spans(&weights, area_width(&area), self.gap_mm);
        let mut height: f64 = 0.0;
        for ((_, element), (x, width)) in self.columns.iter_mut().zip(spans) {
            let column = element.render(context, sub_area(&area, x, 0.0, Some(width), None), style)?;
            height = height.max(mm_to_f64(column.size.height));
            result.has_more |= column.has_more;
        }
        result.size = Size::new(area.size().width, mm_from_f64(height));
        Ok(result)
    }
}

/// A small picture followed by one or more single-line texts, vertically centred.
pub struct IconText {
    icon: Option<RgbImage>,
    icon_mm: f64,
    icon_border: Option<Rgb>,
    gap_mm: f64,
    lines: Vec<(String, Style)>,
    spacing_mm: f64,
}

impl IconText {
    pub fn new(icon: Option<RgbImage>, icon_mm: f64) -> Self {
        Self {
            icon,
            icon_mm,
            icon_border: None,
            gap_mm: 2.0,
            lines: Vec::new(),
            spacing_mm: 0.4,
        }
    }

    pub fn with_line(mut self, text: impl Into<String>, style: Style) -> Self {
        self.lines.push((text.into(), style));
        self
    }

    pub fn with_gap(mut self, gap_mm: f64) -> Self {
        self.gap_mm = gap_mm;
        self
    }

    pub fn with_icon_border(mut self, border: impl Into<Option<Rgb>>) -> Self {
        self.icon_border = border.into();
        self
    }
}

impl Element for IconText {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let heights: Vec<f64> = self
            .lines
            .iter()
            .map(|(_, line_style)| line_height(context, style.and(*line_style)))
            .collect();
        let text_height = heights.iter().sum::<f64>()
            + self.spacing_mm * heights.len().saturating_sub(1) as f64;
        let icon_mm = if self.icon.is_some() { self.icon_mm } else { 0.0 };
        let height = text_height.max(icon_mm);
        if height > area_height(&area) + 1e-6 {
            result.has_more = true;
            return Ok(result);
        }

        let text_x = if let Some(icon) = self.icon.take() {
            let mut picture = Picture::new(icon, icon_mm, icon_mm).with_border(self.icon_border);
            picture.render(context, sub_area(&area, 0.0, (height - icon_mm) / 2.0, None, None), style)?;
            icon_mm + self.gap_mm
        } else {
            0.0
        };

        let width = area_width(&area) - text_x;
        let mut y = (height - text_height) / 2.0;
        for ((text, line_style), line) in self.lines.iter().zip(heights) {
            print_text(context, &area, text_x, y, width, text, *line_style, Alignment::Left)?;
            y += line + self.spacing_mm;
        }

        result.size = Size::new(area.size().width, mm_from_f64(height));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetre_round_trip() {
        assert!((mm_to_f64(mm_from_f64(12.5)) - 12.5).abs() < 1e-9);
    }

    #[test]
    fn line_style_carries_the_stroke_colour() {
        let style = line_style(neutral::GRAY_200);
        assert_eq!(style.color(), Some(Color::from(neutral::GRAY_200)));
        assert!(!style.is_bold());
    }

    #[test]
    fn column_spans_share_width_after_gaps() {
        let spans = Row::column_spans(&[2, 1], 100.0, 4.0);
        assert_eq!(spans.len(), 2);
        assert!((spans[0].0 - 0.0).abs() < 1e-9);
        assert!((spans[0].1 - 64.0).abs() < 1e-9);
        assert!((spans[1].0 - 68.0).abs() < 1e-9);
        assert!((spans[1].1 - 32.0).abs() < 1e-9);
    }

    #[test]
    fn column_spans_of_nothing_are_empty() {
        assert!(Row::column_spans(&[], 100.0, 4.0).is_empty());
    }

    #[test]
    fn natural_size_uses_print_resolution() {
        let image = RgbImage::new(300, 600);
        let (w, h) = natural_size_mm(&image);
        assert!((w - 25.4).abs() < 1e-9);
        assert!((h - 50.8).abs() < 1e-9);
    }
}
