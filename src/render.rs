//! Conversion of the logical page model into `genpdf` elements.
//!
//! Every block is rendered against the colour of the surface it sits on, so rasterised charts,
//! inline glyphs and bullet markers blend into tinted panels.

use std::rc::Rc;

use genpdf::elements::LinearLayout;
use genpdf::Alignment;
use image::RgbImage;

use crate::assets::{fit_image, Assets};
use crate::charts::icons::{render_badge, render_glyph, render_tile, Icon};
use crate::charts::{ChartFonts, Scale};
use crate::elements::{
    paragraph, text_style, BoxedElement, Frame, FrameStyle, IconText, Row, Rule, Spacer,
};
use crate::frame::{FooterInfo, PageFrame};
use crate::model::{
    Block, Bullets, Callout, Columns, Emblem, FactList, Header, HorizontalAlignment, ImageFit,
    ImageRow, Page, Panel, SectionBox, SectionLabel, StatGrid, TextBlock,
};
use crate::palette::{neutral, Rgb};
use crate::widgets::{AssetImage, BulletItem, ChartImage, LabelRow, StatCard};

/// Vertical gap between top-level blocks of a page.
pub const PAGE_BLOCK_GAP_MM: f64 = 3.5;
/// Vertical gap between blocks inside boxes, panels and columns.
pub const INNER_BLOCK_GAP_MM: f64 = 2.5;

const HEADER_EMBLEM_MM: f64 = 17.0;
const HEADER_RULE_MM: f64 = 1.1;
const GLYPH_MM: f64 = 5.0;
const GRID_GAP_MM: f64 = 3.0;
const FACT_ROW_MM: f64 = 10.0;
const FACT_TINT: f64 = 0.08;

/// Shared resources needed to turn blocks into elements.
pub struct RenderEnv {
    pub assets: Assets,
    pub chart_fonts: Rc<ChartFonts>,
    pub scale: Scale,
}

impl RenderEnv {
    fn px(&self, mm: f64) -> u32 {
        self.scale.mm(mm).round().max(4.0) as u32
    }

    fn glyph(&self, icon: Icon, color: Rgb, surface: Rgb) -> RgbImage {
        render_glyph(icon, color, surface, self.px(GLYPH_MM))
    }

    /// Loads a square emblem, falling back to a drawn tile.
    fn emblem(&self, emblem: &Emblem, color: Rgb, size_mm: f64) -> (RgbImage, Option<Rgb>) {
        let size = self.px(size_mm);
        match emblem {
            Emblem::Image { path, fallback } => match self.assets.load(path) {
                Some(image) => (fit_image(&image, size, size, ImageFit::Cover), Some(color)),
                None => (render_tile(*fallback, neutral::WHITE, color, size), None),
            },
            Emblem::Icon(icon) => (render_tile(*icon, neutral::WHITE, color, size), None),
        }
    }
}

pub fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

/// Footer contents declared by `page`.
pub fn footer_info(page: &Page) -> FooterInfo {
    FooterInfo {
        number: page.number(),
        citations: page.citation_lines(),
    }
}

/// Builds the frame for one report page.
pub fn render_page(page: &Page, env: &RenderEnv) -> PageFrame {
    PageFrame::new(
        page.title(),
        render_blocks(page.blocks(), env, neutral::WHITE, PAGE_BLOCK_GAP_MM),
    )
}

/// Stacks `blocks` vertically with `gap_mm` between them.
pub fn render_blocks(blocks: &[Block], env: &RenderEnv, surface: Rgb, gap_mm: f64) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for (index, block) in blocks.iter().enumerate() {
        if index > 0 && !matches!(block, Block::Spacer(_)) {
            layout.push(Spacer::new(gap_mm));
        }
        layout.push(render_block(block, env, surface));
    }
    layout
}

/// Converts a single block into an element drawn on `surface`.
pub fn render_block(block: &Block, env: &RenderEnv, surface: Rgb) -> BoxedElement {
    match block {
        Block::Header(header) => BoxedElement::new(header_band(header, env)),
        Block::StatGrid(grid) => BoxedElement::new(stat_grid(grid, env)),
        Block::SectionBox(section) => BoxedElement::new(section_box(section, env)),
        Block::Panel(panel) => BoxedElement::new(panel_frame(panel, env, surface)),
        Block::SectionLabel(label) => BoxedElement::new(label_row(label, env, surface)),
        Block::Chart(chart) => BoxedElement::new(ChartImage::new(
            chart.clone(),
            Rc::clone(&env.chart_fonts),
            env.scale,
            surface,
        )),
        Block::Callout(callout) => BoxedElement::new(callout_layout(callout, env, surface)),
        Block::FactList(facts) => BoxedElement::new(fact_list(facts, env)),
        Block::Bullets(bullets) => BoxedElement::new(bullet_columns(bullets, env, surface)),
        Block::Text(text) => BoxedElement::new(text_paragraph(text)),
        Block::Image(image) => BoxedElement::new(AssetImage::new(
            env.assets.load(&image.path),
            image.clone(),
            env.scale,
        )),
        Block::ImageRow(row) => BoxedElement::new(image_rows(row, env)),
        Block::Columns(columns) => BoxedElement::new(column_row(columns, env, surface)),
        Block::Rule(rule) => BoxedElement::new(Rule::new(rule.color, rule.thickness_mm)),
        Block::Spacer(height) => BoxedElement::new(Spacer::new(*height)),
    }
}

fn header_band(header: &Header, env: &RenderEnv) -> LinearLayout {
    let (emblem, border) = env.emblem(&header.emblem, header.color, HEADER_EMBLEM_MM);
    let mut layout = LinearLayout::vertical();
    layout.push(
        IconText::new(Some(emblem), HEADER_EMBLEM_MM)
            .with_icon_border(border)
            .with_gap(4.0)
            .with_line(header.title.to_uppercase(), text_style(27, true, neutral::GRAY_800))
            .with_line(header.subtitle.to_uppercase(), text_style(10, true, header.color)),
    );
    layout.push(Spacer::new(2.0));
    layout.push(Rule::new(header.color, HEADER_RULE_MM));
    layout
}

fn stat_grid(grid: &StatGrid, env: &RenderEnv) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for (index, chunk) in grid.tiles.chunks(grid.columns).enumerate() {
        if index > 0 {
            layout.push(Spacer::new(GRID_GAP_MM));
        }
        let mut row = Row::new(GRID_GAP_MM);
        for tile in chunk {
            let badge = match &tile.emblem {
                Emblem::Icon(icon) => render_badge(*icon, tile.color, env.px(8.0)),
                emblem => env.emblem(emblem, tile.color, 8.0).0,
            };
            row.push(1, StatCard::new(tile.clone(), badge, grid.tile_height_mm));
        }
        for _ in chunk.len()..grid.columns {
            row.push(1, Spacer::new(grid.tile_height_mm));
        }
        layout.push(row);
    }
    layout
}

fn section_box(section: &SectionBox, env: &RenderEnv) -> Frame {
    Frame::new(
        render_blocks(&section.blocks, env, neutral::WHITE, INNER_BLOCK_GAP_MM),
        FrameStyle {
            border: Some(section.color),
            padding_mm: 3.0,
            height_mm: section.height_mm,
            title: Some((section.title.clone(), section.color)),
            ..FrameStyle::default()
        },
    )
}

fn panel_frame(panel: &Panel, env: &RenderEnv, surface: Rgb) -> Frame {
    let inner_surface = match (panel.background, panel.height_mm) {
        (Some(background), Some(_)) => background,
        _ => surface,
    };
    Frame::new(
        render_blocks(&panel.blocks, env, inner_surface, INNER_BLOCK_GAP_MM),
        FrameStyle {
            background: panel.background,
            border: panel.border,
            accent: panel.accent,
            padding_mm: panel.padding_mm,
            height_mm: panel.height_mm,
            title: None,
        },
    )
}

fn label_row(label: &SectionLabel, env: &RenderEnv, surface: Rgb) -> LabelRow {
    let glyph = label.icon.map(|icon| env.glyph(icon, label.color, surface));
    LabelRow::new(label.text.clone(), label.color, glyph).with_legend(label.legend.clone())
}

fn callout_layout(callout: &Callout, env: &RenderEnv, surface: Rgb) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    let glyph = callout
        .icon
        .map(|icon| env.glyph(icon, callout.title_color, surface));
    layout.push(IconText::new(glyph, GLYPH_MM).with_line(
        callout.title.clone(),
        text_style(callout.title_size, true, callout.title_color),
    ));
    layout.push(Spacer::new(1.5));
    layout.push(paragraph(
        callout.text.clone(),
        text_style(callout.text_size, false, callout.text_color),
        Alignment::Left,
    ));

    if !callout.figures.is_empty() {
        layout.push(Spacer::new(3.0));
        let mut row = Row::new(GRID_GAP_MM);
        for (value, caption) in &callout.figures {
            row.push(
                1,
                IconText::new(None, 0.0)
                    .with_line(value.clone(), text_style(15, true, callout.figure_color))
                    .with_line(caption.to_uppercase(), text_style(6, true, callout.text_color)),
            );
        }
        layout.push(row);
    }
    layout
}

fn fact_list(facts: &FactList, env: &RenderEnv) -> LinearLayout {
    let background = facts.color.tint(FACT_TINT);
    let mut layout = LinearLayout::vertical();
    for (index, row) in facts.rows.iter().enumerate() {
        if index > 0 {
            layout.push(Spacer::new(1.5));
        }
        let line = IconText::new(Some(env.glyph(row.icon, facts.color, background)), GLYPH_MM)
            .with_gap(2.5)
            .with_line(row.label.to_uppercase(), text_style(6, true, neutral::GRAY_500))
            .with_line(row.value.clone(), text_style(9, true, neutral::GRAY_800));
        layout.push(Frame::new(
            line,
            FrameStyle {
                background: Some(background),
                padding_mm: 2.0,
                height_mm: Some(FACT_ROW_MM),
                ..FrameStyle::default()
            },
        ));
    }
    layout
}

fn bullet_columns(bullets: &Bullets, env: &RenderEnv, surface: Rgb) -> Row {
    let mut columns: Vec<LinearLayout> = (0..bullets.columns).map(|_| LinearLayout::vertical()).collect();
    for (index, item) in bullets.items.iter().enumerate() {
        let column = &mut columns[index % bullets.columns];
        if index >= bullets.columns {
            column.push(Spacer::new(1.2));
        }
        column.push(BulletItem::new(item.clone(), bullets.marker, surface, env.scale));
    }
    let mut row = Row::new(GRID_GAP_MM);
    for column in columns {
        row.push(1, column);
    }
    row
}

fn text_paragraph(text: &TextBlock) -> genpdf::elements::Paragraph {
    let mut style = text_style(text.size, text.bold, text.color);
    if text.italic {
        style = style.italic();
    }
    paragraph(text.display_text(), style, alignment(text.alignment))
}

fn image_rows(row: &ImageRow, env: &RenderEnv) -> LinearLayout {
    let mut layout = LinearLayout::vertical();
    for (index, chunk) in row.images.chunks(row.columns).enumerate() {
        if index > 0 {
            layout.push(Spacer::new(GRID_GAP_MM));
        }
        let mut line = Row::new(GRID_GAP_MM);
        for image in chunk {
            line.push(
                1,
                AssetImage::new(env.assets.load(&image.path), image.clone(), env.scale),
            );
        }
        for _ in chunk.len()..row.columns {
            line.push(1, Spacer::new(0.0));
        }
        layout.push(line);
    }
    layout
}

fn column_row(columns: &Columns, env: &RenderEnv, surface: Rgb) -> Row {
    let mut row = Row::new(columns.gap_mm);
    for column in &columns.columns {
        row.push(
            column.weight,
            render_blocks(&column.blocks, env, surface, INNER_BLOCK_GAP_MM),
        );
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageKind;

    #[test]
    fn footer_info_carries_number_and_citations() {
        let page = Page::new(PageKind::Cover, "Tea")
            .with_number(1)
            .with_footer("CBSL Annual Report 2025, Sri Lanka Tea Board");
        let info = footer_info(&page);
        assert_eq!(info.number, Some(1));
        assert_eq!(info.citations, vec!["CBSL Annual Report 2025", "Sri Lanka Tea Board"]);
    }

    #[test]
    fn alignment_maps_one_to_one() {
        assert_eq!(alignment(HorizontalAlignment::Center), Alignment::Center);
        assert_eq!(alignment(HorizontalAlignment::Right), Alignment::Right);
    }
}
