//! Data structures describing the logical content of the report.
//!
//! A [`Page`] is a list of [`Block`]s plus the frame metadata (page number and footer
//! citations).  The types carry no `genpdf` values so page compositions can be built, listed
//! and tested without fonts; [`crate::render`] turns them into elements once fonts and assets
//! have been resolved.

use crate::charts::icons::Icon;
use crate::charts::Chart;
use crate::palette::{neutral, Rgb, Sector};

/// Values longer than this many characters are printed in the smaller stat tile size.
pub const STAT_VALUE_MAX_LARGE_CHARS: usize = 8;

/// Horizontal alignment of text and images, mapped to [`genpdf::Alignment`] on render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Splits a footer citation string into display lines.
///
/// Segments are separated by commas or newlines, trimmed, and empty segments are dropped.
/// Zero-width spaces picked up from copy-pasted source lists count as whitespace.
pub fn citation_lines(text: &str) -> Vec<String> {
    text.split(|c| c == ',' || c == '\n')
        .map(|segment| segment.trim_matches(|c: char| c.is_whitespace() || c == '\u{200b}'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// What a page is about; the cover carries no sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Sector(Sector),
}

/// One fixed-size page of the report.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    kind: PageKind,
    title: String,
    number: Option<u32>,
    footer: Option<String>,
    blocks: Vec<Block>,
}

impl Page {
    pub fn new(kind: PageKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            number: None,
            footer: None,
            blocks: Vec::new(),
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Title used for listings and the document outline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Printed page number; `None` for unnumbered pages such as the cover.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Raw footer citation text, as declared by the page.
    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Footer citation lines in display order.
    pub fn citation_lines(&self) -> Vec<String> {
        self.footer.as_deref().map(citation_lines).unwrap_or_default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn with_number(mut self, number: impl Into<Option<u32>>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// All chart descriptions on the page, depth first.
    pub fn charts(&self) -> Vec<&Chart> {
        let mut charts = Vec::new();
        for block in &self.blocks {
            block.collect_charts(&mut charts);
        }
        charts
    }

    /// All stat tiles on the page, depth first.
    pub fn stat_tiles(&self) -> Vec<&StatTile> {
        let mut tiles = Vec::new();
        for block in &self.blocks {
            block.collect_tiles(&mut tiles);
        }
        tiles
    }

    /// All image asset paths referenced by the page, depth first.
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths = Vec::new();
        for block in &self.blocks {
            block.collect_images(&mut paths);
        }
        paths
    }
}

/// Picture shown in a header or stat tile: an image asset, or a drawn icon.
#[derive(Clone, Debug, PartialEq)]
pub enum Emblem {
    Icon(Icon),
    /// Image asset; `fallback` is drawn when the asset cannot be loaded.
    Image { path: String, fallback: Icon },
}

impl Emblem {
    pub fn image(path: impl Into<String>, fallback: Icon) -> Self {
        Self::Image {
            path: path.into(),
            fallback,
        }
    }
}

/// Page header: emblem, upper-case title, coloured subtitle and a coloured rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub emblem: Emblem,
    pub color: Rgb,
}

impl Header {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, emblem: Emblem, color: Rgb) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            emblem,
            color,
        }
    }
}

/// Printed size of a stat tile value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueSize {
    Large,
    Small,
}

/// Headline figure with a label, sub-label and emblem.
#[derive(Clone, Debug, PartialEq)]
pub struct StatTile {
    pub label: String,
    pub value: String,
    pub sub: String,
    pub emblem: Emblem,
    pub color: Rgb,
}

impl StatTile {
    pub fn new(label: impl Into<String>, value: impl Into<String>, sub: impl Into<String>, icon: Icon) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            sub: sub.into(),
            emblem: Emblem::Icon(icon),
            color: neutral::GRAY_800,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_emblem(mut self, emblem: Emblem) -> Self {
        self.emblem = emblem;
        self
    }

    /// Long values drop to the smaller size; the value is never parsed.
    pub fn value_size(&self) -> ValueSize {
        if self.value.chars().count() > STAT_VALUE_MAX_LARGE_CHARS {
            ValueSize::Small
        } else {
            ValueSize::Large
        }
    }
}

/// Grid of stat tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct StatGrid {
    pub tiles: Vec<StatTile>,
    pub columns: usize,
    pub tile_height_mm: f64,
}

impl StatGrid {
    pub fn new(columns: usize) -> Self {
        Self {
            tiles: Vec::new(),
            columns: columns.max(1),
            tile_height_mm: 22.0,
        }
    }

    pub fn with_tile(mut self, tile: StatTile) -> Self {
        self.tiles.push(tile);
        self
    }

    pub fn with_tile_height(mut self, height_mm: f64) -> Self {
        self.tile_height_mm = height_mm;
        self
    }
}

/// Titled container with a filled title bar and a border in the accent colour.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBox {
    pub title: String,
    pub color: Rgb,
    pub blocks: Vec<Block>,
    pub height_mm: Option<f64>,
}

impl SectionBox {
    pub fn new(title: impl Into<String>, color: Rgb) -> Self {
        Self {
            title: title.into(),
            color,
            blocks: Vec::new(),
            height_mm: None,
        }
    }

    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }

    /// Fixes the outer height; content beyond it is clipped.
    pub fn with_height(mut self, height_mm: f64) -> Self {
        self.height_mm = Some(height_mm);
        self
    }
}

/// Untitled container with optional fill, border and left accent bar.
///
/// A background is only painted when the height is fixed, since the fill has to be laid down
/// before the content.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub background: Option<Rgb>,
    pub border: Option<Rgb>,
    pub accent: Option<Rgb>,
    pub padding_mm: f64,
    pub height_mm: Option<f64>,
    pub blocks: Vec<Block>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            background: None,
            border: None,
            accent: None,
            padding_mm: 4.0,
            height_mm: None,
            blocks: Vec::new(),
        }
    }
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the panel with `color`; requires a fixed height.
    pub fn filled(color: Rgb, height_mm: f64) -> Self {
        Self {
            background: Some(color),
            height_mm: Some(height_mm),
            ..Self::default()
        }
    }

    pub fn with_border(mut self, color: Rgb) -> Self {
        self.border = Some(color);
        self
    }

    pub fn with_accent(mut self, color: Rgb) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn with_padding(mut self, padding_mm: f64) -> Self {
        self.padding_mm = padding_mm;
        self
    }

    pub fn with_height(mut self, height_mm: f64) -> Self {
        self.height_mm = Some(height_mm);
        self
    }

    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }
}

/// Accent-coloured heading above a free-standing chart, with an optional series legend.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionLabel {
    pub text: String,
    pub color: Rgb,
    pub icon: Option<Icon>,
    pub legend: Vec<(String, Rgb)>,
}

impl SectionLabel {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
            icon: None,
            legend: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_legend_entry(mut self, name: impl Into<String>, color: Rgb) -> Self {
        self.legend.push((name.into(), color));
        self
    }
}

/// Highlighted statement: icon and title, body text and optional headline figures.
#[derive(Clone, Debug, PartialEq)]
pub struct Callout {
    pub icon: Option<Icon>,
    pub title: String,
    pub title_color: Rgb,
    pub title_size: u8,
    pub text: String,
    pub text_color: Rgb,
    pub text_size: u8,
    pub figures: Vec<(String, String)>,
    pub figure_color: Rgb,
}

impl Callout {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: None,
            title: title.into(),
            title_color: neutral::GRAY_900,
            title_size: 11,
            text: text.into(),
            text_color: neutral::GRAY_700,
            text_size: 7,
            figures: Vec::new(),
            figure_color: neutral::WHITE,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_title_style(mut self, color: Rgb, size: u8) -> Self {
        self.title_color = color;
        self.title_size = size;
        self
    }

    pub fn with_text_style(mut self, color: Rgb, size: u8) -> Self {
        self.text_color = color;
        self.text_size = size;
        self
    }

    pub fn with_figure(mut self, value: impl Into<String>, caption: impl Into<String>) -> Self {
        self.figures.push((value.into(), caption.into()));
        self
    }

    pub fn with_figure_color(mut self, color: Rgb) -> Self {
        self.figure_color = color;
        self
    }
}

/// Icon, label and value rows.
#[derive(Clone, Debug, PartialEq)]
pub struct FactList {
    pub rows: Vec<FactRow>,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FactRow {
    pub icon: Icon,
    pub label: String,
    pub value: String,
}

impl FactList {
    pub fn new(color: Rgb) -> Self {
        Self {
            rows: Vec::new(),
            color,
        }
    }

    pub fn with_row(mut self, icon: Icon, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(FactRow {
            icon,
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

/// Dot-marked list laid out in columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullets {
    pub items: Vec<String>,
    pub columns: usize,
    pub marker: Rgb,
}

impl Bullets {
    pub fn new<I, S>(items: I, columns: usize, marker: Rgb) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            columns: columns.max(1),
            marker,
        }
    }
}

/// Paragraph of single-style text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub size: u8,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    pub color: Rgb,
    pub alignment: HorizontalAlignment,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 9,
            bold: false,
            italic: false,
            uppercase: false,
            color: neutral::GRAY_700,
            alignment: HorizontalAlignment::Left,
        }
    }

    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Text as printed, after case conversion.
    pub fn display_text(&self) -> String {
        if self.uppercase {
            self.text.to_uppercase()
        } else {
            self.text.clone()
        }
    }
}

/// How an image fills its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFit {
    /// Scale to cover the box and crop the overflow.
    Cover,
    /// Scale to fit inside the box, keeping the whole image.
    Contain,
}

/// External image asset with alt text.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    pub path: String,
    pub alt: String,
    pub fit: ImageFit,
    pub height_mm: f64,
    pub border: Option<Rgb>,
}

impl ImageBlock {
    pub fn new(path: impl Into<String>, alt: impl Into<String>, height_mm: f64) -> Self {
        Self {
            path: path.into(),
            alt: alt.into(),
            fit: ImageFit::Cover,
            height_mm,
            border: None,
        }
    }

    pub fn contain(mut self) -> Self {
        self.fit = ImageFit::Contain;
        self
    }

    pub fn with_border(mut self, color: Rgb) -> Self {
        self.border = Some(color);
        self
    }
}

/// Images side by side, wrapping into rows of `columns`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRow {
    pub images: Vec<ImageBlock>,
    pub columns: usize,
}

impl ImageRow {
    pub fn new(columns: usize) -> Self {
        Self {
            images: Vec::new(),
            columns: columns.max(1),
        }
    }

    pub fn with_image(mut self, image: ImageBlock) -> Self {
        self.images.push(image);
        self
    }
}

/// Weighted side-by-side columns, each a vertical list of blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct Columns {
    pub columns: Vec<Column>,
    pub gap_mm: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub weight: usize,
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn new(weight: usize) -> Self {
        Self {
            weight: weight.max(1),
            blocks: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: impl Into<Block>) -> Self {
        self.blocks.push(block.into());
        self
    }
}

impl Columns {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            gap_mm: 5.0,
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_gap(mut self, gap_mm: f64) -> Self {
        self.gap_mm = gap_mm;
        self
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal coloured rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rule {
    pub color: Rgb,
    pub thickness_mm: f64,
}

/// Individual content blocks that make up a page.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Header(Header),
    StatGrid(StatGrid),
    SectionBox(SectionBox),
    Panel(Panel),
    SectionLabel(SectionLabel),
    Chart(Chart),
    Callout(Callout),
    FactList(FactList),
    Bullets(Bullets),
    Text(TextBlock),
    Image(ImageBlock),
    ImageRow(ImageRow),
    Columns(Columns),
    Rule(Rule),
    /// Vertical gap in millimetres.
    Spacer(f64),
}

impl Block {
    pub fn spacer(height_mm: f64) -> Self {
        Self::Spacer(height_mm)
    }

    pub fn rule(color: Rgb, thickness_mm: f64) -> Self {
        Self::Rule(Rule {
            color,
            thickness_mm,
        })
    }

    fn children(&self) -> Vec<&Block> {
        match self {
            Block::SectionBox(section) => section.blocks.iter().collect(),
            Block::Panel(panel) => panel.blocks.iter().collect(),
            Block::Columns(columns) => columns
                .columns
                .iter()
                .flat_map(|column| column.blocks.iter())
                .collect(),
            _ => Vec::new(),
        }
    }

    fn collect_charts<'a>(&'a self, out: &mut Vec<&'a Chart>) {
        if let Block::Chart(chart) = self {
            out.push(chart);
        }
        for child in self.children() {
            child.collect_charts(out);
        }
    }

    fn collect_tiles<'a>(&'a self, out: &mut Vec<&'a StatTile>) {
        if let Block::StatGrid(grid) = self {
            out.extend(grid.tiles.iter());
        }
        for child in self.children() {
            child.collect_tiles(out);
        }
    }

    fn collect_images<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Block::Image(image) => out.push(&image.path),
            Block::ImageRow(row) => out.extend(row.images.iter().map(|image| image.path.as_str())),
            Block::Header(Header {
                emblem: Emblem::Image { path, .. },
                ..
            }) => out.push(path),
            Block::StatGrid(grid) => {
                for tile in &grid.tiles {
                    if let Emblem::Image { path, .. } = &tile.emblem {
                        out.push(path);
                    }
                }
            }
            _ => {}
        }
        for child in self.children() {
            child.collect_images(out);
        }
    }
}

macro_rules! impl_into_block {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Block {
                fn from(value: $variant) -> Self {
                    Block::$variant(value)
                }
            }
        )*
    };
}

impl_into_block!(
    Header,
    StatGrid,
    SectionBox,
    Panel,
    SectionLabel,
    Chart,
    Callout,
    FactList,
    Bullets,
    Columns,
    Rule,
    ImageRow,
);

impl From<TextBlock> for Block {
    fn from(value: TextBlock) -> Self {
        Block::Text(value)
    }
}

impl From<ImageBlock> for Block {
    fn from(value: ImageBlock) -> Self {
        Block::Image(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(value: &str) -> StatTile {
        StatTile::new("Label", value, "Sub", Icon::Leaf)
    }

    #[test]
    fn stat_value_size_switches_after_eight_characters() {
        assert_eq!(tile("1234567").value_size(), ValueSize::Large);
        assert_eq!(tile("12345678").value_size(), ValueSize::Large);
        assert_eq!(tile("123456789").value_size(), ValueSize::Small);
        assert_eq!(tile("3rd").value_size(), ValueSize::Large);
        assert_eq!(tile("~$1.45 - 1.55").value_size(), ValueSize::Small);
    }

    #[test]
    fn stat_value_size_counts_characters_not_bytes() {
        // "~65–70%" is seven characters but nine bytes.
        assert_eq!(tile("~65\u{2013}70%").value_size(), ValueSize::Large);
    }

    #[test]
    fn citations_split_on_commas_and_newlines() {
        assert_eq!(
            citation_lines("CBSL Annual Report 2025, Sri Lanka Tea Board"),
            vec!["CBSL Annual Report 2025", "Sri Lanka Tea Board"]
        );
        assert_eq!(
            citation_lines("Sri Lanka Cashew Corporation (SLCC)\n        ,www.plantation.gov.lk\n        ,www.doa.gov.lk"),
            vec!["Sri Lanka Cashew Corporation (SLCC)", "www.plantation.gov.lk", "www.doa.gov.lk"]
        );
    }

    #[test]
    fn citations_drop_empty_segments() {
        assert!(citation_lines("").is_empty());
        assert!(citation_lines(" ,\n, ").is_empty());
        assert_eq!(citation_lines("a,,b"), vec!["a", "b"]);
        assert_eq!(citation_lines("\u{200b}Coconut Development Authority"), vec!["Coconut Development Authority"]);
    }

    #[test]
    fn page_without_footer_has_no_citations() {
        let page = Page::new(PageKind::Cover, "Cover");
        assert!(page.citation_lines().is_empty());
        assert_eq!(page.number(), None);
    }

    #[test]
    fn nested_blocks_are_collected() {
        let page = Page::new(PageKind::Sector(Sector::Tea), "Tea").with_block(
            Columns::new()
                .with_column(Column::new(1).with_block(StatGrid::new(1).with_tile(tile("3rd"))))
                .with_column(
                    Column::new(1).with_block(
                        SectionBox::new("Map", neutral::GRAY_800)
                            .with_block(ImageBlock::new("map.png", "Map", 40.0)),
                    ),
                ),
        );
        assert_eq!(page.stat_tiles().len(), 1);
        assert_eq!(page.image_paths(), vec!["map.png"]);
    }
}
