//! Page compositions: the cover and one page per plantation sector.
//!
//! Each builder wires its data tables and palette into model blocks.  The builders only
//! describe the pages; nothing here touches fonts or assets.

pub mod cashew;
pub mod coconut;
pub mod cover;
pub mod rubber;
pub mod sugarcane;
pub mod tea;

use crate::charts::icons::Icon;
use crate::charts::{Chart, DonutChart, LegendLayout};
use crate::data::{Share, YearValue};
use crate::model::{Emblem, Header, ImageBlock, ImageRow, SectionBox};
use crate::palette::{Rgb, Sector};

/// Title written to the PDF metadata.
pub const REPORT_TITLE: &str = "Sri Lanka's Plantation Sectors";

/// All report pages in print order.
pub fn standard_pages() -> Vec<crate::model::Page> {
    vec![
        cover::page(),
        tea::page(),
        coconut::page(),
        rubber::page(),
        sugarcane::page(),
        cashew::page(),
    ]
}

/// Sector page header with an image emblem and a drawn fallback.
pub(crate) fn sector_header(sector: Sector, subtitle: &str, image: &str, fallback: Icon) -> Header {
    Header::new(
        format!("{} Sector", sector.name()),
        subtitle,
        Emblem::image(image, fallback),
        sector.palette().primary,
    )
}

/// Section box holding a single donut chart with a percentage list legend.
pub(crate) fn donut_box(
    title: &str,
    shares: &[Share],
    sector: Sector,
    width_mm: f64,
    height_mm: f64,
) -> SectionBox {
    let donut = DonutChart::new(shares, sector.palette().categorical)
        .with_radii(45.0, 70.0)
        .with_padding(2.0)
        .with_legend(LegendLayout::List);
    SectionBox::new(title, sector.palette().primary).with_block(Chart::donut(donut, width_mm, height_mm))
}

/// Section box holding a single image asset.
pub(crate) fn image_box(title: &str, image: ImageBlock, color: Rgb) -> SectionBox {
    SectionBox::new(title, color).with_block(image)
}

/// Row of photographs with their alt texts.
pub(crate) fn photo_row(columns: usize, height_mm: f64, photos: &[(&str, &str)]) -> ImageRow {
    photos.iter().fold(ImageRow::new(columns), |row, (path, alt)| {
        row.with_image(ImageBlock::new(*path, *alt, height_mm))
    })
}

pub(crate) fn years(rows: &[YearValue]) -> Vec<&'static str> {
    rows.iter().map(|row| row.year).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;
    use crate::model::PageKind;

    #[test]
    fn pages_follow_print_order() {
        let kinds: Vec<PageKind> = standard_pages().iter().map(|page| page.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                PageKind::Cover,
                PageKind::Sector(Sector::Tea),
                PageKind::Sector(Sector::Coconut),
                PageKind::Sector(Sector::Rubber),
                PageKind::Sector(Sector::Sugarcane),
                PageKind::Sector(Sector::Cashew),
            ]
        );
    }

    #[test]
    fn sector_pages_are_numbered_one_to_five() {
        let numbers: Vec<Option<u32>> = standard_pages().iter().map(|page| page.number()).collect();
        assert_eq!(numbers, vec![None, Some(1), Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn footers_are_kept_verbatim() {
        let footers: Vec<Option<String>> = standard_pages()
            .iter()
            .map(|page| page.footer().map(str::to_string))
            .collect();
        assert_eq!(
            footers,
            vec![
                None,
                Some(crate::data::tea::SOURCES.to_string()),
                Some(crate::data::coconut::SOURCES.to_string()),
                Some(crate::data::rubber::SOURCES.to_string()),
                Some(crate::data::sugarcane::SOURCES.to_string()),
                Some(crate::data::cashew::SOURCES.to_string()),
            ]
        );
    }

    #[test]
    fn cashew_footer_has_three_citation_lines() {
        assert_eq!(
            cashew::page().citation_lines(),
            vec!["Sri Lanka Cashew Corporation (SLCC)", "www.plantation.gov.lk", "www.doa.gov.lk"]
        );
    }

    #[test]
    fn production_series_use_the_sector_bar_colour() {
        for page in standard_pages() {
            let PageKind::Sector(sector) = page.kind() else {
                continue;
            };
            let first = page.charts().into_iter().find_map(|chart| match &chart.kind {
                ChartKind::Category(category) => category.series.first().map(|series| series.color),
                _ => None,
            });
            assert_eq!(first, Some(sector.palette().bar), "{}", page.title());
        }
    }

    #[test]
    fn every_page_references_images() {
        for page in standard_pages() {
            assert!(!page.image_paths().is_empty(), "{} has no images", page.title());
        }
    }
}
