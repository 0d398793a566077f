//! Page 2: coconut, food security and export.

use crate::charts::icons::Icon;
use crate::charts::{CategoryChart, Chart, DonutChart, LabelFormat, LegendLayout, Series};
use crate::data::coconut;
use crate::model::{
    Column, Columns, FactList, ImageBlock, Page, PageKind, Panel, SectionBox, SectionLabel,
    StatGrid, StatTile,
};
use crate::palette::{neutral, Sector};

use super::{image_box, photo_row, sector_header};

const SECTOR: Sector = Sector::Coconut;
const HIGHLIGHT_ICONS: [Icon; 4] = [Icon::Briefcase, Icon::Droplets, Icon::Leaf, Icon::Droplets];

pub fn page() -> Page {
    let palette = SECTOR.palette();

    let trend = CategoryChart::area(coconut::PRODUCTION.iter().map(|row| row.year))
        .with_series(
            Series::new(
                "Production (Million Nuts)",
                palette.bar,
                coconut::PRODUCTION.iter().map(|row| row.value).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Plain),
        )
        .with_domain(2500.0, 3600.0)
        .with_notes(coconut::PRODUCTION.iter().map(|row| row.status));

    let usage = DonutChart::new(&coconut::USAGE, palette.categorical)
        .with_radii(45.0, 65.0)
        .with_padding(2.0)
        .with_legend(LegendLayout::List);

    let highlights = coconut::EXPORT_HIGHLIGHTS
        .iter()
        .zip(HIGHLIGHT_ICONS)
        .fold(FactList::new(neutral::GREEN_700), |list, ((label, value), icon)| {
            list.with_row(icon, *label, *value)
        });

    let trend_panel = Panel::filled(neutral::BLUE_50, 90.0)
        .with_border(neutral::BLUE_200)
        .with_block(
            SectionLabel::new("Coconut Production Trend (2020\u{2013}2025)", neutral::BLUE_800)
                .with_icon(Icon::TrendingUp),
        )
        .with_block(Chart::category(trend, 140.0, 72.0));

    let tiles = StatGrid::new(1)
        .with_tile_height(28.0)
        .with_tile(
            StatTile::new("Total Production", "2.85 billion nuts", "(2025)", Icon::TrendingUp)
                .with_color(palette.primary),
        )
        .with_tile(
            StatTile::new("Export Income", "$1.23 Bn", "Value Added Products", Icon::Coins)
                .with_color(palette.primary),
        )
        .with_tile(
            StatTile::new("Local Consumption", "~65\u{2013}70%", "Of total production", Icon::Users)
                .with_color(palette.primary),
        );

    Page::new(PageKind::Sector(SECTOR), "Coconut Sector")
        .with_number(2)
        .with_footer(coconut::SOURCES)
        .with_block(sector_header(SECTOR, "Food Security & Export", "coconut-header.png", Icon::Leaf))
        .with_block(
            Columns::new()
                .with_column(Column::new(3).with_block(trend_panel))
                .with_column(Column::new(1).with_block(tiles)),
        )
        .with_block(
            Columns::new()
                .with_column(Column::new(1).with_block(
                    SectionBox::new("Coconut Product Usage (2025 Estimates)", palette.primary)
                        .with_block(Chart::donut(usage, 56.0, 70.0)),
                ))
                .with_column(Column::new(1).with_block(
                    SectionBox::new("Export Highlights", palette.primary).with_block(highlights),
                ))
                .with_column(Column::new(1).with_block(image_box(
                    "The Coconut Triangle",
                    ImageBlock::new("coconut triangle.png", "The Coconut Triangle", 70.0).contain(),
                    palette.primary,
                ))),
        )
        .with_block(photo_row(
            4,
            40.0,
            &[
                ("/3-coconut.jpeg", "Coconut Nursery"),
                ("/5-coconut.jpeg", "Coconut Products"),
                ("/8-coconut.jpeg", "Coconut Plantation"),
                ("/4-coconut.jpeg", "Coconut Harvesting"),
            ],
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn trend_notes_carry_statuses() {
        let page = page();
        let trend = page
            .charts()
            .into_iter()
            .find_map(|chart| match &chart.kind {
                ChartKind::Category(category) => Some(category.clone()),
                _ => None,
            })
            .expect("production trend");
        assert_eq!(trend.domain, Some((2500.0, 3600.0)));
        assert_eq!(trend.notes[3], "Decline (Weather impact)");
        assert_eq!(trend.categories.len(), 6);
    }

    #[test]
    fn usage_labels_match_table() {
        let page = page();
        let donut = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Donut(_)))
            .expect("usage donut");
        let expected: Vec<String> = coconut::USAGE.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(donut.labels(), expected);
    }

    #[test]
    fn production_tile_uses_small_value() {
        let page = page();
        let tile = page
            .stat_tiles()
            .into_iter()
            .find(|tile| tile.label == "Total Production")
            .expect("production tile");
        assert_eq!(tile.value_size(), crate::model::ValueSize::Small);
    }
}
