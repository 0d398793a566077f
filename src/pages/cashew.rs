//! Page 5: cashew, a premium export crop.

use crate::charts::icons::Icon;
use crate::charts::{CategoryChart, Chart, LabelFormat, Series};
use crate::data::cashew;
use crate::model::{
    Callout, Column, Columns, HorizontalAlignment, ImageBlock, Page, PageKind, Panel,
    SectionLabel, StatGrid, StatTile, TextBlock,
};
use crate::palette::{neutral, Sector};

use super::{donut_box, image_box, sector_header};

const SECTOR: Sector = Sector::Cashew;

pub fn page() -> Page {
    let palette = SECTOR.palette();

    let production = CategoryChart::bars(cashew::PRODUCTION_AND_AREA.iter().map(|row| row.year))
        .with_series(
            Series::new(
                "Production (MT)",
                palette.bar,
                cashew::PRODUCTION_AND_AREA.iter().map(|row| row.first).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Thousands(1)),
        )
        .with_series(
            Series::new(
                "Area (Ha)",
                palette.secondary,
                cashew::PRODUCTION_AND_AREA.iter().map(|row| row.second).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Thousands(1)),
        )
        .with_grid_color(palette.bar);

    let tiles = StatGrid::new(1)
        .with_tile(StatTile::new("Farmers", "30K+", "Small Holders", Icon::Users).with_color(palette.primary))
        .with_tile(StatTile::new("Districts", "15", "Dry Zone", Icon::MapPin).with_color(palette.primary))
        .with_tile(StatTile::new("Price", "High", "Local Market", Icon::DollarSign).with_color(palette.primary));

    let left = Column::new(3)
        .with_block(
            Panel::filled(neutral::BLUE_50, 85.0)
                .with_border(neutral::BLUE_200)
                .with_block(
                    SectionLabel::new("Cashew Production & Area", palette.bar)
                        .with_legend_entry("Production (MT)", palette.bar)
                        .with_legend_entry("Area (Ha)", palette.secondary),
                )
                .with_block(Chart::category(production, 104.0, 58.0))
                .with_block(
                    TextBlock::new(cashew::TARGET_NOTE)
                        .with_size(7)
                        .italic()
                        .with_color(neutral::GRAY_600)
                        .with_alignment(HorizontalAlignment::Center),
                ),
        )
        .with_block(
            Panel::new().with_accent(neutral::ORANGE_500).with_block(
                Callout::new(cashew::BRAND_TITLE, cashew::BRAND_TEXT)
                    .with_icon(Icon::Award)
                    .with_title_style(neutral::ORANGE_800, 15)
                    .with_text_style(neutral::GRAY_600, 10),
            ),
        )
        .with_block(
            Columns::new()
                .with_column(Column::new(2).with_block(image_box(
                    "Cashew Processing Steps",
                    ImageBlock::new("cashew prosess.png", "Cashew Processing Steps", 58.0).contain(),
                    palette.primary,
                )))
                .with_column(Column::new(1).with_block(tiles)),
        );

    let right = Column::new(2)
        .with_block(donut_box(
            "Local vs Export Market",
            &cashew::SUPPLY_GAP,
            SECTOR,
            66.0,
            64.0,
        ))
        .with_block(image_box(
            "Cultivated Areas of Cashew",
            ImageBlock::new("cultivates Area of Cashew.png", "Cultivated Areas of Cashew", 70.0)
                .contain(),
            palette.primary,
        ))
        .with_block(ImageBlock::new("/2-Cashew .jpeg", "Cashew Plantation", 30.0));

    Page::new(PageKind::Sector(SECTOR), "Cashew Sector")
        .with_number(5)
        .with_footer(cashew::SOURCES)
        .with_block(sector_header(SECTOR, "Premium Export Crop", "Cashew header.png", Icon::Sun))
        .with_block(Columns::new().with_column(left).with_column(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn market_labels_match_table() {
        let page = page();
        let donut = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Donut(_)))
            .expect("market donut");
        assert_eq!(donut.labels(), vec!["Local Consumption", "Export Market"]);
    }

    #[test]
    fn production_labels_are_thousands() {
        let page = page();
        let bars = page
            .charts()
            .into_iter()
            .find_map(|chart| match &chart.kind {
                ChartKind::Category(category) => Some(category.clone()),
                _ => None,
            })
            .expect("production chart");
        assert_eq!(bars.series[0].value_labels()[1], Some("12.3k".to_string()));
        assert_eq!(bars.series[1].value_labels()[0], Some("16.8k".to_string()));
    }

    #[test]
    fn tiles_are_verbatim() {
        let page = page();
        let pairs: Vec<(String, String)> = page
            .stat_tiles()
            .into_iter()
            .map(|tile| (tile.value.clone(), tile.sub.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("30K+".to_string(), "Small Holders".to_string()),
                ("15".to_string(), "Dry Zone".to_string()),
                ("High".to_string(), "Local Market".to_string()),
            ]
        );
    }
}
