//! Page 1: tea, the export economy backbone.

use crate::charts::icons::Icon;
use crate::charts::{CategoryChart, Chart, DonutChart, LabelFormat, LegendLayout, ProgressChart, Series};
use crate::data::tea;
use crate::model::{
    Bullets, Callout, Column, Columns, ImageBlock, Page, PageKind, Panel, SectionBox, StatGrid,
    StatTile,
};
use crate::palette::{neutral, Sector};

use super::{photo_row, sector_header, years};

const SECTOR: Sector = Sector::Tea;

pub fn page() -> Page {
    let palette = SECTOR.palette();

    let production = CategoryChart::bars(years(&tea::PRODUCTION))
        .with_series(
            Series::new(
                "Production (Million Kg)",
                palette.bar,
                tea::PRODUCTION.iter().map(|row| row.value).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Plain)
            .with_label_color(palette.primary),
        )
        .with_max_bar_width(40.0);

    let markets = DonutChart::new(&tea::KEY_MARKETS, palette.categorical)
        .with_radii(60.0, 85.0)
        .with_padding(3.0)
        .with_legend(LegendLayout::Grid)
        .with_center("Total Vol", tea::KEY_MARKETS_TOTAL_LABEL);

    let elevation = ProgressChart::new()
        .with_item(&tea::ELEVATION[0], neutral::GREEN_800, neutral::GREEN_800)
        .with_item(&tea::ELEVATION[1], neutral::GREEN_600, neutral::GREEN_700)
        .with_item(&tea::ELEVATION[2], neutral::GREEN_400, neutral::GREEN_600);

    let left = Column::new(2)
        .with_block(
            SectionBox::new("Annual Tea Production (2019-2025)", palette.bar)
                .with_block(Chart::category(production, 119.0, 55.0)),
        )
        .with_block(
            Columns::new()
                .with_column(Column::new(1).with_block(
                    SectionBox::new("Key Markets (2025)", palette.primary)
                        .with_block(Chart::donut(markets, 54.0, 72.0)),
                ))
                .with_column(Column::new(1).with_block(
                    SectionBox::new("Production by Elevation", palette.primary)
                        .with_block(Chart::progress(elevation, 54.0, 34.0)),
                )),
        );

    let right = Column::new(1)
        .with_block(
            Panel::filled(neutral::GREEN_50, 52.0)
                .with_border(neutral::GREEN_200)
                .with_block(
                    Callout::new(tea::BRAND_TITLE, tea::BRAND_TEXT)
                        .with_icon(Icon::Award)
                        .with_title_style(neutral::GREEN_800, 12)
                        .with_text_style(neutral::GRAY_700, 8),
                ),
        )
        .with_block(
            SectionBox::new("Growing Regions", palette.primary)
                .with_block(ImageBlock::new("tea population.png", "Tea Growing Regions", 58.0))
                .with_block(Bullets::new(tea::GROWING_REGIONS, 2, neutral::GREEN_600)),
        );

    Page::new(PageKind::Sector(SECTOR), "Tea Sector")
        .with_number(1)
        .with_footer(tea::SOURCES)
        .with_block(sector_header(SECTOR, "Export Economy Backbone", "tealeaf.png", Icon::Leaf))
        .with_block(
            StatGrid::new(4)
                .with_tile(
                    StatTile::new("Total Production", "~275 - 280", "Million Kg", Icon::TrendingUp)
                        .with_color(palette.primary),
                )
                .with_tile(
                    StatTile::new("Export Revenue", "~$1.45 - 1.55", "Billion USD", Icon::Coins)
                        .with_color(palette.primary),
                )
                .with_tile(
                    StatTile::new("Global Rank", "3rd", "Largest Exporter", Icon::Award)
                        .with_color(palette.primary),
                )
                .with_tile(
                    StatTile::new("Livelihoods", "~2.1 Million", "Direct & Indirect", Icon::Users)
                        .with_color(palette.primary),
                ),
        )
        .with_block(Columns::new().with_column(left).with_column(right))
        .with_block(photo_row(
            4,
            38.0,
            &[
                ("/1-tea.jpeg", "Tea Plantation"),
                ("/2-tea.jpeg", "Tea Processing"),
                ("/4-tea.jpeg", "Tea Plucking"),
                ("/3-tea.jpeg", "Tea Plucking"),
            ],
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn key_market_labels_match_table() {
        let page = page();
        let donut = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Donut(_)))
            .expect("key markets donut");
        let expected: Vec<String> = tea::KEY_MARKETS.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(donut.labels(), expected);
        assert_eq!(donut.labels().len(), 8);
    }

    #[test]
    fn production_chart_covers_every_year() {
        let page = page();
        let bars = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Category(_)))
            .expect("production bars");
        assert_eq!(
            bars.labels(),
            vec!["2019", "2020", "2021", "2022", "2023", "2024", "2025"]
        );
    }

    #[test]
    fn global_rank_tile_is_verbatim() {
        let page = page();
        let tile = page
            .stat_tiles()
            .into_iter()
            .find(|tile| tile.label == "Global Rank")
            .expect("global rank tile");
        assert_eq!(tile.value, "3rd");
        assert_eq!(tile.sub, "Largest Exporter");
    }

    #[test]
    fn elevation_bars_follow_table_order() {
        let page = page();
        let progress = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Progress(_)))
            .expect("elevation bars");
        assert_eq!(progress.labels(), vec!["Low Grown", "High Grown", "Mid Grown"]);
    }
}
