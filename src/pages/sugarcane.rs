//! Page 4: sugarcane and the import substitution drive.

use crate::charts::icons::Icon;
use crate::charts::{CategoryChart, Chart, LabelFormat, Series};
use crate::data::sugarcane;
use crate::model::{Column, Columns, ImageBlock, Page, PageKind, Panel, SectionLabel};
use crate::palette::{neutral, Sector};

use super::{donut_box, image_box, sector_header};

const SECTOR: Sector = Sector::Sugarcane;

pub fn page() -> Page {
    let palette = SECTOR.palette();

    let trend = CategoryChart::bars(sugarcane::TREND.iter().map(|row| row.year))
        .with_series(
            Series::new(
                "Harvested",
                palette.bar,
                sugarcane::TREND.iter().map(|row| row.first).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Thousands(0)),
        )
        .with_series(
            Series::new(
                "Processed",
                palette.secondary,
                sugarcane::TREND.iter().map(|row| row.second).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Thousands(0)),
        );

    let left = Column::new(3)
        .with_block(
            Panel::filled(neutral::PURPLE_50, 85.0)
                .with_border(neutral::PURPLE_200)
                .with_block(
                    SectionLabel::new("Sugarcane vs Sugar Production (MT)", palette.bar)
                        .with_legend_entry("Harvested", palette.bar)
                        .with_legend_entry("Processed", palette.secondary),
                )
                .with_block(Chart::category(trend, 104.0, 66.0)),
        )
        .with_block(image_box(
            "Sugarcane Production Steps",
            ImageBlock::new("sugarance-chart.jpeg", "Sugarcane Production Steps", 95.0).contain(),
            palette.primary,
        ));

    let right = Column::new(2)
        .with_block(donut_box(
            "Sugarcane Usage Breakdown",
            &sugarcane::USAGE,
            SECTOR,
            66.0,
            80.0,
        ))
        .with_block(image_box(
            "Sugarcane Distribution",
            ImageBlock::new("sugarance distribution.png", "Sugarcane Distribution", 60.0).contain(),
            palette.primary,
        ))
        .with_block(ImageBlock::new("/2-SUGARCANE.jpeg", "Sugarcane Plantation", 30.0));

    Page::new(PageKind::Sector(SECTOR), "Sugarcane Sector")
        .with_number(4)
        .with_footer(sugarcane::SOURCES)
        .with_block(sector_header(
            SECTOR,
            "Import Substitution Focus",
            "Sugarcane Header.png",
            Icon::Candy,
        ))
        .with_block(Columns::new().with_column(left).with_column(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn trend_plots_harvest_and_sugar() {
        let page = page();
        let trend = page
            .charts()
            .into_iter()
            .find_map(|chart| match &chart.kind {
                ChartKind::Category(category) => Some(category.clone()),
                _ => None,
            })
            .expect("trend chart");
        let names: Vec<&str> = trend.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Harvested", "Processed"]);
        assert_eq!(trend.series[0].value_labels()[0], Some("653k".to_string()));
        assert_eq!(trend.series[1].value_labels()[6], Some("86k".to_string()));
    }

    #[test]
    fn usage_labels_match_table() {
        let page = page();
        let donut = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Donut(_)))
            .expect("usage donut");
        let expected: Vec<String> = sugarcane::USAGE.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(donut.labels(), expected);
    }
}
