//! Page 3: rubber, a value added industry.

use crate::charts::icons::Icon;
use crate::charts::{CategoryChart, Chart, LabelFormat, Series};
use crate::data::rubber;
use crate::model::{
    Callout, Column, Columns, HorizontalAlignment, ImageBlock, Page, PageKind, Panel,
    SectionLabel, TextBlock,
};
use crate::palette::{neutral, Sector};

use super::{donut_box, image_box, photo_row, sector_header};

const SECTOR: Sector = Sector::Rubber;

fn solid_tires_callout() -> Callout {
    rubber::SOLID_TIRES_FIGURES.iter().fold(
        Callout::new(rubber::SOLID_TIRES_TITLE, rubber::SOLID_TIRES_TEXT)
            .with_icon(Icon::Truck)
            .with_title_style(neutral::WHITE, 11)
            .with_text_style(neutral::SLATE_300, 8)
            .with_figure_color(neutral::WHITE),
        |callout, (value, caption)| callout.with_figure(*value, *caption),
    )
}

pub fn page() -> Page {
    let palette = SECTOR.palette();

    let production = CategoryChart::bars(rubber::PRODUCTION.iter().map(|row| row.year))
        .with_series(
            Series::new(
                "Production (Million Kg)",
                palette.bar,
                rubber::PRODUCTION.iter().map(|row| row.value).collect::<Vec<_>>(),
            )
            .with_labels(LabelFormat::Fixed(1))
            .with_label_color(palette.primary),
        )
        .with_domain(0.0, 90.0);

    let left = Column::new(3)
        .with_block(
            Panel::filled(neutral::SLATE_50, 82.0)
                .with_border(neutral::SLATE_200)
                .with_block(SectionLabel::new(
                    "Annual Rubber Production (2019\u{2013}2025)",
                    palette.bar,
                ))
                .with_block(Chart::category(production, 104.0, 56.0))
                .with_block(
                    TextBlock::new("Production Volume (Million Kg)")
                        .with_size(7)
                        .bold()
                        .with_color(neutral::GRAY_500)
                        .with_alignment(HorizontalAlignment::Center),
                ),
        )
        .with_block(
            Panel::filled(neutral::SLATE_800, 44.0)
                .with_padding(5.0)
                .with_block(solid_tires_callout()),
        )
        .with_block(photo_row(
            2,
            32.0,
            &[
                ("/7-rubber.jpeg", "Rubber Industry 1"),
                ("/5-rubber.jpeg", "Rubber Industry 2"),
                ("/2-rubber.jpeg", "Rubber Industry 3"),
                ("/1-rubber.jpeg", "Rubber Industry 4"),
            ],
        ));

    let right = Column::new(2)
        .with_block(donut_box(
            "Rubber Export Product (2024/2025)",
            &rubber::EXPORT_PRODUCTS,
            SECTOR,
            66.0,
            78.0,
        ))
        .with_block(image_box(
            "Regional Distribution",
            ImageBlock::new("rubber population.png", "Rubber Regional Distribution", 62.0).contain(),
            palette.primary,
        ))
        .with_block(ImageBlock::new("/8-rubber.jpeg", "Rubber Plantation", 34.0));

    Page::new(PageKind::Sector(SECTOR), "Rubber Sector")
        .with_number(3)
        .with_footer(rubber::SOURCES)
        .with_block(sector_header(SECTOR, "Value Added Industry", "rubber header.png", Icon::Droplets))
        .with_block(Columns::new().with_column(left).with_column(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartKind;

    #[test]
    fn export_product_labels_match_table() {
        let page = page();
        let donut = page
            .charts()
            .into_iter()
            .find(|chart| matches!(chart.kind, ChartKind::Donut(_)))
            .expect("export donut");
        let expected: Vec<String> = rubber::EXPORT_PRODUCTS.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(donut.labels(), expected);
    }

    #[test]
    fn production_labels_use_one_decimal() {
        let page = page();
        let bars = page
            .charts()
            .into_iter()
            .find_map(|chart| match &chart.kind {
                ChartKind::Category(category) => Some(category.clone()),
                _ => None,
            })
            .expect("production bars");
        assert_eq!(bars.domain, Some((0.0, 90.0)));
        assert_eq!(bars.series[0].value_labels()[3], Some("71.0".to_string()));
    }

    #[test]
    fn callout_lists_both_figures() {
        let callout = solid_tires_callout();
        assert_eq!(
            callout.figures,
            vec![
                ("$1 Bn+".to_string(), "Export Earnings".to_string()),
                ("Value+".to_string(), "Focus Strategy".to_string()),
            ]
        );
    }
}
