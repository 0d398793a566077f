//! Unnumbered cover page.

use crate::data::cover;
use crate::model::{Block, HorizontalAlignment, ImageBlock, Page, PageKind, Panel, TextBlock};
use crate::palette::neutral;

const TITLE_SIZE: u8 = 36;

fn centered(text: &str) -> TextBlock {
    TextBlock::new(text).bold().with_alignment(HorizontalAlignment::Center)
}

fn author_panel() -> Panel {
    let panel = Panel::new()
        .with_accent(neutral::EMERALD_700)
        .with_padding(5.0)
        .with_block(TextBlock::new(cover::AUTHOR).with_size(18).bold().with_color(neutral::GRAY_900))
        .with_block(
            TextBlock::new(cover::REGISTRATION)
                .with_size(12)
                .bold()
                .with_color(neutral::EMERALD_800),
        );
    cover::AFFILIATION
        .iter()
        .fold(panel, |panel, line| {
            panel.with_block(
                TextBlock::new(*line)
                    .with_size(10)
                    .bold()
                    .uppercase()
                    .with_color(neutral::GRAY_600),
            )
        })
        .with_block(
            TextBlock::new(cover::TERM)
                .with_size(10)
                .bold()
                .uppercase()
                .with_color(neutral::EMERALD_700),
        )
}

pub fn page() -> Page {
    let [first, second] = cover::TITLE_LINES;
    Page::new(PageKind::Cover, "Cover")
        .with_block(Block::spacer(12.0))
        .with_block(centered(first).with_size(TITLE_SIZE).with_color(neutral::GRAY_900))
        .with_block(centered(second).with_size(TITLE_SIZE).with_color(neutral::EMERALD_700))
        .with_block(
            centered(cover::COURSE)
                .with_size(9)
                .uppercase()
                .with_color(neutral::GRAY_400),
        )
        .with_block(ImageBlock::new("image_b83748.png", "Sri Lanka Plantation Map", 125.0).contain())
        .with_block(author_panel())
        .with_block(Block::rule(neutral::GREEN_700, 1.5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_is_unnumbered_without_footer() {
        let page = page();
        assert_eq!(page.number(), None);
        assert_eq!(page.footer(), None);
        assert!(page.stat_tiles().is_empty());
    }

    #[test]
    fn cover_shows_the_map() {
        assert_eq!(page().image_paths(), vec!["image_b83748.png"]);
    }
}
