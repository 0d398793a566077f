//! Physical page layout: one [`PageFrame`] per report page and the footer strip.

use genpdf::elements::LinearLayout;
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Alignment, Context, Element, Margins, Mm, RenderResult, Size};
use log::{debug, warn};

use crate::elements::{
    area_width, line_height, mm_from_f64, print_text, stroke_line, text_style,
};
use crate::palette::neutral;

/// Height reserved at the bottom of every page for the footer.
pub const FOOTER_HEIGHT_MM: f64 = 17.0;

/// Page margins as (vertical, horizontal) millimetres.
pub const PAGE_MARGINS_MM: (f64, f64) = (6.5, 8.5);

pub fn page_margins() -> Margins {
    let (vertical, horizontal) = PAGE_MARGINS_MM;
    Margins::trbl(
        mm_from_f64(vertical),
        mm_from_f64(horizontal),
        mm_from_f64(vertical),
        mm_from_f64(horizontal),
    )
}

/// Footer contents of one physical page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FooterInfo {
    pub number: Option<u32>,
    pub citations: Vec<String>,
}

impl FooterInfo {
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.citations.is_empty()
    }
}

/// Sources block on the left, page number on the right, separated from the content by a rule.
pub struct PageFooter {
    info: FooterInfo,
}

impl PageFooter {
    pub fn new(info: FooterInfo) -> Self {
        Self { info }
    }
}

const RULE_GAP_MM: f64 = 2.0;

impl Element for PageFooter {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        if self.info.is_empty() {
            return Ok(result);
        }
        let width = area_width(&area);
        stroke_line(&area, (0.0, 0.0), (width, 0.0), neutral::GRAY_200);

        let mut y = RULE_GAP_MM;
        if !self.info.citations.is_empty() {
            let label = text_style(5, true, neutral::GRAY_400);
            print_text(context, &area, 0.0, y, width / 2.0, "SOURCES:", label, Alignment::Left)?;
            y += line_height(context, label);
            let citation = text_style(6, false, neutral::GRAY_900);
            let step = line_height(context, citation);
            for line in &self.info.citations {
                print_text(context, &area, 0.0, y, width / 2.0, line, citation, Alignment::Left)?;
                y += step;
            }
        }

        if let Some(number) = self.info.number {
            let style = text_style(7, true, neutral::GRAY_500);
            print_text(
                context,
                &area,
                width / 2.0,
                RULE_GAP_MM,
                width / 2.0,
                &format!("PAGE {}", number),
                style,
                Alignment::Right,
            )?;
        }

        result.size = Size::new(area.size().width, area.size().height);
        Ok(result)
    }
}

/// Content of one report page, clipped to a single physical page.
pub struct PageFrame {
    title: String,
    content: LinearLayout,
}

impl PageFrame {
    pub fn new(title: impl Into<String>, content: LinearLayout) -> Self {
        Self {
            title: title.into(),
            content,
        }
    }
}

impl Element for PageFrame {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let inner = self.content.render(context, area.clone(), style)?;
        if inner.has_more {
            warn!(
                "Content of page '{}' does not fit on one page and was clipped",
                self.title
            );
        }
        let mut result = RenderResult::default();
        result.size = area.size();
        Ok(result)
    }
}

/// Root element that places each frame on its own physical page.
pub struct PageSequence {
    frames: Vec<PageFrame>,
    next: usize,
}

impl PageSequence {
    pub fn new(frames: Vec<PageFrame>) -> Self {
        Self { frames, next: 0 }
    }
}

impl Element for PageSequence {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let Some(frame) = self.frames.get_mut(self.next) else {
            return Ok(result);
        };
        debug!("Rendering page '{}'", frame.title);
        frame.render(context, area.clone(), style)?;
        self.next += 1;

        result.size = area.size();
        if result.size.height == Mm::default() {
            result.size.height = mm_from_f64(1.0);
        }
        result.has_more = self.next < self.frames.len();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_footer_is_empty() {
        assert!(FooterInfo::default().is_empty());
        assert!(!FooterInfo {
            number: Some(1),
            citations: Vec::new()
        }
        .is_empty());
    }
}
