//! Root composition: the ordered pages and the prepare/render lifecycle.
//!
//! A [`Report`] is only a list of pages.  [`Report::prepare`] resolves fonts and assets once and
//! returns a [`PreparedReport`], the only type that can render.

use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use genpdf::PaperSize;
use log::{debug, info};

use crate::assets::Assets;
use crate::builder::DocumentBuilder;
use crate::charts::Scale;
use crate::config::ReportConfig;
use crate::elements::mm_from_f64;
use crate::error::ReportError;
use crate::fonts::{self, LoadedFonts};
use crate::frame::{page_margins, FooterInfo, PageFooter, PageSequence, FOOTER_HEIGHT_MM};
use crate::model::Page;
use crate::pages::{self, REPORT_TITLE};
use crate::render::{footer_info, render_page, RenderEnv};

/// Rendered PDF bytes and the number of physical pages.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Ordered pages of a report, not yet bound to fonts or assets.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pages: Vec<Page>,
}

impl Report {
    /// Cover, tea, coconut, rubber, sugarcane and cashew, in that order.
    pub fn standard() -> Self {
        Self::new(pages::standard_pages())
    }

    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Resolves fonts and the asset directory.
    pub fn prepare(self, config: &ReportConfig) -> Result<PreparedReport, ReportError> {
        info!("Loading content-rich infographic");
        let fonts = fonts::load_fonts(config.fonts_dir()).map_err(ReportError::FontLoad)?;
        let assets = Assets::new(config.assets_dir());
        debug!(
            "Using font family '{}' and assets from {}",
            fonts.name,
            assets.root().display()
        );
        Ok(PreparedReport {
            pages: self.pages,
            fonts,
            assets,
            scale: Scale::new(config.chart_dpi()),
            bookmarks: config.bookmarks(),
        })
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::standard()
    }
}

/// A report with fonts loaded, ready to render any number of times.
pub struct PreparedReport {
    pages: Vec<Page>,
    fonts: LoadedFonts,
    assets: Assets,
    scale: Scale,
    bookmarks: bool,
}

impl PreparedReport {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Renders every page onto its own A4 sheet.
    pub fn render(&self) -> Result<RenderedPdf, ReportError> {
        let env = RenderEnv {
            assets: self.assets.clone(),
            chart_fonts: Rc::new(self.fonts.chart.clone()),
            scale: self.scale,
        };

        let footers: Vec<FooterInfo> = self.pages.iter().map(footer_info).collect();
        let counter = Rc::new(Cell::new(0));
        let mut document = DocumentBuilder::new()
            .with_title(REPORT_TITLE)
            .with_font_family(self.fonts.family.clone())
            .with_paper_size(PaperSize::A4)
            .with_margins(page_margins())
            .with_footer(mm_from_f64(FOOTER_HEIGHT_MM), move |page| {
                PageFooter::new(
                    page.checked_sub(1)
                        .and_then(|index| footers.get(index))
                        .cloned()
                        .unwrap_or_default(),
                )
            })
            .with_page_counter(Rc::clone(&counter))
            .build()
            .map_err(ReportError::FontLoad)?;

        let frames = self.pages.iter().map(|page| render_page(page, &env)).collect();
        document.push(PageSequence::new(frames));

        let mut bytes = Vec::new();
        document.render(&mut bytes)?;
        let page_count = counter.get();
        info!("Rendered {} pages ({} bytes)", page_count, bytes.len());

        let bytes = self.outline(bytes)?;
        Ok(RenderedPdf { bytes, page_count })
    }

    /// Renders and writes the PDF to `path`.
    pub fn render_to_file(&self, path: impl AsRef<Path>) -> Result<RenderedPdf, ReportError> {
        let pdf = self.render()?;
        fs::write(path.as_ref(), &pdf.bytes)?;
        info!("Wrote {}", path.as_ref().display());
        Ok(pdf)
    }

    #[cfg(feature = "bookmarks")]
    fn outline(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ReportError> {
        if !self.bookmarks {
            return Ok(bytes);
        }
        let titles: Vec<String> = self.pages.iter().map(|page| page.title().to_string()).collect();
        Ok(crate::bookmarks::apply_page_bookmarks(&bytes, &titles)?)
    }

    #[cfg(not(feature = "bookmarks"))]
    fn outline(&self, bytes: Vec<u8>) -> Result<Vec<u8>, ReportError> {
        if self.bookmarks {
            log::warn!("Bookmarks requested but the `bookmarks` feature is disabled; skipping outline");
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageKind;

    #[test]
    fn standard_report_has_six_pages() {
        let report = Report::standard();
        assert_eq!(report.pages().len(), 6);
        assert_eq!(report.pages()[0].kind(), PageKind::Cover);
    }

    #[test]
    fn prepare_fails_cleanly_without_fonts() {
        if fonts::fonts_available(None) {
            return;
        }
        let config = ReportConfig::new().with_fonts_dir("/nonexistent/fonts");
        let result = Report::standard().prepare(&config);
        assert!(matches!(result, Err(ReportError::FontLoad(_))));
    }
}
