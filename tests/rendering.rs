use plantation_report::charts::{rasterize, Scale};
use plantation_report::config::DEFAULT_CHART_DPI;
use plantation_report::model::PageKind;
use plantation_report::palette::Sector;
use plantation_report::{fonts, Report, ReportConfig};
use sha2::{Digest, Sha256};

const SKIP_HINT: &str =
    "no usable fonts. Set PLANTATION_REPORT_FONTS_DIR or copy the Roboto fonts into assets/fonts.";

fn render_report() -> Option<plantation_report::RenderedPdf> {
    if !fonts::fonts_available(None) {
        return None;
    }

    let config = ReportConfig::new().with_assets_dir("/nonexistent/plantation-assets");
    let pdf = Report::standard()
        .prepare(&config)
        .expect("prepare report")
        .render()
        .expect("render report");

    Some(pdf)
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// Hashes of every chart on every page, rasterised at the default resolution.
fn chart_digests(loaded: &fonts::LoadedFonts) -> Vec<[u8; 32]> {
    let scale = Scale::new(DEFAULT_CHART_DPI);
    let report = Report::standard();
    let digests = report
        .pages()
        .iter()
        .flat_map(|page| page.charts())
        .map(|chart| digest(rasterize(chart, &loaded.chart, scale).as_raw()))
        .collect();
    digests
}

#[test]
fn renders_non_empty_output() {
    let Some(pdf) = render_report() else {
        eprintln!("Skipping renders_non_empty_output: {}", SKIP_HINT);
        return;
    };
    assert!(pdf.bytes.starts_with(b"%PDF"), "output should be a PDF document");
}

#[test]
fn every_report_page_lands_on_one_sheet() {
    let Some(pdf) = render_report() else {
        eprintln!("Skipping every_report_page_lands_on_one_sheet: {}", SKIP_HINT);
        return;
    };
    assert_eq!(pdf.page_count, Report::standard().pages().len());
    assert_eq!(pdf.page_count, 6);
}

#[test]
fn charts_rasterise_identically() {
    let Ok(loaded) = fonts::load_fonts(None) else {
        eprintln!("Skipping charts_rasterise_identically: {}", SKIP_HINT);
        return;
    };
    let first = chart_digests(&loaded);
    let second = chart_digests(&loaded);
    assert!(!first.is_empty());
    assert_eq!(first, second, "chart rasters must not change between runs");
}

#[test]
fn prepared_report_renders_more_than_once() {
    if !fonts::fonts_available(None) {
        eprintln!("Skipping prepared_report_renders_more_than_once: {}", SKIP_HINT);
        return;
    }
    let prepared = Report::standard()
        .prepare(&ReportConfig::new())
        .expect("prepare report");
    let first = prepared.render().expect("first render");
    let second = prepared.render().expect("second render");
    assert_eq!(first.page_count, second.page_count);
    assert!(second.bytes.starts_with(b"%PDF"));
}

#[test]
fn page_order_does_not_need_fonts() {
    let report = Report::standard();
    let titles: Vec<&str> = report.pages().iter().map(|page| page.title()).collect();
    assert_eq!(
        titles,
        vec![
            "Cover",
            "Tea Sector",
            "Coconut Sector",
            "Rubber Sector",
            "Sugarcane Sector",
            "Cashew Sector"
        ]
    );
    assert_eq!(report.pages()[1].kind(), PageKind::Sector(Sector::Tea));
}

#[test]
fn tea_tiles_display_configured_pairs() {
    let report = Report::standard();
    let pairs: Vec<(&str, &str)> = report.pages()[1]
        .stat_tiles()
        .into_iter()
        .map(|tile| (tile.value.as_str(), tile.sub.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("~275 - 280", "Million Kg"),
            ("~$1.45 - 1.55", "Billion USD"),
            ("3rd", "Largest Exporter"),
            ("~2.1 Million", "Direct & Indirect"),
        ]
    );
}

#[cfg(feature = "bookmarks")]
#[test]
fn bookmarks_add_an_outline() {
    if !fonts::fonts_available(None) {
        eprintln!("Skipping bookmarks_add_an_outline: {}", SKIP_HINT);
        return;
    }
    let pdf = Report::standard()
        .prepare(&ReportConfig::new().with_bookmarks(true))
        .expect("prepare report")
        .render()
        .expect("render report");
    let document = lopdf::Document::load_mem(&pdf.bytes).expect("parse rendered PDF");
    assert_eq!(document.get_pages().len(), 6);
    assert!(pdf.bytes.windows(b"/Outlines".len()).any(|w| w == b"/Outlines"));
}

/// Sorted hashes of the image streams of a PDF.
///
/// The PDF writer names and numbers image objects differently on every run, so only the
/// multiset of image contents is stable.
#[cfg(feature = "bookmarks")]
fn image_stream_digests(bytes: &[u8]) -> Vec<[u8; 32]> {
    let document = lopdf::Document::load_mem(bytes).expect("parse rendered PDF");
    let mut digests: Vec<[u8; 32]> = document
        .objects
        .values()
        .filter_map(|object| match object {
            lopdf::Object::Stream(stream) => Some(stream),
            _ => None,
        })
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(lopdf::Object::as_name)
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
        .map(|stream| digest(&stream.content))
        .collect();
    digests.sort_unstable();
    digests
}

#[cfg(feature = "bookmarks")]
#[test]
fn rendered_images_match_between_runs() {
    let Some(pdf_a) = render_report() else {
        eprintln!("Skipping rendered_images_match_between_runs: {}", SKIP_HINT);
        return;
    };
    let Some(pdf_b) = render_report() else {
        eprintln!("Skipping rendered_images_match_between_runs: {}", SKIP_HINT);
        return;
    };
    assert_eq!(pdf_a.page_count, pdf_b.page_count);

    let images_a = image_stream_digests(&pdf_a.bytes);
    let images_b = image_stream_digests(&pdf_b.bytes);
    assert!(!images_a.is_empty());
    assert_eq!(images_a, images_b, "both renders must embed the same images");
}
