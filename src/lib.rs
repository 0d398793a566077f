//! Print-ready infographic report on Sri Lanka's plantation sectors.
//!
//! The report is a cover plus one page each for tea, coconut, rubber, sugarcane and cashew.
//! Pages are described with the types in [`model`], composed in [`pages`] and rendered to an
//! A4 PDF through `genpdf`:
//!
//! ```no_run
//! use plantation_report::{Report, ReportConfig};
//!
//! let config = ReportConfig::from_env();
//! let prepared = Report::standard().prepare(&config)?;
//! prepared.render_to_file("report.pdf")?;
//! # Ok::<(), plantation_report::ReportError>(())
//! ```

pub mod assets;
pub mod builder;
pub mod charts;
pub mod config;
pub mod data;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod frame;
pub mod model;
pub mod pages;
pub mod palette;
pub mod render;
pub mod report;
pub mod widgets;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use config::ReportConfig;
pub use error::ReportError;
pub use report::{PreparedReport, RenderedPdf, Report};
