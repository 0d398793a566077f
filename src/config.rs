//! Report configuration: asset and font locations and the chart resolution.
//!
//! Values come from defaults, then the environment, then explicit builder calls (the CLI maps
//! its flags onto those), later sources winning.

use std::env;
use std::path::{Path, PathBuf};

use crate::assets::DEFAULT_ASSETS_DIR;
use crate::fonts::FONTS_DIR_ENV;

/// Environment variable naming the image asset directory.
pub const ASSETS_DIR_ENV: &str = "PLANTATION_REPORT_ASSETS_DIR";

/// Default resolution of rasterised charts and badges.
pub const DEFAULT_CHART_DPI: f64 = 200.0;

const MIN_CHART_DPI: f64 = 72.0;
const MAX_CHART_DPI: f64 = 600.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    assets_dir: PathBuf,
    fonts_dir: Option<PathBuf>,
    chart_dpi: f64,
    bookmarks: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            fonts_dir: None,
            chart_dpi: DEFAULT_CHART_DPI,
            bookmarks: false,
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_lookup(|name| env::var_os(name).map(PathBuf::from))
    }

    /// Applies environment overrides read through `lookup`; empty values are ignored.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let non_empty = |name: &str| lookup(name).filter(|path| !path.as_os_str().is_empty());
        if let Some(assets_dir) = non_empty(ASSETS_DIR_ENV) {
            self.assets_dir = assets_dir;
        }
        if let Some(fonts_dir) = non_empty(FONTS_DIR_ENV) {
            self.fonts_dir = Some(fonts_dir);
        }
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_fonts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(dir.into());
        self
    }

    /// Sets the chart resolution, clamped to 72–600 dpi.
    pub fn with_chart_dpi(mut self, dpi: f64) -> Self {
        self.chart_dpi = if dpi.is_finite() {
            dpi.clamp(MIN_CHART_DPI, MAX_CHART_DPI)
        } else {
            DEFAULT_CHART_DPI
        };
        self
    }

    /// Requests a PDF outline with one entry per page.
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    pub fn chart_dpi(&self) -> f64 {
        self.chart_dpi
    }

    pub fn bookmarks(&self) -> bool {
        self.bookmarks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_assets() {
        let config = ReportConfig::default();
        assert_eq!(config.assets_dir(), Path::new("assets"));
        assert_eq!(config.fonts_dir(), None);
        assert_eq!(config.chart_dpi(), DEFAULT_CHART_DPI);
        assert!(!config.bookmarks());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ReportConfig::default().with_env_lookup(|name| match name {
            ASSETS_DIR_ENV => Some(PathBuf::from("/srv/report/assets")),
            FONTS_DIR_ENV => Some(PathBuf::from("/srv/report/fonts")),
            _ => None,
        });
        assert_eq!(config.assets_dir(), Path::new("/srv/report/assets"));
        assert_eq!(config.fonts_dir(), Some(Path::new("/srv/report/fonts")));
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let config = ReportConfig::default().with_env_lookup(|_| Some(PathBuf::new()));
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = ReportConfig::default()
            .with_env_lookup(|name| (name == ASSETS_DIR_ENV).then(|| PathBuf::from("/env")))
            .with_assets_dir("/flag");
        assert_eq!(config.assets_dir(), Path::new("/flag"));
    }

    #[test]
    fn chart_dpi_is_clamped() {
        assert_eq!(ReportConfig::new().with_chart_dpi(10.0).chart_dpi(), 72.0);
        assert_eq!(ReportConfig::new().with_chart_dpi(5000.0).chart_dpi(), 600.0);
        assert_eq!(ReportConfig::new().with_chart_dpi(f64::NAN).chart_dpi(), DEFAULT_CHART_DPI);
    }
}
