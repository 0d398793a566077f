//! Font discovery for the PDF text and the chart rasteriser.
//!
//! The same TrueType files feed both `genpdf` (as a [`FontFamily`]) and `rusttype` (as
//! [`ChartFonts`]), so chart labels match the surrounding text.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

use crate::charts::ChartFonts;

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable naming a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "PLANTATION_REPORT_FONTS_DIR";

const FONT_FILES: [&str; 4] = [
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

/// A system font family that is used when the bundled fonts are missing.
struct SystemFamily {
    name: &'static str,
    directories: &'static [&'static str],
    files: [&'static str; 4],
}

const SYSTEM_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "Arial",
        directories: &[],
        files: ["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"],
    },
    SystemFamily {
        name: "DejaVu Sans",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
            "/usr/local/share/fonts",
        ],
        files: [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    },
    SystemFamily {
        name: "Liberation Sans",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
        ],
        files: [
            "LiberationSans-Regular.ttf",
            "LiberationSans-Bold.ttf",
            "LiberationSans-Italic.ttf",
            "LiberationSans-BoldItalic.ttf",
        ],
    },
];

/// Paths of the four faces of a resolved family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFiles {
    pub name: String,
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub italic: PathBuf,
    pub bold_italic: PathBuf,
}

/// A loaded family, ready for both renderers.
pub struct LoadedFonts {
    pub name: String,
    pub family: FontFamily<FontData>,
    pub chart: ChartFonts,
}

impl FontFiles {
    fn in_directory(name: &str, directory: &Path, files: &[&str; 4]) -> Self {
        Self {
            name: name.to_string(),
            regular: directory.join(files[0]),
            bold: directory.join(files[1]),
            italic: directory.join(files[2]),
            bold_italic: directory.join(files[3]),
        }
    }

    fn paths(&self) -> [&Path; 4] {
        [&self.regular, &self.bold, &self.italic, &self.bold_italic]
    }

    fn missing(&self) -> Vec<&Path> {
        self.paths()
            .into_iter()
            .filter(|path| !path.is_file())
            .collect()
    }

    /// Reads and parses all four faces.
    pub fn load(&self) -> Result<LoadedFonts, Error> {
        let regular = read_font(&self.regular)?;
        let bold = read_font(&self.bold)?;

        let chart = ChartFonts::from_bytes(regular.clone(), bold.clone()).ok_or_else(|| {
            Error::new(
                format!("Font family '{}' could not be parsed for chart text", self.name),
                ErrorKind::InvalidData,
            )
        })?;

        let family = FontFamily {
            regular: font_data(&self.regular, regular)?,
            bold: font_data(&self.bold, bold)?,
            italic: font_data(&self.italic, read_font(&self.italic)?)?,
            bold_italic: font_data(&self.bold_italic, read_font(&self.bold_italic)?)?,
        };

        Ok(LoadedFonts {
            name: self.name.clone(),
            family,
            chart,
        })
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| {
        Error::new(
            format!("Failed to read font file {}", path.display()),
            err,
        )
    })
}

fn font_data(path: &Path, bytes: Vec<u8>) -> Result<FontData, Error> {
    FontData::new(bytes, None).map_err(|err| {
        Error::new(
            format!("Failed to load font {}: {}", path.display(), err),
            io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
        )
    })
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

/// Directories searched for the bundled family, in order.
pub fn font_directory_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let mut push = |candidate: PathBuf| {
        if !candidates.iter().any(|existing| existing == &candidate) {
            candidates.push(candidate);
        }
    };

    if let Some(path) = explicit {
        push(path.to_path_buf());
    }

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push(bin_dir.join("assets/fonts"));
        }
    }

    push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));

    candidates
}

fn windows_font_directory() -> Option<PathBuf> {
    ["WINDIR", "SystemRoot"]
        .into_iter()
        .filter_map(env_path)
        .map(|root| root.join("Fonts"))
        .find(|candidate| candidate.is_dir())
}

fn system_candidates() -> Vec<FontFiles> {
    let mut candidates = Vec::new();
    for family in SYSTEM_FAMILIES {
        let mut directories: Vec<PathBuf> = family.directories.iter().map(PathBuf::from).collect();
        if family.directories.is_empty() {
            directories.extend(windows_font_directory());
        }
        for directory in directories {
            candidates.push(FontFiles::in_directory(family.name, &directory, &family.files));
        }
    }
    candidates
}

/// Locates a complete font family, preferring the bundled fonts over system fallbacks.
pub fn resolve_font_files(explicit: Option<&Path>) -> Result<FontFiles, Error> {
    let mut attempts = Vec::new();

    for directory in font_directory_candidates(explicit) {
        let files = FontFiles::in_directory(DEFAULT_FONT_FAMILY_NAME, &directory, &FONT_FILES);
        let missing = files.missing();
        if missing.is_empty() {
            debug!("Using bundled fonts from {}", directory.display());
            return Ok(files);
        }

        let reason = if !directory.is_dir() {
            "directory missing".to_owned()
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };
        attempts.push(format!("{} ({})", directory.display(), reason));
    }

    if let Some(files) = system_candidates().into_iter().find(|files| files.missing().is_empty()) {
        warn!(
            "Bundled fonts unavailable ({}); falling back to system '{}' family.",
            attempts.join(", "),
            files.name
        );
        return Ok(files);
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate a font family. Checked: {}. Copy the Roboto fonts into assets/fonts or set {}.",
            summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "no usable font family found"),
    ))
}

/// Resolves and loads the report fonts.
pub fn load_fonts(explicit: Option<&Path>) -> Result<LoadedFonts, Error> {
    resolve_font_files(explicit)?.load()
}

/// Returns the font family used when a document is built without explicit fonts.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    Ok(load_fonts(None)?.family)
}

/// Indicates whether any usable font family can be found.
pub fn fonts_available(explicit: Option<&Path>) -> bool {
    resolve_font_files(explicit).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_is_searched_first() {
        let explicit = PathBuf::from("/nonexistent/fonts");
        let candidates = font_directory_candidates(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
    }

    #[test]
    fn candidates_are_deduplicated() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
        let candidates = font_directory_candidates(Some(&manifest));
        assert_eq!(candidates.iter().filter(|path| **path == manifest).count(), 1);
    }

    #[test]
    fn missing_directory_reports_every_face() {
        let files = FontFiles::in_directory("Roboto", Path::new("/nonexistent"), &FONT_FILES);
        assert_eq!(files.missing().len(), 4);
    }
}
