//! Errors returned while preparing and rendering the report.

use std::fmt;

#[cfg(feature = "bookmarks")]
use crate::bookmarks::BookmarkError;

#[derive(Debug)]
pub enum ReportError {
    /// No usable font family could be found or parsed.
    FontLoad(genpdf::error::Error),
    /// `genpdf` failed while laying out or writing the document.
    Render(genpdf::error::Error),
    /// The rendered PDF could not be written.
    Io(std::io::Error),
    /// The document outline could not be added.
    #[cfg(feature = "bookmarks")]
    Bookmarks(BookmarkError),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontLoad(_) => write!(f, "Failed to load report fonts"),
            Self::Render(_) => write!(f, "Failed to render the report"),
            Self::Io(_) => write!(f, "Failed to write the report"),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(_) => write!(f, "Failed to add bookmarks to the report"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontLoad(err) | Self::Render(err) => Some(err),
            Self::Io(err) => Some(err),
            #[cfg(feature = "bookmarks")]
            Self::Bookmarks(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<genpdf::error::Error> for ReportError {
    fn from(err: genpdf::error::Error) -> Self {
        Self::Render(err)
    }
}

#[cfg(feature = "bookmarks")]
impl From<BookmarkError> for ReportError {
    fn from(err: BookmarkError) -> Self {
        Self::Bookmarks(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn io_errors_keep_their_source() {
        let err = ReportError::from(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        assert_eq!(err.to_string(), "Failed to write the report");
        let source = err.source().map(|source| source.to_string()).unwrap_or_default();
        assert_eq!(source, "read-only");
    }

    #[test]
    fn font_errors_point_at_the_cause() {
        let cause = genpdf::error::Error::new(
            "no fonts",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let err = ReportError::FontLoad(cause);
        assert_eq!(err.to_string(), "Failed to load report fonts");
        let source = err.source().map(|source| source.to_string()).unwrap_or_default();
        assert!(source.contains("no fonts"));
    }
}
