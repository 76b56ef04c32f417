use thiserror::Error;

/// Main error type for the timetable crate.
/// Aggregates errors from the standard library, dependencies and internal modules.
#[derive(Error, Debug)]
pub enum RustyTimetableError {
    #[error("{0}")]
    WithContextError(String),

    // Standard library errors
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("{0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    StringEncodingError(#[from] std::str::Utf8Error),

    // Third-party library errors
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("{0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("{0}")]
    XmlEncodingError(#[from] quick_xml::encoding::EncodingError),

    #[error("{0}")]
    XmlAttributeError(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    PatternError(#[from] glob::PatternError),

    // Helper module errors
    #[error("{0}")]
    XmlHelperError(#[from] crate::helpers::xml::XmlError),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    OdsError(#[from] crate::spreadsheet::ods::OdsError),

    // Timetable module errors
    #[error("{0}")]
    LayoutError(#[from] crate::timetable::LayoutError),

    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

impl RustyTimetableError {
    /// Returns the spreadsheet error carried by this error.
    /// Errors flattened by `with_prefix` no longer carry one.
    pub fn as_spreadsheet_error(&self) -> Option<&crate::spreadsheet::SpreadsheetError> {
        match self {
            Self::SpreadsheetError(error) => Some(error),
            _ => None,
        }
    }
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, RustyTimetableError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| RustyTimetableError::WithContextError(format!("{}: {}", message, e)))
    }
}
