// NYHousing - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Empty query results are not errors; they are `None` or empty maps.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all NYHousing operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum HousingError {
    /// Dataset loading failed.
    Load(LoadError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for HousingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "Dataset error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for HousingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

/// Errors raised while reading the listings table. All of them are fatal at
/// startup; rows with missing fields are dropped, not reported here.
#[derive(Debug)]
pub enum LoadError {
    /// The dataset file could not be opened or read.
    Io { path: PathBuf, source: io::Error },

    /// The header row is missing a required column.
    MissingColumn { path: PathBuf, column: &'static str },

    /// A record could not be decoded (e.g. inconsistent field count).
    Csv { path: PathBuf, source: csv::Error },

    /// The spreadsheet could not be opened or its first sheet read.
    Workbook {
        path: PathBuf,
        source: calamine::Error,
    },

    /// The spreadsheet has no worksheets.
    EmptyWorkbook { path: PathBuf },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read dataset '{}': {source}", path.display())
            }
            Self::MissingColumn { path, column } => write!(
                f,
                "Dataset '{}' has no '{column}' column. \
                 Expected headers: PRICE, BEDS, BATH, PROPERTYSQFT, LOCALITY, \
                 LATITUDE, LONGITUDE, ADDRESS",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "Malformed record in '{}': {source}", path.display())
            }
            Self::Workbook { path, source } => {
                write!(f, "Cannot read workbook '{}': {source}", path.display())
            }
            Self::EmptyWorkbook { path } => {
                write!(f, "Workbook '{}' has no worksheets", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Workbook { source, .. } => Some(source),
            Self::MissingColumn { .. } | Self::EmptyWorkbook { .. } => None,
        }
    }
}

impl From<LoadError> for HousingError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum entry count.
    TooManyEntries { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyEntries { count, max } => write!(
                f,
                "Export of {count} listings exceeds maximum of {max}. \
                 Apply filters to reduce the result set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for HousingError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for HousingError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for NYHousing results.
pub type Result<T> = std::result::Result<T, HousingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_column_message_names_column() {
        let err = LoadError::MissingColumn {
            path: PathBuf::from("data.csv"),
            column: "PRICE",
        };
        let msg = err.to_string();
        assert!(msg.contains("data.csv"));
        assert!(msg.contains("'PRICE'"));
    }

    #[test]
    fn test_top_level_error_preserves_source_chain() {
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: HousingError = LoadError::Io {
            path: PathBuf::from("missing.csv"),
            source: io,
        }
        .into();

        assert!(err.to_string().starts_with("Dataset error:"));
        let load = err.source().expect("load error source");
        assert!(load.source().is_some(), "io source should be chained");
    }

    #[test]
    fn test_too_many_entries_has_no_source() {
        let err = ExportError::TooManyEntries { count: 10, max: 5 };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("10"));
    }
}
