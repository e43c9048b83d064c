// NYHousing - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for NYHousing configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/nyhousing/ or %APPDATA%\NYHousing\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[query]` section.
    pub query: QuerySection,
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Path to the listings table.
    pub path: Option<String>,
}

/// `[query]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Quantile for the outlier price cap.
    pub outlier_quantile: Option<f64>,
    /// Apply the outlier cap to price filtering by default.
    pub cap_outliers: Option<bool>,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Rows shown in the matching-listings table.
    pub table_rows: Option<usize>,
    /// Width of the longest bar in bar charts.
    pub bar_width: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration.
///
/// All values are validated against named constants at load time. Invalid
/// values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Dataset path from `[data] path`, if set.
    pub data_path: Option<PathBuf>,
    /// Quantile for the outlier cap.
    pub outlier_quantile: f64,
    /// Cap prices at the outlier quantile unless the CLI says otherwise.
    pub cap_outliers: bool,
    /// Listings table row limit.
    pub table_rows: usize,
    /// Bar chart width in characters.
    pub bar_width: usize,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            outlier_quantile: constants::DEFAULT_OUTLIER_QUANTILE,
            cap_outliers: false,
            table_rows: constants::DEFAULT_TABLE_ROWS,
            bar_width: constants::DEFAULT_BAR_WIDTH,
            log_level: None,
        }
    }
}

/// Check `value` against an inclusive range, recording a warning if it falls
/// outside.
fn in_range<T>(
    field: &str,
    value: T,
    range: std::ops::RangeInclusive<T>,
    default: T,
    warnings: &mut Vec<String>,
) -> Option<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if range.contains(&value) {
        Some(value)
    } else {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{}-{}", range.start(), range.end()),
        };
        warnings.push(format!("{err}. Using default ({default})."));
        None
    }
}

/// Validate parsed config text.
///
/// Returns the config and any non-fatal warnings. Unparsable text yields the
/// defaults plus one warning.
pub fn parse_config(content: &str, config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let mut config = AppConfig::default();

    // -- Data: path (relative paths resolve against the config file) --
    if let Some(ref path) = raw.data.path {
        if !path.trim().is_empty() {
            let path = PathBuf::from(path);
            config.data_path = Some(if path.is_relative() {
                config_path
                    .parent()
                    .map(|dir| dir.join(&path))
                    .unwrap_or(path)
            } else {
                path
            });
        }
    }

    // -- Query --
    if let Some(q) = raw.query.outlier_quantile {
        if let Some(q) = in_range(
            "[query] outlier_quantile",
            q,
            constants::MIN_OUTLIER_QUANTILE..=constants::MAX_OUTLIER_QUANTILE,
            constants::DEFAULT_OUTLIER_QUANTILE,
            &mut warnings,
        ) {
            config.outlier_quantile = q;
        }
    }
    if let Some(cap) = raw.query.cap_outliers {
        config.cap_outliers = cap;
    }

    // -- Display --
    if let Some(rows) = raw.display.table_rows {
        if let Some(rows) = in_range(
            "[display] table_rows",
            rows,
            constants::MIN_TABLE_ROWS..=constants::MAX_TABLE_ROWS,
            constants::DEFAULT_TABLE_ROWS,
            &mut warnings,
        ) {
            config.table_rows = rows;
        }
    }
    if let Some(width) = raw.display.bar_width {
        if let Some(width) = in_range(
            "[display] bar_width",
            width,
            constants::MIN_BAR_WIDTH..=constants::MAX_BAR_WIDTH,
            constants::DEFAULT_BAR_WIDTH,
            &mut warnings,
        ) {
            config.bar_width = width;
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}

/// Load and validate the config file at `config_path`.
///
/// A missing file is not an error (first run): defaults, no warnings, unless
/// `required` is set because the user named the file explicitly.
/// Unreadable or unparsable files fall back to defaults with a warning.
pub fn load_config(config_path: &Path, required: bool) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        let mut warnings = Vec::new();
        if required {
            warnings.push(format!(
                "Config file '{}' does not exist. Using defaults.",
                config_path.display()
            ));
        }
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    parse_config(&content, config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> (AppConfig, Vec<String>) {
        parse_config(text, Path::new("/etc/nyhousing/config.toml"))
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = parse(
            r#"
            [data]
            path = "/data/ny.csv"

            [query]
            outlier_quantile = 0.95
            cap_outliers = true

            [display]
            table_rows = 100
            bar_width = 60

            [logging]
            level = "debug"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.data_path, Some(PathBuf::from("/data/ny.csv")));
        assert_eq!(config.outlier_quantile, 0.95);
        assert!(config.cap_outliers);
        assert_eq!(config.table_rows, 100);
        assert_eq!(config.bar_width, 60);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_relative_data_path_resolves_against_config_dir() {
        let (config, _) = parse("[data]\npath = \"ny.csv\"\n");
        assert_eq!(
            config.data_path,
            Some(PathBuf::from("/etc/nyhousing/ny.csv"))
        );
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let (config, warnings) = parse(
            "[query]\noutlier_quantile = 0.1\n[display]\ntable_rows = 0\nbar_width = 5000\n\
             [logging]\nlevel = \"loud\"\n",
        );
        assert_eq!(warnings.len(), 4, "{warnings:?}");
        assert_eq!(config.outlier_quantile, constants::DEFAULT_OUTLIER_QUANTILE);
        assert_eq!(config.table_rows, constants::DEFAULT_TABLE_ROWS);
        assert_eq!(config.bar_width, constants::DEFAULT_BAR_WIDTH);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_invalid_toml_falls_back_with_warning() {
        let (config, warnings) = parse("[query\noutlier_quantile = ");
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(load_config(&path, false).1.is_empty());
        assert_eq!(load_config(&path, true).1.len(), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[display]\ntable_rows = 7").unwrap();

        let (config, warnings) = load_config(&path, true);
        assert!(warnings.is_empty());
        assert_eq!(config.table_rows, 7);
    }
}
