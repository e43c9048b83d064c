// NYHousing - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "NYHousing";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "NYHousing";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dataset
// =============================================================================

/// Dataset file used when neither the CLI nor config.toml names one.
pub const DEFAULT_DATA_FILE: &str = "NY-House-Dataset.xlsx";

/// Extensions read as spreadsheets; anything else is read as CSV.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Price column header.
pub const COL_PRICE: &str = "PRICE";

/// Bedroom count column header.
pub const COL_BEDS: &str = "BEDS";

/// Bathroom count column header.
pub const COL_BATH: &str = "BATH";

/// Property area column header (square feet).
pub const COL_SQFT: &str = "PROPERTYSQFT";

/// Locality column header.
pub const COL_LOCALITY: &str = "LOCALITY";

/// Latitude column header.
pub const COL_LATITUDE: &str = "LATITUDE";

/// Longitude column header.
pub const COL_LONGITUDE: &str = "LONGITUDE";

/// Address column header.
pub const COL_ADDRESS: &str = "ADDRESS";

/// Every header the input table must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_PRICE,
    COL_BEDS,
    COL_BATH,
    COL_SQFT,
    COL_LOCALITY,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_ADDRESS,
];

// =============================================================================
// Query defaults
// =============================================================================

/// Quantile used for the outlier price cap.
pub const DEFAULT_OUTLIER_QUANTILE: f64 = 0.99;

/// Smallest configurable outlier quantile. Below this the "cap" would cut
/// into the body of the distribution rather than its tail.
pub const MIN_OUTLIER_QUANTILE: f64 = 0.5;

/// Largest configurable outlier quantile (1.0 = cap at the true maximum).
pub const MAX_OUTLIER_QUANTILE: f64 = 1.0;

// =============================================================================
// Display defaults
// =============================================================================

/// Default number of rows printed in the matching-listings table.
pub const DEFAULT_TABLE_ROWS: usize = 25;

/// Minimum configurable table row limit.
pub const MIN_TABLE_ROWS: usize = 1;

/// Maximum configurable table row limit.
pub const MAX_TABLE_ROWS: usize = 10_000;

/// Default width in characters of the longest bar in a bar chart.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Minimum configurable bar width.
pub const MIN_BAR_WIDTH: usize = 10;

/// Maximum configurable bar width.
pub const MAX_BAR_WIDTH: usize = 200;

/// Number of geo points listed under a map section before truncating.
pub const MAP_PREVIEW_POINTS: usize = 10;

/// Maximum displayed length of an address cell in the listings table.
pub const MAX_ADDRESS_CELL_CHARS: usize = 48;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Export
// =============================================================================

/// Maximum number of listings that can be exported in a single operation.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
