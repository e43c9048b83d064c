// NYHousing - core/dataset.rs
//
// Reads the listings table and cleans it into a `ListingCollection`.
// Core layer: accepts `Read` (CSV) or `Read + Seek` (workbook) handles; the
// platform layer opens files.
//
// Cleaning happens exactly once here, and both formats share it. A row is
// dropped only when price, beds, bath, or area is missing (or not a finite
// number), or when its price is negative.

use crate::core::model::{GeoPoint, Listing, ListingCollection, LoadReport, RoomCount};
use crate::util::constants::{
    COL_ADDRESS, COL_BATH, COL_BEDS, COL_LATITUDE, COL_LOCALITY, COL_LONGITUDE, COL_PRICE,
    COL_SQFT, REQUIRED_COLUMNS, WORKBOOK_EXTENSIONS,
};
use crate::util::error::LoadError;
use calamine::{Data, Reader};
use serde::Deserialize;
use std::io::{Read, Seek};
use std::path::Path;

/// Supported table formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Workbook,
}

impl DataFormat {
    /// Pick the format from the file extension (case-insensitive). Anything
    /// that is not a known spreadsheet extension is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_workbook {
            Self::Workbook
        } else {
            Self::Csv
        }
    }
}

/// One row as it appears in the source, before cleaning.
///
/// For CSV, `csv::invalid_option` turns unparsable numbers into `None`, so
/// text such as "N/A" in a numeric column counts as missing rather than
/// failing the load. Workbook cells follow the same rule.
#[derive(Debug, Default, Deserialize)]
struct RawRow {
    #[serde(rename = "PRICE", deserialize_with = "csv::invalid_option")]
    price: Option<f64>,
    #[serde(rename = "BEDS", deserialize_with = "csv::invalid_option")]
    beds: Option<f64>,
    #[serde(rename = "BATH", deserialize_with = "csv::invalid_option")]
    bath: Option<f64>,
    #[serde(rename = "PROPERTYSQFT", deserialize_with = "csv::invalid_option")]
    sqft: Option<f64>,
    #[serde(rename = "LOCALITY", default)]
    locality: Option<String>,
    #[serde(rename = "LATITUDE", deserialize_with = "csv::invalid_option")]
    latitude: Option<f64>,
    #[serde(rename = "LONGITUDE", deserialize_with = "csv::invalid_option")]
    longitude: Option<f64>,
    #[serde(rename = "ADDRESS", default)]
    address: Option<String>,
}

/// Why a row did not become a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    Missing(&'static str),
    Invalid(&'static str),
}

/// A numeric cell counts as present only if it parsed and is finite
/// ("nan" and "inf" parse as floats).
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn room_count(value: Option<f64>, column: &'static str) -> Result<RoomCount, Rejection> {
    value
        .and_then(RoomCount::new)
        .ok_or(Rejection::Missing(column))
}

impl RawRow {
    fn into_listing(self) -> Result<Listing, Rejection> {
        let price = finite(self.price).ok_or(Rejection::Missing(COL_PRICE))?;
        let beds = room_count(self.beds, COL_BEDS)?;
        let baths = room_count(self.bath, COL_BATH)?;
        let sqft = finite(self.sqft).ok_or(Rejection::Missing(COL_SQFT))?;

        if price < 0.0 {
            return Err(Rejection::Invalid(COL_PRICE));
        }

        let location = match (finite(self.latitude), finite(self.longitude)) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(Listing {
            price,
            beds,
            baths,
            sqft,
            locality: non_blank(self.locality),
            location,
            address: non_blank(self.address).unwrap_or_default(),
        })
    }
}

/// Run every raw row through cleaning and tally the outcome.
fn clean_rows<I>(rows: I, source: &Path) -> Result<(ListingCollection, LoadReport), LoadError>
where
    I: IntoIterator<Item = Result<RawRow, LoadError>>,
{
    let mut report = LoadReport::default();
    let mut listings = Vec::new();

    for (row_idx, raw) in rows.into_iter().enumerate() {
        let raw = raw?;
        report.rows_read += 1;

        match raw.into_listing() {
            Ok(listing) => listings.push(listing),
            Err(Rejection::Missing(column)) => {
                report.dropped_missing += 1;
                tracing::trace!(row = row_idx + 1, column, "Row dropped: missing value");
            }
            Err(Rejection::Invalid(column)) => {
                report.dropped_invalid += 1;
                tracing::trace!(row = row_idx + 1, column, "Row dropped: value out of domain");
            }
        }
    }

    report.rows_kept = listings.len();

    tracing::info!(
        source = %source.display(),
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        dropped_missing = report.dropped_missing,
        dropped_invalid = report.dropped_invalid,
        "Dataset loaded"
    );

    Ok((ListingCollection::new(listings), report))
}

/// Position of every required column in `headers`.
fn locate_columns(headers: &[&str], source: &Path) -> Result<Vec<usize>, LoadError> {
    REQUIRED_COLUMNS
        .iter()
        .map(|&column| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: source.to_path_buf(),
                    column,
                })
        })
        .collect()
}

/// Parse and clean a CSV listings table.
///
/// `source` is only used for error messages and log fields.
///
/// # Errors
/// - `LoadError::MissingColumn` if a required header is absent.
/// - `LoadError::Csv` if the header or a record cannot be decoded.
pub fn load_listings<R: Read>(
    reader: R,
    source: &Path,
) -> Result<(ListingCollection, LoadReport), LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: source.to_path_buf(),
            source: e,
        })?
        .clone();
    locate_columns(&headers.iter().collect::<Vec<_>>(), source)?;

    let rows = csv_reader.deserialize::<RawRow>().map(|record| {
        record.map_err(|e| LoadError::Csv {
            path: source.to_path_buf(),
            source: e,
        })
    });
    clean_rows(rows, source)
}

// =============================================================================
// Workbook input
// =============================================================================

/// Numeric value of a cell. Text that parses as a number counts; anything
/// else is missing, matching the CSV rule.
fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(v) => Some(*v),
        Data::Int(v) => Some(*v as f64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn cell_text(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) => Some(s.clone()),
        Data::Float(v) => Some(v.to_string()),
        Data::Int(v) => Some(v.to_string()),
        _ => None,
    }
}

/// Build a raw row from workbook cells. `columns` holds the cell index of
/// each entry of `REQUIRED_COLUMNS`, in that order.
fn workbook_row(cells: &[Data], columns: &[usize]) -> RawRow {
    let cell = |column: &str| {
        REQUIRED_COLUMNS
            .iter()
            .position(|&c| c == column)
            .and_then(|i| columns.get(i))
            .and_then(|&idx| cells.get(idx))
    };

    RawRow {
        price: cell_number(cell(COL_PRICE)),
        beds: cell_number(cell(COL_BEDS)),
        bath: cell_number(cell(COL_BATH)),
        sqft: cell_number(cell(COL_SQFT)),
        locality: cell_text(cell(COL_LOCALITY)),
        latitude: cell_number(cell(COL_LATITUDE)),
        longitude: cell_number(cell(COL_LONGITUDE)),
        address: cell_text(cell(COL_ADDRESS)),
    }
}

/// Parse and clean the first worksheet of a spreadsheet (.xlsx, .xls, .ods).
///
/// The first row is the header; the same columns are required as for CSV.
///
/// # Errors
/// - `LoadError::Workbook` if the file is not a readable spreadsheet.
/// - `LoadError::EmptyWorkbook` if it has no worksheets.
/// - `LoadError::MissingColumn` if a required header is absent.
pub fn load_workbook<RS>(
    reader: RS,
    source: &Path,
) -> Result<(ListingCollection, LoadReport), LoadError>
where
    RS: Read + Seek + Clone,
{
    let workbook_err = |e| LoadError::Workbook {
        path: source.to_path_buf(),
        source: e,
    };

    let mut workbook = calamine::open_workbook_auto_from_rs(reader).map_err(workbook_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::EmptyWorkbook {
            path: source.to_path_buf(),
        })?
        .map_err(workbook_err)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|cells| {
            cells
                .iter()
                .map(|c| cell_text(Some(c)).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let names: Vec<&str> = headers.iter().map(String::as_str).collect();
    let columns = locate_columns(&names, source)?;

    tracing::debug!(
        source = %source.display(),
        columns = headers.len(),
        "Workbook header read"
    );

    clean_rows(rows.map(|cells| Ok(workbook_row(cells, &columns))), source)
}
