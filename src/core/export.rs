// NYHousing - core/export.rs
//
// CSV and JSON export of filtered listings.
// Core layer: writes to any Write trait object.

use crate::core::model::Listing;
use crate::util::constants::{self, MAX_EXPORT_ENTRIES};
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export format, picked from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` exports JSON; everything else exports CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

fn check_limit(count: usize) -> Result<(), ExportError> {
    if count > MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count,
            max: MAX_EXPORT_ENTRIES,
        });
    }
    Ok(())
}

/// Export listings to CSV using the source column names.
///
/// Prices are written as plain numbers, not currency strings, so the file
/// can be loaded back. Missing values are empty cells.
pub fn export_csv<W: Write>(
    listings: &[&Listing],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(listings.len())?;

    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            constants::COL_PRICE,
            constants::COL_BEDS,
            constants::COL_BATH,
            constants::COL_SQFT,
            constants::COL_LOCALITY,
            constants::COL_LATITUDE,
            constants::COL_LONGITUDE,
            constants::COL_ADDRESS,
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for listing in listings {
        let (lat, lon) = listing
            .location
            .map(|p| (p.latitude.to_string(), p.longitude.to_string()))
            .unwrap_or_default();

        csv_writer
            .write_record([
                listing.price.to_string(),
                listing.beds.to_string(),
                listing.baths.value().to_string(),
                listing.sqft.to_string(),
                listing.locality.clone().unwrap_or_default(),
                lat,
                lon,
                listing.address.clone(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %export_path.display(), count, "CSV export written");
    Ok(count)
}

/// Export listings to JSON (array of objects).
pub fn export_json<W: Write>(
    listings: &[&Listing],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_limit(listings.len())?;

    serde_json::to_writer_pretty(writer, listings).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %export_path.display(), count = listings.len(), "JSON export written");
    Ok(listings.len())
}
