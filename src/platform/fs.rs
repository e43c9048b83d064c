// NYHousing - platform/fs.rs
//
// Filesystem access for the dataset and export targets.
// The core layer only ever sees `Read` / `Write` handles.

use crate::util::error::{ExportError, LoadError};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Cursor};
use std::path::Path;

/// Open the listings table at `path` for buffered reading.
pub fn open_dataset(path: &Path) -> Result<BufReader<File>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "Opened dataset");
    Ok(BufReader::new(file))
}

/// Read a spreadsheet into memory. Workbook readers need to seek and to try
/// more than one container format, so they get an in-memory cursor.
pub fn read_workbook(path: &Path) -> Result<Cursor<Vec<u8>>, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read workbook");
    Ok(Cursor::new(bytes))
}

/// Create (or truncate) an export target.
pub fn create_export_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })
}

/// True when `err` means the file simply is not there.
pub fn is_not_found(err: &LoadError) -> bool {
    matches!(err, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_dataset(&dir.path().join("nope.csv")).unwrap_err();
        assert!(is_not_found(&err), "got {err:?}");
    }

    #[test]
    fn test_missing_workbook_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_workbook(&dir.path().join("nope.xlsx")).unwrap_err();
        assert!(is_not_found(&err), "got {err:?}");
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = create_export_file(&dir.path().join("missing").join("out.csv"));
        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
