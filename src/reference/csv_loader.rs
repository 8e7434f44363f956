//! Loader for the semicolon separated reference dataset.
//!
//! Layout of the file:
//!
//! ```text
//! Station CM39 Hemnes; exported 2024-03-22      <- metadata banner, ignored
//! Date;rr3h(mm);...                             <- column headers
//! 21.03.2024 12:00;0.4;...
//! 21.03.2024 15:00;65535;...
//! ```

use crate::reference::error::ReferenceDataError;
use crate::types::reference_record::{ReferenceRecord, DATE_COLUMN, PRECIPITATION_3H_COLUMN};
use csv::{ErrorKind, ReaderBuilder, Trim};
use log::{debug, info};
use std::path::Path;

/// Reads every data row of a reference file, preserving file order.
///
/// # Errors
///
/// * [`ReferenceDataError::Io`] if the file cannot be read.
///
/// Bytes that are not valid UTF-8 (Latin-1 station exports) are replaced with
/// U+FFFD instead of failing the whole file.
/// * [`ReferenceDataError::MissingHeader`] if the file ends before the header row.
/// * [`ReferenceDataError::Parse`] if a row's field count differs from the header's.
/// * [`ReferenceDataError::MissingColumn`] if `Date` or `rr3h(mm)` is not a header.
pub fn load_reference_records(path: &Path) -> Result<Vec<ReferenceRecord>, ReferenceDataError> {
    let bytes = std::fs::read(path).map_err(|e| ReferenceDataError::Io(path.to_path_buf(), e))?;
    let content = String::from_utf8_lossy(&bytes);
    parse_reference_csv(&content, path)
}

/// Parses reference data already held in memory. `path` is only used in errors.
pub fn parse_reference_csv(
    content: &str,
    path: &Path,
) -> Result<Vec<ReferenceRecord>, ReferenceDataError> {
    let Some((_banner, body)) = content.split_once('\n') else {
        return Err(ReferenceDataError::MissingHeader {
            path: path.to_path_buf(),
        });
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReferenceDataError::Csv(path.to_path_buf(), e))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ReferenceDataError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    debug!("Reference file {} columns: {:?}", path.display(), headers);

    let column_index = |column: &str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ReferenceDataError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })
    };
    let date_idx = column_index(DATE_COLUMN)?;
    let precip_idx = column_index(PRECIPITATION_3H_COLUMN)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| {
            let unequal = match e.kind() {
                ErrorKind::UnequalLengths {
                    pos,
                    expected_len,
                    len,
                } => Some((
                    // +1 for the banner line stripped above
                    pos.as_ref().map_or(0, |p| p.line() + 1),
                    *expected_len as usize,
                    *len as usize,
                )),
                _ => None,
            };
            match unequal {
                Some((line, expected, found)) => ReferenceDataError::Parse {
                    path: path.to_path_buf(),
                    line,
                    expected,
                    found,
                },
                None => ReferenceDataError::Csv(path.to_path_buf(), e),
            }
        })?;

        let fields: Vec<(String, String)> = headers
            .iter()
            .cloned()
            .zip(row.iter().map(str::to_string))
            .collect();

        records.push(ReferenceRecord::new(
            row[date_idx].to_string(),
            row[precip_idx].to_string(),
            fields,
        ));
    }

    info!(
        "Loaded {} reference records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
