//! Shared CSV plumbing: header validation, error mapping and atomic writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::debug;

use crate::error::{NetworkError, Result};

/// Open a headed CSV file for reading.
///
/// # Errors
///
/// Returns [`NetworkError::Read`] if the file cannot be opened.
pub fn open_reader(path: &Path) -> Result<csv::Reader<fs::File>> {
    let file = fs::File::open(path).map_err(|e| NetworkError::read(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file))
}

/// Read the header row of `reader`.
///
/// # Errors
///
/// Returns [`NetworkError::Read`] or [`NetworkError::MalformedRecord`] if the
/// header row cannot be decoded.
pub fn headers(reader: &mut csv::Reader<fs::File>, path: &Path) -> Result<StringRecord> {
    reader
        .headers()
        .cloned()
        .map_err(|e| map_csv_error(path, e))
}

/// Position of `column` in `headers`.
///
/// # Errors
///
/// Returns [`NetworkError::MissingColumn`] if the header is absent.
pub fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| NetworkError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Translate a `csv` error into the workspace taxonomy.
///
/// I/O failures become [`NetworkError::Read`]; everything else is a
/// malformed record tagged with the 1-based line it occurred on.
#[must_use]
pub fn map_csv_error(path: &Path, err: csv::Error) -> NetworkError {
    let row = err.position().map_or(0, csv::Position::line);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => NetworkError::read(path, source),
        kind => NetworkError::MalformedRecord {
            path: path.to_path_buf(),
            row,
            reason: describe_kind(&kind),
        },
    }
}

fn describe_kind(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        other => format!("{other:?}"),
    }
}

/// Create the parent directory of `path` if it does not exist yet.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| NetworkError::write(parent, e))?;
    }
    Ok(())
}

/// Write a CSV file through a sibling temp file renamed into place.
///
/// `fill` receives a writer with no header configured; rows serialized from
/// structs emit their own header on first write.
///
/// # Errors
///
/// Returns [`NetworkError::Write`] if any step fails. The temp file is left
/// behind on failure; the destination is never truncated.
pub fn write_atomically<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut csv::Writer<fs::File>) -> std::result::Result<(), csv::Error>,
{
    ensure_parent_dir(path)?;
    let tmp = temp_path(path);

    let file = fs::File::create(&tmp).map_err(|e| NetworkError::write(&tmp, e))?;
    let mut writer = csv::Writer::from_writer(file);
    fill(&mut writer).map_err(|e| NetworkError::write(path, io::Error::from(e)))?;
    writer.flush().map_err(|e| NetworkError::write(path, e))?;
    drop(writer);

    fs::rename(&tmp, path).map_err(|e| NetworkError::write(path, e))?;
    debug!(path = %path.display(), "csv written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "out".into(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_index_reports_missing_column() {
        let headers = StringRecord::from(vec!["nodeA", "nodeB"]);
        let err = column_index(&headers, "weight", Path::new("edges.csv"))
            .expect_err("weight is absent");
        assert!(matches!(
            err,
            NetworkError::MissingColumn { ref column, .. } if column == "weight"
        ));
    }

    #[test]
    fn column_index_ignores_byte_order_mark() {
        let headers = StringRecord::from(vec!["\u{feff}label", "text"]);
        assert_eq!(column_index(&headers, "label", Path::new("c.csv")).ok(), Some(0));
    }

    #[test]
    fn write_atomically_creates_parent_and_leaves_no_temp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/out.csv");

        write_atomically(&path, |w| w.write_record(["a", "b"])).expect("write");

        assert!(path.exists());
        assert!(!dir.path().join("nested/.out.csv.tmp").exists());
        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "a,b\n");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = open_reader(Path::new("/definitely/not/here.csv")).expect_err("no file");
        assert!(matches!(err, NetworkError::Read { .. }));
    }
}
