use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::error::{LimitDatesError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
// `%.f` prints milliseconds only when present, so whole seconds stay short.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Reads a DMR export. Every column is loaded as text so permit and outfall
/// identifiers keep their leading zeros.
pub fn read_dmrs(path: &Path) -> Result<DataFrame> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LimitDatesError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => LimitDatesError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|source| LimitDatesError::Malformed {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `df` as CSV, going through a `.tmp` sibling so an interrupted write
/// never leaves a partial file at `path`.
pub fn write_limit_dates(df: &mut DataFrame, path: &Path) -> Result<()> {
    let io_error = |source| LimitDatesError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let tmp = tmp_path(path);
    let file = File::create(&tmp).map_err(io_error)?;

    let written = CsvWriter::new(file)
        .include_header(true)
        .with_date_format(Some(DATE_FORMAT.into()))
        .with_datetime_format(Some(DATETIME_FORMAT.into()))
        .finish(df);

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    fs::rename(&tmp, path).map_err(io_error)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
