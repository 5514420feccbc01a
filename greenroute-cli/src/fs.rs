//! Filesystem helpers built on `cap-std` and `camino`.

use std::io::{self, BufReader, Write};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether a path exists and is a regular file.
fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode a JSON document from `path`.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
