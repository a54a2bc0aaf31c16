//! File Access Module
//! Preflight checks on the input and report paths, plus reading the CSV text
//! and persisting the finished report.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("File {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("File {} is not a regular file", .0.display())]
    NotAFile(PathBuf),
    #[error("File {} cannot be opened.", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("File {} cannot be written to.", .0.display())]
    NotWritable(PathBuf),
    #[error("I/O error with file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensure `path` names an existing regular file that can be opened for reading.
pub fn check_readable(path: &Path) -> Result<(), FileError> {
    let metadata = fs::metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        _ => FileError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if !metadata.is_file() {
        return Err(FileError::NotAFile(path.to_path_buf()));
    }

    File::open(path).map_err(|source| FileError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "input is readable");
    Ok(())
}

/// Ensure a report can be written to `path` without touching it.
///
/// The parent directory must exist. An existing target must be a regular,
/// non read-only file.
pub fn check_writable(path: &Path) -> Result<(), FileError> {
    let not_writable = || FileError::NotWritable(path.to_path_buf());

    match fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_file() || metadata.permissions().readonly() {
                return Err(not_writable());
            }
        }
        Err(_) => {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            if !parent.is_dir() {
                return Err(not_writable());
            }
        }
    }

    debug!(path = %path.display(), "report path is writable");
    Ok(())
}

/// Read the whole input file as text.
pub fn read_input(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the report verbatim, replacing any previous content.
pub fn write_report(path: &Path, report: &str) -> Result<(), FileError> {
    fs::write(path, report).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
