//! Validation of local CSV sources before they are parsed
//!
//! Checks, in order:
//! - the path exists, is readable and is not a directory
//! - the size is within [`MAX_FILE_SIZE`]
//! - no other process holds the file open exclusively
//! - the content does not look binary

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::error::GridError;

/// Maximum file size in bytes (50 MB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Reasons a local file cannot be opened
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FileOpenError {
    #[error("file not found")]
    NotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("is a directory")]
    IsDirectory,
    /// Contains NUL bytes in the first 8 KB
    #[error("binary file")]
    BinaryFile,
    #[error("file too large ({size_mb:.1} MB)")]
    TooLarge { size_mb: f64 },
    /// Held open by another process (e.g. a spreadsheet application)
    #[error("file is in use by another process")]
    Locked,
    #[error("{0}")]
    IoError(String),
}

impl FileOpenError {
    /// Message suitable for a status line
    pub fn user_message(&self, filename: &str) -> String {
        match self {
            Self::NotFound => format!("File not found: {}", filename),
            Self::PermissionDenied => format!("Permission denied: {}", filename),
            Self::IsDirectory => format!("Cannot open directory: {}", filename),
            Self::BinaryFile => format!("Cannot open binary file: {}", filename),
            Self::TooLarge { size_mb } => format!(
                "{} is too large ({:.1} MB, max {} MB)",
                filename,
                size_mb,
                MAX_FILE_SIZE / (1024 * 1024)
            ),
            Self::Locked => format!("{} is open in another program; close it and retry", filename),
            Self::IoError(msg) => format!("Error opening {}: {}", filename, msg),
        }
    }

    /// Convert into the engine error, keeping lock failures distinct
    pub fn into_grid_error(self, path: &Path) -> GridError {
        match self {
            Self::Locked => GridError::FileLocked(path.to_path_buf()),
            other => GridError::FileOpen {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

/// Run every check on a local source
pub fn validate_source(path: &Path) -> Result<(), FileOpenError> {
    validate_file_for_opening(path)?;
    if is_locked(path) {
        return Err(FileOpenError::Locked);
    }
    if is_likely_binary(path) {
        return Err(FileOpenError::BinaryFile);
    }
    Ok(())
}

/// Existence, type and size checks
pub fn validate_file_for_opening(path: &Path) -> Result<(), FileOpenError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FileOpenError::NotFound,
        std::io::ErrorKind::PermissionDenied => FileOpenError::PermissionDenied,
        _ => FileOpenError::IoError(e.to_string()),
    })?;

    if metadata.is_dir() {
        return Err(FileOpenError::IsDirectory);
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(FileOpenError::TooLarge {
            size_mb: metadata.len() as f64 / (1024.0 * 1024.0),
        });
    }

    Ok(())
}

/// Whether another process holds the file open without read/write sharing.
///
/// Windows only: opens with share mode 0 and looks for a sharing violation.
/// Other platforms have advisory locks only and always report `false`.
#[cfg(windows)]
pub fn is_locked(path: &Path) -> bool {
    use std::os::windows::fs::OpenOptionsExt;

    const ERROR_SHARING_VIOLATION: i32 = 32;
    const ERROR_LOCK_VIOLATION: i32 = 33;

    match fs::OpenOptions::new().read(true).share_mode(0).open(path) {
        Ok(_) => false,
        Err(e) => matches!(
            e.raw_os_error(),
            Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
        ),
    }
}

#[cfg(not(windows))]
pub fn is_locked(_path: &Path) -> bool {
    false
}

/// Check the first 8 KB for NUL bytes.
///
/// Returns `false` on read errors; the real open reports those better.
pub fn is_likely_binary(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut buffer = [0u8; 8192];
    let Ok(bytes_read) = file.read(&mut buffer) else {
        return false;
    };

    buffer[..bytes_read].contains(&0)
}

/// File name for error messages
pub fn filename_for_display(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
