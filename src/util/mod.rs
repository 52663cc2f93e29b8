//! Utility modules

pub mod file_validation;

pub use file_validation::{
    filename_for_display, is_likely_binary, is_locked, validate_file_for_opening, validate_source,
    FileOpenError, MAX_FILE_SIZE,
};
