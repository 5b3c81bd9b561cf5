//! Centralized validation and helper functions.

use std::path::{Path, PathBuf};

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} does not exist.")]
    NotFound(String),
    #[error("{0} is a directory.")]
    IsDirectory(String),
    #[error("Empty path provided")]
    EmptyPath,
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

/// Check that a path points to an existing regular file.
///
/// # Errors
///
/// Returns `ValidationError::EmptyPath` for an empty path,
/// `ValidationError::IsDirectory` for a directory, or
/// `ValidationError::NotFound` if nothing exists at the path.
pub fn validate_input_file(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::EmptyPath);
    }

    if path.is_file() {
        return Ok(());
    }

    if path.is_dir() {
        Err(ValidationError::IsDirectory(display_name(path)))
    } else {
        Err(ValidationError::NotFound(display_name(path)))
    }
}

/// clap value parser for required input files
///
/// # Errors
///
/// Returns the validation message when the path is not an existing file.
pub fn existing_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    validate_input_file(&path).map_err(|e| e.to_string())?;
    Ok(path)
}
