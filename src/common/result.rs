use crate::common::error::SuperdevError;
use std::path::PathBuf;

/// Result alias used throughout the crate.
///
/// # Examples
///
/// ```
/// use superdev::common::result::SuperdevResult;
/// use superdev::common::error::SuperdevError;
///
/// fn load() -> SuperdevResult<()> {
///     Err(SuperdevError::config_error("no catalog"))
/// }
///
/// assert!(load().is_err());
/// ```
pub type SuperdevResult<T> = Result<T, SuperdevError>;

/// Conversion helpers from foreign results into [`SuperdevResult`].
pub trait ResultExt<T, E> {
    /// Wrap an I/O failure with a message and the path it concerned.
    fn with_filesystem_error(self, message: impl Into<String>, path: Option<PathBuf>) -> SuperdevResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(self, message: impl Into<String>, path: Option<PathBuf>) -> SuperdevResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| SuperdevError::filesystem_error_with_source(message, path, e.into()))
    }
}
