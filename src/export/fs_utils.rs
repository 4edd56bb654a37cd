use crate::errors::{AppError, AppResult};
use std::path::Path;

/// A target file may be written when it does not exist yet, or when
/// `force` is set.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    Err(AppError::Export(format!(
        "'{}' already exists (use --force to overwrite)",
        path.display()
    )))
}
