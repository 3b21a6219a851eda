// nodeforge-core/src/workspace.rs
use std::fs::DirBuilder;
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use nodeforge_common::error::{ForgeError, Result};
use tracing::trace;

/// Ensures `path` exists as a directory, owner-only on unix. Creation is
/// single-level: a missing parent is a failure, not something to paper over.
pub fn prepare_dir(path: &Path) -> Result<()> {
    trace!("Preparing directory {}", path.display());
    if path.exists() {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    builder.mode(0o700);
    builder
        .create(path)
        .map_err(|e| ForgeError::DirectoryCreation(path.display().to_string(), e.to_string()))
}
