// nodeforge-core/src/install.rs
use std::fs;
use std::path::Path;

use nodeforge_common::config::RUNTIME_BINARY;
use nodeforge_common::error::{ForgeError, Result};
use tracing::info;

/// Copies the staged runtime binary to the caller's output path, overwriting
/// whatever is there. `fs::copy` keeps the executable bit.
pub fn install_binary(staging_bin_dir: &Path, output_path: &Path) -> Result<()> {
    info!("Installing to {} ...", output_path.display());
    let built = staging_bin_dir.join(RUNTIME_BINARY);
    fs::copy(&built, output_path).map_err(|e| {
        ForgeError::BinaryInstall(
            output_path.display().to_string(),
            format!("{}: {}", built.display(), e),
        )
    })?;
    Ok(())
}
