// nodeforge-core/src/build/mod.rs
pub mod exec;

use std::fs;

use nodeforge_common::config::Config;
use nodeforge_common::error::{ForgeError, Result};
use tracing::{debug, info};

use self::exec::{exit_code, run_command};

/// Runs the upstream autotools sequence inside the extracted source tree:
/// `./configure --prefix=<prefix>`, `make`, `make DESTDIR=<installdir>
/// install`. Each non-zero exit aborts immediately; half-built trees are
/// left in place for inspection.
pub async fn build_runtime(config: &Config) -> Result<()> {
    info!("Compiling node binary ...");

    let staging = config.staging_prefix_dir();
    fs::create_dir_all(&staging)
        .map_err(|e| ForgeError::DirectoryCreation(staging.display().to_string(), e.to_string()))?;

    let source_dir = config.source_dir();

    debug!("Running ./configure --prefix={}", config.prefix);
    let output = run_command(
        "./configure",
        &[format!("--prefix={}", config.prefix)],
        &source_dir,
    )
    .await?;
    if !output.status.success() {
        return Err(ForgeError::Configure(exit_code(&output)));
    }

    let make = which::which("make")
        .map_err(|_| ForgeError::CommandExec("make command not found on PATH".to_string()))?;

    debug!("Running make");
    let output = run_command(&make.to_string_lossy(), &[], &source_dir).await?;
    if !output.status.success() {
        return Err(ForgeError::Make(exit_code(&output)));
    }

    debug!("Running make DESTDIR={} install", config.install_dir.display());
    let output = run_command(
        &make.to_string_lossy(),
        &[
            format!("DESTDIR={}", config.install_dir.display()),
            "install".to_string(),
        ],
        &source_dir,
    )
    .await?;
    if !output.status.success() {
        return Err(ForgeError::MakeInstall(exit_code(&output)));
    }

    Ok(())
}
