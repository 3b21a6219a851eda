// nodeforge-core/src/pipeline.rs
use nodeforge_common::config::Config;
use nodeforge_common::error::Result;
use tracing::info;

use crate::{build, extract, inject, install, workspace};

/// Drives the whole build pipeline. Stages run strictly in order and the
/// first failure aborts the run; later stages never execute. Stages whose
/// target artifact already exists skip themselves, so re-running after a
/// failure resumes where the previous run left off.
pub async fn run(config: &Config) -> Result<()> {
    config.validate()?;

    workspace::prepare_dir(&config.tmp_dir)?;

    let tarball = config.tarball_path();
    nodeforge_net::fetch_source_tarball(&config.dist_url(), &tarball).await?;

    let source_dir = config.source_dir();
    workspace::prepare_dir(&source_dir)?;
    extract::unpack_source(&tarball, &source_dir)?;

    inject::inject_entry_script(&source_dir, &config.source_files)?;

    build::build_runtime(config).await?;

    install::install_binary(&config.staging_bin_dir(), &config.output_path)?;

    info!("DONE.");
    Ok(())
}
