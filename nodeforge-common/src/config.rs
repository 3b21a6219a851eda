// nodeforge-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{ForgeError, Result};

/// Upstream release fetched when the caller does not pass `--ver`.
pub const DEFAULT_NODE_VERSION: &str = "0.10.36";

/// The dist server still serves release tarballs over plain http.
pub const DEFAULT_DIST_BASE_URL: &str = "http://nodejs.org/dist";

/// Name of the binary the upstream build drops into `<prefix>/bin`.
pub const RUNTIME_BINARY: &str = "node";

const DIST_MIRROR_ENV: &str = "NODEFORGE_DIST_MIRROR";

/// Parameters for one build run. Built once from command-line input and
/// never mutated; every workspace path the pipeline touches derives from it.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_path: PathBuf,
    pub tmp_dir: PathBuf,
    pub install_dir: PathBuf,
    pub prefix: String,
    pub version: String,
    pub dist_base_url: String,
    pub source_files: Vec<PathBuf>,
}

impl Config {
    pub fn new(
        output_path: PathBuf,
        tmp_dir: PathBuf,
        install_dir: PathBuf,
        prefix: String,
        version: String,
        source_files: Vec<PathBuf>,
    ) -> Self {
        let dist_base_url = env::var(DIST_MIRROR_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DIST_BASE_URL.to_string());
        debug!("Using dist base URL: {}", dist_base_url);

        Self {
            output_path: absolutize(&output_path),
            tmp_dir: absolutize(&tmp_dir),
            install_dir: absolutize(&install_dir),
            prefix,
            version,
            dist_base_url,
            source_files,
        }
    }

    /// Checks the parts of the run configuration the argument parser cannot
    /// enforce on its own.
    pub fn validate(&self) -> Result<()> {
        if self.source_files.is_empty() {
            return Err(ForgeError::Usage(
                "You need to specify at least one js file.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tarball_filename(&self) -> String {
        format!("node-v{}.tar.gz", self.version)
    }

    pub fn tarball_path(&self) -> PathBuf {
        self.tmp_dir.join(self.tarball_filename())
    }

    /// Directory the versioned source tree is unpacked into.
    pub fn source_dir(&self) -> PathBuf {
        self.tmp_dir.join(format!("node-v{}", self.version))
    }

    pub fn dist_url(&self) -> String {
        format!(
            "{}/v{}/{}",
            self.dist_base_url.trim_end_matches('/'),
            self.version,
            self.tarball_filename()
        )
    }

    /// Staging tree `make install` populates underneath the install dir.
    pub fn staging_prefix_dir(&self) -> PathBuf {
        self.install_dir.join(&self.prefix)
    }

    pub fn staging_bin_dir(&self) -> PathBuf {
        self.staging_prefix_dir().join("bin")
    }

    pub fn staged_binary_path(&self) -> PathBuf {
        self.staging_bin_dir().join(RUNTIME_BINARY)
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    }
}
