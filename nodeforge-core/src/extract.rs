// nodeforge-core/src/extract.rs
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use nodeforge_common::error::{ForgeError, Result};
use tar::Archive;
use tracing::debug;

/// File whose presence at the extraction root marks the tarball as already
/// unpacked. Every upstream release tarball ships a `configure` script at
/// its top level.
const UNPACKED_MARKER: &str = "configure";

/// Leading path components stripped from every entry, flattening the
/// `node-vX.Y.Z/` wrapper directory into the target.
const STRIP_COMPONENTS: usize = 1;

/// Unpacks the gzipped source tarball into `target_dir`, skipping entirely
/// when the marker file is already present.
pub fn unpack_source(archive_path: &Path, target_dir: &Path) -> Result<()> {
    if target_dir.join(UNPACKED_MARKER).exists() {
        debug!("{} already unpacked", target_dir.display());
        return Ok(());
    }
    debug!(
        "Unpacking {} to {}",
        archive_path.display(),
        target_dir.display()
    );

    let file = File::open(archive_path)
        .map_err(|e| unpack_err(archive_path, format!("Failed to open archive: {e}")))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    let entries = archive
        .entries()
        .map_err(|e| unpack_err(archive_path, format!("Failed to read archive: {e}")))?;
    for entry_result in entries {
        let mut entry = entry_result
            .map_err(|e| unpack_err(archive_path, format!("Error reading TAR entry: {e}")))?;
        let entry_path = entry
            .path()
            .map_err(|e| unpack_err(archive_path, format!("Invalid path in TAR entry: {e}")))?
            .into_owned();

        let Some(target_path) = stripped_target(&entry_path, target_dir, archive_path)? else {
            debug!("Skipping entry stripped to nothing: {:?}", entry_path);
            continue;
        };
        if !target_path.starts_with(target_dir) {
            return Err(unpack_err(
                archive_path,
                format!("Path traversal detected for entry {}", entry_path.display()),
            ));
        }

        if let Some(parent) = target_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    unpack_err(
                        archive_path,
                        format!("Failed to create {}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        entry.unpack(&target_path).map_err(|e| {
            unpack_err(
                archive_path,
                format!("Failed to unpack {}: {}", target_path.display(), e),
            )
        })?;
    }

    Ok(())
}

/// Entry path with [`STRIP_COMPONENTS`] leading components removed, joined
/// onto `target_dir`. `None` when nothing is left after stripping.
fn stripped_target(
    entry_path: &Path,
    target_dir: &Path,
    archive_path: &Path,
) -> Result<Option<PathBuf>> {
    let mut target_path = target_dir.to_path_buf();
    let mut pushed = false;
    for comp in entry_path.components().skip(STRIP_COMPONENTS) {
        match comp {
            Component::Normal(p) => {
                target_path.push(p);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                return Err(unpack_err(
                    archive_path,
                    format!(
                        "Disallowed component {:?} in TAR path {}",
                        comp,
                        entry_path.display()
                    ),
                ));
            }
        }
    }
    Ok(pushed.then_some(target_path))
}

fn unpack_err(archive_path: &Path, reason: String) -> ForgeError {
    ForgeError::Unpack(archive_path.display().to_string(), reason)
}
