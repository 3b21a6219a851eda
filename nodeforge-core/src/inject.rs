// nodeforge-core/src/inject.rs
use std::fs;
use std::path::{Path, PathBuf};

use nodeforge_common::error::{ForgeError, Result};
use tracing::{debug, trace, warn};

/// Build manifest at the extraction root listing the library modules
/// compiled into the runtime.
pub const BUILD_MANIFEST: &str = "node.gyp";

/// Path inside the source tree where the entry script is staged. The build
/// picks this module up as the runtime's default main script.
pub const ENTRY_MODULE: &str = "lib/_third_party_main.js";

/// Manifest line the new module entry is appended after.
const MANIFEST_ANCHOR: &str = "'lib/zlib.js',\n";
const MANIFEST_PATCHED: &str = "'lib/zlib.js', 'lib/_third_party_main.js',\n";

/// Registers the caller's script as the runtime entry point: patches the
/// build manifest, then stages the script at [`ENTRY_MODULE`].
///
/// Only the first file in `source_files` is consumed. Trailing entries are
/// accepted by the argument parser for compatibility and never read.
pub fn inject_entry_script(source_dir: &Path, source_files: &[PathBuf]) -> Result<()> {
    trace!("Preparing source files into {}...", source_dir.display());
    let file = source_files.first().ok_or_else(|| {
        ForgeError::Usage("You need to specify at least one js file.".to_string())
    })?;
    if source_files.len() > 1 {
        debug!(
            "Using {}; ignoring {} additional source file(s)",
            file.display(),
            source_files.len() - 1
        );
    }

    let manifest_path = source_dir.join(BUILD_MANIFEST);
    let manifest = fs::read_to_string(&manifest_path)
        .map_err(|e| ForgeError::ManifestRead(manifest_path.display().to_string(), e.to_string()))?;

    let patched = manifest.replacen(MANIFEST_ANCHOR, MANIFEST_PATCHED, 1);
    if patched == manifest {
        // The build proceeds with the unmodified manifest; the resulting
        // runtime will lack the injected entry point.
        warn!(
            "Anchor {:?} not found in {}; manifest left unchanged",
            MANIFEST_ANCHOR.trim_end(),
            manifest_path.display()
        );
    }
    fs::write(&manifest_path, patched).map_err(|e| {
        ForgeError::ManifestWrite(manifest_path.display().to_string(), e.to_string())
    })?;

    let entry_path = source_dir.join(ENTRY_MODULE);
    fs::copy(file, &entry_path).map_err(|e| {
        ForgeError::SourceCopy(format!(
            "{} -> {}: {}",
            file.display(),
            entry_path.display(),
            e
        ))
    })?;
    debug!("Staged {} at {}", file.display(), entry_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "{\n  'sources': [\n    'lib/sys.js',\n    'lib/zlib.js',\n  ],\n}\n";

    fn source_tree(manifest: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(BUILD_MANIFEST), manifest).unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        dir
    }

    #[test]
    fn registers_the_entry_module_after_the_anchor() {
        let dir = source_tree(MANIFEST);
        let script = dir.path().join("main.js");
        fs::write(&script, "console.log('hi');\n").unwrap();

        inject_entry_script(dir.path(), &[script]).unwrap();

        let manifest = fs::read_to_string(dir.path().join(BUILD_MANIFEST)).unwrap();
        assert!(manifest.contains("'lib/zlib.js', 'lib/_third_party_main.js',\n"));
        let staged = fs::read_to_string(dir.path().join(ENTRY_MODULE)).unwrap();
        assert_eq!(staged, "console.log('hi');\n");
    }

    #[test]
    fn missing_anchor_leaves_the_manifest_unchanged() {
        let manifest = "{\n  'sources': [\n    'lib/sys.js',\n  ],\n}\n";
        let dir = source_tree(manifest);
        let script = dir.path().join("main.js");
        fs::write(&script, "x\n").unwrap();

        inject_entry_script(dir.path(), &[script]).unwrap();

        let after = fs::read_to_string(dir.path().join(BUILD_MANIFEST)).unwrap();
        assert_eq!(after, manifest);
        assert!(dir.path().join(ENTRY_MODULE).is_file());
    }

    #[test]
    fn only_the_first_source_file_is_consumed() {
        let dir = source_tree(MANIFEST);
        let first = dir.path().join("main.js");
        fs::write(&first, "first\n").unwrap();
        // The second entry does not even exist; it must never be read.
        let second = dir.path().join("missing.js");

        inject_entry_script(dir.path(), &[first, second]).unwrap();

        let staged = fs::read_to_string(dir.path().join(ENTRY_MODULE)).unwrap();
        assert_eq!(staged, "first\n");
    }

    #[test]
    fn missing_manifest_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("main.js");
        fs::write(&script, "x\n").unwrap();

        let err = inject_entry_script(dir.path(), &[script]).unwrap_err();
        assert!(matches!(err, ForgeError::ManifestRead(..)));
    }

    #[test]
    fn unreadable_script_is_a_copy_error() {
        let dir = source_tree(MANIFEST);
        let err =
            inject_entry_script(dir.path(), &[dir.path().join("missing.js")]).unwrap_err();
        assert!(matches!(err, ForgeError::SourceCopy(_)));
    }
}
