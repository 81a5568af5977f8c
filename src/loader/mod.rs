//! Collaborator seams for the namespace registry.
//!
//! Two capabilities the registry depends on but does not implement:
//!
//! - [`ArtifactLoader`]: turns a resolved file path into an in-memory
//!   artifact. Invoked at most once per fully-qualified name.
//! - [`FsProbe`]: existence/kind checks used to decide whether an
//!   unregistered segment corresponds to a real subdirectory.
//!
//! [`RealFs`] is the production probe; [`StringLoader`] is a minimal
//! bundled loader that reads files as UTF-8 text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ============================================================================
// LoadError
// ============================================================================

/// Failure of the artifact-loading collaborator.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid artifact in `{path}`: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

// ============================================================================
// ArtifactLoader
// ============================================================================

/// Turns a resolved absolute file path into a loaded artifact.
///
/// The registry treats the artifact as an opaque handle: it is cached by
/// fully-qualified name and handed back on every later request, so the
/// loader runs at most once per name.
pub trait ArtifactLoader {
    /// The opaque loaded definition.
    type Artifact;

    /// File extension (without the dot) this loader expects, e.g. `"txt"`.
    ///
    /// Used by the registry to compute candidate file paths.
    fn extension(&self) -> &str;

    /// Load the artifact stored at `path`.
    fn load(&self, path: &Path) -> Result<Self::Artifact, LoadError>;
}

// ============================================================================
// FsProbe
// ============================================================================

/// Filesystem existence checks used during lazy namespace discovery.
///
/// `Ok(false)` means "nothing usable at this path" (missing entry, or an
/// entry of the wrong kind); `Err` is reserved for genuine I/O failures
/// so callers can tell "not found" apart from "could not look".
pub trait FsProbe {
    fn dir_exists(&self, path: &Path) -> io::Result<bool>;
    fn file_exists(&self, path: &Path) -> io::Result<bool>;
}

/// Probe backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FsProbe for RealFs {
    fn dir_exists(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn file_exists(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

// ============================================================================
// StringLoader
// ============================================================================

/// Loads artifacts as UTF-8 text.
///
/// The simplest useful loader: the artifact is the file's contents.
#[derive(Debug, Clone)]
pub struct StringLoader {
    extension: String,
}

impl StringLoader {
    /// Create a loader for files with the given extension (without the dot).
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl ArtifactLoader for StringLoader {
    type Artifact = String;

    fn extension(&self) -> &str {
        &self.extension
    }

    fn load(&self, path: &Path) -> Result<String, LoadError> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => Err(LoadError::Invalid {
                path: path.to_path_buf(),
                reason: "not valid UTF-8".to_string(),
            }),
            Err(err) => Err(LoadError::Io(path.to_path_buf(), err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn real_fs_distinguishes_kinds() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "hi").unwrap();

        let probe = RealFs;
        assert!(probe.dir_exists(dir.path()).unwrap());
        assert!(!probe.dir_exists(&file).unwrap());
        assert!(probe.file_exists(&file).unwrap());
        assert!(!probe.file_exists(dir.path()).unwrap());
        assert!(!probe.file_exists(&dir.path().join("missing.txt")).unwrap());
    }

    #[test]
    fn string_loader_reads_contents() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("greeting.txt");
        fs::write(&file, "hello").unwrap();

        let loader = StringLoader::new("txt");
        assert_eq!(loader.extension(), "txt");
        assert_eq!(loader.load(&file).unwrap(), "hello");
    }

    #[test]
    fn string_loader_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let loader = StringLoader::new("txt");
        let err = loader.load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(..)));
    }

    #[test]
    fn string_loader_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bin.txt");
        fs::write(&file, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let loader = StringLoader::new("txt");
        let err = loader.load(&file).unwrap_err();
        assert!(matches!(err, LoadError::Invalid { .. }));
    }
}
