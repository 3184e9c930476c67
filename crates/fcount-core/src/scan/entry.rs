//! File entry representation.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::error::ScanResult;
use crate::ext;

/// A single file yielded by a traversal.
///
/// `FileEntry` is immutable after creation and is owned by whichever
/// reduction consumes it. The size is not stored: it is resolved on
/// demand via [`FileEntry::size`], so reductions that never ask for
/// sizes never pay for the metadata calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    name: String,
    extension: String,
}

impl FileEntry {
    /// Creates an entry for `path`, deriving the name and extension token.
    ///
    /// The name is re-composed to NFC so decomposed filenames (macOS)
    /// compare and render consistently. `case_sensitive` controls the
    /// extension token's case folding.
    pub fn new(path: PathBuf, case_sensitive: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let extension = ext::normalize(&name, case_sensitive);

        Self {
            path,
            name,
            extension,
        }
    }

    /// Returns the full path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name (last component of the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the extension token (see [`crate::ext::normalize`]).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the folder this entry lives in.
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Resolves the file size in bytes from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScanError::Io`] if the metadata cannot be read,
    /// e.g. when the file disappeared after being listed.
    pub fn size(&self) -> ScanResult<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }
}
