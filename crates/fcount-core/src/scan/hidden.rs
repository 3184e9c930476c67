//! Platform hidden-file policy.
//!
//! Whether a path counts as "hidden" depends on the host platform. The
//! rules form a small closed set, selected once at startup rather than
//! probed per path.

use std::path::{Component, Path};

use crate::error::{ScanError, ScanResult};

/// How hidden files are recognised on the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenPolicy {
    /// POSIX rule: a name starting with `.` is hidden.
    DotPrefix,
    /// Windows rule: dot-prefix names plus the filesystem hidden attribute.
    DotPrefixOrAttribute,
    /// The platform defines no hidden-file semantics; nothing is hidden
    /// and hidden-exclusion is effectively off.
    Disabled,
}

impl HiddenPolicy {
    /// Selects the policy for the platform this process runs on.
    pub fn for_current_os() -> Self {
        if cfg!(windows) {
            Self::DotPrefixOrAttribute
        } else if cfg!(unix) {
            Self::DotPrefix
        } else {
            Self::Disabled
        }
    }

    /// Returns `true` when this platform can distinguish hidden entries.
    pub fn supports_hidden(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Returns `true` if a single directory entry is hidden.
    pub fn is_hidden_entry(&self, path: &Path) -> bool {
        let dotted = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false);
        match self {
            Self::Disabled => false,
            Self::DotPrefix => dotted,
            Self::DotPrefixOrAttribute => dotted || has_hidden_attribute(path),
        }
    }

    /// Returns `true` if any component of `path` is hidden.
    ///
    /// Used for the pre-traversal root check: a scan rooted inside a
    /// hidden folder is rejected as a whole rather than silently empty.
    pub fn path_is_hidden(&self, path: &Path) -> bool {
        if !self.supports_hidden() {
            return false;
        }
        let dotted = path.components().any(|c| {
            matches!(c, Component::Normal(name) if name.to_string_lossy().starts_with('.'))
        });
        match self {
            Self::DotPrefixOrAttribute => {
                dotted || path.ancestors().any(has_hidden_attribute)
            }
            _ => dotted,
        }
    }

    /// Fails fast when the scan root itself is hidden and hidden entries
    /// are excluded. Filesystem roots (drive paths) are exempt: their
    /// attributes are not meaningful for this check.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::HiddenRoot`] when the root is hidden,
    /// `include_hidden` is `false`, and the platform supports hiding.
    pub fn check_root(&self, root: &Path, include_hidden: bool) -> ScanResult<()> {
        if include_hidden || !self.supports_hidden() {
            return Ok(());
        }
        if root.parent().is_none() {
            return Ok(());
        }
        if self.path_is_hidden(root) {
            return Err(ScanError::HiddenRoot(root.to_path_buf()));
        }
        Ok(())
    }
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    std::fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_path: &Path) -> bool {
    false
}
