//! Tool configuration loaded from a TOML file.
//!
//! All fields have defaults, so the tool works with no config file at
//! all. A minimal file overriding the preview budget and adding one
//! extension group looks like:
//!
//! ```toml
//! [preview]
//! max_chars = 200
//!
//! [[groups]]
//! name = "web"
//! extensions = ["html", "css", "js"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ScanError, ScanResult};
use crate::group::GroupMap;
use crate::preview::DEFAULT_PREVIEW_CHARS;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preview: PreviewConfig,
    /// User-defined extension groups. Section order is the priority when
    /// two sections claim the same extension.
    #[serde(default)]
    pub groups: Vec<GroupSection>,
}

/// Preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Characters shown per preview excerpt.
    #[serde(default = "default_preview_chars")]
    pub max_chars: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_chars: default_preview_chars(),
        }
    }
}

/// One named extension group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSection {
    /// Group label shown in the grouped display.
    pub name: String,
    /// Extensions belonging to this group (no leading dots).
    #[serde(default)]
    pub extensions: Vec<String>,
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotFound`] if the file does not exist.
    /// - [`ScanError::PermissionDenied`] if the file is not readable.
    /// - [`ScanError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> ScanResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path.to_path_buf()),
            _ => ScanError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| ScanError::ConfigParse(e.to_string()))
    }

    /// Builds the extension lookup for grouping.
    ///
    /// User sections are inserted first in their declared order, then
    /// the built-in defaults fill in anything not covered. Since first
    /// definition wins, a user section can reassign any default.
    pub fn group_map(&self) -> GroupMap {
        let mut map = GroupMap::new();
        for section in &self.groups {
            for ext in &section.extensions {
                map.insert(ext, &section.name);
            }
        }
        for (label, extensions) in crate::group::DEFAULT_GROUPS {
            for ext in *extensions {
                map.insert(ext, label);
            }
        }
        map
    }
}
