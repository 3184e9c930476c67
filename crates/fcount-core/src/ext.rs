//! Extension token derivation.
//!
//! Every file name maps to exactly one extension token: the substring after
//! the last `.`, or the reserved [`NO_EXTENSION`] token when there is no
//! usable suffix. A leading run of dots marks a hidden file, not a suffix
//! separator, so `.gitignore` has no extension while `.hidden_file.txt`
//! has `txt`.

use std::path::Path;

/// Reserved token for files without an extension.
pub const NO_EXTENSION: &str = ".";

/// Sentinel accepted on the command line for "any extension".
pub const ANY_EXTENSION: &str = "..";

/// Derives the extension token for a file name or path.
///
/// When `case_sensitive` is `false` the token is upper-cased, so `Txt`
/// and `TXT` collapse into one token. Never fails: any input maps to a
/// token, falling back to [`NO_EXTENSION`].
///
/// ```
/// use fcount_core::ext::normalize;
///
/// assert_eq!(normalize("select2.3805311d5fc1.css.gz", false), "GZ");
/// assert_eq!(normalize(".gitignore", false), ".");
/// assert_eq!(normalize("Pipfile", false), ".");
/// assert_eq!(normalize(".hidden_file.txt", false), "TXT");
/// ```
pub fn normalize(filename: &str, case_sensitive: bool) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    // Leading dots are a hidden-file marker, never a suffix separator.
    let stem = name.trim_start_matches('.');
    let suffix = match stem.rfind('.') {
        Some(pos) => &stem[pos + 1..],
        None => return NO_EXTENSION.to_string(),
    };
    if suffix.is_empty() {
        return NO_EXTENSION.to_string();
    }

    if case_sensitive {
        suffix.to_string()
    } else {
        suffix.to_uppercase()
    }
}

/// An extension filter value as given by the caller.
///
/// `..` matches every file, `.` matches only files without an extension,
/// and anything else names a concrete extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionSpec {
    /// Match every file regardless of extension.
    Any,
    /// Match only files whose token is [`NO_EXTENSION`].
    NoExtension,
    /// Match files with this concrete extension.
    Concrete(String),
}

impl ExtensionSpec {
    /// Parses a raw filter value, accepting the `..` / `.` sentinels.
    ///
    /// A single leading dot on a concrete value is dropped, so `.txt`
    /// and `txt` mean the same thing.
    pub fn parse(raw: &str) -> Self {
        match raw {
            ANY_EXTENSION => Self::Any,
            NO_EXTENSION => Self::NoExtension,
            other => {
                let trimmed = other.strip_prefix('.').unwrap_or(other);
                Self::Concrete(trimmed.to_string())
            }
        }
    }

    /// Tests an already-normalized token against this filter.
    ///
    /// `case_sensitive` must match the policy the token was normalized
    /// with, otherwise case-insensitive tokens (upper-cased) would never
    /// equal a lower-case filter value.
    pub fn matches(&self, token: &str, case_sensitive: bool) -> bool {
        match self {
            Self::Any => true,
            Self::NoExtension => token == NO_EXTENSION,
            Self::Concrete(ext) => {
                if case_sensitive {
                    token == ext
                } else {
                    token == ext.to_uppercase()
                }
            }
        }
    }
}
