//! Error types for `fcount-core`.
//!
//! All fallible operations in the core library return [`ScanResult<T>`],
//! which is an alias for `Result<T, ScanError>`.

use std::path::PathBuf;

/// Unified error type for all core operations.
///
/// Only root-level precondition failures abort a scan; problems with
/// individual files or directories are collected as warnings during
/// traversal instead (see [`crate::scan::walk::ScanWarning`]).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The scan root is inside a hidden folder and hidden entries are excluded.
    #[error("{0} is hidden; use --all to include hidden files and folders")]
    HiddenRoot(PathBuf),

    /// A filename glob pattern failed to compile.
    #[error("invalid filename pattern: {0}")]
    InvalidPattern(String),

    /// Preview was requested for a file type without a preview procedure.
    #[error("preview is not available for this file type")]
    PreviewNotSupported,

    /// The external "file" utility is missing or misbehaving.
    #[error("the \"file\" utility is not usable: {0}")]
    FileUtilityUnavailable(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `fcount-core`.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_displays_path() {
        let err = ScanError::NotFound(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "path not found: /missing/dir");
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = ScanError::NotADirectory(PathBuf::from("/some/file.txt"));
        assert_eq!(err.to_string(), "not a directory: /some/file.txt");
    }

    #[test]
    fn permission_denied_displays_path() {
        let err = ScanError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }

    #[test]
    fn hidden_root_mentions_all_flag() {
        let err = ScanError::HiddenRoot(PathBuf::from("/home/user/.config"));
        assert!(err.to_string().contains("--all"));
    }

    #[test]
    fn invalid_pattern_displays_message() {
        let err = ScanError::InvalidPattern("unclosed class".to_string());
        assert_eq!(err.to_string(), "invalid filename pattern: unclosed class");
    }

    #[test]
    fn config_parse_displays_message() {
        let err = ScanError::ConfigParse("unexpected token".to_string());
        assert_eq!(err.to_string(), "config parse error: unexpected token");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn scan_result_ok() {
        let result: ScanResult<i32> = Ok(42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn error_is_debug() {
        let err = ScanError::PreviewNotSupported;
        let debug = format!("{:?}", err);
        assert!(debug.contains("PreviewNotSupported"));
    }
}
