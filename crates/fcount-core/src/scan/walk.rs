//! Lazy directory traversal under a scan policy.
//!
//! [`walk`] validates the root, then returns a [`Walker`]: a single-pass,
//! pull-based iterator over matching [`FileEntry`] values. Directory
//! handles are opened as the consumer advances and dropped as soon as a
//! level is exhausted (or the walker itself is dropped), so stopping
//! early leaks nothing. Unreadable directories never abort the scan:
//! their subtrees are skipped and recorded as [`ScanWarning`]s.

use std::fmt;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use globset::GlobBuilder;

use crate::error::{ScanError, ScanResult};
use crate::ext::{self, ExtensionSpec};
use crate::scan::entry::FileEntry;
use crate::scan::hidden::HiddenPolicy;

/// A compiled filename glob (`*`, `?`, `[seq]`, `[!seq]`).
///
/// Patterns match against file names only, never full paths, so `*`
/// may cross what would be a path separator in other contexts.
#[derive(Debug, Clone)]
pub struct NamePattern {
    matcher: globset::GlobMatcher,
    pattern: String,
}

impl NamePattern {
    /// Compiles `pattern`, honouring the case-sensitivity policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPattern`] when the glob does not
    /// compile (e.g. an unclosed character class).
    pub fn new(pattern: &str, case_sensitive: bool) -> ScanResult<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .literal_separator(false)
            .build()
            .map_err(|e| ScanError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            pattern: pattern.to_string(),
        })
    }

    /// Returns the original pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Tests a file name against the pattern.
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// What a traversal selects.
///
/// Extension filtering and filename matching are mutually exclusive
/// by construction: a policy holds exactly one of them.
#[derive(Debug, Clone)]
pub enum FileFilter {
    /// Match by extension token (see [`ExtensionSpec`]).
    Extension(ExtensionSpec),
    /// Match the file name against a glob pattern.
    Pattern(NamePattern),
}

/// Immutable per-invocation traversal policy.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Descend into subdirectories, or stay at the root level.
    pub recursive: bool,
    /// Include hidden files and folders.
    pub include_hidden: bool,
    /// Distinguish case variations in extensions and patterns.
    pub case_sensitive: bool,
    /// The active filter mode.
    pub filter: FileFilter,
}

impl Policy {
    /// A recursive, hidden-excluding, case-insensitive policy with the
    /// given filter — the defaults of the command line.
    pub fn new(filter: FileFilter) -> Self {
        Self {
            recursive: true,
            include_hidden: false,
            case_sensitive: false,
            filter,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new(FileFilter::Extension(ExtensionSpec::Any))
    }
}

/// A non-fatal problem encountered while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    /// The path that could not be processed.
    pub path: PathBuf,
    /// The underlying error, stringified.
    pub message: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Starts a traversal rooted at `root` under the current platform's
/// hidden-file policy.
///
/// # Errors
///
/// - [`ScanError::NotFound`] — the root does not exist.
/// - [`ScanError::NotADirectory`] — the root is not a directory.
/// - [`ScanError::HiddenRoot`] — the root is hidden and the policy
///   excludes hidden entries (filesystem roots exempt).
/// - [`ScanError::PermissionDenied`] / [`ScanError::Io`] — the root
///   itself cannot be listed.
pub fn walk(root: &Path, policy: &Policy) -> ScanResult<Walker> {
    Walker::start(root, policy, HiddenPolicy::for_current_os())
}

/// Lazy iterator over matching files (see [`walk`]).
///
/// Warnings collected along the way stay available after consumption
/// via [`Walker::warnings`].
#[derive(Debug)]
pub struct Walker {
    policy: Policy,
    hidden: HiddenPolicy,
    // Innermost directory last; each level keeps its path for warnings.
    pending: Vec<(PathBuf, ReadDir)>,
    warnings: Vec<ScanWarning>,
}

impl Walker {
    fn start(root: &Path, policy: &Policy, hidden: HiddenPolicy) -> ScanResult<Self> {
        if !root.exists() {
            return Err(ScanError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }
        hidden.check_root(root, policy.include_hidden)?;

        let read_dir = fs::read_dir(root).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                ScanError::PermissionDenied(root.to_path_buf())
            } else {
                ScanError::Io(e)
            }
        })?;

        tracing::debug!(root = %root.display(), recursive = policy.recursive, "starting scan");

        Ok(Self {
            policy: policy.clone(),
            hidden,
            pending: vec![(root.to_path_buf(), read_dir)],
            warnings: Vec::new(),
        })
    }

    /// Warnings collected so far (complete once the iterator is exhausted).
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Consumes the walker, handing over its warnings.
    pub fn into_warnings(self) -> Vec<ScanWarning> {
        self.warnings
    }

    fn warn(&mut self, path: &Path, err: &std::io::Error) {
        tracing::warn!(path = %path.display(), error = %err, "skipping unreadable path");
        self.warnings.push(ScanWarning {
            path: path.to_path_buf(),
            message: err.to_string(),
        });
    }

    fn visible(&self, path: &Path) -> bool {
        self.policy.include_hidden || !self.hidden.is_hidden_entry(path)
    }

    fn matches(&self, name: &str) -> bool {
        match &self.policy.filter {
            FileFilter::Extension(spec) => {
                let token = ext::normalize(name, self.policy.case_sensitive);
                spec.matches(&token, self.policy.case_sensitive)
            }
            FileFilter::Pattern(pattern) => pattern.is_match(name),
        }
    }
}

impl Iterator for Walker {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        loop {
            let (dir_path, read_dir) = self.pending.last_mut()?;

            let entry = match read_dir.next() {
                Some(Ok(entry)) => entry,
                Some(Err(err)) => {
                    let dir_path = dir_path.clone();
                    self.warn(&dir_path, &err);
                    continue;
                }
                None => {
                    // Level exhausted; its handle is dropped here.
                    self.pending.pop();
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(err) => {
                    self.warn(&path, &err);
                    continue;
                }
            };
            let visible = self.visible(&path);

            if file_type.is_dir() {
                if self.policy.recursive && visible {
                    match fs::read_dir(&path) {
                        Ok(rd) => self.pending.push((path, rd)),
                        Err(err) => self.warn(&path, &err),
                    }
                }
                continue;
            }

            // Symlinked directories are listed but never followed.
            if file_type.is_symlink() && path.is_dir() {
                continue;
            }

            if !visible {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.matches(&name) {
                return Some(FileEntry::new(path, self.policy.case_sensitive));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // The default tempdir prefix is `.tmp`, which the hidden-root check
    // would reject. Use a visible prefix.
    fn tmpdir() -> TempDir {
        tempfile::Builder::new()
            .prefix("fcount-walk")
            .tempdir()
            .unwrap()
    }

    fn names(walker: Walker) -> Vec<String> {
        let mut v: Vec<String> = walker.map(|e| e.name().to_string()).collect();
        v.sort();
        v
    }

    fn policy_with(filter: FileFilter) -> Policy {
        Policy::new(filter)
    }

    fn any_policy() -> Policy {
        Policy::default()
    }

    // === root validation ===

    #[test]
    fn walk_nonexistent_root_fails() {
        let result = walk(Path::new("/nonexistent/nowhere"), &any_policy());
        assert!(matches!(result, Err(ScanError::NotFound(_))));
    }

    #[test]
    fn walk_file_root_fails() {
        let tmp = tmpdir();
        let file = tmp.path().join("f.txt");
        fs::write(&file, "").unwrap();

        let result = walk(&file, &any_policy());
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn walk_hidden_root_fails_without_include_hidden() {
        let tmp = tmpdir();
        let hidden_dir = tmp.path().join(".secret");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.txt"), "").unwrap();

        let result = walk(&hidden_dir, &any_policy());
        assert!(matches!(result, Err(ScanError::HiddenRoot(_))));
    }

    #[test]
    fn walk_hidden_root_allowed_with_include_hidden() {
        let tmp = tmpdir();
        let hidden_dir = tmp.path().join(".secret");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.txt"), "").unwrap();

        let mut policy = any_policy();
        policy.include_hidden = true;
        let walker = walk(&hidden_dir, &policy).unwrap();
        assert_eq!(names(walker), vec!["inside.txt"]);
    }

    // === recursion ===

    #[test]
    fn recursive_walk_descends() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("top.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("nested.md"), "").unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(names(walker), vec!["nested.md", "top.txt"]);
    }

    #[test]
    fn shallow_walk_stays_at_root_level() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("top.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("nested.md"), "").unwrap();

        let mut policy = any_policy();
        policy.recursive = false;
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["top.txt"]);
    }

    #[test]
    fn shallow_walk_ignores_subdirs_regardless_of_hidden() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("top.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("nested.md"), "").unwrap();

        let mut policy = any_policy();
        policy.recursive = false;
        policy.include_hidden = true;
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["top.txt"]);
    }

    // === hidden filtering ===

    #[test]
    fn hidden_files_excluded_by_default() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("visible.txt"), "").unwrap();
        fs::write(tmp.path().join(".hidden.txt"), "").unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(names(walker), vec!["visible.txt"]);
    }

    #[test]
    fn hidden_dirs_not_descended_by_default() {
        let tmp = tmpdir();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join(".git").join("config"), "").unwrap();
        fs::write(tmp.path().join("readme.md"), "").unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(names(walker), vec!["readme.md"]);
    }

    #[test]
    fn include_hidden_descends_and_yields_dotfiles() {
        let tmp = tmpdir();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join(".git").join("config"), "").unwrap();
        fs::write(tmp.path().join(".env"), "").unwrap();
        fs::write(tmp.path().join("readme.md"), "").unwrap();

        let mut policy = any_policy();
        policy.include_hidden = true;
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec![".env", "config", "readme.md"]);
    }

    #[test]
    fn only_hidden_content_yields_successful_empty_result() {
        let tmp = tmpdir();
        fs::write(tmp.path().join(".a"), "").unwrap();
        fs::write(tmp.path().join(".b.txt"), "").unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        let entries: Vec<_> = walker.collect();
        assert!(entries.is_empty());
    }

    // === extension filtering ===

    #[test]
    fn concrete_extension_filter() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("b.TXT"), "").unwrap();
        fs::write(tmp.path().join("c.md"), "").unwrap();

        let policy = policy_with(FileFilter::Extension(ExtensionSpec::parse("txt")));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["a.txt", "b.TXT"]);
    }

    #[test]
    fn concrete_extension_filter_case_sensitive() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("b.TXT"), "").unwrap();

        let mut policy = policy_with(FileFilter::Extension(ExtensionSpec::parse("txt")));
        policy.case_sensitive = true;
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["a.txt"]);
    }

    #[test]
    fn no_extension_filter_matches_suffixless_files() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("Makefile"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let policy = policy_with(FileFilter::Extension(ExtensionSpec::NoExtension));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["Makefile"]);
    }

    #[test]
    fn any_extension_filter_matches_everything() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("Makefile"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(names(walker), vec!["Makefile", "notes.txt"]);
    }

    // === pattern filtering ===

    #[test]
    fn glob_star_pattern() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("report_v1.txt"), "").unwrap();
        fs::write(tmp.path().join("report_v2.txt"), "").unwrap();
        fs::write(tmp.path().join("summary.txt"), "").unwrap();

        let pattern = NamePattern::new("report_*", false).unwrap();
        let policy = policy_with(FileFilter::Pattern(pattern));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["report_v1.txt", "report_v2.txt"]);
    }

    #[test]
    fn glob_question_mark_and_class() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("a1.log"), "").unwrap();
        fs::write(tmp.path().join("a2.log"), "").unwrap();
        fs::write(tmp.path().join("a10.log"), "").unwrap();

        let pattern = NamePattern::new("a?.log", false).unwrap();
        let policy = policy_with(FileFilter::Pattern(pattern));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["a1.log", "a2.log"]);

        let pattern = NamePattern::new("a[12].log", false).unwrap();
        let policy = policy_with(FileFilter::Pattern(pattern));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["a1.log", "a2.log"]);
    }

    #[test]
    fn glob_negated_class() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("a1.log"), "").unwrap();
        fs::write(tmp.path().join("a2.log"), "").unwrap();

        let pattern = NamePattern::new("a[!1].log", false).unwrap();
        let policy = policy_with(FileFilter::Pattern(pattern));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["a2.log"]);
    }

    #[test]
    fn glob_case_insensitive_by_default() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("README.md"), "").unwrap();

        let pattern = NamePattern::new("readme*", false).unwrap();
        let policy = policy_with(FileFilter::Pattern(pattern));
        let walker = walk(tmp.path(), &policy).unwrap();
        assert_eq!(names(walker), vec!["README.md"]);
    }

    #[test]
    fn glob_case_sensitive_when_requested() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("README.md"), "").unwrap();

        let pattern = NamePattern::new("readme*", true).unwrap();
        let mut policy = policy_with(FileFilter::Pattern(pattern));
        policy.case_sensitive = true;
        let walker = walk(tmp.path(), &policy).unwrap();
        assert!(names(walker).is_empty());
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let result = NamePattern::new("broken[", false);
        assert!(matches!(result, Err(ScanError::InvalidPattern(_))));
    }

    // === laziness and cleanup ===

    #[test]
    fn early_termination_is_safe() {
        let tmp = tmpdir();
        for i in 0..50 {
            fs::write(tmp.path().join(format!("f{i:02}.txt")), "").unwrap();
        }

        let mut walker = walk(tmp.path(), &any_policy()).unwrap();
        let first = walker.next();
        assert!(first.is_some());
        // Dropping a partially consumed walker releases its handles.
        drop(walker);
    }

    #[test]
    fn warnings_start_empty_and_survive_consumption() {
        let tmp = tmpdir();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let mut walker = walk(tmp.path(), &any_policy()).unwrap();
        assert!(walker.warnings().is_empty());
        let count = walker.by_ref().count();
        assert_eq!(count, 1);
        assert!(walker.warnings().is_empty());
        assert!(walker.into_warnings().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_not_followed() {
        let tmp = tmpdir();
        let target = tmp.path().join("real");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("inside.txt"), "").unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link")).unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        // `inside.txt` appears once (through `real`), not twice.
        assert_eq!(names(walker), vec!["inside.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_counts_as_file() {
        let tmp = tmpdir();
        let target = tmp.path().join("real.txt");
        fs::write(&target, "data").unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link.txt")).unwrap();

        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(names(walker), vec!["link.txt", "real.txt"]);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = tmpdir();
        let walker = walk(tmp.path(), &any_policy()).unwrap();
        assert_eq!(walker.count(), 0);
    }
}
