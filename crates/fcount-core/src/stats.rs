//! Reductions over a traversal's entry sequence.
//!
//! Each reduction consumes the sequence exactly once and produces one
//! immutable result value. Per-entry failures (a size that cannot be
//! read, a preview that fails) are recorded inline on the result and
//! never abort the reduction. An empty sequence is a valid outcome
//! meaning "zero files found", not an error.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::preview::{PreviewResult, Previewer};
use crate::scan::entry::FileEntry;
use crate::scan::walk::ScanWarning;

/// Result of a total-count reduction.
#[derive(Debug, Clone, Default)]
pub struct Total {
    /// Number of matching files.
    pub count: u64,
    /// Per-folder counts in first-encountered order, when requested.
    pub per_folder: Option<Vec<(PathBuf, u64)>>,
    /// Combined size of the files whose size resolved, when requested.
    pub total_size: Option<u64>,
    /// Files whose size could not be read (size summing only).
    pub size_errors: Vec<ScanWarning>,
}

/// Counts entries, optionally tallying per-folder counts and sizes.
///
/// Folder keys are each entry's immediate parent, in the order folders
/// are first encountered. Size failures are collected in
/// [`Total::size_errors`] without dropping the entry from the count.
pub fn reduce_total(
    entries: impl Iterator<Item = FileEntry>,
    want_size: bool,
    want_per_folder: bool,
) -> Total {
    let mut count = 0u64;
    let mut folders: Vec<(PathBuf, u64)> = Vec::new();
    let mut folder_index: HashMap<PathBuf, usize> = HashMap::new();
    let mut total_size = 0u64;
    let mut size_errors = Vec::new();

    for entry in entries {
        count += 1;

        if want_per_folder {
            let parent = entry.parent().to_path_buf();
            match folder_index.get(&parent) {
                Some(&i) => folders[i].1 += 1,
                None => {
                    folder_index.insert(parent.clone(), folders.len());
                    folders.push((parent, 1));
                }
            }
        }

        if want_size {
            match entry.size() {
                Ok(size) => total_size += size,
                Err(err) => size_errors.push(ScanWarning {
                    path: entry.path().to_path_buf(),
                    message: err.to_string(),
                }),
            }
        }
    }

    Total {
        count,
        per_folder: want_per_folder.then_some(folders),
        total_size: want_size.then_some(total_size),
        size_errors,
    }
}

/// Occurrence counts keyed by extension token.
///
/// Insertion order is remembered only to break ties in the
/// frequency-descending ordering; it carries no other meaning.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    rows: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for a token, registering it on first sight.
    pub fn increment(&mut self, token: &str) {
        match self.index.get(token) {
            Some(&i) => self.rows[i].1 += 1,
            None => {
                self.index.insert(token.to_string(), self.rows.len());
                self.rows.push((token.to_string(), 1));
            }
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when no files were counted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for a single token, if present.
    pub fn get(&self, token: &str) -> Option<u64> {
        self.index.get(token).map(|&i| self.rows[i].1)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|(_, n)| n).sum()
    }

    /// Width in characters of the widest token.
    pub fn max_token_width(&self) -> usize {
        self.rows
            .iter()
            .map(|(t, _)| t.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Rows ordered by descending count; ties keep first-seen order.
    pub fn by_frequency(&self) -> Vec<(String, u64)> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    /// Rows in case-fold-first alphabetical order.
    ///
    /// The case-folded form compares first, then the original string
    /// breaks ties, so upper-case variants sort before lower-case ones
    /// of the same letters: `JS`, `Py`, `py`.
    pub fn alphabetical(&self) -> Vec<(String, u64)> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            a.0.to_lowercase()
                .cmp(&b.0.to_lowercase())
                .then_with(|| a.0.cmp(&b.0))
        });
        rows
    }
}

/// Tallies entries by extension token.
pub fn reduce_frequency(entries: impl Iterator<Item = FileEntry>) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for entry in entries {
        table.increment(entry.extension());
    }
    table
}

/// One materialized search hit.
#[derive(Debug, Clone)]
pub struct MatchedFile {
    /// The underlying file entry.
    pub entry: FileEntry,
    /// Resolved size, when sizes were requested and the read succeeded.
    pub size: Option<u64>,
    /// Why the size could not be read, if it couldn't.
    pub size_error: Option<String>,
    /// Preview outcome, when previews were requested.
    pub preview: Option<PreviewResult>,
}

/// Materialized list of search hits.
#[derive(Debug, Clone, Default)]
pub struct MatchList {
    /// The hits, in traversal order.
    pub files: Vec<MatchedFile>,
}

impl MatchList {
    /// Number of hits.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// `true` when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of the sizes that resolved.
    pub fn total_size(&self) -> u64 {
        self.files.iter().filter_map(|f| f.size).sum()
    }
}

/// Materializes entries, optionally resolving sizes and previews.
///
/// A failure on one file is recorded on that file alone; the entry is
/// kept and the reduction continues.
pub fn reduce_matches(
    entries: impl Iterator<Item = FileEntry>,
    want_sizes: bool,
    previewer: Option<&Previewer>,
) -> MatchList {
    let mut files = Vec::new();

    for entry in entries {
        let (size, size_error) = if want_sizes {
            match entry.size() {
                Ok(size) => (Some(size), None),
                Err(err) => (None, Some(err.to_string())),
            }
        } else {
            (None, None)
        };

        let preview = previewer.map(|p| p.preview(entry.path()));

        files.push(MatchedFile {
            entry,
            size,
            size_error,
            preview,
        });
    }

    MatchList { files }
}
