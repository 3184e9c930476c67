//! fcount core library — directory statistics without the terminal.
//!
//! `fcount-core` walks a directory tree under a scan policy and reduces
//! what it finds into one of three result shapes: a total count, a
//! frequency-by-extension table, or a materialized list of matching
//! files. It is intentionally decoupled from argument parsing and
//! rendering so the CLI frontend (`fcount-cli`) stays a thin shell.
//!
//! # Modules
//!
//! - [`scan`] — Traversal: [`FileEntry`], [`HiddenPolicy`], the lazy [`Walker`].
//! - [`ext`] — Extension token derivation and filter specs.
//! - [`stats`] — Reductions: totals, frequency tables, match lists.
//! - [`preview`] — Text previews and the "file" utility probe.
//! - [`group`] — Extension-to-group mapping for the grouped display.
//! - [`config`] — TOML configuration (preview budget, user groups).
//! - [`error`] — Unified error type ([`ScanError`]) and alias ([`ScanResult`]).

pub mod config;
pub mod error;
pub mod ext;
pub mod group;
pub mod preview;
pub mod scan;
pub mod stats;

pub use config::Config;
pub use error::{ScanError, ScanResult};
pub use ext::{normalize, ExtensionSpec, ANY_EXTENSION, NO_EXTENSION};
pub use group::{group_extensions, GroupMap, OTHER_GROUP};
pub use preview::probe::{probe_file_utility, ProbeOutcome};
pub use preview::{
    is_text_extension, PreviewResult, PreviewStrategy, Previewer, DEFAULT_PREVIEW_CHARS,
    TEXT_EXTENSIONS,
};
pub use scan::entry::FileEntry;
pub use scan::hidden::HiddenPolicy;
pub use scan::walk::{walk, FileFilter, NamePattern, Policy, ScanWarning, Walker};
pub use stats::{
    reduce_frequency, reduce_matches, reduce_total, FrequencyTable, MatchList, MatchedFile, Total,
};

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which makes visually
/// identical names compare unequal. This helper re-composes them.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
