//! Extension grouping for the frequency display.
//!
//! A [`GroupMap`] assigns extensions to named groups (archives, images,
//! documents, ...). Extensions nobody claims land in the reserved
//! [`OTHER_GROUP`] bucket.

use std::collections::HashMap;

/// Reserved label for extensions that fit no group.
pub const OTHER_GROUP: &str = "other";

/// Built-in extension groups, used when no user configuration supplies
/// its own.
pub const DEFAULT_GROUPS: &[(&str, &[&str])] = &[
    (
        "archives",
        &[
            "7z", "arc", "arj", "bz", "bz2", "bzip2", "cab", "dar", "gz", "gzip", "jar", "lz",
            "lzma", "rar", "tar", "tbz", "tbz2", "tgz", "txz", "xz", "zip", "zipx",
        ],
    ),
    (
        "audio",
        &[
            "aac", "aif", "aiff", "amr", "cda", "flac", "m4a", "mid", "midi", "mka", "mp1", "mp2",
            "mp3", "mpa", "oga", "wav", "wave", "wma",
        ],
    ),
    (
        "audio_video",
        &["3gp", "3gp2", "3gpp", "mp4", "mpeg", "mpg", "ogg", "webm"],
    ),
    (
        "data",
        &[
            "cfg", "conf", "csv", "dat", "db", "dbf", "geojson", "ini", "json", "log", "mdb",
            "ods", "sqlite", "sqlite3", "toml", "torrent", "tsv", "xls", "xlsx", "xml", "yaml",
            "yml",
        ],
    ),
    (
        "documents",
        &[
            "abw", "bib", "doc", "docx", "epub", "latex", "markdown", "md", "odp", "odt", "pdf",
            "ppt", "pptx", "rst", "rtf", "tex", "text", "txt",
        ],
    ),
    (
        "executables",
        &[
            "apk", "app", "bash", "bat", "bin", "cmd", "com", "csh", "deb", "dll", "elf", "exe",
            "ksh", "lib", "msi", "o", "ps1", "run", "sh", "so", "zsh",
        ],
    ),
    ("fonts", &["fon", "font", "otf", "ttf", "woff", "woff2"]),
    (
        "images",
        &[
            "apng", "bmp", "dib", "djvu", "gif", "ico", "jfif", "jpeg", "jpg", "png", "svg",
            "svgz", "tif", "tiff", "webp",
        ],
    ),
    (
        "python",
        &[
            "egg", "ipynb", "py", "pyc", "pyd", "pyi", "pyo", "pyw", "pyx", "pyz", "whl",
        ],
    ),
    (
        "videos",
        &[
            "asf", "avi", "flv", "h264", "m4v", "mkv", "mov", "mpv", "ogv", "rm", "swf", "vob",
            "wmv",
        ],
    ),
];

/// Maps lower-cased extension tokens to group labels.
///
/// Lookups fold the token to lower case, so a case-sensitive scan's
/// `TXT` and `txt` resolve to the same group. The map is read-only
/// input to the grouping step once built.
#[derive(Debug, Clone, Default)]
pub struct GroupMap {
    by_ext: HashMap<String, String>,
}

impl GroupMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from the built-in [`DEFAULT_GROUPS`] table.
    pub fn defaults() -> Self {
        let mut map = Self::new();
        for (label, extensions) in DEFAULT_GROUPS {
            for ext in *extensions {
                map.insert(ext, label);
            }
        }
        map
    }

    /// Assigns an extension to a group.
    ///
    /// First definition wins: when several sources define the same
    /// extension, the one inserted first keeps it. Insertion order is
    /// therefore the priority order.
    pub fn insert(&mut self, extension: &str, group: &str) {
        self.by_ext
            .entry(extension.to_lowercase())
            .or_insert_with(|| group.to_string());
    }

    /// Looks up the group for a token, if any source defined it.
    pub fn group_of(&self, token: &str) -> Option<&str> {
        self.by_ext.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Number of mapped extensions.
    pub fn len(&self) -> usize {
        self.by_ext.len()
    }

    /// `true` when no extensions are mapped.
    pub fn is_empty(&self) -> bool {
        self.by_ext.is_empty()
    }
}

/// Buckets `(token, count)` rows by group.
///
/// Row order inside each group mirrors the order of `rows`, so the
/// caller's chosen table ordering (frequency or alphabetical) carries
/// through without re-sorting. Group labels come back sorted, with
/// [`OTHER_GROUP`] last — and only when something actually fell through.
pub fn group_extensions(
    rows: &[(String, u64)],
    map: &GroupMap,
) -> Vec<(String, Vec<(String, u64)>)> {
    let mut buckets: Vec<(String, Vec<(String, u64)>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut other: Vec<(String, u64)> = Vec::new();

    for (token, count) in rows {
        match map.group_of(token) {
            Some(label) => {
                let slot = *index.entry(label.to_string()).or_insert_with(|| {
                    buckets.push((label.to_string(), Vec::new()));
                    buckets.len() - 1
                });
                buckets[slot].1.push((token.clone(), *count));
            }
            None => other.push((token.clone(), *count)),
        }
    }

    buckets.sort_by(|a, b| a.0.cmp(&b.0));
    if !other.is_empty() {
        buckets.push((OTHER_GROUP.to_string(), other));
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(t, n)| (t.to_string(), *n)).collect()
    }

    #[test]
    fn known_extension_goes_to_its_group_unknown_to_other() {
        let mut map = GroupMap::new();
        map.insert("py", "python");
        map.insert("txt", "documents");

        let grouped = group_extensions(&rows(&[("PY", 3), ("MD", 1)]), &map);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "python");
        assert_eq!(grouped[0].1, rows(&[("PY", 3)]));
        assert_eq!(grouped[1].0, OTHER_GROUP);
        assert_eq!(grouped[1].1, rows(&[("MD", 1)]));
    }

    #[test]
    fn lookup_folds_case() {
        let mut map = GroupMap::new();
        map.insert("PNG", "images");
        assert_eq!(map.group_of("png"), Some("images"));
        assert_eq!(map.group_of("PNG"), Some("images"));
        assert_eq!(map.group_of("Png"), Some("images"));
    }

    #[test]
    fn first_definition_wins() {
        let mut map = GroupMap::new();
        map.insert("doc", "microsoft_office");
        map.insert("doc", "libre_office");
        assert_eq!(map.group_of("doc"), Some("microsoft_office"));
    }

    #[test]
    fn row_order_is_preserved_within_groups() {
        let mut map = GroupMap::new();
        map.insert("py", "python");
        map.insert("pyc", "python");

        // Frequency-descending input order must survive the grouping.
        let grouped = group_extensions(&rows(&[("PYC", 30), ("PY", 27)]), &map);
        assert_eq!(grouped[0].1, rows(&[("PYC", 30), ("PY", 27)]));
    }

    #[test]
    fn labels_are_sorted_with_other_last() {
        let mut map = GroupMap::new();
        map.insert("png", "images");
        map.insert("zip", "archives");

        let grouped = group_extensions(&rows(&[("PNG", 1), ("XYZ", 1), ("ZIP", 1)]), &map);
        let labels: Vec<&str> = grouped.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["archives", "images", OTHER_GROUP]);
    }

    #[test]
    fn other_is_omitted_when_everything_is_grouped() {
        let mut map = GroupMap::new();
        map.insert("png", "images");

        let grouped = group_extensions(&rows(&[("PNG", 2)]), &map);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].0, "images");
    }

    #[test]
    fn empty_rows_produce_no_groups() {
        let map = GroupMap::defaults();
        assert!(group_extensions(&[], &map).is_empty());
    }

    #[test]
    fn defaults_cover_common_extensions() {
        let map = GroupMap::defaults();
        assert_eq!(map.group_of("zip"), Some("archives"));
        assert_eq!(map.group_of("PNG"), Some("images"));
        assert_eq!(map.group_of("py"), Some("python"));
        assert_eq!(map.group_of("mkv"), Some("videos"));
        assert_eq!(map.group_of("definitely-unknown"), None);
        assert!(!map.is_empty());
    }

    #[test]
    fn every_extension_assigned_exactly_once() {
        let map = GroupMap::defaults();
        let table = rows(&[("ZIP", 1), ("PNG", 2), ("QQQ", 3)]);
        let grouped = group_extensions(&table, &map);

        let placed: usize = grouped.iter().map(|(_, v)| v.len()).sum();
        assert_eq!(placed, table.len());
    }
}
