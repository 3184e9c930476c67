//! Plain-text rendering of scan results.
//!
//! Everything here returns strings; `main` decides where they go.
//! Results land on stdout, diagnostics on stderr.

use std::path::Path;

use fcount_core::{
    ExtensionSpec, MatchList, PreviewResult, ScanWarning, Total, ANY_EXTENSION, NO_EXTENSION,
    TEXT_EXTENSIONS,
};

/// What kind of scan the start message announces.
#[derive(Debug, Clone, Copy)]
pub enum ScanKind<'a> {
    /// Frequency table over every file.
    Frequency,
    /// Total count for an extension filter (raw CLI value).
    Total(&'a str),
    /// Search listing for an extension filter (raw CLI value).
    ExtensionSearch(&'a str),
    /// Search listing for a filename glob.
    PatternSearch(&'a str),
}

fn describe_extension(raw: &str) -> String {
    match ExtensionSpec::parse(raw) {
        ExtensionSpec::Any => "with any extension".to_string(),
        ExtensionSpec::NoExtension => "without an extension".to_string(),
        ExtensionSpec::Concrete(ext) => format!("with extension '{ext}'"),
    }
}

/// One-line banner describing the scan about to run.
pub fn start_message(
    kind: ScanKind<'_>,
    recursive: bool,
    include_hidden: bool,
    case_sensitive: bool,
    location: &Path,
) -> String {
    let action = match kind {
        ScanKind::Frequency => "counting files by extension".to_string(),
        ScanKind::Total(raw) => format!("counting files {}", describe_extension(raw)),
        ScanKind::ExtensionSearch(raw) => {
            format!("searching for files {}", describe_extension(raw))
        }
        ScanKind::PatternSearch(pattern) => {
            format!("searching for files matching '{pattern}'")
        }
    };
    let hidden = if include_hidden {
        "including hidden files and folders"
    } else {
        "ignoring hidden files and folders"
    };
    let case = if case_sensitive {
        ", treating extensions as case-sensitive"
    } else {
        ""
    };

    let sentence = if recursive {
        format!("Recursively {action}")
    } else {
        let mut chars = action.chars();
        match chars.next() {
            Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
            None => action,
        }
    };
    format!("{sentence}, {hidden}{case}, in {}", location.display())
}

/// Formats a byte count for humans.
pub fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = UNITS[0];
    for &u in UNITS {
        value /= 1024.0;
        unit = u;
        if value < 1024.0 {
            break;
        }
    }
    format!("{value:.1} {unit}")
}

/// Two-column extension/frequency table with a TOTAL row.
pub fn two_column_table(rows: &[(String, u64)], total: u64) -> String {
    let ext_width = rows
        .iter()
        .map(|(t, _)| t.chars().count())
        .max()
        .unwrap_or(0)
        .max("EXTENSION".len());
    let freq_width = total.to_string().len().max("FREQ.".len());

    let divider = format!("{}-+-{}\n", "-".repeat(ext_width), "-".repeat(freq_width));

    let mut out = String::new();
    out.push_str(&format!(
        "{:>ext_width$} | {:>freq_width$}\n",
        "EXTENSION", "FREQ."
    ));
    out.push_str(&divider);
    for (token, count) in rows {
        out.push_str(&format!("{token:>ext_width$} | {count:>freq_width$}\n"));
    }
    out.push_str(&divider);
    out.push_str(&format!("{:>ext_width$} | {total:>freq_width$}\n", "TOTAL"));
    out
}

/// Grouped frequency display: one block per group label.
pub fn grouped_table(grouped: &[(String, Vec<(String, u64)>)]) -> String {
    let mut out = String::new();
    for (label, rows) in grouped {
        let group_total: u64 = rows.iter().map(|(_, n)| n).sum();
        let heading = label.replace('_', " ").to_uppercase();
        out.push_str(&format!("+ {heading}({group_total})\n"));
        for (token, count) in rows {
            out.push_str(&format!("    {token}: {count}\n"));
        }
    }
    out
}

/// Report for a total-count reduction.
pub fn total_report(total: &Total) -> String {
    let mut out = String::new();

    if let Some(folders) = &total.per_folder {
        if !folders.is_empty() {
            out.push_str("Files found in folders:\n");
            for (folder, count) in folders {
                out.push_str(&format!("  {}: {count}\n", folder.display()));
            }
            out.push('\n');
        }
    }

    out.push_str(&format!("Total number of files: {}\n", total.count));

    if let Some(size) = total.total_size {
        out.push_str(&format!("Total combined size: {}\n", human_size(size)));
        if !total.size_errors.is_empty() {
            out.push_str(&format!(
                "({} file size(s) could not be read.)\n",
                total.size_errors.len()
            ));
        }
    }
    out
}

fn preview_line(preview: &PreviewResult) -> String {
    match preview {
        PreviewResult::Text(text) => text.clone(),
        PreviewResult::Empty => "[This file is empty.]".to_string(),
        PreviewResult::Unsupported(what) => {
            format!("[A preview of this file type is not implemented: {what}.]")
        }
        PreviewResult::Error(message) => format!("[Preview failed: {message}]"),
    }
}

/// Report for a search listing.
pub fn match_list_report(list: &MatchList, with_sizes: bool) -> String {
    let mut out = String::new();

    for file in &list.files {
        let path = file.entry.path().display();
        match (&file.size, &file.size_error) {
            (Some(size), _) => out.push_str(&format!("{path} ({})\n", human_size(*size))),
            (None, Some(err)) => out.push_str(&format!("{path} (size unavailable: {err})\n")),
            (None, None) => out.push_str(&format!("{path}\n")),
        }
        if let Some(preview) = &file.preview {
            out.push_str(&format!("    {}\n", preview_line(preview)));
        }
    }

    if !list.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!("Found {} file(s).\n", list.len()));
    if with_sizes {
        out.push_str(&format!(
            "Total combined size: {}.\n",
            human_size(list.total_size())
        ));
    }
    out
}

/// Info page for `--supported-types`.
pub fn supported_types_message() -> String {
    let mut out = String::new();
    out.push_str("Extension filter sentinels:\n");
    out.push_str(&format!("  '{ANY_EXTENSION}'  any extension\n"));
    out.push_str(&format!("  '{NO_EXTENSION}'   no extension\n\n"));
    out.push_str("Extensions with built-in text preview support:\n");
    out.push_str(&format!("  {}\n", TEXT_EXTENSIONS.join(", ")));
    out.push_str("\nFor other file types, install the \"file\" utility and use\n");
    out.push_str("--preview --shell-command file to classify files by content.\n");
    out
}

/// Stderr summary of directories skipped during the scan.
pub fn warning_summary(warnings: &[ScanWarning]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let mut out = String::new();
    if warnings.len() == 1 {
        out.push_str("1 path was skipped during the scan:\n");
    } else {
        out.push_str(&format!(
            "{} paths were skipped during the scan:\n",
            warnings.len()
        ));
    }
    for warning in warnings {
        out.push_str(&format!("  {warning}\n"));
    }
    Some(out)
}
