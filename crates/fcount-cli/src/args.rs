//! Command-line argument grammar.

use std::path::PathBuf;

use clap::Parser;

/// Count files, grouped by extension, in a directory.
///
/// By default files are counted recursively in the current working
/// directory and all of its subdirectories, and a table shows the
/// frequency of each file extension. Hidden files and folders are
/// ignored unless `--all` is given, and extensions are treated
/// case-insensitively unless `--case-sensitive` is given.
#[derive(Debug, Parser)]
#[command(name = "fcount", version, about, verbatim_doc_comment)]
pub struct Cli {
    /// Directory to scan. Defaults to the current working directory.
    pub path: Option<PathBuf>,

    /// Include hidden files and folders.
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Do not descend into subdirectories.
    #[arg(long = "no-recursion", visible_alias = "nr")]
    pub no_recursion: bool,

    /// Distinguish case variations in extensions and patterns.
    #[arg(short = 'c', long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Count the total number of files with the given extension
    /// ('..' for any extension, '.' for no extension).
    #[arg(
        short = 't',
        long = "total",
        value_name = "EXTENSION",
        conflicts_with_all = ["file_extension", "pattern"]
    )]
    pub total: Option<String>,

    /// With --total: list the folders the files were found in.
    #[arg(long = "show-folders", visible_alias = "sf", requires = "total")]
    pub show_folders: bool,

    /// With --total: sum the sizes of the files found.
    #[arg(long = "total-size", visible_alias = "ts", requires = "total")]
    pub total_size: bool,

    /// Sort the frequency table alphabetically instead of by count.
    #[arg(long = "sort-alpha", visible_alias = "alpha")]
    pub sort_alpha: bool,

    /// Group the frequency table by file type.
    #[arg(short = 'g', long = "group")]
    pub group: bool,

    /// List files with the given extension
    /// ('..' for any extension, '.' for no extension).
    #[arg(
        long = "file-extension",
        visible_alias = "fe",
        value_name = "EXTENSION",
        conflicts_with = "pattern"
    )]
    pub file_extension: Option<String>,

    /// List files whose name matches a glob pattern (*, ?, [seq], [!seq]).
    #[arg(long = "filename-match", visible_alias = "fm", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Show a short text preview for each listed file.
    #[arg(short = 'p', long = "preview")]
    pub preview: bool,

    /// Number of characters shown per preview.
    #[arg(
        long = "preview-size",
        visible_alias = "ps",
        value_name = "CHARS",
        requires = "preview"
    )]
    pub preview_size: Option<usize>,

    /// Show each listed file's size.
    #[arg(long = "file-sizes", visible_alias = "fs")]
    pub file_sizes: bool,

    /// Classify files with the named external utility before previewing.
    #[arg(
        long = "shell-command",
        visible_alias = "sc",
        value_name = "UTILITY",
        value_parser = ["file"]
    )]
    pub shell_command: Option<String>,

    /// List the extensions with built-in text preview support.
    #[arg(long = "supported-types", visible_alias = "st")]
    pub supported_types: bool,

    /// Path to a TOML configuration file (preview size, extension groups).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("fcount").chain(args.iter().copied()))
    }

    #[test]
    fn cli_grammar_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert!(cli.path.is_none());
        assert!(!cli.all);
        assert!(!cli.no_recursion);
        assert!(!cli.case_sensitive);
        assert!(cli.total.is_none());
        assert!(cli.file_extension.is_none());
        assert!(cli.pattern.is_none());
        assert!(!cli.preview);
    }

    #[test]
    fn positional_path() {
        let cli = parse(&["/tmp/somewhere"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/somewhere")));
    }

    #[test]
    fn filter_modes_are_mutually_exclusive() {
        assert!(parse(&["--total", "txt", "--file-extension", "md"]).is_err());
        assert!(parse(&["--total", "txt", "--filename-match", "*.md"]).is_err());
        assert!(parse(&["--file-extension", "txt", "--filename-match", "*.md"]).is_err());
    }

    #[test]
    fn total_extras_require_total() {
        assert!(parse(&["--show-folders"]).is_err());
        assert!(parse(&["--total-size"]).is_err());
        assert!(parse(&["--total", "..", "--show-folders", "--total-size"]).is_ok());
    }

    #[test]
    fn preview_size_requires_preview() {
        assert!(parse(&["--preview-size", "100"]).is_err());
        let cli = parse(&["--file-extension", "txt", "-p", "--preview-size", "100"]).unwrap();
        assert_eq!(cli.preview_size, Some(100));
    }

    #[test]
    fn shell_command_accepts_only_file() {
        assert!(parse(&["--shell-command", "magic"]).is_err());
        let cli = parse(&["--shell-command", "file"]).unwrap();
        assert_eq!(cli.shell_command.as_deref(), Some("file"));
    }

    #[test]
    fn aliases_parse() {
        let cli = parse(&["--nr", "--fe", "txt", "--fs"]).unwrap();
        assert!(cli.no_recursion);
        assert_eq!(cli.file_extension.as_deref(), Some("txt"));
        assert!(cli.file_sizes);
    }

    #[test]
    fn sentinel_extensions_pass_through() {
        let cli = parse(&["--total", ".."]).unwrap();
        assert_eq!(cli.total.as_deref(), Some(".."));
        let cli = parse(&["--file-extension", "."]).unwrap();
        assert_eq!(cli.file_extension.as_deref(), Some("."));
    }
}
